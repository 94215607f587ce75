pub mod client;
pub mod messages;
pub mod navigation;
pub mod notice;
pub mod overview;
pub mod table;

pub use client::{ClientAction, ClientState, Connection};
pub use navigation::Page;
pub use notice::Notice;
