pub mod app;
pub mod dashboard;
pub mod data_table;
pub mod forms;
pub mod game_settings;
pub mod game_view;
pub mod help;
pub mod home;
pub mod message_panel;
pub mod moderator;
pub mod notice_bar;
pub mod operator;
pub mod overview_tree;
pub mod page_view;
pub mod top_bar;
pub mod user_pages;

pub use app::ClientContext;
