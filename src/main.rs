mod calls;
mod components;
mod config;
mod cookie;
mod model;
mod net;
mod protocol;
mod state;
mod util;
mod validate;

use components::app::App;

fn main() {
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}
