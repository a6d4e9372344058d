mod app;
mod config;
mod conversation;
mod message;
mod mock;
mod nav;
mod state;
mod store;

use app::*;
use leptos::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(|| {
        view! { <App /> }
    })
}
