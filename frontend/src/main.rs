mod api;
mod chat;
mod components;
mod dashboard;
mod format;
mod models;
mod pages;
mod resource;
mod state;

use leptos::mount::mount_to_body;
use leptos::prelude::*;

use components::sidebar::Sidebar;
use state::AppState;

/// Root application component.
#[component]
fn App() -> impl IntoView {
    let state = AppState::provide();

    view! {
        <div class="app-container">
            <Sidebar />
            <main class="page-area">{move || pages::page_view(state.page.get())}</main>
        </div>
    }
}

fn main() {
    console_log::init_with_level(log::Level::Debug).expect("Failed to init logger");
    mount_to_body(App);
}
