use leptos::prelude::*;

use crate::components::chat::ChatBot;

#[component]
pub fn AssistantPage() -> impl IntoView {
    view! {
        <section class="assistant-page">
            <ChatBot />
        </section>
    }
}
