use leptos::ev;
use leptos::prelude::*;

use crate::chat::{ChatTurn, Role, SUGGESTIONS, intent_label};
use crate::components::dashboard::DashboardView;
use crate::state::ChatState;

/// Chat assistant: transcript, inline dashboards and the input box.
/// The transcript is dropped when the component unmounts.
#[component]
pub fn ChatBot() -> impl IntoView {
    let chat = ChatState::new();

    view! {
        <section class="chat-area">
            <div class="chat-header">
                <h2>"AI assistant"</h2>
                <span class="chat-status">
                    {move || if chat.is_busy() { "Thinking…" } else { "Online" }}
                </span>
            </div>

            <div class="messages-container">
                <For
                    each=move || chat.session.with(|s| s.turns().to_vec())
                    key=|turn| turn.id.clone()
                    let:turn
                >
                    <MessageBubble turn=turn />
                </For>
                {move || {
                    chat.is_busy()
                        .then(|| {
                            view! {
                                <div class="message assistant">
                                    <div class="typing-indicator">
                                        <span></span>
                                        <span></span>
                                        <span></span>
                                    </div>
                                </div>
                            }
                        })
                }}
            </div>

            <ChatInput chat=chat />
        </section>
    }
}

/// A single transcript entry, with its dashboard when the reply carried one.
#[component]
fn MessageBubble(turn: ChatTurn) -> impl IntoView {
    let css_class = match turn.role {
        Role::User => "message user",
        Role::Assistant => "message assistant",
    };
    let time = turn.created_at.with_timezone(&chrono::Local).format("%H:%M").to_string();
    let badge = turn.intent.as_deref().and_then(intent_label);

    view! {
        <div class=css_class>
            <div class="message-text">{turn.text}</div>
            {turn.dashboard.map(|spec| view! { <DashboardView spec=spec /> })}
            <div class="message-meta">
                <span class="message-time">{time}</span>
                {badge.map(|label| view! { <span class="intent-badge">{label}</span> })}
            </div>
        </div>
    }
}

/// Input box with send button and suggestion chips.
#[component]
fn ChatInput(chat: ChatState) -> impl IntoView {
    let (input, set_input) = signal(String::new());

    let is_sending = move || chat.is_busy();

    let send = move || {
        let text = input.get_untracked().trim().to_string();
        if text.is_empty() || chat.is_busy() {
            return;
        }
        set_input.set(String::new());
        chat.send_message(text);
    };

    let on_keydown = move |ev: ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            send();
        }
    };

    view! {
        <div class="input-area">
            <div class="input-row">
                <textarea
                    rows="1"
                    placeholder="Ask about revenue, forecasts or dashboards… (Enter to send)"
                    prop:value=input
                    on:input=move |ev| {
                        set_input.set(event_target_value(&ev));
                    }
                    on:keydown=on_keydown
                    disabled=is_sending
                />
                <button
                    class="send-btn"
                    on:click=move |_| send()
                    disabled=move || is_sending() || input.get().trim().is_empty()
                >
                    {move || if is_sending() { "Sending…" } else { "Send" }}
                </button>
            </div>
            <div class="suggestions">
                {SUGGESTIONS
                    .iter()
                    .map(|&prompt| {
                        view! {
                            <button class="suggestion-chip" on:click=move |_| set_input.set(prompt.to_string())>
                                {prompt}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
