use chrono::Local;
use leptos::ev;
use leptos::html::Div;
use leptos::prelude::*;
use web_sys::{ScrollBehavior, ScrollIntoViewOptions};

use crate::components::message_bubble::MessageBubble;
use crate::state::AppState;
use crate::timeline::format_time;

/// Live chat with the assistant.
#[component]
pub fn ChatPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    state.resume_session();

    let thread = state.thread;
    let is_empty = Memo::new(move |_| thread.with(|t| t.messages.is_empty()));
    let active = Memo::new(move |_| thread.with(|t| t.active));
    let title = Memo::new(move |_| thread.with(|t| t.title.clone()));
    let busy = Memo::new(move |_| thread.with(|t| t.busy()));
    let end_ref = NodeRef::<Div>::new();

    // Keep the newest message in view
    Effect::new(move |_| {
        let _count = thread.with(|t| t.messages.len());
        if let Some(el) = end_ref.get() {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            el.scroll_into_view_with_scroll_into_view_options(&options);
        }
    });

    view! {
        <section class="page chat-page">
            <div class="chat-header">
                <div>
                    <h1>{move || title.get().unwrap_or_else(|| "New Conversation".to_string())}</h1>
                    <p class="muted">
                        {move || if active.get() { "Conversation active" } else { "Start a conversation" }}
                    </p>
                </div>
                <Show when=move || active.get()>
                    <button
                        class="danger-btn"
                        on:click=move |_| state.end_conversation()
                        disabled=move || busy.get()
                    >
                        {move || if thread.with(|t| t.ending) { "Ending..." } else { "End Conversation" }}
                    </button>
                </Show>
            </div>

            <div class="messages-container">
                {move || {
                    if is_empty.get() {
                        view! {
                            <div class="empty-state">
                                <h3>"Start a Conversation"</h3>
                                <p class="muted">"Type a message below to begin chatting with the AI"</p>
                            </div>
                        }
                            .into_any()
                    } else {
                        view! {
                            <For
                                each=move || thread.with(|t| t.messages.clone())
                                key=|m| (m.key.clone(), m.delivery)
                                let:msg
                            >
                                <MessageBubble
                                    sender=msg.sender
                                    content=msg.content.clone()
                                    timestamp=msg
                                        .sent_at
                                        .map(|ts| format_time(&ts.with_timezone(&Local)))
                                        .unwrap_or_default()
                                    delivery=msg.delivery
                                />
                            </For>
                        }
                            .into_any()
                    }
                }}
                <div node_ref=end_ref></div>
            </div>

            <ChatInput />
        </section>
    }
}

/// Chat input form with textarea and send button.
#[component]
fn ChatInput() -> impl IntoView {
    let state = expect_context::<AppState>();
    let (input, set_input) = signal(String::new());
    let is_sending = Memo::new(move |_| state.thread.with(|t| t.sending));
    let is_busy = Memo::new(move |_| state.thread.with(|t| t.busy()));

    let send = move || {
        let text = input.get_untracked();
        if text.trim().is_empty() || is_busy.get_untracked() {
            return;
        }
        set_input.set(String::new());
        state.send_message(text);
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
                    rows="2"
                    placeholder="Type your message... (Press Enter to send, Shift+Enter for new line)"
                    prop:value=input
                    on:input=move |ev| {
                        set_input.set(event_target_value(&ev));
                    }
                    on:keydown=on_keydown
                />
                <button
                    class="send-btn"
                    on:click=move |_| send()
                    disabled=move || is_busy.get() || input.get().trim().is_empty()
                >
                    {move || if is_sending.get() { "Sending…" } else { "Send" }}
                </button>
            </div>
        </div>
    }
}
