use chrono::Local;
use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::chat::Delivery;
use crate::components::message_bubble::MessageBubble;
use crate::models::Conversation;
use crate::pages::BackButton;
use crate::state::AppState;
use crate::timeline::{build_timeline, conversation_date, format_date, TimelineEntry};

/// A past conversation: summary plus its full history.
#[component]
pub fn ConversationDetailPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let params = use_params_map();

    // Deep links land here before the dashboard has loaded anything
    if !state.loaded.get_untracked() && !state.loading.get_untracked() {
        state.load_conversations();
    }

    let conversation = Memo::new(move |_| {
        let id = params.read().get("id").unwrap_or_default();
        state.find_conversation(&id)
    });

    view! {
        <section class="page narrow">
            {move || {
                let lookup = Lookup::new(
                    conversation.get(),
                    state.loading.get() || !state.loaded.get(),
                    state.load_error.get(),
                );
                match lookup {
                    Lookup::Found(conversation) => {
                        view! { <ConversationView conversation=conversation /> }.into_any()
                    }
                    Lookup::Loading => {
                        view! { <div class="placeholder">"Loading conversation..."</div> }.into_any()
                    }
                    Lookup::Failed(error) => {
                        view! {
                            <div class="not-found">
                                <h1>"Could not load conversations"</h1>
                                <p class="error">{error}</p>
                                <BackButton />
                            </div>
                        }
                            .into_any()
                    }
                    Lookup::Missing => {
                        view! {
                            <div class="not-found">
                                <h1>"Conversation Not Found"</h1>
                                <BackButton />
                            </div>
                        }
                            .into_any()
                    }
                }
            }}
        </section>
    }
}

/// What the detail page can show for the id in the URL.
#[derive(Debug, PartialEq)]
enum Lookup {
    Found(Conversation),
    Loading,
    Failed(String),
    Missing,
}

impl Lookup {
    fn new(found: Option<Conversation>, loading: bool, load_error: Option<String>) -> Self {
        match (found, load_error) {
            (Some(conversation), _) => Lookup::Found(conversation),
            _ if loading => Lookup::Loading,
            (None, Some(error)) => Lookup::Failed(error),
            (None, None) => Lookup::Missing,
        }
    }
}

#[component]
fn ConversationView(conversation: Conversation) -> impl IntoView {
    let date = conversation_date(&conversation)
        .map(|ts| format_date(&ts.with_timezone(&Local)))
        .unwrap_or_default();
    let summary = conversation.summary.clone().filter(|s| !s.trim().is_empty());
    let entries = build_timeline(&conversation.messages, &Local);

    let history = if entries.is_empty() {
        view! { <div class="placeholder">"No messages in this conversation"</div> }.into_any()
    } else {
        entries
            .into_iter()
            .map(|entry| match entry {
                TimelineEntry::DateSeparator(label) => {
                    view! { <div class="date-separator"><span>{label}</span></div> }.into_any()
                }
                TimelineEntry::Message { message, time_label } => view! {
                    <MessageBubble
                        sender=message.sender
                        content=message.content
                        timestamp=time_label
                        delivery=Delivery::Delivered
                    />
                }
                .into_any(),
            })
            .collect_view()
            .into_any()
    };

    view! {
        <BackButton />

        <div class="card detail-header">
            <h1>{conversation.display_title().to_string()}</h1>
            <p class="muted">{date}</p>
            {summary.map(|summary| view! {
                <div class="summary-box">
                    <h3>"AI Summary"</h3>
                    <p class="muted">{summary}</p>
                </div>
            })}
        </div>

        <div class="card">
            <h2>"Conversation History"</h2>
            {history}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conversation(id: &str) -> Conversation {
        Conversation {
            id: id.to_string(),
            title: Some("Trip planning".into()),
            summary: None,
            started_at: None,
            messages: Vec::new(),
        }
    }

    #[test]
    fn cached_conversation_is_shown_even_if_a_reload_failed() {
        let lookup = Lookup::new(Some(conversation("3")), false, Some("Network error".into()));
        assert_eq!(lookup, Lookup::Found(conversation("3")));
    }

    #[test]
    fn failed_load_reports_the_error_instead_of_not_found() {
        let lookup = Lookup::new(None, false, Some("Server error: 500".into()));
        assert_eq!(lookup, Lookup::Failed("Server error: 500".into()));
    }

    #[test]
    fn unknown_id_after_a_good_load_is_missing() {
        assert_eq!(Lookup::new(None, false, None), Lookup::Missing);
        assert_eq!(Lookup::new(None, true, None), Lookup::Loading);
    }
}
