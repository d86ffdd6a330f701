use chrono::Local;
use leptos::prelude::*;

use crate::models::Conversation;
use crate::timeline::{conversation_date, format_card_date};

/// Dashboard entry linking to the conversation's detail page.
#[component]
pub fn ConversationCard(conversation: Conversation) -> impl IntoView {
    let href = format!("/conversation/{}", conversation.id);
    let date = conversation_date(&conversation)
        .map(|ts| format_card_date(&ts.with_timezone(&Local)))
        .unwrap_or_default();
    let count = conversation.message_count();

    view! {
        <a class="card conversation-card" href=href>
            <div class="card-body">
                <h3 class="card-title">{conversation.display_title().to_string()}</h3>
                <p class="card-summary">{conversation.display_summary().to_string()}</p>
                <div class="card-meta">
                    <span>{date}</span>
                    <span>{format!("{count} messages")}</span>
                </div>
            </div>
        </a>
    }
}
