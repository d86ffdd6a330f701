use leptos::prelude::*;

use crate::chat::Delivery;
use crate::models::Sender;

/// A single chat message bubble.
#[component]
pub fn MessageBubble(
    sender: Sender,
    content: String,
    /// Already formatted for display; may be empty.
    timestamp: String,
    delivery: Delivery,
) -> impl IntoView {
    let css_class = format!("message {}", sender.as_str());
    let avatar = match sender {
        Sender::User => "You",
        Sender::Ai => "AI",
    };
    let status = match delivery {
        Delivery::Pending => Some("Sending…"),
        Delivery::Failed => Some("Not delivered"),
        Delivery::Delivered => None,
    };

    view! {
        <div class=css_class>
            <div class="avatar">{avatar}</div>
            <div class="bubble-column">
                <div class="bubble">{content}</div>
                <span class="message-meta">
                    {timestamp}
                    {status.map(|s| view! { <span class="delivery">{s}</span> })}
                </span>
            </div>
        </div>
    }
}
