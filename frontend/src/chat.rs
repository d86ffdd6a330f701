//! The live chat thread, kept free of any UI types.
//!
//! A send goes through three steps: [`ChatThread::begin_send`] appends the
//! user's message optimistically and says whether a conversation has to be
//! created first; the caller talks to the backend; then either
//! [`ChatThread::reply_received`] or [`ChatThread::send_failed`] settles the
//! pending message.

use chrono::{DateTime, Utc};

use crate::models::{AiMessage, Message, Sender};
use crate::timeline::{parse_timestamp, sort_messages};

/// Where a message stands with the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Delivery {
    Pending,
    Delivered,
    Failed,
}

/// A message as shown in the chat view.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    /// Server id when known, otherwise a `local-N` key.
    pub key: String,
    pub sender: Sender,
    pub content: String,
    pub sent_at: Option<DateTime<Utc>>,
    pub delivery: Delivery,
}

/// What the caller has to do for a message accepted by `begin_send`.
#[derive(Clone, Debug, PartialEq)]
pub struct SendPlan {
    pub user_key: String,
    pub text: String,
    /// `None` when the conversation must be created before sending.
    pub conversation_id: Option<String>,
    /// Whether this message started a new conversation.
    pub started: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChatThread {
    pub conversation_id: Option<String>,
    pub active: bool,
    pub title: Option<String>,
    pub messages: Vec<ChatMessage>,
    pub sending: bool,
    /// Set while the backend is being told the conversation is over.
    pub ending: bool,
    ended: bool,
    next_local_id: u64,
}

impl ChatThread {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts a user message. Returns `None` for blank text, while the
    /// previous message is still on its way or while the conversation is
    /// being ended.
    pub fn begin_send(&mut self, text: &str, now: DateTime<Utc>) -> Option<SendPlan> {
        let text = text.trim();
        if text.is_empty() || self.busy() {
            return None;
        }

        let started = !self.active;
        if started {
            if self.ended {
                self.start_over();
            }
            self.active = true;
        }

        let user_key = self.local_key();
        self.messages.push(ChatMessage {
            key: user_key.clone(),
            sender: Sender::User,
            content: text.to_string(),
            sent_at: Some(now),
            delivery: Delivery::Pending,
        });
        self.sending = true;

        Some(SendPlan {
            user_key,
            text: text.to_string(),
            conversation_id: self.conversation_id.clone(),
            started,
        })
    }

    pub fn conversation_created(&mut self, conversation_id: String) {
        self.conversation_id = Some(conversation_id);
    }

    /// Settles the pending message and appends the assistant's answer, if the
    /// backend sent one.
    pub fn reply_received(&mut self, user_key: &str, reply: Option<AiMessage>, now: DateTime<Utc>) {
        self.sending = false;
        self.set_delivery(user_key, Delivery::Delivered);

        if let Some(reply) = reply {
            let key = match reply.id {
                Some(id) => id,
                None => self.local_key(),
            };
            self.messages.push(ChatMessage {
                key,
                sender: Sender::Ai,
                content: reply.content.unwrap_or_default(),
                sent_at: Some(now),
                delivery: Delivery::Delivered,
            });
        }
    }

    pub fn send_failed(&mut self, user_key: &str) {
        self.sending = false;
        self.set_delivery(user_key, Delivery::Failed);
    }

    pub fn can_end(&self) -> bool {
        self.active && !self.messages.is_empty()
    }

    /// Whether a message or an end request is still in flight.
    pub fn busy(&self) -> bool {
        self.sending || self.ending
    }

    /// Claims the end request. Refused while a message is in flight, since the
    /// conversation may not exist on the backend yet, and while another end
    /// request is running.
    pub fn begin_end(&mut self) -> bool {
        if !self.can_end() || self.busy() {
            return false;
        }
        self.ending = true;
        true
    }

    /// Marks the conversation over. The thread stays on screen until the
    /// next message starts a new one.
    pub fn ended(&mut self, title: Option<String>) {
        self.active = false;
        self.ending = false;
        self.ended = true;
        if let Some(title) = title.filter(|t| !t.trim().is_empty()) {
            self.title = Some(title);
        }
    }

    /// Restores a conversation from the backend's history. Returns `false`
    /// (and changes nothing) when the history is empty or the thread already
    /// holds a conversation of its own.
    pub fn resume(&mut self, conversation_id: String, history: &[Message]) -> bool {
        if history.is_empty() || !self.is_blank() {
            return false;
        }

        self.messages = sort_messages(history)
            .into_iter()
            .map(|m| ChatMessage {
                sent_at: m.timestamp.as_deref().and_then(parse_timestamp),
                key: m.id,
                sender: m.sender,
                content: m.content,
                delivery: Delivery::Delivered,
            })
            .collect();
        self.conversation_id = Some(conversation_id);
        self.active = true;
        self.ended = false;
        true
    }

    fn is_blank(&self) -> bool {
        !self.sending && self.conversation_id.is_none() && self.messages.is_empty()
    }

    fn start_over(&mut self) {
        self.conversation_id = None;
        self.title = None;
        self.messages.clear();
        self.ended = false;
    }

    fn set_delivery(&mut self, key: &str, delivery: Delivery) {
        if let Some(msg) = self.messages.iter_mut().find(|m| m.key == key) {
            msg.delivery = delivery;
        }
    }

    fn local_key(&mut self) -> String {
        self.next_local_id += 1;
        format!("local-{}", self.next_local_id)
    }
}
