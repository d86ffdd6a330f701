use chrono::Utc;
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ApiError};
use crate::chat::{ChatThread, SendPlan};
use crate::filter::filter_conversations;
use crate::models::{AiMessage, Conversation, QueryResult};
use crate::session;

/// How long a toast stays on screen.
const TOAST_MS: u32 = 4_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastVariant {
    Default,
    Destructive,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

/// Shared application state, provided via Leptos context.
#[derive(Clone, Copy)]
pub struct AppState {
    // --- Dashboard ---
    pub conversations: RwSignal<Vec<Conversation>>,
    pub loading: RwSignal<bool>,
    /// Set once the first list request has finished, successfully or not.
    pub loaded: RwSignal<bool>,
    pub load_error: RwSignal<Option<String>>,
    pub search: RwSignal<String>,

    // --- Chat ---
    pub thread: RwSignal<ChatThread>,

    // --- Intelligence ---
    pub query_input: RwSignal<String>,
    pub query_results: RwSignal<Vec<QueryResult>>,
    pub searching: RwSignal<bool>,

    // --- Notifications ---
    pub toasts: RwSignal<Vec<Toast>>,
    toast_seq: RwSignal<u64>,
}

impl AppState {
    /// Create a new `AppState` and provide it in the current Leptos context.
    pub fn provide() -> Self {
        let state = Self {
            conversations: RwSignal::new(Vec::new()),
            loading: RwSignal::new(false),
            loaded: RwSignal::new(false),
            load_error: RwSignal::new(None),
            search: RwSignal::new(String::new()),
            thread: RwSignal::new(ChatThread::new()),
            query_input: RwSignal::new(String::new()),
            query_results: RwSignal::new(Vec::new()),
            searching: RwSignal::new(false),
            toasts: RwSignal::new(Vec::new()),
            toast_seq: RwSignal::new(0),
        };

        provide_context(state);
        state
    }

    // ── Dashboard ─────────────────────────────────────────────────────────────

    /// Load conversations from the backend.
    pub fn load_conversations(&self) {
        let state = *self;
        self.loading.set(true);
        self.load_error.set(None);

        spawn_local(async move {
            match api::fetch_conversations().await {
                Ok(convos) => {
                    log::debug!("Loaded {} conversations", convos.len());
                    state.conversations.set(convos);
                }
                Err(e) => {
                    log::error!("Failed to fetch conversations: {e}");
                    state.load_error.set(Some(e.to_string()));
                }
            }
            state.loading.set(false);
            state.loaded.set(true);
        });
    }

    /// Conversations matching the dashboard search box.
    pub fn filtered(&self) -> Vec<Conversation> {
        self.conversations
            .with(|convos| self.search.with(|query| filter_conversations(convos, query)))
    }

    pub fn find_conversation(&self, id: &str) -> Option<Conversation> {
        self.conversations
            .with(|convos| convos.iter().find(|c| c.id == id).cloned())
    }

    // ── Chat ──────────────────────────────────────────────────────────────────

    /// Reopens the conversation remembered in `localStorage`, unless the chat
    /// view already holds one.
    pub fn resume_session(&self) {
        let busy = self
            .thread
            .with_untracked(|t| t.conversation_id.is_some() || !t.messages.is_empty());
        if busy {
            return;
        }
        let Some(conversation_id) = session::load() else {
            return;
        };

        let state = *self;
        spawn_local(async move {
            match api::fetch_history(&conversation_id).await {
                Ok(history) => {
                    let messages = history.messages.unwrap_or_default();
                    let mut resumed = false;
                    state
                        .thread
                        .update(|t| resumed = t.resume(conversation_id.clone(), &messages));
                    if resumed {
                        log::info!("Resumed conversation {conversation_id}");
                    }
                }
                Err(e) => log::warn!("Could not resume conversation {conversation_id}: {e}"),
            }
        });
    }

    /// Sends a chat message. The user's text shows up at once; a conversation
    /// is created first when the thread has none yet.
    pub fn send_message(&self, text: String) {
        let mut plan = None;
        self.thread
            .update(|t| plan = t.begin_send(&text, Utc::now()));
        let Some(plan) = plan else {
            return;
        };

        if plan.started {
            self.notify(
                "Conversation Started",
                "You can now chat with the AI assistant",
                ToastVariant::Default,
            );
        }

        let state = *self;
        spawn_local(async move {
            match state.deliver(&plan).await {
                Ok(reply) => state
                    .thread
                    .update(|t| t.reply_received(&plan.user_key, reply, Utc::now())),
                Err(e) => {
                    log::error!("Failed to send message: {e}");
                    state.thread.update(|t| t.send_failed(&plan.user_key));
                    state.notify(
                        "Error",
                        "Failed to connect to backend",
                        ToastVariant::Destructive,
                    );
                }
            }
        });
    }

    async fn deliver(self, plan: &SendPlan) -> Result<Option<AiMessage>, ApiError> {
        let conversation_id = match &plan.conversation_id {
            Some(id) => id.clone(),
            None => {
                let created = api::create_conversation().await?;
                log::info!("Created conversation {}", created.id);
                session::save(&created.id);
                self.thread
                    .update(|t| t.conversation_created(created.id.clone()));
                created.id
            }
        };

        let response = api::send_message(&conversation_id, &plan.text).await?;
        if response.ai_message.is_none() {
            log::warn!("Backend sent no ai_message for conversation {conversation_id}");
        }
        Ok(response.ai_message)
    }

    /// Ends the current conversation so the backend can summarize it.
    pub fn end_conversation(&self) {
        if !self.thread.with_untracked(ChatThread::can_end) {
            self.notify(
                "No conversation to end",
                "Start a conversation first",
                ToastVariant::Destructive,
            );
            return;
        }

        let mut claimed = false;
        let mut conversation_id = None;
        self.thread.update(|t| {
            claimed = t.begin_end();
            conversation_id = t.conversation_id.clone();
        });
        if !claimed {
            log::debug!("End ignored while the thread is busy");
            return;
        }

        let state = *self;
        spawn_local(async move {
            let mut title = None;
            if let Some(id) = conversation_id {
                match api::end_conversation(&id).await {
                    Ok(resp) => title = resp.title,
                    Err(e) => log::warn!("Ending conversation {id} failed: {e}"),
                }
            }

            state.thread.update(|t| t.ended(title));
            session::clear();
            state.notify(
                "Conversation Ended",
                "AI summary will be generated",
                ToastVariant::Default,
            );
            state.load_conversations();
        });
    }

    // ── Intelligence ──────────────────────────────────────────────────────────

    /// Asks the backend about past conversations using the current query box.
    pub fn run_query(&self) {
        let query = self.query_input.get_untracked().trim().to_string();
        if query.is_empty() || self.searching.get_untracked() {
            return;
        }

        self.searching.set(true);
        let state = *self;
        spawn_local(async move {
            match api::query_past(&query).await {
                Ok(resp) => {
                    state.query_input.update(|input| clear_if_unchanged(input, &query));
                    let result = QueryResult::from_response(query, resp);
                    state.query_results.update(|results| results.insert(0, result));
                }
                Err(e) => {
                    log::error!("Error fetching AI response: {e}");
                    state.notify(
                        "Error",
                        "Failed to reach the backend. Please ensure the backend server is running.",
                        ToastVariant::Destructive,
                    );
                }
            }
            state.searching.set(false);
        });
    }

    // ── Notifications ─────────────────────────────────────────────────────────

    pub fn notify(&self, title: &str, description: &str, variant: ToastVariant) {
        let id = self.toast_seq.get_untracked() + 1;
        self.toast_seq.set(id);
        self.toasts.update(|toasts| {
            toasts.push(Toast {
                id,
                title: title.to_string(),
                description: description.to_string(),
                variant,
            })
        });

        let toasts = self.toasts;
        let _ = Timeout::new(TOAST_MS, move || {
            toasts.update(|list| list.retain(|t| t.id != id));
        })
        .forget();
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|list| list.retain(|t| t.id != id));
    }
}

/// Empties the query box unless the user typed something new while the
/// previous query was running.
fn clear_if_unchanged(input: &mut String, submitted: &str) {
    if input.trim() == submitted {
        input.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answered_query_clears_the_box() {
        let mut input = String::from("  what about travel?\n");
        clear_if_unchanged(&mut input, "what about travel?");
        assert!(input.is_empty());
    }

    #[test]
    fn text_typed_during_a_query_is_kept() {
        let mut input = String::from("what about travel? and food");
        clear_if_unchanged(&mut input, "what about travel?");
        assert_eq!(input, "what about travel? and food");
    }
}
