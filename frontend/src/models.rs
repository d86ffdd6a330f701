use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

const UNTITLED: &str = "Untitled Conversation";
const NO_SUMMARY: &str = "No summary available yet";
const NO_ANSWER: &str = "No response from backend. Check if your AI pipeline returned data.";

/// Matches the backend `Conversation` record.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Conversation {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub messages: Vec<Message>,
}

impl Conversation {
    pub fn display_title(&self) -> &str {
        non_blank(self.title.as_deref()).unwrap_or(UNTITLED)
    }

    pub fn display_summary(&self) -> &str {
        non_blank(self.summary.as_deref()).unwrap_or(NO_SUMMARY)
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}

/// Who wrote a message.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Hash)]
pub enum Sender {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "ai", alias = "assistant")]
    Ai,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Ai => "ai",
        }
    }
}

/// Matches the backend `Message` record.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Message {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    pub sender: Sender,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Response of `POST /api/conversations/`.
#[derive(Clone, Debug, Deserialize)]
pub struct CreatedConversation {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
}

/// Body of `POST /api/conversations/{id}/send_message/`.
#[derive(Clone, Debug, Serialize)]
pub struct SendMessageRequest {
    pub message: String,
}

/// The assistant's reply inside a [`SendMessageResponse`].
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct AiMessage {
    #[serde(default, deserialize_with = "opt_id_string")]
    pub id: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SendMessageResponse {
    #[serde(default)]
    pub ai_message: Option<AiMessage>,
}

/// Body of `POST /api/conversations/{id}/end/`.
#[derive(Clone, Debug, Serialize)]
pub struct EndConversationRequest {
    pub conversation_id: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct EndConversationResponse {
    #[serde(default)]
    pub title: Option<String>,
}

/// Response of `GET /api/chat/conversation/{id}/`, used to resume a session.
#[derive(Clone, Debug, Deserialize)]
pub struct ConversationHistory {
    #[serde(default)]
    pub messages: Option<Vec<Message>>,
}

/// Body of `POST /api/conversations/query_past/`.
#[derive(Clone, Debug, Serialize)]
pub struct QueryRequest {
    pub query: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub relevant: Vec<Value>,
}

/// One answered question on the intelligence page. Lives only in memory.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryResult {
    pub query: String,
    pub response: String,
    pub relevant_conversations: Vec<String>,
}

impl QueryResult {
    pub fn from_response(query: String, response: QueryResponse) -> Self {
        let answer = non_blank(response.answer.as_deref()).unwrap_or(NO_ANSWER);
        Self {
            query,
            response: answer.to_string(),
            relevant_conversations: response.relevant.iter().filter_map(reference_label).collect(),
        }
    }
}

/// Turns one `relevant` entry into a chip label. The backend may send plain
/// strings, bare ids, or conversation objects.
fn reference_label(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => ["title", "id"].iter().find_map(|key| match map.get(*key) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        }),
        _ => None,
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

// ── Serde helpers ─────────────────────────────────────────────────────────────

/// Ids arrive as strings or integers depending on the backend's primary keys.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireId {
    Text(String),
    Number(i64),
}

impl From<WireId> for String {
    fn from(id: WireId) -> Self {
        match id {
            WireId::Text(s) => s,
            WireId::Number(n) => n.to_string(),
        }
    }
}

fn id_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    WireId::deserialize(deserializer).map(String::from)
}

fn opt_id_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Option::<WireId>::deserialize(deserializer).map(|id| id.map(String::from))
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
