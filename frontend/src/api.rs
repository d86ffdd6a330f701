use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::endpoint;
use crate::models::{
    Conversation, ConversationHistory, CreatedConversation, EndConversationRequest,
    EndConversationResponse, QueryRequest, QueryResponse, SendMessageRequest,
    SendMessageResponse,
};

/// A failed call to the backend API.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ApiError {
    #[error("Network error on {endpoint}: {message}")]
    Network { endpoint: String, message: String },

    #[error("Server error {status} on {endpoint}")]
    Status { endpoint: String, status: u16 },

    #[error("Parse error on {endpoint}: {message}")]
    Parse { endpoint: String, message: String },

    #[error("Serialize error on {endpoint}: {message}")]
    Serialize { endpoint: String, message: String },
}

/// Fetches every conversation, with its messages, for the dashboard.
pub async fn fetch_conversations() -> Result<Vec<Conversation>, ApiError> {
    let url = endpoint("/api/conversations/");
    let resp = Request::get(&url).send().await;
    decode(&url, resp).await
}

/// Opens a new conversation on the backend and returns its id.
pub async fn create_conversation() -> Result<CreatedConversation, ApiError> {
    let url = endpoint("/api/conversations/");
    let resp = Request::post(&url)
        .header("Content-Type", "application/json")
        .send()
        .await;
    decode(&url, resp).await
}

/// Sends one user message and waits for the assistant's reply.
pub async fn send_message(
    conversation_id: &str,
    message: &str,
) -> Result<SendMessageResponse, ApiError> {
    let url = endpoint(&format!("/api/conversations/{conversation_id}/send_message/"));
    let body = SendMessageRequest { message: message.to_string() };
    post_json(&url, &body).await
}

/// Ends a conversation; the backend summarizes it and may return a title.
pub async fn end_conversation(conversation_id: &str) -> Result<EndConversationResponse, ApiError> {
    let url = endpoint(&format!("/api/conversations/{conversation_id}/end/"));
    let body = EndConversationRequest { conversation_id: conversation_id.to_string() };
    post_json(&url, &body).await
}

/// Loads the messages of a conversation so an interrupted chat can resume.
pub async fn fetch_history(conversation_id: &str) -> Result<ConversationHistory, ApiError> {
    let url = endpoint(&format!("/api/chat/conversation/{conversation_id}/"));
    let resp = Request::get(&url).send().await;
    decode(&url, resp).await
}

/// Asks the backend a question about past conversations.
pub async fn query_past(query: &str) -> Result<QueryResponse, ApiError> {
    let url = endpoint("/api/conversations/query_past/");
    let body = QueryRequest { query: query.to_string() };
    post_json(&url, &body).await
}

async fn post_json<B, T>(url: &str, body: &B) -> Result<T, ApiError>
where
    B: serde::Serialize,
    T: DeserializeOwned,
{
    let request = Request::post(url).json(body).map_err(|e| {
        logged(ApiError::Serialize { endpoint: url.to_string(), message: e.to_string() })
    })?;
    let resp = request.send().await;
    decode(url, resp).await
}

async fn decode<T: DeserializeOwned>(
    url: &str,
    resp: Result<Response, gloo_net::Error>,
) -> Result<T, ApiError> {
    let resp = resp.map_err(|e| {
        logged(ApiError::Network { endpoint: url.to_string(), message: e.to_string() })
    })?;

    if !resp.ok() {
        return Err(logged(ApiError::Status {
            endpoint: url.to_string(),
            status: resp.status(),
        }));
    }

    resp.json::<T>().await.map_err(|e| {
        logged(ApiError::Parse { endpoint: url.to_string(), message: e.to_string() })
    })
}

fn logged(err: ApiError) -> ApiError {
    log::error!("{err}");
    err
}
