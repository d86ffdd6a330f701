use axum::body::to_bytes;
use axum::extract::{Request, State};
use axum::http::header::{HeaderName, ACCEPT, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use tracing::debug;

use crate::errors::HostError;
use crate::routes::HostState;

/// Largest request body relayed to the backend.
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Request headers copied onto the backend call.
const FORWARDED_HEADERS: [HeaderName; 2] = [CONTENT_TYPE, ACCEPT];

/// ANY `/api/*` — relays the request to the backend and hands its answer back
/// untouched (status, content type and body).
pub async fn proxy_handler(
    State(state): State<HostState>,
    request: Request,
) -> Result<Response, HostError> {
    let (parts, body) = request.into_parts();
    let path = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| parts.uri.path());
    let url = format!("{}{path}", state.backend_url);

    let body = to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| HostError::RequestBody { message: e.to_string() })?;

    debug!("Forwarding {} {url} ({} bytes)", parts.method, body.len());

    let mut upstream = state.client.request(parts.method.clone(), &url);
    for name in FORWARDED_HEADERS {
        if let Some(value) = parts.headers.get(&name) {
            upstream = upstream.header(name.clone(), value.clone());
        }
    }
    if !body.is_empty() {
        upstream = upstream.body(body);
    }

    let upstream = upstream
        .send()
        .await
        .map_err(|e| HostError::from_upstream(&url, e))?;

    let status = upstream.status();
    let content_type = upstream.headers().get(CONTENT_TYPE).cloned();
    let bytes = upstream
        .bytes()
        .await
        .map_err(|e| HostError::from_upstream(&url, e))?;

    debug!("Backend answered {status} for {url}");

    let mut response = (status, bytes).into_response();
    match content_type {
        Some(value) => {
            response.headers_mut().insert(CONTENT_TYPE, value);
        }
        None => {
            response.headers_mut().remove(CONTENT_TYPE);
        }
    }
    Ok(response)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::extract::Path;
    use axum::http::{Method, Request, StatusCode};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use tokio::net::TcpListener;
    use tower::ServiceExt;

    use crate::routes::{router, HostState};

    /// Starts a stand-in backend on an ephemeral port and returns its base URL.
    async fn spawn_backend() -> String {
        let app = Router::new()
            .route(
                "/api/conversations/",
                get(|| async { Json(json!([{ "id": 1, "title": "Trip planning" }])) })
                    .post(|| async { Json(json!({ "id": 42 })) }),
            )
            .route(
                "/api/conversations/{id}/send_message/",
                post(|Path(id): Path<String>, Json(body): Json<Value>| async move {
                    let text = body["message"].as_str().unwrap_or_default().to_string();
                    Json(json!({ "ai_message": { "id": 7, "content": format!("{id}:{text}") } }))
                }),
            )
            .route(
                "/api/echo_query/",
                get(|request: axum::extract::Request| async move {
                    request.uri().query().unwrap_or_default().to_string()
                }),
            )
            .route(
                "/api/missing/",
                get(|| async { (StatusCode::NOT_FOUND, "no such thing") }),
            )
            .route(
                "/api/query_past/",
                post(|| async {
                    tokio::time::sleep(Duration::from_secs(3)).await;
                    Json(json!({ "answer": "too late" }))
                }),
            );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn host(backend_url: String) -> Router {
        host_with_timeout(backend_url, Duration::from_secs(5))
    }

    fn host_with_timeout(backend_url: String, timeout: Duration) -> Router {
        let state = HostState {
            client: reqwest::Client::builder().timeout(timeout).build().unwrap(),
            backend_url,
        };
        router(state, std::env::temp_dir().as_path())
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn relays_conversation_list() {
        let app = host(spawn_backend().await);
        let response = app
            .oneshot(Request::get("/api/conversations/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["content-type"].to_str().unwrap(),
            "application/json"
        );
        let body = body_json(response).await;
        assert_eq!(body[0]["title"], "Trip planning");
    }

    #[tokio::test]
    async fn relays_post_with_json_body() {
        let app = host(spawn_backend().await);
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/conversations/42/send_message/")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"message":"hello"}"#))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["ai_message"]["content"], "42:hello");
    }

    #[tokio::test]
    async fn relays_post_without_body() {
        let app = host(spawn_backend().await);
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/conversations/")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["id"], 42);
    }

    #[tokio::test]
    async fn keeps_query_string() {
        let app = host(spawn_backend().await);
        let response = app
            .oneshot(
                Request::get("/api/echo_query/?page=2&q=rust")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"page=2&q=rust");
    }

    #[tokio::test]
    async fn passes_backend_errors_through() {
        let app = host(spawn_backend().await);
        let response = app
            .oneshot(Request::get("/api/missing/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"no such thing");
    }

    #[tokio::test]
    async fn unreachable_backend_is_bad_gateway() {
        // Nothing listens on the discard port.
        let app = host("http://127.0.0.1:9".to_string());
        let response = app
            .oneshot(Request::get("/api/conversations/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("Backend unreachable"));
    }

    #[tokio::test]
    async fn slow_backend_is_gateway_timeout() {
        let app = host_with_timeout(spawn_backend().await, Duration::from_millis(300));
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/query_past/")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"query":"travel?"}"#))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("did not answer in time"));
    }
}
