mod config;
mod errors;
mod routes;

use tracing::info;

use crate::config::HostConfig;
use crate::routes::{router, HostState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (development convenience)
    dotenvy::dotenv().ok();

    // Initialise tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chat_portal=debug,tower_http=debug".into()),
        )
        .init();

    // ── Configuration ─────────────────────────────────────────────────────────
    let config = HostConfig::from_env()?;
    if !config.static_dir.join("index.html").is_file() {
        tracing::warn!(
            "No index.html in {} (run `trunk build` in frontend/ first)",
            config.static_dir.display()
        );
    }
    info!("Proxying /api/* to {}", config.backend_url);

    // ── Router ────────────────────────────────────────────────────────────────
    let state = HostState::new(&config)?;
    let app = router(state, &config.static_dir);

    // ── Listen ────────────────────────────────────────────────────────────────
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Serving the chat portal on http://{addr}/");

    axum::serve(listener, app).await?;
    Ok(())
}
