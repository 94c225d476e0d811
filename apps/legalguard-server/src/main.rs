//! SME Legal Guard Server
//!
//! Audits contracts uploaded by small businesses for risky clauses and
//! suggests renegotiation wording. Provides:
//!
//! - Text extraction from PDF, DOCX and TXT uploads
//! - Risk analysis via an OpenAI-compatible chat-completion endpoint
//! - A risk dashboard and a downloadable PDF audit report
//! - A per-session audit log
//! - SME-friendly contract templates
//!
//! The web UI is a single embedded HTML page served at `/`.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use analysis_client::{ClientConfig, ContractAnalyzer, DEFAULT_ENDPOINT, DEFAULT_MODEL, PLACEHOLDER_API_KEY};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod error;
mod state;

use api::{
    handle_audit, handle_create_session, handle_download_template, handle_end_session,
    handle_extract, handle_get_session, handle_health, handle_index, handle_list_templates,
};
use state::AppState;

/// Environment variable holding the bearer token for the model endpoint
const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Command-line arguments for the SME Legal Guard server
#[derive(Parser, Debug)]
#[command(name = "legalguard-server")]
#[command(about = "SME Legal Guard contract risk auditor")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// PDF report render timeout in milliseconds
    #[arg(long, default_value = "10000")]
    timeout_ms: u64,

    /// Timeout for the analysis request in seconds
    #[arg(long, default_value = "120")]
    request_timeout_secs: u64,

    /// Idle sessions are dropped after this many minutes
    #[arg(long, default_value = "60")]
    session_ttl_minutes: u64,

    /// Largest accepted upload request in megabytes
    #[arg(long, default_value = "25")]
    max_upload_mb: usize,

    /// Model identifier sent to the completion endpoint
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Base URL of the OpenAI-compatible endpoint
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Build the application router
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // UI
        .route("/", get(handle_index))
        .route("/health", get(handle_health))
        // Templates
        .route("/api/templates", get(handle_list_templates))
        .route("/api/templates/:slug", get(handle_download_template))
        // Sessions
        .route("/api/session", post(handle_create_session))
        .route(
            "/api/session/:id",
            get(handle_get_session).delete(handle_end_session),
        )
        // Pipeline
        .route("/api/extract", post(handle_extract))
        .route("/api/session/:id/audit", post(handle_audit))
        .layer(DefaultBodyLimit::max(state.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SME Legal Guard on {}:{}", args.host, args.port);

    let api_key = std::env::var(TOKEN_ENV).unwrap_or_else(|_| PLACEHOLDER_API_KEY.to_string());
    let config = ClientConfig {
        base_url: args.endpoint,
        model: args.model,
        api_key,
        timeout: Duration::from_secs(args.request_timeout_secs),
    };
    if config.has_placeholder_key() {
        warn!(
            "{} is not set; analysis requests will be rejected by the endpoint",
            TOKEN_ENV
        );
    }

    let analyzer = ContractAnalyzer::from_config(config)?;
    let state = Arc::new(
        AppState::new(
            analyzer,
            args.timeout_ms,
            Duration::from_secs(args.session_ttl_minutes.saturating_mul(60)),
        )
        .with_max_upload_bytes(args.max_upload_mb.saturating_mul(1024 * 1024)),
    );

    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Report render timeout: {}ms", args.timeout_ms);
    info!("Analysis request timeout: {}s", args.request_timeout_secs);
    info!("Upload limit: {}MB", args.max_upload_mb);

    axum::serve(listener, app).await?;

    Ok(())
}
