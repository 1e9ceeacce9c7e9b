//! Server initialization and main run loop
//!
//! Contains the main `run()` function that starts all server components.

use super::auth::{resolve_provider, AuthStatus};
use super::config::AppConfig;
use super::loader::load_config;
use crate::api::{api_router, ApiState};
use anyhow::{Context, Result};
use axum::Router;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tutor_core::{MemoryStore, Orchestrator, SessionStore};
use tutor_tools::{register_builtins, ToolRegistry};

const SESSION_CLEANUP_INTERVAL_SECS: u64 = 3600;

/// Registry holding every deterministic tool
pub fn build_tool_registry() -> Arc<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    register_builtins(&mut registry);
    info!(tools = registry.len(), "Tools registered");
    Arc::new(registry)
}

/// Resolve credentials and assemble the agent tree.
///
/// Without credentials the state carries no orchestrator and the query
/// endpoint answers with a setup hint.
pub async fn build_api_state(config: &AppConfig) -> (AuthStatus, ApiState) {
    let tools = build_tool_registry();
    let (auth, provider) = resolve_provider(&config.llm).await;

    let orchestrator = provider.map(|provider| {
        let memory = Arc::new(MemoryStore::with_ttl_hours(config.session.ttl_hours));
        let orchestrator = Orchestrator::new(provider, &tools, config.orchestrator_config())
            .with_memory(memory);
        info!(specialists = ?orchestrator.specialist_names(), "Agent tree initialized");
        Arc::new(orchestrator)
    });

    (auth, ApiState { orchestrator, tools })
}

/// HTTP router: API routes plus the chat page and its assets
pub fn build_router(state: ApiState, static_dir: &Path) -> Router {
    Router::new()
        .merge(api_router(state))
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Run the server
pub async fn run() -> Result<()> {
    info!("Starting AI Tutor v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config().context("Failed to load configuration")?;
    info!("Configuration loaded");

    let (auth, state) = build_api_state(&config).await;
    info!(authentication = auth.as_str(), "Credential check finished");
    if !auth.is_configured() {
        warn!("AI Tutor services not initialized due to missing credentials");
    }

    let shutdown = CancellationToken::new();
    if let Some(orchestrator) = &state.orchestrator {
        start_session_cleanup(orchestrator.memory().clone(), shutdown.clone());
    }

    let static_dir = Path::new(&config.server.static_dir);
    if !static_dir.join("index.html").exists() {
        warn!(
            "Frontend not found at {}; GET / will return 404",
            static_dir.display()
        );
    }
    let app = build_router(state, static_dir);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("HTTP server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await
        .context("HTTP server error")?;

    info!("AI Tutor shutdown complete");
    Ok(())
}

/// Periodically drop sessions idle past their TTL
fn start_session_cleanup(memory: Arc<dyn SessionStore>, shutdown: CancellationToken) {
    tokio::spawn(async move {
        let interval = tokio::time::Duration::from_secs(SESSION_CLEANUP_INTERVAL_SECS);
        loop {
            tokio::select! {
                _ = tokio::time::sleep(interval) => {
                    match memory.cleanup_expired().await {
                        Ok(removed) if removed > 0 => {
                            info!("Cleanup: removed {} expired sessions", removed);
                        }
                        Ok(_) => {}
                        Err(e) => warn!("Session cleanup failed: {}", e),
                    }
                }
                _ = shutdown.cancelled() => {
                    info!("Session cleanup task shutting down");
                    break;
                }
            }
        }
    });
    info!("Session cleanup task started");
}

/// Wait for Ctrl+C or SIGTERM, then cancel background tasks
async fn shutdown_signal(token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C signal"),
        _ = terminate => info!("Received SIGTERM signal"),
    }
    token.cancel();
}
