//! CSES Blog - Application Entry Point
//!
//! Runs the HTTP server, or `cses-blog hash-password <password>` to print an
//! argon2 hash for `ADMIN_PASSWORD_HASH`.

use std::net::SocketAddr;
use std::sync::Arc;

use redis::Client as RedisClient;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cses_blog::{
    assistant::{AiAssistant, DisabledAssistant, HttpAssistant},
    cache::{MemoryViewCache, RedisViewCache, ViewCache},
    config::CONFIG,
    create_router, db,
    db::repositories::{MemorySolutionStore, PgSolutionStore, SolutionStore},
    state::AppState,
    utils::password::hash_password,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("hash-password") => return print_password_hash(args.get(1)),
        Some(other) => anyhow::bail!("Unknown command: {}. Usage: cses-blog [hash-password <password>]", other),
        None => {}
    }

    init_tracing();
    tracing::info!("Starting CSES blog server...");

    if !CONFIG.admin.is_configured() {
        tracing::warn!("ADMIN_USERNAME and ADMIN_PASSWORD/ADMIN_PASSWORD_HASH are not set; admin login is disabled");
    }

    // Initialize solution store
    let store: Arc<dyn SolutionStore> = match db::create_pool(&CONFIG.database).await? {
        Some(pool) => {
            db::test_connection(&pool).await?;
            tracing::info!("Running database migrations...");
            db::run_migrations(&pool).await?;
            Arc::new(PgSolutionStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL is not set; solutions are kept in memory and lost on restart");
            Arc::new(MemorySolutionStore::new())
        }
    };

    // Initialize view cache
    let cache: Arc<dyn ViewCache> = match CONFIG.cache.redis_url.as_deref() {
        Some(url) => {
            tracing::info!("Connecting to Redis...");
            let client = RedisClient::open(url)?;
            let conn = redis::aio::ConnectionManager::new(client).await?;
            Arc::new(RedisViewCache::new(conn, CONFIG.cache.ttl_secs))
        }
        None => Arc::new(MemoryViewCache::new(CONFIG.cache.ttl_secs)),
    };

    // Initialize AI assistant
    let assistant: Arc<dyn AiAssistant> = match HttpAssistant::from_config(&CONFIG.ai)? {
        Some(assistant) => {
            tracing::info!(endpoint = %assistant.endpoint(), model = %CONFIG.ai.model, "AI assistant enabled");
            Arc::new(assistant)
        }
        None => {
            tracing::info!("AI_API_URL is not set; AI assistant disabled");
            Arc::new(DisabledAssistant)
        }
    };

    tracing::info!(store = store.backend(), cache = cache.backend(), "Storage initialized");

    let state = AppState::new(store, cache, assistant, CONFIG.clone());
    let app = create_router(state);

    // Start the server
    let addr = SocketAddr::new(CONFIG.server.host.parse()?, CONFIG.server.port);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| CONFIG.server.rust_log.clone().into());
    let registry = tracing_subscriber::registry().with(filter);

    if CONFIG.server.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn print_password_hash(password: Option<&String>) -> anyhow::Result<()> {
    let Some(password) = password.filter(|p| !p.is_empty()) else {
        anyhow::bail!("Usage: cses-blog hash-password <password>");
    };

    let hash = hash_password(password)?;
    println!("{}", hash);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}
