mod auth;
mod config;
mod db;
mod editor;
mod errors;
mod generation;
mod llm_client;
mod models;
mod render;
mod routes;
mod schema;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::memory::MemoryStore;
use crate::store::postgres::PgStore;
use crate::store::ResumeStore;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Vitae API v{}", env!("CARGO_PKG_VERSION"));

    let store: Arc<dyn ResumeStore> = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url).await?;
            Arc::new(PgStore::new(pool))
        }
        None => {
            info!("DATABASE_URL not set, using the in-memory store");
            Arc::new(MemoryStore::new())
        }
    };

    let llm = config.anthropic_api_key.clone().map(LlmClient::new);
    if llm.is_some() {
        info!("LLM client initialized (model: {})", llm_client::MODEL);
    } else {
        info!("ANTHROPIC_API_KEY not set, resume generation disabled");
    }

    let state = AppState {
        store,
        llm,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
