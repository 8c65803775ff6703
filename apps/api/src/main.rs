mod config;
mod contracts;
mod db;
mod errors;
mod extract;
mod models;
mod render;
mod routes;
mod state;
mod templates;
mod vars;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::render::pdf::LayoutConfig;
use crate::routes::build_router;
use crate::state::AppState;
use crate::templates::store::PgTemplateStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (panics on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("hr_api={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting HR API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Template store backed by the shared pool
    let store = Arc::new(PgTemplateStore::new(db.clone()));

    // Fixed-layout renderer config — A4 with an explicit per-page line budget
    let layout = LayoutConfig::with_line_budget(config.pdf_line_budget);
    info!(
        "PDF layout: {}pt font, {} lines per page",
        layout.font_size_pt, layout.max_lines
    );

    // Build app state
    let state = AppState {
        db,
        store,
        layout,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
