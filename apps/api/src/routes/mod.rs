pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::contracts::handlers as contract_handlers;
use crate::state::AppState;
use crate::templates::handlers as template_handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Template API
        .route(
            "/api/v1/companies/:company_id/templates",
            post(template_handlers::handle_upload).get(template_handlers::handle_list),
        )
        .route(
            "/api/v1/companies/:company_id/templates/:template_id/activate",
            post(template_handlers::handle_activate),
        )
        .route(
            "/api/v1/templates/:template_id/preview",
            get(template_handlers::handle_preview),
        )
        // Contract API
        .route(
            "/api/v1/contracts/generate",
            post(contract_handlers::handle_generate),
        )
        .route(
            "/api/v1/contracts/:contract_id/download",
            get(contract_handlers::handle_download),
        )
        .with_state(state)
}
