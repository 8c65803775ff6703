use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::render::pdf::LayoutConfig;
use crate::templates::store::TemplateStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Template store. Production uses `PgTemplateStore`; the trait seam keeps
    /// the activation invariant testable without a database.
    pub store: Arc<dyn TemplateStore>,
    /// Fixed-layout renderer config — page dimensions and the line budget.
    pub layout: LayoutConfig,
    #[allow(dead_code)]
    pub config: Config,
}
