// Template ingestion and the single-active-template-per-company store.

pub mod handlers;
pub mod store;
