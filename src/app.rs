use crate::handlers;
use crate::state::AppState;
use axum::{Router, routing::get};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/categories", get(handlers::get_categories))
        .route("/api/summaries", get(handlers::get_summaries))
        .route("/api/sales", get(handlers::get_sales))
        .with_state(state)
}
