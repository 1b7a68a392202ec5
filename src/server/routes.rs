//! HTTP router composition

use axum::routing::get;
use axum::{Json, Router, middleware};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::middleware::log_request;
use crate::server::state::AppState;
use crate::server::{files, prompts};

/// Builds the full router with request logging applied.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        // File browser
        .route("/api/files", get(files::get_files).delete(files::delete_files))
        // Prompt library
        .route(
            "/api/prompts",
            get(prompts::get_prompts)
                .post(prompts::save_prompt)
                .delete(prompts::delete_prompt),
        )
        .route("/api/prompts/folders", get(prompts::list_folders))
        .route("/api/prompts/actions", get(prompts::list_actions))
        .route("/api/prompts/entries", get(prompts::list_entries))
        .route(
            "/api/prompts/order",
            get(prompts::get_order).put(prompts::save_order),
        )
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
