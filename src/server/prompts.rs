//! Prompt library routes

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::error::AccessError;
use crate::prompts::PromptFile;
use crate::server::response::{error_response, message_error, run_blocking};
use crate::server::state::AppState;
use crate::storage::stream::has_allowed_extension;

#[derive(Debug, Default, Deserialize)]
pub struct PromptQuery {
    pub folder: Option<String>,
    pub action: Option<String>,
    pub filename: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SavePromptRequest {
    pub folder: Option<String>,
    pub action: Option<String>,
    pub filename: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SaveOrderRequest {
    pub folder: String,
    pub order: Vec<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// GET /api/prompts
///
/// With `folder` and `filename`: the entry content. With `folder` only:
/// the folder's actions and prompt files. Without parameters: every
/// folder with its prompt files.
pub async fn get_prompts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PromptQuery>,
) -> Response {
    let action = query.action.unwrap_or_default();

    match (non_empty(query.folder), non_empty(query.filename)) {
        (Some(folder), Some(filename)) => {
            let result =
                run_blocking(move || state.prompts.read_entry(&folder, &action, &filename)).await;
            match result {
                Ok(content) => Json(json!({ "content": content })).into_response(),
                Err(AccessError::NotFound(_)) => {
                    message_error(StatusCode::NOT_FOUND, "File not found")
                }
                Err(e) => error_response(e),
            }
        }
        (Some(folder), None) => {
            let result = run_blocking(move || {
                state.prompts.ensure_folder(&folder)?;
                let actions = state.prompts.list_actions(&folder)?;
                let prompts: Vec<PromptFile> = state
                    .prompts
                    .list_entries(&folder, &action)?
                    .into_iter()
                    .filter(|name| has_allowed_extension(name, &state.prompt_extensions))
                    .map(|name| PromptFile {
                        path: name.clone(),
                        name,
                    })
                    .collect();
                Ok(json!({ "folder": folder, "actions": actions, "prompts": prompts }))
            })
            .await;
            match result {
                Ok(body) => Json(body).into_response(),
                Err(e) => error_response(e),
            }
        }
        (None, _) => {
            let result = run_blocking(move || {
                state.prompts.list_folder_summaries(&state.prompt_extensions)
            })
            .await;
            match result {
                Ok(folders) => Json(json!({ "folders": folders })).into_response(),
                Err(e) => error_response(e),
            }
        }
    }
}

/// POST /api/prompts
pub async fn save_prompt(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SavePromptRequest>,
) -> Response {
    let (Some(folder), Some(filename)) = (non_empty(request.folder), non_empty(request.filename))
    else {
        return message_error(StatusCode::BAD_REQUEST, "Folder and filename are required");
    };
    let action = request.action.unwrap_or_default();
    let content = request.content.unwrap_or_default();

    let result =
        run_blocking(move || state.prompts.write_entry(&folder, &action, &filename, &content))
            .await;
    match result {
        Ok(()) => Json(json!({ "success": true })).into_response(),
        Err(e) => error_response(e),
    }
}

/// DELETE /api/prompts
pub async fn delete_prompt(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PromptQuery>,
) -> Response {
    let (Some(folder), Some(filename)) = (non_empty(query.folder), non_empty(query.filename))
    else {
        return message_error(StatusCode::BAD_REQUEST, "Folder and filename are required");
    };
    let action = query.action.unwrap_or_default();

    let result = run_blocking(move || {
        if !state.prompts.entry_exists(&folder, &action, &filename)? {
            return Ok(false);
        }
        state.prompts.delete_entry(&folder, &action, &filename)?;
        Ok(true)
    })
    .await;

    match result {
        Ok(true) => Json(json!({ "message": "File deleted successfully" })).into_response(),
        Ok(false) => message_error(StatusCode::NOT_FOUND, "File not found"),
        Err(e) => error_response(e),
    }
}

/// GET /api/prompts/folders
pub async fn list_folders(State(state): State<Arc<AppState>>) -> Response {
    match run_blocking(move || state.prompts.list_folders()).await {
        Ok(folders) => Json(folders).into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /api/prompts/actions?folder=
pub async fn list_actions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PromptQuery>,
) -> Response {
    let Some(folder) = non_empty(query.folder) else {
        return message_error(StatusCode::BAD_REQUEST, "Folder is required");
    };
    match run_blocking(move || state.prompts.list_actions(&folder)).await {
        Ok(actions) => Json(actions).into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /api/prompts/entries?folder=&action=
pub async fn list_entries(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PromptQuery>,
) -> Response {
    let Some(folder) = non_empty(query.folder) else {
        return message_error(StatusCode::BAD_REQUEST, "Folder is required");
    };
    let action = query.action.unwrap_or_default();
    match run_blocking(move || state.prompts.list_entries(&folder, &action)).await {
        Ok(entries) => Json(entries).into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /api/prompts/order?folder=
pub async fn get_order(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PromptQuery>,
) -> Response {
    let Some(folder) = non_empty(query.folder) else {
        return message_error(StatusCode::BAD_REQUEST, "Folder is required");
    };
    match run_blocking(move || state.prompts.get_order(&folder)).await {
        Ok(order) => Json(order).into_response(),
        Err(e) => error_response(e),
    }
}

/// PUT /api/prompts/order
pub async fn save_order(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SaveOrderRequest>,
) -> Response {
    let SaveOrderRequest { folder, order } = request;
    match run_blocking(move || state.prompts.save_order(&folder, &order)).await {
        Ok(()) => Json(json!({ "success": true })).into_response(),
        Err(e) => error_response(e),
    }
}
