//! File browser routes
//!
//! Thin mapping from HTTP requests onto `FileAccessManager` calls.

use axum::Json;
use axum::body::{Body, Bytes};
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use log::{error, info};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tokio_util::io::ReaderStream;

use crate::server::response::{error_response, flag_set, message_error, run_blocking};
use crate::server::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct FilesQuery {
    pub path: Option<String>,
    pub download: Option<String>,
    pub zip: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DeleteBody {
    paths: Option<Vec<String>>,
}

/// GET /api/files
pub async fn get_files(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FilesQuery>,
) -> Response {
    let path = query.path.clone().unwrap_or_default();

    if flag_set(&query.download) {
        download_file(state, path).await
    } else if flag_set(&query.zip) {
        download_archive(state, path).await
    } else if flag_set(&query.content) {
        read_content(state, path).await
    } else {
        list_directory(state, path).await
    }
}

async fn list_directory(state: Arc<AppState>, path: String) -> Response {
    info!("Listing directory: {}", if path.is_empty() { "root" } else { path.as_str() });
    match run_blocking(move || state.files.list_directory(&path)).await {
        Ok(entries) => Json(entries).into_response(),
        Err(e) => error_response(e),
    }
}

async fn download_file(state: Arc<AppState>, path: String) -> Response {
    let stream = match run_blocking(move || state.files.open_read_stream(&path)).await {
        Ok(stream) => stream,
        Err(e) => return error_response(e),
    };

    let file_name = stream.file_name.clone();
    let len = stream.len;
    let file = tokio::fs::File::from_std(stream.into_file());
    let body = Body::from_stream(ReaderStream::new(file));

    (
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_string()),
            (header::CONTENT_DISPOSITION, attachment(&file_name)),
            (header::CONTENT_LENGTH, len.to_string()),
        ],
        body,
    )
        .into_response()
}

async fn download_archive(state: Arc<AppState>, path: String) -> Response {
    let archive_name = archive_name(&path);
    match run_blocking(move || state.files.create_archive(&path)).await {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, "application/zip".to_string()),
                (header::CONTENT_DISPOSITION, attachment(&archive_name)),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

async fn read_content(state: Arc<AppState>, path: String) -> Response {
    match run_blocking(move || state.files.read_text_content(&path)).await {
        Ok(content) => Json(json!({ "content": content })).into_response(),
        Err(e) => error_response(e),
    }
}

/// DELETE /api/files
///
/// Accepts `?path=` for one target or a JSON body `{"paths": [...]}` for
/// several. Every failure maps to 500.
pub async fn delete_files(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FilesQuery>,
    body: Bytes,
) -> Response {
    let paths = if body.is_empty() {
        None
    } else {
        match serde_json::from_slice::<DeleteBody>(&body) {
            Ok(parsed) => parsed.paths,
            Err(_) => return message_error(StatusCode::BAD_REQUEST, "Invalid request body"),
        }
    };

    match (paths, query.path) {
        (Some(paths), _) => {
            let result = run_blocking(move || Ok(state.files.delete_paths(paths.as_slice()))).await;
            let outcome = match result {
                Ok(outcome) => outcome,
                Err(e) => return error_response(e),
            };

            if outcome.is_complete() {
                (
                    StatusCode::OK,
                    Json(json!({
                        "message": "Files deleted successfully",
                        "deleted": outcome.deleted,
                    })),
                )
                    .into_response()
            } else {
                error!("Batch delete left {} failures", outcome.failed.len());
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "Failed to delete file",
                        "deleted": outcome.deleted,
                        "failed": outcome.failed,
                    })),
                )
                    .into_response()
            }
        }
        (None, Some(path)) => {
            match run_blocking(move || state.files.delete_folder_or_file(&path)).await {
                Ok(()) => Json(json!({ "message": "File deleted successfully" })).into_response(),
                Err(e) => {
                    error!("File deletion error: {}", e);
                    message_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to delete file")
                }
            }
        }
        (None, None) => message_error(StatusCode::BAD_REQUEST, "path or paths is required"),
    }
}

fn attachment(file_name: &str) -> String {
    format!("attachment; filename=\"{}\"", file_name.replace('"', "'"))
}

fn archive_name(path: &str) -> String {
    let base = path
        .rsplit(['/', '\\'])
        .find(|segment| !segment.is_empty() && *segment != ".")
        .unwrap_or("archive");
    format!("{}.zip", base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archive_name() {
        assert_eq!(archive_name("docs/reports"), "reports.zip");
        assert_eq!(archive_name("docs/reports/"), "reports.zip");
        assert_eq!(archive_name(""), "archive.zip");
    }

    #[test]
    fn test_attachment_escapes_quotes() {
        assert_eq!(attachment("a\"b.txt"), "attachment; filename=\"a'b.txt\"");
    }
}
