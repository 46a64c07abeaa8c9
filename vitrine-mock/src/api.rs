//! Content API routes
//!
//! Mirrors the status codes and error bodies of the GitHub contents
//! endpoint closely enough for the client's error mapping.

use crate::state::{MockState, RawRequest};
use axum::{
    Json, Router,
    extract::{Path, Query, RawQuery, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use serde_json::json;
use shared::encoding;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct RefQuery {
    #[serde(rename = "ref")]
    reference: Option<String>,
}

#[derive(Deserialize)]
pub struct WriteBody {
    message: String,
    content: String,
    branch: Option<String>,
    sha: Option<String>,
}

fn error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "message": message.into() }))).into_response()
}

fn header_str<'a>(headers: &'a HeaderMap, name: header::HeaderName) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Shared preamble: credential and repository checks
fn check_access(state: &MockState, headers: &HeaderMap, owner: &str, repo: &str) -> Option<Response> {
    if !state.authorized(header_str(headers, header::AUTHORIZATION)) {
        return Some(error(StatusCode::UNAUTHORIZED, "Bad credentials"));
    }
    if !state.matches_repo(owner, repo) {
        return Some(error(StatusCode::NOT_FOUND, "Not Found"));
    }
    None
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

async fn read_contents(
    State(state): State<Arc<MockState>>,
    Path((owner, repo, path)): Path<(String, String, String)>,
    Query(query): Query<RefQuery>,
    headers: HeaderMap,
) -> Response {
    if let Some(denied) = check_access(&state, &headers, &owner, &repo) {
        return denied;
    }

    let branch = query
        .reference
        .unwrap_or_else(|| state.default_branch().to_string());
    match state.file(&branch, &path).await {
        Some(file) => Json(json!({
            "type": "file",
            "name": file_name(&path),
            "path": path,
            "sha": file.sha,
            "size": file.content.len(),
            "encoding": "base64",
            "content": encoding::encode_content_wrapped(&file.content),
        }))
        .into_response(),
        None => error(StatusCode::NOT_FOUND, "Not Found"),
    }
}

async fn write_contents(
    State(state): State<Arc<MockState>>,
    Path((owner, repo, path)): Path<(String, String, String)>,
    headers: HeaderMap,
    Json(body): Json<WriteBody>,
) -> Response {
    if let Some(denied) = check_access(&state, &headers, &owner, &repo) {
        return denied;
    }
    if state.is_rejected(&path).await {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "Server Error");
    }

    let branch = body
        .branch
        .unwrap_or_else(|| state.default_branch().to_string());
    let current = state.file(&branch, &path).await;

    match (&current, body.sha.as_deref()) {
        (None, None) => {}
        (Some(file), Some(sha)) if file.sha == sha => {}
        (Some(_), None) => {
            return error(
                StatusCode::UNPROCESSABLE_ENTITY,
                "Invalid request.\n\n\"sha\" wasn't supplied.",
            );
        }
        (_, Some(sha)) => {
            return error(
                StatusCode::CONFLICT,
                format!("{} does not match {}", path, sha),
            );
        }
    }

    let content = match encoding::decode_content(&body.content) {
        Ok(content) => content,
        Err(_) => {
            return error(
                StatusCode::UNPROCESSABLE_ENTITY,
                "content is not valid Base64",
            );
        }
    };

    let sha = state.put(&branch, &path, &content).await;
    tracing::debug!(%path, %branch, %sha, message = %body.message, "Mock commit");

    let status = if current.is_some() {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    (
        status,
        Json(json!({
            "content": { "name": file_name(&path), "path": path, "sha": sha },
            "commit": { "message": body.message },
        })),
    )
        .into_response()
}

async fn read_raw(
    State(state): State<Arc<MockState>>,
    Path((owner, repo, branch, path)): Path<(String, String, String, String)>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    state
        .record_raw(RawRequest {
            path: path.clone(),
            query,
            cache_control: header_str(&headers, header::CACHE_CONTROL).map(str::to_string),
            pragma: header_str(&headers, header::PRAGMA).map(str::to_string),
        })
        .await;

    if !state.matches_repo(&owner, &repo) {
        return (StatusCode::NOT_FOUND, "404: Not Found").into_response();
    }
    match state.file(&branch, &path).await {
        Some(file) => file.content.into_response(),
        None => (StatusCode::NOT_FOUND, "404: Not Found").into_response(),
    }
}

pub fn router(state: Arc<MockState>) -> Router {
    use tower::limit::ConcurrencyLimitLayer;

    Router::new()
        .route(
            "/repos/{owner}/{repo}/contents/{*path}",
            get(read_contents).put(write_contents),
        )
        .route("/raw/{owner}/{repo}/{branch}/{*path}", get(read_raw))
        .layer(ConcurrencyLimitLayer::new(64))
        .with_state(state)
}
