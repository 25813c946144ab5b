//! Target of locally signed content URLs.

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use tokio_util::io::ReaderStream;
use tracing::debug;

use docusend_core::error::AppError;

use crate::dto::request::DownloadQuery;
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/download?path&expires&sig
pub async fn download(
    State(state): State<AppState>,
    Query(query): Query<DownloadQuery>,
) -> ApiResult<Response> {
    let local = state
        .storage
        .local()
        .ok_or_else(|| AppError::not_found("Local downloads are not enabled"))?;
    local.verify(&query.path, query.expires, &query.sig, Utc::now())?;

    let file = local.open(&query.path).await?;
    debug!(path = %query.path, "Serving signed download");

    let filename = query.path.rsplit('/').next().unwrap_or("download");
    let headers = [
        (header::CONTENT_TYPE, content_type(filename).to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"{}\"", filename.replace('"', "")),
        ),
        (header::CACHE_CONTROL, "private, no-store".to_string()),
    ];
    Ok((headers, Body::from_stream(ReaderStream::new(file))).into_response())
}

fn content_type(filename: &str) -> &'static str {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "txt" => "text/plain; charset=utf-8",
        "zip" => "application/zip",
        _ => "application/octet-stream",
    }
}
