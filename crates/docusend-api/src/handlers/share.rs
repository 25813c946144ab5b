//! Public shared-link handlers: open a link and satisfy its requirements.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::SignedCookieJar;
use uuid::Uuid;

use docusend_service::share::ShareView;

use crate::dto::request::{EmailSubmission, FeedbackSubmission, NdaSubmission, PasswordSubmission};
use crate::dto::response::ApiResponse;
use crate::error::{ApiError, ApiResult};
use crate::extractors::{ValidatedJson, Viewer};
use crate::state::AppState;

/// Render a gate result: terminal decisions become error statuses, the rest
/// are 200 with the decision in the body.
fn respond(view: ShareView, jar: SignedCookieJar) -> Response {
    match ApiError::for_decision(view.decision) {
        Some(err) => err.into_response(),
        None => (jar, Json(ApiResponse::ok(view))).into_response(),
    }
}

/// GET /api/s/{id}
pub async fn open(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    viewer: Viewer,
) -> ApiResult<Response> {
    let view = state
        .access_service
        .open(id, &viewer.context, &viewer.store)
        .await?;
    Ok(respond(view, viewer.store.into_jar()))
}

/// POST /api/s/{id}/email
pub async fn submit_email(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    viewer: Viewer,
    ValidatedJson(req): ValidatedJson<EmailSubmission>,
) -> ApiResult<Response> {
    let view = state
        .access_service
        .submit_email(id, &viewer.context, &viewer.store, &req.email)
        .await?;
    viewer.store.remember_email(req.email.trim())?;
    Ok(respond(view, viewer.store.into_jar()))
}

/// POST /api/s/{id}/password
pub async fn submit_password(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    viewer: Viewer,
    ValidatedJson(req): ValidatedJson<PasswordSubmission>,
) -> ApiResult<Response> {
    let view = state
        .access_service
        .submit_password(id, &viewer.context, &viewer.store, &req.password)
        .await?;
    Ok(respond(view, viewer.store.into_jar()))
}

/// POST /api/s/{id}/nda
pub async fn accept_nda(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    viewer: Viewer,
    ValidatedJson(req): ValidatedJson<NdaSubmission>,
) -> ApiResult<Response> {
    let view = state
        .access_service
        .accept_nda(id, &viewer.context, &viewer.store, &req.into())
        .await?;
    Ok(respond(view, viewer.store.into_jar()))
}

/// POST /api/s/{id}/feedback
pub async fn submit_feedback(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    viewer: Viewer,
    ValidatedJson(req): ValidatedJson<FeedbackSubmission>,
) -> ApiResult<Response> {
    let feedback = state
        .access_service
        .submit_feedback(id, &viewer.context, &viewer.store, &req.message)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(feedback))).into_response())
}
