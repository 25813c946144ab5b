//! Owner analytics handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use docusend_entity::analytics::Feedback;
use docusend_service::analytics::ResourceAnalytics;

use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::OwnerUser;
use crate::state::AppState;

/// GET /api/resources/{id}/analytics
pub async fn resource_analytics(
    State(state): State<AppState>,
    owner: OwnerUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<ResourceAnalytics>>> {
    let report = state.analytics_service.report(&owner, id).await?;
    Ok(Json(ApiResponse::ok(report)))
}

/// GET /api/resources/{id}/feedback
pub async fn resource_feedback(
    State(state): State<AppState>,
    owner: OwnerUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Vec<Feedback>>>> {
    let feedback = state.analytics_service.feedback(&owner, id).await?;
    Ok(Json(ApiResponse::ok(feedback)))
}
