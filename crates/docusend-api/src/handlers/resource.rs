//! Owner resource CRUD handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use docusend_entity::resource::ShareableResource;

use crate::dto::request::{CreateResourceBody, UpdateResourceBody};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{OwnerUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/resources
pub async fn list_resources(
    State(state): State<AppState>,
    owner: OwnerUser,
) -> ApiResult<Json<ApiResponse<Vec<ShareableResource>>>> {
    let resources = state.resource_service.list(&owner).await?;
    Ok(Json(ApiResponse::ok(resources)))
}

/// POST /api/resources
pub async fn create_resource(
    State(state): State<AppState>,
    owner: OwnerUser,
    ValidatedJson(req): ValidatedJson<CreateResourceBody>,
) -> ApiResult<(StatusCode, Json<ApiResponse<ShareableResource>>)> {
    let resource = state.resource_service.create(&owner, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(resource))))
}

/// GET /api/resources/{id}
pub async fn get_resource(
    State(state): State<AppState>,
    owner: OwnerUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<ShareableResource>>> {
    let resource = state.resource_service.get(&owner, id).await?;
    Ok(Json(ApiResponse::ok(resource)))
}

/// PUT /api/resources/{id}
pub async fn update_resource(
    State(state): State<AppState>,
    owner: OwnerUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateResourceBody>,
) -> ApiResult<Json<ApiResponse<ShareableResource>>> {
    let resource = state
        .resource_service
        .update(&owner, id, req.into())
        .await?;
    Ok(Json(ApiResponse::ok(resource)))
}

/// DELETE /api/resources/{id}
pub async fn delete_resource(
    State(state): State<AppState>,
    owner: OwnerUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.resource_service.delete(&owner, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
