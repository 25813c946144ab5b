//! `OwnerUser` extractor: pulls the JWT from the Authorization header,
//! validates it, and injects the request context.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;

use docusend_auth::Claims;
use docusend_core::error::AppError;
use docusend_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated owner context available in handlers.
#[derive(Debug, Clone)]
pub struct OwnerUser(pub RequestContext);

impl std::ops::Deref for OwnerUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Bearer token from the request, if one is present and well-formed.
pub(crate) async fn bearer_token(parts: &mut Parts, state: &AppState) -> Option<String> {
    TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
        .await
        .ok()
        .map(|TypedHeader(Authorization(bearer))| bearer.token().to_string())
}

/// Decode the bearer token, if any.
pub(crate) async fn claims(parts: &mut Parts, state: &AppState) -> Option<Result<Claims, AppError>> {
    let token = bearer_token(parts, state).await?;
    Some(state.jwt_decoder.decode(&token))
}

impl FromRequestParts<AppState> for OwnerUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = claims(parts, state)
            .await
            .ok_or_else(|| AppError::authentication("Missing bearer token"))??;
        Ok(OwnerUser(RequestContext::new(claims.user_id(), claims.email)))
    }
}
