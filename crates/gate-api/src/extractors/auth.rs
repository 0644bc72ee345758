//! Authentication extractors
//!
//! Authenticates requests by looking up the `X-Api-Key` header against the
//! user store. `AdminUser` additionally enforces the admin role.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use gate_common::API_KEY_HEADER;
use gate_core::entities::User;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated user resolved from the API key
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let api_key = parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::MissingApiKey)?;

        let app_state = AppState::from_ref(state);
        let user = app_state
            .service_context()
            .user_repo()
            .find_by_api_key(api_key)
            .await
            .map_err(ApiError::Domain)?
            .ok_or_else(|| {
                tracing::warn!("authentication failed: unknown API key");
                ApiError::InvalidApiKey
            })?;

        Ok(AuthUser(user))
    }
}

/// Authenticated admin; rejects members with 403
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_admin() {
            tracing::warn!(user_id = user.id, "admin endpoint denied to member");
            return Err(ApiError::AdminRequired);
        }
        Ok(AdminUser(user))
    }
}
