//! Authentication middleware and extractors.
//!
//! Access control is expressed as extractors: a handler that takes
//! [`AuthUser`] only runs for a valid bearer token, and one that takes
//! [`AdminUser`] only runs for an admin.
//!
//! ```text
//! Authorization header ──► missing / not Bearer ──► 401 "Not authorized, no token"
//!        │
//!        ▼
//! JwtManager::validate ──► bad signature / expired ──► 401 "Not authorized, token failed"
//!        │
//!        ▼
//! users.get_by_id(sub) ──► account gone ──► 401 "Not authorized, token failed"
//!        │
//!        ▼
//! AuthUser(user) ──► AdminUser: role != admin ──► 403 "Not authorized as an admin"
//! ```

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use tracing::debug;

use crate::auth::extract_bearer_token;
use crate::error::ApiError;
use crate::AppState;
use sweetify_core::User;

/// Extractor that requires a valid bearer token.
///
/// # Example
///
/// ```rust,ignore
/// async fn view_cart(AuthUser(user): AuthUser) -> ApiResult<Json<Vec<CartLineDto>>> {
///     // user is loaded from the database
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(extract_bearer_token)
            .ok_or(ApiError::MissingToken)?;

        let claims = state.jwt().validate(token)?;

        let user = state
            .db()
            .users()
            .get_by_id(&claims.sub)
            .await?
            .ok_or_else(|| {
                debug!(user_id = %claims.sub, "Token subject no longer exists");
                ApiError::InvalidToken
            })?;

        Ok(Self(user))
    }
}

/// Extractor that requires an authenticated admin.
///
/// The role is read from the freshly loaded account, so a demoted admin
/// loses access even while holding an old token.
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;

        if !user.role.is_admin() {
            debug!(user_id = %user.id, "Admin route refused");
            return Err(ApiError::Forbidden);
        }

        Ok(Self(user))
    }
}
