//! Request extractors whose rejections use the API error format.
//!
//! Axum's stock `Json` and `Query` reject with plain-text bodies; these
//! wrappers route the rejection through [`ApiError`] so malformed input gets
//! the same `{ "message": ... }` shape as every other error.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::{ApiError, ApiResult};
use sweetify_core::validation::validate_uuid;

/// `Json<T>` with `ApiError` rejections.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `Query<T>` with `ApiError` rejections.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// Checks a path identifier. Anything that is not a UUID cannot name a
/// record, so it is reported as a missing resource.
pub fn record_id(id: &str) -> ApiResult<&str> {
    validate_uuid(id).map_err(|_| ApiError::resource_not_found())?;
    Ok(id)
}
