//! Wire types: the JSON contract with the frontend.
//!
//! Responses use camelCase and expose record ids as `_id`. Prices travel as
//! decimal numbers; everything behind this module works in cents.
//!
//! Response types derive `TS` and are exported as TypeScript definitions
//! when the test suite runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{ApiError, ApiResult};
use sweetify_core::cart::CartLine;
use sweetify_core::{Money, Role, Sweet, User};

// =============================================================================
// Responses
// =============================================================================

/// A sweet as the frontend sees it.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SweetDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub quantity: i64,
    pub image_url: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl From<Sweet> for SweetDto {
    fn from(s: Sweet) -> Self {
        SweetDto {
            price: s.price().to_decimal(),
            id: s.id,
            name: s.name,
            category: s.category,
            quantity: s.quantity,
            image_url: s.image_url,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

/// One populated cart line.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLineDto {
    pub sweet: SweetDto,
    pub quantity: i64,
}

impl From<CartLine> for CartLineDto {
    fn from(line: CartLine) -> Self {
        CartLineDto {
            sweet: line.sweet.into(),
            quantity: line.quantity,
        }
    }
}

/// Public view of an account.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UserDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub role: Role,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        UserDto {
            id: u.id,
            username: u.username,
            role: u.role,
        }
    }
}

/// Body of register and login responses.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AuthResponse {
    pub user: UserDto,
    pub token: String,
}

/// Plain `{ "message": ... }` success body.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        MessageResponse {
            message: message.into(),
        }
    }
}

/// Body of a successful checkout.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CheckoutResponse {
    pub message: String,
    /// Total units purchased.
    pub item_count: i64,
    pub total: f64,
}

// =============================================================================
// Requests
// =============================================================================
// Fields are optional so a missing field produces our own 400 message rather
// than a deserializer error.

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSweetRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<f64>,
    pub image_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSweetRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<f64>,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RestockRequest {
    pub amount: Option<f64>,
}

/// Query string of `GET /api/sweets/search`. Bounds arrive as raw strings so
/// an unparseable value can be reported with a clear message.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub name: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub sweet_id: Option<String>,
    pub quantity: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct SetQuantityRequest {
    pub quantity: Option<f64>,
}

// =============================================================================
// Number Helpers
// =============================================================================

/// Converts a JSON number to an integer, rejecting fractions.
pub fn whole_number(field: &str, value: f64) -> ApiResult<i64> {
    if !value.is_finite() || value.fract() != 0.0 || value.abs() > i64::MAX as f64 {
        return Err(ApiError::Validation(format!(
            "{field} must be a whole number"
        )));
    }
    Ok(value as i64)
}

/// Converts a decimal price to cents.
pub fn price_to_cents(field: &str, value: f64) -> ApiResult<i64> {
    Money::from_decimal(value)
        .map(|m| m.cents())
        .ok_or_else(|| ApiError::Validation(format!("{field} must be a valid number")))
}

/// Parses an optional price bound from a query string. Empty means absent.
pub fn parse_price_bound(field: &str, raw: Option<&str>) -> ApiResult<Option<i64>> {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Ok(None);
    };

    let value: f64 = raw
        .parse()
        .map_err(|_| ApiError::Validation(format!("{field} must be a number")))?;

    price_to_cents(field, value).map(Some)
}
