//! Catalog and inventory handlers.
//!
//! ## Single-Unit Purchase
//! ```text
//! POST /api/sweets/{id}/purchase
//!      │
//!      ▼
//! UPDATE ... quantity - 1 WHERE id = ? AND quantity > 0
//!      │
//!      ├── row returned ──► 200 with the updated sweet
//!      │
//!      └── no row ──► get_by_id
//!                        ├── None ──► 404 "Sweet not found"
//!                        └── Some ──► 400 "Sweet is out of stock"
//! ```
//!
//! Restock follows the same shape with a ceiling guard
//! (`quantity <= MAX_STOCK_QUANTITY - amount`).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use crate::dto::{
    parse_price_bound, price_to_cents, whole_number, CreateSweetRequest, MessageResponse,
    RestockRequest, SearchParams, SweetDto, UpdateSweetRequest,
};
use crate::error::{ApiError, ApiResult};
use crate::extract::{record_id, ApiJson, ApiQuery};
use crate::middleware::{AdminUser, AuthUser};
use crate::AppState;
use sweetify_core::validation::{
    validate_new_sweet, validate_restock_amount, validate_sweet_changes,
};
use sweetify_core::{
    CoreError, NewSweet, SweetChanges, SweetSearch, ValidationError, MAX_STOCK_QUANTITY,
};

fn to_dtos(sweets: Vec<sweetify_core::Sweet>) -> Vec<SweetDto> {
    sweets.into_iter().map(SweetDto::from).collect()
}

fn sweet_not_found(id: &str) -> ApiError {
    CoreError::SweetNotFound(id.to_string()).into()
}

// =============================================================================
// Reads
// =============================================================================

/// `GET /api/sweets`
pub async fn list(_user: AuthUser, State(state): State<AppState>) -> ApiResult<Json<Vec<SweetDto>>> {
    let sweets = state.db().sweets().list().await?;
    Ok(Json(to_dtos(sweets)))
}

/// `GET /api/sweets/{id}`
pub async fn get_one(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<SweetDto>> {
    let id = record_id(&id)?;
    let sweet = state
        .db()
        .sweets()
        .get_by_id(id)
        .await?
        .ok_or_else(|| sweet_not_found(id))?;
    Ok(Json(sweet.into()))
}

/// `GET /api/sweets/search?name=&category=&minPrice=&maxPrice=`
pub async fn search(
    _user: AuthUser,
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> ApiResult<Json<Vec<SweetDto>>> {
    let filters = SweetSearch {
        min_price_cents: parse_price_bound("minPrice", params.min_price.as_deref())?,
        max_price_cents: parse_price_bound("maxPrice", params.max_price.as_deref())?,
        name: params.name,
        category: params.category,
    };

    let sweets = state.db().sweets().search(&filters).await?;
    Ok(Json(to_dtos(sweets)))
}

// =============================================================================
// Admin Writes
// =============================================================================

/// `POST /api/sweets`
pub async fn create(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateSweetRequest>,
) -> ApiResult<(StatusCode, Json<SweetDto>)> {
    let (Some(name), Some(category), Some(price), Some(quantity)) =
        (req.name, req.category, req.price, req.quantity)
    else {
        return Err(ValidationError::MissingFields {
            fields: vec![
                "name".to_string(),
                "category".to_string(),
                "price".to_string(),
                "quantity".to_string(),
            ],
        }
        .into());
    };

    let new = NewSweet {
        name,
        category,
        price_cents: price_to_cents("price", price)?,
        quantity: whole_number("quantity", quantity)?,
        image_url: req.image_url.filter(|url| !url.trim().is_empty()),
    };
    validate_new_sweet(&new)?;

    let sweet = state.db().sweets().insert(&new).await?;
    info!(sweet_id = %sweet.id, admin_id = %admin.id, name = %sweet.name, "Sweet created");

    Ok((StatusCode::CREATED, Json(sweet.into())))
}

/// `PUT /api/sweets/{id}`
///
/// Only provided fields change; each is validated as on create.
pub async fn update(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateSweetRequest>,
) -> ApiResult<Json<SweetDto>> {
    let id = record_id(&id)?;

    let changes = SweetChanges {
        name: req.name,
        category: req.category,
        price_cents: req.price.map(|p| price_to_cents("price", p)).transpose()?,
        quantity: req
            .quantity
            .map(|q| whole_number("quantity", q))
            .transpose()?,
        image_url: req.image_url,
    };
    validate_sweet_changes(&changes)?;

    let sweet = state
        .db()
        .sweets()
        .update(id, &changes)
        .await?
        .ok_or_else(|| sweet_not_found(id))?;

    info!(sweet_id = %sweet.id, admin_id = %admin.id, "Sweet updated");
    Ok(Json(sweet.into()))
}

/// `DELETE /api/sweets/{id}`
pub async fn remove(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = record_id(&id)?;

    if !state.db().sweets().delete(id).await? {
        return Err(sweet_not_found(id));
    }

    info!(sweet_id = %id, admin_id = %admin.id, "Sweet removed");
    Ok(Json(MessageResponse::new("Sweet removed")))
}

// =============================================================================
// Inventory
// =============================================================================

/// `POST /api/sweets/{id}/purchase`
pub async fn purchase(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<SweetDto>> {
    let id = record_id(&id)?;
    let sweets = state.db().sweets();

    if let Some(sweet) = sweets.purchase_one(id).await? {
        info!(sweet_id = %id, user_id = %user.id, remaining = sweet.quantity, "Sweet purchased");
        return Ok(Json(sweet.into()));
    }

    match sweets.get_by_id(id).await? {
        None => Err(sweet_not_found(id)),
        Some(_) => Err(CoreError::OutOfStock(id.to_string()).into()),
    }
}

/// `POST /api/sweets/{id}/restock`
pub async fn restock(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<RestockRequest>,
) -> ApiResult<Json<SweetDto>> {
    let id = record_id(&id)?;

    let amount = req
        .amount
        .ok_or_else(|| ValidationError::required("amount"))?;
    let amount = whole_number("amount", amount)?;
    validate_restock_amount(amount)?;

    let sweets = state.db().sweets();
    let Some(sweet) = sweets.restock(id, amount).await? else {
        return match sweets.get_by_id(id).await? {
            None => Err(sweet_not_found(id)),
            Some(_) => Err(CoreError::StockLimitExceeded {
                max: MAX_STOCK_QUANTITY,
            }
            .into()),
        };
    };

    info!(sweet_id = %id, admin_id = %admin.id, amount, quantity = sweet.quantity, "Sweet restocked");
    Ok(Json(sweet.into()))
}
