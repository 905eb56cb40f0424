//! Cart and checkout handlers.
//!
//! Every mutation follows the same shape: load the stored cart, apply the
//! change with `sweetify_core::Cart`, save it back, and answer with the
//! populated lines.
//!
//! ## Checkout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  (a) Validate                                                           │
//! │      lines = cart JOIN sweets                                           │
//! │      CheckoutPlan::prepare(lines)  ── any line short ──► 400, no writes │
//! │                                                                         │
//! │  (b) Commit                                                             │
//! │      join_all(                                                          │
//! │        UPDATE sweets SET quantity = quantity - m                        │
//! │        WHERE id = ? AND quantity >= m        (one per line)             │
//! │      )                                                                  │
//! │      all matched ──► clear cart ──► 200 { message, itemCount, total }   │
//! │      a guard failed ──► 400, cart kept, other decrements stand          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::{Path, State};
use axum::Json;
use futures::future::join_all;
use tracing::{info, warn};

use crate::dto::{
    whole_number, AddToCartRequest, CartLineDto, CheckoutResponse, SetQuantityRequest,
};
use crate::error::{ApiError, ApiResult};
use crate::extract::{record_id, ApiJson};
use crate::middleware::AuthUser;
use crate::AppState;
use sweetify_core::{CheckoutPlan, CoreError, StockDecrement, User, ValidationError};
use sweetify_db::{Database, SweetRepository};

/// Loads the populated cart for the response body.
async fn cart_lines(state: &AppState, user: &User) -> ApiResult<Json<Vec<CartLineDto>>> {
    let lines = state.db().carts().get_lines(&user.id).await?;
    Ok(Json(lines.into_iter().map(CartLineDto::from).collect()))
}

fn invalid_add_request() -> ApiError {
    ApiError::Validation("A valid sweet ID and non-zero quantity are required.".to_string())
}

/// `GET /api/cart`
pub async fn view(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<CartLineDto>>> {
    cart_lines(&state, &user).await
}

/// `POST /api/cart`
///
/// Adds to an existing line or appends a new one.
pub async fn add(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    ApiJson(req): ApiJson<AddToCartRequest>,
) -> ApiResult<Json<Vec<CartLineDto>>> {
    let (Some(sweet_id), Some(quantity)) = (req.sweet_id, req.quantity) else {
        return Err(invalid_add_request());
    };
    let quantity = whole_number("quantity", quantity)?;
    if sweet_id.is_empty() || quantity == 0 {
        return Err(invalid_add_request());
    }

    let not_found = || ApiError::from(CoreError::SweetNotFound(sweet_id.clone()));
    record_id(&sweet_id).map_err(|_| not_found())?;
    if state.db().sweets().get_by_id(&sweet_id).await?.is_none() {
        return Err(not_found());
    }

    let carts = state.db().carts();
    let mut cart = carts.get_cart(&user.id).await?;
    cart.add_item(&sweet_id, quantity)?;
    carts.save_cart(&user.id, &cart).await?;

    info!(user_id = %user.id, sweet_id = %sweet_id, quantity, "Added to cart");
    cart_lines(&state, &user).await
}

/// `PUT /api/cart/{id}`
///
/// Sets an absolute quantity; zero removes the line.
pub async fn set_quantity(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(sweet_id): Path<String>,
    ApiJson(req): ApiJson<SetQuantityRequest>,
) -> ApiResult<Json<Vec<CartLineDto>>> {
    let quantity = req
        .quantity
        .ok_or_else(|| ValidationError::required("quantity"))?;
    let quantity = whole_number("quantity", quantity)?;

    let carts = state.db().carts();
    let mut cart = carts.get_cart(&user.id).await?;
    cart.set_quantity(&sweet_id, quantity)?;
    carts.save_cart(&user.id, &cart).await?;

    cart_lines(&state, &user).await
}

/// `DELETE /api/cart/{id}`
pub async fn remove(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(sweet_id): Path<String>,
) -> ApiResult<Json<Vec<CartLineDto>>> {
    let carts = state.db().carts();
    let mut cart = carts.get_cart(&user.id).await?;
    cart.remove_item(&sweet_id)?;
    carts.save_cart(&user.id, &cart).await?;

    cart_lines(&state, &user).await
}

/// `DELETE /api/cart`
pub async fn clear(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<CartLineDto>>> {
    state.db().carts().clear(&user.id).await?;
    Ok(Json(Vec::new()))
}

/// `POST /api/cart/purchase`
pub async fn checkout(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> ApiResult<Json<CheckoutResponse>> {
    // (a) validate against current stock
    let lines = state.db().carts().get_lines(&user.id).await?;
    let plan = CheckoutPlan::prepare(&lines)?;

    // (b) commit
    commit(state.db(), &user.id, &plan).await?;

    info!(
        user_id = %user.id,
        lines = plan.decrements.len(),
        item_count = plan.item_count,
        total = %plan.total,
        "Checkout complete"
    );

    Ok(Json(CheckoutResponse {
        message: "Purchase successful!".to_string(),
        item_count: plan.item_count,
        total: plan.total.to_decimal(),
    }))
}

/// Applies a prepared plan: one guarded decrement per line, then clears the
/// cart.
///
/// Every decrement runs to completion. If any guard failed, the first
/// failure is returned and the cart is left as it was.
pub(crate) async fn commit(db: &Database, user_id: &str, plan: &CheckoutPlan) -> ApiResult<()> {
    let sweets = db.sweets();
    let results = join_all(plan.decrements.iter().map(|d| commit_line(&sweets, d))).await;
    results.into_iter().collect::<ApiResult<Vec<()>>>()?;

    db.carts().clear(user_id).await?;
    Ok(())
}

async fn commit_line(sweets: &SweetRepository, decrement: &StockDecrement) -> ApiResult<()> {
    match sweets
        .decrement_stock(&decrement.sweet_id, decrement.quantity)
        .await?
    {
        Some(_) => Ok(()),
        None => {
            warn!(
                sweet_id = %decrement.sweet_id,
                quantity = decrement.quantity,
                "Checkout decrement guard failed"
            );
            Err(CoreError::StockChanged {
                name: decrement.name.clone(),
            }
            .into())
        }
    }
}
