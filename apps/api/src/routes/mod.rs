//! Route table.
//!
//! | Method | Path                          | Access |
//! |--------|-------------------------------|--------|
//! | POST   | `/api/auth/register`          | public |
//! | POST   | `/api/auth/login`             | public |
//! | GET    | `/api/sweets`                 | user   |
//! | POST   | `/api/sweets`                 | admin  |
//! | GET    | `/api/sweets/search`          | user   |
//! | GET    | `/api/sweets/{id}`            | user   |
//! | PUT    | `/api/sweets/{id}`            | admin  |
//! | DELETE | `/api/sweets/{id}`            | admin  |
//! | POST   | `/api/sweets/{id}/purchase`   | user   |
//! | POST   | `/api/sweets/{id}/restock`    | admin  |
//! | GET    | `/api/cart`                   | user   |
//! | POST   | `/api/cart`                   | user   |
//! | DELETE | `/api/cart`                   | user   |
//! | PUT    | `/api/cart/{id}`              | user   |
//! | DELETE | `/api/cart/{id}`              | user   |
//! | POST   | `/api/cart/purchase`          | user   |
//! | GET    | `/`, `/health`, `/health/ready` | public |

pub mod auth;
pub mod cart;
pub mod health;
pub mod sweets;

use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};

use crate::dto::MessageResponse;
use crate::AppState;

/// All routes, without state or middleware.
pub fn router() -> Router<AppState> {
    let auth = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login));

    let sweets = Router::new()
        .route("/", get(sweets::list).post(sweets::create))
        .route("/search", get(sweets::search))
        .route(
            "/{id}",
            get(sweets::get_one)
                .put(sweets::update)
                .delete(sweets::remove),
        )
        .route("/{id}/purchase", post(sweets::purchase))
        .route("/{id}/restock", post(sweets::restock));

    let cart = Router::new()
        .route(
            "/",
            get(cart::view).post(cart::add).delete(cart::clear),
        )
        .route("/purchase", post(cart::checkout))
        .route("/{id}", put(cart::set_quantity).delete(cart::remove));

    Router::new()
        .route("/", get(health::banner))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/api/auth", auth)
        .nest("/api/sweets", sweets)
        .nest("/api/cart", cart)
        .fallback(not_found)
}

async fn not_found() -> (StatusCode, Json<MessageResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(MessageResponse::new("Resource not found")),
    )
}
