//! # Sweetify API
//!
//! REST server for the sweets storefront.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           API Routes                                    │
//! │                                                                         │
//! │  ┌────────────────┐  ┌──────────────────────┐  ┌─────────────────────┐ │
//! │  │  /api/auth     │  │  /api/sweets         │  │  /api/cart          │ │
//! │  │                │  │                      │  │                     │ │
//! │  │ • register     │  │ • list / get  (user) │  │ • view / add        │ │
//! │  │ • login        │  │ • search      (user) │  │ • set quantity      │ │
//! │  │                │  │ • purchase    (user) │  │ • remove / clear    │ │
//! │  │                │  │ • create      (admin)│  │ • purchase          │ │
//! │  │                │  │ • update      (admin)│  │   (checkout)        │ │
//! │  │                │  │ • delete      (admin)│  │                     │ │
//! │  │                │  │ • restock     (admin)│  │                     │ │
//! │  └────────────────┘  └──────────────────────┘  └─────────────────────┘ │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                      Infrastructure                               │  │
//! │  │                                                                   │  │
//! │  │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────────────┐│  │
//! │  │  │   SQLite     │  │  JWT Auth    │  │  tower-http              ││  │
//! │  │  │ sweetify-db  │  │  extractors  │  │  trace + CORS            ││  │
//! │  │  └──────────────┘  └──────────────┘  └──────────────────────────┘│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables (see [`config::ApiConfig`]):
//! - `HOST` / `PORT` - listen address (default: 0.0.0.0:5000)
//! - `DATABASE_PATH` - SQLite file (default: sweetify.db)
//! - `JWT_SECRET` - Secret for JWT signing
//! - `JWT_LIFETIME_SECS` - Token lifetime (default: 30 days)
//! - `CORS_ALLOW_ORIGIN` - Frontend origin (default: any)

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::auth::JwtManager;
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
use sweetify_db::Database;

/// Shared application state.
///
/// Cheap to clone: everything lives behind one `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    db: Database,
    jwt: JwtManager,
    config: ApiConfig,
}

impl AppState {
    pub fn new(db: Database, config: ApiConfig) -> Self {
        let jwt = JwtManager::new(&config.jwt_secret, config.jwt_lifetime_secs);
        AppState {
            inner: Arc::new(AppStateInner { db, jwt, config }),
        }
    }

    pub fn db(&self) -> &Database {
        &self.inner.db
    }

    pub fn jwt(&self) -> &JwtManager {
        &self.inner.jwt
    }

    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }
}

/// Builds the full application router with its middleware stack.
pub fn app(state: AppState) -> Router {
    let cors = middleware::cors_layer(state.config().cors_allow_origin.as_deref());

    routes::router()
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
