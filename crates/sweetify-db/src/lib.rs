//! # sweetify-db: Database Layer for Sweetify
//!
//! This crate provides database access for the Sweetify storefront.
//! It uses SQLite with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Sweetify Data Flow                               │
//! │                                                                         │
//! │  HTTP handler (POST /api/sweets/{id}/purchase)                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   sweetify-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ SweetRepo     │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ UserRepo      │    │ 001_init.sql │  │   │
//! │  │   │               │    │ CartRepo      │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (sweetify.db, WAL mode)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Stock Guards
//! Every stock change is a single guarded statement, so concurrent
//! purchases can never drive a quantity below zero:
//! ```sql
//! UPDATE sweets SET quantity = quantity - 1 WHERE id = ? AND quantity > 0 RETURNING ...
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::cart::CartRepository;
pub use repository::sweet::SweetRepository;
pub use repository::user::UserRepository;
