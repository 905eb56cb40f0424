//! # Repository Module
//!
//! Database repository implementations for Sweetify.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  db.sweets().purchase_one(id)                                  │
//! │       ▼                                                                 │
//! │  SweetRepository                                                       │
//! │  ├── list / get_by_id / search                                         │
//! │  ├── insert / update / delete                                          │
//! │  └── purchase_one / restock / decrement_stock                          │
//! │       │                                                                 │
//! │       │  SQL                                                            │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`SweetRepository`](sweet::SweetRepository) - Catalog CRUD, search and stock
//! - [`UserRepository`](user::UserRepository) - Accounts
//! - [`CartRepository`](cart::CartRepository) - Per-user cart lines

pub mod cart;
pub mod sweet;
pub mod user;
