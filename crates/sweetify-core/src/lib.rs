//! # sweetify-core: Pure Business Logic for Sweetify
//!
//! This crate is the **heart** of the Sweetify storefront. It contains the
//! domain types and business rules as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Sweetify Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (React SPA)                         │   │
//! │  │    Catalog ──► Cart Slider ──► Checkout ──► Admin Dashboard     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP / JSON                            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/api (axum)                              │   │
//! │  │    /api/auth, /api/sweets, /api/cart                            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ sweetify-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │  Sweet    │  │   Money   │  │   Cart    │  │   rules   │  │   │
//! │  │   │  User     │  │           │  │ Checkout  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  sweetify-db (Database Layer)                   │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Sweet, User, Role, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Cart line items and checkout planning
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use sweetify_core::cart::Cart;
//!
//! let mut cart = Cart::new();
//! cart.add_item("lollipop", 2).unwrap();
//! cart.add_item("lollipop", 3).unwrap();
//!
//! // Adding the same sweet twice accumulates instead of duplicating
//! assert_eq!(cart.items.len(), 1);
//! assert_eq!(cart.items[0].quantity, 5);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use sweetify_core::Money` instead of
// `use sweetify_core::money::Money`

pub use cart::{Cart, CartItem, CartLine, CheckoutPlan, StockDecrement};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct sweets allowed in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single sweet in a cart line.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Highest unit price an admin can set: $1,000,000.00.
pub const MAX_PRICE_CENTS: i64 = 100_000_000;

/// Highest stock level a sweet can hold, whether set directly or by restock.
pub const MAX_STOCK_QUANTITY: i64 = 1_000_000_000;
