//! # Error Types
//!
//! Domain-specific error types for sweetify-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  sweetify-core errors (this file)                                      │
//! │  ├── CoreError        - Business rule violations (stock, cart)         │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  sweetify-db errors (separate crate)                                   │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  API errors (apps/api)                                                 │
//! │  └── ApiError         - What the frontend sees ({ "message": ... })    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → HTTP status + JSON     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `Display` text of each variant is the message the frontend shows, so
//! wording here is part of the API contract.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Sweet cannot be found.
    #[error("Sweet not found")]
    SweetNotFound(String),

    /// The sweet has no stock left for a single-unit purchase.
    #[error("Sweet is out of stock")]
    OutOfStock(String),

    /// A cart line asks for more than is on hand.
    ///
    /// ## User Workflow
    /// ```text
    /// Cart: 3 × Gummy Bear
    ///      │
    ///      ▼
    /// Checkout validate phase: available = 2
    ///      │
    ///      ▼
    /// InsufficientStock { name: "Gummy Bear", available: 2, requested: 3 }
    ///      │
    ///      ▼
    /// UI shows: "Not enough stock for Gummy Bear. Available: 2, In Cart: 3"
    /// ```
    #[error("Not enough stock for {name}. Available: {available}, In Cart: {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// A guarded checkout decrement matched no row: stock moved between the
    /// validate and commit phases.
    #[error("Stock for {name} changed during checkout, please review your cart")]
    StockChanged { name: String },

    /// Checkout was requested with nothing in the cart.
    #[error("Your cart is empty")]
    EmptyCart,

    /// The referenced sweet is not a line in the cart.
    #[error("Item not found in cart")]
    CartItemNotFound(String),

    /// Cart has exceeded maximum allowed distinct items.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Line quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// A restock would push stock past [`crate::MAX_STOCK_QUANTITY`].
    #[error("Restock would exceed the maximum stock of {max}")]
    StockLimitExceeded { max: i64 },

    /// Price × quantity or the cart sum does not fit in cents.
    #[error("Order total is too large")]
    TotalTooLarge,

    /// Validation error (wraps ValidationError).
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Several required fields were missing at once.
    #[error("Please provide all required fields")]
    MissingFields { fields: Vec<String> },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be a positive number")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} cannot be negative")]
    Negative { field: String },

    /// Invalid format (e.g., invalid UUID, non-numeric price).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {}", allowed.join(", "))]
    NotAllowed { field: String, allowed: Vec<String> },
}

impl ValidationError {
    /// Shorthand for [`ValidationError::Required`].
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
