//! # Validation Module
//!
//! Input validation utilities for Sweetify.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (React forms)                                       │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: HTTP handler (Rust)                                          │
//! │  ├── Type validation (JSON deserialization)                            │
//! │  └── THIS MODULE: Business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── UNIQUE (username)                                                 │
//! │  ├── CHECK (role, cart quantity ≥ 1)                                   │
//! │  └── Foreign keys (cart → user, cart → sweet)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use sweetify_core::validation::{validate_sweet_name, validate_restock_amount};
//!
//! assert!(validate_sweet_name("Gummy Bears").is_ok());
//! assert!(validate_restock_amount(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{NewSweet, SweetChanges};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY, MAX_PRICE_CENTS, MAX_STOCK_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 100;
const MAX_CATEGORY_LEN: usize = 50;
const MAX_IMAGE_URL_LEN: usize = 2048;
const MIN_USERNAME_LEN: usize = 3;
const MAX_USERNAME_LEN: usize = 50;
const MIN_PASSWORD_LEN: usize = 6;
const MAX_PASSWORD_LEN: usize = 128;

// =============================================================================
// String Validators
// =============================================================================

fn validate_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates a sweet's display name (non-empty, at most 100 characters).
pub fn validate_sweet_name(name: &str) -> ValidationResult<()> {
    validate_text("name", name, MAX_NAME_LEN)
}

/// Validates a category (non-empty, at most 50 characters).
pub fn validate_category(category: &str) -> ValidationResult<()> {
    validate_text("category", category, MAX_CATEGORY_LEN)
}

/// Validates an optional image URL.
///
/// Only the length is checked; the frontend renders whatever it is given.
pub fn validate_image_url(url: &str) -> ValidationResult<()> {
    if url.len() > MAX_IMAGE_URL_LEN {
        return Err(ValidationError::TooLong {
            field: "imageUrl".to_string(),
            max: MAX_IMAGE_URL_LEN,
        });
    }
    Ok(())
}

/// Validates a username.
///
/// ## Rules
/// - 3 to 50 characters after trimming
/// - No whitespace inside the name
///
/// ```rust
/// use sweetify_core::validation::validate_username;
///
/// assert!(validate_username("alice").is_ok());
/// assert!(validate_username("al").is_err());
/// assert!(validate_username("al ice").is_err());
/// ```
pub fn validate_username(username: &str) -> ValidationResult<()> {
    let username = username.trim();

    if username.is_empty() {
        return Err(ValidationError::required("username"));
    }

    let len = username.chars().count();
    if len < MIN_USERNAME_LEN {
        return Err(ValidationError::TooShort {
            field: "username".to_string(),
            min: MIN_USERNAME_LEN,
        });
    }
    if len > MAX_USERNAME_LEN {
        return Err(ValidationError::TooLong {
            field: "username".to_string(),
            max: MAX_USERNAME_LEN,
        });
    }

    if username.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field: "username".to_string(),
            reason: "must not contain spaces".to_string(),
        });
    }

    Ok(())
}

/// Validates a plaintext password before hashing (6 to 128 characters).
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::required("password"));
    }

    let len = password.chars().count();
    if len < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LEN,
        });
    }
    if len > MAX_PASSWORD_LEN {
        return Err(ValidationError::TooLong {
            field: "password".to_string(),
            max: MAX_PASSWORD_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price in cents (0 to [`MAX_PRICE_CENTS`]).
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }
    if cents > MAX_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "price (cents)".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }
    Ok(())
}

/// Validates a quantity-on-hand value set by an admin (0 to [`MAX_STOCK_QUANTITY`]).
pub fn validate_stock_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::Negative {
            field: "quantity".to_string(),
        });
    }
    if qty > MAX_STOCK_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: MAX_STOCK_QUANTITY,
        });
    }
    Ok(())
}

/// Validates a restock amount.
///
/// ## User Workflow
/// ```text
/// Admin Dashboard: "Restock +20"
///      │
///      ▼
/// validate_restock_amount(20) ← THIS FUNCTION
///      │
///      ▼
/// UPDATE sweets SET quantity = quantity + 20
/// ```
pub fn validate_restock_amount(amount: i64) -> ValidationResult<()> {
    if amount <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }
    if amount > MAX_STOCK_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "amount".to_string(),
            min: 1,
            max: MAX_STOCK_QUANTITY,
        });
    }
    Ok(())
}

/// Validates a cart line quantity (1 to [`MAX_ITEM_QUANTITY`]).
pub fn validate_cart_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates that adding one more distinct line keeps the cart in bounds.
pub fn validate_cart_size(current_items: usize) -> ValidationResult<()> {
    if current_items >= MAX_CART_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "cart items".to_string(),
            min: 0,
            max: MAX_CART_ITEMS as i64,
        });
    }
    Ok(())
}

// =============================================================================
// Identifier Validators
// =============================================================================

/// Validates a UUID string.
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;
    Ok(())
}

// =============================================================================
// Aggregate Validators
// =============================================================================

/// Validates every field of a new sweet.
pub fn validate_new_sweet(sweet: &NewSweet) -> ValidationResult<()> {
    validate_sweet_name(&sweet.name)?;
    validate_category(&sweet.category)?;
    validate_price_cents(sweet.price_cents)?;
    validate_stock_quantity(sweet.quantity)?;
    if let Some(url) = &sweet.image_url {
        validate_image_url(url)?;
    }
    Ok(())
}

/// Validates each provided field of a partial update, as on create.
pub fn validate_sweet_changes(changes: &SweetChanges) -> ValidationResult<()> {
    if let Some(name) = &changes.name {
        validate_sweet_name(name)?;
    }
    if let Some(category) = &changes.category {
        validate_category(category)?;
    }
    if let Some(price) = changes.price_cents {
        validate_price_cents(price)?;
    }
    if let Some(qty) = changes.quantity {
        validate_stock_quantity(qty)?;
    }
    if let Some(url) = &changes.image_url {
        validate_image_url(url)?;
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
