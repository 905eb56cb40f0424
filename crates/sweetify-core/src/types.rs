//! # Domain Types
//!
//! Core domain types used throughout Sweetify.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Sweet       │   │      User       │   │   Cart (cart.rs)│       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  items[]        │       │
//! │  │  name           │   │  username       │   │   sweet_id ─────┼──► Sweet
//! │  │  category       │   │  password_hash  │   │   quantity ≥ 1  │       │
//! │  │  price_cents    │   │  role           │   └─────────────────┘       │
//! │  │  quantity       │   └─────────────────┘                              │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  Write models:  NewSweet (create) · SweetChanges (partial update)      │
//! │  Read models:   SweetSearch (filters)                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Sweet
// =============================================================================

/// A sweet in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sweet {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Category, matched exactly by search.
    pub category: String,

    /// Price in cents.
    pub price_cents: i64,

    /// Units on hand.
    pub quantity: i64,

    /// Optional product image.
    pub image_url: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Sweet {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Checks whether `quantity` units can be taken from stock.
    #[inline]
    pub fn has_stock(&self, quantity: i64) -> bool {
        self.quantity >= quantity
    }
}

/// Fields required to create a sweet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSweet {
    pub name: String,
    pub category: String,
    pub price_cents: i64,
    pub quantity: i64,
    pub image_url: Option<String>,
}

/// A partial update. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweetChanges {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price_cents: Option<i64>,
    pub quantity: Option<i64>,
    pub image_url: Option<String>,
}

impl SweetChanges {
    /// True when no field was provided.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.price_cents.is_none()
            && self.quantity.is_none()
            && self.image_url.is_none()
    }
}

/// Catalog search filters.
///
/// All filters are optional and combine with AND:
/// ```text
/// name      → case-insensitive substring
/// category  → exact match
/// min/max   → inclusive price range (cents)
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweetSearch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub min_price_cents: Option<i64>,
    pub max_price_cents: Option<i64>,
}

// =============================================================================
// Role
// =============================================================================

/// Access level of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Role {
    /// Can browse, search, purchase and manage their own cart.
    #[default]
    Customer,
    /// Can additionally manage the catalog and restock.
    Admin,
}

impl Role {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Admin => "admin",
        }
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Role::Customer),
            "admin" => Ok(Role::Admin),
            _ => Err(ValidationError::NotAllowed {
                field: "role".to_string(),
                allowed: vec!["customer".to_string(), "admin".to_string()],
            }),
        }
    }
}

// =============================================================================
// User
// =============================================================================

/// A registered account.
///
/// The password hash never leaves the server: it is skipped on serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    pub id: String,

    /// Unique login name.
    pub username: String,

    /// PHC-format password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub role: Role,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sweet(quantity: i64) -> Sweet {
        let now = Utc::now();
        Sweet {
            id: "s1".to_string(),
            name: "Lollipop".to_string(),
            category: "Candy".to_string(),
            price_cents: 150,
            quantity,
            image_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_sweet_stock_check() {
        let s = sweet(3);
        assert!(s.has_stock(3));
        assert!(!s.has_stock(4));
        assert_eq!(s.price().cents(), 150);
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("customer".parse::<Role>().unwrap(), Role::Customer);
        assert!("superuser".parse::<Role>().is_err());
        assert_eq!(Role::default(), Role::Customer);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let now = Utc::now();
        let user = User {
            id: "u1".to_string(),
            username: "alice".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            role: Role::Customer,
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2"));
    }

    #[test]
    fn test_empty_changes() {
        assert!(SweetChanges::default().is_empty());
        let changes = SweetChanges {
            quantity: Some(0),
            ..Default::default()
        };
        assert!(!changes.is_empty());
    }
}
