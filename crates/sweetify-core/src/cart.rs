//! # Cart Module
//!
//! A user's cart as a pure value, plus checkout planning.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  load (sweetify-db)  ──►  Cart { items }  ──►  save (sweetify-db)      │
//! │                              │                                          │
//! │            add_item / set_quantity / remove_item / clear                │
//! │                                                                         │
//! │  Checkout:                                                              │
//! │    [CartLine { sweet, quantity }]                                       │
//! │          │                                                              │
//! │          ▼                                                              │
//! │    CheckoutPlan::prepare ── any line short? ──► InsufficientStock       │
//! │          │                                                              │
//! │          ▼                                                              │
//! │    [StockDecrement] ──► conditional UPDATE per line ──► cart cleared    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lines are keyed by sweet id and keep insertion order.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Sweet;
use crate::validation::{validate_cart_quantity, validate_cart_size};
use crate::MAX_ITEM_QUANTITY;

// =============================================================================
// Cart Items
// =============================================================================

/// One stored line of a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub sweet_id: String,
    pub quantity: i64,
}

/// A cart line joined with the full sweet record.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub sweet: Sweet,
    pub quantity: i64,
}

impl CartLine {
    /// Unit price × quantity.
    pub fn line_total(&self) -> CoreResult<Money> {
        self.sweet
            .price()
            .checked_mul(self.quantity)
            .ok_or(CoreError::TotalTooLarge)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The set of lines a user intends to buy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<CartItem>) -> Self {
        Cart { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Finds the line for a sweet.
    pub fn get(&self, sweet_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.sweet_id == sweet_id)
    }

    /// Adds `quantity` units of a sweet.
    ///
    /// An existing line accumulates; a new line is appended at the end.
    ///
    /// ## Errors
    /// - `Validation` if `quantity` is not in `1..=999`
    /// - `QuantityTooLarge` if the accumulated line would exceed 999
    /// - `CartTooLarge` if a new line would exceed the distinct-item limit
    pub fn add_item(&mut self, sweet_id: &str, quantity: i64) -> CoreResult<()> {
        validate_cart_quantity(quantity)?;

        if let Some(item) = self.items.iter_mut().find(|i| i.sweet_id == sweet_id) {
            let new_quantity = item.quantity + quantity;
            if new_quantity > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_quantity,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            item.quantity = new_quantity;
            return Ok(());
        }

        validate_cart_size(self.items.len()).map_err(|_| CoreError::CartTooLarge {
            max: crate::MAX_CART_ITEMS,
        })?;

        self.items.push(CartItem {
            sweet_id: sweet_id.to_string(),
            quantity,
        });
        Ok(())
    }

    /// Sets the absolute quantity of an existing line. Zero removes it.
    pub fn set_quantity(&mut self, sweet_id: &str, quantity: i64) -> CoreResult<()> {
        if quantity == 0 {
            return self.remove_item(sweet_id);
        }

        validate_cart_quantity(quantity)?;

        let item = self
            .items
            .iter_mut()
            .find(|i| i.sweet_id == sweet_id)
            .ok_or_else(|| CoreError::CartItemNotFound(sweet_id.to_string()))?;
        item.quantity = quantity;
        Ok(())
    }

    /// Removes the line for a sweet.
    pub fn remove_item(&mut self, sweet_id: &str) -> CoreResult<()> {
        let before = self.items.len();
        self.items.retain(|i| i.sweet_id != sweet_id);
        if self.items.len() == before {
            return Err(CoreError::CartItemNotFound(sweet_id.to_string()));
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

// =============================================================================
// Checkout Planning
// =============================================================================

/// A guarded stock decrement produced by a successful validation phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockDecrement {
    pub sweet_id: String,
    pub name: String,
    pub quantity: i64,
}

/// Everything the commit phase needs, computed up front.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutPlan {
    pub decrements: Vec<StockDecrement>,
    /// Total units across all lines.
    pub item_count: i64,
    pub total: Money,
}

impl CheckoutPlan {
    /// Validates every line against current stock.
    ///
    /// Nothing is planned unless all lines pass, so a failure here leaves
    /// the catalog untouched.
    ///
    /// ## Errors
    /// - `EmptyCart` when there are no lines
    /// - `InsufficientStock` for the first line asking for more than is on hand
    /// - `TotalTooLarge` if the order total does not fit in cents
    pub fn prepare(lines: &[CartLine]) -> CoreResult<Self> {
        if lines.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        for line in lines {
            if !line.sweet.has_stock(line.quantity) {
                return Err(CoreError::InsufficientStock {
                    name: line.sweet.name.clone(),
                    available: line.sweet.quantity,
                    requested: line.quantity,
                });
            }
        }

        let decrements = lines
            .iter()
            .map(|line| StockDecrement {
                sweet_id: line.sweet.id.clone(),
                name: line.sweet.name.clone(),
                quantity: line.quantity,
            })
            .collect();

        Ok(CheckoutPlan {
            decrements,
            item_count: lines.iter().map(|l| l.quantity).sum(),
            total: cart_total(lines)?,
        })
    }
}

/// Sum of all line totals.
pub fn cart_total(lines: &[CartLine]) -> CoreResult<Money> {
    lines.iter().try_fold(Money::zero(), |total, line| {
        total
            .checked_add(line.line_total()?)
            .ok_or(CoreError::TotalTooLarge)
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
