//! # Cart Repository
//!
//! Persists each user's cart in `cart_items`.
//!
//! ## Load / Modify / Save
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  get_cart(user) ──► Cart { items } ──► cart.add_item(..) ──► save_cart │
//! │                                         (sweetify-core)                 │
//! │                                                                         │
//! │  save_cart rewrites the user's lines in one transaction, keeping the   │
//! │  order of `items` in the `position` column.                            │
//! │                                                                         │
//! │  get_lines(user) ──► [CartLine { sweet, quantity }]   (JOIN sweets)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use sweetify_core::{Cart, CartItem, CartLine, Sweet};

/// Repository for per-user carts.
#[derive(Debug, Clone)]
pub struct CartRepository {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct CartItemRow {
    sweet_id: String,
    quantity: i64,
}

#[derive(sqlx::FromRow)]
struct CartLineRow {
    #[sqlx(flatten)]
    sweet: Sweet,
    cart_quantity: i64,
}

impl CartRepository {
    /// Creates a new CartRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CartRepository { pool }
    }

    /// Loads the raw cart lines of a user, in insertion order.
    pub async fn get_cart(&self, user_id: &str) -> DbResult<Cart> {
        let rows = sqlx::query_as::<_, CartItemRow>(
            "SELECT sweet_id, quantity FROM cart_items WHERE user_id = ? ORDER BY position",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Cart::from_items(
            rows.into_iter()
                .map(|row| CartItem {
                    sweet_id: row.sweet_id,
                    quantity: row.quantity,
                })
                .collect(),
        ))
    }

    /// Replaces the user's stored cart with `cart`.
    pub async fn save_cart(&self, user_id: &str, cart: &Cart) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM cart_items WHERE user_id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        for (position, item) in cart.items.iter().enumerate() {
            sqlx::query(
                "INSERT INTO cart_items (user_id, sweet_id, quantity, position) VALUES (?, ?, ?, ?)",
            )
            .bind(user_id)
            .bind(&item.sweet_id)
            .bind(item.quantity)
            .bind(position as i64)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        debug!(user_id = %user_id, lines = cart.len(), "Saved cart");
        Ok(())
    }

    /// Loads the cart joined with full sweet records.
    pub async fn get_lines(&self, user_id: &str) -> DbResult<Vec<CartLine>> {
        let rows = sqlx::query_as::<_, CartLineRow>(
            "SELECT s.id, s.name, s.category, s.price_cents, s.quantity, s.image_url, \
                    s.created_at, s.updated_at, ci.quantity AS cart_quantity \
             FROM cart_items ci \
             INNER JOIN sweets s ON s.id = ci.sweet_id \
             WHERE ci.user_id = ? \
             ORDER BY ci.position",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| CartLine {
                sweet: row.sweet,
                quantity: row.cart_quantity,
            })
            .collect())
    }

    /// Removes every line from the user's cart.
    pub async fn clear(&self, user_id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM cart_items WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        debug!(user_id = %user_id, removed = result.rows_affected(), "Cleared cart");
        Ok(())
    }
}
