//! # Sweet Repository
//!
//! Database operations for the catalog.
//!
//! ## Key Operations
//! - CRUD with partial updates
//! - Filtered search (name, category, price range)
//! - Guarded stock changes
//!
//! ## Guarded Stock Updates
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Two customers buy the last lollipop at the same time                  │
//! │                                                                         │
//! │  A: UPDATE ... quantity - 1 WHERE id = ? AND quantity > 0  → 1 row     │
//! │  B: UPDATE ... quantity - 1 WHERE id = ? AND quantity > 0  → 0 rows    │
//! │                                                                         │
//! │  SQLite serializes the writes; the guard is re-evaluated for B,        │
//! │  so B gets None and the handler answers "Sweet is out of stock".       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use sweetify_core::{NewSweet, Sweet, SweetChanges, SweetSearch, MAX_STOCK_QUANTITY};

/// Column list shared by every query that returns a [`Sweet`].
macro_rules! sweet_columns {
    () => {
        "id, name, category, price_cents, quantity, image_url, created_at, updated_at"
    };
}

/// Repository for catalog operations.
#[derive(Debug, Clone)]
pub struct SweetRepository {
    pool: SqlitePool,
}

impl SweetRepository {
    /// Creates a new SweetRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SweetRepository { pool }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Lists every sweet in insertion order.
    pub async fn list(&self) -> DbResult<Vec<Sweet>> {
        let sweets = sqlx::query_as::<_, Sweet>(concat!(
            "SELECT ",
            sweet_columns!(),
            " FROM sweets ORDER BY rowid"
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = sweets.len(), "Listed sweets");
        Ok(sweets)
    }

    /// Gets a sweet by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Sweet))` - Sweet found
    /// * `Ok(None)` - Sweet not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Sweet>> {
        let sweet = sqlx::query_as::<_, Sweet>(concat!(
            "SELECT ",
            sweet_columns!(),
            " FROM sweets WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sweet)
    }

    /// Searches the catalog.
    ///
    /// ## Filters
    /// - `name`: case-insensitive substring, folded with Rust's Unicode
    ///   `to_lowercase` after the SQL filters run (SQLite's `lower()` only
    ///   folds ASCII, so "CRÈME" would miss "Crème")
    /// - `category`: exact match
    /// - `min_price_cents` / `max_price_cents`: inclusive
    ///
    /// Absent filters impose no constraint. Results keep insertion order.
    pub async fn search(&self, filters: &SweetSearch) -> DbResult<Vec<Sweet>> {
        let mut qb: QueryBuilder<Sqlite> =
            QueryBuilder::new(concat!("SELECT ", sweet_columns!(), " FROM sweets WHERE 1 = 1"));

        if let Some(category) = filters
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
        {
            qb.push(" AND category = ").push_bind(category.to_string());
        }

        if let Some(min) = filters.min_price_cents {
            qb.push(" AND price_cents >= ").push_bind(min);
        }

        if let Some(max) = filters.max_price_cents {
            qb.push(" AND price_cents <= ").push_bind(max);
        }

        qb.push(" ORDER BY rowid");

        let mut sweets = qb.build_query_as::<Sweet>().fetch_all(&self.pool).await?;

        if let Some(needle) = filters
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_lowercase)
        {
            sweets.retain(|s| s.name.to_lowercase().contains(&needle));
        }

        debug!(?filters, count = sweets.len(), "Search returned sweets");
        Ok(sweets)
    }

    /// Counts all sweets.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sweets")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Inserts a new sweet and returns the stored record.
    ///
    /// The caller validates the fields first (see
    /// `sweetify_core::validation::validate_new_sweet`).
    pub async fn insert(&self, new: &NewSweet) -> DbResult<Sweet> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        debug!(id = %id, name = %new.name, "Inserting sweet");

        let sweet = sqlx::query_as::<_, Sweet>(concat!(
            "INSERT INTO sweets (id, name, category, price_cents, quantity, image_url, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?) RETURNING ",
            sweet_columns!()
        ))
        .bind(&id)
        .bind(new.name.trim())
        .bind(new.category.trim())
        .bind(new.price_cents)
        .bind(new.quantity)
        .bind(new.image_url.as_deref())
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(sweet)
    }

    /// Applies a partial update. Only provided fields change.
    ///
    /// Returns `Ok(None)` when the id does not exist.
    pub async fn update(&self, id: &str, changes: &SweetChanges) -> DbResult<Option<Sweet>> {
        debug!(id = %id, ?changes, "Updating sweet");

        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE sweets SET updated_at = ");
        qb.push_bind(Utc::now());

        if let Some(name) = &changes.name {
            qb.push(", name = ").push_bind(name.trim().to_string());
        }
        if let Some(category) = &changes.category {
            qb.push(", category = ").push_bind(category.trim().to_string());
        }
        if let Some(price) = changes.price_cents {
            qb.push(", price_cents = ").push_bind(price);
        }
        if let Some(quantity) = changes.quantity {
            qb.push(", quantity = ").push_bind(quantity);
        }
        if let Some(url) = &changes.image_url {
            qb.push(", image_url = ").push_bind(url.clone());
        }

        qb.push(" WHERE id = ").push_bind(id.to_string());
        qb.push(concat!(" RETURNING ", sweet_columns!()));

        let sweet = qb
            .build_query_as::<Sweet>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(sweet)
    }

    /// Deletes a sweet. Cart lines referencing it cascade away.
    ///
    /// Returns `false` when nothing was deleted.
    pub async fn delete(&self, id: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM sweets WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        debug!(id = %id, deleted = result.rows_affected(), "Deleted sweet");
        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    // Stock
    // =========================================================================

    /// Takes one unit from stock if any is left.
    ///
    /// Returns `Ok(None)` when the id is unknown *or* the sweet is sold out;
    /// callers look the sweet up again to tell the two apart.
    pub async fn purchase_one(&self, id: &str) -> DbResult<Option<Sweet>> {
        let sweet = sqlx::query_as::<_, Sweet>(concat!(
            "UPDATE sweets SET quantity = quantity - 1, updated_at = ? \
             WHERE id = ? AND quantity > 0 RETURNING ",
            sweet_columns!()
        ))
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        debug!(id = %id, purchased = sweet.is_some(), "Single-unit purchase");
        Ok(sweet)
    }

    /// Adds `amount` units to stock, never past [`MAX_STOCK_QUANTITY`].
    ///
    /// `Ok(None)` when the id is unknown *or* the ceiling guard failed;
    /// callers look the sweet up again to tell the two apart.
    pub async fn restock(&self, id: &str, amount: i64) -> DbResult<Option<Sweet>> {
        let sweet = sqlx::query_as::<_, Sweet>(concat!(
            "UPDATE sweets SET quantity = quantity + ?, updated_at = ? \
             WHERE id = ? AND quantity <= ? RETURNING ",
            sweet_columns!()
        ))
        .bind(amount)
        .bind(Utc::now())
        .bind(id)
        .bind(MAX_STOCK_QUANTITY.saturating_sub(amount))
        .fetch_optional(&self.pool)
        .await?;

        debug!(id = %id, amount, restocked = sweet.is_some(), "Restock");
        Ok(sweet)
    }

    /// Takes `quantity` units only if at least that many are on hand.
    ///
    /// `Ok(None)` means the guard failed (or the sweet vanished).
    pub async fn decrement_stock(&self, id: &str, quantity: i64) -> DbResult<Option<Sweet>> {
        let sweet = sqlx::query_as::<_, Sweet>(concat!(
            "UPDATE sweets SET quantity = quantity - ?, updated_at = ? \
             WHERE id = ? AND quantity >= ? RETURNING ",
            sweet_columns!()
        ))
        .bind(quantity)
        .bind(Utc::now())
        .bind(id)
        .bind(quantity)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sweet)
    }
}

// =============================================================================
// Tests
// =============================================================================
