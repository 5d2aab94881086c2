//! Choice persistence boundary
//!
//! Narrow interface over the persisted set: read the user's rows in rank
//! order, or wholesale-replace them. The SQLite implementation delegates to
//! the shared queries; tests substitute their own implementation.

use async_trait::async_trait;
use sqlx::SqlitePool;
use uniplan_common::db::{self, ChoiceEntry};
use uniplan_common::Result;

/// Persistence boundary for a user's choice set
#[async_trait]
pub trait ChoiceStore: Send + Sync {
    /// Read all rows for the user, ascending by `choice_order`
    async fn get(&self, user_id: &str) -> Result<Vec<ChoiceEntry>>;

    /// Replace the user's entire set (delete-all, then insert-all)
    ///
    /// No partial-failure reporting: the replace either fully succeeds or
    /// leaves the previous set in place.
    async fn replace(&self, user_id: &str, entries: &[ChoiceEntry]) -> Result<()>;
}

/// SQLite-backed choice store
#[derive(Clone)]
pub struct SqliteChoiceStore {
    pool: SqlitePool,
}

impl SqliteChoiceStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChoiceStore for SqliteChoiceStore {
    async fn get(&self, user_id: &str) -> Result<Vec<ChoiceEntry>> {
        db::get_choices(&self.pool, user_id).await
    }

    async fn replace(&self, user_id: &str, entries: &[ChoiceEntry]) -> Result<()> {
        db::replace_choices(&self.pool, user_id, entries).await
    }
}
