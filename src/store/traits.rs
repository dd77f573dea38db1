//! `CounterStore` trait — async interface over the counter table.

use async_trait::async_trait;

use crate::error::DatabaseError;

/// One row of the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterEntry {
    pub display_name: String,
    pub count: i64,
}

/// Backend-agnostic store for per-user rejection counts.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Run all pending schema migrations.
    async fn run_migrations(&self) -> Result<(), DatabaseError>;

    /// Bump the user's counter by one and refresh their display name.
    /// Creates the row on first sight. Returns the new total.
    async fn increment(&self, user_id: &str, display_name: &str) -> Result<i64, DatabaseError>;

    /// Current count for a user, or `None` if they have no row yet.
    async fn get_count(&self, user_id: &str) -> Result<Option<i64>, DatabaseError>;

    /// Leaderboard: users with at least one hit, highest count first.
    async fn top(&self, limit: usize) -> Result<Vec<CounterEntry>, DatabaseError>;
}
