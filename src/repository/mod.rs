//! Storage seams for the auto clock-out job.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::RepositoryError;
use crate::model::store::StoreCutoverConfig;
use crate::model::time_card::{ClockoutUpdate, TimeCard};

#[cfg(test)]
pub mod memory;
pub mod mysql;

pub type RepoResult<T> = Result<T, RepositoryError>;

#[async_trait]
pub trait StoreConfigRepository: Send + Sync {
    /// Stores with auto clock-out switched on.
    async fn list_auto_clockout_stores(&self) -> RepoResult<Vec<StoreCutoverConfig>>;
}

#[async_trait]
pub trait StaffRepository: Send + Sync {
    /// Staff profile ids belonging to `store_id`.
    async fn list_staff_ids(&self, store_id: &str) -> RepoResult<Vec<String>>;
}

#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// Open time cards for `work_date` across every store.
    async fn query_open(&self, work_date: NaiveDate) -> RepoResult<Vec<TimeCard>>;

    /// Close the card if it is still open. Returns `false` when nothing changed.
    async fn close(&self, time_card_id: &str, update: &ClockoutUpdate) -> RepoResult<bool>;
}

/// Remembers the last business date each store was closed out for.
#[async_trait]
pub trait WatermarkRepository: Send + Sync {
    async fn last_processed(&self, store_id: &str) -> RepoResult<Option<NaiveDate>>;

    async fn mark_processed(&self, store_id: &str, work_date: NaiveDate) -> RepoResult<()>;
}
