use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::MySqlPool;

use super::{
    AttendanceRepository, RepoResult, StaffRepository, StoreConfigRepository, WatermarkRepository,
};
use crate::model::store::{StoreCutoverConfig, StoreRow};
use crate::model::time_card::{ClockoutUpdate, TimeCard};

/// MySQL-backed implementation of every scheduler repository.
#[derive(Clone)]
pub struct MySqlRepository {
    pool: MySqlPool,
}

impl MySqlRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StoreConfigRepository for MySqlRepository {
    async fn list_auto_clockout_stores(&self) -> RepoResult<Vec<StoreCutoverConfig>> {
        let rows = sqlx::query_as::<_, StoreRow>(
            r#"
            SELECT id, day_switch_time, auto_clockout_enabled,
                   time_rounding_enabled, time_rounding_method, time_rounding_minutes
            FROM stores
            WHERE auto_clockout_enabled = TRUE
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(StoreCutoverConfig::from).collect())
    }
}

#[async_trait]
impl StaffRepository for MySqlRepository {
    async fn list_staff_ids(&self, store_id: &str) -> RepoResult<Vec<String>> {
        let ids = sqlx::query_scalar::<_, String>(
            r#"
            SELECT id
            FROM staff_profiles
            WHERE store_id = ?
            "#,
        )
        .bind(store_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }
}

#[async_trait]
impl AttendanceRepository for MySqlRepository {
    async fn query_open(&self, work_date: NaiveDate) -> RepoResult<Vec<TimeCard>> {
        let cards = sqlx::query_as::<_, TimeCard>(
            r#"
            SELECT id, staff_id, work_date, clock_in, clock_out,
                   scheduled_end_time, forgot_clockout
            FROM time_cards
            WHERE work_date = ?
            AND clock_out IS NULL
            "#,
        )
        .bind(work_date)
        .fetch_all(&self.pool)
        .await?;

        Ok(cards)
    }

    async fn close(&self, time_card_id: &str, update: &ClockoutUpdate) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE time_cards
            SET clock_out = ?, scheduled_end_time = ?, forgot_clockout = TRUE
            WHERE id = ?
            AND clock_out IS NULL
            "#,
        )
        .bind(update.clock_out)
        .bind(update.scheduled_end_time)
        .bind(time_card_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl WatermarkRepository for MySqlRepository {
    async fn last_processed(&self, store_id: &str) -> RepoResult<Option<NaiveDate>> {
        let date = sqlx::query_scalar::<_, NaiveDate>(
            r#"
            SELECT last_processed_date
            FROM auto_clockout_watermarks
            WHERE store_id = ?
            "#,
        )
        .bind(store_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(date)
    }

    async fn mark_processed(&self, store_id: &str, work_date: NaiveDate) -> RepoResult<()> {
        // Never move a watermark backwards.
        sqlx::query(
            r#"
            INSERT INTO auto_clockout_watermarks (store_id, last_processed_date)
            VALUES (?, ?)
            ON DUPLICATE KEY UPDATE
                last_processed_date = GREATEST(last_processed_date, VALUES(last_processed_date))
            "#,
        )
        .bind(store_id)
        .bind(work_date)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
