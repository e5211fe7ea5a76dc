//! In-memory repositories with failure injection, for scheduler tests.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::Mutex;

use super::{
    AttendanceRepository, RepoResult, StaffRepository, StoreConfigRepository, WatermarkRepository,
};
use crate::error::RepositoryError;
use crate::model::store::StoreCutoverConfig;
use crate::model::time_card::{ClockoutUpdate, TimeCard};

fn unavailable() -> RepositoryError {
    RepositoryError::Database(sqlx::Error::PoolTimedOut)
}

#[derive(Default)]
pub struct InMemoryStores {
    stores: Vec<StoreCutoverConfig>,
    fail: bool,
}

impl InMemoryStores {
    pub fn new(stores: Vec<StoreCutoverConfig>) -> Self {
        Self { stores, fail: false }
    }

    pub fn failing() -> Self {
        Self { stores: Vec::new(), fail: true }
    }
}

#[async_trait]
impl StoreConfigRepository for InMemoryStores {
    async fn list_auto_clockout_stores(&self) -> RepoResult<Vec<StoreCutoverConfig>> {
        if self.fail {
            return Err(unavailable());
        }
        Ok(self
            .stores
            .iter()
            .filter(|s| s.auto_clockout_enabled)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryStaff {
    rosters: HashMap<String, Vec<String>>,
    failing_stores: HashSet<String>,
}

impl InMemoryStaff {
    pub fn with_roster(mut self, store_id: &str, staff_ids: &[&str]) -> Self {
        self.rosters.insert(
            store_id.to_string(),
            staff_ids.iter().map(|s| s.to_string()).collect(),
        );
        self
    }

    pub fn failing_for(mut self, store_id: &str) -> Self {
        self.failing_stores.insert(store_id.to_string());
        self
    }
}

#[async_trait]
impl StaffRepository for InMemoryStaff {
    async fn list_staff_ids(&self, store_id: &str) -> RepoResult<Vec<String>> {
        if self.failing_stores.contains(store_id) {
            return Err(unavailable());
        }
        Ok(self.rosters.get(store_id).cloned().unwrap_or_default())
    }
}

#[derive(Default)]
pub struct InMemoryTimeCards {
    cards: Mutex<Vec<TimeCard>>,
    failing_ids: HashSet<String>,
    queries: Mutex<usize>,
}

impl InMemoryTimeCards {
    pub fn new(cards: Vec<TimeCard>) -> Self {
        Self {
            cards: Mutex::new(cards),
            ..Self::default()
        }
    }

    pub fn failing_on(mut self, time_card_id: &str) -> Self {
        self.failing_ids.insert(time_card_id.to_string());
        self
    }

    pub fn get(&self, time_card_id: &str) -> Option<TimeCard> {
        self.cards.lock().iter().find(|c| c.id == time_card_id).cloned()
    }

    pub fn query_count(&self) -> usize {
        *self.queries.lock()
    }

    /// Close a card behind the job's back, as a concurrent run would.
    pub fn close_externally(&self, time_card_id: &str, update: &ClockoutUpdate) {
        if let Some(card) = self.cards.lock().iter_mut().find(|c| c.id == time_card_id) {
            card.clock_out = Some(update.clock_out);
        }
    }
}

#[async_trait]
impl AttendanceRepository for InMemoryTimeCards {
    async fn query_open(&self, work_date: NaiveDate) -> RepoResult<Vec<TimeCard>> {
        *self.queries.lock() += 1;
        Ok(self
            .cards
            .lock()
            .iter()
            .filter(|c| c.work_date == work_date && c.is_open())
            .cloned()
            .collect())
    }

    async fn close(&self, time_card_id: &str, update: &ClockoutUpdate) -> RepoResult<bool> {
        if self.failing_ids.contains(time_card_id) {
            return Err(unavailable());
        }
        let mut cards = self.cards.lock();
        match cards.iter_mut().find(|c| c.id == time_card_id && c.is_open()) {
            Some(card) => {
                card.clock_out = Some(update.clock_out);
                card.scheduled_end_time = update.scheduled_end_time;
                card.forgot_clockout = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[derive(Default)]
pub struct InMemoryWatermarks {
    marks: Mutex<HashMap<String, NaiveDate>>,
}

impl InMemoryWatermarks {
    pub fn with_mark(self, store_id: &str, date: NaiveDate) -> Self {
        self.marks.lock().insert(store_id.to_string(), date);
        self
    }

    pub fn get(&self, store_id: &str) -> Option<NaiveDate> {
        self.marks.lock().get(store_id).copied()
    }
}

#[async_trait]
impl WatermarkRepository for InMemoryWatermarks {
    async fn last_processed(&self, store_id: &str) -> RepoResult<Option<NaiveDate>> {
        Ok(self.get(store_id))
    }

    async fn mark_processed(&self, store_id: &str, work_date: NaiveDate) -> RepoResult<()> {
        let mut marks = self.marks.lock();
        let entry = marks.entry(store_id.to_string()).or_insert(work_date);
        if *entry < work_date {
            *entry = work_date;
        }
        Ok(())
    }
}
