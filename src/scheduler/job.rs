use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, info};

use super::closer::{StoreOutcome, close_all};
use super::finder::find_open_shifts;
use super::resolver::{resolve, resolve_catch_up};
use super::{CutoverDecision, CutoverMode};
use crate::error::JobError;
use crate::model::closure::{ClosureFailure, JobReport};
use crate::model::store::StoreCutoverConfig;
use crate::repository::{
    AttendanceRepository, StaffRepository, StoreConfigRepository, WatermarkRepository,
};
use crate::utils::business_calendar::BusinessCalendar;

/// One run of the auto clock-out job over every enabled store.
pub struct AutoClockoutJob {
    stores: Arc<dyn StoreConfigRepository>,
    staff: Arc<dyn StaffRepository>,
    attendance: Arc<dyn AttendanceRepository>,
    watermarks: Arc<dyn WatermarkRepository>,
    calendar: BusinessCalendar,
    mode: CutoverMode,
}

impl AutoClockoutJob {
    pub fn new(
        stores: Arc<dyn StoreConfigRepository>,
        staff: Arc<dyn StaffRepository>,
        attendance: Arc<dyn AttendanceRepository>,
        watermarks: Arc<dyn WatermarkRepository>,
        calendar: BusinessCalendar,
        mode: CutoverMode,
    ) -> Self {
        Self {
            stores,
            staff,
            attendance,
            watermarks,
            calendar,
            mode,
        }
    }

    /// Stores are handled one after another; a failing store only adds to
    /// `failures`. Only an unreadable store list fails the run.
    pub async fn run(&self, now: DateTime<Utc>) -> Result<JobReport, JobError> {
        let stores = self
            .stores
            .list_auto_clockout_stores()
            .await
            .map_err(JobError::LoadStores)?;

        info!(stores = stores.len(), now = %now, mode = %self.mode, "Auto clock-out run started");

        let mut report = JobReport::default();
        for store in stores.iter().filter(|s| s.auto_clockout_enabled) {
            if let Some(outcome) = self.run_store(store, now).await {
                report.results.extend(outcome.results);
                report.failures.extend(outcome.failures);
                report.skipped += outcome.skipped;
            }
        }
        report.processed = report.results.len();

        info!(
            processed = report.processed,
            skipped = report.skipped,
            failed = report.failures.len(),
            "Auto clock-out run finished"
        );
        Ok(report)
    }

    async fn run_store(&self, store: &StoreCutoverConfig, now: DateTime<Utc>) -> Option<StoreOutcome> {
        let decisions = match self.decide(store, now).await {
            Ok(decisions) if decisions.is_empty() => return None,
            Ok(decisions) => decisions,
            Err(failure) => return Some(failure_outcome(failure)),
        };
        let store_id = store.store_id.as_str();

        let mut outcome = StoreOutcome::default();
        // The watermark only moves across an unbroken run of clean days.
        let mut advancing = self.mode == CutoverMode::CatchUp;
        for decision in decisions {
            let day = self.close_business_day(store, &decision).await;
            let clean = day.failures.is_empty();
            outcome.merge(day);

            if !(advancing && clean) {
                advancing = false;
                continue;
            }
            if let Err(e) = self
                .watermarks
                .mark_processed(store_id, decision.target_business_date)
                .await
            {
                error!(error = %e, store_id, "Failed to record processed business date");
                outcome.failures.push(ClosureFailure::store(
                    store_id,
                    Some(decision.target_business_date),
                    e,
                ));
                advancing = false;
            }
        }

        Some(outcome)
    }

    async fn close_business_day(
        &self,
        store: &StoreCutoverConfig,
        decision: &CutoverDecision,
    ) -> StoreOutcome {
        let store_id = store.store_id.as_str();
        let open = match find_open_shifts(
            self.staff.as_ref(),
            self.attendance.as_ref(),
            store_id,
            decision.target_business_date,
        )
        .await
        {
            Ok(open) => open,
            Err(e) => {
                error!(error = %e, store_id, "Failed to load open shifts");
                return failure_outcome(ClosureFailure::store(
                    store_id,
                    Some(decision.target_business_date),
                    e,
                ));
            }
        };

        info!(
            store_id,
            work_date = %decision.target_business_date,
            open = open.len(),
            "Closing open shifts"
        );
        close_all(self.attendance.as_ref(), open, decision, store).await
    }

    async fn decide(
        &self,
        store: &StoreCutoverConfig,
        now: DateTime<Utc>,
    ) -> Result<Vec<CutoverDecision>, ClosureFailure> {
        match self.mode {
            CutoverMode::ExactHour => Ok(resolve(store, now, &self.calendar).into_iter().collect()),
            CutoverMode::CatchUp => {
                let last = self
                    .watermarks
                    .last_processed(&store.store_id)
                    .await
                    .map_err(|e| {
                        error!(error = %e, store_id = %store.store_id, "Failed to read watermark");
                        ClosureFailure::store(&store.store_id, None, e)
                    })?;
                Ok(resolve_catch_up(store, now, &self.calendar, last))
            }
        }
    }
}

fn failure_outcome(failure: ClosureFailure) -> StoreOutcome {
    StoreOutcome {
        failures: vec![failure],
        ..StoreOutcome::default()
    }
}
