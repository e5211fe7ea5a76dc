use tracing::{debug, error};

use super::CutoverDecision;
use crate::model::closure::{ClosureFailure, ClosureResult};
use crate::model::store::StoreCutoverConfig;
use crate::model::time_card::{ClockoutUpdate, TimeCard};
use crate::repository::AttendanceRepository;
use crate::utils::time_rounding::round_time;

/// Per-store tally of closed, failed and already-closed records.
#[derive(Debug, Default, PartialEq)]
pub struct StoreOutcome {
    pub results: Vec<ClosureResult>,
    pub failures: Vec<ClosureFailure>,
    pub skipped: usize,
}

impl StoreOutcome {
    pub fn merge(&mut self, other: StoreOutcome) {
        self.results.extend(other.results);
        self.failures.extend(other.failures);
        self.skipped += other.skipped;
    }
}

/// The update applied to every open card of a store at `decision`.
///
/// `clock_out` is always the literal cutover instant; rounding only ever
/// lands in `scheduled_end_time`.
pub fn clockout_update(decision: &CutoverDecision, config: &StoreCutoverConfig) -> ClockoutUpdate {
    ClockoutUpdate {
        clock_out: decision.cutover_instant,
        scheduled_end_time: config
            .rounding()
            .map(|(method, minutes)| round_time(decision.cutover_instant, method, minutes)),
    }
}

/// Close each card independently; one failed update never stops the rest.
pub async fn close_all(
    attendance: &dyn AttendanceRepository,
    records: Vec<TimeCard>,
    decision: &CutoverDecision,
    config: &StoreCutoverConfig,
) -> StoreOutcome {
    let update = clockout_update(decision, config);
    let mut outcome = StoreOutcome::default();

    for card in records {
        match attendance.close(&card.id, &update).await {
            Ok(true) => outcome.results.push(ClosureResult {
                time_card_id: card.id,
                user_id: card.staff_id,
                store_id: config.store_id.clone(),
                work_date: decision.target_business_date,
                clock_out_time: update.clock_out,
                scheduled_end_time: update.scheduled_end_time,
            }),
            Ok(false) => {
                debug!(time_card_id = %card.id, "Time card already closed");
                outcome.skipped += 1;
            }
            Err(e) => {
                error!(
                    error = %e,
                    time_card_id = %card.id,
                    store_id = %config.store_id,
                    "Auto clock-out update failed"
                );
                outcome.failures.push(ClosureFailure::record(
                    &config.store_id,
                    &card.id,
                    &card.staff_id,
                    decision.target_business_date,
                    e,
                ));
            }
        }
    }

    outcome
}
