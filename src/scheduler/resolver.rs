use chrono::{DateTime, NaiveDate, Utc};
use tracing::warn;

use super::CutoverDecision;
use crate::model::store::StoreCutoverConfig;
use crate::utils::business_calendar::{BusinessCalendar, SwitchTime};

fn switch_time(config: &StoreCutoverConfig) -> Option<SwitchTime> {
    let parsed = SwitchTime::parse(&config.day_switch_time);
    if parsed.is_none() {
        warn!(
            store_id = %config.store_id,
            day_switch_time = %config.day_switch_time,
            "Malformed day switch time, skipping store"
        );
    }
    parsed
}

/// Hour-gated resolution: a store is due only during its cutoff hour, and
/// then always for yesterday's business date.
pub fn resolve(
    config: &StoreCutoverConfig,
    now: DateTime<Utc>,
    calendar: &BusinessCalendar,
) -> Option<CutoverDecision> {
    let switch = switch_time(config)?;
    if calendar.local_hour_of(now) != switch.hour {
        return None;
    }

    let today = calendar.local_date_of(now);
    Some(CutoverDecision {
        cutover_instant: calendar.instant_at(today, switch.hour, switch.minute)?,
        target_business_date: calendar.previous_business_date(today),
    })
}

/// Watermark resolution: every business date after `last_processed` whose
/// cutover has passed, oldest first, each closed at its own cutover instant.
///
/// Without a watermark only the most recent passed cutover is returned.
pub fn resolve_catch_up(
    config: &StoreCutoverConfig,
    now: DateTime<Utc>,
    calendar: &BusinessCalendar,
    last_processed: Option<NaiveDate>,
) -> Vec<CutoverDecision> {
    let Some(switch) = switch_time(config) else {
        return Vec::new();
    };

    let today = calendar.local_date_of(now);
    let Some(todays_cutover) = calendar.instant_at(today, switch.hour, switch.minute) else {
        return Vec::new();
    };
    let cutover_date = if now >= todays_cutover {
        today
    } else {
        calendar.previous_business_date(today)
    };
    let latest_target = calendar.previous_business_date(cutover_date);

    let first_target = match last_processed {
        Some(done) if done >= latest_target => return Vec::new(),
        Some(done) => calendar.next_business_date(done).unwrap_or(latest_target),
        None => latest_target,
    };

    first_target
        .iter_days()
        .take_while(|target| *target <= latest_target)
        .filter_map(|target| {
            let cutover_date = calendar.next_business_date(target)?;
            Some(CutoverDecision {
                cutover_instant: calendar.instant_at(cutover_date, switch.hour, switch.minute)?,
                target_business_date: target,
            })
        })
        .collect()
}
