//! Business-day arithmetic for venues whose trading day runs past midnight.
//!
//! All local date and hour derivations used by the scheduler go through
//! [`BusinessCalendar`]; nothing else re-derives timezone offsets.

use chrono::{DateTime, Duration, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;

pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Tokyo;
pub const DEFAULT_DAY_SWITCH_TIME: &str = "05:00:00";

// Longest offset jump in the tz database is a day (Samoa, 2011).
const MAX_GAP_MINUTES: i64 = 24 * 60;

/// Local time-of-day at which one business day hands over to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchTime {
    pub hour: u32,
    pub minute: u32,
}

impl SwitchTime {
    /// Accepts `HH`, `HH:MM` or `HH:MM:SS`. Seconds are ignored.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.trim().split(':');
        let hour = parts.next()?.parse::<u32>().ok().filter(|h| *h < 24)?;
        let minute = match parts.next() {
            None => 0,
            Some(m) => m.parse::<u32>().ok().filter(|m| *m < 60)?,
        };
        Some(Self { hour, minute })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessCalendar {
    tz: Tz,
}

impl Default for BusinessCalendar {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEZONE)
    }
}

impl BusinessCalendar {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn local_date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.tz).date_naive()
    }

    pub fn local_hour_of(&self, instant: DateTime<Utc>) -> u32 {
        instant.with_timezone(&self.tz).hour()
    }

    pub fn previous_business_date(&self, date: NaiveDate) -> NaiveDate {
        date.pred_opt().unwrap_or(NaiveDate::MIN)
    }

    pub fn next_business_date(&self, date: NaiveDate) -> Option<NaiveDate> {
        date.succ_opt()
    }

    /// The instant at which the local wall clock reads `date hour:minute:00`.
    ///
    /// Ambiguous times take the later mapping. A time inside a DST gap moves
    /// forward to the first local minute that exists.
    pub fn instant_at(&self, date: NaiveDate, hour: u32, minute: u32) -> Option<DateTime<Utc>> {
        let naive = date.and_hms_opt(hour, minute, 0)?;
        if let Some(dt) = naive.and_local_timezone(self.tz).latest() {
            return Some(dt.with_timezone(&Utc));
        }

        (1..=MAX_GAP_MINUTES).find_map(|step| {
            (naive + Duration::minutes(step))
                .and_local_timezone(self.tz)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc))
        })
    }
}
