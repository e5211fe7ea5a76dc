use chrono::{DateTime, NaiveDate, Utc};

/// One attendance record. `clock_out == None` means the shift is still open.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct TimeCard {
    pub id: String,
    pub staff_id: String,
    pub work_date: NaiveDate,
    pub clock_in: DateTime<Utc>,
    pub clock_out: Option<DateTime<Utc>>,
    pub scheduled_end_time: Option<DateTime<Utc>>,
    pub forgot_clockout: bool,
}

impl TimeCard {
    pub fn is_open(&self) -> bool {
        self.clock_out.is_none()
    }
}

/// Fields written when a shift is force-closed. `forgot_clockout` is always set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockoutUpdate {
    pub clock_out: DateTime<Utc>,
    pub scheduled_end_time: Option<DateTime<Utc>>,
}
