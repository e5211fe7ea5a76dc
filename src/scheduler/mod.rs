//! Auto clock-out: closes shifts left open past a store's day cutover.

use chrono::{DateTime, NaiveDate, Utc};
use strum::{Display, EnumString};

pub mod closer;
pub mod finder;
pub mod job;
pub mod resolver;

/// What the job should do for one store on this invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CutoverDecision {
    pub cutover_instant: DateTime<Utc>,
    pub target_business_date: NaiveDate,
}

/// How a store is judged to be due for closing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CutoverMode {
    /// Act only while the local hour equals the store's cutoff hour.
    ExactHour,
    /// Act on any run after the latest cutover whose day has not been closed yet.
    #[default]
    CatchUp,
}
