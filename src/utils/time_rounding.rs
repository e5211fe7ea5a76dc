use std::num::NonZeroU32;

use chrono::{DateTime, Utc};
use strum::{Display, EnumString};

/// How a clock-out instant is snapped onto the store's rounding grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RoundingMethod {
    Floor,
    Ceil,
    #[default]
    Round,
}

impl RoundingMethod {
    /// Unknown or missing values fall back to `Round`.
    pub fn from_config(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.trim().parse().ok()).unwrap_or_default()
    }
}

/// Snap `ts` to a multiple of `minutes`, measured from the Unix epoch.
///
/// `Round` sends exact half-way points up.
pub fn round_time(ts: DateTime<Utc>, method: RoundingMethod, minutes: NonZeroU32) -> DateTime<Utc> {
    let bucket = i64::from(minutes.get()) * 60_000;
    let millis = ts.timestamp_millis();
    let floor = millis.div_euclid(bucket) * bucket;
    let remainder = millis - floor;

    let rounded = match method {
        RoundingMethod::Floor => floor,
        RoundingMethod::Ceil if remainder == 0 => floor,
        RoundingMethod::Ceil => floor + bucket,
        RoundingMethod::Round if remainder * 2 >= bucket => floor + bucket,
        RoundingMethod::Round => floor,
    };

    DateTime::from_timestamp_millis(rounded).unwrap_or(ts)
}
