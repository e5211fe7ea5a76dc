use std::num::NonZeroU32;

use crate::utils::business_calendar::DEFAULT_DAY_SWITCH_TIME;
use crate::utils::time_rounding::RoundingMethod;

pub const DEFAULT_ROUNDING_MINUTES: NonZeroU32 = NonZeroU32::new(15).unwrap();

/// A `stores` row as it comes out of the database, nullable columns and all.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StoreRow {
    pub id: String,
    pub day_switch_time: Option<String>,
    pub auto_clockout_enabled: bool,
    pub time_rounding_enabled: Option<bool>,
    pub time_rounding_method: Option<String>,
    pub time_rounding_minutes: Option<i32>,
}

/// Cutover and rounding settings for one store, with defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreCutoverConfig {
    pub store_id: String,
    /// Raw `HH:MM:SS`; validated when the store is resolved.
    pub day_switch_time: String,
    pub auto_clockout_enabled: bool,
    pub time_rounding_enabled: bool,
    pub time_rounding_method: RoundingMethod,
    pub time_rounding_minutes: NonZeroU32,
}

#[cfg(test)]
impl StoreCutoverConfig {
    pub fn new(store_id: impl Into<String>, day_switch_time: impl Into<String>) -> Self {
        Self {
            store_id: store_id.into(),
            day_switch_time: day_switch_time.into(),
            auto_clockout_enabled: true,
            time_rounding_enabled: false,
            time_rounding_method: RoundingMethod::default(),
            time_rounding_minutes: DEFAULT_ROUNDING_MINUTES,
        }
    }

    pub fn with_rounding(mut self, method: RoundingMethod, minutes: NonZeroU32) -> Self {
        self.time_rounding_enabled = true;
        self.time_rounding_method = method;
        self.time_rounding_minutes = minutes;
        self
    }
}

impl StoreCutoverConfig {
    /// The rounding rule to apply, if rounding is switched on.
    pub fn rounding(&self) -> Option<(RoundingMethod, NonZeroU32)> {
        self.time_rounding_enabled
            .then_some((self.time_rounding_method, self.time_rounding_minutes))
    }
}

impl From<StoreRow> for StoreCutoverConfig {
    fn from(row: StoreRow) -> Self {
        let time_rounding_minutes = match row.time_rounding_minutes {
            None => DEFAULT_ROUNDING_MINUTES,
            Some(m) => u32::try_from(m)
                .ok()
                .and_then(NonZeroU32::new)
                .unwrap_or_else(|| {
                    tracing::warn!(
                        store_id = %row.id,
                        minutes = m,
                        "Non-positive rounding granularity, using default"
                    );
                    DEFAULT_ROUNDING_MINUTES
                }),
        };

        Self {
            day_switch_time: row
                .day_switch_time
                .unwrap_or_else(|| DEFAULT_DAY_SWITCH_TIME.to_string()),
            auto_clockout_enabled: row.auto_clockout_enabled,
            time_rounding_enabled: row.time_rounding_enabled.unwrap_or(false),
            time_rounding_method: RoundingMethod::from_config(row.time_rounding_method.as_deref()),
            time_rounding_minutes,
            store_id: row.id,
        }
    }
}
