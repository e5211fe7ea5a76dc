use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// A time card closed by the auto clock-out job.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClosureResult {
    #[schema(example = "tc-0001")]
    pub time_card_id: String,
    #[schema(example = "staff-0001")]
    pub user_id: String,
    #[schema(example = "store-0001")]
    pub store_id: String,
    #[schema(example = "2024-06-09", value_type = String, format = "date")]
    pub work_date: NaiveDate,
    #[schema(example = "2024-06-09T20:00:00Z", value_type = String, format = "date-time")]
    pub clock_out_time: DateTime<Utc>,
    #[schema(value_type = Option<String>, format = "date-time", nullable = true)]
    pub scheduled_end_time: Option<DateTime<Utc>>,
}

/// A record or store the job could not finish. `time_card_id` is absent when
/// the whole store failed before any record was touched.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClosureFailure {
    pub success: bool,
    pub store_id: String,
    #[schema(nullable = true)]
    pub time_card_id: Option<String>,
    #[schema(nullable = true)]
    pub user_id: Option<String>,
    #[schema(value_type = Option<String>, format = "date", nullable = true)]
    pub work_date: Option<NaiveDate>,
    pub error: String,
}

impl ClosureFailure {
    pub fn record(
        store_id: &str,
        time_card_id: &str,
        user_id: &str,
        work_date: NaiveDate,
        error: impl ToString,
    ) -> Self {
        Self {
            success: false,
            store_id: store_id.to_string(),
            time_card_id: Some(time_card_id.to_string()),
            user_id: Some(user_id.to_string()),
            work_date: Some(work_date),
            error: error.to_string(),
        }
    }

    pub fn store(store_id: &str, work_date: Option<NaiveDate>, error: impl ToString) -> Self {
        Self {
            success: false,
            store_id: store_id.to_string(),
            time_card_id: None,
            user_id: None,
            work_date,
            error: error.to_string(),
        }
    }
}

/// Everything one invocation did, across all stores.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobReport {
    pub processed: usize,
    /// Records that were already closed by the time the update ran.
    pub skipped: usize,
    pub results: Vec<ClosureResult>,
    pub failures: Vec<ClosureFailure>,
}
