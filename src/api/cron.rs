use actix_web::{HttpResponse, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::model::closure::{ClosureFailure, ClosureResult, JobReport};
use crate::scheduler::job::AutoClockoutJob;
use crate::utils::clock::Clock;

#[derive(Serialize, ToSchema)]
pub struct AutoClockoutResponse {
    #[schema(example = true)]
    pub success: bool,
    #[schema(example = 2)]
    pub processed: usize,
    #[schema(example = 0)]
    pub skipped: usize,
    pub results: Vec<ClosureResult>,
    pub failures: Vec<ClosureFailure>,
}

impl From<JobReport> for AutoClockoutResponse {
    fn from(report: JobReport) -> Self {
        Self {
            success: true,
            processed: report.processed,
            skipped: report.skipped,
            results: report.results,
            failures: report.failures,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct CronErrorResponse {
    #[schema(example = false)]
    pub success: bool,
    #[schema(example = "failed to load auto clock-out stores: database error: pool timed out")]
    pub error: String,
}

/// Auto clock-out trigger
#[utoipa::path(
    get,
    path = "/api/cron/auto-clockout",
    responses(
        (status = 200, description = "Open shifts past cutover were closed", body = AutoClockoutResponse),
        (status = 401, description = "Missing or invalid cron secret", body = CronErrorResponse),
        (status = 429, description = "Too many requests"),
        (status = 500, description = "Store list could not be loaded", body = CronErrorResponse)
    ),
    security(
        ("cron_secret" = [])
    ),
    tag = "Cron"
)]
pub async fn auto_clockout(
    job: web::Data<AutoClockoutJob>,
    clock: web::Data<dyn Clock>,
) -> Result<HttpResponse, ApiError> {
    let report = job.run(clock.now()).await.map_err(|e| {
        tracing::error!(error = %e, "Auto clock-out run failed");
        e
    })?;

    Ok(HttpResponse::Ok().json(AutoClockoutResponse::from(report)))
}
