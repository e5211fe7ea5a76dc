use crate::api::cron::{AutoClockoutResponse, CronErrorResponse};
use crate::model::closure::{ClosureFailure, ClosureResult};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Timecard Cutover API",
        version = "1.0.0",
        description = r#"
## Auto clock-out scheduler

Closes attendance records that staff forgot to clock out of, once each
store's business day has ended.

### How it runs
- An external scheduler calls the trigger endpoint, typically hourly.
- Every store with auto clock-out enabled is checked against its day
  switch time; due stores have yesterday's open shifts closed at the
  cutover instant and flagged `forgotClockout`.
- Optional rounding records a rounded end time in `scheduledEndTime`.

### Security
The trigger requires the shared cron secret as a Bearer token
(or in the `x-cron-secret` header).
"#,
    ),
    paths(
        crate::api::cron::auto_clockout
    ),
    components(
        schemas(
            AutoClockoutResponse,
            CronErrorResponse,
            ClosureResult,
            ClosureFailure
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Cron", description = "Scheduled job triggers"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "cron_secret",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}
