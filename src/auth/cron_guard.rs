use actix_web::middleware::Next;
use actix_web::{
    Error, HttpResponse,
    body::BoxBody,
    dev::{ServiceRequest, ServiceResponse},
    web::Data,
};
use serde_json::json;

/// Secret expected from the external scheduler.
pub struct CronSecret(String);

impl CronSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    fn matches(&self, presented: &str) -> bool {
        let expected = self.0.as_bytes();
        let presented = presented.as_bytes();
        expected.len() == presented.len()
            && expected
                .iter()
                .zip(presented)
                .fold(0u8, |acc, (a, b)| acc | (a ^ b))
                == 0
    }
}

/// Accepts `Authorization: Bearer <secret>` or `x-cron-secret: <secret>`.
pub async fn cron_guard(
    req: ServiceRequest,
    next: Next<BoxBody>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let rejection = {
        let secret = req
            .app_data::<Data<CronSecret>>()
            .ok_or_else(|| actix_web::error::ErrorInternalServerError("Cron secret missing"))?;

        let presented = req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .or_else(|| {
                req.headers()
                    .get("x-cron-secret")
                    .and_then(|h| h.to_str().ok())
            });

        match presented {
            None => Some("Missing cron secret"),
            Some(p) if !secret.matches(p.trim()) => Some("Invalid cron secret"),
            Some(_) => None,
        }
    };

    if let Some(message) = rejection {
        tracing::warn!(path = %req.path(), reason = message, "Rejected cron trigger");
        let resp = HttpResponse::Unauthorized().json(json!({"success": false, "error": message}));
        return Ok(req.into_response(resp.map_into_boxed_body()));
    }

    next.call(req).await
}
