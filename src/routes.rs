use crate::{api::cron, auth::cron_guard::cron_guard, error::ConfigError};
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};

pub type CronLimiter = GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>;

pub fn build_limiter(requests_per_min: u32) -> Result<CronLimiter, ConfigError> {
    let per_ms = if requests_per_min == 0 {
        1
    } else {
        60_000 / requests_per_min as u64
    };
    GovernorConfigBuilder::default()
        .per_millisecond(per_ms.max(1))
        .burst_size(requests_per_min.max(1))
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .ok_or_else(|| ConfigError::RateLimiter(format!("{requests_per_min} requests/min")))
}

pub fn configure(cfg: &mut web::ServiceConfig, api_prefix: &str, limiter: &CronLimiter) {
    cfg.service(
        web::scope(api_prefix).service(
            web::scope("/cron")
                .wrap(from_fn(cron_guard)) // shared secret
                .wrap(Governor::new(limiter)) // rate limiting
                // /cron/auto-clockout
                .service(
                    web::resource("/auto-clockout").route(web::get().to(cron::auto_clockout)),
                ),
        ),
    );
}
