use std::sync::Arc;

use actix_web::middleware::{Logger, NormalizePath};
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use dotenvy::dotenv;

mod api;
mod auth;
mod config;
mod db;
mod docs;
mod error;
mod model;
mod repository;
mod routes;
mod scheduler;
mod utils;

use config::Config;
use db::init_db;

use crate::auth::cron_guard::CronSecret;
use crate::docs::ApiDoc;
use crate::repository::mysql::MySqlRepository;
use crate::scheduler::job::AutoClockoutJob;
use crate::utils::business_calendar::BusinessCalendar;
use crate::utils::clock::{Clock, SystemClock};
use tracing::info;
use tracing_appender::rolling;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "cutover.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(config.log_level)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .init();

    info!(
        timezone = %config.business_timezone,
        mode = %config.cutover_mode,
        "Server starting..."
    );

    let pool = init_db(&config.database_url).await?;
    let repository = Arc::new(MySqlRepository::new(pool));

    let job = Data::new(AutoClockoutJob::new(
        repository.clone(),
        repository.clone(),
        repository.clone(),
        repository,
        BusinessCalendar::new(config.business_timezone),
        config.cutover_mode,
    ));
    let clock: Data<dyn Clock> = Data::from(Arc::new(SystemClock) as Arc<dyn Clock>);
    let cron_secret = Data::new(CronSecret::new(config.cron_secret.clone()));
    let limiter = routes::build_limiter(config.rate_cron_per_min)?;
    let api_prefix = config.api_prefix.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // wildcard matches JS/CSS assets
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(job.clone())
            .app_data(clock.clone())
            .app_data(cron_secret.clone())
            .configure(|cfg| routes::configure(cfg, &api_prefix, &limiter))
    })
    .bind(&config.server_addr)?
    .run()
    .await?;

    Ok(())
}
