pub mod cron_guard;
