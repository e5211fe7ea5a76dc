pub mod business_calendar;
pub mod clock;
pub mod time_rounding;
