pub mod closure;
pub mod store;
pub mod time_card;
