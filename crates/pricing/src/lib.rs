//! Reservation pricing engine.
//!
//! Pure, deterministic functions: calendar arithmetic, per-service day-counting
//! rules, service selections with derived prices, and the stay total. Nothing
//! in this crate performs IO or keeps state between calls.

pub mod calendar;
pub mod engine;
pub mod rules;
pub mod selection;

pub use calendar::{
    DateRange, commute_day_count, night_count, saturday_count, weekday_count, weekend_day_count,
};
pub use engine::{Quote, attach_service, compute_total, quote, update_service};
pub use rules::{DayRule, DayRuleTable, applicable_day_count};
pub use selection::{DaysSource, ServiceSelection, ServiceUpdate};
