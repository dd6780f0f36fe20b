//! Day-counting rules for ancillary services.
//!
//! Each service type maps to one [`DayRule`]; the mapping lives in a
//! [`DayRuleTable`] so deployments can change how a kind bills without
//! touching the engine.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use staysync_catalog::ServiceType;
use staysync_core::DomainError;

use crate::calendar::{
    commute_day_count, night_count, saturday_count, weekday_count, weekend_day_count,
};

/// Strategy for turning a billing window into a number of billable days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayRule {
    /// One unit per night of the window.
    Nights,
    /// Exactly one unit, however long the window is.
    Flat,
    /// One unit per Monday–Friday in the window.
    Weekdays,
    /// One unit per Saturday/Sunday in the window.
    WeekendDays,
    /// One unit per Saturday in the window.
    Saturdays,
    /// One unit per weekday in the window, arrival day excluded.
    CommuteDays,
}

impl DayRule {
    pub fn count(self, start: NaiveDate, end: NaiveDate) -> u32 {
        match self {
            DayRule::Nights => night_count(start, end),
            DayRule::Flat => 1,
            DayRule::Weekdays => weekday_count(start, end),
            DayRule::WeekendDays => weekend_day_count(start, end),
            DayRule::Saturdays => saturday_count(start, end),
            DayRule::CommuteDays => commute_day_count(start, end),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DayRule::Nights => "nights",
            DayRule::Flat => "flat",
            DayRule::Weekdays => "weekdays",
            DayRule::WeekendDays => "weekend_days",
            DayRule::Saturdays => "saturdays",
            DayRule::CommuteDays => "commute_days",
        }
    }
}

impl FromStr for DayRule {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nights" => Ok(DayRule::Nights),
            "flat" => Ok(DayRule::Flat),
            "weekdays" => Ok(DayRule::Weekdays),
            "weekend_days" => Ok(DayRule::WeekendDays),
            "saturdays" => Ok(DayRule::Saturdays),
            "commute_days" => Ok(DayRule::CommuteDays),
            other => Err(DomainError::validation(format!("unknown day rule: {other}"))),
        }
    }
}

/// Mapping from service type to day rule, with a fallback for unmapped types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayRuleTable {
    rules: BTreeMap<ServiceType, DayRule>,
    fallback: DayRule,
}

impl Default for DayRuleTable {
    /// Pickups are flat, weekend meals bill per Saturday, commutes per working
    /// day after arrival; everything else bills per night.
    fn default() -> Self {
        Self::empty(DayRule::Nights)
            .with_rule(ServiceType::Pickup, DayRule::Flat)
            .with_rule(ServiceType::WeekendMeal, DayRule::Saturdays)
            .with_rule(ServiceType::Commute, DayRule::CommuteDays)
    }
}

impl DayRuleTable {
    /// A table where every type uses `fallback`.
    pub fn empty(fallback: DayRule) -> Self {
        Self {
            rules: BTreeMap::new(),
            fallback,
        }
    }

    pub fn with_rule(mut self, service_type: ServiceType, rule: DayRule) -> Self {
        self.rules.insert(service_type, rule);
        self
    }

    pub fn rule_for(&self, service_type: ServiceType) -> DayRule {
        self.rules
            .get(&service_type)
            .copied()
            .unwrap_or(self.fallback)
    }

    pub fn day_count(&self, service_type: ServiceType, start: NaiveDate, end: NaiveDate) -> u32 {
        self.rule_for(service_type).count(start, end)
    }
}

/// Applicable days for `service_type` under the default rule table.
pub fn applicable_day_count(service_type: ServiceType, start: NaiveDate, end: NaiveDate) -> u32 {
    DayRuleTable::default().day_count(service_type, start, end)
}
