//! Service selections: one ancillary service attached to a stay.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use staysync_catalog::ServiceType;
use staysync_core::{Entity, SelectionId, ServiceId};

use crate::calendar::DateRange;
use crate::rules::DayRuleTable;

/// Where the current `days` value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DaysSource {
    /// Derived from the rule table for the selection's dates.
    Rule,
    /// Typed in by an operator; holds until the billing window changes again.
    Manual,
}

/// A booked service with its own billing window.
///
/// `price` is not stored: it is always `base_price × days × quantity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSelection {
    id: SelectionId,
    service_id: ServiceId,
    service_type: ServiceType,
    name: String,
    window: DateRange,
    base_price: u64,
    quantity: u32,
    days: u32,
    days_source: DaysSource,
}

impl ServiceSelection {
    /// Build a selection whose `days` follow the rule table.
    ///
    /// An inverted window is collapsed to an empty one and `quantity` is floored at 1.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: SelectionId,
        service_id: ServiceId,
        service_type: ServiceType,
        name: impl Into<String>,
        window: DateRange,
        base_price: u64,
        quantity: u32,
        rules: &DayRuleTable,
    ) -> Self {
        let window = normalize(window);
        Self {
            id,
            service_id,
            service_type,
            name: name.into(),
            window,
            base_price,
            quantity: quantity.max(1),
            days: rules.day_count(service_type, window.start, window.end),
            days_source: DaysSource::Rule,
        }
    }

    pub fn id_typed(&self) -> SelectionId {
        self.id
    }

    pub fn service_id(&self) -> &ServiceId {
        &self.service_id
    }

    pub fn service_type(&self) -> ServiceType {
        self.service_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn window(&self) -> DateRange {
        self.window
    }

    pub fn start_date(&self) -> NaiveDate {
        self.window.start
    }

    pub fn end_date(&self) -> NaiveDate {
        self.window.end
    }

    pub fn base_price(&self) -> u64 {
        self.base_price
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    pub fn days_source(&self) -> DaysSource {
        self.days_source
    }

    /// `base_price × days × quantity`, saturating.
    pub fn price(&self) -> u64 {
        self.base_price
            .saturating_mul(u64::from(self.days))
            .saturating_mul(u64::from(self.quantity))
    }

    /// Move the billing window and re-derive `days` from the rules.
    pub(crate) fn set_window(&mut self, window: DateRange, rules: &DayRuleTable) {
        self.window = normalize(window);
        self.days = rules.day_count(self.service_type, self.window.start, self.window.end);
        self.days_source = DaysSource::Rule;
    }

    pub(crate) fn set_base_price(&mut self, base_price: u64) {
        self.base_price = base_price;
    }

    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity.max(1);
    }

    pub(crate) fn override_days(&mut self, days: u32) {
        self.days = days;
        self.days_source = DaysSource::Manual;
    }
}

impl Entity for ServiceSelection {
    type Id = SelectionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

fn normalize(window: DateRange) -> DateRange {
    if window.end < window.start {
        DateRange::new(window.start, window.start)
    } else {
        window
    }
}

/// Field edits for a selection. Unset fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceUpdate {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub base_price: Option<u64>,
    pub quantity: Option<u32>,
    pub days: Option<u32>,
}

impl ServiceUpdate {
    pub fn dates(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start_date: Some(start),
            end_date: Some(end),
            ..Self::default()
        }
    }

    pub fn base_price(base_price: u64) -> Self {
        Self {
            base_price: Some(base_price),
            ..Self::default()
        }
    }

    pub fn quantity(quantity: u32) -> Self {
        Self {
            quantity: Some(quantity),
            ..Self::default()
        }
    }

    pub fn days(days: u32) -> Self {
        Self {
            days: Some(days),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
