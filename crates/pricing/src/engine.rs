//! Stay totals and service attachment.

use serde::{Deserialize, Serialize};

use staysync_catalog::{Room, ServiceDefinition};
use staysync_core::SelectionId;

use crate::calendar::DateRange;
use crate::rules::DayRuleTable;
use crate::selection::{ServiceSelection, ServiceUpdate};

/// Itemized result of pricing a stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub nights: u32,
    pub extra_guests: u32,
    /// `(room.price + extra_guests × extra_person_rate) × nights`.
    pub room_charge: u64,
    /// Sum of the selections' derived prices.
    pub service_charge: u64,
    pub total: u64,
}

/// Price a stay.
///
/// `guest_count` is trusted as-is (it was clamped when the room or head count
/// changed). `extra_person_rate` is the per-reservation rate, which may differ
/// from `room.extra_person_price`.
pub fn quote(
    room: &Room,
    window: DateRange,
    guest_count: u32,
    selections: &[ServiceSelection],
    extra_person_rate: u64,
) -> Quote {
    let nights = window.nights();
    let extra_guests = room.extra_guests(guest_count);
    let nightly = room
        .price
        .saturating_add(u64::from(extra_guests).saturating_mul(extra_person_rate));
    let room_charge = nightly.saturating_mul(u64::from(nights));
    let service_charge = selections
        .iter()
        .fold(0u64, |acc, s| acc.saturating_add(s.price()));

    Quote {
        nights,
        extra_guests,
        room_charge,
        service_charge,
        total: room_charge.saturating_add(service_charge),
    }
}

/// Grand total for a stay; see [`quote`] for the breakdown.
pub fn compute_total(
    room: &Room,
    window: DateRange,
    guest_count: u32,
    selections: &[ServiceSelection],
    extra_person_rate: u64,
) -> u64 {
    quote(room, window, guest_count, selections, extra_person_rate).total
}

/// Create a selection for `definition` over the stay window.
///
/// Quantity defaults to the guest count and the unit rate to the definition's
/// default price. The caller appends the result to its own list.
pub fn attach_service(
    definition: &ServiceDefinition,
    window: DateRange,
    guest_count: u32,
    rules: &DayRuleTable,
) -> ServiceSelection {
    ServiceSelection::new(
        SelectionId::new(),
        definition.id.clone(),
        definition.service_type,
        definition.name.clone(),
        window,
        definition.default_price,
        guest_count,
        rules,
    )
}

/// Return `selection` with `updates` applied.
///
/// A date change re-derives `days` from the rules and discards any manual
/// override; otherwise an explicit `days` is taken verbatim. Re-sending the
/// current dates is not a change.
pub fn update_service(
    selection: &ServiceSelection,
    updates: &ServiceUpdate,
    rules: &DayRuleTable,
) -> ServiceSelection {
    let mut next = selection.clone();

    if let Some(base_price) = updates.base_price {
        next.set_base_price(base_price);
    }
    if let Some(quantity) = updates.quantity {
        next.set_quantity(quantity);
    }

    let current = selection.window();
    let window = DateRange::new(
        updates.start_date.unwrap_or(current.start),
        updates.end_date.unwrap_or(current.end),
    );
    let dates_changed = window != current;

    if dates_changed {
        next.set_window(window, rules);
    } else if let Some(days) = updates.days {
        next.override_days(days);
    }

    tracing::trace!(
        selection_id = %next.id_typed(),
        days = next.days(),
        price = next.price(),
        "service selection updated"
    );
    next
}
