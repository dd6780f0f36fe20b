//! Read-only export of the desk state.

use serde::{Deserialize, Serialize};

use staysync_catalog::{Room, ServiceDefinition};
use staysync_reservations::ReservationSummary;

/// Everything a reporting or assistant layer needs, with amounts already
/// derived. Nothing here feeds back into the desk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeskSnapshot {
    pub rooms: Vec<Room>,
    pub services: Vec<ServiceDefinition>,
    pub reservations: Vec<ReservationSummary>,
}

impl DeskSnapshot {
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Sum of all non-cancelled reservation amounts.
    pub fn booked_revenue(&self) -> u64 {
        self.reservations
            .iter()
            .filter(|r| r.status.holds_room())
            .fold(0u64, |acc, r| acc.saturating_add(r.amount))
    }
}
