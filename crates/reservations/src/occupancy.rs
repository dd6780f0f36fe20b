//! Calendar queries over a set of reservations.

use chrono::NaiveDate;
use serde::Serialize;

use staysync_core::{ReservationId, RoomId};
use staysync_pricing::DateRange;

use crate::reservation::Reservation;

/// Reservations whose stay overlaps `range`, optionally limited to `rooms`.
///
/// Cancelled reservations are included; callers filter on status when they
/// only want live bookings.
pub fn overlapping<'a>(
    reservations: &'a [Reservation],
    range: DateRange,
    rooms: Option<&[RoomId]>,
) -> Vec<&'a Reservation> {
    reservations
        .iter()
        .filter(|r| r.window().overlaps(&range))
        .filter(|r| rooms.is_none_or(|ids| ids.contains(r.room_id())))
        .collect()
}

/// True when a non-cancelled reservation holds `room` on the night of `day`.
pub fn is_occupied(reservations: &[Reservation], room: &RoomId, day: NaiveDate) -> bool {
    live_in_room(reservations, room).any(|r| r.window().contains(day))
}

/// What the timeline shows in one room/day cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellStatus {
    /// Reservations staying the night of the day.
    pub occupying: Vec<ReservationId>,
    pub checking_in: Option<ReservationId>,
    pub checking_out: Option<ReservationId>,
}

impl CellStatus {
    pub fn is_occupied(&self) -> bool {
        !self.occupying.is_empty()
    }

    /// A cell is free for quick-book when no one stays that night.
    pub fn is_free(&self) -> bool {
        !self.is_occupied()
    }
}

pub fn cell_status(reservations: &[Reservation], room: &RoomId, day: NaiveDate) -> CellStatus {
    let mut cell = CellStatus::default();
    for r in live_in_room(reservations, room) {
        let window = r.window();
        if window.contains(day) {
            cell.occupying.push(r.id_typed());
        }
        if window.start == day && cell.checking_in.is_none() {
            cell.checking_in = Some(r.id_typed());
        }
        if window.end == day && cell.checking_out.is_none() {
            cell.checking_out = Some(r.id_typed());
        }
    }
    cell
}

fn live_in_room<'a>(
    reservations: &'a [Reservation],
    room: &'a RoomId,
) -> impl Iterator<Item = &'a Reservation> {
    reservations
        .iter()
        .filter(move |r| r.room_id() == room && r.status().holds_room())
}
