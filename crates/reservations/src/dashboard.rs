//! Dashboard statistics: status counts and per-room occupancy.

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

use staysync_catalog::Room;
use staysync_core::{DomainError, DomainResult, RoomId};
use staysync_pricing::DateRange;

use crate::reservation::Reservation;
use crate::status::ReservationStatus;

/// Reporting period for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OccupancyPeriod {
    /// A calendar month, `[first day, first day of next month)`.
    Month(DateRange),
    AllTime,
}

impl OccupancyPeriod {
    pub fn month(year: i32, month: u32) -> DomainResult<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| DomainError::validation(format!("invalid month {year}-{month:02}")))?;
        let next = first
            .checked_add_months(Months::new(1))
            .ok_or_else(|| DomainError::validation("month out of range"))?;
        Ok(OccupancyPeriod::Month(DateRange::new(first, next)))
    }

    /// The month containing `day`.
    pub fn month_of(day: NaiveDate) -> DomainResult<Self> {
        Self::month(day.year(), day.month())
    }

    /// Whether a reservation counts toward this period's status tallies:
    /// its check-in or check-out falls in the month.
    fn touches(&self, r: &Reservation) -> bool {
        match self {
            OccupancyPeriod::AllTime => true,
            OccupancyPeriod::Month(range) => {
                let (year, month) = (range.start.year(), range.start.month());
                let in_month = |d: NaiveDate| d.year() == year && d.month() == month;
                in_month(r.start_date()) || in_month(r.end_date())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub total: u32,
    pub pending: u32,
    pub confirmed: u32,
    pub checked_in: u32,
    pub checked_out: u32,
    pub cancelled: u32,
}

pub fn status_counts(reservations: &[Reservation], period: OccupancyPeriod) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for r in reservations.iter().filter(|r| period.touches(r)) {
        counts.total += 1;
        match r.status() {
            ReservationStatus::Pending => counts.pending += 1,
            ReservationStatus::Confirmed => counts.confirmed += 1,
            ReservationStatus::CheckedIn => counts.checked_in += 1,
            ReservationStatus::CheckedOut => counts.checked_out += 1,
            ReservationStatus::Cancelled => counts.cancelled += 1,
        }
    }
    counts
}

/// Occupancy of one room for a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomOccupancy {
    pub room_id: RoomId,
    pub room_name: String,
    pub occupied_nights: u32,
    /// Rounded percentage of the month's nights, capped at 100. `None` for
    /// all-time reports, which only have a night total.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_percent: Option<u32>,
}

/// Per-room occupancy in catalog order; cancelled reservations are ignored.
pub fn occupancy_by_room(
    rooms: &[Room],
    reservations: &[Reservation],
    period: OccupancyPeriod,
) -> Vec<RoomOccupancy> {
    rooms
        .iter()
        .map(|room| {
            let booked = reservations
                .iter()
                .filter(|r| r.room_id() == &room.id && r.status().holds_room());
            let occupied_nights: u32 = match period {
                OccupancyPeriod::Month(range) => booked
                    .map(|r| r.window().overlap_nights(&range))
                    .fold(0u32, u32::saturating_add),
                OccupancyPeriod::AllTime => booked
                    .map(|r| r.window().nights())
                    .fold(0u32, u32::saturating_add),
            };
            let rate_percent = match period {
                OccupancyPeriod::Month(range) => Some(percent(occupied_nights, range.nights())),
                OccupancyPeriod::AllTime => None,
            };
            RoomOccupancy {
                room_id: room.id.clone(),
                room_name: room.name.clone(),
                occupied_nights,
                rate_percent,
            }
        })
        .collect()
}

fn percent(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    let rounded = (u64::from(part) * 100 + u64::from(whole) / 2) / u64::from(whole);
    u32::try_from(rounded.min(100)).unwrap_or(100)
}
