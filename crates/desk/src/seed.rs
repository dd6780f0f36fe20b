//! Initial bookings for demos and a fresh install.

use chrono::NaiveDate;

use staysync_audit::AuditSink;
use staysync_catalog::{Catalog, InMemoryCatalog, seed_catalog};
use staysync_core::{DomainError, ReservationId, RoomId};
use staysync_pricing::DayRuleTable;
use staysync_reservations::ReservationStatus;

use crate::desk::FrontDesk;
use crate::error::DeskResult;

struct SeedBooking {
    room: &'static str,
    guest: &'static str,
    guests: u32,
    start: (i32, u32, u32),
    end: (i32, u32, u32),
    status: ReservationStatus,
}

const BOOKINGS: [SeedBooking; 3] = [
    SeedBooking {
        room: "101",
        guest: "김민수",
        guests: 2,
        start: (2024, 5, 20),
        end: (2024, 5, 23),
        status: ReservationStatus::Confirmed,
    },
    SeedBooking {
        room: "201",
        guest: "이서연",
        guests: 2,
        start: (2024, 5, 21),
        end: (2024, 5, 22),
        status: ReservationStatus::CheckedIn,
    },
    SeedBooking {
        room: "202",
        guest: "박준호",
        guests: 5,
        start: (2024, 5, 24),
        end: (2024, 5, 26),
        status: ReservationStatus::Pending,
    },
];

fn ymd((y, m, d): (i32, u32, u32)) -> DeskResult<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
        .ok_or_else(|| DomainError::validation(format!("invalid seed date {y}-{m}-{d}")).into())
}

/// Commit the built-in bookings. Amounts come from the pricing engine.
pub fn seed_bookings<C, S>(desk: &mut FrontDesk<C, S>) -> DeskResult<Vec<ReservationId>>
where
    C: Catalog,
    S: AuditSink,
{
    let mut ids = Vec::with_capacity(BOOKINGS.len());
    for seed in &BOOKINGS {
        let room = RoomId::new(seed.room)?;
        let mut r = desk.new_booking(&room, ymd(seed.start)?)?;
        r.set_dates(ymd(seed.start)?, ymd(seed.end)?);
        r.set_guest_count(seed.guests);
        r.set_guest_name(seed.guest);
        if seed.status != ReservationStatus::Pending {
            r.override_status(seed.status);
        }
        ids.push(desk.save_reservation(r)?.id);
    }
    Ok(ids)
}

/// Seed catalog plus the initial bookings.
pub fn seeded_desk<S: AuditSink>(
    sink: S,
    rules: DayRuleTable,
) -> DeskResult<FrontDesk<InMemoryCatalog, S>> {
    let mut desk = FrontDesk::new(seed_catalog()?, sink, rules);
    seed_bookings(&mut desk)?;
    Ok(desk)
}

#[cfg(test)]
mod tests {
    use super::*;
    use staysync_audit::InMemoryAuditLog;

    #[test]
    fn seeded_amounts_are_recomputed() {
        let desk = seeded_desk(InMemoryAuditLog::new(), DayRuleTable::default()).unwrap();
        let amounts: Vec<u64> = desk.reservations().iter().map(|r| r.amount()).collect();
        assert_eq!(amounts, vec![240_000, 120_000, 350_000]);

        let statuses: Vec<ReservationStatus> =
            desk.reservations().iter().map(|r| r.status()).collect();
        assert_eq!(
            statuses,
            vec![
                ReservationStatus::Confirmed,
                ReservationStatus::CheckedIn,
                ReservationStatus::Pending,
            ]
        );
        assert!(desk.reservations().iter().all(|r| r.invoice_id().is_some()));
        assert_eq!(desk.sink().len(), 9);
    }
}
