//! Front-desk commit service.
//!
//! The desk owns the committed reservation set and the catalog. Booking
//! forms check a reservation out with [`FrontDesk::new_booking`],
//! [`FrontDesk::quick_book`] or [`FrontDesk::edit`], mutate the owned copy
//! through the aggregate's API, and commit it back with
//! [`FrontDesk::save_reservation`].
//!
//! ## Commit order
//!
//! 1. apply the change to the in-memory set
//! 2. mirror it to the audit sink, one record at a time
//!
//! A sink failure is logged at `warn` and the remaining records are still
//! offered; the commit itself has already happened and is not rolled back.

use chrono::NaiveDate;

use staysync_audit::{AuditSink, ChangeRecord};
use staysync_catalog::{Catalog, InMemoryCatalog, Room, ServiceDefinition};
use staysync_core::{DomainError, InvoiceId, ReservationId, RoomId, SelectionId, ServiceId};
use staysync_pricing::{DateRange, DayRuleTable};
use staysync_reservations::{
    CellStatus, OccupancyPeriod, Reservation, ReservationSummary, RoomOccupancy, StatusCounts,
    cell_status, is_occupied, occupancy_by_room, overlapping, status_counts,
};

use crate::error::{DeskError, DeskResult};
use crate::mirror;
use crate::snapshot::DeskSnapshot;

#[derive(Debug)]
pub struct FrontDesk<C, S> {
    catalog: C,
    sink: S,
    rules: DayRuleTable,
    reservations: Vec<Reservation>,
}

impl<C, S> FrontDesk<C, S> {
    pub fn new(catalog: C, sink: S, rules: DayRuleTable) -> Self {
        Self {
            catalog,
            sink,
            rules,
            reservations: Vec::new(),
        }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn rules(&self) -> &DayRuleTable {
        &self.rules
    }

    /// Committed reservations in commit order.
    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    pub fn reservation(&self, id: ReservationId) -> Option<&Reservation> {
        self.reservations.iter().find(|r| r.id_typed() == id)
    }

    // ---- presentation queries ----

    pub fn overlapping(&self, range: DateRange, rooms: Option<&[RoomId]>) -> Vec<&Reservation> {
        overlapping(&self.reservations, range, rooms)
    }

    pub fn is_occupied(&self, room: &RoomId, day: NaiveDate) -> bool {
        is_occupied(&self.reservations, room, day)
    }

    pub fn cell_status(&self, room: &RoomId, day: NaiveDate) -> CellStatus {
        cell_status(&self.reservations, room, day)
    }

    pub fn status_counts(&self, period: OccupancyPeriod) -> StatusCounts {
        status_counts(&self.reservations, period)
    }
}

impl<C, S> FrontDesk<C, S>
where
    C: Catalog,
    S: AuditSink,
{
    fn room_snapshot(&self, room_id: &RoomId) -> DeskResult<Room> {
        self.catalog
            .room(room_id)
            .cloned()
            .ok_or_else(|| DeskError::not_found("room", room_id))
    }

    /// A fresh one-night draft in `room_id` from `check_in`.
    pub fn new_booking(&self, room_id: &RoomId, check_in: NaiveDate) -> DeskResult<Reservation> {
        let room = self.room_snapshot(room_id)?;
        Ok(Reservation::draft(room, check_in, self.rules.clone()))
    }

    /// Draft from a free timeline cell.
    pub fn quick_book(&self, room_id: &RoomId, day: NaiveDate) -> DeskResult<Reservation> {
        if self.is_occupied(room_id, day) {
            return Err(DeskError::Occupied {
                room: room_id.clone(),
                day,
            });
        }
        self.new_booking(room_id, day)
    }

    /// Owned copy of a committed reservation for an edit session.
    pub fn edit(&self, id: ReservationId) -> DeskResult<Reservation> {
        self.reservation(id)
            .cloned()
            .ok_or_else(|| DeskError::not_found("reservation", id))
    }

    /// Point the reservation at another catalog room. Unknown ids are a no-op.
    pub fn set_room_by_id(&self, reservation: &mut Reservation, room_id: &RoomId) -> bool {
        match self.catalog.room(room_id) {
            Some(room) => {
                reservation.set_room(room.clone());
                true
            }
            None => {
                tracing::debug!(room_id = %room_id, "unknown room; reservation left unchanged");
                false
            }
        }
    }

    /// Attach a catalog service. Unknown ids are a no-op.
    pub fn add_service_by_id(
        &self,
        reservation: &mut Reservation,
        service_id: &ServiceId,
    ) -> Option<SelectionId> {
        let Some(definition) = self.catalog.service_definition(service_id) else {
            tracing::debug!(service_id = %service_id, "unknown service; reservation left unchanged");
            return None;
        };
        Some(reservation.add_service(definition))
    }

    /// Commit an edit session.
    ///
    /// A reservation without an invoice is new: an invoice id is minted and it
    /// is appended to the set. Otherwise it replaces the committed copy with
    /// the same id, which must still exist.
    pub fn save_reservation(&mut self, mut reservation: Reservation) -> DeskResult<ReservationSummary> {
        let id = reservation.id_typed();
        let is_new = reservation.is_new();

        if is_new {
            if self.reservation(id).is_some() {
                return Err(DeskError::Conflict(format!("reservation {id} already committed")));
            }
            reservation.assign_invoice(InvoiceId::new());
        } else if self.reservation(id).is_none() {
            return Err(DeskError::not_found("reservation", id));
        }

        let records = mirror::reservation_saved(&reservation, is_new);
        let summary = reservation.summary();

        if is_new {
            self.reservations.push(reservation);
        } else if let Some(slot) = self.reservations.iter_mut().find(|r| r.id_typed() == id) {
            *slot = reservation;
        }

        tracing::info!(
            reservation_id = %id,
            is_new,
            status = %summary.status,
            amount = summary.amount,
            services = summary.services.len(),
            "reservation saved"
        );
        self.emit(records);
        Ok(summary)
    }

    pub fn delete_reservation(&mut self, id: ReservationId) -> DeskResult<Reservation> {
        let idx = self
            .reservations
            .iter()
            .position(|r| r.id_typed() == id)
            .ok_or_else(|| DeskError::not_found("reservation", id))?;
        let removed = self.reservations.remove(idx);

        tracing::info!(reservation_id = %id, "reservation deleted");
        self.emit(mirror::reservation_deleted(&removed));
        Ok(removed)
    }

    /// Apply the next forward status step and commit.
    ///
    /// For an unsaved draft this is the initial create.
    pub fn advance(&mut self, mut reservation: Reservation) -> DeskResult<ReservationSummary> {
        let target = reservation.advance()?;
        tracing::debug!(reservation_id = %reservation.id_typed(), to = %target, "advancing reservation");
        self.save_reservation(reservation)
    }

    /// Cancel a committed reservation.
    pub fn cancel_reservation(&mut self, id: ReservationId) -> DeskResult<ReservationSummary> {
        let mut reservation = self.edit(id)?;
        reservation.cancel()?;
        self.save_reservation(reservation)
    }

    pub fn occupancy(&self, period: OccupancyPeriod) -> Vec<RoomOccupancy> {
        occupancy_by_room(self.catalog.rooms(), &self.reservations, period)
    }

    pub fn snapshot(&self) -> DeskSnapshot {
        DeskSnapshot {
            rooms: self.catalog.rooms().to_vec(),
            services: self.catalog.service_definitions().to_vec(),
            reservations: self.reservations.iter().map(Reservation::summary).collect(),
        }
    }

    fn emit(&self, records: Vec<ChangeRecord>) {
        for record in records {
            let table = record.table;
            if let Err(err) = self.sink.record(record) {
                tracing::warn!(table = %table, error = %err, "audit sink rejected change record");
            }
        }
    }
}

/// Catalog administration, available when the desk owns an editable catalog.
impl<S> FrontDesk<InMemoryCatalog, S>
where
    S: AuditSink,
{
    pub fn add_room(&mut self, room: Room) -> DeskResult<()> {
        let record = mirror::room_inserted(&room);
        self.catalog.add_room(room)?;
        self.emit(vec![record]);
        Ok(())
    }

    /// Replace a catalog room. Existing reservations keep their snapshot.
    pub fn update_room(&mut self, room: Room) -> DeskResult<()> {
        let record = mirror::room_updated(&room);
        let id = room.id.clone();
        self.catalog.update_room(room).map_err(|err| match err {
            DomainError::NotFound => DeskError::not_found("room", id),
            other => other.into(),
        })?;
        self.emit(vec![record]);
        Ok(())
    }

    pub fn delete_room(&mut self, id: &RoomId) -> DeskResult<Room> {
        let room = self
            .catalog
            .delete_room(id)
            .map_err(|_| DeskError::not_found("room", id))?;
        self.emit(vec![mirror::room_deleted(id)]);
        Ok(room)
    }

    pub fn replace_services(&mut self, services: Vec<ServiceDefinition>) -> DeskResult<()> {
        let records = mirror::services_replaced(&services);
        let count = services.len();
        self.catalog.replace_services(services)?;
        tracing::info!(count, "service catalog replaced");
        self.emit(records);
        Ok(())
    }
}
