//! Translation of committed changes into audit records.
//!
//! Record order per commit is fixed; downstream replayers depend on it.

use staysync_audit::{AuditTable, ChangeKey, ChangeRecord};
use staysync_catalog::{Room, ServiceDefinition};
use staysync_core::{InvoiceId, ReservationId, RoomId};
use staysync_pricing::ServiceSelection;
use staysync_reservations::Reservation;

/// Invoice status written when an invoice row is first created.
pub const DRAFT_INVOICE_STATUS: &str = "DRAFT";

/// Key of the room snapshot row owned by a reservation.
pub fn inv_room_id(id: ReservationId) -> String {
    format!("IR-{id}")
}

fn invoice_key(invoice_id: InvoiceId) -> ChangeKey {
    ChangeKey::new("InvoiceId", invoice_id.to_string())
}

/// Records for a reservation commit.
///
/// New: InvRoom, Reservation and Invoice inserts, then one item per selection.
/// Existing: the three updates, a delete of the invoice's items, then the
/// items again.
pub fn reservation_saved(r: &Reservation, is_new: bool) -> Vec<ChangeRecord> {
    let id = r.id_typed();
    let amount = r.amount();
    let invoice = r.invoice_id().map(|i| i.to_string());
    let mut records = Vec::with_capacity(4 + r.selections().len());

    if is_new {
        records.push(
            ChangeRecord::insert(AuditTable::InvRoom)
                .with("InvRoomId", inv_room_id(id))
                .with("roomId", r.room_id().as_str())
                .with("name", r.room().name.as_str())
                .with("basePrice", r.room().price)
                .with("capacity", r.room().capacity),
        );
        records.push(
            ChangeRecord::insert(AuditTable::Reservation)
                .with("ReservId", id.to_string())
                .with("roomId", r.room_id().as_str())
                .with("guestName", r.guest_name())
                .with("guestCount", r.guest_count())
                .with("startDate", r.start_date().to_string())
                .with("endDate", r.end_date().to_string())
                .with("status", r.status().as_str())
                .with("amount", amount)
                .with("InvoiceId", invoice.clone()),
        );
        records.push(
            ChangeRecord::insert(AuditTable::Invoice)
                .with("InvoiceId", invoice.clone())
                .with("ReservId", id.to_string())
                .with("InvRoomId", inv_room_id(id))
                .with("totalAmount", amount)
                .with("status", DRAFT_INVOICE_STATUS),
        );
    } else {
        records.push(
            ChangeRecord::update(AuditTable::InvRoom, ChangeKey::new("InvRoomId", inv_room_id(id)))
                .with("roomId", r.room_id().as_str())
                .with("name", r.room().name.as_str())
                .with("basePrice", r.room().price),
        );
        records.push(
            ChangeRecord::update(AuditTable::Reservation, ChangeKey::new("ReservId", id.to_string()))
                .with("roomId", r.room_id().as_str())
                .with("guestName", r.guest_name())
                .with("guestCount", r.guest_count())
                .with("startDate", r.start_date().to_string())
                .with("endDate", r.end_date().to_string())
                .with("status", r.status().as_str())
                .with("amount", amount),
        );
        records.push(
            ChangeRecord::update(AuditTable::Invoice, ChangeKey::new("InvoiceId", invoice.clone()))
                .with("totalAmount", amount),
        );
        records.push(ChangeRecord::delete(
            AuditTable::InvoiceItem,
            ChangeKey::new("InvoiceId", invoice.clone()),
        ));
    }

    records.extend(
        r.selections()
            .iter()
            .map(|s| invoice_item(s, invoice.as_deref())),
    );
    records
}

fn invoice_item(s: &ServiceSelection, invoice_id: Option<&str>) -> ChangeRecord {
    ChangeRecord::insert(AuditTable::InvoiceItem)
        .with("id", s.id_typed().to_string())
        .with("InvoiceId", invoice_id)
        .with("MasterItemId", s.service_id().as_str())
        .with("name", s.name())
        .with("price", s.price())
        .with("quantity", s.quantity())
        .with("startDate", s.start_date().to_string())
        .with("endDate", s.end_date().to_string())
        .with("days", s.days())
}

/// Reservation and InvRoom deletes, then the invoice's items and the invoice.
pub fn reservation_deleted(r: &Reservation) -> Vec<ChangeRecord> {
    let id = r.id_typed();
    let mut records = vec![
        ChangeRecord::delete(AuditTable::Reservation, ChangeKey::new("ReservId", id.to_string())),
        ChangeRecord::delete(AuditTable::InvRoom, ChangeKey::new("InvRoomId", inv_room_id(id))),
    ];
    if let Some(invoice_id) = r.invoice_id() {
        records.push(ChangeRecord::delete(AuditTable::InvoiceItem, invoice_key(invoice_id)));
        records.push(ChangeRecord::delete(AuditTable::Invoice, invoice_key(invoice_id)));
    }
    records
}

fn room_columns(record: ChangeRecord, room: &Room) -> ChangeRecord {
    record
        .with("name", room.name.as_str())
        .with("type", room.category.as_str())
        .with("capacity", room.capacity)
        .with("baseCapacity", room.base_capacity)
        .with("extraPersonPrice", room.extra_person_price)
        .with("price", room.price)
        .with("hasBathroom", room.has_bathroom)
        .with("description", room.description.clone())
        .with("building", room.building.clone())
        .with("roomNumber", room.room_number.clone())
}

pub fn room_inserted(room: &Room) -> ChangeRecord {
    room_columns(
        ChangeRecord::insert(AuditTable::Rooms).with("id", room.id.as_str()),
        room,
    )
}

pub fn room_updated(room: &Room) -> ChangeRecord {
    room_columns(
        ChangeRecord::update(AuditTable::Rooms, ChangeKey::new("id", room.id.as_str())),
        room,
    )
}

pub fn room_deleted(id: &RoomId) -> ChangeRecord {
    ChangeRecord::delete(AuditTable::Rooms, ChangeKey::new("id", id.as_str()))
}

/// The service catalog is rewritten as a whole.
pub fn services_replaced(services: &[ServiceDefinition]) -> Vec<ChangeRecord> {
    std::iter::once(ChangeRecord::delete_all(AuditTable::MasterItem))
        .chain(services.iter().map(|s| {
            ChangeRecord::insert(AuditTable::MasterItem)
                .with("id", s.id.as_str())
                .with("name", s.name.as_str())
                .with("defaultPrice", s.default_price)
                .with("type", s.service_type.as_str())
        }))
        .collect()
}
