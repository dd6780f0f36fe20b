use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use staysync_catalog::{Room, ServiceDefinition};
use staysync_core::{
    AggregateRoot, DomainError, DomainResult, InvoiceId, ReservationId, RoomId, SelectionId,
    find_by_id, find_by_id_mut, position_of,
};
use staysync_pricing::{
    DateRange, DayRuleTable, Quote, ServiceSelection, ServiceUpdate, attach_service, quote,
};

use crate::status::{NextAction, ReservationStatus, next_action};

/// Guest contact details captured on the booking form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Aggregate root: Reservation.
///
/// Owns a room snapshot, the stay window and the attached service selections.
/// Every mutator clamps its input instead of failing, so the aggregate is
/// always priceable; the total is never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    id: ReservationId,
    room: Room,
    guest: Guest,
    guest_count: u32,
    window: DateRange,
    status: ReservationStatus,
    selections: Vec<ServiceSelection>,
    extra_person_rate: u64,
    invoice_id: Option<InvoiceId>,
    rules: DayRuleTable,
    version: u64,
}

impl Reservation {
    /// A one-night, single-guest draft in `room` starting on `check_in`.
    ///
    /// Drafts are `Pending` and have no invoice until the first save.
    pub fn draft(room: Room, check_in: NaiveDate, rules: DayRuleTable) -> Self {
        Self::draft_with_id(ReservationId::new(), room, check_in, rules)
    }

    pub fn draft_with_id(
        id: ReservationId,
        room: Room,
        check_in: NaiveDate,
        rules: DayRuleTable,
    ) -> Self {
        let extra_person_rate = room.extra_person_price;
        Self {
            id,
            room,
            guest: Guest::default(),
            guest_count: 1,
            window: stay_window(check_in, None),
            status: ReservationStatus::Pending,
            selections: Vec::new(),
            extra_person_rate,
            invoice_id: None,
            rules,
            version: 0,
        }
    }

    pub fn id_typed(&self) -> ReservationId {
        self.id
    }

    pub fn room(&self) -> &Room {
        &self.room
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room.id
    }

    pub fn guest(&self) -> &Guest {
        &self.guest
    }

    pub fn guest_name(&self) -> &str {
        &self.guest.name
    }

    pub fn guest_count(&self) -> u32 {
        self.guest_count
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

    pub fn status(&self) -> ReservationStatus {
        self.status
    }

    pub fn selections(&self) -> &[ServiceSelection] {
        &self.selections
    }

    pub fn selection(&self, id: SelectionId) -> Option<&ServiceSelection> {
        find_by_id(&self.selections, &id)
    }

    pub fn extra_person_rate(&self) -> u64 {
        self.extra_person_rate
    }

    pub fn invoice_id(&self) -> Option<InvoiceId> {
        self.invoice_id
    }

    pub fn rules(&self) -> &DayRuleTable {
        &self.rules
    }

    /// Never committed: no invoice has been minted for it yet.
    pub fn is_new(&self) -> bool {
        self.invoice_id.is_none()
    }

    /// Itemized price of the current state.
    pub fn quote(&self) -> Quote {
        quote(
            &self.room,
            self.window,
            self.guest_count,
            &self.selections,
            self.extra_person_rate,
        )
    }

    /// Grand total. Always recomputed from the current state.
    pub fn amount(&self) -> u64 {
        self.quote().total
    }

    /// The implicit "create" step is only offered to an untouched `Pending`
    /// draft; any other status walks the regular policy.
    pub fn next_action(&self) -> NextAction {
        if self.is_new() && self.status == ReservationStatus::Pending {
            next_action(None)
        } else {
            next_action(Some(self.status))
        }
    }

    // ---- stay edits ----

    /// Swap the room snapshot.
    ///
    /// The extra-person rate resets to the new room's catalog rate and the
    /// guest count is re-clamped to the new capacity.
    pub fn set_room(&mut self, room: Room) {
        self.extra_person_rate = room.extra_person_price;
        self.guest_count = room.clamp_guest_count(self.guest_count);
        self.room = room;
        self.bump();
    }

    pub fn set_guest_count(&mut self, guest_count: u32) {
        self.guest_count = self.room.clamp_guest_count(guest_count);
        self.bump();
    }

    pub fn set_extra_person_rate(&mut self, rate: u64) {
        self.extra_person_rate = rate;
        self.bump();
    }

    /// Replace the stay window. `end` is clamped to at least one night.
    pub fn set_dates(&mut self, start: NaiveDate, end: NaiveDate) {
        self.apply_window(stay_window(start, Some(end)));
    }

    /// Move check-in; check-out follows to the next day.
    pub fn set_check_in(&mut self, check_in: NaiveDate) {
        self.apply_window(stay_window(check_in, None));
    }

    /// Move check-out. A check-out on or before check-in pulls check-in back
    /// to the day before.
    pub fn set_check_out(&mut self, check_out: NaiveDate) {
        let window = if check_out > self.window.start {
            DateRange::new(self.window.start, check_out)
        } else {
            match check_out.checked_sub_days(Days::new(1)) {
                Some(start) => DateRange::new(start, check_out),
                None => stay_window(check_out, None),
            }
        };
        self.apply_window(window);
    }

    fn apply_window(&mut self, window: DateRange) {
        self.window = window;
        let cascade = ServiceUpdate::dates(window.start, window.end);
        for selection in &mut self.selections {
            *selection = staysync_pricing::update_service(selection, &cascade, &self.rules);
        }
        tracing::debug!(
            reservation_id = %self.id,
            start = %window.start,
            end = %window.end,
            selections = self.selections.len(),
            "stay window changed"
        );
        self.bump();
    }

    // ---- guest details ----

    pub fn set_guest_name(&mut self, name: impl Into<String>) {
        self.guest.name = name.into();
        self.bump();
    }

    pub fn set_guest_phone(&mut self, phone: Option<String>) {
        self.guest.phone = phone.filter(|p| !p.trim().is_empty());
        self.bump();
    }

    pub fn set_notes(&mut self, notes: Option<String>) {
        self.guest.notes = notes.filter(|n| !n.trim().is_empty());
        self.bump();
    }

    // ---- services ----

    /// Attach `definition` over the current stay window, one unit per guest.
    pub fn add_service(&mut self, definition: &ServiceDefinition) -> SelectionId {
        let selection = attach_service(definition, self.window, self.guest_count, &self.rules);
        let id = selection.id_typed();
        self.selections.push(selection);
        self.bump();
        id
    }

    /// Detach a selection. Unknown ids are a no-op.
    pub fn remove_service(&mut self, id: SelectionId) -> Option<ServiceSelection> {
        let idx = position_of(&self.selections, &id)?;
        let removed = self.selections.remove(idx);
        self.bump();
        Some(removed)
    }

    /// Edit one selection. Returns `false` for an unknown id.
    pub fn update_service(&mut self, id: SelectionId, updates: &ServiceUpdate) -> bool {
        let Some(selection) = find_by_id_mut(&mut self.selections, &id) else {
            return false;
        };
        *selection = staysync_pricing::update_service(selection, updates, &self.rules);
        self.bump();
        true
    }

    // ---- lifecycle ----

    /// Take the single forward step offered by [`Reservation::next_action`].
    ///
    /// For an unsaved draft the step is "create": the status stays `Pending`
    /// and the caller is expected to commit it.
    pub fn advance(&mut self) -> DomainResult<ReservationStatus> {
        match self.next_action() {
            NextAction::Advance { target, .. } => {
                self.status = target;
                self.bump();
                Ok(target)
            }
            NextAction::Terminal { status } => Err(DomainError::invariant(format!(
                "no further action available for a {} reservation",
                status.as_str()
            ))),
        }
    }

    pub fn cancel(&mut self) -> DomainResult<()> {
        self.status = self.status.cancel()?;
        self.bump();
        Ok(())
    }

    /// Administrative override; bypasses the forward-only policy.
    pub fn override_status(&mut self, status: ReservationStatus) {
        tracing::info!(
            reservation_id = %self.id,
            from = %self.status,
            to = %status,
            "reservation status overridden"
        );
        self.status = status;
        self.bump();
    }

    /// Record the invoice minted at first commit. A second call is ignored.
    pub fn assign_invoice(&mut self, invoice_id: InvoiceId) -> InvoiceId {
        if let Some(existing) = self.invoice_id {
            return existing;
        }
        self.invoice_id = Some(invoice_id);
        self.bump();
        invoice_id
    }

    /// Serializable view with the derived total filled in.
    pub fn summary(&self) -> ReservationSummary {
        let quote = self.quote();
        ReservationSummary {
            id: self.id,
            room_id: self.room.id.clone(),
            room_name: self.room.name.clone(),
            guest: self.guest.clone(),
            guest_count: self.guest_count,
            start_date: self.window.start,
            end_date: self.window.end,
            status: self.status,
            extra_person_rate: self.extra_person_rate,
            invoice_id: self.invoice_id,
            services: self.selections.clone(),
            room_charge: quote.room_charge,
            service_charge: quote.service_charge,
            amount: quote.total,
        }
    }

    fn bump(&mut self) {
        self.version = self.version.saturating_add(1);
    }
}

impl AggregateRoot for Reservation {
    type Id = ReservationId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Read-only reservation view handed to presentation layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationSummary {
    pub id: ReservationId,
    pub room_id: RoomId,
    pub room_name: String,
    pub guest: Guest,
    pub guest_count: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: ReservationStatus,
    pub extra_person_rate: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<InvoiceId>,
    pub services: Vec<ServiceSelection>,
    pub room_charge: u64,
    pub service_charge: u64,
    pub amount: u64,
}

/// `[start, end)` with `end` clamped to at least the day after `start`.
///
/// On the last representable day `start` moves back one day instead, so the
/// window always holds a night.
fn stay_window(start: NaiveDate, end: Option<NaiveDate>) -> DateRange {
    let (start, min_end) = match start.checked_add_days(Days::new(1)) {
        Some(next) => (start, next),
        None => (start.checked_sub_days(Days::new(1)).unwrap_or(start), start),
    };
    let end = end.map_or(min_end, |e| e.max(min_end));
    DateRange::new(start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use staysync_catalog::ServiceType;
    use staysync_pricing::{DaysSource, compute_total};

    use crate::status::StatusAction;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ocean_twin() -> Room {
        Room::new("101".parse().unwrap(), "Ocean Twin", "twin", 3, 2, 20_000, 80_000)
    }

    fn family_loft() -> Room {
        Room::new("202".parse().unwrap(), "Family Loft", "loft", 6, 4, 25_000, 150_000)
    }

    fn definition(id: &str, service_type: ServiceType, price: u64) -> ServiceDefinition {
        ServiceDefinition::new(id.parse().unwrap(), id, price, service_type)
    }

    fn booked(start: NaiveDate, end: NaiveDate, guests: u32) -> Reservation {
        let mut r = Reservation::draft(ocean_twin(), start, DayRuleTable::default());
        r.set_dates(start, end);
        r.set_guest_count(guests);
        r
    }

    fn assert_amount_consistent(r: &Reservation) {
        assert_eq!(
            r.amount(),
            compute_total(
                r.room(),
                r.window(),
                r.guest_count(),
                r.selections(),
                r.extra_person_rate()
            )
        );
    }

    #[test]
    fn draft_starts_as_one_night_pending_without_invoice() {
        let r = Reservation::draft(ocean_twin(), date(2024, 5, 20), DayRuleTable::default());
        assert_eq!(r.window().nights(), 1);
        assert_eq!(r.guest_count(), 1);
        assert_eq!(r.status(), ReservationStatus::Pending);
        assert!(r.is_new());
        assert_eq!(r.amount(), 80_000);
        assert_eq!(r.version(), 0);
    }

    #[test]
    fn scenario_three_guests_three_nights() {
        let r = booked(date(2024, 5, 20), date(2024, 5, 23), 3);
        assert_eq!(r.amount(), 300_000);
        assert_eq!(r.quote().extra_guests, 1);
    }

    #[test]
    fn scenario_weekend_meal_for_two() {
        let mut r = booked(date(2024, 5, 24), date(2024, 5, 27), 2);
        let id = r.add_service(&definition("s4", ServiceType::WeekendMeal, 10_000));
        let meal = r.selection(id).unwrap();
        assert_eq!(meal.price(), 20_000);
        assert_eq!(r.amount(), 260_000);
        assert_eq!(r.quote().service_charge, 20_000);
    }

    #[test]
    fn guest_count_is_clamped_to_room_capacity() {
        let mut r = booked(date(2024, 5, 20), date(2024, 5, 23), 1);
        r.set_guest_count(9);
        assert_eq!(r.guest_count(), 3);
        r.set_guest_count(0);
        assert_eq!(r.guest_count(), 1);
    }

    #[test]
    fn changing_room_reclamps_guests_and_resets_rate() {
        let mut r = Reservation::draft(family_loft(), date(2024, 5, 20), DayRuleTable::default());
        r.set_guest_count(6);
        r.set_extra_person_rate(1_000);
        r.set_room(ocean_twin());
        assert_eq!(r.guest_count(), 3);
        assert_eq!(r.extra_person_rate(), 20_000);
        assert_amount_consistent(&r);
    }

    #[test]
    fn set_dates_clamps_end_to_one_night() {
        let mut r = booked(date(2024, 5, 20), date(2024, 5, 23), 2);
        r.set_dates(date(2024, 5, 22), date(2024, 5, 21));
        assert_eq!(r.start_date(), date(2024, 5, 22));
        assert_eq!(r.end_date(), date(2024, 5, 23));
    }

    #[test]
    fn check_in_moves_check_out_to_next_day() {
        let mut r = booked(date(2024, 5, 20), date(2024, 5, 23), 2);
        r.set_check_in(date(2024, 6, 1));
        assert_eq!(r.window(), DateRange::new(date(2024, 6, 1), date(2024, 6, 2)));
    }

    #[test]
    fn early_check_out_pulls_check_in_back() {
        let mut r = booked(date(2024, 5, 20), date(2024, 5, 23), 2);
        r.set_check_out(date(2024, 5, 18));
        assert_eq!(r.window(), DateRange::new(date(2024, 5, 17), date(2024, 5, 18)));

        r.set_check_out(date(2024, 5, 21));
        assert_eq!(r.window(), DateRange::new(date(2024, 5, 17), date(2024, 5, 21)));
    }

    #[test]
    fn date_change_cascades_and_clears_manual_days() {
        let mut r = booked(date(2024, 5, 20), date(2024, 5, 23), 2);
        let rental = r.add_service(&definition("s1", ServiceType::Rental, 50_000));
        let pickup = r.add_service(&definition("s3", ServiceType::Pickup, 30_000));
        assert!(r.update_service(rental, &ServiceUpdate::days(1)));
        assert_eq!(r.selection(rental).unwrap().days_source(), DaysSource::Manual);

        r.set_dates(date(2024, 5, 20), date(2024, 5, 25));
        let rental = r.selection(rental).unwrap();
        assert_eq!(rental.days(), 5);
        assert_eq!(rental.days_source(), DaysSource::Rule);
        assert_eq!(rental.window(), r.window());
        assert_eq!(r.selection(pickup).unwrap().days(), 1);
        assert_amount_consistent(&r);
    }

    #[test]
    fn selection_dates_can_diverge_from_stay() {
        let mut r = booked(date(2024, 5, 20), date(2024, 5, 25), 1);
        let rental = r.add_service(&definition("s1", ServiceType::Rental, 50_000));
        r.update_service(
            rental,
            &ServiceUpdate::dates(date(2024, 5, 21), date(2024, 5, 23)),
        );
        assert_eq!(r.selection(rental).unwrap().days(), 2);
        assert_eq!(r.amount(), 80_000 * 5 + 100_000);
    }

    #[test]
    fn unknown_selection_ids_are_no_ops() {
        let mut r = booked(date(2024, 5, 20), date(2024, 5, 23), 2);
        let before = r.version();
        assert!(r.remove_service(SelectionId::new()).is_none());
        assert!(!r.update_service(SelectionId::new(), &ServiceUpdate::days(3)));
        assert_eq!(r.version(), before);
    }

    #[test]
    fn remove_service_drops_its_price() {
        let mut r = booked(date(2024, 5, 20), date(2024, 5, 23), 2);
        let id = r.add_service(&definition("s3", ServiceType::Pickup, 30_000));
        // Pickup is one day, one unit per guest.
        assert_eq!(r.amount(), 300_000);
        let removed = r.remove_service(id).unwrap();
        assert_eq!(removed.price(), 60_000);
        assert_eq!(r.amount(), 240_000);
    }

    #[test]
    fn advance_walks_lifecycle_and_stops_at_terminal() {
        let mut r = booked(date(2024, 5, 20), date(2024, 5, 23), 2);
        assert_eq!(r.advance().unwrap(), ReservationStatus::Pending);
        r.assign_invoice(InvoiceId::new());
        assert_eq!(r.advance().unwrap(), ReservationStatus::Confirmed);
        assert_eq!(r.advance().unwrap(), ReservationStatus::CheckedIn);
        assert_eq!(r.advance().unwrap(), ReservationStatus::CheckedOut);
        match r.advance() {
            Err(DomainError::InvariantViolation(msg)) if msg.contains("no further action") => {}
            other => panic!("Expected InvariantViolation, got {other:?}"),
        }
        assert!(r.cancel().is_err());
    }

    #[test]
    fn cancel_then_override_back() {
        let mut r = booked(date(2024, 5, 20), date(2024, 5, 23), 2);
        r.assign_invoice(InvoiceId::new());
        r.cancel().unwrap();
        assert_eq!(r.status(), ReservationStatus::Cancelled);
        assert!(matches!(r.next_action(), NextAction::Terminal { .. }));

        r.override_status(ReservationStatus::Confirmed);
        assert_eq!(r.status(), ReservationStatus::Confirmed);
    }

    #[test]
    fn cancelled_draft_stays_terminal() {
        let mut r = booked(date(2024, 5, 20), date(2024, 5, 23), 2);
        assert!(r.is_new());
        r.cancel().unwrap();
        assert_eq!(
            r.next_action(),
            NextAction::Terminal {
                status: ReservationStatus::Cancelled
            }
        );
        match r.advance() {
            Err(DomainError::InvariantViolation(_)) => {}
            other => panic!("Expected InvariantViolation, got {other:?}"),
        }
        assert_eq!(r.status(), ReservationStatus::Cancelled);
    }

    #[test]
    fn overridden_draft_only_moves_forward() {
        let mut r = booked(date(2024, 5, 20), date(2024, 5, 23), 2);
        r.override_status(ReservationStatus::CheckedIn);
        assert!(matches!(
            r.next_action(),
            NextAction::Advance {
                action: StatusAction::CheckOut,
                target: ReservationStatus::CheckedOut
            }
        ));
        assert_eq!(r.advance().unwrap(), ReservationStatus::CheckedOut);
        assert!(matches!(r.next_action(), NextAction::Terminal { .. }));
    }

    #[test]
    fn window_keeps_a_night_at_the_calendar_edges() {
        let mut r = Reservation::draft(ocean_twin(), NaiveDate::MAX, DayRuleTable::default());
        assert_eq!(r.window().end, NaiveDate::MAX);
        assert!(r.window().start < r.window().end);
        assert_eq!(r.quote().nights, 1);

        r.set_dates(NaiveDate::MAX, NaiveDate::MAX);
        assert!(r.window().start < r.window().end);

        r.set_check_out(NaiveDate::MIN);
        assert_eq!(r.window().start, NaiveDate::MIN);
        assert!(r.window().end > r.window().start);
    }

    #[test]
    fn invoice_is_assigned_once() {
        let mut r = booked(date(2024, 5, 20), date(2024, 5, 23), 2);
        let first = r.assign_invoice(InvoiceId::new());
        let second = r.assign_invoice(InvoiceId::new());
        assert_eq!(first, second);
        assert_eq!(r.invoice_id(), Some(first));
    }

    #[test]
    fn summary_carries_derived_amount() {
        let mut r = booked(date(2024, 5, 20), date(2024, 5, 23), 3);
        r.set_guest_name("Kim Minsu");
        r.set_guest_phone(Some("  ".to_string()));
        let s = r.summary();
        assert_eq!(s.amount, 300_000);
        assert_eq!(s.room_charge, 300_000);
        assert_eq!(s.guest.name, "Kim Minsu");
        assert_eq!(s.guest.phone, None);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Property: amount matches the engine after any sequence of edits.
        #[test]
        fn amount_always_matches_engine(
            ops in proptest::collection::vec((0u8..6, 0i64..40, 0u32..8), 0..24)
        ) {
            let mut r = booked(date(2024, 5, 20), date(2024, 5, 23), 2);
            let base = date(2024, 5, 1);
            for (op, n, k) in ops {
                let day = base + chrono::Duration::days(n);
                match op {
                    0 => r.set_check_in(day),
                    1 => r.set_check_out(day),
                    2 => r.set_guest_count(k),
                    3 => { r.add_service(&definition("s2", ServiceType::Meal, 10_000)); }
                    4 => {
                        if let Some(id) = r.selections().first().map(|s| s.id_typed()) {
                            r.update_service(id, &ServiceUpdate::days(k));
                        }
                    }
                    _ => r.set_dates(day, day + chrono::Duration::days(i64::from(k))),
                }
                prop_assert!(r.end_date() > r.start_date());
                prop_assert!(r.guest_count() >= 1 && r.guest_count() <= r.room().capacity);
                prop_assert_eq!(
                    r.amount(),
                    compute_total(r.room(), r.window(), r.guest_count(), r.selections(), r.extra_person_rate())
                );
            }
        }
    }
}
