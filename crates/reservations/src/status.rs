//! Reservation status lifecycle and the front desk's "next action".

use serde::{Deserialize, Serialize};

use staysync_core::{DomainError, DomainResult};

/// Reservation status lifecycle.
///
/// `Pending → Confirmed → CheckedIn → CheckedOut` is the only forward path;
/// `Cancelled` is a side exit reached through [`ReservationStatus::cancel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    CheckedIn,
    CheckedOut,
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "PENDING",
            ReservationStatus::Confirmed => "CONFIRMED",
            ReservationStatus::CheckedIn => "CHECKED_IN",
            ReservationStatus::CheckedOut => "CHECKED_OUT",
            ReservationStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ReservationStatus::CheckedOut | ReservationStatus::Cancelled
        )
    }

    /// Cancelled reservations never block a room.
    pub fn holds_room(&self) -> bool {
        !matches!(self, ReservationStatus::Cancelled)
    }

    /// Status after an explicit cancel; only non-terminal states can cancel.
    pub fn cancel(self) -> DomainResult<ReservationStatus> {
        if self.is_terminal() {
            return Err(DomainError::invariant(format!(
                "cannot cancel a reservation that is {}",
                self.as_str()
            )));
        }
        Ok(ReservationStatus::Cancelled)
    }
}

impl core::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the primary button does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusAction {
    Create,
    Confirm,
    CheckIn,
    CheckOut,
}

impl StatusAction {
    pub fn label(&self) -> &'static str {
        match self {
            StatusAction::Create => "Create reservation",
            StatusAction::Confirm => "Confirm reservation",
            StatusAction::CheckIn => "Check guest in",
            StatusAction::CheckOut => "Settle and check out",
        }
    }
}

/// Result of asking the policy for the next forward step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NextAction {
    Advance {
        action: StatusAction,
        target: ReservationStatus,
    },
    /// No forward transition exists; the form can still save edits.
    Terminal { status: ReservationStatus },
}

impl NextAction {
    pub fn label(&self) -> &'static str {
        match self {
            NextAction::Advance { action, .. } => action.label(),
            NextAction::Terminal { .. } => "No further action available",
        }
    }

    pub fn target(&self) -> Option<ReservationStatus> {
        match self {
            NextAction::Advance { target, .. } => Some(*target),
            NextAction::Terminal { .. } => None,
        }
    }
}

/// The single forward action offered for `current`.
///
/// `None` means the reservation has never been saved; its implicit state is
/// `Pending` and the action creates it.
pub fn next_action(current: Option<ReservationStatus>) -> NextAction {
    let advance = |action, target| NextAction::Advance { action, target };
    match current {
        None => advance(StatusAction::Create, ReservationStatus::Pending),
        Some(ReservationStatus::Pending) => {
            advance(StatusAction::Confirm, ReservationStatus::Confirmed)
        }
        Some(ReservationStatus::Confirmed) => {
            advance(StatusAction::CheckIn, ReservationStatus::CheckedIn)
        }
        Some(ReservationStatus::CheckedIn) => {
            advance(StatusAction::CheckOut, ReservationStatus::CheckedOut)
        }
        Some(status @ (ReservationStatus::CheckedOut | ReservationStatus::Cancelled)) => {
            NextAction::Terminal { status }
        }
    }
}
