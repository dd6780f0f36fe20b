use chrono::NaiveDate;
use thiserror::Error;

use staysync_core::{DomainError, RoomId};

pub type DeskResult<T> = Result<T, DeskError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeskError {
    /// Deterministic input failure from the domain layer.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A lifecycle rule refused the operation (e.g. advancing a checked-out stay).
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// A catalog code is already taken.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The named reservation, room or service does not exist.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// Quick-book on a cell somebody already occupies.
    #[error("room {room} is occupied on {day}")]
    Occupied { room: RoomId, day: NaiveDate },
}

impl DeskError {
    pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
        DeskError::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

impl From<DomainError> for DeskError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::Validation(msg) => DeskError::Validation(msg),
            DomainError::InvalidId(msg) => DeskError::Validation(msg),
            DomainError::InvariantViolation(msg) => DeskError::InvariantViolation(msg),
            DomainError::Conflict(msg) => DeskError::Conflict(msg),
            DomainError::NotFound => DeskError::NotFound {
                kind: "record",
                id: String::new(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_onto_desk_errors() {
        assert_eq!(
            DeskError::from(DomainError::invalid_id("RoomId cannot be empty")),
            DeskError::Validation("RoomId cannot be empty".to_string())
        );
        assert!(matches!(
            DeskError::from(DomainError::conflict("room 101 already exists")),
            DeskError::Conflict(_)
        ));
    }

    #[test]
    fn not_found_names_what_is_missing() {
        let err = DeskError::not_found("reservation", "abc");
        assert_eq!(err.to_string(), "reservation not found: abc");
    }
}
