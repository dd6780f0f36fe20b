//! `staysync-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use aggregate::AggregateRoot;
pub use entity::{Entity, find_by_id, find_by_id_mut, position_of};
pub use error::{DomainError, DomainResult};
pub use id::{InvoiceId, ReservationId, RoomId, SelectionId, ServiceId};
pub use value_object::ValueObject;
