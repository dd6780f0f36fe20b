//! Front desk: the commit boundary between edit sessions and the store.
//!
//! Edit sessions work on an owned [`Reservation`] clone and hand it back to
//! [`FrontDesk::save_reservation`]. The desk keeps the committed set, mints
//! invoice ids, and mirrors every commit to an [`AuditSink`].
//!
//! [`Reservation`]: staysync_reservations::Reservation
//! [`AuditSink`]: staysync_audit::AuditSink

pub mod config;
pub mod desk;
pub mod error;
pub mod mirror;
pub mod seed;
pub mod snapshot;

pub use config::{AuditMode, DeskConfig};
pub use desk::FrontDesk;
pub use error::{DeskError, DeskResult};
pub use seed::{seed_bookings, seeded_desk};
pub use snapshot::DeskSnapshot;
