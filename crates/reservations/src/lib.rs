//! Reservations domain module.
//!
//! The reservation aggregate keeps its total derived from the pricing engine,
//! the status policy drives the front-desk "next action" button, and the query
//! helpers answer the calendar and dashboard views.

pub mod dashboard;
pub mod occupancy;
pub mod reservation;
pub mod status;

pub use dashboard::{OccupancyPeriod, RoomOccupancy, StatusCounts, occupancy_by_room, status_counts};
pub use occupancy::{CellStatus, cell_status, is_occupied, overlapping};
pub use reservation::{Guest, Reservation, ReservationSummary};
pub use status::{NextAction, ReservationStatus, StatusAction, next_action};
