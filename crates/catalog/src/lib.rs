//! Room and service catalog (static reference data).
//!
//! The pricing engine only ever reads snapshots from here; administration
//! (adding rooms, replacing the service list) happens between edit sessions.

pub mod catalog;
pub mod room;
pub mod seed;
pub mod service;

pub use catalog::{Catalog, CatalogFile, InMemoryCatalog};
pub use room::Room;
pub use seed::{seed_catalog, seed_rooms, seed_services};
pub use service::{ServiceDefinition, ServiceType};
