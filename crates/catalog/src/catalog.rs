//! Catalog read interface and the in-memory implementation.

use serde::{Deserialize, Serialize};

use staysync_core::{
    DomainError, DomainResult, Entity, RoomId, ServiceId, find_by_id, find_by_id_mut,
    position_of,
};

use crate::room::Room;
use crate::service::ServiceDefinition;

/// Read-only view of the room and service catalogs.
///
/// Edit sessions take owned snapshots out of this, so later catalog edits never
/// reach into a reservation that is already being priced.
pub trait Catalog {
    fn rooms(&self) -> &[Room];

    fn service_definitions(&self) -> &[ServiceDefinition];

    fn room(&self, id: &RoomId) -> Option<&Room> {
        find_by_id(self.rooms(), id)
    }

    fn service_definition(&self, id: &ServiceId) -> Option<&ServiceDefinition> {
        find_by_id(self.service_definitions(), id)
    }
}

/// On-disk catalog layout (`{ "rooms": [...], "services": [...] }`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFile {
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub services: Vec<ServiceDefinition>,
}

impl CatalogFile {
    pub fn from_json(raw: &str) -> DomainResult<Self> {
        serde_json::from_str(raw)
            .map_err(|e| DomainError::validation(format!("catalog file: {e}")))
    }
}

/// Ordered, validated in-memory catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryCatalog {
    rooms: Vec<Room>,
    services: Vec<ServiceDefinition>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog, validating every room and the service list.
    pub fn from_parts(rooms: Vec<Room>, services: Vec<ServiceDefinition>) -> DomainResult<Self> {
        let mut catalog = Self::new();
        for room in rooms {
            catalog.add_room(room)?;
        }
        catalog.replace_services(services)?;
        Ok(catalog)
    }

    pub fn from_file(file: CatalogFile) -> DomainResult<Self> {
        Self::from_parts(file.rooms, file.services)
    }

    pub fn add_room(&mut self, room: Room) -> DomainResult<()> {
        room.validate()?;
        if self.room(&room.id).is_some() {
            return Err(DomainError::conflict(format!("room {} already exists", room.id)));
        }
        tracing::debug!(room_id = %room.id, "room added to catalog");
        self.rooms.push(room);
        Ok(())
    }

    pub fn update_room(&mut self, room: Room) -> DomainResult<()> {
        room.validate()?;
        let slot =
            find_by_id_mut(&mut self.rooms, &room.id).ok_or_else(DomainError::not_found)?;
        *slot = room;
        Ok(())
    }

    /// Remove a room. Reservations that reference it keep their own snapshot.
    pub fn delete_room(&mut self, id: &RoomId) -> DomainResult<Room> {
        let idx = position_of(&self.rooms, id).ok_or_else(DomainError::not_found)?;
        Ok(self.rooms.remove(idx))
    }

    /// Replace the whole service list (the settings screen saves it as a unit).
    pub fn replace_services(&mut self, services: Vec<ServiceDefinition>) -> DomainResult<()> {
        for (i, def) in services.iter().enumerate() {
            def.validate()?;
            if services[..i].iter().any(|other| other.same_identity(def)) {
                return Err(DomainError::conflict(format!(
                    "duplicate service id {}",
                    def.id
                )));
            }
        }
        self.services = services;
        Ok(())
    }
}

impl Catalog for InMemoryCatalog {
    fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    fn service_definitions(&self) -> &[ServiceDefinition] {
        &self.services
    }
}
