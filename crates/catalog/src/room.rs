use serde::{Deserialize, Serialize};

use staysync_core::{DomainError, DomainResult, Entity, RoomId};

/// A bookable room.
///
/// All prices are in the smallest currency unit (won).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    /// Bed/room category shown to operators (twin, queen, loft, ...).
    pub category: String,
    /// Maximum number of occupants.
    pub capacity: u32,
    /// Occupants included in the nightly base price.
    pub base_capacity: u32,
    /// Catalog surcharge per occupant above `base_capacity`, per night.
    pub extra_person_price: u64,
    /// Base nightly rate.
    pub price: u64,
    #[serde(default)]
    pub has_bathroom: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_number: Option<String>,
}

impl Room {
    /// Minimal constructor; optional presentation fields start empty.
    pub fn new(
        id: RoomId,
        name: impl Into<String>,
        category: impl Into<String>,
        capacity: u32,
        base_capacity: u32,
        extra_person_price: u64,
        price: u64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
            capacity,
            base_capacity,
            extra_person_price,
            price,
            has_bathroom: true,
            description: None,
            building: None,
            room_number: None,
        }
    }

    /// Invariant: `1 <= base_capacity <= capacity` and a non-blank name.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("room name cannot be empty"));
        }
        if self.base_capacity == 0 {
            return Err(DomainError::validation("base capacity must be at least 1"));
        }
        if self.base_capacity > self.capacity {
            return Err(DomainError::validation(
                "base capacity cannot exceed room capacity",
            ));
        }
        Ok(())
    }

    /// Clamp an occupant count into `[1, capacity]`.
    pub fn clamp_guest_count(&self, guest_count: u32) -> u32 {
        guest_count.clamp(1, self.capacity.max(1))
    }

    /// Occupants billed at the extra-person rate.
    pub fn extra_guests(&self, guest_count: u32) -> u32 {
        guest_count.saturating_sub(self.base_capacity)
    }
}

impl Entity for Room {
    type Id = RoomId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
