use serde::{Deserialize, Serialize};

use staysync_core::{DomainError, DomainResult, Entity, ServiceId};

/// Stable kind of an ancillary service.
///
/// Billing rules are keyed on this value, never on the display name, so an
/// operator can rename "조식" to "Breakfast" without changing how it is billed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    Rental,
    Meal,
    WeekendMeal,
    Pickup,
    Commute,
    Custom,
}

impl ServiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::Rental => "rental",
            ServiceType::Meal => "meal",
            ServiceType::WeekendMeal => "weekend_meal",
            ServiceType::Pickup => "pickup",
            ServiceType::Commute => "commute",
            ServiceType::Custom => "custom",
        }
    }
}

impl core::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Catalog entry for a service that can be attached to a stay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDefinition {
    pub id: ServiceId,
    pub name: String,
    /// Unit rate seeded into new selections.
    pub default_price: u64,
    #[serde(rename = "type")]
    pub service_type: ServiceType,
}

impl ServiceDefinition {
    pub fn new(
        id: ServiceId,
        name: impl Into<String>,
        default_price: u64,
        service_type: ServiceType,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            default_price,
            service_type,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("service name cannot be empty"));
        }
        Ok(())
    }
}

impl Entity for ServiceDefinition {
    type Id = ServiceId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
