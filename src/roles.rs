use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub const OPERATION_AREAS: [&str; 4] = ["inbound", "picking", "loading", "replenishment"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundRoles {
    pub forklift_driver: u32,
    pub receiver: u32,
    pub bendi_driver: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickingRoles {
    pub bendi_driver: u32,
    pub general_labor: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadingRoles {
    pub forklift_driver: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplenishmentRoles {
    pub staff: u32,
}

impl Default for ReplenishmentRoles {
    fn default() -> Self {
        Self { staff: 1 }
    }
}

/// Headcount per role, grouped by operation area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredRoles {
    pub inbound: InboundRoles,
    pub picking: PickingRoles,
    pub loading: LoadingRoles,
    pub replenishment: ReplenishmentRoles,
}

impl RequiredRoles {
    /// Fixed staffing used whenever the calculation cannot complete.
    pub fn fallback() -> Self {
        Self {
            inbound: InboundRoles {
                forklift_driver: 3,
                receiver: 2,
                bendi_driver: 2,
            },
            picking: PickingRoles {
                bendi_driver: 2,
                general_labor: 3,
            },
            loading: LoadingRoles { forklift_driver: 2 },
            replenishment: ReplenishmentRoles { staff: 1 },
        }
    }

    pub fn total_staff(&self) -> u32 {
        self.entries().iter().map(|(_, _, count)| count).sum()
    }

    /// Flattened `(area, role, count)` rows in a stable order.
    pub fn entries(&self) -> [(&'static str, &'static str, u32); 7] {
        [
            ("inbound", "forklift_driver", self.inbound.forklift_driver),
            ("inbound", "receiver", self.inbound.receiver),
            ("inbound", "bendi_driver", self.inbound.bendi_driver),
            ("picking", "bendi_driver", self.picking.bendi_driver),
            ("picking", "general_labor", self.picking.general_labor),
            ("loading", "forklift_driver", self.loading.forklift_driver),
            ("replenishment", "staff", self.replenishment.staff),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RolesValidationError {
    message: String,
}

impl RolesValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Check a serialized roles document: all four areas present, every count a
/// non-negative integer, and replenishment staffed by at least one person.
pub fn validate_roles_value(value: &Value) -> Result<(), RolesValidationError> {
    let root = value
        .as_object()
        .ok_or_else(|| RolesValidationError::new("required roles must be a JSON object"))?;

    for area in OPERATION_AREAS {
        let roles = root
            .get(area)
            .ok_or_else(|| RolesValidationError::new(format!("missing operation area '{area}'")))?
            .as_object()
            .ok_or_else(|| {
                RolesValidationError::new(format!("operation area '{area}' must be an object"))
            })?;
        for (role, count) in roles {
            if count.as_u64().is_none() {
                return Err(RolesValidationError::new(format!(
                    "{area}.{role} must be a non-negative integer (got {count})"
                )));
            }
        }
    }

    let staff = root
        .get("replenishment")
        .and_then(|area| area.get("staff"))
        .and_then(Value::as_u64)
        .ok_or_else(|| RolesValidationError::new("missing replenishment.staff"))?;
    if staff < 1 {
        return Err(RolesValidationError::new(
            "replenishment.staff must be at least 1",
        ));
    }
    Ok(())
}

pub fn validate_roles(roles: &RequiredRoles) -> Result<(), RolesValidationError> {
    let value = serde_json::to_value(roles)
        .map_err(|err| RolesValidationError::new(err.to_string()))?;
    validate_roles_value(&value)
}
