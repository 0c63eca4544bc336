//! Resource types: offices and living spaces with fixed capacities

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// The two kinds of allocatable space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Office,
    LivingSpace,
}

impl ResourceKind {
    /// Maximum occupancy for this kind of resource
    pub fn capacity(&self) -> usize {
        match self {
            ResourceKind::Office => 6,
            ResourceKind::LivingSpace => 4,
        }
    }

    /// Parse a kind from user input ("office" / "livingspace", case-insensitive)
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "office" => Ok(ResourceKind::Office),
            "livingspace" => Ok(ResourceKind::LivingSpace),
            _ => Err(ValidationError::InvalidRoomKind(raw.to_string())),
        }
    }

    /// Lowercase label used in diagnostics
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Office => "office",
            ResourceKind::LivingSpace => "livingspace",
        }
    }
}

/// A named space occupants can be allocated into.
///
/// Names are unique across both kinds; an office and a living space can
/// never share a name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub name: String,
    pub kind: ResourceKind,
}

impl Resource {
    pub fn new(name: impl Into<String>, kind: ResourceKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Capacity is fixed by kind
    pub fn capacity(&self) -> usize {
        self.kind.capacity()
    }
}
