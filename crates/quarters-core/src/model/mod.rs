//! Core data types for occupants and the resources they occupy

pub mod occupant;
pub mod resource;

pub use occupant::{Occupant, OccupantId, Role, RoleDetail};
pub use resource::{Resource, ResourceKind};
