//! Occupant types: staff and fellows, plus their identifiers

use crate::error::ValidationError;
use crate::model::ResourceKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Total identifier length: two-char role prefix plus five random chars
pub const ID_LEN: usize = 7;

/// Occupant identifier, e.g. `S-X2K9Q` or `F-07PLM`.
///
/// Stored uppercase; comparisons are therefore case-insensitive as long as
/// every id enters through [`OccupantId::parse`] or the generator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OccupantId(String);

impl OccupantId {
    /// Validate a user-supplied identifier.
    ///
    /// Accepts exactly [`ID_LEN`] characters, first character `F` or `S`,
    /// the rest uppercase alphanumerics or `-`. Input is normalized to
    /// uppercase.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let candidate = raw.trim().to_ascii_uppercase();
        let mut chars = candidate.chars();
        let valid = candidate.len() == ID_LEN
            && matches!(chars.next(), Some('F') | Some('S'))
            && chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-');
        if valid {
            Ok(OccupantId(candidate))
        } else {
            Err(ValidationError::InvalidId(raw.to_string()))
        }
    }

    /// Wrap an identifier the generator already knows to be well-formed.
    pub(crate) fn from_raw(id: String) -> Self {
        OccupantId(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Which population this id routes to, from its prefix character
    pub fn role(&self) -> Role {
        if self.0.starts_with('F') {
            Role::Fellow
        } else {
            Role::Staff
        }
    }
}

impl fmt::Display for OccupantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Occupant designation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Staff,
    Fellow,
}

impl Role {
    /// Parse a designation from user input ("staff" / "fellow", case-insensitive)
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "staff" => Ok(Role::Staff),
            "fellow" => Ok(Role::Fellow),
            _ => Err(ValidationError::InvalidDesignation(raw.to_string())),
        }
    }

    /// Identifier prefix for this role
    pub fn prefix(&self) -> &'static str {
        match self {
            Role::Staff => "S-",
            Role::Fellow => "F-",
        }
    }
}

/// Role-specific occupant data.
///
/// Only fellows carry a living-space slot, so a staff occupant holding a
/// living space is unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoleDetail {
    Staff,
    Fellow {
        living_space: Option<String>,
        wants_accommodation: bool,
    },
}

/// A staff member or fellow tracked by the registry.
///
/// Resource references are by name (the registry owns the resources).
/// Identifier, name, and role are fixed at creation; only the resource
/// references change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occupant {
    id: OccupantId,
    name: String,
    office: Option<String>,
    detail: RoleDetail,
}

impl Occupant {
    pub fn new_staff(id: OccupantId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            office: None,
            detail: RoleDetail::Staff,
        }
    }

    pub fn new_fellow(id: OccupantId, name: impl Into<String>, wants_accommodation: bool) -> Self {
        Self {
            id,
            name: name.into(),
            office: None,
            detail: RoleDetail::Fellow {
                living_space: None,
                wants_accommodation,
            },
        }
    }

    pub fn id(&self) -> &OccupantId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        match self.detail {
            RoleDetail::Staff => Role::Staff,
            RoleDetail::Fellow { .. } => Role::Fellow,
        }
    }

    pub fn detail(&self) -> &RoleDetail {
        &self.detail
    }

    pub fn office(&self) -> Option<&str> {
        self.office.as_deref()
    }

    /// Always `None` for staff
    pub fn living_space(&self) -> Option<&str> {
        match &self.detail {
            RoleDetail::Staff => None,
            RoleDetail::Fellow { living_space, .. } => living_space.as_deref(),
        }
    }

    /// Always `false` for staff
    pub fn wants_accommodation(&self) -> bool {
        match self.detail {
            RoleDetail::Staff => false,
            RoleDetail::Fellow {
                wants_accommodation,
                ..
            } => wants_accommodation,
        }
    }

    /// The reference field matching `kind`
    pub fn reference(&self, kind: ResourceKind) -> Option<&str> {
        match kind {
            ResourceKind::Office => self.office(),
            ResourceKind::LivingSpace => self.living_space(),
        }
    }

    /// Point the reference field for `kind` at `room`.
    ///
    /// Callers must have already established role compatibility; a staff
    /// occupant has no living-space slot to write.
    pub(crate) fn set_reference(&mut self, kind: ResourceKind, room: Option<String>) {
        match kind {
            ResourceKind::Office => self.office = room,
            ResourceKind::LivingSpace => {
                debug_assert!(matches!(self.detail, RoleDetail::Fellow { .. }));
                if let RoleDetail::Fellow { living_space, .. } = &mut self.detail {
                    *living_space = room;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_ids() {
        let id = OccupantId::parse("f-abc12").unwrap();
        assert_eq!(id.as_str(), "F-ABC12");
        assert_eq!(id.role(), Role::Fellow);

        let id = OccupantId::parse("S-00000").unwrap();
        assert_eq!(id.role(), Role::Staff);
    }

    #[test]
    fn test_parse_invalid_ids() {
        assert!(OccupantId::parse("").is_err());
        assert!(OccupantId::parse("   ").is_err());
        assert!(OccupantId::parse("X-ABC12").is_err()); // bad prefix
        assert!(OccupantId::parse("F-ABC1").is_err()); // too short
        assert!(OccupantId::parse("F-ABC123").is_err()); // too long
        assert!(OccupantId::parse("F-AB?12").is_err()); // bad character
    }

    #[test]
    fn test_parse_role() {
        assert_eq!(Role::parse("staff"), Ok(Role::Staff));
        assert_eq!(Role::parse(" FELLOW "), Ok(Role::Fellow));
        assert!(Role::parse("intern").is_err());
    }

    #[test]
    fn test_staff_has_no_living_space_slot() {
        let mut staff = Occupant::new_staff(OccupantId::parse("S-AAAAA").unwrap(), "Amy Pond");
        staff.set_reference(ResourceKind::Office, Some("Blue".to_string()));
        assert_eq!(staff.office(), Some("Blue"));
        assert_eq!(staff.living_space(), None);
        assert!(!staff.wants_accommodation());
    }

    #[test]
    fn test_fellow_references() {
        let id = OccupantId::parse("F-AAAAA").unwrap();
        let mut fellow = Occupant::new_fellow(id, "Rory Williams", true);
        assert!(fellow.wants_accommodation());
        assert_eq!(fellow.reference(ResourceKind::LivingSpace), None);

        fellow.set_reference(ResourceKind::LivingSpace, Some("Dorm".to_string()));
        assert_eq!(fellow.living_space(), Some("Dorm"));
        assert_eq!(fellow.reference(ResourceKind::LivingSpace), Some("Dorm"));
    }
}
