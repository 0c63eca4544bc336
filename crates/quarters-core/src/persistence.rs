//! Save/Load functionality for persisting engine state
//!
//! Uses bincode for the compact binary snapshot and serde_json for a
//! human-inspectable variant of the same data. Only resource and occupant
//! records are written; the allocation index is derived state and is
//! rebuilt from the occupant reference fields after every load.

use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use crate::model::{Occupant, OccupantId, Resource};
use crate::registry::{OccupantRegistry, ResourceRegistry};

/// Version number for save file format (increment when format changes)
const SAVE_VERSION: u32 = 1;

/// Serializable snapshot of the engine state
#[derive(Serialize, Deserialize)]
pub struct SaveData {
    /// Save format version
    pub version: u32,
    /// Every resource, office and living space alike
    pub resources: Vec<Resource>,
    /// Every occupant record, staff then fellows
    pub occupants: Vec<OccupantRecord>,
}

/// Serializable form of one occupant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupantRecord {
    pub id: OccupantId,
    pub name: String,
    pub role: RoleRecord,
    pub office: Option<String>,
    pub living_space: Option<String>,
}

/// Role tag for a persisted occupant.
///
/// The accommodation flag rides along for fellows; without it the
/// living-space waiting list could not be rebuilt after a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoleRecord {
    Staff,
    Fellow { wants_accommodation: bool },
}

impl From<&Occupant> for OccupantRecord {
    fn from(occupant: &Occupant) -> Self {
        let role = match occupant.role() {
            crate::model::Role::Staff => RoleRecord::Staff,
            crate::model::Role::Fellow => RoleRecord::Fellow {
                wants_accommodation: occupant.wants_accommodation(),
            },
        };
        Self {
            id: occupant.id().clone(),
            name: occupant.name().to_string(),
            role,
            office: occupant.office().map(str::to_owned),
            living_space: occupant.living_space().map(str::to_owned),
        }
    }
}

impl OccupantRecord {
    /// Rehydrate the occupant this record describes.
    ///
    /// A staff record has no living-space slot to restore, so any
    /// living-space name on one is dropped here.
    pub fn into_occupant(self) -> Occupant {
        use crate::model::ResourceKind;

        let mut occupant = match self.role {
            RoleRecord::Staff => Occupant::new_staff(self.id, self.name),
            RoleRecord::Fellow {
                wants_accommodation,
            } => {
                let mut fellow = Occupant::new_fellow(self.id, self.name, wants_accommodation);
                fellow.set_reference(ResourceKind::LivingSpace, self.living_space);
                fellow
            }
        };
        occupant.set_reference(ResourceKind::Office, self.office);
        occupant
    }
}

fn snapshot(resources: &ResourceRegistry, occupants: &OccupantRegistry) -> SaveData {
    SaveData {
        version: SAVE_VERSION,
        resources: resources.iter().cloned().collect(),
        occupants: occupants.iter().map(OccupantRecord::from).collect(),
    }
}

fn check_version(data: &SaveData) -> Result<(), SaveError> {
    if data.version != SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected: SAVE_VERSION,
            found: data.version,
        });
    }
    Ok(())
}

/// Write a binary snapshot of the registries
pub fn save_state<W: Write>(
    writer: W,
    resources: &ResourceRegistry,
    occupants: &OccupantRegistry,
) -> Result<(), SaveError> {
    bincode::serialize_into(writer, &snapshot(resources, occupants))?;
    Ok(())
}

/// Read a binary snapshot back
pub fn load_state<R: Read>(reader: R) -> Result<LoadedState, SaveError> {
    let data: SaveData = bincode::deserialize_from(reader)?;
    check_version(&data)?;
    Ok(LoadedState::from(data))
}

/// Write a JSON snapshot of the registries
pub fn save_state_json<W: Write>(
    writer: W,
    resources: &ResourceRegistry,
    occupants: &OccupantRegistry,
) -> Result<(), SaveError> {
    serde_json::to_writer_pretty(writer, &snapshot(resources, occupants))?;
    Ok(())
}

/// Read a JSON snapshot back
pub fn load_state_json<R: Read>(reader: R) -> Result<LoadedState, SaveError> {
    let data: SaveData = serde_json::from_reader(reader)?;
    check_version(&data)?;
    Ok(LoadedState::from(data))
}

/// Result of loading a snapshot
pub struct LoadedState {
    pub resources: Vec<Resource>,
    pub occupants: Vec<Occupant>,
}

impl From<SaveData> for LoadedState {
    fn from(data: SaveData) -> Self {
        Self {
            resources: data.resources,
            occupants: data
                .occupants
                .into_iter()
                .map(OccupantRecord::into_occupant)
                .collect(),
        }
    }
}

/// Errors that can occur during save/load
#[derive(Debug)]
pub enum SaveError {
    Io(std::io::Error),
    Bincode(Box<bincode::ErrorKind>),
    Json(serde_json::Error),
    VersionMismatch { expected: u32, found: u32 },
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::Io(e)
    }
}

impl From<Box<bincode::ErrorKind>> for SaveError {
    fn from(e: Box<bincode::ErrorKind>) -> Self {
        SaveError::Bincode(e)
    }
}

impl From<serde_json::Error> for SaveError {
    fn from(e: serde_json::Error) -> Self {
        SaveError::Json(e)
    }
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "IO error: {}", e),
            SaveError::Bincode(e) => write!(f, "Serialization error: {}", e),
            SaveError::Json(e) => write!(f, "JSON error: {}", e),
            SaveError::VersionMismatch { expected, found } => {
                write!(
                    f,
                    "Save version mismatch: expected {}, found {}",
                    expected, found
                )
            }
        }
    }
}

impl std::error::Error for SaveError {}
