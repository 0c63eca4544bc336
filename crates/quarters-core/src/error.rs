//! Error taxonomy for engine operations.
//!
//! Every failed mutating call leaves the engine unchanged; the one
//! documented exception is a failed [`load`](crate::engine::AllocationEngine::load),
//! which leaves the engine empty because state is reset before the snapshot
//! is read.

use crate::model::ResourceKind;
use crate::persistence::SaveError;
use std::fmt;

/// Top-level error for every engine operation
#[derive(Debug)]
pub enum EngineError {
    /// Malformed input: blank names, unknown designations or kinds, bad ids
    Validation(ValidationError),
    /// Input was well-formed but the operation collides with current state
    Conflict(ConflictError),
    /// A referenced occupant or room does not exist
    NotFound(NotFoundError),
    /// Persistence-layer failure, propagated opaquely
    Adapter(SaveError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Validation(e) => e.fmt(f),
            EngineError::Conflict(e) => e.fmt(f),
            EngineError::NotFound(e) => e.fmt(f),
            EngineError::Adapter(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<ValidationError> for EngineError {
    fn from(e: ValidationError) -> Self {
        EngineError::Validation(e)
    }
}

impl From<ConflictError> for EngineError {
    fn from(e: ConflictError) -> Self {
        EngineError::Conflict(e)
    }
}

impl From<NotFoundError> for EngineError {
    fn from(e: NotFoundError) -> Self {
        EngineError::NotFound(e)
    }
}

impl From<SaveError> for EngineError {
    fn from(e: SaveError) -> Self {
        EngineError::Adapter(e)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Blank occupant name
    EmptyName,
    /// `create_rooms` called with no names at all
    EmptyBatch,
    /// Designation other than "staff" / "fellow"
    InvalidDesignation(String),
    /// Room kind other than "office" / "livingspace"
    InvalidRoomKind(String),
    /// Identifier failing the format check
    InvalidId(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyName => write!(f, "name cannot be empty"),
            ValidationError::EmptyBatch => write!(f, "no room names supplied"),
            ValidationError::InvalidDesignation(d) => write!(f, "invalid designation: {:?}", d),
            ValidationError::InvalidRoomKind(k) => write!(f, "invalid room kind: {:?}", k),
            ValidationError::InvalidId(id) => write!(f, "invalid id supplied: {:?}", id),
        }
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictError {
    /// Staff requested a living space at creation
    StaffAccommodation,
    /// One or more rooms in a batch could not be created; nothing was
    RoomBatch {
        kind: ResourceKind,
        failures: Vec<RoomFailure>,
    },
    /// Target room is at capacity
    RoomFull(String),
    /// Staff can only occupy offices
    StaffIntoLivingSpace,
    /// Fellow never asked for accommodation
    AccommodationNotRequested(String),
    /// Reallocation target equals the current room; treated as a failure
    AlreadyAssigned { id: String, room: String },
}

impl fmt::Display for ConflictError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictError::StaffAccommodation => {
                write!(f, "staff cannot request a living space")
            }
            ConflictError::RoomBatch { kind, failures } => {
                write!(f, "no rooms created:")?;
                for failure in failures {
                    write!(f, " the {} at index {} {};", kind.label(), failure.index, failure.reason)?;
                }
                Ok(())
            }
            ConflictError::RoomFull(name) => write!(f, "room {:?} is full", name),
            ConflictError::StaffIntoLivingSpace => {
                write!(f, "staff cannot be moved to a living space")
            }
            ConflictError::AccommodationNotRequested(id) => {
                write!(f, "fellow {} does not want a living space", id)
            }
            ConflictError::AlreadyAssigned { id, room } => {
                write!(f, "{} is already assigned to {:?}", id, room)
            }
        }
    }
}

impl std::error::Error for ConflictError {}

/// Why one room in a `create_rooms` batch was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomFailure {
    /// Position in the submitted batch
    pub index: usize,
    pub name: String,
    pub reason: RoomFailureReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomFailureReason {
    EmptyName,
    AlreadyExists,
}

impl fmt::Display for RoomFailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomFailureReason::EmptyName => write!(f, "cannot be created due to empty name"),
            RoomFailureReason::AlreadyExists => write!(f, "already existed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotFoundError {
    UnknownId(String),
    UnknownRoom(String),
}

impl fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotFoundError::UnknownId(id) => write!(f, "id {} not found", id),
            NotFoundError::UnknownRoom(name) => write!(f, "room {:?} not found", name),
        }
    }
}

impl std::error::Error for NotFoundError {}
