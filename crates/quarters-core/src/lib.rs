//! Quarters Core - Office and Living-Space Allocation Engine
//!
//! Tracks two kinds of room (offices, capacity 6, and living spaces,
//! capacity 4) and two kinds of occupant (staff and fellows), assigning
//! occupants to rooms at creation time and moving them on request.
//!
//! # Architecture
//!
//! One [`AllocationEngine`](engine::AllocationEngine) instance owns the
//! whole state:
//! - **Registries**: the rooms and the staff/fellow populations
//! - **Allocation index**: room → occupants plus the waiting lists, always
//!   derivable from the occupants' own room references
//! - **Chooser**: the injected strategy deciding which available room a new
//!   occupant lands in (random by default)
//!
//! # Example
//!
//! ```rust
//! use quarters_core::prelude::*;
//!
//! let mut engine = AllocationEngine::new();
//! engine.create_rooms(&["Blue", "Red"], "office").unwrap();
//!
//! let id = engine.add_occupant("Amy Pond", "staff", false).unwrap();
//! assert!(engine.occupant(&id).unwrap().office().is_some());
//!
//! engine.reallocate(id.as_str(), "Red").ok();
//! ```

pub mod chooser;
pub mod engine;
pub mod error;
pub mod ident;
pub mod index;
pub mod model;
pub mod persistence;
pub mod registry;
pub mod roster;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::chooser::{FirstAvailable, RandomChooser, RoomChooser, SeededChooser};
    pub use crate::engine::AllocationEngine;
    pub use crate::error::EngineError;
    pub use crate::model::{Occupant, OccupantId, Resource, ResourceKind, Role};
    pub use crate::roster::load_roster;
}
