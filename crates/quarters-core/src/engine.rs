//! Allocation engine - main entry point for creating, allocating, and
//! reallocating occupants and rooms

use std::collections::HashSet;
use std::io::{Read, Write};

use crate::chooser::{RandomChooser, RoomChooser};
use crate::error::{
    ConflictError, EngineError, NotFoundError, RoomFailure, RoomFailureReason, ValidationError,
};
use crate::ident;
use crate::index::AllocationIndex;
use crate::model::{Occupant, OccupantId, Resource, ResourceKind, Role};
use crate::registry::{OccupantRegistry, ResourceRegistry};

/// The allocation engine: owns both registries, the allocation index, and
/// the room-selection strategy.
///
/// One engine instance is one complete, isolated state; tests can hold
/// several side by side. Validation always completes before any mutation,
/// so a failed call leaves the engine exactly as it was (a failed
/// [`load`](Self::load) instead leaves it empty, see there).
pub struct AllocationEngine {
    resources: ResourceRegistry,
    occupants: OccupantRegistry,
    index: AllocationIndex,
    chooser: Box<dyn RoomChooser>,
}

impl AllocationEngine {
    /// Create an empty engine with the default random room chooser
    pub fn new() -> Self {
        Self::with_chooser(Box::new(RandomChooser))
    }

    /// Create an empty engine with an injected room-selection strategy
    pub fn with_chooser(chooser: Box<dyn RoomChooser>) -> Self {
        Self {
            resources: ResourceRegistry::new(),
            occupants: OccupantRegistry::new(),
            index: AllocationIndex::new(),
            chooser,
        }
    }

    // ── Room creation ──────────────────────────────────────────────────

    /// Create a batch of rooms of one kind.
    ///
    /// All-or-nothing: if any name is blank or already taken (in the
    /// registry or earlier in the batch), nothing is created and the error
    /// reports every offending item.
    pub fn create_rooms(&mut self, names: &[&str], kind: &str) -> Result<(), EngineError> {
        let kind = ResourceKind::parse(kind)?;
        if names.is_empty() {
            return Err(ValidationError::EmptyBatch.into());
        }

        let mut accepted: Vec<String> = Vec::with_capacity(names.len());
        let mut failures: Vec<RoomFailure> = Vec::new();
        for (index, raw) in names.iter().enumerate() {
            let reason = if raw.trim().is_empty() {
                Some(RoomFailureReason::EmptyName)
            } else if self.resources.exists(raw) || accepted.iter().any(|name| name == raw) {
                Some(RoomFailureReason::AlreadyExists)
            } else {
                None
            };
            match reason {
                Some(reason) => failures.push(RoomFailure {
                    index,
                    name: raw.to_string(),
                    reason,
                }),
                None => accepted.push(raw.to_string()),
            }
        }

        if !failures.is_empty() {
            return Err(ConflictError::RoomBatch { kind, failures }.into());
        }
        for name in accepted {
            self.resources.insert(Resource::new(name, kind));
        }
        Ok(())
    }

    // ── Occupant creation ──────────────────────────────────────────────

    /// Add a staff member or fellow and immediately try to allocate rooms.
    ///
    /// Every new occupant gets an office attempt; fellows who asked for
    /// accommodation also get a living-space attempt. When no room of a
    /// kind has spare capacity the occupant is parked on that kind's
    /// waiting list instead.
    pub fn add_occupant(
        &mut self,
        name: &str,
        designation: &str,
        wants_accommodation: bool,
    ) -> Result<OccupantId, EngineError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        let role = Role::parse(designation)?;
        if role == Role::Staff && wants_accommodation {
            return Err(ConflictError::StaffAccommodation.into());
        }

        let id = {
            let existing = self.occupants.ids_of(role);
            ident::generate_id(role, &existing, &mut rand::thread_rng())
        };
        let mut occupant = match role {
            Role::Staff => Occupant::new_staff(id.clone(), name),
            Role::Fellow => Occupant::new_fellow(id.clone(), name, wants_accommodation),
        };

        self.assign_available(&mut occupant, ResourceKind::Office);
        if role == Role::Fellow && wants_accommodation {
            self.assign_available(&mut occupant, ResourceKind::LivingSpace);
        }
        self.occupants.push(occupant);
        Ok(id)
    }

    /// Pick a room of `kind` with spare capacity and move the occupant in,
    /// or park them on the waiting list when none is available.
    fn assign_available(&mut self, occupant: &mut Occupant, kind: ResourceKind) -> Option<String> {
        let candidates: Vec<&str> = self
            .resources
            .of_kind(kind)
            .filter(|room| self.index.occupancy(&room.name) < room.capacity())
            .map(|room| room.name.as_str())
            .collect();
        if candidates.is_empty() {
            self.index.park(kind, occupant.id().clone());
            return None;
        }

        let pick = self.chooser.pick(candidates.len()).min(candidates.len() - 1);
        let room = candidates[pick].to_string();
        self.index.record(&room, occupant.id().clone());
        occupant.set_reference(kind, Some(room.clone()));
        Some(room)
    }

    // ── Reallocation ───────────────────────────────────────────────────

    /// Move one occupant into a specific named room.
    ///
    /// Checks run in a fixed order, each failure short-circuiting with no
    /// mutation: id format, occupant exists, room exists, room has space,
    /// role/kind compatibility, accommodation requested, and finally the
    /// no-op case (the target already being the current room is a failure,
    /// not a silent success). Only then is the move applied, atomically.
    pub fn reallocate(&mut self, raw_id: &str, room_name: &str) -> Result<(), EngineError> {
        let id = OccupantId::parse(raw_id)?;
        let occupant = self
            .occupants
            .by_id_mut(&id)
            .ok_or_else(|| NotFoundError::UnknownId(id.to_string()))?;
        let room = self
            .resources
            .by_name(room_name)
            .ok_or_else(|| NotFoundError::UnknownRoom(room_name.to_string()))?;
        let kind = room.kind;
        if self.index.occupancy(room_name) >= room.capacity() {
            return Err(ConflictError::RoomFull(room_name.to_string()).into());
        }
        match (kind, occupant.role()) {
            (ResourceKind::LivingSpace, Role::Staff) => {
                return Err(ConflictError::StaffIntoLivingSpace.into());
            }
            (ResourceKind::LivingSpace, Role::Fellow) if !occupant.wants_accommodation() => {
                return Err(ConflictError::AccommodationNotRequested(id.to_string()).into());
            }
            (ResourceKind::LivingSpace, Role::Fellow) => {}
            (ResourceKind::Office, _) => {}
        }
        if occupant.reference(kind) == Some(room_name) {
            return Err(ConflictError::AlreadyAssigned {
                id: id.to_string(),
                room: room_name.to_string(),
            }
            .into());
        }

        // All checks passed; apply the move in one go. The occupant leaves
        // exactly one place (their old room or the waiting list) and enters
        // exactly one other.
        match occupant.reference(kind).map(str::to_owned) {
            Some(previous) => self.index.remove(&previous, &id),
            None => self.index.unpark(kind, &id),
        }
        self.index.record(room_name, id.clone());
        occupant.set_reference(kind, Some(room_name.to_string()));
        Ok(())
    }

    // ── Queries ────────────────────────────────────────────────────────

    pub fn staff_count(&self) -> usize {
        self.occupants.staff_count()
    }

    pub fn fellow_count(&self) -> usize {
        self.occupants.fellow_count()
    }

    pub fn room_count(&self) -> usize {
        self.resources.len()
    }

    pub fn occupant(&self, id: &OccupantId) -> Option<&Occupant> {
        self.occupants.by_id(id)
    }

    /// All occupants, staff first
    pub fn occupants(&self) -> impl Iterator<Item = &Occupant> {
        self.occupants.iter()
    }

    pub fn room(&self, name: &str) -> Option<&Resource> {
        self.resources.by_name(name)
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Resource> {
        self.resources.iter()
    }

    /// Occupants of `room` in allocation order
    pub fn members_of(&self, room: &str) -> &[OccupantId] {
        self.index.members_of(room)
    }

    /// Occupants still waiting for an office
    pub fn unallocated_offices(&self) -> &[OccupantId] {
        self.index.unallocated(ResourceKind::Office)
    }

    /// Fellows who asked for accommodation and are still waiting
    pub fn unallocated_living_spaces(&self) -> &[OccupantId] {
        self.index.unallocated(ResourceKind::LivingSpace)
    }

    /// The allocation index, for consistency inspection
    pub fn index(&self) -> &AllocationIndex {
        &self.index
    }

    // ── Lifecycle ──────────────────────────────────────────────────────

    /// Drop every room, occupant, and index entry
    pub fn reset(&mut self) {
        self.resources.clear();
        self.occupants.clear();
        self.index.clear();
    }

    /// Write a binary snapshot of the registries to `writer`.
    ///
    /// The allocation index is not written; it is derived state.
    pub fn save<W: Write>(&self, writer: W) -> Result<(), EngineError> {
        crate::persistence::save_state(writer, &self.resources, &self.occupants)?;
        Ok(())
    }

    /// Replace all state with a snapshot read from `reader`.
    ///
    /// The engine resets *before* reading, so a failed load leaves it
    /// empty, not unchanged; callers must treat a load error as "state is
    /// now empty". On success the allocation index is rebuilt from the
    /// loaded occupants' reference fields.
    pub fn load<R: Read>(&mut self, reader: R) -> Result<(), EngineError> {
        self.reset();
        let loaded = crate::persistence::load_state(reader)?;
        for resource in loaded.resources {
            self.resources.insert(resource);
        }
        for occupant in loaded.occupants {
            self.occupants.push(occupant);
        }
        self.index = AllocationIndex::rebuild(self.occupants.iter());
        Ok(())
    }

    /// Check invariant bookkeeping between references and the index.
    ///
    /// Exposed for tests; always true unless the engine itself is buggy.
    pub fn index_is_consistent(&self) -> bool {
        let rebuilt = AllocationIndex::rebuild(self.occupants.iter());
        let same_partition = |kind: ResourceKind| {
            let a: HashSet<&OccupantId> = self.index.unallocated(kind).iter().collect();
            let b: HashSet<&OccupantId> = rebuilt.unallocated(kind).iter().collect();
            a == b
        };
        let rooms_match = self.index.rooms().all(|(room, ids)| {
            let expected: HashSet<&OccupantId> = rebuilt.members_of(room).iter().collect();
            let actual: HashSet<&OccupantId> = ids.iter().collect();
            expected == actual
        });
        rooms_match
            && same_partition(ResourceKind::Office)
            && same_partition(ResourceKind::LivingSpace)
    }
}

impl Default for AllocationEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chooser::FirstAvailable;

    fn engine() -> AllocationEngine {
        AllocationEngine::with_chooser(Box::new(FirstAvailable))
    }

    #[test]
    fn test_empty_engine() {
        let engine = AllocationEngine::new();
        assert_eq!(engine.staff_count(), 0);
        assert_eq!(engine.fellow_count(), 0);
        assert_eq!(engine.room_count(), 0);
    }

    #[test]
    fn test_create_rooms_batch_is_all_or_nothing() {
        let mut engine = engine();
        engine.create_rooms(&["Blue"], "office").unwrap();

        let err = engine
            .create_rooms(&["Red", "", "Blue", "Red"], "office")
            .unwrap_err();
        match err {
            EngineError::Conflict(ConflictError::RoomBatch { failures, .. }) => {
                // Blank name, registry duplicate, and in-batch duplicate all reported.
                assert_eq!(failures.len(), 3);
                assert_eq!(failures[0].reason, RoomFailureReason::EmptyName);
                assert_eq!(failures[1].name, "Blue");
                assert_eq!(failures[2].name, "Red");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        // Nothing from the failed batch landed, not even the valid "Red".
        assert_eq!(engine.room_count(), 1);
        assert!(engine.room("Red").is_none());
    }

    #[test]
    fn test_create_rooms_rejects_unknown_kind() {
        let mut engine = engine();
        let err = engine.create_rooms(&["Blue"], "cubicle").unwrap_err();
        assert!(matches!(
            err,
            EngineError::Validation(ValidationError::InvalidRoomKind(_))
        ));
        assert_eq!(engine.room_count(), 0);
    }

    #[test]
    fn test_staff_cannot_request_accommodation() {
        let mut engine = engine();
        let err = engine.add_occupant("Amy Pond", "staff", true).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Conflict(ConflictError::StaffAccommodation)
        ));
        assert_eq!(engine.staff_count(), 0);
    }

    #[test]
    fn test_add_occupant_allocates_office() {
        let mut engine = engine();
        engine.create_rooms(&["Blue"], "office").unwrap();

        let id = engine.add_occupant("Amy Pond", "staff", false).unwrap();
        let occupant = engine.occupant(&id).unwrap();
        assert_eq!(occupant.office(), Some("Blue"));
        assert_eq!(engine.members_of("Blue"), &[id]);
        assert!(engine.unallocated_offices().is_empty());
    }

    #[test]
    fn test_fellow_waits_when_no_living_space_exists() {
        let mut engine = engine();
        engine.create_rooms(&["Blue"], "office").unwrap();

        let id = engine.add_occupant("Rory Williams", "fellow", true).unwrap();
        let occupant = engine.occupant(&id).unwrap();
        // Office assignment succeeds independently of the missing dorm.
        assert_eq!(occupant.office(), Some("Blue"));
        assert_eq!(occupant.living_space(), None);
        assert!(occupant.wants_accommodation());
        assert_eq!(engine.unallocated_living_spaces(), &[id]);
    }

    #[test]
    fn test_reallocate_from_waiting_list_unparks() {
        let mut engine = engine();
        let id = engine.add_occupant("Amy Pond", "staff", false).unwrap();
        assert_eq!(engine.unallocated_offices(), std::slice::from_ref(&id));

        engine.create_rooms(&["Blue"], "office").unwrap();
        engine.reallocate(id.as_str(), "Blue").unwrap();

        assert!(engine.unallocated_offices().is_empty());
        assert_eq!(engine.members_of("Blue"), std::slice::from_ref(&id));
        assert!(engine.index_is_consistent());
    }

    #[test]
    fn test_reallocate_validation_order() {
        let mut engine = engine();
        engine.create_rooms(&["Dorm"], "livingspace").unwrap();
        let id = engine.add_occupant("Amy Pond", "staff", false).unwrap();

        // Bad id format wins over everything else.
        assert!(matches!(
            engine.reallocate("bogus", "Dorm").unwrap_err(),
            EngineError::Validation(ValidationError::InvalidId(_))
        ));
        // Unknown occupant beats unknown room.
        assert!(matches!(
            engine.reallocate("S-ZZZZZ", "Nowhere").unwrap_err(),
            EngineError::NotFound(NotFoundError::UnknownId(_))
        ));
        // Unknown room.
        assert!(matches!(
            engine.reallocate(id.as_str(), "Nowhere").unwrap_err(),
            EngineError::NotFound(NotFoundError::UnknownRoom(_))
        ));
        // Staff into a living space.
        assert!(matches!(
            engine.reallocate(id.as_str(), "Dorm").unwrap_err(),
            EngineError::Conflict(ConflictError::StaffIntoLivingSpace)
        ));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut engine = engine();
        engine.create_rooms(&["Blue"], "office").unwrap();
        engine.add_occupant("Amy Pond", "staff", false).unwrap();

        engine.reset();
        assert_eq!(engine.room_count(), 0);
        assert_eq!(engine.staff_count(), 0);
        assert!(engine.members_of("Blue").is_empty());
    }
}
