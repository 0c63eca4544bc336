//! The allocation index: which occupants sit in which room, and who is
//! still waiting for one.
//!
//! The index is a derived cache over the occupants' own reference fields.
//! It is never persisted; after a load it is rebuilt wholesale with
//! [`AllocationIndex::rebuild`], so it cannot drift from the references.

use crate::model::{Occupant, OccupantId, ResourceKind};
use std::collections::BTreeMap;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct AllocationIndex {
    /// Room name → occupants in allocation order
    allocated: BTreeMap<String, Vec<OccupantId>>,
    /// Occupants with no office
    unallocated_office: Vec<OccupantId>,
    /// Fellows wanting accommodation with no living space
    unallocated_living: Vec<OccupantId>,
}

impl AllocationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current occupancy of `room`; a room with no entry is empty
    pub fn occupancy(&self, room: &str) -> usize {
        self.allocated.get(room).map_or(0, Vec::len)
    }

    /// Occupants of `room` in allocation order
    pub fn members_of(&self, room: &str) -> &[OccupantId] {
        self.allocated.get(room).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Rooms with at least one occupant
    pub fn rooms(&self) -> impl Iterator<Item = (&str, &[OccupantId])> {
        self.allocated
            .iter()
            .map(|(name, ids)| (name.as_str(), ids.as_slice()))
    }

    pub fn unallocated(&self, kind: ResourceKind) -> &[OccupantId] {
        match kind {
            ResourceKind::Office => &self.unallocated_office,
            ResourceKind::LivingSpace => &self.unallocated_living,
        }
    }

    /// Append `id` to `room`'s allocation list
    pub(crate) fn record(&mut self, room: &str, id: OccupantId) {
        self.allocated.entry(room.to_string()).or_default().push(id);
    }

    /// Remove `id` from `room`'s allocation list
    pub(crate) fn remove(&mut self, room: &str, id: &OccupantId) {
        if let Some(ids) = self.allocated.get_mut(room) {
            ids.retain(|existing| existing != id);
        }
    }

    /// Park `id` on the waiting list for `kind`
    pub(crate) fn park(&mut self, kind: ResourceKind, id: OccupantId) {
        self.unallocated_mut(kind).push(id);
    }

    /// Remove `id` from the waiting list for `kind`
    pub(crate) fn unpark(&mut self, kind: ResourceKind, id: &OccupantId) {
        self.unallocated_mut(kind).retain(|existing| existing != id);
    }

    fn unallocated_mut(&mut self, kind: ResourceKind) -> &mut Vec<OccupantId> {
        match kind {
            ResourceKind::Office => &mut self.unallocated_office,
            ResourceKind::LivingSpace => &mut self.unallocated_living,
        }
    }

    /// Reconstruct the whole index from occupant reference fields.
    ///
    /// An occupant lands in a room's list iff their matching reference
    /// names that room; occupants with no office land on the office waiting
    /// list, and fellows wanting accommodation with no living space land on
    /// the living-space waiting list.
    pub fn rebuild<'a>(occupants: impl Iterator<Item = &'a Occupant>) -> Self {
        let mut index = Self::new();
        for occupant in occupants {
            match occupant.office() {
                Some(room) => index.record(room, occupant.id().clone()),
                None => index.unallocated_office.push(occupant.id().clone()),
            }
            match occupant.living_space() {
                Some(room) => index.record(room, occupant.id().clone()),
                None if occupant.wants_accommodation() => {
                    index.unallocated_living.push(occupant.id().clone());
                }
                None => {}
            }
        }
        index
    }

    pub(crate) fn clear(&mut self) {
        self.allocated.clear();
        self.unallocated_office.clear();
        self.unallocated_living.clear();
    }
}
