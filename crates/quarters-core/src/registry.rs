//! Registries owning the resource and occupant populations

use crate::model::{Occupant, OccupantId, Resource, ResourceKind, Role};
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::collections::HashSet;

/// Owns every resource, keyed by its globally unique name.
///
/// Sorted iteration keeps allocation candidate order deterministic, which
/// seeded choosers rely on.
#[derive(Debug, Default)]
pub struct ResourceRegistry {
    rooms: BTreeMap<String, Resource>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Exact-name membership check
    pub fn exists(&self, name: &str) -> bool {
        self.rooms.contains_key(name)
    }

    pub fn by_name(&self, name: &str) -> Option<&Resource> {
        self.rooms.get(name)
    }

    /// Callers must have established name uniqueness first
    pub(crate) fn insert(&mut self, resource: Resource) {
        self.rooms.insert(resource.name.clone(), resource);
    }

    pub fn iter(&self) -> btree_map::Values<'_, String, Resource> {
        self.rooms.values()
    }

    pub fn of_kind(&self, kind: ResourceKind) -> impl Iterator<Item = &Resource> {
        self.rooms.values().filter(move |r| r.kind == kind)
    }

    pub(crate) fn clear(&mut self) {
        self.rooms.clear();
    }
}

/// Owns the staff and fellow populations in insertion order
#[derive(Debug, Default)]
pub struct OccupantRegistry {
    staff: Vec<Occupant>,
    fellows: Vec<Occupant>,
}

impl OccupantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn staff(&self) -> &[Occupant] {
        &self.staff
    }

    pub fn fellows(&self) -> &[Occupant] {
        &self.fellows
    }

    pub fn staff_count(&self) -> usize {
        self.staff.len()
    }

    pub fn fellow_count(&self) -> usize {
        self.fellows.len()
    }

    /// All occupants, staff first
    pub fn iter(&self) -> impl Iterator<Item = &Occupant> {
        self.staff.iter().chain(self.fellows.iter())
    }

    /// Ids already issued for `role`, for collision checks
    pub fn ids_of(&self, role: Role) -> HashSet<&str> {
        let list = match role {
            Role::Staff => &self.staff,
            Role::Fellow => &self.fellows,
        };
        list.iter().map(|o| o.id().as_str()).collect()
    }

    pub(crate) fn push(&mut self, occupant: Occupant) {
        match occupant.role() {
            Role::Staff => self.staff.push(occupant),
            Role::Fellow => self.fellows.push(occupant),
        }
    }

    /// Lookup routed by the id prefix (`F` to fellows, `S` to staff)
    pub fn by_id(&self, id: &OccupantId) -> Option<&Occupant> {
        let list = match id.role() {
            Role::Staff => &self.staff,
            Role::Fellow => &self.fellows,
        };
        list.iter().find(|o| o.id() == id)
    }

    pub(crate) fn by_id_mut(&mut self, id: &OccupantId) -> Option<&mut Occupant> {
        let list = match id.role() {
            Role::Staff => &mut self.staff,
            Role::Fellow => &mut self.fellows,
        };
        list.iter_mut().find(|o| o.id() == id)
    }

    pub(crate) fn clear(&mut self) {
        self.staff.clear();
        self.fellows.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fellow(id: &str, name: &str) -> Occupant {
        Occupant::new_fellow(OccupantId::parse(id).unwrap(), name, false)
    }

    #[test]
    fn test_resource_registry_uniqueness_check() {
        let mut registry = ResourceRegistry::new();
        registry.insert(Resource::new("Blue", ResourceKind::Office));

        assert!(registry.exists("Blue"));
        assert!(!registry.exists("blue")); // exact string match
        assert_eq!(registry.by_name("Blue").map(|r| r.kind), Some(ResourceKind::Office));
    }

    #[test]
    fn test_of_kind_filters() {
        let mut registry = ResourceRegistry::new();
        registry.insert(Resource::new("Blue", ResourceKind::Office));
        registry.insert(Resource::new("Dorm", ResourceKind::LivingSpace));

        let offices: Vec<&str> = registry
            .of_kind(ResourceKind::Office)
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(offices, vec!["Blue"]);
    }

    #[test]
    fn test_lookup_routes_by_prefix() {
        let mut registry = OccupantRegistry::new();
        registry.push(Occupant::new_staff(
            OccupantId::parse("S-AAAAA").unwrap(),
            "Amy Pond",
        ));
        registry.push(fellow("F-AAAAA", "Rory Williams"));

        let staff_id = OccupantId::parse("s-aaaaa").unwrap();
        assert_eq!(registry.by_id(&staff_id).map(|o| o.name()), Some("Amy Pond"));

        let fellow_id = OccupantId::parse("F-AAAAA").unwrap();
        assert_eq!(
            registry.by_id(&fellow_id).map(|o| o.name()),
            Some("Rory Williams")
        );

        assert!(registry.by_id(&OccupantId::parse("S-ZZZZZ").unwrap()).is_none());
    }

    #[test]
    fn test_ids_of_is_per_variant() {
        let mut registry = OccupantRegistry::new();
        registry.push(Occupant::new_staff(
            OccupantId::parse("S-AAAAA").unwrap(),
            "Amy Pond",
        ));
        registry.push(fellow("F-BBBBB", "Rory Williams"));

        let staff_ids = registry.ids_of(Role::Staff);
        assert!(staff_ids.contains("S-AAAAA"));
        assert!(!staff_ids.contains("F-BBBBB"));
    }
}
