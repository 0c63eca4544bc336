//! Occupant identifier generation

use crate::model::{OccupantId, Role};
use rand::Rng;
use std::collections::HashSet;

const ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const SUFFIX_LEN: usize = 5;

/// Generate a fresh identifier for `role`: the role prefix plus five
/// characters drawn uniformly from `A-Z0-9`.
///
/// Candidates colliding with `existing` are rejected and redrawn, so
/// termination is probabilistic rather than structurally capped. The suffix
/// space holds 36^5 ids per role, which keeps redraws negligible at any
/// realistic population size; this is an accepted trade-off, not a retry
/// bug. `existing` should contain only ids of the same role, since
/// uniqueness is per variant.
pub fn generate_id(role: Role, existing: &HashSet<&str>, rng: &mut impl Rng) -> OccupantId {
    loop {
        let mut id = String::with_capacity(role.prefix().len() + SUFFIX_LEN);
        id.push_str(role.prefix());
        for _ in 0..SUFFIX_LEN {
            id.push(ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char);
        }
        if !existing.contains(id.as_str()) {
            return OccupantId::from_raw(id);
        }
    }
}
