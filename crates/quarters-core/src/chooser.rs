//! Pluggable room-selection strategies.
//!
//! The random pick during allocation is a load-spreading heuristic, not a
//! correctness requirement, so it sits behind a trait: production uses
//! [`RandomChooser`], tests swap in [`FirstAvailable`] or [`SeededChooser`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Picks which room an occupant is assigned to.
pub trait RoomChooser {
    /// Pick an index into a candidate list of `len` rooms.
    ///
    /// Callers guarantee `len >= 1` and clamp the returned index into range.
    fn pick(&mut self, len: usize) -> usize;
}

/// Uniform random choice via the thread-local rng (the default)
#[derive(Debug, Default)]
pub struct RandomChooser;

impl RoomChooser for RandomChooser {
    fn pick(&mut self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Always the first candidate, for deterministic tests
#[derive(Debug, Default)]
pub struct FirstAvailable;

impl RoomChooser for FirstAvailable {
    fn pick(&mut self, _len: usize) -> usize {
        0
    }
}

/// Uniform random choice from an owned, seeded rng, for reproducible runs
#[derive(Debug)]
pub struct SeededChooser {
    rng: StdRng,
}

impl SeededChooser {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RoomChooser for SeededChooser {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}
