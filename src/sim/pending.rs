//! Impacts staged during a tick
//!
//! Contacts are collected while balls move and resolved together once every
//! ball has finished, so a brick hit twice in one tick is only resolved once.

use serde::{Deserialize, Serialize};

use super::grid::{Coord, Side};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PendingImpacts {
    /// First-staged order, latest side per coordinate
    entries: Vec<(Coord, Side)>,
}

impl PendingImpacts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a hit. Re-staging a coordinate keeps its slot and overwrites the side.
    pub fn stage(&mut self, coord: Coord, side: Side) {
        match self.entries.iter_mut().find(|(c, _)| *c == coord) {
            Some(entry) => entry.1 = side,
            None => self.entries.push((coord, side)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn side_for(&self, coord: Coord) -> Option<Side> {
        self.entries.iter().find(|(c, _)| *c == coord).map(|&(_, s)| s)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Take every staged impact in staging order, leaving the queue empty
    pub fn drain(&mut self) -> Vec<(Coord, Side)> {
        std::mem::take(&mut self.entries)
    }
}
