//! Wall connectivity
//!
//! The wall is intact while some chain of touching bricks links the near
//! boundary column to the far boundary column. Every pass recomputes all
//! orphan flags from scratch, so calling it repeatedly is safe.

use std::collections::{BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};

use super::registry::BrickRegistry;

/// Columns the wall must keep bridged. Only ever widens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub near: i32,
    pub far: i32,
}

impl Span {
    pub const fn new(near: i32, far: i32) -> Self {
        Self { near, far }
    }

    /// This span stretched to cover `col`
    pub fn including(self, col: i32) -> Self {
        Self {
            near: self.near.min(col),
            far: self.far.max(col),
        }
    }
}

/// Flood-fill from the near boundary; true if the far boundary is reached.
///
/// Marks every brick orphaned, then clears the flag on each brick reachable
/// from a brick at or before `span.near`.
pub fn analyze(registry: &mut BrickRegistry, span: Span) -> bool {
    for brick in registry.iter_mut() {
        brick.orphan = true;
    }
    if registry.is_empty() {
        return false;
    }

    let mut queue: VecDeque<_> = registry.coords().filter(|c| c.col <= span.near).collect();
    if queue.is_empty() {
        // Breached at the near edge
        return false;
    }

    let mut visited: BTreeSet<_> = queue.iter().copied().collect();
    let mut connected = false;
    while let Some(coord) = queue.pop_front() {
        if let Some(brick) = registry.get_mut(coord) {
            brick.orphan = false;
        }
        if coord.col >= span.far {
            connected = true;
        }
        for next in coord.neighbors() {
            if registry.contains(next) && visited.insert(next) {
                queue.push_back(next);
            }
        }
    }
    connected
}
