//! Wall repair search
//!
//! After a removal severs the wall, bricks are grown around the hole until
//! the near and far boundaries are linked again. Candidates, in priority
//! order: the two cells one row toward the struck side's push direction
//! ("mortar"), then the same-row left and right cells.
//!
//! The search runs in two passes:
//! 1. Individual: place one candidate at a time, keep it if the wall
//!    reconnects, otherwise roll it back.
//! 2. Collective: place candidates cumulatively, stopping once reconnected.

use rand::Rng;

use super::grid::{Coord, Side, WallGeometry};
use super::registry::{Brick, BrickKind, BrickRegistry};
use super::topology::{Span, analyze};

/// Repair candidates for a hole at `removed` struck from `side`
pub fn candidates(removed: Coord, side: Side) -> [Coord; 4] {
    let [mortar_a, mortar_b] = removed.vertical_neighbors(side.push_direction());
    [
        mortar_a,
        mortar_b,
        Coord::new(removed.row, removed.col - 1),
        Coord::new(removed.row, removed.col + 1),
    ]
}

/// Where the search currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Trying candidate `n` on its own
    Individual(usize),
    /// Keeping candidate `n` alongside earlier ones
    Collective(usize),
    /// Search finished; `true` if the wall reconnected
    Done(bool),
}

/// Result of a finished search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairOutcome {
    pub reconnected: bool,
    /// Bricks left in place, in placement order
    pub added: Vec<Coord>,
    /// Span after any widening from kept bricks
    pub span: Span,
}

pub struct RepairSearch<'a, R: Rng> {
    registry: &'a mut BrickRegistry,
    geometry: &'a WallGeometry,
    rng: &'a mut R,
    power_up_chance: f64,
    candidates: [Coord; 4],
    span: Span,
    added: Vec<Coord>,
    phase: Phase,
}

impl<'a, R: Rng> RepairSearch<'a, R> {
    pub fn new(
        registry: &'a mut BrickRegistry,
        geometry: &'a WallGeometry,
        rng: &'a mut R,
        power_up_chance: f64,
        removed: Coord,
        side: Side,
        span: Span,
    ) -> Self {
        Self {
            registry,
            geometry,
            rng,
            power_up_chance,
            candidates: candidates(removed, side),
            span,
            added: Vec::new(),
            phase: Phase::Individual(0),
        }
    }

    /// Run to completion. Bounded by two passes over four candidates.
    pub fn run(mut self) -> RepairOutcome {
        while !matches!(self.phase, Phase::Done(_)) {
            self.step();
        }
        RepairOutcome {
            reconnected: self.phase == Phase::Done(true),
            added: self.added,
            span: self.span,
        }
    }

    /// Advance one transition
    pub fn step(&mut self) -> Phase {
        self.phase = match self.phase {
            Phase::Individual(n) => self.trial(n),
            Phase::Collective(n) => self.accumulate(n),
            done @ Phase::Done(_) => done,
        };
        self.phase
    }

    fn trial(&mut self, n: usize) -> Phase {
        let Some(&coord) = self.candidates.get(n) else {
            return Phase::Collective(0);
        };
        if !self.place(coord) {
            return Phase::Individual(n + 1);
        }

        let trial_span = self.span.including(coord.col);
        if analyze(self.registry, trial_span) {
            log::debug!("Repair at {:?} reconnected the wall", coord);
            self.span = trial_span;
            self.added.push(coord);
            Phase::Done(true)
        } else {
            self.registry.remove(coord);
            Phase::Individual(n + 1)
        }
    }

    fn accumulate(&mut self, n: usize) -> Phase {
        let Some(&coord) = self.candidates.get(n) else {
            return Phase::Done(false);
        };
        if !self.place(coord) {
            return Phase::Collective(n + 1);
        }

        self.span = self.span.including(coord.col);
        self.added.push(coord);
        if analyze(self.registry, self.span) {
            log::debug!("Collective repair of {} bricks reconnected the wall", self.added.len());
            Phase::Done(true)
        } else {
            Phase::Collective(n + 1)
        }
    }

    /// Put a fresh brick at `coord`; false if the cell is taken
    fn place(&mut self, coord: Coord) -> bool {
        if self.registry.contains(coord) {
            return false;
        }
        let kind = BrickKind::roll(&mut *self.rng, self.power_up_chance);
        self.registry.insert(Brick::new(coord, kind, self.geometry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WallConfig;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn setup(coords: &[Coord]) -> (BrickRegistry, WallGeometry) {
        let geometry = WallGeometry::new(480.0, 320.0, &WallConfig::default());
        let mut registry = BrickRegistry::new();
        for &coord in coords {
            registry.insert(Brick::new(coord, None, &geometry));
        }
        (registry, geometry)
    }

    fn ribbon_without(row: i32, cols: std::ops::RangeInclusive<i32>, hole: i32) -> Vec<Coord> {
        cols.filter(|&c| c != hole).map(|c| Coord::new(row, c)).collect()
    }

    #[test]
    fn test_candidate_order() {
        // Even row, near strike pushes down to row 5
        assert_eq!(
            candidates(Coord::new(4, 3), Side::Near),
            [Coord::new(5, 2), Coord::new(5, 3), Coord::new(4, 2), Coord::new(4, 4)]
        );
        // Odd row, far strike pushes up to row 4
        assert_eq!(
            candidates(Coord::new(5, 3), Side::Far),
            [Coord::new(4, 3), Coord::new(4, 4), Coord::new(5, 2), Coord::new(5, 4)]
        );
    }

    #[test]
    fn test_single_candidate_repair() {
        // Shelf brick at (5, 2) means (5, 3) alone bridges the hole
        let mut coords = ribbon_without(4, 0..=9, 3);
        coords.push(Coord::new(5, 2));
        let (mut registry, geometry) = setup(&coords);
        let mut rng = Pcg32::seed_from_u64(3);
        let span = Span::new(0, 9);
        assert!(!analyze(&mut registry, span));

        let outcome =
            RepairSearch::new(&mut registry, &geometry, &mut rng, 0.0, Coord::new(4, 3), Side::Near, span).run();

        assert!(outcome.reconnected);
        assert_eq!(outcome.added, vec![Coord::new(5, 3)]);
        assert_eq!(registry.len(), coords.len() + 1);
        assert!(analyze(&mut registry, span));
    }

    #[test]
    fn test_flat_ribbon_needs_collective_pass() {
        let coords = ribbon_without(4, 0..=9, 5);
        let (mut registry, geometry) = setup(&coords);
        let mut rng = Pcg32::seed_from_u64(3);
        let span = Span::new(0, 9);

        let outcome =
            RepairSearch::new(&mut registry, &geometry, &mut rng, 0.0, Coord::new(4, 5), Side::Near, span).run();

        assert!(outcome.reconnected);
        // Both mortar cells are needed to bridge a one-wide ribbon
        assert_eq!(outcome.added, vec![Coord::new(5, 4), Coord::new(5, 5)]);
        assert!(analyze(&mut registry, span));
    }

    #[test]
    fn test_failed_trials_are_rolled_back() {
        let coords = ribbon_without(4, 0..=9, 5);
        let (mut registry, geometry) = setup(&coords);
        let mut rng = Pcg32::seed_from_u64(3);
        let mut search = RepairSearch::new(
            &mut registry,
            &geometry,
            &mut rng,
            0.0,
            Coord::new(4, 5),
            Side::Near,
            Span::new(0, 9),
        );

        assert_eq!(search.step(), Phase::Individual(1));
        assert_eq!(search.step(), Phase::Individual(2));
        // Same-row neighbours are occupied
        assert_eq!(search.step(), Phase::Individual(3));
        assert_eq!(search.step(), Phase::Individual(4));
        assert_eq!(search.step(), Phase::Collective(0));
        assert_eq!(search.step(), Phase::Collective(1));
        assert_eq!(search.step(), Phase::Done(true));
        assert_eq!(search.step(), Phase::Done(true));
    }

    #[test]
    fn test_exhausted_search_reports_failure() {
        // Far half of the wall is missing; nothing local can bridge it
        let (mut registry, geometry) = setup(&ribbon_without(4, 0..=4, 2));
        let mut rng = Pcg32::seed_from_u64(3);
        let outcome = RepairSearch::new(
            &mut registry,
            &geometry,
            &mut rng,
            0.0,
            Coord::new(4, 2),
            Side::Far,
            Span::new(0, 9),
        )
        .run();

        assert!(!outcome.reconnected);
        assert_eq!(outcome.added, vec![Coord::new(3, 1), Coord::new(3, 2)]);
    }

    #[test]
    fn test_repair_at_boundary_widens_span() {
        // Left-most brick removed: the same-row left cell sits outside the span
        let coords = ribbon_without(4, 0..=9, 0);
        let (mut registry, geometry) = setup(&coords);
        let mut rng = Pcg32::seed_from_u64(3);
        let outcome = RepairSearch::new(
            &mut registry,
            &geometry,
            &mut rng,
            0.0,
            Coord::new(4, 0),
            Side::Near,
            Span::new(0, 9),
        )
        .run();

        assert!(outcome.reconnected);
        // (5, -1) alone only touches the hole, (5, 0) reaches column 1
        assert_eq!(outcome.added, vec![Coord::new(5, 0)]);
        assert_eq!(outcome.span, Span::new(0, 9));
    }
}
