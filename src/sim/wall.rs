//! The wall
//!
//! Owns every brick. Balls stage contacts during a tick; once every ball has
//! moved the staged impacts are resolved in one pass: remove the brick,
//! re-check connectivity, repair if severed, then refresh inertness and
//! clamp bricks back into the row band.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision;
use super::grid::{Coord, Side, WallGeometry};
use super::inert::refresh_inertness;
use super::pending::PendingImpacts;
use super::registry::{Brick, BrickKind, BrickRegistry};
use super::repair::RepairSearch;
use super::state::{Ball, ImpactOutcome, WallEvent, Winner};
use super::topology::{Span, analyze};
use crate::config::WallConfig;

#[derive(Debug, Clone)]
pub struct Wall {
    config: WallConfig,
    geometry: WallGeometry,
    registry: BrickRegistry,
    span: Span,
    pending: PendingImpacts,
    rng: Pcg32,
    last_struck_kind: Option<BrickKind>,
    events: Vec<WallEvent>,
}

impl Wall {
    pub fn new(config: WallConfig, surface_width: f32, surface_height: f32) -> Self {
        let geometry = WallGeometry::new(surface_width, surface_height, &config);
        let mut wall = Self {
            rng: Pcg32::seed_from_u64(config.seed),
            config,
            geometry,
            registry: BrickRegistry::new(),
            span: Span::new(0, 0),
            pending: PendingImpacts::new(),
            last_struck_kind: None,
            events: Vec::new(),
        };
        wall.initialize(surface_width, surface_height);
        wall
    }

    /// Rebuild the flat starting ribbon for a surface. Clears all bricks.
    pub fn initialize(&mut self, surface_width: f32, surface_height: f32) {
        self.geometry = WallGeometry::new(surface_width, surface_height, &self.config);
        self.registry.clear();
        self.pending.clear();
        self.last_struck_kind = None;

        let buffer = self.config.edge_buffer_columns;
        let columns = self.geometry.columns;
        let row = self.geometry.center_row();
        let center_col = (columns - 1) / 2;
        for col in -buffer..=(columns - 1 + buffer) {
            let kind = (col == center_col).then_some(BrickKind::Activation);
            self.registry.insert(Brick::new(Coord::new(row, col), kind, &self.geometry));
        }
        self.span = Span::new(-buffer, columns - 1 + buffer);

        refresh_inertness(&mut self.registry, &self.geometry, self.config.inert_row_offset);
        analyze(&mut self.registry, self.span);

        log::info!(
            "Wall initialized: {}x{} surface, {} columns of {:.1}px, ribbon on row {} (limits {}..={})",
            self.geometry.surface_width,
            self.geometry.surface_height,
            columns,
            self.geometry.brick_width,
            row,
            self.geometry.near_row_limit,
            self.geometry.far_row_limit,
        );
        self.events.push(WallEvent::Initialized {
            columns,
            rows: self.geometry.rows,
        });
    }

    /// Find this ball's contact, bounce it, and queue the impact.
    /// Returns whether the ball touched a brick.
    pub fn stage_collision(&mut self, ball: &mut Ball) -> bool {
        let Some(contact) = collision::query(&self.registry, &self.geometry, ball.pos, ball.vel, ball.radius)
        else {
            return false;
        };
        contact.apply(&mut ball.pos, &mut ball.vel);
        self.pending.stage(contact.coord, ball.side);
        true
    }

    /// Resolve every staged impact in staging order
    pub fn resolve_all_pending_impacts(&mut self) -> Vec<ImpactOutcome> {
        let staged = self.pending.drain();
        if staged.is_empty() {
            return Vec::new();
        }
        let outcomes: Vec<_> = staged
            .into_iter()
            .map(|(coord, side)| self.resolve(coord, side))
            .collect();
        self.clamp_to_band();
        outcomes
    }

    /// Hit the brick at `coord` from `side`
    pub fn resolve(&mut self, coord: Coord, side: Side) -> ImpactOutcome {
        let inert = match self.registry.get(coord) {
            Some(brick) => brick.is_inert_to(side),
            None => return ImpactOutcome::Missing { coord },
        };

        if inert {
            let consumed = self.registry.get_mut(coord).and_then(|b| b.kind.take());
            log::debug!("{:?} hit on {:?} absorbed (consumed {:?})", side, coord, consumed);
            self.events.push(WallEvent::ImpactAbsorbed { coord, side });
            self.note_kind(coord, side, consumed);
            return ImpactOutcome::Absorbed { coord, side, consumed };
        }

        let kind = self.registry.remove(coord).and_then(|b| b.kind);
        log::debug!("{:?} removed {:?}", side, coord);
        self.events.push(WallEvent::BrickRemoved { coord, side });
        self.note_kind(coord, side, kind);

        if analyze(&mut self.registry, self.span) {
            refresh_inertness(&mut self.registry, &self.geometry, self.config.inert_row_offset);
            return ImpactOutcome::Removed { coord, side, kind };
        }

        let repair = RepairSearch::new(
            &mut self.registry,
            &self.geometry,
            &mut self.rng,
            self.config.power_up_chance,
            coord,
            side,
            self.span,
        )
        .run();
        self.span = repair.span;
        for &added in &repair.added {
            let added_kind = self.registry.get(added).and_then(|b| b.kind);
            self.events.push(WallEvent::BrickRepaired {
                coord: added,
                kind: added_kind,
            });
        }
        refresh_inertness(&mut self.registry, &self.geometry, self.config.inert_row_offset);

        if repair.reconnected {
            ImpactOutcome::Repaired {
                coord,
                side,
                kind,
                added: repair.added,
            }
        } else {
            log::warn!(
                "Wall still severed after repairing {:?} with {} bricks",
                coord,
                repair.added.len()
            );
            self.events.push(WallEvent::IntegrityAnomaly {
                coord,
                added: repair.added.len(),
            });
            ImpactOutcome::Severed {
                coord,
                side,
                kind,
                added: repair.added,
            }
        }
    }

    /// Re-derive row limits for a new surface height, then clamp and refresh bricks
    pub fn refresh(&mut self, surface_height: f32) {
        self.geometry.set_height(surface_height, self.config.row_margin);
        self.clamp_to_band();
        self.registry.refresh_positions(&self.geometry);
    }

    /// Pull stray bricks back onto the row limits, pruning any that collide
    fn clamp_to_band(&mut self) {
        let (lo, hi) = (self.geometry.near_row_limit, self.geometry.far_row_limit);
        let strays: Vec<Coord> = self
            .registry
            .coords()
            .filter(|c| c.row < lo || c.row > hi)
            .collect();

        for from in &strays {
            let Some(brick) = self.registry.remove(*from) else {
                continue;
            };
            let to = Coord::new(from.row.clamp(lo, hi), from.col);
            if self.registry.insert(Brick::new(to, brick.kind, &self.geometry)) {
                self.events.push(WallEvent::BrickClamped { from: *from, to });
            } else {
                log::debug!("Pruned {:?}: {:?} already occupied", from, to);
                self.events.push(WallEvent::BrickPruned { coord: *from });
            }
        }

        refresh_inertness(&mut self.registry, &self.geometry, self.config.inert_row_offset);
        if !strays.is_empty() {
            analyze(&mut self.registry, self.span);
        }
    }

    /// Breach check: a brick on a row limit hands the win to the other side
    pub fn check_winner(&self) -> Option<Winner> {
        self.registry.iter().find_map(|brick| {
            let coord = brick.coord;
            if coord.row <= self.geometry.near_row_limit {
                Some(Winner { side: Side::Far, coord })
            } else if coord.row >= self.geometry.far_row_limit {
                Some(Winner { side: Side::Near, coord })
            } else {
                None
            }
        })
    }

    /// Re-run connectivity; true if near and far boundaries are linked
    pub fn analyze(&mut self) -> bool {
        analyze(&mut self.registry, self.span)
    }

    /// Kind released by the most recent impact that carried one
    pub fn last_struck_kind(&self) -> Option<BrickKind> {
        self.last_struck_kind
    }

    pub fn take_last_struck_kind(&mut self) -> Option<BrickKind> {
        self.last_struck_kind.take()
    }

    pub fn drain_events(&mut self) -> Vec<WallEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn geometry(&self) -> &WallGeometry {
        &self.geometry
    }

    pub fn registry(&self) -> &BrickRegistry {
        &self.registry
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn config(&self) -> &WallConfig {
        &self.config
    }

    pub fn pending(&self) -> &PendingImpacts {
        &self.pending
    }

    fn note_kind(&mut self, coord: Coord, side: Side, kind: Option<BrickKind>) {
        if let Some(kind) = kind {
            self.last_struck_kind = Some(kind);
            self.events.push(WallEvent::KindStruck { coord, side, kind });
        }
    }

    /// Replace the bricks with an arbitrary layout
    #[cfg(test)]
    pub(crate) fn set_bricks(&mut self, bricks: impl IntoIterator<Item = (Coord, Option<BrickKind>)>) {
        self.registry.clear();
        for (coord, kind) in bricks {
            self.registry.insert(Brick::new(coord, kind, &self.geometry));
        }
        refresh_inertness(&mut self.registry, &self.geometry, self.config.inert_row_offset);
        analyze(&mut self.registry, self.span);
    }
}
