//! Fixed timestep simulation tick
//!
//! Per tick: move every ball and stage its wall contact, then resolve all
//! staged impacts at once and react to any power-ups they released.

use super::grid::Side;
use super::registry::{BrickKind, PowerUpKind};
use super::state::{Ball, MatchState};

/// Advance the match by one fixed timestep
pub fn tick(state: &mut MatchState, dt: f32) {
    if state.winner.is_some() {
        return;
    }
    state.time_ticks += 1;

    let (width, height) = {
        let geometry = state.wall.geometry();
        (geometry.surface_width, geometry.surface_height)
    };

    // All balls move and stage before any brick changes
    for ball in &mut state.balls {
        ball.advance(dt, width);
        state.wall.stage_collision(ball);
    }

    // Balls past the top or bottom edge got by a defender
    state
        .balls
        .retain(|b| b.pos.y + b.radius >= 0.0 && b.pos.y - b.radius <= height);

    let outcomes = state.wall.resolve_all_pending_impacts();
    for outcome in &outcomes {
        if let (Some(kind), Some(side)) = (outcome.kind(), outcome.side()) {
            apply_kind(state, side, kind);
        }
    }
    state.events = state.wall.drain_events();

    for side in [Side::Near, Side::Far] {
        if state.balls_for(side) == 0 {
            state.serve(side);
        }
    }
    state.normalize_order();

    if let Some(winner) = state.wall.check_winner() {
        log::info!(
            "{:?} wins at tick {}: wall reached row {} at {:?}",
            winner.side,
            state.time_ticks,
            winner.coord.row,
            winner.coord
        );
        state.winner = Some(winner);
    }
}

/// React to a kind released by `side`'s hit
fn apply_kind(state: &mut MatchState, side: Side, kind: BrickKind) {
    match kind {
        BrickKind::PowerUp(PowerUpKind::ExtraBall) => {
            let Some(source) = state.balls.iter().rev().find(|b| b.side == side).cloned() else {
                return;
            };
            let id = state.next_entity_id();
            let mut vel = source.vel;
            vel.x = -vel.x;
            state.balls.push(Ball { id, vel, ..source });
            log::debug!("{:?} gained ball {}", side, id);
        }
        BrickKind::PowerUp(PowerUpKind::RemoveBall) => {
            let opponent = side.opposite();
            if state.balls_for(opponent) > 1 {
                if let Some(idx) = state.balls.iter().rposition(|b| b.side == opponent) {
                    let removed = state.balls.remove(idx);
                    log::debug!("{:?} lost ball {}", opponent, removed.id);
                }
            }
        }
        BrickKind::PowerUp(kind @ (PowerUpKind::GrowPaddle | PowerUpKind::ShrinkPaddle)) => {
            // Paddles live outside the simulation; the KindStruck event carries this
            log::debug!("{:?} triggered {:?}", side, kind);
        }
        BrickKind::Activation => {
            log::info!("{:?} struck the activation brick", side);
        }
    }
}
