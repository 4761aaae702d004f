//! Collision detection and response
//!
//! Checks run in a fixed order each tick: bricks, then side/top walls, then
//! the bottom edge. Brick hits are a plain point-in-rectangle test on the ball
//! center, and only the first brick in scan order is taken per tick.

use super::particles;
use super::physics::{self, Reflection};
use super::powerups;
use super::state::{Ball, GameEvent, GameState, Paddle};
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};

/// What happened at the bottom edge this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BottomOutcome {
    /// Ball is not about to cross the bottom edge
    Clear,
    /// Paddle was under the ball
    Bounced,
    /// Nothing under the ball
    Missed,
}

/// Outcome of one resolver pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Grid cell destroyed this tick
    pub brick: Option<(usize, usize)>,
    /// That brick was the last one standing
    pub field_cleared: bool,
    pub walls: Reflection,
    pub bottom: BottomOutcome,
}

/// Run every check in order. A cleared field ends the pass early, since the
/// level transition resets the ball anyway.
pub fn resolve(state: &mut GameState) -> Resolution {
    let brick = ball_brick_collision(state);
    let field_cleared = brick.is_some() && state.bricks.is_cleared();
    if field_cleared {
        return Resolution {
            brick,
            field_cleared,
            walls: Reflection::default(),
            bottom: BottomOutcome::Clear,
        };
    }

    let walls = ball_wall_collision(&mut state.ball, CANVAS_WIDTH);
    let bottom = ball_bottom_collision(&mut state.ball, &state.paddle, CANVAS_HEIGHT);

    Resolution {
        brick,
        field_cleared,
        walls,
        bottom,
    }
}

/// Hit the first active brick containing the ball center.
///
/// On a hit: reflect dy, destroy the brick, score it, burst particles and
/// release its power-up (if tagged).
pub fn ball_brick_collision(state: &mut GameState) -> Option<(usize, usize)> {
    let (column, row) = state.bricks.first_hit(state.ball.pos)?;
    let brick = state.bricks.destroy(column, row)?;
    let center = brick.center();
    let drop_at = brick.lower_center();
    let power_up = brick.power_up;

    state.ball.vel.y = -state.ball.vel.y;
    state.score += 1;
    state.events.push(GameEvent::BrickDestroyed { column, row });

    if state.particles_enabled {
        let burst = particles::burst(
            center,
            state.tuning.burst_size,
            state.tuning.particle_lifetime,
            &mut state.rng,
        );
        state.particles.extend(burst);
    }

    if let Some(kind) = power_up {
        powerups::spawn_drop(state, kind, drop_at);
    }

    Some((column, row))
}

/// Left/right/top walls
pub fn ball_wall_collision(ball: &mut Ball, width: f32) -> Reflection {
    physics::reflect_walls(ball, width)
}

/// Bottom edge: bounce if the paddle spans the ball, otherwise report a miss
pub fn ball_bottom_collision(ball: &mut Ball, paddle: &Paddle, height: f32) -> BottomOutcome {
    if !physics::crosses_bottom(ball, height) {
        return BottomOutcome::Clear;
    }
    if paddle.spans(ball.pos.x) {
        ball.vel.y = -ball.vel.y;
        BottomOutcome::Bounced
    } else {
        BottomOutcome::Missed
    }
}
