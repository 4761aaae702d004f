//! Ball integration and wall reflection
//!
//! One tick moves the ball by exactly one velocity step. Reflections look at
//! the projected position so the ball never renders past a wall.

use glam::Vec2;
use rand::Rng;

use super::state::Ball;
use crate::consts::*;
use crate::tuning::Tuning;

/// Which axes a wall check reflected
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reflection {
    pub x: bool,
    pub y: bool,
}

impl Reflection {
    pub fn any(&self) -> bool {
        self.x || self.y
    }
}

/// Serve spot: horizontally centered, just above the paddle
pub fn serve_position() -> Vec2 {
    Vec2::new(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT - BALL_SERVE_OFFSET)
}

/// Serve velocity for a level: `base + level` per axis, random horizontal
/// sign, always heading up.
pub fn serve_velocity<R: Rng + ?Sized>(level: u32, tuning: &Tuning, rng: &mut R) -> Vec2 {
    let speed = tuning.serve_speed(level);
    let dx = if rng.random_bool(0.5) { speed } else { -speed };
    Vec2::new(dx, -speed)
}

/// Advance the ball by one velocity step
#[inline]
pub fn integrate(ball: &mut Ball) {
    ball.pos += ball.vel;
}

/// Reflect off the left, right and top walls.
///
/// At most one reflection per axis per tick. The bottom edge is left to the
/// paddle/miss logic.
pub fn reflect_walls(ball: &mut Ball, width: f32) -> Reflection {
    let next = ball.projected();
    let mut reflection = Reflection::default();

    if next.x > width - ball.radius || next.x < ball.radius {
        ball.vel.x = -ball.vel.x;
        reflection.x = true;
    }
    if next.y < ball.radius {
        ball.vel.y = -ball.vel.y;
        reflection.y = true;
    }

    reflection
}

/// Whether this tick's step would carry the ball past the bottom edge
pub fn crosses_bottom(ball: &Ball, height: f32) -> bool {
    ball.projected().y > height - ball.radius
}
