//! Canvas-style 2D rendering
//!
//! Draws a game state as filled rects and circles onto any `RenderSink`.
//! Back to front: bricks, drops, particles, ball, paddle.

pub mod palette;

use glam::Vec2;

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH, DROP_RADIUS};
use crate::platform::RenderSink;
use crate::sim::GameState;

/// Draw one full frame
pub fn draw_frame<R: RenderSink + ?Sized>(state: &GameState, sink: &mut R) {
    sink.clear(CANVAS_WIDTH, CANVAS_HEIGHT);

    for brick in state.bricks.iter().filter(|b| b.is_active()) {
        sink.fill_rect(brick.pos, brick.size, palette::PRIMARY);
    }

    for drop in &state.drops {
        sink.fill_circle(drop.pos, DROP_RADIUS, palette::drop_color(drop.kind));
    }

    for particle in &state.particles {
        sink.fill_circle(particle.pos, particle.radius, particle.color);
    }

    sink.fill_circle(state.ball.pos, state.ball.radius, palette::PRIMARY);

    let paddle = &state.paddle;
    sink.fill_rect(
        Vec2::new(paddle.x, paddle.top()),
        Vec2::new(paddle.width, paddle.height),
        palette::PRIMARY,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{DrawCall, RecordingPlatform};
    use crate::sim::{GamePhase, PowerUpDrop, PowerUpKind};

    #[test]
    fn test_fresh_field() {
        let state = GameState::new(3);
        let mut platform = RecordingPlatform::new();
        draw_frame(&state, &mut platform);

        assert_eq!(
            platform.draws[0],
            DrawCall::Clear {
                width: CANVAS_WIDTH,
                height: CANVAS_HEIGHT
            }
        );
        // 40 bricks + paddle
        assert_eq!(platform.rects().count(), 41);
        // Ball only
        assert_eq!(platform.circles().count(), 1);
        assert_eq!(
            platform.draws.last(),
            Some(&DrawCall::Rect {
                origin: Vec2::new(350.0, 590.0),
                size: Vec2::new(100.0, 10.0),
                color: palette::PRIMARY,
            })
        );
    }

    #[test]
    fn test_destroyed_bricks_not_drawn() {
        let mut state = GameState::new(3);
        state.phase = GamePhase::Playing;
        state.bricks.destroy(0, 0);
        state.bricks.destroy(4, 2);
        let mut platform = RecordingPlatform::new();
        draw_frame(&state, &mut platform);
        assert_eq!(platform.rects().count(), 39);
    }

    #[test]
    fn test_drops_use_kind_color() {
        let mut state = GameState::new(3);
        state
            .drops
            .push(PowerUpDrop::new(PowerUpKind::Shrink, Vec2::new(100.0, 200.0), 2.0));
        let mut platform = RecordingPlatform::new();
        draw_frame(&state, &mut platform);

        assert!(platform.draws.contains(&DrawCall::Circle {
            center: Vec2::new(100.0, 200.0),
            radius: DROP_RADIUS,
            color: palette::drop_color(PowerUpKind::Shrink),
        }));
    }
}
