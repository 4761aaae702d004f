//! Per-frame simulation tick
//!
//! One call advances the session by exactly one step. Effect reversals due at
//! the input clock run first, then collisions, paddle input, ball motion,
//! drops and particles. A tick that loses a life or clears the field stops
//! right after the reset.

use super::collision::{self, BottomOutcome};
use super::particles;
use super::physics;
use super::powerups;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Left direction key held
    pub left: bool,
    /// Right direction key held
    pub right: bool,
    /// Pointer x in field coordinates (absolute paddle positioning)
    pub pointer_x: Option<f32>,
    /// Pause toggle
    pub pause: bool,
    /// Wall clock in milliseconds
    pub now_ms: f64,
}

/// Leave the start overlay: fresh field, serve, begin playing.
///
/// Returns false (and does nothing) unless the session is still `Ready`.
pub fn start(state: &mut GameState, now_ms: f64) -> bool {
    if state.phase != GamePhase::Ready {
        return false;
    }
    state.now_ms = now_ms;
    state.begin_level();
    state.phase = GamePhase::Playing;
    log::info!("Session started (seed {})", state.seed);
    true
}

/// Toggle between playing and paused; other phases ignore it
pub fn toggle_pause(state: &mut GameState) {
    state.phase = match state.phase {
        GamePhase::Playing => GamePhase::Paused,
        GamePhase::Paused => GamePhase::Playing,
        other => other,
    };
}

/// Advance the game state by one step
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.pause {
        toggle_pause(state);
    }

    // Only a running session advances
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;
    state.now_ms = input.now_ms;

    powerups::expire_effects(state);

    // A fresh serve starts moving on the next tick
    let resolution = collision::resolve(state);
    if resolution.field_cleared {
        advance_level(state);
        return;
    }
    if resolution.bottom == BottomOutcome::Missed {
        lose_life(state);
        return;
    }

    move_paddle(state, input);
    physics::integrate(&mut state.ball);
    powerups::advance_drops(state);
    particles::advance(&mut state.particles);
}

/// Pointer sets the paddle center outright; keys nudge it
fn move_paddle(state: &mut GameState, input: &TickInput) {
    if let Some(x) = input.pointer_x {
        state.paddle.center_on(x);
    }

    let speed = state.tuning.paddle_speed;
    if input.right {
        state.paddle.nudge(speed);
    } else if input.left {
        state.paddle.nudge(-speed);
    }
}

/// Next level, or victory once the cap is cleared
fn advance_level(state: &mut GameState) {
    if state.level >= state.tuning.level_cap {
        state.phase = GamePhase::Victory;
        state.effects.clear();
        state.events.push(GameEvent::Victory);
        log::info!("Victory with score {}", state.score);
        return;
    }

    state.level += 1;
    state.begin_level();
    state.events.push(GameEvent::LevelUp { level: state.level });
    log::info!("Level {} (score {})", state.level, state.score);
}

/// Ball went past the paddle
fn lose_life(state: &mut GameState) {
    state.lives = state.lives.saturating_sub(1);
    state.events.push(GameEvent::LifeLost {
        lives_left: state.lives,
    });

    if state.lives == 0 {
        state.phase = GamePhase::GameOver;
        state.effects.clear();
        state.events.push(GameEvent::GameOver);
        log::info!("Game over with score {}", state.score);
    } else {
        log::debug!("Life lost, {} left", state.lives);
        state.reset_serve();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::powerups::{PowerUpDrop, PowerUpKind};
    use glam::Vec2;

    fn started(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        assert!(start(&mut state, 0.0));
        state
    }

    /// Park the ball mid-field, drifting slowly, so nothing collides
    fn park_ball(state: &mut GameState) {
        state.ball.pos = Vec2::new(400.0, 400.0);
        state.ball.vel = Vec2::new(0.0, 0.5);
    }

    #[test]
    fn test_start_only_from_ready() {
        let mut state = GameState::new(1);
        assert!(start(&mut state, 0.0));
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(!start(&mut state, 10.0));
    }

    #[test]
    fn test_ready_state_does_not_tick() {
        let mut state = GameState::new(1);
        let ball = state.ball.clone();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.ball, ball);
    }

    #[test]
    fn test_ball_moves_by_velocity() {
        let mut state = started(2);
        let before = state.ball.clone();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball.pos, before.pos + before.vel);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_brick_scenario() {
        let mut state = started(3);
        state.ball.pos = Vec2::new(60.0, 40.0);
        state.ball.vel = Vec2::new(3.0, -3.0);

        tick(&mut state, &TickInput::default());

        assert!(!state.bricks.get(0, 0).unwrap().is_active());
        assert_eq!(state.score, 1);
        assert_eq!(state.ball.vel.y, 3.0);
        assert_eq!(state.ball.pos, Vec2::new(63.0, 43.0));
    }

    #[test]
    fn test_pause_freezes_everything() {
        let mut state = started(4);
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Paused);
        let frozen = state.ball.clone();
        let ticks = state.time_ticks;

        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.ball, frozen);
        assert_eq!(state.time_ticks, ticks);

        // Resuming continues from the same spot
        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.ball.pos, frozen.pos + frozen.vel);
    }

    #[test]
    fn test_last_life_scenario() {
        let mut state = started(5);
        state.lives = 1;
        state.paddle.center_on(700.0);
        state.ball.pos = Vec2::new(100.0, CANVAS_HEIGHT - 12.0);
        state.ball.vel = Vec2::new(3.0, 4.0);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.events.contains(&GameEvent::GameOver));

        let frozen = state.ball.clone();
        let ticks = state.time_ticks;
        tick(&mut state, &TickInput::default());
        tick(
            &mut state,
            &TickInput {
                pause: true,
                ..Default::default()
            },
        );
        assert_eq!(state.ball, frozen);
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_life_lost_resets_serve() {
        let mut state = started(6);
        state.paddle.center_on(700.0);
        state.ball.pos = Vec2::new(100.0, CANVAS_HEIGHT - 12.0);
        state.ball.vel = Vec2::new(3.0, 4.0);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.lives, 2);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.ball.vel.y, -4.0);
        assert_eq!(state.ball.vel.x.abs(), 4.0);
        assert_eq!(state.ball.pos, physics::serve_position());
        assert_eq!(state.paddle.x, (CANVAS_WIDTH - PADDLE_WIDTH) / 2.0);
    }

    #[test]
    fn test_life_lost_keeps_falling_drops() {
        let mut state = started(6);
        state
            .drops
            .push(PowerUpDrop::new(PowerUpKind::Shrink, Vec2::new(100.0, 300.0), 2.0));
        state.paddle.center_on(700.0);
        state.ball.pos = Vec2::new(100.0, CANVAS_HEIGHT - 12.0);
        state.ball.vel = Vec2::new(3.0, 4.0);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.lives, 2);
        assert_eq!(state.drops.len(), 1);
        assert_eq!(state.drops[0].pos, Vec2::new(100.0, 300.0));

        // Keeps falling on the next serve
        tick(&mut state, &TickInput::default());
        assert_eq!(state.drops[0].pos, Vec2::new(100.0, 302.0));
    }

    #[test]
    fn test_level_advance_discards_drops() {
        let mut state = started(8);
        state
            .drops
            .push(PowerUpDrop::new(PowerUpKind::Expand, Vec2::new(20.0, 200.0), 2.0));
        clear_level(&mut state);
        assert_eq!(state.level, 2);
        assert!(state.drops.is_empty());
    }

    #[test]
    fn test_paddle_bounce_keeps_lives() {
        let mut state = started(7);
        state.ball.pos = Vec2::new(state.paddle.center(), CANVAS_HEIGHT - 12.0);
        state.ball.vel = Vec2::new(3.0, 4.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.lives, 3);
        assert_eq!(state.ball.vel.y, -4.0);
    }

    /// Destroy every brick of the current level through the resolver
    fn clear_level(state: &mut GameState) {
        let level = state.level;
        let cells: Vec<Vec2> = state.bricks.iter().map(|b| b.center()).collect();
        for center in cells {
            state.ball.pos = center;
            state.ball.vel = Vec2::new(0.0, -0.5);
            tick(state, &TickInput::default());
            if state.level != level || state.is_terminal() {
                break;
            }
        }
    }

    #[test]
    fn test_level_advance_scenario() {
        let mut state = started(8);
        clear_level(&mut state);

        assert_eq!(state.score, (BRICK_ROWS * BRICK_COLUMNS) as u64);
        assert_eq!(state.level, 2);
        assert_eq!(state.level_score(), 0);
        assert_eq!(state.bricks.active_count(), BRICK_ROWS * BRICK_COLUMNS);
        assert_eq!(state.ball.pos, physics::serve_position());
        assert_eq!(state.ball.vel.x.abs(), 5.0);
        assert_eq!(state.ball.vel.y, -5.0);
        let level_ups = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::LevelUp { .. }))
            .count();
        assert_eq!(level_ups, 1);
    }

    #[test]
    fn test_victory_after_level_cap() {
        let mut state = started(9);
        for expected in 2..=3 {
            clear_level(&mut state);
            assert_eq!(state.level, expected);
        }
        clear_level(&mut state);
        assert_eq!(state.phase, GamePhase::Victory);
        assert_eq!(state.level, 3);
        assert_eq!(state.score, 3 * (BRICK_ROWS * BRICK_COLUMNS) as u64);
        assert!(state.events.contains(&GameEvent::Victory));

        let ticks = state.time_ticks;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_keyboard_moves_paddle() {
        let mut state = started(10);
        park_ball(&mut state);
        let x = state.paddle.x;
        tick(
            &mut state,
            &TickInput {
                right: true,
                ..Default::default()
            },
        );
        assert_eq!(state.paddle.x, x + 7.0);
        tick(
            &mut state,
            &TickInput {
                left: true,
                ..Default::default()
            },
        );
        assert_eq!(state.paddle.x, x);
    }

    #[test]
    fn test_pointer_positions_paddle() {
        let mut state = started(11);
        park_ball(&mut state);
        tick(
            &mut state,
            &TickInput {
                pointer_x: Some(200.0),
                ..Default::default()
            },
        );
        assert_eq!(state.paddle.center(), 200.0);
        tick(
            &mut state,
            &TickInput {
                pointer_x: Some(5_000.0),
                ..Default::default()
            },
        );
        assert_eq!(state.paddle.right(), CANVAS_WIDTH);
    }

    #[test]
    fn test_effect_reverts_on_wall_clock() {
        let mut state = started(12);
        park_ball(&mut state);
        state.now_ms = 500.0;
        powerups::activate(&mut state, PowerUpKind::Expand);
        assert_eq!(state.paddle.width, 150.0);

        let at = |now_ms| TickInput {
            now_ms,
            ..Default::default()
        };
        // Few ticks, lots of time: reversal follows the clock, not the tick count
        tick(&mut state, &at(5_000.0));
        assert_eq!(state.paddle.width, 150.0);
        tick(&mut state, &at(10_500.0));
        assert_eq!(state.paddle.width, 100.0);
        assert!(state.events.contains(&GameEvent::EffectExpired(PowerUpKind::Expand)));
    }

    #[test]
    fn test_effects_cancelled_on_life_loss() {
        let mut state = started(13);
        powerups::activate(&mut state, PowerUpKind::Expand);
        state.paddle.center_on(700.0);
        state.ball.pos = Vec2::new(100.0, CANVAS_HEIGHT - 12.0);
        state.ball.vel = Vec2::new(3.0, 4.0);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.lives, 2);
        assert!(state.effects.is_empty());
        assert_eq!(state.paddle.width, PADDLE_WIDTH);

        tick(
            &mut state,
            &TickInput {
                now_ms: 20_000.0,
                ..Default::default()
            },
        );
        assert_eq!(state.paddle.width, PADDLE_WIDTH);
    }

    #[test]
    fn test_determinism() {
        let mut a = started(99_999);
        let mut b = started(99_999);
        let inputs = [
            TickInput {
                right: true,
                now_ms: 16.0,
                ..Default::default()
            },
            TickInput {
                pointer_x: Some(120.0),
                now_ms: 33.0,
                ..Default::default()
            },
            TickInput {
                left: true,
                now_ms: 50.0,
                ..Default::default()
            },
        ];
        for _ in 0..200 {
            for input in &inputs {
                tick(&mut a, input);
                tick(&mut b, input);
            }
        }
        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.ball, b.ball);
        assert_eq!(a.paddle, b.paddle);
        assert_eq!(a.bricks, b.bricks);
        assert_eq!(a.score, b.score);
        assert_eq!(a.particles, b.particles);
    }
}
