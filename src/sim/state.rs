//! Game state and core simulation types
//!
//! Everything one session needs lives in [`GameState`]; the tick functions
//! take it by `&mut` so several sessions can run side by side.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::bricks::BrickField;
use super::particles::Particle;
use super::physics;
use super::powerups::{EffectQueue, PowerUpDrop, PowerUpKind};
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting behind the start overlay
    Ready,
    /// Active gameplay
    Playing,
    /// Ticks are suspended, nothing is reset
    Paused,
    /// Out of lives (terminal)
    GameOver,
    /// Cleared the last level (terminal)
    Victory,
}

impl GamePhase {
    /// Terminal phases need a fresh session to continue
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Victory)
    }
}

/// Simple RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS hex form (`#rrggbb`)
    pub fn css(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            radius: BALL_RADIUS,
        }
    }

    /// Position after this tick's velocity is applied
    pub fn projected(&self) -> Vec2 {
        self.pos + self.vel
    }
}

/// The player's paddle, resting on the bottom edge
#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            x: (CANVAS_WIDTH - PADDLE_WIDTH) / 2.0,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
        }
    }
}

impl Paddle {
    /// Top edge of the paddle band
    pub fn top(&self) -> f32 {
        CANVAS_HEIGHT - self.height
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn center(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Strictly inside the paddle's horizontal span
    pub fn spans(&self, x: f32) -> bool {
        x > self.x && x < self.right()
    }

    /// Move by `dx`, staying inside the field
    pub fn nudge(&mut self, dx: f32) {
        self.x = (self.x + dx).clamp(0.0, (CANVAS_WIDTH - self.width).max(0.0));
    }

    /// Center the paddle on `x`, staying inside the field
    pub fn center_on(&mut self, x: f32) {
        self.x = (x - self.width / 2.0).clamp(0.0, (CANVAS_WIDTH - self.width).max(0.0));
    }

    /// Resize around the current center
    pub fn resize(&mut self, width: f32) {
        let center = self.center();
        self.width = width;
        self.center_on(center);
    }
}

/// Something that happened during a tick, for sound/HUD fan-out
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A brick was hit and destroyed
    BrickDestroyed { column: usize, row: usize },
    /// A tagged brick released a drop
    DropSpawned(PowerUpKind),
    /// The paddle caught a drop
    PowerUpCollected(PowerUpKind),
    /// A scheduled reversal fired
    EffectExpired(PowerUpKind),
    /// Ball missed the paddle
    LifeLost { lives_left: u8 },
    /// Field cleared, next level begins
    LevelUp { level: u32 },
    GameOver,
    Victory,
}

/// Complete state of one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Balance knobs this session runs with
    pub tuning: Tuning,
    /// Seed the session was created with
    pub seed: u64,
    /// Session RNG (power-up tags, serve direction, particles)
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub score: u64,
    /// Score at the start of the current level
    pub level_start_score: u64,
    pub lives: u8,
    /// Current level (1-based)
    pub level: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Wall clock of the most recent tick
    pub now_ms: f64,
    pub paddle: Paddle,
    pub ball: Ball,
    pub bricks: BrickField,
    pub drops: Vec<PowerUpDrop>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Whether brick bursts emit particles
    pub particles_enabled: bool,
    /// Pending power-up reversals
    pub effects: EffectQueue,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a session waiting in [`GamePhase::Ready`]
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let bricks = BrickField::generate(BRICK_COLUMNS, BRICK_ROWS, tuning.power_up_chance, &mut rng);
        let vel = physics::serve_velocity(1, &tuning, &mut rng);

        Self {
            lives: tuning.starting_lives,
            tuning,
            seed,
            rng,
            phase: GamePhase::Ready,
            score: 0,
            level_start_score: 0,
            level: 1,
            time_ticks: 0,
            now_ms: 0.0,
            paddle: Paddle::default(),
            ball: Ball::new(physics::serve_position(), vel),
            bricks,
            drops: Vec::new(),
            particles: Vec::new(),
            particles_enabled: true,
            effects: EffectQueue::default(),
            events: Vec::new(),
        }
    }

    pub fn is_started(&self) -> bool {
        self.phase != GamePhase::Ready
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Bricks destroyed so far in the current level
    pub fn level_score(&self) -> u64 {
        self.score - self.level_start_score
    }

    /// Put ball and paddle back on the serve spot for the current level.
    ///
    /// Pending effect reversals are cancelled and the paddle returns to its
    /// base width, so nothing scheduled before the reset can touch the new serve.
    pub fn reset_serve(&mut self) {
        let cancelled = self.effects.clear();
        if cancelled > 0 {
            log::debug!("Cancelled {} pending effect reversals", cancelled);
        }
        self.paddle = Paddle::default();
        let vel = physics::serve_velocity(self.level, &self.tuning, &mut self.rng);
        self.ball = Ball::new(physics::serve_position(), vel);
    }

    /// Build a fresh field for the current level and serve. Drops still
    /// falling from the previous field are discarded.
    pub fn begin_level(&mut self) {
        self.drops.clear();
        self.bricks = BrickField::generate(
            BRICK_COLUMNS,
            BRICK_ROWS,
            self.tuning.power_up_chance,
            &mut self.rng,
        );
        self.level_start_score = self.score;
        self.reset_serve();
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_waits_for_start() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::Ready);
        assert!(!state.is_started());
        assert_eq!(state.lives, 3);
        assert_eq!(state.level, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.bricks.active_count(), BRICK_ROWS * BRICK_COLUMNS);
    }

    #[test]
    fn test_paddle_clamps_to_field() {
        let mut paddle = Paddle::default();
        paddle.nudge(-10_000.0);
        assert_eq!(paddle.x, 0.0);
        paddle.nudge(10_000.0);
        assert_eq!(paddle.x, CANVAS_WIDTH - PADDLE_WIDTH);
        paddle.center_on(400.0);
        assert_eq!(paddle.x, 350.0);
    }

    #[test]
    fn test_paddle_resize_keeps_center() {
        let mut paddle = Paddle::default();
        let center = paddle.center();
        paddle.resize(150.0);
        assert_eq!(paddle.width, 150.0);
        assert!((paddle.center() - center).abs() < 0.001);
    }

    #[test]
    fn test_paddle_span_is_strict() {
        let paddle = Paddle::default();
        assert!(!paddle.spans(paddle.x));
        assert!(paddle.spans(paddle.x + 1.0));
        assert!(!paddle.spans(paddle.right()));
    }

    #[test]
    fn test_color_css() {
        assert_eq!(Color::rgb(0, 149, 221).css(), "#0095dd");
    }

    #[test]
    fn test_reset_serve_cancels_effects() {
        let mut state = GameState::new(1);
        state.effects.schedule(PowerUpKind::Expand, 500.0);
        state.paddle.resize(150.0);
        state.reset_serve();
        assert!(state.effects.is_empty());
        assert_eq!(state.paddle, Paddle::default());
        assert_eq!(state.ball.pos, physics::serve_position());
    }
}
