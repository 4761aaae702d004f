//! Brick Breaker - a classic brick-breaking arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, power-ups, particles, game state)
//! - `game`: Session controller that drives the simulation and fans events out to a platform
//! - `platform`: Presentation port (render, audio, HUD text, high score storage)
//! - `renderer`: Turns a game state into draw calls on a render sink
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

pub mod audio;
pub mod game;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Play field dimensions
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Paddle defaults - rests on the bottom edge of the field
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    /// Serve height, measured up from the bottom edge
    pub const BALL_SERVE_OFFSET: f32 = 30.0;

    /// Brick grid layout
    pub const BRICK_ROWS: usize = 5;
    pub const BRICK_COLUMNS: usize = 8;
    pub const BRICK_WIDTH: f32 = 75.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_PADDING: f32 = 10.0;
    pub const BRICK_OFFSET_TOP: f32 = 30.0;
    pub const BRICK_OFFSET_LEFT: f32 = 30.0;

    /// Falling power-up drop radius
    pub const DROP_RADIUS: f32 = 8.0;
}
