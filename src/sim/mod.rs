//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - One step per tick, no frame-rate dependent math
//! - Seeded RNG only
//! - Stable iteration order (column-major brick scan)
//! - Time-based effects read the clock from the tick input
//! - No rendering or platform dependencies

pub mod bricks;
pub mod collision;
pub mod particles;
pub mod physics;
pub mod powerups;
pub mod state;
pub mod tick;

pub use bricks::{Brick, BrickField, BrickStatus};
pub use collision::{BottomOutcome, Resolution};
pub use particles::Particle;
pub use powerups::{EffectQueue, PowerUpDrop, PowerUpKind};
pub use state::{Ball, Color, GameEvent, GamePhase, GameState, Paddle};
pub use tick::{TickInput, start, tick, toggle_pause};
