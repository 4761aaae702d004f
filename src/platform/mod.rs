//! Platform abstraction layer
//!
//! The game controller talks to the outside world only through these traits:
//! - `RenderSink`: primitive 2D drawing
//! - `AudioSink`: sound cues
//! - `HudSink`: score/lives/level text and end-of-game announcements
//! - `ScoreStore`: the persisted high score
//!
//! `headless` records everything for tests and the native runner; `web`
//! drives a canvas, the DOM and Web Audio in the browser.

use glam::Vec2;

use crate::audio::SoundCue;
use crate::sim::Color;

pub mod headless;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use headless::{DrawCall, RecordingPlatform};

/// Primitive drawing in field coordinates (origin top-left, y down)
pub trait RenderSink {
    /// Wipe the whole field
    fn clear(&mut self, width: f32, height: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color);
}

pub trait AudioSink {
    /// `volume` is already resolved against mute (0.0 = silent)
    fn play(&mut self, cue: SoundCue, volume: f32);
}

/// Values shown in the text HUD
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hud {
    pub score: u64,
    pub lives: u8,
    pub level: u32,
    pub high_score: u64,
}

pub trait HudSink {
    fn show(&mut self, hud: &Hud);
    /// One-off message, e.g. game over
    fn announce(&mut self, message: &str);
}

/// Persisted high score. Implementations log and fall back to 0 on failure.
pub trait ScoreStore {
    fn load_high_score(&mut self) -> u64;
    fn save_high_score(&mut self, score: u64);
}

/// Everything a game session needs from its host
pub trait Platform: RenderSink + AudioSink + HudSink + ScoreStore {}

impl<T: RenderSink + AudioSink + HudSink + ScoreStore> Platform for T {}
