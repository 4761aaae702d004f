//! Headless platform that records every call

use glam::Vec2;

use super::{AudioSink, Hud, HudSink, RenderSink, ScoreStore};
use crate::audio::SoundCue;
use crate::highscores::MemoryStore;
use crate::sim::Color;

/// One recorded drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear { width: f32, height: f32 },
    Circle { center: Vec2, radius: f32, color: Color },
    Rect { origin: Vec2, size: Vec2, color: Color },
}

/// Records draw calls, cues and HUD updates instead of presenting them.
///
/// `draws` only holds the most recent frame: a `clear` starts a new one.
#[derive(Debug, Clone, Default)]
pub struct RecordingPlatform<S = MemoryStore> {
    pub draws: Vec<DrawCall>,
    pub frames: u64,
    /// Cues with the volume they were played at
    pub cues: Vec<(SoundCue, f32)>,
    pub hud: Hud,
    pub hud_updates: usize,
    pub announcements: Vec<String>,
    pub store: S,
}

impl RecordingPlatform {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: ScoreStore> RecordingPlatform<S> {
    pub fn with_store(store: S) -> Self {
        Self {
            draws: Vec::new(),
            frames: 0,
            cues: Vec::new(),
            hud: Hud::default(),
            hud_updates: 0,
            announcements: Vec::new(),
            store,
        }
    }

    /// Cues without their volume
    pub fn cue_kinds(&self) -> Vec<SoundCue> {
        self.cues.iter().map(|(cue, _)| *cue).collect()
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCall> {
        self.draws
            .iter()
            .filter(|d| matches!(d, DrawCall::Circle { .. }))
    }

    pub fn rects(&self) -> impl Iterator<Item = &DrawCall> {
        self.draws
            .iter()
            .filter(|d| matches!(d, DrawCall::Rect { .. }))
    }
}

impl<S> RenderSink for RecordingPlatform<S> {
    fn clear(&mut self, width: f32, height: f32) {
        self.draws.clear();
        self.frames += 1;
        self.draws.push(DrawCall::Clear { width, height });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.draws.push(DrawCall::Circle {
            center,
            radius,
            color,
        });
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
        self.draws.push(DrawCall::Rect {
            origin,
            size,
            color,
        });
    }
}

impl<S> AudioSink for RecordingPlatform<S> {
    fn play(&mut self, cue: SoundCue, volume: f32) {
        self.cues.push((cue, volume));
    }
}

impl<S> HudSink for RecordingPlatform<S> {
    fn show(&mut self, hud: &Hud) {
        self.hud = *hud;
        self.hud_updates += 1;
    }

    fn announce(&mut self, message: &str) {
        log::info!("{}", message);
        self.announcements.push(message.to_string());
    }
}

impl<S: ScoreStore> ScoreStore for RecordingPlatform<S> {
    fn load_high_score(&mut self) -> u64 {
        self.store.load_high_score()
    }

    fn save_high_score(&mut self, score: u64) {
        self.store.save_high_score(score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_starts_new_frame() {
        let mut platform = RecordingPlatform::new();
        platform.clear(800.0, 600.0);
        platform.fill_rect(Vec2::ZERO, Vec2::ONE, Color::rgb(0, 0, 0));
        platform.fill_circle(Vec2::ONE, 2.0, Color::rgb(1, 2, 3));
        assert_eq!(platform.draws.len(), 3);

        platform.clear(800.0, 600.0);
        assert_eq!(platform.draws.len(), 1);
        assert_eq!(platform.frames, 2);
    }

    #[test]
    fn test_store_passthrough() {
        let mut platform = RecordingPlatform::with_store(MemoryStore::with_value(12));
        assert_eq!(platform.load_high_score(), 12);
        platform.save_high_score(20);
        assert_eq!(platform.store.value(), 20);
    }
}
