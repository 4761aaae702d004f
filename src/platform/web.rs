//! Browser platform: 2D canvas, DOM text HUD, Web Audio and LocalStorage

use glam::Vec2;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use super::{AudioSink, Hud, HudSink, RenderSink, ScoreStore};
use crate::audio::{AudioManager, SoundCue};
use crate::highscores::LocalStorageStore;
use crate::sim::Color;

/// DOM element ids for the text HUD
const SCORE_ID: &str = "score";
const LIVES_ID: &str = "lives";
const LEVEL_ID: &str = "level";
const HIGH_SCORE_ID: &str = "highScore";

pub struct WebPlatform {
    ctx: CanvasRenderingContext2d,
    document: Document,
    audio: AudioManager,
    store: LocalStorageStore,
}

impl WebPlatform {
    pub fn new(canvas: &HtmlCanvasElement, document: Document) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        Ok(Self {
            ctx,
            document,
            audio: AudioManager::new(),
            store: LocalStorageStore,
        })
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }
}

impl RenderSink for WebPlatform {
    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.ctx.begin_path();
        if self
            .ctx
            .arc(
                center.x as f64,
                center.y as f64,
                radius as f64,
                0.0,
                std::f64::consts::TAU,
            )
            .is_err()
        {
            return;
        }
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.fill();
        self.ctx.close_path();
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
        self.ctx.set_fill_style_str(&color.css());
        self.ctx
            .fill_rect(origin.x as f64, origin.y as f64, size.x as f64, size.y as f64);
    }
}

impl AudioSink for WebPlatform {
    fn play(&mut self, cue: SoundCue, volume: f32) {
        self.audio.play(cue, volume);
    }
}

impl HudSink for WebPlatform {
    fn show(&mut self, hud: &Hud) {
        self.set_text(SCORE_ID, &format!("Score: {}", hud.score));
        self.set_text(LIVES_ID, &format!("Lives: {}", hud.lives));
        self.set_text(LEVEL_ID, &format!("Level: {}", hud.level));
        self.set_text(HIGH_SCORE_ID, &format!("High Score: {}", hud.high_score));
    }

    fn announce(&mut self, message: &str) {
        log::info!("{}", message);
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
}

impl ScoreStore for WebPlatform {
    fn load_high_score(&mut self) -> u64 {
        self.store.load_high_score()
    }

    fn save_high_score(&mut self, score: u64) {
        self.store.save_high_score(score);
    }
}
