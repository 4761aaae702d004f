//! Session controller
//!
//! Owns one `GameState` and one platform. Each frame it steps the simulation,
//! turns the drained events into sound cues and announcements, keeps the high
//! score current, refreshes the HUD and redraws.

use crate::audio::SoundCue;
use crate::highscores::HighScore;
use crate::platform::{Hud, Platform};
use crate::renderer;
use crate::settings::Settings;
use crate::sim::{self, GameEvent, GameState, TickInput};
use crate::tuning::Tuning;

pub const GAME_OVER_MESSAGE: &str = "GAME OVER";
pub const VICTORY_MESSAGE: &str = "Congratulations! You win!";

/// One playthrough bound to a platform
pub struct Game<P: Platform> {
    state: GameState,
    platform: P,
    settings: Settings,
    high_score: HighScore,
    /// Last HUD pushed to the platform
    hud: Option<Hud>,
}

impl<P: Platform> Game<P> {
    /// Load the stored high score, show the initial HUD and draw the field
    pub fn new(seed: u64, tuning: Tuning, settings: Settings, mut platform: P) -> Self {
        let best = platform.load_high_score();
        let mut state = GameState::with_tuning(seed, tuning);
        state.particles_enabled = settings.particles;

        let mut game = Self {
            state,
            platform,
            settings,
            high_score: HighScore::new(best),
            hud: None,
        };
        game.refresh_hud();
        game.render();
        game
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.best()
    }

    pub fn is_over(&self) -> bool {
        self.state.is_terminal()
    }

    /// Start action. Ignored once the session has started.
    pub fn start(&mut self, now_ms: f64) -> bool {
        if !sim::start(&mut self.state, now_ms) {
            return false;
        }
        self.refresh_hud();
        self.render();
        true
    }

    pub fn toggle_pause(&mut self) {
        sim::toggle_pause(&mut self.state);
    }

    /// Flip mute and persist the preference
    pub fn toggle_mute(&mut self) -> bool {
        self.settings.muted = !self.settings.muted;
        self.settings.save();
        log::info!("Sound {}", if self.settings.muted { "muted" } else { "on" });
        self.settings.muted
    }

    /// Step once and present the result.
    ///
    /// Returns false once the session has ended; the host should stop
    /// scheduling frames.
    pub fn frame(&mut self, input: &TickInput) -> bool {
        if self.state.is_terminal() {
            return false;
        }

        sim::tick(&mut self.state, input);
        self.dispatch_events();
        self.refresh_hud();
        self.render();

        !self.state.is_terminal()
    }

    /// Fan simulation events out to audio and announcements
    fn dispatch_events(&mut self) {
        let volume = self.settings.effective_volume();
        for event in self.state.drain_events() {
            log::debug!("{:?}", event);

            if let Some(cue) = SoundCue::for_event(&event) {
                if volume > 0.0 {
                    self.platform.play(cue, volume);
                }
            }

            match event {
                GameEvent::GameOver => self.platform.announce(GAME_OVER_MESSAGE),
                GameEvent::Victory => self.platform.announce(VICTORY_MESSAGE),
                _ => {}
            }
        }

        if self.high_score.submit(self.state.score) {
            self.platform.save_high_score(self.state.score);
            log::debug!("New high score {}", self.state.score);
        }
    }

    /// Push HUD text when any value changed
    fn refresh_hud(&mut self) {
        let hud = Hud {
            score: self.state.score,
            lives: self.state.lives,
            level: self.state.level,
            high_score: self.high_score.best(),
        };
        if self.hud != Some(hud) {
            self.platform.show(&hud);
            self.hud = Some(hud);
        }
    }

    fn render(&mut self) {
        renderer::draw_frame(&self.state, &mut self.platform);
    }
}
