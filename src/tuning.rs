//! Data-driven game balance
//!
//! Everything that shapes difficulty lives here so it can be tweaked from a
//! JSON blob without touching the simulation.

use serde::{Deserialize, Serialize};

/// Balance knobs for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Lives at session start
    pub starting_lives: u8,
    /// Highest playable level; clearing it wins the game
    pub level_cap: u32,
    /// Serve speed per axis is `base_ball_speed + level`
    pub base_ball_speed: f32,
    /// Paddle travel per tick while a direction key is held
    pub paddle_speed: f32,
    /// Drop fall speed per tick
    pub drop_speed: f32,
    /// Chance that any one brick carries a power-up
    pub power_up_chance: f64,
    /// Multiplier applied (or divided out) by every power-up
    pub effect_factor: f32,
    /// Wall-clock lifetime of a power-up effect
    pub effect_duration_ms: f64,
    /// Narrowest the paddle may shrink to
    pub min_paddle_width: f32,
    /// Widest the paddle may grow to
    pub max_paddle_width: f32,
    /// Particles per brick burst
    pub burst_size: usize,
    /// Particle lifetime in ticks
    pub particle_lifetime: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            starting_lives: 3,
            level_cap: 3,
            base_ball_speed: 3.0,
            paddle_speed: 7.0,
            drop_speed: 2.0,
            power_up_chance: 0.1,
            effect_factor: 1.5,
            effect_duration_ms: 10_000.0,
            min_paddle_width: 50.0,
            max_paddle_width: crate::consts::CANVAS_WIDTH / 2.0,
            burst_size: 10,
            particle_lifetime: 30,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields keep their defaults.
    ///
    /// Values that would break the simulation are rejected as a data error.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning
            .validate()
            .map_err(<serde_json::Error as serde::de::Error>::custom)?;
        Ok(tuning)
    }

    /// Check the values the simulation divides by or clamps against
    pub fn validate(&self) -> Result<(), String> {
        if !(self.effect_factor.is_finite() && self.effect_factor > 0.0) {
            return Err(format!(
                "effect_factor must be positive, got {}",
                self.effect_factor
            ));
        }
        if !(self.min_paddle_width.is_finite() && self.max_paddle_width.is_finite()) {
            return Err("paddle width band must be finite".to_string());
        }
        if self.min_paddle_width <= 0.0 || self.min_paddle_width > self.max_paddle_width {
            return Err(format!(
                "paddle width band {}..{} is empty",
                self.min_paddle_width, self.max_paddle_width
            ));
        }
        if !(self.drop_speed.is_finite() && self.drop_speed > 0.0) {
            return Err(format!("drop_speed must be positive, got {}", self.drop_speed));
        }
        Ok(())
    }

    /// Serve speed per axis for a level
    pub fn serve_speed(&self, level: u32) -> f32 {
        self.base_ball_speed + level as f32
    }

    /// Clamp a paddle width into the allowed band. An inverted band resolves
    /// to its upper bound.
    pub fn clamp_paddle_width(&self, width: f32) -> f32 {
        width.max(self.min_paddle_width).min(self.max_paddle_width)
    }
}
