//! Power-up tagging, falling drops and timed effects
//!
//! Effects are reversed through an [`EffectQueue`] keyed by wall-clock expiry.
//! The queue is drained at the start of every tick, so reversals only ever
//! land on tick boundaries.

use glam::Vec2;
use rand::Rng;

use super::state::{GameEvent, GameState};
use crate::consts::*;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    /// Wider paddle
    Expand,
    /// Narrower paddle
    Shrink,
    /// Faster ball
    SpeedUp,
    /// Slower ball
    SlowDown,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::Expand,
        PowerUpKind::Shrink,
        PowerUpKind::SpeedUp,
        PowerUpKind::SlowDown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::Expand => "expand",
            PowerUpKind::Shrink => "shrink",
            PowerUpKind::SpeedUp => "speedUp",
            PowerUpKind::SlowDown => "slowDown",
        }
    }
}

/// Roll a brick's power-up tag: `chance` of carrying one, kind uniform
pub fn roll_power_up<R: Rng + ?Sized>(rng: &mut R, chance: f64) -> Option<PowerUpKind> {
    if rng.random_bool(chance.clamp(0.0, 1.0)) {
        Some(PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())])
    } else {
        None
    }
}

/// A falling pickup
#[derive(Debug, Clone, PartialEq)]
pub struct PowerUpDrop {
    pub kind: PowerUpKind,
    pub pos: Vec2,
    /// Downward speed per tick
    pub speed: f32,
}

impl PowerUpDrop {
    pub fn new(kind: PowerUpKind, pos: Vec2, speed: f32) -> Self {
        Self { kind, pos, speed }
    }
}

/// A reversal waiting for its expiry time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledEffect {
    pub kind: PowerUpKind,
    pub expires_at_ms: f64,
}

/// Pending reversals, one per activation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectQueue {
    pending: Vec<ScheduledEffect>,
}

impl EffectQueue {
    pub fn schedule(&mut self, kind: PowerUpKind, expires_at_ms: f64) {
        self.pending.push(ScheduledEffect {
            kind,
            expires_at_ms,
        });
    }

    /// Remove and return every reversal due at `now_ms`, earliest first
    pub fn pop_due(&mut self, now_ms: f64) -> Vec<PowerUpKind> {
        let mut due: Vec<ScheduledEffect> = Vec::new();
        self.pending.retain(|effect| {
            if effect.expires_at_ms <= now_ms {
                due.push(*effect);
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| a.expires_at_ms.total_cmp(&b.expires_at_ms));
        due.into_iter().map(|e| e.kind).collect()
    }

    /// Cancel everything, returning how many reversals were dropped
    pub fn clear(&mut self) -> usize {
        let count = self.pending.len();
        self.pending.clear();
        count
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScheduledEffect> {
        self.pending.iter()
    }
}

/// Apply one activation (or its inverse) of a power-up.
///
/// Width changes are clamped to the tuning band; velocity changes scale both
/// components.
fn apply(state: &mut GameState, kind: PowerUpKind, reverse: bool) {
    let factor = state.tuning.effect_factor;
    let grow = match kind {
        PowerUpKind::Expand | PowerUpKind::SpeedUp => !reverse,
        PowerUpKind::Shrink | PowerUpKind::SlowDown => reverse,
    };
    let scaled = |v: f32| if grow { v * factor } else { v / factor };

    match kind {
        PowerUpKind::Expand | PowerUpKind::Shrink => {
            let width = state.tuning.clamp_paddle_width(scaled(state.paddle.width));
            state.paddle.resize(width);
        }
        PowerUpKind::SpeedUp | PowerUpKind::SlowDown => {
            let vel = state.ball.vel;
            state.ball.vel = Vec2::new(scaled(vel.x), scaled(vel.y));
        }
    }
}

/// Activate a collected power-up and schedule its reversal
pub fn activate(state: &mut GameState, kind: PowerUpKind) {
    apply(state, kind, false);
    let expires_at = state.now_ms + state.tuning.effect_duration_ms;
    state.effects.schedule(kind, expires_at);
    state.events.push(GameEvent::PowerUpCollected(kind));
    log::debug!("Power-up {} active until {:.0}ms", kind.as_str(), expires_at);
}

/// Reverse every effect whose time is up
pub fn expire_effects(state: &mut GameState) {
    for kind in state.effects.pop_due(state.now_ms) {
        apply(state, kind, true);
        state.events.push(GameEvent::EffectExpired(kind));
        log::debug!("Power-up {} expired", kind.as_str());
    }
}

/// Release a drop from a destroyed brick
pub fn spawn_drop(state: &mut GameState, kind: PowerUpKind, at: Vec2) {
    state
        .drops
        .push(PowerUpDrop::new(kind, at, state.tuning.drop_speed));
    state.events.push(GameEvent::DropSpawned(kind));
}

/// Move drops down one tick, collecting those that cross the paddle band.
///
/// The whole path travelled this tick is tested against the band, so a fast
/// drop cannot skip over it. A drop that falls past the bottom edge is
/// dropped without effect.
pub fn advance_drops(state: &mut GameState) {
    let paddle = state.paddle.clone();
    let mut collected = Vec::new();

    state.drops.retain_mut(|drop| {
        let from = drop.pos.y;
        drop.pos.y += drop.speed;
        let crossed = drop.pos.y >= paddle.top() && from <= CANVAS_HEIGHT;
        if crossed && paddle.spans(drop.pos.x) {
            collected.push(drop.kind);
            false
        } else {
            drop.pos.y <= CANVAS_HEIGHT
        }
    });

    for kind in collected {
        activate(state, kind);
    }
}
