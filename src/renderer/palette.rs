//! Colors for everything drawn on the field

use crate::sim::{Color, PowerUpKind};

/// Bricks, ball and paddle share the classic blue
pub const PRIMARY: Color = Color::rgb(0x00, 0x95, 0xDD);

/// Fill for a falling drop, by the effect it carries
pub fn drop_color(kind: PowerUpKind) -> Color {
    match kind {
        PowerUpKind::Expand => Color::rgb(0x2E, 0xCC, 0x71),
        PowerUpKind::Shrink => Color::rgb(0xE7, 0x4C, 0x3C),
        PowerUpKind::SpeedUp => Color::rgb(0xF3, 0x9C, 0x12),
        PowerUpKind::SlowDown => Color::rgb(0x9B, 0x59, 0xB6),
    }
}
