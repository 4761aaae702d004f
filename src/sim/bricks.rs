//! Brick field generation and per-brick state

use glam::Vec2;
use rand::Rng;

use super::powerups::{PowerUpKind, roll_power_up};
use crate::consts::*;

/// Brick lifecycle: active until hit once, then destroyed for the rest of the level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrickStatus {
    Active,
    Destroyed,
}

/// A single brick
#[derive(Debug, Clone, PartialEq)]
pub struct Brick {
    pub column: usize,
    pub row: usize,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub status: BrickStatus,
    /// Power-up released on destruction (fixed at generation)
    pub power_up: Option<PowerUpKind>,
}

impl Brick {
    pub fn is_active(&self) -> bool {
        self.status == BrickStatus::Active
    }

    /// Point strictly inside the brick rectangle
    pub fn contains(&self, p: Vec2) -> bool {
        p.x > self.pos.x
            && p.x < self.pos.x + self.size.x
            && p.y > self.pos.y
            && p.y < self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Where a released drop starts falling from
    pub fn lower_center(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x / 2.0, self.pos.y + self.size.y)
    }
}

/// Top-left corner of the brick at a grid cell
pub fn brick_origin(column: usize, row: usize) -> Vec2 {
    Vec2::new(
        column as f32 * (BRICK_WIDTH + BRICK_PADDING) + BRICK_OFFSET_LEFT,
        row as f32 * (BRICK_HEIGHT + BRICK_PADDING) + BRICK_OFFSET_TOP,
    )
}

/// Columns x rows grid of bricks, stored column-major
#[derive(Debug, Clone, PartialEq)]
pub struct BrickField {
    columns: usize,
    rows: usize,
    bricks: Vec<Brick>,
}

impl BrickField {
    /// Lay out a full grid; each brick independently rolls for a power-up
    pub fn generate<R: Rng + ?Sized>(
        columns: usize,
        rows: usize,
        power_up_chance: f64,
        rng: &mut R,
    ) -> Self {
        let mut bricks = Vec::with_capacity(columns * rows);
        for column in 0..columns {
            for row in 0..rows {
                bricks.push(Brick {
                    column,
                    row,
                    pos: brick_origin(column, row),
                    size: Vec2::new(BRICK_WIDTH, BRICK_HEIGHT),
                    status: BrickStatus::Active,
                    power_up: roll_power_up(rng, power_up_chance),
                });
            }
        }
        Self {
            columns,
            rows,
            bricks,
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Bricks the level started with
    pub fn total(&self) -> usize {
        self.bricks.len()
    }

    pub fn active_count(&self) -> usize {
        self.bricks.iter().filter(|b| b.is_active()).count()
    }

    pub fn is_cleared(&self) -> bool {
        self.bricks.iter().all(|b| !b.is_active())
    }

    pub fn get(&self, column: usize, row: usize) -> Option<&Brick> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.bricks.get(column * self.rows + row)
    }

    /// Scan order: column-major, row-ascending
    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter()
    }

    /// First active brick (in scan order) containing `p`
    pub fn first_hit(&self, p: Vec2) -> Option<(usize, usize)> {
        self.bricks
            .iter()
            .find(|b| b.is_active() && b.contains(p))
            .map(|b| (b.column, b.row))
    }

    /// Destroy an active brick, returning it. Destroyed bricks stay destroyed.
    pub fn destroy(&mut self, column: usize, row: usize) -> Option<&Brick> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        let brick = self.bricks.get_mut(column * self.rows + row)?;
        if !brick.is_active() {
            return None;
        }
        brick.status = BrickStatus::Destroyed;
        Some(brick)
    }
}
