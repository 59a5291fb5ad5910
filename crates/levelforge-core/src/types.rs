use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{TILE_EMPTY, TILE_SIZE};

/// Row-major tile grid: `grid[row][column]`, one tile code per cell.
pub type TileGrid = Vec<Vec<u8>>;

/// Campaign position of a level: `(world, stage)`. Displays as `W-S`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct LevelKey {
    pub world: u32,
    pub stage: u32,
}

impl LevelKey {
    pub fn new(world: u32, stage: u32) -> Self {
        Self { world, stage }
    }
}

impl fmt::Display for LevelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.world, self.stage)
    }
}

/// A pixel-space point in a level document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    /// Pixel position of the centre of tile `(tx, ty)`.
    pub fn tile_center(tx: i32, ty: i32) -> Self {
        Self {
            x: tx * TILE_SIZE + TILE_SIZE / 2,
            y: ty * TILE_SIZE + TILE_SIZE / 2,
        }
    }

    /// Pixel position of the top-left corner of tile `(tx, ty)`.
    pub fn tile_origin(tx: i32, ty: i32) -> Self {
        Self {
            x: tx * TILE_SIZE,
            y: ty * TILE_SIZE,
        }
    }
}

/// Allocate an all-empty grid of `height` rows by `width` columns.
pub fn empty_grid(width: usize, height: usize) -> TileGrid {
    vec![vec![TILE_EMPTY; width]; height]
}
