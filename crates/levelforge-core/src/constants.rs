//! Single source of truth for shared generation and campaign constants.
//! Exported level documents depend on these values, so changing any of
//! them changes every generated layout.

/// Side length of a tile in pixels.
pub const TILE_SIZE: i32 = 16;

/// Width of a chunk in tiles.
pub const CHUNK_WIDTH: i32 = 24;

/// Height of every level in tiles.
pub const LEVEL_HEIGHT: i32 = 34;

/// Ground row used by start and end chunks.
pub const BASE_GROUND: i32 = 26;

/// Highest (smallest row index) ground row interior chunks may rise to.
pub const GROUND_MIN: i32 = 21;

/// Lowest ground row interior chunks may sink to.
pub const GROUND_MAX: i32 = 28;

/// Tile code: empty space.
pub const TILE_EMPTY: u8 = 0;

/// Tile code: solid ground.
pub const TILE_SOLID: u8 = 1;

/// Tile code: one-way platform (passable from below).
pub const TILE_ONE_WAY: u8 = 2;

/// Stage count per world, in campaign order.
pub const CAMPAIGN_WORLD_LAYOUT: [u32; 7] = [4, 4, 4, 4, 4, 4, 4];

/// Highest valid world number.
pub const MAX_WORLD: u32 = CAMPAIGN_WORLD_LAYOUT.len() as u32;

/// Chunk count used by every bonus level.
pub const BONUS_CHUNK_COUNT: u32 = 6;

/// Chunk count used by the final castle stage.
pub const FINAL_CASTLE_CHUNK_COUNT: u32 = 16;

/// Base of the scaling chunk-count formula (`base + world + level`).
pub const BASE_CHUNK_COUNT: u32 = 8;

/// Cap of the scaling chunk-count formula.
pub const MAX_CHUNK_COUNT: u32 = 14;

/// World whose boss stage is the final castle difficulty spike.
pub const FINAL_CASTLE_WORLD: u32 = 5;

/// Level offset applied to bonus levels before seed mixing.
pub const BONUS_LEVEL_SEED_OFFSET: u32 = 100;

/// Salt folded into every campaign export seed.
pub const CAMPAIGN_SEED_SALT: u32 = 0x5EED;

/// Minimum number of `chunksUsed` entries a structurally valid level carries.
pub const MIN_CHUNKS_USED: usize = 4;

/// Number of pacing phases in every authored level.
pub const PHASE_COUNT: usize = 6;
