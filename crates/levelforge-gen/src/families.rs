//! Chunk kinds the procedural generator lays out, grouped by family.

use levelforge_core::chunk::ChunkFamily;

/// Concrete content recipe for one interior chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChunkKind {
    MidFlat,
    CoinArc,
    VerticalClimb,
    EnemyGauntlet,
    MovingPlatform,
}

impl ChunkKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ChunkKind::MidFlat => "mid_flat",
            ChunkKind::CoinArc => "coin_arc",
            ChunkKind::VerticalClimb => "vertical_climb",
            ChunkKind::EnemyGauntlet => "enemy_gauntlet",
            ChunkKind::MovingPlatform => "moving_platform",
        }
    }
}

use ChunkKind::{CoinArc, EnemyGauntlet, MidFlat, MovingPlatform, VerticalClimb};

/// Base pool of a family. Repeats weight the pick.
pub fn family_pool(family: ChunkFamily) -> &'static [ChunkKind] {
    match family {
        ChunkFamily::ServerRoom => &[MidFlat, MidFlat, CoinArc],
        ChunkFamily::TrainingRun => &[CoinArc, VerticalClimb, EnemyGauntlet],
        ChunkFamily::RagPipeline => &[MovingPlatform, VerticalClimb, EnemyGauntlet],
        ChunkFamily::RateLimiter => &[MovingPlatform, EnemyGauntlet, CoinArc],
    }
}

/// Family pool widened by world and level thresholds.
pub fn kind_pool(family: ChunkFamily, world: u32, level: u32) -> Vec<ChunkKind> {
    let mut pool = family_pool(family).to_vec();
    if world >= 3 {
        pool.push(VerticalClimb);
    }
    if level >= 3 {
        pool.push(EnemyGauntlet);
    }
    if world >= 6 {
        pool.push(MovingPlatform);
    }
    pool
}
