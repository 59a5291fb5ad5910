//! Static per-world rulesets and the contracts derived from them.

use serde::{Deserialize, Serialize};

use crate::chunk::{ChunkFamily, ChunkTag};
use crate::constants::MAX_WORLD;
use crate::progression::clamp_world;

/// Visual/audio theme tag of a world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    City,
    Tundra,
    Void,
    Catacombs,
    Graveyard,
    Core,
    Apex,
    Bonus,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::City => "city",
            Theme::Tundra => "tundra",
            Theme::Void => "void",
            Theme::Catacombs => "catacombs",
            Theme::Graveyard => "graveyard",
            Theme::Core => "core",
            Theme::Apex => "apex",
            Theme::Bonus => "bonus",
        }
    }
}

/// Sky gradient and accent colour, 0xRRGGBB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub sky_top: u32,
    pub sky_bottom: u32,
    pub accent: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AudioTheme {
    pub tempo: u32,
    /// Scale degrees in semitones above the root.
    pub scale: &'static [u8],
}

/// Physics multipliers applied by the scene layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldModifiers {
    pub friction: f32,
    pub gravity: f32,
    pub speed: f32,
    pub token_burn: f32,
}

const NEUTRAL: WorldModifiers = WorldModifiers {
    friction: 1.0,
    gravity: 1.0,
    speed: 1.0,
    token_burn: 1.0,
};

/// Immutable content rules for one world.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldRuleset {
    pub world: u32,
    pub theme: Theme,
    /// Max tiles the ground may move up or down per chunk.
    pub ground_variance: i32,
    pub gap_frequency: f64,
    pub enemy_density: f64,
    pub projectile_cadence_ms: u32,
    pub moving_platform_frequency: f64,
    pub checkpoint_spacing_chunks: u32,
    pub coin_density: f64,
    pub star_target: u32,
    pub palette: Palette,
    pub audio: AudioTheme,
    pub modifiers: WorldModifiers,
    pub chunk_families: &'static [ChunkFamily],
    pub max_new_mechanics_per_chunk: u32,
    pub min_recovery_gap: u32,
    pub max_hazard_clusters: u32,
}

use ChunkFamily::{RagPipeline, RateLimiter, ServerRoom, TrainingRun};

static WORLD_RULES: [WorldRuleset; MAX_WORLD as usize] = [
    WorldRuleset {
        world: 1,
        theme: Theme::City,
        ground_variance: 1,
        gap_frequency: 0.09,
        enemy_density: 0.35,
        projectile_cadence_ms: 2300,
        moving_platform_frequency: 0.08,
        checkpoint_spacing_chunks: 3,
        coin_density: 0.55,
        star_target: 3,
        palette: Palette { sky_top: 0x6ec6ff, sky_bottom: 0xb3ecff, accent: 0x5cb85c },
        audio: AudioTheme { tempo: 120, scale: &[0, 2, 4, 7, 9] },
        modifiers: NEUTRAL,
        chunk_families: &[ServerRoom, TrainingRun],
        max_new_mechanics_per_chunk: 1,
        min_recovery_gap: 1,
        max_hazard_clusters: 3,
    },
    WorldRuleset {
        world: 2,
        theme: Theme::Tundra,
        ground_variance: 2,
        gap_frequency: 0.14,
        enemy_density: 0.45,
        projectile_cadence_ms: 1900,
        moving_platform_frequency: 0.13,
        checkpoint_spacing_chunks: 3,
        coin_density: 0.5,
        star_target: 3,
        palette: Palette { sky_top: 0xf9d976, sky_bottom: 0xf39f86, accent: 0xc97d10 },
        audio: AudioTheme { tempo: 126, scale: &[0, 2, 3, 7, 10] },
        modifiers: NEUTRAL,
        chunk_families: &[ServerRoom, TrainingRun, RateLimiter],
        max_new_mechanics_per_chunk: 1,
        min_recovery_gap: 1,
        max_hazard_clusters: 3,
    },
    WorldRuleset {
        world: 3,
        theme: Theme::Void,
        ground_variance: 2,
        gap_frequency: 0.17,
        enemy_density: 0.52,
        projectile_cadence_ms: 1750,
        moving_platform_frequency: 0.17,
        checkpoint_spacing_chunks: 2,
        coin_density: 0.56,
        star_target: 3,
        palette: Palette { sky_top: 0x89cff0, sky_bottom: 0xe0f7ff, accent: 0x55c0f9 },
        audio: AudioTheme { tempo: 132, scale: &[0, 2, 5, 7, 9] },
        modifiers: WorldModifiers { gravity: 0.82, ..NEUTRAL },
        chunk_families: &[TrainingRun, RagPipeline, ServerRoom],
        max_new_mechanics_per_chunk: 1,
        min_recovery_gap: 1,
        max_hazard_clusters: 3,
    },
    WorldRuleset {
        world: 4,
        theme: Theme::Catacombs,
        ground_variance: 2,
        gap_frequency: 0.2,
        enemy_density: 0.6,
        projectile_cadence_ms: 1600,
        moving_platform_frequency: 0.23,
        checkpoint_spacing_chunks: 2,
        coin_density: 0.48,
        star_target: 3,
        palette: Palette { sky_top: 0x101423, sky_bottom: 0x2b2d42, accent: 0xff8c42 },
        audio: AudioTheme { tempo: 138, scale: &[0, 1, 5, 7, 8] },
        modifiers: WorldModifiers { friction: 0.6, ..NEUTRAL },
        chunk_families: &[RagPipeline, RateLimiter, TrainingRun],
        max_new_mechanics_per_chunk: 1,
        min_recovery_gap: 2,
        max_hazard_clusters: 3,
    },
    WorldRuleset {
        world: 5,
        theme: Theme::Graveyard,
        ground_variance: 3,
        gap_frequency: 0.24,
        enemy_density: 0.68,
        projectile_cadence_ms: 1450,
        moving_platform_frequency: 0.28,
        checkpoint_spacing_chunks: 2,
        coin_density: 0.45,
        star_target: 3,
        palette: Palette { sky_top: 0x221122, sky_bottom: 0x3b1f2b, accent: 0xd7263d },
        audio: AudioTheme { tempo: 145, scale: &[0, 3, 5, 6, 10] },
        modifiers: WorldModifiers { gravity: 1.15, token_burn: 1.2, ..NEUTRAL },
        chunk_families: &[RateLimiter, RagPipeline, TrainingRun],
        max_new_mechanics_per_chunk: 1,
        min_recovery_gap: 2,
        max_hazard_clusters: 3,
    },
    WorldRuleset {
        world: 6,
        theme: Theme::Core,
        ground_variance: 3,
        gap_frequency: 0.27,
        enemy_density: 0.72,
        projectile_cadence_ms: 1350,
        moving_platform_frequency: 0.32,
        checkpoint_spacing_chunks: 2,
        coin_density: 0.42,
        star_target: 3,
        palette: Palette { sky_top: 0x0b0f1a, sky_bottom: 0x1f2a44, accent: 0x39ff14 },
        audio: AudioTheme { tempo: 150, scale: &[0, 2, 3, 6, 7] },
        modifiers: WorldModifiers { speed: 1.1, token_burn: 1.3, ..NEUTRAL },
        chunk_families: &[RagPipeline, RateLimiter, TrainingRun, ServerRoom],
        max_new_mechanics_per_chunk: 1,
        min_recovery_gap: 2,
        max_hazard_clusters: 3,
    },
    WorldRuleset {
        world: 7,
        theme: Theme::Apex,
        ground_variance: 3,
        gap_frequency: 0.3,
        enemy_density: 0.76,
        projectile_cadence_ms: 1250,
        moving_platform_frequency: 0.36,
        checkpoint_spacing_chunks: 2,
        coin_density: 0.4,
        star_target: 3,
        palette: Palette { sky_top: 0x05000a, sky_bottom: 0x2d0036, accent: 0xf5f5f5 },
        audio: AudioTheme { tempo: 156, scale: &[0, 1, 4, 6, 10] },
        modifiers: WorldModifiers { gravity: 1.1, speed: 1.15, token_burn: 1.4, ..NEUTRAL },
        chunk_families: &[RateLimiter, RagPipeline, TrainingRun],
        max_new_mechanics_per_chunk: 1,
        min_recovery_gap: 2,
        max_hazard_clusters: 3,
    },
];

/// Ruleset for `world`, clamped into `[1, MAX_WORLD]`.
pub fn world_rules(world: u32) -> &'static WorldRuleset {
    &WORLD_RULES[(clamp_world(world) - 1) as usize]
}

/// All rulesets in world order.
pub fn all_world_rules() -> &'static [WorldRuleset] {
    &WORLD_RULES
}

/// First world in which a chunk tag may appear.
pub fn tag_unlock_world(tag: ChunkTag) -> u32 {
    match tag {
        ChunkTag::GapLong | ChunkTag::Blocker | ChunkTag::SpikeLow | ChunkTag::ThwompDrop => 2,
        ChunkTag::MovePlatform => 3,
        ChunkTag::SpikeSweep | ChunkTag::VanishPlatform => 4,
        ChunkTag::CliffEdge => 5,
        ChunkTag::AutoScroll => 6,
        _ => 1,
    }
}

impl WorldRuleset {
    /// The pacing contract levels of this world are checked against.
    pub fn contract(&self) -> WorldContract {
        let allowed_chunk_tags: Vec<ChunkTag> = ChunkTag::ALL
            .into_iter()
            .filter(|&tag| tag_unlock_world(tag) <= self.world)
            .collect();
        let allowed_hazard_tags = allowed_chunk_tags
            .iter()
            .copied()
            .filter(|tag| tag.is_hazard())
            .collect();
        WorldContract {
            world: self.world,
            allowed_chunk_tags,
            allowed_hazard_tags,
            max_new_mechanics_per_chunk: self.max_new_mechanics_per_chunk,
            min_recovery_gap: self.min_recovery_gap,
            max_hazard_clusters: self.max_hazard_clusters,
        }
    }
}

/// Owned, serializable form of a world's pacing contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldContract {
    pub world: u32,
    pub allowed_chunk_tags: Vec<ChunkTag>,
    pub allowed_hazard_tags: Vec<ChunkTag>,
    pub max_new_mechanics_per_chunk: u32,
    pub min_recovery_gap: u32,
    pub max_hazard_clusters: u32,
}

impl WorldContract {
    pub fn allows_tag(&self, tag: ChunkTag) -> bool {
        self.allowed_chunk_tags.contains(&tag)
    }

    pub fn allows_hazard(&self, tag: ChunkTag) -> bool {
        self.allowed_hazard_tags.contains(&tag)
    }
}

/// Contracts for every world, as shipped or as loaded from an artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldContracts {
    pub worlds: Vec<WorldContract>,
}

impl WorldContracts {
    /// Contracts derived from the static world table.
    pub fn builtin() -> Self {
        Self {
            worlds: WORLD_RULES.iter().map(WorldRuleset::contract).collect(),
        }
    }

    /// Exact lookup; no clamping, so a missing world stays visible.
    pub fn get(&self, world: u32) -> Option<&WorldContract> {
        self.worlds.iter().find(|c| c.world == world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_rules_clamp() {
        assert_eq!(world_rules(0).world, 1);
        assert_eq!(world_rules(1).theme, Theme::City);
        assert_eq!(world_rules(7).theme, Theme::Apex);
        assert_eq!(world_rules(99).world, MAX_WORLD);
    }

    #[test]
    fn test_table_is_indexed_by_world() {
        for (i, rules) in all_world_rules().iter().enumerate() {
            assert_eq!(rules.world as usize, i + 1);
            assert!(!rules.chunk_families.is_empty());
            assert!(rules.checkpoint_spacing_chunks >= 1);
        }
    }

    #[test]
    fn test_difficulty_knobs_never_ease_with_world() {
        for pair in all_world_rules().windows(2) {
            assert!(pair[1].gap_frequency >= pair[0].gap_frequency);
            assert!(pair[1].enemy_density >= pair[0].enemy_density);
            assert!(pair[1].projectile_cadence_ms <= pair[0].projectile_cadence_ms);
            assert!(pair[1].min_recovery_gap >= pair[0].min_recovery_gap);
        }
    }

    #[test]
    fn test_contract_unlocks_hazards_progressively() {
        let w1 = world_rules(1).contract();
        assert!(w1.allowed_hazard_tags.is_empty());
        assert!(!w1.allows_tag(ChunkTag::SpikeLow));

        let w2 = world_rules(2).contract();
        assert!(w2.allows_hazard(ChunkTag::SpikeLow));
        assert!(!w2.allows_hazard(ChunkTag::SpikeSweep));

        let w4 = world_rules(4).contract();
        assert!(w4.allows_hazard(ChunkTag::SpikeSweep));
        assert_eq!(w4.min_recovery_gap, 2);

        let w7 = world_rules(7).contract();
        assert_eq!(w7.allowed_chunk_tags.len(), ChunkTag::ALL.len());
    }

    #[test]
    fn test_builtin_contracts_lookup() {
        let contracts = WorldContracts::builtin();
        assert_eq!(contracts.worlds.len(), MAX_WORLD as usize);
        assert!(contracts.get(3).is_some());
        assert!(contracts.get(8).is_none());
    }
}
