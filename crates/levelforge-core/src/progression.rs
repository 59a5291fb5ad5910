//! Campaign position helpers: clamping, difficulty ordinal, seed mixing.
//!
//! Everything here is a pure function of its arguments and the static
//! campaign layout, so results never depend on call order.

use crate::constants::{
    BONUS_LEVEL_SEED_OFFSET, CAMPAIGN_SEED_SALT, CAMPAIGN_WORLD_LAYOUT, FINAL_CASTLE_WORLD,
    MAX_WORLD,
};
use crate::types::LevelKey;

/// Clamp a world number into `[1, MAX_WORLD]`.
pub fn clamp_world(world: u32) -> u32 {
    world.clamp(1, MAX_WORLD)
}

/// Number of stages in `world` (after clamping).
pub fn stages_in_world(world: u32) -> u32 {
    CAMPAIGN_WORLD_LAYOUT[(clamp_world(world) - 1) as usize]
}

/// Clamp a stage number into `[1, stages_in_world(world)]`.
pub fn clamp_stage(world: u32, stage: u32) -> u32 {
    stage.clamp(1, stages_in_world(world))
}

/// The last stage of every world is its boss stage.
pub fn is_boss_stage(world: u32, stage: u32) -> bool {
    clamp_stage(world, stage) == stages_in_world(world)
}

/// Boss stage of the designated castle world, outside bonus play.
pub fn is_final_castle(world: u32, stage: u32, bonus: bool) -> bool {
    !bonus && world == FINAL_CASTLE_WORLD && stage == stages_in_world(world)
}

/// Campaign-wide 1-based difficulty index of `(world, stage)`.
pub fn campaign_ordinal(world: u32, stage: u32) -> u32 {
    let world = clamp_world(world);
    let preceding: u32 = CAMPAIGN_WORLD_LAYOUT[..(world - 1) as usize].iter().sum();
    preceding + clamp_stage(world, stage)
}

/// Total number of campaign levels.
pub fn campaign_level_count() -> u32 {
    CAMPAIGN_WORLD_LAYOUT.iter().sum()
}

/// Every campaign level key in play order.
pub fn campaign_keys() -> Vec<LevelKey> {
    (1..=MAX_WORLD)
        .flat_map(|world| (1..=stages_in_world(world)).map(move |stage| LevelKey::new(world, stage)))
        .collect()
}

/// The level after `key`, or `None` once the campaign is complete.
pub fn next_level(key: LevelKey) -> Option<LevelKey> {
    let world = clamp_world(key.world);
    let stage = clamp_stage(world, key.stage);
    if stage < stages_in_world(world) {
        Some(LevelKey::new(world, stage + 1))
    } else if world < MAX_WORLD {
        Some(LevelKey::new(world + 1, 1))
    } else {
        None
    }
}

/// Stars required to unlock the bonus level of `world`.
pub fn stars_needed_for_bonus(world: u32, star_target: u32) -> u32 {
    clamp_world(world) * star_target
}

/// Export seed for a campaign level derived from one base seed.
///
/// World and stage are clamped first; bonus levels shift the stage before
/// mixing so they never share a stream with a campaign stage.
pub fn campaign_seed(base: u32, world: u32, stage: u32, bonus: bool) -> u32 {
    let world = clamp_world(world);
    let mut stage = clamp_stage(world, stage);
    if bonus {
        stage += BONUS_LEVEL_SEED_OFFSET;
    }
    base ^ (world << 16) ^ (stage << 8) ^ CAMPAIGN_SEED_SALT
}

/// Per-call generator RNG seed.
pub fn generator_seed(seed: u32, world: u32, level: u32) -> u32 {
    seed ^ world.wrapping_shl(7) ^ level.wrapping_shl(13)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_clamping() {
        assert_eq!(clamp_world(0), 1);
        assert_eq!(clamp_world(12), MAX_WORLD);
        assert_eq!(clamp_stage(2, 0), 1);
        assert_eq!(clamp_stage(2, 9), 4);
    }

    #[test]
    fn test_campaign_ordinal_is_global_and_monotonic() {
        assert_eq!(campaign_ordinal(1, 1), 1);
        assert_eq!(campaign_ordinal(1, 4), 4);
        assert_eq!(campaign_ordinal(2, 1), 5);
        assert_eq!(campaign_ordinal(7, 4), 28);
        let ordinals: Vec<_> = campaign_keys()
            .into_iter()
            .map(|k| campaign_ordinal(k.world, k.stage))
            .collect();
        assert!(ordinals.windows(2).all(|w| w[1] == w[0] + 1));
    }

    #[test]
    fn test_final_castle_is_world_five_boss() {
        assert!(is_final_castle(5, 4, false));
        assert!(!is_final_castle(5, 4, true));
        assert!(!is_final_castle(5, 3, false));
        assert!(!is_final_castle(6, 4, false));
        assert!(is_boss_stage(3, 4));
    }

    #[test]
    fn test_campaign_seeds_do_not_collide() {
        let mut seen = HashSet::new();
        for key in campaign_keys() {
            assert!(seen.insert(campaign_seed(1234, key.world, key.stage, false)));
            assert!(seen.insert(campaign_seed(1234, key.world, key.stage, true)));
        }
        assert_eq!(seen.len(), 56);
    }

    #[test]
    fn test_next_level_walks_the_campaign() {
        assert_eq!(next_level(LevelKey::new(1, 2)), Some(LevelKey::new(1, 3)));
        assert_eq!(next_level(LevelKey::new(1, 4)), Some(LevelKey::new(2, 1)));
        assert_eq!(next_level(LevelKey::new(7, 4)), None);
        assert_eq!(campaign_keys().len() as u32, campaign_level_count());
    }

    #[test]
    fn test_generator_seed_mixes_world_and_level() {
        assert_eq!(generator_seed(0, 1, 0), 128);
        assert_ne!(generator_seed(7, 1, 2), generator_seed(7, 2, 1));
    }
}
