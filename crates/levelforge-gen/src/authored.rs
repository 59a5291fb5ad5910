//! Lays out an authored [`LevelSpec`] as a playable level.
//!
//! Each chunk's geometry and entities come from its structural tags, so
//! the result is fully determined by the level spec and the catalog. The
//! seed is carried into the metadata for provenance only.

use levelforge_core::campaign::LevelSpec;
use levelforge_core::chunk::{ChunkCatalog, ChunkTag, ChunkTemplate};
use levelforge_core::constants::{BASE_GROUND, CHUNK_WIDTH, GROUND_MAX, GROUND_MIN, TILE_SIZE};
use levelforge_core::level::{
    EntityKind, EntityValue, GeneratedLevel, LevelMetadata, MovingPlatform,
};
use levelforge_core::progression::campaign_ordinal;
use levelforge_core::types::LevelKey;
use levelforge_core::world::world_rules;
use thiserror::Error;

use crate::builder::{data, LevelBuilder};

const COIN_STAIR: [i32; 5] = [2, 1, 0, 1, 2];
const COIN_ARCH: [i32; 6] = [0, 1, 2, 2, 1, 0];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssembleError {
    #[error("Level {level} references unknown chunk id '{chunk}'")]
    UnknownChunk { level: LevelKey, chunk: String },
}

/// Assemble `spec` between a start chunk and an end chunk.
pub fn assemble_authored_level(
    spec: &LevelSpec,
    catalog: &ChunkCatalog,
    seed: u32,
) -> Result<GeneratedLevel, AssembleError> {
    let templates = spec
        .chunk_ids()
        .into_iter()
        .map(|id| {
            catalog.get(id).ok_or_else(|| AssembleError::UnknownChunk {
                level: spec.key(),
                chunk: id.to_owned(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let rules = world_rules(spec.world);
    let width = (templates.len() as i32 + 2) * CHUNK_WIDTH;
    let mut builder = LevelBuilder::new(width);
    let mut chunks_used = Vec::with_capacity(templates.len() + 2);

    builder.fill_columns(0, CHUNK_WIDTH - 1, BASE_GROUND);
    builder.add_entity(EntityKind::Spawn, 2, BASE_GROUND - 2, None);
    builder.add_entity(
        EntityKind::QuestionBlock,
        CHUNK_WIDTH - 4,
        BASE_GROUND - 4,
        data([("variant", "start".into())]),
    );
    chunks_used.push("start".to_owned());

    let spacing = rules.checkpoint_spacing_chunks.max(2) as usize;
    let mut ground = BASE_GROUND;
    for (i, template) in templates.iter().enumerate() {
        let x0 = (i as i32 + 1) * CHUNK_WIDTH;
        let chunk = AuthoredChunk {
            template,
            index: i + 1,
            x0,
            x1: x0 + CHUNK_WIDTH - 1,
            ground,
        };
        let top = chunk.lay_ground(&mut builder);
        if chunk.index % spacing == 0 && chunk.index > 1 {
            let id = format!("cp_{}_{}_{}", spec.world, spec.level, chunk.index);
            builder.add_checkpoint(id, x0 + 5, top - 2);
        }
        chunk.decorate(&mut builder, top, rules.world);
        chunks_used.push(template.id.clone());

        if template.has_tag(ChunkTag::DropStep) {
            ground = (ground + 1).min(GROUND_MAX);
        } else if template.has_tag(ChunkTag::RiseStep) {
            ground = (ground - 1).max(GROUND_MIN);
        }
    }

    builder.fill_columns(width - CHUNK_WIDTH, width - 1, BASE_GROUND);
    builder.add_entity(EntityKind::Goal, width - 3, BASE_GROUND - 3, None);
    chunks_used.push("end".to_owned());

    log::debug!(
        "Assembled authored level {} '{}': {} chunks",
        spec.key(),
        spec.title,
        templates.len()
    );
    Ok(builder.finish(LevelMetadata {
        world: rules.world,
        level_index: spec.level,
        theme: rules.theme,
        difficulty_tier: campaign_ordinal(spec.world, spec.level),
        chunks_used,
        seed,
        pacing: Some(spec.phases()),
    }))
}

struct AuthoredChunk<'a> {
    template: &'a ChunkTemplate,
    /// 1-based position in the authored sequence.
    index: usize,
    x0: i32,
    x1: i32,
    /// Ground row entering the chunk.
    ground: i32,
}

impl AuthoredChunk<'_> {
    fn has(&self, tag: ChunkTag) -> bool {
        self.template.has_tag(tag)
    }

    fn mid(&self) -> i32 {
        (self.x0 + self.x1) / 2
    }

    /// Fill the ground profile and carve gaps. Returns the highest ground row.
    fn lay_ground(&self, builder: &mut LevelBuilder) -> i32 {
        let half = self.x0 + CHUNK_WIDTH / 2;
        let mut top = self.ground;
        for x in self.x0..=self.x1 {
            let mut row = self.ground;
            if x >= half && self.has(ChunkTag::RiseStep) {
                row = (self.ground - 1).max(GROUND_MIN);
            }
            if x >= half && self.has(ChunkTag::DropStep) {
                row = (self.ground + 1).min(GROUND_MAX);
            }
            if x > self.x1 - 4 && self.has(ChunkTag::CliffEdge) {
                row = (self.ground + 1).min(GROUND_MAX);
            }
            builder.fill_column(x, row);
            top = top.min(row);
        }

        let g = self.ground;
        if self.has(ChunkTag::GapShort) {
            builder.clear_range(self.x0 + 9, self.x0 + 11, g);
            builder.add_entity(EntityKind::Spring, self.x0 + 8, g - 1, None);
        }
        if self.has(ChunkTag::GapLong) {
            builder.clear_range(self.x0 + 8, self.x0 + 14, g);
            builder.add_entity(EntityKind::Spring, self.x0 + 7, g - 1, None);
        }
        top
    }

    fn decorate(&self, builder: &mut LevelBuilder, g: i32, world: u32) {
        let (x0, x1, mid) = (self.x0, self.x1, self.mid());

        if self.has(ChunkTag::PowerupHint) || self.has(ChunkTag::PracticePad) {
            builder.add_entity(
                EntityKind::QuestionBlock,
                x0 + 9,
                g - 4,
                data([("variant", "practice".into())]),
            );
        }

        if self.has(ChunkTag::CoinStair) {
            for (i, drop) in COIN_STAIR.iter().enumerate() {
                builder.add_entity(EntityKind::Coin, x0 + 4 + i as i32, g - 4 + drop, None);
            }
        }
        if self.has(ChunkTag::CoinArch) {
            for (i, lift) in COIN_ARCH.iter().enumerate() {
                builder.add_entity(EntityKind::Coin, x0 + 3 + i as i32, g - 4 - lift, None);
            }
        }
        if self.has(ChunkTag::CoinRail) {
            for i in 0..6 {
                builder.add_entity(EntityKind::Coin, x0 + 2 + i, g - 4, None);
            }
        }
        if self.has(ChunkTag::CoinReward) {
            builder.add_entity(EntityKind::Coin, mid, g - 4, None);
        }

        if self.has(ChunkTag::PlatformBubble) {
            builder.paint_one_way(mid - 2, g - 5, 4, 1);
        }
        if self.has(ChunkTag::PlatformStack) {
            builder.paint_one_way(x0 + 5, g - 6, 4, 1);
            builder.paint_one_way(x0 + 11, g - 8, 4, 1);
            builder.paint_one_way(x0 + 17, g - 7, 4, 1);
        }
        if self.has(ChunkTag::VanishPlatform) {
            builder.paint_one_way(x0 + 8, g - 5, 3, 1);
            builder.paint_one_way(x0 + 14, g - 6, 3, 1);
        }

        if self.has(ChunkTag::WalkerPatrol) || self.has(ChunkTag::TurnaroundEnemy) {
            let patrol = 4 + (self.index % 3) as i64;
            builder.add_entity(
                EntityKind::Walker,
                mid,
                g - 1,
                data([("patrol", EntityValue::Int(patrol))]),
            );
        }
        if self.has(ChunkTag::Blocker) {
            builder.add_entity(
                EntityKind::Shell,
                x1 - 6,
                g - 1,
                data([("patrol", EntityValue::Int(4))]),
            );
        }
        if self.has(ChunkTag::FlyerDrift) {
            let amp = 16 + self.index as i64;
            builder.add_entity(
                EntityKind::Flying,
                x0 + 11,
                g - 6,
                data([("amp", EntityValue::Int(amp))]),
            );
        }

        if self.has(ChunkTag::SpikeLow) {
            builder.add_entity(EntityKind::Spike, mid, g - 1, None);
        }
        if self.has(ChunkTag::SpikeSweep) {
            for x in [x0 + 4, mid, x1 - 4] {
                builder.add_entity(EntityKind::Spike, x, g - 1, None);
            }
        }
        if self.has(ChunkTag::ThwompDrop) {
            builder.add_entity(
                EntityKind::Thwomp,
                x1 - 2,
                g - 7,
                data([("topY", (g - 12).into()), ("bottomY", (g - 1).into())]),
            );
        }

        if self.has(ChunkTag::MovePlatform) {
            builder.add_moving_platform(MovingPlatform {
                id: format!("mp_{}", self.index),
                x: (x0 + 12) * TILE_SIZE,
                y: (g - 5) * TILE_SIZE,
                min_x: (x0 + 6) * TILE_SIZE,
                max_x: (x0 + 18) * TILE_SIZE,
                speed: 45 + world * 2,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use levelforge_core::campaign::{HardRules, PacingPhase, PacingSegment};
    use levelforge_core::constants::{TILE_EMPTY, TILE_SOLID};

    fn template(id: &str, tags: Vec<ChunkTag>) -> ChunkTemplate {
        ChunkTemplate {
            id: id.into(),
            tags,
            recovery_after: false,
            mechanics_introduced: Vec::new(),
        }
    }

    fn catalog() -> ChunkCatalog {
        ChunkCatalog::from_templates(vec![
            template("flat", vec![ChunkTag::Flat]),
            template("gap", vec![ChunkTag::GapShort]),
            template("drop", vec![ChunkTag::DropStep]),
            template("walker", vec![ChunkTag::WalkerPatrol]),
            template("lift", vec![ChunkTag::MovePlatform]),
        ])
        .expect("unique ids")
    }

    fn spec(chunks: &[&str]) -> LevelSpec {
        LevelSpec {
            world: 3,
            level: 2,
            title: "DATA STREAMS".into(),
            sequence: PacingPhase::CANONICAL
                .iter()
                .enumerate()
                .map(|(i, &phase)| PacingSegment {
                    phase,
                    chunks: vec![chunks[i % chunks.len()].to_owned()],
                })
                .collect(),
            hard_rules: HardRules::for_level(3, false),
        }
    }

    #[test]
    fn test_layout_brackets_sequence() {
        let spec = spec(&["flat", "gap", "drop", "walker", "lift", "flat"]);
        let level = assemble_authored_level(&spec, &catalog(), 9).expect("known chunks");
        assert_eq!(level.width, 8 * CHUNK_WIDTH as u32);
        assert_eq!(
            level.metadata.chunks_used,
            ["start", "flat", "gap", "drop", "walker", "lift", "flat", "end"]
        );
        assert_eq!(level.metadata.pacing.as_deref(), Some(&PacingPhase::CANONICAL[..]));
        assert_eq!(level.count_of(EntityKind::Spawn), 1);
        assert_eq!(level.count_of(EntityKind::Goal), 1);
        assert_eq!(level.moving_platforms.len(), 1);
        assert_eq!(level.metadata.seed, 9);
    }

    #[test]
    fn test_gap_short_is_carved_with_spring() {
        let spec = spec(&["gap"]);
        let level = assemble_authored_level(&spec, &catalog(), 1).expect("known chunks");
        let x0 = CHUNK_WIDTH as usize;
        let g = BASE_GROUND as usize;
        assert_eq!(level.tile(x0 + 8, g), Some(TILE_SOLID));
        for x in x0 + 9..=x0 + 11 {
            assert_eq!(level.tile(x, g), Some(TILE_EMPTY));
        }
        assert_eq!(level.count_of(EntityKind::Spring), 6);
    }

    #[test]
    fn test_drop_step_lowers_following_chunks() {
        let spec = spec(&["drop", "flat"]);
        let level = assemble_authored_level(&spec, &catalog(), 1).expect("known chunks");
        // The second chunk (a flat) follows one drop step.
        let x = 2 * CHUNK_WIDTH as usize + 1;
        let g = BASE_GROUND as usize;
        assert_eq!(level.tile(x, g), Some(TILE_EMPTY));
        assert_eq!(level.tile(x, g + 1), Some(TILE_SOLID));
    }

    #[test]
    fn test_unknown_chunk_is_rejected() {
        let spec = spec(&["flat", "nope"]);
        let err = assemble_authored_level(&spec, &catalog(), 1).unwrap_err();
        assert_eq!(
            err,
            AssembleError::UnknownChunk {
                level: LevelKey::new(3, 2),
                chunk: "nope".into(),
            }
        );
        assert_eq!(err.to_string(), "Level 3-2 references unknown chunk id 'nope'");
    }

    #[test]
    fn test_whole_campaign_assembles_into_valid_levels() {
        let catalog = levelforge_rules::builtin_catalog().unwrap();
        for spec in &levelforge_rules::builtin_campaign().levels {
            let level = assemble_authored_level(spec, &catalog, 7).unwrap();
            assert_eq!(
                crate::structural::validate_level(&level),
                Ok(()),
                "level {}",
                spec.key()
            );
            assert_eq!(level.metadata.chunks_used.len(), spec.chunk_ids().len() + 2);
        }
    }
}
