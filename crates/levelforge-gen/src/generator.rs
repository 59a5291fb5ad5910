//! Procedural chunk-based level generator.
//!
//! A level is a strip of fixed-width chunks: a flat start chunk holding the
//! spawn, interior chunks drawn from the world's families, and a flat end
//! chunk holding the goal. Every random decision comes from one
//! [`SeededRng`] owned by the call, in a fixed order per chunk. Reordering
//! the draws changes every layout ever exported.

use levelforge_core::constants::{
    BASE_CHUNK_COUNT, BASE_GROUND, BONUS_CHUNK_COUNT, CHUNK_WIDTH, FINAL_CASTLE_CHUNK_COUNT,
    GROUND_MAX, GROUND_MIN, MAX_CHUNK_COUNT, TILE_SIZE,
};
use levelforge_core::level::{EntityKind, EntityValue, GeneratedLevel, LevelMetadata, MovingPlatform};
use levelforge_core::progression::{campaign_ordinal, generator_seed, is_final_castle};
use levelforge_core::world::{world_rules, Theme, WorldRuleset};

use crate::builder::{data, LevelBuilder};
use crate::families::{kind_pool, ChunkKind};
use crate::rng::SeededRng;

/// Coin arc height offsets above the arc baseline, left to right.
const COIN_ARC: [i32; 5] = [0, 1, 2, 1, 0];

/// Inputs of one generation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelRequest {
    pub world: u32,
    pub level_index: u32,
    pub seed: u32,
    pub bonus: bool,
}

impl LevelRequest {
    pub fn new(world: u32, level_index: u32, seed: u32) -> Self {
        Self {
            world,
            level_index,
            seed,
            bonus: false,
        }
    }

    pub fn bonus(mut self, bonus: bool) -> Self {
        self.bonus = bonus;
        self
    }
}

/// Number of chunks (start and end included) laid out for a level.
pub fn chunk_count(world: u32, level: u32, bonus: bool) -> u32 {
    if bonus {
        BONUS_CHUNK_COUNT
    } else if is_final_castle(world, level, bonus) {
        FINAL_CASTLE_CHUNK_COUNT
    } else {
        BASE_CHUNK_COUNT
            .saturating_add(world)
            .saturating_add(level)
            .min(MAX_CHUNK_COUNT)
    }
}

/// Generate the level for `request`. Pure: equal requests give equal levels.
pub fn generate_level(request: &LevelRequest) -> GeneratedLevel {
    let rules = world_rules(request.world);
    if rules.world != request.world {
        log::warn!("World {} out of range, using world {}", request.world, rules.world);
    }
    let world = rules.world;
    let level = request.level_index.max(1);
    let count = chunk_count(world, level, request.bonus);

    let mut layout = Layout {
        rules,
        world,
        level,
        final_castle: is_final_castle(world, level, request.bonus),
        rng: SeededRng::new(generator_seed(request.seed, world, level)),
        builder: LevelBuilder::new(count as i32 * CHUNK_WIDTH),
        chunks_used: vec!["start".to_owned()],
        ground: BASE_GROUND,
    };

    for chunk in 0..count {
        let x0 = chunk as i32 * CHUNK_WIDTH;
        let x1 = x0 + CHUNK_WIDTH - 1;
        if chunk == 0 {
            layout.start_chunk(x0, x1);
        } else if chunk == count - 1 {
            layout.end_chunk(x0, x1);
        } else {
            layout.interior_chunk(chunk, x0, x1);
        }
    }

    let width = count as i32 * CHUNK_WIDTH;
    if !layout.builder.has_entity(EntityKind::Goal) {
        log::warn!("Level {world}-{level} laid out no goal, appending one at the far edge");
        layout
            .builder
            .add_entity(EntityKind::Goal, width - 3, BASE_GROUND - 3, None);
    }

    let metadata = LevelMetadata {
        world,
        level_index: level,
        theme: if request.bonus { Theme::Bonus } else { rules.theme },
        difficulty_tier: campaign_ordinal(world, level),
        chunks_used: layout.chunks_used,
        seed: request.seed,
        pacing: None,
    };
    let generated = layout.builder.finish(metadata);
    log::debug!(
        "Generated level {}-{}{} seed {}: {} chunks, {} entities",
        world,
        level,
        if request.bonus { " (bonus)" } else { "" },
        request.seed,
        count,
        generated.entities.len()
    );
    generated
}

struct Layout {
    rules: &'static WorldRuleset,
    world: u32,
    level: u32,
    final_castle: bool,
    rng: SeededRng,
    builder: LevelBuilder,
    chunks_used: Vec<String>,
    /// Ground row of the most recent chunk.
    ground: i32,
}

impl Layout {
    fn start_chunk(&mut self, x0: i32, x1: i32) {
        self.builder.fill_columns(x0, x1, BASE_GROUND);
        self.builder
            .add_entity(EntityKind::Spawn, x0 + 2, BASE_GROUND - 2, None);
    }

    fn end_chunk(&mut self, x0: i32, x1: i32) {
        self.builder.fill_columns(x0, x1, BASE_GROUND);
        self.builder
            .add_entity(EntityKind::Goal, x1 - 2, BASE_GROUND - 3, None);
        self.chunks_used.push("end".to_owned());
    }

    fn interior_chunk(&mut self, chunk: u32, x0: i32, x1: i32) {
        let families = self.rules.chunk_families;
        let family = families[chunk as usize % families.len()];
        let pool = kind_pool(family, self.world, self.level);
        let kind = self.rng.pick(&pool).copied().unwrap_or(ChunkKind::MidFlat);
        self.chunks_used.push(family.as_str().to_owned());

        let variance = self
            .rng
            .next_int(-self.rules.ground_variance, self.rules.ground_variance);
        self.ground = (self.ground + variance).clamp(GROUND_MIN, GROUND_MAX);
        self.builder.fill_columns(x0, x1, self.ground);

        self.carve_gap(x0);
        self.place_checkpoint(chunk, x0);
        if kind == ChunkKind::CoinArc {
            self.coin_arc(x0);
        }
        if kind == ChunkKind::EnemyGauntlet || self.rng.chance(self.enemy_chance()) {
            self.enemies(x0);
        }
        if kind == ChunkKind::VerticalClimb {
            self.vertical_climb(x0);
        }
        if kind == ChunkKind::MovingPlatform || self.rng.chance(self.moving_platform_chance()) {
            self.moving_platform(chunk, x0);
        }
        self.filler_coins(x0, x1);
        if kind == ChunkKind::MidFlat && self.rng.chance(0.35) {
            let x = x0 + self.rng.next_int(8, 16);
            self.builder
                .add_entity(EntityKind::QuestionBlock, x, self.ground - 4, None);
        }
    }

    fn boosted(&self, base: f64, boost: f64) -> f64 {
        if self.final_castle {
            base + boost
        } else {
            base
        }
    }

    fn enemy_chance(&self) -> f64 {
        self.boosted(self.rules.enemy_density, 0.1)
    }

    fn moving_platform_chance(&self) -> f64 {
        self.boosted(self.rules.moving_platform_frequency, 0.12)
    }

    /// Optional pit with a rescue spring on its near lip.
    fn carve_gap(&mut self, x0: i32) {
        if !self.rng.chance(self.boosted(self.rules.gap_frequency, 0.08)) {
            return;
        }
        let width = self.rng.next_int(2, if self.final_castle { 5 } else { 4 });
        let start = x0 + self.rng.next_int(6, 13);
        self.builder.clear_range(start, start + width, self.ground);
        self.builder
            .add_entity(EntityKind::Spring, start - 1, self.ground - 1, None);
    }

    fn place_checkpoint(&mut self, chunk: u32, x0: i32) {
        let spacing = self.rules.checkpoint_spacing_chunks.max(1);
        if chunk % spacing != 0 || chunk <= 1 {
            return;
        }
        let id = format!("cp_{}_{}_{}", self.world, self.level, chunk);
        self.builder.add_checkpoint(id, x0 + 5, self.ground - 2);
        self.chunks_used.push("checkpoint".to_owned());
    }

    fn coin_arc(&mut self, x0: i32) {
        let g = self.ground;
        for (i, lift) in COIN_ARC.iter().enumerate() {
            self.builder
                .add_entity(EntityKind::Coin, x0 + 5 + i as i32, g - 4 - lift, None);
        }
        if self.rng.chance(0.6) {
            self.builder
                .add_entity(EntityKind::QuestionBlock, x0 + 7, g - 4, None);
        }
        if self.rng.chance(0.45) {
            self.builder.add_entity(EntityKind::Star, x0 + 11, g - 6, None);
        }
    }

    /// Walker always; shell, flyer and spitter each on their own draw.
    fn enemies(&mut self, x0: i32) {
        let g = self.ground;
        let fc = self.final_castle;
        self.builder
            .add_entity(EntityKind::Walker, x0 + 8, g - 1, data([("patrol", EntityValue::Int(4))]));
        if self.rng.chance(if fc { 0.78 } else { 0.5 }) {
            self.builder
                .add_entity(EntityKind::Shell, x0 + 14, g - 1, data([("patrol", EntityValue::Int(4))]));
        }
        if self.rng.chance(if fc { 0.58 } else { 0.35 }) {
            self.builder
                .add_entity(EntityKind::Flying, x0 + 17, g - 6, data([("amp", EntityValue::Int(20))]));
        }
        let spitter = (if fc { 0.62 } else { 0.3 }) + f64::from(self.world) * 0.06;
        if self.rng.chance(spitter) {
            let cadence = data([("cadenceMs", self.rules.projectile_cadence_ms.into())]);
            self.builder
                .add_entity(EntityKind::Spitter, x0 + 20, g - 1, cadence);
        }
    }

    /// Three stacked one-way platforms over a spike.
    fn vertical_climb(&mut self, x0: i32) {
        let g = self.ground;
        for i in 0..3 {
            self.builder.paint_one_way(x0 + 7 + i * 5, g - 4 - i * 3, 4, 2);
        }
        self.builder.add_entity(EntityKind::Spike, x0 + 5, g - 1, None);
    }

    /// Patrolling platform flanked by a thwomp and a spike.
    fn moving_platform(&mut self, chunk: u32, x0: i32) {
        let g = self.ground;
        let boost = if self.final_castle { 22 } else { 0 };
        self.builder.add_moving_platform(MovingPlatform {
            id: format!("mp_{chunk}"),
            x: (x0 + 10) * TILE_SIZE,
            y: (g - 6) * TILE_SIZE,
            min_x: (x0 + 5) * TILE_SIZE,
            max_x: (x0 + 16) * TILE_SIZE,
            speed: 50 + self.world * 8 + boost,
        });
        let rails = data([("topY", (g - 10).into()), ("bottomY", (g - 2).into())]);
        self.builder
            .add_entity(EntityKind::Thwomp, x0 + 18, g - 6, rails);
        self.builder.add_entity(EntityKind::Spike, x0 + 12, g - 1, None);
        if self.final_castle && self.rng.chance(0.5) {
            self.builder.add_entity(EntityKind::Spike, x0 + 8, g - 1, None);
        }
    }

    fn filler_coins(&mut self, x0: i32, x1: i32) {
        let density = self.rules.coin_density * if self.final_castle { 0.14 } else { 0.25 };
        let mut tx = x0 + 2;
        while tx < x1 - 1 {
            if self.rng.chance(density) {
                let lift = self.rng.next_int(2, 3);
                self.builder
                    .add_entity(EntityKind::Coin, tx, self.ground - lift, None);
            }
            tx += 3;
        }
    }
}
