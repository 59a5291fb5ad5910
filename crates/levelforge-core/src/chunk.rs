//! Chunk templates and the template catalog.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Structural capability marker carried by a chunk template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChunkTag {
    Flat,
    CooldownLane,
    CoinStair,
    CoinArch,
    CoinRail,
    CoinReward,
    GapShort,
    GapLong,
    PowerupHint,
    PracticePad,
    PlatformBubble,
    PlatformStack,
    ComedyVent,
    RiseStep,
    DropStep,
    CliffEdge,
    WalkerPatrol,
    TurnaroundEnemy,
    Blocker,
    SpikeLow,
    SpikeSweep,
    ThwompDrop,
    FlyerDrift,
    VanishPlatform,
    AutoScroll,
    MovePlatform,
}

impl ChunkTag {
    pub const ALL: [ChunkTag; 26] = [
        ChunkTag::Flat,
        ChunkTag::CooldownLane,
        ChunkTag::CoinStair,
        ChunkTag::CoinArch,
        ChunkTag::CoinRail,
        ChunkTag::CoinReward,
        ChunkTag::GapShort,
        ChunkTag::GapLong,
        ChunkTag::PowerupHint,
        ChunkTag::PracticePad,
        ChunkTag::PlatformBubble,
        ChunkTag::PlatformStack,
        ChunkTag::ComedyVent,
        ChunkTag::RiseStep,
        ChunkTag::DropStep,
        ChunkTag::CliffEdge,
        ChunkTag::WalkerPatrol,
        ChunkTag::TurnaroundEnemy,
        ChunkTag::Blocker,
        ChunkTag::SpikeLow,
        ChunkTag::SpikeSweep,
        ChunkTag::ThwompDrop,
        ChunkTag::FlyerDrift,
        ChunkTag::VanishPlatform,
        ChunkTag::AutoScroll,
        ChunkTag::MovePlatform,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ChunkTag::Flat => "FLAT",
            ChunkTag::CooldownLane => "COOLDOWN_LANE",
            ChunkTag::CoinStair => "COIN_STAIR",
            ChunkTag::CoinArch => "COIN_ARCH",
            ChunkTag::CoinRail => "COIN_RAIL",
            ChunkTag::CoinReward => "COIN_REWARD",
            ChunkTag::GapShort => "GAP_SHORT",
            ChunkTag::GapLong => "GAP_LONG",
            ChunkTag::PowerupHint => "POWERUP_HINT",
            ChunkTag::PracticePad => "PRACTICE_PAD",
            ChunkTag::PlatformBubble => "PLATFORM_BUBBLE",
            ChunkTag::PlatformStack => "PLATFORM_STACK",
            ChunkTag::ComedyVent => "COMEDY_VENT",
            ChunkTag::RiseStep => "RISE_STEP",
            ChunkTag::DropStep => "DROP_STEP",
            ChunkTag::CliffEdge => "CLIFF_EDGE",
            ChunkTag::WalkerPatrol => "WALKER_PATROL",
            ChunkTag::TurnaroundEnemy => "TURNAROUND_ENEMY",
            ChunkTag::Blocker => "BLOCKER",
            ChunkTag::SpikeLow => "SPIKE_LOW",
            ChunkTag::SpikeSweep => "SPIKE_SWEEP",
            ChunkTag::ThwompDrop => "THWOMP_DROP",
            ChunkTag::FlyerDrift => "FLYER_DRIFT",
            ChunkTag::VanishPlatform => "VANISH_PLATFORM",
            ChunkTag::AutoScroll => "AUTO_SCROLL",
            ChunkTag::MovePlatform => "MOVE_PLATFORM",
        }
    }

    /// Tags that mark a chunk as hazardous for pacing purposes.
    pub fn is_hazard(self) -> bool {
        matches!(
            self,
            ChunkTag::SpikeLow | ChunkTag::SpikeSweep | ChunkTag::ThwompDrop
        )
    }
}

impl fmt::Display for ChunkTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, immutable chunk template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkTemplate {
    pub id: String,
    pub tags: Vec<ChunkTag>,
    /// Calm, low-risk chunk that may settle a preceding hazard.
    #[serde(default)]
    pub recovery_after: bool,
    /// Mechanics this chunk is the first to introduce.
    #[serde(default)]
    pub mechanics_introduced: Vec<String>,
}

impl ChunkTemplate {
    pub fn has_tag(&self, tag: ChunkTag) -> bool {
        self.tags.contains(&tag)
    }

    pub fn is_hazard(&self) -> bool {
        self.tags.iter().any(|t| t.is_hazard())
    }

    /// Recovery chunks are flagged explicitly or carry a cooldown lane.
    pub fn is_recovery(&self) -> bool {
        self.recovery_after || self.has_tag(ChunkTag::CooldownLane)
    }

    pub fn hazard_tags(&self) -> impl Iterator<Item = ChunkTag> + '_ {
        self.tags.iter().copied().filter(|t| t.is_hazard())
    }
}

/// Registry of chunk templates, unique by id, in registration order.
#[derive(Debug, Clone, Default)]
pub struct ChunkCatalog {
    templates: Vec<ChunkTemplate>,
    index: HashMap<String, usize>,
}

impl ChunkCatalog {
    /// Register templates, rejecting duplicate ids.
    pub fn from_templates(templates: Vec<ChunkTemplate>) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();
        for template in templates {
            catalog.register(template)?;
        }
        Ok(catalog)
    }

    pub fn register(&mut self, template: ChunkTemplate) -> Result<(), CatalogError> {
        if self.index.contains_key(&template.id) {
            return Err(CatalogError::DuplicateChunk(template.id));
        }
        self.index.insert(template.id.clone(), self.templates.len());
        self.templates.push(template);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&ChunkTemplate> {
        self.index.get(id).map(|&i| &self.templates[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChunkTemplate> {
        self.templates.iter()
    }

    pub fn templates(&self) -> &[ChunkTemplate] {
        &self.templates
    }
}

/// Broad content category the procedural generator picks per chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkFamily {
    ServerRoom,
    TrainingRun,
    RagPipeline,
    RateLimiter,
}

impl ChunkFamily {
    pub fn as_str(self) -> &'static str {
        match self {
            ChunkFamily::ServerRoom => "server_room",
            ChunkFamily::TrainingRun => "training_run",
            ChunkFamily::RagPipeline => "rag_pipeline",
            ChunkFamily::RateLimiter => "rate_limiter",
        }
    }
}
