//! The generated level document.
//!
//! Field names and nesting are a compatibility surface for exporters and
//! downstream engine ports, so every struct serializes in camelCase and
//! optional fields are omitted rather than written as `null`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::campaign::PacingPhase;
use crate::types::{PixelPoint, TileGrid};
use crate::world::Theme;

/// Type tag of a placed entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Spawn,
    Goal,
    Coin,
    Star,
    QuestionBlock,
    Walker,
    Shell,
    Flying,
    Spitter,
    Spike,
    Thwomp,
    Checkpoint,
    Spring,
}

impl EntityKind {
    /// Stable tag used in entity ids and exported documents.
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Spawn => "spawn",
            EntityKind::Goal => "goal",
            EntityKind::Coin => "coin",
            EntityKind::Star => "star",
            EntityKind::QuestionBlock => "question_block",
            EntityKind::Walker => "walker",
            EntityKind::Shell => "shell",
            EntityKind::Flying => "flying",
            EntityKind::Spitter => "spitter",
            EntityKind::Spike => "spike",
            EntityKind::Thwomp => "thwomp",
            EntityKind::Checkpoint => "checkpoint",
            EntityKind::Spring => "spring",
        }
    }

    /// Enemies and static hazards that can damage the player.
    pub fn is_dangerous(self) -> bool {
        matches!(
            self,
            EntityKind::Walker
                | EntityKind::Shell
                | EntityKind::Flying
                | EntityKind::Spitter
                | EntityKind::Spike
                | EntityKind::Thwomp
        )
    }
}

/// A free-form entity data value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityValue {
    Int(i64),
    Flag(bool),
    Text(String),
}

impl From<i64> for EntityValue {
    fn from(v: i64) -> Self {
        EntityValue::Int(v)
    }
}

impl From<i32> for EntityValue {
    fn from(v: i32) -> Self {
        EntityValue::Int(i64::from(v))
    }
}

impl From<u32> for EntityValue {
    fn from(v: u32) -> Self {
        EntityValue::Int(i64::from(v))
    }
}

impl From<bool> for EntityValue {
    fn from(v: bool) -> Self {
        EntityValue::Flag(v)
    }
}

impl From<&str> for EntityValue {
    fn from(v: &str) -> Self {
        EntityValue::Text(v.to_owned())
    }
}

impl From<String> for EntityValue {
    fn from(v: String) -> Self {
        EntityValue::Text(v)
    }
}

/// Ordered key/value payload attached to an entity.
pub type EntityData = BTreeMap<String, EntityValue>;

/// A placed entity. `x`/`y` are the pixel centre of its tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelEntity {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub x: i32,
    pub y: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<EntityData>,
}

/// One-way platform rectangle in tile units (`w` tiles wide).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneWayPlatform {
    pub x: i32,
    pub y: i32,
    pub w: i32,
}

/// Horizontally patrolling platform, all positions in pixels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovingPlatform {
    pub id: String,
    pub x: i32,
    pub y: i32,
    pub min_x: i32,
    pub max_x: i32,
    /// Pixels per second.
    pub speed: u32,
}

/// Respawn point, in pixels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub id: String,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelMetadata {
    pub world: u32,
    pub level_index: u32,
    pub theme: Theme,
    /// Campaign-wide difficulty ordinal.
    pub difficulty_tier: u32,
    /// Ordered chunk/family identifiers actually laid out.
    pub chunks_used: Vec<String>,
    pub seed: u32,
    /// Pacing phases, present only on levels assembled from an authored spec.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pacing: Option<Vec<PacingPhase>>,
}

/// A complete generated level, ready for export or the scene layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedLevel {
    pub tile_size: i32,
    /// Width in tiles.
    pub width: u32,
    /// Height in tiles.
    pub height: u32,
    pub tile_grid: TileGrid,
    pub one_way_platforms: Vec<OneWayPlatform>,
    pub moving_platforms: Vec<MovingPlatform>,
    pub entities: Vec<LevelEntity>,
    pub checkpoints: Vec<Checkpoint>,
    pub goal: PixelPoint,
    pub metadata: LevelMetadata,
}

impl GeneratedLevel {
    /// Number of entities of the given kind.
    pub fn count_of(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|e| e.kind == kind).count()
    }

    /// Iterate entities of the given kind in emission order.
    pub fn entities_of(&self, kind: EntityKind) -> impl Iterator<Item = &LevelEntity> {
        self.entities.iter().filter(move |e| e.kind == kind)
    }

    /// Tile code at `(column, row)`, or `None` outside the grid.
    pub fn tile(&self, column: usize, row: usize) -> Option<u8> {
        self.tile_grid.get(row).and_then(|r| r.get(column)).copied()
    }
}
