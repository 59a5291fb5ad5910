//! Authored campaign data: pacing phases, hard rules and level specs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::LevelKey;

/// One of the six canonical pacing segments of an authored level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PacingPhase {
    Intro,
    Practice,
    Variation,
    Challenge,
    Cooldown,
    Finale,
}

impl PacingPhase {
    /// Required order of phases in every authored sequence.
    pub const CANONICAL: [PacingPhase; 6] = [
        PacingPhase::Intro,
        PacingPhase::Practice,
        PacingPhase::Variation,
        PacingPhase::Challenge,
        PacingPhase::Cooldown,
        PacingPhase::Finale,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PacingPhase::Intro => "INTRO",
            PacingPhase::Practice => "PRACTICE",
            PacingPhase::Variation => "VARIATION",
            PacingPhase::Challenge => "CHALLENGE",
            PacingPhase::Cooldown => "COOLDOWN",
            PacingPhase::Finale => "FINALE",
        }
    }
}

impl fmt::Display for PacingPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacingSegment {
    pub phase: PacingPhase,
    pub chunks: Vec<String>,
}

/// Per-level fairness bounds checked by the pacing validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HardRules {
    pub max_new_mechanics_per_chunk: u32,
    /// A recovery chunk must follow a hazard within this many chunks.
    pub min_recovery_gap: u32,
    /// Longest permitted run of consecutive hazard chunks.
    pub max_hazard_clusters: u32,
}

impl HardRules {
    /// Authoring defaults: one new mechanic per chunk, recovery spacing
    /// tightening from world 4, hazard clusters widening with world and boss.
    pub fn for_level(world: u32, boss: bool) -> Self {
        let max_hazard_clusters = if boss || world >= 5 {
            3
        } else if world >= 3 {
            2
        } else {
            1
        };
        Self {
            max_new_mechanics_per_chunk: 1,
            min_recovery_gap: if world >= 4 { 2 } else { 1 },
            max_hazard_clusters,
        }
    }
}

/// One authored level of the campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelSpec {
    pub world: u32,
    pub level: u32,
    pub title: String,
    pub sequence: Vec<PacingSegment>,
    pub hard_rules: HardRules,
}

impl LevelSpec {
    pub fn key(&self) -> LevelKey {
        LevelKey::new(self.world, self.level)
    }

    /// Chunk ids of every segment, in order.
    pub fn chunk_ids(&self) -> Vec<&str> {
        self.sequence
            .iter()
            .flat_map(|segment| segment.chunks.iter().map(String::as_str))
            .collect()
    }

    /// Each chunk id paired with the phase that contains it.
    pub fn phased_chunks(&self) -> impl Iterator<Item = (PacingPhase, &str)> {
        self.sequence
            .iter()
            .flat_map(|segment| segment.chunks.iter().map(move |c| (segment.phase, c.as_str())))
    }

    pub fn phases(&self) -> Vec<PacingPhase> {
        self.sequence.iter().map(|segment| segment.phase).collect()
    }
}

/// Persisted campaign document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignArtifact {
    pub version: String,
    pub generated_at: String,
    pub world_count: u32,
    pub levels: Vec<LevelSpec>,
}

impl CampaignArtifact {
    pub fn find(&self, key: LevelKey) -> Option<&LevelSpec> {
        self.levels.iter().find(|level| level.key() == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> LevelSpec {
        LevelSpec {
            world: 2,
            level: 3,
            title: "AVALANCHE ALLEY".into(),
            sequence: vec![
                PacingSegment {
                    phase: PacingPhase::Intro,
                    chunks: vec!["flat_intro_01".into(), "flat_intro_02".into()],
                },
                PacingSegment {
                    phase: PacingPhase::Practice,
                    chunks: vec!["coin_stair_01".into()],
                },
            ],
            hard_rules: HardRules::for_level(2, false),
        }
    }

    #[test]
    fn test_chunk_ids_flatten_in_order() {
        assert_eq!(
            spec().chunk_ids(),
            ["flat_intro_01", "flat_intro_02", "coin_stair_01"]
        );
        let phases: Vec<_> = spec().phased_chunks().map(|(p, _)| p).collect();
        assert_eq!(
            phases,
            [PacingPhase::Intro, PacingPhase::Intro, PacingPhase::Practice]
        );
    }

    #[test]
    fn test_hard_rule_defaults() {
        assert_eq!(HardRules::for_level(1, false).max_hazard_clusters, 1);
        assert_eq!(HardRules::for_level(3, false).max_hazard_clusters, 2);
        assert_eq!(HardRules::for_level(2, true).max_hazard_clusters, 3);
        assert_eq!(HardRules::for_level(3, false).min_recovery_gap, 1);
        assert_eq!(HardRules::for_level(4, false).min_recovery_gap, 2);
        assert_eq!(HardRules::for_level(7, true).max_new_mechanics_per_chunk, 1);
    }

    #[test]
    fn test_level_spec_json_shape() {
        let json = serde_json::to_value(spec()).expect("serialize");
        assert_eq!(json["hardRules"]["minRecoveryGap"], 1);
        assert_eq!(json["sequence"][0]["phase"], "INTRO");
        assert_eq!(json["sequence"][1]["chunks"][0], "coin_stair_01");
    }
}
