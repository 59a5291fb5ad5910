//! The authored campaign: one [`LevelSpec`] per (world, stage).
//!
//! The table is the single source of truth for documentation exports, the
//! pacing validator and any published JSON mirror. It is built once on
//! first use and never mutated afterwards.

use std::sync::OnceLock;

use levelforge_core::campaign::{
    CampaignArtifact, HardRules, LevelSpec, PacingPhase, PacingSegment,
};
use levelforge_core::constants::MAX_WORLD;
use levelforge_core::progression::is_boss_stage;
use levelforge_core::types::LevelKey;

pub const CAMPAIGN_VERSION: &str = "4.0.0";
pub const CAMPAIGN_GENERATED_AT: &str = "2026-02-14T00:00:00.000Z";

/// Static authoring record. `sequence` follows `PacingPhase::CANONICAL`.
struct StageDef {
    world: u32,
    stage: u32,
    title: &'static str,
    sequence: [&'static [&'static str]; 6],
}

const STAGES: [StageDef; 28] = [
    StageDef {
        world: 1,
        stage: 1,
        title: "GROUND LEVEL",
        sequence: [
            &["flat_intro_01", "flat_intro_02"],
            &["coin_stair_01", "gap_short_guarded_01"],
            &["flat_guide_01", "platform_bubble_01"],
            &["walker_patrol_01"],
            &["recovery_lane_01"],
            &["flat_finish_01"],
        ],
    },
    StageDef {
        world: 1,
        stage: 2,
        title: "BUILDING 7",
        sequence: [
            &["flat_intro_02", "platform_bubble_01"],
            &["coin_arch_01", "gap_short_guarded_01"],
            &["rise_step_01", "platform_stack_01"],
            &["walker_patrol_02", "flying_drift_01"],
            &["recovery_lane_01"],
            &["flat_finish_02"],
        ],
    },
    StageDef {
        world: 1,
        stage: 3,
        title: "THE NETWORK ECHO",
        sequence: [
            &["flat_intro_01", "flat_guide_01"],
            &["coin_rail_01", "gap_short_guarded_01"],
            &["falloff_step_01", "platform_bubble_02"],
            &["walker_patrol_03", "flying_drift_02"],
            &["recovery_lane_02"],
            &["flat_finish_01"],
        ],
    },
    StageDef {
        world: 1,
        stage: 4,
        title: "THE WATCHDOG",
        sequence: [
            &["flat_intro_01", "flat_intro_02"],
            &["coin_reward_01", "gap_short_guarded_01"],
            &["platform_stack_01", "coin_arch_01"],
            &["walker_patrol_01", "flying_drift_01", "mixed_ambush_01"],
            &["recovery_lane_02"],
            &["flat_finish_02"],
        ],
    },
    StageDef {
        world: 2,
        stage: 1,
        title: "PERMAFROST PROTOCOL",
        sequence: [
            &["flat_intro_02", "coin_stair_01"],
            &["gap_short_guarded_01", "coin_arch_01"],
            &["platform_bubble_01", "rise_step_01"],
            &["walker_patrol_02", "spike_low_01"],
            &["recovery_lane_01"],
            &["flat_finish_02"],
        ],
    },
    StageDef {
        world: 2,
        stage: 2,
        title: "THE SERVER GLACIER",
        sequence: [
            &["flat_intro_01", "flat_guide_01"],
            &["gap_long_01", "coin_rail_01"],
            &["platform_stack_01", "falloff_step_01"],
            &["shell_blocker_01", "thwomp_intro_01"],
            &["recovery_lane_02"],
            &["flat_finish_01"],
        ],
    },
    StageDef {
        world: 2,
        stage: 3,
        title: "AVALANCHE ALLEY",
        sequence: [
            &["flat_intro_02", "coin_arch_01"],
            &["spike_low_01", "recovery_lane_01"],
            &["flat_step_01", "platform_bubble_02"],
            &["walker_patrol_03", "flying_drift_01", "gap_long_01"],
            &["recovery_lane_02"],
            &["flat_finish_02"],
        ],
    },
    StageDef {
        world: 2,
        stage: 4,
        title: "THE GLACIAL MAINFRAME",
        sequence: [
            &["flat_intro_01", "flat_intro_02"],
            &["coin_reward_01", "gap_short_guarded_01"],
            &["platform_stack_01", "shell_blocker_01"],
            &["thwomp_intro_01", "recovery_lane_01", "spike_low_01"],
            &["recovery_lane_02"],
            &["flat_finish_01"],
        ],
    },
    StageDef {
        world: 3,
        stage: 1,
        title: "SUPERPOSITION",
        sequence: [
            &["flat_intro_01", "flat_intro_02"],
            &["moving_lift_01", "coin_stair_01"],
            &["platform_bubble_01", "rise_step_01"],
            &["walker_patrol_01", "spike_low_01"],
            &["recovery_lane_01"],
            &["flat_finish_01"],
        ],
    },
    StageDef {
        world: 3,
        stage: 2,
        title: "DATA STREAMS",
        sequence: [
            &["flat_intro_02", "coin_arch_01"],
            &["gap_short_guarded_01", "moving_lift_01"],
            &["platform_stack_01", "falloff_step_01"],
            &["flying_drift_01", "thwomp_intro_01"],
            &["recovery_lane_02"],
            &["flat_finish_02"],
        ],
    },
    StageDef {
        world: 3,
        stage: 3,
        title: "THE COLLAPSE",
        sequence: [
            &["flat_intro_01", "flat_guide_01"],
            &["spike_low_01", "gap_short_guarded_01"],
            &["moving_lift_01", "platform_bubble_02"],
            &["shell_blocker_01", "walker_patrol_02", "thwomp_intro_01"],
            &["recovery_lane_01"],
            &["flat_finish_01"],
        ],
    },
    StageDef {
        world: 3,
        stage: 4,
        title: "THE NULL POINTER",
        sequence: [
            &["flat_intro_02", "coin_rail_01"],
            &["gap_long_01", "platform_stack_01"],
            &["moving_lift_01", "flat_step_01"],
            &["walker_patrol_03", "spike_low_01", "recovery_lane_02", "thwomp_intro_01"],
            &["recovery_lane_01"],
            &["flat_finish_02"],
        ],
    },
    StageDef {
        world: 4,
        stage: 1,
        title: "THE FORGOTTEN ARCHIVE",
        sequence: [
            &["flat_intro_01", "flat_intro_02"],
            &["vanish_platform_01", "coin_stair_01"],
            &["spike_sweep_01", "gap_short_guarded_01"],
            &["walker_patrol_02", "thwomp_intro_01"],
            &["recovery_lane_01"],
            &["flat_finish_01"],
        ],
    },
    StageDef {
        world: 4,
        stage: 2,
        title: "THE DATA MINES",
        sequence: [
            &["flat_intro_02", "coin_arch_01"],
            &["gap_long_01", "vanish_platform_01"],
            &["falloff_step_01", "moving_lift_01"],
            &["shell_blocker_01", "spike_low_01"],
            &["recovery_lane_02"],
            &["flat_finish_02"],
        ],
    },
    StageDef {
        world: 4,
        stage: 3,
        title: "THE ENCRYPTED PASSAGE",
        sequence: [
            &["flat_intro_01", "flat_guide_01"],
            &["spike_low_01", "recovery_lane_01"],
            &["platform_stack_01", "rise_step_01"],
            &["flying_drift_02", "walker_patrol_01", "spike_sweep_01"],
            &["recovery_lane_02"],
            &["flat_finish_01"],
        ],
    },
    StageDef {
        world: 4,
        stage: 4,
        title: "THE QUBIT SERPENT",
        sequence: [
            &["flat_intro_02", "coin_reward_01"],
            &["vanish_platform_01", "gap_short_guarded_01"],
            &["moving_lift_01", "platform_bubble_02"],
            &["thwomp_intro_01", "recovery_lane_01", "spike_sweep_01", "walker_patrol_03"],
            &["recovery_lane_02"],
            &["flat_finish_02"],
        ],
    },
    StageDef {
        world: 5,
        stage: 1,
        title: "LEGACY LANE",
        sequence: [
            &["flat_intro_01", "flat_intro_02"],
            &["cliff_edge_01", "gap_short_guarded_01"],
            &["platform_stack_01", "coin_rail_01"],
            &["walker_patrol_01", "spike_low_01", "shell_blocker_01"],
            &["recovery_lane_01"],
            &["flat_finish_01"],
        ],
    },
    StageDef {
        world: 5,
        stage: 2,
        title: "THE RETRAINING CENTER",
        sequence: [
            &["flat_intro_02", "coin_arch_01"],
            &["vanish_platform_01", "moving_lift_01"],
            &["rise_step_01", "flying_drift_01"],
            &["thwomp_intro_01", "spike_sweep_01"],
            &["recovery_lane_02"],
            &["flat_finish_02"],
        ],
    },
    StageDef {
        world: 5,
        stage: 3,
        title: "RESURRECTION PROTOCOL",
        sequence: [
            &["flat_intro_01", "flat_guide_01"],
            &["gap_long_01", "platform_bubble_01"],
            &["cliff_edge_01", "walker_patrol_02"],
            &["flying_drift_02", "shell_blocker_01", "spike_low_01"],
            &["recovery_lane_01"],
            &["flat_finish_01"],
        ],
    },
    StageDef {
        world: 5,
        stage: 4,
        title: "THE LEGACY DAEMON",
        sequence: [
            &["flat_intro_02", "coin_reward_01"],
            &["moving_lift_01", "gap_short_guarded_01"],
            &["platform_stack_01", "falloff_step_01"],
            &["walker_patrol_03", "thwomp_intro_01", "spike_sweep_01"],
            &["recovery_lane_02"],
            &["flat_finish_02"],
        ],
    },
    StageDef {
        world: 6,
        stage: 1,
        title: "THE FIREWALL GAUNTLET",
        sequence: [
            &["flat_intro_01", "flat_intro_02"],
            &["benchmark_sprint_01", "gap_short_guarded_01"],
            &["vanish_platform_01", "moving_lift_01"],
            &["walker_patrol_01", "spike_sweep_01", "thwomp_intro_01"],
            &["recovery_lane_01"],
            &["flat_finish_01"],
        ],
    },
    StageDef {
        world: 6,
        stage: 2,
        title: "THE APPROACH",
        sequence: [
            &["flat_intro_02", "coin_stair_01"],
            &["cliff_edge_01", "flying_drift_01"],
            &["spike_low_01", "recovery_lane_01"],
            &["shell_blocker_01", "mixed_ambush_01", "thwomp_intro_01"],
            &["recovery_lane_02"],
            &["flat_finish_02"],
        ],
    },
    StageDef {
        world: 6,
        stage: 3,
        title: "THE SHARDWELL",
        sequence: [
            &["flat_intro_01", "flat_guide_01"],
            &["moving_lift_01", "gap_long_01"],
            &["platform_stack_01", "benchmark_sprint_01"],
            &["walker_patrol_02", "spike_low_01", "flying_drift_02"],
            &["recovery_lane_01"],
            &["flat_finish_01"],
        ],
    },
    StageDef {
        world: 6,
        stage: 4,
        title: "AI OVERLORD OMEGA",
        sequence: [
            &["flat_intro_02", "coin_reward_01"],
            &["vanish_platform_01", "gap_short_guarded_01"],
            &["cliff_edge_01", "platform_bubble_02"],
            &["walker_patrol_03", "thwomp_intro_01", "spike_sweep_01"],
            &["recovery_lane_02"],
            &["flat_finish_02"],
        ],
    },
    StageDef {
        world: 7,
        stage: 1,
        title: "THE LAST STAGE",
        sequence: [
            &["flat_intro_01", "flat_intro_02"],
            &["coin_rail_01", "benchmark_sprint_01"],
            &["moving_lift_01", "spike_low_01"],
            &["recovery_lane_01", "walker_patrol_01", "thwomp_intro_01"],
            &["recovery_lane_02"],
            &["flat_finish_01"],
        ],
    },
    StageDef {
        world: 7,
        stage: 2,
        title: "DEEP CORE BOUNDARY",
        sequence: [
            &["flat_intro_02", "coin_arch_01"],
            &["gap_long_01", "vanish_platform_01"],
            &["cliff_edge_01", "flying_drift_01"],
            &["shell_blocker_01", "spike_sweep_01", "thwomp_intro_01"],
            &["recovery_lane_01"],
            &["flat_finish_02"],
        ],
    },
    StageDef {
        world: 7,
        stage: 3,
        title: "THE TRUE APEX",
        sequence: [
            &["flat_intro_01", "flat_guide_01"],
            &["moving_lift_01", "gap_short_guarded_01"],
            &["benchmark_sprint_01", "platform_stack_01"],
            &["walker_patrol_02", "mixed_ambush_01", "spike_low_01"],
            &["recovery_lane_02"],
            &["flat_finish_01"],
        ],
    },
    StageDef {
        world: 7,
        stage: 4,
        title: "SINGULARITY CROWN",
        sequence: [
            &["flat_intro_02", "coin_reward_01"],
            &["vanish_platform_01", "benchmark_sprint_01"],
            &["cliff_edge_01", "moving_lift_01"],
            &["walker_patrol_03", "spike_sweep_01", "thwomp_intro_01"],
            &["recovery_lane_01"],
            &["flat_finish_02"],
        ],
    },
];

impl StageDef {
    fn to_spec(&self) -> LevelSpec {
        let sequence = PacingPhase::CANONICAL
            .iter()
            .zip(self.sequence.iter())
            .map(|(&phase, chunks)| PacingSegment {
                phase,
                chunks: chunks.iter().map(|c| (*c).to_owned()).collect(),
            })
            .collect();
        LevelSpec {
            world: self.world,
            level: self.stage,
            title: self.title.to_owned(),
            sequence,
            hard_rules: HardRules::for_level(self.world, is_boss_stage(self.world, self.stage)),
        }
    }
}

/// The builtin campaign artifact.
pub fn builtin_campaign() -> &'static CampaignArtifact {
    static CAMPAIGN: OnceLock<CampaignArtifact> = OnceLock::new();
    CAMPAIGN.get_or_init(|| CampaignArtifact {
        version: CAMPAIGN_VERSION.to_owned(),
        generated_at: CAMPAIGN_GENERATED_AT.to_owned(),
        world_count: MAX_WORLD,
        levels: STAGES.iter().map(StageDef::to_spec).collect(),
    })
}

/// Authored level spec for `key`, if the campaign has one.
pub fn campaign_level(key: LevelKey) -> Option<&'static LevelSpec> {
    builtin_campaign().find(key)
}
