//! Campaign pacing validator.
//!
//! Every authored level is checked against the chunk catalog and its
//! world's contract. All findings are collected, never short-circuited, so
//! one run reports every defect.

use std::collections::HashSet;
use std::fmt;

use levelforge_core::campaign::{CampaignArtifact, LevelSpec, PacingPhase};
use levelforge_core::chunk::{ChunkCatalog, ChunkTag};
use levelforge_core::constants::{MAX_WORLD, PHASE_COUNT};
use levelforge_core::types::LevelKey;
use levelforge_core::world::{WorldContract, WorldContracts};
use serde::Serialize;
use thiserror::Error;

use crate::config::{RecoveryPolicy, ValidatorConfig};

/// Whether a finding gates a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Blocking,
    Advisory,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Blocking => "blocking",
            Severity::Advisory => "advisory",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PacingViolation {
    #[error("world {world} is outside 1..={max}")]
    WorldOutOfRange { world: u32, max: u32 },
    #[error("stage {0} is not a positive integer")]
    InvalidStage(u32),
    #[error("level key {0} is authored more than once")]
    DuplicateLevel(LevelKey),
    #[error("title is empty")]
    EmptyTitle,
    #[error("sequence has {found} phases, expected {expected}")]
    PhaseCount { found: usize, expected: usize },
    #[error("phase {index} is {found}, expected {expected}")]
    PhaseOrder {
        index: usize,
        found: PacingPhase,
        expected: PacingPhase,
    },
    #[error("phase {0} has no chunks")]
    EmptyPhase(PacingPhase),
    #[error("uses unknown chunk id '{chunk}'")]
    UnknownChunk { chunk: String },
    #[error("hazard run of {run} chunks at '{chunk}' exceeds maxHazardClusters={max}")]
    HazardRunExceeded { chunk: String, run: u32, max: u32 },
    #[error("chunk '{chunk}' introduces {count} new mechanics ({mechanics}), allowed {max}")]
    MechanicBudgetExceeded {
        chunk: String,
        count: usize,
        max: u32,
        mechanics: String,
    },
    #[error("needs a recovery chunk within {gap} chunk(s) after '{hazard}' before {deadline}")]
    MissingRecovery {
        hazard: String,
        gap: u32,
        deadline: String,
    },
    #[error("chunk '{chunk}' carries tag(s) not allowed in world {world}: {tags}")]
    TagNotAllowed {
        chunk: String,
        world: u32,
        tags: String,
    },
    #[error("chunk '{chunk}' introduces hazard(s) not allowed in world {world}: {tags}")]
    HazardNotAllowed {
        chunk: String,
        world: u32,
        tags: String,
    },
    #[error("hardRules.{field}={level} is laxer than the world {world} contract ({contract})")]
    ContractMismatch {
        field: &'static str,
        level: u32,
        contract: u32,
        world: u32,
    },
    #[error("no contract is defined for world {0}")]
    MissingWorldContract(u32),
}

impl PacingViolation {
    /// Stable identifier of the failure kind.
    pub fn rule_id(&self) -> &'static str {
        match self {
            PacingViolation::WorldOutOfRange { .. } => "campaign.world.outOfRange",
            PacingViolation::InvalidStage(_) => "campaign.stage.invalid",
            PacingViolation::DuplicateLevel(_) => "campaign.level.duplicate",
            PacingViolation::EmptyTitle => "campaign.title.empty",
            PacingViolation::PhaseCount { .. } => "campaign.sequence.phaseCount",
            PacingViolation::PhaseOrder { .. } => "campaign.sequence.phaseOrder",
            PacingViolation::EmptyPhase(_) => "campaign.sequence.emptyPhase",
            PacingViolation::UnknownChunk { .. } => "campaign.chunk.unknown",
            PacingViolation::HazardRunExceeded { .. } => "campaign.hazard.runExceeded",
            PacingViolation::MechanicBudgetExceeded { .. } => "campaign.mechanics.budgetExceeded",
            PacingViolation::MissingRecovery { .. } => "campaign.recovery.missing",
            PacingViolation::TagNotAllowed { .. } => "campaign.tag.notAllowed",
            PacingViolation::HazardNotAllowed { .. } => "campaign.hazard.notAllowed",
            PacingViolation::ContractMismatch { .. } => "campaign.contract.mismatch",
            PacingViolation::MissingWorldContract(_) => "campaign.contract.missing",
        }
    }

    /// Suggested fix, where one is obvious.
    pub fn hint(&self) -> Option<&'static str> {
        Some(match self {
            PacingViolation::WorldOutOfRange { .. } => "move the level into an existing world",
            PacingViolation::InvalidStage(_) => "number stages from 1",
            PacingViolation::DuplicateLevel(_) => "renumber or remove one of the entries",
            PacingViolation::EmptyTitle => "give the level a display title",
            PacingViolation::PhaseCount { .. } | PacingViolation::PhaseOrder { .. } => {
                "use INTRO, PRACTICE, VARIATION, CHALLENGE, COOLDOWN, FINALE in that order"
            }
            PacingViolation::EmptyPhase(_) => "add at least one chunk to every phase",
            PacingViolation::UnknownChunk { .. } => {
                "register the chunk in the catalog or fix the id"
            }
            PacingViolation::HazardRunExceeded { .. } => {
                "break the run with a non-hazard chunk"
            }
            PacingViolation::MechanicBudgetExceeded { .. } => {
                "introduce the mechanics in separate chunks"
            }
            PacingViolation::MissingRecovery { .. } => {
                "insert a recovery chunk (recoveryAfter or COOLDOWN_LANE) sooner"
            }
            PacingViolation::TagNotAllowed { .. } => {
                "pick a chunk whose tags the world unlocks"
            }
            PacingViolation::HazardNotAllowed { .. } => {
                "move the hazard to a world that allows it"
            }
            PacingViolation::ContractMismatch { .. } => {
                "tighten the level's hardRules to at least the world contract"
            }
            PacingViolation::MissingWorldContract(_) => return None,
        })
    }

    /// Tag allowlist findings are advisory unless `strict`.
    pub fn severity(&self, strict: bool) -> Severity {
        match self {
            PacingViolation::TagNotAllowed { .. } if !strict => Severity::Advisory,
            _ => Severity::Blocking,
        }
    }
}

/// One located finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacingFailure {
    pub level: LevelKey,
    /// `source#world-stage[/chunk[i]]`
    pub location: String,
    pub severity: Severity,
    pub violation: PacingViolation,
}

impl PacingFailure {
    pub fn rule_id(&self) -> &'static str {
        self.violation.rule_id()
    }

    pub fn hint(&self) -> Option<&'static str> {
        self.violation.hint()
    }

    pub fn is_blocking(&self) -> bool {
        self.severity == Severity::Blocking
    }
}

impl fmt::Display for PacingFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} Level {} {}",
            self.rule_id(),
            self.location,
            self.level,
            self.violation
        )
    }
}

/// True if any finding gates a release.
pub fn has_blocking(failures: &[PacingFailure]) -> bool {
    failures.iter().any(PacingFailure::is_blocking)
}

/// Validate every level of `campaign`.
pub fn validate_campaign(
    campaign: &CampaignArtifact,
    catalog: &ChunkCatalog,
    contracts: &WorldContracts,
    config: &ValidatorConfig,
) -> Vec<PacingFailure> {
    let mut failures = Vec::new();
    let mut seen = HashSet::new();
    for spec in &campaign.levels {
        let mut sink = Sink::new(spec.key(), config, &mut failures);
        if !seen.insert(spec.key()) {
            sink.level(PacingViolation::DuplicateLevel(spec.key()));
        }
        check_level(spec, catalog, contracts, config.recovery_policy, &mut sink);
    }

    let blocking = failures.iter().filter(|f| f.is_blocking()).count();
    log::info!(
        "Validated {} levels: {} blocking, {} advisory",
        campaign.levels.len(),
        blocking,
        failures.len() - blocking
    );
    failures
}

/// Validate a single level outside of a campaign run.
pub fn validate_level_spec(
    spec: &LevelSpec,
    catalog: &ChunkCatalog,
    contracts: &WorldContracts,
    config: &ValidatorConfig,
) -> Vec<PacingFailure> {
    let mut failures = Vec::new();
    let mut sink = Sink::new(spec.key(), config, &mut failures);
    check_level(spec, catalog, contracts, config.recovery_policy, &mut sink);
    failures
}

struct Sink<'a> {
    key: LevelKey,
    prefix: String,
    strict: bool,
    out: &'a mut Vec<PacingFailure>,
}

impl<'a> Sink<'a> {
    fn new(key: LevelKey, config: &ValidatorConfig, out: &'a mut Vec<PacingFailure>) -> Self {
        Self {
            key,
            prefix: format!("{}#{}", config.source, key),
            strict: config.strict,
            out,
        }
    }

    fn push(&mut self, location: String, violation: PacingViolation) {
        let severity = violation.severity(self.strict);
        if severity == Severity::Advisory {
            log::warn!("Level {}: {}", self.key, violation);
        }
        self.out.push(PacingFailure {
            level: self.key,
            location,
            severity,
            violation,
        });
    }

    fn level(&mut self, violation: PacingViolation) {
        let location = self.prefix.clone();
        self.push(location, violation);
    }

    fn chunk(&mut self, index: usize, violation: PacingViolation) {
        let location = format!("{}/chunk[{}]", self.prefix, index);
        self.push(location, violation);
    }
}

fn check_level(
    spec: &LevelSpec,
    catalog: &ChunkCatalog,
    contracts: &WorldContracts,
    policy: RecoveryPolicy,
    sink: &mut Sink<'_>,
) {
    log::debug!("Validating level {} '{}'", spec.key(), spec.title);

    let world_in_range = (1..=MAX_WORLD).contains(&spec.world);
    if !world_in_range {
        sink.level(PacingViolation::WorldOutOfRange {
            world: spec.world,
            max: MAX_WORLD,
        });
    }
    if spec.level == 0 {
        sink.level(PacingViolation::InvalidStage(spec.level));
    }
    if spec.title.trim().is_empty() {
        sink.level(PacingViolation::EmptyTitle);
    }
    check_phases(spec, sink);

    let contract = if world_in_range {
        let contract = contracts.get(spec.world);
        if contract.is_none() {
            sink.level(PacingViolation::MissingWorldContract(spec.world));
        }
        contract
    } else {
        None
    };
    if let Some(contract) = contract {
        check_contract(spec, contract, sink);
    }

    check_sequence(spec, catalog, contract, policy, sink);
}

fn check_phases(spec: &LevelSpec, sink: &mut Sink<'_>) {
    if spec.sequence.len() != PHASE_COUNT {
        sink.level(PacingViolation::PhaseCount {
            found: spec.sequence.len(),
            expected: PHASE_COUNT,
        });
    }
    for (index, (segment, &expected)) in spec
        .sequence
        .iter()
        .zip(PacingPhase::CANONICAL.iter())
        .enumerate()
    {
        if segment.phase != expected {
            sink.level(PacingViolation::PhaseOrder {
                index,
                found: segment.phase,
                expected,
            });
        }
    }
    for segment in &spec.sequence {
        if segment.chunks.is_empty() {
            sink.level(PacingViolation::EmptyPhase(segment.phase));
        }
    }
}

/// A level may tighten its world's contract, never loosen it.
fn check_contract(spec: &LevelSpec, contract: &WorldContract, sink: &mut Sink<'_>) {
    let rules = &spec.hard_rules;
    let mut mismatch = |field, level, contract_value| {
        sink.level(PacingViolation::ContractMismatch {
            field,
            level,
            contract: contract_value,
            world: contract.world,
        });
    };
    if rules.max_new_mechanics_per_chunk > contract.max_new_mechanics_per_chunk {
        mismatch(
            "maxNewMechanicsPerChunk",
            rules.max_new_mechanics_per_chunk,
            contract.max_new_mechanics_per_chunk,
        );
    }
    if rules.min_recovery_gap < contract.min_recovery_gap {
        mismatch(
            "minRecoveryGap",
            rules.min_recovery_gap,
            contract.min_recovery_gap,
        );
    }
    if rules.max_hazard_clusters > contract.max_hazard_clusters {
        mismatch(
            "maxHazardClusters",
            rules.max_hazard_clusters,
            contract.max_hazard_clusters,
        );
    }
}

fn join_tags(tags: &[ChunkTag]) -> String {
    tags.iter().map(|t| t.as_str()).collect::<Vec<_>>().join(", ")
}

fn check_sequence(
    spec: &LevelSpec,
    catalog: &ChunkCatalog,
    contract: Option<&WorldContract>,
    policy: RecoveryPolicy,
    sink: &mut Sink<'_>,
) {
    let rules = &spec.hard_rules;
    let mut introduced: HashSet<&str> = HashSet::new();
    let mut hazard_run = 0u32;
    let mut recovery = RecoveryTracker::new(policy, rules.min_recovery_gap);

    for (index, chunk_id) in spec.chunk_ids().into_iter().enumerate() {
        // Unknown chunks are skipped by the pacing walk.
        let Some(template) = catalog.get(chunk_id) else {
            sink.chunk(
                index,
                PacingViolation::UnknownChunk {
                    chunk: chunk_id.to_owned(),
                },
            );
            continue;
        };

        if let Some(contract) = contract {
            let illegal: Vec<_> = template
                .tags
                .iter()
                .copied()
                .filter(|&t| !contract.allows_tag(t))
                .collect();
            if !illegal.is_empty() {
                sink.chunk(
                    index,
                    PacingViolation::TagNotAllowed {
                        chunk: chunk_id.to_owned(),
                        world: contract.world,
                        tags: join_tags(&illegal),
                    },
                );
            }
            let illegal_hazards: Vec<_> = template
                .hazard_tags()
                .filter(|&t| !contract.allows_hazard(t))
                .collect();
            if !illegal_hazards.is_empty() {
                sink.chunk(
                    index,
                    PacingViolation::HazardNotAllowed {
                        chunk: chunk_id.to_owned(),
                        world: contract.world,
                        tags: join_tags(&illegal_hazards),
                    },
                );
            }
        }

        let mut new_mechanics: Vec<&str> = Vec::new();
        for mechanic in &template.mechanics_introduced {
            if !introduced.contains(mechanic.as_str()) && !new_mechanics.contains(&mechanic.as_str())
            {
                new_mechanics.push(mechanic);
            }
        }
        if new_mechanics.len() > rules.max_new_mechanics_per_chunk as usize {
            sink.chunk(
                index,
                PacingViolation::MechanicBudgetExceeded {
                    chunk: chunk_id.to_owned(),
                    count: new_mechanics.len(),
                    max: rules.max_new_mechanics_per_chunk,
                    mechanics: new_mechanics.join(", "),
                },
            );
        }
        introduced.extend(new_mechanics);

        if let Some(hazard) = recovery.step(template.is_recovery()) {
            sink.chunk(
                index,
                PacingViolation::MissingRecovery {
                    hazard,
                    gap: rules.min_recovery_gap,
                    deadline: format!("'{chunk_id}'"),
                },
            );
        }

        if template.is_hazard() {
            hazard_run += 1;
            if hazard_run == rules.max_hazard_clusters + 1 {
                sink.chunk(
                    index,
                    PacingViolation::HazardRunExceeded {
                        chunk: chunk_id.to_owned(),
                        run: hazard_run,
                        max: rules.max_hazard_clusters,
                    },
                );
            }
            if !template.is_recovery() {
                recovery.open(chunk_id);
            }
        } else {
            hazard_run = 0;
        }
    }

    if let Some(hazard) = recovery.finish() {
        sink.level(PacingViolation::MissingRecovery {
            hazard,
            gap: rules.min_recovery_gap,
            deadline: "level end".to_owned(),
        });
    }
}

/// Open recovery obligation: the hazard that opened it and the chunks left.
struct Debt {
    hazard: String,
    remaining: u32,
}

/// Tracks the recovery obligation left by hazardous chunks.
struct RecoveryTracker {
    policy: RecoveryPolicy,
    gap: u32,
    debt: Option<Debt>,
}

impl RecoveryTracker {
    fn new(policy: RecoveryPolicy, gap: u32) -> Self {
        Self {
            policy,
            gap,
            debt: None,
        }
    }

    /// Account for the next known chunk. Returns the hazard whose window
    /// closed on it without recovery.
    fn step(&mut self, is_recovery: bool) -> Option<String> {
        let debt = self.debt.as_mut()?;
        if is_recovery {
            self.debt = None;
            return None;
        }
        debt.remaining = debt.remaining.saturating_sub(1);
        if debt.remaining == 0 {
            return self.debt.take().map(|d| d.hazard);
        }
        None
    }

    /// A hazardous non-recovery chunk was just laid out.
    fn open(&mut self, hazard: &str) {
        if self.gap == 0 {
            return;
        }
        match self.debt.as_mut() {
            Some(debt) => {
                if self.policy == RecoveryPolicy::Countdown {
                    debt.remaining = debt.remaining.max(self.gap);
                    debt.hazard = hazard.to_owned();
                }
            }
            None => {
                self.debt = Some(Debt {
                    hazard: hazard.to_owned(),
                    remaining: self.gap,
                });
            }
        }
    }

    /// Hazard still owed a recovery when the level ends.
    fn finish(self) -> Option<String> {
        self.debt.map(|d| d.hazard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use levelforge_core::campaign::{HardRules, PacingSegment};
    use levelforge_core::chunk::ChunkTemplate;

    fn template(id: &str, tags: Vec<ChunkTag>, recovery: bool, mechanics: &[&str]) -> ChunkTemplate {
        ChunkTemplate {
            id: id.into(),
            tags,
            recovery_after: recovery,
            mechanics_introduced: mechanics.iter().map(|m| (*m).to_owned()).collect(),
        }
    }

    fn catalog() -> ChunkCatalog {
        ChunkCatalog::from_templates(vec![
            template("flat", vec![ChunkTag::Flat], false, &[]),
            template("lane", vec![ChunkTag::CooldownLane], true, &[]),
            template("spike", vec![ChunkTag::SpikeLow], false, &["spike"]),
            template("sweep", vec![ChunkTag::SpikeSweep], false, &["spike"]),
            template("thwomp", vec![ChunkTag::ThwompDrop], false, &["thwomp"]),
            template("walker", vec![ChunkTag::WalkerPatrol], false, &["walker"]),
            template(
                "ambush",
                vec![ChunkTag::WalkerPatrol, ChunkTag::FlyerDrift],
                false,
                &["walker", "flying"],
            ),
            template("scroll", vec![ChunkTag::AutoScroll], false, &["auto_scroll"]),
        ])
        .expect("unique ids")
    }

    /// A level whose CHALLENGE phase holds `challenge`; every other phase is flat.
    fn level(world: u32, rules: HardRules, challenge: &[&str]) -> LevelSpec {
        let sequence = PacingPhase::CANONICAL
            .iter()
            .map(|&phase| PacingSegment {
                phase,
                chunks: if phase == PacingPhase::Challenge {
                    challenge.iter().map(|c| (*c).to_owned()).collect()
                } else {
                    vec!["flat".to_owned()]
                },
            })
            .collect();
        LevelSpec {
            world,
            level: 1,
            title: "TEST".into(),
            sequence,
            hard_rules: rules,
        }
    }

    fn rules(gap: u32, clusters: u32) -> HardRules {
        HardRules {
            max_new_mechanics_per_chunk: 1,
            min_recovery_gap: gap,
            max_hazard_clusters: clusters,
        }
    }

    fn run(spec: &LevelSpec, config: &ValidatorConfig) -> Vec<PacingFailure> {
        validate_level_spec(spec, &catalog(), &WorldContracts::builtin(), config)
    }

    fn ids(failures: &[PacingFailure]) -> Vec<&'static str> {
        failures.iter().map(PacingFailure::rule_id).collect()
    }

    #[test]
    fn test_clean_level_passes() {
        let spec = level(4, rules(2, 2), &["walker", "spike", "lane"]);
        assert!(run(&spec, &ValidatorConfig::default()).is_empty());
    }

    #[test]
    fn test_unknown_chunk_names_id_and_level() {
        let spec = level(2, rules(1, 1), &["walker", "ghost_chunk_99"]);
        let failures = run(&spec, &ValidatorConfig::default());
        assert_eq!(ids(&failures), ["campaign.chunk.unknown"]);
        let line = failures[0].to_string();
        assert!(line.contains("ghost_chunk_99"), "{line}");
        assert!(line.contains("2-1"), "{line}");
        assert_eq!(failures[0].location, "campaign#2-1/chunk[4]");
    }

    #[test]
    fn test_hazard_run_reported_once_per_run() {
        let spec = level(4, rules(2, 1), &["spike", "thwomp", "sweep", "lane"]);
        let failures = run(&spec, &ValidatorConfig::default());
        let runs: Vec<_> = failures
            .iter()
            .filter(|f| f.rule_id() == "campaign.hazard.runExceeded")
            .collect();
        assert_eq!(runs.len(), 1);
        assert!(matches!(
            &runs[0].violation,
            PacingViolation::HazardRunExceeded { chunk, run: 2, max: 1 } if chunk == "thwomp"
        ));
    }

    #[test]
    fn test_mechanic_budget_counts_first_seen_only() {
        let spec = level(2, rules(1, 1), &["ambush"]);
        let failures = run(&spec, &ValidatorConfig::default());
        assert_eq!(ids(&failures), ["campaign.mechanics.budgetExceeded"]);

        // Walker already introduced: the ambush adds only one new mechanic.
        let spec = level(2, rules(1, 1), &["walker", "ambush"]);
        assert!(run(&spec, &ValidatorConfig::default()).is_empty());
    }

    #[test]
    fn test_missing_recovery_within_gap() {
        let spec = level(2, rules(1, 1), &["spike", "walker", "lane"]);
        let failures = run(&spec, &ValidatorConfig::default());
        assert_eq!(ids(&failures), ["campaign.recovery.missing"]);
        assert_eq!(
            failures[0].violation.to_string(),
            "needs a recovery chunk within 1 chunk(s) after 'spike' before 'walker'"
        );
    }

    #[test]
    fn test_missing_recovery_at_level_end() {
        let mut spec = level(2, rules(1, 3), &["walker"]);
        spec.sequence[5].chunks = vec!["spike".to_owned()];
        let failures = run(&spec, &ValidatorConfig::default());
        assert_eq!(ids(&failures), ["campaign.recovery.missing"]);
        assert!(failures[0].to_string().ends_with("before level end"));
    }

    #[test]
    fn test_window_and_countdown_policies_differ() {
        // Two hazards, a calm chunk, then recovery: the window opened by the
        // first hazard closes on the calm chunk; a countdown restarted by the
        // second hazard is still open there.
        let spec = level(4, rules(2, 2), &["spike", "thwomp", "walker", "lane"]);
        let window = run(&spec, &ValidatorConfig::default());
        assert_eq!(ids(&window), ["campaign.recovery.missing"]);

        let countdown = ValidatorConfig {
            recovery_policy: RecoveryPolicy::Countdown,
            ..ValidatorConfig::default()
        };
        assert!(run(&spec, &countdown).is_empty());
    }

    #[test]
    fn test_window_drops_hazards_inside_an_open_window() {
        // 'thwomp' lands inside the window 'spike' opened, so only 'spike'
        // is reported when that window closes; nothing is owed afterwards.
        let spec = level(4, rules(2, 3), &["spike", "thwomp", "walker", "walker"]);
        let window = run(&spec, &ValidatorConfig::default());
        assert_eq!(ids(&window), ["campaign.recovery.missing"]);
        assert_eq!(window[0].location, "campaign#4-1/chunk[5]");
        assert!(matches!(
            &window[0].violation,
            PacingViolation::MissingRecovery { hazard, gap: 2, deadline }
                if hazard == "spike" && deadline == "'walker'"
        ));

        let countdown = ValidatorConfig {
            recovery_policy: RecoveryPolicy::Countdown,
            ..ValidatorConfig::default()
        };
        let failures = run(&spec, &countdown);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].location, "campaign#4-1/chunk[6]");
        assert!(matches!(
            &failures[0].violation,
            PacingViolation::MissingRecovery { hazard, .. } if hazard == "thwomp"
        ));
    }

    #[test]
    fn test_window_tracker_ignores_hazards_until_closed() {
        let mut tracker = RecoveryTracker::new(RecoveryPolicy::Window, 2);
        tracker.open("spike");
        assert_eq!(tracker.step(false), None);
        tracker.open("thwomp");
        assert_eq!(tracker.step(false).as_deref(), Some("spike"));
        assert_eq!(tracker.step(false), None);
        assert!(tracker.finish().is_none());
    }

    #[test]
    fn test_zero_gap_never_owes_recovery() {
        let spec = level(1, rules(0, 1), &["walker"]);
        let mut tracker = RecoveryTracker::new(RecoveryPolicy::Window, 0);
        tracker.open("spike");
        assert!(tracker.finish().is_none());
        // World 1 contract requires gap >= 1, so only the contract finding remains.
        let failures = run(&spec, &ValidatorConfig::default());
        assert_eq!(ids(&failures), ["campaign.contract.mismatch"]);
    }

    #[test]
    fn test_tag_allowlist_advisory_unless_strict() {
        let spec = level(2, rules(1, 1), &["walker", "scroll"]);
        let failures = run(&spec, &ValidatorConfig::default());
        assert_eq!(ids(&failures), ["campaign.tag.notAllowed"]);
        assert_eq!(failures[0].severity, Severity::Advisory);
        assert!(!has_blocking(&failures));

        let strict = ValidatorConfig {
            strict: true,
            ..ValidatorConfig::default()
        };
        let failures = run(&spec, &strict);
        assert_eq!(failures[0].severity, Severity::Blocking);
        assert!(has_blocking(&failures));
    }

    #[test]
    fn test_hazard_allowlist_is_blocking() {
        let spec = level(1, rules(1, 1), &["spike", "lane"]);
        let failures = run(&spec, &ValidatorConfig::default());
        assert_eq!(
            ids(&failures),
            ["campaign.tag.notAllowed", "campaign.hazard.notAllowed"]
        );
        assert!(has_blocking(&failures));
    }

    #[test]
    fn test_contract_mismatch_fields() {
        let spec = level(4, rules(1, 4), &["walker"]);
        let failures = run(&spec, &ValidatorConfig::default());
        let fields: Vec<_> = failures
            .iter()
            .filter_map(|f| match &f.violation {
                PacingViolation::ContractMismatch { field, .. } => Some(*field),
                _ => None,
            })
            .collect();
        assert_eq!(fields, ["minRecoveryGap", "maxHazardClusters"]);
    }

    #[test]
    fn test_raising_recovery_gap_clears_contract_failure() {
        let mut spec = level(5, rules(1, 3), &["walker", "lane"]);
        let failures = run(&spec, &ValidatorConfig::default());
        assert_eq!(ids(&failures), ["campaign.contract.mismatch"]);

        spec.hard_rules.min_recovery_gap = 2;
        assert!(run(&spec, &ValidatorConfig::default()).is_empty());
        spec.hard_rules.min_recovery_gap = 3;
        assert!(run(&spec, &ValidatorConfig::default()).is_empty());
    }

    #[test]
    fn test_structural_shape_checks() {
        let mut spec = level(9, rules(1, 1), &["walker"]);
        spec.level = 0;
        spec.title = "  ".into();
        spec.sequence.swap(0, 1);
        spec.sequence[2].chunks.clear();
        spec.sequence.pop();
        let failures = run(&spec, &ValidatorConfig::default());
        assert_eq!(
            ids(&failures),
            [
                "campaign.world.outOfRange",
                "campaign.stage.invalid",
                "campaign.title.empty",
                "campaign.sequence.phaseCount",
                "campaign.sequence.phaseOrder",
                "campaign.sequence.phaseOrder",
                "campaign.sequence.emptyPhase",
            ]
        );
    }

    #[test]
    fn test_duplicate_levels_and_missing_contract() {
        let spec = level(3, rules(1, 1), &["walker"]);
        let campaign = CampaignArtifact {
            version: "test".into(),
            generated_at: "now".into(),
            world_count: 7,
            levels: vec![spec.clone(), spec],
        };
        let contracts = WorldContracts {
            worlds: Vec::new(),
        };
        let failures = validate_campaign(
            &campaign,
            &catalog(),
            &contracts,
            &ValidatorConfig::default(),
        );
        assert_eq!(
            ids(&failures),
            [
                "campaign.contract.missing",
                "campaign.level.duplicate",
                "campaign.contract.missing",
            ]
        );
    }

    #[test]
    fn test_builtin_campaign_is_clean_under_every_setting() {
        let catalog = crate::defaults::builtin_catalog().unwrap();
        let contracts = WorldContracts::builtin();
        for recovery_policy in [RecoveryPolicy::Window, RecoveryPolicy::Countdown] {
            for strict in [false, true] {
                let config = ValidatorConfig {
                    strict,
                    recovery_policy,
                    ..ValidatorConfig::default()
                };
                let failures =
                    validate_campaign(crate::campaign::builtin_campaign(), &catalog, &contracts, &config);
                assert!(failures.is_empty(), "{recovery_policy:?}/{strict}: {failures:?}");
            }
        }
    }

    #[test]
    fn test_unknown_chunk_in_builtin_campaign_is_named() {
        let mut campaign = crate::campaign::builtin_campaign().clone();
        campaign.levels[9].sequence[3].chunks.push("ghost_chunk_99".into());
        let key = campaign.levels[9].key();
        let catalog = crate::defaults::builtin_catalog().unwrap();
        let failures = validate_campaign(
            &campaign,
            &catalog,
            &WorldContracts::builtin(),
            &ValidatorConfig::default(),
        );
        let unknown: Vec<_> = failures
            .iter()
            .filter(|f| f.rule_id() == "campaign.chunk.unknown")
            .collect();
        assert_eq!(unknown.len(), 1);
        assert_eq!(unknown[0].level, key);
        assert!(unknown[0].to_string().contains("ghost_chunk_99"));
        assert!(unknown[0].location.starts_with(&format!("campaign#{key}/chunk[")));
    }

    #[test]
    fn test_every_violation_has_rule_id_prefix() {
        let v = PacingViolation::MissingWorldContract(3);
        assert!(v.rule_id().starts_with("campaign."));
        assert!(v.hint().is_none());
        assert!(PacingViolation::EmptyTitle.hint().is_some());
    }
}
