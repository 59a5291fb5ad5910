//! Drift check between the built-in campaign and an exported mirror copy.

use std::collections::BTreeMap;

use levelforge_core::campaign::{CampaignArtifact, LevelSpec};
use levelforge_core::types::LevelKey;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MirrorDrift {
    #[error("level {0} is missing from the mirror")]
    MissingLevel(LevelKey),
    #[error("level {0} exists only in the mirror")]
    ExtraLevel(LevelKey),
    #[error("level {level} title differs: '{expected}' vs '{found}'")]
    TitleMismatch {
        level: LevelKey,
        expected: String,
        found: String,
    },
    #[error("level {0} hardRules differ")]
    HardRulesMismatch(LevelKey),
    #[error("level {0} chunk sequence differs")]
    SequenceMismatch(LevelKey),
    #[error("worldCount differs: {expected} vs {found}")]
    WorldCountMismatch { expected: u32, found: u32 },
}

fn index(campaign: &CampaignArtifact) -> BTreeMap<LevelKey, &LevelSpec> {
    campaign.levels.iter().map(|l| (l.key(), l)).collect()
}

/// Compare `mirror` against `builtin`, reporting every difference in key order.
pub fn check_mirror(builtin: &CampaignArtifact, mirror: &CampaignArtifact) -> Vec<MirrorDrift> {
    let mut drift = Vec::new();
    if builtin.world_count != mirror.world_count {
        drift.push(MirrorDrift::WorldCountMismatch {
            expected: builtin.world_count,
            found: mirror.world_count,
        });
    }

    let expected = index(builtin);
    let found = index(mirror);
    for (key, spec) in &expected {
        let Some(other) = found.get(key) else {
            drift.push(MirrorDrift::MissingLevel(*key));
            continue;
        };
        if spec.title != other.title {
            drift.push(MirrorDrift::TitleMismatch {
                level: *key,
                expected: spec.title.clone(),
                found: other.title.clone(),
            });
        }
        if spec.hard_rules != other.hard_rules {
            drift.push(MirrorDrift::HardRulesMismatch(*key));
        }
        if spec.sequence != other.sequence {
            drift.push(MirrorDrift::SequenceMismatch(*key));
        }
    }
    drift.extend(
        found
            .keys()
            .filter(|key| !expected.contains_key(key))
            .map(|key| MirrorDrift::ExtraLevel(*key)),
    );

    if !drift.is_empty() {
        log::warn!("Campaign mirror drifted in {} place(s)", drift.len());
    }
    drift
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::builtin_campaign;
    use crate::defaults::published_mirror;

    #[test]
    fn test_published_mirror_matches_builtin_table() {
        let mirror = published_mirror().unwrap();
        assert_eq!(mirror.levels.len(), 28);
        let drift = check_mirror(builtin_campaign(), &mirror);
        assert!(drift.is_empty(), "data/campaign.json drifted: {drift:?}");
    }

    #[test]
    fn test_reports_every_difference() {
        let builtin = builtin_campaign();
        let mut mirror = builtin.clone();
        mirror.world_count = 6;
        let removed = mirror.levels.remove(0).key();
        mirror.levels[0].title = "RENAMED".into();
        mirror.levels[1].hard_rules.max_hazard_clusters += 1;
        mirror.levels[2].sequence[0].chunks.push("flat_intro_01".into());
        let mut extra = mirror.levels[3].clone();
        extra.world = 9;
        let extra_key = extra.key();
        mirror.levels.push(extra);

        let drift = check_mirror(builtin, &mirror);
        assert_eq!(drift.len(), 6);
        assert_eq!(
            drift[0],
            MirrorDrift::WorldCountMismatch {
                expected: builtin.world_count,
                found: 6
            }
        );
        assert!(drift.contains(&MirrorDrift::MissingLevel(removed)));
        assert!(drift.contains(&MirrorDrift::HardRulesMismatch(mirror.levels[1].key())));
        assert!(drift.contains(&MirrorDrift::SequenceMismatch(mirror.levels[2].key())));
        assert_eq!(drift.last(), Some(&MirrorDrift::ExtraLevel(extra_key)));
        assert!(matches!(
            &drift[2],
            MirrorDrift::TitleMismatch { found, .. } if found == "RENAMED"
        ));
    }
}
