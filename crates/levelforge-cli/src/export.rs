//! Level export to JSON files, one document per level.
//!
//! Procedural levels are seeded from the campaign seed so a re-export of the
//! same base seed reproduces byte-identical files. Levels that fail the
//! structural check are skipped and reported; the batch keeps going.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use levelforge_core::campaign::CampaignArtifact;
use levelforge_core::chunk::ChunkCatalog;
use levelforge_core::level::GeneratedLevel;
use levelforge_core::progression::{campaign_keys, campaign_seed};
use levelforge_core::types::LevelKey;
use levelforge_core::world::WorldContracts;
use levelforge_gen::{assemble_authored_level, generate_level, validate_level, LevelRequest};
use levelforge_rules::{has_blocking, validate_level_spec, ValidatorConfig};

/// What to export and where.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub out_dir: PathBuf,
    pub world: u32,
    pub levels: Vec<u32>,
    /// Every campaign level; `world` and `levels` are ignored.
    pub all: bool,
    pub bonus: bool,
    pub base_seed: u32,
}

/// A level that was not written, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub key: LevelKey,
    pub reasons: Vec<String>,
}

#[derive(Debug, Default)]
pub struct ExportSummary {
    pub written: Vec<PathBuf>,
    pub rejected: Vec<Rejection>,
}

impl ExportSummary {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// `w<world>_l<level>[_bonus].json`
pub fn level_file_name(world: u32, level: u32, bonus: bool) -> String {
    format!("w{}_l{}{}.json", world, level, if bonus { "_bonus" } else { "" })
}

/// Pretty JSON with a trailing newline.
pub fn write_level(path: &Path, level: &GeneratedLevel) -> Result<()> {
    let mut json = serde_json::to_string_pretty(level)?;
    json.push('\n');
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}

/// Export procedurally generated levels.
pub fn export_generated(options: &ExportOptions) -> Result<ExportSummary> {
    let keys: Vec<LevelKey> = if options.all {
        campaign_keys()
    } else {
        if options.world < 1 {
            bail!("Invalid world {}", options.world);
        }
        if options.levels.is_empty() {
            bail!("No levels provided for export");
        }
        if let Some(bad) = options.levels.iter().find(|&&l| l < 1) {
            bail!("Invalid level index {}", bad);
        }
        options
            .levels
            .iter()
            .map(|&level| LevelKey::new(options.world, level))
            .collect()
    };

    std::fs::create_dir_all(&options.out_dir)
        .with_context(|| format!("creating {}", options.out_dir.display()))?;

    let mut summary = ExportSummary::default();
    for key in keys {
        let seed = campaign_seed(options.base_seed, key.world, key.stage, options.bonus);
        let request = LevelRequest::new(key.world, key.stage, seed).bonus(options.bonus);
        let level = generate_level(&request);
        if let Err(errors) = validate_level(&level) {
            log::warn!("Level {} failed structural checks, skipped", key);
            summary.rejected.push(Rejection {
                key,
                reasons: errors.iter().map(ToString::to_string).collect(),
            });
            continue;
        }
        let path = options
            .out_dir
            .join(level_file_name(key.world, key.stage, options.bonus));
        write_level(&path, &level)?;
        log::debug!("Wrote {} (seed {})", path.display(), seed);
        summary.written.push(path);
    }

    log::info!(
        "Exported {} level(s) to {}, {} rejected",
        summary.written.len(),
        options.out_dir.display(),
        summary.rejected.len()
    );
    Ok(summary)
}

/// Export the authored campaign. Only levels with no blocking pacing
/// failure that also pass the structural check are written, as
/// `w<world>_l<level>_authored.json`.
pub fn export_authored(
    out_dir: &Path,
    campaign: &CampaignArtifact,
    catalog: &ChunkCatalog,
    contracts: &WorldContracts,
    config: &ValidatorConfig,
    base_seed: u32,
) -> Result<ExportSummary> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut summary = ExportSummary::default();
    for spec in &campaign.levels {
        let key = spec.key();
        let failures = validate_level_spec(spec, catalog, contracts, config);
        if has_blocking(&failures) {
            log::warn!("Level {} has blocking pacing failures, skipped", key);
            summary.rejected.push(Rejection {
                key,
                reasons: failures
                    .iter()
                    .filter(|f| f.is_blocking())
                    .map(ToString::to_string)
                    .collect(),
            });
            continue;
        }

        let seed = campaign_seed(base_seed, spec.world, spec.level, false);
        let level = match assemble_authored_level(spec, catalog, seed) {
            Ok(level) => level,
            Err(err) => {
                summary.rejected.push(Rejection {
                    key,
                    reasons: vec![err.to_string()],
                });
                continue;
            }
        };
        if let Err(errors) = validate_level(&level) {
            log::warn!("Level {} failed structural checks, skipped", key);
            summary.rejected.push(Rejection {
                key,
                reasons: errors.iter().map(ToString::to_string).collect(),
            });
            continue;
        }

        let path = out_dir.join(format!("w{}_l{}_authored.json", spec.world, spec.level));
        write_level(&path, &level)?;
        summary.written.push(path);
    }

    log::info!(
        "Exported {} authored level(s), {} rejected",
        summary.written.len(),
        summary.rejected.len()
    );
    Ok(summary)
}
