//! Writes the campaign, chunk catalog and world-rules artifacts as JSON.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use levelforge_core::chunk::ChunkCatalog;
use levelforge_rules::artifacts::{catalog_artifact, world_rules_artifact};
use levelforge_rules::builtin_campaign;
use serde::Serialize;

pub const CAMPAIGN_FILE: &str = "campaign.json";
pub const CATALOG_FILE: &str = "chunk_catalog.json";
pub const WORLD_RULES_FILE: &str = "world_rules.json";

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}

/// Write all three artifacts into `out_dir`, returning the written paths.
pub fn write_artifacts(out_dir: &Path, catalog: &ChunkCatalog) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let campaign = out_dir.join(CAMPAIGN_FILE);
    write_json(&campaign, builtin_campaign())?;
    let chunks = out_dir.join(CATALOG_FILE);
    write_json(&chunks, &catalog_artifact(catalog))?;
    let rules = out_dir.join(WORLD_RULES_FILE);
    write_json(&rules, &world_rules_artifact())?;

    log::info!("Wrote artifacts to {}", out_dir.display());
    Ok(vec![campaign, chunks, rules])
}
