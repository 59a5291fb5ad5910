use std::path::Path;

use levelforge_core::campaign::CampaignArtifact;
use levelforge_core::chunk::{ChunkCatalog, ChunkTemplate};
use levelforge_core::error::CatalogError;
use levelforge_core::world::WorldContracts;
use thiserror::Error;

use crate::artifacts::CatalogArtifact;
use crate::config::ValidatorConfig;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to parse chunk catalog: {0}")]
    CatalogParseError(String),
    #[error("Failed to parse campaign artifact: {0}")]
    CampaignParseError(String),
    #[error("Failed to parse world rules artifact: {0}")]
    WorldRulesParseError(String),
    #[error("Failed to parse validator config: {0}")]
    ConfigParseError(String),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Parse a RON list of chunk templates into a catalog.
pub fn load_catalog_from_ron(ron_str: &str) -> Result<ChunkCatalog, LoadError> {
    let options = ron::Options::default();
    let templates: Vec<ChunkTemplate> = options
        .from_str(ron_str)
        .map_err(|e| LoadError::CatalogParseError(e.to_string()))?;
    Ok(ChunkCatalog::from_templates(templates)?)
}

/// Parse a chunk-catalog JSON artifact (`{version, chunks}`).
pub fn load_catalog_from_json(json: &str) -> Result<ChunkCatalog, LoadError> {
    let artifact: CatalogArtifact = serde_json::from_str(json)
        .map_err(|e| LoadError::CatalogParseError(e.to_string()))?;
    Ok(ChunkCatalog::from_templates(artifact.chunks)?)
}

pub fn load_campaign_from_json(json: &str) -> Result<CampaignArtifact, LoadError> {
    serde_json::from_str(json).map_err(|e| LoadError::CampaignParseError(e.to_string()))
}

pub fn load_world_rules_from_json(json: &str) -> Result<WorldContracts, LoadError> {
    serde_json::from_str(json).map_err(|e| LoadError::WorldRulesParseError(e.to_string()))
}

pub fn load_config_from_ron(ron_str: &str) -> Result<ValidatorConfig, LoadError> {
    let options = ron::Options::default();
    options
        .from_str(ron_str)
        .map_err(|e| LoadError::ConfigParseError(e.to_string()))
}

fn read(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Load a catalog file; `.json` is read as an artifact, anything else as RON.
pub fn load_catalog_file(path: &Path) -> Result<ChunkCatalog, LoadError> {
    let text = read(path)?;
    if is_json(path) {
        load_catalog_from_json(&text)
    } else {
        load_catalog_from_ron(&text)
    }
}

pub fn load_campaign_file(path: &Path) -> Result<CampaignArtifact, LoadError> {
    load_campaign_from_json(&read(path)?)
}

pub fn load_world_rules_file(path: &Path) -> Result<WorldContracts, LoadError> {
    load_world_rules_from_json(&read(path)?)
}

pub fn load_config_file(path: &Path) -> Result<ValidatorConfig, LoadError> {
    load_config_from_ron(&read(path)?)
}
