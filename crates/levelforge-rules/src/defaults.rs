//! Content shipped with the crate.

use levelforge_core::campaign::CampaignArtifact;
use levelforge_core::chunk::ChunkCatalog;

use crate::config::ValidatorConfig;
use crate::loader::{
    load_campaign_from_json, load_catalog_from_ron, load_config_from_ron, LoadError,
};

pub const BUILTIN_CATALOG_RON: &str = include_str!("../../../data/chunks/catalog.ron");
pub const SAMPLE_CONFIG_RON: &str = include_str!("../../../data/levelforge.ron");
/// Published campaign mirror, as written by `levelforge artifacts`.
pub const CAMPAIGN_MIRROR_JSON: &str = include_str!("../../../data/campaign.json");

/// The builtin chunk catalog.
pub fn builtin_catalog() -> Result<ChunkCatalog, LoadError> {
    load_catalog_from_ron(BUILTIN_CATALOG_RON)
}

/// The committed campaign mirror.
pub fn published_mirror() -> Result<CampaignArtifact, LoadError> {
    load_campaign_from_json(CAMPAIGN_MIRROR_JSON)
}

/// The sample validator configuration.
pub fn sample_config() -> Result<ValidatorConfig, LoadError> {
    load_config_from_ron(SAMPLE_CONFIG_RON)
}
