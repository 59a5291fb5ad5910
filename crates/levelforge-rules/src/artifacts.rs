//! Persisted companion artifacts: the chunk catalog and world contracts.

use levelforge_core::chunk::{ChunkCatalog, ChunkTemplate};
use levelforge_core::world::WorldContracts;
use serde::{Deserialize, Serialize};

use crate::campaign::CAMPAIGN_VERSION;

/// JSON form of a chunk catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogArtifact {
    pub version: String,
    pub chunks: Vec<ChunkTemplate>,
}

pub fn catalog_artifact(catalog: &ChunkCatalog) -> CatalogArtifact {
    CatalogArtifact {
        version: CAMPAIGN_VERSION.to_owned(),
        chunks: catalog.templates().to_vec(),
    }
}

/// Per-world allowed tags and hard-rule bounds, from the static world table.
pub fn world_rules_artifact() -> WorldContracts {
    WorldContracts::builtin()
}
