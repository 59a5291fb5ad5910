use thiserror::Error;

/// Errors raised while building a chunk catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Duplicate chunk id '{0}'")]
    DuplicateChunk(String),
}
