//! Post-generation structural checks.
//!
//! Guards against generator bugs, not content-design problems: a level that
//! fails here should not be exported or handed to the scene layer.

use levelforge_core::constants::MIN_CHUNKS_USED;
use levelforge_core::level::{EntityKind, GeneratedLevel};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    #[error("missing spawn")]
    MissingSpawn,
    #[error("duplicate spawn ({0} spawn entities)")]
    DuplicateSpawn(usize),
    #[error("missing goal")]
    MissingGoal,
    #[error("height mismatch: {rows} rows for declared height {height}")]
    HeightMismatch { rows: usize, height: u32 },
    #[error("width mismatch: row {row} has {len} tiles for declared width {width}")]
    WidthMismatch { row: usize, len: usize, width: u32 },
    #[error("insufficient chunks: {used} used, at least {min} required")]
    InsufficientChunks { used: usize, min: usize },
}

/// Run every structural check, collecting all defects.
pub fn validate_level(level: &GeneratedLevel) -> Result<(), Vec<StructuralError>> {
    let mut errors = Vec::new();

    match level.count_of(EntityKind::Spawn) {
        0 => errors.push(StructuralError::MissingSpawn),
        1 => {}
        n => errors.push(StructuralError::DuplicateSpawn(n)),
    }
    if level.count_of(EntityKind::Goal) == 0 {
        errors.push(StructuralError::MissingGoal);
    }

    if level.tile_grid.len() != level.height as usize {
        errors.push(StructuralError::HeightMismatch {
            rows: level.tile_grid.len(),
            height: level.height,
        });
    }
    // Report the first ragged row only; one is enough to reject the level.
    if let Some((row, r)) = level
        .tile_grid
        .iter()
        .enumerate()
        .find(|(_, r)| r.len() != level.width as usize)
    {
        errors.push(StructuralError::WidthMismatch {
            row,
            len: r.len(),
            width: level.width,
        });
    }

    let used = level.metadata.chunks_used.len();
    if used < MIN_CHUNKS_USED {
        errors.push(StructuralError::InsufficientChunks {
            used,
            min: MIN_CHUNKS_USED,
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Flat `{ok, errors}` view of [`validate_level`] for reports and exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelCheck {
    pub ok: bool,
    pub errors: Vec<String>,
}

pub fn check_level(level: &GeneratedLevel) -> LevelCheck {
    match validate_level(level) {
        Ok(()) => LevelCheck {
            ok: true,
            errors: Vec::new(),
        },
        Err(errors) => LevelCheck {
            ok: false,
            errors: errors.iter().map(ToString::to_string).collect(),
        },
    }
}
