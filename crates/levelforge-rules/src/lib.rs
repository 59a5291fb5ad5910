//! Authored campaign data, its loaders, and the pacing validator.

pub mod artifacts;
pub mod campaign;
pub mod config;
pub mod defaults;
pub mod loader;
pub mod mirror;
pub mod validator;

pub use campaign::{builtin_campaign, campaign_level};
pub use config::{RecoveryPolicy, ValidatorConfig};
pub use defaults::builtin_catalog;
pub use loader::LoadError;
pub use mirror::{check_mirror, MirrorDrift};
pub use validator::{
    has_blocking, validate_campaign, validate_level_spec, PacingFailure, PacingViolation,
    Severity,
};
