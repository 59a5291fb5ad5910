use serde::{Deserialize, Serialize};

/// How the recovery-gap rule counts chunks after a hazard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RecoveryPolicy {
    /// The first unrecovered hazard fixes the deadline; later hazards inside
    /// the window do not extend it.
    #[default]
    Window,
    /// Every hazard restarts the countdown to at least `minRecoveryGap`.
    Countdown,
}

/// Pacing validator settings, loadable from RON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Escalate advisory findings to blocking.
    pub strict: bool,
    pub recovery_policy: RecoveryPolicy,
    /// Prefix of every failure location hint.
    pub source: String,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            strict: false,
            recovery_policy: RecoveryPolicy::Window,
            source: "campaign".to_owned(),
        }
    }
}
