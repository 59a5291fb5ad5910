//! Library side of the `levelforge` binary: batch export, artifact export,
//! previews and report formatting.

pub mod artifacts;
pub mod export;
pub mod preview;
pub mod report;
