use std::fmt;

use thiserror::Error;

/// Which step of the load-and-run sequence rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStage {
    Fetch,
    Instantiate,
    Start,
}

impl fmt::Display for LoadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadStage::Fetch => f.write_str("fetch"),
            LoadStage::Instantiate => f.write_str("instantiate"),
            LoadStage::Start => f.write_str("start"),
        }
    }
}

/// Everything that can go wrong while bootstrapping. All of these are
/// terminal for the attempt; none are retried.
#[derive(Debug, Error)]
pub enum BootError {
    /// The host has no WebAssembly engine at all.
    #[error("WebAssembly is not supported in your browser")]
    CapabilityMissing,

    /// The single load attempt rejected (bad URL, malformed module, entry
    /// point threw). Reported once to the diagnostic surface.
    #[error("module load failed during {stage}: {reason}")]
    LoadFailure { stage: LoadStage, reason: String },

    /// A named page element was absent when wiring was attempted.
    #[error("element not found: #{id}")]
    ElementNotFound { id: String },
}

impl BootError {
    pub fn load(stage: LoadStage, reason: impl Into<String>) -> Self {
        BootError::LoadFailure {
            stage,
            reason: reason.into(),
        }
    }
}
