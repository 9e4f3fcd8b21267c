use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScrollSyncError {
    #[error("unknown section: {0}")]
    UnknownSection(String),

    /// A programmatic scroll did not settle in time and was force-completed.
    /// Only ever logged.
    #[error("scroll to section {target} did not settle within {waited:?}")]
    ScrollTimeout { target: String, waited: Duration },

    #[error("invalid site configuration: {0}")]
    Config(String),

    #[error("browser API failure: {0}")]
    Dom(String),
}

impl ScrollSyncError {
    pub fn unknown(id: impl Into<String>) -> Self {
        ScrollSyncError::UnknownSection(id.into())
    }
}

pub type Result<T> = std::result::Result<T, ScrollSyncError>;
