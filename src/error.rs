use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for wellcharted operations
#[derive(Error, Debug)]
pub enum WellchartedError {
    #[error("{} is not a chart directory: {reason}", path.display())]
    InvalidDirectory { path: PathBuf, reason: String },

    #[error("unable to read chart manifest from {source_name}: {reason}")]
    ManifestRead { source_name: String, reason: String },

    #[error("error parsing chart version '{version}' from {source_name}: {cause}")]
    InvalidVersion {
        version: String,
        source_name: String,
        #[source]
        cause: semver::Error,
    },

    #[error("unable to resolve '{reference}': {cause}")]
    RevisionResolution {
        reference: String,
        #[source]
        cause: git2::Error,
    },

    #[error("unable to read {} at {revision}: {reason}", path.display())]
    HistoricalRead {
        path: PathBuf,
        revision: String,
        reason: String,
    },

    #[error("Version {local} for {} is not greater than {remote} on {reference}.", dir.display())]
    OrderingViolation {
        local: String,
        remote: String,
        dir: PathBuf,
        reference: String,
    },

    #[error("error saving chart {}: {reason}", path.display())]
    Persist { path: PathBuf, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience type alias for Results in wellcharted
pub type Result<T> = std::result::Result<T, WellchartedError>;

impl WellchartedError {
    pub fn invalid_directory(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        WellchartedError::InvalidDirectory {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn manifest_read(source_name: impl ToString, reason: impl ToString) -> Self {
        WellchartedError::ManifestRead {
            source_name: source_name.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn historical_read(
        path: impl Into<PathBuf>,
        revision: impl ToString,
        reason: impl ToString,
    ) -> Self {
        WellchartedError::HistoricalRead {
            path: path.into(),
            revision: revision.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn persist(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        WellchartedError::Persist {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        WellchartedError::Config(msg.into())
    }
}
