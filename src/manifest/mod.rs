//! Chart manifest access
//!
//! The [ManifestAccess] trait is the narrow interface the workflows use to
//! validate a chart directory and to read and write its version field.
//!
//! - [chart::ChartDirectory]: Helm charts on the local filesystem
//! - [mock::MockManifests]: An in-memory implementation for testing

pub mod chart;
pub mod mock;

pub use chart::ChartDirectory;
pub use mock::MockManifests;

use std::fmt::Display;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_yaml::Value;

use crate::error::{Result, WellchartedError};

/// Default manifest file name inside a chart directory
pub const DEFAULT_MANIFEST: &str = "Chart.yaml";

/// Access to a chart's manifest
pub trait ManifestAccess {
    /// Path of the manifest file inside `dir`
    fn manifest_path(&self, dir: &Path) -> PathBuf;

    /// Check that `dir` is a chart directory
    ///
    /// # Returns
    /// * `Ok(())` - The directory holds a manifest with a non-empty name
    /// * `Err(InvalidDirectory)` - Otherwise, with the reason
    fn check_chart_dir(&self, dir: &Path) -> Result<()>;

    /// Read the raw version string from the manifest at `manifest`
    fn load_version(&self, manifest: &Path) -> Result<String>;

    /// Replace the version in the manifest at `manifest`, leaving every other
    /// field untouched
    fn save_version(&self, manifest: &Path, version: &str) -> Result<()>;
}

/// The parts of `Chart.yaml` wellcharted cares about
#[derive(Debug, Default, Deserialize)]
pub struct Chartfile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<Value>,
}

impl Chartfile {
    /// Parse manifest content; `source` names where it came from in errors
    pub fn from_slice(bytes: &[u8], source: impl Display) -> Result<Self> {
        serde_yaml::from_slice(bytes).map_err(|e| WellchartedError::manifest_read(source, e))
    }

    /// The version field as text
    ///
    /// Numeric scalars keep their textual form so that `version: 1.2` fails
    /// version parsing instead of manifest reading.
    pub fn version_string(&self, source: impl Display) -> Result<String> {
        match &self.version {
            Some(Value::String(version)) => Ok(version.clone()),
            Some(Value::Number(version)) => Ok(version.to_string()),
            None | Some(Value::Null) => Err(WellchartedError::manifest_read(
                source,
                "version field is missing",
            )),
            Some(_) => Err(WellchartedError::manifest_read(
                source,
                "version field is not a string",
            )),
        }
    }
}

/// Extract the version string from raw manifest content
pub fn version_from_bytes(bytes: &[u8], source: impl Display) -> Result<String> {
    std::str::from_utf8(bytes)
        .map_err(|e| WellchartedError::manifest_read(&source, e))?;
    Chartfile::from_slice(bytes, &source)?.version_string(&source)
}
