use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, WellchartedError};
use crate::manifest::DEFAULT_MANIFEST;

/// Name of the configuration file looked up in the working and config directories
pub const CONFIG_FILE: &str = "wellcharted.toml";

/// Represents the complete configuration for wellcharted.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub chart: ChartConfig,

    #[serde(default)]
    pub compare: CompareConfig,
}

/// Returns the default manifest file name.
fn default_manifest() -> String {
    DEFAULT_MANIFEST.to_string()
}

/// Returns the default reference compared against.
fn default_reference() -> String {
    "refs/remotes/origin/master".to_string()
}

/// Configuration for locating the manifest inside a chart directory.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ChartConfig {
    #[serde(default = "default_manifest")]
    pub manifest: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        ChartConfig {
            manifest: default_manifest(),
        }
    }
}

/// Configuration for the compare command.
///
/// `reference` is any revision git can resolve; it is only read locally and
/// never fetched.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CompareConfig {
    #[serde(default = "default_reference")]
    pub reference: String,
}

impl Default for CompareConfig {
    fn default() -> Self {
        CompareConfig {
            reference: default_reference(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `wellcharted.toml` in `cwd`
/// 3. `wellcharted.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>, cwd: &Path) -> Result<Config> {
    let path = match config_path {
        Some(path) => Some(cwd.join(path)),
        None => find_config(cwd),
    };

    let Some(path) = path else {
        return Ok(Config::default());
    };

    let config_str = fs::read_to_string(&path).map_err(|e| {
        WellchartedError::config(format!("cannot read {}: {}", path.display(), e))
    })?;
    toml::from_str(&config_str)
        .map_err(|e| WellchartedError::config(format!("invalid {}: {}", path.display(), e)))
}

fn find_config(cwd: &Path) -> Option<PathBuf> {
    let local = cwd.join(CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_FILE))
        .filter(|path| path.exists())
}
