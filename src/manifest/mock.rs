use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::domain::SnapshotSource;
use crate::error::{Result, WellchartedError};
use crate::manifest::{ManifestAccess, DEFAULT_MANIFEST};

/// In-memory charts for testing without touching the filesystem
pub struct MockManifests {
    charts: HashSet<PathBuf>,
    versions: RefCell<HashMap<PathBuf, String>>,
    read_only: bool,
}

impl MockManifests {
    /// Create an empty set of charts
    pub fn new() -> Self {
        MockManifests {
            charts: HashSet::new(),
            versions: RefCell::new(HashMap::new()),
            read_only: false,
        }
    }

    /// Register a chart directory whose manifest holds `version`
    pub fn add_chart(&mut self, dir: impl Into<PathBuf>, version: impl Into<String>) {
        let dir = dir.into();
        self.versions
            .get_mut()
            .insert(dir.join(DEFAULT_MANIFEST), version.into());
        self.charts.insert(dir);
    }

    /// Make every save fail, as if the manifest were not writable
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Current version stored for a chart directory
    pub fn version_of(&self, dir: &Path) -> Option<String> {
        self.versions
            .borrow()
            .get(&dir.join(DEFAULT_MANIFEST))
            .cloned()
    }
}

impl Default for MockManifests {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestAccess for MockManifests {
    fn manifest_path(&self, dir: &Path) -> PathBuf {
        dir.join(DEFAULT_MANIFEST)
    }

    fn check_chart_dir(&self, dir: &Path) -> Result<()> {
        if self.charts.contains(dir) {
            Ok(())
        } else {
            Err(WellchartedError::invalid_directory(
                dir,
                format!("no {} exists in directory", DEFAULT_MANIFEST),
            ))
        }
    }

    fn load_version(&self, manifest: &Path) -> Result<String> {
        self.versions.borrow().get(manifest).cloned().ok_or_else(|| {
            WellchartedError::manifest_read(
                SnapshotSource::WorkingTree(manifest.to_path_buf()),
                "version field is missing",
            )
        })
    }

    fn save_version(&self, manifest: &Path, version: &str) -> Result<()> {
        if self.read_only {
            return Err(WellchartedError::persist(manifest, "permission denied"));
        }
        self.versions
            .borrow_mut()
            .insert(manifest.to_path_buf(), version.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_manifests_round_trip() {
        let mut charts = MockManifests::new();
        charts.add_chart("charts/demo", "1.0.0");

        let dir = Path::new("charts/demo");
        assert!(charts.check_chart_dir(dir).is_ok());
        assert!(charts.check_chart_dir(Path::new("charts/other")).is_err());

        let manifest = charts.manifest_path(dir);
        assert_eq!(charts.load_version(&manifest).unwrap(), "1.0.0");
        charts.save_version(&manifest, "1.0.1").unwrap();
        assert_eq!(charts.version_of(dir).as_deref(), Some("1.0.1"));
    }

    #[test]
    fn test_mock_manifests_read_only() {
        let mut charts = MockManifests::default();
        charts.add_chart("demo", "1.0.0");
        charts.set_read_only(true);

        let manifest = charts.manifest_path(Path::new("demo"));
        assert!(charts.save_version(&manifest, "1.0.1").is_err());
        assert_eq!(charts.version_of(Path::new("demo")).as_deref(), Some("1.0.0"));
    }
}
