use std::fmt;
use std::path::PathBuf;

use git2::Oid;

use crate::domain::ChartVersion;
use crate::error::{Result, WellchartedError};

/// Where a manifest's content was read from
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotSource {
    /// The manifest file in the local working tree
    WorkingTree(PathBuf),
    /// The manifest as committed at a resolved reference
    Revision { reference: String, commit: Oid },
}

impl fmt::Display for SnapshotSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotSource::WorkingTree(path) => write!(f, "working tree {}", path.display()),
            SnapshotSource::Revision { reference, commit } => {
                let hash = commit.to_string();
                write!(f, "{} ({})", reference, &hash[..7])
            }
        }
    }
}

/// A raw version string paired with where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestSnapshot {
    pub source: SnapshotSource,
    pub version: String,
}

impl ManifestSnapshot {
    pub fn new(source: SnapshotSource, version: impl Into<String>) -> Self {
        ManifestSnapshot {
            source,
            version: version.into(),
        }
    }

    /// Parse the raw version, naming this snapshot's source on failure
    pub fn parse_version(&self) -> Result<ChartVersion> {
        ChartVersion::parse(&self.version).map_err(|cause| WellchartedError::InvalidVersion {
            version: self.version.clone(),
            source_name: self.source.to_string(),
            cause,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_working_tree_display() {
        let source = SnapshotSource::WorkingTree(PathBuf::from("charts/demo/Chart.yaml"));
        assert_eq!(source.to_string(), "working tree charts/demo/Chart.yaml");
    }

    #[test]
    fn test_revision_display_shortens_hash() {
        let commit = Oid::from_str("abc1234def5678abc1234def5678abc1234def56").unwrap();
        let source = SnapshotSource::Revision {
            reference: "refs/remotes/origin/master".to_string(),
            commit,
        };
        assert_eq!(source.to_string(), "refs/remotes/origin/master (abc1234)");
    }

    #[test]
    fn test_parse_version() {
        let source = SnapshotSource::WorkingTree(PathBuf::from("Chart.yaml"));
        let snapshot = ManifestSnapshot::new(source.clone(), "1.2.3");
        assert_eq!(snapshot.parse_version().unwrap(), ChartVersion::new(1, 2, 3));

        let err = ManifestSnapshot::new(source, "1.2").parse_version().unwrap_err();
        assert!(matches!(err, WellchartedError::InvalidVersion { .. }));
        assert!(err.to_string().contains("working tree Chart.yaml"));
    }
}
