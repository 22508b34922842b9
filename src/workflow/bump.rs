use std::fmt;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::domain::{ChartVersion, ManifestSnapshot, SnapshotSource};
use crate::error::{Result, WellchartedError};
use crate::manifest::ManifestAccess;

/// Result of a successful bump
#[derive(Debug, Clone, PartialEq)]
pub struct BumpOutcome {
    pub dir: PathBuf,
    pub previous: ChartVersion,
    pub bumped: ChartVersion,
}

impl fmt::Display for BumpOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Bumped {} from {} to {}.",
            self.dir.display(),
            self.previous,
            self.bumped
        )
    }
}

/// Increment the patch version of the chart in `dir` and write it back
///
/// The chart directory is validated before anything is read, and the
/// manifest is only written once the new version has been computed, so any
/// failure leaves the file untouched.
pub fn bump<M: ManifestAccess + ?Sized>(dir: &Path, manifests: &M) -> Result<BumpOutcome> {
    manifests.check_chart_dir(dir)?;

    let manifest = manifests.manifest_path(dir);
    let snapshot = ManifestSnapshot::new(
        SnapshotSource::WorkingTree(manifest.clone()),
        manifests.load_version(&manifest)?,
    );
    let previous = snapshot.parse_version()?;
    let bumped = previous.increment_patch().ok_or_else(|| {
        WellchartedError::persist(
            &manifest,
            format!("patch number of {} cannot be incremented", previous),
        )
    })?;

    manifests.save_version(&manifest, &bumped.to_string())?;
    info!(path = %manifest.display(), %previous, %bumped, "bumped chart version");

    Ok(BumpOutcome {
        dir: dir.to_path_buf(),
        previous,
        bumped,
    })
}
