use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::domain::{ChartVersion, ManifestSnapshot, SnapshotSource};
use crate::error::{Result, WellchartedError};
use crate::git::{Repository, RevisionLookup};
use crate::manifest::{self, ManifestAccess};

/// Result of a passing comparison
#[derive(Debug, Clone, PartialEq)]
pub enum CompareOutcome {
    /// The manifest does not exist at the reference: nothing to compare against
    NewChart { manifest: PathBuf, reference: String },
    /// The working tree version is strictly greater than the reference version
    Newer {
        dir: PathBuf,
        local: ChartVersion,
        remote: ChartVersion,
    },
}

impl fmt::Display for CompareOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareOutcome::NewChart {
                manifest,
                reference,
            } => write!(
                f,
                "Unable to find {} on {}. New chart detected.",
                manifest.display(),
                reference
            ),
            CompareOutcome::Newer { dir, local, .. } => {
                write!(f, "New version {} for {}.", local, dir.display())
            }
        }
    }
}

/// Check that the chart in `dir` has a newer version than at `reference`
///
/// Steps:
/// 1. Validate the chart directory
/// 2. Resolve `reference` to a commit
/// 3. Read the manifest at that commit; a missing manifest passes as a new chart
/// 4. Parse the committed version, then the working tree version
/// 5. Require local > remote by SemVer precedence
///
/// # Returns
/// * `Ok(CompareOutcome)` - The chart is new, or its version was bumped
/// * `Err(OrderingViolation)` - The working tree version is not greater
/// * `Err(_)` - Any other step failed; nothing is coerced into a pass
pub fn compare<M, R>(
    dir: &Path,
    reference: &str,
    manifests: &M,
    repo: &R,
) -> Result<CompareOutcome>
where
    M: ManifestAccess + ?Sized,
    R: Repository + ?Sized,
{
    manifests.check_chart_dir(dir)?;
    let manifest = manifests.manifest_path(dir);

    let commit = repo.resolve_reference(reference)?;
    let content = match repo.read_file_at(commit, &manifest)? {
        RevisionLookup::Found(content) => content,
        RevisionLookup::NotFound => {
            info!(path = %manifest.display(), reference, "no manifest at reference");
            return Ok(CompareOutcome::NewChart {
                manifest,
                reference: reference.to_string(),
            });
        }
    };

    let remote_source = SnapshotSource::Revision {
        reference: reference.to_string(),
        commit,
    };
    let remote_version = manifest::version_from_bytes(&content, &remote_source)?;
    let remote = ManifestSnapshot::new(remote_source, remote_version).parse_version()?;

    let local = ManifestSnapshot::new(
        SnapshotSource::WorkingTree(manifest.clone()),
        manifests.load_version(&manifest)?,
    )
    .parse_version()?;

    debug!(%local, %remote, %commit, "comparing chart versions");
    if !local.greater_than(&remote) {
        return Err(WellchartedError::OrderingViolation {
            local: local.to_string(),
            remote: remote.to_string(),
            dir: dir.to_path_buf(),
            reference: reference.to_string(),
        });
    }

    Ok(CompareOutcome::Newer {
        dir: dir.to_path_buf(),
        local,
        remote,
    })
}
