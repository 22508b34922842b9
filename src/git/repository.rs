use std::path::{Path, PathBuf};

use crate::error::{Result, WellchartedError};
use crate::git::RevisionLookup;
use git2::{ErrorCode, Oid, Repository as Git2Repo};
use tracing::debug;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
    cwd: PathBuf,
}

impl Git2Repository {
    /// Discover the repository enclosing `cwd`
    ///
    /// `cwd` is also the base for relative paths handed to
    /// [`read_file_at`](super::Repository::read_file_at).
    pub fn discover<P: AsRef<Path>>(cwd: P) -> Result<Self> {
        let cwd = cwd.as_ref().to_path_buf();
        let repo =
            Git2Repo::discover(&cwd).map_err(|cause| WellchartedError::RevisionResolution {
                reference: format!("git repository from {}", cwd.display()),
                cause,
            })?;
        debug!(git_dir = %repo.path().display(), "opened repository");

        Ok(Git2Repository { repo, cwd })
    }

    /// Map a filesystem path to a path inside the commit tree
    fn tree_path(&self, path: &Path) -> Result<PathBuf> {
        let workdir = match self.repo.workdir() {
            Some(workdir) => workdir,
            None if path.is_relative() => return Ok(path.to_path_buf()),
            None => {
                return Err(WellchartedError::historical_read(
                    path,
                    "work tree",
                    "bare repository has no work tree",
                ))
            }
        };

        let absolute = canonical_path(&self.cwd.join(path));
        let workdir = workdir.canonicalize().map_err(|e| {
            WellchartedError::historical_read(
                path,
                "work tree",
                format!("{}: {}", workdir.display(), e),
            )
        })?;

        absolute
            .strip_prefix(&workdir)
            .map(Path::to_path_buf)
            .map_err(|_| {
                WellchartedError::historical_read(
                    path,
                    "work tree",
                    format!("path is outside of {}", workdir.display()),
                )
            })
    }
}

/// Canonicalize the deepest existing ancestor directory so symlinked temp
/// dirs and `..` components line up with the canonical work tree root.
/// The file name itself is never resolved.
fn canonical_path(path: &Path) -> PathBuf {
    let mut tail = Vec::new();
    let mut current = path;
    while let (Some(parent), Some(name)) = (current.parent(), current.file_name()) {
        tail.push(name);
        if let Ok(base) = parent.canonicalize() {
            return tail.iter().rev().fold(base, |acc, part| acc.join(part));
        }
        current = parent;
    }
    path.to_path_buf()
}

impl super::Repository for Git2Repository {
    fn resolve_reference(&self, reference: &str) -> Result<Oid> {
        let object = self.repo.revparse_single(reference).map_err(|cause| {
            WellchartedError::RevisionResolution {
                reference: reference.to_string(),
                cause,
            }
        })?;

        let commit = object
            .peel_to_commit()
            .map_err(|cause| WellchartedError::RevisionResolution {
                reference: reference.to_string(),
                cause,
            })?;

        debug!(reference, commit = %commit.id(), "resolved reference");
        Ok(commit.id())
    }

    fn read_file_at(&self, commit: Oid, path: &Path) -> Result<RevisionLookup> {
        let tree_path = self.tree_path(path)?;
        let revision = commit.to_string();
        let read_error =
            |e: git2::Error| WellchartedError::historical_read(&tree_path, &revision, e);

        let tree = self
            .repo
            .find_commit(commit)
            .and_then(|c| c.tree())
            .map_err(read_error)?;

        let entry = match tree.get_path(&tree_path) {
            Ok(entry) => entry,
            Err(e) if e.code() == ErrorCode::NotFound => {
                debug!(path = %tree_path.display(), %commit, "path not present at revision");
                return Ok(RevisionLookup::NotFound);
            }
            Err(e) => return Err(read_error(e)),
        };

        let blob = entry
            .to_object(&self.repo)
            .map_err(read_error)?
            .into_blob()
            .map_err(|object| {
                WellchartedError::historical_read(
                    &tree_path,
                    &revision,
                    format!(
                        "expected a file but found a {}",
                        object.kind().map_or("unknown object", |k| k.str())
                    ),
                )
            })?;

        debug!(
            path = %tree_path.display(),
            %commit,
            size = blob.size(),
            "read file at revision"
        );
        Ok(RevisionLookup::Found(blob.content().to_vec()))
    }
}
