use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{Result, WellchartedError};
use crate::git::{Repository, RevisionLookup};
use git2::Oid;

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    references: HashMap<String, Oid>,
    files: HashMap<(Oid, PathBuf), Vec<u8>>,
    broken: HashMap<Oid, String>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            references: HashMap::new(),
            files: HashMap::new(),
            broken: HashMap::new(),
        }
    }

    /// Point a reference at a commit
    pub fn set_reference(&mut self, reference: impl Into<String>, oid: Oid) {
        self.references.insert(reference.into(), oid);
    }

    /// Store a file's content at a commit
    pub fn add_file(&mut self, oid: Oid, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) {
        self.files.insert((oid, path.into()), content.into());
    }

    /// Make every read at `oid` fail with `reason`
    pub fn break_commit(&mut self, oid: Oid, reason: impl Into<String>) {
        self.broken.insert(oid, reason.into());
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn resolve_reference(&self, reference: &str) -> Result<Oid> {
        self.references.get(reference).copied().ok_or_else(|| {
            WellchartedError::RevisionResolution {
                reference: reference.to_string(),
                cause: git2::Error::from_str(&format!(
                    "revspec '{}' not found",
                    reference
                )),
            }
        })
    }

    fn read_file_at(&self, commit: Oid, path: &Path) -> Result<RevisionLookup> {
        if let Some(reason) = self.broken.get(&commit) {
            return Err(WellchartedError::historical_read(path, commit, reason));
        }

        Ok(self
            .files
            .get(&(commit, path.to_path_buf()))
            .cloned()
            .map_or(RevisionLookup::NotFound, RevisionLookup::Found))
    }
}
