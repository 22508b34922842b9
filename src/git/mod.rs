//! Revision reader abstraction layer
//!
//! This module provides a trait-based abstraction over the read-only git
//! operations wellcharted needs: resolving a reference to a commit and
//! reading a file as it was stored in that commit.
//!
//! # Overview
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: An in-memory implementation for testing
//!
//! Workflows depend on the [Repository] trait rather than a concrete
//! implementation so they can be exercised without a repository on disk.
//!
//! ```rust
//! # use wellcharted::git::{Repository, RevisionLookup};
//! # use std::path::Path;
//! # fn example<R: Repository>(repo: &R) -> wellcharted::Result<()> {
//! let commit = repo.resolve_reference("refs/remotes/origin/master")?;
//! match repo.read_file_at(commit, Path::new("charts/demo/Chart.yaml"))? {
//!     RevisionLookup::Found(bytes) => println!("{} bytes", bytes.len()),
//!     RevisionLookup::NotFound => println!("new chart"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use std::path::Path;

use crate::error::Result;
use git2::Oid;

/// Outcome of reading a file at a revision
///
/// A path missing from the commit is not an error: it is how a chart that has
/// never been merged shows up. Real failures travel in the surrounding
/// `Result`.
#[derive(Debug, Clone, PartialEq)]
pub enum RevisionLookup {
    /// Exact bytes of the blob stored at the path
    Found(Vec<u8>),
    /// The path did not exist in that commit
    NotFound,
}

/// Read-only access to repository history
///
/// ## Error Handling
///
/// Implementations map failures to resolve a reference to
/// [crate::error::WellchartedError::RevisionResolution] and failures to read
/// an existing commit's tree to
/// [crate::error::WellchartedError::HistoricalRead].
pub trait Repository {
    /// Resolve a reference (e.g. "refs/remotes/origin/master") to a commit
    ///
    /// # Returns
    /// * `Ok(Oid)` - The commit the reference points at, peeled through tags
    /// * `Err` - If the reference doesn't exist or doesn't lead to a commit
    fn resolve_reference(&self, reference: &str) -> Result<Oid>;

    /// Read a file's content as stored in `commit`
    ///
    /// # Arguments
    /// * `commit` - Commit whose tree is searched
    /// * `path` - File path; relative paths are relative to the working directory
    ///   the repository was opened from
    ///
    /// # Returns
    /// * `Ok(RevisionLookup::Found(bytes))` - The blob content
    /// * `Ok(RevisionLookup::NotFound)` - The path is absent from that commit
    /// * `Err` - The path cannot be mapped into the repository, names a tree,
    ///   or the object database failed
    fn read_file_at(&self, commit: Oid, path: &Path) -> Result<RevisionLookup>;
}
