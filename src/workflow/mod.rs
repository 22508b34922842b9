//! The bump and compare workflows
//!
//! Both are plain functions over the [ManifestAccess](crate::manifest::ManifestAccess)
//! and [Repository](crate::git::Repository) traits. They never print and
//! never touch process state: outcomes and failures are returned to the
//! caller, which decides how to report them.

pub mod bump;
pub mod compare;

pub use bump::{bump, BumpOutcome};
pub use compare::{compare, CompareOutcome};
