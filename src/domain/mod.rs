//! Domain logic - pure version rules independent of git and the filesystem

pub mod snapshot;
pub mod version;

pub use snapshot::{ManifestSnapshot, SnapshotSource};
pub use version::ChartVersion;
