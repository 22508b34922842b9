use std::cmp::Ordering;
use std::fmt;

use semver::{BuildMetadata, Prerelease, Version};

/// Semantic version of a chart
///
/// Wraps [`semver::Version`] so that ordering follows precedence rules only:
/// build metadata is carried for display but never compared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartVersion(Version);

impl ChartVersion {
    /// Create a release version with no pre-release or build metadata
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        ChartVersion(Version::new(major, minor, patch))
    }

    /// Parse a version string (e.g., "1.2.3", "v1.2.3-rc.1+build.5")
    ///
    /// A single leading `v` or `V` is accepted. Everything after it must follow
    /// the SemVer 2.0.0 grammar exactly.
    pub fn parse(text: &str) -> std::result::Result<Self, semver::Error> {
        let clean = text
            .strip_prefix('v')
            .or_else(|| text.strip_prefix('V'))
            .unwrap_or(text);
        Version::parse(clean).map(ChartVersion)
    }

    pub fn major(&self) -> u64 {
        self.0.major
    }

    pub fn minor(&self) -> u64 {
        self.0.minor
    }

    pub fn patch(&self) -> u64 {
        self.0.patch
    }

    pub fn is_prerelease(&self) -> bool {
        !self.0.pre.is_empty()
    }

    pub fn has_build_metadata(&self) -> bool {
        !self.0.build.is_empty()
    }

    /// Next patch release: patch + 1, pre-release and build metadata dropped
    ///
    /// Returns `None` when the patch number is already `u64::MAX`.
    pub fn increment_patch(&self) -> Option<Self> {
        let patch = self.0.patch.checked_add(1)?;
        Some(ChartVersion(Version {
            major: self.0.major,
            minor: self.0.minor,
            patch,
            pre: Prerelease::EMPTY,
            build: BuildMetadata::EMPTY,
        }))
    }

    /// Compare by SemVer precedence, ignoring build metadata
    pub fn precedence(&self, other: &Self) -> Ordering {
        (self.0.major, self.0.minor, self.0.patch)
            .cmp(&(other.0.major, other.0.minor, other.0.patch))
            .then_with(|| self.0.pre.cmp(&other.0.pre))
    }

    /// Strictly newer than `other` by precedence
    pub fn greater_than(&self, other: &Self) -> bool {
        self.precedence(other) == Ordering::Greater
    }
}

impl fmt::Display for ChartVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(text: &str) -> ChartVersion {
        ChartVersion::parse(text).unwrap()
    }

    #[test]
    fn test_parse_components() {
        let version = v("1.2.3");
        assert_eq!(version.major(), 1);
        assert_eq!(version.minor(), 2);
        assert_eq!(version.patch(), 3);
        assert!(!version.is_prerelease());
        assert!(!version.has_build_metadata());
    }

    #[test]
    fn test_parse_with_prefix() {
        assert_eq!(v("v1.2.3"), ChartVersion::new(1, 2, 3));
        assert_eq!(v("V0.1.0"), ChartVersion::new(0, 1, 0));
    }

    #[test]
    fn test_parse_invalid() {
        for text in ["", "1.2", "1.2.3.4", "01.2.3", "1.2.x", " 1.2.3", "vv1.2.3", "1.2.3-"] {
            assert!(
                ChartVersion::parse(text).is_err(),
                "'{}' should be rejected",
                text
            );
        }
    }

    #[test]
    fn test_display_round_trip() {
        for text in ["0.0.0", "1.2.3", "1.2.3-rc.1", "1.2.3-alpha.1+build.7", "10.20.30+meta"] {
            assert_eq!(v(text).to_string(), text);
            assert_eq!(v(&v(text).to_string()), v(text));
        }
        assert_eq!(v("v2.0.0").to_string(), "2.0.0");
    }

    #[test]
    fn test_increment_patch() {
        assert_eq!(
            v("0.4.9").increment_patch(),
            Some(ChartVersion::new(0, 4, 10))
        );
        assert_eq!(v("1.2.3").increment_patch().unwrap().to_string(), "1.2.4");
    }

    #[test]
    fn test_increment_patch_at_max() {
        let max = v("1.2.18446744073709551615");
        assert_eq!(max.patch(), u64::MAX);
        assert_eq!(max.increment_patch(), None);
    }

    #[test]
    fn test_increment_patch_drops_metadata() {
        let bumped = v("1.2.3-rc.1+build.9").increment_patch().unwrap();
        assert_eq!(bumped.to_string(), "1.2.4");
        assert!(!bumped.is_prerelease());
        assert!(!bumped.has_build_metadata());
    }

    #[test]
    fn test_greater_than_numeric() {
        assert!(v("1.2.4").greater_than(&v("1.2.3")));
        assert!(v("1.3.0").greater_than(&v("1.2.9")));
        assert!(v("2.0.0").greater_than(&v("1.99.99")));
        assert!(v("1.10.0").greater_than(&v("1.9.0")));
        assert!(!v("1.2.3").greater_than(&v("1.2.4")));
    }

    #[test]
    fn test_greater_than_is_irreflexive() {
        for text in ["0.0.1", "1.2.3", "1.2.3-rc.1", "1.2.3+build"] {
            assert!(!v(text).greater_than(&v(text)));
        }
    }

    #[test]
    fn test_release_beats_prerelease() {
        assert!(v("1.2.3").greater_than(&v("1.2.3-rc.1")));
        assert!(!v("1.2.3-rc.1").greater_than(&v("1.2.3")));
        assert!(v("1.2.3-rc.2").greater_than(&v("1.2.3-rc.1")));
        assert!(v("1.2.3-rc.10").greater_than(&v("1.2.3-rc.2")));
        assert!(v("1.2.3-beta").greater_than(&v("1.2.3-alpha.5")));
    }

    #[test]
    fn test_build_metadata_ignored() {
        assert!(!v("1.2.3+b").greater_than(&v("1.2.3+a")));
        assert!(!v("1.2.3+a").greater_than(&v("1.2.3+b")));
        assert_eq!(v("1.2.3+a").precedence(&v("1.2.3")), Ordering::Equal);
    }

    #[test]
    fn test_greater_than_is_transitive() {
        let chain = [
            "0.9.9",
            "1.0.0-alpha",
            "1.0.0-alpha.1",
            "1.0.0-beta",
            "1.0.0-rc.1",
            "1.0.0",
            "1.0.1",
            "1.1.0",
        ];
        let versions: Vec<ChartVersion> = chain.iter().map(|s| v(s)).collect();
        for a in &versions {
            for b in &versions {
                for c in &versions {
                    if a.greater_than(b) && b.greater_than(c) {
                        assert!(a.greater_than(c), "{} > {} > {}", a, b, c);
                    }
                }
            }
        }
        for pair in versions.windows(2) {
            assert!(pair[1].greater_than(&pair[0]));
        }
    }
}
