use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::domain::SnapshotSource;
use crate::error::{Result, WellchartedError};
use crate::manifest::{Chartfile, ManifestAccess, DEFAULT_MANIFEST};

/// Helm charts on the local filesystem
///
/// Relative chart paths are resolved against `root`, so callers keep passing
/// (and reporting) paths exactly as the user typed them.
#[derive(Debug, Clone)]
pub struct ChartDirectory {
    root: PathBuf,
    manifest_name: String,
}

impl ChartDirectory {
    pub fn new(manifest_name: impl Into<String>) -> Self {
        ChartDirectory {
            root: PathBuf::new(),
            manifest_name: manifest_name.into(),
        }
    }

    /// Resolve relative paths against `root` instead of the process directory
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

impl Default for ChartDirectory {
    fn default() -> Self {
        Self::new(DEFAULT_MANIFEST)
    }
}

impl ManifestAccess for ChartDirectory {
    fn manifest_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.manifest_name)
    }

    fn check_chart_dir(&self, dir: &Path) -> Result<()> {
        let metadata = fs::metadata(self.resolve(dir))
            .map_err(|e| WellchartedError::invalid_directory(dir, e.to_string()))?;
        if !metadata.is_dir() {
            return Err(WellchartedError::invalid_directory(dir, "not a directory"));
        }

        let manifest = self.resolve(&self.manifest_path(dir));
        if !manifest.exists() {
            return Err(WellchartedError::invalid_directory(
                dir,
                format!("no {} exists in directory", self.manifest_name),
            ));
        }

        let content = fs::read(&manifest).map_err(|e| {
            WellchartedError::invalid_directory(
                dir,
                format!("cannot read {}: {}", self.manifest_name, e),
            )
        })?;
        let chartfile: Chartfile = serde_yaml::from_slice(&content).map_err(|e| {
            WellchartedError::invalid_directory(
                dir,
                format!("invalid {}: {}", self.manifest_name, e),
            )
        })?;

        match chartfile.name.as_deref() {
            Some(name) if !name.is_empty() => Ok(()),
            _ => Err(WellchartedError::invalid_directory(
                dir,
                format!("invalid {}: name must not be empty", self.manifest_name),
            )),
        }
    }

    fn load_version(&self, manifest: &Path) -> Result<String> {
        let source = SnapshotSource::WorkingTree(manifest.to_path_buf());
        let content = fs::read(self.resolve(manifest))
            .map_err(|e| WellchartedError::manifest_read(&source, e))?;
        crate::manifest::version_from_bytes(&content, &source)
    }

    fn save_version(&self, manifest: &Path, version: &str) -> Result<()> {
        let source = SnapshotSource::WorkingTree(manifest.to_path_buf());
        let path = self.resolve(manifest);
        let content = fs::read_to_string(&path)
            .map_err(|e| WellchartedError::manifest_read(&source, e))?;

        let updated = rewrite_version(&content, version)
            .map_err(|e| WellchartedError::persist(manifest, e))?
            .ok_or_else(|| {
                WellchartedError::persist(manifest, "no top-level version field to update")
            })?;

        let written = Chartfile::from_slice(updated.as_bytes(), &source)
            .and_then(|chartfile| chartfile.version_string(&source))
            .map_err(|e| WellchartedError::persist(manifest, e))?;
        if written != version {
            return Err(WellchartedError::persist(
                manifest,
                format!("updated manifest reads back version '{}'", written),
            ));
        }

        write_replacing(&path, updated.as_bytes())
            .map_err(|e| WellchartedError::persist(manifest, e))?;
        debug!(path = %manifest.display(), version, "wrote manifest");
        Ok(())
    }
}

/// Replace `path` with `content` through a temporary file in the same
/// directory, so a failed write never leaves a truncated manifest behind.
/// Read-only manifests are refused and keep their contents.
fn write_replacing(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let permissions = fs::metadata(path)?.permissions();
    if permissions.readonly() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "manifest is read-only",
        ));
    }

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(content)?;
    file.as_file().sync_all()?;
    file.as_file().set_permissions(permissions)?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn version_line() -> std::result::Result<&'static Regex, regex::Error> {
    static VERSION_LINE: OnceLock<std::result::Result<Regex, regex::Error>> = OnceLock::new();
    VERSION_LINE
        .get_or_init(|| Regex::new(r#"^(version[ \t]*:[ \t]*)("[^"]*"|'[^']*'|[^\s#]+)(.*)$"#))
        .as_ref()
        .map_err(Clone::clone)
}

/// Replace the value on the first top-level `version:` line
///
/// Quoting, trailing comments and line endings are kept; every other line is
/// copied through unchanged. Returns `Ok(None)` if there is no such line.
pub fn rewrite_version(
    content: &str,
    version: &str,
) -> std::result::Result<Option<String>, regex::Error> {
    let re = version_line()?;

    let mut replaced = false;
    let mut output = String::with_capacity(content.len() + version.len());

    for line in content.split_inclusive('\n') {
        let body = line.trim_end_matches(&['\r', '\n'][..]);
        let ending = &line[body.len()..];

        let caps = match (replaced, re.captures(body)) {
            (false, Some(caps)) => caps,
            _ => {
                output.push_str(line);
                continue;
            }
        };

        let value = match caps[2].chars().next() {
            Some(quote @ ('"' | '\'')) => format!("{quote}{version}{quote}"),
            _ => version.to_string(),
        };
        output.push_str(&caps[1]);
        output.push_str(&value);
        output.push_str(&caps[3]);
        output.push_str(ending);
        replaced = true;
    }

    Ok(replaced.then_some(output))
}
