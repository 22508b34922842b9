//! Command orchestration
//!
//! Binds the workflows to real collaborators and turns their results into
//! user-facing messages and exit codes. Everything the commands depend on
//! (working directory, configuration, output streams) arrives as a
//! parameter, so the whole command can run against a temporary directory
//! and in-memory buffers.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::{Action, BumpArgs, CompareArgs};
use crate::config::{load_config, Config};
use crate::error::Result;
use crate::git::{Git2Repository, Repository};
use crate::manifest::{ChartDirectory, ManifestAccess};
use crate::ui::Ui;
use crate::workflow;

/// Exit code for a successful command
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for any failure
pub const EXIT_FAILURE: i32 = 1;

/// Where a command runs and how it is configured
#[derive(Debug, Clone, PartialEq)]
pub struct Workspace {
    /// Directory relative chart paths and the repository are resolved from
    pub cwd: PathBuf,
    pub config: Config,
}

impl Workspace {
    pub fn new(cwd: impl Into<PathBuf>, config: Config) -> Self {
        Workspace {
            cwd: cwd.into(),
            config,
        }
    }

    /// Load configuration for `cwd` (see [load_config])
    pub fn load(cwd: impl Into<PathBuf>, config_path: Option<&Path>) -> Result<Self> {
        let cwd = cwd.into();
        let config = load_config(config_path, &cwd)?;
        debug!(cwd = %cwd.display(), ?config, "loaded workspace");
        Ok(Workspace { cwd, config })
    }

    /// Filesystem chart access rooted at the working directory
    pub fn manifests(&self) -> ChartDirectory {
        ChartDirectory::new(&self.config.chart.manifest).with_root(&self.cwd)
    }

    /// The git repository enclosing the working directory
    pub fn repository(&self) -> Result<Git2Repository> {
        Git2Repository::discover(&self.cwd)
    }

    /// The reference to compare against, preferring an explicit override
    pub fn reference<'a>(&'a self, explicit: Option<&'a str>) -> &'a str {
        explicit.unwrap_or(&self.config.compare.reference)
    }
}

/// Run an action against the real filesystem and repository
pub fn execute<U: Ui + ?Sized>(action: &Action, workspace: &Workspace, ui: &mut U) -> i32 {
    match action {
        Action::Bump(BumpArgs { path }) => run_bump(path, &workspace.manifests(), ui),
        Action::Compare(CompareArgs { reference, path }) => {
            let manifests = workspace.manifests();
            // An invalid chart directory is reported ahead of repository errors
            let repo = match manifests
                .check_chart_dir(path)
                .and_then(|()| workspace.repository())
            {
                Ok(repo) => repo,
                Err(e) => return report::<String, U>(Err(e), ui),
            };
            let reference = workspace.reference(reference.as_deref());
            run_compare(path, reference, &manifests, &repo, ui)
        }
    }
}

/// Bump the chart at `path`, reporting through `ui`
pub fn run_bump<M, U>(path: &Path, manifests: &M, ui: &mut U) -> i32
where
    M: ManifestAccess + ?Sized,
    U: Ui + ?Sized,
{
    report(workflow::bump(path, manifests), ui)
}

/// Compare the chart at `path` against `reference`, reporting through `ui`
pub fn run_compare<M, R, U>(
    path: &Path,
    reference: &str,
    manifests: &M,
    repo: &R,
    ui: &mut U,
) -> i32
where
    M: ManifestAccess + ?Sized,
    R: Repository + ?Sized,
    U: Ui + ?Sized,
{
    report(workflow::compare(path, reference, manifests, repo), ui)
}

/// Map a workflow result to a message and an exit code
fn report<T: Display, U: Ui + ?Sized>(result: Result<T>, ui: &mut U) -> i32 {
    match result {
        Ok(outcome) => {
            ui.info(&outcome.to_string());
            EXIT_SUCCESS
        }
        Err(e) => {
            ui.error(&e.to_string());
            EXIT_FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockRepository;
    use crate::manifest::MockManifests;
    use crate::ui::BasicUi;
    use git2::Oid;

    fn captured(ui: BasicUi<Vec<u8>, Vec<u8>>) -> (String, String) {
        let (out, err) = ui.into_inner();
        (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    #[test]
    fn test_run_bump_reports_success() {
        let mut charts = MockManifests::new();
        charts.add_chart("demo", "0.4.9");
        let mut ui = BasicUi::new(Vec::new(), Vec::new());

        let code = run_bump(Path::new("demo"), &charts, &mut ui);

        assert_eq!(code, EXIT_SUCCESS);
        let (out, err) = captured(ui);
        assert_eq!(out, "Bumped demo from 0.4.9 to 0.4.10.\n");
        assert!(err.is_empty());
    }

    #[test]
    fn test_run_bump_reports_failure() {
        let charts = MockManifests::new();
        let mut ui = BasicUi::new(Vec::new(), Vec::new());

        let code = run_bump(Path::new("demo"), &charts, &mut ui);

        assert_eq!(code, EXIT_FAILURE);
        let (out, err) = captured(ui);
        assert!(out.is_empty());
        assert!(err.starts_with("wellcharted: demo is not a chart directory"));
    }

    #[test]
    fn test_run_compare_exit_codes() {
        let oid = Oid::from_bytes(&[9; 20]).unwrap();
        let mut repo = MockRepository::new();
        repo.set_reference("refs/remotes/origin/master", oid);
        repo.add_file(oid, "demo/Chart.yaml", "name: demo\nversion: 1.2.3\n");

        let mut newer = MockManifests::new();
        newer.add_chart("demo", "1.2.4");
        let mut ui = BasicUi::new(Vec::new(), Vec::new());
        let code = run_compare(
            Path::new("demo"),
            "refs/remotes/origin/master",
            &newer,
            &repo,
            &mut ui,
        );
        assert_eq!(code, EXIT_SUCCESS);
        assert_eq!(captured(ui).0, "New version 1.2.4 for demo.\n");

        let mut same = MockManifests::new();
        same.add_chart("demo", "1.2.3");
        let mut ui = BasicUi::new(Vec::new(), Vec::new());
        let code = run_compare(
            Path::new("demo"),
            "refs/remotes/origin/master",
            &same,
            &repo,
            &mut ui,
        );
        assert_eq!(code, EXIT_FAILURE);
        let (_, err) = captured(ui);
        assert!(err.contains("Version 1.2.3 for demo is not greater than 1.2.3"));
    }

    #[test]
    fn test_reference_override() {
        let workspace = Workspace::new("/tmp", Config::default());
        assert_eq!(workspace.reference(None), "refs/remotes/origin/master");
        assert_eq!(workspace.reference(Some("origin/main")), "origin/main");
    }
}
