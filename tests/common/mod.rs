// Shared fixtures for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::Path;

use git2::{Oid, Repository, Signature};
use tempfile::TempDir;

pub const REFERENCE: &str = "refs/remotes/origin/master";

pub fn chart_yaml(name: &str, version: &str) -> String {
    format!(
        "apiVersion: v1\n\
         name: {}\n\
         description: A Helm chart for Kubernetes\n\
         # bumped by CI\n\
         version: {}\n\
         appVersion: \"1.0\"\n\
         home: https://example.com/{}\n",
        name, version, name
    )
}

pub fn write_chart(root: &Path, dir: &str, version: &str) {
    let chart_dir = root.join(dir);
    fs::create_dir_all(&chart_dir).expect("Could not create chart dir");
    let name = chart_dir
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("chart");
    fs::write(chart_dir.join("Chart.yaml"), chart_yaml(name, version))
        .expect("Could not write Chart.yaml");
}

/// Commit everything in the work tree on HEAD
pub fn commit_all(repo: &Repository, message: &str) -> Oid {
    let mut index = repo.index().expect("Could not get index");
    index
        .add_all(["*"], git2::IndexAddOption::DEFAULT, None)
        .expect("Could not add files to index");
    index.write().expect("Could not write index");

    let tree_id = index.write_tree().expect("Could not write tree");
    let tree = repo.find_tree(tree_id).expect("Could not find tree");
    let sig = Signature::now("Test User", "test@example.com").expect("Could not get sig");

    let parent = repo
        .head()
        .ok()
        .and_then(|head| head.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .expect("Could not create commit")
}

/// A repository whose `origin/master` holds `charts/<name>` at the given versions
pub fn setup_repo(charts: &[(&str, &str)]) -> (TempDir, Repository) {
    let temp_dir = TempDir::new().expect("Could not create temp dir");
    let repo = Repository::init(temp_dir.path()).expect("Could not init git repo");

    fs::write(temp_dir.path().join("README.md"), "charts\n").expect("Could not write README");
    for (dir, version) in charts {
        write_chart(temp_dir.path(), dir, version);
    }

    let oid = commit_all(&repo, "Initial commit");
    repo.reference(REFERENCE, oid, true, "simulate fetch")
        .expect("Could not create remote reference");

    (temp_dir, repo)
}
