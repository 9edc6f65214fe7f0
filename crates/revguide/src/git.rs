//! Thin git adapter: changed files and per-file diff text via the `git`
//! binary. The diff parser itself has no awareness of this layer.

use std::process::Command;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitError {
    #[error("not in a git repository")]
    NotARepo,
    #[error("git command failed: {0}")]
    CommandFailed(String),
    #[error("utf-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GitError>;

/// Split a range spec into (base, head) refs.
///
/// `"a..b"` becomes (a, b); an empty spec defaults to `HEAD~1..HEAD`; a
/// single ref is compared against `HEAD`.
pub fn parse_range(spec: &str) -> (String, String) {
    if spec.is_empty() {
        return ("HEAD~1".into(), "HEAD".into());
    }

    if let Some((base, head)) = spec.split_once("..") {
        if !base.is_empty() && !head.is_empty() {
            return (base.into(), head.into());
        }
    }

    (spec.into(), "HEAD".into())
}

/// List files that changed between two refs.
pub fn changed_files(base: &str, head: &str) -> Result<Vec<String>> {
    let stdout = run_git(&["diff", "--name-only", &format!("{base}..{head}")])?;
    Ok(stdout
        .lines()
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Raw unified-diff text for one file between two refs.
pub fn file_diff(base: &str, head: &str, path: &str) -> Result<String> {
    run_git(&["diff", &format!("{base}..{head}"), "--", path])
}

fn run_git(args: &[&str]) -> Result<String> {
    let output = Command::new("git").args(args).output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        if stderr.contains("not a git repository") {
            return Err(GitError::NotARepo);
        }
        return Err(GitError::CommandFailed(stderr.trim().to_string()));
    }

    Ok(String::from_utf8(output.stdout)?)
}
