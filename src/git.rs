use std::path::{Path, PathBuf};

use git2::{Config, Repository, Sort};
use tracing::{debug, warn};

use crate::config::ConfigSource;

/// Git configuration as seen from a working directory: repository config layered
/// over global and system config, or just the latter outside a repository.
pub struct GitConfig {
    config: Option<Config>,
}

impl GitConfig {
    pub fn discover(start: &Path) -> Self {
        let config = Repository::discover(start)
            .and_then(|repo| repo.config())
            .or_else(|_| Config::open_default())
            .and_then(|mut config| config.snapshot());
        match config {
            Ok(config) => Self {
                config: Some(config),
            },
            Err(e) => {
                warn!(error = %e, "git config unavailable, using defaults");
                Self { config: None }
            }
        }
    }
}

impl ConfigSource for GitConfig {
    fn get(&self, key: &str) -> Option<String> {
        self.config.as_ref()?.get_string(key).ok()
    }
}

/// Walk up from `start` to the first directory containing `.git`.
pub fn find_repo_root(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        if dir.join(".git").exists() {
            return Some(dir);
        }
        if !dir.pop() {
            return None;
        }
    }
}

/// A commit whose message refers to an issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRef {
    pub sha: String,
    pub author: String,
    pub message: String,
}

impl CommitRef {
    pub fn short_sha(&self) -> &str {
        &self.sha[..self.sha.len().min(7)]
    }

    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or("(no message)")
    }
}

/// True if `message` mentions `#<id>` with no alphanumeric character right after it.
pub fn references_issue(message: &str, id: &str) -> bool {
    let needle = format!("#{id}");
    message.match_indices(&needle).any(|(at, _)| {
        message[at + needle.len()..]
            .chars()
            .next()
            .is_none_or(|c| !c.is_alphanumeric())
    })
}

/// Commits reachable from HEAD that reference issue `id`, newest first.
/// Falls back to an empty vec on any error (no repository, unborn HEAD, etc.).
pub fn commits_referencing(repo_root: &Path, id: &str) -> Vec<CommitRef> {
    let Ok(repo) = Repository::discover(repo_root) else {
        return vec![];
    };
    let Ok(mut revwalk) = repo.revwalk() else {
        return vec![];
    };
    if revwalk.push_head().is_err() {
        debug!("no HEAD to walk");
        return vec![];
    }
    let _ = revwalk.set_sorting(Sort::TIME);

    let mut found = Vec::new();
    for oid in revwalk {
        let Ok(oid) = oid else { continue };
        let Ok(commit) = repo.find_commit(oid) else {
            continue;
        };
        let message = commit.message().unwrap_or_default().trim_end().to_string();
        if !references_issue(&message, id) {
            continue;
        }
        let author = commit.author();
        found.push(CommitRef {
            sha: oid.to_string(),
            author: format!(
                "{} <{}>",
                author.name().unwrap_or("unknown"),
                author.email().unwrap_or("")
            ),
            message,
        });
    }
    debug!(id, count = found.len(), "commits referencing issue");
    found
}
