//! Commit context - the inputs a single dispatch run is resolved against

use tokio::process::Command;
use tracing::debug;

/// The triggering commit, immutable for the duration of one run
#[derive(Debug, Clone)]
pub struct CommitContext {
    /// Raw commit message, as authored
    pub message: String,

    /// Lower-cased message used for alias matching
    pub normalized: String,

    /// Commit SHA (may be empty outside a repository)
    pub sha: String,

    /// Ref or branch name (may be empty outside a repository)
    pub git_ref: String,
}

impl CommitContext {
    pub fn new(message: String, sha: String, git_ref: String) -> Self {
        let normalized = message.to_lowercase();
        Self {
            message,
            normalized,
            sha,
            git_ref,
        }
    }

    /// Build a context from explicit values, filling gaps from git HEAD
    ///
    /// Each missing piece is derived best-effort; outside a repository the
    /// fields stay empty and resolution simply finds no aliases.
    pub async fn from_env_or_git(
        message: Option<String>,
        sha: Option<String>,
        git_ref: Option<String>,
    ) -> Self {
        let message = match message {
            Some(m) => m,
            None => git_output(&["log", "-1", "--pretty=%B"]).await,
        };
        let sha = match sha {
            Some(s) => s,
            None => git_output(&["rev-parse", "HEAD"]).await,
        };
        let git_ref = match git_ref {
            Some(r) => r,
            None => git_output(&["rev-parse", "--abbrev-ref", "HEAD"]).await,
        };
        Self::new(message, sha, git_ref)
    }
}

/// Run a git query and return trimmed stdout, or empty on any failure
async fn git_output(args: &[&str]) -> String {
    let output = Command::new("git").args(args).output().await;
    match output {
        Ok(out) if out.status.success() => String::from_utf8_lossy(&out.stdout).trim().to_string(),
        Ok(out) => {
            debug!("git {:?} exited with {}", args, out.status);
            String::new()
        }
        Err(e) => {
            debug!("git {:?} failed to spawn: {}", args, e);
            String::new()
        }
    }
}
