//! Local backend - runs per-stage scripts as child processes

use crate::core::{CommitContext, Component, Stage};
use crate::error::DispatchError;
use crate::execution::ExecutionBackend;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, warn};

/// Subdirectory of a component that holds its stage scripts
const SCRIPT_DIR: &str = "ci";

/// Executes stage scripts under the component's directory
///
/// For each stage the script `<root>/<component_path>/ci/run_<stage>.sh`
/// is invoked with no arguments, inheriting the current environment and
/// stdio. The first non-zero exit aborts the run with that same code.
#[derive(Debug, Clone)]
pub struct LocalBackend {
    root: PathBuf,
}

impl LocalBackend {
    /// Create a backend resolving component paths against `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn script_path(&self, component: &Component, stage: Stage) -> PathBuf {
        self.root
            .join(&component.path)
            .join(SCRIPT_DIR)
            .join(stage.script_name())
    }
}

#[async_trait]
impl ExecutionBackend for LocalBackend {
    async fn run_stage(
        &self,
        component: &Component,
        stage: Stage,
        _ctx: &CommitContext,
    ) -> Result<(), DispatchError> {
        let script = self.script_path(component, stage);
        debug!(script = %script.display(), "invoking stage script");

        ensure_executable(&script);

        let status = Command::new(&script).status().await.map_err(|e| {
            DispatchError::StageFailed {
                stage,
                code: 1,
                reason: format!("failed to run {}: {}", script.display(), e),
            }
        })?;

        if status.success() {
            Ok(())
        } else {
            let code = status.code().unwrap_or(1);
            Err(DispatchError::StageFailed {
                stage,
                code,
                reason: format!("{} exited with code {}", script.display(), code),
            })
        }
    }
}

/// Mark the script executable, tolerating failure
///
/// Checked-out scripts sometimes lose their mode bit; fixing it here is
/// best-effort and a failure is left for the spawn to report.
#[cfg(unix)]
fn ensure_executable(script: &Path) {
    use std::os::unix::fs::PermissionsExt;

    match std::fs::metadata(script) {
        Ok(meta) => {
            let mut perms = meta.permissions();
            perms.set_mode(perms.mode() | 0o755);
            if let Err(e) = std::fs::set_permissions(script, perms) {
                warn!(script = %script.display(), "could not mark script executable: {}", e);
            }
        }
        Err(e) => {
            warn!(script = %script.display(), "could not stat script: {}", e);
        }
    }
}

#[cfg(not(unix))]
fn ensure_executable(_script: &Path) {}
