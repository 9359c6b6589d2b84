//! Execution backends
//!
//! Two interchangeable executors consume the resolved component and the
//! stage plan: [`LocalBackend`] invokes per-stage scripts as child
//! processes, [`RemoteBackend`] triggers parameterized remote builds.
//! Both are strictly sequential and fail-fast.

pub mod local;
pub mod remote;

use crate::core::{CommitContext, Component, Stage, StagePlan};
use crate::error::DispatchError;
use async_trait::async_trait;
use tracing::info;

pub use local::LocalBackend;
pub use remote::{RemoteBackend, RemoteConfig};

/// The configured execution backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    /// Run stage scripts directly on this machine
    Gitea,
    /// Trigger builds on a Jenkins instance
    Jenkins,
}

impl Provider {
    pub const DEFAULT: Provider = Provider::Gitea;

    /// Parse a `CI_PROVIDER` value
    pub fn parse(value: &str) -> Result<Provider, DispatchError> {
        match value {
            "gitea" => Ok(Provider::Gitea),
            "jenkins" => Ok(Provider::Jenkins),
            other => Err(DispatchError::UnknownProvider(other.to_string())),
        }
    }
}

/// Trait for executing a single stage - allows for different backends
#[async_trait]
pub trait ExecutionBackend: Send + Sync {
    /// Run one stage for the component, blocking until it completes
    async fn run_stage(
        &self,
        component: &Component,
        stage: Stage,
        ctx: &CommitContext,
    ) -> Result<(), DispatchError>;
}

/// Run every stage of the plan in order, stopping at the first failure
pub async fn execute_plan(
    backend: &dyn ExecutionBackend,
    component: &Component,
    plan: &StagePlan,
    ctx: &CommitContext,
) -> Result<(), DispatchError> {
    for (i, stage) in plan.stages().iter().enumerate() {
        info!(
            stage = %stage,
            component = %component.id,
            "running stage {}/{}",
            i + 1,
            plan.len()
        );
        backend.run_stage(component, *stage, ctx).await?;
    }
    Ok(())
}
