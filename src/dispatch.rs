//! Top-level orchestration
//!
//! Wires one commit through loading, resolution, planning, and execution.
//! Data flows strictly forward; nothing here depends on backend outcome
//! beyond surfacing it to the caller.

use crate::core::{AliasMapLoader, AliasMaps, CommitContext, Component, StagePlan};
use crate::error::DispatchError;
use crate::execution::{execute_plan, ExecutionBackend};
use crate::resolve::{ComponentResolver, Resolution, StagePlanner};
use std::path::Path;
use tracing::info;

/// Result of a completed dispatch run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A component was resolved and every planned stage succeeded
    Dispatched {
        component: Component,
        plan: StagePlan,
    },
    /// No component matched; the run is a clean no-op
    Skipped,
}

/// One stateless resolve-then-execute pass
pub struct Dispatcher {
    loader: AliasMapLoader,
    resolver: ComponentResolver,
    planner: StagePlanner,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            loader: AliasMapLoader::new(),
            resolver: ComponentResolver::new(),
            planner: StagePlanner::new(),
        }
    }

    /// Load both alias maps
    pub fn load_maps(
        &self,
        components_path: &Path,
        stages_path: &Path,
    ) -> Result<AliasMaps, DispatchError> {
        self.loader.load(components_path, stages_path)
    }

    /// Resolve the commit to a component and plan, without executing
    ///
    /// `None` means no component matched (the common, harmless case).
    /// A matched component with no path, or with no actionable stage
    /// keyword in the message, is an error - that asymmetry is on
    /// purpose: such a commit named a component and then failed to say
    /// what to do with it.
    pub fn resolve(
        &self,
        maps: &AliasMaps,
        ctx: &CommitContext,
    ) -> Result<Option<(Component, StagePlan)>, DispatchError> {
        let component = match self.resolver.resolve(&maps.components, ctx)? {
            Resolution::Skip => return Ok(None),
            Resolution::Matched(component) => component,
        };

        if component.path.is_empty() {
            return Err(DispatchError::ComponentPathMissing(component.id));
        }

        let plan = self.planner.plan(&maps.stages, ctx)?;
        Ok(Some((component, plan)))
    }

    /// Full pass: resolve, plan, and execute through the given backend
    pub async fn dispatch(
        &self,
        maps: &AliasMaps,
        ctx: &CommitContext,
        backend: &dyn ExecutionBackend,
    ) -> Result<Outcome, DispatchError> {
        let (component, plan) = match self.resolve(maps, ctx)? {
            Some(resolved) => resolved,
            None => {
                info!("no component matched; skipping");
                return Ok(Outcome::Skipped);
            }
        };

        execute_plan(backend, &component, &plan, ctx).await?;

        Ok(Outcome::Dispatched { component, plan })
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Stage;

    fn maps() -> AliasMaps {
        let loader = AliasMapLoader::new();
        AliasMaps {
            components: loader.parse_components(
                r#"
components:
  CPU:
    path: "hw/cpu"
    aliases: ["cpu"]
  GHOST:
    aliases: ["ghost"]
"#,
            ),
            stages: loader.parse_stages(
                r#"
stages:
  lint: ["lint"]
  synth: ["synth"]
  all: ["all"]
"#,
            ),
        }
    }

    fn ctx(message: &str) -> CommitContext {
        CommitContext::new(message.to_string(), "sha".to_string(), "main".to_string())
    }

    #[test]
    fn test_resolve_component_and_plan() {
        let dispatcher = Dispatcher::new();
        let (component, plan) = dispatcher
            .resolve(&maps(), &ctx("cpu: lint and synth"))
            .expect("resolution should succeed")
            .expect("component should match");

        assert_eq!(component.id, "CPU");
        assert_eq!(plan.stages(), &[Stage::Lint, Stage::Synth]);
    }

    #[test]
    fn test_unrelated_commit_skips() {
        let dispatcher = Dispatcher::new();
        let resolved = dispatcher
            .resolve(&maps(), &ctx("update docs"))
            .expect("skip is not an error");
        assert!(resolved.is_none());
    }

    #[test]
    fn test_component_without_path_is_fatal() {
        let dispatcher = Dispatcher::new();
        let err = dispatcher
            .resolve(&maps(), &ctx("ghost: lint"))
            .expect_err("GHOST has no path");

        match err {
            DispatchError::ComponentPathMissing(id) => assert_eq!(id, "GHOST"),
            other => panic!("expected ComponentPathMissing, got {:?}", other),
        }
        assert_eq!(
            DispatchError::ComponentPathMissing("GHOST".into()).exit_code(),
            4
        );
    }

    #[test]
    fn test_matched_component_without_stage_is_fatal() {
        // Deliberate asymmetry with the skip case above
        let dispatcher = Dispatcher::new();
        let err = dispatcher
            .resolve(&maps(), &ctx("cpu cleanup"))
            .expect_err("no stage keyword");
        assert!(matches!(err, DispatchError::NoStageMatched));
    }
}
