//! Stage planning
//!
//! Turns the commit message into an ordered, deduplicated stage plan.

use crate::core::{CommitContext, Stage, StageAliasRegistry, StagePlan, ALL_KEY};
use crate::error::DispatchError;
use crate::resolve::token::contains_any_token;
use tracing::{debug, info};

/// Computes the stage plan for a commit
#[derive(Debug, Default)]
pub struct StagePlanner;

impl StagePlanner {
    pub fn new() -> Self {
        Self
    }

    /// Compute the plan, or fail with `NoStageMatched`
    ///
    /// An `all` alias match always wins and yields the full pipeline,
    /// overriding any explicit subset the message also names. Otherwise
    /// stages are collected in fixed priority order; the order keywords
    /// appear in the message never reorders the plan.
    pub fn plan(
        &self,
        registry: &StageAliasRegistry,
        ctx: &CommitContext,
    ) -> Result<StagePlan, DispatchError> {
        if contains_any_token(&ctx.normalized, registry.aliases(ALL_KEY)) {
            info!(plan = %StagePlan::full(), "stage plan: all");
            return Ok(StagePlan::full());
        }

        let matched: Vec<Stage> = Stage::ORDER
            .iter()
            .copied()
            .filter(|stage| contains_any_token(&ctx.normalized, registry.aliases(stage.key())))
            .collect();

        if matched.is_empty() {
            debug!("no stage keyword matched");
            return Err(DispatchError::NoStageMatched);
        }

        let plan = StagePlan::from_matched(&matched);
        info!(plan = %plan, "stage plan computed");
        Ok(plan)
    }
}
