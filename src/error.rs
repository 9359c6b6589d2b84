//! Dispatcher error taxonomy and the process exit-code contract

use crate::core::Stage;
use thiserror::Error;

/// Everything that can abort a dispatch run
///
/// Every variant is fatal and terminates the run immediately; retries
/// belong to whatever CI orchestrator invokes the dispatcher. The one
/// non-error outcome - no component matched - is not represented here,
/// it is a clean skip reported through [`crate::dispatch::Outcome`].
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A required configuration input (file or environment value) is absent
    #[error("missing configuration: {0}")]
    ConfigMissing(String),

    /// More than one component's aliases matched the commit message
    #[error("ambiguous component match: {}", ids.join(", "))]
    AmbiguousComponent { ids: Vec<String> },

    /// The resolved component has no registered path
    #[error("component {0} has no registered path")]
    ComponentPathMissing(String),

    /// No stage keyword matched the commit message
    #[error("no stage keyword matched the commit message")]
    NoStageMatched,

    /// A stage outside the fixed domain reached execution
    #[error("unsupported stage: {0}")]
    UnsupportedStage(String),

    /// CI_PROVIDER names a backend we do not have
    #[error("unknown CI provider: {0}")]
    UnknownProvider(String),

    /// A stage script or remote trigger failed; its code is propagated
    #[error("stage {stage} failed (exit {code}): {reason}")]
    StageFailed {
        stage: Stage,
        code: i32,
        reason: String,
    },
}

impl DispatchError {
    /// Map the error onto the stable process exit-code contract
    pub fn exit_code(&self) -> i32 {
        match self {
            DispatchError::ConfigMissing(_) => 2,
            DispatchError::AmbiguousComponent { .. } => 3,
            DispatchError::ComponentPathMissing(_) => 4,
            DispatchError::NoStageMatched => 5,
            DispatchError::UnsupportedStage(_) => 6,
            DispatchError::UnknownProvider(_) => 7,
            DispatchError::StageFailed { code, .. } => *code,
        }
    }
}
