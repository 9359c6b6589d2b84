//! ci-dispatch - commit-message-driven CI dispatcher for monorepos

pub mod cli;
pub mod core;
pub mod dispatch;
pub mod error;
pub mod execution;
pub mod resolve;

// Re-export commonly used types
pub use crate::core::{AliasMapLoader, AliasMaps, CommitContext, Component, ComponentRegistry};
pub use crate::core::{Stage, StageAliasRegistry, StagePlan};
pub use dispatch::{Dispatcher, Outcome};
pub use error::DispatchError;
pub use execution::{ExecutionBackend, LocalBackend, Provider, RemoteBackend, RemoteConfig};
pub use resolve::{ComponentResolver, Resolution, StagePlanner};
