//! Core domain models for the dispatcher
//!
//! This module defines the registries, commit context, and stage plan
//! that flow from configuration through resolution to execution.

pub mod component;
pub mod config;
pub mod context;
pub mod stage;

pub use component::{Component, ComponentRegistry};
pub use config::{AliasMapLoader, AliasMaps};
pub use context::CommitContext;
pub use stage::{Stage, StageAliasRegistry, StagePlan, ALL_KEY};
