//! Commit-message resolution: component matching and stage planning

pub mod component;
pub mod planner;
pub mod token;

pub use component::{ComponentResolver, Resolution};
pub use planner::StagePlanner;
pub use token::{contains_any_token, contains_token};
