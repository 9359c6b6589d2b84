//! Pipeline stages and stage plans

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// One phase of the fixed build pipeline
///
/// The variant order is the priority order: stages earlier in the list
/// must run before later ones because of real build dependencies
/// (lint gates everything, synthesis-adjacent stages come last).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Lint,
    Cdc,
    Vclp,
    Synth,
    Formal,
}

impl Stage {
    /// All stages, in priority order
    pub const ORDER: [Stage; 5] = [
        Stage::Lint,
        Stage::Cdc,
        Stage::Vclp,
        Stage::Synth,
        Stage::Formal,
    ];

    /// Stage key as it appears in the stage map
    pub fn key(&self) -> &'static str {
        match self {
            Stage::Lint => "lint",
            Stage::Cdc => "cdc",
            Stage::Vclp => "vclp",
            Stage::Synth => "synth",
            Stage::Formal => "formal",
        }
    }

    /// Look up a stage by its map key
    pub fn from_key(key: &str) -> Option<Stage> {
        Stage::ORDER.iter().copied().find(|s| s.key() == key)
    }

    /// Conventional script file name for this stage
    pub fn script_name(&self) -> String {
        format!("run_{}.sh", self.key())
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Sentinel stage-map key that expands to the full pipeline
pub const ALL_KEY: &str = "all";

/// Alias tokens per stage-map key
///
/// Keys are kept verbatim, including keys outside the fixed stage domain;
/// the planner only ever consults the known keys and `all`, so unknown
/// entries are harmless forward-compatible baggage.
#[derive(Debug, Clone, Default)]
pub struct StageAliasRegistry {
    aliases: HashMap<String, Vec<String>>,
}

impl StageAliasRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register aliases for a stage key, replacing any previous entry
    pub fn insert(&mut self, key: String, aliases: Vec<String>) {
        self.aliases.insert(key, aliases);
    }

    /// Aliases registered for a key (empty slice if absent)
    pub fn aliases(&self, key: &str) -> &[String] {
        self.aliases.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All registered keys, for validation reporting
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.aliases.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

/// An ordered, deduplicated list of stages to execute
///
/// Always a sub-sequence of [`Stage::ORDER`]; construction goes through
/// the priority order, so callers cannot produce a misordered plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StagePlan {
    stages: Vec<Stage>,
}

impl StagePlan {
    /// Plan covering the full pipeline (the `all` shortcut)
    pub fn full() -> Self {
        Self {
            stages: Stage::ORDER.to_vec(),
        }
    }

    /// Build a plan from an arbitrary set of matched stages
    ///
    /// The result is reordered into priority order and deduplicated;
    /// the order in which matches were found never leaks through.
    pub fn from_matched(matched: &[Stage]) -> Self {
        let stages = Stage::ORDER
            .iter()
            .copied()
            .filter(|s| matched.contains(s))
            .collect();
        Self { stages }
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl fmt::Display for StagePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<&str> = self.stages.iter().map(Stage::key).collect();
        write!(f, "[{}]", keys.join(", "))
    }
}
