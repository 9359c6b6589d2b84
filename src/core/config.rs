//! Alias-map loading
//!
//! Parses the two declarative mapping files (component map, stage map)
//! into the in-memory registries the resolver and planner work from.
//!
//! Both formats are line-oriented and deliberately permissive: lines that
//! do not match a recognized shape (comments, blank lines, keys added by
//! a future version) are skipped, never rejected. The only hard error is
//! a file that cannot be read at all.

use crate::core::component::{Component, ComponentRegistry};
use crate::core::stage::StageAliasRegistry;
use crate::error::DispatchError;
use regex::Regex;
use std::path::Path;
use tracing::debug;

/// The parsed pair of registries
#[derive(Debug, Clone)]
pub struct AliasMaps {
    pub components: ComponentRegistry,
    pub stages: StageAliasRegistry,
}

/// Parser for the component and stage map files
pub struct AliasMapLoader {
    component_header: Regex,
    path_field: Regex,
    aliases_field: Regex,
    stage_entry: Regex,
    quoted_token: Regex,
}

impl AliasMapLoader {
    pub fn new() -> Self {
        Self {
            component_header: Regex::new(r"^\s+([A-Z0-9_]+):\s*$").expect("valid regex"),
            path_field: Regex::new(r#"^\s+path:\s*"([^"]*)"\s*$"#).expect("valid regex"),
            aliases_field: Regex::new(r"^\s+aliases:\s*\[(.*)\]\s*$").expect("valid regex"),
            stage_entry: Regex::new(r"^\s+([a-z0-9_]+):\s*\[(.*)\]\s*$").expect("valid regex"),
            quoted_token: Regex::new(r#""([^"]+)""#).expect("valid regex"),
        }
    }

    /// Load both map files, or fail with `ConfigMissing`
    pub fn load(
        &self,
        components_path: &Path,
        stages_path: &Path,
    ) -> Result<AliasMaps, DispatchError> {
        let components_src = read_map(components_path)?;
        let stages_src = read_map(stages_path)?;

        Ok(AliasMaps {
            components: self.parse_components(&components_src),
            stages: self.parse_stages(&stages_src),
        })
    }

    /// Parse the nested component map rooted under a `components:` marker
    pub fn parse_components(&self, src: &str) -> ComponentRegistry {
        let mut registry = ComponentRegistry::new();
        let mut in_section = false;
        let mut current: Option<Component> = None;

        for line in src.lines() {
            if line.trim_end() == "components:" {
                in_section = true;
                continue;
            }
            if !in_section {
                continue;
            }

            if let Some(caps) = self.component_header.captures(line) {
                if let Some(done) = current.take() {
                    registry.insert(done);
                }
                current = Some(Component {
                    id: caps[1].to_string(),
                    path: String::new(),
                    aliases: Vec::new(),
                });
            } else if let Some(component) = current.as_mut() {
                if let Some(caps) = self.path_field.captures(line) {
                    component.path = caps[1].to_string();
                } else if let Some(caps) = self.aliases_field.captures(line) {
                    component.aliases = self.split_tokens(&caps[1]);
                } else if !line.trim().is_empty() {
                    debug!("skipping unrecognized component map line: {:?}", line);
                }
            }
        }

        if let Some(done) = current.take() {
            registry.insert(done);
        }

        registry
    }

    /// Parse the flat stage map rooted under a `stages:` marker
    ///
    /// Keys outside the fixed stage domain are kept as-is; the planner
    /// never consults them, so they cost nothing.
    pub fn parse_stages(&self, src: &str) -> StageAliasRegistry {
        let mut registry = StageAliasRegistry::new();
        let mut in_section = false;

        for line in src.lines() {
            if line.trim_end() == "stages:" {
                in_section = true;
                continue;
            }
            if !in_section {
                continue;
            }

            if let Some(caps) = self.stage_entry.captures(line) {
                registry.insert(caps[1].to_string(), self.split_tokens(&caps[2]));
            } else if !line.trim().is_empty() {
                debug!("skipping unrecognized stage map line: {:?}", line);
            }
        }

        registry
    }

    /// Extract the quoted tokens from a bracketed list body
    fn split_tokens(&self, body: &str) -> Vec<String> {
        self.quoted_token
            .captures_iter(body)
            .map(|caps| caps[1].to_string())
            .collect()
    }
}

impl Default for AliasMapLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn read_map(path: &Path) -> Result<String, DispatchError> {
    std::fs::read_to_string(path)
        .map_err(|e| DispatchError::ConfigMissing(format!("{}: {}", path.display(), e)))
}
