//! Component resolution
//!
//! Matches a commit message against the component registry and produces
//! exactly one target component, a clean skip, or an ambiguity error.

use crate::core::{CommitContext, Component, ComponentRegistry};
use crate::error::DispatchError;
use crate::resolve::token::contains_any_token;
use regex::Regex;
use tracing::{debug, info};

/// Outcome of component resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Exactly one component was selected
    Matched(Component),
    /// Nothing matched; the commit does not concern any component
    Skip,
}

/// Resolves commit messages to components
pub struct ComponentResolver {
    fallback_tag: Regex,
}

impl ComponentResolver {
    pub fn new() -> Self {
        Self {
            // Literal CI[<token>] tag, searched in the raw message
            fallback_tag: Regex::new(r"CI\[([A-Za-z0-9_]+)\]").expect("valid regex"),
        }
    }

    /// Resolve the commit to a component
    ///
    /// Alias matching runs against the lower-cased message with the
    /// whole-token rule. Zero alias matches fall back to the `CI[...]`
    /// tag in the raw message; a tag that names no known component is a
    /// skip, not an error. More than one alias match is always an error,
    /// never broken by declaration order.
    pub fn resolve(
        &self,
        registry: &ComponentRegistry,
        ctx: &CommitContext,
    ) -> Result<Resolution, DispatchError> {
        let matched: Vec<&Component> = registry
            .iter()
            .filter(|c| contains_any_token(&ctx.normalized, &c.aliases))
            .collect();

        match matched.as_slice() {
            [component] => {
                info!(
                    component = %component.id,
                    path = %component.path,
                    "resolved component by alias"
                );
                Ok(Resolution::Matched((*component).clone()))
            }
            [] => self.resolve_fallback(registry, ctx),
            many => Err(DispatchError::AmbiguousComponent {
                ids: many.iter().map(|c| c.id.clone()).collect(),
            }),
        }
    }

    /// Look for an explicit `CI[<token>]` tag in the raw message
    fn resolve_fallback(
        &self,
        registry: &ComponentRegistry,
        ctx: &CommitContext,
    ) -> Result<Resolution, DispatchError> {
        if let Some(caps) = self.fallback_tag.captures(&ctx.message) {
            let id = caps[1].to_uppercase();
            if let Some(component) = registry.by_id(&id) {
                info!(
                    component = %component.id,
                    path = %component.path,
                    "resolved component by CI[] tag"
                );
                return Ok(Resolution::Matched(component.clone()));
            }
            debug!(tag = %id, "CI[] tag names no known component");
        }

        debug!("no component matched; skipping");
        Ok(Resolution::Skip)
    }
}

impl Default for ComponentResolver {
    fn default() -> Self {
        Self::new()
    }
}
