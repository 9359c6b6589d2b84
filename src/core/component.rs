//! Components and the component registry

use serde::Serialize;

/// A monorepo subsystem with its own build path and CI scripts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Component {
    /// Unique identifier, uppercase alphanumeric/underscore
    pub id: String,

    /// Build path relative to the workspace root
    pub path: String,

    /// Lowercase tokens that select this component in a commit message
    pub aliases: Vec<String>,
}

/// All declared components, in declaration order
///
/// Declaration order is kept only for deterministic iteration and
/// reporting; ambiguity between components is always an error and is
/// never resolved by position.
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    components: Vec<Component>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component; a redeclared id replaces the earlier entry
    pub fn insert(&mut self, component: Component) {
        if let Some(existing) = self.components.iter_mut().find(|c| c.id == component.id) {
            *existing = component;
        } else {
            self.components.push(component);
        }
    }

    /// Exact lookup by identifier (case-sensitive)
    pub fn by_id(&self, id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.components.iter()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
