//! CLI output formatting

use crate::core::{Component, StagePlan};
use console::Emoji;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "! ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "> ");

/// Format the resolved component for display
pub fn format_component(component: &Component) -> String {
    format!(
        "{} ({})",
        style(&component.id).bold(),
        style(&component.path).dim()
    )
}

/// Format a stage plan for display
pub fn format_plan(plan: &StagePlan) -> String {
    let stages: Vec<String> = plan
        .stages()
        .iter()
        .map(|s| style(s.key()).cyan().to_string())
        .collect();
    stages.join(" → ")
}

/// Shorten a SHA for display, tolerating empty or short values
pub fn short_sha(sha: &str) -> &str {
    sha.get(..8).unwrap_or(sha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_sha() {
        assert_eq!(short_sha("0123456789abcdef"), "01234567");
        assert_eq!(short_sha("abc"), "abc");
        assert_eq!(short_sha(""), "");
    }
}
