//! Unified diffs for dry runs.

use similar::TextDiff;

/// Lines of unchanged context around each hunk.
pub const CONTEXT_LINES: usize = 3;

/// Render a `--- a/<label>` / `+++ b/<label>` unified diff; empty when the
/// texts are equal.
#[must_use]
pub fn unified_diff(original: &str, converted: &str, label: &str) -> String {
    if original == converted {
        return String::new();
    }
    TextDiff::from_lines(original, converted)
        .unified_diff()
        .context_radius(CONTEXT_LINES)
        .header(&format!("a/{label}"), &format!("b/{label}"))
        .to_string()
}
