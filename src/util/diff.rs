//! Unified diffs for dry-run previews, using the `similar` crate.

use std::path::Path;

use similar::{Algorithm, TextDiff};

/// Lines of context around each hunk.
const CONTEXT_RADIUS: usize = 2;

/// Unified diff between the original and substituted content of `path`.
///
/// Returns `None` when nothing changed.
pub fn unified_diff(path: &Path, old: &str, new: &str) -> Option<String> {
    if old == new {
        return None;
    }

    let name = path.display().to_string();
    let diff = TextDiff::configure()
        .algorithm(Algorithm::Patience)
        .diff_lines(old, new);

    Some(
        diff.unified_diff()
            .context_radius(CONTEXT_RADIUS)
            .header(&format!("a/{name}"), &format!("b/{name}"))
            .to_string(),
    )
}
