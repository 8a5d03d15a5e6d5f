//! Glob expansion: turn command line patterns into a file list.
//!
//! Each pattern is walked from its static base directory (the leading path
//! segments without glob metacharacters) and matched with `globset`.
//! Patterns starting with `!` exclude paths from the union of the others.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobBuilder, GlobMatcher, GlobSetBuilder};
use tracing::{debug, warn};

use crate::error::{EnvsubstError, EnvsubstResult};

/// Maximum recursion depth for the file walker.
const MAX_WALK_DEPTH: usize = 50;

const GLOB_META: &[char] = &['*', '?', '[', '{'];

fn has_meta(segment: &str) -> bool {
    segment.contains(GLOB_META)
}

fn compile(pattern: &str) -> EnvsubstResult<Glob> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|source| EnvsubstError::Glob {
            pattern: pattern.to_owned(),
            source,
        })
}

/// Leading directory of `pattern` that contains no glob metacharacters.
fn static_base(pattern: &str) -> PathBuf {
    let mut base = PathBuf::new();
    if pattern.starts_with('/') {
        base.push("/");
    }
    let segments: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    // The last segment names files, never the base.
    for segment in &segments[..segments.len().saturating_sub(1)] {
        if has_meta(segment) {
            break;
        }
        base.push(segment);
    }
    base
}

/// Expand `patterns` into a sorted, de-duplicated list of files.
///
/// A pattern naming an existing file is taken as-is; a pattern naming a
/// directory matches every file below it. Hidden entries and symlinks are
/// skipped while walking.
///
/// # Errors
///
/// Returns an error if a pattern is not a valid glob or a directory on the
/// walk cannot be read.
pub fn expand(patterns: &[String]) -> EnvsubstResult<Vec<PathBuf>> {
    let (excludes, includes): (Vec<&String>, Vec<&String>) =
        patterns.iter().partition(|p| p.starts_with('!'));

    let mut builder = GlobSetBuilder::new();
    for pattern in &excludes {
        builder.add(compile(&pattern[1..])?);
    }
    let exclude = builder.build().map_err(|source| EnvsubstError::Glob {
        pattern: "exclude set".to_owned(),
        source,
    })?;

    let mut files = BTreeSet::new();
    for pattern in includes {
        expand_one(pattern, &mut files)?;
    }

    let files: Vec<PathBuf> = files
        .into_iter()
        .filter(|path| !exclude.is_match(path))
        .collect();

    debug!(patterns = patterns.len(), files = files.len(), "expanded globs");
    Ok(files)
}

fn expand_one(pattern: &str, files: &mut BTreeSet<PathBuf>) -> EnvsubstResult<()> {
    let path = Path::new(pattern);
    if path.is_file() {
        files.insert(path.to_path_buf());
        return Ok(());
    }

    let (base, matcher) = if path.is_dir() {
        let all = format!("{}/**", pattern.trim_end_matches('/'));
        (path.to_path_buf(), compile(&all)?.compile_matcher())
    } else if has_meta(pattern) {
        (static_base(pattern), compile(pattern)?.compile_matcher())
    } else {
        warn!(pattern, "no such file");
        return Ok(());
    };

    walk(&base, &matcher, files, 0)
}

fn walk(
    dir: &Path,
    matcher: &GlobMatcher,
    files: &mut BTreeSet<PathBuf>,
    depth: usize,
) -> EnvsubstResult<()> {
    if depth > MAX_WALK_DEPTH {
        return Ok(());
    }

    let read_from = if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    };

    let entries = match std::fs::read_dir(read_from) {
        Ok(entries) => entries,
        // A static base that does not exist simply matches nothing.
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(source) => {
            return Err(EnvsubstError::Io {
                path: read_from.to_path_buf(),
                source,
            });
        }
    };

    for entry in entries {
        let entry = entry.map_err(|source| EnvsubstError::Io {
            path: read_from.to_path_buf(),
            source,
        })?;

        let name = entry.file_name();
        if name.to_string_lossy().starts_with('.') {
            continue;
        }

        // Use entry.file_type() which does NOT follow symlinks.
        let Ok(ft) = entry.file_type() else {
            continue;
        };

        let path = dir.join(&name);
        if ft.is_dir() {
            walk(&path, matcher, files, depth + 1)?;
        } else if ft.is_file() && matcher.is_match(&path) {
            files.insert(path);
        }
    }

    Ok(())
}
