//! File pipeline: expand globs, substitute each file, write, and report.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::RunConfig;
use crate::subst::substitute;
use crate::table::Table;
use crate::util::{atomic, diff, glob};

/// One report row: a distinct replacement made in one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReplacement {
    pub file: PathBuf,
    pub from: String,
    pub to: String,
    pub count: usize,
}

/// Outcome of a whole run.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Files matched by the globs.
    pub files: usize,
    /// Files whose content changed (written unless dry run).
    pub modified: usize,
    pub replacements: Vec<FileReplacement>,
    /// Unified diffs of changed files, when requested.
    pub diffs: Vec<String>,
}

/// Run substitution over every file matched by `config.globs`.
///
/// Files are processed in sorted order. A read or write failure aborts the
/// run; files already written stay written.
///
/// # Errors
///
/// Returns an error on an invalid glob, an unreadable file, or a failed
/// write.
pub fn run(config: &RunConfig, variables: &HashMap<String, String>) -> Result<RunReport> {
    let files = glob::expand(&config.globs)?;
    let mut report = RunReport {
        files: files.len(),
        ..RunReport::default()
    };

    for file in files {
        let original = atomic::read_text(&file)?;
        let result = substitute(&original, variables, &config.options)
            .context("failed to build placeholder pattern")?;

        debug!(
            file = %file.display(),
            replacements = result.replacements.len(),
            "processed file"
        );

        if result.text != original {
            report.modified += 1;

            if config.diff {
                if let Some(d) = diff::unified_diff(&file, &original, &result.text) {
                    report.diffs.push(d);
                }
            }

            if config.dry_run {
                info!(file = %file.display(), "dry run, not writing");
            } else {
                atomic::atomic_write(&file, &result.text)?;
            }
        }

        report
            .replacements
            .extend(result.replacements.into_iter().map(|r| FileReplacement {
                file: file.clone(),
                from: r.from,
                to: r.to,
                count: r.count,
            }));
    }

    info!(
        files = report.files,
        modified = report.modified,
        replacements = report.replacements.len(),
        dry_run = config.dry_run,
        "run complete"
    );

    Ok(report)
}

/// All collected diffs, each ending in a newline.
pub fn render_diffs(report: &RunReport) -> String {
    let mut out = String::new();
    for d in &report.diffs {
        out.push_str(d);
        if !d.ends_with('\n') {
            out.push('\n');
        }
    }
    out
}

/// Render the report the way it is printed to stdout.
///
/// In JSON mode stdout carries only the JSON array; diffs are left out and
/// the caller writes them to stderr with [`render_diffs`].
///
/// # Errors
///
/// Returns an error only if JSON serialization fails.
pub fn render(report: &RunReport, config: &RunConfig) -> Result<String> {
    if config.json {
        return Ok(serde_json::to_string_pretty(&report.replacements)?);
    }

    let mut out = render_diffs(report);

    let n = report.replacements.len();
    if n == 0 {
        out.push_str("No variable replacements made.");
        return Ok(out);
    }

    let mut table = Table::new(["File", "Variable", "Value"]);
    for r in &report.replacements {
        table.push([r.file.display().to_string(), r.from.clone(), r.to.clone()]);
    }

    let plural = if n > 1 { "s" } else { "" };
    out.push_str(&format!("Made {n} replacement{plural}:\n\n{table}"));
    Ok(out)
}
