//! Post-pass filtering and reporter formatting.
//!
//! The dispatch engine never drops diagnostics; [`filter`] removes ignored
//! codes and exact duplicates afterwards. Reporters then flatten per-file
//! results into [`ReportLine`]s, optionally [`sort`] them and render text or
//! JSON.

use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::config::{Settings, SortBy};
use crate::diagnostic::{Diagnostic, ErrorCode};
use crate::LintResult;

/// Drop ignored codes and exact duplicates, keeping first occurrences in
/// their original order.
pub fn filter(diagnostics: Vec<Diagnostic>, settings: &Settings) -> Vec<Diagnostic> {
    let mut seen: FxHashSet<Diagnostic> = FxHashSet::default();
    diagnostics
        .into_iter()
        .filter(|d| !settings.is_ignored(d.code))
        .filter(|d| seen.insert(d.clone()))
        .collect()
}

/// One diagnostic together with the file it was found in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportLine<'a> {
    pub path: &'a str,
    pub diagnostic: &'a Diagnostic,
}

impl ReportLine<'_> {
    /// `path:line:column [FURBnnn]: message`, with a 1-based column.
    pub fn format_text(&self) -> String {
        let d = self.diagnostic;
        format!(
            "{}:{}:{} [{}]: {}",
            self.path,
            d.line,
            d.display_column(),
            d.error_code(),
            d.message
        )
    }
}

/// Flatten per-file results, keeping file order then traversal order.
pub fn flatten(results: &[LintResult]) -> Vec<ReportLine<'_>> {
    results
        .iter()
        .flat_map(|result| {
            result.diagnostics.iter().map(move |diagnostic| ReportLine {
                path: &result.file_path,
                diagnostic,
            })
        })
        .collect()
}

/// Reorder lines for display. `None` keeps traversal order.
pub fn sort(lines: &mut [ReportLine<'_>], sort_by: Option<SortBy>) {
    match sort_by {
        None => {}
        Some(SortBy::File) => lines.sort_by(|a, b| {
            (a.path, a.diagnostic.line, a.diagnostic.column, a.diagnostic.code).cmp(&(
                b.path,
                b.diagnostic.line,
                b.diagnostic.column,
                b.diagnostic.code,
            ))
        }),
        Some(SortBy::Error) => lines.sort_by(|a, b| {
            (a.diagnostic.code, a.path, a.diagnostic.line, a.diagnostic.column).cmp(&(
                b.diagnostic.code,
                b.path,
                b.diagnostic.line,
                b.diagnostic.column,
            ))
        }),
    }
}

/// Render lines as text, one per line.
pub fn format_text(lines: &[ReportLine<'_>]) -> String {
    lines
        .iter()
        .map(|line| line.format_text() + "\n")
        .collect()
}

#[derive(Serialize)]
struct JsonLine<'a> {
    path: &'a str,
    code: ErrorCode,
    line: u32,
    column: u64,
    message: &'a str,
}

/// Render lines as a pretty-printed JSON array.
pub fn to_json(lines: &[ReportLine<'_>]) -> serde_json::Result<String> {
    let entries: Vec<JsonLine<'_>> = lines
        .iter()
        .map(|line| JsonLine {
            path: line.path,
            code: line.diagnostic.error_code(),
            line: line.diagnostic.line,
            column: line.diagnostic.display_column(),
            message: &line.diagnostic.message,
        })
        .collect();
    serde_json::to_string_pretty(&entries)
}
