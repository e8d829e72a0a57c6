//! `furb check`: Lint serialized syntax trees.

use std::path::PathBuf;

use anyhow::Context;
use furb_engine::report::{self, ReportLine};
use furb_engine::{ErrorCode, LintError, LintResult, Linter, OutputFormat, Settings, SortBy};

use crate::output::{resolve_color_choice, StyledOutput};

use super::files::collect_tree_files;

/// Options of `furb check`, as parsed from the command line.
#[derive(Debug, Default)]
pub struct CheckOptions {
    pub paths: Vec<PathBuf>,
    pub config_file: Option<PathBuf>,
    pub ignore: Vec<ErrorCode>,
    pub enable: Vec<ErrorCode>,
    pub disable: Vec<ErrorCode>,
    pub enable_all: bool,
    pub disable_all: bool,
    pub format: Option<OutputFormat>,
    pub sort: Option<SortBy>,
    pub quiet: bool,
}

impl CheckOptions {
    /// Command-line flags as a settings layer.
    fn settings(&self) -> Settings {
        Settings {
            ignore: self.ignore.clone(),
            enable: self.enable.clone(),
            disable: self.disable.clone(),
            enable_all: self.enable_all,
            disable_all: self.disable_all,
            quiet: self.quiet,
            sort_by: self.sort,
            format: self.format,
        }
    }
}

pub fn execute(options: CheckOptions, color: Option<&str>) -> anyhow::Result<()> {
    // 1. Settings: config file, then command-line flags
    let mut settings = load_settings(&options)?;
    settings.merge(options.settings());
    log::debug!("Effective settings: {:?}", settings);

    // 2. Collect tree files
    let paths = if options.paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        options.paths.clone()
    };
    let files = collect_tree_files(&paths)?;
    let mut out = StyledOutput::new(resolve_color_choice(color));
    if files.is_empty() {
        out.stderr_error("No .json syntax trees found.");
        out.flush();
        std::process::exit(1);
    }

    // 3. Lint in parallel, keeping input order
    let linter = Linter::with_settings(settings.clone());
    let mut load_failed = false;
    let mut results = Vec::with_capacity(files.len());
    for outcome in lint_all(&linter, &files) {
        match outcome {
            Ok(result) => results.push(result),
            Err(err) => {
                out.stderr_error(&err.to_string());
                load_failed = true;
            }
        }
    }

    // 4. Output diagnostics
    let mut lines = report::flatten(&results);
    report::sort(&mut lines, settings.sort_by);
    match settings.output_format() {
        OutputFormat::Json => println!("{}", report::to_json(&lines)?),
        OutputFormat::Text => {
            emit_text(&mut out, &lines);
            if !lines.is_empty() && !settings.quiet {
                out.newline();
                out.info("Run `furb explain ERR` to further explain an error.");
                out.newline();
            }
        }
    }
    out.flush();

    // 5. Exit code
    if load_failed || !lines.is_empty() {
        std::process::exit(1);
    }
    Ok(())
}

// ── Config loading ─────────────────────────────────────────────────────────

fn load_settings(options: &CheckOptions) -> anyhow::Result<Settings> {
    if let Some(path) = &options.config_file {
        log::debug!("Using settings from {}", path.display());
        return Ok(Settings::load(path)?);
    }

    let cwd = std::env::current_dir().context("Cannot read the current directory")?;
    match Settings::discover(&cwd)? {
        Some((path, settings)) => {
            log::debug!("Using settings from {}", path.display());
            Ok(settings)
        }
        None => Ok(Settings::default()),
    }
}

// ── Parallel linting ───────────────────────────────────────────────────────

/// Lint every file on a pool of scoped threads; results keep input order.
fn lint_all(linter: &Linter, files: &[PathBuf]) -> Vec<Result<LintResult, LintError>> {
    if files.is_empty() {
        return Vec::new();
    }
    let workers = num_cpus::get().clamp(1, files.len());
    let chunk_size = files.len().div_ceil(workers);
    log::debug!("Linting {} files on {} threads", files.len(), workers);

    std::thread::scope(|scope| {
        let handles: Vec<_> = files
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|path| linter.lint_path(path))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|handle| match handle.join() {
                Ok(results) => results,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    })
}

// ── Text output ────────────────────────────────────────────────────────────

fn emit_text(out: &mut StyledOutput, lines: &[ReportLine<'_>]) {
    for line in lines {
        let d = line.diagnostic;
        out.bold(line.path);
        out.plain(&format!(":{}:{} ", d.line, d.display_column()));
        out.error(&format!("[{}]", d.error_code()));
        out.plain(&format!(": {}", d.message));
        out.newline();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const LIST_CALL: &str = r#"{
        "path": "app.py",
        "defs": [{
            "kind": "ExpressionStmt",
            "pos": {"line": 1, "column": 0},
            "expr": {
                "kind": "CallExpr",
                "pos": {"line": 1, "column": 0},
                "callee": {"kind": "NameExpr", "name": "list", "fullname": "builtins.list"}
            }
        }]
    }"#;

    #[test]
    fn test_lint_all_keeps_input_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut files = Vec::new();
        for i in 0..20 {
            let path = dir.path().join(format!("{:02}.json", i));
            let content = if i == 7 { "not json" } else { LIST_CALL };
            fs::write(&path, content).unwrap();
            files.push(path);
        }

        let results = lint_all(&Linter::new(), &files);
        assert_eq!(results.len(), 20);
        for (i, (result, path)) in results.iter().zip(&files).enumerate() {
            match result {
                Ok(result) => {
                    assert_ne!(i, 7);
                    assert_eq!(result.file_path, path.display().to_string());
                    assert_eq!(result.diagnostics.len(), 1);
                }
                Err(err) => {
                    assert_eq!(i, 7);
                    assert!(matches!(err, LintError::Json { .. }));
                }
            }
        }
    }

    #[test]
    fn test_flags_become_settings() {
        let options = CheckOptions {
            ignore: vec![ErrorCode(101)],
            enable_all: true,
            sort: Some(SortBy::Error),
            ..CheckOptions::default()
        };
        let settings = options.settings();
        assert!(settings.is_ignored(101));
        assert!(settings.enable_all);
        assert_eq!(settings.sort_by, Some(SortBy::Error));
        assert_eq!(settings.output_format(), OutputFormat::Text);
    }
}
