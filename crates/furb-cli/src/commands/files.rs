//! Tree file collection for `furb check`.

use std::path::{Path, PathBuf};

/// Extension of serialized syntax trees.
pub const TREE_EXTENSION: &str = "json";

/// Collect tree files from the given paths (files or directories).
///
/// Files named explicitly are kept whatever their extension; directories are
/// searched recursively for `.json` files, in sorted order.
pub fn collect_tree_files(paths: &[PathBuf]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            collect_in_dir(path, &mut files)?;
        } else {
            anyhow::bail!("{}: No such file or directory", path.display());
        }
    }

    Ok(files)
}

/// Recursively collect tree files in a directory.
fn collect_in_dir(dir: &Path, files: &mut Vec<PathBuf>) -> anyhow::Result<()> {
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<_, _>>()?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            // Skip hidden dirs and build output
            let skip = path
                .file_name()
                .map(|name| name.to_string_lossy())
                .is_some_and(|name| name.starts_with('.') || name == "target");
            if !skip {
                collect_in_dir(&path, files)?;
            }
        } else if path.extension().and_then(|e| e.to_str()) == Some(TREE_EXTENSION) {
            files.push(path);
        }
    }
    Ok(())
}
