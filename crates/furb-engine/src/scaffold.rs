//! Scaffold generator core: creates a new check module from a template.
//!
//! Given a node kind and a target path, [`generate`] writes a check module
//! that flags every node of that kind and makes it reachable from the crate
//! root: each directory between the target and the crate's `src/` gets a
//! `mod.rs` (unless one exists), and each parent module declares its child
//! with `pub mod <child>;`. The nearest enclosing module defining
//! `all_checks()` also gets the new `CHECK` added to its list. Running it
//! again never duplicates a marker, a declaration or a registration.
//!
//! Prompting lives in the CLI; everything here is deterministic given the
//! request and the working directory.

use std::io;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

use crate::ast::NodeKind;

/// Extension every check module must have.
pub const SOURCE_EXTENSION: &str = "rs";

/// Module file created inside a directory to make it a module.
pub const PACKAGE_MARKER: &str = "mod.rs";

/// Files marking a crate's source root; the walk stops there.
pub const CRATE_ROOTS: &[&str] = &["lib.rs", "main.rs"];

/// Directory the path prompt starts from.
pub const BASE_DIR: &str = "crates/furb-engine/src/checks/";

/// Function whose `vec![..]` lists every registered check.
const REGISTRY_FN: &str = "fn all_checks()";

/// File stems that would collide with module plumbing.
const RESERVED_STEMS: &[&str] = &["mod", "lib", "main"];

const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "self", "static", "struct", "super", "trait", "true", "try", "type", "typeof",
    "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

const FILE_TEMPLATE: &str = r##"use crate::ast::*;
use crate::check::{Check, CheckFn, ErrorInfo};
use crate::diagnostic::Diagnostic;

pub struct Error{error_name};

impl ErrorInfo for Error{error_name} {
    const CODE: u32 = 999;
    const MSG: &'static str = "Your message here";
    const DOCS: &'static str = "\
TODO: fill this in

Bad:

```
# TODO: fill this in
```

Good:

```
# TODO: fill this in
```
";
}

pub static CHECK: Check = Check::of::<Error{error_name}>(module_path!(), CheckFn::{node_type}(check));

fn check(node: &{node_type}, diagnostics: &mut Vec<Diagnostic>) {
    let {node_type} { .. } = node;
    diagnostics.push(Error{error_name}::at(node.pos));
}
"##;

/// Errors that can occur while generating a check module
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// Target does not end in `.rs`
    #[error("File must end in \".rs\"")]
    InvalidExtension(PathBuf),

    /// Target stem is not usable as a module name
    #[error("`{0}` is not a valid module name")]
    InvalidModuleName(String),

    /// Filesystem failure
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// What to generate: gathered interactively by `furb gen`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldRequest {
    pub node_kind: NodeKind,
    pub target: PathBuf,
}

/// Outcome of a successful [`generate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scaffold {
    /// Absolute path of the written module
    pub path: PathBuf,
    /// Diagnostic type name, e.g. `ErrorUsePathlib`
    pub error_name: String,
    /// Module files created to hold declarations
    pub created_markers: Vec<PathBuf>,
    /// Module files that received a new `pub mod` line
    pub declared_in: Vec<PathBuf>,
    /// Module file whose `all_checks()` lists the new check
    pub registered_in: Option<PathBuf>,
    /// Whether an existing file was replaced
    pub overwritten: bool,
}

/// Check the target's extension and stem; returns the stem.
pub fn validate(target: &Path) -> Result<&str, ScaffoldError> {
    if target.extension().and_then(|ext| ext.to_str()) != Some(SOURCE_EXTENSION) {
        return Err(ScaffoldError::InvalidExtension(target.to_path_buf()));
    }
    let stem = target
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default();
    if !is_module_name(stem) {
        return Err(ScaffoldError::InvalidModuleName(stem.to_string()));
    }
    Ok(stem)
}

fn is_module_name(stem: &str) -> bool {
    let mut chars = stem.chars();
    let starts_ok = matches!(chars.next(), Some(c) if c.is_ascii_lowercase() || c == '_');
    starts_ok
        && stem != "_"
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        && !RESERVED_STEMS.contains(&stem)
        && !KEYWORDS.contains(&stem)
}

/// `use_pathlib` → `UsePathlib`.
pub fn error_name(stem: &str) -> String {
    stem.split('_').map(capitalize).collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Fill the check template for `kind`, naming its error type `Error<error_name>`.
pub fn render_template(kind: NodeKind, error_name: &str) -> String {
    FILE_TEMPLATE
        .replace("{node_type}", kind.name())
        .replace("{error_name}", error_name)
}

/// Write the module described by `request`, resolving relative paths against
/// `root` (the working directory).
pub fn generate(request: &ScaffoldRequest, root: &Path) -> Result<Scaffold, ScaffoldError> {
    let stem = validate(&request.target)?;
    let error_name = error_name(stem);

    let root = normalize(root, root);
    let path = normalize(&request.target, &root);
    let parent = path.parent().unwrap_or(root.as_path()).to_path_buf();
    if let Some(name) = declared_dirs(&parent, &root)
        .into_iter()
        .find(|name| !is_module_name(name))
    {
        return Err(ScaffoldError::InvalidModuleName(name));
    }

    std::fs::create_dir_all(&parent).map_err(io_error(&parent))?;

    let mut scaffold = Scaffold {
        error_name: error_name.clone(),
        ..Scaffold::default()
    };
    repair_hierarchy(&parent, stem, &root, &mut scaffold)?;

    scaffold.overwritten = path.exists();
    if scaffold.overwritten {
        log::debug!("Overwriting {}", path.display());
    }
    let content = render_template(request.node_kind, &error_name);
    std::fs::write(&path, content).map_err(io_error(&path))?;

    scaffold.registered_in = register_check(&path, &root)?;
    scaffold.path = path;
    Ok(scaffold)
}

/// Names of the directories [`repair_hierarchy`] will declare as modules,
/// innermost first.
fn declared_dirs(dir: &Path, root: &Path) -> Vec<String> {
    let mut dir = dir.to_path_buf();
    let mut names = Vec::new();
    while dir != root && dir.starts_with(root) && crate_root_file(&dir).is_none() {
        let name = match dir.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => break,
        };
        if !dir.pop() {
            break;
        }
        if dir != root && dir.starts_with(root) {
            names.push(name);
        }
    }
    names
}

/// Declare `child` in each enclosing module, from `dir` up to the crate root.
///
/// Stops at `root` without touching it and does nothing for directories
/// outside `root`.
fn repair_hierarchy(
    dir: &Path,
    child: &str,
    root: &Path,
    scaffold: &mut Scaffold,
) -> Result<(), ScaffoldError> {
    let mut dir = dir.to_path_buf();
    let mut child = child.to_string();

    while dir != root && dir.starts_with(root) {
        if let Some(crate_root) = crate_root_file(&dir) {
            if declare_module(&crate_root, &child)? {
                scaffold.declared_in.push(crate_root);
            }
            break;
        }

        let marker = marker_for(&dir);
        if !marker.exists() {
            log::debug!("Creating {}", marker.display());
            std::fs::write(&marker, "").map_err(io_error(&marker))?;
            scaffold.created_markers.push(marker.clone());
        }
        if declare_module(&marker, &child)? {
            scaffold.declared_in.push(marker);
        }

        child = match dir.file_name().and_then(|name| name.to_str()) {
            Some(name) => name.to_string(),
            None => break,
        };
        if !dir.pop() {
            break;
        }
    }
    Ok(())
}

fn crate_root_file(dir: &Path) -> Option<PathBuf> {
    CRATE_ROOTS
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Module file of `dir`: a sibling `<dir>.rs` when present, else `<dir>/mod.rs`.
pub fn marker_for(dir: &Path) -> PathBuf {
    let sibling = dir.file_name().and_then(|name| {
        let parent = dir.parent()?;
        Some(parent.join(format!("{}.{}", name.to_string_lossy(), SOURCE_EXTENSION)))
    });
    match sibling {
        Some(path) if path.is_file() => path,
        _ => dir.join(PACKAGE_MARKER),
    }
}

/// Append `pub mod <child>;` to `marker` unless it already declares `child`.
///
/// Returns whether the file changed.
pub fn declare_module(marker: &Path, child: &str) -> Result<bool, ScaffoldError> {
    let mut content = read_module(marker)?;
    if declares(&content, child) {
        return Ok(false);
    }

    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }
    content.push_str(&format!("pub mod {};\n", child));
    std::fs::write(marker, content).map_err(io_error(marker))?;
    Ok(true)
}

fn declares(content: &str, child: &str) -> bool {
    let wanted = format!("mod {};", child);
    content.lines().any(|line| {
        let line = line.trim();
        let line = line
            .strip_prefix("pub(crate) ")
            .or_else(|| line.strip_prefix("pub "))
            .unwrap_or(line);
        line == wanted
    })
}

/// Add `&<module>::CHECK` to the nearest enclosing `all_checks()` list.
///
/// Returns the file holding the list, or `None` when no enclosing module up
/// to the crate root defines one.
fn register_check(path: &Path, root: &Path) -> Result<Option<PathBuf>, ScaffoldError> {
    let mut dir = path.parent().unwrap_or(root).to_path_buf();
    while dir != root && dir.starts_with(root) {
        let crate_root = crate_root_file(&dir);
        let module_file = crate_root.clone().unwrap_or_else(|| marker_for(&dir));
        let content = read_module(&module_file)?;

        if content.contains(REGISTRY_FN) {
            let Some(module) = module_path(path, &dir) else {
                return Ok(None);
            };
            let entry = format!("&{}::CHECK", module);
            if !content.contains(&entry) {
                let Some(updated) = add_to_registry(&content, &entry) else {
                    log::warn!("No check list found in {}", module_file.display());
                    return Ok(None);
                };
                std::fs::write(&module_file, updated).map_err(io_error(&module_file))?;
            }
            return Ok(Some(module_file));
        }

        if crate_root.is_some() || !dir.pop() {
            break;
        }
    }
    Ok(None)
}

/// `<dir>/pathlib/use_thing.rs` → `pathlib::use_thing`.
fn module_path(path: &Path, dir: &Path) -> Option<String> {
    let relative = path.with_extension("");
    let relative = relative.strip_prefix(dir).ok()?;
    let parts: Vec<_> = relative
        .components()
        .map(|part| part.as_os_str().to_string_lossy())
        .collect();
    Some(parts.join("::"))
}

/// Insert `entry` as the last element of the `vec![..]` inside `all_checks()`.
fn add_to_registry(content: &str, entry: &str) -> Option<String> {
    let start = content.find(REGISTRY_FN)?;
    let body = start + content[start..].find("vec![")? + "vec![".len();

    let mut offset = body;
    for line in content[body..].split_inclusive('\n') {
        let trimmed = line.trim_start();
        if trimmed.starts_with(']') {
            let indent = &line[..line.len() - trimmed.len()];
            let mut updated = content[..offset].to_string();
            if !updated.ends_with('\n') {
                updated.push('\n');
            }
            updated.push_str(&format!("{}    {},\n", indent, entry));
            updated.push_str(&content[offset..]);
            return Some(updated);
        }
        offset += line.len();
    }
    None
}

/// Contents of a module file; empty when it does not exist yet.
fn read_module(path: &Path) -> Result<String, ScaffoldError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(String::new()),
        Err(err) => Err(io_error(path)(err)),
    }
}

/// Make `path` absolute against `root` and drop `.`/`..` components.
fn normalize(path: &Path, root: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    };
    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> ScaffoldError + '_ {
    move |source| ScaffoldError::Io {
        path: path.to_path_buf(),
        source,
    }
}
