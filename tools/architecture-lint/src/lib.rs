//! Layering checks for the user registry workspace.
//!
//! Sources are grouped into [`Zone`]s by where they live in the workspace.
//! Every zone has its own deny list, checked against the paths a file names
//! in `use` trees, types, expressions and attribute names:
//!
//! - `domain` reaches neither adapter layer nor any web, SQL or config crate,
//!   and never reads the wall clock directly; time comes from the injected
//!   `mockable::Clock`.
//! - `inbound` reaches no `outbound` module, no SQL crate, and talks to the
//!   core through the driving ports only, never the `UserRepository`.
//! - `outbound` reaches no `inbound` module and no web crate.
//! - `pagination` stays a plain library: no framework, runtime or registry
//!   imports.
//!
//! Files outside every zone (`main.rs`, `server/`, settings) are composition
//! code and are not checked.

mod paths;
mod zone;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub use zone::{Breach, Zone};

/// One breach found in one file.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}: {breach}", .file.display())]
pub struct Violation {
    /// Workspace-relative path of the offending file.
    pub file: PathBuf,
    /// What the file did wrong.
    pub breach: Breach,
}

/// Why a lint run did not come back clean.
#[derive(Debug, thiserror::Error)]
pub enum LintError {
    /// A source file or directory could not be read.
    #[error("reading {}: {source}", .path.display())]
    Read {
        /// File or directory being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// A source file is not valid Rust.
    #[error("parsing {}: {message}", .file.display())]
    Parse {
        /// File that failed to parse.
        file: PathBuf,
        /// Parser diagnostic.
        message: String,
    },
    /// The sources parsed but broke one or more layering rules.
    #[error("{} layering violation(s):\n{}", .0.len(), render(.0))]
    Violations(Vec<Violation>),
}

fn render(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|violation| format!("  {violation}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A Rust source file and its workspace-relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintSource {
    /// Path relative to the workspace root, e.g. `backend/src/domain/user.rs`.
    pub file: PathBuf,
    /// File contents.
    pub contents: String,
}

impl LintSource {
    /// Pair a workspace-relative path with its contents.
    pub fn new(file: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            contents: contents.into(),
        }
    }
}

/// Check in-memory sources, returning every violation at once.
///
/// # Errors
///
/// Returns [`LintError::Parse`] for the first file that is not valid Rust,
/// otherwise [`LintError::Violations`] when any checked file breaks a rule.
pub fn lint_sources(sources: &[LintSource]) -> Result<(), LintError> {
    let mut violations = Vec::new();
    for source in sources {
        let Some(zone) = Zone::of(&source.file) else {
            continue;
        };
        let parsed = syn::parse_file(&source.contents).map_err(|err| LintError::Parse {
            file: source.file.clone(),
            message: err.to_string(),
        })?;
        violations.extend(
            zone.breaches(&paths::collect(&parsed))
                .into_iter()
                .map(|breach| Violation {
                    file: source.file.clone(),
                    breach,
                }),
        );
    }
    if violations.is_empty() {
        Ok(())
    } else {
        Err(LintError::Violations(violations))
    }
}

/// Read every zoned source under `workspace_root` and check it.
///
/// # Errors
///
/// Returns [`LintError::Read`] when a zone directory or file cannot be read,
/// and otherwise the errors of [`lint_sources`].
pub fn lint_workspace(workspace_root: &Path) -> Result<(), LintError> {
    let mut sources = Vec::new();
    for zone in Zone::ALL {
        let dir = workspace_root.join(zone.root());
        if dir.is_dir() {
            read_rust_files(workspace_root, &dir, &mut sources)?;
        }
    }
    lint_sources(&sources)
}

fn read_rust_files(
    workspace_root: &Path,
    dir: &Path,
    sources: &mut Vec<LintSource>,
) -> Result<(), LintError> {
    let mut entries = fs::read_dir(dir)
        .and_then(|entries| {
            entries
                .map(|entry| entry.map(|e| e.path()))
                .collect::<io::Result<Vec<_>>>()
        })
        .map_err(read_error(dir))?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            read_rust_files(workspace_root, &path, sources)?;
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            let contents = fs::read_to_string(&path).map_err(read_error(&path))?;
            let file = path.strip_prefix(workspace_root).unwrap_or(&path).to_path_buf();
            sources.push(LintSource { file, contents });
        }
    }
    Ok(())
}

fn read_error(path: &Path) -> impl FnOnce(io::Error) -> LintError {
    let path = path.to_path_buf();
    move |source| LintError::Read { path, source }
}

#[cfg(test)]
mod tests;
