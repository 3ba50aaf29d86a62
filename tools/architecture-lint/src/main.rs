//! `architecture-lint [WORKSPACE_DIR]`
//!
//! Checks the layering rules over the workspace at `WORKSPACE_DIR`, or over
//! the workspace this tool was built in when no argument is given. Exits
//! non-zero and lists every violation when a rule is broken.

use std::env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn built_in_workspace() -> PathBuf {
    // tools/architecture-lint -> workspace root
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .ancestors()
        .nth(2)
        .map_or_else(|| manifest_dir.to_path_buf(), Path::to_path_buf)
}

fn main() -> ExitCode {
    let workspace = env::args_os()
        .nth(1)
        .map_or_else(built_in_workspace, PathBuf::from);

    match architecture_lint::lint_workspace(&workspace) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let _ = writeln!(io::stderr().lock(), "{err}");
            ExitCode::FAILURE
        }
    }
}
