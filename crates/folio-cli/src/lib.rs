//! # folio-cli: Content Collection Tooling
//!
//! Provides the `folio` command-line interface.
//!
//! ## Subcommands
//!
//! - `folio check`: Load and validate every entry of the content
//!   directory (or one collection), report failures, optionally dump the
//!   validated entries as JSON.
//! - `folio schema`: Print or write the JSON Schema of each collection.
//!
//! ```bash
//! folio check
//! folio check --collection blog --json
//! folio schema projects
//! folio schema --write
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the handlers.
//! - Handlers delegate to `folio-schema`; no validation logic lives here.
//! - Handlers return exit codes: 0 clean, 1 invalid content, and errors
//!   surface as exit code 2 from `main`.

pub mod check;
pub mod config;
pub mod schema;

use std::path::{Path, PathBuf};

/// Resolve a path given on the command line against the working directory.
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
