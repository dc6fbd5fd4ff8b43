//! # Check Subcommand
//!
//! Validates the content directory and prints a per-collection summary:
//!
//! ```text
//! blog: 2/3 passed
//!   FAIL broken-date (blog/broken-date.md)
//!       pubDate: invalid date: "not-a-date"
//! projects: 1/1 passed
//! ```

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use folio_schema::{ContentLoader, EntryError, LoadReport};

use crate::config::FolioConfig;

/// Arguments for `folio check`.
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    /// Content directory (overrides `content_dir` from the config file).
    #[arg(long, value_name = "DIR")]
    pub content_dir: Option<PathBuf>,

    /// Check a single collection.
    #[arg(long, value_name = "NAME")]
    pub collection: Option<String>,

    /// Print validated entries as JSON on stdout; the summary goes to stderr.
    #[arg(long)]
    pub json: bool,
}

/// Execute `folio check`.
///
/// Returns 0 when every entry is valid and 1 when any entry failed.
pub fn run_check(args: &CheckArgs, config: &FolioConfig, cwd: &Path) -> Result<u8> {
    let content_dir = args
        .content_dir
        .as_deref()
        .map(|p| crate::resolve_path(p, cwd))
        .unwrap_or_else(|| config.content_dir.clone());

    let report = load(&content_dir, args.collection.as_deref())
        .with_context(|| format!("failed to load content from {}", content_dir.display()))?;

    let summary = render_report(&report, &content_dir);
    if args.json {
        eprint!("{summary}");
        let entries: Vec<_> = report.entries().collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        print!("{summary}");
    }

    Ok(u8::from(report.has_failures()))
}

fn load(
    content_dir: &Path,
    collection: Option<&str>,
) -> Result<LoadReport, folio_schema::LoadError> {
    let loader = ContentLoader::new(content_dir);
    match collection {
        Some(name) => Ok(LoadReport {
            collections: vec![loader.load_collection(name)?],
        }),
        None => loader.load_all(),
    }
}

/// Human-readable summary of a load report.
pub fn render_report(report: &LoadReport, content_dir: &Path) -> String {
    let mut out = String::new();
    for collection in &report.collections {
        let _ = writeln!(
            out,
            "{}: {}/{} passed",
            collection.collection,
            collection.passed(),
            collection.total()
        );
        for failure in &collection.failures {
            let rel = failure
                .path
                .strip_prefix(content_dir)
                .unwrap_or(&failure.path);
            let _ = writeln!(out, "  FAIL {} ({})", failure.id, rel.display());
            match &failure.error {
                EntryError::Validation(err) => {
                    for v in &err.violations {
                        let _ = writeln!(out, "      {}: {}", v.path(), v.reason);
                    }
                }
                other => {
                    let _ = writeln!(out, "      {other}");
                }
            }
        }
    }

    let failed = report.failed();
    if failed > 0 {
        let noun = if failed == 1 { "entry" } else { "entries" };
        let _ = writeln!(
            out,
            "\n{failed} {noun} failed validation out of {} total.",
            report.total()
        );
    }
    out
}
