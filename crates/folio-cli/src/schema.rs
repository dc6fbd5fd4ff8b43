//! # Schema Subcommand
//!
//! Prints the JSON Schema of one or all collections, or writes them as
//! `<collection>.schema.json` files for editor integration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde_json::{Map, Value};

use folio_core::CollectionName;
use folio_schema::json_schema::{all_json_schemas, schema_file_name};
use folio_schema::{registry, to_json_schema};

use crate::config::FolioConfig;

/// Arguments for `folio schema`.
#[derive(Args, Debug, Default)]
pub struct SchemaArgs {
    /// Collection to export; all collections when omitted.
    #[arg(value_name = "NAME")]
    pub collection: Option<String>,

    /// Write schema files instead of printing.
    #[arg(long)]
    pub write: bool,

    /// Output directory for `--write` (overrides `schema_dir`).
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}

/// Execute `folio schema`.
pub fn run_schema(args: &SchemaArgs, config: &FolioConfig, cwd: &Path) -> Result<u8> {
    let schemas = select(args.collection.as_deref())?;

    if args.write {
        let out_dir = args
            .out_dir
            .as_deref()
            .map(|p| crate::resolve_path(p, cwd))
            .unwrap_or_else(|| config.schema_dir.clone());
        for path in write_schemas(&schemas, &out_dir)? {
            println!("wrote {}", path.display());
        }
        return Ok(0);
    }

    let output = match schemas.as_slice() {
        [(_, single)] => single.clone(),
        many => Value::Object(
            many.iter()
                .map(|(name, schema)| (name.to_string(), schema.clone()))
                .collect::<Map<_, _>>(),
        ),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(0)
}

/// Resolve the requested collection, or all of them.
pub fn select(collection: Option<&str>) -> Result<Vec<(CollectionName, Value)>> {
    match collection {
        Some(name) => {
            let schema = registry::lookup(name)?;
            Ok(vec![(schema.name, to_json_schema(schema))])
        }
        None => Ok(all_json_schemas()),
    }
}

/// Write each schema to `<out_dir>/<collection>.schema.json`.
pub fn write_schemas(schemas: &[(CollectionName, Value)], out_dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("cannot create {}", out_dir.display()))?;

    let mut written = Vec::with_capacity(schemas.len());
    for (name, schema) in schemas {
        let path = out_dir.join(schema_file_name(*name));
        let mut text = serde_json::to_string_pretty(schema)?;
        text.push('\n');
        std::fs::write(&path, text).with_context(|| format!("cannot write {}", path.display()))?;
        tracing::info!(collection = %name, path = %path.display(), "wrote JSON schema");
        written.push(path);
    }
    Ok(written)
}
