//! End-to-end run: ingest once, resolve columns, build value tables, then
//! emit the lookup tables, rewritten main table, and connector schema.
//!
//! There is no transactional guarantee across the output artifacts; files
//! written before a later failure stay on disk.

use anyhow::{Context, Result};
use log::{info, warn};

use crate::{cli::Args, emit, extract, ingest::SourceTable, resolve, schema_script};

pub fn execute(args: &Args) -> Result<()> {
    let source = SourceTable::read(&args.input, args.input_encoding.as_deref())
        .with_context(|| format!("Ingesting {input:?}", input = args.input))?;

    let resolution = resolve::resolve_columns(
        &source.headers,
        &args.permission_columns,
    )?;
    for name in &resolution.unmatched {
        warn!("Could not find a column similar to '{name}'; skipping it");
    }
    if !resolution.substitutions.is_empty() {
        info!(
            "Using the following columns as permission attributes: {:?}",
            resolution.columns
        );
    }

    let tables = extract::extract_permissions(&source, &resolution.columns)?;
    emit::write_lookup_tables(&tables, &args.output_prefix)?;
    emit::write_main_table(&source, &tables, &args.output_prefix)?;
    schema_script::write_schema(&source.headers, &resolution.columns, &args.output_prefix)?;

    info!(
        "Processing complete. Output files generated with prefix: {}",
        args.output_prefix
    );
    Ok(())
}
