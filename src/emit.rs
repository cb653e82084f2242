//! Output writers for the lookup tables and the rewritten main table.
//!
//! All output artifacts are UTF-8, comma-delimited, and fully quoted
//! regardless of the input dialect.

use std::path::PathBuf;

use anyhow::{Context, Result};
use itertools::Itertools;
use log::info;

use crate::{
    extract::{PermissionTables, split_values},
    ingest::SourceTable,
    io_utils,
};

/// Placeholder for empty cells and values without a table entry.
pub const NULL_TOKEN: &str = "NULL";

/// Separator used to rejoin ID references in the main table.
const ID_JOIN: char = ';';

pub fn lookup_table_path(prefix: &str, column: &str) -> PathBuf {
    PathBuf::from(format!("{prefix}_{column}.csv"))
}

pub fn main_table_path(prefix: &str) -> PathBuf {
    PathBuf::from(format!("{prefix}_main.csv"))
}

/// Writes one `<prefix>_<column>.csv` per permission column: a header row
/// `<column>_id,<column>` followed by `(id, value)` rows in assignment order.
pub fn write_lookup_tables(tables: &PermissionTables, prefix: &str) -> Result<()> {
    for column in tables.columns() {
        let table = tables
            .table(column)
            .expect("every resolved column carries a table");
        let path = lookup_table_path(prefix, column);
        let mut writer = io_utils::open_csv_writer(&path)?;
        writer
            .write_record([format!("{column}_id"), column.clone()])
            .with_context(|| format!("Writing header to {path:?}"))?;
        for (id, value) in table.entries() {
            writer
                .write_record([id, value])
                .with_context(|| format!("Writing lookup row to {path:?}"))?;
        }
        writer.flush().with_context(|| format!("Flushing {path:?}"))?;
        info!(
            "Wrote {} value(s) for column '{}' to {:?}",
            table.len(),
            column,
            path
        );
    }
    Ok(())
}

/// Rewrites the source rows with permission cells replaced by `;`-joined ID
/// references (or `NULL`), all other cells passed through unchanged.
pub fn write_main_table(source: &SourceTable, tables: &PermissionTables, prefix: &str) -> Result<()> {
    let path = main_table_path(prefix);
    let permission_indexes: Vec<(usize, &str)> = tables
        .columns()
        .iter()
        .filter_map(|column| {
            source
                .column_index(column)
                .map(|index| (index, column.as_str()))
        })
        .collect();

    let mut writer = io_utils::open_csv_writer(&path)?;
    writer
        .write_record(&source.headers)
        .with_context(|| format!("Writing header to {path:?}"))?;
    for row in &source.rows {
        let mut output = row.clone();
        for &(index, column) in &permission_indexes {
            let table = tables
                .table(column)
                .expect("every resolved column carries a table");
            output[index] = rewrite_cell(&row[index], |value| table.id_for(value));
        }
        writer
            .write_record(&output)
            .with_context(|| format!("Writing row to {path:?}"))?;
    }
    writer.flush().with_context(|| format!("Flushing {path:?}"))?;
    info!("Wrote {} row(s) to {:?}", source.rows.len(), path);
    Ok(())
}

fn rewrite_cell<'a>(cell: &str, lookup: impl Fn(&str) -> Option<&'a str>) -> String {
    let values = split_values(cell);
    if values.is_empty() {
        return NULL_TOKEN.to_string();
    }
    values
        .into_iter()
        .map(|value| lookup(value).unwrap_or(NULL_TOKEN))
        .join(&ID_JOIN.to_string())
}
