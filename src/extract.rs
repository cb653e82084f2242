//! Permission extraction: cell splitting and synthetic ID assignment.

use std::collections::HashMap;

use anyhow::{Result, anyhow};
use log::debug;

use crate::ingest::SourceTable;

/// Multi-value separators, in priority order. The first one present anywhere
/// in a cell splits the whole cell.
pub const SEPARATORS: [char; 3] = [';', ',', '|'];

/// Splits a cell into trimmed, non-empty permission values.
pub fn split_values(cell: &str) -> Vec<&str> {
    match SEPARATORS.iter().find(|sep| cell.contains(**sep)) {
        Some(&separator) => cell
            .split(separator)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .collect(),
        None => {
            let trimmed = cell.trim();
            if trimmed.is_empty() {
                Vec::new()
            } else {
                vec![trimmed]
            }
        }
    }
}

/// Insertion-ordered mapping from distinct permission value to a synthetic
/// 4-digit ID, scoped to one column. IDs start at "0001" and are never
/// reassigned within a run.
#[derive(Debug, Default)]
pub struct ValueTable {
    ids: HashMap<String, String>,
    order: Vec<String>,
}

impl ValueTable {
    /// Returns the value's ID, assigning the next sequential one on first
    /// sight.
    pub fn assign(&mut self, value: &str) -> &str {
        if !self.ids.contains_key(value) {
            let id = synthetic_id(self.order.len() + 1);
            self.ids.insert(value.to_string(), id);
            self.order.push(value.to_string());
        }
        &self.ids[value]
    }

    pub fn id_for(&self, value: &str) -> Option<&str> {
        self.ids.get(value).map(String::as_str)
    }

    /// `(id, value)` pairs in assignment order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.order
            .iter()
            .map(|value| (self.ids[value].as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

fn synthetic_id(counter: usize) -> String {
    format!("{counter:04}")
}

/// Per-column value tables, keyed by resolved column name in request order.
#[derive(Debug, Default)]
pub struct PermissionTables {
    columns: Vec<String>,
    tables: HashMap<String, ValueTable>,
}

impl PermissionTables {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn table(&self, column: &str) -> Option<&ValueTable> {
        self.tables.get(column)
    }
}

/// Scans every row once and assigns IDs to each distinct non-empty value,
/// in row-scan order, independently per column.
pub fn extract_permissions(source: &SourceTable, columns: &[String]) -> Result<PermissionTables> {
    let mut indexed = Vec::with_capacity(columns.len());
    for column in columns {
        let index = source
            .column_index(column)
            .ok_or_else(|| anyhow!("Resolved column '{column}' missing from headers"))?;
        indexed.push((column.clone(), index));
    }

    let mut tables = PermissionTables {
        columns: columns.to_vec(),
        tables: columns
            .iter()
            .map(|column| (column.clone(), ValueTable::default()))
            .collect(),
    };
    for (row_idx, row) in source.rows.iter().enumerate() {
        for (column, index) in &indexed {
            let cell = row.get(*index).map(String::as_str).unwrap_or("");
            flag_mixed_separators(cell, column, row_idx);
            let table = tables
                .tables
                .get_mut(column)
                .expect("table exists for every resolved column");
            for value in split_values(cell) {
                table.assign(value);
            }
        }
    }
    Ok(tables)
}

/// A cell containing more than one separator character splits only on the
/// highest-priority one; the rest stay embedded in the values. Worth a trace
/// since it can indicate malformed source data.
fn flag_mixed_separators(cell: &str, column: &str, row_idx: usize) {
    let present = SEPARATORS
        .iter()
        .filter(|sep| cell.contains(**sep))
        .count();
    if present > 1 {
        debug!(
            "Row {}, column '{}': cell contains multiple separator characters; splitting on '{}' only",
            row_idx + 2,
            column,
            SEPARATORS
                .iter()
                .find(|sep| cell.contains(**sep))
                .expect("at least two separators present"),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn semicolon_takes_priority_over_comma() {
        assert_eq!(split_values("a,b;c"), vec!["a,b", "c"]);
    }

    #[test]
    fn comma_takes_priority_over_pipe() {
        assert_eq!(split_values("a|b,c"), vec!["a|b", "c"]);
    }

    #[test]
    fn tokens_are_trimmed_and_empties_dropped() {
        assert_eq!(split_values(" admin ; ; user "), vec!["admin", "user"]);
        assert_eq!(split_values("  "), Vec::<&str>::new());
        assert_eq!(split_values("solo"), vec!["solo"]);
    }

    #[test]
    fn ids_are_assigned_in_first_seen_order() {
        let mut table = ValueTable::default();
        assert_eq!(table.assign("admin"), "0001");
        assert_eq!(table.assign("user"), "0002");
        assert_eq!(table.assign("admin"), "0001");
        assert_eq!(table.len(), 2);
        let entries: Vec<_> = table.entries().collect();
        assert_eq!(entries, vec![("0001", "admin"), ("0002", "user")]);
    }

    #[test]
    fn columns_get_independent_tables() {
        let source = SourceTable {
            headers: vec!["Group".into(), "Role".into()],
            rows: vec![
                vec!["admin;user".into(), "admin".into()],
                vec!["guest".into(), "operator".into()],
            ],
        };
        let tables =
            extract_permissions(&source, &["Group".to_string(), "Role".to_string()]).unwrap();
        let group = tables.table("Group").unwrap();
        let role = tables.table("Role").unwrap();
        assert_eq!(group.id_for("admin"), Some("0001"));
        assert_eq!(group.id_for("guest"), Some("0003"));
        assert_eq!(role.id_for("admin"), Some("0001"));
        assert_eq!(role.id_for("operator"), Some("0002"));
    }

    #[test]
    fn extraction_is_deterministic() {
        let source = SourceTable {
            headers: vec!["Group".into()],
            rows: vec![vec!["b;a".into()], vec!["c".into()], vec!["a".into()]],
        };
        let first = extract_permissions(&source, &["Group".to_string()]).unwrap();
        let second = extract_permissions(&source, &["Group".to_string()]).unwrap();
        let left: Vec<_> = first.table("Group").unwrap().entries().collect();
        let right: Vec<_> = second.table("Group").unwrap().entries().collect();
        assert_eq!(left, right);
        assert_eq!(left, vec![("0001", "b"), ("0002", "a"), ("0003", "c")]);
    }
}
