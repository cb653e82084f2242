//! One-shot ingestion of the input file into memory.
//!
//! The file is read exactly once: encoding detection runs over the raw
//! bytes, the dialect sniffer runs over a decoded sample, then the whole
//! table is parsed into a `SourceTable` that every later stage shares.

use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info};

use crate::{io_utils, resolve::normalize_column_name, sniff};

/// The parsed input: normalized headers plus all rows in file order.
#[derive(Debug)]
pub struct SourceTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SourceTable {
    pub fn read(path: &Path, encoding_override: Option<&str>) -> Result<SourceTable> {
        let bytes = io_utils::read_file_bytes(path)?;
        let encoding = match encoding_override {
            Some(label) => io_utils::resolve_encoding(label)?,
            None => io_utils::detect_encoding(&bytes),
        };
        let sample = io_utils::decode_sample(&bytes, encoding);
        let dialect = sniff::sniff_dialect(&sample)
            .with_context(|| format!("Sniffing dialect of {path:?}"))?;
        info!(
            "Reading '{}' as {} with delimiter '{}'",
            path.display(),
            encoding.name(),
            printable_delimiter(dialect.delimiter)
        );

        let mut reader = io_utils::open_csv_reader(bytes, encoding, &dialect);
        let headers: Vec<String> = reader
            .headers()
            .context("Reading header row")?
            .iter()
            .map(normalize_column_name)
            .collect();

        let mut rows = Vec::new();
        for (row_idx, record) in reader.records().enumerate() {
            let record = record.with_context(|| format!("Reading row {}", row_idx + 2))?;
            let mut row: Vec<String> = record.iter().map(|cell| cell.to_string()).collect();
            // Flexible reader: pad short rows so column indexing stays valid.
            if row.len() < headers.len() {
                row.resize(headers.len(), String::new());
            }
            rows.push(row);
        }
        debug!("Ingested {} row(s), {} column(s)", rows.len(), headers.len());
        Ok(SourceTable { headers, rows })
    }

    /// Index of a normalized header, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }
}

pub(crate) fn printable_delimiter(delimiter: u8) -> String {
    match delimiter {
        b'\t' => "\\t".to_string(),
        other => (other as char).to_string(),
    }
}
