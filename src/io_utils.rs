//! I/O utilities: encoding resolution/detection and CSV reader/writer
//! construction.
//!
//! Input files may arrive in any encoding an identity system exports; bytes
//! are decoded to UTF-8 through `encoding_rs_io` before the CSV parser sees
//! them. Output is always UTF-8, comma-delimited, fully quoted so values
//! containing the `;` join separator survive a round trip.

use std::{
    fs::File,
    io::{BufWriter, Cursor, Read, Write},
    path::Path,
};

use anyhow::{Context, Result, anyhow};
use chardetng::EncodingDetector;
use csv::QuoteStyle;
use encoding_rs::Encoding;
use encoding_rs_io::DecodeReaderBytesBuilder;

use crate::sniff::Dialect;

/// Number of characters of decoded text handed to the dialect sniffer.
pub const SNIFF_SAMPLE_CHARS: usize = 1024;

pub fn resolve_encoding(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| anyhow!("Unknown encoding '{label}'"))
}

/// Statistically detects the character encoding of raw file content.
///
/// `chardetng` always produces a usable guess (ASCII-only input comes back
/// as windows-1252, a strict ASCII superset), so detection itself never
/// fails; an explicit `--input-encoding` override bypasses it entirely.
pub fn detect_encoding(bytes: &[u8]) -> &'static Encoding {
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, true)
}

/// Decodes up to [`SNIFF_SAMPLE_CHARS`] characters from the start of `bytes`.
pub fn decode_sample(bytes: &[u8], encoding: &'static Encoding) -> String {
    let (text, _, _) = encoding.decode(bytes);
    match text.char_indices().nth(SNIFF_SAMPLE_CHARS) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.into_owned(),
    }
}

pub fn read_file_bytes(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("Reading input file {path:?}"))
}

/// Builds a CSV reader over in-memory bytes, transcoding from `encoding`
/// to UTF-8 on the fly. Flexible so short rows can be padded by the caller.
pub fn open_csv_reader(
    bytes: Vec<u8>,
    encoding: &'static Encoding,
    dialect: &Dialect,
) -> csv::Reader<Box<dyn Read>> {
    let decoder = DecodeReaderBytesBuilder::new()
        .encoding(Some(encoding))
        .bom_override(true)
        .build(Cursor::new(bytes));
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(true)
        .delimiter(dialect.delimiter)
        .quote(dialect.quote)
        .double_quote(true)
        .flexible(true);
    builder.from_reader(Box::new(decoder) as Box<dyn Read>)
}

/// Opens a fully-quoted, comma-delimited UTF-8 CSV writer.
pub fn open_csv_writer(path: &Path) -> Result<csv::Writer<Box<dyn Write>>> {
    let file: Box<dyn Write> = Box::new(BufWriter::new(
        File::create(path).with_context(|| format!("Creating output file {path:?}"))?,
    ));
    let mut builder = csv::WriterBuilder::new();
    builder
        .delimiter(b',')
        .quote_style(QuoteStyle::Always)
        .double_quote(true);
    Ok(builder.from_writer(file))
}
