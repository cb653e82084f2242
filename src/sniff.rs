//! Dialect sniffing over a decoded text sample.
//!
//! A simplified take on the table-uniformity approach: each candidate
//! delimiter is scored by how consistently it splits the sample lines into
//! the same number of fields. Quote-aware counting keeps delimiters inside
//! quoted fields from skewing the score.

use crate::error::NormalizeError;

const CANDIDATE_DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];
const QUOTE: u8 = b'"';

/// Delimiter and quoting conventions of a delimited text file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    pub delimiter: u8,
    pub quote: u8,
}

/// Infers the dialect from a sample (the first 1024 chars of decoded text).
///
/// Fatal when no candidate delimiter splits the sample consistently; no
/// fallback dialect is defined.
pub fn sniff_dialect(sample: &str) -> Result<Dialect, NormalizeError> {
    let lines: Vec<&str> = sample
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect();
    if lines.is_empty() {
        return Err(NormalizeError::DialectDetection {
            reason: "sample contains no data".to_string(),
        });
    }

    let mut best: Option<(u8, Score)> = None;
    for delimiter in CANDIDATE_DELIMITERS {
        let score = score_delimiter(&lines, delimiter);
        if score.fields < 2 {
            continue;
        }
        let better = match &best {
            None => true,
            Some((_, current)) => score.is_better_than(current),
        };
        if better {
            best = Some((delimiter, score));
        }
    }

    match best {
        Some((delimiter, _)) => Ok(Dialect {
            delimiter,
            quote: QUOTE,
        }),
        None => Err(NormalizeError::DialectDetection {
            reason: "no delimiter splits the sample into a consistent number of fields"
                .to_string(),
        }),
    }
}

#[derive(Debug, Clone, Copy)]
struct Score {
    /// Fraction of lines matching the modal field count, scaled to avoid floats.
    uniformity: usize,
    /// Modal number of fields per line.
    fields: usize,
}

impl Score {
    fn is_better_than(&self, other: &Score) -> bool {
        // Uniformity dominates; more fields breaks ties. Equal scores keep
        // the earlier candidate, which fixes the priority order.
        (self.uniformity, self.fields) > (other.uniformity, other.fields)
    }
}

fn score_delimiter(lines: &[&str], delimiter: u8) -> Score {
    let counts: Vec<usize> = lines
        .iter()
        .map(|&line| count_fields(line, delimiter))
        .collect();
    let mut modal_count = 0;
    let mut modal_lines = 0;
    for &count in &counts {
        let occurrences = counts.iter().filter(|&&c| c == count).count();
        if occurrences > modal_lines || (occurrences == modal_lines && count > modal_count) {
            modal_count = count;
            modal_lines = occurrences;
        }
    }
    Score {
        uniformity: modal_lines * 1000 / counts.len(),
        fields: modal_count,
    }
}

/// Counts fields on one line, treating `"`-quoted regions as opaque.
fn count_fields(line: &str, delimiter: u8) -> usize {
    let mut fields = 1;
    let mut in_quotes = false;
    for byte in line.bytes() {
        if byte == QUOTE {
            in_quotes = !in_quotes;
        } else if byte == delimiter && !in_quotes {
            fields += 1;
        }
    }
    fields
}
