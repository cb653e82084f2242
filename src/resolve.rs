//! Matches requested permission-column names against the file's headers.

use crate::error::NormalizeError;

/// Normalizes a column name for matching and output (spaces become
/// underscores). Case is preserved.
pub fn normalize_column_name(name: &str) -> String {
    name.replace(' ', "_")
}

/// Outcome of column resolution. Diagnostics are returned as data so the
/// caller decides how to surface them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Resolved permission columns, in request order, as normalized headers.
    pub columns: Vec<String>,
    /// `(requested, matched_header)` pairs where a substring match stood in
    /// for a missing exact match.
    pub substitutions: Vec<(String, String)>,
    /// Requested names with no exact or substring match; dropped from the run.
    pub unmatched: Vec<String>,
}

/// Resolves requested column names against normalized headers.
///
/// Exact matches win outright. Otherwise each request falls back to a
/// case-insensitive substring search, taking the first header in header
/// order. Zero resolved columns is fatal.
pub fn resolve_columns(headers: &[String], requested: &[String]) -> Result<Resolution, NormalizeError> {
    let normalized: Vec<String> = requested
        .iter()
        .map(|name| normalize_column_name(name))
        .collect();

    if normalized.iter().all(|name| headers.contains(name)) {
        return Ok(Resolution {
            columns: normalized,
            substitutions: Vec::new(),
            unmatched: Vec::new(),
        });
    }

    let mut columns = Vec::new();
    let mut substitutions = Vec::new();
    let mut unmatched = Vec::new();
    for name in &normalized {
        let needle = name.to_lowercase();
        match headers
            .iter()
            .find(|header| header.to_lowercase().contains(&needle))
        {
            Some(header) => {
                if header != name {
                    substitutions.push((name.clone(), header.clone()));
                }
                columns.push(header.clone());
            }
            None => unmatched.push(name.clone()),
        }
    }

    if columns.is_empty() {
        return Err(NormalizeError::ColumnResolution {
            requested: normalized,
        });
    }
    Ok(Resolution {
        columns,
        substitutions,
        unmatched,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn exact_matches_are_returned_unchanged() {
        let resolution = resolve_columns(
            &headers(&["Name", "Group", "Role"]),
            &["Group".into(), "Role".into()],
        )
        .unwrap();
        assert_eq!(resolution.columns, vec!["Group", "Role"]);
        assert!(resolution.substitutions.is_empty());
        assert!(resolution.unmatched.is_empty());
    }

    #[test]
    fn requested_names_are_normalized_before_matching() {
        let resolution =
            resolve_columns(&headers(&["Name", "AD_Group"]), &["AD Group".into()]).unwrap();
        assert_eq!(resolution.columns, vec!["AD_Group"]);
        assert!(resolution.substitutions.is_empty());
    }

    #[test]
    fn substring_match_takes_first_header_in_order() {
        let resolution = resolve_columns(
            &headers(&["Name", "Primary_Group", "Secondary_Group"]),
            &["group".into()],
        )
        .unwrap();
        assert_eq!(resolution.columns, vec!["Primary_Group"]);
        assert_eq!(
            resolution.substitutions,
            vec![("group".to_string(), "Primary_Group".to_string())]
        );
    }

    #[test]
    fn partial_resolution_drops_unmatched_names() {
        let resolution = resolve_columns(
            &headers(&["Name", "Group"]),
            &["group".into(), "entitlement".into()],
        )
        .unwrap();
        assert_eq!(resolution.columns, vec!["Group"]);
        assert_eq!(resolution.unmatched, vec!["entitlement"]);
    }

    #[test]
    fn zero_matches_is_fatal() {
        let err = resolve_columns(&headers(&["Name", "Email"]), &["group".into()]).unwrap_err();
        assert!(matches!(err, NormalizeError::ColumnResolution { .. }));
    }
}
