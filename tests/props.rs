use std::collections::BTreeSet;

use proptest::prelude::*;

use permcsv::extract::{ValueTable, extract_permissions, split_values};
use permcsv::ingest::SourceTable;

/// Cell content drawn from value-ish fragments joined by the recognized
/// separators, plus whitespace noise.
fn arbitrary_cell() -> impl Strategy<Value = String> {
    let fragment = prop::string::string_regex("[A-Za-z0-9_ .-]{0,12}").expect("valid regex");
    let separator = prop::sample::select(vec![";", ",", "|"]);
    (prop::collection::vec(fragment, 0..5), separator)
        .prop_map(|(fragments, separator)| fragments.join(separator))
}

proptest! {
    #[test]
    fn no_split_token_is_lost_or_invented(cells in prop::collection::vec(arbitrary_cell(), 0..20)) {
        let source = SourceTable {
            headers: vec!["Perm".to_string()],
            rows: cells.iter().map(|cell| vec![cell.clone()]).collect(),
        };
        let tables = extract_permissions(&source, &["Perm".to_string()]).expect("extract");
        let table = tables.table("Perm").expect("table");

        let expected: BTreeSet<String> = cells
            .iter()
            .flat_map(|cell| split_values(cell))
            .map(|value| value.to_string())
            .collect();
        let actual: BTreeSet<String> = table.entries().map(|(_, value)| value.to_string()).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn assigned_ids_are_four_digit_and_round_trip(values in prop::collection::vec("[a-z]{1,8}", 1..50)) {
        let mut table = ValueTable::default();
        for value in &values {
            table.assign(value);
        }
        for (id, value) in table.entries() {
            prop_assert_eq!(id.len(), 4);
            prop_assert!(id.chars().all(|c| c.is_ascii_digit()));
            prop_assert_eq!(table.id_for(value), Some(id));
        }
        let distinct: BTreeSet<&String> = values.iter().collect();
        prop_assert_eq!(table.len(), distinct.len());
    }

    #[test]
    fn split_tokens_are_trimmed_and_non_empty(cell in arbitrary_cell()) {
        for token in split_values(&cell) {
            prop_assert!(!token.is_empty());
            prop_assert_eq!(token, token.trim());
        }
    }
}
