use std::collections::HashSet;

use chrono::Utc;
use paydash_core::{infer_fields, FieldFormatter, FormatRules, Record, TableOutcome, TableRenderer};
use proptest::prelude::*;
use serde_json::Value;

fn field_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<i64>().prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        "[a-z0-9 ]{0,30}".prop_map(Value::from),
    ]
}

fn record() -> impl Strategy<Value = Record> {
    prop::collection::vec(("[a-f]{1,2}(_date)?", field_value()), 0..6).prop_map(|fields| {
        fields
            .into_iter()
            .fold(Record::new(), |record, (name, value)| record.with(name, value))
    })
}

fn first_seen_order(records: &[Record]) -> Vec<String> {
    let mut order: Vec<String> = Vec::new();
    for record in records {
        for name in record.field_names() {
            if !order.iter().any(|seen| seen == name) {
                order.push(name.to_string());
            }
        }
    }
    order
}

proptest! {
    #[test]
    fn catalog_has_no_duplicates_and_keeps_first_seen_order(
        records in prop::collection::vec(record(), 0..8)
    ) {
        let catalog = infer_fields(&records);
        let names = catalog.to_vec();
        let unique: HashSet<_> = names.iter().collect();
        prop_assert_eq!(unique.len(), names.len());
        prop_assert_eq!(names, first_seen_order(&records));
    }

    #[test]
    fn rendered_rows_are_never_ragged(records in prop::collection::vec(record(), 1..8)) {
        let renderer = TableRenderer::new(FieldFormatter::with_zone(FormatRules::default(), Utc));
        let TableOutcome::Table(view) = renderer.render(&records) else {
            panic!("non-empty batch rendered as no data");
        };
        prop_assert_eq!(view.rows.len(), records.len());
        prop_assert_eq!(view.headers.len(), view.columns.len());
        for row in &view.rows {
            prop_assert_eq!(row.len(), view.columns.len());
        }
    }

    #[test]
    fn formatting_is_pure(name in "[a-zA-Z_]{1,12}", value in field_value()) {
        let formatter = FieldFormatter::with_zone(FormatRules::default(), Utc);
        let record = Record::new().with(name.clone(), value);
        prop_assert_eq!(
            formatter.format(&name, record.get(&name)),
            formatter.format(&name, record.get(&name))
        );
    }
}

#[test]
fn empty_batch_gives_empty_catalog() {
    assert!(infer_fields(&[]).is_empty());
}
