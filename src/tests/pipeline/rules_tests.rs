use serde_json::json;

use crate::{FieldKey, FieldParsers, FieldRules, HeaderLabels, Row, RowParser, RowValidator};

fn fruit_row(color: &str) -> Row {
    let labels: HeaderLabels = ["name", "color"].into_iter().collect();
    Row::keyed(labels, vec![json!("apple"), json!(color)])
}

fn allowed_colors() -> FieldRules {
    FieldRules::new().rule("color", |v| match v.as_str() {
        Some("red" | "green") => Ok(()),
        _ => Err(String::new()),
    })
}

#[test]
fn rules_accept_matching_rows() {
    assert!(allowed_colors().validate_data_row(&fruit_row("red")).is_valid());
}

#[test]
fn empty_message_falls_back_to_format_error() {
    let report = allowed_colors().validate_data_row(&fruit_row("blue"));

    assert_eq!(report.len(), 1);
    assert_eq!(report.errors()[0].key, FieldKey::from("color"));
    assert!(report.errors()[0].message.contains("'blue'"));
}

#[test]
fn custom_message_is_kept() {
    let rules = FieldRules::new().rule("name", |_| Err("never valid".to_string()));

    let report = rules.validate_data_row(&fruit_row("red"));

    assert_eq!(report.messages().collect::<Vec<_>>(), vec!["never valid"]);
}

#[test]
fn first_failing_rule_per_field_wins() {
    let rules = FieldRules::new()
        .rule("color", |_| Err("one".to_string()))
        .rule("color", |_| Err("two".to_string()));

    let report = rules.validate_data_row(&fruit_row("red"));

    assert_eq!(report.messages().collect::<Vec<_>>(), vec!["one"]);
}

#[test]
fn fatal_rule_reports_breaking_errors() {
    let rules = FieldRules::new().fatal_rule("color", |_| Err(String::new()));

    assert!(rules.validate_data_row(&fruit_row("red")).is_breaking());
}

#[test]
fn header_check_validates_every_label() {
    let rules = FieldRules::new().header_check(|_, label| !label.trim().is_empty());
    let labels: HeaderLabels = ["a", " ", "c"].into_iter().collect();

    let report = rules.validate_header(&labels);

    assert_eq!(report.len(), 1);
    assert_eq!(report.errors()[0].key, FieldKey::Index(1));
}

#[test]
fn expect_labels_checks_order() {
    let rules = FieldRules::new().expect_labels(&["name", "color"]);

    let ok: HeaderLabels = ["name", "color"].into_iter().collect();
    let swapped: HeaderLabels = ["color", "name"].into_iter().collect();
    let extra: HeaderLabels = ["name", "color", "shape"].into_iter().collect();

    assert!(rules.validate_header(&ok).is_valid());
    assert_eq!(rules.validate_header(&swapped).len(), 2);
    assert_eq!(rules.validate_header(&extra).len(), 1);
}

#[test]
fn parsers_transform_matching_fields() {
    let parsers = FieldParsers::new()
        .parser("color", |v| Ok(json!(v.as_str().unwrap_or_default().to_uppercase())))
        .parser("color", |v| Ok(json!(format!("{}!", v.as_str().unwrap_or_default()))));

    let row = parsers.parse_row(fruit_row("red")).expect("parse");

    assert_eq!(row.get("color"), Some(&json!("RED!")));
    assert_eq!(row.get("name"), Some(&json!("apple")));
}

#[test]
fn parser_failures_are_collected_per_field() {
    let parsers = FieldParsers::new()
        .parser("name", |_| Err("no names".to_string()))
        .parser("color", |_| Err(String::new()));

    let report = parsers.parse_row(fruit_row("red")).expect_err("both fail");

    assert_eq!(report.len(), 2);
    assert_eq!(report.errors()[0].message, "no names");
    assert!(report.errors()[1].message.contains("'color'"));
}
