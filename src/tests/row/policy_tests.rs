use serde_json::json;

use crate::policy::ColumnMismatch;
use crate::{ConfigError, FieldValue, HeaderPolicy};

fn values(n: usize) -> Vec<FieldValue> {
    (0..n).map(|i| json!(i.to_string())).collect()
}

#[test]
fn data_optional_pads_short_rows() {
    let padded = HeaderPolicy::DataOptional
        .reconcile(4, values(1))
        .expect("pad");

    assert_eq!(padded.len(), 4);
    assert_eq!(padded[0], json!("0"));
    assert!(padded[1..].iter().all(FieldValue::is_null));
}

#[test]
fn data_optional_rejects_long_rows() {
    let err = HeaderPolicy::DataOptional
        .reconcile(4, values(5))
        .expect_err("too long");

    assert_eq!(
        err,
        ColumnMismatch {
            policy: HeaderPolicy::DataOptional,
            labels: 4,
            values: 5,
        }
    );
    assert_eq!(
        err.message(2),
        "Parse error in file, line 2: The line contains 5 values and the header row contains 4 labels. The number of values must be <= the number of labels."
    );
}

#[test]
fn data_required_demands_exact_count() {
    assert_eq!(
        HeaderPolicy::DataRequired
            .reconcile(2, values(2))
            .expect("exact")
            .len(),
        2
    );
    assert!(HeaderPolicy::DataRequired.reconcile(2, values(1)).is_err());
    assert!(HeaderPolicy::DataRequired.reconcile(2, values(3)).is_err());
}

#[test]
fn unreconciled_policies_pass_rows_through() {
    for policy in [HeaderPolicy::NoHeader, HeaderPolicy::DisregardHeader] {
        assert_eq!(policy.reconcile(2, values(5)).expect("pass").len(), 5);
        assert!(!policy.reconciles());
    }
}

#[test]
fn header_expectations() {
    assert!(!HeaderPolicy::NoHeader.expects_header());
    assert!(HeaderPolicy::DisregardHeader.expects_header());
    assert!(HeaderPolicy::DataOptional.expects_header());
    assert!(HeaderPolicy::DataRequired.reconciles());
    assert_eq!(HeaderPolicy::default(), HeaderPolicy::DataOptional);
}

#[test]
fn names_and_legacy_aliases() {
    assert_eq!(
        HeaderPolicy::from_str("disregard"),
        Some(HeaderPolicy::DisregardHeader)
    );
    assert_eq!(
        HeaderPolicy::from_str("subDataOptional"),
        Some(HeaderPolicy::DataOptional)
    );
    assert_eq!(
        HeaderPolicy::from_str("subDataRequired"),
        Some(HeaderPolicy::DataRequired)
    );
    assert_eq!(HeaderPolicy::from_str("sometimes"), None);
    for policy in [
        HeaderPolicy::NoHeader,
        HeaderPolicy::DisregardHeader,
        HeaderPolicy::DataOptional,
        HeaderPolicy::DataRequired,
    ] {
        assert_eq!(HeaderPolicy::from_str(policy.as_str()), Some(policy));
    }
}

#[test]
fn unknown_policy_is_a_config_error() {
    let err = HeaderPolicy::try_from("sometimes".to_string()).expect_err("unknown");

    assert!(matches!(err, ConfigError::UnsupportedHeaderPolicy(ref s) if s == "sometimes"));
    assert_eq!(
        err.to_string(),
        "\"sometimes\" is not a supported header policy option."
    );
}

#[test]
fn deserializes_from_name() {
    let policy: HeaderPolicy = serde_json::from_str("\"noHeader\"").expect("policy");
    assert_eq!(policy, HeaderPolicy::NoHeader);

    assert!(serde_json::from_str::<HeaderPolicy>("\"bogus\"").is_err());
}
