use crate::{ErrorPolicy, Stage};

#[test]
fn default_policy_accumulates() {
    assert_eq!(ErrorPolicy::default(), ErrorPolicy::Accumulate);
}

#[test]
fn policy_names_are_loose() {
    assert_eq!(ErrorPolicy::from_str("fast_fail"), Some(ErrorPolicy::FastFail));
    assert_eq!(ErrorPolicy::from_str("Fast-Fail"), Some(ErrorPolicy::FastFail));
    assert_eq!(ErrorPolicy::from_str("fastfail"), Some(ErrorPolicy::FastFail));
    assert_eq!(ErrorPolicy::from_str("ACCUMULATE"), Some(ErrorPolicy::Accumulate));
    assert_eq!(ErrorPolicy::from_str("retry"), None);
}

#[test]
fn stage_display() {
    assert_eq!(Stage::Reconcile.to_string(), "Reconcile");
    assert_eq!(Stage::Header.to_string(), "Header");
}
