use std::sync::Arc;

use crate::{
    Dialect, ErrorPolicy, FieldKey, FieldParsers, FieldRules, HeaderPolicy, ReaderOptions,
    RowValidator,
};

#[test]
fn defaults() {
    let options = ReaderOptions::default();

    assert_eq!(options.dialect.delimiter, b'\t');
    assert_eq!(options.dialect.enclosure, b'"');
    assert_eq!(options.dialect.escape, Some(b'\\'));
    assert_eq!(options.dialect.max_line_length, 0);
    assert_eq!(options.header_policy, HeaderPolicy::DataOptional);
    assert!(options.use_labels_as_keys);
    assert_eq!(options.error_policy, ErrorPolicy::Accumulate);
    assert!(options.validator.is_none());
    assert!(options.parser.is_none());
    assert!(options.expects_header());
}

#[test]
fn builder_methods_set_fields() {
    let options = ReaderOptions::new()
        .with_delimiter(b';')
        .with_enclosure(b'\'')
        .with_escape(None)
        .with_max_line_length(512)
        .with_header_policy(HeaderPolicy::NoHeader)
        .with_labels_as_keys(false)
        .with_error_policy(ErrorPolicy::FastFail)
        .with_validator(FieldRules::new())
        .with_parser(FieldParsers::new());

    assert_eq!(
        options.dialect,
        Dialect {
            delimiter: b';',
            enclosure: b'\'',
            escape: None,
            max_line_length: 512,
        }
    );
    assert_eq!(options.header_policy, HeaderPolicy::NoHeader);
    assert!(!options.use_labels_as_keys);
    assert_eq!(options.error_policy, ErrorPolicy::FastFail);
    assert!(options.validator.is_some());
    assert!(options.parser.is_some());
    assert!(!options.expects_header());
}

#[test]
fn csv_preset_uses_commas() {
    assert_eq!(ReaderOptions::csv().dialect.delimiter, b',');
}

#[test]
fn shared_validator_is_not_copied() {
    let rules: Arc<dyn RowValidator> = Arc::new(FieldRules::new().rule(FieldKey::Index(0), |_| Ok(())));
    let a = ReaderOptions::new().with_shared_validator(rules.clone());
    let b = a.clone();

    assert_eq!(Arc::strong_count(&rules), 3);
    assert!(b.validator.is_some());
}

#[test]
fn debug_hides_pipelines() {
    let options = ReaderOptions::new().with_validator(FieldRules::new());
    let rendered = format!("{options:?}");

    assert!(rendered.contains("has_validator: true"));
    assert!(rendered.contains("has_parser: false"));
}
