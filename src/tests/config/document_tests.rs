use std::io::Write;

use crate::{ConfigError, ErrorPolicy, HeaderPolicy, ReaderConfig, ReaderOptions};

fn options(json: &str) -> Result<ReaderOptions, ConfigError> {
    ReaderOptions::from_config(ReaderConfig::from_json_str(json)?)
}

#[test]
fn empty_document_gives_defaults() {
    let options = options("{}").expect("options");

    assert_eq!(options.dialect.delimiter, b'\t');
    assert_eq!(options.header_policy, HeaderPolicy::DataOptional);
    assert!(options.use_labels_as_keys);
}

#[test]
fn camel_case_keys() {
    let options = options(
        r#"{
            "delimiter": ",",
            "enclosure": "'",
            "escape": "",
            "maxLineLength": 1024,
            "headerPolicy": "dataRequired",
            "useLabelsAsKeys": false,
            "errorPolicy": "fast_fail"
        }"#,
    )
    .expect("options");

    assert_eq!(options.dialect.delimiter, b',');
    assert_eq!(options.dialect.enclosure, b'\'');
    assert_eq!(options.dialect.escape, None);
    assert_eq!(options.dialect.max_line_length, 1024);
    assert_eq!(options.header_policy, HeaderPolicy::DataRequired);
    assert!(!options.use_labels_as_keys);
    assert_eq!(options.error_policy, ErrorPolicy::FastFail);
}

#[test]
fn snake_case_and_legacy_aliases() {
    let options = options(
        r#"{"header_policy": "subDataOptional", "length": 80, "use_labels_as_keys": true}"#,
    )
    .expect("options");

    assert_eq!(options.header_policy, HeaderPolicy::DataOptional);
    assert_eq!(options.dialect.max_line_length, 80);
}

#[test]
fn unknown_key_is_rejected() {
    let err = options(r#"{"frobnicate": true}"#).expect_err("unknown key");

    assert!(matches!(err, ConfigError::UnsupportedOption(ref name) if name == "frobnicate"));
    assert_eq!(err.to_string(), "\"frobnicate\" is not a supported option.");
}

#[test]
fn pipelines_cannot_come_from_documents() {
    let err = options(r#"{"validator": "MyValidator"}"#).expect_err("validator key");

    assert!(matches!(err, ConfigError::InvalidOption { name: "pipeline", .. }));
}

#[test]
fn multi_character_delimiter_is_rejected() {
    let err = options(r#"{"delimiter": "::"}"#).expect_err("two characters");

    assert!(matches!(err, ConfigError::InvalidOption { name: "delimiter", .. }));
}

#[test]
fn bad_policies_are_rejected() {
    assert!(matches!(
        options(r#"{"headerPolicy": "sometimes"}"#),
        Err(ConfigError::UnsupportedHeaderPolicy(_))
    ));
    assert!(matches!(
        options(r#"{"errorPolicy": "retry"}"#),
        Err(ConfigError::InvalidOption { name: "errorPolicy", .. })
    ));
}

#[test]
fn malformed_document_is_a_document_error() {
    assert!(matches!(
        ReaderConfig::from_json_str("{ not json"),
        Err(ConfigError::Document(_))
    ));
}

#[test]
fn from_path_reads_json() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("reader.json");
    let mut file = std::fs::File::create(&path).expect("create");
    file.write_all(br#"{"delimiter": "|", "headerPolicy": "noHeader"}"#)
        .expect("write");

    let config = ReaderConfig::from_path(&path).expect("load");
    let options = ReaderOptions::try_from(config).expect("options");

    assert_eq!(options.dialect.delimiter, b'|');
    assert_eq!(options.header_policy, HeaderPolicy::NoHeader);
}

#[test]
fn from_path_rejects_unknown_extensions() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("reader.ini");
    std::fs::write(&path, "delimiter=,").expect("write");

    assert!(matches!(
        ReaderConfig::from_path(&path),
        Err(ConfigError::Document(_))
    ));
}

#[cfg(feature = "yaml")]
#[test]
fn yaml_documents() {
    let config = ReaderConfig::from_yaml_str("delimiter: ','\nheaderPolicy: disregard\n")
        .expect("yaml");
    let options = ReaderOptions::try_from(config).expect("options");

    assert_eq!(options.dialect.delimiter, b',');
    assert_eq!(options.header_policy, HeaderPolicy::DisregardHeader);
}

#[test]
fn builder_style_config() {
    let config = ReaderConfig::new()
        .with_delimiter(",")
        .with_header_policy("dataRequired");
    let options = ReaderOptions::try_from(config).expect("options");

    assert_eq!(options.dialect.delimiter, b',');
    assert_eq!(options.header_policy, HeaderPolicy::DataRequired);
}
