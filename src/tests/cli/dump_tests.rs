use crate::cli::{DumpError, dump_input};
use crate::{ErrorPolicy, HeaderPolicy, InMemorySource, ReadError, ReaderOptions};

fn dump(options: &ReaderOptions, content: &str) -> (Result<bool, DumpError>, String, String) {
    let source = InMemorySource::from_string("fruit", content);
    let mut rows = Vec::new();
    let mut errors = Vec::new();
    let outcome = dump_input(&source, options, &mut rows, &mut errors);
    (
        outcome,
        String::from_utf8(rows).expect("utf8 rows"),
        String::from_utf8(errors).expect("utf8 errors"),
    )
}

#[test]
fn rows_are_written_as_json_lines() {
    let (outcome, rows, errors) = dump(
        &ReaderOptions::csv(),
        "name,color\napple,red\nkiwi,green\n",
    );

    assert!(outcome.expect("dump"));
    assert_eq!(
        rows,
        "{\"name\":\"apple\",\"color\":\"red\"}\n{\"name\":\"kiwi\",\"color\":\"green\"}\n"
    );
    assert!(errors.is_empty());
}

#[test]
fn skipped_rows_are_reported_and_mark_the_input_unclean() {
    let options = ReaderOptions::csv().with_header_policy(HeaderPolicy::DataRequired);

    let (outcome, rows, errors) = dump(&options, "a,b\n1\n2,3\n");

    assert!(!outcome.expect("dump"));
    assert_eq!(rows.lines().count(), 1);
    assert!(errors.starts_with("fruit:2: Parse error in file, line 2"));
}

#[test]
fn fatal_error_still_writes_the_report() {
    let options = ReaderOptions::csv()
        .with_header_policy(HeaderPolicy::DataRequired)
        .with_error_policy(ErrorPolicy::FastFail);

    let (outcome, rows, errors) = dump(&options, "a,b\n1\n");

    assert!(matches!(
        outcome,
        Err(DumpError::Read(ReadError::FileInvalid { line: 2, .. }))
    ));
    assert!(rows.is_empty());
    assert!(errors.starts_with("fruit:2: Parse error in file, line 2"));
}

#[test]
fn column_overflow_writes_the_report_before_failing() {
    let (outcome, rows, errors) = dump(&ReaderOptions::csv(), "a\n1\n2,3\n");

    assert!(matches!(
        outcome,
        Err(DumpError::Read(ReadError::ColumnCountExceeded { line: 3, .. }))
    ));
    assert_eq!(rows, "{\"a\":\"1\"}\n");
    assert_eq!(errors.lines().count(), 1);
    assert!(errors.starts_with("fruit:3: "));
}
