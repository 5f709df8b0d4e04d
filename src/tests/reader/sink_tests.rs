use crate::{
    CsvReader, ErrorSink, HeaderPolicy, InMemorySource, ParseErrorEvent, ReaderOptions, Stage,
};

#[test]
fn custom_sink_receives_line_and_stage() {
    let options = ReaderOptions::csv().with_header_policy(HeaderPolicy::DataRequired);
    let mut reader = CsvReader::with_sink(options, Vec::<ParseErrorEvent>::new());
    reader
        .open_provider(&InMemorySource::from_string("events", "a,b\n1\n2,3\n"))
        .expect("open");

    let rows = reader.parse_all().expect("parse_all");
    let events = reader.into_sink();

    assert_eq!(rows.len(), 1);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].line, Some(2));
    assert_eq!(events[0].stage, Stage::Reconcile);
    assert!(events[0].message.starts_with("Parse error in file, line 2"));
}

#[derive(Default)]
struct Counter {
    seen: usize,
}

impl ErrorSink for Counter {
    fn notify(&mut self, _event: ParseErrorEvent) {
        self.seen += 1;
    }
}

#[test]
fn borrowed_sink_outlives_the_reader() {
    let mut counter = Counter::default();
    {
        let options = ReaderOptions::csv().with_header_policy(HeaderPolicy::DataRequired);
        let mut reader = CsvReader::with_sink(options, &mut counter);
        reader
            .open_provider(&InMemorySource::from_string("count", "a,b\n1\n2\n3,4\n"))
            .expect("open");
        reader.parse_all().expect("parse_all");
    }

    assert_eq!(counter.seen, 2);
}

#[test]
fn validation_and_parse_messages_keep_their_stage() {
    use crate::{FieldParsers, FieldRules, FieldValue};

    let rules = FieldRules::new().rule("name", |v| match v.as_str() {
        Some(s) if !s.is_empty() => Ok(()),
        _ => Err("name is required".to_string()),
    });
    let parsers = FieldParsers::new().parser("qty", |v: &FieldValue| {
        v.as_str()
            .and_then(|s| s.parse::<i64>().ok())
            .map(FieldValue::from)
            .ok_or_else(String::new)
    });
    let options = ReaderOptions::csv().with_validator(rules).with_parser(parsers);
    let mut reader = CsvReader::with_sink(options, Vec::<ParseErrorEvent>::new());
    reader
        .open_provider(&InMemorySource::from_string("stages", "name,qty\n,x\n"))
        .expect("open");

    reader.parse_all().expect("parse_all");
    let stages: Vec<Stage> = reader.into_sink().into_iter().map(|e| e.stage).collect();

    assert_eq!(stages, vec![Stage::Validate, Stage::Parse]);
}
