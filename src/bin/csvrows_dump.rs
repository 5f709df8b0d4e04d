use std::error::Error;

use csvrows::cli::{InputArgs, dump_input, parse_delimiter};
use csvrows::{ErrorPolicy, HeaderPolicy, ReaderConfig, ReaderOptions};
use sarge::prelude::*;
use tracing_subscriber::EnvFilter;

fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  csvrows_dump --input <token> [--config <file>] [--delimiter <c>] [--policy <name>] [--positional] [--fast-fail]"
    );
    eprintln!();
    eprintln!("Input tokens:");
    eprintln!("  - | stdin          Read from stdin");
    eprintln!("  =<content>         Inline content");
    eprintln!("  @<path> | <path>   Read a file");
    eprintln!();
    eprintln!("Policies: noHeader, disregardHeader, dataOptional, dataRequired");
    eprintln!("Rows are printed as JSON lines; errors go to stderr.");
}

fn string_arg<E>(value: Option<Result<String, E>>) -> Option<String> {
    match value {
        Some(Ok(v)) if !v.is_empty() => Some(v),
        _ => None,
    }
}

fn run() -> Result<bool, Box<dyn Error>> {
    let mut reader = ArgumentReader::new();

    let input_ref = reader.add::<InputArgs>(tag::both('i', "input"));
    let config_ref = reader.add::<String>(tag::both('c', "config"));
    let delimiter_ref = reader.add::<String>(tag::both('d', "delimiter"));
    let policy_ref = reader.add::<String>(tag::both('p', "policy"));
    let positional_ref = reader.add::<bool>(tag::long("positional"));
    let fast_fail_ref = reader.add::<bool>(tag::long("fast-fail"));

    let args = reader.parse()?;

    let input = match input_ref.get(&args) {
        Some(Ok(v)) => v,
        Some(Err(e)) => match e {},
        None => InputArgs::default(),
    };
    if input.is_empty() {
        return Err("missing --input".into());
    }

    let mut options = match string_arg(config_ref.get(&args)) {
        Some(path) => ReaderOptions::from_config(ReaderConfig::from_path(path)?)?,
        None => ReaderOptions::csv(),
    };
    if let Some(d) = string_arg(delimiter_ref.get(&args)) {
        options = options.with_delimiter(parse_delimiter(&d)?);
    }
    if let Some(p) = string_arg(policy_ref.get(&args)) {
        options = options.with_header_policy(HeaderPolicy::try_from(p)?);
    }
    if matches!(positional_ref.get(&args), Some(Ok(true))) {
        options = options.with_labels_as_keys(false);
    }
    if matches!(fast_fail_ref.get(&args), Some(Ok(true))) {
        options = options.with_error_policy(ErrorPolicy::FastFail);
    }

    let mut clean = true;
    for provider in input.providers() {
        clean &= dump_input(
            provider.as_ref(),
            &options,
            &mut std::io::stdout(),
            &mut std::io::stderr(),
        )?;
    }

    Ok(clean)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(2),
        Err(e) => {
            eprintln!("csvrows_dump error: {e}");
            print_usage();
            std::process::exit(1);
        }
    }
}
