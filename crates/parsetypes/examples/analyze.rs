//! Example: Infer the column types of a CSV or TSV file.
//!
//! Usage:
//!   cargo run --example analyze -- <file_path> [list_delimiter]
//!
//! Example:
//!   cargo run --example analyze -- samples.tsv ";"

use std::env;
use std::error::Error;
use std::path::Path;

use parsetypes::{ParserConfig, TypeParser, Value};

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example analyze -- <file_path> [list_delimiter]");
        eprintln!("\nExample:");
        eprintln!("  cargo run --example analyze -- samples.tsv \";\"");
        std::process::exit(1);
    }

    let file_path = &args[1];
    let path = Path::new(file_path);

    if !path.exists() {
        eprintln!("Error: File not found: {}", file_path);
        std::process::exit(1);
    }

    let delimiter = match path.extension().and_then(|e| e.to_str()) {
        Some("tsv") | Some("tab") => b'\t',
        _ => b',',
    };
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_path(path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let rows = reader.records().collect::<Result<Vec<_>, _>>()?;

    let mut config = ParserConfig::default().with_none_values(["", "NA", "N/A", "null"]);
    if let Some(list_delimiter) = args.get(2) {
        config = config.with_list_delimiter(list_delimiter.as_str());
    }
    let parser = TypeParser::with_config(config)?;

    let separator = "=".repeat(80);
    println!("{}", separator);
    println!("Type inference: {}", file_path);
    println!("{}", separator);
    println!();

    let table = parser.iterate_table(&rows)?;
    let types = table.column_types().to_vec();

    println!("## Columns ({} columns, {} rows)", types.len(), rows.len());
    println!();
    for (i, column_type) in types.iter().enumerate() {
        let name = headers.get(i).map(String::as_str).unwrap_or("?");
        println!("  {:30} {}", name, column_type);
    }
    println!();

    let mut nulls = vec![0usize; types.len()];
    for row in table {
        for (i, value) in row?.iter().enumerate() {
            if matches!(value, Value::Null) {
                nulls[i] += 1;
            }
        }
    }

    println!("## Null counts");
    for (i, count) in nulls.iter().enumerate().filter(|(_, c)| **c > 0) {
        let name = headers.get(i).map(String::as_str).unwrap_or("?");
        println!("  {:30} {}", name, count);
    }
    println!();

    println!("{}", separator);

    Ok(())
}
