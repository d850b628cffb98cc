//! Fuzz target for table inference.
//!
//! This fuzzer tests that inference:
//! 1. Never panics on arbitrary cells
//! 2. Reports ragged tables as shape errors
//! 3. Converts every cell of a rectangular table

#![no_main]

use libfuzzer_sys::fuzz_target;
use parsetypes::{ParseTypesError, ParserConfig, TypeParser};

fuzz_target!(|data: &str| {
    // Only process reasonable-sized inputs
    if data.len() > 10_000 {
        return;
    }

    let Ok(parser) = TypeParser::with_config(
        ParserConfig::default()
            .with_list_delimiter(";")
            .with_none_values(["", "NA"])
            .with_inf_values(["inf"])
            .with_nan_values(["nan"]),
    ) else {
        return;
    };

    let rows: Vec<Vec<&str>> = data.lines().map(|line| line.split(',').collect()).collect();
    let ragged = rows.windows(2).any(|pair| pair[0].len() != pair[1].len());

    match parser.infer_table(&rows) {
        Ok(_) => assert!(!ragged),
        Err(ParseTypesError::Shape { .. }) => assert!(ragged),
        Err(err) => panic!("unexpected error: {err}"),
    }

    if let Ok(table) = parser.parse_table(&rows) {
        assert_eq!(table.len(), rows.len());
    }
});
