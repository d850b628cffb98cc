//! Fuzz target for token conversion.
//!
//! Builds a parser from fuzzed literals and converts a fuzzed token to
//! every scalar type. Neither step may panic.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use parsetypes::{ParserConfig, TypeDescriptor, TypeParser};

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    token: &'a str,
    none_value: &'a str,
    inf_value: &'a str,
    list_delimiter: &'a str,
    exact: bool,
    case_sensitive: Option<bool>,
}

fuzz_target!(|input: Input<'_>| {
    let config = ParserConfig::default()
        .with_none_values([input.none_value])
        .with_inf_values([input.inf_value])
        .with_list_delimiter(input.list_delimiter)
        .with_exact_decimal(input.exact)
        .with_case_sensitive(input.case_sensitive);

    // Colliding literals are rejected, not panicked on
    let Ok(parser) = TypeParser::with_config(config) else {
        return;
    };

    let inferred = parser.infer(input.token);
    let _ = parser.parse(input.token);
    for target in [
        TypeDescriptor::Null,
        TypeDescriptor::Bool,
        TypeDescriptor::Int,
        TypeDescriptor::Decimal,
        TypeDescriptor::Float,
        TypeDescriptor::String,
        inferred.clone().nullable(),
        TypeDescriptor::list(inferred),
    ] {
        let _ = parser.convert(input.token, &target);
    }
});
