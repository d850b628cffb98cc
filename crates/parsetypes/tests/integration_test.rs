//! Integration tests for TypeParser: inference, conversion, tables and
//! configuration.

use std::collections::HashSet;

use parsetypes::{
    ExactDecimal, LiteralRole, ParseTypesError, ParserConfig, ScalarKind, TypeDescriptor,
    TypeParser, Value,
};

use ScalarKind as K;
use TypeDescriptor::{Bool, Decimal, Float, Int, Null, String};

fn build(config: ParserConfig) -> TypeParser {
    TypeParser::with_config(config).expect("valid configuration")
}

fn n(kind: ScalarKind) -> TypeDescriptor {
    TypeDescriptor::Nullable(kind)
}

fn l(inner: TypeDescriptor) -> TypeDescriptor {
    TypeDescriptor::list(inner)
}

fn set<'a>(values: &[&'a str]) -> HashSet<&'a str> {
    values.iter().copied().collect()
}

fn text(s: &str) -> Value {
    Value::String(s.to_string())
}

// =============================================================================
// Single-value inference
// =============================================================================

#[test]
fn test_infer_scalars_default() {
    let parser = TypeParser::new();
    let cases = [
        ("true", Bool),
        ("false", Bool),
        ("TRUE", Bool),
        ("FALSE", Bool),
        ("0", Int),
        ("+0", Int),
        ("-0", Int),
        ("1", Int),
        ("+1", Int),
        ("-1", Int),
        ("20", Int),
        ("1e6", Int),
        ("0.0", Float),
        ("+0.0", Float),
        ("-0.0", Float),
        ("0.", Float),
        ("-0.", Float),
        (".0", Float),
        ("+.0", Float),
        ("-.0", Float),
        ("1.0", Float),
        ("1.", Float),
        (".1", Float),
        ("1.23e0", Float),
        ("1.23e-0", Float),
        ("1.23e+0", Float),
        ("1.23e-1", Float),
        ("1.23e6", Float),
        ("a", String),
        ("a1", String),
        ("1a", String),
        ("1a1", String),
        ("a1a", String),
        ("a,b,c", String),
        ("1.0.0", String),
        ("0+1", String),
        ("1-1", String),
        ("1e2.", String),
        ("1e2e3", String),
        ("a,", String),
        ("1,", String),
        ("1,2,3", String),
        ("a\n", String),
        ("a\nb\nc\n", String),
        ("", Null),
        ("inf", String),
        ("nan", String),
    ];
    for (value, expected) in cases {
        assert_eq!(parser.infer(value), expected, "infer({value:?})");
    }
}

#[test]
fn test_infer_lists() {
    let exact = ParserConfig::default().with_exact_decimal(true);
    let cases = [
        ("a,a", ",", l(String)),
        ("a,b,c", ",", l(String)),
        (",,a", ",", l(n(K::String))),
        ("a", ",", String),
        ("true,false,true", ",", l(Bool)),
        ("true:false:true", ":", l(Bool)),
        ("truepfalseptrue", "p", l(Bool)),
        (",,true", ",", l(n(K::Bool))),
        ("true,false,true", "t", l(n(K::String))),
        ("0,1,2", ",", l(Int)),
        ("0,01,-2,+3,4e5,-60,7_0", ",", l(Int)),
        ("0.1,0.2,0.3", ",", l(Decimal)),
        (",,0.4", ",", l(n(K::Decimal))),
        (
            "0.,.0,0.0,01.00,-0.2,+3.0,4.e+5,6e-7,-80.08,9_0e1_0",
            ",",
            l(Decimal),
        ),
        ("false,1", ",", l(Int)),
        ("false,1.", ",", l(Decimal)),
        ("false,,1.", ",", l(n(K::Decimal))),
        ("1,2.", ",", l(Decimal)),
        ("1,2.,a", ",", l(String)),
        ("1,2.,,a", ",", l(n(K::String))),
        (",,,", ",", l(Null)),
    ];

    let plain = TypeParser::new();
    for (value, delimiter, expected) in cases {
        let parser = build(exact.clone().with_list_delimiter(delimiter));
        assert_eq!(parser.infer(value), expected, "infer({value:?}) split on {delimiter:?}");
        assert_eq!(plain.infer(value), String, "infer({value:?}) without delimiter");
    }
}

// =============================================================================
// Series and tables
// =============================================================================

#[test]
fn test_series_widens_to_float() {
    let parser = TypeParser::new();
    let values = ["1", "2", "3.4"];
    assert_eq!(parser.infer_series(values), Float);
    assert_eq!(
        parser.parse_series(&values).unwrap(),
        vec![Value::Float(1.0), Value::Float(2.0), Value::Float(3.4)]
    );

    let exact = build(ParserConfig::default().with_exact_decimal(true));
    assert_eq!(exact.infer_series(values), Decimal);
    let parsed = exact.parse_series(&values).unwrap();
    assert_eq!(parsed[2].to_string(), "3.4");
}

#[test]
fn test_series_bool_and_int() {
    let parser = TypeParser::new();
    let values = ["true", "false", "2"];
    assert_eq!(parser.infer_series(values), Int);
    assert_eq!(
        parser.parse_series(&values).unwrap(),
        vec![Value::Int(1), Value::Int(0), Value::Int(2)]
    );
}

#[test]
fn test_series_empty_is_string() {
    let parser = TypeParser::new();
    assert_eq!(parser.infer_series(Vec::<&str>::new()), String);
    assert!(parser.parse_series::<&str>(&[]).unwrap().is_empty());
}

#[test]
fn test_series_with_nulls() {
    let parser = TypeParser::new();
    let values = ["1", "", " 3 "];
    assert_eq!(parser.infer_series(values), n(K::Int));
    assert_eq!(
        parser.parse_series(&values).unwrap(),
        vec![Value::Int(1), Value::Null, Value::Int(3)]
    );
}

#[test]
fn test_infer_widens_out_of_range_numbers() {
    let parser = TypeParser::new();
    let exact = build(ParserConfig::default().with_exact_decimal(true));

    let cases = [
        ("9223372036854775807", Int, Int),
        ("9223372036854775808", Float, Decimal),
        ("12345678901234567890", Float, Decimal),
        ("1e40", Float, Float),
        ("1e-30", Float, Float),
        ("1.00000000000000000000000000000001", Float, Float),
        ("123456789012345678901234567890123", Float, Float),
    ];
    for (value, float_type, exact_type) in cases {
        assert_eq!(parser.infer(value), float_type, "infer({value:?})");
        assert_eq!(exact.infer(value), exact_type, "exact infer({value:?})");
        assert!(parser.parse(value).is_ok(), "parse({value:?})");
        assert!(exact.parse(value).is_ok(), "exact parse({value:?})");
    }

    assert_eq!(
        exact.parse("12345678901234567890").unwrap().as_decimal(),
        Some(ExactDecimal::Finite(rust_decimal::Decimal::from(12_345_678_901_234_567_890u64)))
    );
    assert_eq!(exact.parse("1e-30").unwrap(), Value::Float(1e-30));
}

#[test]
fn test_series_with_long_ids() {
    let parser = TypeParser::new();
    let values = ["1", "12345678901234567890", ""];
    assert_eq!(parser.infer_series(values), n(K::Float));
    assert_eq!(
        parser.parse_series(&values).unwrap(),
        vec![
            Value::Float(1.0),
            Value::Float(12345678901234567890.0),
            Value::Null
        ]
    );

    let rows = vec![vec!["98765432109876543210987", "1"], vec!["5", "2"]];
    assert_eq!(parser.infer_table(&rows).unwrap(), vec![Float, Int]);
    let values = parser.parse_table(&rows).unwrap();
    assert_eq!(values[1], vec![Value::Float(5.0), Value::Int(2)]);
}

#[test]
fn test_infer_table() {
    let parser = TypeParser::new();
    let rows = vec![vec!["1", "a"], vec!["2", "b"], vec!["3.4", "c"]];
    assert_eq!(parser.infer_table(&rows).unwrap(), vec![Float, String]);
}

#[test]
fn test_infer_table_mixed_columns() {
    let parser = TypeParser::new();
    let rows = vec![
        vec!["1", "a", "1.0", "false"],
        vec!["-2", "b", "-2.", "true"],
        vec!["+3", "cc", "+0.3", ""],
        vec!["false", "", "4", "false"],
    ];
    assert_eq!(
        parser.infer_table(&rows).unwrap(),
        vec![Int, n(K::String), Float, n(K::Bool)]
    );

    let values = parser.parse_table(&rows).unwrap();
    assert_eq!(values[3], vec![Value::Int(0), Value::Null, Value::Float(4.0), Value::Bool(false)]);
    assert_eq!(values[2][3], Value::Null);
}

#[test]
fn test_infer_table_shapes() {
    let parser = TypeParser::new();

    let single_row = vec![vec!["1", "2", "3", "4"]];
    assert_eq!(parser.infer_table(&single_row).unwrap(), vec![Int; 4]);

    let single_column = vec![vec!["1"], vec!["2"], vec!["3"], vec!["4"]];
    assert_eq!(parser.infer_table(&single_column).unwrap(), vec![Int]);

    let empty: Vec<Vec<&str>> = Vec::new();
    assert!(parser.infer_table(&empty).unwrap().is_empty());
}

#[test]
fn test_infer_table_ragged_row() {
    let parser = TypeParser::new();
    let rows = vec![vec!["1", "a"], vec!["2", "b"], vec!["3"]];
    let err = parser.infer_table(&rows).unwrap_err();
    match err {
        ParseTypesError::Shape { row, expected, found } => {
            assert_eq!((row, expected, found), (2, 2, 1));
        }
        other => panic!("expected a shape error, got {other:?}"),
    }
    assert!(parser.parse_table(&rows).is_err());
}

#[test]
fn test_table_from_csv() {
    let data = "\
id,score,passed,tags
1,9.5,true,a;b
2,,false,c
3,7,TRUE,
4,8.25,false,d;e;f
";
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(data.as_bytes());
    let records: Vec<csv::StringRecord> = reader.records().collect::<Result<_, _>>().unwrap();

    let parser = build(ParserConfig::default().with_list_delimiter(";"));
    let types = parser.infer_table(&records).unwrap();
    assert_eq!(types, vec![Int, n(K::Float), Bool, l(String)]);

    let mut rows = parser.iterate_table(&records).unwrap();
    assert_eq!(rows.column_types(), types.as_slice());

    let first = rows.next().unwrap().unwrap();
    assert_eq!(
        first,
        vec![
            Value::Int(1),
            Value::Float(9.5),
            Value::Bool(true),
            Value::List(vec![text("a"), text("b")]),
        ]
    );
    let second = rows.next().unwrap().unwrap();
    assert_eq!(second[1], Value::Null);
    assert_eq!(second[3], Value::List(vec![text("c")]));
    let third = rows.next().unwrap().unwrap();
    assert_eq!(third[3], Value::Null);
    assert_eq!(rows.count(), 1);
}

// =============================================================================
// Conversion
// =============================================================================

#[test]
fn test_convert_explicit_targets() {
    let parser = TypeParser::new();
    assert_eq!(parser.convert("", &Null).unwrap(), Value::Null);
    assert_eq!(parser.convert(" 7 ", &Int).unwrap(), Value::Int(7));
    assert_eq!(parser.convert("7", &Float).unwrap(), Value::Float(7.0));
    assert_eq!(parser.convert("7", &String).unwrap(), text("7"));
    assert_eq!(parser.convert("", &n(K::String)).unwrap(), Value::Null);
    assert_eq!(parser.convert("x", &n(K::String)).unwrap(), text("x"));

    let err = parser.convert("seven", &Int).unwrap_err();
    assert!(err.is_value_conversion());
    assert!(matches!(
        err,
        ParseTypesError::ValueConversion { target: ScalarKind::Int, .. }
    ));
    assert!(parser.convert("x", &Null).is_err());
}

#[test]
fn test_parse_follows_inference() {
    let parser = build(
        ParserConfig::default()
            .with_list_delimiter(",")
            .with_inf_values(["inf"]),
    );
    assert_eq!(parser.parse("").unwrap(), Value::Null);
    assert_eq!(parser.parse("True").unwrap(), Value::Bool(true));
    assert_eq!(parser.parse("4e2").unwrap(), Value::Int(400));
    assert_eq!(parser.parse("-inf").unwrap(), Value::Float(f64::NEG_INFINITY));
    assert_eq!(
        parser.parse("1, ,3").unwrap(),
        Value::List(vec![Value::Int(1), Value::Null, Value::Int(3)])
    );
    assert_eq!(parser.parse(" hello ").unwrap(), text(" hello "));
}

// =============================================================================
// Configuration
// =============================================================================

fn assert_config_error(config: ParserConfig, role: LiteralRole) {
    match TypeParser::with_config(config) {
        Err(ParseTypesError::Config { role: found, .. }) => assert_eq!(found, role),
        other => panic!("expected a {role} configuration error, got {other:?}"),
    }
}

#[test]
fn test_invalid_list_delimiter() {
    for delimiter in ["", "1", "."] {
        assert_config_error(
            ParserConfig::default().with_list_delimiter(delimiter),
            LiteralRole::ListDelimiter,
        );
    }
}

#[test]
fn test_invalid_none_values() {
    let cases: [&[&str]; 5] = [&["true"], &["true", "false"], &["1"], &["2e6"], &["."]];
    for values in cases {
        assert_config_error(
            ParserConfig::default().with_none_values(values.iter().copied()),
            LiteralRole::None,
        );
    }
}

#[test]
fn test_invalid_bool_values() {
    let cases: [&[&str]; 5] = [&[""], &["e"], &["1"], &["2e6"], &["."]];
    for values in cases {
        assert_config_error(
            ParserConfig::default().with_true_values(values.iter().copied()),
            LiteralRole::True,
        );
        assert_config_error(
            ParserConfig::default().with_false_values(values.iter().copied()),
            LiteralRole::False,
        );
    }

    let overlapping = ParserConfig::default()
        .with_true_values(["yes"])
        .with_false_values(["yes"]);
    assert_config_error(overlapping, LiteralRole::False);
}

#[test]
fn test_invalid_float_values() {
    let cases: [&[&str]; 6] = [&[""], &["true"], &["e"], &["1"], &["2e6"], &["."]];
    for values in cases {
        assert_config_error(
            ParserConfig::default().with_inf_values(values.iter().copied()),
            LiteralRole::Inf,
        );
        assert_config_error(
            ParserConfig::default().with_nan_values(values.iter().copied()),
            LiteralRole::Nan,
        );
    }

    let overlapping = ParserConfig::default()
        .with_inf_values(["x"])
        .with_nan_values(["x"]);
    assert_config_error(overlapping, LiteralRole::Nan);
}

#[test]
fn test_config_error_message() {
    let err = TypeParser::with_config(ParserConfig::default().with_none_values(["true"])).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("\"true\""), "{message}");
    assert!(message.contains("none value"), "{message}");
}

#[test]
fn test_exact_decimal_literals() {
    let parser = build(
        ParserConfig::default()
            .with_exact_decimal(true)
            .with_inf_values(["inf"])
            .with_nan_values(["nan"]),
    );
    assert_eq!(parser.infer("inf"), Decimal);
    assert!(parser.parse("nan").unwrap().as_decimal().is_some_and(|d| d.is_nan()));
}

#[test]
fn test_constructor_keeps_literals() {
    for delimiter in [",", "\n"] {
        for none_values in [vec![], vec![""], vec!["none", "n"]] {
            for true_values in [vec![], vec!["t", "tru"]] {
                for false_values in [vec![], vec!["f", "fa"]] {
                    let config = ParserConfig::default()
                        .with_trim(false)
                        .with_list_delimiter(delimiter)
                        .with_none_values(none_values.clone())
                        .with_none_case_sensitive(true)
                        .with_true_values(true_values.clone())
                        .with_false_values(false_values.clone())
                        .with_bool_case_sensitive(true)
                        .with_inf_values(["inf"])
                        .with_nan_values(["nan"])
                        .with_float_case_sensitive(true);
                    let parser = build(config);

                    assert!(!parser.trim());
                    assert_eq!(parser.list_delimiter(), Some(delimiter));
                    let flags = parser.case_sensitivity();
                    assert!(flags.none && flags.bool && flags.float);

                    assert_eq!(parser.none_values().iter().collect::<HashSet<_>>(), set(&none_values));
                    assert_eq!(parser.true_values().iter().collect::<HashSet<_>>(), set(&true_values));
                    assert_eq!(parser.false_values().iter().collect::<HashSet<_>>(), set(&false_values));
                    assert_eq!(parser.inf_values().iter().collect::<Vec<_>>(), vec!["inf"]);
                    assert_eq!(parser.nan_values().iter().collect::<Vec<_>>(), vec!["nan"]);
                }
            }
        }
    }
}

#[test]
fn test_literal_normalisation() {
    let values = [" none ", "N\n"];
    let cases = [
        (true, true, vec!["none", "N"]),
        (true, false, vec!["none", "n"]),
        (false, true, vec![" none ", "N\n"]),
        (false, false, vec![" none ", "n\n"]),
    ];
    for (trim, case_sensitive, expected) in cases {
        let parser = build(
            ParserConfig::default()
                .with_trim(trim)
                .with_none_values(values)
                .with_none_case_sensitive(case_sensitive),
        );
        assert_eq!(parser.none_values().iter().collect::<Vec<_>>(), expected);
    }
}

#[test]
fn test_reconfigure_matches_direct_construction() {
    let parser = TypeParser::new();
    let reconfigured = parser
        .reconfigure(|c| {
            c.list_delimiter = Some("|".to_string());
            c.none_values = vec!["NA".to_string()];
        })
        .unwrap();
    let direct = build(
        ParserConfig::default()
            .with_list_delimiter("|")
            .with_none_values(["NA"]),
    );

    assert_eq!(reconfigured.config(), direct.config());
    for value in ["NA", "", "1|2", "na|3", "x"] {
        assert_eq!(reconfigured.infer(value), direct.infer(value), "{value:?}");
    }
    assert_eq!(parser.infer("NA"), String);
    assert_eq!(reconfigured.infer(""), String);
}

#[test]
fn test_config_from_json() {
    let config = ParserConfig::from_json(
        r#"{
            "list_delimiter": ";",
            "none_values": ["", "NA"],
            "use_exact_decimal": true
        }"#,
    )
    .unwrap();
    let parser = build(config);
    assert_eq!(parser.infer_series(["1.5", "NA", "2"]), n(K::Decimal));
    assert_eq!(parser.infer("1;2"), l(Int));

    let err = ParserConfig::from_json("{\"trim\": \"yes\"}").unwrap_err();
    assert!(matches!(err, ParseTypesError::Json(_)));
}
