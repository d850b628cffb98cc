//! Literal grammar: recognising and converting none, bool, int and float
//! tokens.
//!
//! Integers are ASCII digits with optional single `_` separators, an
//! optional leading sign (`+`, `-` or the minus glyph `−`) and an optional
//! non-negative scientific exponent. Floats add a `.` fractional separator,
//! signed exponents and configurable inf/nan literals.

use rust_decimal::Decimal;

use crate::error::{LiteralRole, ParseTypesError, Result};
use crate::schema::{ExactDecimal, ScalarKind};

use super::config::{CaseSensitivity, ParserConfig};
use super::literals::LiteralSet;

const MINUS: char = '-';
const ALT_MINUS: char = '−';
const PLUS: char = '+';
const DIGIT_SEPARATOR: char = '_';
const SCIENTIFIC: char = 'e';
const FLOAT_SEPARATOR: char = '.';

fn is_sign(c: char) -> bool {
    c == MINUS || c == ALT_MINUS || c == PLUS
}

fn is_negative(c: char) -> bool {
    c == MINUS || c == ALT_MINUS
}

/// Single characters no literal may consist of.
fn is_reserved(literal: &str) -> bool {
    let mut chars = literal.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => {
            is_sign(c) || c.is_ascii_digit() || c == DIGIT_SEPARATOR || c == SCIENTIFIC || c == FLOAT_SEPARATOR
        }
        _ => false,
    }
}

/// Options for integer recognition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntOptions {
    /// Accept a leading `+`, `-` or `−`.
    pub allow_sign: bool,
    /// Accept a negative sign (only meaningful with `allow_sign`).
    pub allow_negative: bool,
    /// Accept a non-negative scientific exponent, as in `4e5`.
    pub allow_scientific: bool,
}

impl Default for IntOptions {
    fn default() -> Self {
        Self {
            allow_sign: true,
            allow_negative: true,
            allow_scientific: true,
        }
    }
}

impl IntOptions {
    const PLAIN: IntOptions = IntOptions {
        allow_sign: true,
        allow_negative: true,
        allow_scientific: false,
    };

    const POSITIVE_EXPONENT: IntOptions = IntOptions {
        allow_sign: true,
        allow_negative: false,
        allow_scientific: false,
    };
}

/// Options for float and decimal recognition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloatOptions {
    /// Accept a signed scientific exponent, as in `2.3e-2`.
    pub allow_scientific: bool,
    /// Accept the configured inf literals.
    pub allow_inf: bool,
    /// Accept the configured nan literals.
    pub allow_nan: bool,
}

impl Default for FloatOptions {
    fn default() -> Self {
        Self {
            allow_scientific: true,
            allow_inf: true,
            allow_nan: true,
        }
    }
}

/// A recognised float token, decomposed for conversion.
#[derive(Debug, Clone, PartialEq)]
enum FloatLiteral {
    Inf { negative: bool },
    NaN,
    Finite {
        negative: bool,
        /// Unsigned digits with a `.`, separators removed, both sides non-empty.
        mantissa: String,
        /// Signed exponent digits.
        exponent: Option<String>,
    },
}

/// Split `text` around its only scientific marker.
fn split_scientific(text: &str, case_sensitive: bool) -> Option<(&str, &str)> {
    let is_marker = |c: char| c == SCIENTIFIC || (!case_sensitive && c == 'E');
    let mut markers = text.match_indices(is_marker);
    let (idx, marker) = markers.next()?;
    if markers.next().is_some() {
        return None;
    }
    Some((&text[..idx], &text[idx + marker.len()..]))
}

fn split_sign(text: &str) -> (Option<char>, &str) {
    match text.chars().next() {
        Some(c) if is_sign(c) => (Some(c), &text[c.len_utf8()..]),
        _ => (None, text),
    }
}

/// Non-empty ASCII digits with single separators, none at either end.
fn is_digit_run(text: &str) -> bool {
    if text.is_empty() || text.starts_with(DIGIT_SEPARATOR) || text.ends_with(DIGIT_SEPARATOR) {
        return false;
    }
    let mut prev_separator = false;
    for c in text.chars() {
        if c == DIGIT_SEPARATOR {
            if prev_separator {
                return false;
            }
            prev_separator = true;
        } else {
            prev_separator = false;
            if !c.is_ascii_digit() {
                return false;
            }
        }
    }
    true
}

/// Drop separators and map the minus glyph to `-`.
fn normalize_digits(text: &str) -> String {
    text.chars()
        .filter(|&c| c != DIGIT_SEPARATOR)
        .map(|c| if c == ALT_MINUS { MINUS } else { c })
        .collect()
}

/// Validate an unsigned mantissa and render it as `int.frac`.
fn unsigned_mantissa(text: &str) -> Option<String> {
    match text.split_once(FLOAT_SEPARATOR) {
        Some((int, frac)) => {
            if frac.contains(FLOAT_SEPARATOR) || (int.is_empty() && frac.is_empty()) {
                return None;
            }
            if !(int.is_empty() || is_digit_run(int)) || !(frac.is_empty() || is_digit_run(frac)) {
                return None;
            }
            let int = if int.is_empty() { "0".to_string() } else { normalize_digits(int) };
            let frac = if frac.is_empty() { "0".to_string() } else { normalize_digits(frac) };
            Some(format!("{int}.{frac}"))
        }
        None => is_digit_run(text).then(|| normalize_digits(text)),
    }
}

/// Multiply `d` by `10^exponent`, or None when the result is not representable.
fn scale_decimal(d: Decimal, exponent: i64) -> Option<Decimal> {
    if d.is_zero() {
        return Some(d);
    }
    if exponent >= 0 {
        let mut scaled = d;
        for _ in 0..exponent {
            scaled = scaled.checked_mul(Decimal::TEN)?;
        }
        Some(scaled)
    } else {
        let scale = i64::from(d.scale()) - exponent;
        let scale = u32::try_from(scale).ok()?;
        let mut scaled = d;
        scaled.set_scale(scale).ok()?;
        Some(scaled)
    }
}

/// Recognises and converts scalar literals for one configuration.
#[derive(Debug, Clone)]
pub struct Classifier {
    trim: bool,
    use_exact_decimal: bool,
    list_delimiter: Option<String>,
    case: CaseSensitivity,
    none_values: LiteralSet,
    true_values: LiteralSet,
    false_values: LiteralSet,
    inf_values: LiteralSet,
    nan_values: LiteralSet,
}

impl Classifier {
    /// Build a classifier, rejecting literals that collide with each other
    /// or with the numeric grammar.
    pub fn new(config: &ParserConfig) -> Result<Self> {
        let classifier = Self::unvalidated(config);
        classifier.validate()?;
        Ok(classifier)
    }

    /// Build without checking literals; only for configurations known to be
    /// valid, such as the default one.
    pub(crate) fn unvalidated(config: &ParserConfig) -> Self {
        let case = config.effective_case_sensitivity();
        let trim = config.trim;

        Self {
            trim,
            use_exact_decimal: config.use_exact_decimal,
            list_delimiter: config.list_delimiter.clone(),
            case,
            none_values: LiteralSet::new(&config.none_values, trim, case.none),
            true_values: LiteralSet::new(&config.true_values, trim, case.bool),
            false_values: LiteralSet::new(&config.false_values, trim, case.bool),
            inf_values: LiteralSet::new(&config.inf_values, trim, case.float),
            nan_values: LiteralSet::new(&config.nan_values, trim, case.float),
        }
    }

    fn validate(&self) -> Result<()> {
        if let Some(delimiter) = self.list_delimiter.as_deref() {
            if delimiter.is_empty() {
                return Err(ParseTypesError::Config {
                    role: LiteralRole::ListDelimiter,
                    literal: String::new(),
                    reason: "delimiter must not be empty".to_string(),
                });
            }
            self.check_literal(LiteralRole::ListDelimiter, delimiter)?;
        }

        let groups = [
            (LiteralRole::None, &self.none_values),
            (LiteralRole::True, &self.true_values),
            (LiteralRole::False, &self.false_values),
            (LiteralRole::Inf, &self.inf_values),
            (LiteralRole::Nan, &self.nan_values),
        ];
        for (role, literals) in groups {
            for literal in literals.iter() {
                self.check_literal(role, literal)?;
            }
        }
        Ok(())
    }

    fn check_literal(&self, role: LiteralRole, literal: &str) -> Result<()> {
        let reject = |reason: &str| {
            Err(ParseTypesError::Config {
                role,
                literal: literal.to_string(),
                reason: reason.to_string(),
            })
        };

        if is_reserved(literal) {
            return reject("reserved character");
        }
        if role != LiteralRole::None && self.is_none(literal) {
            return reject("already a none value");
        }

        let as_bool = self.bool_literal(self.prepare(literal));
        match role {
            LiteralRole::True if as_bool != Some(true) => return reject("does not parse as true"),
            LiteralRole::False if as_bool != Some(false) => return reject("does not parse as false"),
            LiteralRole::True | LiteralRole::False => {}
            _ if as_bool.is_some() => return reject("already a bool value"),
            _ => {}
        }

        if self.is_int(literal) {
            return reject("already an int value");
        }

        match role {
            LiteralRole::Inf if !self.converts_to(literal, ExactDecimal::Infinity) => {
                reject("does not parse as infinity")
            }
            LiteralRole::Nan if !self.converts_to(literal, ExactDecimal::NaN) => {
                reject("does not parse as nan")
            }
            LiteralRole::Inf | LiteralRole::Nan => Ok(()),
            _ if self.is_float(literal) => reject("already a float value"),
            _ => Ok(()),
        }
    }

    /// Whether `literal` converts to the given non-finite value with the
    /// configured numeric kind.
    fn converts_to(&self, literal: &str, expected: ExactDecimal) -> bool {
        if self.use_exact_decimal {
            match (self.parse_decimal(literal), expected) {
                (Ok(d), ExactDecimal::NaN) => d.is_nan(),
                (Ok(d), expected) => d == expected,
                (Err(_), _) => false,
            }
        } else {
            match (self.parse_float(literal), expected) {
                (Ok(x), ExactDecimal::NaN) => x.is_nan(),
                (Ok(x), ExactDecimal::Infinity) => x == f64::INFINITY,
                _ => false,
            }
        }
    }

    pub fn trim(&self) -> bool {
        self.trim
    }

    pub fn use_exact_decimal(&self) -> bool {
        self.use_exact_decimal
    }

    pub fn list_delimiter(&self) -> Option<&str> {
        self.list_delimiter.as_deref()
    }

    pub fn case_sensitivity(&self) -> CaseSensitivity {
        self.case
    }

    pub fn none_values(&self) -> &LiteralSet {
        &self.none_values
    }

    pub fn true_values(&self) -> &LiteralSet {
        &self.true_values
    }

    pub fn false_values(&self) -> &LiteralSet {
        &self.false_values
    }

    pub fn inf_values(&self) -> &LiteralSet {
        &self.inf_values
    }

    pub fn nan_values(&self) -> &LiteralSet {
        &self.nan_values
    }

    /// The token as it is matched: trimmed when trimming is on.
    pub fn prepare<'a>(&self, value: &'a str) -> &'a str {
        if self.trim { value.trim() } else { value }
    }

    // -------------------------------------------------------------------------
    // None / bool
    // -------------------------------------------------------------------------

    pub fn is_none(&self, value: &str) -> bool {
        self.none_values.contains(self.prepare(value))
    }

    pub fn parse_none(&self, value: &str) -> Result<()> {
        if self.is_none(value) {
            Ok(())
        } else {
            Err(ParseTypesError::not_a(value, ScalarKind::Null))
        }
    }

    fn bool_literal(&self, text: &str) -> Option<bool> {
        if self.true_values.contains(text) {
            Some(true)
        } else if self.false_values.contains(text) {
            Some(false)
        } else {
            None
        }
    }

    pub fn is_bool(&self, value: &str) -> bool {
        self.bool_literal(self.prepare(value)).is_some()
    }

    pub fn parse_bool(&self, value: &str) -> Result<bool> {
        self.bool_literal(self.prepare(value))
            .ok_or_else(|| ParseTypesError::not_a(value, ScalarKind::Bool))
    }

    // -------------------------------------------------------------------------
    // Integers
    // -------------------------------------------------------------------------

    fn int_literal(&self, text: &str, options: IntOptions) -> bool {
        if text.is_empty() {
            return false;
        }

        if options.allow_scientific {
            if let Some((mantissa, exponent)) = split_scientific(text, self.case.int) {
                let mantissa_options = IntOptions {
                    allow_scientific: false,
                    ..options
                };
                return self.int_literal(mantissa, mantissa_options)
                    && self.int_literal(exponent, IntOptions::POSITIVE_EXPONENT);
            }
        }

        let (sign, digits) = split_sign(text);
        if let Some(sign) = sign {
            if !options.allow_sign || (!options.allow_negative && is_negative(sign)) {
                return false;
            }
        }
        is_digit_run(digits)
    }

    pub fn is_int(&self, value: &str) -> bool {
        self.is_int_with(value, IntOptions::default())
    }

    pub fn is_int_with(&self, value: &str, options: IntOptions) -> bool {
        self.int_literal(self.prepare(value), options)
    }

    /// Convert an integer token; boolean literals convert to 1 and 0.
    pub fn parse_int(&self, value: &str) -> Result<i64> {
        self.parse_int_with(value, IntOptions::default())
    }

    pub fn parse_int_with(&self, value: &str, options: IntOptions) -> Result<i64> {
        let text = self.prepare(value);
        if !self.int_literal(text, options) {
            return self
                .bool_literal(text)
                .map(i64::from)
                .ok_or_else(|| ParseTypesError::not_a(value, ScalarKind::Int));
        }

        let out_of_range = || ParseTypesError::out_of_range(value, ScalarKind::Int);
        let split = if options.allow_scientific {
            split_scientific(text, self.case.int)
        } else {
            None
        };
        let (mantissa, exponent) = match split {
            Some((mantissa, exponent)) => (mantissa, Some(exponent)),
            None => (text, None),
        };

        let mantissa: i64 = normalize_digits(mantissa).parse().map_err(|_| out_of_range())?;
        let Some(exponent) = exponent else {
            return Ok(mantissa);
        };
        if mantissa == 0 {
            return Ok(0);
        }
        let exponent: u32 = normalize_digits(exponent).parse().map_err(|_| out_of_range())?;
        10i64
            .checked_pow(exponent)
            .and_then(|power| mantissa.checked_mul(power))
            .ok_or_else(out_of_range)
    }

    // -------------------------------------------------------------------------
    // Floats and decimals
    // -------------------------------------------------------------------------

    fn float_literal(&self, text: &str, options: FloatOptions) -> Option<FloatLiteral> {
        let (sign, rest) = split_sign(text);
        let negative = sign.is_some_and(is_negative);

        if options.allow_inf && self.inf_values.contains(rest) {
            return Some(FloatLiteral::Inf { negative });
        }
        if options.allow_nan && self.nan_values.contains(rest) {
            return Some(FloatLiteral::NaN);
        }
        if rest.is_empty() {
            return None;
        }

        let split = if options.allow_scientific {
            split_scientific(rest, self.case.float)
        } else {
            None
        };
        let (mantissa, exponent) = match split {
            Some((mantissa, exponent)) => {
                if !self.int_literal(exponent, IntOptions::PLAIN) {
                    return None;
                }
                (mantissa, Some(normalize_digits(exponent)))
            }
            None => (rest, None),
        };

        Some(FloatLiteral::Finite {
            negative,
            mantissa: unsigned_mantissa(mantissa)?,
            exponent,
        })
    }

    pub fn is_float(&self, value: &str) -> bool {
        self.is_float_with(value, FloatOptions::default())
    }

    pub fn is_float_with(&self, value: &str, options: FloatOptions) -> bool {
        self.float_literal(self.prepare(value), options).is_some()
    }

    /// Alias of [`is_float`](Self::is_float): both kinds share one grammar.
    pub fn is_decimal(&self, value: &str) -> bool {
        self.is_float(value)
    }

    pub fn is_decimal_with(&self, value: &str, options: FloatOptions) -> bool {
        self.is_float_with(value, options)
    }

    /// Convert a float token to an approximate double; boolean literals
    /// convert to 1.0 and 0.0.
    pub fn parse_float(&self, value: &str) -> Result<f64> {
        self.parse_float_with(value, FloatOptions::default())
    }

    pub fn parse_float_with(&self, value: &str, options: FloatOptions) -> Result<f64> {
        let text = self.prepare(value);
        let Some(literal) = self.float_literal(text, options) else {
            return self
                .bool_literal(text)
                .map(|b| if b { 1.0 } else { 0.0 })
                .ok_or_else(|| ParseTypesError::not_a(value, ScalarKind::Float));
        };

        match literal {
            FloatLiteral::Inf { negative: false } => Ok(f64::INFINITY),
            FloatLiteral::Inf { negative: true } => Ok(f64::NEG_INFINITY),
            FloatLiteral::NaN => Ok(f64::NAN),
            FloatLiteral::Finite {
                negative,
                mantissa,
                exponent,
            } => {
                let rendered = match exponent {
                    Some(exponent) => format!("{mantissa}e{exponent}"),
                    None => mantissa,
                };
                let x: f64 = rendered
                    .parse()
                    .map_err(|_| ParseTypesError::out_of_range(value, ScalarKind::Float))?;
                Ok(if negative { -x } else { x })
            }
        }
    }

    /// Convert a float token to an exact decimal; boolean literals convert to
    /// 1 and 0.
    pub fn parse_decimal(&self, value: &str) -> Result<ExactDecimal> {
        self.parse_decimal_with(value, FloatOptions::default())
    }

    pub fn parse_decimal_with(&self, value: &str, options: FloatOptions) -> Result<ExactDecimal> {
        let text = self.prepare(value);
        let Some(literal) = self.float_literal(text, options) else {
            return self
                .bool_literal(text)
                .map(|b| ExactDecimal::Finite(if b { Decimal::ONE } else { Decimal::ZERO }))
                .ok_or_else(|| ParseTypesError::not_a(value, ScalarKind::Decimal));
        };

        match literal {
            FloatLiteral::Inf { negative } => {
                let inf = ExactDecimal::Infinity;
                Ok(if negative { inf.negate() } else { inf })
            }
            FloatLiteral::NaN => Ok(ExactDecimal::NaN),
            FloatLiteral::Finite {
                negative,
                mantissa,
                exponent,
            } => {
                let out_of_range = || ParseTypesError::out_of_range(value, ScalarKind::Decimal);
                let mut d = Decimal::from_str_exact(&mantissa).map_err(|_| out_of_range())?;
                if let Some(exponent) = exponent {
                    let exponent: i64 = exponent.parse().map_err(|_| out_of_range())?;
                    d = scale_decimal(d, exponent).ok_or_else(out_of_range)?;
                }
                let d = ExactDecimal::Finite(d);
                Ok(if negative { d.negate() } else { d })
            }
        }
    }

    // -------------------------------------------------------------------------
    // Lists
    // -------------------------------------------------------------------------

    /// Whether the prepared token contains the list delimiter.
    pub fn has_list_delimiter(&self, value: &str) -> bool {
        self.list_delimiter
            .as_deref()
            .is_some_and(|d| self.prepare(value).contains(d))
    }

    /// Split a token on the list delimiter, trimming pieces when trimming is
    /// on. None when no delimiter is configured.
    pub fn split_list<'a>(&self, value: &'a str) -> Option<Vec<&'a str>> {
        let delimiter = self.list_delimiter.as_deref()?;
        let pieces = self
            .prepare(value)
            .split(delimiter)
            .map(|piece| self.prepare(piece))
            .collect();
        Some(pieces)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn classifier() -> Classifier {
        Classifier::new(&ParserConfig::default()).unwrap()
    }

    #[test]
    fn test_reserved_chars() {
        assert!(is_reserved("e"));
        assert!(is_reserved("−"));
        assert!(is_reserved("7"));
        assert!(!is_reserved("ee"));
        assert!(!is_reserved(""));
    }

    #[test]
    fn test_split_scientific_requires_single_marker() {
        assert_eq!(split_scientific("1e5", true), Some(("1", "5")));
        assert_eq!(split_scientific("1E5", false), Some(("1", "5")));
        assert_eq!(split_scientific("1E5", true), None);
        assert_eq!(split_scientific("1e2e3", false), None);
    }

    #[test]
    fn test_digit_runs() {
        assert!(is_digit_run("1_000_000"));
        assert!(!is_digit_run("_10"));
        assert!(!is_digit_run("10_"));
        assert!(!is_digit_run("1__0"));
        assert!(!is_digit_run("²"));
    }

    #[test]
    fn test_unsigned_mantissa_padding() {
        assert_eq!(unsigned_mantissa(".5").as_deref(), Some("0.5"));
        assert_eq!(unsigned_mantissa("4.").as_deref(), Some("4.0"));
        assert_eq!(unsigned_mantissa("1_4.1_4").as_deref(), Some("14.14"));
        assert_eq!(unsigned_mantissa("."), None);
        assert_eq!(unsigned_mantissa("1.0.0"), None);
    }

    #[test]
    fn test_scale_decimal() {
        let d = Decimal::from_str("2.3").unwrap();
        assert_eq!(scale_decimal(d, 2), Some(Decimal::from(230)));
        assert_eq!(scale_decimal(d, -2), Some(Decimal::from_str("0.023").unwrap()));
        assert_eq!(scale_decimal(Decimal::ZERO, 10_000), Some(Decimal::ZERO));
        assert_eq!(scale_decimal(d, 40), None);
    }

    #[test]
    fn test_single_sign_only() {
        let c = classifier();
        assert!(c.is_float("-1.5"));
        assert!(!c.is_float("--1"));
        assert!(!c.is_float("++1.0"));
        assert!(!c.is_float("+-1e5"));
    }

    #[test]
    fn test_int_overflow_is_conversion_error() {
        let c = classifier();
        assert!(c.is_int("99999999999999999999"));
        let err = c.parse_int("99999999999999999999").unwrap_err();
        assert!(err.is_value_conversion());
        assert!(c.parse_int("9e18").is_ok());
        assert!(c.parse_int("1e19").is_err());
    }

    #[test]
    fn test_split_list_trims_pieces() {
        let config = ParserConfig::default().with_list_delimiter(",");
        let c = Classifier::new(&config).unwrap();
        assert_eq!(c.split_list(" a , b,c "), Some(vec!["a", "b", "c"]));
        assert_eq!(classifier().split_list("a,b"), None);
    }

    #[test]
    fn test_split_list_untrimmed() {
        let config = ParserConfig::default()
            .with_trim(false)
            .with_list_delimiter(",");
        let c = Classifier::new(&config).unwrap();
        assert_eq!(c.split_list(" a , b"), Some(vec![" a ", " b"]));
    }
}
