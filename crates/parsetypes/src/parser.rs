//! The `TypeParser` facade: inference and conversion over values, series
//! and tables.

use crate::error::{ParseTypesError, Result};
use crate::inference::{reduce_types, TypeTable};
use crate::input::{CaseSensitivity, Classifier, FloatOptions, IntOptions, LiteralSet, ParserConfig};
use crate::schema::{ExactDecimal, ScalarKind, TypeDescriptor, Value};

/// Infers the types of string tokens and converts them to native values.
///
/// A parser is immutable once built. To change a setting, build a new one
/// with [`reconfigure`](Self::reconfigure).
///
/// ```
/// use parsetypes::{TypeDescriptor, TypeParser, Value};
///
/// let parser = TypeParser::new();
/// assert_eq!(parser.infer_series(["1", "2", "3.4"]), TypeDescriptor::Float);
/// assert_eq!(
///     parser.parse_series(&["true", "false", "2"]).unwrap(),
///     vec![Value::Int(1), Value::Int(0), Value::Int(2)]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct TypeParser {
    config: ParserConfig,
    classifier: Classifier,
}

impl Default for TypeParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeParser {
    /// Create a parser with the default configuration.
    pub fn new() -> Self {
        let config = ParserConfig::default();
        let classifier = Classifier::unvalidated(&config);
        Self { config, classifier }
    }

    /// Create a parser with a custom configuration.
    ///
    /// Fails with [`ParseTypesError::Config`] when a literal collides with
    /// the numeric grammar or with another literal category.
    pub fn with_config(config: ParserConfig) -> Result<Self> {
        let classifier = Classifier::new(&config)?;
        log::debug!(
            "configured parser: trim={}, exact_decimal={}, list_delimiter={:?}",
            config.trim,
            config.use_exact_decimal,
            config.list_delimiter
        );
        Ok(Self { config, classifier })
    }

    /// Build a new parser from an edited copy of this one's configuration.
    ///
    /// ```
    /// use parsetypes::{TypeDescriptor, TypeParser};
    ///
    /// let parser = TypeParser::new();
    /// let lists = parser.reconfigure(|c| c.list_delimiter = Some(",".into())).unwrap();
    /// assert_eq!(lists.infer("1,2"), TypeDescriptor::list(TypeDescriptor::Int));
    /// assert_eq!(parser.infer("1,2"), TypeDescriptor::String);
    /// ```
    pub fn reconfigure<F>(&self, edit: F) -> Result<Self>
    where
        F: FnOnce(&mut ParserConfig),
    {
        let mut config = self.config.clone();
        edit(&mut config);
        Self::with_config(config)
    }

    /// The configuration this parser was built from.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn trim(&self) -> bool {
        self.classifier.trim()
    }

    pub fn use_exact_decimal(&self) -> bool {
        self.classifier.use_exact_decimal()
    }

    pub fn list_delimiter(&self) -> Option<&str> {
        self.classifier.list_delimiter()
    }

    /// Case sensitivity after the `case_sensitive` override is applied.
    pub fn case_sensitivity(&self) -> CaseSensitivity {
        self.classifier.case_sensitivity()
    }

    /// None literals in the form tokens are matched against.
    pub fn none_values(&self) -> &LiteralSet {
        self.classifier.none_values()
    }

    pub fn true_values(&self) -> &LiteralSet {
        self.classifier.true_values()
    }

    pub fn false_values(&self) -> &LiteralSet {
        self.classifier.false_values()
    }

    pub fn inf_values(&self) -> &LiteralSet {
        self.classifier.inf_values()
    }

    pub fn nan_values(&self) -> &LiteralSet {
        self.classifier.nan_values()
    }

    // -------------------------------------------------------------------------
    // Predicates and scalar conversion
    // -------------------------------------------------------------------------

    pub fn is_none(&self, value: &str) -> bool {
        self.classifier.is_none(value)
    }

    pub fn is_bool(&self, value: &str) -> bool {
        self.classifier.is_bool(value)
    }

    pub fn is_int(&self, value: &str) -> bool {
        self.classifier.is_int(value)
    }

    pub fn is_int_with(&self, value: &str, options: IntOptions) -> bool {
        self.classifier.is_int_with(value, options)
    }

    pub fn is_float(&self, value: &str) -> bool {
        self.classifier.is_float(value)
    }

    pub fn is_float_with(&self, value: &str, options: FloatOptions) -> bool {
        self.classifier.is_float_with(value, options)
    }

    pub fn is_decimal(&self, value: &str) -> bool {
        self.classifier.is_decimal(value)
    }

    pub fn is_decimal_with(&self, value: &str, options: FloatOptions) -> bool {
        self.classifier.is_decimal_with(value, options)
    }

    pub fn parse_none(&self, value: &str) -> Result<()> {
        self.classifier.parse_none(value)
    }

    pub fn parse_bool(&self, value: &str) -> Result<bool> {
        self.classifier.parse_bool(value)
    }

    pub fn parse_int(&self, value: &str) -> Result<i64> {
        self.classifier.parse_int(value)
    }

    pub fn parse_int_with(&self, value: &str, options: IntOptions) -> Result<i64> {
        self.classifier.parse_int_with(value, options)
    }

    pub fn parse_float(&self, value: &str) -> Result<f64> {
        self.classifier.parse_float(value)
    }

    pub fn parse_float_with(&self, value: &str, options: FloatOptions) -> Result<f64> {
        self.classifier.parse_float_with(value, options)
    }

    pub fn parse_decimal(&self, value: &str) -> Result<ExactDecimal> {
        self.classifier.parse_decimal(value)
    }

    pub fn parse_decimal_with(&self, value: &str, options: FloatOptions) -> Result<ExactDecimal> {
        self.classifier.parse_decimal_with(value, options)
    }

    // -------------------------------------------------------------------------
    // Inference
    // -------------------------------------------------------------------------

    /// Infer the narrowest type of a single token.
    ///
    /// Precedence: none, bool, int, float (or decimal), list, string.
    ///
    /// A numeric kind is only inferred when the token converts to it: an
    /// integer beyond `i64` widens to the float kind, and a decimal beyond
    /// `Decimal`'s range or precision widens to `Float`.
    pub fn infer(&self, value: &str) -> TypeDescriptor {
        if self.classifier.is_none(value) {
            TypeDescriptor::Null
        } else if self.classifier.is_bool(value) {
            TypeDescriptor::Bool
        } else if self.classifier.is_int(value) && self.classifier.parse_int(value).is_ok() {
            TypeDescriptor::Int
        } else if let Some(t) = self.infer_fractional(value) {
            t
        } else if self.classifier.has_list_delimiter(value) {
            match self.classifier.split_list(value) {
                Some(pieces) => {
                    let inner = reduce_types(pieces.iter().map(|piece| self.infer(piece)));
                    TypeDescriptor::list(inner)
                }
                None => TypeDescriptor::String,
            }
        } else {
            TypeDescriptor::String
        }
    }

    fn infer_fractional(&self, value: &str) -> Option<TypeDescriptor> {
        if !self.classifier.is_float(value) {
            return None;
        }
        if self.classifier.use_exact_decimal() && self.classifier.parse_decimal(value).is_ok() {
            return Some(TypeDescriptor::Decimal);
        }
        self.classifier
            .parse_float(value)
            .ok()
            .map(|_| TypeDescriptor::Float)
    }

    /// Infer the common type of a series of tokens. Empty input is `String`.
    pub fn infer_series<I, S>(&self, values: I) -> TypeDescriptor
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        reduce_types(values.into_iter().map(|v| self.infer(v.as_ref())))
    }

    fn infer_row<R>(&self, row: R) -> Vec<TypeDescriptor>
    where
        R: IntoIterator,
        R::Item: AsRef<str>,
    {
        row.into_iter().map(|cell| self.infer(cell.as_ref())).collect()
    }

    /// Infer one common type per column.
    ///
    /// The first row fixes the width; a row of any other width fails with
    /// [`ParseTypesError::Shape`]. No rows, or an empty first row, gives no
    /// columns.
    pub fn infer_table<I>(&self, rows: I) -> Result<Vec<TypeDescriptor>>
    where
        I: IntoIterator,
        I::Item: IntoIterator,
        <I::Item as IntoIterator>::Item: AsRef<str>,
    {
        let mut rows = rows.into_iter();
        let Some(first) = rows.next() else {
            return Ok(Vec::new());
        };
        let first = self.infer_row(first);
        if first.is_empty() {
            return Ok(Vec::new());
        }

        let mut table = TypeTable::from_first_row(first);
        for row in rows {
            table.add_row(self.infer_row(row))?;
        }

        let types = table.reduce();
        log::debug!(
            "inferred {} column types from {} rows",
            table.column_count(),
            table.row_count()
        );
        Ok(types)
    }

    // -------------------------------------------------------------------------
    // Conversion
    // -------------------------------------------------------------------------

    fn convert_scalar(&self, value: &str, kind: ScalarKind) -> Result<Value> {
        Ok(match kind {
            ScalarKind::Null => {
                self.classifier.parse_none(value)?;
                Value::Null
            }
            ScalarKind::Bool => Value::Bool(self.classifier.parse_bool(value)?),
            ScalarKind::Int => Value::Int(self.classifier.parse_int(value)?),
            ScalarKind::Decimal => Value::Decimal(self.classifier.parse_decimal(value)?),
            ScalarKind::Float => Value::Float(self.classifier.parse_float(value)?),
            ScalarKind::String => Value::String(value.to_string()),
        })
    }

    /// Convert a token to the given type.
    ///
    /// `Nullable` targets yield [`Value::Null`] for none literals. `List`
    /// targets need a list delimiter and a non-list inner type; a none token
    /// converts to [`Value::Null`] rather than a list.
    pub fn convert(&self, value: &str, target: &TypeDescriptor) -> Result<Value> {
        match target {
            TypeDescriptor::Nullable(kind) => {
                if self.classifier.is_none(value) {
                    Ok(Value::Null)
                } else {
                    self.convert_scalar(value, *kind)
                }
            }
            TypeDescriptor::List(inner) => {
                if inner.is_list() {
                    return Err(ParseTypesError::UnsupportedType {
                        target: target.clone(),
                        reason: "nested lists cannot be split",
                    });
                }
                let Some(pieces) = self.classifier.split_list(value) else {
                    return Err(ParseTypesError::UnsupportedType {
                        target: target.clone(),
                        reason: "no list delimiter configured",
                    });
                };
                if self.classifier.is_none(value) {
                    return Ok(Value::Null);
                }
                pieces
                    .into_iter()
                    .map(|piece| self.convert(piece, inner))
                    .collect::<Result<Vec<_>>>()
                    .map(Value::List)
            }
            scalar => match scalar.as_scalar() {
                Some(kind) => self.convert_scalar(value, kind),
                None => Err(ParseTypesError::UnsupportedType {
                    target: target.clone(),
                    reason: "not a scalar type",
                }),
            },
        }
    }

    /// Infer a token's type and convert it.
    pub fn parse(&self, value: &str) -> Result<Value> {
        self.convert(value, &self.infer(value))
    }

    /// Convert a series to its common type.
    pub fn parse_series<S: AsRef<str>>(&self, values: &[S]) -> Result<Vec<Value>> {
        let target = self.infer_series(values);
        values
            .iter()
            .map(|v| self.convert(v.as_ref(), &target))
            .collect()
    }

    /// Convert every cell of a table to its column's common type.
    pub fn parse_table<I>(&self, rows: I) -> Result<Vec<Vec<Value>>>
    where
        I: IntoIterator,
        I::Item: IntoIterator,
        <I::Item as IntoIterator>::Item: AsRef<str>,
    {
        self.iterate_table(rows)?.collect()
    }

    /// Infer column types eagerly, then convert rows one at a time.
    ///
    /// The rows are buffered once; the returned iterator never re-reads a
    /// row it has already yielded.
    pub fn iterate_table<I>(&self, rows: I) -> Result<TableRows<'_>>
    where
        I: IntoIterator,
        I::Item: IntoIterator,
        <I::Item as IntoIterator>::Item: AsRef<str>,
    {
        let rows: Vec<Vec<String>> = rows
            .into_iter()
            .map(|row| row.into_iter().map(|cell| cell.as_ref().to_string()).collect())
            .collect();
        let column_types = self.infer_table(&rows)?;

        Ok(TableRows {
            parser: self,
            column_types,
            rows: rows.into_iter(),
            index: 0,
        })
    }
}

/// Converted rows of a table, produced by [`TypeParser::iterate_table`].
#[derive(Debug)]
pub struct TableRows<'p> {
    parser: &'p TypeParser,
    column_types: Vec<TypeDescriptor>,
    rows: std::vec::IntoIter<Vec<String>>,
    index: usize,
}

impl TableRows<'_> {
    /// The inferred type of each column.
    pub fn column_types(&self) -> &[TypeDescriptor] {
        &self.column_types
    }
}

impl Iterator for TableRows<'_> {
    type Item = Result<Vec<Value>>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.rows.next()?;
        let index = self.index;
        self.index += 1;

        if row.len() != self.column_types.len() {
            return Some(Err(ParseTypesError::Shape {
                row: index,
                expected: self.column_types.len(),
                found: row.len(),
            }));
        }

        Some(
            row.iter()
                .zip(&self.column_types)
                .map(|(cell, target)| self.parser.convert(cell, target))
                .collect(),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

impl ExactSizeIterator for TableRows<'_> {}
