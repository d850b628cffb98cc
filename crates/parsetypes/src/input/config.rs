//! Parser configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Configuration for a [`TypeParser`](crate::TypeParser).
///
/// A plain value: building a parser validates it, and changing settings
/// means building a new parser from an edited copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParserConfig {
    /// Strip surrounding whitespace from tokens and literals.
    pub trim: bool,
    /// Infer `Decimal` rather than `Float` for non-integer numbers.
    pub use_exact_decimal: bool,
    /// Delimiter for inline lists (None = no list detection).
    pub list_delimiter: Option<String>,
    /// Literals recognised as an absent value.
    pub none_values: Vec<String>,
    /// Literals recognised as `true`.
    pub true_values: Vec<String>,
    /// Literals recognised as `false`.
    pub false_values: Vec<String>,
    /// Literals recognised as infinity.
    pub inf_values: Vec<String>,
    /// Literals recognised as NaN.
    pub nan_values: Vec<String>,
    pub none_case_sensitive: bool,
    pub bool_case_sensitive: bool,
    /// Case sensitivity of the scientific marker in integers.
    pub int_case_sensitive: bool,
    /// Case sensitivity of inf/nan literals and the scientific marker in floats.
    pub float_case_sensitive: bool,
    /// Overrides all four case-sensitivity flags when set.
    pub case_sensitive: Option<bool>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            trim: true,
            use_exact_decimal: false,
            list_delimiter: None,
            none_values: vec![String::new()],
            true_values: vec!["true".to_string()],
            false_values: vec!["false".to_string()],
            inf_values: Vec::new(),
            nan_values: Vec::new(),
            none_case_sensitive: false,
            bool_case_sensitive: false,
            int_case_sensitive: false,
            float_case_sensitive: false,
            case_sensitive: None,
        }
    }
}

fn owned<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values.into_iter().map(Into::into).collect()
}

impl ParserConfig {
    /// Load a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the configuration to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    pub fn with_exact_decimal(mut self, use_exact_decimal: bool) -> Self {
        self.use_exact_decimal = use_exact_decimal;
        self
    }

    pub fn with_list_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.list_delimiter = Some(delimiter.into());
        self
    }

    pub fn without_list_delimiter(mut self) -> Self {
        self.list_delimiter = None;
        self
    }

    pub fn with_none_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.none_values = owned(values);
        self
    }

    pub fn with_true_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.true_values = owned(values);
        self
    }

    pub fn with_false_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.false_values = owned(values);
        self
    }

    pub fn with_inf_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inf_values = owned(values);
        self
    }

    pub fn with_nan_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.nan_values = owned(values);
        self
    }

    pub fn with_none_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.none_case_sensitive = case_sensitive;
        self
    }

    pub fn with_bool_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.bool_case_sensitive = case_sensitive;
        self
    }

    pub fn with_int_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.int_case_sensitive = case_sensitive;
        self
    }

    pub fn with_float_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.float_case_sensitive = case_sensitive;
        self
    }

    /// Force every case-sensitivity flag to the same value.
    pub fn with_case_sensitive(mut self, case_sensitive: Option<bool>) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Case sensitivity flags after applying the `case_sensitive` override.
    pub fn effective_case_sensitivity(&self) -> CaseSensitivity {
        match self.case_sensitive {
            Some(all) => CaseSensitivity {
                none: all,
                bool: all,
                int: all,
                float: all,
            },
            None => CaseSensitivity {
                none: self.none_case_sensitive,
                bool: self.bool_case_sensitive,
                int: self.int_case_sensitive,
                float: self.float_case_sensitive,
            },
        }
    }
}

/// Resolved case-sensitivity flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CaseSensitivity {
    pub none: bool,
    pub bool: bool,
    pub int: bool,
    pub float: bool,
}
