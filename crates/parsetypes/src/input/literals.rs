//! Normalised literal sets.

use indexmap::IndexSet;

/// A set of configured literals, stored in the form tokens are compared in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiteralSet {
    values: IndexSet<String>,
    case_sensitive: bool,
}

impl LiteralSet {
    /// Normalise `values`: trimmed if `trim`, lower-cased unless
    /// `case_sensitive`. Duplicates collapse, first occurrence wins.
    pub fn new<I, S>(values: I, trim: bool, case_sensitive: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let values = values
            .into_iter()
            .map(|v| {
                let v = v.as_ref();
                let v = if trim { v.trim() } else { v };
                fold(v, case_sensitive)
            })
            .collect();
        Self {
            values,
            case_sensitive,
        }
    }

    /// Membership test for an already trimmed token.
    pub fn contains(&self, token: &str) -> bool {
        if self.values.is_empty() {
            return false;
        }
        if self.case_sensitive {
            self.values.contains(token)
        } else {
            self.values.contains(token.to_lowercase().as_str())
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn fold(value: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        value.to_string()
    } else {
        value.to_lowercase()
    }
}
