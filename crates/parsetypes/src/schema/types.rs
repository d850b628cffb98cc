//! Core type descriptors recognised by the parser.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A non-container kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarKind {
    /// An absent value.
    Null,
    /// Boolean literal.
    Bool,
    /// Signed integer.
    Int,
    /// Exact decimal number.
    Decimal,
    /// Approximate IEEE-754 double.
    Float,
    /// Text; accepts every token.
    String,
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScalarKind::Null => "Null",
            ScalarKind::Bool => "Bool",
            ScalarKind::Int => "Int",
            ScalarKind::Decimal => "Decimal",
            ScalarKind::Float => "Float",
            ScalarKind::String => "String",
        };
        f.write_str(name)
    }
}

/// Shape of a value: a scalar, a scalar that may be absent, or a list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "inner", rename_all = "snake_case")]
pub enum TypeDescriptor {
    Null,
    Bool,
    Int,
    Decimal,
    Float,
    String,
    /// A scalar that may also be absent.
    Nullable(ScalarKind),
    /// A homogeneous sequence.
    List(Box<TypeDescriptor>),
}

impl TypeDescriptor {
    /// The descriptor for a bare scalar kind.
    pub fn scalar(kind: ScalarKind) -> Self {
        match kind {
            ScalarKind::Null => TypeDescriptor::Null,
            ScalarKind::Bool => TypeDescriptor::Bool,
            ScalarKind::Int => TypeDescriptor::Int,
            ScalarKind::Decimal => TypeDescriptor::Decimal,
            ScalarKind::Float => TypeDescriptor::Float,
            ScalarKind::String => TypeDescriptor::String,
        }
    }

    /// Shorthand for `List(inner)`.
    pub fn list(inner: TypeDescriptor) -> Self {
        TypeDescriptor::List(Box::new(inner))
    }

    /// The scalar kind of a bare scalar descriptor.
    pub fn as_scalar(&self) -> Option<ScalarKind> {
        match self {
            TypeDescriptor::Null => Some(ScalarKind::Null),
            TypeDescriptor::Bool => Some(ScalarKind::Bool),
            TypeDescriptor::Int => Some(ScalarKind::Int),
            TypeDescriptor::Decimal => Some(ScalarKind::Decimal),
            TypeDescriptor::Float => Some(ScalarKind::Float),
            TypeDescriptor::String => Some(ScalarKind::String),
            TypeDescriptor::Nullable(_) | TypeDescriptor::List(_) => None,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, TypeDescriptor::List(_))
    }

    /// The same shape, additionally admitting an absent value.
    ///
    /// Scalars become `Nullable`; containers already admit absence and are
    /// returned unchanged.
    pub fn nullable(self) -> Self {
        match self {
            TypeDescriptor::Nullable(_) | TypeDescriptor::List(_) => self,
            scalar => match scalar.as_scalar() {
                Some(kind) => TypeDescriptor::Nullable(kind),
                None => scalar,
            },
        }
    }
}

impl Default for TypeDescriptor {
    fn default() -> Self {
        TypeDescriptor::String
    }
}

impl From<ScalarKind> for TypeDescriptor {
    fn from(kind: ScalarKind) -> Self {
        TypeDescriptor::scalar(kind)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Nullable(kind) => write!(f, "Nullable[{kind}]"),
            TypeDescriptor::List(inner) => write!(f, "List[{inner}]"),
            scalar => match scalar.as_scalar() {
                Some(kind) => fmt::Display::fmt(&kind, f),
                None => Ok(()),
            },
        }
    }
}
