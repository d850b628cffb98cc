//! parsetypes: infer the types of string tokens and convert them to native
//! values.
//!
//! Tabular text such as CSV cells arrives as strings. parsetypes decides,
//! per token, whether it is a none value, a bool, an int, a float (or exact
//! decimal), an inline list or plain text, then folds a column's per-token
//! types into the narrowest type that holds all of them.
//!
//! # Core Principles
//!
//! - **Configurable literals**: none, bool, inf and nan spellings are data,
//!   checked for collisions when a parser is built
//! - **A fixed widening lattice**: `Bool < Int < Decimal < Float < String`,
//!   then `Nullable`, then `List`
//! - **Immutable parsers**: changing a setting builds a new parser
//!
//! # Example
//!
//! ```
//! use parsetypes::{TypeDescriptor, TypeParser, Value};
//!
//! let parser = TypeParser::new();
//! let rows = vec![vec!["1", "a"], vec!["2", "b"], vec!["3.4", "c"]];
//!
//! let types = parser.infer_table(&rows).unwrap();
//! assert_eq!(types, vec![TypeDescriptor::Float, TypeDescriptor::String]);
//!
//! let values = parser.parse_table(&rows).unwrap();
//! assert_eq!(values[2][0], Value::Float(3.4));
//! ```

pub mod error;
pub mod inference;
pub mod input;
pub mod schema;

mod parser;

pub use error::{LiteralRole, ParseTypesError, Result};
pub use inference::{merge_types, reduce_types, terminal_type, TypeTable};
pub use input::{CaseSensitivity, FloatOptions, IntOptions, LiteralSet, ParserConfig};
pub use parser::{TableRows, TypeParser};
pub use schema::{ExactDecimal, ScalarKind, TypeDescriptor, Value};
