//! Token classification: configuration, literal sets and the literal grammar.

mod classifier;
mod config;
mod literals;

pub use classifier::{Classifier, FloatOptions, IntOptions};
pub use config::{CaseSensitivity, ParserConfig};
pub use literals::LiteralSet;
