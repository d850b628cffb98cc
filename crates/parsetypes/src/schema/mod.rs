//! Type descriptors and the values they describe.

mod types;
mod value;

pub use types::{ScalarKind, TypeDescriptor};
pub use value::{ExactDecimal, Value};
