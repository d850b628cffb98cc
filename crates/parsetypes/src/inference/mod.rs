//! Type reduction: the widening lattice and column accumulation.

mod lattice;
mod table;

pub use lattice::{merge_types, reduce_types, terminal_type};
pub use table::TypeTable;
