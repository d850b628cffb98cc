//! Column-wise accumulation of per-cell types.

use crate::error::{ParseTypesError, Result};
use crate::schema::TypeDescriptor;

use super::lattice::reduce_types;

/// Per-cell types of a table, stored column-major.
#[derive(Debug, Clone, Default)]
pub struct TypeTable {
    columns: Vec<Vec<TypeDescriptor>>,
    rows: usize,
}

impl TypeTable {
    /// Create a table seeded with its first row.
    pub fn from_first_row(row: Vec<TypeDescriptor>) -> Self {
        let columns = row.into_iter().map(|t| vec![t]).collect();
        Self { columns, rows: 1 }
    }

    /// Append a row, which must be as wide as the first one.
    pub fn add_row(&mut self, row: Vec<TypeDescriptor>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(ParseTypesError::Shape {
                row: self.rows,
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        for (column, t) in self.columns.iter_mut().zip(row) {
            column.push(t);
        }
        self.rows += 1;
        Ok(())
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// The recorded types of one column.
    pub fn column(&self, index: usize) -> Option<&[TypeDescriptor]> {
        self.columns.get(index).map(Vec::as_slice)
    }

    /// Fold every column into its common type.
    pub fn reduce(&self) -> Vec<TypeDescriptor> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let reduced = reduce_types(column);
                log::trace!("column {i}: {} cells reduced to {reduced}", column.len());
                reduced
            })
            .collect()
    }
}
