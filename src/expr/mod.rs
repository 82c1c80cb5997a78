mod matrix;
mod metadata;

pub use matrix::{CleanedMatrix, ExprMatrix};
pub use metadata::{ColumnMetadata, exocrine_indices};
