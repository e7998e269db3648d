use thiserror::Error;

/// Errors from board edits and snapshot replacement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// A coordinate outside `[0, rows) x [0, cols)`. Never clamped or wrapped.
    #[error("cell ({row}, {col}) is outside the {rows}x{cols} board")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    /// A grid whose shape differs from the one the engine was built for.
    #[error("grid is {actual_rows}x{actual_cols}, expected {rows}x{cols}")]
    DimensionMismatch {
        rows: usize,
        cols: usize,
        actual_rows: usize,
        actual_cols: usize,
    },
}
