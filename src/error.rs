use crate::shape::Shape;
use thiserror::Error;

/// Errors surfaced by matrix access and arithmetic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// Element access with coordinates outside the matrix.
    #[error("index ({row}, {column}) out of range for {shape} matrix")]
    IndexOutOfRange {
        row: usize,
        column: usize,
        shape: Shape,
    },

    /// Operand shapes are incompatible for the requested operation.
    ///
    /// Raised by addition and subtraction when either dimension differs,
    /// and by multiplication when the left operand's column count does not
    /// equal the right operand's row count.
    #[error("dimension mismatch: {lhs} vs {rhs}")]
    DimensionMismatch { lhs: Shape, rhs: Shape },
}

pub type Result<T, E = MatrixError> = core::result::Result<T, E>;
