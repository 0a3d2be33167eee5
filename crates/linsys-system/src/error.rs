use linsys_vector::{Decimal, VectorError};

/// Errors that can occur when working with planes and linear systems.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinearSystemError {
    /// Error related to vector algebra.
    #[error(transparent)]
    Vector(#[from] VectorError),

    /// A plane does not live in the same dimension as the system.
    #[error("All planes in the system should live in the same dimension ({expected} != {found})")]
    DimensionMismatch {
        /// Dimension of the system.
        expected: usize,
        /// Dimension of the offending plane.
        found: usize,
    },

    /// A linear system was built without any plane.
    #[error("A linear system needs at least one plane")]
    EmptySystem,

    /// A row index does not address an equation of the system.
    #[error("Row {row} is out of bounds for a system of {len} equations")]
    RowOutOfBounds {
        /// The requested row.
        row: usize,
        /// The number of equations.
        len: usize,
    },

    /// Every coefficient of a normal vector is near zero.
    #[error("No nonzero elements found")]
    NoNonzeroElements,

    /// The pivot tolerance of an elimination is zero or negative.
    #[error("The zero tolerance must be strictly positive, got {0}")]
    InvalidTolerance(Decimal),
}
