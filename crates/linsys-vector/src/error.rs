/// An error type for the vector module.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum VectorError {
    /// Error when a vector is built from no coordinates.
    #[error("The coordinates must be nonempty")]
    EmptyCoordinates,

    /// Error when a coordinate cannot be represented as a decimal.
    #[error("Invalid coordinate ({0}), expected a finite decimal number")]
    InvalidCoordinate(String),

    /// Error when the operands of a binary operation differ in dimension.
    #[error("Dimension mismatch between vectors ({0} != {1})")]
    DimensionMismatch(usize, usize),

    /// Error when normalizing a vector with (near) zero magnitude.
    #[error("Cannot normalize the zero vector")]
    CannotNormalizeZeroVector,

    /// Error when one of the operands of an angle computation is the zero vector.
    #[error("Cannot compute an angle with the zero vector")]
    AngleWithZeroVector,

    /// Error when projecting onto the zero vector.
    #[error("Zero vector has no unique parallel component")]
    NoUniqueParallelComponent,

    /// Error when the cross product is requested outside two or three dimensions.
    #[error("Cross product is only defined in two or three dimensions, got {0}")]
    CrossProductUndefined(usize),

    /// Error when an arithmetic result leaves the range of the decimal representation.
    #[error("Arithmetic overflow, the result exceeds the decimal range")]
    Overflow,

    /// Error when dividing by zero.
    #[error("Division by zero")]
    DivisionByZero,
}
