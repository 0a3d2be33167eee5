#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Decimal vectors
//!
//! Vectors hold `rust_decimal::Decimal` coordinates and every arithmetic result is rounded
//! to 15 significant digits, so repeated algebra does not drift the way binary floats do.
//!
//! ## Example
//!
//! ```rust
//! use linsys_vector::{AngleUnit, Decimal, Vector};
//!
//! let v = Vector::parse(&["3", "4"]).unwrap();
//! let w = Vector::parse(&["4", "-3"]).unwrap();
//!
//! assert!(v.is_orthogonal_to(&w).unwrap());
//! assert_eq!(v.magnitude().unwrap(), Decimal::from(5));
//! let angle = v.angle_with(&w, AngleUnit::Degrees).unwrap();
//! assert!((angle - 90.0).abs() < 1e-9);
//! ```

/// Error types for the vector module.
pub mod error;

/// Decimal arithmetic at a fixed precision.
pub mod scalar;

mod vector;
pub use vector::*;

pub use error::VectorError;

#[doc(no_inline)]
pub use rust_decimal::Decimal;
