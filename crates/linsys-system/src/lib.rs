#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Linear systems
//!
//! A [`LinearSystem`] is an ordered list of [`Plane`]s, each one the equation
//! `normal_vector · x = constant_term`. The system can be edited with the elementary row
//! operations and reduced to row-echelon form with
//! [`LinearSystem::compute_triangular_form`].
//!
//! ## Example
//!
//! ```rust
//! use linsys_system::{LinearSystem, Plane};
//! use linsys_vector::{Decimal, Vector};
//!
//! // x + y + z = 1 and x + y + z = 2 have no common point
//! let p1 = Plane::new(Vector::parse(&["1", "1", "1"]).unwrap(), Decimal::ONE);
//! let p2 = Plane::new(Vector::parse(&["1", "1", "1"]).unwrap(), Decimal::TWO);
//! let system = LinearSystem::new(vec![p1, p2]).unwrap();
//!
//! let triangular = system.compute_triangular_form().unwrap();
//! assert_eq!(triangular[1], Plane::with_constant_term(Decimal::ONE));
//! ```

/// Error types for the linear system module.
pub mod error;

mod plane;
pub use plane::*;

mod system;
pub use system::*;

pub use error::LinearSystemError;
