#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use linsys_vector as vector;

#[doc(inline)]
pub use linsys_system as system;
