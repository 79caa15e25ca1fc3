//! Instance transformations.
//!
//! `variables` and `objective` hold the pure primitives that concrete
//! problems chain in a fixed order; `state` derives the per-instance
//! matrices and vectors those primitives consume.

pub mod objective;
pub mod state;
pub mod variables;

pub use state::{TransformationState, rotation};
