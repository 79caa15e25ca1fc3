//! Environment helpers shared by the iohbench crates.

pub mod constants;
pub mod env_utils;

pub use env_utils::*;
