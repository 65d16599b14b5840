//! Command implementations.

pub mod normalize;
pub mod validate;
