//! Statistical reductions over labeled arrays
//!
//! # Organization
//!
//! - [`operations`]: the built-in lane operations
//! - [`parallel`]: the lane-parallel kernel
//! - [`across`]: reductions of a labeled array across one axis

pub mod across;
pub mod operations;
pub mod parallel;

pub use operations::StatOperation;
pub use parallel::parallel_reduce_axis;
