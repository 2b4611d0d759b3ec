//! # Utils Module
//!
//! Helpers shared across the crate.

pub mod threading;

pub use threading::build_thread_pool;
