//! # Panel Module
//!
//! The haplotype reference panel and its search operations.

pub mod library;

pub use library::{HapIdx, HaplotypeLibrary};
