//! # Data Module
//!
//! The per-locus value types and their fixed-length sequences. This is the
//! core "Model" layer.
//!
//! ## Design Philosophy
//! - **Bit-plane storage:** each sequence keeps two `u64`-backed planes
//!   (presence + value) instead of one enum per locus, so pairwise
//!   comparisons run wordwise in the intersect engine.
//! - **Tagged values at the boundary:** the integer wire convention
//!   (missing sentinel `9`) is decoded once in `allele`; internal logic
//!   only ever sees `Allele`/`Dosage`.

pub mod allele;
pub mod genotype;
pub mod haplotype;

// Re-export commonly used types
pub use allele::{Allele, Dosage, MISSING_CODE};
pub use genotype::Genotype;
pub use haplotype::Haplotype;
