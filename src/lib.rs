//! # Haplokit Library Root
//!
//! Deterministic haplotype/genotype primitives for phasing and imputation
//! pipelines: ternary-coded marker sequences stored as packed bit planes,
//! a wordwise intersect/compare engine, and an append-only reference panel
//! searched in parallel.
//!
//! ## Module Structure
//! ```text
//! haplokit
//! ├── data        # Value types: Allele, Dosage, Haplotype, Genotype
//! ├── model       # Comparison kernels (intersect engine)
//! ├── panel       # HaplotypeLibrary reference panel + searches
//! └── utils       # Helpers (rayon thread pool)
//! ```
//!
//! ## Example
//! ```
//! use haplokit::{Genotype, Haplotype, HaplotypeLibrary};
//!
//! # fn main() -> haplokit::Result<()> {
//! let genotype = Genotype::from_codes(&[1, 0, 2, 1, 2, 0])?;
//! let gamete = Haplotype::from_codes(&[1, 0, 1, 1, 1, 0])?;
//! assert!(genotype.is_haplotype_compatible(&gamete)?);
//!
//! let other = genotype.complement(&gamete)?;
//! assert_eq!(other.to_codes(), vec![0, 0, 1, 0, 1, 0]);
//!
//! let mut panel = HaplotypeLibrary::new(6);
//! let idx = panel.add(gamete)?;
//! assert_eq!(panel.compatible_with(&genotype)?, vec![idx]);
//! # Ok(())
//! # }
//! ```

pub mod data;
pub mod error;
pub mod model;
pub mod panel;
pub mod utils;

// Re-export commonly used types
pub use data::{Allele, Dosage, Genotype, Haplotype, MISSING_CODE};
pub use error::{HaplokitError, Result};
pub use model::{compare_haplotypes, IntersectSummary};
pub use panel::{HapIdx, HaplotypeLibrary};
