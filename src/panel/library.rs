//! # Haplotype Reference Panel
//!
//! An append-only collection of haplotypes with stable zero-based
//! identifiers, searched as the reference space for compatibility and
//! nearest-match queries. All pairwise work goes through the intersect
//! engine; scans fan out across entries with rayon.
//!
//! Concurrency follows the single-writer/multi-reader discipline:
//! searches borrow `&self` and may run concurrently (each comparison reads
//! two immutable sequences and writes a private accumulator), while
//! [`HaplotypeLibrary::add`] takes `&mut self`, so the borrow checker
//! excludes appends from overlapping any read. Callers that interleave
//! loading and searching across threads wrap the library in an `RwLock`.

use rayon::prelude::*;
use tracing::debug;

use crate::data::genotype::Genotype;
use crate::data::haplotype::Haplotype;
use crate::error::{check_lengths, HaplokitError, Result};
use crate::model::intersect;

/// Zero-cost newtype for panel entry indices
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct HapIdx(pub u32);

impl HapIdx {
    pub fn new(idx: u32) -> Self {
        Self(idx)
    }

    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for HapIdx {
    fn from(idx: u32) -> Self {
        Self(idx)
    }
}

impl From<usize> for HapIdx {
    fn from(idx: usize) -> Self {
        Self(idx as u32)
    }
}

impl From<HapIdx> for usize {
    fn from(idx: HapIdx) -> usize {
        idx.0 as usize
    }
}

/// An append-only reference panel of haplotypes.
///
/// Entries are owned (value semantics), indexed in insertion order, and
/// never removed or reindexed. Every entry spans the same `n_loci` marker
/// loci.
#[derive(Clone, Debug, Default)]
pub struct HaplotypeLibrary {
    /// Stored haplotypes, in insertion order
    entries: Vec<Haplotype>,
    /// Shared locus count for every entry
    n_loci: usize,
}

impl HaplotypeLibrary {
    /// An empty panel over `n_loci` marker loci.
    pub fn new(n_loci: usize) -> Self {
        Self {
            entries: Vec::new(),
            n_loci,
        }
    }

    /// Build a panel from an iterator of haplotypes.
    pub fn from_haplotypes(
        n_loci: usize,
        haplotypes: impl IntoIterator<Item = Haplotype>,
    ) -> Result<Self> {
        let mut library = Self::new(n_loci);
        for haplotype in haplotypes {
            library.add(haplotype)?;
        }
        Ok(library)
    }

    /// Append a haplotype, returning its stable zero-based index.
    ///
    /// The panel takes ownership, so later mutation of the caller's data
    /// cannot disturb stored entries or search results.
    pub fn add(&mut self, haplotype: Haplotype) -> Result<HapIdx> {
        check_lengths(haplotype.len(), self.n_loci)?;
        let idx = HapIdx::from(self.entries.len());
        self.entries.push(haplotype);
        Ok(idx)
    }

    /// Bounds-checked read of a stored entry.
    pub fn get(&self, idx: HapIdx) -> Result<&Haplotype> {
        self.entries
            .get(idx.as_usize())
            .ok_or_else(|| HaplokitError::index_out_of_range(idx.as_usize(), self.entries.len()))
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the panel holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Shared locus count for every entry.
    pub fn n_loci(&self) -> usize {
        self.n_loci
    }

    /// Iterate stored entries in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Haplotype> {
        self.entries.iter()
    }

    /// Indices of every entry that could underlie `genotype`, in ascending
    /// index order.
    pub fn compatible_with(&self, genotype: &Genotype) -> Result<Vec<HapIdx>> {
        check_lengths(genotype.len(), self.n_loci)?;
        let hits: Vec<HapIdx> = self
            .entries
            .par_iter()
            .enumerate()
            .filter_map(|(i, entry)| {
                (intersect::geno_hap_incompatible(genotype, entry) == 0).then(|| HapIdx::from(i))
            })
            .collect();
        debug!(
            n_entries = self.entries.len(),
            n_hits = hits.len(),
            "compatibility scan"
        );
        Ok(hits)
    }

    /// Indices of every entry within `max_mismatches` non-missing
    /// disagreements of `haplotype`, in ascending index order.
    pub fn matches_within(
        &self,
        haplotype: &Haplotype,
        max_mismatches: usize,
    ) -> Result<Vec<HapIdx>> {
        check_lengths(haplotype.len(), self.n_loci)?;
        let hits: Vec<HapIdx> = self
            .entries
            .par_iter()
            .enumerate()
            .filter_map(|(i, entry)| {
                (intersect::hap_summary(haplotype, entry).non_matching <= max_mismatches)
                    .then(|| HapIdx::from(i))
            })
            .collect();
        debug!(
            n_entries = self.entries.len(),
            n_hits = hits.len(),
            max_mismatches,
            "mismatch scan"
        );
        Ok(hits)
    }

    /// The `k` entries nearest to `haplotype` by non-missing mismatch
    /// count, ordered by ascending distance with ties broken by index.
    pub fn nearest_to(&self, haplotype: &Haplotype, k: usize) -> Result<Vec<(HapIdx, usize)>> {
        check_lengths(haplotype.len(), self.n_loci)?;
        let mut ranked: Vec<(HapIdx, usize)> = self
            .entries
            .par_iter()
            .enumerate()
            .map(|(i, entry)| {
                (
                    HapIdx::from(i),
                    intersect::hap_summary(haplotype, entry).non_matching,
                )
            })
            .collect();
        ranked.sort_by_key(|&(idx, distance)| (distance, idx));
        ranked.truncate(k);
        debug!(
            n_entries = self.entries.len(),
            k,
            "nearest-neighbor scan"
        );
        Ok(ranked)
    }
}
