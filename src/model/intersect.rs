//! # Intersect/Compare Engine
//!
//! Stateless pairwise comparison kernels over the bit planes of
//! [`Haplotype`] and [`Genotype`]. Each comparison reduces to bitwise
//! AND/OR/XOR plus a population count over `u64` words, so a panel-wide
//! scan touches two machine words per 64 loci instead of branching per
//! locus.
//!
//! Kernels read whole raw words, including the dead tail bits of the final
//! partial word, so every combined word is masked before counting. Inputs
//! are assumed canonical (see the plane tables in [`crate::data`]): an
//! unread locus never sets its value bit.
//!
//! The value-type comparison methods in `data` delegate here, as do the
//! panel scans in [`crate::panel`] — one optimized code path for both.

use crate::data::genotype::Genotype;
use crate::data::haplotype::Haplotype;
use crate::error::{check_lengths, Result};

/// Tallies from comparing two allele sequences over their shared loci.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IntersectSummary {
    /// Loci where both calls are read and agree
    pub matching: usize,
    /// Loci where both calls are read and disagree
    pub non_matching: usize,
    /// Loci where both calls are read
    pub non_missing: usize,
    /// Loci compared in total
    pub total: usize,
}

/// Mask selecting the live bits of word `i` in a plane of `len` bits.
#[inline(always)]
pub(crate) fn word_mask(len: usize, i: usize, n_words: usize) -> u64 {
    if i + 1 == n_words {
        tail_mask(len)
    } else {
        !0
    }
}

/// Mask for the live bits of the final word of a `len`-bit plane.
#[inline(always)]
fn tail_mask(len: usize) -> u64 {
    match len % 64 {
        0 => !0,
        rem => (1u64 << rem) - 1,
    }
}

/// Population count of `f` applied wordwise to one plane.
#[inline]
pub(crate) fn count_unary<F>(len: usize, a: &[u64], f: F) -> usize
where
    F: Fn(u64) -> u64,
{
    let n_words = a.len();
    let mut total = 0usize;
    for i in 0..n_words {
        total += (f(a[i]) & word_mask(len, i, n_words)).count_ones() as usize;
    }
    total
}

/// Population count of `f` applied wordwise to two planes.
#[inline]
pub(crate) fn count_binary<F>(len: usize, a: &[u64], b: &[u64], f: F) -> usize
where
    F: Fn(u64, u64) -> u64,
{
    let n_words = a.len();
    let mut total = 0usize;
    for i in 0..n_words {
        total += (f(a[i], b[i]) & word_mask(len, i, n_words)).count_ones() as usize;
    }
    total
}

/// Population count of `f` applied wordwise to the four planes of a
/// sequence pair.
#[inline]
pub(crate) fn count_quad<F>(len: usize, a: &[u64], b: &[u64], c: &[u64], d: &[u64], f: F) -> usize
where
    F: Fn(u64, u64, u64, u64) -> u64,
{
    let n_words = a.len();
    let mut total = 0usize;
    for i in 0..n_words {
        total += (f(a[i], b[i], c[i], d[i]) & word_mask(len, i, n_words)).count_ones() as usize;
    }
    total
}

/// Compare two haplotypes locus by locus.
///
/// Returns the match/mismatch/presence tallies over all shared loci.
/// Fails with `LengthMismatch` when the sequences differ in length.
pub fn compare_haplotypes(a: &Haplotype, b: &Haplotype) -> Result<IntersectSummary> {
    check_lengths(a.len(), b.len())?;
    Ok(hap_summary(a, b))
}

/// Unchecked haplotype comparison; lengths must already agree.
pub(crate) fn hap_summary(a: &Haplotype, b: &Haplotype) -> IntersectSummary {
    let len = a.len();
    let (p1, m1) = (a.phase_words(), a.missing_words());
    let (p2, m2) = (b.phase_words(), b.missing_words());

    let n_words = p1.len();
    let mut non_missing = 0usize;
    let mut matching = 0usize;
    for i in 0..n_words {
        let mask = word_mask(len, i, n_words);
        let present = !m1[i] & !m2[i] & mask;
        non_missing += present.count_ones() as usize;
        matching += (present & !(p1[i] ^ p2[i])).count_ones() as usize;
    }

    IntersectSummary {
        matching,
        non_matching: non_missing - matching,
        non_missing,
        total: len,
    }
}

/// Loci where two genotypes differ, unread compared as an ordinary value.
pub(crate) fn geno_not_equal(a: &Genotype, b: &Genotype) -> usize {
    count_quad(
        a.len(),
        a.homo_words(),
        a.extra_words(),
        b.homo_words(),
        b.extra_words(),
        |h1, e1, h2, e2| (h1 ^ h2) | (e1 ^ e2),
    )
}

/// Loci where two genotypes differ, skipping loci with an unread side.
pub(crate) fn geno_not_equal_exclude_missing(a: &Genotype, b: &Genotype) -> usize {
    count_quad(
        a.len(),
        a.homo_words(),
        a.extra_words(),
        b.homo_words(),
        b.extra_words(),
        |h1, e1, h2, e2| ((h1 ^ h2) | (e1 ^ e2)) & (h1 | !e1) & (h2 | !e2),
    )
}

/// Loci where two genotypes are opposite homozygotes (dosage 0 vs 2).
///
/// An unread side can never contribute: unread calls carry `homo = 0`.
pub(crate) fn geno_opposite_homozygotes(a: &Genotype, b: &Genotype) -> usize {
    count_quad(
        a.len(),
        a.homo_words(),
        a.extra_words(),
        b.homo_words(),
        b.extra_words(),
        |h1, e1, h2, e2| h1 & h2 & (e1 ^ e2),
    )
}

/// Loci where a haplotype cannot underlie a genotype: dosage 0 against
/// allele 1, or dosage 2 against allele 0. Unread and heterozygous calls
/// are always compatible.
pub(crate) fn geno_hap_incompatible(g: &Genotype, hap: &Haplotype) -> usize {
    count_quad(
        g.len(),
        g.homo_words(),
        g.extra_words(),
        hap.phase_words(),
        hap.missing_words(),
        |h, e, p, m| ((h & !e & p) | (h & e & !p)) & !m,
    )
}
