//! # Haplotype Value Type
//!
//! An ordered, fixed-length sequence of per-locus allele calls, stored as
//! two bit planes over `u64` words:
//!
//! ```text
//! call      phase  missing
//! 0         0      0
//! 1         1      0
//! MISSING   0      1
//! ```
//!
//! `phase = 1, missing = 1` is unrepresentable by construction, so every
//! plane pair in circulation is canonical (an unread locus always carries
//! `phase = 0`). Word-level kernels in [`crate::model::intersect`] rely on
//! that invariant.

use std::fmt;
use std::str::FromStr;

use bitvec::prelude::*;

use crate::data::allele::Allele;
use crate::data::genotype::Genotype;
use crate::error::{check_index, check_lengths, check_range, HaplokitError, Result};
use crate::model::intersect;

/// A fixed-length sequence of ternary allele calls.
///
/// Length is fixed at construction; per-locus values are mutable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Haplotype {
    /// Allele plane: set where the call is the alternate allele
    phase: BitVec<u64, Lsb0>,
    /// Presence plane: set where the call is unread
    missing: BitVec<u64, Lsb0>,
}

impl Haplotype {
    /// Build from integer wire codes (`0`, `1`, or `9` for missing).
    pub fn from_codes(codes: &[u8]) -> Result<Self> {
        let mut hap = Self::filled_missing(codes.len());
        for (i, &code) in codes.iter().enumerate() {
            hap.write(i, Allele::from_code(code)?);
        }
        Ok(hap)
    }

    /// Build from already-decoded allele calls.
    pub fn from_alleles(alleles: &[Allele]) -> Self {
        let mut hap = Self::filled_missing(alleles.len());
        for (i, &allele) in alleles.iter().enumerate() {
            hap.write(i, allele);
        }
        hap
    }

    /// A haplotype of `len` loci, every call unread.
    pub fn filled_missing(len: usize) -> Self {
        Self {
            phase: bitvec![u64, Lsb0; 0; len],
            missing: bitvec![u64, Lsb0; 1; len],
        }
    }

    /// Assemble from precomputed planes. The caller guarantees the pair is
    /// canonical: no locus with both bits set, dead tail bits zeroed.
    pub(crate) fn from_planes(phase: BitVec<u64, Lsb0>, missing: BitVec<u64, Lsb0>) -> Self {
        debug_assert_eq!(phase.len(), missing.len());
        Self { phase, missing }
    }

    /// Number of marker loci.
    #[inline]
    pub fn len(&self) -> usize {
        self.phase.len()
    }

    /// Whether the haplotype covers zero loci.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.phase.is_empty()
    }

    /// Read the call at locus `i`.
    pub fn get(&self, i: usize) -> Result<Allele> {
        check_index(i, self.len())?;
        Ok(self.read(i))
    }

    /// Overwrite the call at locus `i`.
    pub fn set(&mut self, i: usize, allele: Allele) -> Result<()> {
        check_index(i, self.len())?;
        self.write(i, allele);
        Ok(())
    }

    #[inline]
    fn read(&self, i: usize) -> Allele {
        if self.missing[i] {
            Allele::Missing
        } else if self.phase[i] {
            Allele::Alternate
        } else {
            Allele::Reference
        }
    }

    #[inline]
    fn write(&mut self, i: usize, allele: Allele) {
        let (phase, missing) = match allele {
            Allele::Reference => (false, false),
            Allele::Alternate => (true, false),
            Allele::Missing => (false, true),
        };
        self.phase.set(i, phase);
        self.missing.set(i, missing);
    }

    /// Iterate calls in locus order. Restartable: call again for a fresh
    /// pass.
    pub fn iter(&self) -> impl Iterator<Item = Allele> + '_ {
        (0..self.len()).map(move |i| self.read(i))
    }

    /// Integer wire codes in locus order.
    pub fn to_codes(&self) -> Vec<u8> {
        self.iter().map(Allele::code).collect()
    }

    /// Elementwise equality against another haplotype of the same length.
    ///
    /// With `exclude_missing`, loci where either side is unread are skipped
    /// entirely.
    pub fn equals(&self, other: &Haplotype, exclude_missing: bool) -> Result<bool> {
        check_lengths(self.len(), other.len())?;
        if exclude_missing {
            let summary = intersect::hap_summary(self, other);
            Ok(summary.non_matching == 0)
        } else {
            Ok(self == other)
        }
    }

    /// Count loci where the two haplotypes disagree, skipping loci where
    /// either side is unread.
    pub fn count_not_equal_exclude_missing(&self, other: &Haplotype) -> Result<usize> {
        check_lengths(self.len(), other.len())?;
        Ok(intersect::hap_summary(self, other).non_matching)
    }

    /// A new haplotype over the half-open window `[start, end)`.
    pub fn subset(&self, start: usize, end: usize) -> Result<Haplotype> {
        check_range(start, end, self.len())?;
        let mut sub = Self::filled_missing(end - start);
        for (dst, src) in (start..end).enumerate() {
            sub.write(dst, self.read(src));
        }
        Ok(sub)
    }

    /// Number of unread loci.
    pub fn count_missing(&self) -> usize {
        intersect::count_unary(self.len(), self.missing_words(), |m| m)
    }

    /// Number of loci with a known call.
    pub fn count_not_missing(&self) -> usize {
        self.len() - self.count_missing()
    }

    /// Unread loci as a fraction of the marker count.
    pub fn fraction_missing(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.count_missing() as f64 / self.len() as f64
    }

    /// Fill unread loci from another haplotype's known calls.
    ///
    /// Loci already called are untouched; loci unread on both sides stay
    /// unread.
    pub fn set_from_other_if_missing(&mut self, other: &Haplotype) -> Result<()> {
        check_lengths(self.len(), other.len())?;
        let (p_other, m_other) = (other.phase_words(), other.missing_words());
        let phase = self.phase.as_raw_mut_slice();
        let missing = self.missing.as_raw_mut_slice();
        for i in 0..phase.len() {
            // canonical planes: other.phase is 0 wherever other is unread
            phase[i] = (!missing[i] & phase[i]) | (missing[i] & p_other[i]);
            missing[i] &= m_other[i];
        }
        Ok(())
    }

    /// Fill unread loci from a genotype's homozygous calls.
    ///
    /// Dosage 0 resolves to the reference allele, dosage 2 to the
    /// alternate; heterozygous or unread dosages leave the locus unread.
    pub fn set_from_genotype_if_missing(&mut self, genotype: &Genotype) -> Result<()> {
        check_lengths(self.len(), genotype.len())?;
        let (homo, extra) = (genotype.homo_words(), genotype.extra_words());
        let phase = self.phase.as_raw_mut_slice();
        let missing = self.missing.as_raw_mut_slice();
        for i in 0..phase.len() {
            phase[i] = (!missing[i] & phase[i]) | (missing[i] & homo[i] & extra[i]);
            missing[i] &= !homo[i];
        }
        Ok(())
    }

    /// Raw `u64` words of the allele plane.
    #[inline]
    pub(crate) fn phase_words(&self) -> &[u64] {
        self.phase.as_raw_slice()
    }

    /// Raw `u64` words of the presence plane.
    #[inline]
    pub(crate) fn missing_words(&self) -> &[u64] {
        self.missing.as_raw_slice()
    }
}

/// Canonical text form: space-separated decimal codes in locus order.
impl fmt::Display for Haplotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for allele in self.iter() {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{allele}")?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for Haplotype {
    type Err = HaplokitError;

    fn from_str(s: &str) -> Result<Self> {
        let codes = s
            .split_whitespace()
            .map(|token| {
                token
                    .parse::<u8>()
                    .map_err(|_| HaplokitError::parse(format!("invalid call token `{token}`")))
            })
            .collect::<Result<Vec<u8>>>()?;
        Self::from_codes(&codes)
    }
}
