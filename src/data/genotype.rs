//! # Genotype Value Type
//!
//! An ordered, fixed-length sequence of per-locus dosage calls, stored as
//! two bit planes over `u64` words:
//!
//! ```text
//! dosage    homo   extra
//! 0         1      0
//! 1         0      0
//! 2         1      1
//! MISSING   0      1
//! ```
//!
//! The encoding makes the hot predicates one or two bitwise ops: a locus is
//! called iff `homo | !extra`, heterozygous iff `!homo & !extra`, and two
//! genotypes are opposite homozygotes iff `homo & homo' & (extra ^ extra')`.
//! Comparison methods delegate to [`crate::model::intersect`] so that
//! one-off calls and panel-wide scans share one optimized code path.

use std::fmt;
use std::str::FromStr;

use bitvec::prelude::*;

use crate::data::allele::Dosage;
use crate::data::haplotype::Haplotype;
use crate::error::{check_index, check_lengths, check_range, HaplokitError, Result};
use crate::model::intersect;

/// A fixed-length sequence of dosage calls.
///
/// Length is fixed at construction; per-locus values are mutable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Genotype {
    /// Set where the call is homozygous (dosage 0 or 2)
    homo: BitVec<u64, Lsb0>,
    /// Disambiguation plane: set for dosage 2 and for unread calls
    extra: BitVec<u64, Lsb0>,
}

impl Genotype {
    /// Build from integer wire codes (`0`, `1`, `2`, or `9` for missing).
    pub fn from_codes(codes: &[u8]) -> Result<Self> {
        let mut genotype = Self::filled_missing(codes.len());
        for (i, &code) in codes.iter().enumerate() {
            genotype.write(i, Dosage::from_code(code)?);
        }
        Ok(genotype)
    }

    /// Build from already-decoded dosage calls.
    pub fn from_dosages(dosages: &[Dosage]) -> Self {
        let mut genotype = Self::filled_missing(dosages.len());
        for (i, &dosage) in dosages.iter().enumerate() {
            genotype.write(i, dosage);
        }
        genotype
    }

    /// A genotype of `len` loci, every call unread.
    pub fn filled_missing(len: usize) -> Self {
        Self {
            homo: bitvec![u64, Lsb0; 0; len],
            extra: bitvec![u64, Lsb0; 1; len],
        }
    }

    /// Derive from a pair of haplotypes of equal length: elementwise allele
    /// sum, with an unread call on either side propagating to an unread
    /// dosage.
    pub fn from_haplotypes(hap_a: &Haplotype, hap_b: &Haplotype) -> Result<Self> {
        check_lengths(hap_a.len(), hap_b.len())?;
        let len = hap_a.len();
        let (p1, m1) = (hap_a.phase_words(), hap_a.missing_words());
        let (p2, m2) = (hap_b.phase_words(), hap_b.missing_words());

        let mut homo = bitvec![u64, Lsb0; 0; len];
        let mut extra = bitvec![u64, Lsb0; 0; len];
        {
            let homo_words = homo.as_raw_mut_slice();
            let extra_words = extra.as_raw_mut_slice();
            let n_words = homo_words.len();
            for i in 0..n_words {
                let mask = intersect::word_mask(len, i, n_words);
                // sum is homozygous when both calls are read and agree
                homo_words[i] = (!m1[i] & !m2[i] & !(p1[i] ^ p2[i])) & mask;
                // canonical planes: phase is 0 at unread loci, so p1 & p2
                // only selects read 1+1 sums
                extra_words[i] = (m1[i] | m2[i] | (p1[i] & p2[i])) & mask;
            }
        }
        Ok(Self { homo, extra })
    }

    /// Number of marker loci.
    #[inline]
    pub fn len(&self) -> usize {
        self.homo.len()
    }

    /// Whether the genotype covers zero loci.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.homo.is_empty()
    }

    /// Read the call at locus `i`.
    pub fn get(&self, i: usize) -> Result<Dosage> {
        check_index(i, self.len())?;
        Ok(self.read(i))
    }

    /// Overwrite the call at locus `i`.
    pub fn set(&mut self, i: usize, dosage: Dosage) -> Result<()> {
        check_index(i, self.len())?;
        self.write(i, dosage);
        Ok(())
    }

    /// Whether the call at locus `i` is unread.
    pub fn is_missing(&self, i: usize) -> Result<bool> {
        Ok(self.get(i)?.is_missing())
    }

    #[inline]
    fn read(&self, i: usize) -> Dosage {
        match (self.homo[i], self.extra[i]) {
            (true, false) => Dosage::HomRef,
            (false, false) => Dosage::Het,
            (true, true) => Dosage::HomAlt,
            (false, true) => Dosage::Missing,
        }
    }

    #[inline]
    fn write(&mut self, i: usize, dosage: Dosage) {
        let (homo, extra) = match dosage {
            Dosage::HomRef => (true, false),
            Dosage::Het => (false, false),
            Dosage::HomAlt => (true, true),
            Dosage::Missing => (false, true),
        };
        self.homo.set(i, homo);
        self.extra.set(i, extra);
    }

    /// Iterate calls in locus order. Restartable: call again for a fresh
    /// pass.
    pub fn iter(&self) -> impl Iterator<Item = Dosage> + '_ {
        (0..self.len()).map(move |i| self.read(i))
    }

    /// Integer wire codes in locus order.
    pub fn to_codes(&self) -> Vec<u8> {
        self.iter().map(Dosage::code).collect()
    }

    /// Raw dosage values over the half-open window `[start, end)`.
    ///
    /// A plain ordered sequence for one-off reads; use
    /// [`Genotype::subset_genotype`] for a reusable typed window.
    pub fn slice(&self, start: usize, end: usize) -> Result<Vec<Dosage>> {
        check_range(start, end, self.len())?;
        Ok((start..end).map(|i| self.read(i)).collect())
    }

    /// A new genotype over the half-open window `[start, end)`.
    pub fn subset_genotype(&self, start: usize, end: usize) -> Result<Genotype> {
        check_range(start, end, self.len())?;
        let mut sub = Self::filled_missing(end - start);
        for (dst, src) in (start..end).enumerate() {
            sub.write(dst, self.read(src));
        }
        Ok(sub)
    }

    /// Could `hap` be one of the two haplotypes underlying this genotype?
    ///
    /// A locus is compatible when either side is unread, or the dosage
    /// admits the allele: dosage 0 with allele 0, dosage 2 with allele 1,
    /// dosage 1 with either allele.
    pub fn is_haplotype_compatible(&self, hap: &Haplotype) -> Result<bool> {
        Ok(self.count_incompatible(hap)? == 0)
    }

    /// Count loci where `hap` cannot underlie this genotype (dosage 0
    /// against allele 1, dosage 2 against allele 0).
    ///
    /// Pedigree callers apply their own tolerance on top of this count.
    pub fn count_incompatible(&self, hap: &Haplotype) -> Result<usize> {
        check_lengths(self.len(), hap.len())?;
        Ok(intersect::geno_hap_incompatible(self, hap))
    }

    /// Given one gamete, deduce the other.
    ///
    /// `c[i] = self[i] - hap[i]` wherever both calls are read and the
    /// difference is a valid allele; every other locus is unread.
    pub fn complement(&self, hap: &Haplotype) -> Result<Haplotype> {
        check_lengths(self.len(), hap.len())?;
        let len = self.len();
        let (h, e) = (self.homo_words(), self.extra_words());
        let (p, m) = (hap.phase_words(), hap.missing_words());

        let mut phase_plane = bitvec![u64, Lsb0; 0; len];
        let mut missing_plane = bitvec![u64, Lsb0; 0; len];
        {
            let phase_words = phase_plane.as_raw_mut_slice();
            let missing_words = missing_plane.as_raw_mut_slice();
            let n_words = phase_words.len();
            for i in 0..n_words {
                let mask = intersect::word_mask(len, i, n_words);
                // dosage 1 minus allele 0, or dosage 2 minus allele 1
                let phase = !m[i] & ((!h[i] & !e[i] & !p[i]) | (h[i] & e[i] & p[i]));
                // the subtraction lands in {0, 1}: dosage 0 - allele 0,
                // dosage 1 - either allele, dosage 2 - allele 1
                let valid = !m[i]
                    & ((h[i] & !e[i] & !p[i]) | (!h[i] & !e[i]) | (h[i] & e[i] & p[i]));
                phase_words[i] = phase & mask;
                missing_words[i] = !valid & mask;
            }
        }
        Ok(Haplotype::from_planes(phase_plane, missing_plane))
    }

    /// Count loci where the two genotypes are opposite homozygotes
    /// (dosage 0 against dosage 2). Heterozygous or unread calls never
    /// contribute.
    pub fn count_mismatches(&self, other: &Genotype) -> Result<usize> {
        check_lengths(self.len(), other.len())?;
        Ok(intersect::geno_opposite_homozygotes(self, other))
    }

    /// Count loci where the two genotypes differ, with unread compared as
    /// an ordinary value (two unread calls are equal).
    pub fn count_not_equal(&self, other: &Genotype) -> Result<usize> {
        check_lengths(self.len(), other.len())?;
        Ok(intersect::geno_not_equal(self, other))
    }

    /// Count loci where the two genotypes differ, skipping loci where
    /// either side is unread.
    pub fn count_not_equal_exclude_missing(&self, other: &Genotype) -> Result<usize> {
        check_lengths(self.len(), other.len())?;
        Ok(intersect::geno_not_equal_exclude_missing(self, other))
    }

    /// Number of heterozygous loci.
    pub fn num_het(&self) -> usize {
        intersect::count_binary(self.len(), self.homo_words(), self.extra_words(), |h, e| {
            !h & !e
        })
    }

    /// Number of unread loci.
    pub fn count_missing(&self) -> usize {
        intersect::count_binary(self.len(), self.homo_words(), self.extra_words(), |h, e| {
            !h & e
        })
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

    /// Fill unread loci from another genotype's calls.
    ///
    /// Idempotent: a second call with the same donor changes nothing.
    pub fn set_from_other_if_missing(&mut self, other: &Genotype) -> Result<()> {
        check_lengths(self.len(), other.len())?;
        let (h_other, e_other) = (other.homo_words(), other.extra_words());
        let homo = self.homo.as_raw_mut_slice();
        let extra = self.extra.as_raw_mut_slice();
        for i in 0..homo.len() {
            let miss = !homo[i] & extra[i];
            homo[i] |= miss & h_other[i];
            extra[i] = (extra[i] & !miss) | (e_other[i] & miss);
        }
        Ok(())
    }

    /// Fill unread loci with the allele sum of two haplotypes, at loci
    /// where both haplotype calls are read.
    ///
    /// Everything else — called loci, and unread loci the haplotypes cannot
    /// resolve — is untouched.
    pub fn set_from_haplotypes_if_missing(
        &mut self,
        hap_a: &Haplotype,
        hap_b: &Haplotype,
    ) -> Result<()> {
        check_lengths(self.len(), hap_a.len())?;
        let summed = Genotype::from_haplotypes(hap_a, hap_b)?;
        self.set_from_other_if_missing(&summed)
    }

    /// Raw `u64` words of the homozygosity plane.
    #[inline]
    pub(crate) fn homo_words(&self) -> &[u64] {
        self.homo.as_raw_slice()
    }

    /// Raw `u64` words of the disambiguation plane.
    #[inline]
    pub(crate) fn extra_words(&self) -> &[u64] {
        self.extra.as_raw_slice()
    }
}

/// Canonical text form: space-separated decimal codes in locus order.
impl fmt::Display for Genotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for dosage in self.iter() {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{dosage}")?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for Genotype {
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
