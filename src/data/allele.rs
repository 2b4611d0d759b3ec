//! # Per-Locus Call Values
//!
//! `Allele` (haplotype element) and `Dosage` (genotype element) as tagged
//! values. The integer wire convention — `0`/`1` alleles, `0`/`1`/`2`
//! dosages, `9` for an unread call — is decoded at the boundary by
//! `from_code`; internal logic never handles the sentinel as a magic
//! number.

use std::fmt;
use std::ops::Add;

use crate::error::{HaplokitError, Result};

/// Integer code reserved for an unread call in the wire convention.
pub const MISSING_CODE: u8 = 9;

/// A single allele call at a marker locus on one chromosome copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Allele {
    /// The reference allele (code `0`)
    Reference,
    /// The alternate allele (code `1`)
    Alternate,
    /// Unread call (code `9`)
    Missing,
}

impl Allele {
    /// Decode an integer wire code into an allele call.
    ///
    /// Anything outside `{0, 1, 9}` is rejected.
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            0 => Ok(Self::Reference),
            1 => Ok(Self::Alternate),
            MISSING_CODE => Ok(Self::Missing),
            other => Err(HaplokitError::invalid_value(other)),
        }
    }

    /// Encode back to the integer wire code.
    pub fn code(self) -> u8 {
        match self {
            Self::Reference => 0,
            Self::Alternate => 1,
            Self::Missing => MISSING_CODE,
        }
    }

    /// Whether this call is unread.
    #[inline]
    pub fn is_missing(self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl fmt::Display for Allele {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Elementwise sum with missing propagation: two known alleles add to a
/// dosage, any unread side yields an unread dosage.
impl Add for Allele {
    type Output = Dosage;

    fn add(self, other: Allele) -> Dosage {
        match (self, other) {
            (Allele::Missing, _) | (_, Allele::Missing) => Dosage::Missing,
            (Allele::Reference, Allele::Reference) => Dosage::HomRef,
            (Allele::Alternate, Allele::Alternate) => Dosage::HomAlt,
            _ => Dosage::Het,
        }
    }
}

/// The combined alternate-allele count at a locus across both chromosome
/// copies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dosage {
    /// Homozygous reference (code `0`)
    HomRef,
    /// Heterozygous, either phase (code `1`)
    Het,
    /// Homozygous alternate (code `2`)
    HomAlt,
    /// Unread call (code `9`)
    Missing,
}

impl Dosage {
    /// Decode an integer wire code into a dosage call.
    ///
    /// Anything outside `{0, 1, 2, 9}` is rejected.
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            0 => Ok(Self::HomRef),
            1 => Ok(Self::Het),
            2 => Ok(Self::HomAlt),
            MISSING_CODE => Ok(Self::Missing),
            other => Err(HaplokitError::invalid_value(other)),
        }
    }

    /// Encode back to the integer wire code.
    pub fn code(self) -> u8 {
        match self {
            Self::HomRef => 0,
            Self::Het => 1,
            Self::HomAlt => 2,
            Self::Missing => MISSING_CODE,
        }
    }

    /// Whether this call is unread.
    #[inline]
    pub fn is_missing(self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Whether this call is heterozygous.
    #[inline]
    pub fn is_het(self) -> bool {
        matches!(self, Self::Het)
    }
}

impl fmt::Display for Dosage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
