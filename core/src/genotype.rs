//! Genotype call decoding.
//!
//! Two decoding contracts exist. [`decode`] is used for base-level sequences and supports
//! multiallelic calls and `/`-separated calls. [`decode_codon_call`] is used for codon-level
//! sequences, where the annotation only ever describes a single substitution, and expects a
//! bare integer or the missing sentinel.

use std::{fmt, str::FromStr};

/// The missing-data sentinel.
pub const MISSING: &str = ".";

/// Which allele of a `/`-separated call to use.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum AlleleSelector {
    /// The first allele, e.g. `1` in `1/0`.
    #[default]
    First,
    /// The second allele, e.g. `0` in `1/0`.
    Second,
}

impl AlleleSelector {
    fn select<'a>(&self, call: &'a str) -> Option<&'a str> {
        let mut alleles = call.split('/');

        match self {
            Self::First => alleles.next(),
            Self::Second => alleles.nth(1),
        }
    }
}

impl TryFrom<u8> for AlleleSelector {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::First),
            2 => Ok(Self::Second),
            other => Err(other),
        }
    }
}

/// A decoded base-level genotype.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Genotype {
    /// Missing data.
    Missing,
    /// Allele index, where zero is the reference allele and `k > 0` the `k`th alternate.
    Allele(usize),
}

/// Decodes a genotype call, already stripped of any `:`-separated sub-fields.
///
/// If the call contains `/`, the allele chosen by `selector` is decoded. Only a whole call of
/// [`MISSING`] is missing data.
///
/// # Errors
///
/// If the call is not [`MISSING`] and the (selected) allele is not a non-negative integer.
pub fn decode(call: &str, selector: AlleleSelector) -> Result<Genotype, Error> {
    if call == MISSING {
        return Ok(Genotype::Missing);
    }

    let allele = if call.contains('/') {
        selector.select(call).unwrap_or_default()
    } else {
        call
    };

    usize::from_str(allele)
        .map(Genotype::Allele)
        .map_err(|_| Error::invalid(call))
}

/// A decoded codon-level genotype call.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CodonCall {
    /// Missing data.
    Missing,
    /// Reference codon.
    Reference,
    /// Alternate codon.
    Alternate,
}

/// Decodes a genotype call for codon-level sequences.
///
/// Zero is the reference, and any other integer is the alternate.
///
/// # Errors
///
/// If the call is neither [`MISSING`] nor an integer.
pub fn decode_codon_call(call: &str) -> Result<CodonCall, Error> {
    if call == MISSING {
        return Ok(CodonCall::Missing);
    }

    match i64::from_str(call) {
        Ok(0) => Ok(CodonCall::Reference),
        Ok(_) => Ok(CodonCall::Alternate),
        Err(_) => Err(Error::invalid(call)),
    }
}

/// An error associated with decoding a genotype call.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Error {
    /// Call is not `.` or an integer.
    InvalidCall {
        /// The raw call.
        value: String,
    },
}

impl Error {
    fn invalid(call: &str) -> Self {
        Self::InvalidCall {
            value: call.to_string(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidCall { value } => write!(
                f,
                "genotype '{value}' is not '.' or an integer in the (0-n) range"
            ),
        }
    }
}

impl std::error::Error for Error {}
