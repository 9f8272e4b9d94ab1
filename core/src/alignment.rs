//! Per-sample sequence alignments.
//!
//! An [`Alignment`] holds a reference sequence and one sequence per sample, each a list of
//! symbols borrowed from the records they were built from. All sequences have the same number
//! of symbols.

use std::fmt;

use indexmap::IndexMap;

use crate::{
    genotype::{self, AlleleSelector, CodonCall, Genotype},
    Header, VariantRecord,
};

/// Name of the reference sequence.
pub const REFERENCE: &str = "reference";

/// Base-level symbol for missing data.
pub const MISSING_BASE: &str = "?";

/// Codon-level symbol for missing data.
pub const MISSING_CODON: &str = "???";

/// Reference and per-sample sequences.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Alignment<'a> {
    reference: Vec<&'a str>,
    samples: IndexMap<&'a str, Vec<&'a str>>,
}

impl<'a> Alignment<'a> {
    fn new(header: &'a Header) -> Self {
        Self {
            reference: Vec::new(),
            samples: header
                .samples()
                .iter()
                .map(|name| (name.as_str(), Vec::new()))
                .collect(),
        }
    }

    /// Builds base-level sequences.
    ///
    /// For every record, the reference sequence receives REF, and each sample receives REF for
    /// genotype `0`, the `k`th ALT allele for genotype `k`, and [`MISSING_BASE`] for missing
    /// genotypes.
    ///
    /// # Errors
    ///
    /// If a record does not have one genotype per sample, if a genotype cannot be decoded, or if
    /// a genotype refers to an ALT allele that does not exist.
    pub fn from_bases<I>(
        header: &'a Header,
        records: I,
        selector: AlleleSelector,
    ) -> Result<Self, Error>
    where
        I: IntoIterator<Item = &'a VariantRecord>,
    {
        let mut alignment = Self::new(header);

        for record in records {
            alignment.check_sample_count(record)?;

            let reference = record.reference.as_str();
            alignment.reference.push(reference);

            for (sequence, call) in alignment.samples.values_mut().zip(&record.genotypes) {
                let genotype =
                    genotype::decode(call, selector).map_err(|e| Error::genotype(record, e))?;

                let symbol = match genotype {
                    Genotype::Missing => MISSING_BASE,
                    Genotype::Allele(0) => reference,
                    Genotype::Allele(k) => record
                        .alternates
                        .get(k - 1)
                        .map(String::as_str)
                        .ok_or_else(|| Error::AlleleOutOfRange {
                            locus: record.locus(),
                            allele: k,
                            alternates: record.alternates.len(),
                        })?,
                };

                sequence.push(symbol);
            }
        }

        Ok(alignment)
    }

    /// Builds codon-level sequences.
    ///
    /// Only records with codons contribute. For those, the reference sequence receives the
    /// reference codon, and each sample receives the reference codon for genotype `0`, the
    /// alternate codon for any other integer genotype, and [`MISSING_CODON`] for missing
    /// genotypes. The result is therefore generally not aligned with the base-level sequences.
    ///
    /// # Errors
    ///
    /// If a record does not have one genotype per sample, or if a genotype is not `.` or an
    /// integer.
    pub fn from_codons<I>(header: &'a Header, records: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = &'a VariantRecord>,
    {
        let mut alignment = Self::new(header);

        for record in records {
            alignment.check_sample_count(record)?;

            if record.codons.is_empty() {
                continue;
            }

            let reference = record.codons.reference.as_str();
            let alternate = record.codons.alternate.as_str();
            alignment.reference.push(reference);

            for (sequence, call) in alignment.samples.values_mut().zip(&record.genotypes) {
                let symbol = match genotype::decode_codon_call(call)
                    .map_err(|e| Error::genotype(record, e))?
                {
                    CodonCall::Missing => MISSING_CODON,
                    CodonCall::Reference => reference,
                    CodonCall::Alternate => alternate,
                };

                sequence.push(symbol);
            }
        }

        Ok(alignment)
    }

    fn check_sample_count(&self, record: &VariantRecord) -> Result<(), Error> {
        if record.genotypes.len() == self.samples.len() {
            Ok(())
        } else {
            Err(Error::SampleCountMismatch {
                locus: record.locus(),
                samples: self.samples.len(),
                genotypes: record.genotypes.len(),
            })
        }
    }

    /// Returns the reference sequence.
    pub fn reference(&self) -> &[&'a str] {
        &self.reference
    }

    /// Returns the sequence of a sample.
    pub fn get(&self, sample: &str) -> Option<&[&'a str]> {
        self.samples.get(sample).map(Vec::as_slice)
    }

    /// Returns the number of symbols in each sequence.
    pub fn len(&self) -> usize {
        self.reference.len()
    }

    /// Returns `true` if the sequences contain no symbols.
    pub fn is_empty(&self) -> bool {
        self.reference.is_empty()
    }

    /// Returns an iterator over named sequences, starting with the reference sequence and
    /// followed by samples in header order.
    pub fn sequences(&self) -> impl Iterator<Item = (&'a str, &[&'a str])> {
        std::iter::once((REFERENCE, self.reference.as_slice())).chain(
            self.samples
                .iter()
                .map(|(&name, sequence)| (name, sequence.as_slice())),
        )
    }
}

/// An error associated with building an alignment.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// Record genotype count differs from header sample count.
    SampleCountMismatch {
        /// The record locus.
        locus: String,
        /// Number of samples in header.
        samples: usize,
        /// Number of genotypes in record.
        genotypes: usize,
    },
    /// Genotype could not be decoded.
    Genotype {
        /// The record locus.
        locus: String,
        /// The decoding error.
        error: genotype::Error,
    },
    /// Genotype refers to a non-existent ALT allele.
    AlleleOutOfRange {
        /// The record locus.
        locus: String,
        /// The genotype allele index.
        allele: usize,
        /// Number of ALT alleles.
        alternates: usize,
    },
}

impl Error {
    fn genotype(record: &VariantRecord, error: genotype::Error) -> Self {
        Self::Genotype {
            locus: record.locus(),
            error,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::SampleCountMismatch {
                locus,
                samples,
                genotypes,
            } => write!(
                f,
                "number of samples in the header and genotypes in record {locus} do not match \
                ({samples} - {genotypes})"
            ),
            Error::Genotype { locus, error } => write!(f, "{error} in record {locus}"),
            Error::AlleleOutOfRange {
                locus,
                allele,
                alternates,
            } => write!(
                f,
                "genotype {allele} in record {locus} exceeds the {alternates} ALT allele(s)"
            ),
        }
    }
}

impl std::error::Error for Error {}
