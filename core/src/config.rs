//! Run configuration.

use crate::genotype::AlleleSelector;

/// Configuration shared by all stages of an extraction.
///
/// Built once and passed by reference; no stage modifies it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Config {
    quality: Option<f64>,
    distance: Option<u64>,
    annotation: bool,
    suppress_stop_gained: bool,
    allele: AlleleSelector,
}

impl Config {
    /// Returns the QUAL cutoff, if quality filtering is enabled.
    pub fn quality(&self) -> Option<f64> {
        self.quality
    }

    /// Returns the minimum spacing between positions, if distance filtering is enabled.
    pub fn distance(&self) -> Option<u64> {
        self.distance
    }

    /// Returns `true` if `EFF` annotation should be parsed.
    pub fn annotation(&self) -> bool {
        self.annotation
    }

    /// Returns `true` if codons of `STOP_GAINED` records should be left empty.
    pub fn suppress_stop_gained(&self) -> bool {
        self.suppress_stop_gained
    }

    /// Returns the allele used for `/`-separated genotype calls.
    pub fn allele(&self) -> AlleleSelector {
        self.allele
    }

    /// Sets the QUAL cutoff.
    ///
    /// Records are retained if their QUAL is strictly greater than the cutoff. By default,
    /// no quality filtering is performed.
    pub fn set_quality(mut self, quality: Option<f64>) -> Self {
        self.quality = quality;
        self
    }

    /// Sets the minimum spacing between positions.
    ///
    /// By default, no distance filtering is performed.
    pub fn set_distance(mut self, distance: Option<u64>) -> Self {
        self.distance = distance;
        self
    }

    /// Sets whether to parse `EFF` annotation.
    pub fn set_annotation(mut self, annotation: bool) -> Self {
        self.annotation = annotation;
        self
    }

    /// Sets whether to leave codons empty for `STOP_GAINED` records.
    pub fn set_suppress_stop_gained(mut self, suppress_stop_gained: bool) -> Self {
        self.suppress_stop_gained = suppress_stop_gained;
        self
    }

    /// Sets the allele used for `/`-separated genotype calls.
    pub fn set_allele(mut self, allele: AlleleSelector) -> Self {
        self.allele = allele;
        self
    }
}
