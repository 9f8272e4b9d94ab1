//! VCF data records.

use std::{fmt, str::FromStr};

use crate::{
    annotation::{self, Annotation, CodonPair},
    header::FIXED_COLUMNS,
    Config,
};

const MISSING_QUALITY: &str = ".";

/// Number of columns a data line must have, up to and including INFO.
pub const REQUIRED_COLUMNS: usize = 8;

/// A single VCF data line.
#[derive(Clone, Debug, PartialEq)]
pub struct VariantRecord {
    /// Chromosome.
    pub chrom: String,
    /// 1-based position.
    pub pos: u64,
    /// Identifier.
    pub id: String,
    /// Reference allele.
    pub reference: String,
    /// Alternate alleles.
    pub alternates: Vec<String>,
    /// Quality, if not missing.
    pub qual: Option<f64>,
    /// Filter.
    pub filter: String,
    /// Raw INFO field.
    pub info: String,
    /// Format, empty if the line ends after INFO.
    pub format: String,
    /// Genotype calls, one per sample, stripped of any further `:`-separated sub-fields.
    pub genotypes: Vec<String>,
    /// Annotation, if parsed and present.
    pub annotation: Option<Annotation>,
    /// Codons used for codon-level sequences; empty if the record does not contribute.
    pub codons: CodonPair,
}

impl VariantRecord {
    /// Parses a record from a data line.
    ///
    /// If annotation is enabled in the configuration, the `EFF` INFO sub-field is parsed and its
    /// codons used, unless the effect is `STOP_GAINED` and stop suppression is enabled.
    pub fn parse(line: &str, config: &Config) -> Result<Self, ParseError> {
        let columns = line.trim().split('\t').collect::<Vec<_>>();

        if columns.len() < REQUIRED_COLUMNS {
            return Err(ParseError::TooFewColumns {
                found: columns.len(),
            });
        }

        let pos = u64::from_str(columns[1]).map_err(|_| ParseError::InvalidPosition {
            value: columns[1].to_string(),
        })?;

        let qual = parse_quality(columns[5])?;

        let info = columns[7];
        let annotation = if config.annotation() {
            annotation::parse_info(info)?
        } else {
            None
        };

        let codons = match &annotation {
            Some(annotation) if config.suppress_stop_gained() && annotation.is_stop_gained() => {
                CodonPair::default()
            }
            Some(annotation) => annotation.codons.clone(),
            None => CodonPair::default(),
        };

        let genotypes = columns
            .get(FIXED_COLUMNS..)
            .unwrap_or_default()
            .iter()
            .map(|field| {
                let field = field.trim();
                field.split_once(':').map_or(field, |(call, _)| call).to_string()
            })
            .collect();

        Ok(Self {
            chrom: columns[0].to_string(),
            pos,
            id: columns[2].to_string(),
            reference: columns[3].trim().to_string(),
            alternates: columns[4].trim().split(',').map(String::from).collect(),
            qual,
            filter: columns[6].to_string(),
            info: info.to_string(),
            format: columns.get(8).map_or_else(String::new, |s| s.to_string()),
            genotypes,
            annotation,
            codons,
        })
    }

    /// Returns the chromosome and position joined by `_`, used to identify the record in
    /// diagnostics.
    pub fn locus(&self) -> String {
        format!("{}_{}", self.chrom, self.pos)
    }

    /// Returns `true` if the record has no annotation with codons.
    pub fn lacks_annotated_codons(&self) -> bool {
        self.annotation
            .as_ref()
            .map_or(true, |annotation| annotation.codons.is_empty())
    }
}

fn parse_quality(s: &str) -> Result<Option<f64>, ParseError> {
    let s = s.replace(' ', "");

    if s == MISSING_QUALITY {
        Ok(None)
    } else {
        f64::from_str(&s)
            .map(Some)
            .map_err(|_| ParseError::InvalidQuality { value: s })
    }
}

/// An error associated with parsing a record.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// Line is too short.
    TooFewColumns {
        /// The number of columns found.
        found: usize,
    },
    /// POS is not a non-negative integer.
    InvalidPosition {
        /// The raw value.
        value: String,
    },
    /// QUAL is neither `.` nor a number.
    InvalidQuality {
        /// The raw value.
        value: String,
    },
    /// Annotation could not be parsed.
    Annotation(annotation::ParseError),
    /// Line is not valid UTF-8.
    InvalidUtf8,
}

impl From<annotation::ParseError> for ParseError {
    fn from(e: annotation::ParseError) -> Self {
        Self::Annotation(e)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::TooFewColumns { found } => write!(
                f,
                "record has {found} columns, expected at least {REQUIRED_COLUMNS}"
            ),
            ParseError::InvalidPosition { value } => write!(f, "invalid position '{value}'"),
            ParseError::InvalidQuality { value } => write!(f, "invalid quality '{value}'"),
            ParseError::Annotation(e) => write!(f, "{e}"),
            ParseError::InvalidUtf8 => f.write_str("line is not valid UTF-8"),
        }
    }
}

impl std::error::Error for ParseError {}
