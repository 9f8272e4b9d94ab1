//! Functional annotation from the `EFF` INFO sub-field.
//!
//! The expected encoding is
//!
//! ```text
//! EFF=Effect(Effect_Impact|Functional_Class|Codon_Change|Amino_Acid_Change|Amino_Acid_Length|
//!            Gene_Name|Gene_BioType|Coding|Transcript|Exon|GenotypeNum[|ERRORS|WARNINGS])
//! ```
//!
//! Only the first effect of the first `EFF` sub-field of a record is used.

use std::fmt;

use nom::{
    bytes::complete::{is_not, tag, take_until},
    character::complete::char,
    sequence::{delimited, pair, preceded},
    IResult,
};

const KEY: &str = "EFF";

/// Number of pipe-delimited fields required inside the parentheses.
const REQUIRED_FIELDS: usize = 11;

/// Number of columns in an annotation table row.
pub const COLUMNS: usize = 13;

/// Table row used for records without annotation.
pub const EMPTY_COLUMNS: [&str; COLUMNS] = [""; COLUMNS];

/// Effect name of a variant introducing a stop codon.
pub const STOP_GAINED: &str = "STOP_GAINED";

/// A reference and alternate codon.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct CodonPair {
    /// Reference codon.
    pub reference: String,
    /// Alternate codon.
    pub alternate: String,
}

impl CodonPair {
    /// Creates a new codon pair.
    pub fn new<S, T>(reference: S, alternate: T) -> Self
    where
        S: ToString,
        T: ToString,
    {
        Self {
            reference: reference.to_string(),
            alternate: alternate.to_string(),
        }
    }

    /// Returns `true` if neither codon is set.
    pub fn is_empty(&self) -> bool {
        self.reference.is_empty() && self.alternate.is_empty()
    }

    fn parse(codon_change: &str) -> Result<Self, ParseError> {
        let codon_change = codon_change.trim();

        if codon_change.is_empty() {
            return Ok(Self::default());
        }

        match codon_change.split_once('/') {
            Some((reference, alternate)) if !alternate.contains('/') => {
                Ok(Self::new(reference.trim(), alternate.trim()))
            }
            _ => Err(ParseError::InvalidCodonChange {
                value: codon_change.to_string(),
            }),
        }
    }
}

/// Which of the two samples in the annotation carries the variant.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum GenotypeNumber {
    /// The first sample.
    One,
    /// The second sample.
    Two,
}

impl GenotypeNumber {
    fn from_field(s: &str) -> Option<Self> {
        match s {
            "1" => Some(Self::One),
            "2" => Some(Self::Two),
            _ => None,
        }
    }

    /// Returns the `yes`/`no` presence flags for sample one and sample two.
    pub fn flags(&self) -> [&'static str; 2] {
        match self {
            Self::One => ["yes", "no"],
            Self::Two => ["no", "yes"],
        }
    }
}

/// Annotation of a single variant effect.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Annotation {
    /// Predicted effect, e.g. `SYNONYMOUS_CODING`.
    pub effect: String,
    /// Effect impact.
    pub impact: String,
    /// Functional class.
    pub functional_class: String,
    /// Raw codon change, e.g. `ggT/ggC`.
    pub codon_change: String,
    /// Amino acid change.
    pub amino_acid_change: String,
    /// Amino acid length.
    pub amino_acid_length: String,
    /// Gene name.
    pub gene_name: String,
    /// Gene biotype.
    pub gene_biotype: String,
    /// Coding status.
    pub coding: String,
    /// Transcript.
    pub transcript: String,
    /// Exon.
    pub exon: String,
    /// Sample carrying the variant, if given as `1` or `2`.
    pub genotype: Option<GenotypeNumber>,
    /// Codons split from the codon change.
    pub codons: CodonPair,
}

impl Annotation {
    /// Returns `true` if the effect is [`STOP_GAINED`].
    pub fn is_stop_gained(&self) -> bool {
        self.effect == STOP_GAINED
    }

    /// Returns the annotation as a table row.
    ///
    /// Sample flags are left empty if no genotype number was given.
    pub fn columns(&self) -> [&str; COLUMNS] {
        let [one, two] = self.genotype.map(|g| g.flags()).unwrap_or(["", ""]);

        [
            self.effect.as_str(),
            self.impact.as_str(),
            self.functional_class.as_str(),
            self.codon_change.as_str(),
            self.amino_acid_change.as_str(),
            self.amino_acid_length.as_str(),
            self.gene_name.as_str(),
            self.gene_biotype.as_str(),
            self.coding.as_str(),
            self.transcript.as_str(),
            self.exon.as_str(),
            one,
            two,
        ]
    }

    fn from_entry(effect: &str, body: &str) -> Result<Self, ParseError> {
        let fields = body.split('|').collect::<Vec<_>>();

        if fields.len() < REQUIRED_FIELDS {
            return Err(ParseError::TooFewFields {
                found: fields.len(),
            });
        }

        Ok(Self {
            effect: effect.to_string(),
            impact: fields[0].to_string(),
            functional_class: fields[1].to_string(),
            codon_change: fields[2].to_string(),
            amino_acid_change: fields[3].to_string(),
            amino_acid_length: fields[4].to_string(),
            gene_name: fields[5].to_string(),
            gene_biotype: fields[6].to_string(),
            coding: fields[7].to_string(),
            transcript: fields[8].to_string(),
            exon: fields[9].to_string(),
            genotype: GenotypeNumber::from_field(fields[10]),
            codons: CodonPair::parse(fields[2])?,
        })
    }
}

fn effect_entry(input: &str) -> IResult<&str, (&str, &str)> {
    preceded(
        tag("EFF="),
        pair(take_until("("), delimited(char('('), is_not(")"), char(')'))),
    )(input)
}

/// Parses the annotation from a raw INFO string.
///
/// Sub-fields are scanned in order and the first with key `EFF` is used; any later ones are
/// ignored. Returns `Ok(None)` if no such sub-field exists.
pub fn parse_info(info: &str) -> Result<Option<Annotation>, ParseError> {
    let Some(item) = info.split(';').find(|item| {
        let key = item.split_once('=').map_or(*item, |(key, _)| key);
        key == KEY
    }) else {
        return Ok(None);
    };

    let (_, (effect, body)) = effect_entry(item).map_err(|_| ParseError::Malformed {
        value: item.to_string(),
    })?;

    Annotation::from_entry(effect, body).map(Some)
}

/// An error associated with parsing an annotation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// Sub-field does not follow `EFF=Effect(...)`.
    Malformed {
        /// The raw sub-field.
        value: String,
    },
    /// Fewer pipe-delimited fields than required.
    TooFewFields {
        /// The number of fields found.
        found: usize,
    },
    /// Codon change is not of the form `ref/alt`.
    InvalidCodonChange {
        /// The raw codon change.
        value: String,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Malformed { value } => write!(f, "malformed EFF field '{value}'"),
            ParseError::TooFewFields { found } => write!(
                f,
                "EFF field has {found} sub-fields, expected at least {REQUIRED_FIELDS}"
            ),
            ParseError::InvalidCodonChange { value } => {
                write!(f, "invalid EFF codon change '{value}'")
            }
        }
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    const INFO: &str = "AB=0;AC=2;TYPE=snp;technology.ILLUMINA=1;\
        EFF=SYNONYMOUS_CODING(LOW|SILENT|ggT/ggC|G91|716|Vch1786_I0103||CODING|Vch1786_I0103|1|1)";

    #[test]
    fn test_parse_info() -> Result<(), ParseError> {
        let annotation = parse_info(INFO)?.expect("annotation");

        assert_eq!(annotation.effect, "SYNONYMOUS_CODING");
        assert_eq!(annotation.impact, "LOW");
        assert_eq!(annotation.functional_class, "SILENT");
        assert_eq!(annotation.codon_change, "ggT/ggC");
        assert_eq!(annotation.amino_acid_change, "G91");
        assert_eq!(annotation.amino_acid_length, "716");
        assert_eq!(annotation.gene_name, "Vch1786_I0103");
        assert_eq!(annotation.gene_biotype, "");
        assert_eq!(annotation.coding, "CODING");
        assert_eq!(annotation.transcript, "Vch1786_I0103");
        assert_eq!(annotation.exon, "1");
        assert_eq!(annotation.genotype, Some(GenotypeNumber::One));
        assert_eq!(annotation.codons, CodonPair::new("ggT", "ggC"));

        Ok(())
    }

    #[test]
    fn test_parse_info_is_idempotent() -> Result<(), ParseError> {
        assert_eq!(parse_info(INFO)?, parse_info(INFO)?);

        Ok(())
    }

    #[test]
    fn test_parse_info_columns() -> Result<(), ParseError> {
        let info = "EFF=NON_SYNONYMOUS_CODING(MODERATE|MISSENSE|aCc/aTc|T34I|197|g||CODING|t|1|2)";
        let annotation = parse_info(info)?.expect("annotation");

        assert_eq!(
            annotation.columns(),
            [
                "NON_SYNONYMOUS_CODING",
                "MODERATE",
                "MISSENSE",
                "aCc/aTc",
                "T34I",
                "197",
                "g",
                "",
                "CODING",
                "t",
                "1",
                "no",
                "yes"
            ]
        );

        Ok(())
    }

    #[test]
    fn test_parse_info_unset_genotype_number() -> Result<(), ParseError> {
        let info = "EFF=SYNONYMOUS_CODING(LOW|SILENT|aaA/aaG|K1|1|g||CODING|t|1|)";
        let annotation = parse_info(info)?.expect("annotation");

        assert_eq!(annotation.genotype, None);
        assert_eq!(annotation.columns()[11..], ["", ""]);

        Ok(())
    }

    #[test]
    fn test_parse_info_without_eff() -> Result<(), ParseError> {
        assert_eq!(parse_info("AB=0;AC=2;TYPE=snp")?, None);
        assert_eq!(parse_info("")?, None);

        Ok(())
    }

    #[test]
    fn test_parse_info_key_must_match_exactly() -> Result<(), ParseError> {
        assert_eq!(parse_info("EFFECTS=1;LOF=(a|b)")?, None);

        Ok(())
    }

    #[test]
    fn test_parse_info_first_eff_wins() -> Result<(), ParseError> {
        let info = "EFF=STOP_GAINED(HIGH|NONSENSE|Cag/Tag|Q5*|100|g||CODING|t|1|1);\
            EFF=SYNONYMOUS_CODING(LOW|SILENT|aaA/aaG|K1|1|g||CODING|t|1|2)";
        let annotation = parse_info(info)?.expect("annotation");

        assert_eq!(annotation.effect, "STOP_GAINED");
        assert!(annotation.is_stop_gained());
        assert_eq!(annotation.codons, CodonPair::new("Cag", "Tag"));

        Ok(())
    }

    #[test]
    fn test_parse_info_first_effect_of_list() -> Result<(), ParseError> {
        let info = "EFF=SYNONYMOUS_CODING(LOW|SILENT|aaA/aaG|K1|1|g||CODING|t|1|1),\
            UPSTREAM(MODIFIER|||||h||CODING|u||1)";
        let annotation = parse_info(info)?.expect("annotation");

        assert_eq!(annotation.effect, "SYNONYMOUS_CODING");
        assert_eq!(annotation.genotype, Some(GenotypeNumber::One));

        Ok(())
    }

    #[test]
    fn test_parse_info_extra_fields() -> Result<(), ParseError> {
        let info = "EFF=SYNONYMOUS_CODING(LOW|SILENT|aaA/aaG|K1|1|g||CODING|t|1|2|ERR|WARN)";
        let annotation = parse_info(info)?.expect("annotation");

        assert_eq!(annotation.genotype, Some(GenotypeNumber::Two));

        Ok(())
    }

    #[test]
    fn test_parse_info_trims_codons() -> Result<(), ParseError> {
        let info = "EFF=SYNONYMOUS_CODING(LOW|SILENT| aaA / aaG |K1|1|g||CODING|t|1|1)";
        let annotation = parse_info(info)?.expect("annotation");

        assert_eq!(annotation.codons, CodonPair::new("aaA", "aaG"));

        Ok(())
    }

    #[test]
    fn test_parse_info_empty_codon_change() -> Result<(), ParseError> {
        let info = "EFF=INTERGENIC(MODIFIER|||||||||||1)";
        let annotation = parse_info(info)?.expect("annotation");

        assert!(annotation.codons.is_empty());

        Ok(())
    }

    #[test]
    fn test_parse_info_too_few_fields() {
        assert_eq!(
            parse_info("EFF=SYNONYMOUS_CODING(LOW|SILENT|aaA/aaG)"),
            Err(ParseError::TooFewFields { found: 3 })
        );
    }

    #[test]
    fn test_parse_info_malformed() {
        assert!(matches!(
            parse_info("EFF=SYNONYMOUS_CODING"),
            Err(ParseError::Malformed { .. })
        ));
        assert!(matches!(
            parse_info("DP=10;EFF"),
            Err(ParseError::Malformed { .. })
        ));
    }

    #[test]
    fn test_parse_info_invalid_codon_change() {
        assert_eq!(
            parse_info("EFF=X(LOW|SILENT|aaA|K1|1|g||CODING|t|1|1)"),
            Err(ParseError::InvalidCodonChange {
                value: String::from("aaA")
            })
        );
    }
}
