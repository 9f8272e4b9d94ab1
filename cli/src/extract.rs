use std::path::PathBuf;

use anyhow::{anyhow, Error};

use clap::Args;

use vcf_fa_core::{genotype::AlleleSelector, Config};

mod runner;
use runner::Runner;

/// Extract sequences from VCF.
#[derive(Args, Debug)]
pub struct Extract {
    /// Input VCF file.
    ///
    /// If no file is provided, stdin will be used. Gzip- and BGZF-compressed input is
    /// supported.
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output FASTA file.
    ///
    /// By default, the output is written next to the input, with the extension replaced by
    /// '.fa'. If input is read from stdin, the output is written to stdout.
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output a delimited annotation data table to a file.
    ///
    /// The table has one row per record read, with the chromosome, position, EFF annotation
    /// fields, and two yes/no sample flags. Annotation fields are empty unless '--snpeff' is
    /// used.
    #[arg(short = 't', long, value_name = "FILE")]
    pub table: Option<PathBuf>,

    /// Delimiter between table columns.
    #[arg(long, default_value_t = ',', value_name = "CHAR")]
    pub delimiter: char,

    /// QUAL cutoff.
    ///
    /// Only records with QUAL strictly greater than the cutoff are used for sequences.
    #[arg(short = 'q', long, allow_negative_numbers = true, value_name = "FLOAT")]
    pub quality: Option<f64>,

    /// Distance filter.
    ///
    /// Only records more than this number of bases from their neighbouring records are used for
    /// sequences.
    #[arg(short = 'd', long, value_name = "INT")]
    pub distance: Option<u64>,

    /// Parse the SnpEff EFF INFO field and output a codon alignment into the specified file.
    #[arg(short = 's', long, value_name = "FILE")]
    pub snpeff: Option<PathBuf>,

    /// Which allele of a '/'-separated genotype to use.
    #[arg(
        long,
        default_value_t = 1,
        value_parser = clap::value_parser!(u8).range(1..=2),
        value_name = "1|2"
    )]
    pub genotype: u8,

    /// Output empty codons for records where the EFF effect is STOP_GAINED.
    #[arg(short = 'n', long)]
    pub nostop: bool,
}

impl Extract {
    pub fn config(&self) -> Result<Config, Error> {
        let allele = AlleleSelector::try_from(self.genotype)
            .map_err(|genotype| anyhow!("invalid genotype allele {genotype}, expected 1 or 2"))?;

        Ok(Config::default()
            .set_quality(self.quality)
            .set_distance(self.distance)
            .set_annotation(self.snpeff.is_some())
            .set_suppress_stop_gained(self.nostop)
            .set_allele(allele))
    }

    pub fn run(self) -> Result<(), Error> {
        let mut runner = Runner::try_from(&self)?;

        runner.run()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::error::ErrorKind as ClapErrorKind;

    use crate::tests::{parse_args, try_parse_args};

    #[test]
    fn test_defaults() -> Result<(), Error> {
        let args = parse_args("vcf-fa input.vcf").extract;

        assert_eq!(args.input, Some(PathBuf::from("input.vcf")));
        assert_eq!(args.delimiter, ',');
        assert_eq!(args.config()?, Config::default());

        Ok(())
    }

    #[test]
    fn test_config() -> Result<(), Error> {
        let args = parse_args(
            "vcf-fa -q 20 -d 10 -s codons.fa --genotype 2 -n -o out.fa input.vcf",
        )
        .extract;

        assert_eq!(args.output, Some(PathBuf::from("out.fa")));
        assert_eq!(
            args.config()?,
            Config::default()
                .set_quality(Some(20.0))
                .set_distance(Some(10))
                .set_annotation(true)
                .set_suppress_stop_gained(true)
                .set_allele(AlleleSelector::Second)
        );

        Ok(())
    }

    #[test]
    fn test_genotype_out_of_range() {
        let result = try_parse_args("vcf-fa --genotype 3 input.vcf");

        assert_eq!(result.unwrap_err().kind(), ClapErrorKind::ValueValidation);
    }

    #[test]
    fn test_distance_not_negative() {
        let result = try_parse_args("vcf-fa -d=-1 input.vcf");

        assert_eq!(result.unwrap_err().kind(), ClapErrorKind::ValueValidation);
    }

    #[test]
    fn test_negative_quality() -> Result<(), Error> {
        let args = parse_args("vcf-fa -q -5 input.vcf").extract;

        assert_eq!(args.config()?, Config::default().set_quality(Some(-5.0)));

        Ok(())
    }
}
