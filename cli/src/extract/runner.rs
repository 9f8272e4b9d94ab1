use std::{
    fs::File,
    io::{self, Write as _},
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context, Error};

use vcf_fa_core::{
    filter,
    io::{write_fasta, write_table},
    Alignment, Input, ReadStatus, Reader, VariantRecord,
};

use super::Extract;

pub struct Runner {
    reader: Reader<Box<dyn io::BufRead>>,
    output: Output,
    table: Option<PathBuf>,
    codons: Option<PathBuf>,
    delimiter: u8,
}

impl Runner {
    pub fn run(&mut self) -> Result<(), Error> {
        let records = self.read_records()?;

        let config = self.reader.config();
        let header = self.reader.header();

        if let Some(path) = &self.table {
            log::info!("Writing data table to '{}'", path.display());

            write_table(create(path)?, &records, self.delimiter)?;
        }

        if let Some(quality) = config.quality() {
            log::info!("Quality cutoff: {quality}");
        }
        if let Some(distance) = config.distance() {
            log::info!("Distance filter: {distance}");
        }

        let filtered = filter::apply(&records, config);
        log::info!(
            "After filtering {} entries remain, {} entries were discarded",
            filtered.len(),
            records.len() - filtered.len()
        );

        let alignment = Alignment::from_bases(header, filtered.iter().copied(), config.allele())?;
        log::info!("Writing fasta data to {}", self.output);
        let mut writer = self.output.create()?;
        write_fasta(&mut writer, &alignment)?;
        writer.flush()?;

        if let Some(path) = &self.codons {
            let alignment = Alignment::from_codons(header, filtered.iter().copied())?;
            log::info!(
                "Writing codon alignment of {} codons to '{}'",
                alignment.len(),
                path.display()
            );

            let mut writer = create(path)?;
            write_fasta(&mut writer, &alignment)?;
            writer.flush()?;
        }

        Ok(())
    }

    fn read_records(&mut self) -> Result<Vec<VariantRecord>, Error> {
        let annotation = self.reader.config().annotation();

        let mut records = Vec::new();
        let mut unannotated = Vec::new();
        let mut skipped = 0;

        loop {
            match self.reader.read_record() {
                ReadStatus::Read(record) => {
                    if annotation && record.lacks_annotated_codons() {
                        unannotated.push(record.locus());
                    }
                    records.push(record);
                }
                ReadStatus::Skipped(skip) => {
                    log::error!("{skip}");
                    skipped += 1;
                }
                ReadStatus::Error(e) => {
                    return Err(Error::new(e).context("Failed to read VCF record"));
                }
                ReadStatus::Done => break,
            }
        }

        log::info!("Read {} entries from the input file", records.len());

        if skipped > 0 {
            log::warn!("Skipped {skipped} lines due to bad data");
        }

        if !unannotated.is_empty() {
            log::debug!(
                "{} records do not have EFF data: {}",
                unannotated.len(),
                unannotated.join(", ")
            );
        }

        Ok(records)
    }
}

impl TryFrom<&Extract> for Runner {
    type Error = Error;

    fn try_from(args: &Extract) -> Result<Self, Self::Error> {
        let config = args.config()?;

        if !args.delimiter.is_ascii() {
            return Err(anyhow!(
                "table delimiter must be a single ASCII character, found '{}'",
                args.delimiter
            ));
        }

        let input = Input::new(args.input.clone())?;
        let inner = input.open().with_context(|| match input.as_path() {
            Some(path) => format!("Failed to open VCF from provided path '{}'", path.display()),
            None => String::from("Failed to open VCF from stdin"),
        })?;

        let reader = Reader::new(inner, config)?;

        let samples = reader.header().samples();
        log::info!("Number of samples in the header: {}", samples.len());
        log::debug!(
            "Sample names: {}",
            samples.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
        );

        let output = match (&args.output, input.as_path()) {
            (Some(path), _) => Output::Path(path.clone()),
            (None, Some(path)) => Output::Path(path.with_extension("fa")),
            (None, None) => Output::Stdout,
        };

        Ok(Self {
            reader,
            output,
            table: args.table.clone(),
            codons: args.snpeff.clone(),
            delimiter: args.delimiter as u8,
        })
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Output {
    Path(PathBuf),
    Stdout,
}

impl Output {
    fn create(&self) -> Result<Box<dyn io::Write>, Error> {
        Ok(match self {
            Output::Path(path) => Box::new(create(path)?),
            Output::Stdout => Box::new(io::BufWriter::new(io::stdout().lock())),
        })
    }
}

impl std::fmt::Display for Output {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Output::Path(path) => write!(f, "'{}'", path.display()),
            Output::Stdout => f.write_str("stdout"),
        }
    }
}

fn create(path: &Path) -> Result<io::BufWriter<File>, Error> {
    File::create(path)
        .map(io::BufWriter::new)
        .with_context(|| format!("Failed to create file at '{}'", path.display()))
}
