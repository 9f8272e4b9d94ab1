//! Writing alignments and annotation tables.

use std::io;

use crate::{
    annotation::{self, EMPTY_COLUMNS},
    Alignment, VariantRecord,
};

/// Column names of the annotation table.
pub const TABLE_HEADER: [&str; 2 + annotation::COLUMNS] = [
    "Chrom",
    "Position",
    "Effect",
    "Effect_Impact",
    "Functional_Class",
    "Codon_Change",
    "Amino_Acid_change",
    "Amino_Acid_length",
    "Gene_Name",
    "Gene_BioType",
    "Coding",
    "Transcript",
    "Exon",
    "SampleOne (yes/no)",
    "SampleTwo (yes/no)",
];

/// Writes an alignment in FASTA format.
///
/// Each sequence is written as a `>name` line followed by a single, unbroken sequence line.
/// The reference sequence is written first.
pub fn write_fasta<W>(writer: &mut W, alignment: &Alignment<'_>) -> io::Result<()>
where
    W: io::Write,
{
    for (name, sequence) in alignment.sequences() {
        writeln!(writer, ">{name}")?;

        for symbol in sequence {
            writer.write_all(symbol.as_bytes())?;
        }

        writeln!(writer)?;
    }

    Ok(())
}

/// Writes a delimited table of per-record annotation, including a header row.
///
/// Records without annotation have empty annotation columns.
pub fn write_table<'a, W, I>(writer: W, records: I, delimiter: u8) -> io::Result<()>
where
    W: io::Write,
    I: IntoIterator<Item = &'a VariantRecord>,
{
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    writer.write_record(TABLE_HEADER)?;

    for record in records {
        let pos = record.pos.to_string();
        let columns = record
            .annotation
            .as_ref()
            .map(|annotation| annotation.columns())
            .unwrap_or(EMPTY_COLUMNS);

        writer.write_record(
            [record.chrom.as_str(), pos.as_str()]
                .into_iter()
                .chain(columns),
        )?;
    }

    writer.flush()
}
