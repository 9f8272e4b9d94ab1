//! VCF column header.

use std::{fmt, io, str::FromStr};

use indexmap::IndexSet;

/// Number of fixed columns preceding the sample columns.
pub const FIXED_COLUMNS: usize = 9;

const META_PREFIX: &str = "##";
const HEADER_PREFIX: &str = "#CHROM";

/// The column header of a VCF file.
///
/// The first [`FIXED_COLUMNS`] columns are `CHROM`, `POS`, `ID`, `REF`, `ALT`, `QUAL`, `FILTER`,
/// `INFO`, and `FORMAT`. The rest are sample names, kept in file order. This order is used for
/// all per-sample indexing downstream.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Header {
    samples: IndexSet<String>,
}

impl Header {
    /// Returns the sample names in file order.
    pub fn samples(&self) -> &IndexSet<String> {
        &self.samples
    }

    /// Reads the header from a reader.
    ///
    /// Meta-information lines starting with `##` are skipped without being decoded. The stream
    /// is left positioned after the `#CHROM` line.
    ///
    /// # Errors
    ///
    /// If any other line is encountered before the `#CHROM` line, or if the stream ends first,
    /// [`Error::Missing`] is returned.
    pub fn read<R>(reader: &mut R) -> Result<Self, Error>
    where
        R: io::BufRead,
    {
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                return Err(Error::Missing);
            }

            let start = buf
                .iter()
                .position(|b| !b.is_ascii_whitespace())
                .unwrap_or(buf.len());
            if buf[start..].starts_with(META_PREFIX.as_bytes()) {
                continue;
            }

            let line = std::str::from_utf8(&buf)
                .map_err(|_| Error::InvalidUtf8)?
                .trim();

            if line.starts_with(HEADER_PREFIX) {
                return Self::from_str(line);
            } else {
                return Err(Error::Missing);
            }
        }
    }
}

impl FromStr for Header {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        if !line.starts_with(HEADER_PREFIX) {
            return Err(Error::Missing);
        }

        let columns = line.split('\t').collect::<Vec<_>>();

        if columns.len() < FIXED_COLUMNS {
            return Err(Error::TooFewColumns {
                found: columns.len(),
            });
        }

        let mut samples = IndexSet::with_capacity(columns.len() - FIXED_COLUMNS);
        for &name in &columns[FIXED_COLUMNS..] {
            if !samples.insert(name.to_string()) {
                return Err(Error::DuplicateSample {
                    name: name.to_string(),
                });
            }
        }

        Ok(Self { samples })
    }
}

/// An error associated with reading a header.
#[derive(Debug)]
pub enum Error {
    /// I/O error.
    Io(io::Error),
    /// No `#CHROM` line was found before data.
    Missing,
    /// Header line is not valid UTF-8.
    InvalidUtf8,
    /// Header defines fewer than the fixed columns.
    TooFewColumns {
        /// The number of columns found.
        found: usize,
    },
    /// The same sample name occurs more than once.
    DuplicateSample {
        /// The repeated name.
        name: String,
    },
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "{e}"),
            Error::Missing => f.write_str("could not find the #CHROM header, is this a VCF file?"),
            Error::InvalidUtf8 => f.write_str("VCF header line is not valid UTF-8"),
            Error::TooFewColumns { found } => write!(
                f,
                "header has {found} columns, expected at least {FIXED_COLUMNS}"
            ),
            Error::DuplicateSample { name } => write!(f, "duplicate sample name '{name}' in header"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tS1\tS2";

    #[test]
    fn test_read_header() -> Result<(), Box<dyn std::error::Error>> {
        let src = format!("##fileformat=VCFv4.1\n##source=test\n{HEADER}\nchr1\t1\n");
        let mut reader = src.as_bytes();

        let header = Header::read(&mut reader)?;

        assert_eq!(
            header.samples().iter().collect::<Vec<_>>(),
            vec!["S1", "S2"]
        );
        assert_eq!(reader, b"chr1\t1\n");

        Ok(())
    }

    #[test]
    fn test_read_header_without_samples() -> Result<(), Box<dyn std::error::Error>> {
        let header = Header::from_str("#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT")?;

        assert!(header.samples().is_empty());

        Ok(())
    }

    #[test]
    fn test_read_header_missing() {
        let mut reader: &[u8] = b"##fileformat=VCFv4.1\nchr1\t100\t.\tA\tT\n";

        assert!(matches!(Header::read(&mut reader), Err(Error::Missing)));
    }

    #[test]
    fn test_read_header_skips_undecodable_meta() -> Result<(), Box<dyn std::error::Error>> {
        let src = [b"##source=caf\xe9\n".as_slice(), HEADER.as_bytes()].concat();
        let mut reader = src.as_slice();

        let header = Header::read(&mut reader)?;

        assert_eq!(header.samples().len(), 2);

        Ok(())
    }

    #[test]
    fn test_read_header_invalid_utf8() {
        let mut reader: &[u8] = b"#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tS\xe9\n";

        assert!(matches!(Header::read(&mut reader), Err(Error::InvalidUtf8)));
    }

    #[test]
    fn test_read_header_empty_input() {
        let mut reader: &[u8] = b"";

        assert!(matches!(Header::read(&mut reader), Err(Error::Missing)));
    }

    #[test]
    fn test_read_header_other_comment_first() {
        let mut reader: &[u8] = b"#POS\tCHROM\n";

        assert!(matches!(Header::read(&mut reader), Err(Error::Missing)));
    }

    #[test]
    fn test_header_too_few_columns() {
        assert!(matches!(
            Header::from_str("#CHROM\tPOS\tID"),
            Err(Error::TooFewColumns { found: 3 })
        ));
    }

    #[test]
    fn test_header_duplicate_sample() {
        let result = Header::from_str(&format!("{HEADER}\tS1"));

        assert!(matches!(result, Err(Error::DuplicateSample { name }) if name == "S1"));
    }
}
