//! VCF reader.

use std::{fmt, io};

use crate::{
    header::{self, Header},
    record::{ParseError, VariantRecord},
    Config,
};

/// A status when trying to read an element from a reader.
#[derive(Debug)]
pub enum ReadStatus<T> {
    /// Element was succesfully read.
    Read(T),
    /// A line could not be parsed and was skipped.
    Skipped(Skipped),
    /// An error was encountered.
    Error(io::Error),
    /// The reader has finished.
    Done,
}

/// A data line that could not be parsed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Skipped {
    /// The raw line, without line terminator.
    pub line: String,
    /// The reason for skipping.
    pub error: ParseError,
}

impl fmt::Display for Skipped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bad data ({}): {}", self.error, self.line)
    }
}

/// A reader of VCF records.
pub struct Reader<R> {
    inner: R,
    header: Header,
    config: Config,
    buf: Vec<u8>,
}

impl<R> Reader<R>
where
    R: io::BufRead,
{
    /// Creates a new reader.
    ///
    /// The header is read immediately.
    pub fn new(mut inner: R, config: Config) -> Result<Self, header::Error> {
        let header = Header::read(&mut inner)?;

        Ok(Self {
            inner,
            header,
            config,
            buf: Vec::new(),
        })
    }

    /// Returns the header.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Returns the configuration used for parsing.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Reads the next record.
    ///
    /// Blank lines and lines starting with `#` are passed over. Lines that fail to parse,
    /// including lines that are not valid UTF-8, are returned as [`ReadStatus::Skipped`], after
    /// which reading may continue.
    pub fn read_record(&mut self) -> ReadStatus<VariantRecord> {
        loop {
            self.buf.clear();

            match self.inner.read_until(b'\n', &mut self.buf) {
                Ok(0) => return ReadStatus::Done,
                Ok(_) => (),
                Err(e) => return ReadStatus::Error(e),
            }

            let line = match std::str::from_utf8(&self.buf) {
                Ok(line) => line.trim_end_matches(['\n', '\r']),
                Err(_) if self.buf.starts_with(b"#") => continue,
                Err(_) => {
                    let line = String::from_utf8_lossy(&self.buf);

                    return ReadStatus::Skipped(Skipped {
                        line: line.trim_end_matches(['\n', '\r']).to_string(),
                        error: ParseError::InvalidUtf8,
                    });
                }
            };

            if line.starts_with('#') || line.trim().is_empty() {
                continue;
            }

            return match VariantRecord::parse(line, &self.config) {
                Ok(record) => ReadStatus::Read(record),
                Err(error) => ReadStatus::Skipped(Skipped {
                    line: line.to_string(),
                    error,
                }),
            };
        }
    }
}
