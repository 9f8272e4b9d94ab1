//! Input source for reading VCF.

use std::{
    env,
    fs::File,
    io::{self, IsTerminal as _},
    path::{Path, PathBuf},
};

use flate2::bufread::MultiGzDecoder;

/// An input source for reading.
#[derive(Debug)]
pub enum Input {
    /// A path from which to read a file.
    Path(PathBuf),
    /// Stdin.
    Stdin,
}

impl Input {
    /// By default, reading an `Input` checks that either a path is provided, or that input is
    /// available via stdin, instead of hanging.
    ///
    /// In some contexts, e.g. testing, this can cause issues, and so it may be disabled by setting
    /// this environment variable, or by using [`Input::new_unchecked`].
    pub const ENV_KEY_DISABLE_CHECK: &'static str = "VCF_FA_ALLOW_STDIN";

    /// Creates a new input source.
    pub fn new(input: Option<PathBuf>) -> io::Result<Self> {
        let check = env::var(Self::ENV_KEY_DISABLE_CHECK).is_err();

        if input.is_some() && !io::stdin().is_terminal() && check {
            Err(io::Error::new(
                io::ErrorKind::Other,
                "received input both via file and stdin",
            ))
        } else if input.is_none() && io::stdin().is_terminal() && check {
            Err(io::Error::new(
                io::ErrorKind::Other,
                "received no input via file or stdin",
            ))
        } else {
            Ok(Self::new_unchecked(input))
        }
    }

    /// Creates a new input source without checking that any data is available.
    pub fn new_unchecked(input: Option<PathBuf>) -> Self {
        if let Some(path) = input {
            Self::Path(path)
        } else {
            Self::Stdin
        }
    }

    /// Opens the input for reading.
    ///
    /// Gzip and BGZF compressed input is detected and decompressed transparently.
    pub fn open(&self) -> io::Result<Box<dyn io::BufRead>> {
        match self {
            Input::Path(path) => File::open(path)
                .map(io::BufReader::new)
                .and_then(decompress),
            Input::Stdin => decompress(io::stdin().lock()),
        }
    }

    /// Returns the provided path if provided, otherwise `None`.
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Input::Path(path) => Some(path.as_ref()),
            Input::Stdin => None,
        }
    }
}

/// A compression method for input.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CompressionMethod {
    /// Gzip, including BGZF, which is a series of gzip members.
    Gzip,
}

impl CompressionMethod {
    /// Detects the compression method from the start of the reader without consuming it.
    pub fn detect<R>(reader: &mut R) -> io::Result<Option<Self>>
    where
        R: io::BufRead,
    {
        const GZIP_MAGIC_NUMBER: [u8; 2] = [0x1f, 0x8b];

        let src = reader.fill_buf()?;

        if let Some(buf) = src.get(..GZIP_MAGIC_NUMBER.len()) {
            if buf == GZIP_MAGIC_NUMBER {
                return Ok(Some(CompressionMethod::Gzip));
            }
        }

        Ok(None)
    }
}

/// Wraps the reader in a decoder if compressed.
pub fn decompress<R>(mut reader: R) -> io::Result<Box<dyn io::BufRead>>
where
    R: 'static + io::BufRead,
{
    Ok(match CompressionMethod::detect(&mut reader)? {
        Some(CompressionMethod::Gzip) => {
            Box::new(io::BufReader::new(MultiGzDecoder::new(reader)))
        }
        None => Box::new(reader),
    })
}
