#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Extracting per-sample sequences from multi-sample VCF.
//!
//! This serves as the core library implementation for the `vcf-fa` CLI, but can also be used as
//! a free-standing library.
//!
//! # Overview
//!
//! A [`Reader`] reads the [`Header`] and then one [`VariantRecord`] at a time, optionally parsing
//! the `EFF` functional [`annotation`] of each record. The records are then filtered by quality
//! and by the distance between positions (see [`filter`]), after which an [`Alignment`] of
//! per-sample sequences can be created, either from the REF/ALT bases or from annotated codons.
//!
//! # Example
//!
//! ```
//! use vcf_fa_core::{io::write_fasta, Alignment, Config, ReadStatus, Reader};
//!
//! let vcf = "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tS1\tS2\n\
//!     chr1\t100\t.\tA\tT,G\t50\t.\t.\tGT\t0\t2\n";
//!
//! let config = Config::default();
//! let mut reader = Reader::new(vcf.as_bytes(), config.clone())?;
//!
//! let mut records = Vec::new();
//! loop {
//!     match reader.read_record() {
//!         ReadStatus::Read(record) => records.push(record),
//!         ReadStatus::Skipped(skipped) => eprintln!("{skipped}"),
//!         ReadStatus::Error(e) => Err(e)?,
//!         ReadStatus::Done => break,
//!     }
//! }
//!
//! let filtered = vcf_fa_core::filter::apply(&records, &config);
//! let alignment = Alignment::from_bases(reader.header(), filtered, config.allele())?;
//!
//! let mut fasta = Vec::new();
//! write_fasta(&mut fasta, &alignment)?;
//!
//! assert_eq!(String::from_utf8(fasta)?, ">reference\nA\n>S1\nA\n>S2\nG\n");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod alignment;
pub use alignment::Alignment;

pub mod annotation;
pub use annotation::Annotation;

pub mod config;
pub use config::Config;

pub mod filter;

pub mod genotype;

pub mod header;
pub use header::Header;

pub mod input;
pub use input::Input;

pub mod io;

pub mod reader;
pub use reader::{ReadStatus, Reader};

pub mod record;
pub use record::VariantRecord;
