use std::{fs::File, io::Write, path::PathBuf};

use anyhow::{Context, Error};

use clap::{ArgAction, Parser};

mod extract;
use extract::Extract;

const NAME: &str = env!("CARGO_BIN_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Extract reference and per-sample sequences from multi-sample VCF.
///
/// Reads a VCF, optionally filters records by quality and by distance between positions, and
/// writes a FASTA alignment with the reference sequence followed by one sequence per sample.
#[derive(Debug, Parser)]
#[clap(name = NAME, version = VERSION, about)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    extract: Extract,

    /// Suppress warnings.
    ///
    /// By default, only warnings and errors are printed. By setting this flag, all logging
    /// will be disabled.
    #[arg(long, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbosity.
    ///
    /// Flag can be set multiply times to increase verbosity, or left unset for quiet mode.
    #[clap(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,

    /// Log file.
    ///
    /// By default, logging goes to stderr.
    #[arg(short = 'l', long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Print CLI arguments for debugging.
    #[clap(long, hide = true)]
    debug: bool,
}

impl Cli {
    pub fn run(self) -> Result<(), Error> {
        if self.debug {
            eprintln!("{self:#?}");
        }

        let level = if self.quiet {
            log::LevelFilter::Off
        } else {
            match self.verbose {
                0 => log::LevelFilter::Warn,
                1 => log::LevelFilter::Info,
                2 => log::LevelFilter::Debug,
                _ => log::LevelFilter::Trace,
            }
        };

        let target = match &self.log_file {
            Some(path) => env_logger::Target::Pipe(Box::new(File::create(path).with_context(
                || format!("Failed to create log file at '{}'", path.display()),
            )?)),
            None => env_logger::Target::Stderr,
        };

        match env_logger::Builder::new()
            .filter_level(level)
            .target(target)
            .format(|buf, record| {
                let level = record.level().as_str().to_lowercase();
                let args = record.args();
                writeln!(buf, "[{NAME} {level:>5}] {args}")
            })
            .try_init()
        {
            Ok(()) => (),
            Err(e) => eprintln!("failed to setup logger: {e}"),
        }

        self.extract.run()
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.run() {
        Ok(()) => (),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
