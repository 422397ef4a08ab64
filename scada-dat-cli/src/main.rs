//! SCADA .dat Decoder CLI
//!
//! Command-line front end for the scada-dat-decoder library:
//!
//! ```text
//! scada-dat [INPUT] [OUTPUT]
//! ```
//!
//! With no arguments the binary log is read from stdin and text is written to
//! stdout. One argument names the input file, a second names the output file.
//! Progress and the final record count are printed only when an output file
//! is given.

use anyhow::{Context, Result};
use clap::Parser;
use scada_dat_decoder::{RecordDecoder, RecordFormatter};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

mod config;
mod driver;

use config::AppConfig;

/// Exit status when the input ends partway through a record
const EXIT_TRUNCATED: u8 = 2;

/// SCADA .dat decoder - convert binary telemetry logs to delimited text
#[derive(Parser, Debug)]
#[command(name = "scada-dat")]
#[command(about = "Decode SCADA .dat telemetry logs into delimited text", long_about = None)]
#[command(version)]
struct Args {
    /// Binary log to decode (default: stdin)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Text file to write (default: stdout)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Stop after decoding this many records
    #[arg(long, value_name = "COUNT")]
    max_records: Option<usize>,

    /// Prefix every line with the input file name
    #[arg(long)]
    label_source: bool,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long)]
    quiet: bool,
}

enum Outcome {
    Complete,
    Truncated,
}

fn main() -> ExitCode {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);
    log::debug!("SCADA .dat decoder v{}", scada_dat_decoder::VERSION);

    match run(&args) {
        Ok(Outcome::Complete) => ExitCode::SUCCESS,
        Ok(Outcome::Truncated) => ExitCode::from(EXIT_TRUNCATED),
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<Outcome> {
    let config = resolve_config(args)?;
    log::debug!("Effective configuration: {:?}", config);

    let input: Box<dyn Read> = match &args.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("error opening input file {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    let mut output: Box<dyn Write> = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("error opening output file {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let input_name = args
        .input
        .as_deref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "stdin".to_string());

    if let Some(path) = &args.output {
        println!("Parsing {} to {}", input_name, path.display());
    }

    let mut formatter = RecordFormatter::new();
    if config.output.label_source {
        formatter = formatter.with_label(source_label(args.input.as_deref()));
    }

    let mut decoder = RecordDecoder::with_config(input, config.decode);
    let summary = driver::drive(&mut decoder, &formatter, &mut output)?;

    if args.output.is_some() {
        println!("{} entries", summary.records);
    }

    match summary.truncation {
        Some(err) => {
            eprintln!("warning: {} is truncated: {}", input_name, err);
            eprintln!("{} complete entries decoded", summary.records);
            Ok(Outcome::Truncated)
        }
        None => Ok(Outcome::Complete),
    }
}

/// Merge the optional config file with command-line overrides
fn resolve_config(args: &Args) -> Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => AppConfig::default(),
    };

    if let Some(max) = args.max_records {
        config.decode.max_records = Some(max);
    }
    if args.label_source {
        config.output.label_source = true;
    }

    Ok(config)
}

/// Line label for the given input: its file name, or `stdin`
fn source_label(input: Option<&Path>) -> String {
    input
        .and_then(|p| p.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "stdin".to_string())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_arguments() {
        let args = Args::parse_from(["scada-dat", "in.dat", "out.csv"]);
        assert_eq!(args.input, Some(PathBuf::from("in.dat")));
        assert_eq!(args.output, Some(PathBuf::from("out.csv")));

        let args = Args::parse_from(["scada-dat"]);
        assert!(args.input.is_none());
        assert!(args.output.is_none());
    }

    #[test]
    fn test_overrides_apply_without_config_file() {
        let args = Args::parse_from(["scada-dat", "--max-records", "5", "--label-source"]);
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.decode.max_records, Some(5));
        assert!(config.output.label_source);
    }

    #[test]
    fn test_source_label() {
        assert_eq!(source_label(Some(Path::new("/data/ROOM1_T.DAT"))), "ROOM1_T.DAT");
        assert_eq!(source_label(None), "stdin");
    }
}
