//! Retron5 Save Extractor CLI Application
//!
//! This is the command-line interface for the Retron5 container decoder.
//! It uses the retron5-decoder library and adds:
//! - File reading, including recovery from interrupted saves (`.TMP`)
//! - Output naming and writing
//! - Header inspection as JSON
//! - Diagnostics and exit codes

use anyhow::Result;
use clap::Parser;
use rayon::prelude::*;
use retron5_decoder::{Decoder, DecoderError};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

mod config;
mod inspect;
mod output;
mod source;

/// Retron5 Save Extractor - Pull emulator saves out of Retron5 data files
#[derive(Parser, Debug)]
#[command(name = "retron5")]
#[command(about = "Extract emulator save data from Retron5 containers", long_about = None)]
#[command(version)]
struct Args {
    /// Retron5 container file(s) to decode
    #[arg(value_name = "INPUT", required = true)]
    inputs: Vec<PathBuf>,

    /// Directory for extracted saves (default: next to each input)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Extension for extracted saves (default: srm)
    #[arg(short, long, value_name = "EXT")]
    extension: Option<String>,

    /// Treat a declared-size mismatch as fatal
    #[arg(long)]
    strict_size: bool,

    /// Maximum decoded payload size in bytes
    #[arg(long, value_name = "BYTES")]
    max_size: Option<usize>,

    /// Overwrite existing output files
    #[arg(short, long)]
    force: bool,

    /// Print each container header as JSON instead of extracting
    #[arg(long)]
    inspect: bool,

    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

/// Effective settings after merging the config file with command-line flags
#[derive(Debug)]
struct Settings {
    output_dir: Option<PathBuf>,
    extension: String,
    overwrite: bool,
}

fn main() -> Result<ExitCode> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::debug!("Retron5 CLI v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Using decoder library v{}", retron5_decoder::VERSION);

    let app_config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => config::AppConfig::default(),
    };

    if args.inspect {
        return inspect_mode(&args.inputs);
    }

    let mut decoder_config = app_config.decoder;
    if args.strict_size {
        decoder_config = decoder_config.with_strict_size(true);
    }
    if let Some(limit) = args.max_size {
        decoder_config = decoder_config.with_max_payload_size(limit);
    }
    let decoder = Decoder::with_config(decoder_config);

    let settings = Settings {
        output_dir: args.output_dir.clone().or(app_config.output.dir),
        extension: args.extension.clone().unwrap_or(app_config.output.extension),
        overwrite: args.force || app_config.output.overwrite,
    };
    log::debug!("Settings: {:?}, decoder: {:?}", settings, decoder.config());

    // Containers are independent, so decode them in parallel and report in order
    let results: Vec<Result<PathBuf>> = args
        .inputs
        .par_iter()
        .map(|input| extract_one(input, &decoder, &settings))
        .collect();

    let mut failures = 0usize;
    for (input, result) in args.inputs.iter().zip(results) {
        match result {
            Ok(out) => log::info!("{:?} -> {:?}", input, out),
            Err(e) => {
                failures += 1;
                log::error!("{:?}: {:#}", input, e);
                if e.downcast_ref::<DecoderError>().is_some_and(|d| d.is_format_error()) {
                    log::error!("  (not a Retron5 container this tool can read)");
                }
            }
        }
    }

    if failures > 0 {
        log::error!("{} of {} file(s) failed", failures, args.inputs.len());
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}

/// Decode one container and write its payload
fn extract_one(input: &Path, decoder: &Decoder, settings: &Settings) -> Result<PathBuf> {
    let extracted = source::decode_with_recovery(input, decoder)?;

    for warning in &extracted.payload.warnings {
        log::warn!("{:?}: {}", extracted.source, warning);
    }

    let out = output::output_path(input, settings.output_dir.as_deref(), &settings.extension)?;
    output::write_payload(&out, &extracted.payload.data, settings.overwrite)?;
    Ok(out)
}

/// Inspect mode - print header reports, write nothing
fn inspect_mode(inputs: &[PathBuf]) -> Result<ExitCode> {
    let mut invalid = 0usize;
    for input in inputs {
        let report = inspect::inspect_file(input);
        if report.error.is_some() {
            invalid += 1;
        }
        println!("{}", inspect::to_json(&report)?);
    }

    Ok(if invalid > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Map `-v`/`-q` onto a level filter; quiet wins over verbose
fn log_level(verbose: u8, quiet: bool) -> log::LevelFilter {
    use log::LevelFilter;

    match (quiet, verbose) {
        (true, _) => LevelFilter::Error,
        (false, 0) => LevelFilter::Info,
        (false, 1) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    }
}

/// Initialize logging; `RUST_LOG` refines the flag-selected level
fn init_logging(verbose: u8, quiet: bool) {
    use std::io::Write;

    env_logger::Builder::new()
        .filter_level(log_level(verbose, quiet))
        .parse_default_env()
        .format(|buf, record| match record.level() {
            log::Level::Info => writeln!(buf, "{}", record.args()),
            level => writeln!(buf, "{:<5} {}", level, record.args()),
        })
        .init();
}
