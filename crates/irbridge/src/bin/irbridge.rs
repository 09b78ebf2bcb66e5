//! Converts a SmartIR device file from Broadlink to Tuya codes.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;
use irbridge::{smartir, CompressionLevel, ConvertOptions, Converter};
use log::{error, info, LevelFilter};

/// Largest input file accepted.
const MAX_INPUT_BYTES: u64 = 50 * 1024 * 1024;

#[derive(Parser)]
#[command(name = "irbridge")]
#[command(version, about = "Convert Broadlink IR codes in a SmartIR file to Tuya (UFO-R11) codes", long_about = None)]
struct Cli {
    /// SmartIR JSON file to convert
    input: PathBuf,

    /// Write the result here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Compression level: 0-3 or none/fast/balanced/optimal
    #[arg(short = 'c', long = "compression", default_value = "balanced")]
    level: CompressionLevel,

    /// Emit bare codes instead of MQTT payload objects
    #[arg(long)]
    no_wrap: bool,

    /// Check the file and count codes without converting
    #[arg(long)]
    validate_only: bool,

    /// Log every stage
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Log errors only
    #[arg(short, long)]
    quiet: bool,
}

fn init_logging(cli: &Cli) {
    let level = if cli.verbose {
        LevelFilter::Debug
    } else if cli.quiet {
        LevelFilter::Error
    } else {
        LevelFilter::Info
    };
    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

fn check_input(path: &Path) -> Result<()> {
    let metadata =
        fs::metadata(path).with_context(|| format!("cannot read {}", path.display()))?;
    if !metadata.is_file() {
        bail!("{} is not a regular file", path.display());
    }
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if !is_json {
        bail!("{} does not have a .json extension", path.display());
    }
    if metadata.len() > MAX_INPUT_BYTES {
        bail!(
            "{} is {} bytes, over the {} byte limit",
            path.display(),
            metadata.len(),
            MAX_INPUT_BYTES
        );
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    check_input(&cli.input)?;
    let text = fs::read_to_string(&cli.input)
        .with_context(|| format!("cannot read {}", cli.input.display()))?;
    let document: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", cli.input.display()))?;

    if cli.validate_only {
        let candidates = smartir::validate(&document)?;
        info!("{} is valid: {candidates} command(s)", cli.input.display());
        return Ok(());
    }

    let options = ConvertOptions::default()
        .with_level(cli.level)
        .with_wrap(!cli.no_wrap);
    info!("converting {} at level {}", cli.input.display(), options.level);
    let converted = smartir::convert_document(document, &Converter::new(options))?;
    let rendered = serde_json::to_string_pretty(&converted.tree)?;

    match &cli.output {
        Some(path) => {
            fs::write(path, rendered + "\n")
                .with_context(|| format!("cannot write {}", path.display()))?;
            info!(
                "wrote {} ({} command(s) converted)",
                path.display(),
                converted.commands_processed
            );
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
