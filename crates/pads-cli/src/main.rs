mod debug;
mod error;
mod params;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use pads_core::{PaddingPolicy, ValidationMode, ValidationOptions};
use tracing_subscriber::EnvFilter;

use crate::debug::DebugFlags;
use crate::error::{CliError, ErrorCode};
use crate::params::ParamArgs;
use crate::render::RunOptions;

#[derive(Parser, Debug)]
#[command(
    name = "stretched-pads",
    version,
    about = "Generate a Fritzing PCB view SVG for a row of oblong (stretched) connector pads",
    override_usage = "stretched-pads [OPTIONS] [@parameter-file]... <OUTPUT>",
    after_help = "All sizes are in mils (1/1000th of an inch).\n\
Parameters given as @file are read from that file: one flag or value per line, '#' starts a \
comment, or a .yaml/.yml/.json document with the parameter names as keys. Later files override \
earlier ones; flags on the command line override every file.",
    args_override_self = true
)]
struct Cli {
    /// SVG file to create, `-` writes to standard output
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    #[command(flatten)]
    params: ParamArgs,

    /// Debug bits: 0x1 parameters, 0x2 pad, 0x4 drawing, 0x8 draw 100 times larger,
    /// 0x1000 report every invalid parameter
    #[arg(short = 'D', long, value_name = "bits", default_value = "0", value_parser = debug::parse_bits)]
    debug: u32,

    /// Report every invalid parameter instead of stopping at the first
    #[arg(long)]
    all_errors: bool,

    /// Shrink padding that does not fit the pad instead of rejecting it
    #[arg(long)]
    clamp_padding: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> ExitCode {
    match run(std::env::args().skip(1).collect()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if !err.problems().is_empty() {
                eprintln!("{err}");
            }
            err.code.into()
        }
    }
}

fn run(args: Vec<String>) -> Result<(), CliError> {
    let (files, rest) = pads_params::split_param_files(&args)?;

    let cli = match Cli::try_parse_from(std::iter::once("stretched-pads".to_string()).chain(rest)) {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => {
            // --help and --version
            let _ = err.print();
            return Ok(());
        }
        Err(err) => {
            let _ = err.print();
            return Err(CliError::already_reported(ErrorCode::Usage));
        }
    };

    let debug = DebugFlags::new(cli.debug);
    init_tracing(cli.verbose, cli.quiet, debug);

    let mut layers = params::file_layers(&files)?;
    let explicit = cli.params.to_overrides();
    tracing::debug!(overrides = ?explicit, "command line layer");
    layers.push(explicit);

    let validation = ValidationOptions {
        mode: if cli.all_errors || debug.contains(DebugFlags::SHOW_ALL_ERRORS) {
            ValidationMode::CollectAll
        } else {
            ValidationMode::FailFast
        },
        padding: if cli.clamp_padding {
            PaddingPolicy::Clamp
        } else {
            PaddingPolicy::Reject
        },
    };

    render::run(
        &layers,
        &RunOptions {
            output: cli.output,
            debug,
            validation,
        },
    )
}

fn init_tracing(verbose: u8, quiet: bool, debug: DebugFlags) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) if debug.wants_reports() => "info",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
