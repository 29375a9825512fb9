//! bin2go - Render binary data as a Go `[]byte` literal
//!
//! Reads a blob from stdin (or `-in`) and writes a `var <name> = []byte{...}`
//! declaration to stdout (or `-out`), optionally preceded by a package clause.

use anyhow::Result;
use bin2go_core::transcoder::DEFAULT_LINE_WIDTH;
use bin2go_core::{Error, Job, RenderConfig, EXIT_OK, EXIT_USAGE};
use clap::error::ErrorKind;
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info, Level};
use tracing_subscriber::EnvFilter;

/// Long flags that may also be spelled with a single dash (`-in=file`)
const SINGLE_DASH_FLAGS: &[&str] = &["in", "out", "pkg", "width", "trailing-comma", "help"];

/// Render binary data as a Go []byte literal
#[derive(Parser, Debug)]
#[command(name = "bin2go")]
#[command(author, version, about, long_about = None)]
#[command(override_usage = "bin2go [-in=<path>] [-out=<path>] [-pkg=<name>] <varname>")]
struct Cli {
    /// Use this file instead of stdin for input
    #[arg(long = "in", value_name = "PATH")]
    input: Option<PathBuf>,

    /// Use this file instead of stdout for output
    #[arg(long = "out", value_name = "PATH")]
    output: Option<PathBuf>,

    /// Prepend package clause specifying this package
    #[arg(long = "pkg", value_name = "NAME")]
    package: Option<String>,

    /// Break lines once this many columns are used
    #[arg(long, value_name = "COLUMNS", default_value_t = DEFAULT_LINE_WIDTH)]
    width: usize,

    /// Also write a comma after the last byte (accepts -trailing-comma=false)
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true",
        action = clap::ArgAction::Set,
        value_parser = clap::builder::BoolishValueParser::new(),
    )]
    trailing_comma: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Name of the generated variable
    #[arg(value_name = "VARNAME")]
    varname: String,
}

impl Cli {
    fn job(&self) -> Job {
        let render = RenderConfig::new()
            .line_width(self.width)
            .trailing_comma(self.trailing_comma);

        Job::new(self.varname.clone())
            .input(self.input.clone())
            .output(self.output.clone())
            .package(self.package.clone())
            .render(render)
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse_from(normalize_args(std::env::args_os())) {
        Ok(cli) => cli,
        Err(err) => {
            // help and version go to stdout, everything else to stderr
            err.print().ok();
            return ExitCode::from(usage_code(&err));
        }
    };

    // Initialize tracing; stdout may carry the generated source
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::from(EXIT_OK),
        Err(err) => {
            eprintln!("bin2go: {}", err);
            ExitCode::from(exit_code(&err))
        }
    }
}

/// Run the conversion described by the command line
fn run(cli: &Cli) -> Result<()> {
    let job = cli.job();
    debug!(
        "Converting {:?} -> {:?} as '{}'",
        job.input, job.output, job.identifier
    );

    let summary = bin2go_core::run(&job)?;

    info!(
        "Summary: {} input bytes, {} output bytes, {} lines",
        summary.input_bytes, summary.output_bytes, summary.output_lines
    );

    Ok(())
}

/// Rewrite Go-style `-flag` / `-flag=value` arguments to `--flag` form
fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args = args.into_iter().map(Into::into);
    let mut normalized: Vec<OsString> = args.next().into_iter().collect();

    for arg in args.by_ref() {
        if arg == "--" {
            normalized.push(arg);
            break;
        }
        normalized.push(rewrite_single_dash(arg));
    }

    normalized.extend(args);
    normalized
}

fn rewrite_single_dash(arg: OsString) -> OsString {
    let Some(text) = arg.to_str() else {
        return arg;
    };

    let Some(flag) = text.strip_prefix('-').filter(|rest| !rest.starts_with('-')) else {
        return arg;
    };

    let name = flag.split_once('=').map_or(flag, |(name, _)| name);
    if SINGLE_DASH_FLAGS.contains(&name) {
        format!("-{}", text).into()
    } else {
        arg
    }
}

/// Exit code for a failed parse: help/version are not failures
fn usage_code(err: &clap::Error) -> u8 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => EXIT_OK,
        _ => EXIT_USAGE,
    }
}

/// Exit code for a failed run
fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<Error>()
        .map_or(EXIT_USAGE, Error::exit_code)
}
