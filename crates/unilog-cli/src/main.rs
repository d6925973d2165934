//! unilog - log-to-log LUT generation, concatenation, resampling and
//! image comparison.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_appender::non_blocking::WorkerGuard;
use unilog_core::{Classify, ErrorKind, Settings, BATCH_FAILED_EXIT};

mod commands;

#[derive(Parser)]
#[command(name = "unilog")]
#[command(author, version, about = "Log-to-log 3D LUT toolkit")]
#[command(long_about = "
Builds, chains and checks 3D LUTs that convert between camera log spaces.

Examples:
  unilog generate --list                          # Show registered spaces
  unilog generate -s S-Log3 -t LogC4              # One bridge LUT
  unilog generate -s V-Log --batch --output-dir luts
  unilog concat -1 bridge.cube -2 look.cube -o out.cube
  unilog concat -1 bridges/ -2 look.cube -o out/  # Every LUT in a directory
  unilog resize grade.cube --size 33
  unilog compare a.tif b.tif --visualize -o diff.png
  unilog compare renders_a/ renders_b/ -w 4
  unilog info grade.cube
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Worker threads for batch forms (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,

    /// YAML settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a bridge LUT between two log spaces
    #[command(visible_alias = "g")]
    Generate(GenerateArgs),

    /// Concatenate two LUTs (files or a directory and a file)
    #[command(visible_alias = "c")]
    Concat(ConcatArgs),

    /// Resample a LUT to another grid size
    #[command(visible_alias = "r")]
    Resize(ResizeArgs),

    /// Compare two images or two directories of images
    #[command(visible_alias = "d")]
    Compare(CompareArgs),

    /// Show LUT information and value range
    #[command(visible_alias = "i")]
    Info(InfoArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// Source log space
    #[arg(short, long)]
    source: Option<String>,

    /// Target log space
    #[arg(short, long)]
    target: Option<String>,

    /// Grid size (default from settings)
    #[arg(long)]
    size: Option<usize>,

    /// Output file (default: {source}_to_{target}_{size}.cube)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Chromatic adaptation transform
    #[arg(long)]
    cat: Option<String>,

    /// Clamp output values to [0, 1]
    #[arg(long)]
    clip: bool,

    /// Generate from the source to every other space
    #[arg(long)]
    batch: bool,

    /// Restrict --batch to these targets
    #[arg(long, num_args = 1.., requires = "batch")]
    targets: Vec<String>,

    /// Output directory for --batch
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// List registered log spaces and exit
    #[arg(long)]
    list: bool,
}

#[derive(Args)]
struct ConcatArgs {
    /// LUT applied first (file or directory)
    #[arg(short = '1', long)]
    first: PathBuf,

    /// LUT applied second (file or directory)
    #[arg(short = '2', long)]
    second: PathBuf,

    /// Output file, or directory in batch mode
    #[arg(short, long)]
    output: PathBuf,

    /// Output grid size (default: size of the first LUT)
    #[arg(long)]
    size: Option<usize>,

    /// Worker threads for batch mode
    #[arg(short, long)]
    workers: Option<usize>,
}

#[derive(Args)]
struct ResizeArgs {
    /// Input LUT
    input: PathBuf,

    /// New grid size
    #[arg(long)]
    size: usize,

    /// Output file (default: {stem}_{size}.cube next to the input)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct CompareArgs {
    /// First image or directory
    a: PathBuf,

    /// Second image or directory
    b: PathBuf,

    /// Log space the images are encoded in (default from settings)
    #[arg(long)]
    space: Option<String>,

    /// JND threshold in 8-bit levels
    #[arg(long)]
    jnd: Option<f64>,

    /// Heatmap gain
    #[arg(long)]
    amplify: Option<f32>,

    /// Write difference heatmaps
    #[arg(long)]
    visualize: bool,

    /// Heatmap file, or directory for directory comparisons
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Worker threads for directory comparisons
    #[arg(short, long)]
    workers: Option<usize>,
}

#[derive(Args)]
struct InfoArgs {
    /// LUT file(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,
}

/// Installs the stderr logger and, with `--log-file`, a non-blocking file
/// writer. `RUST_LOG` takes precedence over `-v`.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create log file: {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            (Some(fmt::layer().with_writer(writer).with_ansi(false)), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(file_layer)
        .try_init()
        .context("Failed to install logger")?;
    Ok(guard)
}

/// Exit code of the first classified error in the chain.
fn exit_code(err: &anyhow::Error) -> u8 {
    for cause in err.chain() {
        if cause.downcast_ref::<commands::BatchFailed>().is_some() {
            return BATCH_FAILED_EXIT;
        }
        if let Some(kind) = classify(cause) {
            return kind.exit_code();
        }
    }
    ErrorKind::Other.exit_code()
}

fn classify(cause: &(dyn std::error::Error + 'static)) -> Option<ErrorKind> {
    if let Some(e) = cause.downcast_ref::<unilog_lut::LutError>() {
        Some(e.kind())
    } else if let Some(e) = cause.downcast_ref::<unilog_compare::CompareError>() {
        Some(e.kind())
    } else if let Some(e) = cause.downcast_ref::<unilog_io::IoError>() {
        Some(e.kind())
    } else if let Some(e) = cause.downcast_ref::<unilog_color::ColorError>() {
        Some(e.kind())
    } else if let Some(e) = cause.downcast_ref::<unilog_core::CoreError>() {
        Some(e.kind())
    } else {
        cause.downcast_ref::<std::io::Error>().map(ErrorKind::from_io)
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("Failed to load settings: {}", path.display()))?,
        None => Settings::default(),
    };
    if cli.threads > 0 {
        settings.workers = cli.threads;
    }
    let ctx = commands::Context {
        settings,
        verbose: cli.verbose,
    };

    match cli.command {
        Commands::Generate(args) => commands::generate::run(args, &ctx),
        Commands::Concat(args) => commands::concat::run(args, &ctx),
        Commands::Resize(args) => commands::resize::run(args, &ctx),
        Commands::Compare(args) => commands::compare::run(args, &ctx),
        Commands::Info(args) => commands::info::run(args, &ctx),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _guard = match init_logging(cli.verbose, cli.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::from(ErrorKind::Other.exit_code());
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(exit_code(&e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn exit_codes_follow_error_kind() {
        let err = anyhow::Error::new(unilog_lut::LutError::EmptyTable).context("concat failed");
        assert_eq!(exit_code(&err), ErrorKind::EmptyTable.exit_code());

        let err: anyhow::Error = "nope".parse::<unilog_color::LogSpace>().unwrap_err().into();
        assert_eq!(exit_code(&err), 2);

        let err = anyhow::Error::new(commands::BatchFailed { failed: 1, total: 3 });
        assert_eq!(exit_code(&err), BATCH_FAILED_EXIT);

        assert_eq!(exit_code(&anyhow::anyhow!("usage")), 1);
    }

    #[test]
    fn parses_concat_shorts() {
        let cli = Cli::try_parse_from(["unilog", "concat", "-1", "a.cube", "-2", "b.cube", "-o", "c.cube"]).unwrap();
        assert!(matches!(cli.command, Commands::Concat(ref a) if a.first == Path::new("a.cube")));
    }

    #[test]
    fn verbosity_counts() {
        let cli = Cli::try_parse_from(["unilog", "-vv", "info", "x.cube"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
