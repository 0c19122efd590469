//! CLI argument definitions for `featurize`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};

#[derive(Parser)]
#[command(
    name = "featurize",
    version,
    about = "Pivot forecast matrices and inspect featurizer archives",
    long_about = "Pivot forecast-horizon matrices read from CSV files, and write or\n\
                  inspect versioned pivot transformer archives."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Disable ANSI colors in log output.
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Include module paths in log output.
    #[arg(long = "log-target", global = true)]
    pub log_target: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Pivot one or more CSV matrices and print one sequence per line.
    Pivot(PivotArgs),

    /// Write a default pivot transformer archive.
    Save {
        /// Destination archive path.
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },

    /// Report an archive's version tag and check that it loads.
    Inspect {
        /// Archive to inspect.
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
}

#[derive(Parser)]
pub struct PivotArgs {
    /// Headerless CSV file holding one matrix. Repeat for more matrices.
    #[arg(long = "input", value_name = "CSV", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Element type of every cell.
    #[arg(long = "kind", value_enum, default_value = "f64")]
    pub kind: KindArg,

    /// Pivot only the first N cells of each row.
    #[arg(long = "columns", value_name = "N")]
    pub columns: Option<usize>,

    /// Cell text treated as null.
    #[arg(long = "null-token", value_name = "TOKEN", default_value = "")]
    pub null_token: String,

    /// Keep whitespace around cells.
    #[arg(long = "no-trim")]
    pub no_trim: bool,
}

/// CLI element type choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    F64,
    String,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
