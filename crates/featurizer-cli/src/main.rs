//! Featurizer CLI.

use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::Parser;
use featurizer_cli::commands::{PivotOptions, ValueKind, run_inspect, run_pivot, run_save};
use featurizer_cli::logging::{LogConfig, LogFormat, init_logging};
use featurizer_cli::matrix_csv::CsvMatrixOptions;
use tracing::level_filters::LevelFilter;

mod cli;

use crate::cli::{Cli, Command, KindArg, LogFormatArg, LogLevelArg, PivotArgs};

fn main() {
    let cli = Cli::parse();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli.command) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(command: &Command) -> Result<()> {
    match command {
        Command::Pivot(args) => {
            for line in run_pivot(&args.inputs, &pivot_options(args))? {
                println!("{line}");
            }
        }
        Command::Save { path } => {
            let bytes = run_save(path)?;
            println!("wrote {bytes} byte(s) to {}", path.display());
        }
        Command::Inspect { path } => {
            println!("{}", run_inspect(path)?);
        }
    }
    Ok(())
}

fn pivot_options(args: &PivotArgs) -> PivotOptions {
    PivotOptions {
        kind: match args.kind {
            KindArg::F64 => ValueKind::F64,
            KindArg::String => ValueKind::String,
        },
        columns: args.columns,
        csv: CsvMatrixOptions::default()
            .with_null_token(args.null_token.as_str())
            .with_trim(!args.no_trim),
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let explicit = cli.verbosity.is_present() || cli.log_level.is_some();
    let level = match cli.log_level {
        Some(LogLevelArg::Error) => LevelFilter::ERROR,
        Some(LogLevelArg::Warn) => LevelFilter::WARN,
        Some(LogLevelArg::Info) => LevelFilter::INFO,
        Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
        Some(LogLevelArg::Trace) => LevelFilter::TRACE,
        None => cli.verbosity.tracing_level_filter(),
    };
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let with_ansi = !cli.no_color && cli.log_file.is_none() && io::stderr().is_terminal();

    LogConfig::default()
        .with_level(level)
        .with_env_filter(!explicit)
        .with_format(format)
        .with_ansi(with_ansi)
        .with_target(cli.log_target)
        .with_log_file(cli.log_file.clone())
}
