use commentpurger_core::{CliArgs, FormatTable, RunSummary, process_paths};
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use clap::error::ErrorKind;
use console::style;
use std::process::ExitCode;

fn parse_args() -> Result<CliArgs, ExitCode> {
    CliArgs::try_parse().map_err(|e| exit_for_parse_error(&e))
}

/// Prints a clap error (or help/version text) and picks the exit code.
/// Help and version succeed only if they could actually be written.
fn exit_for_parse_error(err: &clap::Error) -> ExitCode {
    if let Err(print_err) = err.print() {
        eprintln!("Failed to write command-line message: {print_err}");
        return ExitCode::FAILURE;
    }
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    }
}

fn report(summary: &RunSummary) {
    for path in summary.stripped() {
        println!("Removed comments from {}", style(path.display()).dim());
    }
    for err in summary.failures() {
        eprintln!("{}", style(err).red());
    }
}

fn main() -> Result<ExitCode> {
    let args = match parse_args() {
        Ok(args) => args,
        Err(code) => return Ok(code),
    };
    logging::init_logging(args.verbose);

    if let Some(jobs) = args.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .context("Failed to configure worker threads")?;
    }

    let table = FormatTable::new(args.format_options());
    tracing::debug!(suffixes = ?table.suffixes(), "recognized file types");

    let summary = process_paths(&args.paths, &table);
    report(&summary);

    let failed = summary.failures().count();
    if failed > 0 {
        tracing::info!(failed, "some paths could not be processed");
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_errors_exit_with_failure() {
        let err = CliArgs::try_parse_from(["commentpurger"]).unwrap_err();
        assert_eq!(exit_for_parse_error(&err), ExitCode::FAILURE);
    }

    #[test]
    fn version_exits_with_success() {
        let err = CliArgs::try_parse_from(["commentpurger", "--version"]).unwrap_err();
        assert_eq!(exit_for_parse_error(&err), ExitCode::SUCCESS);
    }
}
