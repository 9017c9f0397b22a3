//! CLI entry point for projecting point clouds with TopoMap.
//!
//! Parses command-line arguments with clap, installs structured logging,
//! runs the projection, writes one `x,y` line per input point, and maps
//! failures to a non-zero exit code.

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use topomap_cli::{
    cli::{Cli, CliError, run_cli, write_projection},
    logging::{self, LoggingError},
};
use tracing::{error, field};

/// Execute the parsed command and write the projection to its destination.
fn try_main(cli: Cli) -> Result<()> {
    let summary = run_cli(cli).context("failed to execute command")?;
    write_projection(&summary, io::stdout().lock()).context("failed to write projection")?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = logging::init_logging(cli.verbose()) {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main(cli) {
        let core = err
            .downcast_ref::<CliError>()
            .and_then(|cli_error| match cli_error {
                CliError::Core(core) => Some(core),
                _ => None,
            });

        let code_field = core.map(|core| field::display(core.code().as_str()));
        let data_source_code_field = core
            .and_then(|core| core.data_source_code())
            .map(|code| field::display(code.as_str()));
        let placement_code_field = core
            .and_then(|core| core.placement_code())
            .map(|code| field::display(code.as_str()));

        let message = format!("{err:#}");
        error!(
            error = %message,
            code = code_field,
            data_source_code = data_source_code_field,
            placement_code = placement_code_field,
            "command execution failed"
        );
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

#[expect(
    clippy::print_stderr,
    reason = "Emit one-off diagnostic before tracing is initialized"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialize logging: {err}");
}
