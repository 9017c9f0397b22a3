//! Command-line interface orchestration for TopoMap projections.
//!
//! The CLI offers a `run` command that loads a dense point cloud from CSV or
//! Parquet, projects it to the plane, and writes one `x,y` line per point.

mod commands;

pub use commands::{
    Cli, CliError, Command, CsvArgs, ExecutionSummary, ParquetArgs, RunCommand, RunSource,
    render_projection, run_cli, write_projection,
};
