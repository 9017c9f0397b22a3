//! Command implementations and argument parsing for the TopoMap CLI.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use topomap_core::{DataSource, Projection, TopoMap, TopoMapBuilder, TopoMapError};
use topomap_providers_dense::{DenseMatrixProvider, DenseMatrixProviderError};
use tracing::{Span, field, info, instrument};

const DEFAULT_LEAF_SIZE: usize = 1;
const DEFAULT_PRECISION: usize = 10;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "topomap",
    about = "Project high-dimensional points to 2D while preserving their minimum spanning tree."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Returns whether debug logging was requested.
    #[must_use]
    pub fn verbose(&self) -> bool {
        match &self.command {
            Command::Run(run) => run.verbose,
        }
    }
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Project a point cloud and write the 2D coordinates.
    Run(RunCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Maximum number of points per kd-tree leaf.
    #[arg(
        long = "leaf-size",
        default_value_t = DEFAULT_LEAF_SIZE,
        value_parser = clap::value_parser!(usize),
    )]
    pub leaf_size: usize,

    /// Decimal places written for each coordinate.
    #[arg(long, default_value_t = DEFAULT_PRECISION)]
    pub precision: usize,

    /// Write the projection to this file instead of stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Emit debug-level diagnostics unless `RUST_LOG` says otherwise.
    #[arg(long, short)]
    pub verbose: bool,

    /// Data source configuration.
    #[command(subcommand)]
    pub source: RunSource,
}

/// Input data sources supported by the `run` command.
#[derive(Debug, Subcommand, Clone)]
pub enum RunSource {
    /// Read a headerless CSV file with one point per line.
    Csv(CsvArgs),
    /// Read a Parquet file containing a `FixedSizeList<Float32 | Float64, D>` column.
    Parquet(ParquetArgs),
}

/// CSV ingestion arguments.
#[derive(Debug, Args, Clone)]
pub struct CsvArgs {
    /// Path to the CSV file.
    pub path: PathBuf,

    /// Override name for the data source (defaults to the file name).
    #[arg(long)]
    pub name: Option<String>,
}

/// Parquet ingestion arguments.
#[derive(Debug, Args, Clone)]
pub struct ParquetArgs {
    /// Path to the Parquet file containing feature vectors.
    pub path: PathBuf,

    /// Column containing `FixedSizeList<Float32 | Float64, D>` rows.
    #[arg(long)]
    pub column: String,

    /// Override name for the data source (defaults to the file name).
    #[arg(long)]
    pub name: Option<String>,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// A file could not be opened or created.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Writing the projection failed.
    #[error("failed to write projection: {0}")]
    Output(#[source] io::Error),
    /// Dense matrix ingestion failed.
    #[error(transparent)]
    Dense(#[from] DenseMatrixProviderError),
    /// Configuration, spanning tree or placement failed.
    #[error(transparent)]
    Core(#[from] TopoMapError),
}

/// Outcome of executing the `run` command, ready to be written.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Name reported by the data source implementation.
    pub data_source: String,
    /// Planar coordinates in input order.
    pub projection: Projection,
    /// Decimal places written for each coordinate.
    pub precision: usize,
    /// Destination file, or `None` for the caller's writer.
    pub output: Option<PathBuf>,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading the input or projecting it fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use topomap_cli::cli::{Cli, Command, CsvArgs, RunCommand, RunSource, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "0,0\n3,4\n")?;
/// let cli = Cli {
///     command: Command::Run(RunCommand {
///         leaf_size: 1,
///         precision: 3,
///         output: None,
///         verbose: false,
///         source: RunSource::Csv(CsvArgs {
///             path: file.path().to_path_buf(),
///             name: None,
///         }),
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.projection.len(), 2);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Run(run) => {
            Span::current().record("command", field::display("run"));
            run_command(run)
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(leaf_size = field::Empty, source = field::Empty),
)]
pub(super) fn run_command(command: RunCommand) -> Result<ExecutionSummary, CliError> {
    let RunCommand {
        leaf_size,
        precision,
        output,
        source,
        ..
    } = command;
    let topomap = TopoMapBuilder::new().with_leaf_size(leaf_size).build()?;

    let span = Span::current();
    span.record("leaf_size", field::display(leaf_size));

    let (data_source, projection) = match source {
        RunSource::Csv(args) => {
            span.record("source", field::display("csv"));
            run_csv(&topomap, args)?
        }
        RunSource::Parquet(args) => {
            span.record("source", field::display("parquet"));
            run_parquet(&topomap, args)?
        }
    };

    info!(
        data_source = data_source.as_str(),
        points = projection.len(),
        "command completed"
    );
    Ok(ExecutionSummary {
        data_source,
        projection,
        precision,
        output,
    })
}

#[instrument(
    name = "cli.run_csv",
    err,
    skip(topomap, args),
    fields(path = field::Empty, override_name = field::Empty),
)]
pub(super) fn run_csv(
    topomap: &TopoMap,
    args: CsvArgs,
) -> Result<(String, Projection), CliError> {
    let CsvArgs { path, name } = args;
    let span = Span::current();
    span.record("path", field::display(path.display()));
    span.record(
        "override_name",
        field::display(name.as_deref().unwrap_or("<derived>")),
    );
    let chosen_name = derive_data_source_name(&path, name.as_deref());
    let reader = open_csv_reader(&path)?;
    let provider = DenseMatrixProvider::try_from_csv_reader(chosen_name, reader)?;
    project_provider(topomap, &provider)
}

#[instrument(
    name = "cli.run_parquet",
    err,
    skip(topomap, args),
    fields(path = field::Empty, column = field::Empty, override_name = field::Empty),
)]
pub(super) fn run_parquet(
    topomap: &TopoMap,
    args: ParquetArgs,
) -> Result<(String, Projection), CliError> {
    let ParquetArgs { path, column, name } = args;
    let span = Span::current();
    span.record("path", field::display(path.display()));
    span.record("column", field::display(&column));
    span.record(
        "override_name",
        field::display(name.as_deref().unwrap_or("<derived>")),
    );
    let chosen_name = derive_data_source_name(&path, name.as_deref());
    let provider = DenseMatrixProvider::try_from_parquet_path(chosen_name, &path, &column)?;
    project_provider(topomap, &provider)
}

fn project_provider(
    topomap: &TopoMap,
    provider: &DenseMatrixProvider,
) -> Result<(String, Projection), CliError> {
    info!(
        data_source = provider.name(),
        points = provider.len(),
        dimension = provider.dimension(),
        "points loaded"
    );
    let projection = topomap.run(provider)?;
    Ok((provider.name().to_owned(), projection))
}

#[instrument(name = "cli.open_csv_reader", err, fields(path = field::Empty))]
pub(super) fn open_csv_reader(path: &Path) -> Result<BufReader<File>, CliError> {
    Span::current().record("path", field::display(path.display()));
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

pub(super) fn derive_data_source_name(path: &Path, override_name: Option<&str>) -> String {
    if let Some(name) = override_name {
        return name.to_owned();
    }

    path.file_stem()
        .and_then(|value| value.to_str())
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| "data_source".to_owned())
}

/// Writes `summary` to its output file, or to `stdout` when none was given.
///
/// # Errors
/// Returns [`CliError::Io`] when the output file cannot be created and
/// [`CliError::Output`] when writing fails.
#[instrument(
    name = "cli.write_projection",
    err,
    skip(summary, stdout),
    fields(destination = field::Empty, points = summary.projection.len()),
)]
pub fn write_projection(summary: &ExecutionSummary, stdout: impl Write) -> Result<(), CliError> {
    let span = Span::current();
    match &summary.output {
        Some(path) => {
            span.record("destination", field::display(path.display()));
            let file = File::create(path).map_err(|source| CliError::Io {
                path: path.clone(),
                source,
            })?;
            emit(summary, BufWriter::new(file))
        }
        None => {
            span.record("destination", field::display("<stdout>"));
            emit(summary, BufWriter::new(stdout))
        }
    }
}

fn emit(summary: &ExecutionSummary, mut writer: impl Write) -> Result<(), CliError> {
    render_projection(&summary.projection, summary.precision, &mut writer)
        .and_then(|()| writer.flush())
        .map_err(CliError::Output)
}

/// Renders `projection` as one `x,y` line per point with `precision`
/// decimal places.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use topomap_cli::cli::render_projection;
/// # use topomap_core::{Point, Projection};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let projection = Projection::new(vec![Point::new(0.0, 0.0), Point::new(0.5, -2.0)]);
/// let mut buffer = Vec::new();
/// render_projection(&projection, 2, &mut buffer)?;
/// assert_eq!(String::from_utf8(buffer)?, "0.00,0.00\n0.50,-2.00\n");
/// # Ok(())
/// # }
/// ```
pub fn render_projection(
    projection: &Projection,
    precision: usize,
    mut writer: impl Write,
) -> io::Result<()> {
    for point in projection.points() {
        writeln!(writer, "{:.precision$},{:.precision$}", point.x, point.y)?;
    }
    Ok(())
}
