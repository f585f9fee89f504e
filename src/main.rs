use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use slicefloor::{At, FloorplanError, InputError, input, output, plan, svg};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid problem file: {0}")]
    Input(#[from] InputError),
    #[error("floorplanning failed: {0}")]
    Floorplan(FloorplanError),
}

impl From<At<FloorplanError>> for CliError {
    fn from(err: At<FloorplanError>) -> Self {
        tracing::debug!(error = ?err, "floorplan error trace");
        Self::Floorplan(*err.error())
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "slicefloor",
    version,
    about = "Minimum-area slicing floorplan from blocks and a Normalized Polish Expression"
)]
struct Cli {
    /// Problem file: module count, one `<width> <height>` line per module, then the expression.
    in_file: PathBuf,

    /// Result file: four corners per module, then the minimum area.
    out_file: PathBuf,

    /// Also draw the floorplan as SVG.
    #[arg(long, env = "SLICEFLOOR_SVG")]
    svg: Option<PathBuf>,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let text = fs::read_to_string(&cli.in_file).map_err(|source| CliError::Read {
        path: cli.in_file.clone(),
        source,
    })?;
    let problem = input::parse(&text)?;
    tracing::info!(
        modules = problem.modules.len(),
        expression = %problem.expression,
        normalized = problem.expression.is_normalized(),
        "problem loaded"
    );

    let floorplan = plan(&problem.modules, &problem.expression)?;
    write_file(&cli.out_file, &output::render(&floorplan))?;

    if let Some(path) = &cli.svg {
        write_file(path, &svg::render_floorplan_svg(&floorplan))?;
        tracing::info!(path = %path.display(), "svg written");
    }
    Ok(())
}

fn write_file(path: &Path, contents: &str) -> Result<(), CliError> {
    fs::write(path, contents).map_err(|source| CliError::Write {
        path: path.to_path_buf(),
        source,
    })
}
