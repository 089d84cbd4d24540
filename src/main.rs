use clap::Parser;
use gridfill::fill::relax::format_scientific;
use gridfill::io::{read_csv_grid_from_path, write_csv_grid, write_csv_grid_to_path};
use gridfill::plot::make_grid_heatmap;
use gridfill::{fill_with_records, FillOptionsBuilder};
use log::info;
use ndarray::Ix2;
use pretty_env_logger;
use std::process::ExitCode;
use std::{error::Error, path::PathBuf};

#[derive(Parser, Debug)]
#[command(
    author,
    about = "Fill missing values in a 2-D grid by solving Poisson's equation with a relaxation scheme",
    long_about = None,
    version = env!("GRIDFILL_VERSION")
)]
struct Cli {
    /// Path to a CSV file holding the grid (one row per line, no header)
    input_path: PathBuf,

    /// Tolerance on the maximum residual for the solution to be complete
    #[clap(long)]
    eps: f64,

    /// Relaxation constant, usually 0.45 <= relax <= 0.6
    #[clap(long, default_value = "0.6")]
    relax: f64,

    /// Maximum number of relaxation sweeps
    #[clap(long, default_value = "100")]
    itermax: usize,

    /// Initialize missing values with the zonal (row) mean instead of zero
    #[clap(long, action)]
    initzonal: bool,

    /// Treat the columns as periodic (first and last column adjacent)
    #[clap(long, action)]
    cyclic: bool,

    /// Print convergence information to stderr
    #[clap(short, long, action)]
    verbose: bool,

    /// Token marking a missing cell, in addition to empty cells and NaN
    #[clap(short, long)]
    missing_value: Option<String>,

    /// Output file path (default: write the filled grid to stdout)
    #[clap(short, long)]
    output_filepath: Option<PathBuf>,

    /// Save a heat-map of the filled grid to an HTML file
    #[clap(long)]
    save_plot: Option<PathBuf>,

    /// Show a heat-map of the filled grid in the browser
    #[clap(long, action)]
    show_plot: bool,
}

fn entrypoint() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let grid = read_csv_grid_from_path(&cli.input_path, cli.missing_value.as_deref())?;
    info!(
        "Read {} with {} missing value(s)",
        cli.input_path.display(),
        grid.count_missing()
    );

    let options = FillOptionsBuilder::default()
        .relax(cli.relax)
        .itermax(cli.itermax)
        .initzonal(cli.initzonal)
        .cyclic(cli.cyclic)
        .build()?;
    let output = fill_with_records(&grid, 1, 0, cli.eps, &options)?;
    let filled = output.grid().view().into_dimensionality::<Ix2>()?;
    // stdout may carry the filled grid, so diagnostics go to stderr
    if cli.verbose {
        for record in output.records() {
            eprintln!("{}", record);
        }
    } else if output.not_converged_count() > 0 {
        eprintln!(
            "Warning: relaxation did not converge (maximum residual {})",
            format_scientific(output.max_residual()?)
        );
    }

    match &cli.output_filepath {
        Some(output_path) => {
            write_csv_grid_to_path(output_path, &filled)?;
            eprintln!("Wrote {}", output_path.display());
        }
        None => write_csv_grid(std::io::stdout().lock(), &filled)?,
    }

    if cli.show_plot || cli.save_plot.is_some() {
        let plot = make_grid_heatmap(&filled);
        if let Some(save_path) = &cli.save_plot {
            plot.write_html(save_path);
            eprintln!("Saved plot to {}", save_path.display());
        }
        if cli.show_plot {
            plot.show();
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    match entrypoint() {
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
    }
}
