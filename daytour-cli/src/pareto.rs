//! `pareto` subcommand: weight-grid sweep with non-dominated reduction.

use std::fs;
use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;

use daytour_data::load_input_model;
use daytour_pareto::{ParetoExplorer, WeightGrid};
use daytour_solver_milp::MilpSolver;

use crate::{CliError, TourArgs};

/// CLI arguments for the `pareto` subcommand.
#[derive(Debug, Clone, Parser)]
#[command(
    long_about = "Run the optimizer once per weight combination on a grid \
                  over the objective simplex, then reduce the collected \
                  solutions to the Pareto-optimal subset. The result table \
                  goes to stdout unless --output names a file.",
    about = "Map the travel/crowd/venue-count trade-off space"
)]
pub(crate) struct ParetoArgs {
    #[command(flatten)]
    pub(crate) tour: TourArgs,
    /// Grid resolution per weight axis.
    #[arg(long, value_name = "n", default_value_t = 5)]
    pub(crate) points: usize,
    /// Write the result table to this file instead of stdout.
    #[arg(long, value_name = "path")]
    pub(crate) output: Option<Utf8PathBuf>,
}

pub(crate) fn run_pareto(args: ParetoArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let grid = WeightGrid::new(args.points)?;
    let model = load_input_model(&args.tour.data_dir)?;
    let request = args.tour.request(&model.store)?;
    let solver = MilpSolver::new(model.store, model.travel);
    let analysis = ParetoExplorer::new(&solver, request, grid).explore()?;

    let payload = serde_json::to_string_pretty(&analysis)?;
    match &args.output {
        Some(path) => fs::write(path.as_std_path(), payload)
            .map_err(|source| CliError::write_output(Some(path), source)),
        None => writeln!(writer, "{payload}")
            .map_err(|source| CliError::write_output(None, source)),
    }
}
