//! `solve` subcommand: one optimization run, printed as JSON.

use std::io::Write;

use clap::Parser;

use daytour_core::Solver;
use daytour_data::load_input_model;
use daytour_solver_milp::MilpSolver;

use crate::{CliError, TourArgs};

/// CLI arguments for the `solve` subcommand.
#[derive(Debug, Clone, Parser)]
#[command(
    long_about = "Load the snapshot directory, build the constraint model for \
                  the requested day and window, and print the optimized \
                  itinerary with its metrics and solver diagnostics.",
    about = "Optimize a single-day itinerary"
)]
pub(crate) struct SolveArgs {
    #[command(flatten)]
    pub(crate) tour: TourArgs,
}

pub(crate) fn run_solve(args: SolveArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let model = load_input_model(&args.tour.data_dir)?;
    let request = args.tour.request(&model.store)?;
    let solver = MilpSolver::new(model.store, model.travel);
    let outcome = solver.solve(&request)?;
    let payload = serde_json::to_string_pretty(&outcome)?;
    writeln!(writer, "{payload}").map_err(|source| CliError::write_output(None, source))
}
