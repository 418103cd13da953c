//! Command-line interface for the daytour itinerary engine.
//!
//! Two subcommands cover the engine's surface: `solve` runs one optimization
//! over a snapshot directory and prints the outcome as JSON; `pareto` sweeps
//! the weight grid and emits the full run table plus the non-dominated
//! front.

#![forbid(unsafe_code)]

use std::time::Duration;

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

use daytour_core::{
    DayOfWeek, MemoryVenueStore, ObjectiveWeights, TimeOfDay, TourRequest, VenueId, VenueStore,
};

mod error;
mod pareto;
mod solve;

pub use error::CliError;

/// Run the daytour CLI with the current process arguments.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    cli.execute(&mut stdout)
}

#[derive(Debug, Parser)]
#[command(
    name = "daytour",
    about = "Single-day itinerary optimization over venue, crowd and travel snapshots",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

impl Cli {
    fn execute(self, writer: &mut dyn std::io::Write) -> Result<(), CliError> {
        match self.command {
            Command::Solve(args) => solve::run_solve(args, writer),
            Command::Pareto(args) => pareto::run_pareto(args, writer),
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Optimize one itinerary and print it as JSON.
    Solve(solve::SolveArgs),
    /// Sweep the weight grid and print the trade-off table and front.
    Pareto(pareto::ParetoArgs),
}

/// Arguments shared by every optimization subcommand.
#[derive(Debug, Clone, Args)]
pub(crate) struct TourArgs {
    /// Directory holding venues.json, dwell_times.csv and timed_routes.csv.
    #[arg(long = "data-dir", value_name = "dir")]
    pub(crate) data_dir: Utf8PathBuf,
    /// Day of the week for the tour.
    #[arg(long, value_name = "day")]
    pub(crate) day: DayOfWeek,
    /// Earliest tour start, HH:MM on the half-hour grid.
    #[arg(long = "start", value_name = "HH:MM", default_value = "09:00")]
    pub(crate) tour_start: TimeOfDay,
    /// Latest tour end, HH:MM on the half-hour grid.
    #[arg(long = "end", value_name = "HH:MM", default_value = "21:00")]
    pub(crate) tour_end: TimeOfDay,
    /// Candidate venue; repeat for several. Defaults to the whole snapshot.
    #[arg(long = "venue", value_name = "name")]
    pub(crate) venues: Vec<String>,
    /// Weight on total travel minutes.
    #[arg(long, value_name = "weight", allow_hyphen_values = true)]
    pub(crate) travel_weight: Option<f64>,
    /// Weight on total crowd exposure.
    #[arg(long, value_name = "weight", allow_hyphen_values = true)]
    pub(crate) crowd_weight: Option<f64>,
    /// Weight on venue count; negative rewards more venues.
    #[arg(long, value_name = "weight", allow_hyphen_values = true)]
    pub(crate) venues_weight: Option<f64>,
    /// Solver worker count.
    #[arg(long, value_name = "n", default_value_t = 1)]
    pub(crate) workers: u32,
    /// Solver time budget in seconds.
    #[arg(
        long = "time-limit",
        value_name = "seconds",
        default_value_t = 30.0,
        allow_hyphen_values = true
    )]
    pub(crate) time_limit: f64,
}

impl TourArgs {
    /// Assemble the request, defaulting the candidate set to the snapshot.
    pub(crate) fn request(&self, store: &MemoryVenueStore) -> Result<TourRequest, CliError> {
        if !self.time_limit.is_finite() || self.time_limit < 0.0 {
            return Err(CliError::InvalidTimeLimit {
                seconds: self.time_limit,
            });
        }
        let venues: Vec<VenueId> = if self.venues.is_empty() {
            store.venues().map(|venue| venue.id().clone()).collect()
        } else {
            self.venues.iter().map(VenueId::new).collect()
        };
        let defaults = ObjectiveWeights::default();
        let request = TourRequest {
            day: self.day,
            window_start: self.tour_start,
            window_end: self.tour_end,
            venues,
            weights: ObjectiveWeights {
                travel: self.travel_weight.unwrap_or(defaults.travel),
                crowd: self.crowd_weight.unwrap_or(defaults.crowd),
                venues: self.venues_weight.unwrap_or(defaults.venues),
            },
            num_workers: self.workers,
            time_limit: Duration::from_secs_f64(self.time_limit),
        };
        request.validate()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests;
