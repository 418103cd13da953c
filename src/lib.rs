//! Facade crate for the daytour itinerary engine.
//!
//! This crate re-exports the core domain types and exposes the optional
//! solver and Pareto-exploration implementations behind feature flags.

#![forbid(unsafe_code)]

pub use daytour_core::{
    CrowdLevel, CrowdSeries, DayOfWeek, Diagnostics, InvalidConfigurationError, Itinerary,
    MemoryVenueStore, Metrics, MissingTravelDataError, ObjectiveWeights, SlotGrid, SolveError,
    SolveOutcome, SolveStatus, Solver, TimeOfDay, TourRequest, TravelMatrix, TravelSample, Venue,
    VenueId, VenueStore, Visit, WeekSchedule, WeeklyCrowd,
};

#[cfg(feature = "solver-milp")]
pub use daytour_solver_milp::MilpSolver;

#[cfg(feature = "pareto")]
pub use daytour_pareto::{ParetoAnalysis, ParetoExplorer, WeightGrid, WeightedRun};
