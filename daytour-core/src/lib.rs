//! Core domain types for the daytour itinerary engine.
//!
//! The crate models one day of touring as data: venues with operating hours,
//! dwell requirements and hourly crowd forecasts; a 30-minute slot grid over
//! the tour window; time-dependent travel durations between venue pairs; and
//! the solve contract ([`Solver`], [`TourRequest`], [`SolveOutcome`]) that
//! optimizer backends implement. Providers of crowd, routing and venue data
//! are external collaborators: their snapshots arrive as plain values and
//! the optimizer reads them through narrow seams ([`VenueStore`],
//! [`TravelMatrix`]).
//!
//! Constructors validate their invariants and return `Result` to surface
//! invalid input early.

#![forbid(unsafe_code)]

mod schedule;
mod solver;
mod store;
mod time;
mod travel;
mod venue;
mod weights;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use schedule::{Itinerary, Metrics, Visit};
pub use solver::{
    Diagnostics, InvalidConfigurationError, SolveError, SolveOutcome, SolveStatus, Solver,
    TourRequest,
};
pub use store::{MemoryVenueStore, VenueStore};
pub use time::{
    DayOfWeek, ParseDayOfWeekError, ParseTimeOfDayError, SLOT_MINUTES, SlotGrid, TimeOfDay,
};
pub use travel::{MissingTravelDataError, TravelMatrix, TravelSample};
pub use venue::{
    CrowdLevel, CrowdSeries, OpenInterval, OpenIntervalError, Venue, VenueError, VenueId,
    WeekSchedule, WeekScheduleError, WeeklyCrowd,
};
pub use weights::ObjectiveWeights;
