//! The solve contract shared by optimizer backends.
//!
//! A backend takes an immutable input-model snapshot plus a [`TourRequest`]
//! and produces a [`SolveOutcome`]. Each solve is an independent,
//! side-effect-free build-solve-extract cycle: no state persists between
//! runs and concurrent runs never observe each other.

use std::time::Duration;

use thiserror::Error;

use crate::schedule::Itinerary;
use crate::time::{DayOfWeek, ParseDayOfWeekError, ParseTimeOfDayError, SlotGrid, TimeOfDay};
use crate::travel::MissingTravelDataError;
use crate::venue::VenueId;
use crate::weights::ObjectiveWeights;

/// Parameters for one optimization run.
///
/// # Examples
/// ```rust
/// use std::time::Duration;
/// use daytour_core::{DayOfWeek, ObjectiveWeights, TourRequest};
///
/// let request = TourRequest {
///     day: DayOfWeek::Tuesday,
///     window_start: "09:00".parse().unwrap(),
///     window_end: "21:00".parse().unwrap(),
///     venues: vec!["CN Tower".into()],
///     weights: ObjectiveWeights::default(),
///     num_workers: 1,
///     time_limit: Duration::from_secs(30),
/// };
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TourRequest {
    /// Day whose operating-hours, crowd and travel snapshot applies.
    pub day: DayOfWeek,
    /// Earliest the tour may start.
    pub window_start: TimeOfDay,
    /// Latest the tour must have ended.
    pub window_end: TimeOfDay,
    /// Candidate venues the optimizer may select from.
    pub venues: Vec<VenueId>,
    /// Objective scalarization weights.
    pub weights: ObjectiveWeights,
    /// Parallel worker count handed to the backend search.
    pub num_workers: u32,
    /// Wall-clock budget for the solve.
    pub time_limit: Duration,
}

impl TourRequest {
    /// Fail fast on malformed configuration, before any solve attempt.
    pub fn validate(&self) -> Result<(), InvalidConfigurationError> {
        self.grid()?;
        if self.venues.is_empty() {
            return Err(InvalidConfigurationError::NoCandidates);
        }
        Ok(())
    }

    /// The slot grid induced by the tour window.
    pub fn grid(&self) -> Result<SlotGrid, InvalidConfigurationError> {
        SlotGrid::new(self.window_start, self.window_end)
    }
}

/// Malformed optimizer configuration, rejected before any solve attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidConfigurationError {
    /// A day name was not one of the seven English names.
    #[error(transparent)]
    UnknownDay(#[from] ParseDayOfWeekError),
    /// A time string could not be read as `HH:MM`.
    #[error(transparent)]
    MalformedTime(#[from] ParseTimeOfDayError),
    /// The tour window does not start strictly before it ends.
    #[error("tour window {start}..{end} must start before it ends")]
    EmptyWindow {
        /// Requested window start.
        start: TimeOfDay,
        /// Requested window end.
        end: TimeOfDay,
    },
    /// A window boundary is off the 30-minute slot grid.
    #[error("{time} is not aligned to the 30-minute slot grid")]
    MisalignedTime {
        /// The offending boundary.
        time: TimeOfDay,
    },
    /// No candidate venues were supplied.
    #[error("at least one candidate venue is required")]
    NoCandidates,
    /// A requested venue is absent from the venue store.
    #[error("venue {id} is not present in the venue store")]
    UnknownVenue {
        /// The unknown identifier.
        id: VenueId,
    },
    /// The Pareto weight grid was given zero points per axis.
    #[error("weight grid resolution must be at least one point per axis")]
    EmptyWeightGrid,
}

/// How a solve run concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolveStatus {
    /// The returned itinerary is proven optimal for the composed objective.
    Optimal,
    /// A valid itinerary was found but the time budget ran out before
    /// optimality could be claimed. Best-effort, not an error.
    FeasibleTimeLimited,
    /// No valid itinerary exists for the inputs. Expected outcome, not an
    /// error.
    Infeasible,
}

/// Search statistics reported alongside an outcome.
///
/// Counters the backend does not expose stay `None`; they are never
/// fabricated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostics {
    /// Wall-clock duration of the backend call.
    pub solve_time: Duration,
    /// Branch-and-bound nodes explored, when the backend reports them.
    pub branches_explored: Option<u64>,
    /// Search conflicts encountered, when the backend reports them.
    pub conflicts: Option<u64>,
    /// Worker count the backend was configured with.
    pub workers: u32,
}

/// Result of one optimization run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveOutcome {
    /// Conclusion of the run.
    pub status: SolveStatus,
    /// The itinerary, absent exactly when the run was infeasible.
    pub itinerary: Option<Itinerary>,
    /// Backend statistics for the run.
    pub diagnostics: Diagnostics,
}

impl SolveOutcome {
    /// An infeasible outcome carrying only diagnostics.
    #[must_use]
    pub const fn infeasible(diagnostics: Diagnostics) -> Self {
        Self {
            status: SolveStatus::Infeasible,
            itinerary: None,
            diagnostics,
        }
    }
}

/// Errors that abort a solve run.
///
/// Infeasibility and time-budget exhaustion are *not* errors; they are
/// reported through [`SolveStatus`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    /// The request failed validation.
    #[error(transparent)]
    InvalidConfiguration(#[from] InvalidConfigurationError),
    /// The travel snapshot lacks a required origin/destination/day entirely.
    #[error(transparent)]
    MissingTravelData(#[from] MissingTravelDataError),
    /// The backend failed in a way the contract does not model.
    #[error("solver backend failure: {0}")]
    Backend(String),
}

/// Plan an itinerary for a request against an immutable input model.
///
/// Implementations must report infeasibility through
/// [`SolveStatus::Infeasible`] rather than an error, and must return a
/// best-effort result (never hang) when the time budget is zero or
/// near-zero. Solvers must be `Send + Sync` so independent runs can be
/// distributed across threads.
pub trait Solver: Send + Sync {
    /// Solve one request, producing an outcome or an error.
    fn solve(&self, request: &TourRequest) -> Result<SolveOutcome, SolveError>;
}
