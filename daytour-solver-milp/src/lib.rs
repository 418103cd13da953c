//! Mixed-integer itinerary solver for the daytour engine.
//!
//! Builds a constraint model of one day of touring (venue selection, start
//! slots, sequencing, travel-aware gaps), scalarizes the three objectives
//! with the caller's [`ObjectiveWeights`](daytour_core::ObjectiveWeights)
//! and drives the `good_lp`/`microlp` backend through one blocking solve per
//! request. See [`MilpSolver`] for the backend's guarantees and limits.

#![forbid(unsafe_code)]

mod model;
mod objective;
mod solver;

pub use solver::MilpSolver;
