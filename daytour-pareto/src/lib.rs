//! Pareto-frontier exploration over the objective-weight simplex.
//!
//! The explorer sweeps a grid of [`ObjectiveWeights`] combinations, runs the
//! full build-compose-solve pipeline once per combination through any
//! [`Solver`], and reduces the collected outcomes to the non-dominated
//! subset. The sweep progresses through the stages
//! `Idle -> Expanding -> Solving(i) -> Reducing -> Done`: the grid is
//! expanded up front, each run is independent of every other, and the final
//! reduction only happens once the complete table has been collected.
//!
//! Infeasible runs stay in the table as data points without metrics and are
//! excluded from the reduction; data-integrity failures (missing travel
//! data) abort the whole sweep. For identical inputs the set of retained
//! metrics is reproducible; which of several equal-cost optima represents a
//! grid point is a backend artefact, documented rather than guaranteed.

#![forbid(unsafe_code)]

use daytour_core::{
    InvalidConfigurationError, Metrics, ObjectiveWeights, SolveError, SolveStatus, Solver,
    TourRequest,
};
use serde::{Deserialize, Serialize};

/// Crowd-weight scale applied to the normalized simplex, matching the unit
/// balance of [`ObjectiveWeights::BALANCED`].
const CROWD_SCALE: f64 = 10.0;

/// Venue-weight scale applied (negated) to the normalized simplex.
const VENUE_SCALE: f64 = 90.0;

/// Smallest raw weight sampled on each axis, so no objective is ever
/// dropped entirely from a combination.
const AXIS_MIN: f64 = 0.1;

/// Largest raw weight sampled on each axis.
const AXIS_MAX: f64 = 1.0;

/// An evenly sampled grid over the three-objective weight simplex.
///
/// Each axis takes `points_per_axis` values on `0.1..=1.0`; the full cube
/// of combinations is normalized so the three raw weights sum to one, then
/// mapped onto effective [`ObjectiveWeights`] with the engine's unit scales
/// (travel unchanged, crowd x10, venues x-90).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightGrid {
    points_per_axis: usize,
}

impl WeightGrid {
    /// A grid with `points_per_axis` samples per objective.
    pub const fn new(points_per_axis: usize) -> Result<Self, InvalidConfigurationError> {
        if points_per_axis == 0 {
            return Err(InvalidConfigurationError::EmptyWeightGrid);
        }
        Ok(Self { points_per_axis })
    }

    /// Samples per axis.
    #[must_use]
    pub const fn points_per_axis(&self) -> usize {
        self.points_per_axis
    }

    /// Every weight combination of the grid, in row-major axis order.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "sampling and normalizing the weight simplex is float work"
    )]
    pub fn combinations(&self) -> Vec<ObjectiveWeights> {
        let axis: Vec<f64> = (0..self.points_per_axis)
            .map(|step| {
                if self.points_per_axis == 1 {
                    AXIS_MIN
                } else {
                    let fraction = step as f64 / (self.points_per_axis - 1) as f64;
                    AXIS_MIN + (AXIS_MAX - AXIS_MIN) * fraction
                }
            })
            .collect();

        let mut combinations = Vec::with_capacity(axis.len().pow(3));
        for &travel in &axis {
            for &crowd in &axis {
                for &venues in &axis {
                    let total = travel + crowd + venues;
                    combinations.push(ObjectiveWeights {
                        travel: travel / total,
                        crowd: crowd / total * CROWD_SCALE,
                        venues: -(venues / total) * VENUE_SCALE,
                    });
                }
            }
        }
        combinations
    }
}

/// One row of the sweep table: the weights tried and what came back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedRun {
    /// Effective weights handed to the solver.
    pub weights: ObjectiveWeights,
    /// How the run concluded.
    pub status: SolveStatus,
    /// Metrics of the returned itinerary; absent for infeasible runs.
    pub metrics: Option<Metrics>,
}

/// Full sweep output: every explored combination plus the retained front.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParetoAnalysis {
    /// One row per explored weight combination, in grid order.
    pub runs: Vec<WeightedRun>,
    /// The non-dominated subset of `runs`, in the same order.
    pub front: Vec<WeightedRun>,
}

/// Sweeps a weight grid across a solver and reduces the results.
pub struct ParetoExplorer<'a, S: Solver> {
    solver: &'a S,
    base: TourRequest,
    grid: WeightGrid,
}

impl<'a, S: Solver> ParetoExplorer<'a, S> {
    /// An explorer re-running `base` under each grid combination.
    ///
    /// The base request's own weights are ignored; everything else (day,
    /// window, candidates, workers, time budget) applies to every run.
    pub const fn new(solver: &'a S, base: TourRequest, grid: WeightGrid) -> Self {
        Self { solver, base, grid }
    }

    /// Run the sweep to completion.
    ///
    /// Runs execute sequentially; they are mutually independent, so a
    /// worker pool would be equally correct, but the reduction must see the
    /// complete table either way. An infeasible run is a filtered-out data
    /// point, never a reason to abort; solver errors are.
    pub fn explore(&self) -> Result<ParetoAnalysis, SolveError> {
        let combinations = self.grid.combinations();
        let total = combinations.len();
        log::info!("expanding weight grid: {total} combinations");

        let mut runs = Vec::with_capacity(total);
        for (index, weights) in combinations.into_iter().enumerate() {
            let mut request = self.base.clone();
            request.weights = weights;
            let outcome = self.solver.solve(&request)?;
            log::debug!("run {}/{total}: {:?}", index + 1, outcome.status);
            runs.push(WeightedRun {
                weights,
                status: outcome.status,
                metrics: outcome.itinerary.map(|itinerary| itinerary.metrics),
            });
        }

        let front = pareto_front(&runs);
        log::info!("reduced {total} runs to a front of {}", front.len());
        Ok(ParetoAnalysis { runs, front })
    }
}

/// Whether `first` dominates `second`: no worse on travel, crowd exposure
/// and venue count (the latter maximizing), and strictly better on at least
/// one of them.
#[must_use]
pub fn dominates(first: &Metrics, second: &Metrics) -> bool {
    let no_worse = first.total_travel_minutes <= second.total_travel_minutes
        && first.total_crowd_exposure <= second.total_crowd_exposure
        && first.venues_visited >= second.venues_visited;
    let strictly_better = first.total_travel_minutes < second.total_travel_minutes
        || first.total_crowd_exposure < second.total_crowd_exposure
        || first.venues_visited > second.venues_visited;
    no_worse && strictly_better
}

/// Reduce a run table to its non-dominated subset, preserving order.
///
/// Runs without metrics never enter the front. Ties (equal metrics) are all
/// retained: neither solution dominates the other.
#[must_use]
pub fn pareto_front(runs: &[WeightedRun]) -> Vec<WeightedRun> {
    runs.iter()
        .filter(|run| {
            run.metrics.as_ref().is_some_and(|metrics| {
                !runs.iter().any(|other| {
                    other
                        .metrics
                        .as_ref()
                        .is_some_and(|candidate| dominates(candidate, metrics))
                })
            })
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "deriving the average for tiny test fixtures"
    )]
    fn metrics(travel: u32, crowd: i32, venues: usize) -> Metrics {
        Metrics {
            total_travel_minutes: travel,
            total_crowd_exposure: crowd,
            average_crowd_level: f64::from(crowd) / venues.max(1) as f64,
            venues_visited: venues,
        }
    }

    fn run(travel: u32, crowd: i32, venues: usize) -> WeightedRun {
        WeightedRun {
            weights: ObjectiveWeights::default(),
            status: SolveStatus::Optimal,
            metrics: Some(metrics(travel, crowd, venues)),
        }
    }

    #[rstest]
    fn grid_size_is_cubic_in_the_axis_resolution() {
        assert_eq!(WeightGrid::new(1).unwrap().combinations().len(), 1);
        assert_eq!(WeightGrid::new(2).unwrap().combinations().len(), 8);
        assert_eq!(WeightGrid::new(3).unwrap().combinations().len(), 27);
    }

    #[rstest]
    fn grid_rejects_zero_resolution() {
        assert_eq!(
            WeightGrid::new(0).unwrap_err(),
            InvalidConfigurationError::EmptyWeightGrid
        );
    }

    #[rstest]
    #[expect(
        clippy::float_arithmetic,
        reason = "checking the normalization arithmetic"
    )]
    fn combinations_are_normalized_and_scaled() {
        for weights in WeightGrid::new(3).unwrap().combinations() {
            let raw_sum = weights.travel + weights.crowd / 10.0 - weights.venues / 90.0;
            assert!((raw_sum - 1.0).abs() < 1e-9, "raw weights sum to {raw_sum}");
            assert!(weights.travel > 0.0);
            assert!(weights.crowd > 0.0);
            assert!(weights.venues < 0.0, "venue count must stay rewarded");
        }
    }

    #[rstest]
    fn domination_requires_strict_improvement() {
        let base = metrics(30, -2, 3);
        assert!(dominates(&metrics(20, -2, 3), &base));
        assert!(dominates(&metrics(30, -3, 3), &base));
        assert!(dominates(&metrics(30, -2, 4), &base));
        // Equal metrics dominate in no direction.
        assert!(!dominates(&base, &base));
        // A trade-off dominates neither way.
        let trade = metrics(10, 2, 3);
        assert!(!dominates(&trade, &base));
        assert!(!dominates(&base, &trade));
    }

    #[rstest]
    fn front_drops_dominated_rows_and_keeps_ties() {
        let rows = vec![
            run(30, -2, 3),
            run(40, -2, 3), // dominated: slower, nothing better
            run(10, 2, 2),  // trade-off: kept
            run(30, -2, 3), // exact tie: kept
            WeightedRun {
                weights: ObjectiveWeights::default(),
                status: SolveStatus::Infeasible,
                metrics: None, // filtered data point
            },
        ];
        let front = pareto_front(&rows);
        assert_eq!(front.len(), 3);
        assert!(front.iter().all(|row| row.metrics.is_some()));
        assert!(
            front
                .iter()
                .all(|row| row.metrics.as_ref().unwrap().total_travel_minutes != 40)
        );
    }

    #[rstest]
    fn front_is_pairwise_non_dominated() {
        let rows = vec![run(30, -2, 3), run(28, 0, 3), run(5, 1, 1), run(60, -4, 3)];
        let front = pareto_front(&rows);
        for first in &front {
            for second in &front {
                let (a, b) = (
                    first.metrics.as_ref().unwrap(),
                    second.metrics.as_ref().unwrap(),
                );
                assert!(!dominates(a, b) || !dominates(b, a));
                if !std::ptr::eq(first, second) {
                    assert!(!dominates(a, b));
                }
            }
        }
    }
}
