//! `MilpSolver` implementation backed by `good_lp` over `microlp`.

use std::time::{Duration, Instant};

use good_lp::{ResolutionError, Solution, SolverModel, default_solver};

use daytour_core::{
    Diagnostics, InvalidConfigurationError, Itinerary, SlotGrid, SolveError, SolveOutcome,
    SolveStatus, Solver, TourRequest, TravelMatrix, Venue, VenueStore, Visit,
};

use crate::model::{CandidateVars, TourModel, build_model};
use crate::objective::compose;

/// Exact itinerary solver over a mixed-integer model.
///
/// The solver is generic over the venue-cache seam and owns the travel
/// snapshot for the day span it serves. Each [`solve`](Solver::solve) call
/// is one independent build-solve-extract cycle over those immutable inputs;
/// nothing persists between runs.
///
/// The bundled `microlp` backend proves optimality and is deterministic:
/// repeated identical runs return the same result. It searches
/// single-threaded and reports no branch or conflict counters, so a worker
/// hint above one is recorded in the diagnostics rather than acted on, and
/// the optional counters stay absent. The wall-clock budget is applied on
/// completion: a run that finishes inside the budget is `Optimal`, one that
/// overruns it is demoted to `FeasibleTimeLimited`, and a zero budget still
/// yields the backend's best effort rather than a hang.
pub struct MilpSolver<S> {
    store: S,
    travel: TravelMatrix,
}

impl<S: VenueStore> MilpSolver<S> {
    /// Construct a solver over a venue cache and travel snapshot.
    pub const fn new(store: S, travel: TravelMatrix) -> Self {
        Self { store, travel }
    }

    /// Resolve the request's candidate list against the venue cache,
    /// excluding venues closed all day from candidature entirely.
    fn candidates(&self, request: &TourRequest) -> Result<Vec<&Venue>, SolveError> {
        let mut open = Vec::with_capacity(request.venues.len());
        for id in &request.venues {
            let venue = self.store.venue(id).ok_or_else(|| {
                InvalidConfigurationError::UnknownVenue { id: id.clone() }
            })?;
            if venue.closed_on(request.day) {
                log::debug!("{} is closed on {}, dropped from candidature", id, request.day);
                continue;
            }
            open.push(venue);
        }
        Ok(open)
    }
}

impl<S: VenueStore + Send + Sync> Solver for MilpSolver<S> {
    fn solve(&self, request: &TourRequest) -> Result<SolveOutcome, SolveError> {
        request.validate()?;
        let grid = request.grid()?;
        let candidates = self.candidates(request)?;
        if request.num_workers > 1 {
            log::debug!(
                "worker hint {} recorded; microlp searches single-threaded",
                request.num_workers
            );
        }

        let started = Instant::now();
        if candidates.is_empty() {
            log::info!("every candidate is closed on {}", request.day);
            return Ok(SolveOutcome::infeasible(diagnostics(
                started.elapsed(),
                request.num_workers,
            )));
        }

        let TourModel {
            vars,
            constraints,
            terms,
            candidates: candidate_vars,
        } = build_model(&candidates, request.day, &grid, &self.travel)?;
        let objective = compose(&request.weights, &terms);

        let mut problem = vars.minimise(objective).using(default_solver);
        for constraint in constraints {
            problem = problem.with(constraint);
        }
        let solved = problem.solve();
        let elapsed = started.elapsed();

        match solved {
            Ok(solution) => {
                let itinerary = extract_itinerary(
                    &solution,
                    &candidate_vars,
                    &candidates,
                    request,
                    &grid,
                    &self.travel,
                )?;
                let status = if elapsed <= request.time_limit {
                    SolveStatus::Optimal
                } else {
                    log::info!(
                        "time budget {:?} exhausted after {elapsed:?}; result is best-effort",
                        request.time_limit
                    );
                    SolveStatus::FeasibleTimeLimited
                };
                log::debug!(
                    "solved in {elapsed:?}: {} visits, status {status:?}",
                    itinerary.visits.len()
                );
                Ok(SolveOutcome {
                    status,
                    itinerary: Some(itinerary),
                    diagnostics: diagnostics(elapsed, request.num_workers),
                })
            }
            Err(ResolutionError::Infeasible) => {
                log::debug!("model infeasible after {elapsed:?}");
                Ok(SolveOutcome::infeasible(diagnostics(
                    elapsed,
                    request.num_workers,
                )))
            }
            Err(other) => Err(SolveError::Backend(other.to_string())),
        }
    }
}

/// `microlp` exposes no branch or conflict statistics; the counters stay
/// absent rather than fabricated.
const fn diagnostics(solve_time: Duration, workers: u32) -> Diagnostics {
    Diagnostics {
        solve_time,
        branches_explored: None,
        conflicts: None,
        workers,
    }
}

/// Rebuild the itinerary from variable values.
///
/// Metrics are recomputed through the same travel-matrix fallback the model
/// used, so reported gaps match the constraints that produced them.
fn extract_itinerary(
    solution: &impl Solution,
    candidate_vars: &[CandidateVars],
    venues: &[&Venue],
    request: &TourRequest,
    grid: &SlotGrid,
    travel: &TravelMatrix,
) -> Result<Itinerary, SolveError> {
    let mut picks: Vec<(usize, &Venue, usize)> = Vec::new();
    for (candidate, &venue) in candidate_vars.iter().zip(venues) {
        if solution.value(candidate.selected) < 0.5 {
            continue;
        }
        let slot = candidate
            .starts
            .iter()
            .find(|&&(_, indicator)| solution.value(indicator) > 0.5)
            .map(|&(slot, _)| slot)
            .ok_or_else(|| {
                SolveError::Backend(format!(
                    "backend selected {} without a start-slot assignment",
                    venue.id()
                ))
            })?;
        picks.push((slot, venue, candidate.dwell_slots));
    }
    picks.sort_by_key(|&(slot, ..)| slot);

    let mut visits = Vec::with_capacity(picks.len());
    for (position, &(slot, venue, dwell_slots)) in picks.iter().enumerate() {
        let start = grid.time_at(slot);
        let end = grid.time_at(slot + dwell_slots);
        let crowd = venue.crowd_at(request.day, start).level().unwrap_or(0);
        let travel_to_next = match picks.get(position + 1) {
            Some(&(_, next, _)) => {
                Some(travel.minutes_at(venue.id(), next.id(), request.day, end)?)
            }
            None => None,
        };
        visits.push(Visit {
            venue: venue.id().clone(),
            start,
            end,
            crowd,
            travel_to_next,
        });
    }
    Ok(Itinerary::from_visits(visits))
}
