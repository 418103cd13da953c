//! Mixed-integer model of one day of touring.
//!
//! The builder turns an immutable input-model snapshot into `good_lp`
//! variables and constraints whose feasible points are exactly the valid
//! itineraries: visits inside operating hours, minimum dwell respected, one
//! traveller timeline with travel-aware gaps between consecutive stops.
//!
//! Encoding summary, per candidate venue: a selection binary, plus one
//! indicator binary per feasible start slot (the start time is the linear
//! combination of indicators, so window containment and dwell fit are domain
//! facts rather than constraints). Sequencing uses successor-arc binaries
//! with unit in/out-flow for selected venues; the pairwise "A before B or B
//! before A" disjunction of classic disjunctive scheduling is realised by
//! the total order the arc chain induces, and the arcs additionally identify
//! consecutive legs so the travel objective stays linear. Timing links are
//! big-M deactivated unless both the arc and the leader's start indicator
//! are active; travel is resolved through the matrix fallback at the
//! leader's end slot, never interpolated.

use std::collections::HashMap;

use good_lp::{Constraint, Expression, ProblemVariables, Variable, constraint, variable, variables};

use daytour_core::{
    DayOfWeek, MissingTravelDataError, SLOT_MINUTES, SlotGrid, SolveError, TravelMatrix, Venue,
};

/// Decision variables attached to one candidate venue.
pub(crate) struct CandidateVars {
    /// Selection flag.
    pub selected: Variable,
    /// `(slot, indicator)` per feasible start slot, ascending.
    pub starts: Vec<(usize, Variable)>,
    /// Dwell duration in whole slots, rounded up.
    pub dwell_slots: usize,
}

/// The three raw objective terms the composer weighs.
pub(crate) struct ObjectiveTerms {
    /// Total inter-visit travel in minutes.
    pub travel_minutes: Expression,
    /// Total crowd exposure sampled at start slots.
    pub crowd_exposure: Expression,
    /// Number of selected venues.
    pub venues_selected: Expression,
}

/// A built model, ready to hand to the backend.
pub(crate) struct TourModel {
    pub vars: ProblemVariables,
    pub constraints: Vec<Constraint>,
    pub terms: ObjectiveTerms,
    pub candidates: Vec<CandidateVars>,
}

impl core::fmt::Debug for TourModel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TourModel")
            .field("constraints", &self.constraints.len())
            .field("candidates", &self.candidates.len())
            .finish_non_exhaustive()
    }
}

/// Construct the model for a fixed day, grid and candidate set.
///
/// Candidates closed all day must already be filtered out by the caller.
/// A candidate whose dwell fits no open interval keeps an empty start
/// domain, which forces its selection flag off; whether that makes the whole
/// model infeasible is the solver's verdict, not a build error.
pub(crate) fn build_model(
    venues: &[&Venue],
    day: DayOfWeek,
    grid: &SlotGrid,
    travel: &TravelMatrix,
) -> Result<TourModel, SolveError> {
    ModelBuilder::new(venues, day, grid, travel).build()
}

struct ModelBuilder<'a> {
    venues: &'a [&'a Venue],
    day: DayOfWeek,
    grid: &'a SlotGrid,
    travel: &'a TravelMatrix,
    vars: ProblemVariables,
    constraints: Vec<Constraint>,
}

impl<'a> ModelBuilder<'a> {
    fn new(
        venues: &'a [&'a Venue],
        day: DayOfWeek,
        grid: &'a SlotGrid,
        travel: &'a TravelMatrix,
    ) -> Self {
        Self {
            venues,
            day,
            grid,
            travel,
            vars: variables!(),
            constraints: Vec::new(),
        }
    }

    fn build(mut self) -> Result<TourModel, SolveError> {
        let candidates = self.candidate_vars();
        let starts = start_expressions(&candidates);
        self.link_selection(&candidates);
        let arcs = self.sequence_vars(&candidates);
        let travel_minutes = self.timing_and_travel_term(&candidates, &starts, &arcs)?;
        let crowd_exposure = self.crowd_term(&candidates);
        let mut venues_selected = Expression::from(0);
        for candidate in &candidates {
            venues_selected += candidate.selected;
        }
        log::debug!(
            "built model: {} candidates, {} constraints",
            candidates.len(),
            self.constraints.len()
        );
        Ok(TourModel {
            vars: self.vars,
            constraints: self.constraints,
            terms: ObjectiveTerms {
                travel_minutes,
                crowd_exposure,
                venues_selected,
            },
            candidates,
        })
    }

    /// Selection flag and feasible-start indicators per candidate.
    fn candidate_vars(&mut self) -> Vec<CandidateVars> {
        let (venues, day, grid) = (self.venues, self.day, self.grid);
        venues
            .iter()
            .map(|venue| {
                let dwell_slots = SlotGrid::slots_ceil(venue.dwell());
                let selected = self.vars.add(variable().binary());
                let starts = feasible_start_slots(venue, day, grid, dwell_slots)
                    .map(|slot| (slot, self.vars.add(variable().binary())))
                    .collect();
                CandidateVars {
                    selected,
                    starts,
                    dwell_slots,
                }
            })
            .collect()
    }

    /// Exactly one start indicator is active iff the venue is selected; an
    /// unselected venue has no timing applied anywhere below.
    fn link_selection(&mut self, candidates: &[CandidateVars]) {
        for candidate in candidates {
            let mut chosen = Expression::from(0);
            for (_, indicator) in &candidate.starts {
                chosen += *indicator;
            }
            self.constraints
                .push(constraint!(chosen == candidate.selected));
        }
    }

    /// Successor arcs plus first/last flags with unit-flow equations.
    ///
    /// Every selected venue has exactly one predecessor (an arc or the
    /// first flag) and one successor (an arc or the last flag); exactly one
    /// first and one last exist, so an empty selection is infeasible and a
    /// single selected venue carries no precedence constraints at all.
    /// Cycles cannot survive the timing links: start times strictly
    /// increase along every active arc.
    fn sequence_vars(&mut self, candidates: &[CandidateVars]) -> HashMap<(usize, usize), Variable> {
        let n = candidates.len();
        let mut arcs = HashMap::new();
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    arcs.insert((i, j), self.vars.add(variable().binary()));
                }
            }
        }
        let firsts: Vec<Variable> = (0..n).map(|_| self.vars.add(variable().binary())).collect();
        let lasts: Vec<Variable> = (0..n).map(|_| self.vars.add(variable().binary())).collect();

        for (i, candidate) in candidates.iter().enumerate() {
            let mut inflow = Expression::from(firsts[i]);
            let mut outflow = Expression::from(lasts[i]);
            for j in 0..n {
                if i != j {
                    inflow += arcs[&(j, i)];
                    outflow += arcs[&(i, j)];
                }
            }
            self.constraints
                .push(constraint!(inflow == candidate.selected));
            self.constraints
                .push(constraint!(outflow == candidate.selected));
        }

        let mut first_total = Expression::from(0);
        let mut last_total = Expression::from(0);
        for i in 0..n {
            first_total += firsts[i];
            last_total += lasts[i];
        }
        self.constraints.push(constraint!(first_total == 1.0));
        self.constraints.push(constraint!(last_total == 1.0));

        arcs
    }

    /// Timing links for every arc and leader start slot, plus the linearized
    /// travel-minutes objective term.
    ///
    /// For arc `i -> j` with `i` starting at slot `s`, the follower must
    /// start no earlier than `s + dwell + travel_slots`, where travel is the
    /// matrix sample for the departure at `i`'s end slot rounded up to whole
    /// slots. A pair with no travel data at all aborts the build.
    fn timing_and_travel_term(
        &mut self,
        candidates: &[CandidateVars],
        starts: &[Expression],
        arcs: &HashMap<(usize, usize), Variable>,
    ) -> Result<Expression, SolveError> {
        let mut travel_minutes = Expression::from(0);
        for (i, leader) in candidates.iter().enumerate() {
            for (j, _) in candidates.iter().enumerate() {
                if i == j {
                    continue;
                }
                let (from, to) = (self.venues[i].id(), self.venues[j].id());
                if !self.travel.has_pair(from, to, self.day) {
                    return Err(SolveError::MissingTravelData(MissingTravelDataError {
                        from: from.clone(),
                        to: to.clone(),
                        day: self.day,
                    }));
                }
                let arc = arcs[&(i, j)];
                for &(slot, indicator) in &leader.starts {
                    let depart_slot = slot + leader.dwell_slots;
                    let sample =
                        self.travel
                            .sample_at(from, to, self.day, self.grid.time_at(depart_slot))?;
                    let travel_slots = sample.minutes.div_ceil(u32::from(SLOT_MINUTES)) as usize;
                    let arrival = (depart_slot + travel_slots) as f64;

                    // T_j >= arrival - M(2 - arc - indicator), with M = arrival.
                    self.constraints.push(constraint!(
                        starts[j].clone() - arrival * arc - arrival * indicator >= -arrival
                    ));

                    // Product variable for the travel objective: exactly
                    // arc AND indicator under its three bounds.
                    let product = self.vars.add(variable().min(0.0).max(1.0));
                    self.constraints
                        .push(constraint!(product - arc - indicator >= -1.0));
                    self.constraints.push(constraint!(product - arc <= 0.0));
                    self.constraints.push(constraint!(product - indicator <= 0.0));
                    travel_minutes += f64::from(sample.minutes) * product;
                }
            }
        }
        Ok(travel_minutes)
    }

    /// Crowd exposure sampled at each active start slot.
    fn crowd_term(&self, candidates: &[CandidateVars]) -> Expression {
        let mut crowd_exposure = Expression::from(0);
        for (candidate, venue) in candidates.iter().zip(self.venues) {
            for &(slot, indicator) in &candidate.starts {
                let level = venue
                    .crowd_at(self.day, self.grid.time_at(slot))
                    .level()
                    .unwrap_or(0);
                crowd_exposure += f64::from(level) * indicator;
            }
        }
        crowd_exposure
    }
}

/// Start time of each candidate as a linear expression over its indicators.
fn start_expressions(candidates: &[CandidateVars]) -> Vec<Expression> {
    candidates
        .iter()
        .map(|candidate| {
            let mut start = Expression::from(0);
            for &(slot, indicator) in &candidate.starts {
                start += (slot as f64) * indicator;
            }
            start
        })
        .collect()
}

/// Slots at which the full dwell window fits one open interval and the tour
/// window.
fn feasible_start_slots<'a>(
    venue: &'a Venue,
    day: DayOfWeek,
    grid: &'a SlotGrid,
    dwell_slots: usize,
) -> impl Iterator<Item = usize> + 'a {
    (0..grid.len()).filter(move |&slot| {
        let end = slot + dwell_slots;
        end <= grid.len() && venue.fits(day, grid.time_at(slot), grid.time_at(end))
    })
}
