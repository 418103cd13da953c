//! Property-based tests for the MILP solver.
//!
//! These use `proptest` to assert invariants that must hold for every
//! schedule the solver returns, complementing the literal behavioural
//! scenarios:
//!
//! - **No overlap:** visits are ordered and never share a slot.
//! - **Window containment:** each visit fits the venue's open hours.
//! - **Dwell compliance:** each visit covers the minimum dwell.
//! - **Travel gaps:** consecutive visits leave room for the tabulated (or
//!   nearest-fallback) travel time at the departure slot.

use std::time::Duration;

use daytour_core::test_support::{TORONTO_DAY, venue};
use daytour_core::{
    MemoryVenueStore, ObjectiveWeights, SolveStatus, Solver, TourRequest, TravelMatrix,
    TravelSample, Venue,
};
use daytour_solver_milp::MilpSolver;
use proptest::prelude::*;

const NAMES: [&str; 4] = ["Museum", "Gallery", "Tower", "Market"];

#[derive(Debug, Clone)]
struct Instance {
    venues: Vec<Venue>,
    travel: TravelMatrix,
}

/// Random instances with complete travel data so only genuine scheduling
/// conflicts can make a run infeasible.
fn instance_strategy() -> impl Strategy<Value = Instance> {
    (2_usize..=4)
        .prop_flat_map(|count| {
            let specs = proptest::collection::vec(
                (9_u8..=12, 14_u8..=20, 1_u32..=3, -2_i8..=2), // open, close, dwell h, crowd
                count,
            );
            let travel = proptest::collection::vec(0_u32..=60, count * (count - 1));
            (specs, travel)
        })
        .prop_map(|(specs, travel_minutes)| {
            let venues: Vec<Venue> = specs
                .iter()
                .enumerate()
                .map(|(index, &(open, close, dwell_hours, crowd))| {
                    let named = venue(
                        NAMES[index],
                        &format!("{open:02}:00"),
                        &format!("{close:02}:00"),
                        f64::from(dwell_hours),
                    );
                    // Rebuild with the sampled flat crowd level.
                    Venue::new(
                        named.id().clone(),
                        named.location(),
                        named.hours().clone(),
                        named.dwell(),
                        daytour_core::WeeklyCrowd::every_day(daytour_core::CrowdSeries::flat(
                            crowd,
                        )),
                    )
                    .expect("sampled venue is valid")
                })
                .collect();

            let mut travel = TravelMatrix::new();
            let mut samples = travel_minutes.into_iter();
            for from in &venues {
                for to in &venues {
                    if from.id() == to.id() {
                        continue;
                    }
                    let minutes = samples.next().expect("one sample per ordered pair");
                    travel.insert(
                        from.id().clone(),
                        to.id().clone(),
                        TORONTO_DAY,
                        "12:00".parse().expect("aligned literal"),
                        TravelSample {
                            minutes,
                            delay_minutes: 0,
                        },
                    );
                }
            }
            Instance { venues, travel }
        })
}

fn request_for(instance: &Instance, venues_weight: f64) -> TourRequest {
    TourRequest {
        day: TORONTO_DAY,
        window_start: "09:00".parse().unwrap(),
        window_end: "21:00".parse().unwrap(),
        venues: instance.venues.iter().map(|v| v.id().clone()).collect(),
        weights: ObjectiveWeights {
            venues: venues_weight,
            ..ObjectiveWeights::default()
        },
        num_workers: 1,
        time_limit: Duration::from_secs(60),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn returned_schedules_are_valid(
        instance in instance_strategy(),
        venues_weight in -200.0_f64..=-10.0,
    ) {
        let store = MemoryVenueStore::with_venues(instance.venues.clone());
        let solver = MilpSolver::new(store, instance.travel.clone());
        let request = request_for(&instance, venues_weight);

        let outcome = solver.solve(&request).expect("complete data cannot error");
        if outcome.status == SolveStatus::Infeasible {
            prop_assert!(outcome.itinerary.is_none());
            return Ok(());
        }

        let itinerary = outcome.itinerary.expect("feasible outcome has a schedule");
        prop_assert!(!itinerary.visits.is_empty());

        for visit in &itinerary.visits {
            let venue = instance
                .venues
                .iter()
                .find(|v| v.id() == &visit.venue)
                .expect("scheduled venue is a candidate");
            // Window containment.
            prop_assert!(
                venue.fits(TORONTO_DAY, visit.start, visit.end),
                "{} at {}..{} leaves its open hours",
                visit.venue,
                visit.start,
                visit.end
            );
            // Minimum dwell.
            let minutes = u64::from(visit.end.minutes() - visit.start.minutes());
            prop_assert!(
                Duration::from_secs(minutes * 60) >= venue.dwell(),
                "{} dwells {}min, needs {:?}",
                visit.venue,
                minutes,
                venue.dwell()
            );
        }

        for pair in itinerary.visits.windows(2) {
            let (earlier, later) = (&pair[0], &pair[1]);
            // Ordered, non-overlapping.
            prop_assert!(earlier.end <= later.start);
            // Travel-aware gap, resolved exactly as the model resolved it.
            let travel = instance
                .travel
                .minutes_at(&earlier.venue, &later.venue, TORONTO_DAY, earlier.end)
                .expect("matrix is complete");
            let gap = u32::from(later.start.minutes() - earlier.end.minutes());
            prop_assert!(
                gap >= travel,
                "gap {}min between {} and {} is below travel {}min",
                gap,
                earlier.venue,
                later.venue,
                travel
            );
            prop_assert_eq!(earlier.travel_to_next, Some(travel));
        }
    }
}
