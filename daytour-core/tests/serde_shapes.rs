//! Serialization shapes consumed by the CLI and downstream tooling.

#![cfg(feature = "serde")]

use std::time::Duration;

use daytour_core::{
    Diagnostics, Itinerary, SolveOutcome, SolveStatus, TimeOfDay, Visit,
};
use rstest::rstest;

#[rstest]
fn times_serialize_as_clock_strings() {
    let time: TimeOfDay = "13:30".parse().unwrap();
    assert_eq!(serde_json::to_value(time).unwrap(), "13:30");
    let back: TimeOfDay = serde_json::from_value("13:30".into()).unwrap();
    assert_eq!(back, time);
}

#[rstest]
fn outcome_round_trips_through_json() {
    let outcome = SolveOutcome {
        status: SolveStatus::Optimal,
        itinerary: Some(Itinerary::from_visits(vec![Visit {
            venue: "CN Tower".into(),
            start: "09:00".parse().unwrap(),
            end: "12:00".parse().unwrap(),
            crowd: -1,
            travel_to_next: None,
        }])),
        diagnostics: Diagnostics {
            solve_time: Duration::from_millis(12),
            branches_explored: None,
            conflicts: None,
            workers: 1,
        },
    };
    let json = serde_json::to_string(&outcome).unwrap();
    let back: SolveOutcome = serde_json::from_str(&json).unwrap();
    assert_eq!(back, outcome);
}
