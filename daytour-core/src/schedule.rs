//! Ordered visit sequences and their derived metrics.

use crate::time::TimeOfDay;
use crate::venue::VenueId;

/// One scheduled stop within an itinerary.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Visit {
    /// Venue being visited.
    pub venue: VenueId,
    /// Visit start on the slot grid.
    pub start: TimeOfDay,
    /// Visit end on the slot grid; at least the venue's dwell after start.
    pub end: TimeOfDay,
    /// Crowd level sampled at the start slot.
    pub crowd: i8,
    /// Travel minutes to the following visit, `None` for the last stop.
    pub travel_to_next: Option<u32>,
}

/// Aggregate figures describing one itinerary.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metrics {
    /// Total inter-visit travel, in minutes.
    pub total_travel_minutes: u32,
    /// Sum of the crowd levels sampled at each visit's start slot.
    pub total_crowd_exposure: i32,
    /// Mean start-slot crowd level across visits; 0 for an empty itinerary.
    pub average_crowd_level: f64,
    /// Number of venues visited.
    pub venues_visited: usize,
}

/// A valid single-day visiting sequence with its metrics.
///
/// Visits are ordered by start time, never overlap, and respect travel gaps;
/// the solver establishes those properties before constructing one.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Itinerary {
    /// Visits in order of their start slot.
    pub visits: Vec<Visit>,
    /// Metrics derived from the visits.
    pub metrics: Metrics,
}

impl Itinerary {
    /// Assemble an itinerary, deriving [`Metrics`] from the visits.
    #[must_use]
    pub fn from_visits(visits: Vec<Visit>) -> Self {
        let total_travel_minutes = visits.iter().filter_map(|v| v.travel_to_next).sum();
        let total_crowd_exposure = visits.iter().map(|v| i32::from(v.crowd)).sum();
        let venues_visited = visits.len();
        let average_crowd_level = if venues_visited == 0 {
            0.0
        } else {
            f64::from(total_crowd_exposure) / venues_visited as f64
        };
        Self {
            visits,
            metrics: Metrics {
                total_travel_minutes,
                total_crowd_exposure,
                average_crowd_level,
                venues_visited,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn visit(venue: &str, start: &str, end: &str, crowd: i8, travel: Option<u32>) -> Visit {
        Visit {
            venue: VenueId::from(venue),
            start: start.parse().unwrap(),
            end: end.parse().unwrap(),
            crowd,
            travel_to_next: travel,
        }
    }

    #[rstest]
    fn metrics_are_derived_from_the_visits() {
        let itinerary = Itinerary::from_visits(vec![
            visit("A", "10:00", "13:00", -2, Some(11)),
            visit("B", "13:30", "17:00", -1, Some(17)),
            visit("C", "17:30", "20:30", 1, None),
        ]);
        let metrics = itinerary.metrics;
        assert_eq!(metrics.total_travel_minutes, 28);
        assert_eq!(metrics.total_crowd_exposure, -2);
        assert_eq!(metrics.venues_visited, 3);
        assert!((metrics.average_crowd_level - (-2.0 / 3.0)).abs() < 1e-9);
    }

    #[rstest]
    fn empty_itinerary_has_zero_metrics() {
        let metrics = Itinerary::from_visits(Vec::new()).metrics;
        assert_eq!(metrics.total_travel_minutes, 0);
        assert_eq!(metrics.venues_visited, 0);
        assert_eq!(metrics.average_crowd_level, 0.0);
    }
}
