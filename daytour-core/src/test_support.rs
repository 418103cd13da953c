//! Canned input models shared by unit, integration and property tests.

use std::time::Duration;

use geo::Coord;

use crate::store::MemoryVenueStore;
use crate::time::{DayOfWeek, TimeOfDay};
use crate::travel::{TravelMatrix, TravelSample};
use crate::venue::{CrowdSeries, OpenInterval, Venue, VenueId, WeekSchedule, WeeklyCrowd};

/// Day used by the canned Toronto scenario.
pub const TORONTO_DAY: DayOfWeek = DayOfWeek::Tuesday;

/// Parse an `HH:MM` literal, panicking on typos in test data.
#[must_use]
pub fn time(text: &str) -> TimeOfDay {
    text.parse().unwrap_or_else(|_| panic!("bad test time {text:?}"))
}

/// Operating hours `[open, close)` repeated on every day of the week.
#[must_use]
pub fn hours_every_day(open: &str, close: &str) -> WeekSchedule {
    let interval = OpenInterval::new(time(open), time(close)).expect("open before close");
    DayOfWeek::ALL
        .into_iter()
        .try_fold(WeekSchedule::closed(), |hours, day| hours.with(day, interval))
        .expect("one interval per day cannot overlap")
}

/// A venue open the same hours every day with a flat crowd level of zero.
#[must_use]
pub fn venue(name: &str, open: &str, close: &str, dwell_hours: f64) -> Venue {
    venue_with_crowd(name, open, close, dwell_hours, CrowdSeries::flat(0))
}

/// A venue open the same hours every day with the given crowd series.
#[must_use]
pub fn venue_with_crowd(
    name: &str,
    open: &str,
    close: &str,
    dwell_hours: f64,
    crowd: CrowdSeries,
) -> Venue {
    Venue::new(
        VenueId::from(name),
        Coord { x: 0.0, y: 0.0 },
        hours_every_day(open, close),
        Duration::from_secs_f64(dwell_hours * 3600.0),
        WeeklyCrowd::every_day(crowd),
    )
    .expect("test venue must be valid")
}

/// A matrix tabulating one midnight sample of `minutes` for every ordered
/// pair, so the earlier-slot fallback always resolves.
#[must_use]
pub fn complete_matrix(names: &[&str], day: DayOfWeek, minutes: u32) -> TravelMatrix {
    let mut matrix = TravelMatrix::new();
    for from in names {
        for to in names {
            if from == to {
                continue;
            }
            matrix.insert(
                VenueId::from(*from),
                VenueId::from(*to),
                day,
                time("00:00"),
                TravelSample {
                    minutes,
                    delay_minutes: 0,
                },
            );
        }
    }
    matrix
}

/// A crowd series that rises through the day, so earlier starts always read
/// lower exposure: `-2` before noon up to `2` in the evening.
#[must_use]
pub fn rising_crowd() -> CrowdSeries {
    let mut samples = [None; 24];
    for (hour, sample) in samples.iter_mut().enumerate() {
        *sample = Some(match hour {
            0..=11 => -2,
            12..=13 => -1,
            14..=15 => 0,
            16..=17 => 1,
            _ => 2,
        });
    }
    CrowdSeries::new(samples)
}

/// The three-venue Toronto scenario: Casa Loma, the Royal Ontario Museum and
/// the CN Tower with their literal hours, dwell times and travel figures.
///
/// With the default weights and a 09:00–21:00 Tuesday window the unique
/// optimum visits Casa Loma 10:00–13:00, the museum 13:30–17:00 and the
/// tower 17:30–20:30 for 28 travel minutes.
#[must_use]
pub fn toronto_trio() -> (MemoryVenueStore, TravelMatrix) {
    let store = MemoryVenueStore::with_venues([
        venue_with_crowd("Casa Loma", "10:00", "17:00", 3.0, rising_crowd()),
        venue_with_crowd("Royal Ontario Museum", "10:00", "17:30", 3.5, rising_crowd()),
        venue_with_crowd("CN Tower", "09:00", "22:00", 3.0, rising_crowd()),
    ]);

    let mut matrix = TravelMatrix::new();
    let mut tabulate = |from: &str, to: &str, at: &str, minutes: u32| {
        matrix.insert(
            VenueId::from(from),
            VenueId::from(to),
            TORONTO_DAY,
            time(at),
            TravelSample {
                minutes,
                delay_minutes: 0,
            },
        );
    };
    tabulate("Casa Loma", "Royal Ontario Museum", "13:00", 11);
    tabulate("Royal Ontario Museum", "CN Tower", "17:00", 17);
    tabulate("Royal Ontario Museum", "Casa Loma", "12:00", 12);
    tabulate("Casa Loma", "CN Tower", "12:00", 25);
    tabulate("CN Tower", "Casa Loma", "12:00", 25);
    tabulate("CN Tower", "Royal Ontario Museum", "12:00", 18);

    (store, matrix)
}
