//! Venues, operating hours and hourly crowd-intensity series.
//!
//! These models provide basic validation to keep downstream components
//! honest: intervals are kept ordered and disjoint, dwell times positive.
//! Constructors return `Result` to surface invalid input early.

use std::fmt;
use std::time::Duration;

use geo::Coord;
use thiserror::Error;

use crate::time::{DayOfWeek, TimeOfDay};

/// Identifier of a venue, the name under which providers report it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct VenueId(String);

impl VenueId {
    /// Construct an identifier from a venue name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The venue name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VenueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VenueId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for VenueId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// A half-open operating interval `[open, close)` within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpenInterval {
    open: TimeOfDay,
    close: TimeOfDay,
}

/// Errors returned by [`OpenInterval::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OpenIntervalError {
    /// The interval would be empty or inverted.
    #[error("interval must open before it closes: {open}..{close}")]
    Empty {
        /// Requested opening time.
        open: TimeOfDay,
        /// Requested closing time.
        close: TimeOfDay,
    },
}

impl OpenInterval {
    /// Validates and constructs an interval.
    pub fn new(open: TimeOfDay, close: TimeOfDay) -> Result<Self, OpenIntervalError> {
        if open >= close {
            return Err(OpenIntervalError::Empty { open, close });
        }
        Ok(Self { open, close })
    }

    /// Opening time (inclusive).
    #[must_use]
    pub const fn open(&self) -> TimeOfDay {
        self.open
    }

    /// Closing time (exclusive).
    #[must_use]
    pub const fn close(&self) -> TimeOfDay {
        self.close
    }

    /// Whether `time` lies inside the interval.
    #[must_use]
    pub fn contains(&self, time: TimeOfDay) -> bool {
        self.open <= time && time < self.close
    }

    /// Whether the span `[start, end)` lies entirely inside the interval.
    #[must_use]
    pub fn covers(&self, start: TimeOfDay, end: TimeOfDay) -> bool {
        self.open <= start && end <= self.close
    }
}

/// Per-day operating hours: for each day an ordered set of disjoint
/// intervals. An empty set means the venue is closed that day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeekSchedule {
    days: [Vec<OpenInterval>; 7],
}

/// Errors returned when inserting into a [`WeekSchedule`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeekScheduleError {
    /// The new interval overlaps an interval already present for the day.
    #[error("interval {open}..{close} overlaps existing hours on {day}")]
    Overlap {
        /// Day the conflicting interval was added to.
        day: DayOfWeek,
        /// Opening time of the rejected interval.
        open: TimeOfDay,
        /// Closing time of the rejected interval.
        close: TimeOfDay,
    },
}

impl WeekSchedule {
    /// A schedule closed on every day.
    #[must_use]
    pub fn closed() -> Self {
        Self::default()
    }

    /// Insert an interval for a day, keeping the day's list ordered.
    ///
    /// Touching intervals (`[9,12)` and `[12,17)`) are accepted; overlapping
    /// ones are rejected.
    pub fn insert(
        &mut self,
        day: DayOfWeek,
        interval: OpenInterval,
    ) -> Result<(), WeekScheduleError> {
        let list = &mut self.days[day.index()];
        let position = list.partition_point(|existing| existing.open() < interval.open());
        let clashes_before = position
            .checked_sub(1)
            .and_then(|i| list.get(i))
            .is_some_and(|before| interval.open() < before.close());
        let clashes_after = list
            .get(position)
            .is_some_and(|after| after.open() < interval.close());
        if clashes_before || clashes_after {
            return Err(WeekScheduleError::Overlap {
                day,
                open: interval.open(),
                close: interval.close(),
            });
        }
        list.insert(position, interval);
        Ok(())
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, day: DayOfWeek, interval: OpenInterval) -> Result<Self, WeekScheduleError> {
        self.insert(day, interval)?;
        Ok(self)
    }

    /// Ordered intervals for a day.
    #[must_use]
    pub fn intervals(&self, day: DayOfWeek) -> &[OpenInterval] {
        &self.days[day.index()]
    }

    /// Whether the venue is closed for the whole day.
    #[must_use]
    pub fn is_closed(&self, day: DayOfWeek) -> bool {
        self.days[day.index()].is_empty()
    }

    /// Whether `time` lies inside any interval for the day.
    #[must_use]
    pub fn contains(&self, day: DayOfWeek, time: TimeOfDay) -> bool {
        self.intervals(day).iter().any(|i| i.contains(time))
    }

    /// Whether `[start, end)` fits entirely inside a single interval.
    ///
    /// A span straddling a gap between two intervals does not count as open.
    #[must_use]
    pub fn covers(&self, day: DayOfWeek, start: TimeOfDay, end: TimeOfDay) -> bool {
        self.intervals(day).iter().any(|i| i.covers(start, end))
    }
}

/// Crowd intensity at one slot: a level on the provider's closed numeric
/// scale (nominally `-2..=2`) or the closed sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CrowdLevel {
    /// Forecast intensity while the venue is open.
    Level(i8),
    /// The venue is not operating at the queried time.
    Closed,
}

impl CrowdLevel {
    /// Numeric level, or `None` for the closed sentinel.
    #[must_use]
    pub const fn level(self) -> Option<i8> {
        match self {
            Self::Level(value) => Some(value),
            Self::Closed => None,
        }
    }
}

/// Hourly crowd-intensity samples for one day.
///
/// `None` entries are hours the provider marked with its closed sentinel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrowdSeries {
    samples: [Option<i8>; 24],
}

impl CrowdSeries {
    /// Construct from 24 hourly samples.
    #[must_use]
    pub const fn new(samples: [Option<i8>; 24]) -> Self {
        Self { samples }
    }

    /// The same level for every hour of the day.
    #[must_use]
    pub const fn flat(level: i8) -> Self {
        Self {
            samples: [Some(level); 24],
        }
    }

    /// Sample for an hour of the day, if the provider reported one.
    #[must_use]
    pub fn at_hour(&self, hour: u8) -> Option<i8> {
        self.samples.get(usize::from(hour)).copied().flatten()
    }
}

/// Crowd series for each day of the week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeeklyCrowd {
    days: [CrowdSeries; 7],
}

impl WeeklyCrowd {
    /// Replace the series for one day.
    #[must_use]
    pub fn with_day(mut self, day: DayOfWeek, series: CrowdSeries) -> Self {
        self.days[day.index()] = series;
        self
    }

    /// The same series on every day.
    #[must_use]
    pub const fn every_day(series: CrowdSeries) -> Self {
        Self { days: [series; 7] }
    }

    /// Series for a day.
    #[must_use]
    pub fn series(&self, day: DayOfWeek) -> &CrowdSeries {
        &self.days[day.index()]
    }
}

/// A tourist attraction with its weekly snapshot data.
///
/// The coordinates are carried through from the provider record; the
/// optimizer itself never reads them.
#[derive(Debug, Clone, PartialEq)]
pub struct Venue {
    id: VenueId,
    location: Coord<f64>,
    hours: WeekSchedule,
    dwell: Duration,
    crowd: WeeklyCrowd,
}

/// Errors returned by [`Venue::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VenueError {
    /// The minimum dwell duration was zero.
    #[error("venue {id} must have a positive minimum dwell time")]
    NonPositiveDwell {
        /// Venue the invalid dwell was supplied for.
        id: VenueId,
    },
}

impl Venue {
    /// Validates and constructs a venue.
    pub fn new(
        id: VenueId,
        location: Coord<f64>,
        hours: WeekSchedule,
        dwell: Duration,
        crowd: WeeklyCrowd,
    ) -> Result<Self, VenueError> {
        if dwell.is_zero() {
            return Err(VenueError::NonPositiveDwell { id });
        }
        Ok(Self {
            id,
            location,
            hours,
            dwell,
            crowd,
        })
    }

    /// Venue identifier.
    #[must_use]
    pub fn id(&self) -> &VenueId {
        &self.id
    }

    /// Provider-reported coordinates (pass-through data).
    #[must_use]
    pub const fn location(&self) -> Coord<f64> {
        self.location
    }

    /// Weekly operating hours.
    #[must_use]
    pub const fn hours(&self) -> &WeekSchedule {
        &self.hours
    }

    /// Minimum dwell duration for a visit to count.
    #[must_use]
    pub const fn dwell(&self) -> Duration {
        self.dwell
    }

    /// Whether the venue is closed for the whole day.
    #[must_use]
    pub fn closed_on(&self, day: DayOfWeek) -> bool {
        self.hours.is_closed(day)
    }

    /// Whether a visit spanning `[start, end)` fits the operating hours.
    #[must_use]
    pub fn fits(&self, day: DayOfWeek, start: TimeOfDay, end: TimeOfDay) -> bool {
        self.hours.covers(day, start, end)
    }

    /// Crowd intensity at a time of day.
    ///
    /// Returns [`CrowdLevel::Closed`] when `time` falls outside every open
    /// interval for the day; inside open hours a missing hourly sample reads
    /// as level 0, matching the provider snapshot semantics.
    #[must_use]
    pub fn crowd_at(&self, day: DayOfWeek, time: TimeOfDay) -> CrowdLevel {
        if !self.hours.contains(day, time) {
            return CrowdLevel::Closed;
        }
        CrowdLevel::Level(self.crowd.series(day).at_hour(time.hour()).unwrap_or(0))
    }
}
