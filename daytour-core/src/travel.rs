//! Time-dependent travel durations between venue pairs.
//!
//! The [`TravelMatrix`] is the travel half of the time-slot index: providers
//! tabulate samples on the 30-minute grid, and lookups for untabulated
//! departure slots fall back to the nearest tabulated one for the same
//! `(origin, destination, day)` key. Travel time is never fabricated from an
//! unrelated pair and never interpolated.

use std::collections::{BTreeMap, HashMap};

use thiserror::Error;

use crate::time::{DayOfWeek, TimeOfDay};
use crate::venue::VenueId;

/// One tabulated travel observation for a departure time.
///
/// Durations are asymmetric: `A -> B` and `B -> A` are independent rows in
/// the provider snapshot. The traffic delay is carried through for reporting;
/// `minutes` is the figure the optimizer schedules with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TravelSample {
    /// Traffic-aware travel duration in minutes.
    pub minutes: u32,
    /// Portion of the duration attributed to traffic, in minutes.
    pub delay_minutes: u32,
}

/// No travel data exists at all for a required origin/destination/day key.
///
/// This is a data-integrity failure: the caller's snapshot is incomplete and
/// the optimizer will not guess a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no travel data for {from} -> {to} on {day}")]
pub struct MissingTravelDataError {
    /// Origin venue.
    pub from: VenueId,
    /// Destination venue.
    pub to: VenueId,
    /// Day the lookup was made for.
    pub day: DayOfWeek,
}

/// Tabulated travel durations keyed by origin, destination and day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TravelMatrix {
    edges: HashMap<(VenueId, VenueId, DayOfWeek), BTreeMap<TimeOfDay, TravelSample>>,
}

impl TravelMatrix {
    /// An empty matrix.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a sample for a departure time.
    ///
    /// A later insert for the same departure time replaces the earlier one.
    pub fn insert(
        &mut self,
        from: VenueId,
        to: VenueId,
        day: DayOfWeek,
        departure: TimeOfDay,
        sample: TravelSample,
    ) {
        self.edges
            .entry((from, to, day))
            .or_default()
            .insert(departure, sample);
    }

    /// Whether any sample exists for the pair on the day.
    #[must_use]
    pub fn has_pair(&self, from: &VenueId, to: &VenueId, day: DayOfWeek) -> bool {
        self.edges
            .contains_key(&(from.clone(), to.clone(), day))
    }

    /// Look up the sample for a departure time.
    ///
    /// Resolution order: the exact departure time, else the closest earlier
    /// tabulated time, else the closest later one. Fails only when no sample
    /// exists at all for the `(from, to, day)` key.
    pub fn sample_at(
        &self,
        from: &VenueId,
        to: &VenueId,
        day: DayOfWeek,
        departure: TimeOfDay,
    ) -> Result<TravelSample, MissingTravelDataError> {
        let missing = || MissingTravelDataError {
            from: from.clone(),
            to: to.clone(),
            day,
        };
        let series = self
            .edges
            .get(&(from.clone(), to.clone(), day))
            .ok_or_else(missing)?;
        let earlier = series.range(..=departure).next_back();
        let later = series.range(departure..).next();
        earlier
            .or(later)
            .map(|(_, sample)| *sample)
            .ok_or_else(missing)
    }

    /// Travel duration in minutes, resolved with the same fallback rule.
    pub fn minutes_at(
        &self,
        from: &VenueId,
        to: &VenueId,
        day: DayOfWeek,
        departure: TimeOfDay,
    ) -> Result<u32, MissingTravelDataError> {
        self.sample_at(from, to, day, departure)
            .map(|sample| sample.minutes)
    }
}
