//! Days, times of day and the fixed 30-minute slot grid.
//!
//! Every quantity the optimizer reasons about is discretized onto a grid of
//! [`SLOT_MINUTES`]-wide slots spanning the tour window. The grid is shared by
//! travel-time lookups and visit scheduling, so both sides agree on what a
//! "slot" means for a given day.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::solver::InvalidConfigurationError;

/// Width of one scheduling slot in minutes.
pub const SLOT_MINUTES: u16 = 30;

/// Day of the week used to select the operating-hours and crowd snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DayOfWeek {
    /// Monday.
    Monday,
    /// Tuesday.
    Tuesday,
    /// Wednesday.
    Wednesday,
    /// Thursday.
    Thursday,
    /// Friday.
    Friday,
    /// Saturday.
    Saturday,
    /// Sunday.
    Sunday,
}

impl DayOfWeek {
    /// All seven days, Monday first.
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Zero-based index with Monday at 0.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// English day name as it appears in provider snapshots.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a day name is not one of the seven English names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised day name: {0:?}")]
pub struct ParseDayOfWeekError(pub String);

impl FromStr for DayOfWeek {
    type Err = ParseDayOfWeekError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|day| day.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseDayOfWeekError(s.to_owned()))
    }
}

/// A clock time expressed as minutes since midnight.
///
/// The value range is `0..=1440`; `24:00` denotes midnight at the end of the
/// day so a closing time of midnight remains representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeOfDay(u16);

/// Error returned when an `HH:MM` string cannot be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed time of day: {0:?} (expected HH:MM)")]
pub struct ParseTimeOfDayError(pub String);

impl TimeOfDay {
    /// Largest representable value, midnight at the end of the day.
    pub const END_OF_DAY: Self = Self(24 * 60);

    /// Construct from minutes since midnight.
    ///
    /// Returns `None` when `minutes` exceeds `24:00`.
    #[must_use]
    pub const fn from_minutes(minutes: u16) -> Option<Self> {
        if minutes <= 24 * 60 {
            Some(Self(minutes))
        } else {
            None
        }
    }

    /// Construct from an hour/minute pair.
    #[must_use]
    pub const fn from_hm(hour: u8, minute: u8) -> Option<Self> {
        let minutes = hour as u16 * 60 + minute as u16;
        if minute < 60 {
            Self::from_minutes(minutes)
        } else {
            None
        }
    }

    /// Minutes since midnight.
    #[must_use]
    pub const fn minutes(self) -> u16 {
        self.0
    }

    /// Hour-of-day component, used to index hourly crowd series.
    #[must_use]
    pub const fn hour(self) -> u8 {
        (self.0 / 60) as u8
    }

    /// Whether this time falls on the 30-minute slot grid.
    #[must_use]
    pub const fn is_slot_aligned(self) -> bool {
        self.0 % SLOT_MINUTES == 0
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl FromStr for TimeOfDay {
    type Err = ParseTimeOfDayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseTimeOfDayError(s.to_owned());
        let (hours, minutes) = s.trim().split_once(':').ok_or_else(err)?;
        let hours: u16 = hours.parse().map_err(|_| err())?;
        let minutes: u16 = minutes.parse().map_err(|_| err())?;
        if minutes >= 60 {
            return Err(err());
        }
        Self::from_minutes(hours * 60 + minutes).ok_or_else(err)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for TimeOfDay {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for TimeOfDay {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = <String as serde::Deserialize>::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// The ordered slot grid spanning one tour window.
///
/// Slot `0` starts at the tour start; slot `len()` is the exclusive end
/// boundary. The grid is identical for every venue on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotGrid {
    start: TimeOfDay,
    end: TimeOfDay,
    len: usize,
}

impl SlotGrid {
    /// Build the grid for the half-open window `[start, end)`.
    ///
    /// Both boundaries must be slot-aligned and the window non-empty.
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Result<Self, InvalidConfigurationError> {
        for boundary in [start, end] {
            if !boundary.is_slot_aligned() {
                return Err(InvalidConfigurationError::MisalignedTime { time: boundary });
            }
        }
        if start >= end {
            return Err(InvalidConfigurationError::EmptyWindow { start, end });
        }
        let len = usize::from((end.minutes() - start.minutes()) / SLOT_MINUTES);
        Ok(Self { start, end, len })
    }

    /// Number of slots in the window.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the grid contains no slots. Construction forbids this; the
    /// accessor exists for API symmetry.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// First slot boundary of the window.
    #[must_use]
    pub const fn start(&self) -> TimeOfDay {
        self.start
    }

    /// Exclusive end boundary of the window.
    #[must_use]
    pub const fn end(&self) -> TimeOfDay {
        self.end
    }

    /// Clock time of a slot boundary.
    ///
    /// `slot` may be `len()` to address the window's end boundary.
    #[must_use]
    pub fn time_at(&self, slot: usize) -> TimeOfDay {
        debug_assert!(slot <= self.len, "slot {slot} outside grid");
        let minutes = self.start.minutes() + (slot.min(self.len) as u16) * SLOT_MINUTES;
        TimeOfDay(minutes)
    }

    /// Hour-of-day of a slot boundary.
    #[must_use]
    pub fn hour_at(&self, slot: usize) -> u8 {
        self.time_at(slot).hour()
    }

    /// Slot index of an aligned time within the window, if any.
    #[must_use]
    pub fn slot_of(&self, time: TimeOfDay) -> Option<usize> {
        if !time.is_slot_aligned() || time < self.start || time > self.end {
            return None;
        }
        Some(usize::from((time.minutes() - self.start.minutes()) / SLOT_MINUTES))
    }

    /// Number of whole slots needed to cover `duration`, rounding up.
    #[must_use]
    pub fn slots_ceil(duration: Duration) -> usize {
        let seconds = duration.as_secs();
        let slot_seconds = u64::from(SLOT_MINUTES) * 60;
        usize::try_from(seconds.div_ceil(slot_seconds)).unwrap_or(usize::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Monday", DayOfWeek::Monday)]
    #[case("tuesday", DayOfWeek::Tuesday)]
    #[case(" Sunday ", DayOfWeek::Sunday)]
    fn parses_day_names(#[case] input: &str, #[case] expected: DayOfWeek) {
        assert_eq!(input.parse::<DayOfWeek>().unwrap(), expected);
    }

    #[rstest]
    fn rejects_unknown_day_names() {
        assert!("Mondy".parse::<DayOfWeek>().is_err());
    }

    #[rstest]
    #[case("09:00", 540)]
    #[case("13:30", 810)]
    #[case("24:00", 1440)]
    fn parses_times(#[case] input: &str, #[case] minutes: u16) {
        assert_eq!(input.parse::<TimeOfDay>().unwrap().minutes(), minutes);
    }

    #[rstest]
    #[case("9")]
    #[case("09:61")]
    #[case("25:00")]
    #[case("nine")]
    fn rejects_malformed_times(#[case] input: &str) {
        assert!(input.parse::<TimeOfDay>().is_err());
    }

    #[rstest]
    fn time_display_round_trips() {
        let time: TimeOfDay = "17:30".parse().unwrap();
        assert_eq!(time.to_string(), "17:30");
    }

    fn grid_9_to_21() -> SlotGrid {
        SlotGrid::new(
            TimeOfDay::from_hm(9, 0).unwrap(),
            TimeOfDay::from_hm(21, 0).unwrap(),
        )
        .unwrap()
    }

    #[rstest]
    fn grid_spans_the_window_in_half_hours() {
        let grid = grid_9_to_21();
        assert_eq!(grid.len(), 24);
        assert_eq!(grid.time_at(0).to_string(), "09:00");
        assert_eq!(grid.time_at(9).to_string(), "13:30");
        assert_eq!(grid.time_at(24).to_string(), "21:00");
    }

    #[rstest]
    fn grid_maps_aligned_times_to_slots() {
        let grid = grid_9_to_21();
        assert_eq!(grid.slot_of("09:00".parse().unwrap()), Some(0));
        assert_eq!(grid.slot_of("17:30".parse().unwrap()), Some(17));
        assert_eq!(grid.slot_of("17:45".parse().unwrap()), None);
        assert_eq!(grid.slot_of("08:30".parse().unwrap()), None);
    }

    #[rstest]
    fn grid_rejects_misaligned_or_empty_windows() {
        let nine = TimeOfDay::from_hm(9, 0).unwrap();
        let misaligned = TimeOfDay::from_minutes(9 * 60 + 10).unwrap();
        assert!(SlotGrid::new(nine, misaligned).is_err());
        assert!(SlotGrid::new(nine, nine).is_err());
    }

    #[rstest]
    #[case(Duration::from_secs(0), 0)]
    #[case(Duration::from_secs(60 * 11), 1)]
    #[case(Duration::from_secs(60 * 30), 1)]
    #[case(Duration::from_secs(60 * 31), 2)]
    #[case(Duration::from_secs(3600 * 3 + 1800), 7)]
    fn durations_round_up_to_slots(#[case] duration: Duration, #[case] slots: usize) {
        assert_eq!(SlotGrid::slots_ceil(duration), slots);
    }
}
