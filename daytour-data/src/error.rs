//! Errors raised while reading provider snapshot files.

use camino::Utf8PathBuf;
use thiserror::Error;

use daytour_core::{DayOfWeek, TimeOfDay};

/// Error raised when reading or validating snapshot files.
#[derive(Debug, Error)]
pub enum DataError {
    /// Reading a snapshot file from disk failed.
    #[error("failed to read {path}: {source}")]
    ReadFile {
        /// Location of the snapshot file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The venue records file was not valid JSON of the expected shape.
    #[error("failed to parse venue records from {path}: {source}")]
    ParseVenues {
        /// Location of the venue records file.
        path: Utf8PathBuf,
        /// JSON decoding failure.
        #[source]
        source: serde_json::Error,
    },
    /// A CSV snapshot could not be read or deserialized.
    #[error("failed to parse {path}: {source}")]
    ParseCsv {
        /// Location of the CSV file.
        path: Utf8PathBuf,
        /// Decoder error returned by `csv`.
        #[source]
        source: csv::Error,
    },
    /// A day column held something other than the seven English day names.
    #[error("unknown day {value:?} in {path}")]
    InvalidDay {
        /// File the value was read from.
        path: Utf8PathBuf,
        /// The rejected value.
        value: String,
    },
    /// A time column could not be read as `HH:MM`.
    #[error("invalid time {value:?} in {path}")]
    InvalidTime {
        /// File the value was read from.
        path: Utf8PathBuf,
        /// The rejected value.
        value: String,
    },
    /// A departure time is off the 30-minute grid the snapshot promises.
    #[error("departure {time} in {path} is off the 30-minute grid")]
    MisalignedTime {
        /// File the value was read from.
        path: Utf8PathBuf,
        /// The misaligned departure time.
        time: TimeOfDay,
    },
    /// An operating-hours entry closes at or before it opens.
    #[error("venue {venue} closes at or before it opens on {day}")]
    InvalidHours {
        /// Venue the entry belongs to.
        venue: String,
        /// Day of the invalid entry.
        day: DayOfWeek,
    },
    /// Operating-hours entries overlap for one day.
    #[error("venue {venue} has overlapping hours on {day}")]
    OverlappingHours {
        /// Venue the entries belong to.
        venue: String,
        /// Day of the overlap.
        day: DayOfWeek,
    },
    /// A crowd series did not contain exactly one sample per hour.
    #[error("crowd series for {venue} on {day} must have 24 entries, found {found}")]
    CrowdSeriesLength {
        /// Venue the series belongs to.
        venue: String,
        /// Day of the malformed series.
        day: DayOfWeek,
        /// Number of entries actually present.
        found: usize,
    },
    /// A crowd level was neither on the provider scale nor the sentinel.
    #[error("crowd level {value} for {venue} is outside the provider scale")]
    CrowdOutOfRange {
        /// Venue the sample belongs to.
        venue: String,
        /// The rejected sample.
        value: i64,
    },
    /// Two venue records share a name.
    #[error("duplicate venue record {venue}")]
    DuplicateVenue {
        /// The duplicated name.
        venue: String,
    },
    /// A venue record has no row in the dwell-time table.
    #[error("no dwell time for venue {venue}")]
    MissingDwell {
        /// The venue without a dwell figure.
        venue: String,
    },
    /// A dwell figure was zero, negative or not a number.
    #[error("dwell for {venue} must be a positive number of hours, found {hours}")]
    InvalidDwell {
        /// Venue the figure belongs to.
        venue: String,
        /// The rejected figure.
        hours: f64,
    },
    /// A travel or delay figure was negative or not a number.
    #[error("negative or malformed travel figures in {path} for {origin} -> {destination}")]
    InvalidTravel {
        /// File the row was read from.
        path: Utf8PathBuf,
        /// Origin venue of the row.
        origin: String,
        /// Destination venue of the row.
        destination: String,
    },
}
