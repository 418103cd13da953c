//! Input-model loaders for the daytour engine's provider snapshots.
//!
//! External collaborators leave three files in a snapshot directory:
//!
//! - `venues.json` — one record per venue: name, coordinates, per-day
//!   `HH:MM` open/close intervals and a 24-entry hourly crowd array using
//!   `999` as the closed sentinel;
//! - `dwell_times.csv` — `venue,dwell_hours` rows;
//! - `timed_routes.csv` — `day,time,origin,destination,distance_km,
//!   travel_minutes,delay_minutes` rows on the 30-minute departure grid,
//!   with each direction of a pair tabulated independently.
//!
//! The loaders validate eagerly (negative figures, malformed days or times,
//! duplicate venues) and assemble the read-only input model the optimizer
//! consumes. Persisting raw provider responses is the providers' business,
//! not handled here.

#![forbid(unsafe_code)]

use std::collections::HashMap;
use std::fs;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use geo::Coord;
use serde::Deserialize;

use daytour_core::{
    CrowdSeries, DayOfWeek, MemoryVenueStore, OpenInterval, TimeOfDay, TravelMatrix, TravelSample,
    Venue, VenueId, WeekSchedule, WeeklyCrowd,
};

mod error;

pub use error::DataError;

/// Crowd value providers use to mark hours the venue is not operating.
pub const CLOSED_SENTINEL: i64 = 999;

/// File name of the venue records snapshot.
pub const VENUES_FILE: &str = "venues.json";

/// File name of the dwell-time table.
pub const DWELL_TIMES_FILE: &str = "dwell_times.csv";

/// File name of the timed travel-route table.
pub const TIMED_ROUTES_FILE: &str = "timed_routes.csv";

/// The assembled read-only inputs for one optimization day span.
#[derive(Debug, Clone, Default)]
pub struct InputModel {
    /// Venue cache with hours, dwell and crowd data.
    pub store: MemoryVenueStore,
    /// Tabulated travel durations.
    pub travel: TravelMatrix,
}

/// Load the full input model from a snapshot directory.
pub fn load_input_model(dir: &Utf8Path) -> Result<InputModel, DataError> {
    let records = read_venue_records(&dir.join(VENUES_FILE))?;
    let dwell = read_dwell_times(&dir.join(DWELL_TIMES_FILE))?;
    let venues = assemble_venues(records, &dwell)?;
    let travel = read_travel_matrix(&dir.join(TIMED_ROUTES_FILE))?;
    Ok(InputModel {
        store: MemoryVenueStore::with_venues(venues),
        travel,
    })
}

#[derive(Debug, Deserialize)]
struct VenueRecord {
    name: String,
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    hours: HashMap<String, Vec<HoursEntry>>,
    #[serde(default)]
    crowd: HashMap<String, Vec<i64>>,
}

#[derive(Debug, Deserialize)]
struct HoursEntry {
    opens: String,
    closes: String,
}

#[derive(Debug, Deserialize)]
struct DwellRow {
    venue: String,
    dwell_hours: f64,
}

#[derive(Debug, Deserialize)]
struct RouteRow {
    day: String,
    time: String,
    origin: String,
    destination: String,
    // Carried by the provider for inspection; the optimizer does not use it.
    #[expect(dead_code, reason = "column is part of the snapshot format")]
    #[serde(default)]
    distance_km: f64,
    travel_minutes: f64,
    delay_minutes: f64,
}

fn read_venue_records(path: &Utf8Path) -> Result<Vec<VenueRecord>, DataError> {
    let raw = fs::read_to_string(path.as_std_path()).map_err(|source| DataError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| DataError::ParseVenues {
        path: path.to_path_buf(),
        source,
    })
}

fn read_dwell_times(path: &Utf8Path) -> Result<HashMap<String, f64>, DataError> {
    let mut reader =
        csv::Reader::from_path(path.as_std_path()).map_err(|source| DataError::ParseCsv {
            path: path.to_path_buf(),
            source,
        })?;
    let mut dwell = HashMap::new();
    for row in reader.deserialize::<DwellRow>() {
        let row = row.map_err(|source| DataError::ParseCsv {
            path: path.to_path_buf(),
            source,
        })?;
        dwell.insert(row.venue, row.dwell_hours);
    }
    Ok(dwell)
}

fn parse_day(path: &Utf8Path, value: &str) -> Result<DayOfWeek, DataError> {
    value.parse().map_err(|_| DataError::InvalidDay {
        path: path.to_path_buf(),
        value: value.to_owned(),
    })
}

fn parse_time(path: &Utf8Path, value: &str) -> Result<TimeOfDay, DataError> {
    value.parse().map_err(|_| DataError::InvalidTime {
        path: path.to_path_buf(),
        value: value.to_owned(),
    })
}

fn assemble_venues(
    records: Vec<VenueRecord>,
    dwell: &HashMap<String, f64>,
) -> Result<Vec<Venue>, DataError> {
    let venues_path = Utf8PathBuf::from(VENUES_FILE);
    let mut venues: Vec<Venue> = Vec::with_capacity(records.len());
    for record in records {
        if venues.iter().any(|v| v.id().as_str() == record.name) {
            return Err(DataError::DuplicateVenue { venue: record.name });
        }

        let mut hours = WeekSchedule::closed();
        for (day_name, entries) in &record.hours {
            let day = parse_day(&venues_path, day_name)?;
            for entry in entries {
                let open = parse_time(&venues_path, &entry.opens)?;
                let close = parse_time(&venues_path, &entry.closes)?;
                let interval =
                    OpenInterval::new(open, close).map_err(|_| DataError::InvalidHours {
                        venue: record.name.clone(),
                        day,
                    })?;
                hours
                    .insert(day, interval)
                    .map_err(|_| DataError::OverlappingHours {
                        venue: record.name.clone(),
                        day,
                    })?;
            }
        }

        let mut crowd = WeeklyCrowd::default();
        for (day_name, levels) in &record.crowd {
            let day = parse_day(&venues_path, day_name)?;
            if levels.len() != 24 {
                return Err(DataError::CrowdSeriesLength {
                    venue: record.name.clone(),
                    day,
                    found: levels.len(),
                });
            }
            let mut samples = [None; 24];
            for (hour, &level) in levels.iter().enumerate() {
                if level == CLOSED_SENTINEL {
                    continue;
                }
                let level = i8::try_from(level).map_err(|_| DataError::CrowdOutOfRange {
                    venue: record.name.clone(),
                    value: level,
                })?;
                samples[hour] = Some(level);
            }
            crowd = crowd.with_day(day, CrowdSeries::new(samples));
        }

        let hours_figure = *dwell
            .get(&record.name)
            .ok_or_else(|| DataError::MissingDwell {
                venue: record.name.clone(),
            })?;
        if !hours_figure.is_finite() || hours_figure <= 0.0 {
            return Err(DataError::InvalidDwell {
                venue: record.name,
                hours: hours_figure,
            });
        }

        let venue = Venue::new(
            VenueId::new(record.name.clone()),
            Coord {
                x: record.longitude,
                y: record.latitude,
            },
            hours,
            Duration::from_secs_f64(hours_figure * 3600.0),
            crowd,
        )
        .map_err(|_| DataError::InvalidDwell {
            venue: record.name,
            hours: hours_figure,
        })?;
        venues.push(venue);
    }
    Ok(venues)
}

fn read_travel_matrix(path: &Utf8Path) -> Result<TravelMatrix, DataError> {
    let mut reader =
        csv::Reader::from_path(path.as_std_path()).map_err(|source| DataError::ParseCsv {
            path: path.to_path_buf(),
            source,
        })?;
    let mut matrix = TravelMatrix::new();
    for row in reader.deserialize::<RouteRow>() {
        let row = row.map_err(|source| DataError::ParseCsv {
            path: path.to_path_buf(),
            source,
        })?;
        let day = parse_day(path, &row.day)?;
        let departure = parse_time(path, &row.time)?;
        if !departure.is_slot_aligned() {
            return Err(DataError::MisalignedTime {
                path: path.to_path_buf(),
                time: departure,
            });
        }
        let valid = |figure: f64| figure.is_finite() && figure >= 0.0;
        if !valid(row.travel_minutes) || !valid(row.delay_minutes) {
            return Err(DataError::InvalidTravel {
                path: path.to_path_buf(),
                origin: row.origin,
                destination: row.destination,
            });
        }
        matrix.insert(
            VenueId::new(row.origin),
            VenueId::new(row.destination),
            day,
            departure,
            TravelSample {
                minutes: row.travel_minutes.round() as u32,
                delay_minutes: row.delay_minutes.round() as u32,
            },
        );
    }
    Ok(matrix)
}
