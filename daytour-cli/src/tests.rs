//! CLI tests over a canned Toronto snapshot directory.

use std::fs;

use camino::Utf8PathBuf;
use clap::Parser;
use rstest::{fixture, rstest};
use serde_json::Value;
use tempfile::TempDir;

use super::{Cli, CliError};

const VENUES_JSON: &str = r#"[
  {
    "name": "Casa Loma",
    "latitude": 43.678,
    "longitude": -79.409,
    "hours": { "Tuesday": [{ "opens": "10:00", "closes": "17:00" }] },
    "crowd": { "Tuesday": [-2, -2, -2, -2, -2, -2, -2, -2, -2, -2, -2, -2,
                           -1, -1, 0, 0, 1, 1, 2, 2, 2, 2, 2, 2] }
  },
  {
    "name": "Royal Ontario Museum",
    "latitude": 43.668,
    "longitude": -79.395,
    "hours": { "Tuesday": [{ "opens": "10:00", "closes": "17:30" }] },
    "crowd": { "Tuesday": [-2, -2, -2, -2, -2, -2, -2, -2, -2, -2, -2, -2,
                           -1, -1, 0, 0, 1, 1, 2, 2, 2, 2, 2, 2] }
  },
  {
    "name": "CN Tower",
    "latitude": 43.643,
    "longitude": -79.387,
    "hours": { "Tuesday": [{ "opens": "09:00", "closes": "22:00" }] },
    "crowd": { "Tuesday": [-2, -2, -2, -2, -2, -2, -2, -2, -2, -2, -2, -2,
                           -1, -1, 0, 0, 1, 1, 2, 2, 2, 2, 2, 2] }
  }
]"#;

const DWELL_CSV: &str = "\
venue,dwell_hours
Casa Loma,3.0
Royal Ontario Museum,3.5
CN Tower,3.0
";

const ROUTES_CSV: &str = "\
day,time,origin,destination,distance_km,travel_minutes,delay_minutes
Tuesday,13:00,Casa Loma,Royal Ontario Museum,2.1,11,0
Tuesday,17:00,Royal Ontario Museum,CN Tower,3.4,17,0
Tuesday,12:00,Royal Ontario Museum,Casa Loma,2.1,12,0
Tuesday,12:00,Casa Loma,CN Tower,6.1,25,0
Tuesday,12:00,CN Tower,Casa Loma,6.1,25,0
Tuesday,12:00,CN Tower,Royal Ontario Museum,3.4,18,0
";

struct Snapshot {
    _dir: TempDir,
    root: Utf8PathBuf,
}

#[fixture]
fn snapshot() -> Snapshot {
    let dir = TempDir::new().expect("create snapshot dir");
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp path");
    let write = |name: &str, contents: &str| {
        fs::write(root.join(name).as_std_path(), contents).expect("write snapshot file");
    };
    write("venues.json", VENUES_JSON);
    write("dwell_times.csv", DWELL_CSV);
    write("timed_routes.csv", ROUTES_CSV);
    Snapshot { _dir: dir, root }
}

fn execute<'a>(arguments: impl IntoIterator<Item = &'a str>) -> Result<Value, CliError> {
    let cli = Cli::try_parse_from(arguments).map_err(CliError::ArgumentParsing)?;
    let mut output = Vec::new();
    cli.execute(&mut output)?;
    Ok(serde_json::from_slice(&output).expect("commands emit JSON"))
}

#[rstest]
fn solve_prints_the_optimized_itinerary(snapshot: Snapshot) {
    let outcome = execute([
        "daytour",
        "solve",
        "--data-dir",
        snapshot.root.as_str(),
        "--day",
        "Tuesday",
    ])
    .expect("solve succeeds");

    assert_eq!(outcome["status"], "Optimal");
    let visits = outcome["itinerary"]["visits"]
        .as_array()
        .expect("itinerary has visits");
    let stops: Vec<(&str, &str)> = visits
        .iter()
        .map(|visit| {
            (
                visit["venue"].as_str().unwrap(),
                visit["start"].as_str().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        stops,
        [
            ("Casa Loma", "10:00"),
            ("Royal Ontario Museum", "13:30"),
            ("CN Tower", "17:30"),
        ]
    );
    assert_eq!(outcome["itinerary"]["metrics"]["total_travel_minutes"], 28);
    assert_eq!(outcome["diagnostics"]["workers"], 1);
}

#[rstest]
fn solve_accepts_a_venue_subset_and_weight_overrides(snapshot: Snapshot) {
    let root = snapshot.root.as_str();
    let outcome = execute([
        "daytour",
        "solve",
        "--data-dir",
        root,
        "--day",
        "Tuesday",
        "--venue",
        "Casa Loma",
        "--venue",
        "Royal Ontario Museum",
        "--venues-weight",
        "-10",
    ])
    .expect("solve succeeds");
    let visits = outcome["itinerary"]["visits"].as_array().unwrap();
    assert!(visits.len() <= 2);
    assert!(
        visits
            .iter()
            .all(|visit| visit["venue"].as_str() != Some("CN Tower"))
    );
}

#[rstest]
fn pareto_writes_the_table_and_front_to_a_file(snapshot: Snapshot) {
    let output = snapshot.root.join("analysis.json");
    let cli = Cli::try_parse_from([
        "daytour",
        "pareto",
        "--data-dir",
        snapshot.root.as_str(),
        "--day",
        "Tuesday",
        "--points",
        "1",
        "--output",
        output.as_str(),
    ])
    .expect("arguments parse");
    let mut sink = Vec::new();
    cli.execute(&mut sink).expect("sweep succeeds");
    assert!(sink.is_empty(), "file output leaves stdout untouched");

    let analysis: Value =
        serde_json::from_str(&fs::read_to_string(output.as_std_path()).unwrap()).unwrap();
    assert_eq!(analysis["runs"].as_array().unwrap().len(), 1);
    assert_eq!(analysis["front"].as_array().unwrap().len(), 1);
    assert_eq!(analysis["runs"][0]["status"], "Optimal");
}

#[rstest]
fn unknown_days_fail_argument_parsing(snapshot: Snapshot) {
    let err = execute([
        "daytour",
        "solve",
        "--data-dir",
        snapshot.root.as_str(),
        "--day",
        "Tueday",
    ])
    .unwrap_err();
    assert!(matches!(err, CliError::ArgumentParsing(_)));
}

#[rstest]
fn misaligned_windows_fail_before_any_solve(snapshot: Snapshot) {
    let err = execute([
        "daytour",
        "solve",
        "--data-dir",
        snapshot.root.as_str(),
        "--day",
        "Tuesday",
        "--start",
        "09:10",
    ])
    .unwrap_err();
    assert!(matches!(err, CliError::InvalidConfiguration(_)));
}

#[rstest]
fn negative_time_limits_are_rejected(snapshot: Snapshot) {
    let err = execute([
        "daytour",
        "solve",
        "--data-dir",
        snapshot.root.as_str(),
        "--day",
        "Tuesday",
        "--time-limit",
        "-1",
    ])
    .unwrap_err();
    assert!(matches!(err, CliError::InvalidTimeLimit { .. }));
}
