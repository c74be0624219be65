pub mod station;
pub mod trip;

use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use anyhow::Context;
use chrono::NaiveDateTime;
use geo_types::Point;
use serde::Deserialize;

use crate::dataset::{
    station::{Station, StationId},
    trip::Trip,
};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct Dataset {
    pub stations: Vec<Station>,
    pub trips: Vec<Trip>,
}

impl Dataset {
    pub fn read<P: AsRef<Path>>(stations_path: P, trips_path: P) -> anyhow::Result<Self> {
        let stations = read_stations(stations_path)?;
        let trips = read_trips(trips_path)?;

        Ok(Self { stations, trips })
    }
}

/// Station feed layout: `{"data": {"stations": [...]}}`, GBFS-style.
#[derive(Deserialize)]
struct StationFeed {
    data: StationList,
}

#[derive(Deserialize)]
struct StationList {
    stations: Vec<StationRecord>,
}

#[derive(Deserialize)]
struct StationRecord {
    short_name: String,
    name: String,
    lon: f64,
    lat: f64,
}

fn read_stations<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Station>> {
    let f = File::open(&path)
        .with_context(|| format!("Failed to open station list {:?}", path.as_ref()))?;

    stations_from_reader(BufReader::new(f))
}

fn stations_from_reader<R: Read>(rdr: R) -> anyhow::Result<Vec<Station>> {
    let feed: StationFeed =
        serde_json::from_reader(rdr).context("Station list is not valid station feed JSON")?;

    let stations = feed
        .data
        .stations
        .into_iter()
        .map(|s| {
            Station::new(
                StationId::new(&s.short_name),
                s.name,
                Point::new(s.lon, s.lat),
            )
        })
        .collect();

    Ok(stations)
}

/// One row of the trip log. Extra columns (ride id, bike type, membership)
/// are ignored by the reader.
#[derive(Deserialize)]
struct TripRecord {
    started_at: String,
    ended_at: String,
    start_station_id: String,
    end_station_id: String,
}

fn read_trips<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Trip>> {
    let f = File::open(&path)
        .with_context(|| format!("Failed to open trip log {:?}", path.as_ref()))?;

    trips_from_reader(BufReader::new(f))
}

fn trips_from_reader<R: Read>(rdr: R) -> anyhow::Result<Vec<Trip>> {
    let mut csv_reader = csv::Reader::from_reader(rdr);

    let mut trips = vec![];
    for record in csv_reader.deserialize() {
        let record: TripRecord = record.context("Malformed trip log row")?;

        let started_at = NaiveDateTime::parse_from_str(&record.started_at, TIMESTAMP_FORMAT)
            .with_context(|| format!("Bad start time {:?}", record.started_at))?;
        let ended_at = NaiveDateTime::parse_from_str(&record.ended_at, TIMESTAMP_FORMAT)
            .with_context(|| format!("Bad end time {:?}", record.ended_at))?;

        trips.push(Trip {
            start_station_id: StationId::new(&record.start_station_id),
            end_station_id: StationId::new(&record.end_station_id),
            started_at,
            ended_at,
        });
    }

    Ok(trips)
}
