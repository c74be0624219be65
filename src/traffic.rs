use std::collections::HashMap;

use anyhow::Context;
use chrono::{NaiveDateTime, Timelike};
use geo_types::Point;
use itertools::Itertools;
use serde::Serialize;

use crate::dataset::{
    station::{Station, StationId},
    trip::Trip,
};

pub const MINUTES_PER_DAY: usize = 1440;

/// Half-width of the display window around the selected minute.
const WINDOW_HALF_WIDTH: usize = 60;

/// Minute-of-day selected on the display slider. The slider emits -1 for
/// "show everything", which maps to `All`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeFilter {
    All,
    Minute(u32),
}

impl TimeFilter {
    pub fn from_slider(value: i32) -> Self {
        if value < 0 {
            TimeFilter::All
        } else {
            TimeFilter::Minute(value as u32)
        }
    }
}

pub fn minute_of_day(t: NaiveDateTime) -> usize {
    (t.hour() * 60 + t.minute()) as usize
}

/// Trips indexed by the minute-of-day of one of their endpoints. Built once
/// per dataset load; two instances exist, one keyed by departure and one by
/// arrival.
pub struct MinuteBuckets {
    buckets: Vec<Vec<Trip>>,
}

impl MinuteBuckets {
    fn build(trips: &[Trip], key: impl Fn(&Trip) -> NaiveDateTime) -> Self {
        let mut buckets = vec![Vec::new(); MINUTES_PER_DAY];
        for trip in trips {
            buckets[minute_of_day(key(trip))].push(trip.clone());
        }

        Self { buckets }
    }

    pub fn by_departure(trips: &[Trip]) -> Self {
        Self::build(trips, |t| t.started_at)
    }

    pub fn by_arrival(trips: &[Trip]) -> Self {
        Self::build(trips, |t| t.ended_at)
    }

    /// Trips within the 120-minute window centred on the selected minute,
    /// wrapping past midnight. The window is half-open on the bucket index:
    /// a trip exactly 60 minutes after the selected minute is excluded,
    /// one exactly 60 minutes before is included. Bucket order ascending,
    /// insertion order within a bucket.
    pub fn select_window(&self, filter: TimeFilter) -> Vec<&Trip> {
        let minute = match filter {
            TimeFilter::All => return self.buckets.iter().flatten().collect(),
            TimeFilter::Minute(m) => m as usize,
        };

        let min_minute = (minute + MINUTES_PER_DAY - WINDOW_HALF_WIDTH) % MINUTES_PER_DAY;
        let max_minute = (minute + WINDOW_HALF_WIDTH) % MINUTES_PER_DAY;

        if min_minute <= max_minute {
            self.buckets[min_minute..max_minute].iter().flatten().collect()
        } else {
            // Window wraps past midnight
            self.buckets[min_minute..]
                .iter()
                .chain(&self.buckets[..max_minute])
                .flatten()
                .collect()
        }
    }
}

/// Recomputes arrival/departure counts for every station from the trips in
/// the active window. Stations with no matched trips get all-zero counts;
/// trip rows naming unknown stations are never matched and contribute
/// nothing.
pub fn compute_station_traffic(
    stations: Vec<Station>,
    departure_buckets: &MinuteBuckets,
    arrival_buckets: &MinuteBuckets,
    filter: TimeFilter,
) -> Vec<Station> {
    let departure_counts: HashMap<&StationId, usize> = departure_buckets
        .select_window(filter)
        .into_iter()
        .counts_by(|t| &t.start_station_id);

    let arrival_counts: HashMap<&StationId, usize> = arrival_buckets
        .select_window(filter)
        .into_iter()
        .counts_by(|t| &t.end_station_id);

    stations
        .into_iter()
        .map(|mut station| {
            station.departures = departure_counts.get(&station.id).copied().unwrap_or(0);
            station.arrivals = arrival_counts.get(&station.id).copied().unwrap_or(0);
            station.total_traffic = station.arrivals + station.departures;
            station
        })
        .collect()
}

#[derive(Serialize)]
struct StationTraffic {
    id: StationId,
    name: String,
    #[serde(serialize_with = "geojson::ser::serialize_geometry")]
    geometry: Point,
    arrivals: usize,
    departures: usize,
    total_traffic: usize,
}

/// Serializes the stations with their traffic counts as a GeoJSON
/// FeatureCollection for the map layer.
pub fn to_feature_collection(stations: &[Station]) -> anyhow::Result<String> {
    let features: Vec<StationTraffic> = stations
        .iter()
        .map(|s| StationTraffic {
            id: s.id.clone(),
            name: s.name.clone(),
            geometry: s.coord,
            arrivals: s.arrivals,
            departures: s.departures,
            total_traffic: s.total_traffic,
        })
        .collect();

    geojson::ser::to_feature_collection_string(&features).context("Failed to serialize")
}
