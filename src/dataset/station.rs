use geo_types::Point;
use serde::Serialize;

/// Short name from the station feed, e.g. "A32000". The trip log's
/// station-id columns reference these.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct StationId(String);

impl StationId {
    pub fn new(str: &str) -> Self {
        Self(str.to_owned())
    }
}

#[derive(Debug, Clone)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    pub coord: Point,
    pub arrivals: usize,
    pub departures: usize,
    pub total_traffic: usize,
}

impl Station {
    pub fn new(id: StationId, name: String, coord: Point) -> Self {
        Self {
            id,
            name,
            coord,
            arrivals: 0,
            departures: 0,
            total_traffic: 0,
        }
    }
}
