use chrono::NaiveDateTime;

use crate::dataset::station::StationId;

#[derive(Debug, Clone)]
pub struct Trip {
    pub start_station_id: StationId,
    pub end_station_id: StationId,
    pub started_at: NaiveDateTime,
    pub ended_at: NaiveDateTime,
}
