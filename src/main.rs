use std::time::Instant;

use clap::Parser;

use crate::{
    dataset::Dataset,
    traffic::{MinuteBuckets, TimeFilter},
};
mod dataset;
mod traffic;

#[derive(Parser)]
struct Args {
    /// Path to station list JSON
    stations_path: String,
    /// Path to trip log CSV
    trips_path: String,
    /// Minute-of-day to centre the 120-minute window on, -1 for all trips
    #[arg(long, default_value_t = -1)]
    filter: i32,
    /// Write the GeoJSON here instead of stdout
    #[arg(long)]
    output: Option<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let now = Instant::now();
    let dataset = Dataset::read(&args.stations_path, &args.trips_path)?;
    log::info!(
        "Read {} stations and {} trips in {:?}",
        dataset.stations.len(),
        dataset.trips.len(),
        now.elapsed()
    );

    let departures = MinuteBuckets::by_departure(&dataset.trips);
    let arrivals = MinuteBuckets::by_arrival(&dataset.trips);

    let filter = TimeFilter::from_slider(args.filter);
    let now = Instant::now();
    let stations =
        traffic::compute_station_traffic(dataset.stations, &departures, &arrivals, filter);
    log::info!("Computed station traffic in {:?}", now.elapsed());

    let feature_collection = traffic::to_feature_collection(&stations)?;
    match args.output {
        Some(path) => std::fs::write(&path, feature_collection)?,
        None => println!("{feature_collection}"),
    }

    Ok(())
}
