//! Sightseeing stops on and around the Las Vegas Strip.
//!
//! Coordinates sourced from OpenStreetMap via Overpass API.
//! These are routable with the OSRM Nevada dataset.

#![allow(dead_code)]

use itinerary_planner::haversine::{HaversineConfig, HaversineMatrix};
use itinerary_planner::matrix::StopId;

/// A named place with coordinates.
#[derive(Debug, Clone)]
pub struct Place {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Place {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn stop_id(&self) -> StopId {
        StopId::new(self.name)
    }
}

/// Ordered roughly north to south.
pub const STRIP_PLACES: &[Place] = &[
    Place::new("Sinatra", 36.1300035, -115.1654850),
    Place::new("Encore at Wynn", 36.1289345, -115.1653620),
    Place::new("Wynn Las Vegas", 36.1263781, -115.1658180),
    Place::new("SW Steakhouse", 36.1262145, -115.1669146),
    Place::new("Public House", 36.1219193, -115.1689317),
    Place::new("Guy Fieri's Vegas Kitchen", 36.1184064, -115.1722088),
    Place::new("Yard House", 36.1177147, -115.1691992),
    Place::new("Caesars Palace", 36.1162, -115.1745),
    Place::new("Spago by Wolfgang Puck", 36.1139368, -115.1741462),
    Place::new("Bellagio", 36.1126, -115.1767),
    Place::new("Gordon Ramsay BurGR", 36.1107195, -115.1720818),
    Place::new("Earl of Sandwich Planet Hollywood", 36.1093912, -115.1720087),
    Place::new("The Crack Shack", 36.1050709, -115.1735287),
    Place::new("Hard Rock Cafe", 36.1041592, -115.1722166),
    Place::new("MGM Grand", 36.1023654, -115.1688720),
];

/// Every place, in a deliberately scrambled visiting order that starts at
/// the Bellagio.
pub fn scrambled_day() -> Vec<Place> {
    let order = [9, 0, 13, 4, 11, 2, 14, 6, 8, 1, 12, 3, 10, 5, 7];
    order.iter().map(|&i| STRIP_PLACES[i].clone()).collect()
}

pub fn stop_ids(places: &[Place]) -> Vec<StopId> {
    places.iter().map(Place::stop_id).collect()
}

/// Haversine provider that knows every fixture place.
pub fn walking_matrix() -> HaversineMatrix<StopId> {
    STRIP_PLACES
        .iter()
        .fold(HaversineMatrix::new(HaversineConfig::default()), |provider, place| {
            provider.with_location(place.stop_id(), place.lat, place.lng)
        })
}
