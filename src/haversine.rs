//! Haversine distance matrix provider (fallback when OSRM unavailable).
//!
//! Uses great-circle distance and an assumed walking speed.
//! Less accurate than OSRM (ignores paths) but always available.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::ProviderError;
use crate::matrix::{DistanceMatrix, DistanceRecord};
use crate::traits::{DistanceMatrixProvider, Id};

/// Average walking speed assumption for time estimation.
const DEFAULT_SPEED_KMH: f64 = 5.0;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Settings for [`HaversineMatrix`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HaversineConfig {
    /// Assumed average walking speed in km/h.
    pub speed_kmh: f64,
}

impl Default for HaversineConfig {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
        }
    }
}

/// Haversine-based distance matrix provider.
///
/// Knows the (lat, lng) of each stop it was given and estimates travel
/// time from straight-line distance at a fixed speed.
#[derive(Debug, Clone)]
pub struct HaversineMatrix<S: Id> {
    config: HaversineConfig,
    locations: HashMap<S, (f64, f64)>,
}

impl<S: Id> HaversineMatrix<S> {
    pub fn new(config: HaversineConfig) -> Self {
        Self {
            config,
            locations: HashMap::new(),
        }
    }

    /// Register or move a stop.
    pub fn with_location(mut self, stop: S, lat: f64, lng: f64) -> Self {
        self.locations.insert(stop, (lat, lng));
        self
    }

    pub fn locate(&self, stop: &S) -> Option<(f64, f64)> {
        self.locations.get(stop).copied()
    }

    /// Calculate haversine distance between two points in kilometers.
    fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
        let (lat1, lng1) = from;
        let (lat2, lng2) = to;

        let lat1_rad = lat1.to_radians();
        let lat2_rad = lat2.to_radians();
        let delta_lat = (lat2 - lat1).to_radians();
        let delta_lng = (lng2 - lng1).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().asin();

        EARTH_RADIUS_KM * c
    }

    /// Convert distance in km to walking time in seconds.
    fn km_to_seconds(&self, km: f64) -> u64 {
        let hours = km / self.config.speed_kmh;
        (hours * 3600.0).round() as u64
    }

    fn record(&self, from: (f64, f64), to: (f64, f64)) -> DistanceRecord {
        let km = Self::haversine_km(from, to);
        DistanceRecord::new((km * 1000.0).round() as u64, self.km_to_seconds(km))
    }
}

impl<S: Id + ToString> DistanceMatrixProvider<S> for HaversineMatrix<S> {
    fn distances_for(&self, stops: &[S]) -> Result<DistanceMatrix<S>, ProviderError> {
        if stops.is_empty() {
            return Err(ProviderError::EmptyInput);
        }

        let located = stops
            .iter()
            .map(|stop| {
                self.locate(stop)
                    .map(|location| (stop, location))
                    .ok_or_else(|| ProviderError::UnknownStop(stop.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut matrix = DistanceMatrix::new();
        for &(from, from_location) in &located {
            for &(to, to_location) in &located {
                if from != to {
                    matrix.insert(from.clone(), to.clone(), self.record(from_location, to_location));
                }
            }
        }

        Ok(matrix)
    }
}
