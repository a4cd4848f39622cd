//! OSRM HTTP adapter for distance matrices.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::ProviderError;
use crate::matrix::{DistanceMatrix, DistanceRecord};
use crate::traits::{DistanceMatrixProvider, Id};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            profile: "foot".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient<S: Id> {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
    locations: HashMap<S, (f64, f64)>,
}

impl<S: Id> OsrmClient<S> {
    pub fn new(config: OsrmConfig) -> Result<Self, ProviderError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            config,
            client,
            locations: HashMap::new(),
        })
    }

    /// Register a stop's (lat, lng).
    pub fn with_location(mut self, stop: S, lat: f64, lng: f64) -> Self {
        self.locations.insert(stop, (lat, lng));
        self
    }

    fn table_url(&self, locations: &[(f64, f64)]) -> String {
        let coords = locations
            .iter()
            .map(|(lat, lng)| format!("{:.6},{:.6}", lng, lat))
            .collect::<Vec<_>>()
            .join(";");

        format!(
            "{}/table/v1/{}/{}?annotations=distance,duration",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            coords
        )
    }
}

impl<S: Id + ToString> DistanceMatrixProvider<S> for OsrmClient<S> {
    fn distances_for(&self, stops: &[S]) -> Result<DistanceMatrix<S>, ProviderError> {
        if stops.is_empty() {
            return Err(ProviderError::EmptyInput);
        }

        let locations = stops
            .iter()
            .map(|stop| {
                self.locations
                    .get(stop)
                    .copied()
                    .ok_or_else(|| ProviderError::UnknownStop(stop.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let url = self.table_url(&locations);
        debug!(stops = stops.len(), profile = %self.config.profile, "requesting OSRM table");

        let body = self
            .client
            .get(url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<OsrmTableResponse>())
            .inspect_err(|err| warn!(error = %err, "OSRM table request failed"))?;

        matrix_from_table(stops, body)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct OsrmTableResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    distances: Option<Vec<Vec<Option<f64>>>>,
    #[serde(default)]
    durations: Option<Vec<Vec<Option<f64>>>>,
}

/// Convert an OSRM table into a matrix keyed by `stops`.
///
/// Rows and columns follow the order of `stops`. A `null` cell in either
/// annotation means OSRM found no path; that pair is left out.
pub(crate) fn matrix_from_table<S: Id>(
    stops: &[S],
    body: OsrmTableResponse,
) -> Result<DistanceMatrix<S>, ProviderError> {
    if body.code != "Ok" {
        return Err(ProviderError::Osrm {
            code: body.code,
            message: body.message.unwrap_or_default(),
        });
    }

    let n = stops.len();
    let (Some(distances), Some(durations)) = (body.distances, body.durations) else {
        return Err(ProviderError::MalformedResponse(
            "table lacks distance or duration annotations".to_string(),
        ));
    };
    let square = |rows: &[Vec<Option<f64>>]| rows.len() == n && rows.iter().all(|row| row.len() == n);
    if !square(&distances) || !square(&durations) {
        return Err(ProviderError::MalformedResponse(format!(
            "expected a {n}x{n} table"
        )));
    }

    let mut matrix = DistanceMatrix::new();
    for (i, from) in stops.iter().enumerate() {
        for (j, to) in stops.iter().enumerate() {
            if i == j {
                continue;
            }
            if let (Some(distance), Some(duration)) = (distances[i][j], durations[i][j]) {
                matrix.insert(
                    from.clone(),
                    to.clone(),
                    DistanceRecord::new(distance.round() as u64, duration.round() as u64),
                );
            }
        }
    }

    Ok(matrix)
}
