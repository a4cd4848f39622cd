//! Trip workflow: load a trip, optimise its stop order, persist the result.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{OptimizeError, PlanError};
use crate::optimizer::{self, Tour};
use crate::traits::{DistanceMatrixProvider, Id, TripStore};

/// A trip and its current visiting order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip<S> {
    pub id: String,
    pub name: String,
    pub stops: Tour<S>,
}

impl<S: Id> Trip<S> {
    pub fn new(id: impl Into<String>, name: impl Into<String>, stops: Vec<S>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            stops,
        }
    }

    /// The first stop, where the trip begins.
    pub fn start(&self) -> Option<&S> {
        self.stops.first()
    }
}

/// Connects a distance provider and a trip store around the optimizer.
#[derive(Debug, Clone)]
pub struct TripPlanner<P, T> {
    provider: P,
    trips: T,
}

impl<P, T> TripPlanner<P, T> {
    pub fn new(provider: P, trips: T) -> Self {
        Self { provider, trips }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn trips(&self) -> &T {
        &self.trips
    }

    /// Reorder a stored trip's stops and save the new order.
    ///
    /// The trip is only written after a successful optimization; any failure
    /// leaves the stored order untouched.
    pub fn optimise_trip<S>(&self, trip_id: &str) -> Result<Trip<S>, PlanError>
    where
        S: Id,
        P: DistanceMatrixProvider<S>,
        T: TripStore<S>,
    {
        let mut trip = self
            .trips
            .get(trip_id)?
            .ok_or_else(|| PlanError::TripNotFound(trip_id.to_string()))?;

        // Checked here as well so an empty trip never reaches the provider.
        if trip.stops.is_empty() {
            return Err(OptimizeError::EmptyInput.into());
        }

        let distances = self.provider.distances_for(&trip.stops).inspect_err(|err| {
            warn!(trip = trip_id, error = %err, "distance lookup failed");
        })?;
        trip.stops = optimizer::optimise(&distances, &trip.stops)?;
        self.trips.put(trip.clone())?;
        info!(trip = trip_id, stops = trip.stops.len(), "optimised itinerary saved");

        Ok(trip)
    }

    /// Optimise several trips in parallel.
    ///
    /// Results are returned in the order of `trip_ids`. Trips are independent,
    /// so one failure does not affect the others.
    pub fn optimise_trips<S>(&self, trip_ids: &[&str]) -> Vec<(String, Result<Trip<S>, PlanError>)>
    where
        S: Id + Send,
        P: DistanceMatrixProvider<S> + Sync,
        T: TripStore<S> + Sync,
    {
        trip_ids
            .par_iter()
            .map(|trip_id| (trip_id.to_string(), self.optimise_trip(trip_id)))
            .collect()
    }
}
