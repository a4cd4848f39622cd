//! Collaborator traits for the itinerary planner.
//!
//! The optimizer itself is a set of pure functions; these traits describe
//! the things around it that fetch distances and persist trips. Concrete
//! apps implement them for their own storage and map services.

use std::hash::Hash;

use crate::error::{ProviderError, StoreError};
use crate::matrix::{DistanceMatrix, DistanceRecord};
use crate::trip::Trip;

/// Unique identifier for planner entities.
pub trait Id: Clone + Eq + Hash {}

impl<T> Id for T where T: Clone + Eq + Hash {}

/// Provides pairwise distances for a set of stops.
///
/// Implementations should cover every ordered pair of distinct stops. Pairs
/// they cannot resolve may be left out; the optimizer treats those as
/// maximally costly.
pub trait DistanceMatrixProvider<S: Id> {
    /// Return distances for every ordered pair among `stops`.
    ///
    /// Must return `Err(ProviderError::EmptyInput)` when `stops` is empty.
    fn distances_for(&self, stops: &[S]) -> Result<DistanceMatrix<S>, ProviderError>;
}

impl<S, P> DistanceMatrixProvider<S> for &P
where
    S: Id,
    P: DistanceMatrixProvider<S> + ?Sized,
{
    fn distances_for(&self, stops: &[S]) -> Result<DistanceMatrix<S>, ProviderError> {
        (**self).distances_for(stops)
    }
}

/// Local repository of previously fetched distance records.
pub trait DistanceStore<S: Id> {
    fn get(&self, from: &S, to: &S) -> Result<Option<DistanceRecord>, StoreError>;

    fn put(&self, from: &S, to: &S, record: DistanceRecord) -> Result<(), StoreError>;

    /// Remove a saved record. Removing an absent record is not an error.
    fn delete(&self, from: &S, to: &S) -> Result<(), StoreError>;
}

impl<S: Id, T: DistanceStore<S> + ?Sized> DistanceStore<S> for &T {
    fn get(&self, from: &S, to: &S) -> Result<Option<DistanceRecord>, StoreError> {
        (**self).get(from, to)
    }

    fn put(&self, from: &S, to: &S, record: DistanceRecord) -> Result<(), StoreError> {
        (**self).put(from, to, record)
    }

    fn delete(&self, from: &S, to: &S) -> Result<(), StoreError> {
        (**self).delete(from, to)
    }
}

/// Persistence for trips and their stop order.
pub trait TripStore<S: Id> {
    fn get(&self, trip_id: &str) -> Result<Option<Trip<S>>, StoreError>;

    /// Insert or replace a trip.
    fn put(&self, trip: Trip<S>) -> Result<(), StoreError>;

    fn delete(&self, trip_id: &str) -> Result<(), StoreError>;
}

impl<S: Id, T: TripStore<S> + ?Sized> TripStore<S> for &T {
    fn get(&self, trip_id: &str) -> Result<Option<Trip<S>>, StoreError> {
        (**self).get(trip_id)
    }

    fn put(&self, trip: Trip<S>) -> Result<(), StoreError> {
        (**self).put(trip)
    }

    fn delete(&self, trip_id: &str) -> Result<(), StoreError> {
        (**self).delete(trip_id)
    }
}
