//! In-memory stores for tests and embedding without a database.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::StoreError;
use crate::matrix::DistanceRecord;
use crate::traits::{DistanceStore, Id, TripStore};
use crate::trip::Trip;

#[derive(Debug)]
pub struct InMemoryDistanceStore<S: Id> {
    records: RwLock<HashMap<(S, S), DistanceRecord>>,
}

impl<S: Id> Default for InMemoryDistanceStore<S> {
    fn default() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }
}

impl<S: Id> InMemoryDistanceStore<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.records.read().map_err(|_| StoreError::Poisoned)?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        self.len().map(|len| len == 0)
    }
}

impl<S: Id> DistanceStore<S> for InMemoryDistanceStore<S> {
    fn get(&self, from: &S, to: &S) -> Result<Option<DistanceRecord>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records.get(&(from.clone(), to.clone())).copied())
    }

    fn put(&self, from: &S, to: &S, record: DistanceRecord) -> Result<(), StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::Poisoned)?;
        records.insert((from.clone(), to.clone()), record);
        Ok(())
    }

    fn delete(&self, from: &S, to: &S) -> Result<(), StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::Poisoned)?;
        records.remove(&(from.clone(), to.clone()));
        Ok(())
    }
}

#[derive(Debug)]
pub struct InMemoryTripStore<S: Id> {
    trips: RwLock<HashMap<String, Trip<S>>>,
}

impl<S: Id> Default for InMemoryTripStore<S> {
    fn default() -> Self {
        Self {
            trips: RwLock::new(HashMap::new()),
        }
    }
}

impl<S: Id> InMemoryTripStore<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trips(trips: impl IntoIterator<Item = Trip<S>>) -> Self {
        let trips = trips
            .into_iter()
            .map(|trip| (trip.id.clone(), trip))
            .collect();
        Self {
            trips: RwLock::new(trips),
        }
    }
}

impl<S: Id> TripStore<S> for InMemoryTripStore<S> {
    fn get(&self, trip_id: &str) -> Result<Option<Trip<S>>, StoreError> {
        let trips = self.trips.read().map_err(|_| StoreError::Poisoned)?;
        Ok(trips.get(trip_id).cloned())
    }

    fn put(&self, trip: Trip<S>) -> Result<(), StoreError> {
        let mut trips = self.trips.write().map_err(|_| StoreError::Poisoned)?;
        trips.insert(trip.id.clone(), trip);
        Ok(())
    }

    fn delete(&self, trip_id: &str) -> Result<(), StoreError> {
        let mut trips = self.trips.write().map_err(|_| StoreError::Poisoned)?;
        trips.remove(trip_id);
        Ok(())
    }
}
