//! Distance provider backed by a local cache of saved records.

use std::marker::PhantomData;

use tracing::debug;

use crate::error::ProviderError;
use crate::matrix::DistanceMatrix;
use crate::traits::{DistanceMatrixProvider, DistanceStore, Id};

/// Serves distances from a [`DistanceStore`], asking `inner` only when the
/// store lacks a pair among the requested stops.
///
/// Records fetched from `inner` are saved back to the store. When a fetch is
/// needed the whole stop list is requested, since remote table services
/// answer per stop set rather than per pair.
#[derive(Debug)]
pub struct CachedMatrixProvider<S, P, D> {
    inner: P,
    store: D,
    _stop: PhantomData<fn(&S)>,
}

impl<S, P, D> CachedMatrixProvider<S, P, D>
where
    S: Id,
    P: DistanceMatrixProvider<S>,
    D: DistanceStore<S>,
{
    pub fn new(inner: P, store: D) -> Self {
        Self {
            inner,
            store,
            _stop: PhantomData,
        }
    }

    pub fn store(&self) -> &D {
        &self.store
    }

    /// Drop every saved record between `stop` and the other `stops`, in both
    /// directions. Used when a place moves or leaves a trip.
    pub fn invalidate(&self, stop: &S, stops: &[S]) -> Result<(), ProviderError> {
        for other in stops.iter().filter(|other| *other != stop) {
            self.store.delete(stop, other)?;
            self.store.delete(other, stop)?;
        }
        Ok(())
    }
}

impl<S, P, D> DistanceMatrixProvider<S> for CachedMatrixProvider<S, P, D>
where
    S: Id,
    P: DistanceMatrixProvider<S>,
    D: DistanceStore<S>,
{
    fn distances_for(&self, stops: &[S]) -> Result<DistanceMatrix<S>, ProviderError> {
        if stops.is_empty() {
            return Err(ProviderError::EmptyInput);
        }

        let mut matrix = DistanceMatrix::new();
        let mut misses = 0usize;
        for from in stops {
            for to in stops.iter().filter(|to| *to != from) {
                match self.store.get(from, to)? {
                    Some(record) => matrix.insert(from.clone(), to.clone(), record),
                    None => misses += 1,
                }
            }
        }

        if misses == 0 {
            debug!(stops = stops.len(), "distance matrix served from cache");
            return Ok(matrix);
        }

        debug!(stops = stops.len(), misses, "distance cache miss, fetching");
        let fetched = self.inner.distances_for(stops)?;
        for (from, to, record) in fetched.iter() {
            if matrix.get(from, to).is_none() {
                self.store.put(from, to, *record)?;
                matrix.insert(from.clone(), to.clone(), *record);
            }
        }

        Ok(matrix)
    }
}
