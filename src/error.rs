//! Error types shared across providers, stores and the optimizer.

use thiserror::Error;

/// Errors from a [`DistanceMatrixProvider`](crate::traits::DistanceMatrixProvider).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// No stops were provided.
    #[error("at least one stop is required")]
    EmptyInput,
    /// The provider has no location for a stop.
    #[error("no location known for stop {0}")]
    UnknownStop(String),
    /// Transport-level failure talking to a remote service.
    #[error("http request failed: {0}")]
    Http(String),
    /// The routing service answered with an error code.
    #[error("routing service returned {code}: {message}")]
    Osrm { code: String, message: String },
    /// The response did not have the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    /// The local distance cache failed.
    #[error("distance cache failed: {0}")]
    Store(#[from] StoreError),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        ProviderError::Http(err.to_string())
    }
}

/// Errors from a persistence collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A lock guarding the store was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    Poisoned,
    /// Storage backend failure.
    #[error("storage backend: {0}")]
    Backend(String),
}

/// Failure signal from [`optimise`](crate::optimizer::optimise).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptimizeError {
    /// Zero stops were supplied.
    #[error("cannot optimise an empty itinerary")]
    EmptyInput,
    /// The distance matrix could not be retrieved upstream.
    #[error(transparent)]
    Provider(#[from] ProviderError),
    /// Construction or improvement faulted.
    #[error("optimization failed: {0}")]
    Failed(String),
}

/// Errors from the trip workflow in [`crate::trip`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("trip {0} not found")]
    TripNotFound(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Optimize(#[from] OptimizeError),
}
