//! itinerary-planner core
//!
//! Reorders the stops of a trip for minimal travel distance, plus the
//! distance-matrix providers and persistence seams that feed it.

pub mod traits;
pub mod error;
pub mod matrix;
pub mod optimizer;
pub mod haversine;
pub mod osrm;
pub mod cache;
pub mod memory;
pub mod trip;
