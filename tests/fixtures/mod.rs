//! Test fixtures for itinerary-planner.
//!
//! Real places along the Las Vegas Strip (from OpenStreetMap), walkable as a
//! sightseeing day, plus helpers to turn them into stops and providers.

pub mod strip_places;

pub use strip_places::*;
