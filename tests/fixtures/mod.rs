//! Test fixtures for itinerary-planner.
//!
//! Provides realistic test data: real Paris locations (from OpenStreetMap)
//! tagged with the categories the planner filters on.

pub mod paris_locations;

pub use paris_locations::*;
