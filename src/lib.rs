//! fluxora-view core
//!
//! Client-side visualization core of the Fluxora traffic-routing demo:
//! reconciles asynchronously-fetched route candidates with real road
//! geometry, keeps map overlays persistent across re-renders and transient
//! failures, and maintains the selection model and rewards ledger.

pub mod backend;
pub mod candidates;
pub mod config;
pub mod congestion;
pub mod coordinator;
pub mod dashboard;
pub mod directions;
pub mod geometry;
pub mod insights;
pub mod locations;
pub mod map_sync;
pub mod rewards;
pub mod surface;
pub mod traits;
