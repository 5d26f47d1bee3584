//! # IO Module
//!
//! Boundary between the outside world and the domain logic.
//!
//! The planner does not own any storage: the UI keeps its state and hands it
//! over as a JSON [`shared::Snapshot`]. This module reads those snapshots so
//! the domain services only ever see typed values.

pub mod snapshot;

pub use snapshot::{load_snapshot, parse_snapshot};
