//! TSP problem instances.
//!
//! Cities and the symmetric distance matrix the colony works on. Loading
//! instances from files is left to callers; with the `serde` feature
//! enabled, [`City`] can be deserialized directly.

mod city;
mod distance;

pub use city::City;
pub use distance::DistanceMatrix;
