//! Ant Colony Optimization for the Travelling Salesman Problem.
//!
//! - **Ant System**: every ant deposits pheromone in proportion to the
//!   quality of its tour.
//! - **Elitist Ant System**: the best tour found so far receives extra
//!   reinforcement every iteration.
//!
//! A trial runs a fixed number of iterations over an immutable
//! [`tsp::DistanceMatrix`] and reports the shortest tour found.
//!
//! # Example
//!
//! ```
//! use u_aco::aco::{AcoConfig, AcoRunner};
//! use u_aco::tsp::{City, DistanceMatrix};
//!
//! let cities = vec![
//!     City::new(0, 0.0, 0.0),
//!     City::new(1, 2.0, 0.0),
//!     City::new(2, 2.0, 1.0),
//!     City::new(3, 0.0, 1.0),
//! ];
//! let distances = DistanceMatrix::from_cities(&cities)?;
//! let config = AcoConfig::default()
//!     .with_num_ants(10)
//!     .with_total_iterations(50)
//!     .with_elitist(2.0)
//!     .with_seed(42);
//!
//! let result = AcoRunner::run(&distances, &config)?;
//! assert!((result.best_fitness - 6.0).abs() < 1e-9);
//! # Ok::<(), u_aco::AcoError>(())
//! ```
//!
//! # Features
//!
//! - `parallel`: build the tours of one iteration in parallel with rayon.
//!   Results do not depend on this feature.
//! - `serde`: serialization for configuration and instance types.

pub mod aco;
mod error;
pub mod tsp;

pub use error::{AcoError, AcoResult};
