//! Ant Colony Optimization (ACO) for the symmetric TSP.
//!
//! Artificial ants build tours city by city, biased by a shared pheromone
//! matrix and by inverse distance. After every iteration pheromone
//! evaporates and each tour reinforces its edges in proportion to its
//! quality. The elitist variant additionally reinforces the best tour
//! found so far.
//!
//! # Key Types
//!
//! - [`AcoConfig`]: Algorithm parameters
//! - [`PheromoneMatrix`]: Shared learned edge intensities
//! - [`TourConstructor`]: Probabilistic construction of one tour
//! - [`Colony`]: All ants of one iteration
//! - [`PheromoneUpdater`]: Evaporation and deposit
//! - [`Trial`] / [`AcoRunner`]: The iteration loop
//!
//! # References
//!
//! - Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a
//!   Colony of Cooperating Agents"
//! - Dorigo & Stützle (2004), *Ant Colony Optimization*

mod colony;
mod config;
mod pheromone;
mod runner;
mod telemetry;
mod tour;
mod update;

pub use colony::{AntTour, Colony, ColonyOutcome};
pub use config::{AcoConfig, AcoVariant, StartCity};
pub use pheromone::{PheromoneMatrix, MIN_PHEROMONE};
pub use runner::{AcoRunner, IterationStats, Trial, TrialResult, TrialState};
pub use telemetry::{AcoObserver, InfoLogger, TrialLogger};
pub use tour::{HeuristicMatrix, Tour, TourConstructor, COINCIDENT_HEURISTIC};
pub use update::PheromoneUpdater;
