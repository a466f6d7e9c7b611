//! One iteration of the colony: every ant builds a tour.
//!
//! Start cities and per-ant seeds are drawn sequentially from the trial's
//! stream before any tour is built. Each ant then runs on its own
//! `StdRng`, so sequential and parallel construction produce identical
//! tours.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::config::StartCity;
use super::tour::{Tour, TourConstructor};
use crate::error::{AcoError, AcoResult};
use crate::tsp::DistanceMatrix;

/// A tour together with its length.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AntTour {
    pub tour: Tour,
    /// Total closed-tour length. Lower is better.
    pub fitness: f64,
}

/// Tours built in one iteration.
#[derive(Debug, Clone)]
pub struct ColonyOutcome {
    /// One entry per ant, in ant order.
    pub ants: Vec<AntTour>,
    best_index: usize,
    worst_index: usize,
}

impl ColonyOutcome {
    /// Shortest tour of the iteration.
    pub fn best(&self) -> &AntTour {
        &self.ants[self.best_index]
    }

    /// Longest tour of the iteration.
    pub fn worst(&self) -> &AntTour {
        &self.ants[self.worst_index]
    }

    /// Mean tour length over all ants.
    pub fn mean_fitness(&self) -> f64 {
        self.ants.iter().map(|a| a.fitness).sum::<f64>() / self.ants.len() as f64
    }
}

/// A fixed-size colony of ants.
#[derive(Debug, Clone, Copy)]
pub struct Colony {
    num_ants: usize,
    start: StartCity,
    parallel: bool,
}

impl Colony {
    /// # Panics
    /// Panics if `num_ants` is zero.
    pub fn new(num_ants: usize, start: StartCity, parallel: bool) -> Self {
        assert!(num_ants > 0, "colony needs at least one ant");
        Self {
            num_ants,
            start,
            parallel,
        }
    }

    pub fn num_ants(&self) -> usize {
        self.num_ants
    }

    /// Builds `num_ants` tours and evaluates them.
    ///
    /// Fails with [`AcoError::DegenerateFitness`] if any tour has zero or
    /// non-finite length.
    pub fn run<R: Rng>(
        &self,
        constructor: &TourConstructor,
        distances: &DistanceMatrix,
        rng: &mut R,
    ) -> AcoResult<ColonyOutcome> {
        let n = constructor.len();
        let plans: Vec<(usize, u64)> = (0..self.num_ants)
            .map(|_| {
                let start = match self.start {
                    StartCity::Random => rng.random_range(0..n),
                    StartCity::Fixed(city) => city,
                };
                (start, rng.random::<u64>())
            })
            .collect();

        let build = |&(start, seed): &(usize, u64)| -> AcoResult<AntTour> {
            let mut ant_rng = StdRng::seed_from_u64(seed);
            let tour = constructor.construct(start, &mut ant_rng);
            let fitness = distances.tour_length(tour.cities());
            if !(fitness.is_finite() && fitness > 0.0) {
                return Err(AcoError::DegenerateFitness { fitness });
            }
            Ok(AntTour { tour, fitness })
        };

        let ants: Vec<AntTour> = if self.parallel {
            build_all_parallel(&plans, build)?
        } else {
            plans.iter().map(build).collect::<AcoResult<_>>()?
        };

        let (mut best_index, mut worst_index) = (0, 0);
        for (idx, ant) in ants.iter().enumerate() {
            if ant.fitness < ants[best_index].fitness {
                best_index = idx;
            }
            if ant.fitness > ants[worst_index].fitness {
                worst_index = idx;
            }
        }

        Ok(ColonyOutcome {
            ants,
            best_index,
            worst_index,
        })
    }
}

#[cfg(feature = "parallel")]
fn build_all_parallel<F>(plans: &[(usize, u64)], build: F) -> AcoResult<Vec<AntTour>>
where
    F: Fn(&(usize, u64)) -> AcoResult<AntTour> + Sync + Send,
{
    plans.par_iter().map(build).collect()
}

#[cfg(not(feature = "parallel"))]
fn build_all_parallel<F>(plans: &[(usize, u64)], build: F) -> AcoResult<Vec<AntTour>>
where
    F: Fn(&(usize, u64)) -> AcoResult<AntTour>,
{
    plans.iter().map(build).collect()
}
