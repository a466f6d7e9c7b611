//! Pheromone update: evaporation followed by deposit.
//!
//! 1. Evaporate: every entry is multiplied by `1 - rho`.
//! 2. Deposit: each ant adds `Q / L` on every edge of its tour, where `L`
//!    is the tour length.
//! 3. Elitist only: the best-so-far tour additionally receives
//!    `e * Q / L*` on each of its edges.

use super::colony::AntTour;
use super::config::{AcoConfig, AcoVariant};
use super::pheromone::PheromoneMatrix;
use crate::error::{AcoError, AcoResult};

/// Applies the once-per-iteration pheromone update.
#[derive(Debug, Clone, Copy)]
pub struct PheromoneUpdater {
    evaporation_rate: f64,
    q: f64,
    variant: AcoVariant,
}

impl PheromoneUpdater {
    pub fn new(evaporation_rate: f64, q: f64, variant: AcoVariant) -> Self {
        Self {
            evaporation_rate,
            q,
            variant,
        }
    }

    pub fn from_config(config: &AcoConfig) -> Self {
        Self::new(config.evaporation_rate, config.q, config.variant)
    }

    /// Evaporates, then deposits for every tour in `ants` and, for the
    /// elitist variant, once more for `best_so_far`.
    ///
    /// All deposit amounts are computed first; the matrix is left untouched
    /// if any tour length is zero or non-finite, or if a deposit would
    /// overflow.
    pub fn apply(
        &self,
        pheromone: &mut PheromoneMatrix,
        ants: &[AntTour],
        best_so_far: &AntTour,
    ) -> AcoResult<()> {
        let amounts = ants
            .iter()
            .map(|ant| deposit_amount(self.q, ant.fitness))
            .collect::<AcoResult<Vec<f64>>>()?;

        let elite = match self.variant {
            AcoVariant::Standard => {
                deposit_amount(self.q, best_so_far.fitness)?;
                None
            }
            AcoVariant::Elitist { weight } => {
                Some(deposit_amount(weight * self.q, best_so_far.fitness)?)
            }
        };

        pheromone.evaporate(self.evaporation_rate);

        for (ant, amount) in ants.iter().zip(amounts) {
            pheromone.deposit_tour(ant.tour.cities(), amount);
        }

        if let Some(amount) = elite {
            pheromone.deposit_tour(best_so_far.tour.cities(), amount);
        }

        Ok(())
    }
}

/// `scale / fitness`, rejecting degenerate lengths and overflowing amounts.
fn deposit_amount(scale: f64, fitness: f64) -> AcoResult<f64> {
    let amount = scale / fitness;
    if fitness.is_finite() && fitness > 0.0 && amount.is_finite() {
        Ok(amount)
    } else {
        Err(AcoError::DegenerateFitness { fitness })
    }
}
