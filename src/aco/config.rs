//! ACO configuration.
//!
//! [`AcoConfig`] holds every constant a trial reads. It is fixed once the
//! trial starts.

use crate::error::{AcoError, AcoResult};

/// Pheromone reinforcement policy.
///
/// # References
///
/// - Standard: Dorigo, Maniezzo & Colorni (1996), Ant System
/// - Elitist: same paper, "elitist strategy" with `e` elitist ants
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AcoVariant {
    /// Every ant deposits `Q / fitness` along its tour.
    #[default]
    Standard,

    /// Standard deposit plus `weight * Q / best_fitness` along the
    /// best-so-far tour of the trial, every iteration.
    Elitist {
        /// Number of elite reinforcements. Must be positive.
        weight: f64,
    },
}

/// Where each ant begins its tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StartCity {
    /// Uniformly random start city per ant.
    #[default]
    Random,
    /// Every ant starts at the given city.
    Fixed(usize),
}

/// Configuration for an ACO trial.
///
/// # Defaults
///
/// ```
/// use u_aco::aco::{AcoConfig, AcoVariant};
///
/// let config = AcoConfig::default();
/// assert_eq!(config.num_ants, 50);
/// assert_eq!(config.total_iterations, 200);
/// assert_eq!(config.variant, AcoVariant::Standard);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_aco::aco::{AcoConfig, StartCity};
///
/// let config = AcoConfig::default()
///     .with_num_ants(10)
///     .with_total_iterations(50)
///     .with_alpha(1.0)
///     .with_beta(2.0)
///     .with_evaporation_rate(0.5)
///     .with_q(1.0)
///     .with_elitist(2.0)
///     .with_start(StartCity::Fixed(0))
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoConfig {
    /// Ants per iteration.
    pub num_ants: usize,

    /// Iterations in one trial.
    pub total_iterations: usize,

    /// Pheromone exponent. 0 disables pheromone guidance.
    pub alpha: f64,

    /// Inverse-distance exponent. 0 disables the distance heuristic.
    pub beta: f64,

    /// Fraction of pheromone removed every iteration, in (0, 1).
    pub evaporation_rate: f64,

    /// Deposit scale: a tour of length `L` deposits `Q / L` per edge.
    pub q: f64,

    /// Reinforcement policy.
    pub variant: AcoVariant,

    /// Pheromone on every edge at trial start.
    pub initial_pheromone: f64,

    /// Start city policy.
    pub start: StartCity,

    /// Whether to build tours in parallel using rayon.
    ///
    /// Only effective with the `parallel` feature. Results are identical
    /// either way.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            num_ants: 50,
            total_iterations: 200,
            alpha: 1.0,
            beta: 3.0,
            evaporation_rate: 0.5,
            q: 5.0,
            variant: AcoVariant::Standard,
            initial_pheromone: 1.0,
            start: StartCity::Random,
            parallel: true,
            seed: None,
        }
    }
}

impl AcoConfig {
    pub fn with_num_ants(mut self, n: usize) -> Self {
        self.num_ants = n;
        self
    }

    pub fn with_total_iterations(mut self, n: usize) -> Self {
        self.total_iterations = n;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    pub fn with_evaporation_rate(mut self, rate: f64) -> Self {
        self.evaporation_rate = rate;
        self
    }

    pub fn with_q(mut self, q: f64) -> Self {
        self.q = q;
        self
    }

    pub fn with_variant(mut self, variant: AcoVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Shorthand for `with_variant(AcoVariant::Elitist { weight })`.
    pub fn with_elitist(mut self, weight: f64) -> Self {
        self.variant = AcoVariant::Elitist { weight };
        self
    }

    pub fn with_initial_pheromone(mut self, value: f64) -> Self {
        self.initial_pheromone = value;
        self
    }

    pub fn with_start(mut self, start: StartCity) -> Self {
        self.start = start;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// A fixed start city is checked against the instance size when the
    /// trial is created, see [`validate_for`](Self::validate_for).
    pub fn validate(&self) -> AcoResult<()> {
        if self.num_ants == 0 {
            return Err(AcoError::config("num_ants", "must be at least 1"));
        }
        if self.total_iterations == 0 {
            return Err(AcoError::config("total_iterations", "must be at least 1"));
        }
        if !self.alpha.is_finite() || self.alpha < 0.0 {
            return Err(AcoError::config(
                "alpha",
                format!("must be finite and non-negative, got {}", self.alpha),
            ));
        }
        if !self.beta.is_finite() || self.beta < 0.0 {
            return Err(AcoError::config(
                "beta",
                format!("must be finite and non-negative, got {}", self.beta),
            ));
        }
        // NaN fails both comparisons
        if !(self.evaporation_rate > 0.0 && self.evaporation_rate < 1.0) {
            return Err(AcoError::config(
                "evaporation_rate",
                format!("must be in (0, 1), got {}", self.evaporation_rate),
            ));
        }
        if !self.q.is_finite() || self.q <= 0.0 {
            return Err(AcoError::config(
                "q",
                format!("must be finite and positive, got {}", self.q),
            ));
        }
        if !self.initial_pheromone.is_finite() || self.initial_pheromone <= 0.0 {
            return Err(AcoError::config(
                "initial_pheromone",
                format!("must be finite and positive, got {}", self.initial_pheromone),
            ));
        }
        if let AcoVariant::Elitist { weight } = self.variant {
            if !weight.is_finite() || weight <= 0.0 {
                return Err(AcoError::config(
                    "elitist_weight",
                    format!("must be finite and positive, got {weight}"),
                ));
            }
            if !(weight * self.q).is_finite() {
                return Err(AcoError::config(
                    "elitist_weight",
                    format!("times q ({}) overflows, got {weight}", self.q),
                ));
            }
        }
        Ok(())
    }

    /// Validates the configuration against an instance with `n` cities.
    pub fn validate_for(&self, n: usize) -> AcoResult<()> {
        self.validate()?;
        if let StartCity::Fixed(city) = self.start {
            if city >= n {
                return Err(AcoError::config(
                    "start",
                    format!("fixed start city {city} is out of range for {n} cities"),
                ));
            }
        }
        Ok(())
    }

    /// Whether the elitist reinforcement is enabled.
    pub fn is_elitist(&self) -> bool {
        matches!(self.variant, AcoVariant::Elitist { .. })
    }
}
