//! ACO trial execution.
//!
//! # Algorithm
//!
//! For each of `total_iterations` iterations:
//!
//! 1. Snapshot desirability scores from the current pheromone matrix
//! 2. Every ant builds a tour (colony)
//! 3. Update the best-so-far tour
//! 4. Evaporate and deposit pheromone
//!
//! The trial returns the shortest tour seen across all iterations.

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::colony::{AntTour, Colony};
use super::config::AcoConfig;
use super::pheromone::PheromoneMatrix;
use super::telemetry::AcoObserver;
use super::tour::{HeuristicMatrix, Tour, TourConstructor};
use super::update::PheromoneUpdater;
use crate::error::{AcoError, AcoResult};
use crate::tsp::DistanceMatrix;

/// Lifecycle of a [`Trial`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrialState {
    /// Created, no iteration run yet.
    NotStarted,
    /// The next iteration to run is `iteration`.
    Running { iteration: usize },
    /// All iterations completed.
    Done,
    /// An iteration failed; the trial cannot continue.
    Aborted,
}

/// Summary of one completed iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationStats {
    /// Zero-based index of the iteration.
    pub iteration: usize,
    pub total_iterations: usize,
    /// Best-so-far tour length after this iteration.
    pub best_fitness: f64,
    pub iteration_best: f64,
    pub iteration_worst: f64,
    pub iteration_mean: f64,
}

/// Result of a completed trial.
#[derive(Debug, Clone)]
pub struct TrialResult {
    /// Shortest tour found.
    pub best_tour: Tour,

    /// Length of `best_tour`.
    pub best_fitness: f64,

    /// Zero-based iteration at which `best_tour` was first found.
    pub best_iteration: usize,

    /// Iterations executed.
    pub iterations: usize,

    /// Longest tour built by any ant.
    pub worst_tour: Tour,

    /// Length of `worst_tour`.
    pub worst_fitness: f64,

    /// Mean tour length over every ant of every iteration.
    pub mean_fitness: f64,

    /// Best-so-far length after each iteration. Non-increasing.
    pub fitness_history: Vec<f64>,

    /// Seed of the trial's random stream.
    pub seed: u64,
}

/// A single ACO trial over one distance matrix.
///
/// Owns the pheromone matrix and the random stream; both are dropped with
/// the trial.
///
/// # Examples
///
/// ```
/// use u_aco::aco::{AcoConfig, Trial, TrialState};
/// use u_aco::tsp::{City, DistanceMatrix};
///
/// let cities = vec![
///     City::new(0, 0.0, 0.0),
///     City::new(1, 1.0, 0.0),
///     City::new(2, 1.0, 1.0),
///     City::new(3, 0.0, 1.0),
/// ];
/// let distances = DistanceMatrix::from_cities(&cities).unwrap();
/// let config = AcoConfig::default().with_total_iterations(3).with_seed(1);
///
/// let mut trial = Trial::new(&distances, config).unwrap();
/// while let Some(stats) = trial.step().unwrap() {
///     assert!(stats.best_fitness >= 4.0 - 1e-9);
/// }
/// assert_eq!(trial.state(), TrialState::Done);
/// ```
pub struct Trial<'a> {
    distances: &'a DistanceMatrix,
    config: AcoConfig,
    heuristic: HeuristicMatrix,
    pheromone: PheromoneMatrix,
    colony: Colony,
    updater: PheromoneUpdater,
    rng: StdRng,
    seed: u64,
    state: TrialState,
    failure: Option<AcoError>,
    best: Option<AntTour>,
    best_iteration: usize,
    worst: Option<AntTour>,
    fitness_sum: f64,
    tours_built: usize,
    history: Vec<f64>,
}

impl<'a> Trial<'a> {
    /// Validates `config` against `distances` and prepares the trial.
    pub fn new(distances: &'a DistanceMatrix, config: AcoConfig) -> AcoResult<Self> {
        config.validate_for(distances.len())?;

        let seed = config.seed.unwrap_or_else(rand::random);

        Ok(Self {
            distances,
            heuristic: HeuristicMatrix::new(distances, config.beta),
            pheromone: PheromoneMatrix::new(distances.len(), config.initial_pheromone),
            colony: Colony::new(config.num_ants, config.start, config.parallel),
            updater: PheromoneUpdater::from_config(&config),
            rng: StdRng::seed_from_u64(seed),
            seed,
            state: TrialState::NotStarted,
            failure: None,
            best: None,
            best_iteration: 0,
            worst: None,
            fitness_sum: 0.0,
            tours_built: 0,
            history: Vec::with_capacity(config.total_iterations),
            config,
        })
    }

    pub fn state(&self) -> TrialState {
        self.state
    }

    pub fn config(&self) -> &AcoConfig {
        &self.config
    }

    pub fn pheromone(&self) -> &PheromoneMatrix {
        &self.pheromone
    }

    /// Error that aborted the trial, if any.
    pub fn failure(&self) -> Option<&AcoError> {
        self.failure.as_ref()
    }

    /// Best-so-far tour, if any iteration has completed.
    pub fn best(&self) -> Option<&AntTour> {
        self.best.as_ref()
    }

    /// Runs the next iteration.
    ///
    /// Returns `Ok(None)` once the trial is done or aborted. An error moves
    /// the trial to [`TrialState::Aborted`].
    pub fn step(&mut self) -> AcoResult<Option<IterationStats>> {
        let iteration = match self.state {
            TrialState::NotStarted => 0,
            TrialState::Running { iteration } => iteration,
            TrialState::Done | TrialState::Aborted => return Ok(None),
        };
        self.state = TrialState::Running { iteration };

        match self.iterate(iteration) {
            Ok(stats) => {
                let next = iteration + 1;
                self.state = if next == self.config.total_iterations {
                    TrialState::Done
                } else {
                    TrialState::Running { iteration: next }
                };
                Ok(Some(stats))
            }
            Err(err) => {
                self.state = TrialState::Aborted;
                self.failure = Some(err.clone());
                Err(err)
            }
        }
    }

    fn iterate(&mut self, iteration: usize) -> AcoResult<IterationStats> {
        let constructor = TourConstructor::new(&self.heuristic, &self.pheromone, self.config.alpha);
        let outcome = self.colony.run(&constructor, self.distances, &mut self.rng)?;

        let iteration_best = outcome.best();
        let best = match self.best.take() {
            Some(best) if best.fitness <= iteration_best.fitness => best,
            _ => {
                self.best_iteration = iteration;
                iteration_best.clone()
            }
        };
        let best = self.best.insert(best);
        let best_fitness = best.fitness;

        self.updater.apply(&mut self.pheromone, &outcome.ants, best)?;

        let iteration_worst = outcome.worst();
        let longer = match &self.worst {
            Some(worst) => iteration_worst.fitness > worst.fitness,
            None => true,
        };
        if longer {
            self.worst = Some(iteration_worst.clone());
        }
        self.fitness_sum += outcome.ants.iter().map(|a| a.fitness).sum::<f64>();
        self.tours_built += outcome.ants.len();
        self.history.push(best_fitness);

        Ok(IterationStats {
            iteration,
            total_iterations: self.config.total_iterations,
            best_fitness,
            iteration_best: iteration_best.fitness,
            iteration_worst: iteration_worst.fitness,
            iteration_mean: outcome.mean_fitness(),
        })
    }

    /// Runs all remaining iterations and returns the result.
    ///
    /// A trial that was already aborted returns the error that aborted it.
    pub fn run<O: AcoObserver + ?Sized>(mut self, observer: &O) -> AcoResult<TrialResult> {
        if self.state == TrialState::NotStarted {
            observer.on_start(self.distances.len(), &self.config);
        }
        while let Some(stats) = self.step()? {
            observer.on_iteration(&stats);
        }

        let failure = self.failure.take();
        match (self.into_result(), failure) {
            (Some(result), _) => {
                observer.on_finish(&result);
                Ok(result)
            }
            (None, Some(err)) => Err(err),
            (None, None) => unreachable!("a trial leaves the step loop only when done or aborted"),
        }
    }

    /// Final result, available only once the trial is [`TrialState::Done`].
    pub fn into_result(self) -> Option<TrialResult> {
        if self.state != TrialState::Done {
            return None;
        }
        let best = self.best?;
        let worst = self.worst?;
        Some(TrialResult {
            best_tour: best.tour,
            best_fitness: best.fitness,
            best_iteration: self.best_iteration,
            iterations: self.history.len(),
            worst_tour: worst.tour,
            worst_fitness: worst.fitness,
            mean_fitness: self.fitness_sum / self.tours_built as f64,
            fitness_history: self.history,
            seed: self.seed,
        })
    }
}

/// Runs complete ACO trials.
pub struct AcoRunner;

impl AcoRunner {
    /// Runs one trial and returns its result.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_aco::aco::{AcoConfig, AcoRunner};
    /// use u_aco::tsp::{City, DistanceMatrix};
    ///
    /// let cities: Vec<City> = (0..6)
    ///     .map(|i| {
    ///         let theta = i as f64 * std::f64::consts::TAU / 6.0;
    ///         City::new(i, theta.cos(), theta.sin())
    ///     })
    ///     .collect();
    /// let distances = DistanceMatrix::from_cities(&cities).unwrap();
    /// let config = AcoConfig::default()
    ///     .with_num_ants(10)
    ///     .with_total_iterations(30)
    ///     .with_seed(42);
    ///
    /// let result = AcoRunner::run(&distances, &config).unwrap();
    /// assert!((result.best_fitness - 6.0).abs() < 1e-9);
    /// ```
    pub fn run(distances: &DistanceMatrix, config: &AcoConfig) -> AcoResult<TrialResult> {
        Self::run_with_observer(distances, config, &())
    }

    /// Runs one trial, reporting progress to `observer`.
    pub fn run_with_observer<O: AcoObserver + ?Sized>(
        distances: &DistanceMatrix,
        config: &AcoConfig,
        observer: &O,
    ) -> AcoResult<TrialResult> {
        Trial::new(distances, config.clone())?.run(observer)
    }
}

// ============================================================================
// Tests
// ============================================================================
