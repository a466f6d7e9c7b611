//! Trial observation and logging.

use std::sync::Arc;

use super::config::{AcoConfig, AcoVariant};
use super::runner::{IterationStats, TrialResult};

/// A logger which is called with progress messages of a trial.
pub type InfoLogger = Arc<dyn Fn(&str) + Send + Sync>;

/// Receives progress events from a running trial.
///
/// All hooks default to no-ops.
pub trait AcoObserver: Send + Sync {
    /// Called once before the first iteration.
    fn on_start(&self, _n_cities: usize, _config: &AcoConfig) {}

    /// Called after each iteration's pheromone update.
    fn on_iteration(&self, _stats: &IterationStats) {}

    /// Called once the last iteration has completed.
    fn on_finish(&self, _result: &TrialResult) {}
}

impl AcoObserver for () {}

/// Writes trial progress through an [`InfoLogger`].
#[derive(Clone)]
pub struct TrialLogger {
    logger: InfoLogger,
    log_every: usize,
}

impl TrialLogger {
    /// Logs every `log_every` iterations (at least every iteration).
    pub fn new(logger: InfoLogger, log_every: usize) -> Self {
        Self {
            logger,
            log_every: log_every.max(1),
        }
    }

    /// Logger printing to stdout.
    pub fn stdout(log_every: usize) -> Self {
        Self::new(Arc::new(|msg: &str| println!("{msg}")), log_every)
    }

    /// Writes a message.
    pub fn log(&self, message: &str) {
        (self.logger)(message)
    }
}

impl std::fmt::Debug for TrialLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrialLogger")
            .field("log_every", &self.log_every)
            .finish_non_exhaustive()
    }
}

impl AcoObserver for TrialLogger {
    fn on_start(&self, n_cities: usize, config: &AcoConfig) {
        let variant = match config.variant {
            AcoVariant::Standard => "standard".to_string(),
            AcoVariant::Elitist { weight } => format!("elitist (weight {weight})"),
        };
        self.log(&format!(
            "starting {variant} trial on {n_cities} cities: {} ants, {} iterations, alpha {}, beta {}, rho {}, Q {}",
            config.num_ants,
            config.total_iterations,
            config.alpha,
            config.beta,
            config.evaporation_rate,
            config.q,
        ));
    }

    fn on_iteration(&self, stats: &IterationStats) {
        let done = stats.iteration + 1;
        if done % self.log_every == 0 || done == stats.total_iterations {
            self.log(&format!(
                "[iteration {}/{}] best: {:.4}, iteration best: {:.4}, worst: {:.4}, mean: {:.4}",
                done,
                stats.total_iterations,
                stats.best_fitness,
                stats.iteration_best,
                stats.iteration_worst,
                stats.iteration_mean,
            ));
        }
    }

    fn on_finish(&self, result: &TrialResult) {
        self.log(&format!(
            "trial finished after {} iterations, best: {:.4} (found at iteration {}), worst: {:.4}, mean: {:.4}",
            result.iterations,
            result.best_fitness,
            result.best_iteration + 1,
            result.worst_fitness,
            result.mean_fitness,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn stats(iteration: usize) -> IterationStats {
        IterationStats {
            iteration,
            total_iterations: 10,
            best_fitness: 4.0,
            iteration_best: 4.5,
            iteration_worst: 6.0,
            iteration_mean: 5.0,
        }
    }

    #[test]
    fn test_logger_respects_interval() {
        let lines = Arc::new(Mutex::new(Vec::<String>::new()));
        let sink = lines.clone();
        let logger = TrialLogger::new(
            Arc::new(move |msg: &str| sink.lock().unwrap().push(msg.to_string())),
            4,
        );

        for k in 0..10 {
            logger.on_iteration(&stats(k));
        }

        let lines = lines.lock().unwrap();
        // iterations 4, 8 and the final 10
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("[iteration 4/10] best: 4.0000"));
        assert!(lines[2].starts_with("[iteration 10/10]"));
    }

    #[test]
    fn test_start_line_names_variant() {
        let lines = Arc::new(Mutex::new(Vec::<String>::new()));
        let sink = lines.clone();
        let logger = TrialLogger::new(
            Arc::new(move |msg: &str| sink.lock().unwrap().push(msg.to_string())),
            1,
        );
        logger.on_start(14, &AcoConfig::default().with_elitist(2.0));
        let lines = lines.lock().unwrap();
        assert!(lines[0].starts_with("starting elitist (weight 2) trial on 14 cities: 50 ants"));
    }

    #[test]
    fn test_zero_interval_logs_every_iteration() {
        let count = Arc::new(Mutex::new(0usize));
        let sink = count.clone();
        let logger = TrialLogger::new(Arc::new(move |_: &str| *sink.lock().unwrap() += 1), 0);
        for k in 0..3 {
            logger.on_iteration(&stats(k));
        }
        assert_eq!(*count.lock().unwrap(), 3);
    }
}
