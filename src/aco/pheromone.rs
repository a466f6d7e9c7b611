//! Pheromone matrix.
//!
//! One intensity per ordered city pair. Entries stay strictly positive:
//! evaporation multiplies by `1 - rate` and is floored at
//! `f64::MIN_POSITIVE`, deposits only add non-negative amounts.

/// Lowest value evaporation may leave in an entry.
pub const MIN_PHEROMONE: f64 = f64::MIN_POSITIVE;

/// Square matrix of pheromone intensities.
///
/// Written only by the pheromone update (through `&mut self`) and read by
/// tour construction (through `&self`), so the two can never interleave
/// within an iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct PheromoneMatrix {
    n: usize,
    data: Vec<f64>,
}

impl PheromoneMatrix {
    /// Creates an `n`×`n` matrix with every entry set to `initial_value`.
    ///
    /// The diagonal is filled too but never read by tour construction.
    ///
    /// # Panics
    /// Panics if `initial_value` is not a positive finite number.
    pub fn new(n: usize, initial_value: f64) -> Self {
        assert!(
            initial_value.is_finite() && initial_value > 0.0,
            "initial pheromone must be positive and finite, got {initial_value}"
        );
        Self {
            n,
            data: vec![initial_value; n * n],
        }
    }

    /// Number of cities.
    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Intensity on the ordered pair `(i, j)`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.n && j < self.n, "city index out of range");
        self.data[i * self.n + j]
    }

    /// Multiplies every entry by `1 - rate`.
    ///
    /// # Panics
    /// Panics if `rate` is outside `(0, 1)`.
    pub fn evaporate(&mut self, rate: f64) {
        assert!(
            rate > 0.0 && rate < 1.0,
            "evaporation rate must be in (0, 1), got {rate}"
        );
        let keep = 1.0 - rate;
        for value in &mut self.data {
            *value = (*value * keep).max(MIN_PHEROMONE);
        }
    }

    /// Adds `amount` to both `(i, j)` and `(j, i)`.
    ///
    /// # Panics
    /// Panics if `amount` is negative or not finite.
    pub fn deposit(&mut self, i: usize, j: usize, amount: f64) {
        assert!(
            amount.is_finite() && amount >= 0.0,
            "deposit must be non-negative and finite, got {amount}"
        );
        assert!(i < self.n && j < self.n, "city index out of range");
        self.data[i * self.n + j] += amount;
        if i != j {
            self.data[j * self.n + i] += amount;
        }
    }

    /// Deposits `amount` on every edge of the closed tour, including the
    /// edge from the last city back to the first.
    pub fn deposit_tour(&mut self, tour: &[usize], amount: f64) {
        for w in tour.windows(2) {
            self.deposit(w[0], w[1], amount);
        }
        if tour.len() > 1 {
            self.deposit(tour[tour.len() - 1], tour[0], amount);
        }
    }

    /// Smallest entry, diagonal included.
    pub fn min_value(&self) -> f64 {
        self.data.iter().copied().fold(f64::INFINITY, f64::min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_uniform() {
        let p = PheromoneMatrix::new(3, 0.5);
        assert_eq!(p.len(), 3);
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(p.get(i, j), 0.5);
            }
        }
    }

    #[test]
    #[should_panic(expected = "initial pheromone must be positive")]
    fn test_new_rejects_zero() {
        PheromoneMatrix::new(3, 0.0);
    }

    #[test]
    fn test_evaporate_scales_all_entries() {
        let mut p = PheromoneMatrix::new(3, 2.0);
        p.evaporate(0.25);
        for i in 0..3 {
            for j in 0..3 {
                assert!((p.get(i, j) - 1.5).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_evaporate_never_reaches_zero() {
        let mut p = PheromoneMatrix::new(2, 1.0);
        for _ in 0..5000 {
            p.evaporate(0.9);
        }
        assert!(p.min_value() > 0.0);
        assert_eq!(p.min_value(), MIN_PHEROMONE);
    }

    #[test]
    fn test_deposit_is_symmetric() {
        let mut p = PheromoneMatrix::new(4, 1.0);
        p.deposit(1, 3, 0.5);
        assert!((p.get(1, 3) - 1.5).abs() < 1e-12);
        assert!((p.get(3, 1) - 1.5).abs() < 1e-12);
        assert!((p.get(1, 2) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_deposit_tour_includes_closing_edge() {
        let mut p = PheromoneMatrix::new(4, 1.0);
        p.deposit_tour(&[0, 1, 2, 3], 1.0);
        for (i, j) in [(0, 1), (1, 2), (2, 3), (3, 0)] {
            assert!((p.get(i, j) - 2.0).abs() < 1e-12, "edge ({i}, {j})");
            assert!((p.get(j, i) - 2.0).abs() < 1e-12, "edge ({j}, {i})");
        }
        assert!((p.get(0, 2) - 1.0).abs() < 1e-12);
        assert!((p.get(1, 3) - 1.0).abs() < 1e-12);
    }

    #[test]
    #[should_panic(expected = "deposit must be non-negative")]
    fn test_negative_deposit_panics() {
        let mut p = PheromoneMatrix::new(2, 1.0);
        p.deposit(0, 1, -1.0);
    }

    proptest! {
        #[test]
        fn prop_positive_and_symmetric_after_cycles(
            n in 2usize..8,
            rate in 0.01f64..0.99,
            cycles in prop::collection::vec(
                prop::collection::vec((0usize..8, 0usize..8, 0.0f64..10.0), 0..10),
                1..30,
            ),
        ) {
            let mut p = PheromoneMatrix::new(n, 1.0);
            for deposits in cycles {
                p.evaporate(rate);
                for (i, j, amount) in deposits {
                    p.deposit(i % n, j % n, amount);
                }
                prop_assert!(p.min_value() > 0.0);
                for i in 0..n {
                    for j in 0..n {
                        prop_assert_eq!(p.get(i, j), p.get(j, i));
                    }
                }
            }
        }
    }
}
