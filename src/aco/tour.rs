//! Tour representation and probabilistic tour construction.
//!
//! # Algorithm
//!
//! Starting from a given city, an ant repeatedly picks the next city among
//! the unvisited ones with probability proportional to
//!
//! ```text
//! score(i, j) = tau(i, j)^alpha * (1 / d(i, j))^beta
//! ```
//!
//! using roulette-wheel selection, until every city has been visited.
//!
//! # Reference
//!
//! Dorigo, M., Maniezzo, V. & Colorni, A. (1996). "Ant System: Optimization
//! by a Colony of Cooperating Agents", *IEEE Trans. SMC-B* 26(1), 29-41.

use rand::Rng;

use super::pheromone::PheromoneMatrix;
use crate::tsp::DistanceMatrix;

/// Inverse-distance value used for coincident cities (`d(i, j) == 0`).
pub const COINCIDENT_HEURISTIC: f64 = 1e9;

/// A permutation of all city indices. The return edge to the first city
/// is implied.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tour(Vec<usize>);

impl Tour {
    /// Wraps an order of cities. No permutation check is made.
    pub fn new(cities: Vec<usize>) -> Self {
        Self(cities)
    }

    pub fn cities(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }

    /// Edges of the closed tour, closing edge last.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.0.len();
        (0..n).map(move |k| (self.0[k], self.0[(k + 1) % n]))
    }

    /// Whether this tour visits each of `0..n` exactly once.
    pub fn is_permutation_of(&self, n: usize) -> bool {
        if self.0.len() != n {
            return false;
        }
        let mut seen = vec![false; n];
        for &city in &self.0 {
            if city >= n || seen[city] {
                return false;
            }
            seen[city] = true;
        }
        true
    }
}

impl AsRef<[usize]> for Tour {
    fn as_ref(&self) -> &[usize] {
        &self.0
    }
}

/// `(1 / d(i, j))^beta` for every pair, fixed for a whole trial.
#[derive(Debug, Clone)]
pub struct HeuristicMatrix {
    n: usize,
    data: Vec<f64>,
}

impl HeuristicMatrix {
    pub fn new(distances: &DistanceMatrix, beta: f64) -> Self {
        let n = distances.len();
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let d = distances.get(i, j);
                let eta = if d > 0.0 { 1.0 / d } else { COINCIDENT_HEURISTIC };
                data[i * n + j] = eta.powf(beta);
            }
        }
        Self { n, data }
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }
}

/// Builds tours for one iteration.
///
/// Holds a snapshot of the desirability scores computed from the pheromone
/// matrix at the start of the iteration, so every ant of the iteration
/// sees the same pheromone state and the constructor can be shared across
/// threads.
#[derive(Debug, Clone)]
pub struct TourConstructor {
    n: usize,
    scores: Vec<f64>,
}

impl TourConstructor {
    /// Computes `tau^alpha * eta^beta` for every pair.
    ///
    /// # Panics
    /// Panics if the two matrices disagree on the number of cities.
    pub fn new(heuristic: &HeuristicMatrix, pheromone: &PheromoneMatrix, alpha: f64) -> Self {
        let n = heuristic.len();
        assert_eq!(
            n,
            pheromone.len(),
            "pheromone and heuristic matrices must have the same dimension"
        );
        let mut scores = vec![0.0; n * n];
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    scores[i * n + j] = pheromone.get(i, j).powf(alpha) * heuristic.get(i, j);
                }
            }
        }
        Self { n, scores }
    }

    /// Number of cities.
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Desirability of moving from `i` to `j`.
    #[inline]
    pub fn score(&self, i: usize, j: usize) -> f64 {
        self.scores[i * self.n + j]
    }

    /// Builds one complete tour starting at `start`.
    ///
    /// Consumes exactly one uniform draw from `rng` per step, so a fixed
    /// stream always yields the same tour.
    ///
    /// # Panics
    /// Panics if `start` is out of range.
    pub fn construct<R: Rng>(&self, start: usize, rng: &mut R) -> Tour {
        let n = self.n;
        assert!(start < n, "start city {start} out of range for {n} cities");

        let mut visited = vec![false; n];
        let mut order = Vec::with_capacity(n);
        let mut candidates = Vec::with_capacity(n);
        let mut weights = Vec::with_capacity(n);

        visited[start] = true;
        order.push(start);
        let mut current = start;

        while order.len() < n {
            candidates.clear();
            weights.clear();
            for j in 0..n {
                if !visited[j] {
                    candidates.push(j);
                    weights.push(self.score(current, j));
                }
            }

            let next = candidates[roulette(&weights, rng)];
            visited[next] = true;
            order.push(next);
            current = next;
        }

        Tour(order)
    }
}

/// Roulette-wheel selection over non-negative weights.
///
/// Draws `r` in `[0, 1)` and walks the normalized cumulative distribution.
/// When the weights sum to zero or to a non-finite value, `r` picks
/// uniformly among all entries instead.
pub(crate) fn roulette<R: Rng>(weights: &[f64], rng: &mut R) -> usize {
    debug_assert!(!weights.is_empty());
    let r: f64 = rng.random_range(0.0..1.0);
    let total: f64 = weights.iter().sum();

    if !(total.is_finite() && total > 0.0) {
        return ((r * weights.len() as f64) as usize).min(weights.len() - 1);
    }

    let mut cumulative = 0.0;
    let mut last_positive = 0;
    for (idx, &w) in weights.iter().enumerate() {
        if w > 0.0 {
            cumulative += w / total;
            last_positive = idx;
            if r < cumulative {
                return idx;
            }
        }
    }
    // rounding left the cumulative sum just below r
    last_positive
}
