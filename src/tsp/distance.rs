//! Symmetric distance matrix.

use super::city::City;
use crate::error::{AcoError, AcoResult};

/// Relative tolerance used when checking `d[i][j] == d[j][i]`.
const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// Immutable n×n matrix of pairwise city distances.
///
/// Guarantees after construction: `n >= 2`, every entry finite and
/// non-negative, `d[i][i] == 0`, and `d[i][j] == d[j][i]`.
///
/// Stored flattened in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Builds the Euclidean distance matrix for `cities`.
    ///
    /// City ids must equal their position in the slice.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_aco::tsp::{City, DistanceMatrix};
    ///
    /// let cities = vec![City::new(0, 0.0, 0.0), City::new(1, 3.0, 4.0)];
    /// let d = DistanceMatrix::from_cities(&cities).unwrap();
    /// assert!((d.get(0, 1) - 5.0).abs() < 1e-12);
    /// ```
    pub fn from_cities(cities: &[City]) -> AcoResult<Self> {
        if cities.len() < 2 {
            return Err(AcoError::malformed(format!(
                "need at least 2 cities, got {}",
                cities.len()
            )));
        }
        for (i, city) in cities.iter().enumerate() {
            if city.id != i {
                return Err(AcoError::malformed(format!(
                    "city at position {i} has id {}",
                    city.id
                )));
            }
            if !city.x.is_finite() || !city.y.is_finite() {
                return Err(AcoError::malformed(format!(
                    "city {i} has non-finite coordinates ({}, {})",
                    city.x, city.y
                )));
            }
        }

        let n = cities.len();
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = cities[i].distance_to(&cities[j]);
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }
        Ok(Self { n, data })
    }

    /// Builds a matrix from explicit rows, validating every invariant.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> AcoResult<Self> {
        let n = rows.len();
        if n < 2 {
            return Err(AcoError::malformed(format!(
                "need at least 2 cities, got {n}"
            )));
        }

        let mut data = Vec::with_capacity(n * n);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(AcoError::malformed(format!(
                    "row {i} has {} entries, expected {n}",
                    row.len()
                )));
            }
            data.extend(row);
        }

        for i in 0..n {
            for j in 0..n {
                let d = data[i * n + j];
                if !d.is_finite() {
                    return Err(AcoError::malformed(format!(
                        "distance[{i}][{j}] is not finite ({d})"
                    )));
                }
                if d < 0.0 {
                    return Err(AcoError::malformed(format!(
                        "distance[{i}][{j}] is negative ({d})"
                    )));
                }
            }
            if data[i * n + i] != 0.0 {
                return Err(AcoError::malformed(format!(
                    "distance[{i}][{i}] must be 0, got {}",
                    data[i * n + i]
                )));
            }
            for j in (i + 1)..n {
                let (a, b) = (data[i * n + j], data[j * n + i]);
                if (a - b).abs() > SYMMETRY_TOLERANCE * a.max(b).max(1.0) {
                    return Err(AcoError::malformed(format!(
                        "distance[{i}][{j}] = {a} differs from distance[{j}][{i}] = {b}"
                    )));
                }
            }
        }

        Ok(Self { n, data })
    }

    /// Number of cities.
    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    /// `false` for every validated matrix, which has at least two cities.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Distance between cities `i` and `j`.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.n && j < self.n, "city index out of range");
        self.data[i * self.n + j]
    }

    /// Total length of the closed tour visiting `tour` in order.
    ///
    /// Includes the edge from the last city back to the first.
    pub fn tour_length(&self, tour: &[usize]) -> f64 {
        match (tour.first(), tour.last()) {
            (Some(&first), Some(&last)) => {
                let open: f64 = tour.windows(2).map(|w| self.get(w[0], w[1])).sum();
                open + self.get(last, first)
            }
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<City> {
        vec![
            City::new(0, 0.0, 0.0),
            City::new(1, 1.0, 0.0),
            City::new(2, 1.0, 1.0),
            City::new(3, 0.0, 1.0),
        ]
    }

    #[test]
    fn test_from_cities_symmetric_zero_diagonal() {
        let d = DistanceMatrix::from_cities(&square()).unwrap();
        assert_eq!(d.len(), 4);
        assert!(!d.is_empty());
        for i in 0..4 {
            assert_eq!(d.get(i, i), 0.0);
            for j in 0..4 {
                assert_eq!(d.get(i, j), d.get(j, i));
            }
        }
        assert!((d.get(0, 2) - 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_tour_length_includes_closing_edge() {
        let d = DistanceMatrix::from_cities(&square()).unwrap();
        assert!((d.tour_length(&[0, 1, 2, 3]) - 4.0).abs() < 1e-12);
        assert!((d.tour_length(&[0, 2, 1, 3]) - (2.0 + 2.0 * 2f64.sqrt())).abs() < 1e-12);
    }

    #[test]
    fn test_too_few_cities() {
        let err = DistanceMatrix::from_cities(&[City::new(0, 0.0, 0.0)]).unwrap_err();
        assert!(matches!(err, AcoError::MalformedInput { .. }));
        assert!(DistanceMatrix::from_rows(vec![vec![0.0]]).is_err());
    }

    #[test]
    fn test_non_finite_coordinates() {
        let cities = vec![City::new(0, 0.0, 0.0), City::new(1, f64::NAN, 1.0)];
        assert!(DistanceMatrix::from_cities(&cities).is_err());
    }

    #[test]
    fn test_ids_must_match_positions() {
        let cities = vec![City::new(1, 0.0, 0.0), City::new(0, 1.0, 1.0)];
        assert!(DistanceMatrix::from_cities(&cities).is_err());
    }

    #[test]
    fn test_from_rows_validation() {
        let ok = DistanceMatrix::from_rows(vec![vec![0.0, 2.0], vec![2.0, 0.0]]);
        assert!(ok.is_ok());

        let not_square = DistanceMatrix::from_rows(vec![vec![0.0, 2.0], vec![2.0]]);
        assert!(not_square.is_err());

        let negative = DistanceMatrix::from_rows(vec![vec![0.0, -2.0], vec![-2.0, 0.0]]);
        assert!(negative.is_err());

        let infinite = DistanceMatrix::from_rows(vec![
            vec![0.0, f64::INFINITY],
            vec![f64::INFINITY, 0.0],
        ]);
        assert!(infinite.is_err());

        let asymmetric = DistanceMatrix::from_rows(vec![vec![0.0, 2.0], vec![3.0, 0.0]]);
        assert!(asymmetric.is_err());

        let diagonal = DistanceMatrix::from_rows(vec![vec![1.0, 2.0], vec![2.0, 0.0]]);
        assert!(diagonal.is_err());
    }

    #[test]
    #[should_panic(expected = "city index out of range")]
    fn test_get_out_of_range_panics() {
        let d = DistanceMatrix::from_cities(&square()).unwrap();
        d.get(4, 0);
    }
}
