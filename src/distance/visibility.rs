//! Landmark × observer distance matrix.
//!
//! D[l, o] = metric(landmark_l, observer_o). The matrix is generally
//! rectangular and not symmetric: landmarks and observers are different
//! point sets (cluster centroids vs. raw data points, or the reverse).

use ndarray::{Array2, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

use super::Metric;
use crate::error::{MapperError, MapperResult};

/// Compute the dense distance matrix between the rows of `set_a` and `set_b`.
///
/// Returns an `|A| × |B|` matrix. Fails with `DimensionMismatch` when the
/// two sets have differing vector lengths.
pub fn pairwise_distances<M: Metric + ?Sized>(
    set_a: ArrayView2<f64>,
    set_b: ArrayView2<f64>,
    metric: &M,
) -> MapperResult<Array2<f64>> {
    if set_a.ncols() != set_b.ncols() {
        return Err(MapperError::dimension_mismatch(set_a.ncols(), set_b.ncols()));
    }

    let mut dm = Array2::<f64>::zeros((set_a.nrows(), set_b.nrows()));
    for (i, a) in set_a.axis_iter(Axis(0)).enumerate() {
        for (j, b) in set_b.axis_iter(Axis(0)).enumerate() {
            dm[[i, j]] = metric.checked_distance(a, b)?;
        }
    }

    Ok(dm)
}

/// Read-only visibility matrix: rows are landmarks, columns are observers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisibilityMatrix {
    distances: Array2<f64>,
}

impl VisibilityMatrix {
    /// Build from landmark and observer point sets.
    pub fn from_points<M: Metric + ?Sized>(
        landmarks: ArrayView2<f64>,
        observers: ArrayView2<f64>,
        metric: &M,
    ) -> MapperResult<Self> {
        let distances = pairwise_distances(landmarks, observers, metric)?;
        Ok(Self { distances })
    }

    /// Wrap a precomputed distance matrix.
    ///
    /// Entries must be finite and non-negative.
    pub fn from_distance_matrix(distances: Array2<f64>) -> MapperResult<Self> {
        if let Some(bad) = distances.iter().find(|d| !d.is_finite() || **d < 0.0) {
            return Err(MapperError::invalid_input(format!(
                "distance matrix entries must be finite and non-negative, found {bad}"
            )));
        }
        Ok(Self { distances })
    }

    /// Number of landmarks (rows).
    pub fn n_landmarks(&self) -> usize {
        self.distances.nrows()
    }

    /// Number of observers (columns).
    pub fn n_observers(&self) -> usize {
        self.distances.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Distance between landmark `l` and observer `o`.
    pub fn distance(&self, l: usize, o: usize) -> f64 {
        self.distances[[l, o]]
    }

    /// Largest entry, or 0 for an empty matrix.
    pub fn max_distance(&self) -> f64 {
        self.distances.iter().cloned().fold(0.0, f64::max)
    }

    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.distances.view()
    }

    /// Same matrix with the landmark and observer roles exchanged.
    pub fn transposed(&self) -> Self {
        Self {
            distances: self.distances.t().to_owned(),
        }
    }
}
