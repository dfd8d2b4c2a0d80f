//! Distance metrics between feature vectors.

use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

use crate::error::{MapperError, MapperResult};

/// A distance function over equal-length real vectors.
///
/// Implementations may assume both views have the same length;
/// [`pairwise_distances`](super::pairwise_distances) goes through
/// [`Metric::checked_distance`], which checks it first.
pub trait Metric: Sync {
    /// Distance between `a` and `b`. Must be non-negative.
    fn distance(&self, a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64;

    /// Short human-readable name.
    fn name(&self) -> &'static str;

    /// Distance with a dimension check.
    fn checked_distance(&self, a: ArrayView1<f64>, b: ArrayView1<f64>) -> MapperResult<f64> {
        if a.len() != b.len() {
            return Err(MapperError::dimension_mismatch(a.len(), b.len()));
        }
        Ok(self.distance(a, b))
    }
}

/// Built-in metrics, selectable from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// L2 distance
    #[default]
    Euclidean,
    /// L1 distance
    Manhattan,
    /// L∞ distance
    Chebyshev,
    /// 1 - cos θ
    Cosine,
}

impl Metric for MetricKind {
    fn distance(&self, a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
        match self {
            MetricKind::Euclidean => a
                .iter()
                .zip(b.iter())
                .map(|(x, y)| (x - y) * (x - y))
                .sum::<f64>()
                .sqrt(),
            MetricKind::Manhattan => a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).sum(),
            MetricKind::Chebyshev => a
                .iter()
                .zip(b.iter())
                .map(|(x, y)| (x - y).abs())
                .fold(0.0, f64::max),
            MetricKind::Cosine => {
                let norm_a = a.dot(&a).sqrt();
                let norm_b = b.dot(&b).sqrt();
                if norm_a == 0.0 || norm_b == 0.0 {
                    // Undefined angle: two zero vectors coincide, otherwise orthogonal
                    return if norm_a == norm_b { 0.0 } else { 1.0 };
                }
                let cos = (a.dot(&b) / (norm_a * norm_b)).clamp(-1.0, 1.0);
                (1.0 - cos).max(0.0)
            }
        }
    }

    fn name(&self) -> &'static str {
        match self {
            MetricKind::Euclidean => "euclidean",
            MetricKind::Manhattan => "manhattan",
            MetricKind::Chebyshev => "chebyshev",
            MetricKind::Cosine => "cosine",
        }
    }
}
