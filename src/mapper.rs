//! ClutchMapper: Cover → Visibility → Complexes
//!
//! Fitting runs the two derive-once stages (hypersphere cover and the
//! landmark × observer distance matrix). Everything after that is a pure
//! function of the fitted state and a threshold, so complexes and
//! filtrations can be requested repeatedly without refitting.
//!
//! ```text
//! points + labels ──► Cover ──► VisibilityMatrix ──┬─► complex_at(t)
//!                                                  ├─► filtration()
//!                                                  └─► sweep(token)
//! ```

use std::fmt::Debug;

use ndarray::ArrayView2;
use tracing::info;

use crate::config::{MapperConfig, RoleAssignment};
use crate::cover::{build_cover, Cover};
use crate::distance::{Metric, VisibilityMatrix};
use crate::error::MapperResult;
use crate::topology::{
    build_complex, build_dual_complex, build_filtration, CancellationToken, DualComplex,
    DualFiltration, Orientation, SimplicialComplex, ThresholdSweep,
};

/// A fitted landmark/observer mapper over one labeled point cloud.
#[derive(Debug, Clone)]
pub struct ClutchMapper<L> {
    config: MapperConfig,
    cover: Cover<L>,
    visibility: VisibilityMatrix,
}

impl<L: Ord + Clone + Debug> ClutchMapper<L> {
    /// Build the cover of `points` under `labels` and the visibility matrix.
    pub fn fit(points: ArrayView2<f64>, labels: &[L], config: MapperConfig) -> MapperResult<Self> {
        config.validate()?;

        let cover = build_cover(points, labels)?;
        let centroids = cover.centroids();

        let visibility = match config.roles {
            RoleAssignment::CentroidLandmarks => {
                VisibilityMatrix::from_points(centroids.view(), points, &config.metric)?
            }
            // Every metric is symmetric, so swapping roles is a transpose
            RoleAssignment::PointLandmarks => {
                VisibilityMatrix::from_points(centroids.view(), points, &config.metric)?
                    .transposed()
            }
        };

        info!(
            points = points.nrows(),
            clusters = cover.len(),
            landmarks = visibility.n_landmarks(),
            observers = visibility.n_observers(),
            metric = config.metric.name(),
            "fitted mapper"
        );

        Ok(Self {
            config,
            cover,
            visibility,
        })
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    pub fn cover(&self) -> &Cover<L> {
        &self.cover
    }

    pub fn visibility(&self) -> &VisibilityMatrix {
        &self.visibility
    }

    /// Thresholds the configured schedule resolves to for this cloud.
    pub fn thresholds(&self) -> MapperResult<Vec<f64>> {
        self.config.schedule.resolve(&self.visibility)
    }

    pub fn complex_at(
        &self,
        threshold: f64,
        orientation: Orientation,
    ) -> MapperResult<SimplicialComplex> {
        build_complex(&self.visibility, threshold, self.config.max_dimension, orientation)
    }

    /// Landmark and observer complexes at `threshold`.
    pub fn complexes_at(&self, threshold: f64) -> MapperResult<DualComplex> {
        build_dual_complex(&self.visibility, threshold, self.config.max_dimension)
    }

    /// Sequential filtration over the configured schedule.
    pub fn filtration(&self) -> MapperResult<DualFiltration> {
        let thresholds = self.thresholds()?;
        build_filtration(&self.visibility, &thresholds, self.config.max_dimension)
    }

    /// Parallel filtration over the configured schedule, abortable via `token`.
    pub fn sweep(&self, token: &CancellationToken) -> MapperResult<DualFiltration> {
        let thresholds = self.thresholds()?;
        ThresholdSweep::new(self.config.max_dimension)
            .with_threads(self.config.threads)
            .with_token(token.clone())
            .run(&self.visibility, &thresholds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::ThresholdSchedule;
    use ndarray::array;

    fn cloud() -> (ndarray::Array2<f64>, Vec<u8>) {
        let points = array![
            [0.0, 1.0],
            [0.0, -1.0],
            [0.0, 0.5],
            [0.0, -0.5],
            [10.0, 1.0],
            [10.0, -1.0],
            [10.0, 0.5],
            [10.0, -0.5]
        ];
        (points, vec![0, 0, 0, 0, 1, 1, 1, 1])
    }

    #[test]
    fn test_fit_centroid_landmarks() {
        let (points, labels) = cloud();
        let mapper = ClutchMapper::fit(points.view(), &labels, MapperConfig::default()).unwrap();

        assert_eq!(mapper.cover().len(), 2);
        assert_eq!(mapper.visibility().n_landmarks(), 2);
        assert_eq!(mapper.visibility().n_observers(), 8);

        let complexes = mapper.complexes_at(0.6).unwrap();
        assert_eq!(complexes.landmark.vertices(), vec![0, 1]);
        assert!(complexes.landmark.edges().is_empty());
        assert_eq!(complexes.observer.vertices(), vec![2, 3, 6, 7]);
    }

    #[test]
    fn test_point_landmarks_swap_roles() {
        let (points, labels) = cloud();
        let config = MapperConfig {
            roles: RoleAssignment::PointLandmarks,
            ..Default::default()
        };
        let mapper = ClutchMapper::fit(points.view(), &labels, config).unwrap();

        assert_eq!(mapper.visibility().n_landmarks(), 8);
        assert_eq!(mapper.visibility().n_observers(), 2);

        let direct = VisibilityMatrix::from_points(
            points.view(),
            mapper.cover().centroids().view(),
            &MapperConfig::default().metric,
        )
        .unwrap();
        assert_eq!(mapper.visibility(), &direct);

        let swapped = mapper.complex_at(0.6, Orientation::ObserverIndexed).unwrap();
        assert_eq!(swapped.vertices(), vec![0, 1]);
    }

    #[test]
    fn test_filtration_and_sweep_agree() {
        let (points, labels) = cloud();
        let config = MapperConfig {
            schedule: ThresholdSchedule::Stepped { start: 0.0, stop: 11.0, step: 0.5 },
            threads: Some(2),
            ..Default::default()
        };
        let mapper = ClutchMapper::fit(points.view(), &labels, config).unwrap();

        let sequential = mapper.filtration().unwrap();
        let parallel = mapper.sweep(&CancellationToken::new()).unwrap();

        assert_eq!(sequential, parallel);
        assert_eq!(sequential.thresholds.len(), 23);
        assert!(sequential.landmark.is_monotone());
    }

    #[test]
    fn test_invalid_config_rejected_at_fit() {
        let (points, labels) = cloud();
        let config = MapperConfig {
            threads: Some(0),
            ..Default::default()
        };
        assert!(ClutchMapper::fit(points.view(), &labels, config).is_err());
    }
}
