//! End-to-end checks of cover, complex, filtration and sweep behavior.

use clutch_mapper::{
    build_complex, build_cover, build_filtration, CancellationToken, ClutchMapper, MapperConfig,
    MapperError, Metric, MetricKind, Orientation, Simplex, ThresholdSchedule, ThresholdSweep,
    VisibilityMatrix,
};
use ndarray::{array, Array2};
use proptest::prelude::*;

fn two_centroid_matrix() -> VisibilityMatrix {
    let centroids = array![[0.0, 0.0], [10.0, 0.0]];
    let observers = array![[0.0, 0.5], [0.0, -0.5], [10.0, 0.5], [10.0, -0.5]];
    VisibilityMatrix::from_points(centroids.view(), observers.view(), &MetricKind::Euclidean)
        .unwrap()
}

#[test]
fn two_clusters_connect_once_gap_is_spanned() {
    let members = array![[0.0, 1.0], [0.0, -1.0], [10.0, 1.0], [10.0, -1.0]];
    let cover = build_cover(members.view(), &[0, 0, 1, 1]).unwrap();
    assert_eq!(cover.radii(), vec![1.0, 1.0]);
    assert_eq!(cover.centroids(), array![[0.0, 0.0], [10.0, 0.0]]);

    let vm = two_centroid_matrix();

    let near = build_complex(&vm, 0.6, 2, Orientation::LandmarkIndexed).unwrap();
    assert_eq!(near.vertices(), vec![0, 1]);
    assert!(near.edges().is_empty());

    let far = build_complex(&vm, 10.5, 2, Orientation::LandmarkIndexed).unwrap();
    assert_eq!(far.vertices(), vec![0, 1]);
    assert_eq!(far.edges(), vec![[0, 1]]);
}

#[test]
fn single_cluster_has_one_landmark_vertex() {
    let points = array![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [-1.0, 0.0], [0.0, -1.0]];
    let labels = ["wr"; 5];

    let mapper = ClutchMapper::fit(points.view(), &labels, MapperConfig::default()).unwrap();
    assert_eq!(mapper.cover().len(), 1);

    // The centroid coincides with the first point, so it is visible from t = 0
    for t in [0.0, 0.5, 1.0, 5.0, 100.0] {
        let complex = mapper.complex_at(t, Orientation::LandmarkIndexed).unwrap();
        assert_eq!(complex.simplices(), &[Simplex::vertex(0)]);
    }
}

#[test]
fn max_dimension_zero_only_vertices() {
    let vm = two_centroid_matrix();
    let f = build_filtration(&vm, &[0.6, 5.0, 10.5, 20.0], 0).unwrap();
    assert!(f.landmark.iter().all(|e| e.dimension() == 0));
    assert!(f.observer.iter().all(|e| e.dimension() == 0));
}

#[test]
fn sweep_cancelled_from_another_thread() {
    let token = CancellationToken::new();
    let remote = token.clone();
    std::thread::spawn(move || remote.cancel()).join().unwrap();

    let err = ThresholdSweep::new(2)
        .with_token(token)
        .run(&two_centroid_matrix(), &[0.6, 10.5])
        .unwrap_err();
    assert!(matches!(err, MapperError::Cancelled { total: 2, .. }));
}

#[test]
fn integer_step_schedule_uses_step_births() {
    let points = array![[0.0], [1.0], [4.0], [5.0]];
    let config = MapperConfig {
        schedule: ThresholdSchedule::IntegerSteps,
        ..Default::default()
    };
    let mapper = ClutchMapper::fit(points.view(), &[0, 0, 1, 1], config).unwrap();
    let f = mapper.filtration().unwrap();

    assert_eq!(f.thresholds, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    for entry in f.landmark.iter().chain(f.observer.iter()) {
        assert_eq!(f.thresholds[entry.step], entry.birth);
    }
}

fn cloud_strategy() -> impl Strategy<Value = (Array2<f64>, Vec<usize>)> {
    prop::collection::vec((-10.0..10.0f64, -10.0..10.0f64, 0usize..3), 3..10).prop_map(|rows| {
        let mut points = Array2::<f64>::zeros((rows.len(), 2));
        let mut labels = Vec::with_capacity(rows.len());
        for (i, (x, y, l)) in rows.into_iter().enumerate() {
            points[[i, 0]] = x;
            points[[i, 1]] = y;
            labels.push(l);
        }
        (points, labels)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(40))]

    #[test]
    fn prop_cover_radius_is_farthest_member((points, labels) in cloud_strategy()) {
        let cover = build_cover(points.view(), &labels).unwrap();
        for set in cover.sets() {
            prop_assert!(set.radius >= 0.0);
            prop_assert!(set.members.iter().all(|&i| labels[i] == set.label));
            let farthest = set
                .members
                .iter()
                .map(|&i| MetricKind::Euclidean.distance(set.centroid.view(), points.row(i)))
                .fold(0.0, f64::max);
            prop_assert!((farthest - set.radius).abs() < 1e-9);
        }
    }

    #[test]
    fn prop_complexes_grow_with_threshold(
        (points, labels) in cloud_strategy(),
        t1 in 0.0..15.0f64,
        dt in 0.0..15.0f64,
    ) {
        let mapper = ClutchMapper::fit(points.view(), &labels, MapperConfig::default()).unwrap();
        for orientation in Orientation::BOTH {
            let small = mapper.complex_at(t1, orientation).unwrap();
            let large = mapper.complex_at(t1 + dt, orientation).unwrap();
            prop_assert!(small.is_subcomplex_of(&large));
            prop_assert!(small.is_closed());
        }
    }

    #[test]
    fn prop_parallel_sweep_matches_sequential((points, labels) in cloud_strategy()) {
        let config = MapperConfig {
            schedule: ThresholdSchedule::Linear { samples: 12 },
            threads: Some(3),
            ..Default::default()
        };
        let mapper = ClutchMapper::fit(points.view(), &labels, config).unwrap();

        let sequential = mapper.filtration().unwrap();
        let parallel = mapper.sweep(&CancellationToken::new()).unwrap();

        prop_assert!(sequential.landmark.is_monotone());
        prop_assert!(sequential.observer.is_monotone());
        prop_assert_eq!(sequential, parallel);
    }
}
