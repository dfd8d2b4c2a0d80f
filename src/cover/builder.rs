//! Cover construction from a point cloud and its cluster labels.

use std::collections::BTreeMap;
use std::fmt::Debug;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use serde::Serialize;
use tracing::debug;

use crate::error::{MapperError, MapperResult};

/// One cluster's hypersphere.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverSet<L> {
    pub label: L,
    pub centroid: Array1<f64>,
    /// Max Euclidean distance from the centroid to any member
    pub radius: f64,
    /// Row indices of the member points, ascending
    pub members: Vec<usize>,
}

/// Cover of a labeled point cloud.
///
/// Sets are stored in ascending label order; the position of a set is
/// its landmark index, which stays stable for renderers that attach
/// names by position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cover<L> {
    sets: Vec<CoverSet<L>>,
    dimension: usize,
}

impl<L: Ord + Clone + Debug> Cover<L> {
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Length of each feature vector.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn sets(&self) -> &[CoverSet<L>] {
        &self.sets
    }

    /// Labels in landmark-index order.
    pub fn labels(&self) -> Vec<L> {
        self.sets.iter().map(|s| s.label.clone()).collect()
    }

    /// Landmark index of `label`.
    pub fn index_of(&self, label: &L) -> Option<usize> {
        self.sets.binary_search_by(|s| s.label.cmp(label)).ok()
    }

    pub fn get(&self, label: &L) -> Option<&CoverSet<L>> {
        self.index_of(label).map(|i| &self.sets[i])
    }

    /// Centroids stacked as rows, in landmark-index order.
    pub fn centroids(&self) -> Array2<f64> {
        let mut out = Array2::<f64>::zeros((self.sets.len(), self.dimension));
        for (i, set) in self.sets.iter().enumerate() {
            out.row_mut(i).assign(&set.centroid);
        }
        out
    }

    pub fn radii(&self) -> Vec<f64> {
        self.sets.iter().map(|s| s.radius).collect()
    }
}

/// Build the hypersphere cover of `points` (one row per point) under `labels`.
///
/// Fails with `InvalidInput` when the cloud is empty, has zero-length
/// vectors or non-finite coordinates, or when `labels` does not have one
/// entry per point. Labels are grouped exactly, so every resulting cluster
/// has at least one member.
pub fn build_cover<L>(points: ArrayView2<f64>, labels: &[L]) -> MapperResult<Cover<L>>
where
    L: Ord + Clone + Debug,
{
    let n = points.nrows();
    if n == 0 {
        return Err(MapperError::invalid_input("point cloud is empty"));
    }
    if points.ncols() == 0 {
        return Err(MapperError::invalid_input("feature vectors have zero length"));
    }
    if labels.len() != n {
        return Err(MapperError::invalid_input(format!(
            "{} labels supplied for {} points",
            labels.len(),
            n
        )));
    }
    if points.iter().any(|x| !x.is_finite()) {
        return Err(MapperError::invalid_input("point cloud contains non-finite coordinates"));
    }

    let mut groups: BTreeMap<&L, Vec<usize>> = BTreeMap::new();
    for (i, label) in labels.iter().enumerate() {
        groups.entry(label).or_default().push(i);
    }

    let mut sets = Vec::with_capacity(groups.len());
    for (label, members) in groups {
        if members.is_empty() {
            return Err(MapperError::invalid_input(format!("cluster {label:?} has no members")));
        }

        let cluster = points.select(Axis(0), &members);
        let centroid = cluster
            .mean_axis(Axis(0))
            .ok_or_else(|| {
                MapperError::invalid_input(format!("cluster {label:?} has no members"))
            })?;

        let radius = cluster
            .axis_iter(Axis(0))
            .map(|x| euclidean(centroid.view(), x))
            .fold(0.0, f64::max);

        sets.push(CoverSet {
            label: label.clone(),
            centroid,
            radius,
            members,
        });
    }

    debug!(points = n, clusters = sets.len(), "built hypersphere cover");

    Ok(Cover {
        sets,
        dimension: points.ncols(),
    })
}

fn euclidean(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}
