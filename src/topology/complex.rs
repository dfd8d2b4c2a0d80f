//! Witness Complex Construction
//!
//! For a threshold t and an orientation, vertex v ("own" index space) is
//! visible from witness w ("other" index space) iff d(v, w) ≤ t. Then:
//!
//! - 0-simplices: vertices with at least one visible witness
//! - a k-simplex [v₀, ..., vₖ] exists iff some single witness sees all
//!   of v₀..vₖ at once
//!
//! A witness shared by k+1 vertices is shared by every subset of them, so
//! the result is closed under taking faces without any post-processing.
//! Complexes only grow as t increases.

use std::collections::HashSet;

use bitvec::prelude::*;
use serde::Serialize;
use tracing::debug;

use super::sweep::CancellationToken;
use super::{Orientation, Simplex};
use crate::distance::VisibilityMatrix;
use crate::error::{MapperError, MapperResult};

/// A simplicial complex over one side of the visibility matrix.
///
/// Simplices are grouped by ascending dimension and lexicographically
/// ordered within each dimension.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimplicialComplex {
    pub orientation: Orientation,
    pub threshold: f64,
    /// Size of the own index space, whether or not each vertex is present
    pub n_vertices: usize,
    simplices: Vec<Simplex>,
}

/// Both complexes at the same threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DualComplex {
    pub landmark: SimplicialComplex,
    pub observer: SimplicialComplex,
}

impl DualComplex {
    pub fn get(&self, orientation: Orientation) -> &SimplicialComplex {
        match orientation {
            Orientation::LandmarkIndexed => &self.landmark,
            Orientation::ObserverIndexed => &self.observer,
        }
    }
}

impl SimplicialComplex {
    pub fn simplices(&self) -> &[Simplex] {
        &self.simplices
    }

    pub fn len(&self) -> usize {
        self.simplices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.simplices.is_empty()
    }

    pub fn contains(&self, simplex: &Simplex) -> bool {
        let d = simplex.dimension();
        let start = self.simplices.partition_point(|s| s.dimension() < d);
        let end = self.simplices.partition_point(|s| s.dimension() <= d);
        self.simplices[start..end].binary_search(simplex).is_ok()
    }

    pub fn simplices_of_dim(&self, d: usize) -> impl Iterator<Item = &Simplex> {
        self.simplices.iter().filter(move |s| s.dimension() == d)
    }

    /// Highest dimension present, `None` when empty.
    pub fn dimension(&self) -> Option<usize> {
        self.simplices.last().map(Simplex::dimension)
    }

    /// Number of simplices per dimension, index = dimension.
    pub fn dimension_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.dimension().map_or(0, |d| d + 1)];
        for s in &self.simplices {
            counts[s.dimension()] += 1;
        }
        counts
    }

    pub fn vertices(&self) -> Vec<usize> {
        self.simplices_of_dim(0).map(|s| s.vertices()[0]).collect()
    }

    pub fn edges(&self) -> Vec<[usize; 2]> {
        self.simplices_of_dim(1)
            .map(|s| [s.vertices()[0], s.vertices()[1]])
            .collect()
    }

    pub fn faces(&self) -> Vec<[usize; 3]> {
        self.simplices_of_dim(2)
            .map(|s| {
                let v = s.vertices();
                [v[0], v[1], v[2]]
            })
            .collect()
    }

    pub fn tetrahedra(&self) -> Vec<[usize; 4]> {
        self.simplices_of_dim(3)
            .map(|s| {
                let v = s.vertices();
                [v[0], v[1], v[2], v[3]]
            })
            .collect()
    }

    /// Every face of every simplex is present.
    pub fn is_closed(&self) -> bool {
        let present: HashSet<&Simplex> = self.simplices.iter().collect();
        self.simplices
            .iter()
            .all(|s| s.faces().iter().all(|f| present.contains(f)))
    }

    /// Every simplex of `self` is also in `other`.
    pub fn is_subcomplex_of(&self, other: &SimplicialComplex) -> bool {
        self.orientation == other.orientation && self.simplices.iter().all(|s| other.contains(s))
    }

    /// Euler characteristic χ = Σ (-1)^d · #d-simplices
    pub fn euler_characteristic(&self) -> i64 {
        self.dimension_counts()
            .iter()
            .enumerate()
            .map(|(d, &c)| if d % 2 == 0 { c as i64 } else { -(c as i64) })
            .sum()
    }

    /// Connected components of the 1-skeleton, counted over present vertices.
    pub fn component_count(&self) -> usize {
        let n = self.n_vertices;
        let mut parent: Vec<usize> = (0..n).collect();
        let mut rank = vec![0usize; n];

        fn find(parent: &mut [usize], i: usize) -> usize {
            if parent[i] != i {
                parent[i] = find(parent, parent[i]);
            }
            parent[i]
        }

        fn union(parent: &mut [usize], rank: &mut [usize], x: usize, y: usize) {
            let rx = find(parent, x);
            let ry = find(parent, y);
            if rx != ry {
                if rank[rx] < rank[ry] {
                    parent[rx] = ry;
                } else if rank[rx] > rank[ry] {
                    parent[ry] = rx;
                } else {
                    parent[ry] = rx;
                    rank[rx] += 1;
                }
            }
        }

        for [i, j] in self.edges() {
            union(&mut parent, &mut rank, i, j);
        }

        let mut roots = HashSet::new();
        for v in self.vertices() {
            roots.insert(find(&mut parent, v));
        }
        roots.len()
    }
}

/// Build the witness complex of one orientation at `threshold`.
///
/// Fails with `InvalidThreshold` for a non-finite threshold or an empty
/// matrix. Dimensions above what the vertex count allows simply produce
/// no simplices.
pub fn build_complex(
    matrix: &VisibilityMatrix,
    threshold: f64,
    max_dimension: usize,
    orientation: Orientation,
) -> MapperResult<SimplicialComplex> {
    build_complex_until(matrix, threshold, max_dimension, orientation, None)
}

/// `build_complex` that polls `token` once per parent simplex.
///
/// A cancelled build returns `Cancelled` with zero counts; the sweep
/// fills in its own progress.
pub(crate) fn build_complex_until(
    matrix: &VisibilityMatrix,
    threshold: f64,
    max_dimension: usize,
    orientation: Orientation,
    token: Option<&CancellationToken>,
) -> MapperResult<SimplicialComplex> {
    let cancelled = || token.is_some_and(CancellationToken::is_cancelled);

    if !threshold.is_finite() {
        return Err(MapperError::invalid_threshold(format!(
            "threshold must be finite, got {threshold}"
        )));
    }
    if matrix.is_empty() {
        return Err(MapperError::invalid_threshold(
            "cannot apply a threshold to an empty visibility matrix",
        ));
    }

    let witnesses = witness_sets(matrix, threshold, orientation);
    let n_vertices = witnesses.len();

    // Level k holds the k-simplices with the witnesses they share
    let mut level: Vec<(Vec<usize>, BitVec<u64, Lsb0>)> = witnesses
        .iter()
        .enumerate()
        .filter(|(_, seen)| seen.any())
        .map(|(v, seen)| (vec![v], seen.clone()))
        .collect();

    let mut simplices: Vec<Simplex> = level
        .iter()
        .map(|(vs, _)| Simplex::from_sorted(vs.clone()))
        .collect();

    for _ in 1..=max_dimension {
        let mut next = Vec::new();
        for (vs, common) in &level {
            if cancelled() {
                return Err(MapperError::Cancelled {
                    completed: 0,
                    total: 0,
                });
            }
            let last = vs[vs.len() - 1];
            for (v, seen) in witnesses.iter().enumerate().skip(last + 1) {
                let mut shared = common.clone();
                shared &= seen.as_bitslice();
                if shared.any() {
                    let mut extended = vs.clone();
                    extended.push(v);
                    next.push((extended, shared));
                }
            }
        }
        if next.is_empty() {
            break;
        }
        simplices.extend(next.iter().map(|(vs, _)| Simplex::from_sorted(vs.clone())));
        level = next;
    }

    let complex = SimplicialComplex {
        orientation,
        threshold,
        n_vertices,
        simplices,
    };

    debug!(
        %orientation,
        threshold,
        simplices = complex.len(),
        counts = ?complex.dimension_counts(),
        "built witness complex"
    );

    Ok(complex)
}

/// Build the landmark- and observer-indexed complexes at `threshold`.
pub fn build_dual_complex(
    matrix: &VisibilityMatrix,
    threshold: f64,
    max_dimension: usize,
) -> MapperResult<DualComplex> {
    Ok(DualComplex {
        landmark: build_complex(matrix, threshold, max_dimension, Orientation::LandmarkIndexed)?,
        observer: build_complex(matrix, threshold, max_dimension, Orientation::ObserverIndexed)?,
    })
}

/// For each own vertex, the set of witnesses within `threshold`.
fn witness_sets(
    matrix: &VisibilityMatrix,
    threshold: f64,
    orientation: Orientation,
) -> Vec<BitVec<u64, Lsb0>> {
    match orientation {
        Orientation::LandmarkIndexed => (0..matrix.n_landmarks())
            .map(|l| {
                (0..matrix.n_observers())
                    .map(|o| matrix.distance(l, o) <= threshold)
                    .collect()
            })
            .collect(),
        Orientation::ObserverIndexed => (0..matrix.n_observers())
            .map(|o| {
                (0..matrix.n_landmarks())
                    .map(|l| matrix.distance(l, o) <= threshold)
                    .collect()
            })
            .collect(),
    }
}
