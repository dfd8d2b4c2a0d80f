//! Threshold Filtrations of Witness Complexes
//!
//! A filtration lists every simplex once, tagged with the smallest sampled
//! threshold at which it is present ("birth"). Entries are sorted by
//! (birth, dimension, vertices), so faces never come after their cofaces
//! and a persistent-homology routine can consume the list as-is.
//!
//! ## Face/Coface Monotonicity
//!
//! Witness complexes grow with the threshold, so the earliest sampled
//! appearance of a face is never later than that of its cofaces. The
//! builder still clamps every face's birth to the minimum over its
//! cofaces, which also inserts any face missing from the input.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::info;

use super::complex::{build_dual_complex, DualComplex};
use super::schedule::normalize_thresholds;
use super::{Orientation, Simplex};
use crate::distance::VisibilityMatrix;
use crate::error::{MapperError, MapperResult};

/// A simplex with the threshold at which it is born.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilteredSimplex {
    pub simplex: Simplex,
    /// Threshold value at first appearance
    pub birth: f64,
    /// Index of that threshold in the sampled schedule
    pub step: usize,
}

impl FilteredSimplex {
    pub fn dimension(&self) -> usize {
        self.simplex.dimension()
    }
}

/// Ordered filtration of one orientation's complexes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Filtration {
    pub orientation: Orientation,
    entries: Vec<FilteredSimplex>,
}

impl Filtration {
    /// Build from first-appearance records, enforcing closure, face/coface
    /// monotonicity and canonical ordering.
    pub fn from_births(
        orientation: Orientation,
        mut births: BTreeMap<Simplex, (f64, usize)>,
    ) -> Self {
        // Top dimension down, so clamped births propagate to every face
        let top = births.keys().map(Simplex::dimension).max().unwrap_or(0);
        for d in (1..=top).rev() {
            let level: Vec<(Simplex, (f64, usize))> = births
                .iter()
                .filter(|(s, _)| s.dimension() == d)
                .map(|(s, b)| (s.clone(), *b))
                .collect();
            for (simplex, (birth, step)) in level {
                for face in simplex.faces() {
                    let entry = births.entry(face).or_insert((birth, step));
                    if birth < entry.0 || (birth == entry.0 && step < entry.1) {
                        *entry = (birth, step);
                    }
                }
            }
        }

        let mut entries: Vec<FilteredSimplex> = births
            .into_iter()
            .map(|(simplex, (birth, step))| FilteredSimplex { simplex, birth, step })
            .collect();

        entries.sort_by(|a, b| {
            a.birth
                .total_cmp(&b.birth)
                .then(a.dimension().cmp(&b.dimension()))
                .then(a.simplex.cmp(&b.simplex))
        });

        Self { orientation, entries }
    }

    pub fn entries(&self) -> &[FilteredSimplex] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &FilteredSimplex> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(vertex list, birth)` pairs in filtration order.
    pub fn pairs(&self) -> Vec<(Vec<usize>, f64)> {
        self.entries
            .iter()
            .map(|e| (e.simplex.vertices().to_vec(), e.birth))
            .collect()
    }

    pub fn birth_of(&self, simplex: &Simplex) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| &e.simplex == simplex)
            .map(|e| e.birth)
    }

    /// Simplices present at threshold `value`.
    pub fn complex_at(&self, value: f64) -> Vec<&Simplex> {
        self.entries
            .iter()
            .take_while(|e| e.birth <= value)
            .map(|e| &e.simplex)
            .collect()
    }

    pub fn max_birth(&self) -> Option<f64> {
        self.entries.last().map(|e| e.birth)
    }

    /// Births non-decreasing in order, and no face born after a coface.
    pub fn is_monotone(&self) -> bool {
        let ordered = self.entries.windows(2).all(|w| {
            w[0].birth < w[1].birth
                || (w[0].birth == w[1].birth && w[0].dimension() <= w[1].dimension())
        });
        if !ordered {
            return false;
        }

        let births: BTreeMap<&Simplex, f64> =
            self.entries.iter().map(|e| (&e.simplex, e.birth)).collect();
        self.entries.iter().all(|e| {
            e.simplex
                .faces()
                .iter()
                .all(|f| births.get(f).is_some_and(|&b| b <= e.birth))
        })
    }
}

/// Landmark and observer filtrations over a common threshold list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DualFiltration {
    pub landmark: Filtration,
    pub observer: Filtration,
    /// Sampled thresholds, ascending; entry `step` indexes into this
    pub thresholds: Vec<f64>,
}

impl DualFiltration {
    pub fn get(&self, orientation: Orientation) -> &Filtration {
        match orientation {
            Orientation::LandmarkIndexed => &self.landmark,
            Orientation::ObserverIndexed => &self.observer,
        }
    }

    pub fn len(&self) -> usize {
        self.landmark.len() + self.observer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmark.is_empty() && self.observer.is_empty()
    }
}

/// Both complexes evaluated at one sampled threshold.
#[derive(Debug, Clone)]
pub struct ThresholdComplexes {
    pub step: usize,
    pub threshold: f64,
    pub complexes: DualComplex,
}

/// Merge per-threshold complexes into a filtration pair.
///
/// Input order does not matter: each simplex keeps its smallest birth.
pub fn merge_threshold_complexes(
    thresholds: Vec<f64>,
    evaluated: Vec<ThresholdComplexes>,
) -> MapperResult<DualFiltration> {
    let mut landmark: BTreeMap<Simplex, (f64, usize)> = BTreeMap::new();
    let mut observer: BTreeMap<Simplex, (f64, usize)> = BTreeMap::new();

    for tc in evaluated {
        for (births, complex) in [
            (&mut landmark, &tc.complexes.landmark),
            (&mut observer, &tc.complexes.observer),
        ] {
            for simplex in complex.simplices() {
                births
                    .entry(simplex.clone())
                    .and_modify(|e| {
                        if tc.step < e.1 {
                            *e = (tc.threshold, tc.step);
                        }
                    })
                    .or_insert((tc.threshold, tc.step));
            }
        }
    }

    if landmark.is_empty() && observer.is_empty() {
        return Err(MapperError::EmptyFiltration);
    }

    let filtration = DualFiltration {
        landmark: Filtration::from_births(Orientation::LandmarkIndexed, landmark),
        observer: Filtration::from_births(Orientation::ObserverIndexed, observer),
        thresholds,
    };

    info!(
        thresholds = filtration.thresholds.len(),
        landmark_simplices = filtration.landmark.len(),
        observer_simplices = filtration.observer.len(),
        "built filtration"
    );

    Ok(filtration)
}

/// Sequentially sweep `thresholds` and build both filtrations.
///
/// Thresholds are sorted ascending and de-duplicated first; a simplex's
/// step is the index of its birth threshold in that list.
pub fn build_filtration(
    matrix: &VisibilityMatrix,
    thresholds: &[f64],
    max_dimension: usize,
) -> MapperResult<DualFiltration> {
    let thresholds = normalize_thresholds(thresholds)?;

    let mut evaluated = Vec::with_capacity(thresholds.len());
    for (step, &threshold) in thresholds.iter().enumerate() {
        evaluated.push(ThresholdComplexes {
            step,
            threshold,
            complexes: build_dual_complex(matrix, threshold, max_dimension)?,
        });
    }

    merge_threshold_complexes(thresholds, evaluated)
}
