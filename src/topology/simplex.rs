//! Simplices over a fixed vertex index space.

use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::{MapperError, MapperResult};

/// Which point set supplies a complex's vertices.
///
/// The two complexes are dual: both are read from the same landmark ×
/// observer matrix, with rows and columns exchanging the roles of
/// "own" vertices and "other" witnesses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Vertices are landmarks, witnesses are observers
    LandmarkIndexed,
    /// Vertices are observers, witnesses are landmarks
    ObserverIndexed,
}

impl Orientation {
    pub const BOTH: [Orientation; 2] = [Orientation::LandmarkIndexed, Orientation::ObserverIndexed];
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Orientation::LandmarkIndexed => "landmark",
            Orientation::ObserverIndexed => "observer",
        };
        f.pad(name)
    }
}

/// A simplex represented by its sorted, distinct vertex indices.
///
/// Ordering is lexicographic on the vertex list.
#[derive(Debug, Clone, Hash, Eq, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Simplex {
    vertices: Vec<usize>,
}

impl Simplex {
    /// Build from any vertex list. Duplicates are removed; an empty list is rejected.
    pub fn new(vertices: impl IntoIterator<Item = usize>) -> MapperResult<Self> {
        let mut vertices: Vec<usize> = vertices.into_iter().collect();
        vertices.sort_unstable();
        vertices.dedup();
        if vertices.is_empty() {
            return Err(MapperError::invalid_input("a simplex needs at least one vertex"));
        }
        Ok(Self { vertices })
    }

    /// Caller guarantees `vertices` is non-empty, strictly ascending.
    pub(crate) fn from_sorted(vertices: Vec<usize>) -> Self {
        debug_assert!(!vertices.is_empty());
        debug_assert!(vertices.windows(2).all(|w| w[0] < w[1]));
        Self { vertices }
    }

    pub fn vertex(v: usize) -> Self {
        Self { vertices: vec![v] }
    }

    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    /// Dimension = vertex count - 1.
    pub fn dimension(&self) -> usize {
        self.vertices.len() - 1
    }

    /// Codimension-1 faces, in lexicographic order. Empty for a vertex.
    pub fn faces(&self) -> Vec<Simplex> {
        if self.vertices.len() < 2 {
            return Vec::new();
        }
        self.vertices
            .iter()
            .copied()
            .combinations(self.vertices.len() - 1)
            .map(Simplex::from_sorted)
            .collect()
    }
}
