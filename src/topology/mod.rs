//! Topology Module: Witness Complexes and Their Filtrations
//!
//! Turns a landmark × observer visibility matrix into simplicial complexes:
//! - Witness complexes at a single threshold, in either orientation
//! - Threshold schedules for sweeps
//! - Filtrations tagging each simplex with its birth threshold
//! - A parallel sweep that produces the same filtration on a worker pool
//!
//! ## Mathematical Background
//!
//! Let D be the matrix of distances between landmarks L and observers O.
//! At threshold t, a set σ ⊆ L spans a simplex iff some o ∈ O satisfies
//! D[l, o] ≤ t for every l ∈ σ. Exchanging the roles of L and O gives the
//! dual complex over observers. As t grows the complexes grow, giving a
//! filtration indexed by t that a persistent-homology routine can consume.

mod simplex;
mod complex;
mod schedule;
mod filtration;
mod sweep;

pub use simplex::{Orientation, Simplex};
pub use complex::{build_complex, build_dual_complex, DualComplex, SimplicialComplex};
pub use schedule::{normalize_thresholds, ThresholdSchedule, MAX_THRESHOLDS};
pub use filtration::{
    build_filtration,
    merge_threshold_complexes,
    DualFiltration,
    FilteredSimplex,
    Filtration,
    ThresholdComplexes,
};
pub use sweep::{CancellationToken, ThresholdSweep};
