//! # Clutch Mapper
//!
//! Landmark/observer witness complexes over clustered point clouds
//! (weekly player statistic vectors labeled by a clustering step), and
//! the threshold filtrations a persistent-homology routine consumes.
//!
//! ## Pipeline
//!
//! 1. **Cover**: each cluster gets a bounding hypersphere
//!    (centroid = member mean, radius = farthest member)
//!
//! 2. **Visibility**: a dense landmark × observer distance matrix under a
//!    configurable metric (centroids as landmarks, raw points as
//!    observers, or the reverse)
//!
//! 3. **Complexes**: at threshold t, vertices sharing a common witness
//!    within t span a simplex. The landmark-indexed and observer-indexed
//!    complexes are dual readings of the same matrix
//!
//! 4. **Filtration**: sweeping t tags every simplex with the threshold at
//!    which it is born. The sweep can run on a worker pool and be aborted
//!    through a cancellation token
//!
//! ## Boundaries
//!
//! The crate is a pure in-memory computation. Clustering, persistence
//! computation, rendering and storage belong to the caller; complexes
//! serialize with serde so a renderer can attach player names by index.

pub mod error;
pub mod config;
pub mod cover;
pub mod distance;
pub mod topology;
pub mod mapper;
pub mod synthetic;

pub use error::{MapperError, MapperResult};
pub use config::{MapperConfig, RoleAssignment};
pub use mapper::ClutchMapper;

// Re-exports from cover
pub use cover::{
    build_cover,
    standardize,
    Cover,
    CoverSet,
};

// Re-exports from distance
pub use distance::{
    pairwise_distances,
    Metric,
    MetricKind,
    VisibilityMatrix,
};

// Re-exports from topology
pub use topology::{
    // Single-threshold complexes
    build_complex,
    build_dual_complex,
    DualComplex,
    Orientation,
    Simplex,
    SimplicialComplex,
    // Filtrations
    build_filtration,
    DualFiltration,
    FilteredSimplex,
    Filtration,
    ThresholdSchedule,
    MAX_THRESHOLDS,
    // Parallel sweep
    CancellationToken,
    ThresholdSweep,
};
