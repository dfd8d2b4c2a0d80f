//! Cover Module: Hypersphere Covers of Labeled Point Clouds
//!
//! A cover assigns each cluster label a bounding hypersphere:
//!
//!   centroid(c) = mean of the member vectors of c
//!   radius(c)   = max ‖centroid(c) - x‖ over members x of c
//!
//! The union of the spheres contains every point of the cloud. Cluster
//! centroids become the landmarks of the witness construction.

mod builder;
mod standardize;

pub use builder::{build_cover, Cover, CoverSet};
pub use standardize::standardize;
