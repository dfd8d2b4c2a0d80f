//! Distance Module: Metrics and Landmark/Observer Visibility
//!
//! Every complex in this crate is derived from a single dense matrix
//! D[l, o] holding the distance between landmark l and observer o.
//! The matrix is computed once per fitted cloud and is read-only
//! afterwards, so it can be shared freely between sweep workers.
//!
//! - `metric.rs`: the `Metric` trait and the built-in metrics
//! - `visibility.rs`: pairwise distance matrix construction

mod metric;
mod visibility;

pub use metric::{Metric, MetricKind};
pub use visibility::{pairwise_distances, VisibilityMatrix};
