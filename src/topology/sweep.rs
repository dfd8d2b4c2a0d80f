//! Parallel Threshold Sweep
//!
//! Each sampled threshold is an independent unit of work: a worker reads
//! the shared visibility matrix, builds both complexes for its threshold
//! (the two orientations run as a `rayon::join` pair) and returns them in
//! a private buffer. Nothing is merged until every worker has joined, and
//! the merge is the same one the sequential builder uses, so the result
//! is identical to `build_filtration`.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{info, warn};

use super::complex::{build_complex_until, DualComplex};
use super::filtration::{merge_threshold_complexes, DualFiltration, ThresholdComplexes};
use super::schedule::normalize_thresholds;
use super::Orientation;
use crate::distance::VisibilityMatrix;
use crate::error::{MapperError, MapperResult};

/// Shared flag for aborting a sweep from another thread.
///
/// Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Worker-pool filtration builder.
#[derive(Debug, Clone)]
pub struct ThresholdSweep {
    max_dimension: usize,
    /// Worker count; `None` uses the available parallelism
    threads: Option<usize>,
    token: CancellationToken,
}

impl ThresholdSweep {
    pub fn new(max_dimension: usize) -> Self {
        Self {
            max_dimension,
            threads: None,
            token: CancellationToken::new(),
        }
    }

    pub fn with_threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_token(mut self, token: CancellationToken) -> Self {
        self.token = token;
        self
    }

    /// Token that aborts this sweep when cancelled.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Evaluate every threshold concurrently and merge into a filtration pair.
    ///
    /// Returns `Cancelled` if the token fires before all thresholds have
    /// been evaluated. Workers check the token before starting a threshold
    /// and again for every simplex they extend within it.
    pub fn run(
        &self,
        matrix: &VisibilityMatrix,
        thresholds: &[f64],
    ) -> MapperResult<DualFiltration> {
        if self.threads == Some(0) {
            return Err(MapperError::invalid_config("sweep needs at least one worker thread"));
        }
        let thresholds = normalize_thresholds(thresholds)?;
        let total = thresholds.len();

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads.unwrap_or(0))
            .build()
            .map_err(|e| MapperError::ThreadPool(e.to_string()))?;

        let completed = AtomicUsize::new(0);
        let max_dimension = self.max_dimension;
        let token = &self.token;

        let results: Vec<MapperResult<ThresholdComplexes>> = pool.install(|| {
            thresholds
                .par_iter()
                .enumerate()
                .map(|(step, &threshold)| {
                    if token.is_cancelled() {
                        return Err(MapperError::Cancelled {
                            completed: completed.load(Ordering::SeqCst),
                            total,
                        });
                    }

                    let build = |orientation| {
                        build_complex_until(
                            matrix,
                            threshold,
                            max_dimension,
                            orientation,
                            Some(token),
                        )
                    };
                    let (landmark, observer) = rayon::join(
                        || build(Orientation::LandmarkIndexed),
                        || build(Orientation::ObserverIndexed),
                    );
                    let complexes = DualComplex {
                        landmark: landmark?,
                        observer: observer?,
                    };

                    completed.fetch_add(1, Ordering::SeqCst);
                    Ok(ThresholdComplexes {
                        step,
                        threshold,
                        complexes,
                    })
                })
                .collect()
        });

        let mut evaluated = Vec::with_capacity(total);
        for result in results {
            match result {
                Ok(tc) => evaluated.push(tc),
                Err(MapperError::Cancelled { .. }) => {
                    let completed = completed.load(Ordering::SeqCst);
                    warn!(completed, total, "threshold sweep cancelled");
                    return Err(MapperError::Cancelled { completed, total });
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            thresholds = total,
            threads = pool.current_num_threads(),
            "threshold sweep joined"
        );

        merge_threshold_complexes(thresholds, evaluated)
    }
}
