//! Threshold schedules for filtration sweeps.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::distance::VisibilityMatrix;
use crate::error::{MapperError, MapperResult};

/// Upper bound on the number of thresholds a schedule may generate.
pub const MAX_THRESHOLDS: usize = 100_000;

/// How the sweep samples visibility thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ThresholdSchedule {
    /// `samples` evenly spaced values from 0 to the largest matrix entry, inclusive
    Linear { samples: usize },
    /// `start, start + step, ...` up to and including `stop`
    Stepped { start: f64, stop: f64, step: f64 },
    /// `0, 1, ..., n` with `n` the point-cloud size, i.e. the larger side
    /// of the matrix whichever role the points play
    IntegerSteps,
    /// Caller-supplied values
    Explicit { values: Vec<f64> },
}

impl Default for ThresholdSchedule {
    fn default() -> Self {
        ThresholdSchedule::Linear { samples: 50 }
    }
}

impl ThresholdSchedule {
    /// Check the schedule's own parameters.
    pub fn validate(&self) -> MapperResult<()> {
        match self {
            ThresholdSchedule::Linear { samples } => {
                if *samples == 0 {
                    return Err(MapperError::invalid_config(
                        "linear schedule needs at least one sample",
                    ));
                }
                if *samples > MAX_THRESHOLDS {
                    return Err(MapperError::invalid_config(format!(
                        "linear schedule asks for {samples} samples, limit is {MAX_THRESHOLDS}"
                    )));
                }
                Ok(())
            }
            ThresholdSchedule::Stepped { start, stop, step } => {
                if !start.is_finite() || !stop.is_finite() || !step.is_finite() {
                    return Err(MapperError::invalid_config(
                        "stepped schedule bounds must be finite",
                    ));
                }
                if *step <= 0.0 {
                    return Err(MapperError::invalid_config(format!(
                        "stepped schedule step must be positive, got {step}"
                    )));
                }
                if stop < start {
                    return Err(MapperError::invalid_config(format!(
                        "stepped schedule stop {stop} is below start {start}"
                    )));
                }
                let count = stepped_count(*start, *stop, *step);
                if !count.is_finite() || count > MAX_THRESHOLDS as f64 {
                    return Err(MapperError::invalid_config(format!(
                        "stepped schedule yields {count} thresholds, limit is {MAX_THRESHOLDS}"
                    )));
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Concrete thresholds for `matrix`, ascending and de-duplicated.
    pub fn resolve(&self, matrix: &VisibilityMatrix) -> MapperResult<Vec<f64>> {
        self.validate()?;
        let raw: Vec<f64> = match self {
            ThresholdSchedule::Linear { samples } => {
                Array1::linspace(0.0, matrix.max_distance(), *samples).to_vec()
            }
            ThresholdSchedule::Stepped { start, stop, step } => {
                let count = stepped_count(*start, *stop, *step) as usize;
                (0..count).map(|i| start + step * i as f64).collect()
            }
            ThresholdSchedule::IntegerSteps => {
                let n = matrix.n_landmarks().max(matrix.n_observers());
                (0..=n).map(|i| i as f64).collect()
            }
            ThresholdSchedule::Explicit { values } => values.clone(),
        };
        normalize_thresholds(&raw)
    }
}

/// Number of values `start, start + step, ...` not exceeding `stop`.
fn stepped_count(start: f64, stop: f64, step: f64) -> f64 {
    ((stop - start) / step + 1e-9).floor() + 1.0
}

/// Sort ascending and drop duplicates. Rejects non-finite values.
///
/// The position of a value in the returned list is its time step.
pub fn normalize_thresholds(thresholds: &[f64]) -> MapperResult<Vec<f64>> {
    if let Some(bad) = thresholds.iter().find(|t| !t.is_finite()) {
        return Err(MapperError::invalid_threshold(format!(
            "thresholds must be finite, got {bad}"
        )));
    }
    let mut sorted = thresholds.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted.dedup();
    Ok(sorted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn matrix() -> VisibilityMatrix {
        VisibilityMatrix::from_distance_matrix(array![[1.0, 4.0, 2.0], [3.0, 0.5, 2.5]]).unwrap()
    }

    #[test]
    fn test_linear_spans_to_max_distance() {
        let ts = ThresholdSchedule::default().resolve(&matrix()).unwrap();
        assert_eq!(ts.len(), 50);
        assert_eq!(ts[0], 0.0);
        assert!((ts[49] - 4.0).abs() < 1e-12);
        assert!(ts.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_stepped_includes_stop() {
        let schedule = ThresholdSchedule::Stepped { start: 0.0, stop: 10.0, step: 0.5 };
        let ts = schedule.resolve(&matrix()).unwrap();
        assert_eq!(ts.len(), 21);
        assert!((ts[20] - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_integer_steps_follow_point_count() {
        let ts = ThresholdSchedule::IntegerSteps.resolve(&matrix()).unwrap();
        assert_eq!(ts, vec![0.0, 1.0, 2.0, 3.0]);

        // Points as landmarks: still counts the larger side
        let swapped = ThresholdSchedule::IntegerSteps.resolve(&matrix().transposed()).unwrap();
        assert_eq!(swapped, ts);
    }

    #[test]
    fn test_explicit_is_normalized() {
        let schedule = ThresholdSchedule::Explicit { values: vec![3.0, 1.0, 3.0, 2.0] };
        assert_eq!(schedule.resolve(&matrix()).unwrap(), vec![1.0, 2.0, 3.0]);

        let bad = ThresholdSchedule::Explicit { values: vec![1.0, f64::NAN] };
        assert!(matches!(
            bad.resolve(&matrix()),
            Err(MapperError::InvalidThreshold { .. })
        ));
    }

    #[test]
    fn test_invalid_schedules() {
        assert!(ThresholdSchedule::Linear { samples: 0 }.validate().is_err());
        let zero_step = ThresholdSchedule::Stepped { start: 0.0, stop: 1.0, step: 0.0 };
        assert!(zero_step.validate().is_err());
        let reversed = ThresholdSchedule::Stepped { start: 2.0, stop: 1.0, step: 0.5 };
        assert!(reversed.validate().is_err());
    }

    #[test]
    fn test_oversized_schedules_rejected() {
        let overflowing = ThresholdSchedule::Stepped { start: 0.0, stop: 1e300, step: 1e-10 };
        assert!(matches!(
            overflowing.resolve(&matrix()),
            Err(MapperError::InvalidConfig { .. })
        ));

        let huge = ThresholdSchedule::Stepped { start: 0.0, stop: 1e6, step: 1e-6 };
        assert!(huge.validate().is_err());

        let too_many = ThresholdSchedule::Linear { samples: MAX_THRESHOLDS + 1 };
        assert!(matches!(
            too_many.resolve(&matrix()),
            Err(MapperError::InvalidConfig { .. })
        ));

        let at_limit = ThresholdSchedule::Stepped {
            start: 0.0,
            stop: (MAX_THRESHOLDS - 1) as f64,
            step: 1.0,
        };
        assert_eq!(at_limit.resolve(&matrix()).unwrap().len(), MAX_THRESHOLDS);
    }
}
