//! Column-wise z-score scaling of raw statistic vectors.

use ndarray::{Array2, ArrayView2, Axis};

use crate::error::{MapperError, MapperResult};

/// Scale each column to zero mean and unit (population) variance.
///
/// Constant columns carry no information and are mapped to 0.
pub fn standardize(points: ArrayView2<f64>) -> MapperResult<Array2<f64>> {
    if points.nrows() == 0 {
        return Err(MapperError::invalid_input("cannot standardize an empty point cloud"));
    }

    let mean = points
        .mean_axis(Axis(0))
        .ok_or_else(|| MapperError::invalid_input("cannot standardize an empty point cloud"))?;
    let std = points.std_axis(Axis(0), 0.0);

    let mut out = &points - &mean;
    for (mut column, &s) in out.axis_iter_mut(Axis(1)).zip(std.iter()) {
        if s > 0.0 {
            column /= s;
        } else {
            column.fill(0.0);
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_zero_mean_unit_variance() {
        let stats = array![[1.0, 10.0], [3.0, 10.0], [5.0, 10.0]];
        let scaled = standardize(stats.view()).unwrap();

        let mean = scaled.mean_axis(Axis(0)).unwrap();
        assert!(mean[0].abs() < 1e-12);
        assert!((scaled.std_axis(Axis(0), 0.0)[0] - 1.0).abs() < 1e-12);

        // Constant column collapses to zero
        assert!(scaled.column(1).iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_empty_rejected() {
        let empty = Array2::<f64>::zeros((0, 3));
        assert!(standardize(empty.view()).is_err());
    }
}
