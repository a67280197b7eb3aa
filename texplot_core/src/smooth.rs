// Copyright 2025 the texplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Series smoothers.
//!
//! Both smoothers return a new `(x, y)` pair ready to be plotted; neither
//! touches its input.

extern crate alloc;

use alloc::vec::Vec;

use crate::error::{PlotError, PlotResult, check_len};
#[cfg(not(feature = "std"))]
use crate::float::FloatExt;
use crate::scale::Axis;
use crate::series::interpolate;

/// Moving-average smoother.
///
/// Each output value is the mean of `degree` consecutive input values. The x
/// values are trimmed by `degree / 2` on both ends so every output point sits at
/// the center of its window; the result has `len - degree + 1` points.
///
/// A `degree` of 1 returns the input unchanged. Even degrees, and degrees larger
/// than the number of points, are rejected.
pub fn simple_smooth(x: &[f64], y: &[f64], degree: usize) -> PlotResult<(Vec<f64>, Vec<f64>)> {
    check_len("y", x.len(), y.len())?;
    if degree == 1 {
        return Ok((x.to_vec(), y.to_vec()));
    }
    if degree % 2 == 0 || degree > y.len() {
        return Err(PlotError::InvalidSmoothing {
            degree,
            len: y.len(),
        });
    }

    let half = degree / 2;
    let smoothed_y = y
        .windows(degree)
        .map(|w| w.iter().sum::<f64>() / degree as f64)
        .collect::<Vec<_>>();
    let smoothed_x = x[half..x.len() - half].to_vec();
    Ok((smoothed_x, smoothed_y))
}

/// Recursive linear-interpolation smoother.
///
/// Degree 0 returns the input unchanged. Degree 1 resamples the series on evenly
/// spaced x values spanning the same range, with as many points as the input.
/// Every further degree takes the midpoints of the previous result and
/// interpolates there, so the output has `len - degree + 1` points.
///
/// With `logx`/`logy` the work is done on the decimal logarithm of that
/// coordinate; all values on such an axis must be positive.
pub fn recursive_smooth(
    x: &[f64],
    y: &[f64],
    degree: usize,
    logx: bool,
    logy: bool,
) -> PlotResult<(Vec<f64>, Vec<f64>)> {
    check_len("y", x.len(), y.len())?;
    if degree == 0 {
        return Ok((x.to_vec(), y.to_vec()));
    }
    if degree > x.len() {
        return Err(PlotError::InvalidSmoothing {
            degree,
            len: x.len(),
        });
    }

    let xs = to_working(Axis::X, x, logx)?;
    let ys = to_working(Axis::Y, y, logy)?;
    let (mut sx, mut sy) = resample(&xs, &ys);
    for _ in 1..degree {
        let mid = sx.windows(2).map(|w| (w[0] + w[1]) / 2.0).collect::<Vec<_>>();
        let values = mid
            .iter()
            .filter_map(|&m| interpolate(m, &sx, &sy))
            .collect::<Vec<_>>();
        sx = mid;
        sy = values;
    }

    Ok((from_working(sx, logx), from_working(sy, logy)))
}

/// Evenly spaced x values over the input range, with interpolated y values.
fn resample(x: &[f64], y: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let (lo, hi) = x
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let n = x.len();
    let step = if n > 1 { (hi - lo) / (n - 1) as f64 } else { 0.0 };
    let xs = (0..n)
        .map(|i| if i + 1 == n { hi } else { lo + step * i as f64 })
        .collect::<Vec<_>>();
    let ys = xs
        .iter()
        .filter_map(|&v| interpolate(v, x, y))
        .collect::<Vec<_>>();
    (xs, ys)
}

fn to_working(axis: Axis, values: &[f64], log: bool) -> PlotResult<Vec<f64>> {
    if !log {
        return Ok(values.to_vec());
    }
    values
        .iter()
        .map(|&v| {
            if v > 0.0 {
                Ok(v.log10())
            } else {
                Err(PlotError::non_positive(axis, v))
            }
        })
        .collect()
}

fn from_working(values: Vec<f64>, log: bool) -> Vec<f64> {
    if log {
        values.into_iter().map(|v| 10_f64.powf(v)).collect()
    } else {
        values
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use alloc::vec;

    fn close(a: &[f64], b: &[f64]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(p, q)| (p - q).abs() < 1e-9)
    }

    #[test]
    fn moving_average_trims_the_window() {
        let x = [0.0, 1.0, 2.0, 3.0, 4.0];
        let y = [0.0, 3.0, 0.0, 3.0, 0.0];
        let (sx, sy) = simple_smooth(&x, &y, 3).unwrap();
        assert_eq!(sx, vec![1.0, 2.0, 3.0]);
        assert!(close(&sy, &[1.0, 2.0, 1.0]), "{sy:?}");
    }

    #[test]
    fn degree_one_is_identity() {
        let x = [0.0, 1.0];
        let y = [5.0, 7.0];
        assert_eq!(simple_smooth(&x, &y, 1).unwrap(), (x.to_vec(), y.to_vec()));
        assert_eq!(
            recursive_smooth(&x, &y, 0, false, false).unwrap(),
            (x.to_vec(), y.to_vec())
        );
    }

    #[test]
    fn even_or_oversized_degree_is_rejected() {
        let x = [0.0, 1.0, 2.0];
        assert_eq!(
            simple_smooth(&x, &x, 2),
            Err(PlotError::InvalidSmoothing { degree: 2, len: 3 })
        );
        assert_eq!(
            simple_smooth(&x, &x, 5),
            Err(PlotError::InvalidSmoothing { degree: 5, len: 3 })
        );
        assert!(matches!(
            simple_smooth(&x, &[1.0], 3),
            Err(PlotError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn recursive_degree_one_resamples_evenly() {
        let x = [0.0, 1.0, 4.0];
        let y = [0.0, 1.0, 4.0];
        let (sx, sy) = recursive_smooth(&x, &y, 1, false, false).unwrap();
        assert_eq!(sx, vec![0.0, 2.0, 4.0]);
        assert!(close(&sy, &[0.0, 2.0, 4.0]), "{sy:?}");
    }

    #[test]
    fn recursive_degree_two_takes_midpoints() {
        let x = [0.0, 1.0, 2.0];
        let y = [0.0, 2.0, 0.0];
        let (sx, sy) = recursive_smooth(&x, &y, 2, false, false).unwrap();
        assert_eq!(sx, vec![0.5, 1.5]);
        assert!(close(&sy, &[1.0, 1.0]), "{sy:?}");
    }

    #[test]
    fn log_smoothing_works_in_decades() {
        let x = [1.0, 10.0, 100.0];
        let y = [1.0, 10.0, 100.0];
        let (sx, sy) = recursive_smooth(&x, &y, 2, true, true).unwrap();
        assert!(close(&sx, &[10_f64.powf(0.5), 10_f64.powf(1.5)]), "{sx:?}");
        assert!(close(&sx, &sy), "{sy:?}");
        assert_eq!(
            recursive_smooth(&[0.0, 1.0], &[1.0, 2.0], 1, true, false),
            Err(PlotError::non_positive(Axis::X, 0.0))
        );
    }
}
