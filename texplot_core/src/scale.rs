// Copyright 2025 the texplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis scaling: modes, limits and ticks.
//!
//! Limits and ticks are computed in the axis' working space: the values themselves
//! for linear axes, `log10` of the values for logarithmic axes.

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::error::{DomainIssue, PlotError, PlotResult};

/// Tick positions for one axis.
pub type Ticks = SmallVec<[f64; 8]>;

/// Fewest automatically generated ticks.
const MIN_TICKS: usize = 5;
/// Most automatically generated ticks.
const MAX_TICKS: usize = 7;
/// Tick counts tried, in order, when looking for a nice step.
const TICK_TARGETS: [usize; 6] = [5, 6, 4, 7, 3, 8];
/// Half-width (working space) used when every value on an axis is equal.
const DEGENERATE_MARGIN: f64 = 0.5;

/// One of the two data axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Horizontal axis.
    X,
    /// Vertical axis.
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::X => "x",
            Self::Y => "y",
        })
    }
}

/// How values are laid out along an axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisMode {
    /// Linear axis (`normal` in PGFPlots).
    #[default]
    #[serde(rename = "normal")]
    Linear,
    /// Base-10 logarithmic axis.
    #[serde(rename = "log")]
    Log,
}

impl AxisMode {
    /// The PGFPlots `xmode`/`ymode` keyword.
    pub fn pgf_name(self) -> &'static str {
        match self {
            Self::Linear => "normal",
            Self::Log => "log",
        }
    }

    /// Maps a data value into working space.
    pub fn forward(self, v: f64) -> f64 {
        match self {
            Self::Linear => v,
            Self::Log => v.log10(),
        }
    }

    /// Maps a working-space value back to data space.
    pub fn inverse(self, t: f64) -> f64 {
        match self {
            Self::Linear => t,
            Self::Log => 10_f64.powf(t),
        }
    }
}

/// Splits the classic axis shorthand into `(xmode, ymode)`.
///
/// `loglog`, `semilogx` and `semilogy` select log axes; anything else is linear/linear.
pub fn axis_modes(shorthand: &str) -> (AxisMode, AxisMode) {
    match shorthand {
        "loglog" => (AxisMode::Log, AxisMode::Log),
        "semilogx" => (AxisMode::Log, AxisMode::Linear),
        "semilogy" => (AxisMode::Linear, AxisMode::Log),
        _ => (AxisMode::Linear, AxisMode::Linear),
    }
}

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value from domain space into range space.
    ///
    /// A degenerate domain maps every value to the start of the range.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return r0;
        }
        let t = (x - d0) / denom;
        r0 + t * (r1 - r0)
    }
}

/// Powers of ten that fall within `limits`.
fn decade_ticks(limits: (f64, f64)) -> Vec<f64> {
    let (mut min, mut max) = limits;
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }
    if min <= 0.0 || !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    let min_e = exponent(min.log10().ceil());
    let max_e = exponent(max.log10().floor());
    (min_e..=max_e).map(|e| 10_f64.powi(e)).collect()
}

fn exponent(e: f64) -> i32 {
    let e = e.clamp(f64::from(i32::MIN), f64::from(i32::MAX));
    #[allow(clippy::cast_possible_truncation, reason = "clamped to the i32 range")]
    {
        e as i32
    }
}

/// Tick positions `10^e` for each given exponent.
///
/// `log_ticks(&[1, 2, 3])` places ticks at 10, 100 and 1000.
pub fn log_ticks(exponents: &[i32]) -> Vec<f64> {
    exponents.iter().map(|&e| 10_f64.powi(e)).collect()
}

/// Infers a `(min, max)` extent from a set of values.
///
/// Non-finite values are ignored. Returns `None` if no finite values are present.
pub fn infer_extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        if !v.is_finite() {
            continue;
        }
        min = min.min(v);
        max = max.max(v);
    }
    if min.is_finite() && max.is_finite() {
        Some((min, max))
    } else {
        None
    }
}

/// Resolves the displayed limits of one axis.
///
/// Explicit bounds win individually. Missing bounds come from the data extent,
/// padded by `padding` times the span in working space. An extent of zero width
/// is widened by a fixed margin so downstream scaling never divides by zero.
///
/// Fails with [`PlotError::InvalidDomain`] when a log axis sees a value `<= 0`, or
/// when a bound is missing and there is no data to derive it from.
pub fn resolve_limits(
    axis: Axis,
    extent: Option<(f64, f64)>,
    explicit_min: Option<f64>,
    explicit_max: Option<f64>,
    mode: AxisMode,
    padding: f64,
) -> PlotResult<(f64, f64)> {
    if mode == AxisMode::Log {
        let data_min = extent.map(|(lo, _)| lo);
        for v in [explicit_min, explicit_max, data_min].into_iter().flatten() {
            if v <= 0.0 {
                return Err(PlotError::non_positive(axis, v));
            }
        }
    }

    if let (Some(lo), Some(hi)) = (explicit_min, explicit_max) {
        return Ok((lo, hi));
    }
    let Some((lo, hi)) = extent else {
        return Err(PlotError::InvalidDomain {
            axis,
            reason: DomainIssue::Empty,
        });
    };

    let t0 = mode.forward(lo);
    let t1 = mode.forward(hi);
    let span = t1 - t0;
    let (p0, p1) = if span == 0.0 {
        (t0 - DEGENERATE_MARGIN, t1 + DEGENERATE_MARGIN)
    } else {
        let pad = padding.max(0.0) * span;
        (t0 - pad, t1 + pad)
    };
    Ok((
        explicit_min.unwrap_or_else(|| mode.inverse(p0)),
        explicit_max.unwrap_or_else(|| mode.inverse(p1)),
    ))
}

/// Resolves tick positions for one axis.
///
/// Explicit ticks pass through unchanged. Otherwise 5 to 7 evenly spaced ticks are
/// placed inside `limits`: whole decades when a log axis spans enough of them, else
/// "nice" steps in working space, else an even subdivision.
pub fn resolve_ticks(explicit: Option<&[f64]>, limits: (f64, f64), mode: AxisMode) -> Ticks {
    if let Some(ticks) = explicit {
        return ticks.iter().copied().collect();
    }
    if mode == AxisMode::Log {
        let decades = decade_ticks(limits);
        if (MIN_TICKS..=MAX_TICKS).contains(&decades.len()) {
            return decades.into_iter().collect();
        }
    }
    let t0 = mode.forward(limits.0);
    let t1 = mode.forward(limits.1);
    auto_ticks(t0, t1)
        .into_iter()
        .map(|t| mode.inverse(t))
        .collect()
}

fn auto_ticks(a: f64, b: f64) -> Ticks {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let span = hi - lo;
    if !span.is_finite() || span == 0.0 {
        return smallvec::smallvec![lo];
    }
    let eps = span * 1e-9;
    for count in TICK_TARGETS {
        let inside: Ticks = nice_ticks(lo, hi, count)
            .into_iter()
            .filter(|t| *t >= lo - eps && *t <= hi + eps)
            .collect();
        if (MIN_TICKS..=MAX_TICKS).contains(&inside.len()) {
            return inside;
        }
    }
    let n = (MIN_TICKS + MAX_TICKS) / 2;
    let step = span / (n - 1) as f64;
    (0..n).map(|i| lo + step * i as f64).collect()
}

fn nice_ticks(mut min: f64, mut max: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    if min == max {
        return alloc::vec![min];
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }
    let span = max - min;
    let step0 = span / count.max(1) as f64;
    let step = nice_step(step0);
    if step == 0.0 {
        return alloc::vec![min, max];
    }

    let start = (min / step).floor();
    let stop = (max / step).ceil();

    let n_f = (stop - start).round();
    let n = if n_f.is_finite() && n_f >= 0.0 {
        let n_f = n_f.min(10_000.0);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "guarded by finite/non-negative checks and capped at 10k"
        )]
        {
            n_f as u64
        }
    } else {
        0
    };
    // Multiply integer indices by the step so ticks land on exact multiples.
    (0..=n).map(|i| (start + i as f64) * step).collect()
}

fn nice_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    let base = 10_f64.powf(power);
    let error = step / base;
    let nice = if error >= 7.5 {
        10.0
    } else if error >= 3.5 {
        5.0
    } else if error >= 1.5 {
        2.0
    } else {
        1.0
    };
    nice * base
}
