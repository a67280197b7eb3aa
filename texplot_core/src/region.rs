// Copyright 2025 the texplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shaded regions.
//!
//! A region is a closed polygon filled with a TikZ style. Bands between a lower
//! and an upper curve are closed by walking the lower curve forward and the upper
//! curve backward.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use kurbo::Point;
use serde::Serialize;

use crate::error::{PlotResult, check_len};

/// Fill style used when none is given.
const DEFAULT_FILL: &str = "lightgray";

/// Geometry of a shaded region.
#[derive(Clone, Debug, PartialEq)]
pub enum RegionShape {
    /// An explicit polygon, in axis coordinates.
    Polygon(Vec<Point>),
    /// The area between `lower` and `upper` over `x`.
    Band {
        /// X values.
        x: Vec<f64>,
        /// Lower bound per x.
        lower: Vec<f64>,
        /// Upper bound per x.
        upper: Vec<f64>,
    },
}

/// A filled region as accumulated by a plot.
#[derive(Clone, Debug, PartialEq)]
pub struct ShadedRegion {
    /// Region geometry.
    pub shape: RegionShape,
    /// Opaque TikZ fill style.
    pub style: String,
}

impl ShadedRegion {
    /// A polygon region.
    pub fn polygon(points: impl IntoIterator<Item = impl Into<Point>>) -> Self {
        Self {
            shape: RegionShape::Polygon(points.into_iter().map(Into::into).collect()),
            style: DEFAULT_FILL.to_string(),
        }
    }

    /// A band between two curves; all three columns must have equal length.
    pub fn band(
        x: impl Into<Vec<f64>>,
        lower: impl Into<Vec<f64>>,
        upper: impl Into<Vec<f64>>,
    ) -> PlotResult<Self> {
        let (x, lower, upper) = (x.into(), lower.into(), upper.into());
        check_len("lower", x.len(), lower.len())?;
        check_len("upper", x.len(), upper.len())?;
        Ok(Self {
            shape: RegionShape::Band { x, lower, upper },
            style: DEFAULT_FILL.to_string(),
        })
    }

    /// Sets the fill style.
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    /// Closes the region into a polygon.
    pub fn prepare(&self) -> PlotResult<PreparedRegion> {
        let points = match &self.shape {
            RegionShape::Polygon(points) => points.clone(),
            RegionShape::Band { x, lower, upper } => {
                check_len("lower", x.len(), lower.len())?;
                check_len("upper", x.len(), upper.len())?;
                let mut triples: Vec<(f64, f64, f64)> = x
                    .iter()
                    .zip(lower)
                    .zip(upper)
                    .map(|((&x, &lo), &hi)| (x, lo, hi))
                    .collect();
                triples.sort_by(|a, b| a.0.total_cmp(&b.0));
                triples
                    .iter()
                    .map(|&(x, lo, _)| Point::new(x, lo))
                    .chain(triples.iter().rev().map(|&(x, _, hi)| Point::new(x, hi)))
                    .collect()
            }
        };
        Ok(PreparedRegion {
            points,
            style: self.style.clone(),
        })
    }
}

/// A closed polygon ready to render.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PreparedRegion {
    /// Polygon vertices; the path is closed back to the first one.
    pub points: Vec<Point>,
    /// Fill style.
    pub style: String,
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;
    use crate::error::PlotError;

    #[test]
    fn band_walks_lower_forward_and_upper_back() {
        let region = ShadedRegion::band([2.0, 0.0, 1.0], [20.0, 0.0, 10.0], [21.0, 1.0, 11.0])
            .unwrap()
            .prepare()
            .unwrap();
        let ys: Vec<f64> = region.points.iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![0.0, 10.0, 20.0, 21.0, 11.0, 1.0]);
        assert_eq!(region.style, "lightgray");
    }

    #[test]
    fn equal_bounds_collapse_to_zero_area() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let y = [1.0, 4.0, 2.0, 5.0];
        let region = ShadedRegion::band(x, y, y).unwrap().prepare().unwrap();
        let n = x.len();
        assert_eq!(region.points.len(), 2 * n);
        for i in 0..n {
            assert_eq!(
                region.points[i],
                region.points[2 * n - 1 - i],
                "point {i} must coincide with its mirror"
            );
        }
    }

    #[test]
    fn polygon_keeps_its_points() {
        let region = ShadedRegion::polygon([(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)])
            .with_style("red!20")
            .prepare()
            .unwrap();
        assert_eq!(region.points[1], Point::new(1.0, 0.0));
        assert_eq!(region.style, "red!20");
    }

    #[test]
    fn band_lengths_must_match() {
        assert_eq!(
            ShadedRegion::band([0.0, 1.0], [0.0], [1.0, 2.0]),
            Err(PlotError::shape("lower", 2, 1))
        );
    }
}
