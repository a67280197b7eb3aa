// Copyright 2025 the texplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scatter tables with per-point color and size meta.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use serde::Serialize;

use crate::error::{PlotResult, check_len};
use crate::scale::{ScaleLinear, infer_extent};

/// Linearly maps `value` from `domain` onto `target`.
///
/// A degenerate domain maps every value to the start of the target.
pub fn rescale(value: f64, domain: (f64, f64), target: (f64, f64)) -> f64 {
    ScaleLinear::new(domain, target).map(value)
}

/// A scatter table: points with a color value and a size value each.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    /// X values.
    pub x: Vec<f64>,
    /// Y values.
    pub y: Vec<f64>,
    /// Color meta values, mapped through the colormap.
    pub color: Vec<f64>,
    /// Size meta values, mapped onto the size target range.
    pub size: Vec<f64>,
    /// Plot mark.
    pub mark: String,
    /// Opaque extra options.
    pub style: Option<String>,
}

impl Table {
    /// Creates a table; all four columns must have equal length.
    pub fn new(
        x: impl Into<Vec<f64>>,
        y: impl Into<Vec<f64>>,
        color: impl Into<Vec<f64>>,
        size: impl Into<Vec<f64>>,
    ) -> PlotResult<Self> {
        let table = Self {
            x: x.into(),
            y: y.into(),
            color: color.into(),
            size: size.into(),
            mark: "*".to_string(),
            style: None,
        };
        table.validate()?;
        Ok(table)
    }

    /// Sets the plot mark.
    pub fn with_mark(mut self, mark: impl Into<String>) -> Self {
        self.mark = mark.into();
        self
    }

    /// Sets extra options.
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    fn validate(&self) -> PlotResult<()> {
        check_len("y", self.x.len(), self.y.len())?;
        check_len("color", self.x.len(), self.color.len())?;
        check_len("size", self.x.len(), self.size.len())
    }

    /// Observed `(min, max)` of the color column.
    pub fn color_extent(&self) -> Option<(f64, f64)> {
        infer_extent(self.color.iter().copied())
    }

    /// Observed `(min, max)` of the size column.
    pub fn size_extent(&self) -> Option<(f64, f64)> {
        infer_extent(self.size.iter().copied())
    }

    /// Produces the render record.
    ///
    /// With a `size_target`, sizes are rescaled from `size_domain` onto it;
    /// otherwise they pass through. Colors always pass through.
    pub fn prepare(
        &self,
        size_domain: Option<(f64, f64)>,
        size_target: Option<(f64, f64)>,
    ) -> PlotResult<PreparedTable> {
        self.validate()?;
        let scale = size_domain.zip(size_target);
        let points = (0..self.x.len())
            .map(|i| {
                let size = self.size[i];
                TablePoint {
                    x: self.x[i],
                    y: self.y[i],
                    color: self.color[i],
                    size: match scale {
                        Some((domain, target)) => rescale(size, domain, target),
                        None => size,
                    },
                }
            })
            .collect();
        Ok(PreparedTable {
            mark: self.mark.clone(),
            style: self.style.clone(),
            points,
        })
    }
}

/// One scatter point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TablePoint {
    /// X value.
    pub x: f64,
    /// Y value.
    pub y: f64,
    /// Color meta.
    pub color: f64,
    /// Marker size.
    pub size: f64,
}

/// A scatter table ready to render.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PreparedTable {
    /// Plot mark.
    pub mark: String,
    /// Extra options.
    pub style: Option<String>,
    /// Points.
    pub points: Vec<TablePoint>,
}
