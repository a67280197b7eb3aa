// Copyright 2025 the texplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! 2D histogram preparation.
//!
//! Bins are emitted as axis-aligned rectangles between their edges. For the
//! grayscale kinds each bin carries a weight in `0..=100`, used as the ink density
//! of its fill (`black!<weight>`): 0 is white, 100 is solid black.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::str::FromStr;

use kurbo::{Point, Rect};
use serde::Serialize;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::error::{PlotError, PlotResult, check_len};

/// How bins are drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HistogramKind {
    /// Filled squares, darker for higher counts.
    ///
    /// The largest count is solid black and the smallest is white (not drawn).
    /// Use [`HistogramKind::ReverseBw`] for black at the minimum.
    #[default]
    Bw,
    /// Filled squares, lighter for higher counts.
    ReverseBw,
    /// Squares whose area is proportional to the count.
    Area,
}

impl FromStr for HistogramKind {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bw" => Ok(Self::Bw),
            "reverse_bw" => Ok(Self::ReverseBw),
            "area" => Ok(Self::Area),
            _ => Err(PlotError::InvalidHistogram("unsupported histogram kind")),
        }
    }
}

/// How a count is turned into a shade weight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HistogramWeighting {
    /// `100 * (count - min) / (max - min)`.
    #[default]
    MinMax,
    /// `100 * count / max`, ignoring the minimum.
    CountOverMax,
}

/// A 2D histogram as accumulated by a plot.
///
/// `counts[i][j]` is the count of x bin `i` and y bin `j`.
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram2D {
    /// Counts per `[x bin][y bin]`.
    pub counts: Vec<Vec<f64>>,
    /// X bin edges (one more than the number of x bins).
    pub x_edges: Vec<f64>,
    /// Y bin edges (one more than the number of y bins).
    pub y_edges: Vec<f64>,
    /// How bins are drawn.
    pub kind: HistogramKind,
    /// Opaque TikZ style applied to every bin.
    pub style: Option<String>,
    /// Fill style of a rectangle covering the whole histogram, drawn first.
    pub background: Option<String>,
    /// Count to weight rule.
    pub weighting: HistogramWeighting,
}

impl Histogram2D {
    /// Creates a validated histogram.
    pub fn new(
        counts: Vec<Vec<f64>>,
        x_edges: impl Into<Vec<f64>>,
        y_edges: impl Into<Vec<f64>>,
    ) -> PlotResult<Self> {
        let hist = Self {
            counts,
            x_edges: x_edges.into(),
            y_edges: y_edges.into(),
            kind: HistogramKind::default(),
            style: None,
            background: None,
            weighting: HistogramWeighting::default(),
        };
        hist.validate()?;
        Ok(hist)
    }

    /// Sets the histogram kind.
    pub fn with_kind(mut self, kind: HistogramKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the bin style.
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// Sets a background fill style.
    pub fn with_background(mut self, style: impl Into<String>) -> Self {
        self.background = Some(style.into());
        self
    }

    /// Sets the weighting rule.
    pub fn with_weighting(mut self, weighting: HistogramWeighting) -> Self {
        self.weighting = weighting;
        self
    }

    /// Checks edge counts, the counts matrix shape and the count values.
    pub fn validate(&self) -> PlotResult<()> {
        if self.x_edges.len() < 2 {
            return Err(PlotError::InvalidHistogram("x needs at least two edges"));
        }
        if self.y_edges.len() < 2 {
            return Err(PlotError::InvalidHistogram("y needs at least two edges"));
        }
        check_len("histogram x bins", self.x_edges.len() - 1, self.counts.len())?;
        for row in &self.counts {
            check_len("histogram y bins", self.y_edges.len() - 1, row.len())?;
        }
        if self.counts.iter().flatten().any(|c| !c.is_finite() || *c < 0.0) {
            return Err(PlotError::InvalidHistogram(
                "counts must be finite and non-negative",
            ));
        }
        Ok(())
    }

    /// `(min, max)` of the x edges.
    pub fn x_extent(&self) -> (f64, f64) {
        edge_extent(&self.x_edges)
    }

    /// `(min, max)` of the y edges.
    pub fn y_extent(&self) -> (f64, f64) {
        edge_extent(&self.y_edges)
    }

    fn count_range(&self) -> (f64, f64) {
        self.counts
            .iter()
            .flatten()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &c| {
                (lo.min(c), hi.max(c))
            })
    }

    /// Shade weight of every bin, indexed like `counts`.
    pub fn weights(&self) -> Vec<Vec<u8>> {
        let range = self.count_range();
        self.counts
            .iter()
            .map(|row| row.iter().map(|&c| self.weight(c, range)).collect())
            .collect()
    }

    fn weight(&self, count: f64, (min, max): (f64, f64)) -> u8 {
        let raw = match self.weighting {
            HistogramWeighting::MinMax => {
                let span = max - min;
                if span > 0.0 {
                    100.0 * (count - min) / span
                } else if min > 0.0 {
                    100.0
                } else {
                    0.0
                }
            }
            HistogramWeighting::CountOverMax => {
                if max > 0.0 {
                    100.0 * count / max
                } else {
                    0.0
                }
            }
        };
        let w = percent(raw);
        match self.kind {
            HistogramKind::ReverseBw => 100 - w,
            HistogramKind::Bw | HistogramKind::Area => w,
        }
    }

    /// Emits the background and the visible bins.
    pub fn prepare(&self) -> PlotResult<PreparedHistogram> {
        self.validate()?;
        let range = self.count_range();
        let (_, max) = range;

        let background = self.background.as_ref().map(|style| {
            let (x0, x1) = self.x_extent();
            let (y0, y1) = self.y_extent();
            PreparedBackground {
                rect: Rect::new(x0, y0, x1, y1),
                style: style.clone(),
            }
        });

        let mut bins = Vec::new();
        for (i, row) in self.counts.iter().enumerate() {
            for (j, &count) in row.iter().enumerate() {
                let cell = Rect::new(
                    self.x_edges[i],
                    self.y_edges[j],
                    self.x_edges[i + 1],
                    self.y_edges[j + 1],
                );
                let weight = self.weight(count, range);
                let rect = match self.kind {
                    HistogramKind::Bw | HistogramKind::ReverseBw => {
                        if weight == 0 {
                            continue;
                        }
                        cell
                    }
                    HistogramKind::Area => {
                        if count <= 0.0 {
                            continue;
                        }
                        // Scale the area, so each side shrinks by the square root.
                        let side = (count / max).sqrt();
                        let center: Point = cell.center();
                        Rect::from_center_size(center, (cell.width() * side, cell.height() * side))
                    }
                };
                bins.push(PreparedBin {
                    rect,
                    count,
                    weight,
                });
            }
        }

        Ok(PreparedHistogram {
            kind: self.kind,
            style: self.style.clone(),
            background,
            bins,
        })
    }
}

fn edge_extent(edges: &[f64]) -> (f64, f64) {
    edges
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &e| {
            (lo.min(e), hi.max(e))
        })
}

fn percent(raw: f64) -> u8 {
    let w = raw.round().clamp(0.0, 100.0);
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "clamped to 0..=100"
    )]
    {
        w as u8
    }
}

/// One emitted bin.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PreparedBin {
    /// Rectangle in axis coordinates.
    pub rect: Rect,
    /// The bin count.
    pub count: f64,
    /// Shade weight in `0..=100`.
    pub weight: u8,
}

/// The full-extent rectangle drawn under a histogram.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PreparedBackground {
    /// Rectangle spanning all edges.
    pub rect: Rect,
    /// Fill style.
    pub style: String,
}

/// A histogram ready to render.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PreparedHistogram {
    /// How bins are drawn.
    pub kind: HistogramKind,
    /// Opaque TikZ style applied to every bin.
    pub style: Option<String>,
    /// Background drawn before any bin.
    pub background: Option<PreparedBackground>,
    /// Visible bins, x bin major.
    pub bins: Vec<PreparedBin>,
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    #[test]
    fn single_bin_gets_full_weight() {
        let h = Histogram2D::new(vec![vec![5.0]], [0.0, 1.0], [0.0, 1.0]).unwrap();
        let p = h.prepare().unwrap();
        assert_eq!(p.bins.len(), 1);
        assert_eq!(p.bins[0].weight, 100);
        assert_eq!(p.bins[0].rect, Rect::new(0.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn all_zero_counts_emit_nothing() {
        let h = Histogram2D::new(
            vec![vec![0.0, 0.0], vec![0.0, 0.0]],
            [0.0, 1.0, 2.0],
            [0.0, 1.0, 2.0],
        )
        .unwrap();
        assert_eq!(h.weights(), vec![vec![0, 0], vec![0, 0]]);
        assert!(h.prepare().unwrap().bins.is_empty());
    }

    #[test]
    fn min_max_weights_span_the_full_range() {
        let h = Histogram2D::new(vec![vec![2.0, 4.0, 6.0]], [0.0, 1.0], [0.0, 1.0, 2.0, 3.0])
            .unwrap();
        assert_eq!(h.weights(), vec![vec![0, 50, 100]]);
        let p = h.prepare().unwrap();
        assert_eq!(p.bins.len(), 2, "the minimum bin has weight 0 and is skipped");
        assert_eq!(p.bins[0].rect, Rect::new(0.0, 1.0, 1.0, 2.0));

        let r = h.clone().with_kind(HistogramKind::ReverseBw);
        assert_eq!(r.weights(), vec![vec![100, 50, 0]]);
    }

    #[test]
    fn uniform_positive_counts_are_all_full_weight() {
        let h = Histogram2D::new(
            vec![vec![3.0, 3.0], vec![3.0, 3.0]],
            [0.0, 1.0, 2.0],
            [0.0, 1.0, 2.0],
        )
        .unwrap();
        assert_eq!(h.weights(), vec![vec![100, 100], vec![100, 100]]);
        let p = h.prepare().unwrap();
        assert_eq!(p.bins.len(), 4);
        assert!(p.bins.iter().all(|b| b.weight == 100));
    }

    #[test]
    fn legacy_weighting_diverges_when_min_is_positive() {
        let h = Histogram2D::new(vec![vec![2.0, 4.0]], [0.0, 1.0], [0.0, 1.0, 2.0]).unwrap();
        assert_eq!(h.weights(), vec![vec![0, 100]]);
        let legacy = h.with_weighting(HistogramWeighting::CountOverMax);
        assert_eq!(legacy.weights(), vec![vec![50, 100]]);
    }

    #[test]
    fn area_bins_scale_around_the_center() {
        let h = Histogram2D::new(vec![vec![1.0, 4.0, 0.0]], [0.0, 2.0], [0.0, 2.0, 4.0, 6.0])
            .unwrap()
            .with_kind(HistogramKind::Area);
        let p = h.prepare().unwrap();
        assert_eq!(p.bins.len(), 2, "zero counts are not drawn");
        assert_eq!(p.bins[0].rect, Rect::new(0.5, 0.5, 1.5, 1.5));
        assert_eq!(p.bins[1].rect, Rect::new(0.0, 2.0, 2.0, 4.0));
    }

    #[test]
    fn background_precedes_bins() {
        let h = Histogram2D::new(vec![vec![1.0]], [-1.0, 3.0], [2.0, 5.0])
            .unwrap()
            .with_background("gray!10");
        let p = h.prepare().unwrap();
        let bg = p.background.unwrap();
        assert_eq!(bg.rect, Rect::new(-1.0, 2.0, 3.0, 5.0));
        assert_eq!(bg.style, "gray!10");
    }

    #[test]
    fn shape_and_values_are_validated() {
        assert_eq!(
            Histogram2D::new(vec![vec![1.0]], [0.0, 1.0, 2.0], [0.0, 1.0]),
            Err(PlotError::shape("histogram x bins", 2, 1))
        );
        assert_eq!(
            Histogram2D::new(vec![vec![1.0, 2.0]], [0.0, 1.0], [0.0, 1.0]),
            Err(PlotError::shape("histogram y bins", 1, 2))
        );
        assert!(matches!(
            Histogram2D::new(vec![vec![-1.0]], [0.0, 1.0], [0.0, 1.0]),
            Err(PlotError::InvalidHistogram(_))
        ));
        assert!(matches!(
            Histogram2D::new(vec![], [0.0], [0.0, 1.0]),
            Err(PlotError::InvalidHistogram(_))
        ));
        assert_eq!("reverse_bw".parse::<HistogramKind>(), Ok(HistogramKind::ReverseBw));
        assert!("heat".parse::<HistogramKind>().is_err());
    }
}
