// Copyright 2025 the texplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Data series: normalization, styling and step histograms.
//!
//! A series is accumulated as raw columns (x, y and optional error inputs) and
//! normalized into one [`SeriesPoint`] per input point when the context is built.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use alloc::{format, vec};

use serde::Serialize;

use crate::error::{PlotError, PlotResult, check_len};

/// Marks drawn hollow, which need a filled white copy underneath to hide lines.
const HOLLOW_MARKS: [&str; 5] = ["o", "square", "triangle", "diamond", "pentagon"];

/// The error bar of a single point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ErrorBar {
    /// The same extent below and above the value.
    Symmetric(f64),
    /// Separate extents below and above the value.
    Asymmetric {
        /// Extent below the value.
        lower: f64,
        /// Extent above the value.
        upper: f64,
    },
}

impl ErrorBar {
    /// `(value - lower, value + upper)`.
    pub fn bounds(self, value: f64) -> (f64, f64) {
        match self {
            Self::Symmetric(e) => (value - e, value + e),
            Self::Asymmetric { lower, upper } => (value - lower, value + upper),
        }
    }
}

/// Error input for one axis of a series.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ErrorInput {
    /// No error bars.
    #[default]
    Absent,
    /// One symmetric error for every point.
    Scalar(f64),
    /// One symmetric error per point.
    PerPoint(Vec<f64>),
    /// One `(lower, upper)` pair per point.
    Pairs(Vec<(f64, f64)>),
}

impl ErrorInput {
    /// Returns `true` unless this is [`ErrorInput::Absent`].
    pub fn is_present(&self) -> bool {
        !matches!(self, Self::Absent)
    }

    /// Expands the input to one error bar per point.
    fn resolve(&self, what: &'static str, len: usize) -> PlotResult<Option<Vec<ErrorBar>>> {
        match self {
            Self::Absent => Ok(None),
            Self::Scalar(e) => Ok(Some(vec![ErrorBar::Symmetric(*e); len])),
            Self::PerPoint(errs) => {
                check_len(what, len, errs.len())?;
                Ok(Some(errs.iter().map(|e| ErrorBar::Symmetric(*e)).collect()))
            }
            Self::Pairs(pairs) => {
                check_len(what, len, pairs.len())?;
                Ok(Some(
                    pairs
                        .iter()
                        .map(|&(lower, upper)| ErrorBar::Asymmetric { lower, upper })
                        .collect(),
                ))
            }
        }
    }
}

impl From<f64> for ErrorInput {
    fn from(e: f64) -> Self {
        Self::Scalar(e)
    }
}

impl From<Vec<f64>> for ErrorInput {
    fn from(errs: Vec<f64>) -> Self {
        Self::PerPoint(errs)
    }
}

impl From<&[f64]> for ErrorInput {
    fn from(errs: &[f64]) -> Self {
        Self::PerPoint(errs.to_vec())
    }
}

impl From<Vec<(f64, f64)>> for ErrorInput {
    fn from(pairs: Vec<(f64, f64)>) -> Self {
        Self::Pairs(pairs)
    }
}

/// A normalized data point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SeriesPoint {
    /// X value.
    pub x: f64,
    /// Y value.
    pub y: f64,
    /// X error bar, if the series has one.
    pub xerr: Option<ErrorBar>,
    /// Y error bar, if the series has one.
    pub yerr: Option<ErrorBar>,
}

/// Order in which a series' points are emitted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointOrder {
    /// Keep the order the points were given in.
    #[default]
    Insertion,
    /// Stable sort by x.
    SortedByX,
}

/// Normalizes raw columns into one record per point.
///
/// `y` and every present error input must have the length of `x`.
pub fn normalize(
    x: &[f64],
    y: &[f64],
    xerr: &ErrorInput,
    yerr: &ErrorInput,
    order: PointOrder,
) -> PlotResult<Vec<SeriesPoint>> {
    check_len("y", x.len(), y.len())?;
    let xerr = xerr.resolve("xerr", x.len())?;
    let yerr = yerr.resolve("yerr", x.len())?;

    let mut points: Vec<SeriesPoint> = x
        .iter()
        .zip(y)
        .enumerate()
        .map(|(i, (&x, &y))| SeriesPoint {
            x,
            y,
            xerr: xerr.as_ref().map(|e| e[i]),
            yerr: yerr.as_ref().map(|e| e[i]),
        })
        .collect();

    if order == PointOrder::SortedByX {
        points.sort_by(|a, b| a.x.total_cmp(&b.x));
    }
    Ok(points)
}

/// Style of a plotted series, turned into a PGFPlots option list.
///
/// The default draws a solid line without markers.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesStyle {
    /// Plot mark (`*`, `x`, `+`, `o`, `square`, ...), or none.
    pub mark: Option<String>,
    /// Line style (`solid`, `dashed`, `red,thick`, ...), or none for marks only.
    pub linestyle: Option<String>,
    /// Draw as a step plot.
    pub use_steps: bool,
    /// Extra mark options (`mark size=.75pt`, ...).
    pub markstyle: Option<String>,
}

impl Default for SeriesStyle {
    fn default() -> Self {
        Self {
            mark: None,
            linestyle: Some("solid".to_string()),
            use_steps: false,
            markstyle: None,
        }
    }
}

impl SeriesStyle {
    /// Sets the plot mark.
    pub fn with_mark(mut self, mark: impl Into<String>) -> Self {
        self.mark = Some(mark.into());
        self
    }

    /// Sets the line style.
    pub fn with_linestyle(mut self, linestyle: impl Into<String>) -> Self {
        self.linestyle = Some(linestyle.into());
        self
    }

    /// Draws marks only, without connecting lines.
    pub fn without_line(mut self) -> Self {
        self.linestyle = None;
        self
    }

    /// Draws the series as a step plot.
    pub fn with_steps(mut self) -> Self {
        self.use_steps = true;
        self
    }

    /// Sets extra mark options.
    pub fn with_markstyle(mut self, markstyle: impl Into<String>) -> Self {
        self.markstyle = Some(markstyle.into());
        self
    }

    /// The comma-separated PGFPlots option list.
    pub fn options(&self) -> String {
        let mut options = Vec::new();
        options.push(match &self.mark {
            Some(mark) => format!("mark={mark}"),
            None => "no markers".to_string(),
        });
        options.push(match &self.linestyle {
            Some(linestyle) => linestyle.clone(),
            None => "only marks".to_string(),
        });
        if self.use_steps {
            options.push("const plot".to_string());
        }
        if let Some(markstyle) = &self.markstyle {
            options.push(format!("mark options={{{markstyle}}}"));
        }
        options.join(",")
    }

    /// Options of the white background copy drawn under hollow marks.
    pub fn background_options(&self) -> Option<String> {
        let mark = self.mark.as_deref()?;
        if !HOLLOW_MARKS.contains(&mark) {
            return None;
        }
        let filled = if mark == "o" { "" } else { mark };
        Some(format!("mark={filled}*,mark options=white,only marks"))
    }
}

/// A data series as accumulated by a plot.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotSeries {
    /// X values.
    pub x: Vec<f64>,
    /// Y values.
    pub y: Vec<f64>,
    /// X errors.
    pub xerr: ErrorInput,
    /// Y errors.
    pub yerr: ErrorInput,
    /// Opaque PGFPlots options.
    pub options: String,
    /// Legend entry.
    pub legend: Option<String>,
    /// Emission order.
    pub order: PointOrder,
    /// Options of a white copy drawn underneath, for hollow marks.
    pub background: Option<String>,
}

impl PlotSeries {
    /// Creates a series with the default style and no error bars.
    pub fn new(x: impl Into<Vec<f64>>, y: impl Into<Vec<f64>>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            xerr: ErrorInput::Absent,
            yerr: ErrorInput::Absent,
            options: SeriesStyle::default().options(),
            legend: None,
            order: PointOrder::Insertion,
            background: None,
        }
    }

    /// Sets the x errors.
    pub fn with_xerr(mut self, xerr: impl Into<ErrorInput>) -> Self {
        self.xerr = xerr.into();
        self
    }

    /// Sets the y errors.
    pub fn with_yerr(mut self, yerr: impl Into<ErrorInput>) -> Self {
        self.yerr = yerr.into();
        self
    }

    /// Sets the option string from a style.
    ///
    /// Hollow marks also request a white background copy of the series.
    pub fn with_style(mut self, style: &SeriesStyle) -> Self {
        self.options = style.options();
        self.background = style.background_options();
        self
    }

    /// Sets a raw option string.
    pub fn with_options(mut self, options: impl Into<String>) -> Self {
        self.options = options.into();
        self
    }

    /// Sets the legend entry.
    pub fn with_legend(mut self, legend: impl Into<String>) -> Self {
        self.legend = Some(legend.into());
        self
    }

    /// Sets the emission order.
    pub fn with_order(mut self, order: PointOrder) -> Self {
        self.order = order;
        self
    }

    /// Normalizes the series.
    pub fn prepare(&self) -> PlotResult<PreparedSeries> {
        Ok(PreparedSeries {
            options: self.options.clone(),
            legend: self.legend.clone(),
            show_xerr: self.xerr.is_present(),
            show_yerr: self.yerr.is_present(),
            points: normalize(&self.x, &self.y, &self.xerr, &self.yerr, self.order)?,
        })
    }
}

/// A series ready to render.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PreparedSeries {
    /// Opaque PGFPlots options.
    pub options: String,
    /// Legend entry.
    pub legend: Option<String>,
    /// Whether x error bars are drawn.
    pub show_xerr: bool,
    /// Whether y error bars are drawn.
    pub show_yerr: bool,
    /// Points in emission order.
    pub points: Vec<SeriesPoint>,
}

/// Turns a 1D histogram into step-plot columns.
///
/// Returns the edges as x and the counts, with the last count repeated so the
/// final bin gets its top edge, as y.
pub fn histogram_steps(counts: &[f64], edges: &[f64]) -> PlotResult<(Vec<f64>, Vec<f64>)> {
    let Some(&last) = counts.last() else {
        return Err(PlotError::InvalidHistogram("no counts"));
    };
    check_len("bin edges", counts.len() + 1, edges.len())?;
    let mut y = counts.to_vec();
    y.push(last);
    Ok((edges.to_vec(), y))
}

/// Piecewise-linear interpolation of `(xp, fp)` at `x`.
///
/// Values outside the sample range clamp to the end values. `xp` may be
/// ascending or descending. Returns `None` for empty or mismatched samples.
pub fn interpolate(x: f64, xp: &[f64], fp: &[f64]) -> Option<f64> {
    if xp.is_empty() || xp.len() != fp.len() {
        return None;
    }
    let descending = xp.len() > 1 && xp[0] > xp[xp.len() - 1];
    let at = |i: usize| {
        if descending {
            let j = xp.len() - 1 - i;
            (xp[j], fp[j])
        } else {
            (xp[i], fp[i])
        }
    };

    let n = xp.len();
    let (x_first, y_first) = at(0);
    let (x_last, y_last) = at(n - 1);
    if x <= x_first {
        return Some(y_first);
    }
    if x >= x_last {
        return Some(y_last);
    }
    for i in 0..n - 1 {
        let (x0, y0) = at(i);
        let (x1, y1) = at(i + 1);
        if x >= x0 && x < x1 {
            let dx = x1 - x0;
            if dx == 0.0 {
                return Some(y1);
            }
            return Some(y0 + (x - x0) / dx * (y1 - y0));
        }
    }
    Some(y_last)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn normalize_preserves_length_and_order() {
        let x = [3.0, 1.0, 2.0];
        let y = [30.0, 10.0, 20.0];
        let pts = normalize(
            &x,
            &y,
            &ErrorInput::Absent,
            &ErrorInput::Absent,
            PointOrder::Insertion,
        )
        .unwrap();
        assert_eq!(pts.len(), 3);
        let xs: Vec<f64> = pts.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![3.0, 1.0, 2.0]);
        assert!(pts.iter().all(|p| p.xerr.is_none() && p.yerr.is_none()));
    }

    #[test]
    fn sorted_order_is_stable() {
        let x = [2.0, 1.0, 2.0];
        let y = [1.0, 2.0, 3.0];
        let pts = normalize(
            &x,
            &y,
            &ErrorInput::Absent,
            &ErrorInput::Absent,
            PointOrder::SortedByX,
        )
        .unwrap();
        let ys: Vec<f64> = pts.iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![2.0, 1.0, 3.0]);
    }

    #[test]
    fn errors_are_broadcast_or_checked() {
        let x = [0.0, 1.0];
        let y = [0.0, 1.0];
        let pts = normalize(
            &x,
            &y,
            &ErrorInput::Scalar(0.5),
            &ErrorInput::Pairs(vec![(0.1, 0.2), (0.3, 0.4)]),
            PointOrder::Insertion,
        )
        .unwrap();
        assert_eq!(pts[1].xerr, Some(ErrorBar::Symmetric(0.5)));
        assert_eq!(
            pts[1].yerr,
            Some(ErrorBar::Asymmetric {
                lower: 0.3,
                upper: 0.4
            })
        );

        let err = normalize(
            &x,
            &y,
            &ErrorInput::PerPoint(vec![1.0]),
            &ErrorInput::Absent,
            PointOrder::Insertion,
        );
        assert_eq!(err, Err(PlotError::shape("xerr", 2, 1)));
        let err = normalize(
            &x,
            &[1.0],
            &ErrorInput::Absent,
            &ErrorInput::Absent,
            PointOrder::Insertion,
        );
        assert_eq!(err, Err(PlotError::shape("y", 2, 1)));
    }

    #[test]
    fn style_options_follow_mark_and_line() {
        assert_eq!(SeriesStyle::default().options(), "no markers,solid");
        let style = SeriesStyle::default()
            .with_mark("*")
            .without_line()
            .with_steps()
            .with_markstyle("mark size=.75pt");
        assert_eq!(
            style.options(),
            "mark=*,only marks,const plot,mark options={mark size=.75pt}"
        );
    }

    #[test]
    fn hollow_marks_get_a_white_background() {
        let o = SeriesStyle::default().with_mark("o");
        assert_eq!(
            o.background_options().as_deref(),
            Some("mark=*,mark options=white,only marks")
        );
        let sq = SeriesStyle::default().with_mark("square");
        assert_eq!(
            sq.background_options().as_deref(),
            Some("mark=square*,mark options=white,only marks")
        );
        assert_eq!(SeriesStyle::default().with_mark("*").background_options(), None);
        assert_eq!(SeriesStyle::default().background_options(), None);
    }

    #[test]
    fn histogram_steps_repeat_last_count() {
        let (x, y) = histogram_steps(&[1.0, 3.0], &[0.0, 1.0, 2.0]).unwrap();
        assert_eq!(x, vec![0.0, 1.0, 2.0]);
        assert_eq!(y, vec![1.0, 3.0, 3.0]);
        assert_eq!(
            histogram_steps(&[1.0, 3.0], &[0.0, 1.0]),
            Err(PlotError::shape("bin edges", 3, 2))
        );
        assert!(matches!(
            histogram_steps(&[], &[0.0]),
            Err(PlotError::InvalidHistogram(_))
        ));
    }

    #[test]
    fn interpolation_clamps_and_handles_descending_samples() {
        let xp = [0.0, 1.0, 2.0];
        let fp = [0.0, 10.0, 30.0];
        assert_eq!(interpolate(0.5, &xp, &fp), Some(5.0));
        assert_eq!(interpolate(1.5, &xp, &fp), Some(20.0));
        assert_eq!(interpolate(-1.0, &xp, &fp), Some(0.0));
        assert_eq!(interpolate(9.0, &xp, &fp), Some(30.0));

        let xp = [2.0, 1.0, 0.0];
        let fp = [30.0, 10.0, 0.0];
        assert_eq!(interpolate(0.5, &xp, &fp), Some(5.0));
        assert_eq!(interpolate(0.5, &[], &[]), None);
    }
}
