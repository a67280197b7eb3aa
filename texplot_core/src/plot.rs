// Copyright 2025 the texplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The single-panel plot accumulator.
//!
//! A [`Plot`] only collects data and options. Every append validates its input
//! right away; derived quantities (limits, ticks, prepared shapes) are computed
//! later by the [`ContextBuilder`](crate::ContextBuilder).

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;
use serde::Serialize;

use crate::annotation::{Label, Pin, PinSpec, ReferenceLine, point_along};
use crate::error::{PlotError, PlotResult, check_len};
use crate::histogram::Histogram2D;
use crate::region::ShadedRegion;
use crate::scale::{AxisMode, axis_modes, log_ticks};
use crate::scale_bar::ScaleBar;
use crate::series::{PlotSeries, SeriesStyle, histogram_steps, interpolate};
use crate::table::Table;

/// Pin location used by [`Plot::add_pin`] when none is given.
const SERIES_PIN_LOCATION: &str = "left";
/// Pin location used by [`Plot::add_pin_at_xy`] and [`Plot::add_pin_along`].
const POINT_PIN_LOCATION: &str = "above right";
/// Relative position used by [`Plot::add_pin_along`] when none is given.
const ALONG_PIN_POSITION: f64 = 0.9;

/// Which template family renders a figure.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlotKind {
    /// A single cartesian axis.
    #[default]
    Cartesian,
    /// A single polar axis.
    Polar,
    /// A grid of cartesian panels.
    Grid,
}

/// Explicit bounds for one axis; `None` bounds are derived from the data.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AxisLimits {
    /// Lower bound.
    pub min: Option<f64>,
    /// Upper bound.
    pub max: Option<f64>,
}

impl AxisLimits {
    /// Both bounds optional.
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    /// Bound-wise fallback to `other`.
    pub fn or(self, other: Self) -> Self {
        Self {
            min: self.min.or(other.min),
            max: self.max.or(other.max),
        }
    }

    /// Both bounds, if both are set.
    pub fn both(self) -> Option<(f64, f64)> {
        self.min.zip(self.max)
    }
}

/// A color bar for the color meta of scatter tables.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Colorbar {
    /// Axis label of the bar.
    pub label: String,
    /// Lay the bar out horizontally.
    pub horizontal: bool,
}

/// A single plot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Plot {
    pub(crate) kind: PlotKind,
    pub(crate) xmode: AxisMode,
    pub(crate) ymode: AxisMode,
    pub(crate) width: Option<String>,
    pub(crate) height: Option<String>,
    pub(crate) title: Option<String>,
    pub(crate) xlabel: Option<String>,
    pub(crate) ylabel: Option<String>,
    pub(crate) series: Vec<PlotSeries>,
    pub(crate) regions: Vec<ShadedRegion>,
    pub(crate) histograms: Vec<Histogram2D>,
    pub(crate) horizontal_lines: Vec<ReferenceLine>,
    pub(crate) vertical_lines: Vec<ReferenceLine>,
    pub(crate) pins: Vec<Pin>,
    pub(crate) label: Option<Label>,
    pub(crate) tables: Vec<Table>,
    pub(crate) scalebar: Option<ScaleBar>,
    pub(crate) xlimits: AxisLimits,
    pub(crate) ylimits: AxisLimits,
    pub(crate) mlimits: AxisLimits,
    pub(crate) slimits: Option<(f64, f64)>,
    pub(crate) xticks: Option<Vec<f64>>,
    pub(crate) yticks: Option<Vec<f64>>,
    pub(crate) xtick_labels: Option<Vec<String>>,
    pub(crate) ytick_labels: Option<Vec<String>>,
    pub(crate) axis_equal: bool,
    pub(crate) colormap: Option<String>,
    pub(crate) colorbar: Option<Colorbar>,
    pub(crate) axis_options: Option<String>,
}

impl Plot {
    /// An empty cartesian plot with linear axes.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty polar plot; x is the angle in degrees.
    pub fn polar() -> Self {
        Self {
            kind: PlotKind::Polar,
            ..Self::default()
        }
    }

    /// Sets the axis modes from the classic shorthand (`loglog`, `semilogx`,
    /// `semilogy`; anything else is linear).
    pub fn with_axis(mut self, shorthand: &str) -> Self {
        (self.xmode, self.ymode) = axis_modes(shorthand);
        self
    }

    /// Sets both axis modes.
    pub fn with_modes(mut self, xmode: AxisMode, ymode: AxisMode) -> Self {
        self.xmode = xmode;
        self.ymode = ymode;
        self
    }

    /// Overrides the width (a TeX length such as `.5\linewidth`).
    pub fn with_width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self
    }

    /// Overrides the height.
    pub fn with_height(mut self, height: impl Into<String>) -> Self {
        self.height = Some(height.into());
        self
    }

    /// The template family.
    pub fn kind(&self) -> PlotKind {
        self.kind
    }

    /// The x axis mode.
    pub fn xmode(&self) -> AxisMode {
        self.xmode
    }

    /// The y axis mode.
    pub fn ymode(&self) -> AxisMode {
        self.ymode
    }

    /// Number of data series, including hollow-mark backgrounds.
    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    /// Plots `y` against `x` as a solid line.
    pub fn plot(&mut self, x: impl Into<Vec<f64>>, y: impl Into<Vec<f64>>) -> PlotResult<()> {
        self.plot_series(PlotSeries::new(x, y))
    }

    /// Plots `y` against `x` with a style.
    pub fn plot_styled(
        &mut self,
        x: impl Into<Vec<f64>>,
        y: impl Into<Vec<f64>>,
        style: &SeriesStyle,
    ) -> PlotResult<()> {
        self.plot_series(PlotSeries::new(x, y).with_style(style))
    }

    /// Adds a fully specified series.
    ///
    /// A series with a background request also gets a copy with those options
    /// inserted before every other series, so it is drawn first.
    pub fn plot_series(&mut self, series: PlotSeries) -> PlotResult<()> {
        series.prepare()?;
        if let Some(background) = &series.background {
            let copy = PlotSeries::new(series.x.clone(), series.y.clone())
                .with_options(background.clone());
            self.series.insert(0, copy);
        }
        self.series.push(series);
        Ok(())
    }

    /// Plots a precomputed 1D histogram as a step line.
    ///
    /// `edges` must have one more value than `counts`.
    pub fn histogram(&mut self, counts: &[f64], edges: &[f64], linestyle: &str) -> PlotResult<()> {
        let (x, y) = histogram_steps(counts, edges)?;
        let style = SeriesStyle::default()
            .with_linestyle(linestyle)
            .with_steps();
        self.plot_styled(x, y, &style)
    }

    /// Adds a precomputed 2D histogram and sets the limits to its edges.
    pub fn histogram2d(&mut self, histogram: Histogram2D) -> PlotResult<()> {
        histogram.validate()?;
        let (x0, x1) = histogram.x_extent();
        let (y0, y1) = histogram.y_extent();
        self.set_xlimits(Some(x0), Some(x1));
        self.set_ylimits(Some(y0), Some(y1));
        self.histograms.push(histogram);
        Ok(())
    }

    /// Shades the band between `lower` and `upper` (default fill `lightgray`).
    pub fn shade_region(
        &mut self,
        x: impl Into<Vec<f64>>,
        lower: impl Into<Vec<f64>>,
        upper: impl Into<Vec<f64>>,
        style: Option<&str>,
    ) -> PlotResult<()> {
        let mut region = ShadedRegion::band(x, lower, upper)?;
        if let Some(style) = style {
            region = region.with_style(style);
        }
        self.regions.push(region);
        Ok(())
    }

    /// Shades a polygon (default fill `lightgray`).
    pub fn shade_polygon(
        &mut self,
        points: impl IntoIterator<Item = impl Into<Point>>,
        style: Option<&str>,
    ) {
        let mut region = ShadedRegion::polygon(points);
        if let Some(style) = style {
            region = region.with_style(style);
        }
        self.regions.push(region);
    }

    /// Draws a horizontal line across the plot at `y`.
    pub fn draw_horizontal_line(&mut self, y: f64, style: Option<&str>) {
        let mut line = ReferenceLine::horizontal(y);
        if let Some(style) = style {
            line = line.with_style(style);
        }
        self.horizontal_lines.push(line);
    }

    /// Draws a vertical line across the plot at `x`.
    pub fn draw_vertical_line(&mut self, x: f64, style: Option<&str>) {
        let mut line = ReferenceLine::vertical(x);
        if let Some(style) = style {
            line = line.with_style(style);
        }
        self.vertical_lines.push(line);
    }

    /// Sets the title.
    pub fn set_title(&mut self, text: impl Into<String>) {
        self.title = Some(text.into());
    }

    /// Sets the x axis label.
    pub fn set_xlabel(&mut self, text: impl Into<String>) {
        self.xlabel = Some(text.into());
    }

    /// Sets the y axis label.
    pub fn set_ylabel(&mut self, text: impl Into<String>) {
        self.ylabel = Some(text.into());
    }

    /// Places a text label in a corner or the center of the axis box.
    ///
    /// `location` is one of `upper right`, `upper left`, `lower left`,
    /// `lower right` or `center`.
    pub fn set_label(
        &mut self,
        text: impl Into<String>,
        location: &str,
        style: Option<&str>,
    ) -> PlotResult<()> {
        let mut label = Label::new(text, location)?;
        if let Some(style) = style {
            label = label.with_style(style);
        }
        self.label = Some(label);
        Ok(())
    }

    /// Pins a label to the most recently plotted series.
    ///
    /// With `x` set, the anchor is interpolated on the series at that x. Otherwise
    /// it is picked by relative position along the series' x range (in log space
    /// on log x axes). The location defaults to `left`.
    pub fn add_pin(&mut self, spec: PinSpec) -> PlotResult<()> {
        let series = self.series.last().ok_or(PlotError::MissingSeries)?;
        let location = spec.location_or(SERIES_PIN_LOCATION);
        let (x, y) = match spec.x {
            Some(x) => {
                let y = interpolate(x, &series.x, &series.y).ok_or(PlotError::MissingSeries)?;
                (x, y)
            }
            None => {
                let relative = spec.relative_position_for(&location);
                point_along(&series.x, &series.y, relative, self.xmode)?
            }
        };
        self.pins.push(spec.into_pin(x, y, location));
        Ok(())
    }

    /// Pins a label at a data point. The location defaults to `above right`.
    pub fn add_pin_at_xy(&mut self, x: f64, y: f64, spec: PinSpec) {
        let location = spec.location_or(POINT_PIN_LOCATION);
        self.pins.push(spec.into_pin(x, y, location));
    }

    /// Pins a label along arbitrary data, by relative position (default 0.9).
    pub fn add_pin_along(&mut self, xs: &[f64], ys: &[f64], spec: PinSpec) -> PlotResult<()> {
        check_len("y", xs.len(), ys.len())?;
        let location = spec.location_or(POINT_PIN_LOCATION);
        let relative = spec.relative_position.unwrap_or(ALONG_PIN_POSITION);
        let (x, y) = point_along(xs, ys, relative, self.xmode)?;
        self.pins.push(spec.into_pin(x, y, location));
        Ok(())
    }

    /// Sets x limits; `None` bounds are derived from the data.
    pub fn set_xlimits(&mut self, min: Option<f64>, max: Option<f64>) {
        self.xlimits = AxisLimits::new(min, max);
    }

    /// Sets y limits; `None` bounds are derived from the data.
    pub fn set_ylimits(&mut self, min: Option<f64>, max: Option<f64>) {
        self.ylimits = AxisLimits::new(min, max);
    }

    /// Sets the color meta limits of scatter tables.
    pub fn set_mlimits(&mut self, min: Option<f64>, max: Option<f64>) {
        self.mlimits = AxisLimits::new(min, max);
    }

    /// Sets the marker size range that table sizes are mapped onto.
    pub fn set_slimits(&mut self, min: f64, max: f64) {
        self.slimits = Some((min, max));
    }

    /// Sets x tick positions.
    pub fn set_xticks(&mut self, ticks: impl Into<Vec<f64>>) {
        self.xticks = Some(ticks.into());
    }

    /// Sets y tick positions.
    pub fn set_yticks(&mut self, ticks: impl Into<Vec<f64>>) {
        self.yticks = Some(ticks.into());
    }

    /// Sets x ticks at `10^e` for each exponent.
    pub fn set_logxticks(&mut self, exponents: &[i32]) {
        self.xticks = Some(log_ticks(exponents));
    }

    /// Sets y ticks at `10^e` for each exponent.
    pub fn set_logyticks(&mut self, exponents: &[i32]) {
        self.yticks = Some(log_ticks(exponents));
    }

    /// Sets the text of the x tick labels.
    pub fn set_xtick_labels(&mut self, labels: impl IntoIterator<Item = impl Into<String>>) {
        self.xtick_labels = Some(labels.into_iter().map(Into::into).collect());
    }

    /// Sets the text of the y tick labels.
    pub fn set_ytick_labels(&mut self, labels: impl IntoIterator<Item = impl Into<String>>) {
        self.ytick_labels = Some(labels.into_iter().map(Into::into).collect());
    }

    /// Scales the axes so unit vectors have equal length.
    pub fn set_axis_equal(&mut self) {
        self.axis_equal = true;
    }

    /// Adds a scatter table with color and size meta.
    pub fn scatter_table(&mut self, table: Table) {
        self.tables.push(table);
    }

    /// Shows a marker-size scale bar at `location`.
    pub fn set_scalebar(&mut self, location: &str) -> PlotResult<()> {
        self.scalebar = Some(ScaleBar::new(location)?);
        Ok(())
    }

    /// Sets the colormap name (`hot`, `cool`, `blackwhite`, ...).
    pub fn set_colormap(&mut self, name: impl Into<String>) {
        self.colormap = Some(name.into());
    }

    /// Shows a color bar.
    pub fn set_colorbar(&mut self, label: impl Into<String>, horizontal: bool) {
        self.colorbar = Some(Colorbar {
            label: label.into(),
            horizontal,
        });
    }

    /// Sets extra axis options, passed through verbatim.
    pub fn set_axis_options(&mut self, text: impl Into<String>) {
        self.axis_options = Some(text.into());
    }

    /// Sets the legend entry of the most recent series.
    pub fn set_legend(&mut self, text: impl Into<String>) -> PlotResult<()> {
        let series = self.series.last_mut().ok_or(PlotError::MissingSeries)?;
        series.legend = Some(text.into());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    #[test]
    fn hollow_marks_insert_background_first() {
        let mut plot = Plot::new();
        plot.plot([0.0, 1.0], [1.0, 2.0]).unwrap();
        plot.plot_styled([0.0, 1.0], [0.0, 1.0], &SeriesStyle::default().with_mark("o"))
            .unwrap();
        assert_eq!(plot.series_count(), 3);
        assert_eq!(plot.series[0].options, "mark=*,mark options=white,only marks");
        assert_eq!(plot.series[2].options, "mark=o,solid");
    }

    #[test]
    fn histogram_becomes_step_series() {
        let mut plot = Plot::new();
        plot.histogram(&[1.0, 2.0], &[0.0, 1.0, 2.0], "solid").unwrap();
        assert_eq!(plot.series[0].y, vec![1.0, 2.0, 2.0]);
        assert_eq!(plot.series[0].options, "no markers,solid,const plot");
        assert!(plot.histogram(&[1.0, 2.0], &[0.0, 1.0], "solid").is_err());
    }

    #[test]
    fn histogram2d_sets_limits_to_edges() {
        let mut plot = Plot::new();
        let hist = Histogram2D::new(vec![vec![1.0]], [-2.0, 3.0], [1.0, 4.0]).unwrap();
        plot.histogram2d(hist).unwrap();
        assert_eq!(plot.xlimits, AxisLimits::new(Some(-2.0), Some(3.0)));
        assert_eq!(plot.ylimits, AxisLimits::new(Some(1.0), Some(4.0)));
    }

    #[test]
    fn pin_needs_a_series() {
        let mut plot = Plot::new();
        assert_eq!(plot.add_pin(PinSpec::new("a")), Err(PlotError::MissingSeries));
        plot.plot([0.0, 10.0], [0.0, 100.0]).unwrap();
        plot.add_pin(PinSpec::new("a")).unwrap();
        plot.add_pin(PinSpec::new("b").with_location("right")).unwrap();
        plot.add_pin(PinSpec::new("c").at_x(2.5)).unwrap();
        plot.add_pin(PinSpec::new("d").with_location("above")).unwrap();
        let anchors: Vec<(f64, f64)> = plot.pins.iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(anchors, vec![(0.0, 0.0), (10.0, 100.0), (2.5, 25.0), (8.0, 80.0)]);
        assert_eq!(plot.pins[0].location, "left");
    }

    #[test]
    fn point_pins_default_above_right() {
        let mut plot = Plot::new();
        plot.add_pin_at_xy(1.0, 2.0, PinSpec::new("p"));
        plot.add_pin_along(&[0.0, 10.0], &[0.0, 10.0], PinSpec::new("q"))
            .unwrap();
        assert_eq!(plot.pins[0].location, "above right");
        assert_eq!((plot.pins[1].x, plot.pins[1].y), (9.0, 9.0));
    }

    #[test]
    fn log_ticks_and_bad_locations() {
        let mut plot = Plot::new().with_axis("semilogx");
        plot.set_logxticks(&[0, 1, 2]);
        assert_eq!(plot.xticks, Some(vec![1.0, 10.0, 100.0]));
        assert_eq!(plot.xmode(), AxisMode::Log);
        assert!(plot.set_label("x", "top", None).is_err());
        assert!(plot.set_scalebar("bottom").is_err());
        assert!(plot.set_label("x", "lower left", Some("red")).is_ok());
    }
}
