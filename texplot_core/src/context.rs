// Copyright 2025 the texplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render context construction.
//!
//! The [`ContextBuilder`] turns an accumulated [`Plot`] or [`GridPlot`] into a
//! [`RenderContext`]: every element is run through its preparer, and axis limits,
//! ticks and panel tick-label sides are resolved. Building is pure: the figure is
//! only read, and building twice yields equal contexts.
//!
//! Contexts serialize with serde, so templates outside this workspace can consume
//! them as plain string-keyed data.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::annotation::{PreparedLabel, PreparedLine, PreparedPin};
use crate::error::PlotResult;
use crate::grid::{GridPlot, TickVisibility};
use crate::histogram::PreparedHistogram;
use crate::plot::{AxisLimits, Colorbar, Plot, PlotKind};
use crate::region::PreparedRegion;
use crate::scale::{Axis, AxisMode, Ticks, infer_extent, resolve_limits, resolve_ticks};
use crate::scale_bar::PreparedScaleBar;
use crate::series::PreparedSeries;
use crate::table::PreparedTable;

/// Defaults applied while building contexts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Figure width, a TeX length.
    pub width: String,
    /// Figure height, a TeX length; `None` lets PGFPlots pick.
    pub height: Option<String>,
    /// Fraction of the data span added on both sides of automatic limits.
    pub padding: f64,
    /// Angle limits of polar plots without explicit x limits.
    pub polar_xlimits: (f64, f64),
    /// Angle ticks of polar plots without explicit x ticks.
    pub polar_xticks: Vec<f64>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            width: r".67\linewidth".to_string(),
            height: None,
            padding: 0.05,
            polar_xlimits: (0.0, 360.0),
            polar_xticks: alloc::vec![0.0, 60.0, 120.0, 180.0, 240.0, 300.0],
        }
    }
}

/// Resolved axis limits.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ResolvedLimits {
    /// Lower x bound.
    pub xmin: f64,
    /// Upper x bound.
    pub xmax: f64,
    /// Lower y bound.
    pub ymin: f64,
    /// Upper y bound.
    pub ymax: f64,
}

/// Resolved ticks and optional tick label text.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResolvedTicks {
    /// X tick positions.
    pub x: Ticks,
    /// Y tick positions.
    pub y: Ticks,
    /// X tick label text, one per tick.
    pub x_labels: Option<Vec<String>>,
    /// Y tick label text, one per tick.
    pub y_labels: Option<Vec<String>>,
}

/// Everything needed to render one axis.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlotContext {
    /// Template family.
    pub kind: PlotKind,
    /// Title.
    pub title: Option<String>,
    /// X axis label.
    pub xlabel: Option<String>,
    /// Y axis label.
    pub ylabel: Option<String>,
    /// X axis mode.
    pub xmode: AxisMode,
    /// Y axis mode.
    pub ymode: AxisMode,
    /// Width.
    pub width: String,
    /// Height.
    pub height: Option<String>,
    /// Axis limits.
    pub limits: ResolvedLimits,
    /// Axis ticks.
    pub ticks: ResolvedTicks,
    /// Equal unit vectors.
    pub axis_equal: bool,
    /// Series in drawing order.
    pub series: Vec<PreparedSeries>,
    /// Shaded regions in drawing order.
    pub regions: Vec<PreparedRegion>,
    /// 2D histograms in drawing order.
    pub histograms: Vec<PreparedHistogram>,
    /// Horizontal reference lines.
    pub horizontal_lines: Vec<PreparedLine>,
    /// Vertical reference lines.
    pub vertical_lines: Vec<PreparedLine>,
    /// Pins.
    pub pins: Vec<PreparedPin>,
    /// Corner label.
    pub label: Option<PreparedLabel>,
    /// Scatter tables.
    pub tables: Vec<PreparedTable>,
    /// Color meta limits of the tables.
    pub meta_limits: Option<(f64, f64)>,
    /// Marker size scale bar.
    pub scalebar: Option<PreparedScaleBar>,
    /// Colormap name.
    pub colormap: Option<String>,
    /// Color bar.
    pub colorbar: Option<Colorbar>,
    /// Extra axis options.
    pub axis_options: Option<String>,
}

/// One cell of a grid.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PanelContext {
    /// Row, from the top.
    pub row: usize,
    /// Column, from the left.
    pub column: usize,
    /// Nothing is drawn in this cell.
    pub empty: bool,
    /// Sides with tick labels.
    pub tick_labels: TickVisibility,
    /// The panel's axis; `None` for empty panels.
    pub axis: Option<PlotContext>,
}

/// Everything needed to render a grid.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GridContext {
    /// Always [`PlotKind::Grid`].
    pub kind: PlotKind,
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub columns: usize,
    /// Shared x axis mode.
    pub xmode: AxisMode,
    /// Shared y axis mode.
    pub ymode: AxisMode,
    /// Width of every panel.
    pub width: String,
    /// Height of every panel.
    pub height: Option<String>,
    /// Shared x label.
    pub xlabel: Option<String>,
    /// Shared y label.
    pub ylabel: Option<String>,
    /// Colormap of every panel.
    pub colormap: Option<String>,
    /// Color bar, attached to the last drawn panel.
    pub colorbar: Option<Colorbar>,
    /// Options of the whole group.
    pub axis_options: Option<String>,
    /// Panels, row-major.
    pub panels: Vec<PanelContext>,
}

/// The context handed to a template engine.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RenderContext {
    /// A single axis.
    Plot(PlotContext),
    /// A grid of axes.
    Grid(GridContext),
}

impl RenderContext {
    /// The template family.
    pub fn kind(&self) -> PlotKind {
        match self {
            Self::Plot(p) => p.kind,
            Self::Grid(g) => g.kind,
        }
    }
}

/// A figure that can be turned into a render context.
pub trait Figure {
    /// The template family.
    fn kind(&self) -> PlotKind;

    /// Builds the render context.
    fn build_context(&self, builder: &ContextBuilder) -> PlotResult<RenderContext>;
}

impl Figure for Plot {
    fn kind(&self) -> PlotKind {
        self.kind
    }

    fn build_context(&self, builder: &ContextBuilder) -> PlotResult<RenderContext> {
        builder.build_plot(self).map(RenderContext::Plot)
    }
}

impl Figure for GridPlot {
    fn kind(&self) -> PlotKind {
        PlotKind::Grid
    }

    fn build_context(&self, builder: &ContextBuilder) -> PlotResult<RenderContext> {
        builder.build_grid(self).map(RenderContext::Grid)
    }
}

/// Settings inherited from an enclosing grid.
#[derive(Clone, Copy, Debug, Default)]
struct Inherited<'a> {
    xlimits: AxisLimits,
    ylimits: AxisLimits,
    mlimits: AxisLimits,
    slimits: Option<(f64, f64)>,
    xticks: Option<&'a [f64]>,
    yticks: Option<&'a [f64]>,
    width: Option<&'a str>,
    height: Option<&'a str>,
}

/// Builds render contexts.
#[derive(Clone, Debug, Default)]
pub struct ContextBuilder {
    config: BuildConfig,
}

impl ContextBuilder {
    /// Creates a builder.
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    /// The configuration.
    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Builds the context of any figure.
    pub fn build(&self, figure: &impl Figure) -> PlotResult<RenderContext> {
        figure.build_context(self)
    }

    /// Builds the context of a single plot.
    pub fn build_plot(&self, plot: &Plot) -> PlotResult<PlotContext> {
        self.build_axis(plot, Inherited::default())
    }

    /// Builds the context of a grid.
    ///
    /// Panel settings win over grid-wide settings, which win over automatic ones.
    pub fn build_grid(&self, grid: &GridPlot) -> PlotResult<GridContext> {
        grid.shape.validate(grid.panels.len())?;
        tracing::debug!(
            rows = grid.shape.rows,
            columns = grid.shape.columns,
            "building grid context"
        );
        let inherited = Inherited {
            xlimits: grid.xlimits,
            ylimits: grid.ylimits,
            mlimits: grid.mlimits,
            slimits: grid.slimits,
            xticks: grid.xticks.as_deref(),
            yticks: grid.yticks.as_deref(),
            width: grid.width.as_deref(),
            height: grid.height.as_deref(),
        };

        let panels = grid
            .panels
            .iter()
            .enumerate()
            .map(|(idx, panel)| -> PlotResult<PanelContext> {
                let (row, column) = grid.shape.position(idx);
                let axis = if panel.empty {
                    None
                } else {
                    let mut axis = self.build_axis(&panel.plot, inherited)?;
                    if axis.colormap.is_none() {
                        axis.colormap.clone_from(&grid.colormap);
                    }
                    Some(axis)
                };
                Ok(PanelContext {
                    row,
                    column,
                    empty: panel.empty,
                    tick_labels: TickVisibility::for_panel(
                        grid.shape,
                        row,
                        column,
                        panel.xticklabels,
                        panel.yticklabels,
                    ),
                    axis,
                })
            })
            .collect::<PlotResult<Vec<_>>>()?;

        Ok(GridContext {
            kind: PlotKind::Grid,
            rows: grid.shape.rows,
            columns: grid.shape.columns,
            xmode: grid.xmode,
            ymode: grid.ymode,
            width: self.width(grid.width.as_deref(), None),
            height: self.height(grid.height.as_deref(), None),
            xlabel: grid.xlabel.clone(),
            ylabel: grid.ylabel.clone(),
            colormap: grid.colormap.clone(),
            colorbar: grid.colorbar.clone(),
            axis_options: grid.axis_options.clone(),
            panels,
        })
    }

    fn width(&self, own: Option<&str>, inherited: Option<&str>) -> String {
        own.or(inherited).unwrap_or(&self.config.width).to_string()
    }

    fn height(&self, own: Option<&str>, inherited: Option<&str>) -> Option<String> {
        own.or(inherited)
            .map(ToString::to_string)
            .or_else(|| self.config.height.clone())
    }

    fn build_axis(&self, plot: &Plot, inherited: Inherited<'_>) -> PlotResult<PlotContext> {
        tracing::debug!(
            kind = ?plot.kind,
            series = plot.series.len(),
            histograms = plot.histograms.len(),
            tables = plot.tables.len(),
            "building plot context"
        );

        let series = plot
            .series
            .iter()
            .map(|s| s.prepare())
            .collect::<PlotResult<Vec<_>>>()?;
        let regions = plot
            .regions
            .iter()
            .map(|r| r.prepare())
            .collect::<PlotResult<Vec<_>>>()?;
        let histograms = plot
            .histograms
            .iter()
            .map(|h| h.prepare())
            .collect::<PlotResult<Vec<_>>>()?;

        let size_domain = merge_extents(plot.tables.iter().map(|t| t.size_extent()));
        let size_target = plot.slimits.or(inherited.slimits);
        let tables = plot
            .tables
            .iter()
            .map(|t| t.prepare(size_domain, size_target))
            .collect::<PlotResult<Vec<_>>>()?;

        let mlimits = plot.mlimits.or(inherited.mlimits);
        let observed_meta = merge_extents(plot.tables.iter().map(|t| t.color_extent()));
        let meta_limits = match (mlimits.min, mlimits.max, observed_meta) {
            (Some(lo), Some(hi), _) => Some((lo, hi)),
            (lo, hi, Some((olo, ohi))) => Some((lo.unwrap_or(olo), hi.unwrap_or(ohi))),
            (_, _, None) => None,
        };

        let polar = plot.kind == PlotKind::Polar;
        let mut xlimits = plot.xlimits.or(inherited.xlimits);
        if polar && xlimits == AxisLimits::default() {
            let (lo, hi) = self.config.polar_xlimits;
            xlimits = AxisLimits::new(Some(lo), Some(hi));
        }
        let ylimits = plot.ylimits.or(inherited.ylimits);

        let x_extent = data_extent(plot, &series, &regions, &tables, Axis::X);
        let y_extent = data_extent(plot, &series, &regions, &tables, Axis::Y);
        let padding = self.config.padding;
        let (xmin, xmax) = resolve_limits(
            Axis::X,
            x_extent,
            xlimits.min,
            xlimits.max,
            plot.xmode,
            padding,
        )?;
        let (ymin, ymax) = resolve_limits(
            Axis::Y,
            y_extent,
            ylimits.min,
            ylimits.max,
            plot.ymode,
            padding,
        )?;

        let explicit_xticks = plot.xticks.as_deref().or(inherited.xticks);
        let explicit_xticks = match explicit_xticks {
            None if polar => Some(self.config.polar_xticks.as_slice()),
            other => other,
        };
        let explicit_yticks = plot.yticks.as_deref().or(inherited.yticks);
        let ticks = ResolvedTicks {
            x: resolve_ticks(explicit_xticks, (xmin, xmax), plot.xmode),
            y: resolve_ticks(explicit_yticks, (ymin, ymax), plot.ymode),
            x_labels: plot.xtick_labels.clone(),
            y_labels: plot.ytick_labels.clone(),
        };

        let scalebar = plot
            .scalebar
            .and_then(|bar| bar.prepare(size_domain, size_target));

        Ok(PlotContext {
            kind: plot.kind,
            title: plot.title.clone(),
            xlabel: plot.xlabel.clone(),
            ylabel: plot.ylabel.clone(),
            xmode: plot.xmode,
            ymode: plot.ymode,
            width: self.width(plot.width.as_deref(), inherited.width),
            height: self.height(plot.height.as_deref(), inherited.height),
            limits: ResolvedLimits {
                xmin,
                xmax,
                ymin,
                ymax,
            },
            ticks,
            axis_equal: plot.axis_equal,
            series,
            regions,
            histograms,
            horizontal_lines: plot.horizontal_lines.iter().map(|l| l.prepare()).collect(),
            vertical_lines: plot.vertical_lines.iter().map(|l| l.prepare()).collect(),
            pins: plot.pins.iter().map(|p| p.prepare()).collect(),
            label: plot.label.as_ref().map(|l| l.prepare()),
            tables,
            meta_limits,
            scalebar,
            colormap: plot.colormap.clone(),
            colorbar: plot.colorbar.clone(),
            axis_options: plot.axis_options.clone(),
        })
    }
}

fn merge_extents(extents: impl Iterator<Item = Option<(f64, f64)>>) -> Option<(f64, f64)> {
    extents
        .flatten()
        .reduce(|(a0, a1), (b0, b1)| (a0.min(b0), a1.max(b1)))
}

/// Data extent of one axis over every drawn element.
///
/// Error bar ends only count on linear axes, where they cannot cross zero into
/// an invalid log domain.
fn data_extent(
    plot: &Plot,
    series: &[PreparedSeries],
    regions: &[PreparedRegion],
    tables: &[PreparedTable],
    axis: Axis,
) -> Option<(f64, f64)> {
    let mode = match axis {
        Axis::X => plot.xmode,
        Axis::Y => plot.ymode,
    };
    let mut values: Vec<f64> = Vec::new();
    for s in series {
        for p in &s.points {
            let (v, err) = match axis {
                Axis::X => (p.x, p.xerr),
                Axis::Y => (p.y, p.yerr),
            };
            values.push(v);
            if mode == AxisMode::Linear
                && let Some(err) = err
            {
                let (lo, hi) = err.bounds(v);
                values.extend([lo, hi]);
            }
        }
    }
    for r in regions {
        values.extend(r.points.iter().map(|p| match axis {
            Axis::X => p.x,
            Axis::Y => p.y,
        }));
    }
    for t in tables {
        values.extend(t.points.iter().map(|p| match axis {
            Axis::X => p.x,
            Axis::Y => p.y,
        }));
    }
    for h in &plot.histograms {
        let (lo, hi) = match axis {
            Axis::X => h.x_extent(),
            Axis::Y => h.y_extent(),
        };
        values.extend([lo, hi]);
    }
    infer_extent(values)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;
    use crate::error::{DomainIssue, PlotError};
    use crate::histogram::Histogram2D;
    use crate::series::{ErrorBar, PlotSeries, SeriesPoint};
    use crate::table::Table;

    fn builder() -> ContextBuilder {
        ContextBuilder::new(BuildConfig::default())
    }

    #[test]
    fn simple_line_gets_padded_limits() {
        let mut plot = Plot::new();
        plot.plot([0.0, 1.0], [0.0, 1.0]).unwrap();
        let ctx = builder().build_plot(&plot).unwrap();

        assert_eq!(ctx.series.len(), 1);
        assert_eq!(
            ctx.series[0].points,
            vec![
                SeriesPoint {
                    x: 0.0,
                    y: 0.0,
                    xerr: None,
                    yerr: None
                },
                SeriesPoint {
                    x: 1.0,
                    y: 1.0,
                    xerr: None,
                    yerr: None
                },
            ]
        );
        let l = ctx.limits;
        assert!(l.xmin < 0.0 && l.xmax > 1.0, "{l:?}");
        assert!(l.ymin < 0.0 && l.ymax > 1.0, "{l:?}");
        assert!((l.xmin + 0.05).abs() < 1e-12);
        assert_eq!(ctx.width, r".67\linewidth");
        assert!((5..=7).contains(&ctx.ticks.x.len()), "{:?}", ctx.ticks.x);
    }

    #[test]
    fn building_twice_is_identical() {
        let mut plot = Plot::new();
        plot.plot_series(PlotSeries::new([1.0, 2.0, 3.0], [3.0, 1.0, 2.0]).with_yerr(0.5))
            .unwrap();
        plot.shade_region([1.0, 2.0], [0.0, 0.0], [1.0, 1.0], None)
            .unwrap();
        plot.draw_horizontal_line(1.5, Some("dashed"));
        plot.set_label("a", "upper right", None).unwrap();
        let b = builder();
        assert_eq!(b.build_plot(&plot).unwrap(), b.build_plot(&plot).unwrap());
    }

    #[test]
    fn error_bars_widen_linear_extent() {
        let mut plot = Plot::new();
        plot.plot_series(
            PlotSeries::new([0.0, 1.0], [0.0, 1.0]).with_yerr(vec![(1.0, 2.0), (0.0, 0.0)]),
        )
        .unwrap();
        let ctx = builder().build_plot(&plot).unwrap();
        assert!(ctx.limits.ymin < -1.0 && ctx.limits.ymax > 2.0, "{:?}", ctx.limits);
        assert_eq!(
            ctx.series[0].points[0].yerr,
            Some(ErrorBar::Asymmetric {
                lower: 1.0,
                upper: 2.0
            })
        );
    }

    #[test]
    fn log_axis_with_zero_fails() {
        let mut plot = Plot::new().with_axis("semilogy");
        plot.plot([1.0, 2.0], [0.0, 10.0]).unwrap();
        assert_eq!(
            builder().build_plot(&plot),
            Err(PlotError::non_positive(Axis::Y, 0.0))
        );
    }

    #[test]
    fn empty_plot_without_limits_fails() {
        let plot = Plot::new();
        assert!(matches!(
            builder().build_plot(&plot),
            Err(PlotError::InvalidDomain {
                axis: Axis::X,
                reason: DomainIssue::Empty
            })
        ));
    }

    #[test]
    fn histogram_limits_follow_edges() {
        let mut plot = Plot::new();
        plot.histogram2d(Histogram2D::new(vec![vec![5.0]], [0.0, 1.0], [0.0, 1.0]).unwrap())
            .unwrap();
        let ctx = builder().build_plot(&plot).unwrap();
        assert_eq!(
            ctx.limits,
            ResolvedLimits {
                xmin: 0.0,
                xmax: 1.0,
                ymin: 0.0,
                ymax: 1.0
            }
        );
        assert_eq!(ctx.histograms[0].bins[0].weight, 100);
    }

    #[test]
    fn polar_defaults_come_from_config() {
        let mut plot = Plot::polar();
        plot.plot([10.0, 200.0], [1.0, 2.0]).unwrap();
        let ctx = builder().build_plot(&plot).unwrap();
        assert_eq!(ctx.kind, PlotKind::Polar);
        assert_eq!((ctx.limits.xmin, ctx.limits.xmax), (0.0, 360.0));
        assert_eq!(ctx.ticks.x.len(), 6);
    }

    #[test]
    fn tables_resolve_sizes_meta_and_scale_bar() {
        let mut plot = Plot::new();
        let table = Table::new(
            [0.0, 1.0, 2.0],
            [0.0, 1.0, 2.0],
            [3.0, 5.0, 4.0],
            [1.0, 2.5, 4.0],
        )
        .unwrap();
        plot.scatter_table(table);
        plot.set_slimits(2.0, 10.0);
        plot.set_mlimits(Some(0.0), None);
        plot.set_scalebar("lower right").unwrap();
        let ctx = builder().build_plot(&plot).unwrap();
        let sizes: Vec<f64> = ctx.tables[0].points.iter().map(|p| p.size).collect();
        assert_eq!(sizes, vec![2.0, 6.0, 10.0]);
        assert_eq!(ctx.meta_limits, Some((0.0, 5.0)));
        assert_eq!(ctx.scalebar.unwrap().markers.len(), 2);
    }

    #[test]
    fn grid_panels_inherit_grid_settings() {
        let mut grid = GridPlot::new(2, 3).unwrap();
        grid.set_ylimits_for_all(None, Some(-1.0), Some(1.0)).unwrap();
        grid.set_colormap("hot");
        for row in 0..2 {
            for column in 0..3 {
                grid.subplot_mut(row, column)
                    .unwrap()
                    .plot([0.0, 1.0], [0.0, 0.5])
                    .unwrap();
            }
        }
        grid.set_ylimits(1, 2, Some(0.0), None).unwrap();
        grid.set_empty(0, 1).unwrap();
        let ctx = builder().build_grid(&grid).unwrap();

        assert_eq!(ctx.panels.len(), 6);
        assert!(ctx.panels[1].empty && ctx.panels[1].axis.is_none());
        let first = ctx.panels[0].axis.as_ref().unwrap();
        assert_eq!((first.limits.ymin, first.limits.ymax), (-1.0, 1.0));
        assert_eq!(first.colormap.as_deref(), Some("hot"));
        let last = ctx.panels[5].axis.as_ref().unwrap();
        assert_eq!((last.limits.ymin, last.limits.ymax), (0.0, 1.0));
        assert!(ctx.panels[0].tick_labels.top && !ctx.panels[0].tick_labels.bottom);
        assert!(ctx.panels[3].tick_labels.left);
        assert_eq!(RenderContext::Grid(ctx).kind(), PlotKind::Grid);
    }

    #[test]
    fn figure_trait_dispatches() {
        let mut plot = Plot::new();
        plot.plot([0.0, 1.0], [0.0, 1.0]).unwrap();
        let ctx = builder().build(&plot).unwrap();
        assert_eq!(ctx.kind(), PlotKind::Cartesian);
        assert_eq!(Figure::kind(&plot), PlotKind::Cartesian);
    }
}
