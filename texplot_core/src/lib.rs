// Copyright 2025 the texplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plot data preparation for LaTeX/PGFPlots figures.
//!
//! This crate is the pure half of texplot:
//! - a [`Plot`] (or a [`GridPlot`] of plots) accumulates raw data series, histograms,
//!   shaded regions and annotations through an append-only API, and
//! - a [`ContextBuilder`] pulls every accumulated element through its preparer and
//!   resolves limits, ticks and panel layout into a [`RenderContext`].
//!
//! The context is everything a template engine needs to emit a figure. Template
//! rendering, file output and compilation live downstream (`texplot_render`).
//!
//! Style strings (`options`, `style`, `linestyle`) are opaque PGFPlots/TikZ fragments:
//! they are passed through to the renderer verbatim and never parsed here.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod annotation;
mod context;
mod error;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod grid;
mod histogram;
mod plot;
mod region;
mod scale;
mod scale_bar;
mod series;
mod smooth;
mod table;

pub use annotation::{
    Coord, Label, LabelLocation, Orientation, Pin, PinConnector, PinSpec, PreparedLabel,
    PreparedLine, PreparedPin, ReferenceLine,
};
pub use context::{
    BuildConfig, ContextBuilder, Figure, GridContext, PanelContext, PlotContext, RenderContext,
    ResolvedLimits, ResolvedTicks,
};
pub use error::{DomainIssue, PlotError, PlotResult};
pub use format::format_number;
pub use grid::{GridPlot, GridShape, TickLabels, TickSide, TickVisibility};
pub use histogram::{
    Histogram2D, HistogramKind, HistogramWeighting, PreparedBackground, PreparedBin,
    PreparedHistogram,
};
pub use plot::{AxisLimits, Colorbar, Plot, PlotKind};
pub use region::{PreparedRegion, RegionShape, ShadedRegion};
pub use scale::{
    Axis, AxisMode, ScaleLinear, Ticks, axis_modes, infer_extent, log_ticks, resolve_limits,
    resolve_ticks,
};
pub use scale_bar::{PreparedScaleBar, ScaleBar, ScaleBarMarker};
pub use series::{
    ErrorBar, ErrorInput, PlotSeries, PointOrder, PreparedSeries, SeriesPoint, SeriesStyle,
    histogram_steps, interpolate, normalize,
};
pub use smooth::{recursive_smooth, simple_smooth};
pub use table::{PreparedTable, Table, TablePoint, rescale};
