// Copyright 2025 the texplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The demo figures.
//!
//! Data is generated from closed-form curves so every run produces the same
//! output.

use std::f64::consts::PI;

use texplot_core::{
    ContextBuilder, Figure, GridPlot, Histogram2D, HistogramKind, PinSpec, Plot, PlotKind,
    PlotResult, PlotSeries, RenderContext, SeriesStyle, Table, recursive_smooth, simple_smooth,
};

/// A figure of either shape.
#[derive(Clone, Debug)]
pub(crate) enum DemoFigure {
    Plot(Plot),
    Grid(GridPlot),
}

impl Figure for DemoFigure {
    fn kind(&self) -> PlotKind {
        match self {
            Self::Plot(plot) => Figure::kind(plot),
            Self::Grid(grid) => Figure::kind(grid),
        }
    }

    fn build_context(&self, builder: &ContextBuilder) -> PlotResult<RenderContext> {
        match self {
            Self::Plot(plot) => plot.build_context(builder),
            Self::Grid(grid) => grid.build_context(builder),
        }
    }
}

/// Every demo, by output name.
pub(crate) fn all() -> PlotResult<Vec<(&'static str, DemoFigure)>> {
    Ok(vec![
        ("error_bars", DemoFigure::Plot(error_bars()?)),
        ("histogram2d", DemoFigure::Plot(histogram2d()?)),
        ("multiplot", DemoFigure::Grid(multiplot()?)),
        ("polar_histogram", DemoFigure::Plot(polar_histogram()?)),
        ("scatter_table", DemoFigure::Plot(scatter_table()?)),
        ("shaded_band", DemoFigure::Plot(shaded_band()?)),
    ])
}

fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    if n < 2 {
        return vec![lo; n];
    }
    let step = (hi - lo) / (n - 1) as f64;
    (0..n).map(|i| lo + step * i as f64).collect()
}

fn gaussian(x: f64, mu: f64, sigma: f64) -> f64 {
    (-(x - mu).powi(2) / (2.0 * sigma * sigma)).exp()
}

fn centers(edges: &[f64]) -> Vec<f64> {
    edges.windows(2).map(|w| (w[0] + w[1]) / 2.0).collect()
}

fn error_bars() -> PlotResult<Plot> {
    let x = linspace(1.0, 20.0, 20);
    let y = linspace(10.0, 50.0, 20);
    let scattered = x
        .iter()
        .zip(&y)
        .map(|(x, y)| y + 2.0 * x.sin() - 1.0)
        .collect::<Vec<_>>();
    let yerr = x
        .iter()
        .map(|x| (1.0 + x.cos(), 3.0 + 2.0 * (0.7 * x).sin()))
        .collect::<Vec<_>>();

    let mut plot = Plot::new();
    plot.plot(x.clone(), y)?;
    plot.plot_series(
        PlotSeries::new(x, scattered)
            .with_style(&SeriesStyle::default().with_mark("*").without_line())
            .with_xerr(0.4)
            .with_yerr(yerr),
    )?;
    plot.set_xlabel("Value with symmetric error");
    plot.set_ylabel("Other value with asymmetric errors");
    Ok(plot)
}

fn histogram2d() -> PlotResult<Plot> {
    let quadrants = [
        ((-100.0, 0.0), (-50.0, 0.0), HistogramKind::ReverseBw),
        ((0.0, 100.0), (-50.0, 0.0), HistogramKind::Bw),
        ((-100.0, 0.0), (0.0, 50.0), HistogramKind::ReverseBw),
        ((0.0, 100.0), (0.0, 50.0), HistogramKind::Bw),
    ];

    let mut plot = Plot::new();
    for ((x0, x1), (y0, y1), kind) in quadrants {
        let x_edges = linspace(x0, x1, 21);
        let y_edges = linspace(y0, y1, 21);
        let y_centers = centers(&y_edges);
        let counts = centers(&x_edges)
            .into_iter()
            .map(|x| {
                y_centers
                    .iter()
                    .map(|&y| (500.0 * gaussian(x, 0.0, 50.0) * gaussian(y, 0.0, 15.0)).round())
                    .collect()
            })
            .collect();
        plot.histogram2d(Histogram2D::new(counts, x_edges, y_edges)?.with_kind(kind))?;
    }
    // Each histogram narrows the limits to its own edges.
    plot.set_xlimits(Some(-100.0), Some(100.0));
    plot.set_ylimits(Some(-50.0), Some(50.0));
    plot.set_xlabel("$x$");
    plot.set_ylabel("$y$");
    Ok(plot)
}

fn multiplot() -> PlotResult<GridPlot> {
    let mut grid = GridPlot::new(2, 3)?
        .with_width(r".25\linewidth")
        .with_height(r".25\linewidth");
    let line = SeriesStyle::default();
    let x = linspace(-PI, PI, 50);

    let sin = grid.subplot_mut(0, 1)?;
    sin.plot_styled(x.clone(), x.iter().map(|v| v.sin()).collect::<Vec<_>>(), &line)?;
    sin.add_pin(PinSpec::new(r"$\sin(x)$").with_relative_position(0.5))?;

    let cos = grid.subplot_mut(1, 0)?;
    cos.plot_styled(x.clone(), x.iter().map(|v| v.cos()).collect::<Vec<_>>(), &line)?;
    cos.add_pin_at_xy(1.0, 0.5, PinSpec::new(r"$\cos(x)$").with_arrow());

    let tan = grid.subplot_mut(1, 2)?;
    tan.plot_styled(x.clone(), x.iter().map(|v| v.tan()).collect::<Vec<_>>(), &line)?;

    let edges = linspace(-3.0, 3.0, 21);
    let counts = centers(&edges)
        .iter()
        .map(|&c| (300.0 * gaussian(c, 0.0, 1.0)).round())
        .collect::<Vec<_>>();
    let histogram = grid.subplot_mut(0, 0)?;
    histogram.histogram(&counts, &edges, "solid")?;
    histogram.add_pin(
        PinSpec::new("histogram")
            .with_location("left")
            .with_relative_position(0.5),
    )?;

    let steps = linspace(0.0, 4.0, 5);
    let median = steps.iter().map(|v| 0.4 * (1.3 * v).sin()).collect::<Vec<_>>();
    let lower = median.iter().map(|m| m - 1.2).collect::<Vec<_>>();
    let upper = median.iter().map(|m| m + 1.5).collect::<Vec<_>>();
    let band = grid.subplot_mut(0, 2)?;
    band.plot_styled(steps.clone(), median, &SeriesStyle::default().with_mark("*"))?;
    band.shade_region(steps.clone(), lower, upper, None)?;

    let noise = steps.iter().map(|v| (2.7 * v).cos()).collect::<Vec<_>>();
    grid.subplot_mut(1, 1)?
        .plot_styled(steps, noise, &SeriesStyle::default().with_mark("o"))?;

    grid.show_xticklabels_for_all(Some(&[(0, 0), (1, 1), (0, 2)]))?;
    grid.show_yticklabels(0, 0)?;
    grid.show_yticklabels(1, 2)?;
    grid.set_ylabel(r"Particle density [\si{\per\square\meter}]");
    grid.set_xlabel(r"Core distance [\si{\meter}]");
    grid.set_title(0, 1, "Nice plot")?;
    grid.set_subplot_xlabel(0, 0, "number")?;
    grid.set_subplot_ylabel(1, 2, r"$\tan x$")?;
    Ok(grid)
}

fn polar_histogram() -> PlotResult<Plot> {
    let mut plot = Plot::polar();

    let full = linspace(0.0, 360.0, 181);
    let counts = centers(&full)
        .iter()
        .map(|a| (55.0 + 8.0 * (a.to_radians() * 3.0).sin()).round())
        .collect::<Vec<_>>();
    plot.histogram(&counts, &full, "solid")?;

    let offset = linspace(270.0, 630.0, 91);
    let counts = centers(&offset)
        .iter()
        .map(|&a| (110.0 * gaussian(a, 400.0, 130.0)).round())
        .collect::<Vec<_>>();
    plot.histogram(&counts, &offset, "blue")?;

    let part = linspace(90.0, 300.0, 22);
    let counts = vec![95.0; part.len() - 1];
    plot.histogram(&counts, &part, "red")?;
    Ok(plot)
}

fn scatter_table() -> PlotResult<Plot> {
    let angles = linspace(0.0, 2.0 * PI, 24);
    let x = angles.iter().map(|a| a.cos() * (1.0 + 0.3 * a)).collect::<Vec<_>>();
    let y = angles.iter().map(|a| a.sin() * (1.0 + 0.3 * a)).collect::<Vec<_>>();
    let color = angles.clone();
    let size = angles.iter().map(|a| 1.0 + a.sin().abs() * 4.0).collect::<Vec<_>>();

    let mut plot = Plot::new();
    plot.scatter_table(Table::new(x, y, color, size)?.with_style("draw=black"));
    plot.set_slimits(2.0, 8.0);
    plot.set_scalebar("lower right")?;
    plot.set_colormap("viridis");
    plot.set_colorbar("angle [rad]", false);
    plot.set_axis_equal();
    Ok(plot)
}

fn shaded_band() -> PlotResult<Plot> {
    let x = linspace(0.5, 10.0, 40);
    let y = x
        .iter()
        .map(|v| 10.0 * gaussian(*v, 4.0, 1.5) + 1.0 + 0.4 * (5.0 * v).sin())
        .collect::<Vec<_>>();
    let lower = y.iter().map(|v| v * 0.8).collect::<Vec<_>>();
    let upper = y.iter().map(|v| v * 1.25).collect::<Vec<_>>();

    let mut plot = Plot::new().with_axis("semilogy");
    plot.shade_region(x.clone(), lower, upper, Some("blue!20"))?;
    plot.plot_styled(x.clone(), y.clone(), &SeriesStyle::default().with_linestyle("thin"))?;

    let (sx, sy) = simple_smooth(&x, &y, 5)?;
    plot.plot_styled(sx, sy, &SeriesStyle::default().with_linestyle("thick"))?;
    let (rx, ry) = recursive_smooth(&x, &y, 3, false, true)?;
    plot.plot_styled(rx, ry, &SeriesStyle::default().with_linestyle("dashed"))?;
    plot.add_pin(PinSpec::new("smoothed").with_location("above right"))?;

    plot.add_pin_along(&x, &y, PinSpec::new("raw").with_relative_position(0.2))?;
    plot.draw_vertical_line(4.0, Some("dotted"));
    plot.draw_horizontal_line(1.0, Some("gray"));
    plot.set_label("a)", "upper right", None)?;
    plot.set_logyticks(&[0, 1]);
    plot.set_xlabel("Energy [GeV]");
    plot.set_ylabel("Flux");
    Ok(plot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_demo_builds() {
        let builder = ContextBuilder::default();
        for (name, figure) in all().unwrap() {
            let context = figure.build_context(&builder);
            assert!(context.is_ok(), "{name}: {context:?}");
        }
    }
}
