// Copyright 2025 the texplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Built-in PGFPlots templates.
//!
//! Each template writes a `tikzpicture` holding one `axis`, `polaraxis` or
//! `groupplot` environment. Elements are emitted in drawing order: shaded
//! regions, 2D histograms, series, scatter tables, reference lines, pins, the
//! corner label and finally the scale bar.

use kurbo::Rect;
use texplot_core::{
    Colorbar, ErrorBar, GridContext, HistogramKind, PanelContext, PinConnector, PlotContext,
    PlotKind, PreparedHistogram, PreparedScaleBar, PreparedSeries, PreparedTable, RenderContext,
    SeriesPoint, TickVisibility, format_number,
};

use crate::engine::{
    DOCUMENT_TEMPLATE, MULTI_PLOT_TEMPLATE, PLOT_TEMPLATE, POLAR_PLOT_TEMPLATE, TemplateEngine,
    template_for,
};
use crate::error::{RenderError, RenderResult};

const INDENT: &str = "    ";

/// Spacing between grid panels.
const GROUP_SEP: &str = "2pt";

const DOCUMENT_PREAMBLE: &[&str] = &[
    r"\documentclass{article}",
    r"\usepackage{tikz}",
    r"\usetikzlibrary{arrows}",
    r"\usepackage{pgfplots}",
    r"\usepgfplotslibrary{groupplots,polar}",
    r"\pgfplotsset{compat=1.3}",
    r"\pagestyle{empty}",
];

/// The built-in template engine.
#[derive(Clone, Debug, Default)]
pub struct PgfplotsEngine {
    preamble: Vec<String>,
}

impl PgfplotsEngine {
    /// Creates the engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a line to the standalone document preamble, e.g. `\usepackage{siunitx}`.
    pub fn with_preamble_line(mut self, line: impl Into<String>) -> Self {
        self.preamble.push(line.into());
        self
    }

    fn document(&self, context: &RenderContext) -> RenderResult<String> {
        let body = self.render(template_for(context.kind()), context)?;
        let mut out = String::new();
        for line in DOCUMENT_PREAMBLE {
            out.push_str(line);
            out.push('\n');
        }
        for line in &self.preamble {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str("\\begin{document}\n");
        out.push_str(&body);
        out.push_str("\\end{document}\n");
        Ok(out)
    }
}

impl TemplateEngine for PgfplotsEngine {
    fn render(&self, template: &str, context: &RenderContext) -> RenderResult<String> {
        match (template, context) {
            (DOCUMENT_TEMPLATE, _) => self.document(context),
            (PLOT_TEMPLATE, RenderContext::Plot(plot)) => Ok(single_axis("axis", plot)),
            (POLAR_PLOT_TEMPLATE, RenderContext::Plot(plot)) => {
                Ok(single_axis("polaraxis", plot))
            }
            (MULTI_PLOT_TEMPLATE, RenderContext::Grid(grid)) => Ok(group(grid)),
            (PLOT_TEMPLATE | POLAR_PLOT_TEMPLATE | MULTI_PLOT_TEMPLATE, _) => Err(
                RenderError::template(template, "context does not match the template"),
            ),
            _ => Err(RenderError::template(template, "unknown template")),
        }
    }
}

fn single_axis(environment: &str, plot: &PlotContext) -> String {
    let mut options = Vec::new();
    if plot.kind == PlotKind::Cartesian {
        options.push(format!("xmode={}", plot.xmode.pgf_name()));
        options.push(format!("ymode={}", plot.ymode.pgf_name()));
    }
    options.push(format!("width={}", plot.width));
    if let Some(height) = &plot.height {
        options.push(format!("height={height}"));
    }
    options.extend(axis_options(plot));
    if let Some(colorbar) = &plot.colorbar {
        options.extend(colorbar_options(colorbar));
    }
    if let Some(extra) = &plot.axis_options {
        options.push(extra.clone());
    }

    let mut out = String::from("\\begin{tikzpicture}\n");
    out.push_str(&format!("\\begin{{{environment}}}"));
    push_option_block(&mut out, &options);
    push_contents(&mut out, plot);
    out.push_str(&format!("\\end{{{environment}}}\n"));
    out.push_str("\\end{tikzpicture}\n");
    out
}

fn group(grid: &GridContext) -> String {
    let mut options = vec![
        format!(
            "group style={{group size={} by {}, horizontal sep={GROUP_SEP}, vertical sep={GROUP_SEP}}}",
            grid.columns, grid.rows
        ),
        format!("xmode={}", grid.xmode.pgf_name()),
        format!("ymode={}", grid.ymode.pgf_name()),
        format!("width={}", grid.width),
    ];
    if let Some(height) = &grid.height {
        options.push(format!("height={height}"));
    }
    options.push("scale only axis".to_string());
    if let Some(colormap) = &grid.colormap {
        options.push(format!("colormap/{colormap}"));
    }
    if let Some(extra) = &grid.axis_options {
        options.push(extra.clone());
    }

    let last_drawn = grid.panels.iter().rposition(|p| p.axis.is_some());

    let mut out = String::from("\\begin{tikzpicture}\n");
    out.push_str("\\begin{groupplot}");
    push_option_block(&mut out, &options);
    for (idx, panel) in grid.panels.iter().enumerate() {
        let colorbar = grid.colorbar.as_ref().filter(|_| Some(idx) == last_drawn);
        push_panel(&mut out, grid, panel, colorbar);
    }
    out.push_str("\\end{groupplot}\n");
    if let Some(xlabel) = &grid.xlabel {
        out.push_str(&format!(
            "\\path (current bounding box.south) node[anchor=north] {{{xlabel}}};\n"
        ));
    }
    if let Some(ylabel) = &grid.ylabel {
        out.push_str(&format!(
            "\\path (current bounding box.west) node[rotate=90, anchor=south] {{{ylabel}}};\n"
        ));
    }
    out.push_str("\\end{tikzpicture}\n");
    out
}

fn push_panel(
    out: &mut String,
    grid: &GridContext,
    panel: &PanelContext,
    colorbar: Option<&Colorbar>,
) {
    let Some(axis) = &panel.axis else {
        out.push_str("\\nextgroupplot[group/empty plot]\n");
        return;
    };
    let mut options = axis_options(axis);
    // The group already selects the shared colormap.
    if axis.colormap == grid.colormap {
        options.retain(|o| !o.starts_with("colormap/"));
    }
    options.extend(tick_label_options(panel.tick_labels));
    if let Some(colorbar) = colorbar {
        options.extend(colorbar_options(colorbar));
    }
    if let Some(extra) = &axis.axis_options {
        options.push(extra.clone());
    }
    out.push_str(&format!("\\nextgroupplot[{}]\n", options.join(", ")));
    push_contents(out, axis);
}

/// Options shared by every axis flavor: text, limits, ticks and color meta.
fn axis_options(plot: &PlotContext) -> Vec<String> {
    let mut options = Vec::new();
    if let Some(title) = &plot.title {
        options.push(format!("title={{{title}}}"));
    }
    if let Some(xlabel) = &plot.xlabel {
        options.push(format!("xlabel={{{xlabel}}}"));
    }
    if let Some(ylabel) = &plot.ylabel {
        options.push(format!("ylabel={{{ylabel}}}"));
    }

    let limits = plot.limits;
    options.push(format!("xmin={}", format_number(limits.xmin)));
    options.push(format!("xmax={}", format_number(limits.xmax)));
    options.push(format!("ymin={}", format_number(limits.ymin)));
    options.push(format!("ymax={}", format_number(limits.ymax)));

    options.push(tick_option("xtick", &plot.ticks.x));
    options.push(tick_option("ytick", &plot.ticks.y));
    if let Some(labels) = &plot.ticks.x_labels {
        options.push(format!("xticklabels={{{}}}", labels.join(",")));
    }
    if let Some(labels) = &plot.ticks.y_labels {
        options.push(format!("yticklabels={{{}}}", labels.join(",")));
    }

    if plot.axis_equal {
        options.push("axis equal".to_string());
    }
    if let Some(colormap) = &plot.colormap {
        options.push(format!("colormap/{colormap}"));
    }
    if let Some((lo, hi)) = plot.meta_limits {
        options.push(format!("point meta min={}", format_number(lo)));
        options.push(format!("point meta max={}", format_number(hi)));
    }
    options
}

fn tick_option(key: &str, ticks: &[f64]) -> String {
    if ticks.is_empty() {
        format!("{key}=\\empty")
    } else {
        format!("{key}={{{}}}", number_list(ticks))
    }
}

fn tick_label_options(visibility: TickVisibility) -> Vec<String> {
    let x = match (visibility.top, visibility.bottom) {
        (_, true) => "xticklabel pos=lower",
        (true, false) => "xticklabel pos=upper",
        (false, false) => "xticklabels={}",
    };
    let y = match (visibility.left, visibility.right) {
        (true, _) => "yticklabel pos=left",
        (false, true) => "yticklabel pos=right",
        (false, false) => "yticklabels={}",
    };
    vec![x.to_string(), y.to_string()]
}

fn colorbar_options(colorbar: &Colorbar) -> [String; 2] {
    if colorbar.horizontal {
        [
            "colorbar horizontal".to_string(),
            format!("colorbar style={{xlabel={{{}}}}}", colorbar.label),
        ]
    } else {
        [
            "colorbar".to_string(),
            format!("colorbar style={{ylabel={{{}}}}}", colorbar.label),
        ]
    }
}

fn push_option_block(out: &mut String, options: &[String]) {
    out.push_str("[\n");
    for (i, option) in options.iter().enumerate() {
        out.push_str(INDENT);
        out.push_str(option);
        if i + 1 < options.len() {
            out.push(',');
        }
        out.push('\n');
    }
    out.push_str("]\n");
}

fn push_contents(out: &mut String, plot: &PlotContext) {
    for region in &plot.regions {
        if region.points.is_empty() {
            continue;
        }
        let path = region
            .points
            .iter()
            .map(|p| format!("(axis cs:{},{})", format_number(p.x), format_number(p.y)))
            .collect::<Vec<_>>()
            .join(" -- ");
        out.push_str(&format!("\\fill[{}] {path} -- cycle;\n", region.style));
    }

    for histogram in &plot.histograms {
        push_histogram(out, histogram);
    }

    let any_legend = plot.series.iter().any(|s| s.legend.is_some());
    for series in &plot.series {
        push_series(out, series, any_legend);
    }

    for table in &plot.tables {
        push_table(out, table);
    }

    for line in plot.horizontal_lines.iter().chain(&plot.vertical_lines) {
        out.push_str(&format!(
            "\\draw{} {} -- {};\n",
            bracket(line.style.as_deref()),
            line.from.to_tikz(),
            line.to.to_tikz()
        ));
    }

    for pin in &plot.pins {
        let mut pin_options = Vec::new();
        if pin.connector == PinConnector::Arrow {
            pin_options.push("pin edge={<-}");
        }
        if let Some(style) = &pin.style {
            pin_options.push(style);
        }
        let pin_options = pin_options.join(", ");
        out.push_str(&format!(
            "\\node[coordinate, pin={{{}{}:{{{}}}}}] at {} {{}};\n",
            bracket((!pin_options.is_empty()).then_some(pin_options.as_str())),
            pin.location,
            pin.text,
            pin.at.to_tikz()
        ));
    }

    if let Some(label) = &plot.label {
        let mut label_options = vec![if label.anchor == "center" {
            "anchor=center"
        } else {
            label.anchor
        }];
        if let Some(style) = &label.style {
            label_options.push(style);
        }
        out.push_str(&format!(
            "\\node[{}] at {} {{{}}};\n",
            label_options.join(", "),
            label.at.to_tikz(),
            label.text
        ));
    }

    if let Some(scalebar) = &plot.scalebar {
        push_scalebar(out, scalebar);
    }
}

fn push_histogram(out: &mut String, histogram: &PreparedHistogram) {
    if let Some(background) = &histogram.background {
        out.push_str(&format!(
            "\\fill[{}] {};\n",
            background.style,
            rectangle(background.rect)
        ));
    }
    for bin in &histogram.bins {
        let mut fill = match histogram.kind {
            HistogramKind::Area => vec!["black".to_string()],
            HistogramKind::Bw | HistogramKind::ReverseBw => vec![format!("black!{}", bin.weight)],
        };
        if let Some(style) = &histogram.style {
            fill.push(style.clone());
        }
        out.push_str(&format!("\\fill[{}] {};\n", fill.join(", "), rectangle(bin.rect)));
    }
}

fn rectangle(r: Rect) -> String {
    format!(
        "(axis cs:{},{}) rectangle (axis cs:{},{})",
        format_number(r.x0),
        format_number(r.y0),
        format_number(r.x1),
        format_number(r.y1)
    )
}

fn push_series(out: &mut String, series: &PreparedSeries, any_legend: bool) {
    let mut options = Vec::new();
    if !series.options.is_empty() {
        options.push(series.options.clone());
    }
    if any_legend && series.legend.is_none() {
        options.push("forget plot".to_string());
    }
    if series.show_xerr || series.show_yerr {
        options.push("error bars/.cd".to_string());
        if series.show_xerr {
            options.push("x dir=both, x explicit".to_string());
        }
        if series.show_yerr {
            options.push("y dir=both, y explicit".to_string());
        }
    }

    out.push_str(&format!("\\addplot[{}] coordinates {{\n", options.join(", ")));
    for point in &series.points {
        out.push_str(INDENT);
        out.push_str(&coordinate(point, series.show_xerr, series.show_yerr));
        out.push('\n');
    }
    out.push_str("};\n");
    if let Some(legend) = &series.legend {
        out.push_str(&format!("\\addlegendentry{{{legend}}}\n"));
    }
}

/// `(x,y)` with `+- (ex,ey)` or `+= (..) -= (..)` error bar suffixes.
fn coordinate(point: &SeriesPoint, show_xerr: bool, show_yerr: bool) -> String {
    let at = format!("({},{})", format_number(point.x), format_number(point.y));
    if !show_xerr && !show_yerr {
        return at;
    }
    let extent = |err: Option<ErrorBar>, value: f64| match err {
        Some(err) => {
            let (lo, hi) = err.bounds(value);
            (value - lo, hi - value)
        }
        None => (0.0, 0.0),
    };
    let (xl, xu) = extent(point.xerr.filter(|_| show_xerr), point.x);
    let (yl, yu) = extent(point.yerr.filter(|_| show_yerr), point.y);
    if xl == xu && yl == yu {
        format!("{at} +- ({},{})", format_number(xu), format_number(yu))
    } else {
        format!(
            "{at} += ({},{}) -= ({},{})",
            format_number(xu),
            format_number(yu),
            format_number(xl),
            format_number(yl)
        )
    }
}

fn push_table(out: &mut String, table: &PreparedTable) {
    let mut options = vec![
        "scatter".to_string(),
        "only marks".to_string(),
        format!("mark={}", table.mark),
        "point meta=explicit".to_string(),
        r"visualization depends on={\thisrow{size} \as \markradius}".to_string(),
        r"scatter/@pre marker code/.append style={/tikz/mark size=\markradius}".to_string(),
    ];
    if let Some(style) = &table.style {
        options.push(style.clone());
    }
    out.push_str(&format!(
        "\\addplot[{}] table[meta=color] {{\n",
        options.join(", ")
    ));
    out.push_str("x y color size\n");
    for p in &table.points {
        out.push_str(&format!(
            "{} {} {} {}\n",
            format_number(p.x),
            format_number(p.y),
            format_number(p.color),
            format_number(p.size)
        ));
    }
    out.push_str("};\n");
}

fn push_scalebar(out: &mut String, scalebar: &PreparedScaleBar) {
    for marker in &scalebar.markers {
        let (dx, dy) = marker.offset;
        out.push_str(&format!(
            "\\path {} ++({}pt,{}pt) node[draw, circle, inner sep=0pt, minimum size={}pt, font=\\tiny] {{{}}};\n",
            scalebar.at.to_tikz(),
            format_number(dx),
            format_number(dy),
            format_number(2.0 * marker.radius),
            marker.label
        ));
    }
}

fn bracket(options: Option<&str>) -> String {
    options.map(|o| format!("[{o}]")).unwrap_or_default()
}

fn number_list(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format_number(*v))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    use texplot_core::{
        ContextBuilder, Figure, GridPlot, Histogram2D, PinSpec, Plot, PlotSeries, SeriesStyle,
    };

    fn render(figure: &impl Figure) -> String {
        let context = figure.build_context(&ContextBuilder::default()).unwrap();
        PgfplotsEngine::new()
            .render(template_for(context.kind()), &context)
            .unwrap()
    }

    #[test]
    fn simple_plot_emits_an_axis() {
        let mut plot = Plot::new();
        plot.plot([0.0, 1.0], [0.0, 1.0]).unwrap();
        plot.set_xlabel("$x$");
        let tex = render(&plot);
        assert!(tex.starts_with("\\begin{tikzpicture}\n\\begin{axis}[\n"), "{tex}");
        assert!(tex.contains("    xmode=normal,\n"), "{tex}");
        assert!(tex.contains("    width=.67\\linewidth,\n"), "{tex}");
        assert!(tex.contains("    xlabel={$x$},\n"), "{tex}");
        assert!(tex.contains("    xmin=-0.05,\n"), "{tex}");
        assert!(
            tex.contains("\\addplot[no markers,solid] coordinates {\n    (0,0)\n    (1,1)\n};\n"),
            "{tex}"
        );
        assert!(tex.ends_with("\\end{axis}\n\\end{tikzpicture}\n"), "{tex}");
    }

    #[test]
    fn error_bars_use_explicit_offsets() {
        let mut plot = Plot::new();
        plot.plot_series(
            PlotSeries::new([1.0, 2.0], [3.0, 4.0])
                .with_yerr(0.5)
                .with_xerr(vec![(0.1, 0.2), (0.0, 0.0)]),
        )
        .unwrap();
        let tex = render(&plot);
        assert!(
            tex.contains("error bars/.cd, x dir=both, x explicit, y dir=both, y explicit"),
            "{tex}"
        );
        assert!(tex.contains("(1,3) += (0.2,0.5) -= (0.1,0.5)"), "{tex}");
        assert!(tex.contains("(2,4) +- (0,0.5)"), "{tex}");
    }

    #[test]
    fn histogram_bins_are_gray_rectangles() {
        let mut plot = Plot::new();
        let histogram = Histogram2D::new(
            vec![vec![0.0, 2.0], vec![4.0, 1.0]],
            vec![0.0, 1.0, 2.0],
            vec![0.0, 1.0, 2.0],
        )
        .unwrap();
        plot.histogram2d(histogram).unwrap();
        let tex = render(&plot);
        assert!(
            tex.contains("\\fill[black!100] (axis cs:1,0) rectangle (axis cs:2,1);"),
            "{tex}"
        );
        assert!(
            tex.contains("\\fill[black!50] (axis cs:0,1) rectangle (axis cs:1,2);"),
            "{tex}"
        );
        assert_eq!(tex.matches("\\fill[").count(), 3, "{tex}");
    }

    #[test]
    fn annotations_are_positioned_in_axis_coordinates() {
        let mut plot = Plot::new();
        plot.plot_styled([0.0, 10.0], [0.0, 5.0], &SeriesStyle::default().with_mark("o"))
            .unwrap();
        plot.draw_horizontal_line(2.0, Some("dashed"));
        plot.add_pin(PinSpec::new("peak").at_x(4.0).with_arrow()).unwrap();
        plot.set_label("a)", "upper left", None).unwrap();
        let tex = render(&plot);
        assert!(
            tex.contains("\\draw[dashed] (rel axis cs:0,0 |- axis cs:1,2) -- (rel axis cs:1,0 |- axis cs:1,2);"),
            "{tex}"
        );
        assert!(
            tex.contains("\\node[coordinate, pin={[pin edge={<-}]left:{peak}}] at (axis cs:4,2) {};"),
            "{tex}"
        );
        assert!(
            tex.contains("\\node[below right] at (rel axis cs:0,1) {a)};"),
            "{tex}"
        );
    }

    #[test]
    fn polar_plot_uses_polaraxis() {
        let mut plot = Plot::polar();
        plot.plot([0.0, 90.0], [1.0, 2.0]).unwrap();
        let tex = render(&plot);
        assert!(tex.contains("\\begin{polaraxis}[\n"), "{tex}");
        assert!(tex.contains("    xtick={0,60,120,180,240,300},\n"), "{tex}");
        assert!(!tex.contains("xmode"), "{tex}");
    }

    #[test]
    fn grid_marks_tick_label_sides_and_empty_panels() {
        let mut grid = GridPlot::new(2, 2).unwrap();
        for (row, column) in [(0, 0), (0, 1), (1, 0)] {
            grid.subplot_mut(row, column)
                .unwrap()
                .plot([0.0, 1.0], [0.0, 1.0])
                .unwrap();
        }
        grid.set_empty(1, 1).unwrap();
        grid.set_xlabel("time");
        grid.set_colorbar("counts", false);
        let tex = render(&grid);
        assert!(
            tex.contains("group style={group size=2 by 2, horizontal sep=2pt, vertical sep=2pt}"),
            "{tex}"
        );
        assert_eq!(tex.matches("\\nextgroupplot[").count(), 4, "{tex}");
        assert!(tex.contains("\\nextgroupplot[group/empty plot]\n"), "{tex}");
        assert!(tex.contains("xticklabel pos=upper, yticklabel pos=left"), "{tex}");
        assert!(tex.contains("xticklabel pos=upper, yticklabel pos=right"), "{tex}");
        assert!(
            tex.contains("xticklabel pos=lower, yticklabel pos=left, colorbar"),
            "{tex}"
        );
        assert_eq!(tex.matches("colorbar style").count(), 1, "{tex}");
        assert!(tex.contains("node[anchor=north] {time};"), "{tex}");
    }

    #[test]
    fn document_wraps_the_figure() {
        let mut plot = Plot::new();
        plot.plot([0.0, 1.0], [0.0, 1.0]).unwrap();
        let context = plot.build_context(&ContextBuilder::default()).unwrap();
        let engine = PgfplotsEngine::new().with_preamble_line(r"\usepackage{siunitx}");
        let tex = engine.render(DOCUMENT_TEMPLATE, &context).unwrap();
        assert!(tex.starts_with("\\documentclass{article}\n"), "{tex}");
        assert!(tex.contains("\\usepackage{siunitx}\n\\begin{document}\n\\begin{tikzpicture}"));
        assert!(tex.ends_with("\\end{tikzpicture}\n\\end{document}\n"), "{tex}");
    }

    #[test]
    fn mismatched_or_unknown_templates_fail() {
        let mut plot = Plot::new();
        plot.plot([0.0, 1.0], [0.0, 1.0]).unwrap();
        let context = plot.build_context(&ContextBuilder::default()).unwrap();
        let engine = PgfplotsEngine::new();
        assert!(matches!(
            engine.render(MULTI_PLOT_TEMPLATE, &context),
            Err(RenderError::Template { .. })
        ));
        assert!(matches!(
            engine.render("bar.tex", &context),
            Err(RenderError::Template { .. })
        ));
    }
}
