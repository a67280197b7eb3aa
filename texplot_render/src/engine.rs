// Copyright 2025 the texplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The template engine seam.

use texplot_core::{PlotKind, RenderContext};

use crate::error::RenderResult;

/// Template of a single cartesian axis.
pub const PLOT_TEMPLATE: &str = "plot.tex";
/// Template of a single polar axis.
pub const POLAR_PLOT_TEMPLATE: &str = "polar_plot.tex";
/// Template of a grid of axes.
pub const MULTI_PLOT_TEMPLATE: &str = "multi_plot.tex";
/// Standalone document wrapping the figure's own template.
pub const DOCUMENT_TEMPLATE: &str = "document.tex";

/// The template that renders a figure of this kind.
pub fn template_for(kind: PlotKind) -> &'static str {
    match kind {
        PlotKind::Cartesian => PLOT_TEMPLATE,
        PlotKind::Polar => POLAR_PLOT_TEMPLATE,
        PlotKind::Grid => MULTI_PLOT_TEMPLATE,
    }
}

/// Renders a named template against a context.
///
/// Engines must treat option and style strings in the context as opaque TeX
/// and copy them verbatim.
pub trait TemplateEngine {
    /// Renders `template` with `context`.
    fn render(&self, template: &str, context: &RenderContext) -> RenderResult<String>;
}

impl<E: TemplateEngine + ?Sized> TemplateEngine for &E {
    fn render(&self, template: &str, context: &RenderContext) -> RenderResult<String> {
        (**self).render(template, context)
    }
}

/// Conversion of a context into a string-keyed value tree.
///
/// This is the form external template engines consume.
pub trait ContextValue {
    /// The context as a JSON value.
    fn to_value(&self) -> RenderResult<serde_json::Value>;
}

impl ContextValue for RenderContext {
    fn to_value(&self) -> RenderResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use texplot_core::{ContextBuilder, Figure, Plot};

    #[test]
    fn kinds_select_templates() {
        assert_eq!(template_for(PlotKind::Cartesian), "plot.tex");
        assert_eq!(template_for(PlotKind::Polar), "polar_plot.tex");
        assert_eq!(template_for(PlotKind::Grid), "multi_plot.tex");
    }

    #[test]
    fn context_is_a_string_keyed_mapping() {
        let mut plot = Plot::new();
        plot.plot([0.0, 1.0], [0.0, 1.0]).unwrap();
        plot.set_title("Title");
        let context = plot.build_context(&ContextBuilder::default()).unwrap();
        let value = context.to_value().unwrap();
        assert_eq!(value["kind"], "cartesian");
        assert_eq!(value["title"], "Title");
        assert_eq!(value["xmode"], "normal");
        assert_eq!(value["series"][0]["points"][1]["x"], 1.0);
        assert_eq!(value["series"][0]["points"][1]["yerr"], serde_json::Value::Null);
    }
}
