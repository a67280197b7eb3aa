// Copyright 2025 the texplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Template binding, file output and LaTeX compilation for texplot figures.
//!
//! A [`Renderer`] builds a figure's [`RenderContext`](texplot_core::RenderContext)
//! and hands it to a [`TemplateEngine`] under the template name for the figure's
//! kind (see [`template_for`]). The built-in [`PgfplotsEngine`] emits PGFPlots
//! source directly; other engines can consume the context as a JSON value via
//! [`ContextValue`].
//!
//! ```
//! use texplot_core::{ContextBuilder, Plot};
//! use texplot_render::Renderer;
//!
//! let mut plot = Plot::new();
//! plot.plot([0.0, 1.0, 2.0], [0.0, 1.0, 4.0]).unwrap();
//! plot.set_xlabel("time");
//!
//! let tex = Renderer::new(ContextBuilder::default()).render(&plot).unwrap();
//! assert!(tex.contains("\\begin{axis}"));
//! ```

mod compile;
mod config;
mod engine;
mod error;
mod output;
mod pgfplots;

pub use compile::LatexCompiler;
pub use config::CompilerConfig;
pub use engine::{
    ContextValue, DOCUMENT_TEMPLATE, MULTI_PLOT_TEMPLATE, PLOT_TEMPLATE, POLAR_PLOT_TEMPLATE,
    TemplateEngine, template_for,
};
pub use error::{RenderError, RenderResult, error_lines};
pub use output::Renderer;
pub use pgfplots::PgfplotsEngine;
