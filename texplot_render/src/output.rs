// Copyright 2025 the texplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rendering figures to text, files and PDFs.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use texplot_core::{ContextBuilder, Figure};

use crate::compile::LatexCompiler;
use crate::engine::{DOCUMENT_TEMPLATE, TemplateEngine, template_for};
use crate::error::{RenderError, RenderResult};
use crate::pgfplots::PgfplotsEngine;

/// Name of the document written into the temporary build directory.
const BUILD_DOCUMENT: &str = "document.tex";

/// Renders figures through a template engine.
///
/// A renderer holds no per-figure state; one renderer can serve any number of
/// figures.
#[derive(Clone, Debug, Default)]
pub struct Renderer<E = PgfplotsEngine> {
    builder: ContextBuilder,
    engine: E,
    compiler: LatexCompiler,
}

impl Renderer {
    /// A renderer using the built-in PGFPlots templates.
    pub fn new(builder: ContextBuilder) -> Self {
        Self::with_engine(builder, PgfplotsEngine::new())
    }
}

impl<E: TemplateEngine> Renderer<E> {
    /// A renderer using a custom template engine.
    pub fn with_engine(builder: ContextBuilder, engine: E) -> Self {
        Self {
            builder,
            engine,
            compiler: LatexCompiler::default(),
        }
    }

    /// Replaces the compiler used by [`Renderer::save_as_pdf`].
    pub fn with_compiler(mut self, compiler: LatexCompiler) -> Self {
        self.compiler = compiler;
        self
    }

    /// Renders the figure as an includable LaTeX fragment.
    pub fn render(&self, figure: &impl Figure) -> RenderResult<String> {
        let context = self.builder.build(figure)?;
        self.engine.render(template_for(context.kind()), &context)
    }

    /// Renders the figure as a standalone LaTeX document.
    pub fn render_as_document(&self, figure: &impl Figure) -> RenderResult<String> {
        let context = self.builder.build(figure)?;
        self.engine.render(DOCUMENT_TEMPLATE, &context)
    }

    /// Saves the includable fragment; `.tex` is added when `path` has no
    /// extension. Returns the written path.
    pub fn save(&self, figure: &impl Figure, path: impl AsRef<Path>) -> RenderResult<PathBuf> {
        let path = with_default_extension(path.as_ref(), "tex");
        write_file(&path, &self.render(figure)?)?;
        Ok(path)
    }

    /// Saves the standalone document; `.tex` is added when `path` has no
    /// extension. Returns the written path.
    pub fn save_as_document(
        &self,
        figure: &impl Figure,
        path: impl AsRef<Path>,
    ) -> RenderResult<PathBuf> {
        let path = with_default_extension(path.as_ref(), "tex");
        write_file(&path, &self.render_as_document(figure)?)?;
        Ok(path)
    }

    /// Compiles the figure into a PDF; `.pdf` is added when `path` has no
    /// extension. Returns the written path.
    ///
    /// The document is built in a temporary directory that is removed
    /// afterwards, unless compiling or cropping times out.
    pub fn save_as_pdf(
        &self,
        figure: &impl Figure,
        path: impl AsRef<Path>,
    ) -> RenderResult<PathBuf> {
        let dest = with_default_extension(path.as_ref(), "pdf");
        let document = self.render_as_document(figure)?;

        let build_dir = tempfile::Builder::new()
            .prefix("texplot-")
            .tempdir()
            .map_err(RenderError::io(std::env::temp_dir()))?;
        let tex = build_dir.path().join(BUILD_DOCUMENT);
        write_file(&tex, &document)?;

        let built = self
            .compiler
            .compile(&tex)
            .and_then(|pdf| self.compiler.crop(&pdf).map(|()| pdf));
        let pdf = match built {
            Err(err @ RenderError::CompilationTimeout { .. }) => {
                let kept = build_dir.keep();
                tracing::warn!(dir = %kept.display(), "keeping partial build output");
                return Err(err);
            }
            other => other?,
        };
        fs::copy(&pdf, &dest).map_err(RenderError::io(&dest))?;
        tracing::info!(path = %dest.display(), "saved PDF");
        Ok(dest)
    }
}

fn with_default_extension(path: &Path, extension: &str) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(extension)
    }
}

/// Writes `contents` through an owned handle that is closed on every path.
fn write_file(path: &Path, contents: &str) -> RenderResult<()> {
    let mut file = File::create(path).map_err(RenderError::io(path))?;
    file.write_all(contents.as_bytes())
        .and_then(|()| file.flush())
        .map_err(RenderError::io(path))
}
