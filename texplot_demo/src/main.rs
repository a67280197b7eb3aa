// Copyright 2025 the texplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Writes the texplot demo figures as LaTeX (and optionally PDF) files.

mod figures;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use texplot_core::{BuildConfig, ContextBuilder};
use texplot_render::{CompilerConfig, LatexCompiler, Renderer};
use tracing_subscriber::EnvFilter;

/// Command line options.
#[derive(Parser, Debug)]
#[command(version, about = "Render the texplot demo figures")]
struct Cli {
    /// Directory the figures are written to.
    #[arg(default_value = "texplot-demo")]
    output_dir: PathBuf,

    /// JSON file with `build` and `compiler` settings.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Also compile every figure to PDF.
    #[arg(long)]
    pdf: bool,
}

/// Settings loaded from `--config`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DemoConfig {
    build: BuildConfig,
    compiler: CompilerConfig,
}

fn load_config(path: Option<&Path>) -> Result<DemoConfig> {
    let Some(path) = path else {
        return Ok(DemoConfig::default());
    };
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    fs::create_dir_all(&cli.output_dir)
        .with_context(|| format!("creating {}", cli.output_dir.display()))?;
    let renderer = Renderer::new(ContextBuilder::new(config.build))
        .with_compiler(LatexCompiler::new(config.compiler));

    for (name, figure) in figures::all()? {
        let base = cli.output_dir.join(name);
        let path = renderer
            .save(&figure, &base)
            .with_context(|| format!("saving {name}"))?;
        tracing::info!(path = %path.display(), "wrote figure");
        if cli.pdf {
            let pdf = renderer
                .save_as_pdf(&figure, &base)
                .with_context(|| format!("compiling {name}"))?;
            tracing::info!(path = %pdf.display(), "wrote PDF");
        }
    }
    Ok(())
}
