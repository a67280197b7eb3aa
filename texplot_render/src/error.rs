// Copyright 2025 the texplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised while rendering, writing or compiling figures.

use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;

use texplot_core::PlotError;

/// Errors raised while rendering, writing or compiling figures.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The figure's context could not be built.
    #[error(transparent)]
    Plot(#[from] PlotError),
    /// Reading or writing a file failed.
    #[error("I/O error on `{}`: {source}", .path.display())]
    Io {
        /// The file or directory involved.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },
    /// A template could not be rendered.
    #[error("template `{template}`: {reason}")]
    Template {
        /// Template name.
        template: String,
        /// What went wrong.
        reason: String,
    },
    /// The context could not be converted to a generic value.
    #[error("context serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    /// An external program could not be started.
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        /// Program name.
        program: String,
        /// The underlying error.
        source: std::io::Error,
    },
    /// An external program exited unsuccessfully.
    #[error("`{program}` failed ({status}):\n{}", error_lines(.output))]
    CompilationFailed {
        /// Program name.
        program: String,
        /// Exit status.
        status: ExitStatus,
        /// Raw captured stdout and stderr.
        output: String,
    },
    /// An external program did not finish in time and was killed.
    #[error("`{program}` did not finish within {timeout:?}")]
    CompilationTimeout {
        /// Program name.
        program: String,
        /// The configured limit.
        timeout: Duration,
    },
    /// A program succeeded but its expected output file is missing.
    #[error("expected output `{}` was not produced", .0.display())]
    MissingArtifact(PathBuf),
}

/// Result type alias for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

impl RenderError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }

    pub(crate) fn template(template: &str, reason: impl Into<String>) -> Self {
        Self::Template {
            template: template.to_string(),
            reason: reason.into(),
        }
    }
}

/// The TeX error lines (those starting with `!`) of a compiler log.
///
/// Falls back to the whole log when it has none.
pub fn error_lines(output: &str) -> String {
    let lines = output
        .lines()
        .filter(|line| line.starts_with('!'))
        .collect::<Vec<_>>();
    if lines.is_empty() {
        output.trim_end().to_string()
    } else {
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tex_errors_are_extracted() {
        let log = "This is pdfTeX\n! Undefined control sequence.\nl.3 \\foo\n! Emergency stop.\n";
        assert_eq!(
            error_lines(log),
            "! Undefined control sequence.\n! Emergency stop."
        );
        assert_eq!(error_lines("just noise\n"), "just noise");
    }
}
