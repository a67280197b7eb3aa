// Copyright 2025 the texplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compiler configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How PDFs are produced.
///
/// Every field has a default, so a partial JSON object is a valid configuration:
///
/// ```
/// let config: texplot_render::CompilerConfig =
///     serde_json::from_str(r#"{ "timeout_ms": 30000 }"#).unwrap();
/// assert_eq!(config.program, "pdflatex");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// The LaTeX compiler.
    pub program: String,
    /// Arguments placed before `-output-directory <dir> <file>`.
    pub args: Vec<String>,
    /// Cropping program run on the compiled PDF as `<crop> <in> <out>`; `None`
    /// keeps the full page.
    pub crop_program: Option<String>,
    /// Arguments placed before `<in> <out>`.
    pub crop_args: Vec<String>,
    /// Kill the compiler after this many milliseconds; `None` waits forever.
    pub timeout_ms: Option<u64>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            program: "pdflatex".to_string(),
            args: vec!["-halt-on-error".to_string()],
            crop_program: Some("pdfcrop".to_string()),
            crop_args: Vec::new(),
            timeout_ms: None,
        }
    }
}

impl CompilerConfig {
    /// The configured timeout.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config: CompilerConfig =
            serde_json::from_str(r#"{ "crop_program": null, "timeout_ms": 250 }"#).unwrap();
        assert_eq!(config.program, "pdflatex");
        assert_eq!(config.args, ["-halt-on-error"]);
        assert_eq!(config.crop_program, None);
        assert!(config.crop_args.is_empty());
        assert_eq!(config.timeout(), Some(Duration::from_millis(250)));
    }
}
