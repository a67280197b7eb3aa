// Copyright 2025 the texplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The LaTeX compiler collaborator.
//!
//! Programs run synchronously. Their stdout and stderr are drained on helper
//! threads while the caller waits, so a chatty compiler cannot fill a pipe and
//! stall.

use std::ffi::OsStr;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::config::CompilerConfig;
use crate::error::{RenderError, RenderResult};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Runs the LaTeX compiler and the optional cropper.
#[derive(Clone, Debug, Default)]
pub struct LatexCompiler {
    config: CompilerConfig,
}

impl LatexCompiler {
    /// Creates a compiler from its configuration.
    pub fn new(config: CompilerConfig) -> Self {
        Self { config }
    }

    /// The configuration.
    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Compiles `tex_path` into a PDF next to it and returns the PDF path.
    ///
    /// On timeout the compiler is killed and whatever it wrote so far is left
    /// in place.
    pub fn compile(&self, tex_path: &Path) -> RenderResult<PathBuf> {
        let dir = match tex_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let mut args = self
            .config
            .args
            .iter()
            .map(OsStr::new)
            .collect::<Vec<_>>();
        args.extend([
            OsStr::new("-output-directory"),
            dir.as_os_str(),
            tex_path.as_os_str(),
        ]);
        run(&self.config.program, &args, self.config.timeout())?;

        let pdf = tex_path.with_extension("pdf");
        if pdf.is_file() {
            Ok(pdf)
        } else {
            Err(RenderError::MissingArtifact(pdf))
        }
    }

    /// Crops `pdf_path` in place when a crop program is configured.
    pub fn crop(&self, pdf_path: &Path) -> RenderResult<()> {
        let Some(program) = &self.config.crop_program else {
            return Ok(());
        };
        let cropped = pdf_path.with_file_name("crop-output.pdf");
        let mut args = self
            .config
            .crop_args
            .iter()
            .map(OsStr::new)
            .collect::<Vec<_>>();
        args.extend([pdf_path.as_os_str(), cropped.as_os_str()]);
        run(program, &args, self.config.timeout())?;
        if !cropped.is_file() {
            return Err(RenderError::MissingArtifact(cropped));
        }
        std::fs::rename(&cropped, pdf_path).map_err(RenderError::io(pdf_path))
    }
}

/// Runs a program to completion and returns its combined output.
fn run(program: &str, args: &[&OsStr], timeout: Option<Duration>) -> RenderResult<String> {
    tracing::info!(program, ?timeout, "running");
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| RenderError::Spawn {
            program: program.to_string(),
            source,
        })?;

    let stdout = child.stdout.take().map(drain);
    let stderr = child.stderr.take().map(drain);

    let status = match timeout {
        Some(limit) => wait_with_timeout(&mut child, limit),
        None => child.wait().map(Some),
    }
    .map_err(|source| RenderError::Spawn {
        program: program.to_string(),
        source,
    })?;

    let Some(status) = status else {
        // Grandchildren may still hold the pipes open; the drain threads are
        // left detached instead of joined.
        drop((stdout, stderr));
        let limit = timeout.unwrap_or_default();
        tracing::warn!(program, ?limit, "killed after timeout");
        return Err(RenderError::CompilationTimeout {
            program: program.to_string(),
            timeout: limit,
        });
    };
    let mut output = collect(stdout);
    output.push_str(&collect(stderr));

    if !status.success() {
        tracing::warn!(program, %status, "exited unsuccessfully");
        return Err(RenderError::CompilationFailed {
            program: program.to_string(),
            status,
            output,
        });
    }
    tracing::info!(program, "finished");
    Ok(output)
}

/// Waits for `child`, killing it once `limit` has passed; `None` means killed.
fn wait_with_timeout(child: &mut Child, limit: Duration) -> std::io::Result<Option<ExitStatus>> {
    let deadline = Instant::now() + limit;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            child.kill()?;
            child.wait()?;
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

fn drain(mut pipe: impl Read + Send + 'static) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        // A read error only truncates the captured log.
        let _ = pipe.read_to_end(&mut buf);
        buf
    })
}

fn collect(handle: Option<JoinHandle<Vec<u8>>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .map(|buf| String::from_utf8_lossy(&buf).into_owned())
        .unwrap_or_default()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    use std::fs;

    /// A compiler stand-in: `sh <script> -output-directory <dir> <file>`.
    fn fake(dir: &Path, script: &str, timeout_ms: Option<u64>) -> LatexCompiler {
        let path = dir.join("fake-latex.sh");
        fs::write(&path, script).unwrap();
        LatexCompiler::new(CompilerConfig {
            program: "sh".to_string(),
            args: vec![path.to_string_lossy().into_owned()],
            crop_program: None,
            crop_args: Vec::new(),
            timeout_ms,
        })
    }

    fn tex_file(dir: &Path) -> PathBuf {
        let tex = dir.join("document.tex");
        fs::write(&tex, "\\documentclass{standalone}").unwrap();
        tex
    }

    #[test]
    fn successful_run_returns_the_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let compiler = fake(
            dir.path(),
            "touch \"$2/$(basename \"$3\" .tex).pdf\"\n",
            None,
        );
        let pdf = compiler.compile(&tex_file(dir.path())).unwrap();
        assert_eq!(pdf, dir.path().join("document.pdf"));
        assert!(pdf.is_file());
    }

    #[test]
    fn failure_keeps_the_raw_output() {
        let dir = tempfile::tempdir().unwrap();
        let compiler = fake(
            dir.path(),
            "echo 'This is TeX'\necho '! Undefined control sequence.'\nexit 1\n",
            None,
        );
        let err = compiler.compile(&tex_file(dir.path())).unwrap_err();
        match &err {
            RenderError::CompilationFailed { status, output, .. } => {
                assert_eq!(status.code(), Some(1));
                assert!(output.contains("This is TeX"), "{output}");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().ends_with("! Undefined control sequence."));
    }

    #[test]
    fn slow_compiler_is_killed() {
        let dir = tempfile::tempdir().unwrap();
        let compiler = fake(dir.path(), "exec sleep 5\n", Some(100));
        let started = Instant::now();
        let err = compiler.compile(&tex_file(dir.path())).unwrap_err();
        assert!(
            matches!(err, RenderError::CompilationTimeout { .. }),
            "unexpected error: {err}"
        );
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn timeout_returns_while_a_grandchild_holds_the_pipes() {
        let dir = tempfile::tempdir().unwrap();
        let compiler = fake(dir.path(), "sleep 3\ntrue\n", Some(100));
        let started = Instant::now();
        let err = compiler.compile(&tex_file(dir.path())).unwrap_err();
        assert!(
            matches!(err, RenderError::CompilationTimeout { .. }),
            "unexpected error: {err}"
        );
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn success_without_pdf_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let compiler = fake(dir.path(), "exit 0\n", None);
        let err = compiler.compile(&tex_file(dir.path())).unwrap_err();
        assert!(matches!(err, RenderError::MissingArtifact(_)), "{err}");
    }

    #[test]
    fn missing_program_fails_to_spawn() {
        let dir = tempfile::tempdir().unwrap();
        let compiler = LatexCompiler::new(CompilerConfig {
            program: "texplot-no-such-compiler".to_string(),
            ..CompilerConfig::default()
        });
        let err = compiler.compile(&tex_file(dir.path())).unwrap_err();
        assert!(matches!(err, RenderError::Spawn { .. }), "{err}");
    }
}
