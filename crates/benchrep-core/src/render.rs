//! Blocking invocation of the external TeX-to-SVG renderer.

use crate::errors::ReportError;
use anyhow::Context;
use std::path::Path;
use std::process::Command;

/// Runs `tex2svg <name>.tex` in `cwd`, capturing combined output.
///
/// A launch failure or non-zero exit aborts the command; the captured
/// stdout/stderr is included in the report so the TeX error is visible.
pub fn tex_to_svg(name: &str, cwd: &Path) -> anyhow::Result<()> {
    run_renderer("tex2svg", &format!("{name}.tex"), cwd)
}

fn run_renderer(command: &str, document: &str, cwd: &Path) -> anyhow::Result<()> {
    let output = Command::new(command)
        .arg(document)
        .current_dir(cwd)
        .output()
        .with_context(|| format!("failed to launch {command}"))?;
    if !output.status.success() {
        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        return Err(ReportError::Renderer {
            command: command.to_string(),
            status: output.status.code().unwrap_or(-1),
            output: combined,
        }
        .into());
    }
    tracing::debug!(command, document, "rendered document");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::run_renderer;

    #[test]
    fn missing_renderer_reports_launch_failure() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_renderer("benchrep-no-such-renderer", "plot.tex", dir.path()).unwrap_err();
        assert!(
            err.to_string().contains("failed to launch"),
            "unexpected error: {err}"
        );
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_includes_captured_output() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_renderer("false", "plot.tex", dir.path()).unwrap_err();
        assert!(err.to_string().contains("status"), "unexpected error: {err}");
    }
}
