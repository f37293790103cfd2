//! Small subprocess helpers shared by discovery, venv, pip, and launch.
//!
//! Strictly sequential and blocking: no timeouts, no retries. Each helper
//! carries a step label so failures name the step that broke.

use anyhow::{Context, Result};
use std::process::{Command, ExitStatus, Output, Stdio};

/// Render a command line for logs and error messages.
pub fn describe(cmd: &Command) -> String {
    let mut s = cmd.get_program().to_string_lossy().into_owned();
    for arg in cmd.get_args() {
        s.push(' ');
        s.push_str(&arg.to_string_lossy());
    }
    s
}

/// Run to completion with captured output (probe-style invocations).
pub fn capture(cmd: &mut Command, label: &str) -> Result<Output> {
    tracing::debug!(cmd = %describe(cmd), label, "running (captured)");
    cmd.output()
        .with_context(|| format!("{label}: failed to run `{}`", describe(cmd)))
}

/// Run with captured output and fail when the exit status is non-zero,
/// carrying the child's stderr in the diagnostic.
pub fn capture_checked(cmd: &mut Command, label: &str) -> Result<Output> {
    let out = capture(cmd, label)?;
    if !out.status.success() {
        let stderr = String::from_utf8_lossy(&out.stderr);
        anyhow::bail!(
            "{label} failed (exit {}): {}",
            exit_code_label(&out.status),
            stderr.trim()
        );
    }
    Ok(out)
}

/// Run with inherited stdio and wait for the status (the engine's own
/// progress UI streams straight through).
pub fn stream(cmd: &mut Command, label: &str) -> Result<ExitStatus> {
    tracing::debug!(cmd = %describe(cmd), label, "running (inherited stdio)");
    let status = cmd
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .with_context(|| format!("{label}: failed to run `{}`", describe(cmd)))?;
    tracing::debug!(label, exit = %exit_code_label(&status), "finished");
    Ok(status)
}

fn exit_code_label(status: &ExitStatus) -> String {
    match status.code() {
        Some(code) => code.to_string(),
        None => "signal".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_includes_args() {
        let mut cmd = Command::new("python3");
        cmd.arg("-m").arg("venv").arg("venv");
        assert_eq!(describe(&cmd), "python3 -m venv venv");
    }

    #[cfg(unix)]
    #[test]
    fn test_capture_checked_carries_label_and_stderr() {
        use std::os::unix::fs::PermissionsExt;
        let tmp = tempfile::tempdir().unwrap();
        let script = tmp.path().join("fail.sh");
        std::fs::write(&script, "#!/bin/sh\necho boom >&2\nexit 3\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let err = capture_checked(&mut Command::new(&script), "upgrade pip").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("upgrade pip failed"), "got: {msg}");
        assert!(msg.contains("exit 3"), "got: {msg}");
        assert!(msg.contains("boom"), "got: {msg}");
    }

    #[cfg(unix)]
    #[test]
    fn test_capture_checked_success_passes_output_through() {
        use std::os::unix::fs::PermissionsExt;
        let tmp = tempfile::tempdir().unwrap();
        let script = tmp.path().join("ok.sh");
        std::fs::write(&script, "#!/bin/sh\necho hello\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let out = capture_checked(&mut Command::new(&script), "probe").unwrap();
        assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "hello");
    }

    #[test]
    fn test_capture_missing_program_names_step() {
        let err = capture(
            &mut Command::new("laserup-definitely-not-a-real-binary"),
            "runtime probe",
        )
        .unwrap_err();
        assert!(err.to_string().contains("runtime probe"));
    }
}
