//! Engine launch: `<venv_python> <entry> <input_dir> --out <output_dir>`.
//!
//! The engine's exit code is the run's reported outcome. The engine creates
//! its own output directory, so only the input path is passed through as-is.

use anyhow::Result;
use std::path::Path;
use std::process::Command;
use std::time::{Duration, Instant};

use crate::process;

/// Outcome of one engine invocation.
#[derive(Debug, Clone, Copy)]
pub struct EngineRun {
    /// Child exit code; -1 when terminated by a signal.
    pub exit_code: i32,
    pub duration: Duration,
}

impl EngineRun {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Build the engine command line.
pub fn engine_command(
    venv_python: &Path,
    entry: &Path,
    input_dir: &Path,
    output_dir: &Path,
) -> Command {
    let mut cmd = Command::new(venv_python);
    cmd.arg(entry).arg(input_dir).arg("--out").arg(output_dir);
    cmd
}

/// Run the engine with inherited stdio and report its exit code.
pub fn run_engine(
    venv_python: &Path,
    entry: &Path,
    input_dir: &Path,
    output_dir: &Path,
) -> Result<EngineRun> {
    if !entry.exists() {
        anyhow::bail!(
            "engine entry script not found: {} (is this the project root?)",
            entry.display()
        );
    }
    let mut cmd = engine_command(venv_python, entry, input_dir, output_dir);
    let started = Instant::now();
    let status = process::stream(&mut cmd, "run engine")?;
    let duration = started.elapsed();
    let exit_code = status.code().unwrap_or(-1);
    tracing::info!(exit_code, duration_ms = duration.as_millis() as u64, "engine finished");
    Ok(EngineRun { exit_code, duration })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    #[test]
    fn test_engine_command_shape() {
        let cmd = engine_command(
            Path::new("venv/bin/python"),
            Path::new("main.py"),
            Path::new("input"),
            Path::new("output"),
        );
        assert_eq!(cmd.get_program(), "venv/bin/python");
        let args: Vec<String> = cmd
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(args, vec!["main.py", "input", "--out", "output"]);
    }

    #[test]
    fn test_run_engine_missing_entry() {
        let tmp = tempfile::tempdir().unwrap();
        let err = run_engine(
            Path::new("python3"),
            &tmp.path().join("main.py"),
            Path::new("input"),
            Path::new("output"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("entry script not found"));
    }

    #[cfg(unix)]
    fn stub_interpreter(dir: &Path, exit: i32) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join("python");
        fs::write(&path, format!("#!/bin/sh\nexit {exit}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[test]
    fn test_run_engine_reports_zero_exit() {
        let tmp = tempfile::tempdir().unwrap();
        let entry = tmp.path().join("main.py");
        fs::write(&entry, "").unwrap();
        let py = stub_interpreter(tmp.path(), 0);
        let run = run_engine(&py, &entry, Path::new("input"), Path::new("output")).unwrap();
        assert!(run.success());
        assert_eq!(run.exit_code, 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_run_engine_reports_nonzero_exit() {
        let tmp = tempfile::tempdir().unwrap();
        let entry = tmp.path().join("main.py");
        fs::write(&entry, "").unwrap();
        let py = stub_interpreter(tmp.path(), 7);
        let run = run_engine(&py, &entry, Path::new("input"), Path::new("output")).unwrap();
        assert!(!run.success());
        assert_eq!(run.exit_code, 7);
    }
}
