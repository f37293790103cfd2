//! Virtual environment provisioning.
//!
//! Idempotent: an already-provisioned environment is never touched. A venv
//! directory without an interpreter inside is an incomplete environment and
//! gets removed and recreated.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::discovery::PythonRuntime;
use crate::process;

/// What `ensure_venv` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VenvOutcome {
    /// Interpreter already present, nothing done.
    AlreadyProvisioned,
    /// Fresh environment created.
    Created,
    /// Incomplete directory removed, then created.
    Recreated,
}

/// Path of the interpreter inside a venv (`Scripts\python.exe` on Windows,
/// `bin/python` elsewhere). Always invoked by explicit path; no activation.
pub fn venv_python(venv_dir: &Path) -> PathBuf {
    if cfg!(target_os = "windows") {
        venv_dir.join("Scripts").join("python.exe")
    } else {
        venv_dir.join("bin").join("python")
    }
}

/// Whether the venv's interpreter exists.
pub fn is_provisioned(venv_dir: &Path) -> bool {
    venv_python(venv_dir).exists()
}

/// Ensure the venv exists, creating it with `<python> -m venv <dir>` when
/// needed. Skips entirely when already provisioned.
pub fn ensure_venv(runtime: &PythonRuntime, venv_dir: &Path) -> Result<VenvOutcome> {
    if is_provisioned(venv_dir) {
        tracing::debug!(dir = %venv_dir.display(), "venv already provisioned");
        return Ok(VenvOutcome::AlreadyProvisioned);
    }

    let recreated = venv_dir.exists();
    if recreated {
        tracing::warn!(dir = %venv_dir.display(), "removing incomplete virtual environment");
        std::fs::remove_dir_all(venv_dir).with_context(|| {
            format!("remove incomplete virtual environment {}", venv_dir.display())
        })?;
    }

    let mut cmd = runtime.command();
    cmd.arg("-m").arg("venv").arg(venv_dir);
    process::capture_checked(&mut cmd, "create virtual environment")?;

    if !is_provisioned(venv_dir) {
        anyhow::bail!(
            "virtual environment created but interpreter missing at {}",
            venv_python(venv_dir).display()
        );
    }
    tracing::info!(dir = %venv_dir.display(), "virtual environment ready");
    Ok(if recreated {
        VenvOutcome::Recreated
    } else {
        VenvOutcome::Created
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn fake_provisioned(venv_dir: &Path) {
        let py = venv_python(venv_dir);
        fs::create_dir_all(py.parent().unwrap()).unwrap();
        fs::write(&py, "").unwrap();
    }

    #[test]
    fn test_venv_python_layout() {
        let p = venv_python(Path::new("venv"));
        if cfg!(target_os = "windows") {
            assert!(p.ends_with("Scripts/python.exe") || p.ends_with("Scripts\\python.exe"));
        } else {
            assert!(p.ends_with("bin/python"));
        }
    }

    #[test]
    fn test_is_provisioned() {
        let tmp = tempfile::tempdir().unwrap();
        let venv = tmp.path().join("venv");
        assert!(!is_provisioned(&venv));
        fake_provisioned(&venv);
        assert!(is_provisioned(&venv));
    }

    #[cfg(unix)]
    fn stub_runtime(dir: &Path, body: &str) -> PythonRuntime {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join("python-stub");
        fs::write(&path, body).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        PythonRuntime {
            program: path,
            args: Vec::new(),
            major: 3,
            minor: 11,
            patch: 9,
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_ensure_venv_skips_provisioned() {
        let tmp = tempfile::tempdir().unwrap();
        let venv = tmp.path().join("venv");
        fake_provisioned(&venv);
        // stub would fail loudly if invoked
        let runtime = stub_runtime(tmp.path(), "#!/bin/sh\nexit 99\n");
        assert_eq!(
            ensure_venv(&runtime, &venv).unwrap(),
            VenvOutcome::AlreadyProvisioned
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_ensure_venv_creates() {
        let tmp = tempfile::tempdir().unwrap();
        let venv = tmp.path().join("venv");
        // mimics `python -m venv <dir>`: args are `-m venv <dir>`
        let runtime = stub_runtime(
            tmp.path(),
            "#!/bin/sh\nmkdir -p \"$3/bin\"\ntouch \"$3/bin/python\"\n",
        );
        assert_eq!(ensure_venv(&runtime, &venv).unwrap(), VenvOutcome::Created);
        assert!(is_provisioned(&venv));
    }

    #[cfg(unix)]
    #[test]
    fn test_ensure_venv_recreates_incomplete() {
        let tmp = tempfile::tempdir().unwrap();
        let venv = tmp.path().join("venv");
        fs::create_dir_all(&venv).unwrap();
        fs::write(venv.join("pyvenv.cfg"), "stale").unwrap();
        let runtime = stub_runtime(
            tmp.path(),
            "#!/bin/sh\nmkdir -p \"$3/bin\"\ntouch \"$3/bin/python\"\n",
        );
        assert_eq!(ensure_venv(&runtime, &venv).unwrap(), VenvOutcome::Recreated);
        assert!(is_provisioned(&venv));
        assert!(!venv.join("pyvenv.cfg").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_ensure_venv_creation_failure_carries_stderr() {
        let tmp = tempfile::tempdir().unwrap();
        let venv = tmp.path().join("venv");
        let runtime = stub_runtime(tmp.path(), "#!/bin/sh\necho 'no module named venv' >&2\nexit 1\n");
        let err = ensure_venv(&runtime, &venv).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("create virtual environment failed"), "got: {msg}");
        assert!(msg.contains("no module named venv"), "got: {msg}");
    }
}
