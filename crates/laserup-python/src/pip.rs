//! Dependency synchronization via `python -m pip`.
//!
//! pip is always invoked through the venv interpreter (`python -m pip`) so
//! the upgrade step works on Windows, where `pip.exe` cannot replace itself.
//! Both pip invocations are independently checked; an install failure is
//! never conflated with a later engine failure.

use anyhow::{Context, Result};
use laserup_core::manifest::Manifest;
use std::path::Path;
use std::process::Command;

use crate::process;

/// Stamp file inside the venv dir recording the fingerprint of the last
/// fully-successful install.
const SYNC_STAMP_FILE: &str = ".laserup_synced";

/// What `sync_dependencies` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Manifest fingerprint matched the stamp; nothing installed.
    UpToDate,
    /// pip upgraded and all manifest packages installed.
    Installed,
}

/// Whether the venv's stamp matches the manifest (read-only, for `doctor`).
pub fn is_synced(venv_dir: &Path, manifest: &Manifest) -> bool {
    match std::fs::read_to_string(venv_dir.join(SYNC_STAMP_FILE)) {
        Ok(stamp) => stamp.trim() == manifest.fingerprint(),
        Err(_) => false,
    }
}

/// Upgrade pip and install the manifest into the venv.
///
/// Skipped when the stamp matches the manifest fingerprint, unless `force`.
/// The stamp is written only after both pip steps succeeded, so an aborted
/// install never masquerades as synced.
pub fn sync_dependencies(
    venv_python: &Path,
    venv_dir: &Path,
    manifest: &Manifest,
    force: bool,
) -> Result<SyncOutcome> {
    let fingerprint = manifest.fingerprint();
    let stamp_path = venv_dir.join(SYNC_STAMP_FILE);

    if !force && is_synced(venv_dir, manifest) {
        tracing::debug!(stamp = %stamp_path.display(), "dependencies already in sync");
        return Ok(SyncOutcome::UpToDate);
    }
    if stamp_path.exists() {
        // Invalidate up front: a failed install below must not leave a valid stamp.
        std::fs::remove_file(&stamp_path)
            .with_context(|| format!("remove sync stamp {}", stamp_path.display()))?;
    }

    let mut upgrade = Command::new(venv_python);
    upgrade
        .arg("-m")
        .arg("pip")
        .arg("install")
        .arg("--upgrade")
        .arg("pip")
        .arg("--disable-pip-version-check")
        .arg("--quiet");
    process::capture_checked(&mut upgrade, "upgrade pip")?;

    let mut install = Command::new(venv_python);
    install
        .arg("-m")
        .arg("pip")
        .arg("install")
        .arg("--disable-pip-version-check")
        .arg("--quiet")
        .arg("-r")
        .arg(manifest.path());
    process::capture_checked(&mut install, "install dependencies")?;

    std::fs::write(&stamp_path, &fingerprint)
        .with_context(|| format!("write sync stamp {}", stamp_path.display()))?;
    tracing::info!(
        packages = manifest.requirements().len(),
        "dependencies installed"
    );
    Ok(SyncOutcome::Installed)
}
