//! Helpers shared by the run/setup/doctor/clean handlers: config assembly
//! from CLI flags, the provisioning steps, and the TTY-gated pause.

use anyhow::{Context, Result};
use laserup_core::config::{BootstrapConfig, ObservabilityConfig, Overrides, PythonVersion};
use laserup_core::manifest::Manifest;
use laserup_python::discovery::{self, PythonRuntime};
use laserup_python::pip::{self, SyncOutcome};
use laserup_python::venv::{self, VenvOutcome};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::exit_codes;
use crate::observability;

/// Assemble the effective config: CLI flag > env (incl. .env) > default.
#[allow(clippy::too_many_arguments)]
pub fn build_config(
    python: Option<String>,
    venv_dir: Option<String>,
    manifest: Option<String>,
    input_dir: Option<String>,
    output_dir: Option<String>,
    entry_point: Option<String>,
) -> Result<BootstrapConfig> {
    let python = python
        .map(|s| {
            s.parse::<PythonVersion>()
                .with_context(|| format!("invalid --python value {s:?} (expected MAJOR.MINOR, e.g. 3.11)"))
        })
        .transpose()?;
    Ok(BootstrapConfig::from_env().with_overrides(Overrides {
        python,
        venv_dir,
        input_dir,
        output_dir,
        entry_point,
        manifest,
    }))
}

/// Result of the shared provisioning steps (runtime, venv, dependencies).
pub struct Provisioned {
    pub runtime: PythonRuntime,
    pub venv_python: PathBuf,
}

/// Which abort path provisioning took. Diagnostics are already printed.
pub enum ProvisionError {
    RuntimeMissing,
    Failed,
}

impl ProvisionError {
    pub fn exit_code(&self) -> i32 {
        match self {
            ProvisionError::RuntimeMissing => exit_codes::NO_RUNTIME,
            ProvisionError::Failed => exit_codes::FAILURE,
        }
    }
}

/// Steps 1-3 of the pipeline: locate the runtime, ensure the venv, sync
/// dependencies. Prints per-step banners against `total` and a distinct
/// diagnostic for each failing step; fail-fast, no later step is attempted.
pub fn provision(
    cfg: &BootstrapConfig,
    run_id: &str,
    force_sync: bool,
    total: usize,
) -> Result<Provisioned, ProvisionError> {
    // Step 1: runtime check — hard precondition, no fallback version.
    let runtime = match discovery::find_python(cfg.python) {
        Ok(rt) => {
            eprintln!(
                "✅ Step 1/{total}: Python {} at {}",
                rt.version_string(),
                rt.display()
            );
            rt
        }
        Err(e) => {
            eprintln!("❌ Step 1/{total}: {e}");
            eprintln!("   Install Python {} and re-run.", cfg.python);
            return Err(ProvisionError::RuntimeMissing);
        }
    };
    observability::audit_step_completed(run_id, "runtime_check", &runtime.version_string());

    // Step 2: virtual environment (idempotent).
    eprintln!();
    let outcome = match venv::ensure_venv(&runtime, &cfg.venv_dir) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("❌ Step 2/{total}: {e:#}");
            return Err(ProvisionError::Failed);
        }
    };
    let how = match outcome {
        VenvOutcome::AlreadyProvisioned => "reused",
        VenvOutcome::Created => "created",
        VenvOutcome::Recreated => "recreated (was incomplete)",
    };
    eprintln!(
        "✅ Step 2/{total}: virtual environment at {} ({how})",
        cfg.venv_dir.display()
    );
    observability::audit_step_completed(run_id, "venv", how);

    // Step 3: dependency sync — independently checked, never conflated with
    // the engine's own failure.
    eprintln!();
    let manifest = match Manifest::load(&cfg.manifest) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("❌ Step 3/{total}: {e:#}");
            return Err(ProvisionError::Failed);
        }
    };
    let venv_python = venv::venv_python(&cfg.venv_dir);
    let sync = match pip::sync_dependencies(&venv_python, &cfg.venv_dir, &manifest, force_sync) {
        Ok(sync) => sync,
        Err(e) => {
            eprintln!("❌ Step 3/{total}: {e:#}");
            return Err(ProvisionError::Failed);
        }
    };
    match sync {
        SyncOutcome::UpToDate => eprintln!(
            "✅ Step 3/{total}: {} dependencies in sync (manifest unchanged)",
            manifest.requirements().len()
        ),
        SyncOutcome::Installed => eprintln!(
            "✅ Step 3/{total}: installed {} package(s) from {}",
            manifest.requirements().len(),
            manifest.path().display()
        ),
    }
    observability::audit_step_completed(
        run_id,
        "dependency_sync",
        if sync == SyncOutcome::UpToDate { "up_to_date" } else { "installed" },
    );

    Ok(Provisioned { runtime, venv_python })
}

/// Pause for a keypress, but only when stdin is a terminal and pausing was
/// not disabled via --no-pause or LASERUP_NO_PAUSE. Scripted use never hangs.
pub fn pause_for_ack(no_pause_flag: bool) {
    if no_pause_flag || ObservabilityConfig::from_env().no_pause {
        return;
    }
    if !std::io::stdin().is_terminal() {
        return;
    }
    eprint!("\nPress Enter to exit...");
    let mut answer = String::new();
    let _ = std::io::stdin().read_line(&mut answer);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_config_cli_overrides_win() {
        let cfg = build_config(
            Some("3.12".to_string()),
            Some(".venv".to_string()),
            None,
            Some("photos".to_string()),
            None,
            None,
        )
        .unwrap();
        assert_eq!(cfg.python, PythonVersion { major: 3, minor: 12 });
        assert_eq!(cfg.venv_dir, PathBuf::from(".venv"));
        assert_eq!(cfg.input_dir, PathBuf::from("photos"));
        assert_eq!(cfg.entry_point, PathBuf::from("main.py"));
    }

    #[test]
    fn test_build_config_rejects_bad_python() {
        let err = build_config(Some("eleven".to_string()), None, None, None, None, None)
            .unwrap_err();
        assert!(err.to_string().contains("--python"));
    }

    #[test]
    fn test_provision_error_exit_codes() {
        assert_eq!(ProvisionError::RuntimeMissing.exit_code(), exit_codes::NO_RUNTIME);
        assert_eq!(ProvisionError::Failed.exit_code(), exit_codes::FAILURE);
    }

    #[test]
    fn test_provision_missing_runtime_fails_fast() {
        let tmp = tempfile::tempdir().unwrap();
        // no interpreter anywhere reports 99.99
        let cfg = BootstrapConfig {
            python: PythonVersion { major: 99, minor: 99 },
            venv_dir: tmp.path().join("venv"),
            input_dir: tmp.path().join("input"),
            output_dir: tmp.path().join("output"),
            entry_point: tmp.path().join("main.py"),
            manifest: tmp.path().join("requirements.txt"),
        };
        let err = match provision(&cfg, "test-run", false, 5) {
            Err(e) => e,
            Ok(_) => panic!("provision must fail without a matching runtime"),
        };
        assert!(matches!(err, ProvisionError::RuntimeMissing));
        // fail-fast: aborted before venv creation and before the manifest
        // (deliberately absent here) was ever consulted
        assert!(!cfg.venv_dir.exists());
    }
}
