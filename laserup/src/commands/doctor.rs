//! `laserup doctor` — read-only environment report.
//!
//! Human report on stderr, or `--json` on stdout for tooling. Exits 1 when
//! a `laserup run` could not reach the engine from the current state.

use anyhow::Result;
use laserup_core::config::BootstrapConfig;
use laserup_core::manifest::Manifest;
use laserup_core::workspace::{self, InputStatus};
use laserup_python::{discovery, pip, venv};
use serde::Serialize;

use crate::commands::common;
use crate::exit_codes;

#[derive(Debug, Serialize)]
pub struct PythonReport {
    pub command: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct ManifestReport {
    pub packages: usize,
    pub fingerprint: String,
}

#[derive(Debug, Serialize)]
pub struct DoctorReport {
    pub python_required: String,
    /// None when no matching interpreter was found.
    pub python: Option<PythonReport>,
    pub venv_dir: String,
    pub venv_provisioned: bool,
    pub manifest_path: String,
    /// None when the manifest file is missing or unreadable.
    pub manifest: Option<ManifestReport>,
    pub dependencies_synced: bool,
    pub input_dir: String,
    pub input_status: String,
    pub input_images: usize,
    pub output_dir: String,
    pub output_exists: bool,
    pub entry_point: String,
    pub entry_exists: bool,
    /// Whether `laserup run` would reach the engine from here.
    pub launchable: bool,
}

pub fn build_report(cfg: &BootstrapConfig) -> Result<DoctorReport> {
    let python = discovery::find_python(cfg.python).ok().map(|rt| PythonReport {
        command: rt.display(),
        version: rt.version_string(),
    });

    let venv_provisioned = venv::is_provisioned(&cfg.venv_dir);

    let manifest_loaded = Manifest::load(&cfg.manifest).ok();
    let dependencies_synced = manifest_loaded
        .as_ref()
        .map(|m| pip::is_synced(&cfg.venv_dir, m))
        .unwrap_or(false);
    let manifest = manifest_loaded.as_ref().map(|m| ManifestReport {
        packages: m.requirements().len(),
        fingerprint: m.fingerprint(),
    });

    let input = workspace::inspect_input(&cfg.input_dir)?;
    let (input_status, input_images) = match &input {
        InputStatus::Missing => ("missing", 0),
        InputStatus::NotADirectory => ("not_a_directory", 0),
        InputStatus::Empty => ("empty", 0),
        InputStatus::Ready { images, .. } => ("ready", *images),
    };

    let entry_exists = cfg.entry_point.exists();
    // venv/deps are provisioned by `run` itself; they are informational here.
    let launchable =
        python.is_some() && manifest.is_some() && input.is_ready() && entry_exists;

    Ok(DoctorReport {
        python_required: cfg.python.to_string(),
        python,
        venv_dir: cfg.venv_dir.display().to_string(),
        venv_provisioned,
        manifest_path: cfg.manifest.display().to_string(),
        manifest,
        dependencies_synced,
        input_dir: cfg.input_dir.display().to_string(),
        input_status: input_status.to_string(),
        input_images,
        output_dir: cfg.output_dir.display().to_string(),
        output_exists: cfg.output_dir.exists(),
        entry_point: cfg.entry_point.display().to_string(),
        entry_exists,
        launchable,
    })
}

fn print_human(report: &DoctorReport) {
    eprintln!("🩺 laserup doctor");
    eprintln!();
    match &report.python {
        Some(p) => eprintln!("  ✅ Python {} ({})", p.version, p.command),
        None => eprintln!("  ❌ Python {} not found", report.python_required),
    }
    if report.venv_provisioned {
        eprintln!("  ✅ Virtual environment at {}", report.venv_dir);
    } else {
        eprintln!("  ⚠ Virtual environment not provisioned ({})", report.venv_dir);
    }
    match &report.manifest {
        Some(m) => {
            let sync = if report.dependencies_synced { "synced" } else { "not synced" };
            eprintln!("  ✅ Manifest {} ({} package(s), {sync})", report.manifest_path, m.packages);
        }
        None => eprintln!("  ❌ Manifest {} missing", report.manifest_path),
    }
    match report.input_status.as_str() {
        "ready" => eprintln!(
            "  ✅ Input {} ({} supported image(s))",
            report.input_dir, report.input_images
        ),
        status => eprintln!("  ❌ Input {} ({status})", report.input_dir),
    }
    if report.output_exists {
        eprintln!("  ✅ Output {}", report.output_dir);
    } else {
        // the engine creates it on first run
        eprintln!("  ⚠ Output {} (will be created by the engine)", report.output_dir);
    }
    if report.entry_exists {
        eprintln!("  ✅ Entry script {}", report.entry_point);
    } else {
        eprintln!("  ❌ Entry script {} missing", report.entry_point);
    }
    eprintln!();
    if report.launchable {
        eprintln!("✅ Ready: `laserup run` will reach the engine.");
    } else {
        eprintln!("❌ Not launchable yet — fix the items above.");
    }
}

#[allow(clippy::too_many_arguments)]
pub fn cmd_doctor(
    json: bool,
    python: Option<String>,
    venv: Option<String>,
    manifest: Option<String>,
    input: Option<String>,
    out: Option<String>,
    entry: Option<String>,
) -> Result<i32> {
    let cfg = common::build_config(python, venv, manifest, input, out, entry)?;
    let report = build_report(&cfg)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_human(&report);
    }
    Ok(if report.launchable {
        exit_codes::OK
    } else {
        exit_codes::FAILURE
    })
}
