//! `laserup setup` — provision without launching.
//!
//! Runs the provisioning steps plus the input scaffold, for first-run setup
//! or CI warm-up. Never invokes the engine.

use anyhow::Result;
use laserup_core::workspace::{self, InputStatus, SUPPORTED_IMAGE_EXTS};

use crate::commands::common;
use crate::observability;

const TOTAL_STEPS: usize = 4;

pub fn cmd_setup(
    python: Option<String>,
    venv: Option<String>,
    manifest: Option<String>,
    input: Option<String>,
    sync: bool,
) -> Result<i32> {
    let cfg = common::build_config(python, venv, manifest, input, None, None)?;
    let run_id = observability::new_run_id();
    observability::audit_run_started(
        &run_id,
        "setup",
        &cfg.input_dir.display().to_string(),
        &cfg.output_dir.display().to_string(),
    );

    tracing::info!(run_id = %run_id, venv = %cfg.venv_dir.display(), "starting setup");
    eprintln!("🚀 laserup setup — provisioning the vectorizer environment...");
    eprintln!();

    let prov = match common::provision(&cfg, &run_id, sync, TOTAL_STEPS) {
        Ok(p) => p,
        Err(e) => return Ok(e.exit_code()),
    };

    // Step 4: input scaffold — create when missing, report either way.
    eprintln!();
    let created = workspace::ensure_input_scaffold(&cfg.input_dir)?;
    if created {
        eprintln!(
            "✅ Step 4/{TOTAL_STEPS}: created input directory {}",
            cfg.input_dir.display()
        );
    } else {
        eprintln!(
            "✅ Step 4/{TOTAL_STEPS}: input directory {} already exists",
            cfg.input_dir.display()
        );
    }
    observability::audit_step_completed(
        &run_id,
        "input_scaffold",
        if created { "created" } else { "existing" },
    );

    eprintln!();
    eprintln!("✅ Setup complete — Python {} ready.", prov.runtime.version_string());
    if let Ok(InputStatus::Empty) | Ok(InputStatus::Missing) = workspace::inspect_input(&cfg.input_dir)
    {
        eprintln!(
            "   Drop images ({}) into {} and run `laserup run`.",
            SUPPORTED_IMAGE_EXTS.join("/"),
            cfg.input_dir.display()
        );
    } else {
        eprintln!("   Run `laserup run` to vectorize.");
    }
    Ok(crate::exit_codes::OK)
}
