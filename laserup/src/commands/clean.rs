//! `laserup clean` — remove the virtual environment.
//!
//! Re-provisioned on the next `run` or `setup`. Sizes the directory first,
//! confirms unless --force, previews with --dry-run.

use anyhow::{Context, Result};
use laserup_core::config::{BootstrapConfig, Overrides};
use std::fs;

use crate::exit_codes;

pub fn cmd_clean(venv: Option<String>, dry_run: bool, force: bool) -> Result<i32> {
    let cfg = BootstrapConfig::from_env().with_overrides(Overrides {
        venv_dir: venv,
        ..Default::default()
    });
    let venv_dir = &cfg.venv_dir;

    if !venv_dir.exists() {
        eprintln!("No virtual environment at {}", venv_dir.display());
        return Ok(exit_codes::OK);
    }

    let size = dir_size(venv_dir);
    eprintln!(
        "🗂  Virtual environment {} ({})",
        venv_dir.display(),
        format_size(size)
    );

    if dry_run {
        eprintln!();
        eprintln!("(Dry run — no files removed. Remove --dry-run to delete.)");
        return Ok(exit_codes::OK);
    }

    if !force {
        eprint!("\nRemove the virtual environment? [y/N] ");
        let mut answer = String::new();
        std::io::stdin().read_line(&mut answer)?;
        if !matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
            eprintln!("Cancelled.");
            return Ok(exit_codes::OK);
        }
    }

    fs::remove_dir_all(venv_dir)
        .with_context(|| format!("remove virtual environment {}", venv_dir.display()))?;
    tracing::info!(venv = %venv_dir.display(), freed_bytes = size, "removed virtual environment");
    eprintln!();
    eprintln!(
        "✓ Removed {}, freed {}. Run `laserup setup` to re-provision.",
        venv_dir.display(),
        format_size(size)
    );
    Ok(exit_codes::OK)
}

/// Compute total size of a directory recursively.
fn dir_size(path: &std::path::Path) -> u64 {
    let mut total: u64 = 0;
    if let Ok(entries) = fs::read_dir(path) {
        for entry in entries.flatten() {
            let p = entry.path();
            if p.is_dir() {
                total += dir_size(&p);
            } else if let Ok(meta) = p.metadata() {
                total += meta.len();
            }
        }
    }
    total
}

/// Format byte size to human-readable string.
fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else if bytes < 1024 * 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.2} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_units() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3.00 GB");
    }

    #[test]
    fn test_dir_size_recursive() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("a"), vec![0u8; 100]).unwrap();
        let sub = tmp.path().join("sub");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("b"), vec![0u8; 50]).unwrap();
        assert_eq!(dir_size(tmp.path()), 150);
    }

    #[test]
    fn test_dir_size_missing_is_zero() {
        let tmp = tempfile::tempdir().unwrap();
        assert_eq!(dir_size(&tmp.path().join("nope")), 0);
    }
}
