//! Dependency manifest (`requirements.txt`) loading and fingerprinting.
//!
//! The fingerprint is a SHA-256 over the normalized requirement lines, so
//! comment- or whitespace-only edits never force a reinstall.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// A parsed `requirements.txt`.
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
    /// Raw requirement specifiers, trimmed, comments and blank lines removed.
    requirements: Vec<String>,
}

impl Manifest {
    /// Load and parse the manifest. A missing file is a distinct error so the
    /// dependency step can surface it before pip is ever invoked.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!(
                "dependency manifest not found: {} (create it or point --manifest at one)",
                path.display()
            );
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read manifest {}", path.display()))?;
        let requirements = parse_requirement_lines(&content);
        tracing::debug!(
            path = %path.display(),
            count = requirements.len(),
            "loaded dependency manifest"
        );
        Ok(Self {
            path: path.to_path_buf(),
            requirements,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Requirement specifiers as written (minus comments/blanks).
    pub fn requirements(&self) -> &[String] {
        &self.requirements
    }

    /// Package names with version constraints and extras stripped.
    pub fn package_names(&self) -> Vec<&str> {
        self.requirements
            .iter()
            .map(|r| package_name(r))
            .collect()
    }

    /// SHA-256 over the normalized requirement lines, hex-encoded.
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        for req in &self.requirements {
            hasher.update(req.as_bytes());
            hasher.update(b"\n");
        }
        hex::encode(hasher.finalize())
    }
}

/// Keep trimmed non-empty, non-comment lines.
fn parse_requirement_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(String::from)
        .collect()
}

/// Specifier up to the first version/extras/marker delimiter.
fn package_name(spec: &str) -> &str {
    let end = spec
        .find(|c| matches!(c, '=' | '<' | '>' | '!' | '~' | '[' | ' ' | ';'))
        .unwrap_or(spec.len());
    &spec[..end]
}
