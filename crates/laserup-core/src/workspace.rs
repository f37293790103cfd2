//! Input workspace inspection and first-run scaffolding.

use anyhow::{Context, Result};
use std::path::Path;

/// Image extensions the vectorizer engine picks up, matched case-insensitively.
pub const SUPPORTED_IMAGE_EXTS: &[&str] = &["jpg", "jpeg", "png", "bmp"];

/// Result of a non-recursive scan of the input directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputStatus {
    /// The directory does not exist yet.
    Missing,
    /// The path exists but is not a directory.
    NotADirectory,
    /// The directory exists but contains nothing.
    Empty,
    /// The directory has content; `images` counts supported image files.
    Ready { entries: usize, images: usize },
}

impl InputStatus {
    /// Whether the bootstrap may proceed to launching the engine.
    pub fn is_ready(&self) -> bool {
        matches!(self, InputStatus::Ready { .. })
    }
}

/// Inspect the input directory without modifying it.
pub fn inspect_input(dir: &Path) -> Result<InputStatus> {
    if !dir.exists() {
        return Ok(InputStatus::Missing);
    }
    if !dir.is_dir() {
        return Ok(InputStatus::NotADirectory);
    }
    let mut entries = 0usize;
    let mut images = 0usize;
    let read = std::fs::read_dir(dir)
        .with_context(|| format!("read input directory {}", dir.display()))?;
    for entry in read.flatten() {
        entries += 1;
        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
        if is_file && is_supported_image(&entry.file_name().to_string_lossy()) {
            images += 1;
        }
    }
    if entries == 0 {
        Ok(InputStatus::Empty)
    } else {
        Ok(InputStatus::Ready { entries, images })
    }
}

/// Create the input directory when missing (first-run scaffolding).
/// Returns true when the directory was created.
pub fn ensure_input_scaffold(dir: &Path) -> Result<bool> {
    if dir.exists() {
        return Ok(false);
    }
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create input directory {}", dir.display()))?;
    tracing::info!(dir = %dir.display(), "created input directory scaffold");
    Ok(true)
}

fn is_supported_image(file_name: &str) -> bool {
    let Some((_, ext)) = file_name.rsplit_once('.') else {
        return false;
    };
    let ext = ext.to_ascii_lowercase();
    SUPPORTED_IMAGE_EXTS.iter().any(|e| *e == ext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_inspect_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let status = inspect_input(&tmp.path().join("input")).unwrap();
        assert_eq!(status, InputStatus::Missing);
        assert!(!status.is_ready());
    }

    #[test]
    fn test_inspect_not_a_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let p = tmp.path().join("input");
        fs::write(&p, "not a dir").unwrap();
        assert_eq!(inspect_input(&p).unwrap(), InputStatus::NotADirectory);
    }

    #[test]
    fn test_inspect_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let p = tmp.path().join("input");
        fs::create_dir(&p).unwrap();
        assert_eq!(inspect_input(&p).unwrap(), InputStatus::Empty);
    }

    #[test]
    fn test_inspect_counts_supported_images() {
        let tmp = tempfile::tempdir().unwrap();
        let p = tmp.path().join("input");
        fs::create_dir(&p).unwrap();
        fs::write(p.join("a.jpg"), "").unwrap();
        fs::write(p.join("B.PNG"), "").unwrap();
        fs::write(p.join("c.bmp"), "").unwrap();
        fs::write(p.join("notes.txt"), "").unwrap();
        fs::create_dir(p.join("subdir.png")).unwrap(); // dirs never count as images
        let status = inspect_input(&p).unwrap();
        assert_eq!(status, InputStatus::Ready { entries: 5, images: 3 });
        assert!(status.is_ready());
    }

    #[test]
    fn test_inspect_nonempty_without_images_is_ready() {
        let tmp = tempfile::tempdir().unwrap();
        let p = tmp.path().join("input");
        fs::create_dir(&p).unwrap();
        fs::write(p.join("readme.md"), "").unwrap();
        assert_eq!(inspect_input(&p).unwrap(), InputStatus::Ready { entries: 1, images: 0 });
    }

    #[test]
    fn test_ensure_input_scaffold_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let p = tmp.path().join("input");
        assert!(ensure_input_scaffold(&p).unwrap());
        assert!(p.is_dir());
        // second run: already there, nothing created
        assert!(!ensure_input_scaffold(&p).unwrap());
    }

    #[test]
    fn test_is_supported_image_edge_names() {
        assert!(is_supported_image("photo.JPEG"));
        assert!(!is_supported_image("photo"));
        assert!(!is_supported_image("archive.tar.gz"));
        assert!(is_supported_image("weird.name.png"));
    }
}
