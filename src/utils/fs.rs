use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use crate::utils::{ConvertError, ConvertResult};

/// Creates the parent directory of `path` (recursively). Already existing is fine.
pub fn ensure_parent_dir(path: impl AsRef<Path>) -> ConvertResult<()> {
    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConvertError::io(format!(
                    "Cannot create output directory {}: {e}",
                    parent.display()
                ))
            })?;
        }
    }
    Ok(())
}

/// Writes `bytes` to `path` through a temp file in the same directory,
/// renamed into place once fully flushed. The temp file is removed if any
/// step fails, so a partially written output never appears at `path`.
pub fn write_atomic(path: impl AsRef<Path>, bytes: &[u8]) -> ConvertResult<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)
        .map_err(|e| ConvertError::io(format!("Cannot create temp file in {}: {e}", dir.display())))?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| {
        ConvertError::io(format!("Cannot move output into place at {}: {}", path.display(), e.error))
    })?;
    Ok(())
}

/// Get the final path component as a lowercase string
pub fn lowercase_file_name(path: impl AsRef<Path>) -> Option<String> {
    path.as_ref()
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.to_lowercase())
}
