use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use crate::core::ConversionRequest;
use crate::utils::{ConvertResult, ValidationError};

/// Roots of a request after validation: the input root canonicalized,
/// the output root made absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRoots {
    pub input_root: PathBuf,
    pub output_root: PathBuf,
}

impl ValidatedRoots {
    /// The output root when it lies strictly inside the input root.
    pub fn nested_output(&self) -> Option<&Path> {
        (self.output_root != self.input_root && self.output_root.starts_with(&self.input_root))
            .then_some(self.output_root.as_path())
    }
}

/// Validates a conversion request before any work is dispatched.
pub async fn validate_request(request: &ConversionRequest) -> ConvertResult<ValidatedRoots> {
    validate_settings(request)?;
    let input_root = validate_input_root(&request.input_root).await?;
    let output_root = validate_output_root(&request.output_root).await?;
    Ok(ValidatedRoots { input_root, output_root })
}

/// Validates width and quality
pub fn validate_settings(request: &ConversionRequest) -> ConvertResult<()> {
    if request.max_width == 0 {
        return Err(ValidationError::settings("Width cannot be 0").into());
    }

    if request.quality == 0 || request.quality > 100 {
        return Err(ValidationError::settings(format!(
            "Invalid quality value: {}. Must be between 1 and 100",
            request.quality
        ))
        .into());
    }

    Ok(())
}

/// Validates the input root exists, is a directory and can be listed.
async fn validate_input_root(path: &Path) -> ConvertResult<PathBuf> {
    let metadata = fs::metadata(path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => ValidationError::path_not_found(path),
        _ => ValidationError::path_io(path, &e),
    })?;

    if !metadata.is_dir() {
        return Err(ValidationError::not_a_directory(path).into());
    }

    // Listing proves readability; the entries themselves are walked later.
    let _entries = fs::read_dir(path)
        .await
        .map_err(|e| ValidationError::path_io(path, &e))?;

    Ok(fs::canonicalize(path)
        .await
        .map_err(|e| ValidationError::path_io(path, &e))?)
}

/// Validates the output root is a directory or does not exist yet.
async fn validate_output_root(path: &Path) -> ConvertResult<PathBuf> {
    match fs::metadata(path).await {
        Ok(metadata) if !metadata.is_dir() => {
            return Err(ValidationError::not_a_directory(path).into());
        }
        Ok(_) => {
            return Ok(fs::canonicalize(path)
                .await
                .map_err(|e| ValidationError::path_io(path, &e))?);
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(ValidationError::path_io(path, &e).into()),
    }

    // Resolve through the deepest existing ancestor so the result compares
    // cleanly against the canonical input root.
    let absolute = std::path::absolute(path).map_err(|e| ValidationError::path_io(path, &e))?;
    let mut existing = absolute.as_path();
    let mut missing = Vec::new();
    while !fs::try_exists(existing).await.unwrap_or(false) {
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            _ => return Ok(absolute),
        }
    }

    let mut resolved = fs::canonicalize(existing)
        .await
        .map_err(|e| ValidationError::path_io(existing, &e))?;
    resolved.extend(missing.iter().rev());
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{ConvertError, PathError};

    #[test]
    fn rejects_zero_width_and_bad_quality() {
        let request = ConversionRequest::new("/in", "/out").with_max_width(0);
        assert!(validate_settings(&request).is_err());

        for quality in [0, 101] {
            let request = ConversionRequest::new("/in", "/out").with_quality(quality);
            assert!(validate_settings(&request).is_err(), "quality {quality}");
        }

        for quality in [1, 100] {
            let request = ConversionRequest::new("/in", "/out").with_quality(quality);
            assert!(validate_settings(&request).is_ok(), "quality {quality}");
        }
    }

    #[tokio::test]
    async fn rejects_missing_input_root() {
        let dir = tempfile::tempdir().unwrap();
        let request = ConversionRequest::new(dir.path().join("missing"), dir.path().join("out"));

        let err = validate_request(&request).await.unwrap_err();
        assert!(matches!(
            err,
            ConvertError::Validation(ValidationError::Path(PathError::NotFound(_)))
        ));
    }

    #[tokio::test]
    async fn rejects_file_as_input_or_output_root() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        std::fs::write(&file, b"x").unwrap();

        let request = ConversionRequest::new(&file, dir.path().join("out"));
        assert!(validate_request(&request).await.unwrap_err().is_validation());

        let request = ConversionRequest::new(dir.path(), &file);
        assert!(validate_request(&request).await.unwrap_err().is_validation());
    }

    #[tokio::test]
    async fn resolves_roots_and_detects_nested_output() {
        let dir = tempfile::tempdir().unwrap();
        let request = ConversionRequest::new(dir.path(), dir.path().join("converted"));

        let roots = validate_request(&request).await.unwrap();
        assert!(roots.input_root.is_absolute());
        assert!(roots.output_root.is_absolute());
        assert!(roots.nested_output().is_some());

        let same = ValidatedRoots {
            input_root: roots.input_root.clone(),
            output_root: roots.input_root.clone(),
        };
        assert!(same.nested_output().is_none());
    }
}
