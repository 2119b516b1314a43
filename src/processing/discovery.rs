//! Input discovery and output path derivation.
//!
//! [`ImageFiles`] lazily walks an input root and yields every file with a
//! recognized image extension. [`map_output_path`] mirrors one of those
//! files into the output root with the target format's extension.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::utils::{is_supported_input, ConvertResult, OutputFormat, PathError};

/// A matching image found under the input root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    /// Absolute path of the file
    pub path: PathBuf,
    /// Path relative to the input root
    pub relative: PathBuf,
}

/// Lazy recursive walk over the images under a root.
///
/// Symlinked image files are yielded under their link path. Unreadable
/// entries (directories without permission, dangling links) are skipped
/// with a warning and counted in [`ImageFiles::skipped`]; they never end
/// the walk. Yield order is unspecified.
pub struct ImageFiles {
    root: PathBuf,
    walker: walkdir::FilterEntry<walkdir::IntoIter, Box<dyn FnMut(&walkdir::DirEntry) -> bool + Send>>,
    skipped: usize,
}

impl ImageFiles {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::excluding(root, None)
    }

    /// Walks `root` without descending into `exclude` (used when the
    /// output tree lives inside the input tree).
    pub fn excluding(root: impl Into<PathBuf>, exclude: Option<&Path>) -> Self {
        let root = root.into();
        let exclude = exclude.map(Path::to_path_buf);
        let filter: Box<dyn FnMut(&walkdir::DirEntry) -> bool + Send> = Box::new(move |entry: &walkdir::DirEntry| {
            match &exclude {
                Some(excluded) => entry.path() != excluded,
                None => true,
            }
        });

        Self {
            walker: WalkDir::new(&root).follow_links(false).into_iter().filter_entry(filter),
            root,
            skipped: 0,
        }
    }

    /// Number of entries skipped so far because they could not be read.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl Iterator for ImageFiles {
    type Item = DiscoveredFile;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.walker.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    self.skipped += 1;
                    let path = e.path().map(|p| p.display().to_string()).unwrap_or_default();
                    warn!("Skipping unreadable entry {path}: {e}");
                    continue;
                }
            };

            if !is_supported_input(entry.path()) {
                continue;
            }

            let file_type = entry.file_type();
            if file_type.is_symlink() {
                // Resolve only to classify; linked directories are never entered.
                match std::fs::metadata(entry.path()) {
                    Ok(target) if target.is_file() => {}
                    Ok(_) => continue,
                    Err(e) => {
                        self.skipped += 1;
                        warn!("Skipping unresolvable link {}: {e}", entry.path().display());
                        continue;
                    }
                }
            } else if !file_type.is_file() {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(&self.root) else {
                debug!("Entry escaped the walk root: {}", entry.path().display());
                continue;
            };

            return Some(DiscoveredFile {
                relative: relative.to_path_buf(),
                path: entry.into_path(),
            });
        }
    }
}

/// Derives where `input_path` is written: its path relative to
/// `input_root`, re-rooted under `output_root`, with the extension replaced
/// by `format`'s canonical one. Pure; touches no filesystem state.
pub fn map_output_path(
    input_root: &Path,
    output_root: &Path,
    format: OutputFormat,
    input_path: &Path,
) -> ConvertResult<PathBuf> {
    let relative = input_path
        .strip_prefix(input_root)
        .map_err(|_| PathError::OutsideRoot {
            path: input_path.to_path_buf(),
            root: input_root.to_path_buf(),
        })?;

    Ok(output_root.join(relative).with_extension(format.extension()))
}
