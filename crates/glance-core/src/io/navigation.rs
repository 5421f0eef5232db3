//! Stepping through the images of one directory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::io::decode::is_supported;

/// Supported image files in the directory containing `path`, sorted by file
/// name.
pub fn list_sibling_images(path: &Path) -> Result<Vec<PathBuf>> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|p| p.is_file() && is_supported(p))
        .collect();
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    debug!(dir = %dir.display(), count = files.len(), "Listed sibling images");
    Ok(files)
}

/// Cursor over a list of files with wrap-around.
#[derive(Clone, Debug)]
pub struct FileCycle {
    files: Vec<PathBuf>,
    index: usize,
}

impl FileCycle {
    /// Cycle over the siblings of `path`, positioned on `path` itself.
    pub fn around(path: &Path) -> Result<Self> {
        Ok(Self::new(list_sibling_images(path)?, path))
    }

    /// Position on `current` within `files`. A `current` missing from the
    /// list is inserted at its sorted position.
    pub fn new(mut files: Vec<PathBuf>, current: &Path) -> Self {
        let name = current.file_name();
        let index = match files.iter().position(|f| f.file_name() == name) {
            Some(i) => i,
            None => {
                let i = files.partition_point(|f| f.file_name() < name);
                files.insert(i, current.to_path_buf());
                i
            }
        };
        Self { files, index }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn current(&self) -> Option<&Path> {
        self.files.get(self.index).map(PathBuf::as_path)
    }

    pub fn next_file(&mut self) -> Option<&Path> {
        if self.files.is_empty() {
            return None;
        }
        self.index = (self.index + 1) % self.files.len();
        self.current()
    }

    pub fn previous_file(&mut self) -> Option<&Path> {
        if self.files.is_empty() {
            return None;
        }
        self.index = (self.index + self.files.len() - 1) % self.files.len();
        self.current()
    }
}
