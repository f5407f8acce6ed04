//! Folder scanning and cyclic navigation over the images in one directory.

use anyhow::Context as _;
use std::path::{Path, PathBuf};

/// Extensions treated as images (compared case-insensitively).
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

/// Ordered image file names within a folder plus the current preview index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSet {
    folder: PathBuf,
    files: Vec<String>,
    index: usize,
}

impl ImageSet {
    /// List matching regular files directly inside `folder` (no recursion), sorted by name.
    pub fn scan(folder: &Path) -> anyhow::Result<Self> {
        let entries = std::fs::read_dir(folder)
            .with_context(|| format!("Failed to list {}", folder.display()))?;
        let mut files = Vec::new();
        for entry in entries {
            let entry =
                entry.with_context(|| format!("Failed to list {}", folder.display()))?;
            let path = entry.path();
            if !path.is_file() || !is_supported_image(&path) {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => files.push(name),
                Err(raw) => log::warn!("Skipping non UTF-8 file name {raw:?}"),
            }
        }
        files.sort();
        Ok(Self::from_files(folder.to_path_buf(), files))
    }

    pub const fn from_files(folder: PathBuf, files: Vec<String>) -> Self {
        Self {
            folder,
            files,
            index: 0,
        }
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn file_names(&self) -> &[String] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub const fn index(&self) -> usize {
        self.index
    }

    pub fn current_name(&self) -> Option<&str> {
        self.files.get(self.index).map(String::as_str)
    }

    pub fn current_path(&self) -> Option<PathBuf> {
        self.current_name().map(|name| self.folder.join(name))
    }

    /// Advance to the next image, wrapping to the first. No-op on an empty set.
    pub fn next(&mut self) {
        if self.files.is_empty() {
            return;
        }
        self.index = (self.index + 1) % self.files.len();
    }

    /// Step back to the previous image, wrapping to the last. No-op on an empty set.
    pub fn previous(&mut self) {
        if self.files.is_empty() {
            return;
        }
        self.index = (self.index + self.files.len() - 1) % self.files.len();
    }
}
