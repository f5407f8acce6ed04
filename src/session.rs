//! Preview session: the folder, the current original image, the parameters
//! and the rendered preview, owned together by the UI controller.

use crate::config::{AppConfig, ImageLimits};
use crate::export::ExportRequest;
use crate::image::{
    AdjustmentParameters, ImageMeta, RoundingMode, decode_image_from_path, render_preview,
};
use crate::library::ImageSet;
use image::RgbaImage;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub const NOTHING_TO_EXPORT: &str = "No folder selected or no images found.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No folder with images selected.
    Empty,
    /// Folder selected, index valid.
    Loaded,
}

/// Result of selecting a folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderSelection {
    Loaded { count: usize },
    NoImages,
}

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub preview_size: [u32; 2],
    pub rounding: RoundingMode,
    pub limits: ImageLimits,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

impl SessionSettings {
    pub fn from_config(cfg: &AppConfig) -> Self {
        Self {
            preview_size: cfg.preview.size(),
            rounding: cfg.adjust.rounding,
            limits: cfg.image_limits.clone(),
        }
    }
}

pub struct Session {
    settings: SessionSettings,
    folder: Option<PathBuf>,
    images: Option<ImageSet>,
    original: Option<RgbaImage>,
    meta: Option<ImageMeta>,
    params: AdjustmentParameters,
    preview: Option<RgbaImage>,
    preview_revision: u64,
}

impl Session {
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            settings,
            folder: None,
            images: None,
            original: None,
            meta: None,
            params: AdjustmentParameters::IDENTITY,
            preview: None,
            preview_revision: 0,
        }
    }

    pub const fn state(&self) -> SessionState {
        if self.images.is_some() {
            SessionState::Loaded
        } else {
            SessionState::Empty
        }
    }

    /// Last selected folder, even when it held no images.
    pub fn folder(&self) -> Option<&Path> {
        self.folder.as_deref()
    }

    pub const fn image_set(&self) -> Option<&ImageSet> {
        self.images.as_ref()
    }

    pub const fn params(&self) -> &AdjustmentParameters {
        &self.params
    }

    pub const fn preview(&self) -> Option<&RgbaImage> {
        self.preview.as_ref()
    }

    pub const fn current_meta(&self) -> Option<&ImageMeta> {
        self.meta.as_ref()
    }

    /// Bumped every time the preview changes, so the UI knows when to re-upload.
    pub const fn preview_revision(&self) -> u64 {
        self.preview_revision
    }

    /// Scan `folder` and load its first image when it has any.
    ///
    /// The folder is remembered for display either way. A folder with no
    /// images leaves the session empty. If the folder cannot be listed, the
    /// error is returned and the session is left as it was. If only the first
    /// image fails to decode, the session is still loaded and the error is returned.
    pub fn select_folder(&mut self, folder: &Path) -> anyhow::Result<FolderSelection> {
        let set = ImageSet::scan(folder)?;
        self.folder = Some(folder.to_path_buf());
        log::info!("Selected {} ({} image(s))", folder.display(), set.len());
        if set.is_empty() {
            self.images = None;
            self.clear_current();
            return Ok(FolderSelection::NoImages);
        }
        let count = set.len();
        self.images = Some(set);
        self.load_current()?;
        Ok(FolderSelection::Loaded { count })
    }

    /// Advance to the next image (wrapping). No-op when empty.
    pub fn next_image(&mut self) -> anyhow::Result<()> {
        let Some(set) = self.images.as_mut() else {
            return Ok(());
        };
        set.next();
        self.load_current()
    }

    /// Step back to the previous image (wrapping). No-op when empty.
    pub fn previous_image(&mut self) -> anyhow::Result<()> {
        let Some(set) = self.images.as_mut() else {
            return Ok(());
        };
        set.previous();
        self.load_current()
    }

    /// Store new parameters and, when an image is loaded, re-render the preview.
    pub fn set_params(&mut self, params: AdjustmentParameters) {
        self.params = params;
        if self.state() == SessionState::Loaded {
            self.refresh_preview();
        }
    }

    /// Snapshot for a batch export, or the reason nothing can be exported.
    pub fn export_request(&self) -> Result<ExportRequest, &'static str> {
        match &self.images {
            Some(set) if !set.is_empty() => Ok(ExportRequest {
                folder: set.folder().to_path_buf(),
                files: set.file_names().to_vec(),
                params: self.params,
            }),
            _ => Err(NOTHING_TO_EXPORT),
        }
    }

    fn clear_current(&mut self) {
        self.original = None;
        self.meta = None;
        if self.preview.take().is_some() {
            self.preview_revision += 1;
        }
    }

    fn load_current(&mut self) -> anyhow::Result<()> {
        let Some(path) = self.images.as_ref().and_then(ImageSet::current_path) else {
            self.clear_current();
            return Ok(());
        };
        match decode_image_from_path(&self.settings.limits, &path) {
            Ok(img) => {
                self.meta = Some(ImageMeta::from_path(&path, img.dimensions()));
                self.original = Some(img);
                self.refresh_preview();
                Ok(())
            }
            Err(err) => {
                self.clear_current();
                Err(err)
            }
        }
    }

    fn refresh_preview(&mut self) {
        let Some(original) = self.original.as_ref() else {
            return;
        };
        let started = Instant::now();
        let preview = render_preview(
            original,
            &self.params,
            self.settings.rounding,
            self.settings.preview_size,
        );
        log::debug!(
            "Preview rendered in {:.1} ms",
            started.elapsed().as_secs_f64() * 1000.0
        );
        self.preview = Some(preview);
        self.preview_revision += 1;
    }
}

#[cfg(test)]
mod tests;
