//! Batch export: re-run the adjustment pipeline over every image in a folder.

use crate::config::{AppConfig, ImageLimits};
use crate::image::{
    AdjustmentParameters, RoundingMode, apply_adjustments, decode_image_from_path, save_image,
};
use anyhow::Context as _;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

/// Snapshot of what to export, taken when the user presses "save all".
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub folder: PathBuf,
    pub files: Vec<String>,
    pub params: AdjustmentParameters,
}

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub output_dir_name: String,
    pub stop_on_error: bool,
    pub jpeg_quality: u8,
    pub rounding: RoundingMode,
    pub limits: ImageLimits,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

impl ExportOptions {
    pub fn from_config(cfg: &AppConfig) -> Self {
        Self {
            output_dir_name: cfg.export.output_dir_name_sanitized().to_string(),
            stop_on_error: cfg.export.stop_on_error,
            jpeg_quality: cfg.export.jpeg_quality_sanitized(),
            rounding: cfg.adjust.rounding,
            limits: cfg.image_limits.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportProgress {
    pub done: usize,
    pub total: usize,
    pub current: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub file: String,
    pub reason: String,
}

/// Outcome of a batch run: which files were written and which failed, and why.
#[derive(Debug, Clone, Default)]
pub struct ExportReport {
    pub output_dir: PathBuf,
    pub written: Vec<String>,
    pub failures: Vec<FileFailure>,
    pub cancelled: bool,
    pub aborted: bool,
}

impl ExportReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && !self.cancelled && !self.aborted
    }

    pub fn summary(&self) -> String {
        let mut msg = format!(
            "Saved {} file(s) → {}",
            self.written.len(),
            self.output_dir.display()
        );
        if !self.failures.is_empty() {
            msg.push_str(&format!("; {} failed", self.failures.len()));
            if let Some(first) = self.failures.first() {
                msg.push_str(&format!(" (first: {}: {})", first.file, first.reason));
            }
        }
        if self.aborted {
            msg.push_str("; stopped after first error");
        }
        if self.cancelled {
            msg.push_str("; cancelled");
        }
        msg
    }
}

fn export_one(
    source: &Path,
    target: &Path,
    params: &AdjustmentParameters,
    opts: &ExportOptions,
) -> anyhow::Result<()> {
    let original = decode_image_from_path(&opts.limits, source)?;
    let adjusted = apply_adjustments(&original, params, opts.rounding);
    save_image(&adjusted, target, opts.jpeg_quality)
}

/// Export every file of `request` into `<folder>/<output_dir_name>`.
///
/// Per-file failures are collected in the report; only failure to create the
/// output directory is returned as an error. `cancel` is checked between files.
pub fn run_export(
    request: &ExportRequest,
    opts: &ExportOptions,
    cancel: &AtomicBool,
    mut progress: impl FnMut(ExportProgress),
) -> anyhow::Result<ExportReport> {
    let output_dir = request.folder.join(&opts.output_dir_name);
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;
    log::info!(
        "Exporting {} file(s) from {} to {}",
        request.files.len(),
        request.folder.display(),
        output_dir.display()
    );

    let total = request.files.len();
    let mut report = ExportReport {
        output_dir,
        ..ExportReport::default()
    };
    for (idx, file) in request.files.iter().enumerate() {
        if cancel.load(Ordering::Relaxed) {
            report.cancelled = true;
            break;
        }
        let source = request.folder.join(file);
        let target = report.output_dir.join(file);
        match export_one(&source, &target, &request.params, opts) {
            Ok(()) => report.written.push(file.clone()),
            Err(err) => {
                log::warn!("Export of {file} failed: {err:#}");
                report.failures.push(FileFailure {
                    file: file.clone(),
                    reason: format!("{err:#}"),
                });
            }
        }
        progress(ExportProgress {
            done: idx + 1,
            total,
            current: file.clone(),
        });
        if opts.stop_on_error && !report.failures.is_empty() && idx + 1 < total {
            report.aborted = true;
            break;
        }
    }

    log::info!("{}", report.summary());
    Ok(report)
}
