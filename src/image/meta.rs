use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// File metadata for the image currently shown in the preview.
#[derive(Debug, Clone)]
pub struct ImageMeta {
    path: PathBuf,
    byte_len: Option<u64>,
    last_modified: Option<SystemTime>,
    dimensions: (u32, u32),
}

impl ImageMeta {
    /// Build metadata from a filesystem path (size and modified time when available).
    pub fn from_path(path: &Path, dimensions: (u32, u32)) -> Self {
        let metadata = std::fs::metadata(path).ok();
        let (byte_len, last_modified) = metadata.map_or((None, None), |meta| {
            (Some(meta.len()), meta.modified().ok())
        });
        Self {
            path: path.to_owned(),
            byte_len,
            last_modified,
            dimensions,
        }
    }

    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .and_then(|s| s.to_str())
            .map_or_else(|| self.path.display().to_string(), str::to_string)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// One-line summary: `name — W×H px, size, modified`.
    pub fn summary(&self) -> String {
        let (w, h) = self.dimensions;
        let mut parts = vec![format!("{w}×{h} px")];
        if let Some(bytes) = self.byte_len {
            parts.push(human_readable_bytes(bytes));
        }
        if let Some(modified) = self.last_modified {
            parts.push(format_system_time(modified));
        }
        format!("{} — {}", self.display_name(), parts.join(", "))
    }
}

/// Format a byte count with binary units (KiB, MiB, ...).
pub fn human_readable_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    #[allow(clippy::cast_precision_loss)]
    let mut value = bytes as f64;
    let mut unit_idx = 0;
    while value >= 1024.0 && unit_idx < UNITS.len() - 1 {
        value /= 1024.0;
        unit_idx += 1;
    }
    if unit_idx == 0 {
        format!("{bytes} {}", UNITS[unit_idx])
    } else {
        format!("{value:.2} {}", UNITS[unit_idx])
    }
}

/// Format a `SystemTime` as a UTC timestamp string.
pub fn format_system_time(time: SystemTime) -> String {
    let datetime: DateTime<Utc> = DateTime::from(time);
    datetime.format("%Y-%m-%d %H:%M:%S %Z").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn bytes_use_binary_units() {
        assert_eq!(human_readable_bytes(512), "512 B");
        assert_eq!(human_readable_bytes(2048), "2.00 KiB");
        assert_eq!(human_readable_bytes(5 * 1024 * 1024), "5.00 MiB");
    }

    #[test]
    fn timestamps_are_utc() {
        let t = UNIX_EPOCH + Duration::from_secs(86_400);
        assert_eq!(format_system_time(t), "1970-01-02 00:00:00 UTC");
    }

    #[test]
    fn summary_mentions_name_and_size() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("hero.png");
        std::fs::write(&path, [0u8; 10]).expect("write");
        let meta = ImageMeta::from_path(&path, (4, 5));
        let text = meta.summary();
        assert!(text.starts_with("hero.png — 4×5 px, 10 B"), "{text}");
    }
}
