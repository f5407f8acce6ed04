use std::fs;
use std::path::{Component, Path, PathBuf};

use directories::{BaseDirs, ProjectDirs};
use serde::Deserialize;

use crate::image::RoundingMode;

const CONFIG_FILE_NAME: &str = "tintbatch.toml";
const DEFAULT_OUTPUT_DIR: &str = "output";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            width: 150,
            height: 200,
        }
    }
}

impl PreviewConfig {
    pub fn size(&self) -> [u32; 2] {
        [self.width.clamp(16, 2048), self.height.clamp(16, 2048)]
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_dir_name: String,
    pub stop_on_error: bool,
    pub jpeg_quality: u8,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir_name: DEFAULT_OUTPUT_DIR.to_string(),
            stop_on_error: false,
            jpeg_quality: 75,
        }
    }
}

impl ExportConfig {
    /// The output directory name, falling back to `output` unless it is a single plain component.
    pub fn output_dir_name_sanitized(&self) -> &str {
        let name = self.output_dir_name.trim();
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => name,
            _ => DEFAULT_OUTPUT_DIR,
        }
    }

    pub fn jpeg_quality_sanitized(&self) -> u8 {
        self.jpeg_quality.clamp(1, 100)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AdjustConfig {
    pub rounding: RoundingMode,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub preview: PreviewConfig,
    pub export: ExportConfig,
    pub adjust: AdjustConfig,
    pub image_limits: ImageLimits,
}

impl AppConfig {
    pub fn load() -> Self {
        for path in Self::candidate_paths() {
            if let Ok(contents) = fs::read_to_string(&path) {
                match Self::parse(&contents) {
                    Ok(cfg) => {
                        log::info!("Loaded config from {}", path.display());
                        return cfg;
                    }
                    Err(err) => {
                        log::warn!("Failed to parse config {}: {err}", path.display());
                    }
                }
            }
        }
        Self::default()
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<Self>(contents)
    }

    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(exe_path) = std::env::current_exe()
            && let Some(dir) = exe_path.parent()
        {
            paths.push(dir.join(CONFIG_FILE_NAME));
        }

        if let Some(proj_dirs) = ProjectDirs::from("dev", "Tintbatch", "Tintbatch") {
            paths.push(proj_dirs.config_dir().join(CONFIG_FILE_NAME));
        }

        if let Some(base_dirs) = BaseDirs::new() {
            paths.push(base_dirs.config_dir().join("tintbatch").join(CONFIG_FILE_NAME));
        }

        paths
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImageLimits {
    pub image_dim: u32,
    pub total_pixels: u64,
    pub alloc_bytes: u64,
}

impl Default for ImageLimits {
    fn default() -> Self {
        Self {
            image_dim: 12_000,
            total_pixels: 80_000_000,       // ~80 MP
            alloc_bytes: 512 * 1024 * 1024, // 512 MiB
        }
    }
}

impl ImageLimits {
    pub fn sanitized(&self) -> Self {
        let dim = self.image_dim.clamp(64, 100_000);
        let pixels = self.total_pixels.clamp(4_096, 5_000_000_000);
        let alloc = self
            .alloc_bytes
            .clamp(8 * 1024 * 1024, 8 * 1024 * 1024 * 1024); // 8 MiB .. 8 GiB
        Self {
            image_dim: dim,
            total_pixels: pixels,
            alloc_bytes: alloc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = AppConfig::parse("").expect("parse");
        assert_eq!(cfg.preview.size(), [150, 200]);
        assert_eq!(cfg.export.output_dir_name_sanitized(), "output");
        assert!(!cfg.export.stop_on_error);
        assert_eq!(cfg.export.jpeg_quality_sanitized(), 75);
        assert_eq!(cfg.adjust.rounding, RoundingMode::Truncate);
    }

    #[test]
    fn sections_override_defaults() {
        let cfg = AppConfig::parse(
            r#"
            [preview]
            width = 300

            [export]
            output_dir_name = "recolored"
            stop_on_error = true
            jpeg_quality = 0

            [adjust]
            rounding = "nearest"
            "#,
        )
        .expect("parse");
        assert_eq!(cfg.preview.size(), [300, 200]);
        assert_eq!(cfg.export.output_dir_name_sanitized(), "recolored");
        assert!(cfg.export.stop_on_error);
        assert_eq!(cfg.export.jpeg_quality_sanitized(), 1);
        assert_eq!(cfg.adjust.rounding, RoundingMode::Nearest);
    }

    #[test]
    fn unknown_rounding_is_a_parse_error() {
        assert!(AppConfig::parse("[adjust]\nrounding = \"banker\"").is_err());
    }

    #[test]
    fn output_dir_must_be_single_component() {
        for bad in ["", "  ", "..", "a/b", "/abs", "."] {
            let cfg = ExportConfig {
                output_dir_name: bad.to_string(),
                ..ExportConfig::default()
            };
            assert_eq!(cfg.output_dir_name_sanitized(), "output", "{bad:?}");
        }
    }

    #[test]
    fn limits_are_clamped() {
        let limits = ImageLimits {
            image_dim: 1,
            total_pixels: u64::MAX,
            alloc_bytes: 0,
        }
        .sanitized();
        assert_eq!(limits.image_dim, 64);
        assert_eq!(limits.total_pixels, 5_000_000_000);
        assert_eq!(limits.alloc_bytes, 8 * 1024 * 1024);
    }
}
