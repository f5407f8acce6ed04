use crate::config::ImageLimits;
use anyhow::Context as _;
use image::{GenericImageView, ImageReader, Limits, RgbaImage};
use std::path::Path;

/// Load and decode an image from a filesystem path as 8-bit RGBA, enforcing `limits`.
pub fn decode_image_from_path(limits: &ImageLimits, path: &Path) -> anyhow::Result<RgbaImage> {
    let il = limits.sanitized();
    let mut reader = ImageReader::open(path)
        .with_context(|| format!("Failed to read {}", path.display()))?
        .with_guessed_format()
        .context("Failed to detect image format")?;
    let mut decode_limits = Limits::default();
    decode_limits.max_image_width = Some(il.image_dim);
    decode_limits.max_image_height = Some(il.image_dim);
    decode_limits.max_alloc = Some(il.alloc_bytes);
    reader.limits(decode_limits);
    let img = reader
        .decode()
        .with_context(|| format!("Failed to decode {}", path.display()))?;

    let (w, h) = img.dimensions();
    let total_pixels = u64::from(w) * u64::from(h);
    if total_pixels > il.total_pixels {
        anyhow::bail!(
            "Image too large: {}x{} (~{} MP) exceeds limit (~{} MP)",
            w,
            h,
            total_pixels / 1_000_000,
            il.total_pixels / 1_000_000
        );
    }

    Ok(img.to_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn decodes_png_as_rgba() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("sprite.png");
        RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 40]))
            .save(&path)
            .expect("write png");
        let img = decode_image_from_path(&ImageLimits::default(), &path).expect("decode");
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(2, 1).0, [10, 20, 30, 40]);
    }

    #[test]
    fn garbage_bytes_are_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"definitely not a png").expect("write");
        let err = decode_image_from_path(&ImageLimits::default(), &path).unwrap_err();
        assert!(format!("{err:#}").contains("broken.png"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nope.png");
        let err = decode_image_from_path(&ImageLimits::default(), &path).unwrap_err();
        assert!(err.to_string().contains("nope.png"));
    }

    #[test]
    fn oversized_dimensions_are_rejected() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("wide.png");
        RgbaImage::new(100, 1).save(&path).expect("write png");
        let limits = ImageLimits {
            image_dim: 64,
            ..ImageLimits::default()
        };
        assert!(decode_image_from_path(&limits, &path).is_err());
    }
}
