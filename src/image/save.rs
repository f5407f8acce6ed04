use anyhow::Context as _;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::fs;
use std::io::{self, Cursor, Write as _};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Write `image` to `path`, choosing the encoder from the file extension.
///
/// The image is encoded in memory first and then moved into place, so a failed
/// encode or write never leaves a truncated file at `path`. JPEG carries no alpha
/// channel, so alpha is dropped before encoding.
pub fn save_image(image: &RgbaImage, path: &Path, jpeg_quality: u8) -> anyhow::Result<()> {
    let format = ImageFormat::from_path(path)
        .with_context(|| format!("Unsupported output format for {}", path.display()))?;
    let bytes = encode(image, format, jpeg_quality)
        .with_context(|| format!("Failed to encode {}", path.display()))?;
    write_atomic(path, &bytes)
}

fn encode(image: &RgbaImage, format: ImageFormat, jpeg_quality: u8) -> image::ImageResult<Vec<u8>> {
    let mut bytes = Vec::new();
    match format {
        ImageFormat::Jpeg => {
            let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
            let encoder = JpegEncoder::new_with_quality(&mut bytes, jpeg_quality.clamp(1, 100));
            rgb.write_with_encoder(encoder)?;
        }
        other => image.write_to(&mut Cursor::new(&mut bytes), other)?,
    }
    Ok(bytes)
}

fn build_temp_path(target: &Path) -> PathBuf {
    let parent = target
        .parent()
        .map_or_else(|| Path::new(".").to_path_buf(), Path::to_path_buf);
    let base = target.file_name().map_or_else(
        || "tintbatch_output".to_string(),
        |s| s.to_string_lossy().into_owned(),
    );
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let mut candidate = parent.join(format!(".{base}.{nanos}.tmp"));
    let mut counter = 0u32;
    while candidate.exists() {
        counter = counter.wrapping_add(1);
        candidate = parent.join(format!(".{base}.{nanos}.{counter}.tmp"));
    }
    candidate
}

fn replace_file(tmp_path: &Path, target: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        match fs::rename(tmp_path, target) {
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::AlreadyExists | io::ErrorKind::PermissionDenied
                ) && target.exists() =>
            {
                let _ = fs::remove_file(target);
                fs::rename(tmp_path, target)
            }
            other => other,
        }
    }
    #[cfg(not(windows))]
    {
        fs::rename(tmp_path, target)
    }
}

fn write_atomic(path: &Path, data: &[u8]) -> anyhow::Result<()> {
    let tmp_path = build_temp_path(path);
    let result = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .with_context(|| format!("Failed to create temp file {}", tmp_path.display()))
        .and_then(|mut file| {
            file.write_all(data)
                .and_then(|()| file.sync_all())
                .with_context(|| format!("Failed to write {}", tmp_path.display()))
        })
        .and_then(|()| {
            replace_file(&tmp_path, path)
                .with_context(|| format!("Failed to replace {} with temp file", path.display()))
        });
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}
