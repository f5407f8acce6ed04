use super::adjust::{AdjustmentParameters, RoundingMode, apply_adjustments};
use egui::{ColorImage, Context, TextureHandle, TextureOptions};
use image::RgbaImage;
use image::imageops::{self, FilterType};

/// Apply the full pipeline to `original`, then downscale to the fixed preview size.
pub fn render_preview(
    original: &RgbaImage,
    params: &AdjustmentParameters,
    rounding: RoundingMode,
    size: [u32; 2],
) -> RgbaImage {
    let adjusted = apply_adjustments(original, params, rounding);
    let [w, h] = size;
    if adjusted.width() == 0 || adjusted.height() == 0 {
        return adjusted;
    }
    imageops::resize(&adjusted, w.max(1), h.max(1), FilterType::CatmullRom)
}

pub fn to_color_image(image: &RgbaImage) -> ColorImage {
    ColorImage::from_rgba_unmultiplied(
        [image.width() as usize, image.height() as usize],
        image.as_raw(),
    )
}

/// GPU texture mirroring the latest rendered preview.
pub struct PreviewTexture {
    pub size: [usize; 2],
    pub texture: TextureHandle,
    revision: u64,
}

impl PreviewTexture {
    pub fn new(ctx: &Context, image: &RgbaImage, revision: u64) -> Self {
        let pixels = to_color_image(image);
        let size = pixels.size;
        let texture = ctx.load_texture("preview_image", pixels, TextureOptions::LINEAR);
        Self {
            size,
            texture,
            revision,
        }
    }

    pub const fn revision(&self) -> u64 {
        self.revision
    }

    pub fn update(&mut self, image: &RgbaImage, revision: u64) {
        let pixels = to_color_image(image);
        self.size = pixels.size;
        self.texture.set(pixels, TextureOptions::LINEAR);
        self.revision = revision;
    }
}
