//! Linear enhancement stages: each blends a degenerate image toward the source.
//!
//! `out = degenerate + factor * (source - degenerate)`, clamped per channel.
//! Factor 0.0 yields the degenerate image, 1.0 the source, larger values
//! extrapolate past it. Alpha always passes through unchanged.

use super::adjust::{RoundingMode, map_rgba_pixels};
use image::{Rgba, RgbaImage};

/// ITU-R 601 luma in 16.16 fixed point, rounded.
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    let l = (u32::from(r) * 19_595 + u32::from(g) * 38_470 + u32::from(b) * 7_471 + 0x8000) >> 16;
    #[allow(clippy::cast_possible_truncation)]
    {
        l.min(255) as u8
    }
}

/// Mean luma over every pixel (alpha ignored), rounded to the nearest integer.
pub fn mean_luma(image: &RgbaImage) -> u8 {
    let count = u64::from(image.width()) * u64::from(image.height());
    if count == 0 {
        return 0;
    }
    let sum: u64 = image
        .pixels()
        .map(|p| u64::from(luma(p[0], p[1], p[2])))
        .sum();
    #[allow(clippy::cast_possible_truncation)]
    {
        ((sum + count / 2) / count).min(255) as u8
    }
}

fn blend_channel(degenerate: u8, source: u8, factor: f64, rounding: RoundingMode) -> u8 {
    match rounding {
        RoundingMode::Truncate => {
            // Single precision, unfused: truncation exposes any difference in the last bit.
            #[allow(clippy::cast_possible_truncation)]
            let alpha = factor as f32;
            let d = f32::from(degenerate);
            #[allow(clippy::suboptimal_flops)]
            let value = d + alpha * (f32::from(source) - d);
            rounding.to_u8(f64::from(value))
        }
        RoundingMode::Nearest => {
            let d = f64::from(degenerate);
            rounding.to_u8(factor.mul_add(f64::from(source) - d, d))
        }
    }
}

fn blend_pixel(degenerate: [u8; 3], px: Rgba<u8>, factor: f64, rounding: RoundingMode) -> Rgba<u8> {
    let [r, g, b, a] = px.0;
    Rgba([
        blend_channel(degenerate[0], r, factor, rounding),
        blend_channel(degenerate[1], g, factor, rounding),
        blend_channel(degenerate[2], b, factor, rounding),
        a,
    ])
}

/// Scale brightness; 0.0 gives black with the original alpha.
pub fn adjust_brightness(image: &RgbaImage, factor: f64, rounding: RoundingMode) -> RgbaImage {
    map_rgba_pixels(image, |px| blend_pixel([0, 0, 0], px, factor, rounding))
}

/// Scale contrast around the image's mean luma; 0.0 gives a flat mean-grey image.
pub fn adjust_contrast(image: &RgbaImage, factor: f64, rounding: RoundingMode) -> RgbaImage {
    let mean = mean_luma(image);
    map_rgba_pixels(image, |px| {
        blend_pixel([mean, mean, mean], px, factor, rounding)
    })
}

/// Scale saturation; 0.0 gives the per-pixel grayscale.
pub fn adjust_saturation(image: &RgbaImage, factor: f64, rounding: RoundingMode) -> RgbaImage {
    map_rgba_pixels(image, |px| {
        let l = luma(px[0], px[1], px[2]);
        blend_pixel([l, l, l], px, factor, rounding)
    })
}
