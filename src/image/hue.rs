//! Hue rotation in HSV space.

use super::adjust::{RoundingMode, map_rgba_pixels};
use image::{Rgba, RgbaImage};

/// Convert normalized RGB to HSV. Hue is expressed in turns (`0.0..1.0`).
pub fn rgb_to_hsv(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let maxc = r.max(g).max(b);
    let minc = r.min(g).min(b);
    let v = maxc;
    if minc == maxc {
        return (0.0, 0.0, v);
    }
    let range = maxc - minc;
    let s = range / maxc;
    let rc = (maxc - r) / range;
    let gc = (maxc - g) / range;
    let bc = (maxc - b) / range;
    let h = if r == maxc {
        bc - gc
    } else if g == maxc {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };
    ((h / 6.0).rem_euclid(1.0), s, v)
}

/// Convert HSV (hue in turns) back to normalized RGB.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (v, v, v);
    }
    let scaled = h * 6.0;
    let sector = scaled.floor();
    let f = scaled - sector;
    let p = v * (1.0 - s);
    // Fused multiply-add rounds differently and shifts channels by one level.
    #[allow(clippy::suboptimal_flops)]
    let (q, t) = (v * (1.0 - s * f), v * (1.0 - s * (1.0 - f)));
    #[allow(clippy::cast_possible_truncation)]
    match (sector as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

/// Rotate the hue of a single pixel. Fully transparent pixels are returned untouched.
pub fn shift_pixel_hue(pixel: Rgba<u8>, shift: f64, rounding: RoundingMode) -> Rgba<u8> {
    let [r, g, b, a] = pixel.0;
    if a == 0 {
        return pixel;
    }
    let (h, s, v) = rgb_to_hsv(
        f64::from(r) / 255.0,
        f64::from(g) / 255.0,
        f64::from(b) / 255.0,
    );
    let h = (h + shift).rem_euclid(1.0);
    let (r, g, b) = hsv_to_rgb(h, s, v);
    Rgba([
        rounding.to_u8(r * 255.0),
        rounding.to_u8(g * 255.0),
        rounding.to_u8(b * 255.0),
        a,
    ])
}

/// Rotate hue of every non-transparent pixel by `shift` turns.
///
/// The shift is added to each hue before wrapping modulo 1.0, so a full turn is not
/// always bit-identical to no turn. Saturation, value and alpha are preserved; the
/// output has the input's dimensions.
pub fn shift_hue(image: &RgbaImage, shift: f64, rounding: RoundingMode) -> RgbaImage {
    map_rgba_pixels(image, |px| shift_pixel_hue(px, shift, rounding))
}
