use super::enhance::{adjust_brightness, adjust_contrast, adjust_saturation};
use super::hue::shift_hue;
use image::{Rgba, RgbaImage};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Minimum pixel count before parallelizing per-pixel transforms.
const PARALLEL_PIXEL_THRESHOLD: usize = 262_144; // 512x512

pub const HUE_SLIDER_MAX: i32 = 360;
pub const FACTOR_SLIDER_MAX: i32 = 300;
pub const FACTOR_SLIDER_NEUTRAL: i32 = 100;

/// How normalized channel values are converted back to 8-bit integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Drop the fractional part (`200.97 -> 200`).
    #[default]
    Truncate,
    /// Round half away from zero (`200.5 -> 201`).
    Nearest,
}

impl RoundingMode {
    /// Convert a value on the 0..=255 scale to `u8`, clamping out-of-range input.
    pub fn to_u8(self, value: f64) -> u8 {
        let value = match self {
            Self::Truncate => value.trunc(),
            Self::Nearest => value.round(),
        };
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            value.clamp(0.0, f64::from(u8::MAX)) as u8
        }
    }
}

/// Integer slider positions as shown in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderValues {
    pub hue: i32,
    pub brightness: i32,
    pub contrast: i32,
    pub saturation: i32,
}

impl Default for SliderValues {
    fn default() -> Self {
        Self {
            hue: 0,
            brightness: FACTOR_SLIDER_NEUTRAL,
            contrast: FACTOR_SLIDER_NEUTRAL,
            saturation: FACTOR_SLIDER_NEUTRAL,
        }
    }
}

impl SliderValues {
    pub fn sanitized(self) -> Self {
        Self {
            hue: self.hue.clamp(0, HUE_SLIDER_MAX),
            brightness: self.brightness.clamp(0, FACTOR_SLIDER_MAX),
            contrast: self.contrast.clamp(0, FACTOR_SLIDER_MAX),
            saturation: self.saturation.clamp(0, FACTOR_SLIDER_MAX),
        }
    }
}

/// The four scalars driving the color transform.
///
/// `hue_shift` is in turns and wraps modulo 1.0. The enhancement factors are
/// plain multipliers where 1.0 leaves the image unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentParameters {
    pub hue_shift: f64,
    pub brightness: f64,
    pub contrast: f64,
    pub saturation: f64,
}

impl Default for AdjustmentParameters {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl AdjustmentParameters {
    pub const IDENTITY: Self = Self {
        hue_shift: 0.0,
        brightness: 1.0,
        contrast: 1.0,
        saturation: 1.0,
    };

    pub fn from_sliders(sliders: SliderValues) -> Self {
        let s = sliders.sanitized();
        let factor = |v: i32| f64::from(v) / f64::from(FACTOR_SLIDER_NEUTRAL);
        Self {
            hue_shift: f64::from(s.hue) / f64::from(HUE_SLIDER_MAX),
            brightness: factor(s.brightness),
            contrast: factor(s.contrast),
            saturation: factor(s.saturation),
        }
    }

    pub fn is_identity(&self) -> bool {
        self.hue_shift.rem_euclid(1.0).abs() <= f64::EPSILON
            && (self.brightness - 1.0).abs() <= f64::EPSILON
            && (self.contrast - 1.0).abs() <= f64::EPSILON
            && (self.saturation - 1.0).abs() <= f64::EPSILON
    }
}

pub(super) fn map_rgba_pixels(
    image: &RgbaImage,
    f: impl Fn(Rgba<u8>) -> Rgba<u8> + Sync + Send,
) -> RgbaImage {
    let (width, height) = image.dimensions();
    let mut out = image.clone();
    if out.len() / 4 >= PARALLEL_PIXEL_THRESHOLD {
        out.par_chunks_exact_mut(4).for_each(|chunk| {
            let px = f(Rgba([chunk[0], chunk[1], chunk[2], chunk[3]]));
            chunk.copy_from_slice(&px.0);
        });
    } else {
        for px in out.pixels_mut() {
            *px = f(*px);
        }
    }
    debug_assert_eq!(out.dimensions(), (width, height));
    out
}

/// Run the full recolor pipeline: hue, then brightness, contrast and saturation.
///
/// Stage order is fixed; contrast measures the mean after brightness and
/// saturation works on the post-contrast values.
pub fn apply_adjustments(
    image: &RgbaImage,
    params: &AdjustmentParameters,
    rounding: RoundingMode,
) -> RgbaImage {
    let img = shift_hue(image, params.hue_shift, rounding);
    let img = adjust_brightness(&img, params.brightness, rounding);
    let img = adjust_contrast(&img, params.contrast, rounding);
    adjust_saturation(&img, params.saturation, rounding)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient() -> RgbaImage {
        RgbaImage::from_fn(8, 8, |x, y| {
            #[allow(clippy::cast_possible_truncation)]
            let (x, y) = (x as u8, y as u8);
            Rgba([x * 30, y * 30, 255 - x * 10, if x == 0 { 0 } else { 255 }])
        })
    }

    #[test]
    fn sliders_map_to_parameters() {
        let params = AdjustmentParameters::from_sliders(SliderValues {
            hue: 90,
            brightness: 150,
            contrast: 0,
            saturation: 300,
        });
        assert!((params.hue_shift - 0.25).abs() < 1e-12);
        assert!((params.brightness - 1.5).abs() < 1e-12);
        assert!(params.contrast.abs() < 1e-12);
        assert!((params.saturation - 3.0).abs() < 1e-12);
    }

    #[test]
    fn default_sliders_are_identity() {
        assert!(AdjustmentParameters::from_sliders(SliderValues::default()).is_identity());
        let full_turn = AdjustmentParameters::from_sliders(SliderValues {
            hue: 360,
            ..SliderValues::default()
        });
        assert!(full_turn.is_identity());
    }

    #[test]
    fn sliders_are_clamped() {
        let s = SliderValues {
            hue: 999,
            brightness: -4,
            contrast: 301,
            saturation: 100,
        }
        .sanitized();
        assert_eq!((s.hue, s.brightness, s.contrast), (360, 0, 300));
    }

    #[test]
    fn rounding_modes_differ_on_fractions() {
        assert_eq!(RoundingMode::Truncate.to_u8(200.97), 200);
        assert_eq!(RoundingMode::Nearest.to_u8(200.97), 201);
        assert_eq!(RoundingMode::Nearest.to_u8(-3.0), 0);
        assert_eq!(RoundingMode::Truncate.to_u8(400.0), 255);
    }

    #[test]
    fn identity_parameters_keep_pixels_with_nearest_rounding() {
        let src = gradient();
        let out = apply_adjustments(&src, &AdjustmentParameters::IDENTITY, RoundingMode::Nearest);
        assert_eq!(out, src);
    }

    #[test]
    fn identity_parameters_stay_within_one_step_when_truncating() {
        let src = gradient();
        let out = apply_adjustments(&src, &AdjustmentParameters::IDENTITY, RoundingMode::Truncate);
        for (a, b) in out.pixels().zip(src.pixels()) {
            for c in 0..4 {
                assert!(a[c].abs_diff(b[c]) <= 1, "{:?} vs {:?}", a.0, b.0);
            }
        }
    }

    #[test]
    fn pipeline_is_deterministic() {
        let src = gradient();
        let params = AdjustmentParameters {
            hue_shift: 0.42,
            brightness: 1.3,
            contrast: 0.7,
            saturation: 2.1,
        };
        let a = apply_adjustments(&src, &params, RoundingMode::Truncate);
        let b = apply_adjustments(&src, &params, RoundingMode::Truncate);
        assert_eq!(a, b);
    }

    #[test]
    fn brightness_zero_turns_red_black_and_keeps_alpha() {
        let src = RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255]));
        let params = AdjustmentParameters {
            brightness: 0.0,
            ..AdjustmentParameters::IDENTITY
        };
        let out = apply_adjustments(&src, &params, RoundingMode::Truncate);
        for px in out.pixels() {
            assert_eq!(px.0, [0, 0, 0, 255]);
        }
    }

    #[test]
    fn parallel_path_matches_serial_path() {
        let big = RgbaImage::from_fn(600, 500, |x, y| {
            #[allow(clippy::cast_possible_truncation)]
            Rgba([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255])
        });
        let params = AdjustmentParameters {
            hue_shift: 0.6,
            ..AdjustmentParameters::IDENTITY
        };
        let whole = apply_adjustments(&big, &params, RoundingMode::Truncate);
        let corner = image::imageops::crop_imm(&big, 0, 0, 10, 10).to_image();
        let corner_out = apply_adjustments(&corner, &params, RoundingMode::Truncate);
        for y in 0..10 {
            for x in 0..10 {
                assert_eq!(whole.get_pixel(x, y), corner_out.get_pixel(x, y));
            }
        }
    }
}
