mod adjust;
mod enhance;
mod hue;
mod load;
mod meta;
mod preview;
mod save;

pub use adjust::{
    AdjustmentParameters, FACTOR_SLIDER_MAX, HUE_SLIDER_MAX, RoundingMode, SliderValues,
    apply_adjustments,
};
pub use load::decode_image_from_path;
pub use meta::ImageMeta;
pub use preview::{PreviewTexture, render_preview};
pub use save::save_image;
