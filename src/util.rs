fn saturating_usize_to_f32(value: usize) -> f32 {
    let as_u32 = u32::try_from(value).unwrap_or(u32::MAX);
    #[allow(clippy::cast_precision_loss)]
    {
        as_u32 as f32
    }
}

pub const fn u32_to_f32(value: u32) -> f32 {
    #[allow(clippy::cast_precision_loss)]
    {
        value as f32
    }
}

/// Fill ratio for a progress bar; an empty batch counts as finished.
pub fn progress_fraction(done: usize, total: usize) -> f32 {
    if total == 0 {
        return 1.0;
    }
    (saturating_usize_to_f32(done) / saturating_usize_to_f32(total)).clamp(0.0, 1.0)
}
