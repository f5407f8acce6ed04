//! Unicode UI icon constants.
//!
//! Uses a BMP-only "safe" subset for broad font coverage (no emoji fonts needed).

pub const ICON_FOLDER: &str = "▤";
pub const ICON_PREV: &str = "◀";
pub const ICON_NEXT: &str = "▶";
pub const ICON_SAVE_ALL: &str = "⇩";
pub const ICON_RESET: &str = "⟳";
pub const ICON_CANCEL: &str = "✖";
