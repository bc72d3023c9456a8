//! Step descriptors and their assembled element records.

use ratatui::style::Color;
use stepline_layout::ElementId;

/// One step of the progress bar, as supplied by the caller.
///
/// Descriptors are plain data with no identity beyond their position in the
/// list handed to `initialize`; rebuilding with the same list is
/// indistinguishable from the first build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepDescriptor {
    /// Glyph painted for the step icon.
    pub icon: char,
    /// Tint while the step is active.
    pub active_tint: Color,
    /// Tint while the step is inactive. Steps start inactive.
    pub inactive_tint: Color,
}

impl StepDescriptor {
    pub fn new(icon: char, active_tint: Color, inactive_tint: Color) -> Self {
        Self {
            icon,
            active_tint,
            inactive_tint,
        }
    }
}

/// Identifiers of the two elements assembled for one descriptor.
///
/// The icon is the visible, tintable element; the anchor is the invisible
/// spacer below it that the connecting bar is constrained against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepElement {
    pub icon_id: ElementId,
    pub anchor_id: ElementId,
}

/// Common step glyphs.
pub mod glyphs {
    pub const DOT: char = '●'; // U+25CF
    pub const RING: char = '○'; // U+25CB
    pub const DIAMOND: char = '◆'; // U+25C6
    pub const SQUARE: char = '■'; // U+25A0
    pub const STAR: char = '★'; // U+2605
    pub const CHECK: char = '✓'; // U+2713
}
