//! Element descriptors handed to render surfaces.

use std::time::Duration;

use ratatui::style::Color;

/// What a surface should mount for one element id.
///
/// Specs carry appearance and animation capability only; size and position
/// are a constraint concern and arrive separately with the adopted
/// constraint set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementSpec {
    /// A step icon: a glyph tintable between its two colors, with an
    /// animated transition of the given duration.
    Icon {
        glyph: char,
        active_tint: Color,
        inactive_tint: Color,
        transition: Duration,
    },
    /// Invisible spacer below an icon. Never painted; exists purely as a
    /// constraint target.
    Anchor,
    /// The shared connecting bar. Tinted once at mount and never animated.
    Bar { tint: Color },
}
