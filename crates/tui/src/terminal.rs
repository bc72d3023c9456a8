//! Terminal render surface.
//!
//! [`TerminalSurface`] owns the mounted element specs and the adopted
//! constraint set, resolves the set against whatever area it is asked to
//! paint into, and draws glyphs and the bar into the frame buffer. The
//! resolution is cached until the area or the set changes, so steady-state
//! painting is a plain lookup per element.
//!
//! Tint transitions are sampled against wall-clock time at paint: no
//! threads, no timers. A transition whose window has elapsed settles on
//! its next paint, and a transition started mid-flight continues from the
//! color that was on screen at that moment.

use std::time::{Duration, Instant};

use indexmap::IndexMap;
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use tracing::{debug, warn};
use unicode_width::UnicodeWidthChar;

use stepline_layout::{ConstraintSet, ElementId, ResolvedLayout};

use crate::element::ElementSpec;
use crate::surface::RenderSurface;

const BAR_GLYPH: char = '─';

/// Paint state for one mounted element.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Tint {
    /// Never painted (anchors).
    Hidden,
    /// Painted with one fixed color (the bar).
    Constant(Color),
    /// An icon at rest.
    Settled(Color),
    /// An icon blending from one tint to another.
    Transition {
        from: Color,
        to: Color,
        started: Instant,
        duration: Duration,
    },
}

#[derive(Debug, Clone, Copy)]
struct MountedElement {
    spec: ElementSpec,
    tint: Tint,
}

/// A [`RenderSurface`] that paints into a ratatui frame.
#[derive(Debug, Default)]
pub struct TerminalSurface {
    elements: IndexMap<ElementId, MountedElement>,
    constraints: ConstraintSet,
    resolved: Option<(Rect, ResolvedLayout)>,
    dirty: bool,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paints the current layout into `frame`, clipped to `area`.
    pub fn render(&mut self, frame: &mut Frame<'_>, area: Rect) {
        self.paint(frame.buffer_mut(), area, Instant::now());
    }

    /// Whether painting would change anything on screen: a repaint was
    /// requested, or a tint transition has not painted its final color yet.
    /// `paint` settles completed transitions, so any surviving transition
    /// state means the screen is behind the model.
    pub fn needs_repaint(&self) -> bool {
        self.dirty
            || self
                .elements
                .values()
                .any(|element| matches!(element.tint, Tint::Transition { .. }))
    }

    fn paint(&mut self, buf: &mut Buffer, area: Rect, now: Instant) {
        // Completed transitions settle before resolution so a failed
        // resolve cannot keep `needs_repaint` set forever.
        for element in self.elements.values_mut() {
            if let Tint::Transition {
                to,
                started,
                duration,
                ..
            } = element.tint
            {
                if now.saturating_duration_since(started) >= duration {
                    element.tint = Tint::Settled(to);
                }
            }
        }

        if self.resolved.as_ref().is_none_or(|(cached, _)| *cached != area) {
            match self.constraints.resolve(area) {
                Ok(layout) => self.resolved = Some((area, layout)),
                Err(err) => {
                    warn!(%err, "step layout failed to resolve");
                    self.resolved = None;
                    self.dirty = false;
                    return;
                }
            }
        }
        let Some((_, layout)) = self.resolved.as_ref() else {
            return;
        };

        for (id, element) in &self.elements {
            let Some(rect) = layout.rect(*id) else {
                continue;
            };
            let rect = rect.intersection(area);
            if rect.is_empty() {
                continue;
            }
            let Some(color) = sample_tint(&element.tint, now) else {
                continue;
            };
            match element.spec {
                ElementSpec::Icon { glyph, .. } => {
                    let glyph_width = UnicodeWidthChar::width(glyph).unwrap_or(1) as u16;
                    let x = rect.x + rect.width.saturating_sub(glyph_width) / 2;
                    let y = rect.y + rect.height / 2;
                    buf.set_string(x, y, glyph.to_string(), Style::default().fg(color));
                }
                ElementSpec::Anchor => {}
                ElementSpec::Bar { .. } => {
                    let line = BAR_GLYPH.to_string().repeat(rect.width as usize);
                    for y in rect.y..rect.bottom() {
                        buf.set_string(rect.x, y, &line, Style::default().fg(color));
                    }
                }
            }
        }
        self.dirty = false;
    }
}

impl RenderSurface for TerminalSurface {
    fn mount(&mut self, id: ElementId, spec: ElementSpec) {
        let tint = match spec {
            ElementSpec::Icon { inactive_tint, .. } => Tint::Settled(inactive_tint),
            ElementSpec::Anchor => Tint::Hidden,
            ElementSpec::Bar { tint } => Tint::Constant(tint),
        };
        self.elements.insert(id, MountedElement { spec, tint });
        self.dirty = true;
    }

    fn apply(&mut self, constraints: ConstraintSet) {
        debug!(elements = constraints.len(), "adopted constraint set");
        self.constraints = constraints;
        self.resolved = None;
        self.dirty = true;
    }

    fn detach_all(&mut self) {
        self.elements.clear();
        self.constraints = ConstraintSet::default();
        self.resolved = None;
        self.dirty = true;
    }

    fn set_active(&mut self, id: ElementId, active: bool) {
        let Some(element) = self.elements.get_mut(&id) else {
            debug!(%id, "tint transition ignored: unknown element");
            return;
        };
        let ElementSpec::Icon {
            active_tint,
            inactive_tint,
            transition,
            ..
        } = element.spec
        else {
            debug!(%id, "tint transition ignored: not an icon");
            return;
        };

        let target = if active { active_tint } else { inactive_tint };
        match element.tint {
            Tint::Settled(color) if color == target => return,
            Tint::Transition { to, .. } if to == target => return,
            _ => {}
        }

        let now = Instant::now();
        element.tint = if transition.is_zero() {
            Tint::Settled(target)
        } else {
            let from = sample_tint(&element.tint, now).unwrap_or(inactive_tint);
            Tint::Transition {
                from,
                to: target,
                started: now,
                duration: transition,
            }
        };
        self.dirty = true;
    }

    fn request_repaint(&mut self) {
        self.dirty = true;
    }
}

fn sample_tint(tint: &Tint, now: Instant) -> Option<Color> {
    match tint {
        Tint::Hidden => None,
        Tint::Constant(color) | Tint::Settled(color) => Some(*color),
        Tint::Transition {
            from,
            to,
            started,
            duration,
        } => {
            let elapsed = now.saturating_duration_since(*started);
            if elapsed >= *duration {
                Some(*to)
            } else {
                let t = elapsed.as_secs_f32() / duration.as_secs_f32();
                Some(lerp_color(*from, *to, t))
            }
        }
    }
}

/// Linear RGB interpolation. Colors without RGB components cannot be
/// blended; those hold the source color until the transition ends.
fn lerp_color(from: Color, to: Color, t: f32) -> Color {
    match (rgb(from), rgb(to)) {
        (Some(a), Some(b)) => {
            let t = t.clamp(0.0, 1.0);
            Color::Rgb(
                lerp_channel(a.0, b.0, t),
                lerp_channel(a.1, b.1, t),
                lerp_channel(a.2, b.2, t),
            )
        }
        _ => {
            if t < 1.0 {
                from
            } else {
                to
            }
        }
    }
}

fn lerp_channel(a: u8, b: u8, t: f32) -> u8 {
    (f32::from(a) + (f32::from(b) - f32::from(a)) * t).round() as u8
}

fn rgb(color: Color) -> Option<(u8, u8, u8)> {
    match color {
        Color::Rgb(r, g, b) => Some((r, g, b)),
        _ => None,
    }
}
