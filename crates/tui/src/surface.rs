//! The rendering seam.
//!
//! [`RenderSurface`] is the contract between the widget core and whatever
//! actually paints. The core mounts element descriptors under ids it chose,
//! hands over one complete constraint set, and asks for repaints; it never
//! computes pixels, awaits animations, or observes paint timing.
//!
//! ## Contract
//!
//! - `mount` introduces one element; ids are caller-chosen and never reused
//!   within a process, so a surface may treat them as stable keys.
//! - `apply` replaces the adopted constraint set wholesale. There is no
//!   partial application: until `apply` returns, the previous layout is the
//!   visible one.
//! - `detach_all` returns the surface to its empty state.
//! - `set_active` starts the animated tint transition for an icon element.
//!   Fire-and-forget: completion is never reported back.
//! - `request_repaint` schedules a redraw at the surface's convenience.

use stepline_layout::{ConstraintSet, ElementId};

use crate::element::ElementSpec;

/// A surface the progress bar renders through.
pub trait RenderSurface {
    /// Mounts a new element under `id`.
    fn mount(&mut self, id: ElementId, spec: ElementSpec);

    /// Adopts `constraints` as the complete layout description, replacing
    /// any previously adopted set in one step.
    fn apply(&mut self, constraints: ConstraintSet);

    /// Unmounts every element and drops the adopted constraint set.
    fn detach_all(&mut self);

    /// Starts the animated tint transition for the icon mounted under `id`.
    /// Ignored for elements that are not icons.
    fn set_active(&mut self, id: ElementId, active: bool);

    /// Asks the surface to repaint at the next opportunity.
    fn request_repaint(&mut self);
}
