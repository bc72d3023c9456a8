//! The step progress bar component.
//!
//! [`StepProgressBar`] is the public face of this crate: construct it once
//! with a [`ProgressBarConfig`] and a render surface, then call
//! [`initialize`](StepProgressBar::initialize) whenever the step list
//! changes. Initialization tears the previous scene down and rebuilds it
//! from scratch, so the component can grow, shrink, or empty out at
//! runtime without leaking stale elements.
//!
//! All methods take `&mut self` and run synchronously; drive the component
//! from the one thread that owns it.

use tracing::debug;

use stepline_layout::ElementId;

use crate::assembler::LayoutAssembler;
use crate::builder::{ANCHOR_MARGIN, BAR_HEIGHT, BAR_MARGIN, ICON_HEIGHT};
use crate::step::{StepDescriptor, StepElement};
use crate::style::ProgressBarConfig;
use crate::surface::RenderSurface;

/// Rows the component wants: the icon row plus, mirrored above and below
/// for centering, the anchor gap, the bar gap, and the bar itself.
pub const PREFERRED_HEIGHT: u16 = ICON_HEIGHT + 2 * (ANCHOR_MARGIN + BAR_MARGIN + BAR_HEIGHT);

/// A horizontal chain of step icons joined by a bar.
#[derive(Debug)]
pub struct StepProgressBar<S> {
    config: ProgressBarConfig,
    surface: S,
    steps: Vec<StepElement>,
    bar: Option<ElementId>,
    active: Vec<bool>,
}

impl<S: RenderSurface> StepProgressBar<S> {
    pub fn new(config: ProgressBarConfig, surface: S) -> Self {
        Self {
            config,
            surface,
            steps: Vec::new(),
            bar: None,
            active: Vec::new(),
        }
    }

    /// Rebuilds the component for `descriptors`.
    ///
    /// The previous scene is detached wholesale and a fresh one assembled,
    /// so repeated calls with lists of any length are fine. An empty list
    /// leaves the component mounted with nothing to draw. All steps start
    /// inactive.
    pub fn initialize(&mut self, descriptors: &[StepDescriptor]) {
        self.surface.detach_all();
        let assembly = LayoutAssembler::assemble(descriptors, &self.config, &mut self.surface);
        self.active = vec![false; assembly.steps.len()];
        self.steps = assembly.steps;
        self.bar = assembly.bar;
    }

    /// Turns one step's highlight on or off.
    ///
    /// Out-of-range indices are ignored, and setting a step to the state
    /// it is already in does not restart its tint transition.
    pub fn set_step_active(&mut self, index: usize, active: bool) {
        let Some(step) = self.steps.get(index).copied() else {
            debug!(index, "step toggle ignored: no such step");
            return;
        };
        if self.active[index] == active {
            return;
        }
        self.active[index] = active;
        self.surface.set_active(step.icon_id, active);
    }

    /// Activates every step up to and including `index` and deactivates
    /// the rest. An index past the last step activates all of them.
    pub fn set_active_step(&mut self, index: usize) {
        for i in 0..self.steps.len() {
            self.set_step_active(i, i <= index);
        }
    }

    /// Index of the highest active step, if any.
    pub fn active_step(&self) -> Option<usize> {
        self.active.iter().rposition(|&active| active)
    }

    pub fn is_step_active(&self, index: usize) -> bool {
        self.active.get(index).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Element ids of the current steps, in input order.
    pub fn steps(&self) -> &[StepElement] {
        &self.steps
    }

    /// The connecting bar, present whenever at least one step is.
    pub fn bar(&self) -> Option<ElementId> {
        self.bar
    }

    pub fn config(&self) -> &ProgressBarConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
