//! Element assembly.
//!
//! The assembler is the bridge between descriptors and a live surface: it
//! mounts one icon and one anchor per descriptor in order, mounts the single
//! connecting bar, and commits the builder's constraint set in one step.
//! Identifiers come from the process-wide allocator, so rebuilt elements
//! never collide with ids from an earlier assembly.

use tracing::debug;

use stepline_layout::ElementId;

use crate::builder::ConstraintGraphBuilder;
use crate::element::ElementSpec;
use crate::step::{StepDescriptor, StepElement};
use crate::style::ProgressBarConfig;
use crate::surface::RenderSurface;

/// Handles to everything one assembly produced.
#[derive(Debug, Clone, Default)]
pub struct Assembly {
    /// One entry per descriptor, in input order.
    pub steps: Vec<StepElement>,
    /// The connecting bar; `None` when the descriptor list was empty.
    pub bar: Option<ElementId>,
}

/// Turns descriptors into mounted, constrained elements.
pub struct LayoutAssembler;

impl LayoutAssembler {
    /// Mounts elements for `descriptors` on `surface`, applies the full
    /// constraint set, and requests a repaint.
    ///
    /// An empty descriptor list is legal: nothing is mounted, no bar is
    /// created, and the empty constraint set is still committed so the
    /// surface ends up with an empty layout rather than a stale one.
    pub fn assemble<S: RenderSurface>(
        descriptors: &[StepDescriptor],
        config: &ProgressBarConfig,
        surface: &mut S,
    ) -> Assembly {
        let mut steps = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            let icon_id = ElementId::next();
            surface.mount(
                icon_id,
                ElementSpec::Icon {
                    glyph: descriptor.icon,
                    active_tint: descriptor.active_tint,
                    inactive_tint: descriptor.inactive_tint,
                    transition: config.animation,
                },
            );

            let anchor_id = ElementId::next();
            surface.mount(anchor_id, ElementSpec::Anchor);

            steps.push(StepElement { icon_id, anchor_id });
        }

        // The bar spans the outer anchors, so it only exists when at least
        // one step does.
        let bar = if steps.is_empty() {
            None
        } else {
            let bar_id = ElementId::next();
            surface.mount(
                bar_id,
                ElementSpec::Bar {
                    tint: config.inactive_tint,
                },
            );
            Some(bar_id)
        };

        let constraints = ConstraintGraphBuilder::new(&steps, bar).build();
        debug!(
            steps = steps.len(),
            elements = constraints.len(),
            "assembled step layout"
        );
        surface.apply(constraints);
        surface.request_repaint();

        Assembly { steps, bar }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use ratatui::style::Color;

    use super::*;
    use crate::surface::testing::RecordingSurface;

    fn config() -> ProgressBarConfig {
        ProgressBarConfig {
            active_tint: Color::Rgb(0x50, 0xFA, 0x7B),
            inactive_tint: Color::Rgb(0x44, 0x47, 0x5A),
            animation: Duration::from_millis(200),
        }
    }

    fn descriptors(count: usize) -> Vec<StepDescriptor> {
        (0..count)
            .map(|_| StepDescriptor::new('●', Color::Rgb(0xFF, 0, 0), Color::Rgb(0x80, 0x80, 0x80)))
            .collect()
    }

    #[test]
    fn mounts_two_elements_per_step_plus_the_bar() {
        let mut surface = RecordingSurface::new();
        let assembly = LayoutAssembler::assemble(&descriptors(3), &config(), &mut surface);

        assert_eq!(assembly.steps.len(), 3);
        assert!(assembly.bar.is_some());
        assert_eq!(surface.icon_count(), 3);
        assert_eq!(surface.anchor_count(), 3);
        assert_eq!(surface.bar_count(), 1);
        assert_eq!(surface.apply_count, 1);
        assert_eq!(surface.repaint_count, 1);
    }

    #[test]
    fn empty_descriptors_mount_nothing_but_still_commit() {
        let mut surface = RecordingSurface::new();
        let assembly = LayoutAssembler::assemble(&[], &config(), &mut surface);

        assert!(assembly.steps.is_empty());
        assert!(assembly.bar.is_none());
        assert!(surface.mounted.is_empty());
        assert_eq!(surface.apply_count, 1);
        assert!(surface.adopted.as_ref().is_some_and(|set| set.is_empty()));
    }

    #[test]
    fn icons_inherit_the_configured_transition() {
        let mut surface = RecordingSurface::new();
        let assembly = LayoutAssembler::assemble(&descriptors(1), &config(), &mut surface);

        let icon = surface.mounted[&assembly.steps[0].icon_id];
        match icon {
            ElementSpec::Icon { transition, .. } => {
                assert_eq!(transition, Duration::from_millis(200));
            }
            other => panic!("expected an icon, got {other:?}"),
        }
    }

    #[test]
    fn bar_is_tinted_with_the_component_inactive_tint() {
        let mut surface = RecordingSurface::new();
        let assembly = LayoutAssembler::assemble(&descriptors(2), &config(), &mut surface);

        let bar = surface.mounted[&assembly.bar.unwrap()];
        assert_eq!(
            bar,
            ElementSpec::Bar {
                tint: config().inactive_tint
            }
        );
    }

    #[test]
    fn assembled_ids_are_fresh_on_every_call() {
        let mut surface = RecordingSurface::new();
        let first = LayoutAssembler::assemble(&descriptors(2), &config(), &mut surface);
        let second = LayoutAssembler::assemble(&descriptors(2), &config(), &mut surface);

        for (a, b) in first.steps.iter().zip(&second.steps) {
            assert_ne!(a.icon_id, b.icon_id);
            assert_ne!(a.anchor_id, b.anchor_id);
        }
        assert_ne!(first.bar, second.bar);
    }
}
