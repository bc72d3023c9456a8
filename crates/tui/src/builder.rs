//! Constraint production for the step chain.
//!
//! The builder turns an assembled element list into the complete declarative
//! constraint set, in four groups: the horizontal spread chain of icons, the
//! vertical centering of each icon, the anchor below each icon, and the bar
//! spanning the outer anchors. Later groups reference earlier elements but
//! never the other way around, so the set always resolves without cycles.

use stepline_layout::{ChainStyle, ConstraintSet, Dimension, Edge, ElementId, Target};

use crate::step::StepElement;

/// Icon box, in cells.
pub(crate) const ICON_WIDTH: u16 = 3;
pub(crate) const ICON_HEIGHT: u16 = 3;
/// Gap between an icon's bottom edge and its anchor.
pub(crate) const ANCHOR_MARGIN: u16 = 1;
/// Gap between the anchor row and the bar.
pub(crate) const BAR_MARGIN: u16 = 1;
pub(crate) const BAR_HEIGHT: u16 = 1;

/// Produces the constraint set for one assembled step list.
///
/// Purely declarative: building the set positions nothing until a surface
/// adopts it and resolves it against a container. Given the same steps in
/// the same order, the produced set resolves to identical geometry.
pub struct ConstraintGraphBuilder<'a> {
    steps: &'a [StepElement],
    bar: Option<ElementId>,
}

impl<'a> ConstraintGraphBuilder<'a> {
    pub fn new(steps: &'a [StepElement], bar: Option<ElementId>) -> Self {
        Self { steps, bar }
    }

    /// Assembles the complete constraint set.
    pub fn build(&self) -> ConstraintSet {
        let mut set = ConstraintSet::new();
        self.constrain_steps(&mut set);
        self.constrain_anchors(&mut set);
        self.constrain_bar(&mut set);
        set
    }

    /// Group 1 and 2: icons sized, chained across the container with spread
    /// distribution, and centered vertically between the container edges.
    fn constrain_steps(&self, set: &mut ConstraintSet) {
        let icon_ids: Vec<ElementId> = self.steps.iter().map(|step| step.icon_id).collect();
        for icon_id in &icon_ids {
            set.size(
                *icon_id,
                Dimension::Fixed(ICON_WIDTH),
                Dimension::Fixed(ICON_HEIGHT),
            );
        }
        set.create_horizontal_chain(
            Target::Parent,
            Edge::Start,
            Target::Parent,
            Edge::End,
            &icon_ids,
            ChainStyle::Spread,
        );
        for icon_id in &icon_ids {
            set.connect(*icon_id, Edge::Top, Target::Parent, Edge::Top);
            set.connect(*icon_id, Edge::Bottom, Target::Parent, Edge::Bottom);
        }
    }

    /// Group 3: each anchor directly below its icon and horizontally
    /// coincident with it.
    fn constrain_anchors(&self, set: &mut ConstraintSet) {
        for step in self.steps {
            set.size(
                step.anchor_id,
                Dimension::MatchConstraint,
                Dimension::Fixed(0),
            );
            set.connect_with_margin(
                step.anchor_id,
                Edge::Top,
                Target::Element(step.icon_id),
                Edge::Bottom,
                ANCHOR_MARGIN,
            );
            set.connect(
                step.anchor_id,
                Edge::Start,
                Target::Element(step.icon_id),
                Edge::Start,
            );
            set.connect(
                step.anchor_id,
                Edge::End,
                Target::Element(step.icon_id),
                Edge::End,
            );
        }
    }

    /// Group 4: the bar from the first anchor's start to the last anchor's
    /// end. Skipped when there is no step to span; the set stays consistent
    /// without it.
    fn constrain_bar(&self, set: &mut ConstraintSet) {
        let (Some(bar), Some(first), Some(last)) =
            (self.bar, self.steps.first(), self.steps.last())
        else {
            return;
        };

        set.size(bar, Dimension::MatchConstraint, Dimension::Fixed(BAR_HEIGHT));
        set.connect_with_margin(
            bar,
            Edge::Top,
            Target::Element(first.anchor_id),
            Edge::Bottom,
            BAR_MARGIN,
        );
        set.connect(
            bar,
            Edge::Start,
            Target::Element(first.anchor_id),
            Edge::Start,
        );
        set.connect(bar, Edge::End, Target::Element(last.anchor_id), Edge::End);
    }
}

#[cfg(test)]
mod tests {
    use stepline_layout::Rect;

    use super::*;

    fn elements(count: usize) -> Vec<StepElement> {
        (0..count)
            .map(|_| StepElement {
                icon_id: ElementId::next(),
                anchor_id: ElementId::next(),
            })
            .collect()
    }

    #[test]
    fn builds_one_entry_per_element() {
        let steps = elements(3);
        let bar = ElementId::next();
        let set = ConstraintGraphBuilder::new(&steps, Some(bar)).build();
        // 3 icons + 3 anchors + 1 bar
        assert_eq!(set.len(), 7);
        assert!(set.contains(bar));
    }

    #[test]
    fn empty_steps_build_an_empty_set() {
        let set = ConstraintGraphBuilder::new(&[], None).build();
        assert!(set.is_empty());
    }

    #[test]
    fn bar_without_steps_is_omitted() {
        let bar = ElementId::next();
        let set = ConstraintGraphBuilder::new(&[], Some(bar)).build();
        assert!(set.is_empty());
    }

    #[test]
    fn anchors_resolve_directly_below_their_icons() {
        let steps = elements(3);
        let bar = ElementId::next();
        let set = ConstraintGraphBuilder::new(&steps, Some(bar)).build();
        let layout = set.resolve(Rect::new(0, 0, 60, 9)).unwrap();

        for step in &steps {
            let icon = layout.rect(step.icon_id).unwrap();
            let anchor = layout.rect(step.anchor_id).unwrap();
            assert_eq!(anchor.y, icon.bottom() + ANCHOR_MARGIN);
            assert_eq!(anchor.x, icon.x);
            assert_eq!(anchor.width, icon.width);
        }
    }

    #[test]
    fn icons_center_vertically_in_the_container() {
        let steps = elements(2);
        let set = ConstraintGraphBuilder::new(&steps, None).build();
        let layout = set.resolve(Rect::new(0, 0, 40, 9)).unwrap();
        for step in &steps {
            assert_eq!(layout.rect(step.icon_id).unwrap().y, 3);
        }
    }

    #[test]
    fn bar_spans_outer_anchors() {
        let steps = elements(3);
        let bar = ElementId::next();
        let set = ConstraintGraphBuilder::new(&steps, Some(bar)).build();
        let layout = set.resolve(Rect::new(0, 0, 60, 9)).unwrap();

        let first = layout.rect(steps[0].anchor_id).unwrap();
        let last = layout.rect(steps[2].anchor_id).unwrap();
        let bar_rect = layout.rect(bar).unwrap();
        assert_eq!(bar_rect.x, first.x);
        assert_eq!(bar_rect.right(), last.right());
        assert_eq!(bar_rect.y, first.bottom() + BAR_MARGIN);
        assert_eq!(bar_rect.height, BAR_HEIGHT);
    }

    #[test]
    fn single_step_bar_collapses_to_the_icon_width() {
        let steps = elements(1);
        let bar = ElementId::next();
        let set = ConstraintGraphBuilder::new(&steps, Some(bar)).build();
        let layout = set.resolve(Rect::new(0, 0, 31, 9)).unwrap();

        let anchor = layout.rect(steps[0].anchor_id).unwrap();
        let bar_rect = layout.rect(bar).unwrap();
        assert_eq!(bar_rect.x, anchor.x);
        assert_eq!(bar_rect.width, ICON_WIDTH);
    }
}
