//! Declarative constraint model.
//!
//! The types here describe *what* relations hold between elements; none of
//! them compute geometry. [`ConstraintSet`] collects sizes, edge connections,
//! and horizontal chains keyed by [`ElementId`], in insertion order, and the
//! resolver turns the whole set into rectangles in one step.

use indexmap::IndexMap;

use crate::id::ElementId;

/// One of the four rectangle edges.
///
/// `Start`/`End` are the horizontal edges (left/right in a left-to-right
/// locale), `Top`/`Bottom` the vertical ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Start,
    End,
    Top,
    Bottom,
}

impl Edge {
    pub(crate) fn is_horizontal(self) -> bool {
        matches!(self, Edge::Start | Edge::End)
    }
}

/// What a connection points at: the container itself or another element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Parent,
    Element(ElementId),
}

/// Requested size along one axis.
///
/// `MatchConstraint` stretches between two resolved edge connections; with
/// fewer than two connections on that axis it collapses to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Fixed(u16),
    MatchConstraint,
}

impl Default for Dimension {
    fn default() -> Self {
        Dimension::Fixed(0)
    }
}

/// One edge-to-edge connection with an inward margin.
///
/// The margin pushes the element away from the target: a `Start`/`Top`
/// connection lands at `target + margin`, an `End`/`Bottom` connection at
/// `target - margin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    pub target: Target,
    pub target_edge: Edge,
    pub margin: u16,
}

/// How leftover space is distributed across a horizontal chain.
///
/// - `Spread`: equal gaps on both sides of every member (n + 1 gaps).
/// - `SpreadInside`: first and last members flush with the chain anchors,
///   equal gaps between members (n - 1 gaps).
/// - `Packed`: members run edge-to-edge, centered as a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainStyle {
    Spread,
    SpreadInside,
    Packed,
}

/// Per-element constraint slots.
#[derive(Debug, Clone, Default)]
pub(crate) struct ElementConstraints {
    pub(crate) width: Dimension,
    pub(crate) height: Dimension,
    pub(crate) start: Option<Connection>,
    pub(crate) end: Option<Connection>,
    pub(crate) top: Option<Connection>,
    pub(crate) bottom: Option<Connection>,
}

/// A horizontal run of elements positioned as a group between two anchors.
#[derive(Debug, Clone)]
pub(crate) struct HorizontalChain {
    pub(crate) head: Connection,
    pub(crate) tail: Connection,
    pub(crate) members: Vec<ElementId>,
    pub(crate) style: ChainStyle,
}

/// An immutable-once-built description of a complete layout.
///
/// Operations are keyed by element id; an id's entry is created on first
/// mention. The set is applied to a surface atomically: nothing about it is
/// visible until a surface adopts it and resolves it against a container.
#[derive(Debug, Clone, Default)]
pub struct ConstraintSet {
    pub(crate) entries: IndexMap<ElementId, ElementConstraints>,
    pub(crate) chains: Vec<HorizontalChain>,
}

impl ConstraintSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the requested width and height for `id`.
    pub fn size(&mut self, id: ElementId, width: Dimension, height: Dimension) {
        let entry = self.entries.entry(id).or_default();
        entry.width = width;
        entry.height = height;
    }

    /// Connects `edge` of `id` to `target_edge` of `target` with no margin.
    pub fn connect(&mut self, id: ElementId, edge: Edge, target: Target, target_edge: Edge) {
        self.connect_with_margin(id, edge, target, target_edge, 0);
    }

    /// Connects `edge` of `id` to `target_edge` of `target`, keeping `margin`
    /// cells between them. A later connection on the same edge replaces the
    /// earlier one.
    pub fn connect_with_margin(
        &mut self,
        id: ElementId,
        edge: Edge,
        target: Target,
        target_edge: Edge,
        margin: u16,
    ) {
        let connection = Connection {
            target,
            target_edge,
            margin,
        };
        let entry = self.entries.entry(id).or_default();
        match edge {
            Edge::Start => entry.start = Some(connection),
            Edge::End => entry.end = Some(connection),
            Edge::Top => entry.top = Some(connection),
            Edge::Bottom => entry.bottom = Some(connection),
        }
    }

    /// Places `members`, in order, in one horizontal chain between
    /// `head_target`'s `head_edge` and `tail_target`'s `tail_edge`.
    ///
    /// The chain owns its members' horizontal placement; explicit
    /// `Start`/`End` connections on a member are ignored while it belongs to
    /// a chain. Members must have `Fixed` widths. An empty member list is a
    /// no-op.
    pub fn create_horizontal_chain(
        &mut self,
        head_target: Target,
        head_edge: Edge,
        tail_target: Target,
        tail_edge: Edge,
        members: &[ElementId],
        style: ChainStyle,
    ) {
        if members.is_empty() {
            return;
        }
        for id in members {
            self.entries.entry(*id).or_default();
        }
        self.chains.push(HorizontalChain {
            head: Connection {
                target: head_target,
                target_edge: head_edge,
                margin: 0,
            },
            tail: Connection {
                target: tail_target,
                target_edge: tail_edge,
                margin: 0,
            },
            members: members.to_vec(),
            style,
        });
    }

    /// Number of elements the set mentions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `id` appears anywhere in the set.
    pub fn contains(&self, id: ElementId) -> bool {
        self.entries.contains_key(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_mention_creates_an_entry() {
        let mut set = ConstraintSet::new();
        let a = ElementId::next();
        assert!(!set.contains(a));
        set.size(a, Dimension::Fixed(3), Dimension::Fixed(1));
        assert!(set.contains(a));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn later_connection_replaces_earlier_one_on_same_edge() {
        let mut set = ConstraintSet::new();
        let a = ElementId::next();
        set.connect(a, Edge::Top, Target::Parent, Edge::Top);
        set.connect_with_margin(a, Edge::Top, Target::Parent, Edge::Bottom, 2);
        let entry = &set.entries[&a];
        let top = entry.top.unwrap();
        assert_eq!(top.target_edge, Edge::Bottom);
        assert_eq!(top.margin, 2);
        assert!(entry.bottom.is_none());
    }

    #[test]
    fn empty_chain_is_a_no_op() {
        let mut set = ConstraintSet::new();
        set.create_horizontal_chain(
            Target::Parent,
            Edge::Start,
            Target::Parent,
            Edge::End,
            &[],
            ChainStyle::Spread,
        );
        assert!(set.is_empty());
        assert!(set.chains.is_empty());
    }

    #[test]
    fn chain_registers_its_members() {
        let mut set = ConstraintSet::new();
        let a = ElementId::next();
        let b = ElementId::next();
        set.create_horizontal_chain(
            Target::Parent,
            Edge::Start,
            Target::Parent,
            Edge::End,
            &[a, b],
            ChainStyle::Spread,
        );
        assert!(set.contains(a));
        assert!(set.contains(b));
        assert_eq!(set.chains.len(), 1);
    }
}
