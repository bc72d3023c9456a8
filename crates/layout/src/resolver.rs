//! Constraint resolution.
//!
//! Resolution is a fixpoint worklist over two independent axes. Chains place
//! their members' horizontal spans as a group; every other span comes from
//! the element's own edge connections. An element's span can be computed as
//! soon as the edges it targets are known, so each pass resolves everything
//! whose dependencies landed in an earlier pass. A pass that makes no
//! progress while work remains means the connections form a cycle.
//!
//! All arithmetic is saturating `u16` cell math: a container too small for
//! its content produces clipped, overlapping rectangles rather than a panic,
//! and the same set resolved against the same container always yields the
//! same rectangles.

use std::collections::HashSet;

use indexmap::IndexMap;
use ratatui::layout::Rect;

use crate::constraint::{
    ChainStyle, Connection, ConstraintSet, Dimension, Edge, HorizontalChain, Target,
};
use crate::error::ResolveError;
use crate::id::ElementId;

/// Offset and extent along one axis.
type Span = (u16, u16);

/// Resolved geometry: one [`Rect`] per element, in set insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedLayout {
    rects: IndexMap<ElementId, Rect>,
}

impl ResolvedLayout {
    /// The resolved rectangle for `id`, if the set mentioned it.
    pub fn rect(&self, id: ElementId) -> Option<Rect> {
        self.rects.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Iterates elements in the order the set first mentioned them.
    pub fn iter(&self) -> impl Iterator<Item = (ElementId, Rect)> + '_ {
        self.rects.iter().map(|(id, rect)| (*id, *rect))
    }
}

impl ConstraintSet {
    /// Resolves the whole set against `container` in one step.
    ///
    /// Returns the geometry for every element the set mentions, or the first
    /// structural problem found. Resolution never partially applies: on error
    /// no geometry is produced at all.
    pub fn resolve(&self, container: Rect) -> Result<ResolvedLayout, ResolveError> {
        self.validate()?;

        let chained: HashSet<ElementId> = self
            .chains
            .iter()
            .flat_map(|chain| chain.members.iter().copied())
            .collect();
        let chain_widths: Vec<Vec<u16>> = self
            .chains
            .iter()
            .map(|chain| {
                chain
                    .members
                    .iter()
                    .map(|id| fixed_extent(self.entries[id].width))
                    .collect()
            })
            .collect();

        let mut horizontal: IndexMap<ElementId, Span> = IndexMap::new();
        let mut vertical: IndexMap<ElementId, Span> = IndexMap::new();
        let mut pending_chain = vec![true; self.chains.len()];

        loop {
            let mut progress = false;

            for (index, chain) in self.chains.iter().enumerate() {
                if !pending_chain[index] {
                    continue;
                }
                if let Some(spans) =
                    chain_spans(chain, &chain_widths[index], &horizontal, container)
                {
                    for (member, span) in chain.members.iter().zip(spans) {
                        horizontal.insert(*member, span);
                    }
                    pending_chain[index] = false;
                    progress = true;
                }
            }

            for (id, entry) in &self.entries {
                if !horizontal.contains_key(id) && !chained.contains(id) {
                    let resolved = resolve_span(
                        entry.width,
                        entry.start,
                        entry.end,
                        |conn| horizontal_anchor(conn, &horizontal, container),
                        container.x,
                    );
                    if let Some(span) = resolved {
                        horizontal.insert(*id, span);
                        progress = true;
                    }
                }
                if !vertical.contains_key(id) {
                    let resolved = resolve_span(
                        entry.height,
                        entry.top,
                        entry.bottom,
                        |conn| vertical_anchor(conn, &vertical, container),
                        container.y,
                    );
                    if let Some(span) = resolved {
                        vertical.insert(*id, span);
                        progress = true;
                    }
                }
            }

            let done = horizontal.len() == self.entries.len()
                && vertical.len() == self.entries.len()
                && pending_chain.iter().all(|pending| !pending);
            if done {
                break;
            }
            if !progress {
                let unresolved = self
                    .entries
                    .keys()
                    .filter(|id| !horizontal.contains_key(*id) || !vertical.contains_key(*id))
                    .copied()
                    .collect();
                return Err(ResolveError::Cycle(unresolved));
            }
        }

        let mut rects = IndexMap::with_capacity(self.entries.len());
        for id in self.entries.keys() {
            let (x, width) = horizontal[id];
            let (y, height) = vertical[id];
            rects.insert(*id, Rect::new(x, y, width, height));
        }
        Ok(ResolvedLayout { rects })
    }

    /// Structural checks that do not depend on the container: every target
    /// must exist, connections must stay on one axis, and chain members must
    /// have fixed widths.
    fn validate(&self) -> Result<(), ResolveError> {
        for (id, entry) in &self.entries {
            let slots = [
                (Edge::Start, entry.start),
                (Edge::End, entry.end),
                (Edge::Top, entry.top),
                (Edge::Bottom, entry.bottom),
            ];
            for (edge, connection) in slots {
                let Some(connection) = connection else {
                    continue;
                };
                if connection.target_edge.is_horizontal() != edge.is_horizontal() {
                    return Err(ResolveError::AxisMismatch {
                        element: *id,
                        edge,
                        target_edge: connection.target_edge,
                    });
                }
                if let Target::Element(target) = connection.target
                    && !self.entries.contains_key(&target)
                {
                    return Err(ResolveError::DanglingTarget {
                        element: *id,
                        target,
                    });
                }
            }
        }
        for chain in &self.chains {
            for anchor in [&chain.head, &chain.tail] {
                if !anchor.target_edge.is_horizontal() {
                    return Err(ResolveError::ChainAnchorAxis {
                        edge: anchor.target_edge,
                    });
                }
                if let Target::Element(target) = anchor.target
                    && !self.entries.contains_key(&target)
                {
                    return Err(ResolveError::DanglingTarget {
                        element: chain.members[0],
                        target,
                    });
                }
            }
            for member in &chain.members {
                if self.entries[member].width == Dimension::MatchConstraint {
                    return Err(ResolveError::UnsizedChainMember { element: *member });
                }
            }
        }
        Ok(())
    }
}

fn fixed_extent(dimension: Dimension) -> u16 {
    match dimension {
        Dimension::Fixed(extent) => extent,
        Dimension::MatchConstraint => 0,
    }
}

/// Resolves one axis of one element from its two edge connections.
///
/// Both edges connected: a fixed extent centers in the enclosed span
/// (remainder toward the leading edge) and a match-constraint extent
/// stretches to fill it. One edge: the element pins to it. Neither: the
/// element sits at the container's own leading edge. `None` means a target
/// has not been resolved yet and the element must wait for a later pass.
fn resolve_span(
    dimension: Dimension,
    lead: Option<Connection>,
    trail: Option<Connection>,
    anchor: impl Fn(&Connection) -> Option<u16>,
    container_origin: u16,
) -> Option<Span> {
    match (lead, trail) {
        (Some(lead), Some(trail)) => {
            let lo = anchor(&lead)?.saturating_add(lead.margin);
            let hi = anchor(&trail)?.saturating_sub(trail.margin);
            match dimension {
                Dimension::Fixed(extent) => {
                    let slack = hi.saturating_sub(lo).saturating_sub(extent);
                    Some((lo.saturating_add(slack / 2), extent))
                }
                Dimension::MatchConstraint => Some((lo, hi.saturating_sub(lo))),
            }
        }
        (Some(lead), None) => {
            let lo = anchor(&lead)?.saturating_add(lead.margin);
            Some((lo, fixed_extent(dimension)))
        }
        (None, Some(trail)) => {
            let hi = anchor(&trail)?.saturating_sub(trail.margin);
            let extent = fixed_extent(dimension);
            Some((hi.saturating_sub(extent), extent))
        }
        (None, None) => Some((container_origin, fixed_extent(dimension))),
    }
}

fn horizontal_anchor(
    connection: &Connection,
    resolved: &IndexMap<ElementId, Span>,
    container: Rect,
) -> Option<u16> {
    match connection.target {
        Target::Parent => match connection.target_edge {
            Edge::Start => Some(container.x),
            Edge::End => Some(container.right()),
            Edge::Top | Edge::Bottom => None,
        },
        Target::Element(id) => {
            let (x, width) = *resolved.get(&id)?;
            match connection.target_edge {
                Edge::Start => Some(x),
                Edge::End => Some(x.saturating_add(width)),
                Edge::Top | Edge::Bottom => None,
            }
        }
    }
}

fn vertical_anchor(
    connection: &Connection,
    resolved: &IndexMap<ElementId, Span>,
    container: Rect,
) -> Option<u16> {
    match connection.target {
        Target::Parent => match connection.target_edge {
            Edge::Top => Some(container.y),
            Edge::Bottom => Some(container.bottom()),
            Edge::Start | Edge::End => None,
        },
        Target::Element(id) => {
            let (y, height) = *resolved.get(&id)?;
            match connection.target_edge {
                Edge::Top => Some(y),
                Edge::Bottom => Some(y.saturating_add(height)),
                Edge::Start | Edge::End => None,
            }
        }
    }
}

/// Horizontal spans for every chain member, or `None` while either chain
/// anchor is still unresolved.
///
/// Leftover space after member widths is split into gaps per the chain
/// style; integer remainders go to the leftmost gaps, one cell each, which
/// keeps the distribution deterministic.
fn chain_spans(
    chain: &HorizontalChain,
    widths: &[u16],
    resolved: &IndexMap<ElementId, Span>,
    container: Rect,
) -> Option<Vec<Span>> {
    let head = horizontal_anchor(&chain.head, resolved, container)?;
    let tail = horizontal_anchor(&chain.tail, resolved, container)?;
    let span = tail.saturating_sub(head);
    let total: u32 = widths.iter().map(|width| u32::from(*width)).sum();
    let leftover = u32::from(span).saturating_sub(total) as u16;
    let count = widths.len() as u16;

    let mut spans = Vec::with_capacity(widths.len());
    match chain.style {
        ChainStyle::Spread => {
            let gaps = count + 1;
            let base = leftover / gaps;
            let rem = leftover % gaps;
            let mut cursor = head;
            for (i, width) in widths.iter().enumerate() {
                let gap = base + if (i as u16) < rem { 1 } else { 0 };
                cursor = cursor.saturating_add(gap);
                spans.push((cursor, *width));
                cursor = cursor.saturating_add(*width);
            }
        }
        ChainStyle::SpreadInside => {
            if count == 1 {
                spans.push((head.saturating_add(leftover / 2), widths[0]));
            } else {
                let gaps = count - 1;
                let base = leftover / gaps;
                let rem = leftover % gaps;
                let mut cursor = head;
                for (i, width) in widths.iter().enumerate() {
                    if i > 0 {
                        let gap = base + if (i as u16 - 1) < rem { 1 } else { 0 };
                        cursor = cursor.saturating_add(gap);
                    }
                    spans.push((cursor, *width));
                    cursor = cursor.saturating_add(*width);
                }
            }
        }
        ChainStyle::Packed => {
            let mut cursor = head.saturating_add(leftover / 2);
            for width in widths {
                spans.push((cursor, *width));
                cursor = cursor.saturating_add(*width);
            }
        }
    }
    Some(spans)
}
