//! Resolution failures.

use thiserror::Error;

use crate::constraint::Edge;
use crate::id::ElementId;

/// Why a [`ConstraintSet`](crate::ConstraintSet) could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// A connection or chain anchor points at an id the set never mentions.
    #[error("element {element} is constrained against unknown element {target}")]
    DanglingTarget {
        element: ElementId,
        target: ElementId,
    },

    /// A horizontal edge was connected to a vertical one or vice versa.
    #[error("element {element} connects its {edge:?} edge across axes to a {target_edge:?} edge")]
    AxisMismatch {
        element: ElementId,
        edge: Edge,
        target_edge: Edge,
    },

    /// A horizontal chain was anchored to a vertical edge.
    #[error("horizontal chain anchored to non-horizontal edge {edge:?}")]
    ChainAnchorAxis { edge: Edge },

    /// Chain members need a fixed width for gap distribution.
    #[error("chain member {element} does not have a fixed width")]
    UnsizedChainMember { element: ElementId },

    /// No pass made progress while elements remained unresolved, which means
    /// the connections form a cycle.
    #[error("{count} element(s) form an unresolvable dependency cycle", count = .0.len())]
    Cycle(Vec<ElementId>),
}
