//! # Stepline Layout Engine
//!
//! A small declarative constraint engine for terminal-cell geometry. Callers
//! describe elements by identifier (size, edge connections, horizontal
//! chains), collect the description into a [`ConstraintSet`], and resolve the
//! whole set against a container [`Rect`] in one step.
//!
//! ## Key Features
//!
//! - Process-unique element identifiers decoupled from any rendering surface
//! - Edge-to-edge connections with margins, against the container or other
//!   elements
//! - Horizontal chains with spread, spread-inside, and packed distribution
//! - Fixed and match-constraint sizing; dual-edge constraints center fixed
//!   elements and stretch match-constraint ones
//! - Deterministic integer arithmetic: the same set and container always
//!   resolve to the same rectangles
//!
//! ## Resolution Model
//!
//! A [`ConstraintSet`] is pure data; building one has no visible effect.
//! [`ConstraintSet::resolve`] computes a [`ResolvedLayout`] (element id to
//! [`Rect`]) or a [`ResolveError`] for sets that reference unknown elements,
//! mix axes, or contain dependency cycles.

mod constraint;
mod error;
mod id;
mod resolver;

pub use constraint::{ChainStyle, Connection, ConstraintSet, Dimension, Edge, Target};
pub use error::ResolveError;
pub use id::ElementId;
pub use resolver::ResolvedLayout;

pub use ratatui::layout::Rect;
