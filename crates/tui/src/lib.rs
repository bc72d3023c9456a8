//! # Step Progress TUI Library
//!
//! This library renders a horizontal multi-step progress indicator in the
//! terminal using the Ratatui framework. A row of step icons is spread
//! evenly across the available width, an invisible anchor sits below each
//! icon, and a connecting bar stretches from the first anchor to the last.
//!
//! ## Key Features
//!
//! - Wholesale rebuilds: hand the component a new descriptor list of any
//!   length, including empty, and it re-creates the scene from scratch
//! - Evenly spread icon chain with the bar pinned to the outer anchors
//! - Active/inactive tint transitions sampled against wall-clock time
//! - Styling read from a JSON stylesheet with fail-fast required attributes
//! - A [`RenderSurface`] seam so widget logic is testable without a terminal
//!
//! ## Architecture
//!
//! [`StepProgressBar`] owns the step state and a render surface. On
//! initialization the [`LayoutAssembler`] mounts an icon and an anchor per
//! descriptor plus one bar, the [`ConstraintGraphBuilder`] expresses their
//! geometry as a constraint set, and the whole set is committed to the
//! surface in one step. [`TerminalSurface`] is the shipped surface; it
//! resolves the set against the paint area and draws into the frame.

pub mod assembler;
pub mod builder;
pub mod element;
pub mod progress;
pub mod step;
pub mod style;
pub mod surface;
pub mod terminal;

pub use assembler::{Assembly, LayoutAssembler};
pub use builder::ConstraintGraphBuilder;
pub use element::ElementSpec;
pub use progress::{PREFERRED_HEIGHT, StepProgressBar};
pub use step::{StepDescriptor, StepElement, glyphs};
pub use style::{
    PROGRESS_SECTION, ProgressBarConfig, RawStep, STYLE_PATH_ENV, StyleError, StyleSheet,
    parse_hex_color,
};
pub use surface::RenderSurface;
pub use terminal::TerminalSurface;
