#![forbid(unsafe_code)]

//! Core: geometry, the host contract, and easing for sortkit.
//!
//! # Role in sortkit
//! `sortkit-core` holds the leaf value types every other crate agrees on.
//! It has no notion of a drag; it only describes rectangles, directions, and
//! what an embedding environment must be able to do.
//!
//! # Primary responsibilities
//! - **Geometry**: [`Position`], [`Size`], [`Margins`], [`Bounds`], axes and
//!   directions.
//! - **Host contract**: [`SortHost`], the single seam between the engine and a
//!   document/window/frame loop.
//! - **Easing**: curves used by frame-driven animations.
//! - **Logging**: a `tracing` facade that compiles to nothing when the
//!   `tracing` feature is off.

pub mod easing;
pub mod geometry;
pub mod host;
pub mod logging;

pub use geometry::{Axis, Bounds, Direction, ListAxis, Margins, Position, Size};
pub use host::{ElementId, ItemStyle, ScrollAxes, ScrollMetrics, ScrollTarget, SortHost};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, error, info, info_span, trace, trace_span, warn};
