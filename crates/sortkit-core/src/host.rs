#![forbid(unsafe_code)]

//! Host collaborator contract.
//!
//! The engine never touches a document, a window, or a frame loop directly.
//! Everything it needs from the embedding environment goes through
//! [`SortHost`]: reading live geometry, mutating presentation, moving
//! elements, and scheduling the next paint.
//!
//! # Contract
//!
//! 1. Geometry reads are synchronous and reflect every mutation issued
//!    before them (styles are "committed" immediately).
//! 2. [`SortHost::apply_style`], [`SortHost::add_class`], and
//!    [`SortHost::remove_class`] are idempotent.
//! 3. After [`SortHost::request_frame`] the host calls the owning engine's
//!    `on_frame` on its next paint. Extra requests before that paint
//!    coalesce into one frame.
//! 4. Between [`SortHost::bind_input`] and [`SortHost::unbind_input`] the host
//!    forwards window-level pointer moves/ups and every scroll event (capture
//!    phase) to the engine. Outside that window it forwards only pointer-downs
//!    on items.

use bitflags::bitflags;

use crate::geometry::{Bounds, Margins, Position, Size};

/// Opaque handle to one element of the host's tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementId(pub u64);

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Something that owns a scroll position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollTarget {
    /// The page itself.
    Viewport,
    /// A scrollable ancestor element.
    Element(ElementId),
}

bitflags! {
    /// Axes on which an element's computed overflow is `auto` or `scroll`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ScrollAxes: u8 {
        const X = 0b01;
        const Y = 0b10;
    }
}

/// Live scroll state of a [`ScrollTarget`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    /// Current scroll offset (`scrollLeft`, `scrollTop`).
    pub offset: Position,
    /// Total scrollable content extent (`scrollWidth`, `scrollHeight`).
    pub scroll_size: Size,
    /// Visible inner extent (`clientWidth`, `clientHeight`).
    pub client_size: Size,
}

impl ScrollMetrics {
    /// Largest reachable scroll offset on each axis.
    #[must_use]
    pub fn max_offset(&self) -> Position {
        Position::new(
            (self.scroll_size.width - self.client_size.width).max(0.0),
            (self.scroll_size.height - self.client_size.height).max(0.0),
        )
    }
}

/// Inline presentation applied to an element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ItemStyle {
    /// Take the element out of flow and pin it at a fixed viewport position
    /// with its measured size.
    Pinned { position: Position, size: Size },
    /// Keep the element in flow but translate it visually.
    Translated(Position),
    /// Restore the element's original presentation.
    Cleared,
}

/// Capabilities the engine requires from its embedding environment.
pub trait SortHost {
    // --- Tree -------------------------------------------------------------

    /// Parent of `el`, or `None` at the root.
    fn parent(&self, el: ElementId) -> Option<ElementId>;

    /// Direct children of `el` in document order.
    fn children(&self, el: ElementId) -> Vec<ElementId>;

    /// Descendants of `container` matching `selector`, in document order.
    fn select(&self, container: ElementId, selector: &str) -> Vec<ElementId>;

    /// Explicit stable key of `el`, if the markup provides one.
    fn element_key(&self, el: ElementId) -> Option<String>;

    /// True for placeholder elements created by [`Self::create_placeholder`].
    fn is_placeholder(&self, el: ElementId) -> bool;

    /// Move `el` under `parent`, before `reference` (append when `None`).
    fn insert_before(&mut self, parent: ElementId, el: ElementId, reference: Option<ElementId>);

    /// Create an inert spacer of `size` with `margins` right after `after`.
    fn create_placeholder(&mut self, after: ElementId, size: Size, margins: Margins) -> ElementId;

    /// Detach and drop `el`.
    fn remove(&mut self, el: ElementId);

    // --- Geometry ---------------------------------------------------------

    /// Border-box rectangle of `el` in viewport coordinates, including any
    /// transform currently applied.
    fn bounding_rect(&self, el: ElementId) -> Bounds;

    /// Computed margins of `el`.
    fn margins(&self, el: ElementId) -> Margins;

    /// Axes on which `el` has `auto`/`scroll` overflow.
    fn overflow(&self, el: ElementId) -> ScrollAxes;

    /// Scroll offset and extents of `target`.
    fn scroll_metrics(&self, target: ScrollTarget) -> ScrollMetrics;

    /// Inner size of the viewport.
    fn viewport_size(&self) -> Size;

    /// Set the scroll offset of `target`. Hosts clamp to the valid range.
    fn set_scroll_offset(&mut self, target: ScrollTarget, offset: Position);

    // --- Presentation -----------------------------------------------------

    /// Replace the engine-owned inline style of `el`.
    fn apply_style(&mut self, el: ElementId, style: ItemStyle);

    fn add_class(&mut self, el: ElementId, class: &str);

    fn remove_class(&mut self, el: ElementId, class: &str);

    /// Toggle document-level drag affordances (grab cursor, no text selection).
    fn set_document_dragging(&mut self, dragging: bool);

    // --- Scheduling and input ---------------------------------------------

    /// Ask for `on_frame` to be called on the next paint.
    fn request_frame(&mut self);

    /// Start forwarding window-level pointer and scroll input.
    fn bind_input(&mut self);

    /// Stop forwarding window-level pointer and scroll input.
    fn unbind_input(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_offset_never_negative() {
        let metrics = ScrollMetrics {
            offset: Position::ZERO,
            scroll_size: Size::new(100.0, 50.0),
            client_size: Size::new(200.0, 20.0),
        };
        assert_eq!(metrics.max_offset(), Position::new(0.0, 30.0));
    }

    #[test]
    fn scroll_axes_combine() {
        let both = ScrollAxes::X | ScrollAxes::Y;
        assert!(both.contains(ScrollAxes::Y));
        assert!(ScrollAxes::default().is_empty());
    }
}
