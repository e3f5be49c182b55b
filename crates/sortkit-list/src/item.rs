#![forbid(unsafe_code)]

//! One member of a sortable list.
//!
//! An [`Item`] caches the geometry of its element as measured by
//! [`Item::calculate_dimensions`]. The cache is refreshed at construction and
//! at every drag start; between those points the figures describe the layout
//! the drag started from, which is the frame all limit math runs in.
//!
//! Style mutations are purely visual. Nothing here touches `index`.

use sortkit_core::{Bounds, ElementId, ItemStyle, ListAxis, Margins, Position, SortHost};

/// Class added to every item element at construction.
pub const HANDLE_CLASS: &str = "dnd-handle";
/// Class added to non-dragged items for the duration of a drag.
pub const STEPPING_ASIDE_CLASS: &str = "dnd-stepping-aside";

/// Drag lifecycle of a single item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemState {
    #[default]
    Idle,
    Dragging,
    Dropping,
}

/// Which way a sibling is pushed to make room for the dragged item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DisplacementDirection {
    #[default]
    None,
    /// Toward larger coordinates along the list axis.
    Forward,
    /// Toward smaller coordinates along the list axis.
    Backward,
}

/// Direction and pixel offset of a visual displacement.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Displacement {
    pub direction: DisplacementDirection,
    pub offset: f64,
}

impl Displacement {
    pub const NONE: Self = Self {
        direction: DisplacementDirection::None,
        offset: 0.0,
    };

    #[must_use]
    pub const fn forward(offset: f64) -> Self {
        Self {
            direction: DisplacementDirection::Forward,
            offset,
        }
    }

    #[must_use]
    pub const fn backward(offset: f64) -> Self {
        Self {
            direction: DisplacementDirection::Backward,
            offset,
        }
    }

    #[must_use]
    pub fn is_none(&self) -> bool {
        self.direction == DisplacementDirection::None
    }

    /// Visual translation along the primary axis of `list_axis`.
    #[must_use]
    pub fn translation(&self, list_axis: ListAxis) -> Position {
        let signed = match self.direction {
            DisplacementDirection::None => return Position::ZERO,
            DisplacementDirection::Forward => self.offset,
            DisplacementDirection::Backward => -self.offset,
        };
        match list_axis.primary() {
            Some(sortkit_core::Axis::X) => Position::new(signed, 0.0),
            Some(sortkit_core::Axis::Y) => Position::new(0.0, signed),
            None => Position::ZERO,
        }
    }
}

/// A list member: stable identity, live index, cached geometry.
#[derive(Debug, Clone)]
pub struct Item {
    element: ElementId,
    id: String,
    pub(crate) index: usize,
    original_index: usize,
    list_axis: ListAxis,
    pub(crate) state: ItemState,

    margins: Margins,
    bounds: Bounds,
    margin_bounds: Bounds,
    center: Position,

    displacement: Displacement,
}

impl Item {
    /// Wrap `element` at `index`, tag it as a drag handle, and measure it.
    pub(crate) fn new<H: SortHost + ?Sized>(
        host: &mut H,
        element: ElementId,
        index: usize,
        list_axis: ListAxis,
        id: String,
    ) -> Self {
        host.add_class(element, HANDLE_CLASS);
        let mut item = Self {
            element,
            id,
            index,
            original_index: index,
            list_axis,
            state: ItemState::Idle,
            margins: Margins::default(),
            bounds: Bounds::default(),
            margin_bounds: Bounds::default(),
            center: Position::ZERO,
            displacement: Displacement::NONE,
        };
        item.calculate_dimensions(host);
        item
    }

    /// Re-read bounds, margins, margin-box, and center from the live layout.
    pub fn calculate_dimensions<H: SortHost + ?Sized>(&mut self, host: &H) {
        self.margins = host.margins(self.element);
        self.bounds = host.bounding_rect(self.element);
        self.center = self.bounds.center();
        self.margin_bounds = self.bounds.outset(self.margins);
    }

    /// Pin the item at an absolute viewport position.
    pub fn set_position<H: SortHost + ?Sized>(&self, host: &mut H, position: Position) {
        host.apply_style(
            self.element,
            ItemStyle::Pinned {
                position,
                size: self.bounds.size(),
            },
        );
    }

    /// Visually offset the item along the list axis.
    ///
    /// No-op unless the item is idle and `displacement` differs from the
    /// current one. Returns whether a style mutation was issued.
    pub fn set_displacement<H: SortHost + ?Sized>(
        &mut self,
        host: &mut H,
        displacement: Displacement,
    ) -> bool {
        if self.state != ItemState::Idle || self.displacement == displacement {
            return false;
        }

        self.displacement = displacement;
        let style = if displacement.is_none() {
            ItemStyle::Cleared
        } else {
            ItemStyle::Translated(displacement.translation(self.list_axis))
        };
        host.apply_style(self.element, style);
        true
    }

    /// Clear any displacement. Calling it on an undisplaced item does nothing.
    pub fn reset_displacement<H: SortHost + ?Sized>(&mut self, host: &mut H) {
        if self.displacement.is_none() {
            return;
        }
        self.displacement = Displacement::NONE;
        host.apply_style(self.element, ItemStyle::Cleared);
    }

    /// Mark the item as making room for a dragged sibling.
    pub fn set_stepping_aside<H: SortHost + ?Sized>(&self, host: &mut H) {
        host.add_class(self.element, STEPPING_ASIDE_CLASS);
    }

    /// Drop the inline style without touching displacement bookkeeping.
    pub fn remove_style<H: SortHost + ?Sized>(&self, host: &mut H) {
        host.apply_style(self.element, ItemStyle::Cleared);
    }

    /// Restore original presentation and forget any displacement.
    pub fn remove_style_and_displacement<H: SortHost + ?Sized>(&mut self, host: &mut H) {
        host.remove_class(self.element, STEPPING_ASIDE_CLASS);
        self.displacement = Displacement::NONE;
        self.remove_style(host);
    }

    /// Undo everything construction and dragging did to the element.
    pub(crate) fn detach<H: SortHost + ?Sized>(&mut self, host: &mut H) {
        self.remove_style_and_displacement(host);
        host.remove_class(self.element, HANDLE_CLASS);
        self.state = ItemState::Idle;
    }

    #[must_use]
    pub const fn element(&self) -> ElementId {
        self.element
    }

    /// Stable id: the element's explicit key, or one generated at construction.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current logical position in the list.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Position at construction. Never changes.
    #[must_use]
    pub const fn original_index(&self) -> usize {
        self.original_index
    }

    #[must_use]
    pub const fn state(&self) -> ItemState {
        self.state
    }

    #[must_use]
    pub const fn margins(&self) -> Margins {
        self.margins
    }

    #[must_use]
    pub const fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Bounds expanded by margins: the space the item occupies in the flow.
    #[must_use]
    pub const fn margin_bounds(&self) -> Bounds {
        self.margin_bounds
    }

    #[must_use]
    pub const fn center(&self) -> Position {
        self.center
    }

    #[must_use]
    pub const fn displacement(&self) -> Displacement {
        self.displacement
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortkit_core::{Axis, Size};
    use sortkit_harness::{ElementSpec, SimHost};

    fn setup() -> (SimHost, Item) {
        let mut host = SimHost::new(Size::new(800.0, 600.0));
        let root = host.root();
        let list = host.append(root, ElementSpec::new(300.0, 40.0).flow(Axis::X));
        let el = host.append(
            list,
            ElementSpec::new(100.0, 40.0).margins(Margins::new(2.0, 4.0, 2.0, 6.0)),
        );
        let item = Item::new(&mut host, el, 0, ListAxis::Horizontal, "a".into());
        (host, item)
    }

    #[test]
    fn construction_measures_and_tags() {
        let (host, item) = setup();
        assert!(host.has_class(item.element(), HANDLE_CLASS));
        assert_eq!(item.bounds(), Bounds::new(6.0, 2.0, 100.0, 40.0));
        assert_eq!(item.margin_bounds(), Bounds::new(0.0, 0.0, 110.0, 44.0));
        assert_eq!(item.center(), Position::new(56.0, 22.0));
        assert_eq!(item.original_index(), 0);
    }

    #[test]
    fn displacement_translates_along_axis() {
        let (mut host, mut item) = setup();
        assert!(item.set_displacement(&mut host, Displacement::backward(110.0)));
        assert_eq!(
            host.style(item.element()),
            ItemStyle::Translated(Position::new(-110.0, 0.0))
        );
    }

    #[test]
    fn unchanged_displacement_is_not_rewritten() {
        let (mut host, mut item) = setup();
        item.set_displacement(&mut host, Displacement::forward(10.0));
        let writes = host.style_writes(item.element());
        assert!(!item.set_displacement(&mut host, Displacement::forward(10.0)));
        assert_eq!(host.style_writes(item.element()), writes);
    }

    #[test]
    fn non_idle_items_ignore_displacement() {
        let (mut host, mut item) = setup();
        item.state = ItemState::Dragging;
        assert!(!item.set_displacement(&mut host, Displacement::forward(10.0)));
        assert!(item.displacement().is_none());
    }

    #[test]
    fn reset_displacement_is_idempotent() {
        let (mut host, mut item) = setup();
        item.set_displacement(&mut host, Displacement::forward(10.0));
        item.reset_displacement(&mut host);
        let writes = host.style_writes(item.element());
        assert_eq!(item.displacement(), Displacement::NONE);

        item.reset_displacement(&mut host);
        assert_eq!(item.displacement(), Displacement::NONE);
        assert_eq!(host.style_writes(item.element()), writes);
    }

    #[test]
    fn vertical_translation_uses_y() {
        let shift = Displacement::forward(30.0).translation(ListAxis::Vertical);
        assert_eq!(shift, Position::new(0.0, 30.0));
        assert_eq!(
            Displacement::forward(30.0).translation(ListAxis::Grid),
            Position::ZERO
        );
    }
}
