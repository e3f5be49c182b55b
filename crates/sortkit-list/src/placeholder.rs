#![forbid(unsafe_code)]

//! Inert spacer holding the dragged item's slot.

use sortkit_core::{Bounds, ElementId, Margins, SortHost};

use crate::item::Item;

/// Class added to the placeholder element.
pub const PLACEHOLDER_CLASS: &str = "dnd-placeholder";

/// A spacer sized like the dragged item, inserted right after it so the flow
/// keeps its shape while the item is pinned.
#[derive(Debug, Clone)]
pub struct Placeholder {
    element: ElementId,
    bounds: Bounds,
    margins: Margins,
}

impl Placeholder {
    /// Create the spacer for `item` using its last measured geometry.
    pub fn new<H: SortHost + ?Sized>(host: &mut H, item: &Item) -> Self {
        let bounds = item.bounds();
        let margins = item.margins();
        let element = host.create_placeholder(item.element(), bounds.size(), margins);
        host.add_class(element, PLACEHOLDER_CLASS);
        Self {
            element,
            bounds,
            margins,
        }
    }

    #[must_use]
    pub const fn element(&self) -> ElementId {
        self.element
    }

    /// Geometry the spacer was created with.
    #[must_use]
    pub const fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[must_use]
    pub const fn margins(&self) -> Margins {
        self.margins
    }

    /// Remove the spacer from the document.
    pub fn destroy<H: SortHost + ?Sized>(self, host: &mut H) {
        host.remove(self.element);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortkit_core::{Axis, ListAxis, Size};
    use sortkit_harness::{ElementSpec, SimHost};

    #[test]
    fn placeholder_matches_item_and_follows_it() {
        let mut host = SimHost::new(Size::new(800.0, 600.0));
        let root = host.root();
        let list = host.append(root, ElementSpec::new(300.0, 40.0).flow(Axis::X));
        let a = host.append(
            list,
            ElementSpec::new(80.0, 40.0).margins(Margins::all(3.0)),
        );
        let b = host.append(list, ElementSpec::new(80.0, 40.0));
        let item = Item::new(&mut host, a, 0, ListAxis::Horizontal, "a".into());

        let placeholder = Placeholder::new(&mut host, &item);
        assert_eq!(host.children(list), vec![a, placeholder.element(), b]);
        assert!(host.has_class(placeholder.element(), PLACEHOLDER_CLASS));
        assert_eq!(placeholder.bounds().size(), Size::new(80.0, 40.0));
        assert_eq!(host.margins(placeholder.element()), Margins::all(3.0));

        let el = placeholder.element();
        placeholder.destroy(&mut host);
        assert!(host.is_removed(el));
        assert_eq!(host.children(list), vec![a, b]);
    }
}
