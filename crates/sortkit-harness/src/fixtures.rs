//! Ready-made documents used across the engine's test suites.

use sortkit_core::{Axis, ElementId, Margins, ScrollAxes, Size};

use crate::{ElementSpec, SimHost};

/// A list container with its items.
#[derive(Debug, Clone)]
pub struct ListFixture {
    pub host: SimHost,
    pub list: ElementId,
    pub items: Vec<ElementId>,
    /// Scrollable ancestors from innermost to outermost (viewport excluded).
    pub scrollers: Vec<ElementId>,
}

/// Class carried by every fixture item.
pub const ITEM_CLASS: &str = "item";

/// `count` equally sized items laid out along `axis` in an 1200x800 viewport.
#[must_use]
pub fn uniform_list(axis: Axis, count: usize, item: Size) -> ListFixture {
    sized_list(axis, &vec![(item, Margins::default()); count])
}

/// A list whose items have individual sizes and margins.
#[must_use]
pub fn sized_list(axis: Axis, items: &[(Size, Margins)]) -> ListFixture {
    let mut host = SimHost::new(Size::new(1200.0, 800.0));
    let root = host.root();
    let list = host.append(root, list_spec(axis, items));
    let items = append_items(&mut host, list, items);
    ListFixture {
        host,
        list,
        items,
        scrollers: Vec::new(),
    }
}

/// A list nested in one scrollable element of `viewport_extent` along `axis`.
///
/// The scroller sits at the document origin; its content is exactly the list.
#[must_use]
pub fn scrolled_list(axis: Axis, count: usize, item: Size, viewport_extent: f64) -> ListFixture {
    let mut host = SimHost::new(Size::new(1200.0, 800.0));
    let root = host.root();
    let items = vec![(item, Margins::default()); count];
    let (size, overflow) = match axis {
        Axis::X => (Size::new(viewport_extent, item.height), ScrollAxes::X),
        Axis::Y => (Size::new(item.width, viewport_extent), ScrollAxes::Y),
    };
    let scroller = host.append(
        root,
        ElementSpec::new(size.width, size.height)
            .flow(axis)
            .overflow(overflow),
    );
    let list = host.append(scroller, list_spec(axis, &items));
    let items = append_items(&mut host, list, &items);
    ListFixture {
        host,
        list,
        items,
        scrollers: vec![scroller],
    }
}

fn list_spec(axis: Axis, items: &[(Size, Margins)]) -> ElementSpec {
    let along: f64 = items
        .iter()
        .map(|(size, margins)| match axis {
            Axis::X => size.width + margins.horizontal_sum(),
            Axis::Y => size.height + margins.vertical_sum(),
        })
        .sum();
    let across = items
        .iter()
        .map(|(size, margins)| match axis {
            Axis::X => size.height + margins.vertical_sum(),
            Axis::Y => size.width + margins.horizontal_sum(),
        })
        .fold(0.0_f64, f64::max);
    let (w, h) = match axis {
        Axis::X => (along, across),
        Axis::Y => (across, along),
    };
    ElementSpec::new(w, h).flow(axis)
}

fn append_items(host: &mut SimHost, list: ElementId, items: &[(Size, Margins)]) -> Vec<ElementId> {
    items
        .iter()
        .enumerate()
        .map(|(idx, (size, margins))| {
            host.append(
                list,
                ElementSpec::new(size.width, size.height)
                    .margins(*margins)
                    .key(format!("item-{idx}"))
                    .class(ITEM_CLASS),
            )
        })
        .collect()
}
