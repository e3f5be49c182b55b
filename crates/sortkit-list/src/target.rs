#![forbid(unsafe_code)]

//! Target index search and sibling displacement.
//!
//! All math runs in the geometry cached at drag start. Items keep their
//! original margin boxes for the whole drag; the dragged item's absolute
//! center (viewport position plus accumulated ancestor scroll) is compared
//! against those boxes, never against live, displaced positions.

use sortkit_core::{ListAxis, Position, SortHost};

use crate::error::SortableError;
use crate::item::{Displacement, Item};
use crate::limit::{Limit, get_limits};

/// Offset from `dragged_index` to the first item whose margin box spans
/// `absolute` along the list axis. `None` when nothing matches or the axis
/// has no primary direction.
#[must_use]
pub fn find_new_offset(
    list_axis: ListAxis,
    items: &[Item],
    dragged_index: usize,
    absolute: Position,
) -> Option<isize> {
    let axis = list_axis.primary()?;
    let value = absolute.along(axis);
    items
        .iter()
        .find(|item| item.margin_bounds().spans(axis, value))
        .map(|item| item.index() as isize - dragged_index as isize)
}

/// Limits around logical slot `target` of the index-sorted `items`.
pub fn limits_around(
    list_axis: ListAxis,
    items: &[Item],
    target: usize,
) -> Result<Vec<Limit>, SortableError> {
    let next = target.checked_add(1).and_then(|idx| items.get(idx));
    let previous = target.checked_sub(1).and_then(|idx| items.get(idx));
    get_limits(list_axis, next, previous)
}

/// Displacement of a sibling at `item_index` when the item dragged from
/// `dragged_index` would land at `new_index`.
#[must_use]
pub fn displacement_for(
    item_index: usize,
    dragged_index: usize,
    new_index: usize,
    extent: f64,
) -> Displacement {
    if item_index < dragged_index && new_index <= item_index {
        Displacement::forward(extent)
    } else if item_index > dragged_index && new_index >= item_index {
        Displacement::backward(extent)
    } else {
        Displacement::NONE
    }
}

/// Apply the displacement rule to every sibling of `items[dragged_slot]`.
///
/// The whole pass uses one `new_index`, so no mixed state is observable.
pub(crate) fn displace_items<H: SortHost + ?Sized>(
    host: &mut H,
    items: &mut [Item],
    list_axis: ListAxis,
    dragged_slot: usize,
    new_index: usize,
) {
    let Some(dragged) = items.get(dragged_slot) else {
        return;
    };
    let dragged_index = dragged.index();
    let extent = list_axis
        .primary()
        .map_or(0.0, |axis| dragged.margin_bounds().size().along(axis));

    for (slot, item) in items.iter_mut().enumerate() {
        if slot == dragged_slot {
            continue;
        }
        let displacement = displacement_for(item.index(), dragged_index, new_index, extent);
        item.set_displacement(host, displacement);
    }
}

/// Clear displacement on every item except `dragged_slot`.
pub(crate) fn reset_displacements<H: SortHost + ?Sized>(
    host: &mut H,
    items: &mut [Item],
    dragged_slot: usize,
) {
    for (slot, item) in items.iter_mut().enumerate() {
        if slot != dragged_slot {
            item.reset_displacement(host);
        }
    }
}
