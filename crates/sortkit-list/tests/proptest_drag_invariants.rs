//! Property-based invariant tests for drag sessions.
//!
//! 1. Cached margin boxes tile the list along its axis for any drag start.
//! 2. Once a limit is exceeded, moving further past it keeps it exceeded.
//! 3. Dropping over slot `j` is exactly remove-at-`i`, insert-at-`j`.
//! 4. Sibling displacement matches the passed range for any target.
//! 5. Re-entering over slot `k` targets `k`.

use std::time::Duration;

use proptest::prelude::*;
use sortkit_core::{Axis, Direction, Margins, Position, Size};
use sortkit_harness::SimHost;
use sortkit_harness::fixtures::sized_list;
use sortkit_list::{DisplacementDirection, Limit, Sortable, SortableOptions};

// ── Helpers ─────────────────────────────────────────────────────────────

const ITEM_HEIGHT: f64 = 50.0;

/// Integer widths and horizontal margins keep every edge exact in `f64`.
fn row_specs() -> impl Strategy<Value = Vec<(Size, Margins)>> {
    proptest::collection::vec((20u32..=120, 0u32..=10, 0u32..=10), 2..=8).prop_map(|specs| {
        specs
            .into_iter()
            .map(|(width, left, right)| {
                (
                    Size::new(f64::from(width), ITEM_HEIGHT),
                    Margins::new(0.0, f64::from(right), 0.0, f64::from(left)),
                )
            })
            .collect()
    })
}

/// A row plus a start slot and a target slot inside it.
fn row_with_slots() -> impl Strategy<Value = (Vec<(Size, Margins)>, usize, usize)> {
    row_specs().prop_flat_map(|specs| {
        let len = specs.len();
        (Just(specs), 0..len, 0..len)
    })
}

fn run_frames(sortable: &mut Sortable<SimHost>) {
    while sortable.host_mut().take_frame_request() {
        sortable.on_frame(Duration::ZERO).unwrap();
    }
}

/// Start dragging slot `start` from its border-box center.
fn drag(specs: &[(Size, Margins)], start: usize) -> (Sortable<SimHost>, Position) {
    let fixture = sized_list(Axis::X, specs);
    let mut sortable =
        Sortable::new(fixture.host, fixture.list, SortableOptions::horizontal()).unwrap();
    let grab = sortable.items()[start].center();
    sortable.pointer_down_on(fixture.items[start], grab).unwrap();
    run_frames(&mut sortable);
    (sortable, grab)
}

/// Pointer position that puts the dragged center on the middle of `slot`'s
/// margin box.
fn pointer_over(sortable: &Sortable<SimHost>, grab: Position, start: usize, slot: usize) -> Position {
    let items = sortable.items();
    let target = items[slot].margin_bounds().center();
    grab + Position::new(target.x - items[start].center().x, 0.0)
}

fn remove_insert(len: usize, from: usize, to: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    let moved = order.remove(from);
    order.insert(to, moved);
    order
}

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Margin boxes tile the list
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn margin_boxes_tile_list((specs, start, _) in row_with_slots()) {
        let (sortable, _) = drag(&specs, start);
        let items = sortable.items();
        let bounds = sortable.bounds();

        prop_assert_eq!(items[0].margin_bounds().left, bounds.left);
        prop_assert_eq!(items[items.len() - 1].margin_bounds().right(), bounds.right());
        for pair in items.windows(2) {
            prop_assert_eq!(pair[0].margin_bounds().right(), pair[1].margin_bounds().left);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Limit monotonicity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn exceeded_limit_stays_exceeded(
        direction in direction(),
        offset in -500.0f64..500.0,
        x in -1000.0f64..1000.0,
        y in -1000.0f64..1000.0,
        further in 0.0f64..1000.0,
    ) {
        let limit = Limit { direction, offset };
        let point = Position::new(x, y);
        prop_assume!(limit.is_exceeded(point));
        prop_assert!(limit.is_exceeded(point + direction.step(further)));
    }

    #[test]
    fn limit_ignores_cross_axis(
        direction in direction(),
        offset in -500.0f64..500.0,
        x in -1000.0f64..1000.0,
        y in -1000.0f64..1000.0,
        shift in -1000.0f64..1000.0,
    ) {
        let limit = Limit { direction, offset };
        let point = Position::new(x, y);
        let sideways = match direction.axis() {
            Axis::X => Position::new(0.0, shift),
            Axis::Y => Position::new(shift, 0.0),
        };
        prop_assert_eq!(limit.is_exceeded(point), limit.is_exceeded(point + sideways));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Drop order
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn drop_is_remove_then_insert((specs, from, to) in row_with_slots()) {
        let (mut sortable, grab) = drag(&specs, from);
        let pointer = pointer_over(&sortable, grab, from, to);
        sortable.pointer_move(pointer).unwrap();
        prop_assert_eq!(sortable.target_index(), Some(to));

        sortable.pointer_up().unwrap();
        let expected = remove_insert(specs.len(), from, to);
        prop_assert_eq!(sortable.to_original_indices(), expected.clone());

        let children: Vec<usize> = sortable
            .host()
            .content_children(sortable.container())
            .into_iter()
            .map(|el| sortable.item(el).unwrap().original_index())
            .collect();
        prop_assert_eq!(children, expected);
        for (idx, item) in sortable.items().iter().enumerate() {
            prop_assert_eq!(item.index(), idx);
        }
    }

    #[test]
    fn returning_home_is_identity((specs, from, via) in row_with_slots()) {
        let (mut sortable, grab) = drag(&specs, from);
        let away = pointer_over(&sortable, grab, from, via);
        sortable.pointer_move(away).unwrap();
        sortable.pointer_move(grab).unwrap();
        prop_assert_eq!(sortable.drag_index_offset(), 0);

        sortable.pointer_up().unwrap();
        prop_assert_eq!(sortable.to_original_indices(), (0..specs.len()).collect::<Vec<_>>());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Displacement matches the passed range
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn only_passed_siblings_are_displaced((specs, from, to) in row_with_slots()) {
        let (mut sortable, grab) = drag(&specs, from);
        let pointer = pointer_over(&sortable, grab, from, to);
        sortable.pointer_move(pointer).unwrap();

        let extent = sortable.items()[from].margin_bounds().width;
        for (idx, item) in sortable.items().iter().enumerate() {
            let displacement = item.displacement();
            let expected = if idx == from {
                DisplacementDirection::None
            } else if to <= idx && idx < from {
                DisplacementDirection::Forward
            } else if from < idx && idx <= to {
                DisplacementDirection::Backward
            } else {
                DisplacementDirection::None
            };
            prop_assert_eq!(displacement.direction, expected);
            if expected != DisplacementDirection::None {
                prop_assert_eq!(displacement.offset, extent);
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Re-entry targets the slot under the item
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn reentry_targets_slot_under_item(
        (specs, from, slot) in row_with_slots(),
        away in 100.0f64..600.0,
    ) {
        let (mut sortable, grab) = drag(&specs, from);
        sortable.pointer_move(grab + Position::new(0.0, away)).unwrap();
        prop_assert!(sortable.is_out_of_bounds());
        prop_assert_eq!(sortable.target_index(), Some(from));

        let back = pointer_over(&sortable, grab, from, slot);
        sortable.pointer_move(back).unwrap();
        run_frames(&mut sortable);

        prop_assert!(!sortable.is_out_of_bounds());
        prop_assert_eq!(sortable.target_index(), Some(slot));
    }
}
