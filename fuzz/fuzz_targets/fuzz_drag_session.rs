#![no_main]

use std::time::Duration;

use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::fuzz_target;
use sortkit_core::{Axis, Position, ScrollTarget, Size, SortHost};
use sortkit_harness::SimHost;
use sortkit_harness::fixtures::scrolled_list;
use sortkit_list::{Sortable, SortableOptions, SortableState};

#[derive(Debug, Arbitrary)]
enum Op {
    Down { slot: u8, x: i16, y: i16 },
    Move { x: i16, y: i16 },
    Up,
    ScrollBy { dx: i8, page: bool },
    Frame { ms: u8 },
    Destroy,
}

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let Ok(count) = u.int_in_range(1u8..=12) else {
        return;
    };
    let count = usize::from(count);

    let fixture = scrolled_list(Axis::X, count, Size::new(60.0, 40.0), 300.0);
    let host = fixture
        .host
        .with_document_size(Size::new(2400.0, 800.0));
    let scroller = ScrollTarget::Element(fixture.scrollers[0]);
    let mut sortable = Sortable::new(host, fixture.list, SortableOptions::horizontal())
        .expect("default options are valid");
    let mut now = Duration::ZERO;

    while let Ok(op) = Op::arbitrary(&mut u) {
        match op {
            Op::Down { slot, x, y } => {
                let el = fixture.items[usize::from(slot) % count];
                let pointer = Position::new(f64::from(x), f64::from(y));
                sortable.pointer_down_on(el, pointer).expect("pointer down");
            }
            Op::Move { x, y } => {
                let pointer = Position::new(f64::from(x), f64::from(y));
                sortable.pointer_move(pointer).expect("pointer move");
            }
            Op::Up => {
                sortable.pointer_up().expect("pointer up");
            }
            Op::ScrollBy { dx, page } => {
                let target = if page { ScrollTarget::Viewport } else { scroller };
                let offset = sortable.host().scroll_offset(target) + Position::new(f64::from(dx), 0.0);
                sortable.host_mut().set_scroll_offset(target, offset);
                sortable.scroll(target).expect("scroll");
            }
            Op::Frame { ms } => {
                now += Duration::from_millis(u64::from(ms));
                if sortable.host_mut().take_frame_request() {
                    sortable.on_frame(now).expect("frame");
                }
            }
            Op::Destroy => sortable.destroy(),
        }
        check(&sortable, count);
    }
});

fn check(sortable: &Sortable<SimHost>, count: usize) {
    let mut order = sortable.to_original_indices();
    order.sort_unstable();
    assert_eq!(order, (0..count).collect::<Vec<_>>(), "order lost an item");
    for (slot, item) in sortable.items().iter().enumerate() {
        assert_eq!(item.index(), slot, "indices are not contiguous");
    }

    let host = sortable.host();
    assert!(host.placeholders().len() <= 1, "leaked placeholder");
    assert_eq!(
        host.input_bound(),
        sortable.state() == SortableState::Dragging,
        "input binding out of sync with state"
    );
    if sortable.state() == SortableState::Idle {
        assert!(host.placeholders().is_empty(), "placeholder outlived drag");
        assert!(
            sortable.items().iter().all(|item| item.displacement().is_none()),
            "displacement outlived drag"
        );
    }
}
