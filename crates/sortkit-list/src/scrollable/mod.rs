#![forbid(unsafe_code)]

//! Scrollable ancestors and auto-scroll hot-zones.
//!
//! Both the page and any scrolling ancestor element implement [`Scrollable`].
//! The orchestrator keeps them innermost-first and recomputes their visible
//! bounds outermost-first, so every inner container is clipped by what its
//! ancestors actually show.
//!
//! # Hot-zones
//!
//! Each scrollable edge owns a band covering `hot_zone_fraction` of the
//! visible extent on that axis. While the pointer sits in a band whose
//! direction still has room to scroll, [`Scrollable::update_scrolling`] adds
//! one `scroll_step` to the pending delta for that direction. Bands on
//! different axes combine (up + left scrolls diagonally).

mod element;
mod viewport;

pub use element::ElementScrollable;
pub use viewport::ViewportScrollable;

use std::fmt;

use sortkit_core::{Bounds, Direction, ElementId, Position, ScrollMetrics, ScrollTarget, SortHost};

/// Remaining distance under which an edge counts as fully scrolled.
pub const SCROLL_EDGE_EPSILON: f64 = 0.5;

/// One edge hot-zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollArea {
    pub direction: Direction,
    pub bounds: Bounds,
    /// Whether the owner can still scroll in `direction`.
    pub can_scroll: bool,
}

/// Bookkeeping shared by every [`Scrollable`] implementation.
#[derive(Debug, Clone)]
pub struct ScrollState {
    original_offset: Position,
    offset_delta: Position,
    visible_bounds: Bounds,
    areas: Vec<ScrollArea>,
    scrolling: Position,
    step: f64,
    hot_zone_fraction: f64,
}

impl ScrollState {
    fn new(original_offset: Position, step: f64, hot_zone_fraction: f64) -> Self {
        Self {
            original_offset,
            offset_delta: Position::ZERO,
            visible_bounds: Bounds::default(),
            areas: Vec::with_capacity(4),
            scrolling: Position::ZERO,
            step,
            hot_zone_fraction,
        }
    }

    /// Rebuild hot-zones for `directions` from the current visible bounds.
    fn rebuild_areas(&mut self, metrics: &ScrollMetrics, directions: &[Direction]) {
        self.scrolling = Position::ZERO;
        self.areas.clear();
        for &direction in directions {
            self.areas.push(ScrollArea {
                direction,
                bounds: hot_zone(self.visible_bounds, direction, self.hot_zone_fraction),
                can_scroll: can_scroll_in(metrics, direction),
            });
        }
    }

    fn refresh_can_scroll(&mut self, metrics: &ScrollMetrics) {
        for area in &mut self.areas {
            area.can_scroll = can_scroll_in(metrics, area.direction);
        }
    }

    fn accumulate(&mut self, pointer: Position) {
        self.scrolling = Position::ZERO;

        if self.areas.is_empty()
            || !self.visible_bounds.contains(pointer)
            || !self.areas.iter().any(|area| area.can_scroll)
        {
            return;
        }

        for area in &self.areas {
            if area.can_scroll && area.bounds.contains(pointer) {
                self.scrolling += area.direction.step(self.step);
            }
        }
    }
}

/// The band of `visible` that scrolls toward `direction`.
#[must_use]
pub fn hot_zone(visible: Bounds, direction: Direction, fraction: f64) -> Bounds {
    let band_h = visible.height * fraction;
    let band_w = visible.width * fraction;
    match direction {
        Direction::Up => Bounds::new(visible.left, visible.top, visible.width, band_h),
        Direction::Down => Bounds::new(
            visible.left,
            visible.bottom() - band_h,
            visible.width,
            band_h,
        ),
        Direction::Left => Bounds::new(visible.left, visible.top, band_w, visible.height),
        Direction::Right => Bounds::new(
            visible.right() - band_w,
            visible.top,
            band_w,
            visible.height,
        ),
    }
}

/// Whether `metrics` leave room to scroll further toward `direction`.
#[must_use]
pub fn can_scroll_in(metrics: &ScrollMetrics, direction: Direction) -> bool {
    let max = metrics.max_offset();
    match direction {
        Direction::Up => metrics.offset.y > 0.0,
        Direction::Down => max.y - metrics.offset.y > SCROLL_EDGE_EPSILON,
        Direction::Left => metrics.offset.x > 0.0,
        Direction::Right => max.x - metrics.offset.x > SCROLL_EDGE_EPSILON,
    }
}

/// Capability shared by the viewport and scrolling ancestor elements.
pub trait Scrollable: fmt::Debug {
    /// What scroll events from this scrollable report as their target.
    fn target(&self) -> ScrollTarget;

    fn state(&self) -> &ScrollState;

    fn state_mut(&mut self) -> &mut ScrollState;

    /// Recompute hot-zones and their `can_scroll` flags.
    fn find_scroll_areas(&mut self, host: &dyn SortHost);

    /// Intersect this scrollable with the visible bounds of its own scroll
    /// ancestor, shifted by `offset` (the ancestors' cumulative scroll since
    /// drag start). Returns a copy of the new visible bounds.
    fn clip_to_bounds(&mut self, outer: Bounds, offset: Position) -> Bounds;

    /// Recompute the pending scroll delta for `pointer`.
    fn update_scrolling(&mut self, pointer: Position) {
        self.state_mut().accumulate(pointer);
    }

    /// Re-read the scroll offset and update the delta since drag start.
    fn update_offset_delta(&mut self, host: &dyn SortHost) {
        let offset = host.scroll_metrics(self.target()).offset;
        let state = self.state_mut();
        state.offset_delta = offset - state.original_offset;
    }

    /// True while the pointer sits in a scrollable hot-zone.
    fn should_scroll(&self) -> bool {
        let scrolling = self.state().scrolling;
        scrolling.x != 0.0 || scrolling.y != 0.0
    }

    /// Apply the pending delta to the real scroll position.
    fn do_scroll(&mut self, host: &mut dyn SortHost) {
        let target = self.target();
        let current = host.scroll_metrics(target).offset;
        host.set_scroll_offset(target, current + self.state().scrolling);
        let metrics = host.scroll_metrics(target);
        self.state_mut().refresh_can_scroll(&metrics);
    }

    /// Scroll accumulated since drag start.
    fn offset_delta(&self) -> Position {
        self.state().offset_delta
    }

    fn visible_bounds(&self) -> Bounds {
        self.state().visible_bounds
    }

    fn scroll_areas(&self) -> &[ScrollArea] {
        &self.state().areas
    }

    /// Delta the next [`Self::do_scroll`] will apply.
    fn pending_scroll(&self) -> Position {
        self.state().scrolling
    }
}

/// Nearest ancestor of `start` (inclusive) with scrollable overflow.
pub fn find_next_scroll_parent(
    host: &dyn SortHost,
    start: Option<ElementId>,
    step: f64,
    hot_zone_fraction: f64,
) -> Option<ElementScrollable> {
    let mut current = start;
    while let Some(el) = current {
        if !host.overflow(el).is_empty() {
            return Some(ElementScrollable::new(host, el, step, hot_zone_fraction));
        }
        current = host.parent(el);
    }
    None
}

/// Every scrollable around `list`, innermost first, ending with the viewport.
pub fn collect_scrollables(
    host: &dyn SortHost,
    list: ElementId,
    step: f64,
    hot_zone_fraction: f64,
) -> Vec<Box<dyn Scrollable>> {
    let mut result: Vec<Box<dyn Scrollable>> = Vec::new();
    let mut next_parent = host.parent(list);
    while let Some(found) = find_next_scroll_parent(host, next_parent, step, hot_zone_fraction) {
        next_parent = host.parent(found.element());
        result.push(Box::new(found));
    }
    result.push(Box::new(ViewportScrollable::new(host, step, hot_zone_fraction)));
    result
}

/// Recompute visible bounds and hot-zones outermost-first.
pub fn calculate_scroll_areas(scrollables: &mut [Box<dyn Scrollable>], host: &dyn SortHost) {
    let mut visible = Bounds::default();
    let mut offset = Position::ZERO;
    for scrollable in scrollables.iter_mut().rev() {
        visible = scrollable.clip_to_bounds(visible, offset);
        scrollable.find_scroll_areas(host);
        offset += scrollable.offset_delta();
    }
}
