#![forbid(unsafe_code)]

use sortkit_core::{Bounds, Direction, Position, ScrollTarget, SortHost};

use super::{ScrollState, Scrollable};

/// The page viewport. Always the outermost scrollable.
#[derive(Debug, Clone)]
pub struct ViewportScrollable {
    bounds: Bounds,
    state: ScrollState,
}

impl ViewportScrollable {
    pub fn new(host: &dyn SortHost, step: f64, hot_zone_fraction: f64) -> Self {
        let metrics = host.scroll_metrics(ScrollTarget::Viewport);
        Self {
            bounds: Bounds::from_origin_size(Position::ZERO, host.viewport_size()),
            state: ScrollState::new(metrics.offset, step, hot_zone_fraction),
        }
    }
}

impl Scrollable for ViewportScrollable {
    fn target(&self) -> ScrollTarget {
        ScrollTarget::Viewport
    }

    fn state(&self) -> &ScrollState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ScrollState {
        &mut self.state
    }

    fn find_scroll_areas(&mut self, host: &dyn SortHost) {
        let metrics = host.scroll_metrics(ScrollTarget::Viewport);
        self.state.rebuild_areas(&metrics, &Direction::ALL);
    }

    /// The viewport is never clipped by anything.
    fn clip_to_bounds(&mut self, _outer: Bounds, _offset: Position) -> Bounds {
        self.state.visible_bounds = self.bounds;
        self.bounds
    }
}
