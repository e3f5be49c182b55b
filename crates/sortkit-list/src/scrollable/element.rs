#![forbid(unsafe_code)]

use sortkit_core::{
    Bounds, Direction, ElementId, Position, ScrollAxes, ScrollTarget, SortHost,
};

use super::{ScrollState, Scrollable};

/// A scrolling ancestor element of the list.
#[derive(Debug, Clone)]
pub struct ElementScrollable {
    element: ElementId,
    overflow: ScrollAxes,
    /// Inner (client) rectangle at drag start, viewport coordinates.
    client_bounds: Bounds,
    state: ScrollState,
}

impl ElementScrollable {
    pub fn new(host: &dyn SortHost, element: ElementId, step: f64, hot_zone_fraction: f64) -> Self {
        let rect = host.bounding_rect(element);
        let metrics = host.scroll_metrics(ScrollTarget::Element(element));
        Self {
            element,
            overflow: host.overflow(element),
            client_bounds: Bounds::from_origin_size(rect.origin(), metrics.client_size),
            state: ScrollState::new(metrics.offset, step, hot_zone_fraction),
        }
    }

    #[must_use]
    pub const fn element(&self) -> ElementId {
        self.element
    }

    #[must_use]
    pub const fn overflow(&self) -> ScrollAxes {
        self.overflow
    }

    fn directions(&self) -> Vec<Direction> {
        let mut directions = Vec::with_capacity(4);
        if self.overflow.contains(ScrollAxes::Y) {
            directions.extend([Direction::Up, Direction::Down]);
        }
        if self.overflow.contains(ScrollAxes::X) {
            directions.extend([Direction::Left, Direction::Right]);
        }
        directions
    }
}

impl Scrollable for ElementScrollable {
    fn target(&self) -> ScrollTarget {
        ScrollTarget::Element(self.element)
    }

    fn state(&self) -> &ScrollState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ScrollState {
        &mut self.state
    }

    fn find_scroll_areas(&mut self, host: &dyn SortHost) {
        let metrics = host.scroll_metrics(self.target());
        let directions = self.directions();
        self.state.rebuild_areas(&metrics, &directions);
    }

    fn clip_to_bounds(&mut self, outer: Bounds, offset: Position) -> Bounds {
        self.state.visible_bounds = self.client_bounds.translate(-offset).intersection(&outer);
        self.state.visible_bounds
    }
}
