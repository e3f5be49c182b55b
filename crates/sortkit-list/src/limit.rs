#![forbid(unsafe_code)]

//! Limit calculation.
//!
//! A [`Limit`] is a line along the list axis. Once the dragged item's
//! absolute center crosses it in the limit's direction, the item logically
//! passes the neighbor the limit came from.
//!
//! # Invariants
//!
//! 1. At most two limits exist: one per existing neighbor.
//! 2. A "next" neighbor contributes its margin-box leading edge (left or top);
//!    a "previous" neighbor contributes its trailing edge (right or bottom).
//! 3. [`is_limit_exceeded`] is strict and monotonic: moving further in the
//!    limit's direction never un-triggers it.
//! 4. Grid lists produce no limits.

use sortkit_core::{Bounds, Direction, ListAxis, Position};

use crate::error::SortableError;
use crate::item::Item;

/// A geometric threshold for swapping past a neighbor.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Limit {
    pub direction: Direction,
    pub offset: f64,
}

impl Limit {
    /// Build the limit a neighbor with `margin_bounds` contributes when
    /// approached in `direction`.
    pub fn from_margin_bounds(
        direction: Option<Direction>,
        margin_bounds: Bounds,
    ) -> Result<Self, SortableError> {
        let direction = direction.ok_or(SortableError::NoDirection)?;
        let offset = match direction {
            Direction::Up => margin_bounds.bottom(),
            Direction::Down => margin_bounds.top,
            Direction::Left => margin_bounds.right(),
            Direction::Right => margin_bounds.left,
        };
        Ok(Self { direction, offset })
    }

    /// Whether `point` lies strictly past this limit.
    #[must_use]
    pub fn is_exceeded(&self, point: Position) -> bool {
        is_limit_exceeded(self, point)
    }
}

/// Direction toward the next and the previous neighbor for `list_axis`.
#[must_use]
pub const fn neighbor_directions(list_axis: ListAxis) -> (Option<Direction>, Option<Direction>) {
    match list_axis {
        ListAxis::Horizontal => (Some(Direction::Right), Some(Direction::Left)),
        ListAxis::Vertical => (Some(Direction::Down), Some(Direction::Up)),
        ListAxis::Grid => (None, None),
    }
}

/// Limits around the dragged item's current logical slot.
pub fn get_limits(
    list_axis: ListAxis,
    next: Option<&Item>,
    previous: Option<&Item>,
) -> Result<Vec<Limit>, SortableError> {
    let mut result = Vec::with_capacity(2);
    if list_axis == ListAxis::Grid {
        return Ok(result);
    }

    let (forward, backward) = neighbor_directions(list_axis);
    if let Some(next) = next {
        result.push(Limit::from_margin_bounds(forward, next.margin_bounds())?);
    }
    if let Some(previous) = previous {
        result.push(Limit::from_margin_bounds(backward, previous.margin_bounds())?);
    }
    Ok(result)
}

/// True if `point` has moved past `limit.offset` in `limit.direction`.
#[must_use]
pub fn is_limit_exceeded(limit: &Limit, point: Position) -> bool {
    match limit.direction {
        Direction::Up => point.y < limit.offset,
        Direction::Down => point.y > limit.offset,
        Direction::Left => point.x < limit.offset,
        Direction::Right => point.x > limit.offset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mb() -> Bounds {
        Bounds::new(300.0, 50.0, 100.0, 40.0)
    }

    #[test]
    fn next_neighbor_uses_leading_edge() {
        let right = Limit::from_margin_bounds(Some(Direction::Right), mb()).unwrap();
        assert_eq!(right.offset, 300.0);
        let down = Limit::from_margin_bounds(Some(Direction::Down), mb()).unwrap();
        assert_eq!(down.offset, 50.0);
    }

    #[test]
    fn previous_neighbor_uses_trailing_edge() {
        let left = Limit::from_margin_bounds(Some(Direction::Left), mb()).unwrap();
        assert_eq!(left.offset, 400.0);
        let up = Limit::from_margin_bounds(Some(Direction::Up), mb()).unwrap();
        assert_eq!(up.offset, 90.0);
    }

    #[test]
    fn missing_direction_is_fatal() {
        assert_eq!(
            Limit::from_margin_bounds(None, mb()),
            Err(SortableError::NoDirection)
        );
    }

    #[test]
    fn exceeded_is_strict() {
        let limit = Limit {
            direction: Direction::Right,
            offset: 300.0,
        };
        assert!(!limit.is_exceeded(Position::new(300.0, 0.0)));
        assert!(limit.is_exceeded(Position::new(300.5, 0.0)));

        let up = Limit {
            direction: Direction::Up,
            offset: 90.0,
        };
        assert!(up.is_exceeded(Position::new(0.0, 89.0)));
        assert!(!up.is_exceeded(Position::new(0.0, 91.0)));
    }

    #[test]
    fn grid_has_no_neighbor_directions() {
        assert_eq!(neighbor_directions(ListAxis::Grid), (None, None));
    }
}
