#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! All values are CSS pixels in viewport coordinates (origin at top-left,
//! y grows downward) unless a caller documents another frame.

use std::ops::{Add, AddAssign, Neg, Sub};

/// A viewport-relative point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// The origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new position.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Coordinate along `axis`.
    #[inline]
    #[must_use]
    pub const fn along(self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Check whether both coordinates are finite.
    #[inline]
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Position {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Position {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Position {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Position {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl From<(f64, f64)> for Position {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl std::iter::Sum for Position {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a new size.
    #[inline]
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Extent along `axis`.
    #[inline]
    #[must_use]
    pub const fn along(self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        }
    }
}

/// Computed margins of an element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    /// Create margins with specific values (CSS order).
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Create equal margins on every side.
    #[must_use]
    pub const fn all(val: f64) -> Self {
        Self::new(val, val, val, val)
    }

    /// Sum of left and right.
    #[inline]
    #[must_use]
    pub fn horizontal_sum(&self) -> f64 {
        self.left + self.right
    }

    /// Sum of top and bottom.
    #[inline]
    #[must_use]
    pub fn vertical_sum(&self) -> f64 {
        self.top + self.bottom
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    /// Top edge.
    pub top: f64,
    /// Left edge.
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Create a rectangle from its left/top corner and size.
    #[inline]
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// Create a rectangle from an origin and a size.
    #[inline]
    #[must_use]
    pub const fn from_origin_size(origin: Position, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Right edge (exclusive).
    #[inline]
    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Top-left corner.
    #[inline]
    #[must_use]
    pub const fn origin(&self) -> Position {
        Position::new(self.left, self.top)
    }

    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Center point.
    #[inline]
    #[must_use]
    pub fn center(&self) -> Position {
        Position::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Leading edge along `axis` (left or top).
    #[inline]
    #[must_use]
    pub fn start(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.left,
            Axis::Y => self.top,
        }
    }

    /// Trailing edge along `axis` (right or bottom).
    #[inline]
    #[must_use]
    pub fn end(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.right(),
            Axis::Y => self.bottom(),
        }
    }

    /// Check if the rectangle has no area.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Check if a point is inside the rectangle (left/top inclusive,
    /// right/bottom exclusive).
    #[inline]
    #[must_use]
    pub fn contains(&self, point: Position) -> bool {
        point.x >= self.left
            && point.x < self.right()
            && point.y >= self.top
            && point.y < self.bottom()
    }

    /// Check if `value` lies within the closed span of this rectangle along
    /// `axis`. Both edges are inclusive.
    #[inline]
    #[must_use]
    pub fn spans(&self, axis: Axis, value: f64) -> bool {
        value >= self.start(axis) && value <= self.end(axis)
    }

    /// Expand the rectangle outward by `margins`.
    #[must_use]
    pub fn outset(&self, margins: Margins) -> Bounds {
        Bounds {
            top: self.top - margins.top,
            left: self.left - margins.left,
            width: self.width + margins.horizontal_sum(),
            height: self.height + margins.vertical_sum(),
        }
    }

    /// Move the rectangle by `delta`.
    #[must_use]
    pub fn translate(&self, delta: Position) -> Bounds {
        Bounds {
            top: self.top + delta.y,
            left: self.left + delta.x,
            ..*self
        }
    }

    /// Compute the intersection with another rectangle.
    ///
    /// Non-overlapping rectangles produce a zero-sized rectangle anchored at
    /// the clamped corner rather than negative extents.
    #[must_use]
    pub fn intersection(&self, other: &Bounds) -> Bounds {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        Bounds {
            top,
            left,
            width: (right - left).max(0.0),
            height: (bottom - top).max(0.0),
        }
    }
}

/// One of the two coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    X,
    Y,
}

/// Cardinal direction used for limits and scroll hot-zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions in hot-zone discovery order.
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// The axis this direction moves along.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Up | Self::Down => Axis::Y,
            Self::Left | Self::Right => Axis::X,
        }
    }

    /// True for directions that move toward larger coordinates.
    #[must_use]
    pub const fn is_forward(self) -> bool {
        matches!(self, Self::Down | Self::Right)
    }

    /// Returns the opposite direction.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Unit step in this direction scaled by `amount`.
    #[must_use]
    pub fn step(self, amount: f64) -> Position {
        match self {
            Self::Up => Position::new(0.0, -amount),
            Self::Down => Position::new(0.0, amount),
            Self::Left => Position::new(-amount, 0.0),
            Self::Right => Position::new(amount, 0.0),
        }
    }
}

/// Layout direction of a reorderable list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ListAxis {
    /// Items flow left to right.
    #[default]
    Horizontal,
    /// Items flow top to bottom.
    Vertical,
    /// Two-dimensional grid. Reserved: limits, target index recomputation,
    /// and displacement are not implemented for grids.
    Grid,
}

impl ListAxis {
    /// The primary axis, or `None` for grids.
    #[must_use]
    pub const fn primary(self) -> Option<Axis> {
        match self {
            Self::Horizontal => Some(Axis::X),
            Self::Vertical => Some(Axis::Y),
            Self::Grid => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_contains_is_half_open() {
        let rect = Bounds::new(10.0, 20.0, 30.0, 40.0);
        assert!(rect.contains(Position::new(10.0, 20.0)));
        assert!(rect.contains(Position::new(39.9, 59.9)));
        assert!(!rect.contains(Position::new(40.0, 30.0)));
        assert!(!rect.contains(Position::new(20.0, 60.0)));
    }

    #[test]
    fn outset_expands_by_margins() {
        let rect = Bounds::new(10.0, 10.0, 100.0, 50.0);
        let outer = rect.outset(Margins::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(outer, Bounds::new(6.0, 9.0, 106.0, 54.0));
    }

    #[test]
    fn intersection_clamps_to_zero() {
        let a = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let b = Bounds::new(5.0, 5.0, 10.0, 10.0);
        assert_eq!(a.intersection(&b), Bounds::new(5.0, 5.0, 5.0, 5.0));

        let c = Bounds::new(20.0, 20.0, 5.0, 5.0);
        let empty = a.intersection(&c);
        assert!(empty.is_empty());
        assert_eq!(empty.width, 0.0);
    }

    #[test]
    fn spans_is_closed_on_both_edges() {
        let rect = Bounds::new(100.0, 0.0, 100.0, 10.0);
        assert!(rect.spans(Axis::X, 100.0));
        assert!(rect.spans(Axis::X, 200.0));
        assert!(!rect.spans(Axis::X, 200.5));
    }

    #[test]
    fn position_sum_accumulates() {
        let total: Position = [Position::new(1.0, 2.0), Position::new(-3.0, 4.0)]
            .into_iter()
            .sum();
        assert_eq!(total, Position::new(-2.0, 6.0));
    }

    #[test]
    fn direction_axes_and_steps() {
        assert_eq!(Direction::Up.axis(), Axis::Y);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Left.step(10.0), Position::new(-10.0, 0.0));
        assert!(Direction::Down.is_forward());
        assert_eq!(ListAxis::Grid.primary(), None);
    }
}
