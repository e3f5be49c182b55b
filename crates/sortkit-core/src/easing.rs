#![forbid(unsafe_code)]

//! Easing curves for frame-driven animations.
//!
//! Every curve maps progress `t` in `[0.0, 1.0]` to an eased value in the same
//! range. Inputs outside the range are clamped, so callers can feed raw
//! `elapsed / duration` fractions without guarding overshoot.

use crate::geometry::Position;

/// Signature shared by all easing curves.
pub type EasingFn = fn(f64) -> f64;

#[inline]
fn clamp01(t: f64) -> f64 {
    if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) }
}

/// Identity curve.
#[must_use]
pub fn linear(t: f64) -> f64 {
    clamp01(t)
}

/// Quintic ease-in: `t^5`.
#[must_use]
pub fn ease_in_quint(t: f64) -> f64 {
    clamp01(t).powi(5)
}

/// Quintic ease-out: `1 - (1 - t)^5`.
#[must_use]
pub fn ease_out_quint(t: f64) -> f64 {
    1.0 - ease_in_quint(1.0 - clamp01(t))
}

/// Interpolate between two points by an already-eased `progress`.
#[must_use]
pub fn lerp(from: Position, to: Position, progress: f64) -> Position {
    Position::new(
        from.x + (to.x - from.x) * progress,
        from.y + (to.y - from.y) * progress,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_out_endpoints() {
        assert_eq!(ease_out_quint(0.0), 0.0);
        assert_eq!(ease_out_quint(1.0), 1.0);
    }

    #[test]
    fn ease_out_front_loads_progress() {
        assert!(ease_out_quint(0.25) > 0.7);
        assert!(ease_out_quint(0.5) > linear(0.5));
    }

    #[test]
    fn out_of_range_inputs_clamp() {
        assert_eq!(ease_out_quint(-1.0), 0.0);
        assert_eq!(ease_out_quint(2.0), 1.0);
        assert_eq!(linear(f64::NAN), 0.0);
    }

    #[test]
    fn lerp_midpoint() {
        let mid = lerp(Position::new(0.0, 10.0), Position::new(100.0, 30.0), 0.5);
        assert_eq!(mid, Position::new(50.0, 20.0));
    }
}
