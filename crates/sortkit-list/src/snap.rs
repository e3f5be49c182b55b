#![forbid(unsafe_code)]

//! Snap-back animation.
//!
//! Moves the dropped item from where the pointer released it to the
//! placeholder's slot. The animation owns no timer: the orchestrator calls
//! [`SnapAnimation::tick`] once per frame with the host clock and reschedules
//! while it returns [`SnapStep::Continue`].
//!
//! Time starts at the first tick, so the first frame always renders the
//! starting position (or finishes immediately when already on target).

use std::time::Duration;

use sortkit_core::Position;
use sortkit_core::easing::{EasingFn, ease_out_quint, lerp};

/// Outcome of one animation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SnapStep {
    /// Render this position and tick again next frame.
    Continue(Position),
    /// Render the exact target. The animation is over.
    Done(Position),
}

/// Ease-out interpolation toward a fixed target.
#[derive(Debug, Clone)]
pub struct SnapAnimation {
    from: Position,
    to: Position,
    duration: Duration,
    threshold: f64,
    easing: EasingFn,
    started_at: Option<Duration>,
    finished: bool,
}

impl SnapAnimation {
    #[must_use]
    pub fn new(from: Position, to: Position, duration: Duration, threshold: f64) -> Self {
        Self {
            from,
            to,
            duration,
            threshold,
            easing: ease_out_quint,
            started_at: None,
            finished: false,
        }
    }

    /// Replace the easing curve.
    #[must_use]
    pub fn with_easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Advance to `now`.
    ///
    /// After [`SnapStep::Done`] or [`Self::cancel`] every further tick keeps
    /// returning `Done(target)`.
    pub fn tick(&mut self, now: Duration) -> SnapStep {
        if self.finished {
            return SnapStep::Done(self.to);
        }

        let started = *self.started_at.get_or_insert(now);
        let elapsed = now.saturating_sub(started);
        let progress = if self.duration.is_zero() {
            1.0
        } else {
            elapsed.as_secs_f64() / self.duration.as_secs_f64()
        };
        let eased = lerp(self.from, self.to, (self.easing)(progress));

        let reached_x = (self.to.x - eased.x).abs() < self.threshold;
        let reached_y = (self.to.y - eased.y).abs() < self.threshold;
        if (reached_x && reached_y) || elapsed >= self.duration {
            self.finished = true;
            return SnapStep::Done(self.to);
        }

        // An axis that has arrived stays pinned to the target.
        SnapStep::Continue(Position::new(
            if reached_x { self.to.x } else { eased.x },
            if reached_y { self.to.y } else { eased.y },
        ))
    }

    /// Stop the animation without reaching the target.
    pub fn cancel(&mut self) {
        self.finished = true;
    }

    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    #[must_use]
    pub const fn from(&self) -> Position {
        self.from
    }

    #[must_use]
    pub const fn target(&self) -> Position {
        self.to
    }
}
