#![forbid(unsafe_code)]

//! Construction-time configuration.

use std::time::Duration;

use sortkit_core::ListAxis;

use crate::error::OptionsError;

/// Default snap-back animation length.
pub const DEFAULT_SNAP_DURATION: Duration = Duration::from_millis(300);
/// Default autoscroll increment per frame, in pixels.
pub const DEFAULT_SCROLL_STEP: f64 = 10.0;
/// Default share of a scrollable's visible extent used by each edge hot-zone.
pub const DEFAULT_HOT_ZONE_FRACTION: f64 = 0.1;
/// Default distance under which the snap animation jumps to its target.
pub const DEFAULT_SNAP_THRESHOLD: f64 = 0.5;

/// Optional cosmetic classes applied while a drag is active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CustomClasses {
    /// Added to the dragged item.
    pub dragging_item: Option<String>,
    /// Added to every item that is not being dragged.
    pub dragging_items: Option<String>,
    /// Added to the list container.
    pub dragging_container: Option<String>,
}

/// Options recognized by [`Sortable::new`](crate::Sortable::new).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SortableOptions {
    pub list_axis: ListAxis,
    /// Restrict items to descendants matching this selector instead of all
    /// direct children.
    pub child_selector: Option<String>,
    pub custom_classes: CustomClasses,
    pub snap_duration: Duration,
    pub scroll_step: f64,
    pub hot_zone_fraction: f64,
    pub snap_threshold: f64,
}

impl Default for SortableOptions {
    fn default() -> Self {
        Self {
            list_axis: ListAxis::Horizontal,
            child_selector: None,
            custom_classes: CustomClasses::default(),
            snap_duration: DEFAULT_SNAP_DURATION,
            scroll_step: DEFAULT_SCROLL_STEP,
            hot_zone_fraction: DEFAULT_HOT_ZONE_FRACTION,
            snap_threshold: DEFAULT_SNAP_THRESHOLD,
        }
    }
}

impl SortableOptions {
    #[must_use]
    pub fn horizontal() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn vertical() -> Self {
        Self::default().list_axis(ListAxis::Vertical)
    }

    #[must_use]
    pub fn list_axis(mut self, axis: ListAxis) -> Self {
        self.list_axis = axis;
        self
    }

    #[must_use]
    pub fn child_selector(mut self, selector: impl Into<String>) -> Self {
        self.child_selector = Some(selector.into());
        self
    }

    #[must_use]
    pub fn custom_classes(mut self, classes: CustomClasses) -> Self {
        self.custom_classes = classes;
        self
    }

    #[must_use]
    pub fn snap_duration(mut self, duration: Duration) -> Self {
        self.snap_duration = duration;
        self
    }

    #[must_use]
    pub fn scroll_step(mut self, step: f64) -> Self {
        self.scroll_step = step;
        self
    }

    #[must_use]
    pub fn hot_zone_fraction(mut self, fraction: f64) -> Self {
        self.hot_zone_fraction = fraction;
        self
    }

    #[must_use]
    pub fn snap_threshold(mut self, threshold: f64) -> Self {
        self.snap_threshold = threshold;
        self
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.snap_duration.is_zero() {
            return Err(OptionsError::ZeroSnapDuration);
        }
        if !self.scroll_step.is_finite() || self.scroll_step <= 0.0 {
            return Err(OptionsError::InvalidScrollStep {
                step: self.scroll_step,
            });
        }
        if !(self.hot_zone_fraction > 0.0 && self.hot_zone_fraction <= 0.5) {
            return Err(OptionsError::InvalidHotZoneFraction {
                fraction: self.hot_zone_fraction,
            });
        }
        if !self.snap_threshold.is_finite() || self.snap_threshold <= 0.0 {
            return Err(OptionsError::InvalidSnapThreshold {
                threshold: self.snap_threshold,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(SortableOptions::default().validate(), Ok(()));
        assert_eq!(SortableOptions::vertical().list_axis, ListAxis::Vertical);
    }

    #[test]
    fn rejects_degenerate_values() {
        assert_eq!(
            SortableOptions::default()
                .snap_duration(Duration::ZERO)
                .validate(),
            Err(OptionsError::ZeroSnapDuration)
        );
        assert!(matches!(
            SortableOptions::default().scroll_step(f64::NAN).validate(),
            Err(OptionsError::InvalidScrollStep { .. })
        ));
        assert!(matches!(
            SortableOptions::default().hot_zone_fraction(0.6).validate(),
            Err(OptionsError::InvalidHotZoneFraction { .. })
        ));
        assert!(matches!(
            SortableOptions::default().snap_threshold(0.0).validate(),
            Err(OptionsError::InvalidSnapThreshold { .. })
        ));
    }
}
