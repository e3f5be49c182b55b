#![forbid(unsafe_code)]

//! Error types.
//!
//! Every variant of [`SortableError`] is an internal-invariant breach: the
//! engine only consumes geometry it measured itself, so there is no
//! malformed-input path. Handlers return the error and leave state untouched
//! instead of coercing it.

use std::fmt;

use sortkit_core::ElementId;

/// Invalid [`SortableOptions`](crate::SortableOptions) values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OptionsError {
    ZeroSnapDuration,
    InvalidScrollStep { step: f64 },
    InvalidHotZoneFraction { fraction: f64 },
    InvalidSnapThreshold { threshold: f64 },
}

impl fmt::Display for OptionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroSnapDuration => write!(f, "snap duration must be > 0"),
            Self::InvalidScrollStep { step } => {
                write!(f, "scroll step must be finite and > 0 (got {step})")
            }
            Self::InvalidHotZoneFraction { fraction } => {
                write!(f, "hot-zone fraction must be in (0, 0.5] (got {fraction})")
            }
            Self::InvalidSnapThreshold { threshold } => {
                write!(f, "snap threshold must be finite and > 0 (got {threshold})")
            }
        }
    }
}

impl std::error::Error for OptionsError {}

/// Fatal precondition failure inside the drag engine.
#[derive(Debug, Clone, PartialEq)]
pub enum SortableError {
    /// A drag was started while another one is pending, active, or dropping.
    NotIdle,
    /// An operation that needs the dragged item ran without one.
    NoDraggingItem { operation: &'static str },
    /// An operation that needs the placeholder ran without one.
    NoPlaceholder { operation: &'static str },
    /// Two items claimed the same index after a reorder.
    IndexCollision { index: usize },
    /// An item's element is no longer among the container's children.
    ElementNotInList { element: ElementId },
    /// The committed target index points outside the item list.
    TargetOutOfRange { index: isize },
    /// A limit was requested for a neighbor without a direction.
    NoDirection,
    /// A pointer-down arrived for an element that is not an item.
    UnknownElement { element: ElementId },
    /// A drag was requested after `destroy`.
    Destroyed,
    InvalidOptions(OptionsError),
}

impl fmt::Display for SortableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotIdle => write!(f, "tried to start a drag while not idle"),
            Self::NoDraggingItem { operation } => write!(f, "no dragging item on {operation}"),
            Self::NoPlaceholder { operation } => write!(f, "no placeholder on {operation}"),
            Self::IndexCollision { index } => {
                write!(f, "index collision after reorder at index {index}")
            }
            Self::ElementNotInList { element } => {
                write!(f, "element {element} not found in parent")
            }
            Self::TargetOutOfRange { index } => {
                write!(f, "dragged-to index {index} is outside the list")
            }
            Self::NoDirection => write!(f, "cannot compute a limit with no direction"),
            Self::UnknownElement { element } => {
                write!(f, "element {element} is not a sortable item")
            }
            Self::Destroyed => write!(f, "sortable has been destroyed"),
            Self::InvalidOptions(error) => write!(f, "invalid sortable options: {error}"),
        }
    }
}

impl std::error::Error for SortableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        if let Self::InvalidOptions(error) = self {
            return Some(error);
        }
        None
    }
}

impl From<OptionsError> for SortableError {
    fn from(error: OptionsError) -> Self {
        Self::InvalidOptions(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn display_names_the_operation() {
        let err = SortableError::NoDraggingItem {
            operation: "continue dragging",
        };
        assert_eq!(err.to_string(), "no dragging item on continue dragging");
    }

    #[test]
    fn options_error_is_the_source() {
        let err = SortableError::from(OptionsError::ZeroSnapDuration);
        assert!(err.source().is_some());
        assert!(SortableError::NotIdle.source().is_none());
    }
}
