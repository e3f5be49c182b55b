#![forbid(unsafe_code)]

//! Input subscription and dispatch outcomes.
//!
//! The host forwards pointer-downs on items at all times, but window-level
//! pointer moves/ups and scroll events only while the engine holds an
//! [`InputSubscription`]. The subscription belongs to one `Sortable` and is
//! released before any drop animation runs, so input arriving during
//! teardown cannot re-enter the drag.

use sortkit_core::SortHost;

/// Deterministic reason why an incoming signal was not acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IgnoredReason {
    /// Window-level input arrived while no drag holds the subscription.
    NotBound,
    /// Pointer-down while a drag is pending, active, or dropping.
    Busy,
    /// Scroll event from a target that is not one of the tracked scrollables.
    UntrackedScrollTarget,
    /// The engine has been destroyed.
    Destroyed,
}

/// Outcome of one forwarded input signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Dispatch {
    Handled,
    Ignored(IgnoredReason),
}

impl Dispatch {
    #[must_use]
    pub const fn is_handled(self) -> bool {
        matches!(self, Self::Handled)
    }

    #[must_use]
    pub const fn ignored_reason(self) -> Option<IgnoredReason> {
        match self {
            Self::Handled => None,
            Self::Ignored(reason) => Some(reason),
        }
    }
}

/// Window-level listener registration for the active drag.
#[derive(Debug, Clone, Default)]
pub struct InputSubscription {
    bound: bool,
    generation: u64,
}

impl InputSubscription {
    /// Bind once. Returns `false` if already bound.
    pub fn bind<H: SortHost + ?Sized>(&mut self, host: &mut H) -> bool {
        if self.bound {
            return false;
        }
        host.bind_input();
        self.bound = true;
        self.generation += 1;
        true
    }

    /// Release the binding. Returns `false` if nothing was bound.
    pub fn release<H: SortHost + ?Sized>(&mut self, host: &mut H) -> bool {
        if !self.bound {
            return false;
        }
        host.unbind_input();
        self.bound = false;
        true
    }

    #[must_use]
    pub const fn is_bound(&self) -> bool {
        self.bound
    }

    /// Number of drags that have bound input so far.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortkit_core::Size;
    use sortkit_harness::SimHost;

    #[test]
    fn bind_and_release_are_paired() {
        let mut host = SimHost::new(Size::new(100.0, 100.0));
        let mut input = InputSubscription::default();

        assert!(input.bind(&mut host));
        assert!(!input.bind(&mut host));
        assert!(host.input_bound());

        assert!(input.release(&mut host));
        assert!(!input.release(&mut host));
        assert_eq!(host.input_binding_calls(), (1, 1));
        assert_eq!(input.generation(), 1);
    }

    #[test]
    fn dispatch_helpers() {
        assert!(Dispatch::Handled.is_handled());
        assert_eq!(
            Dispatch::Ignored(IgnoredReason::Busy).ignored_reason(),
            Some(IgnoredReason::Busy)
        );
    }
}
