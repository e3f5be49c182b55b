#![forbid(unsafe_code)]

//! Drag lifecycle notifications.
//!
//! Consumers register closures with [`Sortable::subscribe`](crate::Sortable::subscribe).
//! Each transition is delivered exactly once, synchronously, in registration
//! order, after the engine state reflecting it is already in place.

use std::fmt;

use crate::item::Item;

/// Stable reference to the item an event is about.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemRef {
    pub id: String,
    pub original_index: usize,
}

impl From<&Item> for ItemRef {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id().to_owned(),
            original_index: item.original_index(),
        }
    }
}

/// One drag lifecycle transition.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SortableEvent {
    /// The item is pinned under the pointer and siblings are ready to move.
    DragStarted { item: ItemRef, index: usize },
    /// The prospective drop index changed.
    TargetChanged { item: ItemRef, from: usize, to: usize },
    /// The item's center left the list. The target resets to the start index.
    LeftBounds { item: ItemRef },
    /// The item came back; `index` is the recomputed target.
    EnteredBounds { item: ItemRef, index: usize },
    /// Pointer released. The order is already committed.
    Dropped { item: ItemRef, from: usize, to: usize },
    /// Snap-back finished and the list is idle again.
    DragFinished { item: ItemRef },
}

impl SortableEvent {
    #[must_use]
    pub fn item(&self) -> &ItemRef {
        match self {
            Self::DragStarted { item, .. }
            | Self::TargetChanged { item, .. }
            | Self::LeftBounds { item }
            | Self::EnteredBounds { item, .. }
            | Self::Dropped { item, .. }
            | Self::DragFinished { item } => item,
        }
    }

    /// Short name used in log records.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::DragStarted { .. } => "drag_started",
            Self::TargetChanged { .. } => "target_changed",
            Self::LeftBounds { .. } => "left_bounds",
            Self::EnteredBounds { .. } => "entered_bounds",
            Self::Dropped { .. } => "dropped",
            Self::DragFinished { .. } => "drag_finished",
        }
    }
}

/// Handle returned by `subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&SortableEvent)>;

#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, Listener)>,
}

impl Listeners {
    pub(crate) fn subscribe(&mut self, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub(crate) fn emit(&mut self, event: &SortableEvent) {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "sortable.event",
            event = event.name(),
            item = %event.item().id,
            listeners = self.entries.len()
        );
        for (_, listener) in &mut self.entries {
            listener(event);
        }
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("next_id", &self.next_id)
            .field("count", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn item() -> ItemRef {
        ItemRef {
            id: "a".into(),
            original_index: 0,
        }
    }

    #[test]
    fn delivers_in_registration_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = Listeners::default();
        for tag in ["first", "second"] {
            let seen = Rc::clone(&seen);
            listeners.subscribe(Box::new(move |event| {
                seen.borrow_mut().push((tag, event.name()));
            }));
        }

        listeners.emit(&SortableEvent::LeftBounds { item: item() });
        assert_eq!(
            *seen.borrow(),
            vec![("first", "left_bounds"), ("second", "left_bounds")]
        );
    }

    #[test]
    fn unsubscribe_is_exact() {
        let mut listeners = Listeners::default();
        let a = listeners.subscribe(Box::new(|_| {}));
        let b = listeners.subscribe(Box::new(|_| {}));
        assert!(listeners.unsubscribe(a));
        assert!(!listeners.unsubscribe(a));
        assert_eq!(listeners.len(), 1);
        assert!(listeners.unsubscribe(b));
    }

    #[test]
    fn every_event_exposes_its_item() {
        let event = SortableEvent::Dropped {
            item: item(),
            from: 1,
            to: 3,
        };
        assert_eq!(event.item().id, "a");
        assert_eq!(event.name(), "dropped");
    }
}
