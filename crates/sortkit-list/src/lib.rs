#![forbid(unsafe_code)]

//! Drag-to-reorder engine for lists.
//!
//! # Role in sortkit
//! `sortkit-list` is the state machine: it turns forwarded pointer, scroll,
//! and frame signals into item positions, sibling displacement, autoscroll,
//! and a committed order. Everything it knows about the outside world comes
//! through [`SortHost`](sortkit_core::SortHost).
//!
//! # How it fits in the system
//! The host owns the document and the clock. It forwards item pointer-downs
//! to [`Sortable::pointer_down_on`], window-level moves/ups and scrolls while
//! [`SortHost::bind_input`](sortkit_core::SortHost::bind_input) is in effect,
//! and calls [`Sortable::on_frame`] after every
//! [`SortHost::request_frame`](sortkit_core::SortHost::request_frame).
//!
//! ```ignore
//! let mut sortable = Sortable::new(host, list, SortableOptions::vertical())?;
//! sortable.subscribe(|event| println!("{event:?}"));
//! sortable.pointer_down_on(item, pointer)?;
//! // on paint:
//! sortable.on_frame(now)?;
//! ```

pub mod error;
pub mod event;
pub mod frame;
pub mod input;
pub mod item;
pub mod limit;
pub mod options;
pub mod placeholder;
pub mod scrollable;
pub mod snap;
pub mod sortable;
pub mod target;

pub use error::{OptionsError, SortableError};
pub use event::{ItemRef, ListenerId, SortableEvent};
pub use frame::FrameTask;
pub use input::{Dispatch, IgnoredReason, InputSubscription};
pub use item::{Displacement, DisplacementDirection, Item, ItemState};
pub use limit::{Limit, get_limits, is_limit_exceeded};
pub use options::{CustomClasses, SortableOptions};
pub use placeholder::Placeholder;
pub use scrollable::{ElementScrollable, ScrollArea, Scrollable, ViewportScrollable};
pub use snap::{SnapAnimation, SnapStep};
pub use sortable::{Sortable, SortableState};
