#![forbid(unsafe_code)]

//! Drag orchestrator.
//!
//! [`Sortable`] owns the host, the items, and at most one drag session. The
//! host forwards input and frames; the engine answers with host mutations and
//! lifecycle events.
//!
//! # State machine
//!
//! ```text
//!          pointer-down            StartDrag frame
//!   Idle ───────────────▶ Pending ─────────────────▶ Dragging
//!    ▲                                                  │ pointer-up
//!    │         snap done                                ▼
//!    └──────────────────────────────────────────── Dropping
//! ```
//!
//! # Invariants
//!
//! 1. At most one item is `Dragging`/`Dropping`, and only while a session
//!    exists.
//! 2. Input is bound exactly while the state is `Dragging`.
//! 3. `items` stays sorted by `index`; indices are only rewritten when the
//!    physical order is committed at pointer-up.
//! 4. Within one handler, limits are recomputed before displacement is
//!    applied, and all siblings are displaced against a single target index.

use std::time::Duration;

use ahash::{AHashMap, AHashSet};
use sortkit_core::{Bounds, ElementId, Position, ScrollTarget, SortHost};
use sortkit_core::{debug, trace, warn};

use crate::error::SortableError;
use crate::event::{ItemRef, ListenerId, Listeners, SortableEvent};
use crate::frame::{FrameQueue, FrameTask};
use crate::input::{Dispatch, IgnoredReason, InputSubscription};
use crate::item::{Item, ItemState};
use crate::limit::Limit;
use crate::options::SortableOptions;
use crate::placeholder::Placeholder;
use crate::scrollable::{Scrollable, calculate_scroll_areas, collect_scrollables};
use crate::snap::{SnapAnimation, SnapStep};
use crate::target::{displace_items, find_new_offset, limits_around, reset_displacements};

/// Lifecycle of the list as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SortableState {
    #[default]
    Idle,
    /// Pointer is down; the drag begins on the next frame.
    Pending,
    Dragging,
    /// Pointer released; the snap animation is running.
    Dropping,
}

/// Everything that exists only for the duration of one drag.
#[derive(Debug)]
struct DragSession {
    /// Position of the dragged item in `items`.
    slot: usize,
    start_index: usize,
    pointer: Position,
    click_offset: Position,
    drag_index_offset: isize,
    limits: Vec<Limit>,
    out_of_bounds: bool,
    autoscrolling: bool,
    placeholder: Option<Placeholder>,
    scrollables: Vec<Box<dyn Scrollable>>,
    snap: Option<SnapAnimation>,
}

impl DragSession {
    fn new(
        slot: usize,
        start_index: usize,
        pointer: Position,
        scrollables: Vec<Box<dyn Scrollable>>,
    ) -> Self {
        Self {
            slot,
            start_index,
            pointer,
            click_offset: Position::ZERO,
            drag_index_offset: 0,
            limits: Vec::new(),
            out_of_bounds: false,
            autoscrolling: false,
            placeholder: None,
            scrollables,
            snap: None,
        }
    }

    fn target_index(&self) -> usize {
        self.start_index.saturating_add_signed(self.drag_index_offset)
    }

    /// Sum of every scrollable's offset since drag start.
    fn scroll_offset(&self) -> Position {
        self.scrollables.iter().map(|s| s.offset_delta()).sum()
    }

    /// Recompute the target from `absolute`, then limits, then displacement.
    /// Returns the previous target index.
    fn retarget<H: SortHost + ?Sized>(
        &mut self,
        host: &mut H,
        items: &mut [Item],
        options: &SortableOptions,
        absolute: Position,
    ) -> Result<usize, SortableError> {
        let previous = self.target_index();
        if let Some(offset) = find_new_offset(options.list_axis, items, self.start_index, absolute)
        {
            self.drag_index_offset = offset;
        }
        self.limits = limits_around(options.list_axis, items, self.target_index())?;
        displace_items(host, items, options.list_axis, self.slot, self.target_index());
        Ok(previous)
    }
}

/// A reorderable list over a host-owned container.
#[derive(Debug)]
pub struct Sortable<H: SortHost> {
    host: H,
    container: ElementId,
    options: SortableOptions,
    items: Vec<Item>,
    lookup: AHashMap<ElementId, usize>,
    bounds: Bounds,
    state: SortableState,
    session: Option<DragSession>,
    frames: FrameQueue,
    input: InputSubscription,
    listeners: Listeners,
    destroyed: bool,
}

impl<H: SortHost> Sortable<H> {
    /// Build a list from the current children of `container` (or the
    /// descendants matching `options.child_selector`), in document order.
    pub fn new(
        mut host: H,
        container: ElementId,
        options: SortableOptions,
    ) -> Result<Self, SortableError> {
        options.validate()?;

        let elements = collect_elements(&host, container, options.child_selector.as_deref());
        let mut items = Vec::with_capacity(elements.len());
        for (index, element) in elements.into_iter().enumerate() {
            let id = host
                .element_key(element)
                .unwrap_or_else(|| format!("sortable-item-{index}"));
            items.push(Item::new(&mut host, element, index, options.list_axis, id));
        }
        let bounds = host.bounding_rect(container);

        debug!(
            message = "sortable.init",
            container = %container,
            items = items.len(),
            list_axis = ?options.list_axis
        );

        let mut sortable = Self {
            host,
            container,
            options,
            items,
            lookup: AHashMap::new(),
            bounds,
            state: SortableState::Idle,
            session: None,
            frames: FrameQueue::default(),
            input: InputSubscription::default(),
            listeners: Listeners::default(),
            destroyed: false,
        };
        sortable.rebuild_lookup();
        Ok(sortable)
    }

    /// [`Self::new`] with default options.
    pub fn with_defaults(host: H, container: ElementId) -> Result<Self, SortableError> {
        Self::new(host, container, SortableOptions::default())
    }

    // --- Host access -------------------------------------------------------

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Give the host back. Call [`Self::destroy`] first to leave it clean.
    pub fn into_host(self) -> H {
        self.host
    }

    // --- Order -------------------------------------------------------------

    /// Item elements in current order.
    #[must_use]
    pub fn to_elements(&self) -> Vec<ElementId> {
        self.items.iter().map(Item::element).collect()
    }

    /// Item ids in current order.
    #[must_use]
    pub fn to_ids(&self) -> Vec<String> {
        self.items.iter().map(|item| item.id().to_owned()).collect()
    }

    /// Construction-time indices in current order.
    #[must_use]
    pub fn to_original_indices(&self) -> Vec<usize> {
        self.items.iter().map(Item::original_index).collect()
    }

    // --- Accessors ---------------------------------------------------------

    #[must_use]
    pub const fn state(&self) -> SortableState {
        self.state
    }

    #[must_use]
    pub const fn container(&self) -> ElementId {
        self.container
    }

    #[must_use]
    pub const fn options(&self) -> &SortableOptions {
        &self.options
    }

    /// Container bounds as last measured.
    #[must_use]
    pub const fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Items sorted by index.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[must_use]
    pub fn item(&self, element: ElementId) -> Option<&Item> {
        self.lookup.get(&element).map(|slot| &self.items[*slot])
    }

    /// The pressed, dragged, or dropping item.
    #[must_use]
    pub fn dragging_item(&self) -> Option<&Item> {
        self.session.as_ref().map(|session| &self.items[session.slot])
    }

    /// Signed distance from the start index to the prospective drop index.
    #[must_use]
    pub fn drag_index_offset(&self) -> isize {
        self.session
            .as_ref()
            .map_or(0, |session| session.drag_index_offset)
    }

    /// Prospective drop index while a drag is active.
    #[must_use]
    pub fn target_index(&self) -> Option<usize> {
        self.session.as_ref().map(DragSession::target_index)
    }

    #[must_use]
    pub fn limits(&self) -> &[Limit] {
        self.session
            .as_ref()
            .map(|session| session.limits.as_slice())
            .unwrap_or_default()
    }

    /// Scrollables tracked for the current drag, innermost first.
    #[must_use]
    pub fn scrollables(&self) -> &[Box<dyn Scrollable>] {
        self.session
            .as_ref()
            .map(|session| session.scrollables.as_slice())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn placeholder(&self) -> Option<&Placeholder> {
        self.session
            .as_ref()
            .and_then(|session| session.placeholder.as_ref())
    }

    /// True while the dragged item's center is outside the list.
    #[must_use]
    pub fn is_out_of_bounds(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.out_of_bounds)
    }

    #[must_use]
    pub fn is_autoscrolling(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.autoscrolling)
    }

    /// Whether `on_frame` has work queued.
    #[must_use]
    pub fn has_pending_frame(&self) -> bool {
        !self.frames.is_empty()
    }

    #[must_use]
    pub fn pending_frames(&self) -> Vec<FrameTask> {
        self.frames.pending().collect()
    }

    #[must_use]
    pub const fn is_input_bound(&self) -> bool {
        self.input.is_bound()
    }

    #[must_use]
    pub const fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    // --- Events ------------------------------------------------------------

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&SortableEvent) + 'static,
    {
        self.listeners.subscribe(Box::new(listener))
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Re-measure the container.
    pub fn refresh_bounds(&mut self) {
        self.bounds = self.host.bounding_rect(self.container);
    }

    // --- Input -------------------------------------------------------------

    /// Item pointer-down forwarded by the host.
    ///
    /// Ignored unless idle. Errors if `element` is not an item.
    pub fn pointer_down_on(
        &mut self,
        element: ElementId,
        pointer: Position,
    ) -> Result<Dispatch, SortableError> {
        if self.destroyed {
            return Ok(Dispatch::Ignored(IgnoredReason::Destroyed));
        }
        if !self.lookup.contains_key(&element) {
            return Err(SortableError::UnknownElement { element });
        }
        if self.state != SortableState::Idle {
            trace!(message = "sortable.pointer_down.ignored", state = ?self.state);
            return Ok(Dispatch::Ignored(IgnoredReason::Busy));
        }
        self.start_drag(element, pointer)?;
        Ok(Dispatch::Handled)
    }

    /// Begin dragging `element` from `pointer`.
    ///
    /// Discovers scrollable ancestors immediately; everything that needs fresh
    /// layout happens on the next frame.
    pub fn start_drag(&mut self, element: ElementId, pointer: Position) -> Result<(), SortableError> {
        if self.destroyed {
            return Err(SortableError::Destroyed);
        }
        if self.state != SortableState::Idle {
            return Err(SortableError::NotIdle);
        }
        let slot = *self
            .lookup
            .get(&element)
            .ok_or(SortableError::UnknownElement { element })?;

        let mut scrollables = collect_scrollables(
            &self.host,
            self.container,
            self.options.scroll_step,
            self.options.hot_zone_fraction,
        );
        calculate_scroll_areas(&mut scrollables, &self.host);

        debug!(
            message = "sortable.pending",
            item = %self.items[slot].id(),
            index = self.items[slot].index(),
            scrollables = scrollables.len()
        );

        self.session = Some(DragSession::new(
            slot,
            self.items[slot].index(),
            pointer,
            scrollables,
        ));
        self.state = SortableState::Pending;
        self.frames.push(FrameTask::StartDrag, &mut self.host);
        Ok(())
    }

    /// Window-level pointer move.
    pub fn pointer_move(&mut self, pointer: Position) -> Result<Dispatch, SortableError> {
        if let Some(reason) = self.unbound_reason() {
            return Ok(Dispatch::Ignored(reason));
        }
        let session = self
            .session
            .as_mut()
            .ok_or(SortableError::NoDraggingItem {
                operation: "pointer move",
            })?;
        session.pointer = pointer;
        self.continue_dragging()?;
        Ok(Dispatch::Handled)
    }

    /// Window-level pointer release.
    pub fn pointer_up(&mut self) -> Result<Dispatch, SortableError> {
        if let Some(reason) = self.unbound_reason() {
            return Ok(Dispatch::Ignored(reason));
        }
        self.stop_dragging()?;
        Ok(Dispatch::Handled)
    }

    /// Capture-phase scroll event from `target`.
    pub fn scroll(&mut self, target: ScrollTarget) -> Result<Dispatch, SortableError> {
        if let Some(reason) = self.unbound_reason() {
            return Ok(Dispatch::Ignored(reason));
        }
        if self.handle_scroll(target)? {
            Ok(Dispatch::Handled)
        } else {
            warn!(message = "sortable.scroll.untracked", scroll_target = ?target);
            Ok(Dispatch::Ignored(IgnoredReason::UntrackedScrollTarget))
        }
    }

    /// Run the tasks queued before this call. `now` is the host's monotonic
    /// frame time.
    pub fn on_frame(&mut self, now: Duration) -> Result<(), SortableError> {
        if self.destroyed {
            return Ok(());
        }
        for task in self.frames.take_batch() {
            trace!(message = "sortable.frame", task = ?task, now = ?now);
            match task {
                FrameTask::StartDrag => self.begin_drag()?,
                FrameTask::ReenterBounds => self.reenter_bounds()?,
                FrameTask::Autoscroll => self.autoscroll_tick()?,
                FrameTask::SnapStart => self.start_snap()?,
                FrameTask::SnapTick => self.snap_tick(now)?,
            }
        }
        Ok(())
    }

    /// Tear everything down: cancel frames and animation, release input,
    /// remove the placeholder, strip every engine style and class, and drop
    /// listeners. Later input is ignored.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }

        self.frames.clear();
        self.input.release(&mut self.host);
        if let Some(mut session) = self.session.take() {
            if let Some(snap) = session.snap.as_mut() {
                snap.cancel();
            }
            if let Some(placeholder) = session.placeholder.take() {
                placeholder.destroy(&mut self.host);
            }
            if self.state == SortableState::Dragging {
                self.host.set_document_dragging(false);
            }
        }

        let classes = &self.options.custom_classes;
        for item in &mut self.items {
            item.detach(&mut self.host);
            for class in [&classes.dragging_item, &classes.dragging_items]
                .into_iter()
                .flatten()
            {
                self.host.remove_class(item.element(), class);
            }
        }
        if let Some(class) = &classes.dragging_container {
            self.host.remove_class(self.container, class);
        }

        self.listeners.clear();
        self.state = SortableState::Idle;
        self.destroyed = true;
        debug!(message = "sortable.destroyed", container = %self.container);
    }

    // --- Internals ---------------------------------------------------------

    fn unbound_reason(&self) -> Option<IgnoredReason> {
        if self.destroyed {
            Some(IgnoredReason::Destroyed)
        } else if !self.input.is_bound() {
            Some(IgnoredReason::NotBound)
        } else {
            None
        }
    }

    fn rebuild_lookup(&mut self) {
        self.lookup = self
            .items
            .iter()
            .enumerate()
            .map(|(slot, item)| (item.element(), slot))
            .collect();
    }

    fn emit(&mut self, event: SortableEvent) {
        self.listeners.emit(&event);
    }

    fn begin_drag(&mut self) -> Result<(), SortableError> {
        if self.state != SortableState::Pending {
            return Ok(());
        }
        let session = self
            .session
            .as_mut()
            .ok_or(SortableError::NoDraggingItem {
                operation: "start dragging",
            })?;

        for item in &mut self.items {
            item.calculate_dimensions(&self.host);
        }
        self.bounds = self.host.bounding_rect(self.container);

        self.state = SortableState::Dragging;
        self.input.bind(&mut self.host);
        self.host.set_document_dragging(true);

        let classes = &self.options.custom_classes;
        let dragged = &mut self.items[session.slot];
        let origin = dragged.bounds().origin();
        dragged.set_position(&mut self.host, origin);
        dragged.state = ItemState::Dragging;
        if let Some(class) = &classes.dragging_item {
            self.host.add_class(dragged.element(), class);
        }
        if let Some(class) = &classes.dragging_container {
            self.host.add_class(self.container, class);
        }

        for (slot, item) in self.items.iter().enumerate() {
            if slot == session.slot {
                continue;
            }
            item.set_stepping_aside(&mut self.host);
            if let Some(class) = &classes.dragging_items {
                self.host.add_class(item.element(), class);
            }
        }

        session.placeholder = Some(Placeholder::new(&mut self.host, &self.items[session.slot]));
        session.drag_index_offset = 0;
        session.out_of_bounds = false;
        session.click_offset = session.pointer - origin;
        session.limits = limits_around(self.options.list_axis, &self.items, session.start_index)?;

        let index = session.start_index;
        let item = ItemRef::from(&self.items[session.slot]);
        debug!(
            message = "sortable.drag_start",
            item = %item.id,
            index,
            limits = session.limits.len()
        );
        self.emit(SortableEvent::DragStarted { item, index });
        Ok(())
    }

    /// Shared by pointer moves, scroll events, and autoscroll ticks.
    fn continue_dragging(&mut self) -> Result<(), SortableError> {
        let session = self
            .session
            .as_mut()
            .ok_or(SortableError::NoDraggingItem {
                operation: "continue dragging",
            })?;

        let dragged = &self.items[session.slot];
        let item_position = session.pointer - session.click_offset;
        dragged.set_position(&mut self.host, item_position);
        let size = dragged.bounds().size();
        let center = item_position + Position::new(size.width / 2.0, size.height / 2.0);
        let absolute = center + session.scroll_offset();

        let pointer = session.pointer;
        for scrollable in &mut session.scrollables {
            scrollable.update_scrolling(pointer);
        }
        if !session.autoscrolling && session.scrollables.iter().any(|s| s.should_scroll()) {
            session.autoscrolling = true;
            self.frames.push(FrameTask::Autoscroll, &mut self.host);
            trace!(message = "sortable.autoscroll.start");
        }

        if !self.bounds.contains(absolute) {
            // A re-entry that has not run yet is stale now.
            self.frames.cancel(FrameTask::ReenterBounds);
            if session.out_of_bounds {
                return Ok(());
            }

            session.out_of_bounds = true;
            session.limits.clear();
            let previous = session.target_index();
            session.drag_index_offset = 0;
            reset_displacements(&mut self.host, &mut self.items, session.slot);

            let start = session.start_index;
            let item = ItemRef::from(&self.items[session.slot]);
            debug!(message = "sortable.left_bounds", item = %item.id, x = absolute.x, y = absolute.y);
            if previous != start {
                self.emit(SortableEvent::TargetChanged {
                    item: item.clone(),
                    from: previous,
                    to: start,
                });
            }
            self.emit(SortableEvent::LeftBounds { item });
            return Ok(());
        }

        if session.out_of_bounds {
            self.frames.push_unique(FrameTask::ReenterBounds, &mut self.host);
            return Ok(());
        }

        if !session.limits.iter().any(|limit| limit.is_exceeded(absolute)) {
            return Ok(());
        }

        let previous = session.retarget(&mut self.host, &mut self.items, &self.options, absolute)?;
        let current = session.target_index();
        trace!(
            message = "sortable.retarget",
            from = previous,
            to = current,
            x = absolute.x,
            y = absolute.y
        );
        if previous != current {
            let item = ItemRef::from(&self.items[session.slot]);
            self.emit(SortableEvent::TargetChanged {
                item,
                from: previous,
                to: current,
            });
        }
        Ok(())
    }

    fn reenter_bounds(&mut self) -> Result<(), SortableError> {
        if self.state != SortableState::Dragging {
            return Ok(());
        }
        let session = self
            .session
            .as_mut()
            .ok_or(SortableError::NoDraggingItem {
                operation: "re-enter bounds",
            })?;
        if !session.out_of_bounds {
            return Ok(());
        }

        let size = self.items[session.slot].bounds().size();
        let center = session.pointer - session.click_offset
            + Position::new(size.width / 2.0, size.height / 2.0);
        let absolute = center + session.scroll_offset();
        if !self.bounds.contains(absolute) {
            return Ok(());
        }

        session.out_of_bounds = false;
        let previous = session.retarget(&mut self.host, &mut self.items, &self.options, absolute)?;
        let index = session.target_index();

        let item = ItemRef::from(&self.items[session.slot]);
        debug!(message = "sortable.entered_bounds", item = %item.id, index);
        if previous != index {
            self.emit(SortableEvent::TargetChanged {
                item: item.clone(),
                from: previous,
                to: index,
            });
        }
        self.emit(SortableEvent::EnteredBounds { item, index });
        Ok(())
    }

    /// Scroll the innermost scrollable that wants to, then reschedule.
    /// Stops without rescheduling once none does.
    fn autoscroll_tick(&mut self) -> Result<(), SortableError> {
        if self.state != SortableState::Dragging {
            return Ok(());
        }
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };

        let Some(found) = session.scrollables.iter().position(|s| s.should_scroll()) else {
            session.autoscrolling = false;
            trace!(message = "sortable.autoscroll.stop");
            return Ok(());
        };

        let scrollable = &mut session.scrollables[found];
        scrollable.do_scroll(&mut self.host);
        let target = scrollable.target();
        self.handle_scroll(target)?;

        if self.state == SortableState::Dragging {
            self.frames.push(FrameTask::Autoscroll, &mut self.host);
        }
        Ok(())
    }

    /// Returns `false` if `target` is not tracked.
    fn handle_scroll(&mut self, target: ScrollTarget) -> Result<bool, SortableError> {
        let session = self
            .session
            .as_mut()
            .ok_or(SortableError::NoDraggingItem { operation: "scroll" })?;

        let Some(index) = session.scrollables.iter().position(|s| s.target() == target) else {
            return Ok(false);
        };
        session.scrollables[index].update_offset_delta(&self.host);

        // Scrolling only the innermost container leaves every visible area
        // as it was.
        if index > 0 || target == ScrollTarget::Viewport {
            calculate_scroll_areas(&mut session.scrollables, &self.host);
        }

        self.continue_dragging()?;
        Ok(true)
    }

    fn stop_dragging(&mut self) -> Result<(), SortableError> {
        self.input.release(&mut self.host);
        self.frames.cancel(FrameTask::Autoscroll);
        self.frames.cancel(FrameTask::ReenterBounds);

        let (from, to) = self.move_items_after_drag()?;
        self.host.set_document_dragging(false);

        let session = self
            .session
            .as_mut()
            .ok_or(SortableError::NoDraggingItem {
                operation: "stop dragging",
            })?;
        session.drag_index_offset = 0;
        session.autoscrolling = false;
        session.out_of_bounds = false;
        session.limits.clear();
        session.scrollables.clear();

        let dragged = &mut self.items[session.slot];
        dragged.state = ItemState::Dropping;
        let item = ItemRef::from(&*dragged);
        self.state = SortableState::Dropping;

        debug!(message = "sortable.dropped", item = %item.id, from, to);
        self.emit(SortableEvent::Dropped { item, from, to });
        self.frames.push(FrameTask::SnapStart, &mut self.host);
        Ok(())
    }

    /// Clear sibling styles and commit the new physical order.
    /// Returns `(from, to)` indices of the dragged item.
    fn move_items_after_drag(&mut self) -> Result<(usize, usize), SortableError> {
        let session = self
            .session
            .as_ref()
            .ok_or(SortableError::NoDraggingItem {
                operation: "stop dragging",
            })?;
        let placeholder = session
            .placeholder
            .as_ref()
            .ok_or(SortableError::NoPlaceholder {
                operation: "stop dragging",
            })?
            .element();
        let dragged_slot = session.slot;
        let from = session.start_index;
        let offset = session.drag_index_offset;

        for (slot, item) in self.items.iter_mut().enumerate() {
            if slot != dragged_slot {
                item.remove_style_and_displacement(&mut self.host);
            }
        }

        if offset == 0 {
            return Ok((from, from));
        }

        let to = from as isize + offset;
        let anchor = usize::try_from(to)
            .ok()
            .and_then(|idx| self.items.get(idx))
            .map(Item::element)
            .ok_or(SortableError::TargetOutOfRange { index: to })?;
        let dragged = self.items[dragged_slot].element();
        let parent = self
            .host
            .parent(anchor)
            .ok_or(SortableError::ElementNotInList { element: anchor })?;

        let reference = if offset > 0 {
            next_sibling(&self.host, parent, anchor)
        } else {
            Some(anchor)
        };
        self.host.insert_before(parent, dragged, reference);
        self.host.insert_before(parent, placeholder, Some(dragged));

        self.reindex()?;
        let slot = *self
            .lookup
            .get(&dragged)
            .ok_or(SortableError::ElementNotInList { element: dragged })?;
        let new_index = self.items[slot].index();
        if let Some(session) = self.session.as_mut() {
            session.slot = slot;
        }
        Ok((from, new_index))
    }

    /// Re-derive every index from the physical order and resort.
    fn reindex(&mut self) -> Result<(), SortableError> {
        let physical = collect_elements(
            &self.host,
            self.container,
            self.options.child_selector.as_deref(),
        );
        let elements = self.to_elements();
        let indices = assign_indices(&elements, &physical)?;
        for (item, index) in self.items.iter_mut().zip(indices) {
            item.index = index;
        }

        self.items.sort_by_key(Item::index);
        self.rebuild_lookup();
        Ok(())
    }

    fn start_snap(&mut self) -> Result<(), SortableError> {
        if self.state != SortableState::Dropping {
            return Ok(());
        }
        let session = self
            .session
            .as_mut()
            .ok_or(SortableError::NoDraggingItem { operation: "snap" })?;
        let placeholder = session
            .placeholder
            .as_ref()
            .ok_or(SortableError::NoPlaceholder { operation: "snap" })?;

        let from = self
            .host
            .bounding_rect(self.items[session.slot].element())
            .origin();
        let to = self.host.bounding_rect(placeholder.element()).origin();
        session.snap = Some(SnapAnimation::new(
            from,
            to,
            self.options.snap_duration,
            self.options.snap_threshold,
        ));
        trace!(message = "sortable.snap.start", from_x = from.x, from_y = from.y, to_x = to.x, to_y = to.y);
        self.frames.push(FrameTask::SnapTick, &mut self.host);
        Ok(())
    }

    fn snap_tick(&mut self, now: Duration) -> Result<(), SortableError> {
        if self.state != SortableState::Dropping {
            return Ok(());
        }
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        let Some(snap) = session.snap.as_mut() else {
            return Ok(());
        };

        match snap.tick(now) {
            SnapStep::Continue(position) => {
                self.items[session.slot].set_position(&mut self.host, position);
                self.frames.push(FrameTask::SnapTick, &mut self.host);
                Ok(())
            }
            SnapStep::Done(target) => {
                self.items[session.slot].set_position(&mut self.host, target);
                self.finish_drag()
            }
        }
    }

    fn finish_drag(&mut self) -> Result<(), SortableError> {
        let session = self
            .session
            .take()
            .ok_or(SortableError::NoDraggingItem {
                operation: "finish dragging",
            })?;

        let dragged = &mut self.items[session.slot];
        dragged.state = ItemState::Idle;
        dragged.remove_style(&mut self.host);
        if let Some(placeholder) = session.placeholder {
            placeholder.destroy(&mut self.host);
        }

        let classes = &self.options.custom_classes;
        if let Some(class) = &classes.dragging_item {
            self.host.remove_class(self.items[session.slot].element(), class);
        }
        if let Some(class) = &classes.dragging_container {
            self.host.remove_class(self.container, class);
        }
        if let Some(class) = &classes.dragging_items {
            for item in &self.items {
                self.host.remove_class(item.element(), class);
            }
        }

        self.state = SortableState::Idle;
        let item = ItemRef::from(&self.items[session.slot]);
        debug!(message = "sortable.drag_finished", item = %item.id);
        self.emit(SortableEvent::DragFinished { item });
        Ok(())
    }
}

/// Index of each of `items` within `physical`, in `items` order.
///
/// Fails if an item is missing from `physical` or two items resolve to the
/// same slot.
pub(crate) fn assign_indices(
    items: &[ElementId],
    physical: &[ElementId],
) -> Result<Vec<usize>, SortableError> {
    let positions: AHashMap<ElementId, usize> = physical
        .iter()
        .enumerate()
        .map(|(index, element)| (*element, index))
        .collect();

    let mut seen = AHashSet::with_capacity(items.len());
    items
        .iter()
        .map(|element| {
            let index = *positions
                .get(element)
                .ok_or(SortableError::ElementNotInList { element: *element })?;
            if !seen.insert(index) {
                return Err(SortableError::IndexCollision { index });
            }
            Ok(index)
        })
        .collect()
}

/// Item elements of `container` in document order.
fn collect_elements<H: SortHost + ?Sized>(
    host: &H,
    container: ElementId,
    selector: Option<&str>,
) -> Vec<ElementId> {
    match selector {
        Some(selector) => host
            .select(container, selector)
            .into_iter()
            .filter(|el| !host.is_placeholder(*el))
            .collect(),
        None => host
            .children(container)
            .into_iter()
            .filter(|el| !host.is_placeholder(*el))
            .collect(),
    }
}

fn next_sibling<H: SortHost + ?Sized>(
    host: &H,
    parent: ElementId,
    el: ElementId,
) -> Option<ElementId> {
    let children = host.children(parent);
    let at = children.iter().position(|child| *child == el)?;
    children.get(at + 1).copied()
}
