#![forbid(unsafe_code)]

//! Deterministic in-memory host for sortkit tests.
//!
//! [`SimHost`] is a miniature document: a tree of fixed-size elements laid out
//! by a one-axis flow algorithm, with margins, per-element scroll offsets, a
//! scrollable viewport, pinned (`position: fixed`) elements, translate
//! transforms, and classes. It records frame requests and input bindings
//! instead of acting on them, so tests drive time explicitly.
//!
//! # Layout model
//!
//! - Every element has an explicit border-box size.
//! - Children of an element flow along the parent's [`Axis`], margin box
//!   after margin box, starting at the parent's border-box origin plus the
//!   child's `offset`.
//! - Pinned elements leave the flow and sit at their pinned viewport position.
//! - Viewport rectangles subtract the scroll offset of every scrolling
//!   ancestor and of the viewport itself, then apply any translation.

pub mod fixtures;

use ahash::AHashSet;
use sortkit_core::{
    Axis, Bounds, ElementId, ItemStyle, Margins, Position, ScrollAxes, ScrollMetrics,
    ScrollTarget, Size, SortHost,
};

/// Construction parameters for one simulated element.
#[derive(Debug, Clone)]
pub struct ElementSpec {
    size: Size,
    margins: Margins,
    flow: Axis,
    overflow: ScrollAxes,
    offset: Position,
    key: Option<String>,
    classes: Vec<String>,
}

impl ElementSpec {
    /// An element with the given border-box size.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
            margins: Margins::default(),
            flow: Axis::Y,
            overflow: ScrollAxes::empty(),
            offset: Position::ZERO,
            key: None,
            classes: Vec::new(),
        }
    }

    #[must_use]
    pub fn margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Axis along which this element lays out its children.
    #[must_use]
    pub fn flow(mut self, axis: Axis) -> Self {
        self.flow = axis;
        self
    }

    #[must_use]
    pub fn overflow(mut self, axes: ScrollAxes) -> Self {
        self.overflow = axes;
        self
    }

    /// Shift the element from its flow slot.
    #[must_use]
    pub fn offset(mut self, x: f64, y: f64) -> Self {
        self.offset = Position::new(x, y);
        self
    }

    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    size: Size,
    margins: Margins,
    flow: Axis,
    overflow: ScrollAxes,
    offset: Position,
    scroll: Position,
    key: Option<String>,
    classes: AHashSet<String>,
    style: ItemStyle,
    style_history: Vec<ItemStyle>,
    placeholder: bool,
    removed: bool,
}

impl Node {
    fn from_spec(parent: Option<ElementId>, spec: ElementSpec) -> Self {
        Self {
            parent,
            children: Vec::new(),
            size: spec.size,
            margins: spec.margins,
            flow: spec.flow,
            overflow: spec.overflow,
            offset: spec.offset,
            scroll: Position::ZERO,
            key: spec.key,
            classes: spec.classes.into_iter().collect(),
            style: ItemStyle::Cleared,
            style_history: Vec::new(),
            placeholder: false,
            removed: false,
        }
    }

    fn is_pinned(&self) -> bool {
        matches!(self.style, ItemStyle::Pinned { .. })
    }

    fn margin_extent(&self) -> Size {
        Size::new(
            self.size.width + self.margins.horizontal_sum(),
            self.size.height + self.margins.vertical_sum(),
        )
    }
}

/// In-memory [`SortHost`] implementation.
#[derive(Debug, Clone)]
pub struct SimHost {
    nodes: Vec<Node>,
    viewport: Size,
    viewport_scroll: Position,
    document_size: Size,
    frame_requested: bool,
    frame_requests: usize,
    input_bound: bool,
    bind_calls: usize,
    unbind_calls: usize,
    document_dragging: bool,
}

impl SimHost {
    /// Create a document whose body fills `viewport` and does not scroll.
    #[must_use]
    pub fn new(viewport: Size) -> Self {
        let body = Node::from_spec(None, ElementSpec::new(viewport.width, viewport.height));
        Self {
            nodes: vec![body],
            viewport,
            viewport_scroll: Position::ZERO,
            document_size: viewport,
            frame_requested: false,
            frame_requests: 0,
            input_bound: false,
            bind_calls: 0,
            unbind_calls: 0,
            document_dragging: false,
        }
    }

    /// Make the page scrollable up to `size`.
    #[must_use]
    pub fn with_document_size(mut self, size: Size) -> Self {
        self.document_size = size;
        self.nodes[0].size = size;
        self
    }

    /// The body element.
    #[must_use]
    pub fn root(&self) -> ElementId {
        ElementId(0)
    }

    /// Append a new element under `parent`.
    pub fn append(&mut self, parent: ElementId, spec: ElementSpec) -> ElementId {
        let id = ElementId(self.nodes.len() as u64);
        self.nodes.push(Node::from_spec(Some(parent), spec));
        self.node_mut(parent).children.push(id);
        id
    }

    fn node(&self, el: ElementId) -> &Node {
        &self.nodes[el.0 as usize]
    }

    fn node_mut(&mut self, el: ElementId) -> &mut Node {
        &mut self.nodes[el.0 as usize]
    }

    fn detach(&mut self, el: ElementId) {
        if let Some(parent) = self.node(el).parent {
            self.node_mut(parent).children.retain(|child| *child != el);
        }
        self.node_mut(el).parent = None;
    }

    /// Border-box origin in document coordinates (no scrolling, no transforms).
    fn document_origin(&self, el: ElementId) -> Position {
        let node = self.node(el);
        let Some(parent) = node.parent else {
            return node.offset;
        };
        let parent_node = self.node(parent);
        let mut cursor = self.document_origin(parent);
        for &sibling in &parent_node.children {
            if sibling == el {
                break;
            }
            let sib = self.node(sibling);
            if sib.is_pinned() {
                continue;
            }
            match parent_node.flow {
                Axis::X => cursor.x += sib.margin_extent().width,
                Axis::Y => cursor.y += sib.margin_extent().height,
            }
        }
        cursor + Position::new(node.margins.left, node.margins.top) + node.offset
    }

    /// Sum of scroll offsets of every strict ancestor plus the viewport.
    fn scroll_shift(&self, el: ElementId) -> Position {
        let mut shift = self.viewport_scroll;
        let mut current = self.node(el).parent;
        while let Some(ancestor) = current {
            shift += self.node(ancestor).scroll;
            current = self.node(ancestor).parent;
        }
        shift
    }

    fn content_extent(&self, el: ElementId) -> Size {
        let node = self.node(el);
        let mut along = 0.0_f64;
        let mut across = 0.0_f64;
        for &child in &node.children {
            let child = self.node(child);
            if child.is_pinned() {
                continue;
            }
            let extent = child.margin_extent();
            let (main, cross) = match node.flow {
                Axis::X => (extent.width, extent.height),
                Axis::Y => (extent.height, extent.width),
            };
            along += main;
            across = across.max(cross);
        }
        match node.flow {
            Axis::X => Size::new(along, across),
            Axis::Y => Size::new(across, along),
        }
    }

    // --- Inspection --------------------------------------------------------

    /// Current engine-owned style of `el`.
    #[must_use]
    pub fn style(&self, el: ElementId) -> ItemStyle {
        self.node(el).style
    }

    /// Number of `apply_style` calls received for `el`.
    #[must_use]
    pub fn style_writes(&self, el: ElementId) -> usize {
        self.node(el).style_history.len()
    }

    /// Every style applied to `el`, oldest first.
    #[must_use]
    pub fn style_history(&self, el: ElementId) -> &[ItemStyle] {
        &self.node(el).style_history
    }

    #[must_use]
    pub fn has_class(&self, el: ElementId, class: &str) -> bool {
        self.node(el).classes.contains(class)
    }

    /// True if `el` has been removed from the tree.
    #[must_use]
    pub fn is_removed(&self, el: ElementId) -> bool {
        self.node(el).removed
    }

    /// Children of `el` excluding placeholders.
    #[must_use]
    pub fn content_children(&self, el: ElementId) -> Vec<ElementId> {
        self.node(el)
            .children
            .iter()
            .copied()
            .filter(|child| !self.node(*child).placeholder)
            .collect()
    }

    /// Every live placeholder in the document.
    #[must_use]
    pub fn placeholders(&self) -> Vec<ElementId> {
        (0..self.nodes.len())
            .map(|idx| ElementId(idx as u64))
            .filter(|el| {
                let node = self.node(*el);
                node.placeholder && !node.removed
            })
            .collect()
    }

    /// Consume a pending frame request.
    pub fn take_frame_request(&mut self) -> bool {
        std::mem::take(&mut self.frame_requested)
    }

    #[must_use]
    pub fn frame_requested(&self) -> bool {
        self.frame_requested
    }

    /// Total frame requests received.
    #[must_use]
    pub fn frame_requests(&self) -> usize {
        self.frame_requests
    }

    #[must_use]
    pub fn input_bound(&self) -> bool {
        self.input_bound
    }

    /// `(bind_input, unbind_input)` call counts.
    #[must_use]
    pub fn input_binding_calls(&self) -> (usize, usize) {
        (self.bind_calls, self.unbind_calls)
    }

    #[must_use]
    pub fn document_dragging(&self) -> bool {
        self.document_dragging
    }

    /// Current scroll offset of `target`.
    #[must_use]
    pub fn scroll_offset(&self, target: ScrollTarget) -> Position {
        match target {
            ScrollTarget::Viewport => self.viewport_scroll,
            ScrollTarget::Element(el) => self.node(el).scroll,
        }
    }

    fn clamp_scroll(&self, target: ScrollTarget, offset: Position) -> Position {
        let max = self.scroll_metrics(target).max_offset();
        Position::new(offset.x.clamp(0.0, max.x), offset.y.clamp(0.0, max.y))
    }
}

impl SortHost for SimHost {
    fn parent(&self, el: ElementId) -> Option<ElementId> {
        self.node(el).parent
    }

    fn children(&self, el: ElementId) -> Vec<ElementId> {
        self.node(el).children.clone()
    }

    fn select(&self, container: ElementId, selector: &str) -> Vec<ElementId> {
        let class = selector.trim_start_matches('.');
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self.node(container).children.iter().rev().copied().collect();
        while let Some(el) = stack.pop() {
            if self.node(el).classes.contains(class) {
                out.push(el);
            }
            stack.extend(self.node(el).children.iter().rev().copied());
        }
        out
    }

    fn element_key(&self, el: ElementId) -> Option<String> {
        self.node(el).key.clone()
    }

    fn is_placeholder(&self, el: ElementId) -> bool {
        self.node(el).placeholder
    }

    fn insert_before(&mut self, parent: ElementId, el: ElementId, reference: Option<ElementId>) {
        self.detach(el);
        self.node_mut(el).parent = Some(parent);
        let children = &mut self.nodes[parent.0 as usize].children;
        let at = reference
            .and_then(|r| children.iter().position(|child| *child == r))
            .unwrap_or(children.len());
        children.insert(at, el);
    }

    fn create_placeholder(&mut self, after: ElementId, size: Size, margins: Margins) -> ElementId {
        let parent = self.node(after).parent.unwrap_or(ElementId(0));
        let id = ElementId(self.nodes.len() as u64);
        let mut node = Node::from_spec(
            Some(parent),
            ElementSpec::new(size.width, size.height).margins(margins),
        );
        node.placeholder = true;
        self.nodes.push(node);
        let children = &mut self.nodes[parent.0 as usize].children;
        let at = children
            .iter()
            .position(|child| *child == after)
            .map_or(children.len(), |idx| idx + 1);
        children.insert(at, id);
        id
    }

    fn remove(&mut self, el: ElementId) {
        self.detach(el);
        self.node_mut(el).removed = true;
    }

    fn bounding_rect(&self, el: ElementId) -> Bounds {
        let node = self.node(el);
        match node.style {
            ItemStyle::Pinned { position, size } => Bounds::from_origin_size(position, size),
            ItemStyle::Translated(delta) => {
                let origin = self.document_origin(el) - self.scroll_shift(el) + delta;
                Bounds::from_origin_size(origin, node.size)
            }
            ItemStyle::Cleared => {
                let origin = self.document_origin(el) - self.scroll_shift(el);
                Bounds::from_origin_size(origin, node.size)
            }
        }
    }

    fn margins(&self, el: ElementId) -> Margins {
        self.node(el).margins
    }

    fn overflow(&self, el: ElementId) -> ScrollAxes {
        self.node(el).overflow
    }

    fn scroll_metrics(&self, target: ScrollTarget) -> ScrollMetrics {
        match target {
            ScrollTarget::Viewport => ScrollMetrics {
                offset: self.viewport_scroll,
                scroll_size: Size::new(
                    self.document_size.width.max(self.viewport.width),
                    self.document_size.height.max(self.viewport.height),
                ),
                client_size: self.viewport,
            },
            ScrollTarget::Element(el) => {
                let node = self.node(el);
                let content = self.content_extent(el);
                ScrollMetrics {
                    offset: node.scroll,
                    scroll_size: Size::new(
                        content.width.max(node.size.width),
                        content.height.max(node.size.height),
                    ),
                    client_size: node.size,
                }
            }
        }
    }

    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn set_scroll_offset(&mut self, target: ScrollTarget, offset: Position) {
        let clamped = self.clamp_scroll(target, offset);
        match target {
            ScrollTarget::Viewport => self.viewport_scroll = clamped,
            ScrollTarget::Element(el) => self.node_mut(el).scroll = clamped,
        }
    }

    fn apply_style(&mut self, el: ElementId, style: ItemStyle) {
        let node = self.node_mut(el);
        node.style = style;
        node.style_history.push(style);
    }

    fn add_class(&mut self, el: ElementId, class: &str) {
        self.node_mut(el).classes.insert(class.to_owned());
    }

    fn remove_class(&mut self, el: ElementId, class: &str) {
        self.node_mut(el).classes.remove(class);
    }

    fn set_document_dragging(&mut self, dragging: bool) {
        self.document_dragging = dragging;
    }

    fn request_frame(&mut self) {
        self.frame_requested = true;
        self.frame_requests += 1;
    }

    fn bind_input(&mut self) {
        self.input_bound = true;
        self.bind_calls += 1;
    }

    fn unbind_input(&mut self) {
        self.input_bound = false;
        self.unbind_calls += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(host: &mut SimHost, widths: &[f64]) -> (ElementId, Vec<ElementId>) {
        let root = host.root();
        let list = host.append(root, ElementSpec::new(500.0, 50.0).flow(Axis::X));
        let items = widths
            .iter()
            .map(|w| host.append(list, ElementSpec::new(*w, 50.0).class("item")))
            .collect();
        (list, items)
    }

    #[test]
    fn flow_layout_places_margin_boxes_back_to_back() {
        let mut host = SimHost::new(Size::new(800.0, 600.0));
        let root = host.root();
        let list = host.append(root, ElementSpec::new(500.0, 50.0).flow(Axis::X));
        let a = host.append(
            list,
            ElementSpec::new(100.0, 50.0).margins(Margins::new(0.0, 5.0, 0.0, 5.0)),
        );
        let b = host.append(list, ElementSpec::new(80.0, 50.0));
        assert_eq!(host.bounding_rect(a), Bounds::new(5.0, 0.0, 100.0, 50.0));
        assert_eq!(host.bounding_rect(b), Bounds::new(110.0, 0.0, 80.0, 50.0));
    }

    #[test]
    fn pinned_elements_leave_the_flow() {
        let mut host = SimHost::new(Size::new(800.0, 600.0));
        let (_, items) = row(&mut host, &[100.0, 100.0, 100.0]);
        host.apply_style(
            items[0],
            ItemStyle::Pinned {
                position: Position::new(300.0, 300.0),
                size: Size::new(100.0, 50.0),
            },
        );
        assert_eq!(host.bounding_rect(items[1]).left, 0.0);
        assert_eq!(host.bounding_rect(items[0]).top, 300.0);
    }

    #[test]
    fn ancestor_scroll_shifts_descendants() {
        let mut host = SimHost::new(Size::new(800.0, 600.0));
        let root = host.root();
        let scroller = host.append(root, ElementSpec::new(200.0, 100.0).overflow(ScrollAxes::Y));
        let _ = host.append(scroller, ElementSpec::new(200.0, 300.0));
        let inner = host.append(scroller, ElementSpec::new(200.0, 50.0));
        host.set_scroll_offset(ScrollTarget::Element(scroller), Position::new(0.0, 40.0));
        assert_eq!(host.bounding_rect(inner).top, 260.0);
        assert_eq!(host.bounding_rect(scroller).top, 0.0);
    }

    #[test]
    fn scroll_offsets_clamp_to_content() {
        let mut host = SimHost::new(Size::new(800.0, 600.0));
        let root = host.root();
        let scroller = host.append(root, ElementSpec::new(200.0, 100.0).overflow(ScrollAxes::Y));
        let _ = host.append(scroller, ElementSpec::new(200.0, 250.0));
        host.set_scroll_offset(ScrollTarget::Element(scroller), Position::new(0.0, 1000.0));
        assert_eq!(
            host.scroll_offset(ScrollTarget::Element(scroller)),
            Position::new(0.0, 150.0)
        );
    }

    #[test]
    fn select_walks_descendants_in_document_order() {
        let mut host = SimHost::new(Size::new(800.0, 600.0));
        let (list, items) = row(&mut host, &[10.0, 20.0]);
        let nested = host.append(items[0], ElementSpec::new(5.0, 5.0).class("item"));
        assert_eq!(host.select(list, ".item"), vec![items[0], nested, items[1]]);
    }

    #[test]
    fn placeholder_inserted_after_reference() {
        let mut host = SimHost::new(Size::new(800.0, 600.0));
        let (list, items) = row(&mut host, &[100.0, 100.0]);
        let ph = host.create_placeholder(items[0], Size::new(100.0, 50.0), Margins::default());
        assert_eq!(host.children(list), vec![items[0], ph, items[1]]);
        assert_eq!(host.content_children(list), items);
        host.remove(ph);
        assert!(host.placeholders().is_empty());
    }
}
