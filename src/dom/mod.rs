//! In-memory page model
//!
//! The engine never talks to a real browser directly. The host shim mirrors the
//! page into this arena (elements, text, geometry, focus, scroll position) and
//! forwards events; the engine reads it and writes its own UI back into it.

pub mod query;

use std::collections::HashMap;

/// Handle to a node in a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Axis-aligned rectangle. Element rects are stored in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// True when the rect has no area
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    fn offset_y(&self, dy: f64) -> Self {
        Self { y: self.y + dy, ..*self }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    #[default]
    Block,
    Inline,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
    Collapse,
}

/// Element style. `visibility: None` inherits from the parent like CSS does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub display: Display,
    pub visibility: Option<Visibility>,
}

/// Resolved style of an element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComputedStyle {
    pub display: Display,
    pub visibility: Visibility,
}

impl ComputedStyle {
    /// `display: none` or a non-visible visibility
    pub fn is_hidden(&self) -> bool {
        self.display == Display::None || self.visibility != Visibility::Visible
    }
}

/// Runtime features the host page supports, probed once by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// CSS custom highlight registry (`CSS.highlights`)
    pub custom_highlights: bool,
    /// `scrollend` completion signal for smooth scrolling
    pub scroll_end: bool,
    /// Popover top-layer API
    pub popover: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            custom_highlights: true,
            scroll_end: true,
            popover: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// A span inside a single text node, in byte offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRange {
    pub node: NodeId,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionDirection {
    Forward,
    Backward,
    #[default]
    None,
}

/// Caret or selection inside a text input, in character offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputSelection {
    pub start: usize,
    pub end: usize,
    pub direction: SelectionDirection,
}

/// Observable side effects the engine performed on the page
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Click(NodeId),
    HistoryBack,
    HistoryForward,
    Scroll { top: f64, smooth: bool },
}

#[derive(Debug, Clone)]
pub struct Element {
    pub tag: String,
    attrs: HashMap<String, String>,
    pub rect: Rect,
    pub style: Style,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: HashMap::new(),
            rect: Rect::default(),
            style: Style::default(),
        }
    }
}

#[derive(Debug, Clone)]
enum NodeKind {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
}

/// The page: node arena plus window-level state
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    head: NodeId,
    body: NodeId,
    active_element: Option<NodeId>,
    pub viewport: Viewport,
    scroll_y: f64,
    scroll_height: f64,
    pub capabilities: Capabilities,
    pub prefers_reduced_motion: bool,
    /// Average glyph advance used for text measurement
    pub char_width: f64,
    highlights: HashMap<String, Vec<TextRange>>,
    selections: HashMap<NodeId, InputSelection>,
    effects: Vec<Effect>,
}

impl Document {
    /// Create an empty `<html><head/><body/></html>` page
    pub fn new(viewport_width: f64, viewport_height: f64) -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            head: NodeId(0),
            body: NodeId(0),
            active_element: None,
            viewport: Viewport {
                width: viewport_width,
                height: viewport_height,
            },
            scroll_y: 0.0,
            scroll_height: viewport_height,
            capabilities: Capabilities::default(),
            prefers_reduced_motion: false,
            char_width: 7.0,
            highlights: HashMap::new(),
            selections: HashMap::new(),
            effects: Vec::new(),
        };
        doc.root = doc.create_element("html");
        doc.head = doc.create_element("head");
        doc.body = doc.create_element("body");
        doc.append_child(doc.root, doc.head);
        doc.append_child(doc.root, doc.body);
        let full = Rect::new(0.0, 0.0, viewport_width, viewport_height);
        doc.set_rect(doc.root, full);
        doc.set_rect(doc.body, full);
        doc
    }

    pub fn document_element(&self) -> NodeId {
        self.root
    }

    pub fn head(&self) -> NodeId {
        self.head
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    // ---- tree construction ----

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeKind::Element(Element::new(tag)))
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::Text(text.to_string()))
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            children: Vec::new(),
            kind,
        });
        id
    }

    /// Append `child` as the last child of `parent`, detaching it first
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.remove(child);
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Insert `child` before `reference` (or append when `reference` is not a child)
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: NodeId) {
        self.remove(child);
        let children = &mut self.nodes[parent.0].children;
        let index = children
            .iter()
            .position(|&c| c == reference)
            .unwrap_or(children.len());
        children.insert(index, child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Detach a node (and its subtree) from its parent
    pub fn remove(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != node);
        }
    }

    /// Remove every child of `node`
    pub fn clear_children(&mut self, node: NodeId) {
        let children = std::mem::take(&mut self.nodes[node.0].children);
        for child in children {
            self.nodes[child.0].parent = None;
        }
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0).and_then(|n| n.parent)
    }

    /// Nearest ancestor that is an element
    pub fn parent_element(&self, node: NodeId) -> Option<NodeId> {
        self.parent(node).filter(|&p| self.is_element(p))
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    /// Whether the node is attached to the document root
    pub fn is_connected(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == self.root {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Pre-order walk of the subtree rooted at `root`, excluding `root`
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(root).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    /// All connected elements in document order
    pub fn elements(&self) -> Vec<NodeId> {
        let mut out = vec![self.root];
        out.extend(
            self.descendants(self.root)
                .into_iter()
                .filter(|&id| self.is_element(id)),
        );
        out
    }

    /// Closest inclusive ancestor element satisfying `pred`
    pub fn closest<F>(&self, node: NodeId, pred: F) -> Option<NodeId>
    where
        F: Fn(&Document, NodeId) -> bool,
    {
        let mut current = if self.is_element(node) {
            Some(node)
        } else {
            self.parent_element(node)
        };
        while let Some(id) = current {
            if pred(self, id) {
                return Some(id);
            }
            current = self.parent_element(id);
        }
        None
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.elements()
            .into_iter()
            .find(|&node| self.attr(node, "id") == Some(id))
    }

    // ---- node accessors ----

    pub fn is_element(&self, node: NodeId) -> bool {
        matches!(
            self.nodes.get(node.0).map(|n| &n.kind),
            Some(NodeKind::Element(_))
        )
    }

    pub fn is_text(&self, node: NodeId) -> bool {
        matches!(
            self.nodes.get(node.0).map(|n| &n.kind),
            Some(NodeKind::Text(_))
        )
    }

    pub fn element(&self, node: NodeId) -> Option<&Element> {
        match self.nodes.get(node.0).map(|n| &n.kind) {
            Some(NodeKind::Element(e)) => Some(e),
            _ => None,
        }
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        match self.nodes.get_mut(node.0).map(|n| &mut n.kind) {
            Some(NodeKind::Element(e)) => Some(e),
            _ => None,
        }
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|e| e.tag.as_str())
    }

    pub fn text(&self, node: NodeId) -> Option<&str> {
        match self.nodes.get(node.0).map(|n| &n.kind) {
            Some(NodeKind::Text(t)) => Some(t.as_str()),
            _ => None,
        }
    }

    pub fn set_text(&mut self, node: NodeId, value: &str) {
        if let Some(Node {
            kind: NodeKind::Text(t),
            ..
        }) = self.nodes.get_mut(node.0)
        {
            *t = value.to_string();
        }
    }

    /// Concatenated text of the subtree (`textContent`)
    pub fn text_content(&self, node: NodeId) -> String {
        if let Some(text) = self.text(node) {
            return text.to_string();
        }
        self.descendants(node)
            .into_iter()
            .filter_map(|id| self.text(id))
            .collect()
    }

    /// Replace the children of `node` with a single text node
    pub fn set_text_content(&mut self, node: NodeId, value: &str) {
        self.clear_children(node);
        if !value.is_empty() {
            let text = self.create_text(value);
            self.append_child(node, text);
        }
    }

    // ---- attributes ----

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)
            .and_then(|e| e.attrs.get(name))
            .map(String::as_str)
    }

    pub fn has_attr(&self, node: NodeId, name: &str) -> bool {
        self.attr(node, name).is_some()
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(e) = self.element_mut(node) {
            e.attrs.insert(name.to_string(), value.to_string());
        }
    }

    pub fn remove_attr(&mut self, node: NodeId, name: &str) {
        if let Some(e) = self.element_mut(node) {
            e.attrs.remove(name);
        }
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.attr(node, "class")
            .map(|c| c.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if self.has_class(node, class) {
            return;
        }
        let value = match self.attr(node, "class") {
            Some(existing) if !existing.trim().is_empty() => format!("{} {}", existing.trim(), class),
            _ => class.to_string(),
        };
        self.set_attr(node, "class", &value);
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        let Some(existing) = self.attr(node, "class") else {
            return;
        };
        let value: Vec<&str> = existing.split_whitespace().filter(|c| *c != class).collect();
        let value = value.join(" ");
        self.set_attr(node, "class", &value);
    }

    pub fn is_hidden(&self, node: NodeId) -> bool {
        self.has_attr(node, "hidden")
    }

    pub fn set_hidden(&mut self, node: NodeId, hidden: bool) {
        if hidden {
            self.set_attr(node, "hidden", "");
        } else {
            self.remove_attr(node, "hidden");
        }
    }

    // ---- geometry and style ----

    pub fn set_rect(&mut self, node: NodeId, rect: Rect) {
        if let Some(e) = self.element_mut(node) {
            e.rect = rect;
        }
    }

    pub fn set_style(&mut self, node: NodeId, style: Style) {
        if let Some(e) = self.element_mut(node) {
            e.style = style;
        }
    }

    /// Resolved style, with `visibility` inherited from ancestors
    pub fn computed_style(&self, node: NodeId) -> ComputedStyle {
        let display = self
            .element(node)
            .map(|e| e.style.display)
            .unwrap_or_default();
        let mut visibility = Visibility::Visible;
        let mut current = Some(node);
        while let Some(id) = current {
            if let Some(v) = self.element(id).and_then(|e| e.style.visibility) {
                visibility = v;
                break;
            }
            current = self.parent_element(id);
        }
        ComputedStyle {
            display,
            visibility,
        }
    }

    /// Viewport-relative rect; empty when not rendered
    pub fn bounding_client_rect(&self, node: NodeId) -> Rect {
        if !self.is_connected(node) {
            return Rect::default();
        }
        let mut current = Some(node);
        while let Some(id) = current {
            if self.element(id).map(|e| e.style.display) == Some(Display::None) {
                return Rect::default();
            }
            current = self.parent_element(id);
        }
        self.element(node)
            .map(|e| e.rect.offset_y(-self.scroll_y))
            .unwrap_or_default()
    }

    /// Rendered width of `text` using the page's average glyph metric
    pub fn measure_text(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.char_width
    }

    // ---- focus ----

    pub fn active_element(&self) -> Option<NodeId> {
        self.active_element
            .filter(|&id| self.is_connected(id))
            .or(Some(self.body))
    }

    pub fn focus(&mut self, node: NodeId) {
        if self.is_connected(node) {
            self.active_element = Some(node);
        }
    }

    pub fn blur(&mut self, node: NodeId) {
        if self.active_element == Some(node) {
            self.active_element = None;
        }
    }

    // ---- input selection ----

    /// Selection inside an input, clamped to its current value. A caret at
    /// the end when none was recorded.
    pub fn selection(&self, input: NodeId) -> Option<InputSelection> {
        self.element(input)?;
        let len = self.input_value_len(input);
        Some(match self.selections.get(&input) {
            Some(sel) => InputSelection {
                start: sel.start.min(len),
                end: sel.end.min(len),
                direction: sel.direction,
            },
            None => InputSelection {
                start: len,
                end: len,
                direction: SelectionDirection::None,
            },
        })
    }

    /// `setSelectionRange`. Offsets past the value are clamped on read, so
    /// the host may mirror the caret before the new value.
    pub fn set_selection_range(
        &mut self,
        input: NodeId,
        start: usize,
        end: usize,
        direction: SelectionDirection,
    ) {
        if self.element(input).is_none() {
            return;
        }
        let start = start.min(end);
        self.selections.insert(
            input,
            InputSelection {
                start,
                end,
                direction,
            },
        );
    }

    /// `select()`: the whole value
    pub fn select_all(&mut self, input: NodeId) {
        let len = self.input_value_len(input);
        self.set_selection_range(input, 0, len, SelectionDirection::None);
    }

    fn input_value_len(&self, input: NodeId) -> usize {
        self.attr(input, "value").map_or(0, |v| v.chars().count())
    }

    // ---- scrolling ----

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn scroll_height(&self) -> f64 {
        self.scroll_height
    }

    pub fn set_scroll_height(&mut self, height: f64) {
        self.scroll_height = height.max(self.viewport.height);
        self.scroll_y = self.scroll_y.min(self.max_scroll_y());
    }

    pub fn max_scroll_y(&self) -> f64 {
        (self.scroll_height - self.viewport.height).max(0.0)
    }

    /// `window.scrollTo`, clamped to the scrollable range
    pub fn scroll_to(&mut self, top: f64, smooth: bool) {
        self.scroll_y = top.clamp(0.0, self.max_scroll_y());
        self.effects.push(Effect::Scroll {
            top: self.scroll_y,
            smooth,
        });
    }

    /// `window.scrollBy`
    pub fn scroll_by(&mut self, dy: f64, smooth: bool) {
        self.scroll_to(self.scroll_y + dy, smooth);
    }

    /// `scrollIntoView({ block: "center" })`
    pub fn scroll_into_view_centered(&mut self, node: NodeId) {
        let Some(rect) = self.element(node).map(|e| e.rect) else {
            return;
        };
        let top = rect.top() - (self.viewport.height - rect.height) / 2.0;
        self.scroll_to(top, false);
    }

    // ---- text splitting (wrapper highlights) ----

    /// `Text.splitText`: keeps `[..offset]` in `node`, returns the new sibling
    /// holding the rest
    pub fn split_text(&mut self, node: NodeId, offset: usize) -> Option<NodeId> {
        let text = self.text(node)?.to_string();
        if offset > text.len() || !text.is_char_boundary(offset) {
            return None;
        }
        let (head, tail) = text.split_at(offset);
        let head = head.to_string();
        let tail = self.create_text(tail);
        self.set_text(node, &head);
        if let Some(parent) = self.parent(node) {
            let index = self.children(parent).iter().position(|&c| c == node);
            if let Some(index) = index {
                self.nodes[parent.0].children.insert(index + 1, tail);
                self.nodes[tail.0].parent = Some(parent);
            }
        }
        Some(tail)
    }

    /// Merge adjacent text nodes and drop empty ones under `node`
    pub fn normalize(&mut self, node: NodeId) {
        let children = self.children(node).to_vec();
        let mut previous_text: Option<NodeId> = None;
        for child in children {
            match self.text(child).map(str::to_string) {
                Some(text) if text.is_empty() => self.remove(child),
                Some(text) => {
                    if let Some(prev) = previous_text {
                        let merged = format!("{}{}", self.text(prev).unwrap_or_default(), text);
                        self.set_text(prev, &merged);
                        self.remove(child);
                    } else {
                        previous_text = Some(child);
                    }
                }
                None => previous_text = None,
            }
        }
    }

    // ---- custom highlight registry ----

    pub fn set_highlight(&mut self, name: &str, ranges: Vec<TextRange>) {
        self.highlights.insert(name.to_string(), ranges);
    }

    pub fn highlight(&self, name: &str) -> &[TextRange] {
        self.highlights.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn clear_highlight(&mut self, name: &str) {
        if let Some(ranges) = self.highlights.get_mut(name) {
            ranges.clear();
        }
    }

    // ---- browser effects ----

    pub fn click(&mut self, node: NodeId) {
        self.effects.push(Effect::Click(node));
    }

    pub fn history_back(&mut self) {
        self.effects.push(Effect::HistoryBack);
    }

    pub fn history_forward(&mut self) {
        self.effects.push(Effect::HistoryForward);
    }

    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_detached_subtree_is_not_connected() {
        let mut doc = page();
        let body = doc.body();
        let div = add(&mut doc, body, "div", &[], rect(0.0));
        let span = add(&mut doc, div, "span", &[], rect(0.0));
        assert!(doc.is_connected(span));

        doc.remove(div);
        assert!(!doc.is_connected(span));
        assert!(doc.bounding_client_rect(span).is_empty());
    }

    #[test]
    fn test_visibility_inherits() {
        let mut doc = page();
        let body = doc.body();
        let div = add(&mut doc, body, "div", &[], rect(0.0));
        let span = add(&mut doc, div, "span", &[], rect(0.0));
        doc.set_style(
            div,
            Style {
                display: Display::Block,
                visibility: Some(Visibility::Hidden),
            },
        );
        assert!(doc.computed_style(span).is_hidden());
    }

    #[test]
    fn test_display_none_ancestor_empties_rect() {
        let mut doc = page();
        let body = doc.body();
        let div = add(&mut doc, body, "div", &[], rect(0.0));
        let span = add(&mut doc, div, "span", &[], rect(0.0));
        doc.set_style(
            div,
            Style {
                display: Display::None,
                visibility: None,
            },
        );
        assert!(doc.bounding_client_rect(span).is_empty());
    }

    #[test]
    fn test_client_rect_follows_scroll() {
        let mut doc = page();
        let body = doc.body();
        let div = add(&mut doc, body, "div", &[], rect(900.0));
        doc.scroll_to(500.0, false);
        assert_eq!(doc.bounding_client_rect(div).top(), 400.0);
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut doc = page();
        doc.scroll_by(10_000.0, false);
        assert_eq!(doc.scroll_y(), 2400.0);
        doc.scroll_by(-10_000.0, false);
        assert_eq!(doc.scroll_y(), 0.0);
    }

    #[test]
    fn test_split_and_normalize() {
        let mut doc = page();
        let body = doc.body();
        let p = add(&mut doc, body, "p", &[], rect(0.0));
        let text = add_text(&mut doc, p, "hello world");

        let tail = doc.split_text(text, 5).unwrap();
        assert_eq!(doc.text(text), Some("hello"));
        assert_eq!(doc.text(tail), Some(" world"));
        assert_eq!(doc.children(p).len(), 2);

        doc.normalize(p);
        assert_eq!(doc.children(p).len(), 1);
        assert_eq!(doc.text_content(p), "hello world");
    }

    #[test]
    fn test_class_list() {
        let mut doc = page();
        let body = doc.body();
        let div = add(&mut doc, body, "div", &[("class", "a")], rect(0.0));
        doc.add_class(div, "b");
        doc.add_class(div, "b");
        assert_eq!(doc.attr(div, "class"), Some("a b"));
        doc.remove_class(div, "a");
        assert!(!doc.has_class(div, "a"));
        assert!(doc.has_class(div, "b"));
    }

    #[test]
    fn test_descendants_are_preorder() {
        let mut doc = page();
        let body = doc.body();
        let a = add(&mut doc, body, "div", &[], rect(0.0));
        let a1 = add(&mut doc, a, "span", &[], rect(0.0));
        let b = add(&mut doc, body, "div", &[], rect(0.0));
        let order: Vec<NodeId> = doc
            .descendants(body)
            .into_iter()
            .filter(|&id| doc.is_element(id))
            .collect();
        assert_eq!(order, vec![a, a1, b]);
    }

    #[test]
    fn test_input_selection_clamps_to_value() {
        let mut doc = page();
        let body = doc.body();
        let input = add(&mut doc, body, "input", &[("value", "hello")], rect(0.0));
        assert_eq!(doc.selection(input).map(|s| (s.start, s.end)), Some((5, 5)));

        doc.set_selection_range(input, 1, 3, SelectionDirection::Backward);
        doc.set_attr(input, "value", "he");
        let sel = doc.selection(input).unwrap();
        assert_eq!((sel.start, sel.end), (1, 2));
        assert_eq!(sel.direction, SelectionDirection::Backward);

        doc.select_all(input);
        assert_eq!(doc.selection(input).map(|s| (s.start, s.end)), Some((0, 2)));
    }
}
