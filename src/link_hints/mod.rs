//! Link hints - keyboard activation of clickable elements
//!
//! Badges with short labels are pinned to every on-screen clickable element.
//! Typed characters narrow the visible badges until exactly one label is
//! matched, which activates its element.

pub mod labels;

use crate::dom::query::{
    ensure_style, hintable_elements, LINK_HINT_ACTIVE_CHAR_CLASS, LINK_HINT_LABEL_CLASS,
    LINK_HINT_OVERLAY_ID, LINK_HINT_STYLE_ID,
};
use crate::dom::{Document, NodeId, Rect};

const LINK_HINT_CSS: &str = "#shelix-link-hints {\n    position: fixed;\n    inset: 0;\n    z-index: 2147483647;\n    pointer-events: none;\n}\n.shelix-link-hint-label {\n    position: fixed;\n    padding: 1px 4px;\n    background: #ffd76e;\n    color: #302505;\n    font: 600 11px/1.2 ui-monospace, monospace;\n    text-transform: uppercase;\n}\n.shelix-link-hint-label .shelix-hint-active-char {\n    color: #c2410c;\n}\n.shelix-link-hint-label[data-state=\"partial\"] {\n    background: #fde68a;\n}\n";

/// A labelled target
#[derive(Debug, Clone, PartialEq)]
pub struct Hint {
    pub element: NodeId,
    pub label: String,
    pub badge: NodeId,
}

/// Result of feeding one key to the hint resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintInputResult {
    /// Exactly one label remains; overlay is gone, activate the element
    Activated(NodeId),
    /// Some labels still match; keep waiting
    Narrowed,
    /// Nothing matches; overlay is gone
    Aborted,
}

#[derive(Debug, Default)]
pub struct LinkHintController {
    hints: Vec<Hint>,
    typed: String,
    active: bool,
}

impl LinkHintController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn hints(&self) -> &[Hint] {
        &self.hints
    }

    pub fn typed(&self) -> &str {
        &self.typed
    }

    /// Labels whose badge is currently shown
    pub fn visible_labels(&self, doc: &Document) -> Vec<&str> {
        self.hints
            .iter()
            .filter(|h| !doc.is_hidden(h.badge))
            .map(|h| h.label.as_str())
            .collect()
    }

    /// Label every hintable element. Returns how many hints are shown; zero
    /// leaves hint mode inactive.
    pub fn show(&mut self, doc: &mut Document, alphabet: &[char]) -> usize {
        self.hide(doc);
        let elements = hintable_elements(doc);
        if elements.is_empty() {
            return 0;
        }
        ensure_style(doc, LINK_HINT_STYLE_ID, LINK_HINT_CSS);

        let labels = labels::generate_hints(elements.len(), alphabet);
        let overlay = doc.create_element("div");
        doc.set_attr(overlay, "id", LINK_HINT_OVERLAY_ID);

        for (element, label) in elements.into_iter().zip(labels) {
            let rect = doc.bounding_client_rect(element);
            let badge = doc.create_element("span");
            doc.set_attr(badge, "class", LINK_HINT_LABEL_CLASS);
            doc.set_attr(
                badge,
                "style",
                &format!("left: {}px; top: {}px;", rect.left(), rect.top()),
            );
            doc.set_rect(
                badge,
                Rect::new(rect.left(), rect.top() + doc.scroll_y(), 16.0, 14.0),
            );
            render_label(doc, badge, &label, 0);
            doc.append_child(overlay, badge);
            self.hints.push(Hint {
                element,
                label,
                badge,
            });
        }

        let root = doc.document_element();
        doc.append_child(root, overlay);
        self.active = true;
        log::debug!("Showing {} link hints", self.hints.len());
        self.hints.len()
    }

    /// Feed one typed character
    pub fn handle_char(&mut self, c: char, doc: &mut Document) -> HintInputResult {
        self.typed.extend(c.to_lowercase());
        let typed = self.typed.clone();

        let all: Vec<String> = self.hints.iter().map(|h| h.label.clone()).collect();
        let matching = labels::filter_by_prefix(&all, &typed);

        if matching.is_empty() {
            self.hide(doc);
            return HintInputResult::Aborted;
        }
        if matching.len() == 1 {
            let element = self.hints[matching[0]].element;
            self.hide(doc);
            return HintInputResult::Activated(element);
        }

        self.rerender(doc);
        HintInputResult::Narrowed
    }

    /// Drop the last typed character and show the labels it had hidden
    pub fn backspace(&mut self, doc: &mut Document) {
        if self.typed.pop().is_some() {
            self.rerender(doc);
        }
    }

    fn rerender(&self, doc: &mut Document) {
        let matched = self.typed.chars().count();
        for hint in &self.hints {
            if hint.label.starts_with(&self.typed) {
                doc.set_hidden(hint.badge, false);
                if matched > 0 {
                    doc.set_attr(hint.badge, "data-state", "partial");
                } else {
                    doc.remove_attr(hint.badge, "data-state");
                }
                render_label(doc, hint.badge, &hint.label, matched);
            } else {
                doc.set_hidden(hint.badge, true);
            }
        }
    }

    /// Remove the overlay and leave hint mode
    pub fn hide(&mut self, doc: &mut Document) {
        if let Some(overlay) = doc.get_element_by_id(LINK_HINT_OVERLAY_ID) {
            doc.remove(overlay);
        }
        self.hints.clear();
        self.typed.clear();
        self.active = false;
    }
}

/// Badge content: typed prefix, the next expected character, then the rest
fn render_label(doc: &mut Document, badge: NodeId, label: &str, matched: usize) {
    doc.clear_children(badge);
    let chars: Vec<char> = label.chars().collect();

    if matched > 0 {
        let done = doc.create_element("span");
        let prefix: String = chars[..matched.min(chars.len())].iter().collect();
        doc.set_text_content(done, &prefix);
        doc.append_child(badge, done);
    }

    let active = doc.create_element("span");
    doc.set_attr(active, "class", LINK_HINT_ACTIVE_CHAR_CLASS);
    let next: String = chars.get(matched).map(|c| c.to_string()).unwrap_or_default();
    doc.set_text_content(active, &next);
    doc.append_child(badge, active);

    if matched + 1 < chars.len() {
        let rest: String = chars[matched + 1..].iter().collect();
        let text = doc.create_text(&rest);
        doc.append_child(badge, text);
    }
}
