//! The find bar injected into the page

use crate::dom::query::{
    ensure_style, FIND_UI_CONTAINER_ID, FIND_UI_DONE_BUTTON_ID, FIND_UI_INPUT_ID,
    FIND_UI_NEXT_BUTTON_ID, FIND_UI_PREVIOUS_BUTTON_ID, FIND_UI_STATUS_ID, FIND_UI_STYLE_ID,
};
use crate::dom::{Document, InputSelection, NodeId, Rect};

use super::FindStatus;

const FIND_UI_CSS: &str = "#shelix-find {\n    position: fixed;\n    top: 12px;\n    right: 12px;\n    z-index: 2147483647;\n    display: flex;\n    gap: 6px;\n    align-items: center;\n}\n#shelix-find[hidden] {\n    display: none !important;\n}\n#shelix-find-status[data-state=\"error\"] {\n    color: #d70022;\n}\n::highlight(shelix-find-match) {\n    background: Mark;\n    color: MarkText;\n}\n::highlight(shelix-find-active) {\n    background: Highlight;\n    color: HighlightText;\n}\nmark.shelix-find-wrapper-active {\n    background: Highlight;\n    color: HighlightText;\n}\n";

const BAR_WIDTH: f64 = 360.0;
const BAR_HEIGHT: f64 = 36.0;

/// Handles to the bar's parts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FindBar {
    pub container: NodeId,
    pub input: NodeId,
    pub status: NodeId,
    pub previous: NodeId,
    pub next: NodeId,
    pub done: NodeId,
}

/// Which bar button a click landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindBarButton {
    Previous,
    Next,
    Done,
}

impl FindBar {
    /// Look up an existing bar; `None` if it was never created or was
    /// partially removed by the page
    pub fn get(doc: &Document) -> Option<Self> {
        let container = doc.get_element_by_id(FIND_UI_CONTAINER_ID)?;
        Some(Self {
            container,
            input: doc.get_element_by_id(FIND_UI_INPUT_ID)?,
            status: doc.get_element_by_id(FIND_UI_STATUS_ID)?,
            previous: doc.get_element_by_id(FIND_UI_PREVIOUS_BUTTON_ID)?,
            next: doc.get_element_by_id(FIND_UI_NEXT_BUTTON_ID)?,
            done: doc.get_element_by_id(FIND_UI_DONE_BUTTON_ID)?,
        })
    }

    /// Existing bar, or a freshly built hidden one
    pub fn get_or_create(doc: &mut Document) -> Self {
        if let Some(bar) = Self::get(doc) {
            return bar;
        }
        if let Some(stale) = doc.get_element_by_id(FIND_UI_CONTAINER_ID) {
            doc.remove(stale);
        }
        ensure_style(doc, FIND_UI_STYLE_ID, FIND_UI_CSS);

        let viewport = doc.viewport;
        let container = doc.create_element("div");
        doc.set_attr(container, "id", FIND_UI_CONTAINER_ID);
        if doc.capabilities.popover {
            doc.set_attr(container, "popover", "manual");
        }
        doc.set_hidden(container, true);
        doc.set_rect(
            container,
            Rect::new(viewport.width - BAR_WIDTH - 12.0, 12.0, BAR_WIDTH, BAR_HEIGHT),
        );

        let input = doc.create_element("input");
        doc.set_attr(input, "id", FIND_UI_INPUT_ID);
        doc.set_attr(input, "type", "search");
        doc.set_attr(input, "placeholder", "Find in page");
        doc.set_attr(input, "autocomplete", "off");
        doc.set_attr(input, "spellcheck", "false");
        doc.set_attr(input, "aria-label", "Find in page");
        doc.set_attr(input, "value", "");

        let status = doc.create_element("span");
        doc.set_attr(status, "id", FIND_UI_STATUS_ID);
        doc.set_attr(status, "aria-live", "polite");

        let previous = Self::button(doc, FIND_UI_PREVIOUS_BUTTON_ID, "‹", "Previous match");
        doc.set_attr(previous, "title", "Previous match (Shift+Enter)");
        let next = Self::button(doc, FIND_UI_NEXT_BUTTON_ID, "›", "Next match");
        doc.set_attr(next, "title", "Next match (Enter)");
        let done = Self::button(doc, FIND_UI_DONE_BUTTON_ID, "Done", "Close find bar");

        for child in [input, status, previous, next, done] {
            doc.set_rect(child, Rect::new(viewport.width - BAR_WIDTH, 16.0, 60.0, 28.0));
            doc.append_child(container, child);
        }
        let root = doc.document_element();
        doc.append_child(root, container);

        log::debug!("Created find bar");
        Self {
            container,
            input,
            status,
            previous,
            next,
            done,
        }
    }

    fn button(doc: &mut Document, id: &str, text: &str, label: &str) -> NodeId {
        let button = doc.create_element("button");
        doc.set_attr(button, "id", id);
        doc.set_attr(button, "type", "button");
        doc.set_attr(button, "aria-label", label);
        doc.set_text_content(button, text);
        button
    }

    pub fn is_open(&self, doc: &Document) -> bool {
        doc.is_connected(self.container) && !doc.is_hidden(self.container)
    }

    pub fn show(&self, doc: &mut Document) {
        doc.set_hidden(self.container, false);
    }

    pub fn hide(&self, doc: &mut Document) {
        doc.set_hidden(self.container, true);
    }

    pub fn value(&self, doc: &Document) -> String {
        doc.attr(self.input, "value").unwrap_or_default().to_string()
    }

    pub fn set_value(&self, doc: &mut Document, value: &str) {
        doc.set_attr(self.input, "value", value);
    }

    /// Caret and selection of the input, to be put back after a search
    pub fn selection_snapshot(&self, doc: &Document) -> Option<InputSelection> {
        doc.selection(self.input)
    }

    /// Refocus the input if something else took focus and reapply a
    /// snapshot, clamped to the current value. No-op while hidden.
    pub fn restore_input_focus(&self, doc: &mut Document, snapshot: Option<InputSelection>) {
        if !self.is_open(doc) {
            return;
        }
        if doc.active_element() != Some(self.input) {
            doc.focus(self.input);
        }
        if let Some(sel) = snapshot {
            doc.set_selection_range(self.input, sel.start, sel.end, sel.direction);
        }
    }

    pub fn button_at(&self, doc: &Document, target: NodeId) -> Option<FindBarButton> {
        let hit = |button: NodeId| doc.closest(target, |_, n| n == button).is_some();
        if hit(self.previous) {
            Some(FindBarButton::Previous)
        } else if hit(self.next) {
            Some(FindBarButton::Next)
        } else if hit(self.done) {
            Some(FindBarButton::Done)
        } else {
            None
        }
    }

    /// Status text, `data-state` and the prev/next enablement
    pub fn render_status(&self, doc: &mut Document, status: &FindStatus) {
        doc.set_text_content(self.status, &status.label());
        doc.set_attr(self.status, "data-state", status.state());
        for button in [self.previous, self.next] {
            if status.has_matches() {
                doc.remove_attr(button, "disabled");
            } else {
                doc.set_attr(button, "disabled", "");
            }
        }
    }
}
