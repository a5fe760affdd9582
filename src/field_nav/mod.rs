//! Input-field navigation: the highlighted field and h/l cycling

use crate::dom::query::{
    editable_target, ensure_style, is_navigable_field, navigable_fields, INPUT_HIGHLIGHT_CLASS,
    INPUT_HIGHLIGHT_STYLE_ID,
};
use crate::dom::{Document, NodeId};
use crate::state::Mode;

const INPUT_HIGHLIGHT_CSS: &str = ".shelix-input-highlight {\n    outline: none !important;\n    border-color: #ff7a00 !important;\n    box-shadow: inset 0 0 0 1px #ff7a00, 0 0 0 1px rgba(255, 122, 0, 0.2) !important;\n}\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleDirection {
    Previous,
    Next,
}

#[derive(Debug, Default)]
pub struct FieldNavigator {
    highlighted: Option<NodeId>,
}

impl FieldNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw highlighted reference, which may be stale
    pub fn highlighted(&self) -> Option<NodeId> {
        self.highlighted
    }

    /// Outline the highlighted field only while in normal mode
    pub fn sync_highlight(&self, doc: &mut Document, mode: Mode) {
        let Some(field) = self.highlighted else {
            return;
        };
        if !doc.is_connected(field) {
            return;
        }
        if mode == Mode::Normal {
            doc.add_class(field, INPUT_HIGHLIGHT_CLASS);
        } else {
            doc.remove_class(field, INPUT_HIGHLIGHT_CLASS);
        }
    }

    pub fn set_highlighted(&mut self, doc: &mut Document, field: Option<NodeId>, mode: Mode) {
        if let Some(previous) = self.highlighted {
            if doc.is_connected(previous) {
                doc.remove_class(previous, INPUT_HIGHLIGHT_CLASS);
            }
        }
        self.highlighted = field;
        if field.is_some() {
            ensure_style(doc, INPUT_HIGHLIGHT_STYLE_ID, INPUT_HIGHLIGHT_CSS);
            self.sync_highlight(doc, mode);
        }
    }

    /// Highlighted field if it is still live and navigable (and among
    /// `fields` when given); otherwise resets to none
    pub fn current(
        &mut self,
        doc: &mut Document,
        fields: Option<&[NodeId]>,
        mode: Mode,
    ) -> Option<NodeId> {
        let field = self.highlighted?;
        let live = doc.is_connected(field) && is_navigable_field(doc, field);
        let listed = fields.map(|f| f.contains(&field)).unwrap_or(true);
        if !live || !listed {
            self.set_highlighted(doc, None, mode);
            return None;
        }
        Some(field)
    }

    /// Highlighted field, else the focused editable field, else the first one
    pub fn ensure_highlighted(&mut self, doc: &mut Document, mode: Mode) -> Option<NodeId> {
        let fields = navigable_fields(doc);
        if fields.is_empty() {
            self.set_highlighted(doc, None, mode);
            return None;
        }
        if let Some(existing) = self.current(doc, Some(&fields), mode) {
            return Some(existing);
        }
        let active = doc
            .active_element()
            .and_then(|el| editable_target(doc, el))
            .filter(|el| fields.contains(el));
        let field = active.unwrap_or(fields[0]);
        self.set_highlighted(doc, Some(field), mode);
        Some(field)
    }

    /// Highlighted field, else the first navigable field
    pub fn highlighted_or_first(&mut self, doc: &mut Document, mode: Mode) -> Option<NodeId> {
        let fields = navigable_fields(doc);
        self.current(doc, Some(&fields), mode)
            .or_else(|| fields.first().copied())
    }

    /// Move the highlight through the navigable fields, wrapping at the ends
    pub fn cycle(&mut self, direction: CycleDirection, doc: &mut Document, mode: Mode) {
        let fields = navigable_fields(doc);
        if fields.is_empty() {
            self.set_highlighted(doc, None, mode);
            return;
        }
        let len = fields.len();
        let current = self
            .current(doc, Some(&fields), mode)
            .and_then(|f| fields.iter().position(|&x| x == f));
        let next = match (current, direction) {
            (None, CycleDirection::Next) => 0,
            (None, CycleDirection::Previous) => len - 1,
            (Some(i), CycleDirection::Next) => (i + 1) % len,
            (Some(i), CycleDirection::Previous) => (i + len - 1) % len,
        };
        let field = fields[next];
        self.set_highlighted(doc, Some(field), mode);
        doc.scroll_into_view_centered(field);
    }
}
