//! Key-hint popup: completions of a pending prefix, or the full keymap

use crate::actions::{help_rows, prefix_rows, KeyHintRow, PrefixKey};
use crate::config::EngineConfig;
use crate::dom::query::{ensure_style, KEY_HINT_CONTAINER_ID, KEY_HINT_STYLE_ID};
use crate::dom::{Document, NodeId, Rect};

const KEY_HINT_CSS: &str = "#shelix-key-hint {\n    position: fixed;\n    right: 18px;\n    bottom: 18px;\n    z-index: 2147483647;\n    padding: 12px 14px 10px;\n    border: 1px solid GrayText;\n    background: Canvas;\n    color: CanvasText;\n    font: menu;\n    pointer-events: none;\n}\n#shelix-key-hint[hidden] {\n    display: none !important;\n}\n#shelix-key-hint .shelix-key-hint-rows {\n    display: grid;\n    grid-template-columns: max-content minmax(0, 1fr);\n    column-gap: 12px;\n    row-gap: 4px;\n}\n";

/// Left + right padding and border of the panel
const HORIZONTAL_INSETS: f64 = 14.0 + 14.0 + 1.0 + 1.0;
const COLUMN_GAP: f64 = 12.0;
/// Smallest viewport limit, so tiny windows still get a usable panel
const MIN_VIEWPORT_LIMIT: f64 = 160.0;
const ROW_HEIGHT: f64 = 18.0;
const HELP_TITLE: &str = "Keymap";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyHintMode {
    #[default]
    Hidden,
    Prefix,
    Help,
}

/// Panel width for content of `content_width`, clamped to
/// `[min(min_width, limit), min(max_width, limit)]` where the limit follows
/// the viewport
pub fn popup_width(content_width: f64, viewport_width: f64, config: &EngineConfig) -> f64 {
    let limit = (viewport_width - config.key_hint_viewport_margin).max(MIN_VIEWPORT_LIMIT);
    let min_width = config.key_hint_min_width.min(limit);
    let max_width = config.key_hint_max_width.min(limit);
    let ideal = (content_width + HORIZONTAL_INSETS).ceil();
    ideal.max(min_width).min(max_width)
}

#[derive(Debug, Default)]
pub struct KeyHintPopup {
    mode: KeyHintMode,
}

impl KeyHintPopup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> KeyHintMode {
        self.mode
    }

    fn container(doc: &mut Document) -> NodeId {
        if let Some(container) = doc.get_element_by_id(KEY_HINT_CONTAINER_ID) {
            return container;
        }
        ensure_style(doc, KEY_HINT_STYLE_ID, KEY_HINT_CSS);
        let container = doc.create_element("div");
        doc.set_attr(container, "id", KEY_HINT_CONTAINER_ID);
        doc.set_hidden(container, true);
        let root = doc.document_element();
        doc.append_child(root, container);
        container
    }

    fn render(&mut self, doc: &mut Document, title: &str, rows: &[KeyHintRow], config: &EngineConfig) {
        if rows.is_empty() {
            self.hide(doc);
            return;
        }
        let container = Self::container(doc);
        doc.clear_children(container);

        let title_el = doc.create_element("div");
        doc.set_attr(title_el, "class", "shelix-key-hint-title");
        doc.set_text_content(title_el, title);
        doc.append_child(container, title_el);

        let rows_el = doc.create_element("div");
        doc.set_attr(rows_el, "class", "shelix-key-hint-rows");
        for row in rows {
            let key = doc.create_element("span");
            doc.set_attr(key, "class", "shelix-key-hint-key");
            doc.set_text_content(key, &row.key);
            let label = doc.create_element("span");
            doc.set_attr(label, "class", "shelix-key-hint-label");
            doc.set_text_content(label, &row.label);
            doc.append_child(rows_el, key);
            doc.append_child(rows_el, label);
        }
        doc.append_child(container, rows_el);

        let key_width = rows.iter().map(|r| doc.measure_text(&r.key)).fold(0.0, f64::max);
        let label_width = rows.iter().map(|r| doc.measure_text(&r.label)).fold(0.0, f64::max);
        let content_width = doc.measure_text(title).max(key_width + COLUMN_GAP + label_width);
        let width = popup_width(content_width, doc.viewport.width, config);

        doc.set_attr(container, "style", &format!("width: {}px;", width));
        let height = ROW_HEIGHT * (rows.len() + 1) as f64;
        let viewport = doc.viewport;
        doc.set_rect(
            container,
            Rect::new(
                viewport.width - width - 18.0,
                doc.scroll_y() + viewport.height - height - 18.0,
                width,
                height,
            ),
        );
        doc.set_hidden(container, false);
    }

    /// Completions of `prefix`
    pub fn show_prefix(&mut self, doc: &mut Document, prefix: PrefixKey, config: &EngineConfig) {
        self.render(doc, prefix.title(), &prefix_rows(prefix), config);
        self.mode = KeyHintMode::Prefix;
    }

    /// Full keymap
    pub fn show_help(&mut self, doc: &mut Document, config: &EngineConfig) {
        self.render(doc, HELP_TITLE, &help_rows(), config);
        self.mode = KeyHintMode::Help;
    }

    pub fn hide(&mut self, doc: &mut Document) {
        if let Some(container) = doc.get_element_by_id(KEY_HINT_CONTAINER_ID) {
            doc.set_hidden(container, true);
        }
        self.mode = KeyHintMode::Hidden;
    }

    /// Rendered width in px, if shown
    pub fn width(&self, doc: &Document) -> Option<f64> {
        let container = doc.get_element_by_id(KEY_HINT_CONTAINER_ID)?;
        if doc.is_hidden(container) {
            return None;
        }
        doc.element(container).map(|e| e.rect.width)
    }
}
