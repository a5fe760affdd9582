//! Page queries: editable fields, clickable elements, visible text and the
//! engine's own injected UI (which every scan must skip)

use super::{Document, NodeId};

pub const FIND_UI_CONTAINER_ID: &str = "shelix-find";
pub const FIND_UI_INPUT_ID: &str = "shelix-find-input";
pub const FIND_UI_STATUS_ID: &str = "shelix-find-status";
pub const FIND_UI_PREVIOUS_BUTTON_ID: &str = "shelix-find-previous";
pub const FIND_UI_NEXT_BUTTON_ID: &str = "shelix-find-next";
pub const FIND_UI_DONE_BUTTON_ID: &str = "shelix-find-done";
pub const FIND_UI_STYLE_ID: &str = "shelix-find-style";
pub const FIND_HIGHLIGHT_MATCH_NAME: &str = "shelix-find-match";
pub const FIND_HIGHLIGHT_ACTIVE_NAME: &str = "shelix-find-active";
/// Class of `<mark>` wrappers when custom highlights are unavailable
pub const FIND_WRAPPER_CLASS: &str = "shelix-find-wrapper";
pub const FIND_WRAPPER_ACTIVE_CLASS: &str = "shelix-find-wrapper-active";

pub const KEY_HINT_CONTAINER_ID: &str = "shelix-key-hint";
pub const KEY_HINT_STYLE_ID: &str = "shelix-key-hint-style";

pub const LINK_HINT_OVERLAY_ID: &str = "shelix-link-hints";
pub const LINK_HINT_LABEL_CLASS: &str = "shelix-link-hint-label";
pub const LINK_HINT_ACTIVE_CHAR_CLASS: &str = "shelix-hint-active-char";
pub const LINK_HINT_STYLE_ID: &str = "shelix-link-hint-style";

pub const INPUT_HIGHLIGHT_CLASS: &str = "shelix-input-highlight";
pub const INPUT_HIGHLIGHT_STYLE_ID: &str = "shelix-input-highlight-style";

/// `input` types that accept keyboard editing or selection
const EDITABLE_INPUT_TYPES: &[&str] = &[
    "text",
    "search",
    "email",
    "password",
    "url",
    "tel",
    "number",
    "checkbox",
    "radio",
    "range",
    "date",
    "datetime-local",
    "month",
    "time",
    "week",
    "color",
];

/// Subtrees whose text is never searched
const FIND_EXCLUDED_TAGS: &[&str] = &["script", "style", "noscript", "textarea", "option"];

const CLICKABLE_ROLES: &[&str] = &["button", "link", "tab", "menuitem"];
const CLICKABLE_INPUT_TYPES: &[&str] = &["submit", "button", "reset"];

fn input_type(doc: &Document, node: NodeId) -> String {
    doc.attr(node, "type")
        .map(|t| t.trim().to_ascii_lowercase())
        .unwrap_or_default()
}

/// Whether the element itself matches the editable selector set
pub fn matches_editable_selector(doc: &Document, node: NodeId) -> bool {
    match doc.tag(node) {
        Some("input") => {
            let kind = input_type(doc, node);
            kind.is_empty() || EDITABLE_INPUT_TYPES.contains(&kind.as_str())
        }
        Some("textarea") | Some("select") => true,
        Some(_) => doc
            .attr(node, "contenteditable")
            .map(|v| !v.eq_ignore_ascii_case("false"))
            .unwrap_or(false),
        None => false,
    }
}

fn is_disabled_or_readonly(doc: &Document, node: NodeId) -> bool {
    match doc.tag(node) {
        Some("input") | Some("textarea") => {
            doc.has_attr(node, "disabled") || doc.has_attr(node, "readonly")
        }
        Some("select") => doc.has_attr(node, "disabled"),
        _ => false,
    }
}

fn has_id(doc: &Document, node: NodeId, id: &str) -> bool {
    doc.attr(node, "id") == Some(id)
}

/// Target is the find bar or inside it
pub fn is_inside_find_ui(doc: &Document, target: NodeId) -> bool {
    doc.closest(target, |d, n| has_id(d, n, FIND_UI_CONTAINER_ID))
        .is_some()
}

/// Target belongs to any UI the engine injected into the page
pub fn is_inside_engine_ui(doc: &Document, target: NodeId) -> bool {
    doc.closest(target, |d, n| {
        has_id(d, n, FIND_UI_CONTAINER_ID)
            || has_id(d, n, KEY_HINT_CONTAINER_ID)
            || has_id(d, n, LINK_HINT_OVERLAY_ID)
    })
    .is_some()
}

/// Closest editable ancestor of `target`, excluding the find bar and
/// disabled or read-only controls
pub fn editable_target(doc: &Document, target: NodeId) -> Option<NodeId> {
    if is_inside_find_ui(doc, target) {
        return None;
    }
    let editable = doc.closest(target, matches_editable_selector)?;
    if is_disabled_or_readonly(doc, editable) {
        return None;
    }
    Some(editable)
}

pub fn is_editable_target(doc: &Document, target: Option<NodeId>) -> bool {
    target.and_then(|t| editable_target(doc, t)).is_some()
}

/// Editable field that is rendered and enabled
pub fn is_navigable_field(doc: &Document, field: NodeId) -> bool {
    if !doc.is_element(field) || is_inside_find_ui(doc, field) {
        return false;
    }
    if doc.computed_style(field).is_hidden() || is_disabled_or_readonly(doc, field) {
        return false;
    }
    !doc.bounding_client_rect(field).is_empty()
}

/// Navigable fields in document order
pub fn navigable_fields(doc: &Document) -> Vec<NodeId> {
    doc.elements()
        .into_iter()
        .filter(|&n| matches_editable_selector(doc, n) && is_navigable_field(doc, n))
        .collect()
}

/// Element is rendered, outside engine UI and not hidden by any ancestor
pub fn is_visible_for_find(doc: &Document, element: NodeId) -> bool {
    if !doc.is_element(element) || !doc.is_connected(element) {
        return false;
    }
    if is_inside_engine_ui(doc, element) {
        return false;
    }
    let mut current = Some(element);
    while let Some(id) = current {
        if doc.is_hidden(id) || doc.computed_style(id).is_hidden() {
            return false;
        }
        current = doc.parent_element(id);
    }
    !doc.bounding_client_rect(element).is_empty()
}

/// Non-empty text nodes under the body that a find may match, in document order
pub fn find_text_nodes(doc: &Document) -> Vec<NodeId> {
    doc.descendants(doc.body())
        .into_iter()
        .filter(|&node| {
            let Some(text) = doc.text(node) else {
                return false;
            };
            if text.is_empty() {
                return false;
            }
            let Some(parent) = doc.parent_element(node) else {
                return false;
            };
            let excluded = doc
                .closest(parent, |d, n| {
                    d.tag(n).map(|t| FIND_EXCLUDED_TAGS.contains(&t)).unwrap_or(false)
                })
                .is_some();
            !excluded && is_visible_for_find(doc, parent)
        })
        .collect()
}

/// Whether the element matches the clickable selector set
pub fn is_clickable(doc: &Document, node: NodeId) -> bool {
    let Some(tag) = doc.tag(node) else {
        return false;
    };
    if tag == "a" && doc.has_attr(node, "href") {
        return true;
    }
    if tag == "button" || tag == "summary" {
        return true;
    }
    if tag == "input" && CLICKABLE_INPUT_TYPES.contains(&input_type(doc, node).as_str()) {
        return true;
    }
    if let Some(role) = doc.attr(node, "role") {
        if CLICKABLE_ROLES.contains(&role) {
            return true;
        }
    }
    doc.has_attr(node, "onclick") || doc.has_attr(node, "tabindex")
}

/// Clickable elements that are on screen and eligible for a link hint
pub fn hintable_elements(doc: &Document) -> Vec<NodeId> {
    let viewport = doc.viewport;
    doc.elements()
        .into_iter()
        .filter(|&el| {
            if !is_clickable(doc, el) || !doc.is_connected(el) || is_inside_engine_ui(doc, el) {
                return false;
            }
            if doc.has_attr(el, "disabled") || doc.attr(el, "aria-hidden") == Some("true") {
                return false;
            }
            if doc.computed_style(el).is_hidden() {
                return false;
            }
            let rect = doc.bounding_client_rect(el);
            if rect.is_empty() {
                return false;
            }
            rect.top() < viewport.height
                && rect.bottom() > 0.0
                && rect.left() < viewport.width
                && rect.right() > 0.0
        })
        .collect()
}

/// Inject a `<style>` element once per page
pub fn ensure_style(doc: &mut Document, id: &str, css: &str) {
    if doc.get_element_by_id(id).is_some() {
        return;
    }
    let style = doc.create_element("style");
    doc.set_attr(style, "id", id);
    doc.set_text_content(style, css);
    let head = doc.head();
    doc.append_child(head, style);
}
