//! Match rendering strategies
//!
//! Pages with a custom highlight registry get non-destructive named range
//! highlights. Everything else falls back to wrapping each match in a
//! `<mark>`, which splits text nodes and is undone on clear.

use crate::dom::query::{
    FIND_HIGHLIGHT_ACTIVE_NAME, FIND_HIGHLIGHT_MATCH_NAME, FIND_WRAPPER_ACTIVE_CLASS,
    FIND_WRAPPER_CLASS,
};
use crate::dom::{Capabilities, Document, NodeId, TextRange};

/// One located occurrence of the query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Match {
    Range(TextRange),
    Wrapper(NodeId),
}

impl Match {
    /// Anchor still attached and, for ranges, still in bounds
    pub fn is_live(&self, doc: &Document) -> bool {
        match *self {
            Match::Range(range) => {
                doc.is_connected(range.node)
                    && doc
                        .text(range.node)
                        .map(|t| range.end <= t.len() && t.is_char_boundary(range.start) && t.is_char_boundary(range.end))
                        .unwrap_or(false)
            }
            Match::Wrapper(mark) => doc.is_connected(mark),
        }
    }

    /// Element to scroll into view
    pub fn container(&self, doc: &Document) -> Option<NodeId> {
        match *self {
            Match::Range(range) => doc.parent_element(range.node),
            Match::Wrapper(mark) => Some(mark),
        }
    }
}

pub trait HighlightStrategy {
    fn name(&self) -> &'static str;

    /// Turn located ranges into matches, marking every one as a match
    fn build(&mut self, doc: &mut Document, ranges: &[TextRange]) -> Vec<Match>;

    /// Apply the active treatment to `matches[active]` only
    fn render(&mut self, doc: &mut Document, matches: &[Match], active: Option<usize>);

    /// Remove every trace of `matches` from the page
    fn clear(&mut self, doc: &mut Document, matches: &[Match]);
}

/// Named range highlights (`CSS.highlights`)
#[derive(Debug, Default)]
pub struct CustomHighlights;

impl HighlightStrategy for CustomHighlights {
    fn name(&self) -> &'static str {
        "custom-highlights"
    }

    fn build(&mut self, doc: &mut Document, ranges: &[TextRange]) -> Vec<Match> {
        doc.set_highlight(FIND_HIGHLIGHT_MATCH_NAME, ranges.to_vec());
        ranges.iter().copied().map(Match::Range).collect()
    }

    fn render(&mut self, doc: &mut Document, matches: &[Match], active: Option<usize>) {
        let active_range = active
            .and_then(|i| matches.get(i))
            .filter(|m| m.is_live(doc))
            .and_then(|m| match m {
                Match::Range(range) => Some(*range),
                Match::Wrapper(_) => None,
            });
        doc.set_highlight(FIND_HIGHLIGHT_ACTIVE_NAME, active_range.into_iter().collect());
    }

    fn clear(&mut self, doc: &mut Document, _matches: &[Match]) {
        doc.clear_highlight(FIND_HIGHLIGHT_MATCH_NAME);
        doc.clear_highlight(FIND_HIGHLIGHT_ACTIVE_NAME);
    }
}

/// `<mark>` wrappers around split text
#[derive(Debug, Default)]
pub struct WrapperElements;

impl WrapperElements {
    fn wrap(doc: &mut Document, node: NodeId, start: usize, end: usize) -> Option<NodeId> {
        let parent = doc.parent(node)?;
        doc.split_text(node, end)?;
        let middle = doc.split_text(node, start)?;
        let mark = doc.create_element("mark");
        doc.set_attr(mark, "class", FIND_WRAPPER_CLASS);
        if let Some(rect) = doc.element(parent).map(|e| e.rect) {
            doc.set_rect(mark, rect);
        }
        doc.insert_before(parent, mark, middle);
        doc.append_child(mark, middle);
        Some(mark)
    }
}

impl HighlightStrategy for WrapperElements {
    fn name(&self) -> &'static str {
        "wrapper-elements"
    }

    fn build(&mut self, doc: &mut Document, ranges: &[TextRange]) -> Vec<Match> {
        let mut matches = Vec::with_capacity(ranges.len());
        let mut i = 0;
        while i < ranges.len() {
            let node = ranges[i].node;
            let group_end = ranges[i..]
                .iter()
                .position(|r| r.node != node)
                .map(|p| i + p)
                .unwrap_or(ranges.len());
            // back to front so earlier offsets stay valid after each split
            let mut wrapped: Vec<NodeId> = ranges[i..group_end]
                .iter()
                .rev()
                .filter_map(|r| Self::wrap(doc, r.node, r.start, r.end))
                .collect();
            wrapped.reverse();
            matches.extend(wrapped.into_iter().map(Match::Wrapper));
            i = group_end;
        }
        matches
    }

    fn render(&mut self, doc: &mut Document, matches: &[Match], active: Option<usize>) {
        for (i, m) in matches.iter().enumerate() {
            let Match::Wrapper(mark) = *m else {
                continue;
            };
            if Some(i) == active && doc.is_connected(mark) {
                doc.add_class(mark, FIND_WRAPPER_ACTIVE_CLASS);
            } else {
                doc.remove_class(mark, FIND_WRAPPER_ACTIVE_CLASS);
            }
        }
    }

    fn clear(&mut self, doc: &mut Document, matches: &[Match]) {
        for m in matches {
            let Match::Wrapper(mark) = *m else {
                continue;
            };
            let Some(parent) = doc.parent(mark) else {
                continue;
            };
            for child in doc.children(mark).to_vec() {
                doc.insert_before(parent, child, mark);
            }
            doc.remove(mark);
            doc.normalize(parent);
        }
    }
}

/// Pick the rendering strategy once, from the page's capabilities
pub fn select_strategy(capabilities: &Capabilities) -> Box<dyn HighlightStrategy> {
    if capabilities.custom_highlights {
        Box::new(CustomHighlights)
    } else {
        Box::new(WrapperElements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::fixtures::*;
    use crate::find::search::search;

    #[test]
    fn test_custom_highlights_registry() {
        let mut doc = page();
        let body = doc.body();
        let p = add(&mut doc, body, "p", &[], rect(0.0));
        let text = add_text(&mut doc, p, "one two one");
        let ranges = search(&doc, &[text], "one", 10).ranges;

        let mut strategy = CustomHighlights;
        let matches = strategy.build(&mut doc, &ranges);
        strategy.render(&mut doc, &matches, Some(1));
        assert_eq!(doc.highlight(FIND_HIGHLIGHT_MATCH_NAME).len(), 2);
        assert_eq!(doc.highlight(FIND_HIGHLIGHT_ACTIVE_NAME), &[ranges[1]]);

        strategy.clear(&mut doc, &matches);
        assert!(doc.highlight(FIND_HIGHLIGHT_MATCH_NAME).is_empty());
        assert!(doc.highlight(FIND_HIGHLIGHT_ACTIVE_NAME).is_empty());
    }

    #[test]
    fn test_wrappers_split_and_restore_text() {
        let mut doc = page();
        let body = doc.body();
        let p = add(&mut doc, body, "p", &[], rect(0.0));
        let text = add_text(&mut doc, p, "one two one");
        let ranges = search(&doc, &[text], "one", 10).ranges;

        let mut strategy = WrapperElements;
        let matches = strategy.build(&mut doc, &ranges);
        assert_eq!(matches.len(), 2);
        let marks: Vec<NodeId> = matches
            .iter()
            .map(|m| match m {
                Match::Wrapper(mark) => *mark,
                Match::Range(_) => panic!("expected wrapper"),
            })
            .collect();
        assert_eq!(doc.text_content(marks[0]), "one");
        assert_eq!(doc.text_content(p), "one two one");
        // document order preserved
        let order: Vec<NodeId> = doc
            .descendants(p)
            .into_iter()
            .filter(|&n| doc.tag(n) == Some("mark"))
            .collect();
        assert_eq!(order, marks);

        strategy.render(&mut doc, &matches, Some(0));
        assert!(doc.has_class(marks[0], FIND_WRAPPER_ACTIVE_CLASS));
        assert!(!doc.has_class(marks[1], FIND_WRAPPER_ACTIVE_CLASS));

        strategy.clear(&mut doc, &matches);
        assert_eq!(doc.children(p).len(), 1);
        assert_eq!(doc.text_content(p), "one two one");
    }

    #[test]
    fn test_detached_match_is_not_live() {
        let mut doc = page();
        let body = doc.body();
        let p = add(&mut doc, body, "p", &[], rect(0.0));
        let text = add_text(&mut doc, p, "needle");
        let m = Match::Range(TextRange {
            node: text,
            start: 0,
            end: 6,
        });
        assert!(m.is_live(&doc));
        doc.remove(p);
        assert!(!m.is_live(&doc));
    }

    #[test]
    fn test_strategy_selection() {
        let mut caps = Capabilities::default();
        assert_eq!(select_strategy(&caps).name(), "custom-highlights");
        caps.custom_highlights = false;
        assert_eq!(select_strategy(&caps).name(), "wrapper-elements");
    }
}
