//! Find in page
//!
//! Incremental search over visible text with an ordered match list, an active
//! match and a status line. Typing is debounced and flushed on the next frame.
//! A query equal to the indexed one steps through the cached matches instead
//! of rebuilding them.

mod bar;
pub mod highlight;
pub mod search;

pub use bar::{FindBar, FindBarButton};
pub use highlight::{select_strategy, HighlightStrategy, Match};

use crate::config::EngineConfig;
use crate::dom::query::{find_text_nodes, is_inside_find_ui};
use crate::dom::{Document, InputSelection};
use crate::scheduler::{Scheduler, Task, TaskHandle};

/// What the status line shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindStatus {
    Idle,
    NoMatches,
    Position {
        index: usize,
        total: usize,
        truncated: bool,
    },
}

impl FindStatus {
    pub fn label(&self) -> String {
        match *self {
            FindStatus::Idle => String::new(),
            FindStatus::NoMatches => "No matches".to_string(),
            FindStatus::Position {
                index,
                total,
                truncated,
            } => {
                let number = (index + 1).min(total);
                if truncated {
                    format!("{} of {}+", number, total)
                } else {
                    format!("{} of {}", number, total)
                }
            }
        }
    }

    /// `data-state` of the status element
    pub fn state(&self) -> &'static str {
        match self {
            FindStatus::Idle => "idle",
            FindStatus::NoMatches => "error",
            FindStatus::Position { .. } => "ok",
        }
    }

    pub fn has_matches(&self) -> bool {
        matches!(self, FindStatus::Position { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
struct FindRequest {
    query: String,
    backwards: bool,
    from_boundary: bool,
    selection: Option<InputSelection>,
}

pub struct FindController {
    last_query: String,
    active_query: String,
    matches: Vec<Match>,
    active_index: Option<usize>,
    truncated: bool,
    strategy: Box<dyn HighlightStrategy>,
    debounce: Option<TaskHandle>,
    frame: Option<TaskHandle>,
    pending: Option<FindRequest>,
}

fn normalize_query(query: &str) -> &str {
    query.trim()
}

impl FindController {
    pub fn new(strategy: Box<dyn HighlightStrategy>) -> Self {
        log::debug!("Find highlighting via {}", strategy.name());
        Self {
            last_query: String::new(),
            active_query: String::new(),
            matches: Vec::new(),
            active_index: None,
            truncated: false,
            strategy,
            debounce: None,
            frame: None,
            pending: None,
        }
    }

    pub fn last_query(&self) -> &str {
        &self.last_query
    }

    pub fn active_query(&self) -> &str {
        &self.active_query
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Debounce or frame work outstanding
    pub fn has_pending_work(&self) -> bool {
        self.debounce.is_some() || self.frame.is_some()
    }

    pub fn is_open(&self, doc: &Document) -> bool {
        FindBar::get(doc).map(|bar| bar.is_open(doc)).unwrap_or(false)
    }

    pub fn status(&self, query: &str) -> FindStatus {
        if query.is_empty() {
            return FindStatus::Idle;
        }
        match self.active_index {
            Some(index) if !self.matches.is_empty() => FindStatus::Position {
                index,
                total: self.matches.len(),
                truncated: self.truncated,
            },
            _ => FindStatus::NoMatches,
        }
    }

    /// Refresh the status line, if the bar exists
    pub fn update_status(&self, doc: &mut Document, query: &str) {
        if let Some(bar) = FindBar::get(doc) {
            bar.render_status(doc, &self.status(query));
        }
    }

    /// Show the bar (seeded with the last query when it was closed), focus
    /// its input and search from the top
    pub fn open(&mut self, doc: &mut Document, config: &EngineConfig) {
        let bar = FindBar::get_or_create(doc);
        let was_open = bar.is_open(doc);
        bar.show(doc);
        if !was_open {
            let last = self.last_query.clone();
            bar.set_value(doc, &last);
        }
        doc.focus(bar.input);
        doc.select_all(bar.input);

        let value = bar.value(doc);
        let query = normalize_query(&value);
        if query.is_empty() {
            self.update_status(doc, "");
        } else {
            let selection = bar.selection_snapshot(doc);
            self.run_from_ui(query, false, true, selection, doc, config);
        }
    }

    /// Hide the bar and drop any scheduled search. Results stay highlighted.
    pub fn close(&mut self, doc: &mut Document, scheduler: &mut Scheduler) {
        self.cancel_schedule(scheduler);
        let Some(bar) = FindBar::get(doc) else {
            return;
        };
        if let Some(active) = doc.active_element() {
            if is_inside_find_ui(doc, active) {
                doc.blur(active);
            }
        }
        bar.hide(doc);
    }

    pub fn cancel_schedule(&mut self, scheduler: &mut Scheduler) {
        if let Some(handle) = self.debounce.take() {
            scheduler.cancel(handle);
        }
        if let Some(handle) = self.frame.take() {
            scheduler.cancel(handle);
        }
        self.pending = None;
    }

    /// The find input changed
    pub fn on_input(
        &mut self,
        value: &str,
        doc: &mut Document,
        scheduler: &mut Scheduler,
        config: &EngineConfig,
    ) {
        let mut selection = None;
        if let Some(bar) = FindBar::get(doc) {
            bar.set_value(doc, value);
            selection = bar.selection_snapshot(doc);
        }
        self.schedule(value, false, true, selection, doc, scheduler, config);
    }

    #[allow(clippy::too_many_arguments)]
    fn schedule(
        &mut self,
        query: &str,
        backwards: bool,
        from_boundary: bool,
        selection: Option<InputSelection>,
        doc: &mut Document,
        scheduler: &mut Scheduler,
        config: &EngineConfig,
    ) {
        self.cancel_schedule(scheduler);
        let normalized = normalize_query(query);
        if normalized != self.active_query {
            self.clear_results(doc);
            self.update_status(doc, normalized);
        }
        self.pending = Some(FindRequest {
            query: query.to_string(),
            backwards,
            from_boundary,
            selection,
        });
        self.debounce = Some(scheduler.set_timeout(config.find_debounce_ms, Task::FindDebounceElapsed));
    }

    /// Debounce timer fired: defer to the next frame
    pub fn on_debounce_elapsed(&mut self, scheduler: &mut Scheduler) {
        self.debounce = None;
        self.frame = Some(scheduler.request_frame(Task::FindFlush));
    }

    /// Frame after the debounce: run the pending request
    pub fn flush(&mut self, doc: &mut Document, config: &EngineConfig) {
        self.frame = None;
        if let Some(request) = self.pending.take() {
            self.run_from_ui(
                &request.query,
                request.backwards,
                request.from_boundary,
                request.selection,
                doc,
                config,
            );
        }
    }

    /// Run a search started from the bar, then put focus and the caret
    /// back into its input
    pub fn run_from_ui(
        &mut self,
        query: &str,
        backwards: bool,
        from_boundary: bool,
        selection: Option<InputSelection>,
        doc: &mut Document,
        config: &EngineConfig,
    ) -> bool {
        let found = self.run(query, backwards, from_boundary, doc, config);
        if let Some(bar) = FindBar::get(doc) {
            bar.restore_input_focus(doc, selection);
        }
        found
    }

    /// Search for `query`. A new query (or one whose matches are gone)
    /// rebuilds and lands on the first or last match; the indexed query
    /// steps by one, or restarts at the boundary when asked.
    pub fn run(
        &mut self,
        query: &str,
        backwards: bool,
        from_boundary: bool,
        doc: &mut Document,
        config: &EngineConfig,
    ) -> bool {
        let query = normalize_query(query).to_string();
        if query.is_empty() {
            self.last_query.clear();
            self.clear_results(doc);
            self.update_status(doc, "");
            return false;
        }
        self.last_query = query.clone();

        let cached = self.active_query == query
            && self.matches.iter().any(|m| m.is_live(doc));
        if !cached {
            self.rebuild(&query, doc, config);
            if self.matches.is_empty() {
                self.update_status(doc, &query);
                return false;
            }
            let found = self.activate_boundary(backwards, doc);
            self.update_status(doc, &query);
            return found;
        }

        let found = match self.active_index {
            Some(current) if !from_boundary => {
                let step: isize = if backwards { -1 } else { 1 };
                self.set_active(current as isize + step, step, doc)
            }
            _ => self.activate_boundary(backwards, doc),
        };
        self.update_status(doc, &query);
        found
    }

    /// n / N: step with the bar's query when it is open, else the last query
    pub fn navigate(&mut self, backwards: bool, doc: &mut Document, config: &EngineConfig) -> bool {
        let mut query = String::new();
        if let Some(bar) = FindBar::get(doc) {
            if bar.is_open(doc) {
                query = normalize_query(&bar.value(doc)).to_string();
            }
        }
        if query.is_empty() {
            query = self.last_query.clone();
        }
        if query.is_empty() {
            self.update_status(doc, "");
            return false;
        }
        self.run(&query, backwards, false, doc, config)
    }

    /// Drop matches and their highlighting
    pub fn clear_results(&mut self, doc: &mut Document) {
        self.strategy.clear(doc, &self.matches);
        self.matches.clear();
        self.active_index = None;
        self.active_query.clear();
        self.truncated = false;
    }

    fn rebuild(&mut self, query: &str, doc: &mut Document, config: &EngineConfig) {
        self.clear_results(doc);
        self.active_query = query.to_string();

        let nodes = find_text_nodes(doc);
        let result = search::search(doc, &nodes, query, config.find_match_limit);
        self.truncated = result.truncated;
        if result.ranges.is_empty() {
            return;
        }
        self.matches = self.strategy.build(doc, &result.ranges);
        log::debug!(
            "Indexed {} matches for '{}'{}",
            self.matches.len(),
            query,
            if self.truncated { " (truncated)" } else { "" }
        );
    }

    fn activate_boundary(&mut self, backwards: bool, doc: &mut Document) -> bool {
        if backwards {
            let last = self.matches.len() as isize - 1;
            self.set_active(last, -1, doc)
        } else {
            self.set_active(0, 1, doc)
        }
    }

    /// Activate `index` (wrapped), skipping detached matches in `step`
    /// direction
    fn set_active(&mut self, index: isize, step: isize, doc: &mut Document) -> bool {
        let len = self.matches.len() as isize;
        if len == 0 {
            self.active_index = None;
            return false;
        }
        let found = (0..len)
            .map(|k| (index + k * step).rem_euclid(len) as usize)
            .find(|&i| self.matches[i].is_live(doc));
        self.active_index = found;
        self.strategy.render(doc, &self.matches, found);

        let Some(i) = found else {
            return false;
        };
        if let Some(container) = self.matches[i].container(doc) {
            if doc.is_connected(container) {
                doc.scroll_into_view_centered(container);
            }
        }
        true
    }
}
