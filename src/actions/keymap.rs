//! Key tables: normal mode, prefixed maps, Ctrl chords and the help sheet

use super::{Action, KeyBinding, KeyHintRow, PrefixKey};
use crate::keyboard::format_key_label;

use Action::*;
use KeyBinding::Action as Run;

pub const NORMAL_MODE_BINDINGS: &[(&str, KeyBinding)] = &[
    ("j", Run(ScrollDownStart)),
    ("k", Run(ScrollUpStart)),
    ("/", Run(FindOpen)),
    ("n", Run(FindNext)),
    ("shift+n", Run(FindPrevious)),
    ("?", Run(HelpShow)),
    ("h", Run(InputPrevious)),
    ("l", Run(InputNext)),
    ("enter", Run(InputInsertHighlighted)),
    ("i", Run(InputInsertFirst)),
    ("f", Run(LinkHintShow)),
    ("g", KeyBinding::Prefix(PrefixKey::G)),
    (" ", KeyBinding::Prefix(PrefixKey::Space)),
];

pub const GOTO_BINDINGS: &[(&str, KeyBinding)] = &[
    ("g", KeyBinding::Prefix(PrefixKey::G)),
    ("t", Run(ScrollTop)),
    ("e", Run(ScrollBottom)),
    ("n", Run(TabNext)),
    ("p", Run(TabPrevious)),
];

pub const SPACE_BINDINGS: &[(&str, KeyBinding)] = &[
    ("n", Run(TabNew)),
    ("q", Run(TabClose)),
    ("d", Run(TabDuplicate)),
    ("?", Run(HelpShow)),
];

/// Ctrl chords, normal mode only and never inside editable fields
pub const CTRL_CHORDS: &[(&str, Action)] = &[
    ("d", ScrollHalfPageDown),
    ("u", ScrollHalfPageUp),
    ("f", ScrollPageDown),
    ("b", ScrollPageUp),
    ("o", HistoryBack),
    ("i", HistoryForward),
];

const HELP_ROWS: &[(&str, &str)] = &[
    ("j / k", "Scroll down / up"),
    ("Ctrl-d / Ctrl-u", "Half page down / up"),
    ("Ctrl-f / Ctrl-b", "Page down / up"),
    ("g t / g e", "Top / bottom of page"),
    ("/, n, N", "Find in page and jump matches"),
    ("f", "Follow a link by its hint"),
    ("h / l", "Previous / next input field"),
    ("Enter / i", "Enter Insert mode"),
    ("Esc", "Exit Insert or clear highlight"),
    ("Ctrl-o / Ctrl-i", "History back / forward"),
    ("g n / g p", "Next / previous tab"),
    ("Space n", "New tab"),
    ("Space q", "Close tab"),
    ("Space d", "Duplicate tab"),
    ("? / Space ?", "Show keymap"),
];

fn lookup<T: Copy>(table: &[(&str, T)], key: &str) -> Option<T> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

pub fn normal_binding(key: &str) -> Option<KeyBinding> {
    lookup(NORMAL_MODE_BINDINGS, key)
}

pub fn prefix_table(prefix: PrefixKey) -> &'static [(&'static str, KeyBinding)] {
    match prefix {
        PrefixKey::G => GOTO_BINDINGS,
        PrefixKey::Space => SPACE_BINDINGS,
    }
}

pub fn prefix_binding(prefix: PrefixKey, key: &str) -> Option<KeyBinding> {
    lookup(prefix_table(prefix), key)
}

pub fn ctrl_chord(key: &str) -> Option<Action> {
    lookup(CTRL_CHORDS, key)
}

/// Popup rows for a pending prefix, in table order
pub fn prefix_rows(prefix: PrefixKey) -> Vec<KeyHintRow> {
    prefix_table(prefix)
        .iter()
        .map(|(key, binding)| KeyHintRow {
            key: format_key_label(key),
            label: binding.label().to_string(),
        })
        .collect()
}

pub fn help_rows() -> Vec<KeyHintRow> {
    HELP_ROWS
        .iter()
        .map(|(key, label)| KeyHintRow {
            key: key.to_string(),
            label: label.to_string(),
        })
        .collect()
}
