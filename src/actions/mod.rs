//! Action identifiers, key bindings and their dispatch onto the engine

mod dispatch;
pub mod keymap;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use keymap::{ctrl_chord, help_rows, normal_binding, prefix_binding, prefix_rows};

/// Tab operations relayed to the background context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabAction {
    Next,
    Previous,
    New,
    Close,
    Duplicate,
}

/// Prefix keys that open a second-level map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrefixKey {
    G,
    Space,
}

impl PrefixKey {
    /// Raw key that arms this prefix
    pub fn key(self) -> &'static str {
        match self {
            PrefixKey::G => "g",
            PrefixKey::Space => " ",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            PrefixKey::G => "Goto",
            PrefixKey::Space => "Space",
        }
    }
}

/// What a key resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyBinding {
    Action(Action),
    Prefix(PrefixKey),
}

impl KeyBinding {
    pub fn label(self) -> &'static str {
        match self {
            KeyBinding::Action(action) => action.label(),
            KeyBinding::Prefix(prefix) => prefix.title(),
        }
    }
}

/// One popup row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyHintRow {
    pub key: String,
    pub label: String,
}

macro_rules! define_actions {
    ($($variant:ident => $id:literal, $label:literal;)*) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Action {
            $($variant,)*
        }

        impl Action {
            pub const ALL: &'static [Action] = &[$(Action::$variant,)*];

            /// Stable dotted identifier
            pub fn id(self) -> &'static str {
                match self {
                    $(Action::$variant => $id,)*
                }
            }

            /// Human-readable label for popups
            pub fn label(self) -> &'static str {
                match self {
                    $(Action::$variant => $label,)*
                }
            }
        }

        impl FromStr for Action {
            type Err = ();

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($id => Ok(Action::$variant),)*
                    _ => Err(()),
                }
            }
        }
    };
}

define_actions! {
    ScrollDownStart => "scroll.down.start", "Scroll down";
    ScrollUpStart => "scroll.up.start", "Scroll up";
    ScrollTop => "scroll.top", "Top of page";
    ScrollBottom => "scroll.bottom", "Bottom of page";
    ScrollHalfPageUp => "scroll.halfPage.up", "Half page up";
    ScrollHalfPageDown => "scroll.halfPage.down", "Half page down";
    ScrollPageUp => "scroll.page.up", "Page up";
    ScrollPageDown => "scroll.page.down", "Page down";
    FindOpen => "find.open", "Find in page";
    FindNext => "find.next", "Find next match";
    FindPrevious => "find.previous", "Find previous match";
    HelpShow => "help.show", "Show keymap";
    InputPrevious => "input.previous", "Previous input field";
    InputNext => "input.next", "Next input field";
    InputInsertHighlighted => "input.insert.highlighted", "Insert in highlighted field";
    InputInsertFirst => "input.insert.first", "Insert in first field";
    InputClearHighlight => "input.clearHighlight", "Clear highlight";
    LinkHintShow => "linkHint.show", "Follow link";
    HistoryBack => "history.back", "History back";
    HistoryForward => "history.forward", "History forward";
    TabNext => "tab.next", "Next tab";
    TabPrevious => "tab.previous", "Previous tab";
    TabNew => "tab.new", "New tab";
    TabClose => "tab.close", "Close tab";
    TabDuplicate => "tab.duplicate", "Duplicate tab";
}

impl Action {
    /// Tab operation relayed by this action, if any
    pub fn tab_action(self) -> Option<TabAction> {
        match self {
            Action::TabNext => Some(TabAction::Next),
            Action::TabPrevious => Some(TabAction::Previous),
            Action::TabNew => Some(TabAction::New),
            Action::TabClose => Some(TabAction::Close),
            Action::TabDuplicate => Some(TabAction::Duplicate),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip() {
        for action in Action::ALL {
            assert_eq!(action.id().parse::<Action>(), Ok(*action));
        }
        assert!("scroll.sideways".parse::<Action>().is_err());
    }

    #[test]
    fn test_tab_actions_serialize_lowercase() {
        assert_eq!(Action::TabDuplicate.tab_action(), Some(TabAction::Duplicate));
        assert_eq!(Action::ScrollTop.tab_action(), None);
        assert_eq!(serde_json::to_string(&TabAction::Previous).unwrap(), "\"previous\"");
    }

    #[test]
    fn test_prefix_titles() {
        assert_eq!(PrefixKey::G.title(), "Goto");
        assert_eq!(PrefixKey::Space.title(), "Space");
        assert_eq!(KeyBinding::Prefix(PrefixKey::G).label(), "Goto");
        assert_eq!(KeyBinding::Action(Action::TabNew).label(), "New tab");
    }
}
