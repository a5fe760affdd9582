use crate::dom::NodeId;

/// Defines the named (non-character) keys with their canonical token and
/// display label in one place.
/// Format: Variant = (token, label $(, is_modifier)?)
macro_rules! define_named_keys {
    (
        $(
            $variant:ident = ($token:literal, $label:literal $(, $modifier:literal)?)
        ),* $(,)?
    ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum NamedKey {
            $($variant),*
        }

        impl NamedKey {
            /// Parse a normalized key token
            pub fn from_token(token: &str) -> Option<Self> {
                match token {
                    $($token => Some(Self::$variant),)*
                    _ => None,
                }
            }

            /// Canonical lowercase token (what `normalize_key` produces)
            pub fn token(&self) -> &'static str {
                match self {
                    $(Self::$variant => $token,)*
                }
            }

            /// Human-readable label for popups
            pub fn label(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)*
                }
            }

            pub fn is_modifier(&self) -> bool {
                match self {
                    $($(Self::$variant => $modifier,)?)*
                    #[allow(unreachable_patterns)]
                    _ => false,
                }
            }
        }
    };
}

define_named_keys! {
    Space = (" ", "Space"),
    Enter = ("enter", "Enter"),
    Escape = ("escape", "Esc"),
    Tab = ("tab", "Tab"),
    Backspace = ("backspace", "Backspace"),
    Delete = ("delete", "Del"),
    ArrowUp = ("arrowup", "Up"),
    ArrowDown = ("arrowdown", "Down"),
    ArrowLeft = ("arrowleft", "Left"),
    ArrowRight = ("arrowright", "Right"),
    Home = ("home", "Home"),
    End = ("end", "End"),
    PageUp = ("pageup", "PgUp"),
    PageDown = ("pagedown", "PgDn"),
    Shift = ("shift", "Shift", true),
    Control = ("control", "Ctrl", true),
    Alt = ("alt", "Alt", true),
    Meta = ("meta", "Cmd", true),
    CapsLock = ("capslock", "Caps Lock", true),
}

/// Modifier state at the time of the event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub control: bool,
    pub alt: bool,
    pub meta: bool,
}

/// A keyboard event forwarded by the host
#[derive(Debug, Clone, PartialEq)]
pub struct KeyEvent {
    /// Raw `KeyboardEvent.key`
    pub key: String,
    pub modifiers: Modifiers,
    /// Event target; `None` means the document itself
    pub target: Option<NodeId>,
    pub is_composing: bool,
    /// Another listener already called `preventDefault`
    pub default_prevented: bool,
}

impl KeyEvent {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            modifiers: Modifiers::default(),
            target: None,
            is_composing: false,
            default_prevented: false,
        }
    }

    pub fn with_shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }

    pub fn with_ctrl(mut self) -> Self {
        self.modifiers.control = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.modifiers.alt = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.modifiers.meta = true;
        self
    }

    pub fn on(mut self, target: NodeId) -> Self {
        self.target = Some(target);
        self
    }
}
