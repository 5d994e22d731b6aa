//! Type-safe key bindings with help metadata.
//!
//! Components declare their keyboard interface as a struct of [`Binding`]s
//! and implement [`KeyMap`] so help views can be generated from the same
//! source of truth that drives input handling.
//!
//! # Examples
//!
//! ```rust
//! use datatable_widgets::key::{Binding, KeyMap};
//! use crossterm::event::{KeyCode, KeyModifiers};
//!
//! let next_page = Binding::new(vec![KeyCode::Right, KeyCode::Char('l')])
//!     .with_help("→/l", "next page");
//!
//! let refetch = Binding::new(vec![(KeyCode::Char('r'), KeyModifiers::CONTROL)])
//!     .with_help("ctrl+r", "reload");
//!
//! struct MyKeyMap {
//!     next_page: Binding,
//!     refetch: Binding,
//! }
//!
//! impl KeyMap for MyKeyMap {
//!     fn short_help(&self) -> Vec<&Binding> {
//!         vec![&self.next_page]
//!     }
//!
//!     fn full_help(&self) -> Vec<Vec<&Binding>> {
//!         vec![vec![&self.next_page, &self.refetch]]
//!     }
//! }
//! ```

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// A single key chord: a key code plus the modifiers that must be held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    /// The key code of the chord.
    pub code: KeyCode,
    /// Modifier keys that must accompany the code.
    pub mods: KeyModifiers,
}

impl From<KeyCode> for KeyPress {
    fn from(code: KeyCode) -> Self {
        Self {
            code,
            mods: KeyModifiers::NONE,
        }
    }
}

impl From<(KeyCode, KeyModifiers)> for KeyPress {
    fn from((code, mods): (KeyCode, KeyModifiers)) -> Self {
        Self { code, mods }
    }
}

/// Help metadata for a binding: the key label and what it does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// Short label for the key(s), e.g. `"→/l"`.
    pub key: String,
    /// Description of the action, e.g. `"next page"`.
    pub desc: String,
}

/// A keyboard binding: one or more chords that trigger the same action,
/// plus help metadata and an enabled flag.
#[derive(Debug, Clone)]
pub struct Binding {
    keys: Vec<KeyPress>,
    /// Help metadata shown by help views.
    pub help: Help,
    disabled: bool,
}

impl Binding {
    /// Creates a binding from a list of key codes or `(code, modifiers)`
    /// pairs.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use datatable_widgets::key::Binding;
    /// use crossterm::event::KeyCode;
    ///
    /// let b = Binding::new(vec![KeyCode::Home, KeyCode::Char('g')]);
    /// assert!(b.enabled());
    /// ```
    pub fn new<K: Into<KeyPress>>(keys: Vec<K>) -> Self {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            help: Help::default(),
            disabled: false,
        }
    }

    /// Sets the help label and description (builder pattern).
    pub fn with_help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
        self
    }

    /// Disables the binding (builder pattern). Disabled bindings never
    /// match and are skipped by help views.
    pub fn with_disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Returns whether the binding is currently enabled.
    pub fn enabled(&self) -> bool {
        !self.disabled && !self.keys.is_empty()
    }

    /// Enables or disables the binding in place.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    /// Reports whether a key message triggers this binding.
    ///
    /// A chord matches when its key code equals the message's and all of
    /// its declared modifiers are held. Chords declared without modifiers
    /// match regardless of incidental modifiers (so `G` typed as shift+g
    /// still matches a bare `KeyCode::Char('G')` chord).
    pub fn matches(&self, key_msg: &KeyMsg) -> bool {
        if self.disabled {
            return false;
        }
        self.keys
            .iter()
            .any(|p| p.code == key_msg.key && key_msg.modifiers.contains(p.mods))
    }
}

/// Reports whether a key message triggers any of the given bindings.
pub fn matches(key_msg: &KeyMsg, bindings: &[&Binding]) -> bool {
    bindings.iter().any(|b| b.matches(key_msg))
}

/// Trait implemented by component keymaps so help views can be generated
/// from the bindings themselves.
pub trait KeyMap {
    /// The bindings shown in a compact, single-line help view.
    fn short_help(&self) -> Vec<&Binding>;

    /// All bindings, grouped into columns for an expanded help view.
    fn full_help(&self) -> Vec<Vec<&Binding>>;
}
