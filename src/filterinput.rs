//! Single-line text input for filter queries.
//!
//! A trimmed-down input component: a character buffer with a cursor,
//! prompt and placeholder styling, and focus management. It omits echo
//! modes, suggestions, and validation hooks; a filter box needs none of
//! them.
//!
//! The component reports whether a message changed its *value* (as
//! opposed to merely moving the cursor), which is exactly the signal a
//! debounced consumer needs.
//!
//! # Examples
//!
//! ```rust
//! use datatable_widgets::filterinput;
//! use datatable_widgets::Component;
//!
//! let mut input = filterinput::new();
//! input.focus();
//! input.set_value("acme");
//! assert_eq!(input.value(), "acme");
//! assert_eq!(input.position(), 4);
//! ```

use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use crossterm::event::KeyCode;
use lipgloss_extras::prelude::*;

/// A single-line filter input model.
#[derive(Debug, Clone)]
pub struct Model {
    /// Text rendered before the input, e.g. `"Filter: "`.
    pub prompt: String,
    /// Style for the prompt.
    pub prompt_style: Style,
    /// Style for the typed text.
    pub text_style: Style,
    /// Text shown while the input is empty.
    pub placeholder: String,
    /// Style for the placeholder.
    pub placeholder_style: Style,
    /// Style for the character under the cursor while focused.
    pub cursor_style: Style,
    /// Maximum number of characters accepted; 0 means no limit.
    pub char_limit: usize,

    value: Vec<char>,
    pos: usize,
    focus: bool,
}

/// Creates a new filter input with default settings. The input starts
/// blurred; call `focus()` before routing key messages to it.
pub fn new() -> Model {
    Model {
        prompt: "> ".to_string(),
        prompt_style: Style::new().foreground(AdaptiveColor {
            Light: "#04B575",
            Dark: "#ECFD65",
        }),
        text_style: Style::new(),
        placeholder: String::new(),
        placeholder_style: Style::new().faint(true),
        cursor_style: Style::new().reverse(true),
        char_limit: 0,
        value: Vec::new(),
        pos: 0,
        focus: false,
    }
}

impl Default for Model {
    fn default() -> Self {
        new()
    }
}

impl Model {
    /// The current value as a string.
    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    /// Replaces the value, moving the cursor to the end. Honors the
    /// character limit.
    pub fn set_value(&mut self, s: &str) {
        self.value = s.chars().collect();
        if self.char_limit > 0 {
            self.value.truncate(self.char_limit);
        }
        self.pos = self.value.len();
    }

    /// Sets the placeholder text (builder pattern).
    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    /// Sets the prompt text (builder pattern).
    pub fn with_prompt(mut self, prompt: &str) -> Self {
        self.prompt = prompt.to_string();
        self
    }

    /// The cursor position in characters.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Moves the cursor, clamping into the value's bounds.
    pub fn set_cursor(&mut self, pos: usize) {
        self.pos = pos.min(self.value.len());
    }

    /// Moves the cursor to the start of the value.
    pub fn cursor_start(&mut self) {
        self.pos = 0;
    }

    /// Moves the cursor to the end of the value.
    pub fn cursor_end(&mut self) {
        self.pos = self.value.len();
    }

    /// Clears value and cursor.
    pub fn reset(&mut self) {
        self.value.clear();
        self.pos = 0;
    }

    fn insert(&mut self, c: char) -> bool {
        if self.char_limit > 0 && self.value.len() >= self.char_limit {
            return false;
        }
        self.value.insert(self.pos, c);
        self.pos += 1;
        true
    }

    fn backspace(&mut self) -> bool {
        if self.pos == 0 {
            return false;
        }
        self.pos -= 1;
        self.value.remove(self.pos);
        true
    }

    fn delete(&mut self) -> bool {
        if self.pos >= self.value.len() {
            return false;
        }
        self.value.remove(self.pos);
        true
    }

    /// Handles a message while focused, returning `true` when the value
    /// changed (insertions and deletions; cursor movement alone returns
    /// `false`). Blurred inputs ignore everything.
    pub fn update(&mut self, msg: &Msg) -> bool {
        if !self.focus {
            return false;
        }
        let Some(key_msg) = msg.downcast_ref::<KeyMsg>() else {
            return false;
        };
        match key_msg.key {
            KeyCode::Char(c) => self.insert(c),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => {
                self.pos = self.pos.saturating_sub(1);
                false
            }
            KeyCode::Right => {
                self.set_cursor(self.pos + 1);
                false
            }
            KeyCode::Home => {
                self.cursor_start();
                false
            }
            KeyCode::End => {
                self.cursor_end();
                false
            }
            _ => false,
        }
    }

    /// Renders the input: prompt, value (or placeholder), and the cursor
    /// cell when focused.
    pub fn view(&self) -> String {
        let prompt = self.prompt_style.render(&self.prompt);

        if self.value.is_empty() {
            let body = if self.focus {
                let (head, tail) = match self.placeholder.chars().next() {
                    Some(first) => (
                        first.to_string(),
                        self.placeholder.chars().skip(1).collect::<String>(),
                    ),
                    None => (" ".to_string(), String::new()),
                };
                format!(
                    "{}{}",
                    self.cursor_style.render(&head),
                    self.placeholder_style.render(&tail)
                )
            } else {
                self.placeholder_style.render(&self.placeholder)
            };
            return format!("{}{}", prompt, body);
        }

        let before: String = self.value[..self.pos].iter().collect();
        let mut body = self.text_style.render(&before);
        if self.focus {
            if self.pos < self.value.len() {
                let under: String = self.value[self.pos].to_string();
                let after: String = self.value[self.pos + 1..].iter().collect();
                body.push_str(&self.cursor_style.render(&under));
                body.push_str(&self.text_style.render(&after));
            } else {
                body.push_str(&self.cursor_style.render(" "));
            }
        } else {
            let after: String = self.value[self.pos..].iter().collect();
            body.push_str(&self.text_style.render(&after));
        }
        format!("{}{}", prompt, body)
    }
}

impl Component for Model {
    fn focus(&mut self) -> Option<Cmd> {
        self.focus = true;
        None
    }

    fn blur(&mut self) {
        self.focus = false;
    }

    fn focused(&self) -> bool {
        self.focus
    }
}
