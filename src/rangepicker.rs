//! Start/end date entry for the range filter field.
//!
//! Two small text fields, one per bound, in the portal's `dd/mm/yyyy`
//! locale. Dates are parsed strictly from complete component strings; a
//! partial entry is simply an unset bound, never a guessed date.
//!
//! The picker holds no opinion on when its bounds take effect; the table
//! controller evaluates only on an explicit apply action.
//!
//! # Examples
//!
//! ```rust
//! use chrono::NaiveDate;
//! use datatable_widgets::rangepicker;
//! use datatable_widgets::Component;
//!
//! let mut picker = rangepicker::new();
//! picker.focus();
//! picker.set_bounds_text("01/01/2024", "31/01/2024");
//!
//! let (start, end) = picker.bounds();
//! assert_eq!(start, NaiveDate::from_ymd_opt(2024, 1, 1));
//! assert_eq!(end, NaiveDate::from_ymd_opt(2024, 1, 31));
//! assert!(picker.is_complete());
//! ```

use crate::filterinput;
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use chrono::NaiveDate;
use crossterm::event::KeyCode;
use lipgloss_extras::prelude::*;

/// Date format of the single supported locale.
const DATE_FORMAT: &str = "%d/%m/%Y";

/// Which bound is currently being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveBound {
    /// The lower bound.
    Start,
    /// The upper bound.
    End,
}

/// The range picker model.
#[derive(Debug, Clone)]
pub struct Model {
    /// Style for the bound labels.
    pub label_style: Style,
    start_input: filterinput::Model,
    end_input: filterinput::Model,
    active: ActiveBound,
    focus: bool,
}

/// Creates a new range picker, blurred, editing the start bound.
pub fn new() -> Model {
    let field = || {
        let mut input = filterinput::new().with_prompt("").with_placeholder("dd/mm/yyyy");
        input.char_limit = 10;
        input
    };
    Model {
        label_style: Style::new().faint(true),
        start_input: field(),
        end_input: field(),
        active: ActiveBound::Start,
        focus: false,
    }
}

impl Default for Model {
    fn default() -> Self {
        new()
    }
}

impl Model {
    /// The bound currently receiving input.
    pub fn active_bound(&self) -> ActiveBound {
        self.active
    }

    /// Switches editing to the other bound.
    pub fn toggle_bound(&mut self) {
        self.active = match self.active {
            ActiveBound::Start => ActiveBound::End,
            ActiveBound::End => ActiveBound::Start,
        };
        self.sync_focus();
    }

    /// Sets both bounds from text, as if typed.
    pub fn set_bounds_text(&mut self, start: &str, end: &str) {
        self.start_input.set_value(start);
        self.end_input.set_value(end);
    }

    /// The parsed bounds. A bound whose text does not form a complete
    /// `dd/mm/yyyy` date is `None`.
    pub fn bounds(&self) -> (Option<NaiveDate>, Option<NaiveDate>) {
        (
            parse_date(&self.start_input.value()),
            parse_date(&self.end_input.value()),
        )
    }

    /// Whether both bounds parse to dates.
    pub fn is_complete(&self) -> bool {
        let (start, end) = self.bounds();
        start.is_some() && end.is_some()
    }

    /// Clears both bounds and returns editing to the start field.
    pub fn clear(&mut self) {
        self.start_input.reset();
        self.end_input.reset();
        self.active = ActiveBound::Start;
        self.sync_focus();
    }

    fn sync_focus(&mut self) {
        self.start_input.blur();
        self.end_input.blur();
        if self.focus {
            let _ = match self.active {
                ActiveBound::Start => self.start_input.focus(),
                ActiveBound::End => self.end_input.focus(),
            };
        }
    }

    /// Handles a message while focused. Tab switches bounds; date
    /// characters (digits and `/`) edit the active field; everything else
    /// is left for the caller. Returns `true` when a bound's text
    /// changed.
    pub fn update(&mut self, msg: &Msg) -> bool {
        if !self.focus {
            return false;
        }
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            match key_msg.key {
                KeyCode::Tab => {
                    self.toggle_bound();
                    return false;
                }
                KeyCode::Char(c) if !c.is_ascii_digit() && c != '/' => return false,
                _ => {}
            }
        }
        match self.active {
            ActiveBound::Start => self.start_input.update(msg),
            ActiveBound::End => self.end_input.update(msg),
        }
    }

    /// Renders both bounds side by side.
    pub fn view(&self) -> String {
        format!(
            "{}{}  {}{}",
            self.label_style.render("from "),
            self.start_input.view(),
            self.label_style.render("to "),
            self.end_input.view()
        )
    }
}

impl Component for Model {
    fn focus(&mut self) -> Option<Cmd> {
        self.focus = true;
        self.sync_focus();
        None
    }

    fn blur(&mut self) {
        self.focus = false;
        self.sync_focus();
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> Msg {
        Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        }) as Msg
    }

    fn type_str(picker: &mut Model, s: &str) {
        for c in s.chars() {
            picker.update(&key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_typing_into_both_bounds() {
        let mut picker = new();
        picker.focus();

        type_str(&mut picker, "01/01/2024");
        picker.update(&key(KeyCode::Tab));
        type_str(&mut picker, "31/01/2024");

        let (start, end) = picker.bounds();
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 1, 31));
        assert!(picker.is_complete());
    }

    #[test]
    fn test_partial_entry_is_unset() {
        let mut picker = new();
        picker.focus();
        type_str(&mut picker, "01/2024");
        assert_eq!(picker.bounds(), (None, None));
        assert!(!picker.is_complete());
    }

    #[test]
    fn test_non_date_characters_are_swallowed() {
        let mut picker = new();
        picker.focus();
        type_str(&mut picker, "3a1/b01/2024x");
        assert_eq!(picker.bounds().0, NaiveDate::from_ymd_opt(2024, 1, 31));
    }

    #[test]
    fn test_invalid_calendar_dates_fail_strictly() {
        let mut picker = new();
        picker.set_bounds_text("31/02/2024", "32/01/2024");
        assert_eq!(picker.bounds(), (None, None));
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut picker = new();
        picker.focus();
        picker.set_bounds_text("01/01/2024", "31/01/2024");
        picker.toggle_bound();

        picker.clear();
        assert_eq!(picker.bounds(), (None, None));
        assert_eq!(picker.active_bound(), ActiveBound::Start);
    }

    #[test]
    fn test_blurred_picker_ignores_input() {
        let mut picker = new();
        type_str(&mut picker, "01/01/2024");
        assert_eq!(picker.bounds(), (None, None));
    }

    #[test]
    fn test_tab_switches_active_bound() {
        let mut picker = new();
        picker.focus();
        assert_eq!(picker.active_bound(), ActiveBound::Start);
        picker.update(&key(KeyCode::Tab));
        assert_eq!(picker.active_bound(), ActiveBound::End);
        picker.update(&key(KeyCode::Tab));
        assert_eq!(picker.active_bound(), ActiveBound::Start);
    }
}
