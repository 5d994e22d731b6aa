//! View composition for the table controller.

use super::model::Model;
use super::style::ELLIPSIS;
use super::types::InputMode;
use crate::criterion::Criterion;
use crate::fetch::LoadState;
use crate::key::KeyMap as KeyMapTrait;
use crate::record::Record;
use unicode_width::UnicodeWidthStr;

/// Pads or truncates `text` to exactly `width` display cells, appending
/// an ellipsis when content is cut. Styled input is measured on its
/// visible characters only.
fn fit_cell(text: &str, width: usize) -> String {
    let plain = strip_ansi_escapes::strip_str(text);
    let text_width = UnicodeWidthStr::width(plain.as_str());
    if text_width <= width {
        return format!("{}{}", plain, " ".repeat(width - text_width));
    }

    let mut out = String::new();
    let mut used = 0;
    for c in plain.chars() {
        let w = UnicodeWidthStr::width(c.to_string().as_str());
        if used + w > width.saturating_sub(1) {
            break;
        }
        out.push(c);
        used += w;
    }
    format!("{}{}{}", out, ELLIPSIS, " ".repeat(width.saturating_sub(used + 1)))
}

impl<R: Record + Send + Sync + 'static> Model<R> {
    fn column_width(&self, index: usize) -> usize {
        let column = &self.columns[index];
        column
            .width
            .unwrap_or_else(|| UnicodeWidthStr::width(column.title.as_str()).max(8))
    }

    pub(super) fn view_header(&self) -> String {
        let mut header = self.styles.title.render(&self.title);
        let summary = self.filter_summary();
        if !summary.is_empty() {
            header.push_str("  ");
            header.push_str(&self.styles.active_filter.render(&summary));
        }
        header
    }

    /// One-line description of the active filter, empty when none.
    fn filter_summary(&self) -> String {
        match self.criterion.criterion() {
            c if !c.is_complete() => String::new(),
            Criterion::Scalar { field, raw, .. } => {
                format!("{}: {}", field.label, raw.trim())
            }
            Criterion::DateRange {
                field,
                start: Some(start),
                end: Some(end),
            } => format!(
                "{}: {} – {}",
                field.label,
                start.format("%d/%m/%Y"),
                end.format("%d/%m/%Y")
            ),
            Criterion::DateRange { .. } => String::new(),
        }
    }

    pub(super) fn view_filter_line(&self) -> String {
        let field = self.criterion.field();
        match self.mode {
            InputMode::Browsing => String::new(),
            InputMode::EditingQuery => {
                format!("{} {}", field.label, self.filter_input.view())
            }
            InputMode::EditingRange => {
                format!("{} {}", field.label, self.range_picker.view())
            }
        }
    }

    pub(super) fn view_body(&self) -> String {
        if self.is_loading() {
            return self.styles.loading.render("Loading…");
        }

        let mut lines = Vec::new();
        if let LoadState::Failed(err) = &self.load {
            lines.push(
                self.styles
                    .error
                    .render(&format!("Could not refresh data: {}", err)),
            );
        }

        let header_cells: Vec<String> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| fit_cell(&c.title, self.column_width(i)))
            .collect();
        lines.push(self.styles.header.render(&header_cells.join("  ")));

        let rows = self.visible_rows();
        if rows.is_empty() {
            lines.push(self.styles.no_rows.render("No matching records."));
        } else {
            for row in rows {
                let cells: Vec<String> = self
                    .columns
                    .iter()
                    .enumerate()
                    .map(|(i, c)| fit_cell(&row.cell(c.key), self.column_width(i)))
                    .collect();
                lines.push(self.styles.cell.render(&cells.join("  ")));
            }
        }
        lines.join("\n")
    }

    pub(super) fn view_footer(&self) -> String {
        let mut sections = Vec::new();

        if !self.is_loading() {
            let status = format!(
                "{} of {} records",
                self.total_filtered_count(),
                self.total_count()
            );
            sections.push(self.styles.status.render(&status));
        }

        let pagination = self.pages.view();
        if !pagination.is_empty() {
            sections.push(self.styles.pagination.render(&pagination));
        }

        let hints = self.view_hints();
        if !hints.is_empty() {
            sections.push(self.styles.help.render(&hints));
        }
        sections.join("\n")
    }

    fn view_hints(&self) -> String {
        let bindings = self.keymap.short_help();
        let parts: Vec<String> = bindings
            .iter()
            .filter(|b| b.enabled())
            .map(|b| format!("{} {}", b.help.key, b.help.desc))
            .collect();
        parts.join(" • ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_cell_pads_to_width() {
        assert_eq!(fit_cell("abc", 6), "abc   ");
        assert_eq!(fit_cell("", 3), "   ");
    }

    #[test]
    fn test_fit_cell_truncates_with_ellipsis() {
        let cell = fit_cell("a long product name", 8);
        assert_eq!(UnicodeWidthStr::width(cell.as_str()), 8);
        assert!(cell.contains(ELLIPSIS));
    }

    #[test]
    fn test_fit_cell_measures_without_ansi() {
        let styled = "\u{1b}[1mabc\u{1b}[0m";
        assert_eq!(fit_cell(styled, 5), "abc  ");
    }
}
