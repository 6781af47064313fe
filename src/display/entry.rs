//! Entry display formatting
//!
//! Fixed-width report rows: date, kind, tag, description, amount.

use crate::config::Settings;
use crate::models::{Entry, StoredEntry};

/// Column widths of the variable-length fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLayout {
    pub tag_width: usize,
    pub description_width: usize,
}

impl Default for RowLayout {
    fn default() -> Self {
        Self {
            tag_width: 12,
            description_width: 30,
        }
    }
}

impl RowLayout {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            tag_width: settings.tag_width,
            description_width: settings.description_width,
        }
    }

    /// Total width of a row, for separators
    pub fn width(&self) -> usize {
        // id(5) date(10) kind(4) amount(12) and the single spaces between columns
        5 + 1 + 10 + 1 + 4 + 1 + self.tag_width + 1 + self.description_width + 1 + 12
    }
}

/// Shorten `s` to at most `max_len` characters, marking the cut with `...`
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

/// Column header matching [`format_entry_row`]
pub fn format_entry_header(layout: &RowLayout) -> String {
    format!(
        "{:>5} {:10} {:4} {:tw$} {:dw$} {:>12}",
        "#",
        "Date",
        "Kind",
        "Tag",
        "Description",
        "Amount",
        tw = layout.tag_width,
        dw = layout.description_width
    )
}

/// Format a single entry as a report row
pub fn format_entry_row(stored: &StoredEntry, layout: &RowLayout) -> String {
    let entry = &stored.entry;
    format!(
        "{:>5} {} {:4} {:tw$} {:dw$} {:>12}",
        stored.id.get(),
        entry.date.format("%Y-%m-%d"),
        entry.kind.label(),
        truncate(&entry.tag, layout.tag_width),
        truncate(&entry.description, layout.description_width),
        entry.amount,
        tw = layout.tag_width,
        dw = layout.description_width
    )
}

/// Format entry details, one field per line
pub fn format_entry_details(entry: &Entry) -> String {
    let mut output = String::new();
    output.push_str(&format!("Date:        {}\n", entry.date.format("%Y-%m-%d")));
    output.push_str(&format!("Kind:        {}\n", entry.kind));
    output.push_str(&format!("Tag:         {}\n", entry.tag));
    if !entry.description.is_empty() {
        output.push_str(&format!("Description: {}\n", entry.description));
    }
    output.push_str(&format!("Amount:      {}\n", entry.amount));
    output
}
