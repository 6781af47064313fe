//! Entry Report
//!
//! The rows a fetch selected, in fetch order, followed by summary statistics
//! of their amounts and per-kind totals.

use serde::Serialize;

use crate::display::{format_entry_header, format_entry_row, RowLayout};
use crate::error::PfimResult;
use crate::models::{Amount, EntryKind, StoredEntry};
use crate::query::QueryDescriptor;
use crate::storage::EntryStore;

use super::summary::Summary;

/// Money in and out across the report rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Totals {
    /// Sum of income amounts
    pub earned: Amount,
    /// Sum of expense amounts
    pub spent: Amount,
}

impl Totals {
    pub fn from_entries(entries: &[StoredEntry]) -> Self {
        let mut totals = Self::default();
        for stored in entries {
            match stored.entry.kind {
                EntryKind::Earned => totals.earned += stored.entry.amount,
                EntryKind::Spent => totals.spent += stored.entry.amount,
            }
        }
        totals
    }

    /// Earned minus spent, in cents
    pub fn net_cents(&self) -> i128 {
        self.earned.cents() as i128 - self.spent.cents() as i128
    }

    /// Net formatted with a sign and two decimals
    pub fn format_net(&self) -> String {
        let net = self.net_cents();
        let sign = if net < 0 { "-" } else { "" };
        let abs = net.unsigned_abs();
        format!("{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

/// Rows plus summary of one fetch
#[derive(Debug, Clone, Serialize)]
pub struct EntryReport {
    /// Human-readable form of the fetch predicate
    pub filter: String,
    /// Rows in fetch order
    pub entries: Vec<StoredEntry>,
    /// Statistics over the row amounts; absent for an empty report
    pub summary: Option<Summary>,
    pub totals: Totals,
}

impl EntryReport {
    /// Run a fetch against `store` and build the report from its rows
    pub fn generate(store: &dyn EntryStore, descriptor: &QueryDescriptor) -> PfimResult<Self> {
        let entries = store.fetch_all(descriptor)?;
        Self::from_entries(descriptor.predicate.to_string(), entries)
    }

    /// Build a report from rows that are already in display order
    pub fn from_entries(filter: impl Into<String>, entries: Vec<StoredEntry>) -> PfimResult<Self> {
        let summary = if entries.is_empty() {
            None
        } else {
            let amounts: Vec<f64> = entries.iter().map(|e| e.entry.amount.as_f64()).collect();
            Some(Summary::compute(&amounts)?)
        };
        let totals = Totals::from_entries(&entries);

        Ok(Self {
            filter: filter.into(),
            entries,
            summary,
            totals,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Format the report for terminal display: rows first, summary last
    pub fn format_terminal(&self, layout: &RowLayout) -> String {
        let width = layout.width();
        let mut output = String::new();

        output.push_str(&format!("Report: {}\n", self.filter));
        output.push_str(&"=".repeat(width));
        output.push('\n');

        if self.entries.is_empty() {
            output.push_str("No entries found.\n");
            return output;
        }

        output.push_str(&format_entry_header(layout));
        output.push('\n');
        output.push_str(&"-".repeat(width));
        output.push('\n');
        for stored in &self.entries {
            output.push_str(&format_entry_row(stored, layout));
            output.push('\n');
        }
        output.push_str(&"-".repeat(width));
        output.push('\n');

        if let Some(summary) = &self.summary {
            output.push_str(&summary.format_terminal());
        }
        output.push('\n');
        output.push_str(&format!("{:<10} {:>12}\n", "Earned:", self.totals.earned));
        output.push_str(&format!("{:<10} {:>12}\n", "Spent:", self.totals.spent));
        output.push_str(&format!("{:<10} {:>12}\n", "Net:", self.totals.format_net()));

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Entry;
    use crate::query::{FetchOptions, QueryBuilder};
    use crate::storage::MemoryStore;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_store() -> MemoryStore {
        let store = MemoryStore::new();
        store
            .add_entry(&Entry::spent(date(2021, 1, 1), "OUT", "", Amount::from_cents(7500)))
            .unwrap();
        store
            .add_entry(&Entry::earned(date(2021, 1, 2), "PWM", "", Amount::from_cents(27500)))
            .unwrap();
        store
    }

    fn build(opts: FetchOptions) -> QueryDescriptor {
        QueryBuilder::new(date(2022, 1, 1)).build_fetch(&opts).unwrap()
    }

    #[test]
    fn test_sorted_report_with_summary() {
        let store = create_test_store();
        let report =
            EntryReport::generate(&store, &build(FetchOptions::new().all().sort_by_amount()))
                .unwrap();

        let amounts: Vec<_> = report.entries.iter().map(|e| e.entry.amount.cents()).collect();
        assert_eq!(amounts, vec![7500, 27500]);

        let summary = report.summary.unwrap();
        assert_eq!(summary.count, 2);
        assert_eq!(summary.mean, 175.0);
        assert_eq!(summary.median, 175.0);
        assert!((summary.stdev().unwrap() - 141.42).abs() < 0.01);

        assert_eq!(report.totals.earned.cents(), 27500);
        assert_eq!(report.totals.spent.cents(), 7500);
        assert_eq!(report.totals.format_net(), "200.00");
    }

    #[test]
    fn test_empty_report_has_no_summary() {
        let store = MemoryStore::new();
        let report = EntryReport::generate(&store, &build(FetchOptions::new())).unwrap();
        assert!(report.is_empty());
        assert!(report.summary.is_none());

        let text = report.format_terminal(&RowLayout::default());
        assert!(text.contains("No entries found."));
        assert!(!text.contains("Count:"));
    }

    #[test]
    fn test_rows_come_before_summary() {
        let store = create_test_store();
        let report = EntryReport::generate(&store, &build(FetchOptions::new())).unwrap();
        let text = report.format_terminal(&RowLayout::default());

        let last_row = text.find("PWM").unwrap();
        let summary = text.find("Count:").unwrap();
        assert!(last_row < summary);
        assert!(text.contains("Stdev:"));
        assert!(text.contains("Net:"));
    }

    #[test]
    fn test_negative_net() {
        let totals = Totals {
            earned: Amount::from_cents(100),
            spent: Amount::from_cents(1050),
        };
        assert_eq!(totals.format_net(), "-9.50");
    }
}
