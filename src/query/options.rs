//! Sparse option sets, one record per operation
//!
//! Values stay as the raw strings the user typed; the
//! [`QueryBuilder`](super::QueryBuilder) validates and parses them, so these
//! records can be filled from any front end.

use std::fmt;

/// Name of an option a request may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionName {
    Tag,
    Date,
    Description,
    Before,
    After,
    On,
    Income,
    Expense,
    All,
    SortDate,
    SortTag,
    SortAmount,
    Descending,
}

impl OptionName {
    /// Label used in error messages
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Tag => "tag",
            Self::Date => "date",
            Self::Description => "description",
            Self::Before => "before-date",
            Self::After => "after-date",
            Self::On => "on-date",
            Self::Income => "income",
            Self::Expense => "expense",
            Self::All => "all",
            Self::SortDate => "sort-date",
            Self::SortTag => "sort-tag",
            Self::SortAmount => "sort-amount",
            Self::Descending => "descending",
        }
    }
}

impl fmt::Display for OptionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The options present in one request, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSet(Vec<OptionName>);

impl OptionSet {
    fn push_if(&mut self, present: bool, name: OptionName) {
        if present {
            self.0.push(name);
        }
    }

    /// Whether the option was given
    pub fn contains(&self, name: OptionName) -> bool {
        self.0.contains(&name)
    }

    /// The given options out of `names`, in the order of `names`
    pub fn present_of(&self, names: &[OptionName]) -> Vec<OptionName> {
        names.iter().copied().filter(|n| self.contains(*n)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = OptionName> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Options for recording a new entry
#[derive(Debug, Clone, Default)]
pub struct RecordOptions {
    pub date: Option<String>,
    pub tag: Option<String>,
    pub description: Option<String>,
    pub income: Option<String>,
    pub expense: Option<String>,
}

impl RecordOptions {
    pub fn present(&self) -> OptionSet {
        let mut set = OptionSet::default();
        set.push_if(self.date.is_some(), OptionName::Date);
        set.push_if(self.tag.is_some(), OptionName::Tag);
        set.push_if(self.description.is_some(), OptionName::Description);
        set.push_if(self.income.is_some(), OptionName::Income);
        set.push_if(self.expense.is_some(), OptionName::Expense);
        set
    }
}

/// Options for fetching entries into a report
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    pub tag: Option<String>,
    pub before: Option<String>,
    pub after: Option<String>,
    pub on: Option<String>,
    /// Only income entries
    pub income: bool,
    /// Only expense entries
    pub expense: bool,
    /// Both kinds, stated explicitly
    pub all: bool,
    pub sort_date: bool,
    pub sort_tag: bool,
    pub sort_amount: bool,
    pub descending: bool,
}

impl FetchOptions {
    /// Create an empty option set (every entry, insertion order)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn before(mut self, date: impl Into<String>) -> Self {
        self.before = Some(date.into());
        self
    }

    pub fn after(mut self, date: impl Into<String>) -> Self {
        self.after = Some(date.into());
        self
    }

    pub fn on(mut self, date: impl Into<String>) -> Self {
        self.on = Some(date.into());
        self
    }

    pub fn income(mut self) -> Self {
        self.income = true;
        self
    }

    pub fn expense(mut self) -> Self {
        self.expense = true;
        self
    }

    pub fn all(mut self) -> Self {
        self.all = true;
        self
    }

    pub fn sort_by_date(mut self) -> Self {
        self.sort_date = true;
        self
    }

    pub fn sort_by_tag(mut self) -> Self {
        self.sort_tag = true;
        self
    }

    pub fn sort_by_amount(mut self) -> Self {
        self.sort_amount = true;
        self
    }

    pub fn descending(mut self) -> Self {
        self.descending = true;
        self
    }

    pub fn present(&self) -> OptionSet {
        let mut set = OptionSet::default();
        set.push_if(self.tag.is_some(), OptionName::Tag);
        set.push_if(self.before.is_some(), OptionName::Before);
        set.push_if(self.after.is_some(), OptionName::After);
        set.push_if(self.on.is_some(), OptionName::On);
        set.push_if(self.income, OptionName::Income);
        set.push_if(self.expense, OptionName::Expense);
        set.push_if(self.all, OptionName::All);
        set.push_if(self.sort_date, OptionName::SortDate);
        set.push_if(self.sort_tag, OptionName::SortTag);
        set.push_if(self.sort_amount, OptionName::SortAmount);
        set.push_if(self.descending, OptionName::Descending);
        set
    }
}

/// Arguments of one replacement rule: which date, which old value, what new value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceArgs {
    pub date: String,
    pub old: String,
    pub new: String,
}

impl ReplaceArgs {
    pub fn new(date: impl Into<String>, old: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            old: old.into(),
            new: new.into(),
        }
    }
}

/// Options for updating entries; exactly one rule may be set
#[derive(Debug, Clone, Default)]
pub struct UpdateOptions {
    pub tag: Option<ReplaceArgs>,
    pub income: Option<ReplaceArgs>,
    pub expense: Option<ReplaceArgs>,
    pub description: Option<ReplaceArgs>,
}

impl UpdateOptions {
    pub fn present(&self) -> OptionSet {
        let mut set = OptionSet::default();
        set.push_if(self.tag.is_some(), OptionName::Tag);
        set.push_if(self.income.is_some(), OptionName::Income);
        set.push_if(self.expense.is_some(), OptionName::Expense);
        set.push_if(self.description.is_some(), OptionName::Description);
        set
    }
}

/// Options for deleting entries
#[derive(Debug, Clone, Default)]
pub struct DeleteOptions {
    pub tag: Option<String>,
    pub on: Option<String>,
    pub before: Option<String>,
    pub after: Option<String>,
    /// Income entries with this amount
    pub income: Option<String>,
    /// Expense entries with this amount
    pub expense: Option<String>,
    pub all: bool,
}

impl DeleteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn on(mut self, date: impl Into<String>) -> Self {
        self.on = Some(date.into());
        self
    }

    pub fn before(mut self, date: impl Into<String>) -> Self {
        self.before = Some(date.into());
        self
    }

    pub fn after(mut self, date: impl Into<String>) -> Self {
        self.after = Some(date.into());
        self
    }

    pub fn income(mut self, amount: impl Into<String>) -> Self {
        self.income = Some(amount.into());
        self
    }

    pub fn expense(mut self, amount: impl Into<String>) -> Self {
        self.expense = Some(amount.into());
        self
    }

    pub fn all(mut self) -> Self {
        self.all = true;
        self
    }

    pub fn present(&self) -> OptionSet {
        let mut set = OptionSet::default();
        set.push_if(self.tag.is_some(), OptionName::Tag);
        set.push_if(self.on.is_some(), OptionName::On);
        set.push_if(self.before.is_some(), OptionName::Before);
        set.push_if(self.after.is_some(), OptionName::After);
        set.push_if(self.income.is_some(), OptionName::Income);
        set.push_if(self.expense.is_some(), OptionName::Expense);
        set.push_if(self.all, OptionName::All);
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_follows_fields() {
        let opts = FetchOptions::new().tag("OUT").on("2021-01-01").sort_by_amount();
        let present = opts.present();
        assert_eq!(present.len(), 3);
        assert!(present.contains(OptionName::Tag));
        assert!(present.contains(OptionName::On));
        assert!(present.contains(OptionName::SortAmount));
        assert!(!present.contains(OptionName::Descending));
    }

    #[test]
    fn test_present_of_keeps_requested_order() {
        let present = DeleteOptions::new().after("2021-01-01").on("2021-01-05").present();
        assert_eq!(
            present.present_of(&[OptionName::On, OptionName::Before, OptionName::After]),
            vec![OptionName::On, OptionName::After]
        );
    }

    #[test]
    fn test_empty_sets() {
        assert!(RecordOptions::default().present().is_empty());
        assert!(UpdateOptions::default().present().is_empty());
        assert!(DeleteOptions::new().present().is_empty());
    }
}
