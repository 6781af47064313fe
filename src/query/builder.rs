//! Query builder
//!
//! Turns a sparse option set into exactly one descriptor, or an input error.
//! Which options may be combined is declared as data in the rule tables
//! below and checked before any value is parsed.

use chrono::NaiveDate;

use super::descriptor::{
    Clause, Operation, Predicate, QueryDescriptor, Replacement, SortKey, SortOrder, SortSpec,
    UpdatePlan,
};
use super::options::{
    DeleteOptions, FetchOptions, OptionName, OptionSet, RecordOptions, UpdateOptions,
};
use crate::config::Settings;
use crate::error::{PfimError, PfimResult};
use crate::models::entry::{validate_description, validate_tag};
use crate::models::{Amount, Entry, EntryKind};

use OptionName::*;

/// A constraint on which options may appear together
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// No two of these together
    AtMostOne(&'static [OptionName]),
    /// Exactly one of these
    ExactlyOne(&'static [OptionName]),
    /// At least one of these
    AtLeastOne(&'static [OptionName]),
    /// The first option cannot be combined with any of the others
    Excludes(OptionName, &'static [OptionName]),
    /// The first option needs one of the others
    Requires(OptionName, &'static [OptionName]),
}

const SORT_FLAGS: &[OptionName] = &[SortDate, SortTag, SortAmount];

pub const RECORD_RULES: &[Rule] = &[Rule::ExactlyOne(&[Income, Expense])];

pub const FETCH_RULES: &[Rule] = &[
    Rule::Excludes(On, &[Before, After]),
    Rule::AtMostOne(&[Income, Expense]),
    Rule::AtMostOne(SORT_FLAGS),
    Rule::Requires(Descending, SORT_FLAGS),
];

pub const UPDATE_RULES: &[Rule] = &[Rule::ExactlyOne(&[Tag, Income, Expense, Description])];

pub const DELETE_RULES: &[Rule] = &[
    Rule::Excludes(All, &[Tag, On, Before, After, Income, Expense]),
    Rule::Excludes(On, &[Before, After]),
    Rule::AtMostOne(&[Income, Expense]),
    Rule::AtLeastOne(&[All, Tag, On, Before, After, Income, Expense]),
];

impl Rule {
    /// Check the rule against the options present in a request
    pub fn check(&self, operation: Operation, present: &OptionSet) -> PfimResult<()> {
        match *self {
            Rule::AtMostOne(names) => {
                let given = present.present_of(names);
                if given.len() > 1 {
                    return Err(PfimError::conflict(operation.name(), given));
                }
            }
            Rule::ExactlyOne(names) => {
                let given = present.present_of(names);
                match given.len() {
                    0 => return Err(PfimError::missing(operation.name(), names.iter())),
                    1 => {}
                    _ => return Err(PfimError::conflict(operation.name(), given)),
                }
            }
            Rule::AtLeastOne(names) => {
                if present.present_of(names).is_empty() {
                    return Err(PfimError::missing(operation.name(), names.iter()));
                }
            }
            Rule::Excludes(name, others) => {
                let given = present.present_of(others);
                if present.contains(name) && !given.is_empty() {
                    let mut conflicting = vec![name];
                    conflicting.extend(given);
                    return Err(PfimError::conflict(operation.name(), conflicting));
                }
            }
            Rule::Requires(name, others) => {
                if present.contains(name) && present.present_of(others).is_empty() {
                    return Err(PfimError::Validation(format!(
                        "{}: {} needs one of {}",
                        operation,
                        name,
                        others
                            .iter()
                            .map(OptionName::label)
                            .collect::<Vec<_>>()
                            .join(", ")
                    )));
                }
            }
        }
        Ok(())
    }
}

fn check_rules(operation: Operation, rules: &[Rule], present: &OptionSet) -> PfimResult<()> {
    rules.iter().try_for_each(|rule| rule.check(operation, present))
}

/// Parse a calendar date; only the unambiguous `YYYY-MM-DD` form is accepted
pub fn parse_date(s: &str) -> PfimResult<NaiveDate> {
    let s = s.trim();
    let bytes = s.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !shaped {
        return Err(PfimError::InvalidDate(s.to_string()));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| PfimError::InvalidDate(s.to_string()))
}

/// Parse a non-negative amount
pub fn parse_amount(s: &str) -> PfimResult<Amount> {
    Amount::parse(s).map_err(|_| PfimError::InvalidAmount(s.trim().to_string()))
}

fn parse_tag(s: &str) -> PfimResult<String> {
    let tag = s.trim();
    validate_tag(tag).map_err(|e| PfimError::Validation(e.to_string()))?;
    Ok(tag.to_string())
}

fn parse_description(s: &str) -> PfimResult<String> {
    validate_description(s).map_err(|e| PfimError::Validation(e.to_string()))?;
    Ok(s.to_string())
}

/// Builds descriptors from option sets
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    today: NaiveDate,
    default_tag: String,
}

impl QueryBuilder {
    /// Create a builder; `today` is the date given to entries recorded without one
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            default_tag: "N/A".to_string(),
        }
    }

    /// Create a builder using the configured default tag
    pub fn from_settings(settings: &Settings, today: NaiveDate) -> Self {
        Self::new(today).with_default_tag(settings.default_tag.clone())
    }

    pub fn with_default_tag(mut self, tag: impl Into<String>) -> Self {
        self.default_tag = tag.into();
        self
    }

    /// Build the entry an ADD request inserts
    pub fn build_record(&self, opts: &RecordOptions) -> PfimResult<Entry> {
        check_rules(Operation::Add, RECORD_RULES, &opts.present())?;

        let (kind, raw_amount) = match (&opts.income, &opts.expense) {
            (Some(amount), None) => (EntryKind::Earned, amount),
            (None, Some(amount)) => (EntryKind::Spent, amount),
            // ExactlyOne above
            _ => return Err(PfimError::missing(Operation::Add.name(), [Income, Expense])),
        };
        let amount = parse_amount(raw_amount)?;

        let date = match &opts.date {
            Some(raw) => parse_date(raw)?,
            None => self.today,
        };

        let tag = match opts.tag.as_deref().map(str::trim) {
            Some(tag) if !tag.is_empty() => parse_tag(tag)?,
            _ => self.default_tag.clone(),
        };

        let description = match &opts.description {
            Some(text) => parse_description(text.trim())?,
            None => String::new(),
        };

        Ok(Entry::new(date, tag, kind, description, amount))
    }

    /// Build the descriptor of a report
    pub fn build_fetch(&self, opts: &FetchOptions) -> PfimResult<QueryDescriptor> {
        let present = opts.present();
        check_rules(Operation::Fetch, FETCH_RULES, &present)?;

        let on = opts.on.as_deref().map(parse_date).transpose()?;
        let after = opts.after.as_deref().map(parse_date).transpose()?;
        let before = opts.before.as_deref().map(parse_date).transpose()?;

        let mut predicate = Predicate::everything();
        if let Some(tag) = &opts.tag {
            predicate = predicate.and(Clause::Tag(parse_tag(tag)?));
        }
        // `all` adds no restriction of its own
        if opts.income {
            predicate = predicate.and(Clause::Kind(EntryKind::Earned));
        } else if opts.expense {
            predicate = predicate.and(Clause::Kind(EntryKind::Spent));
        }
        if let Some(date) = on {
            predicate = predicate.and(Clause::On(date));
        }
        if let Some(date) = after {
            predicate = predicate.and(Clause::After(date));
        }
        if let Some(date) = before {
            predicate = predicate.and(Clause::Before(date));
        }

        let mut descriptor = QueryDescriptor::new(Operation::Fetch, predicate);

        let key = if opts.sort_date {
            Some(SortKey::Date)
        } else if opts.sort_tag {
            Some(SortKey::Tag)
        } else if opts.sort_amount {
            Some(SortKey::Amount)
        } else {
            None
        };
        if let Some(key) = key {
            let order = if opts.descending {
                SortOrder::Descending
            } else {
                SortOrder::Ascending
            };
            descriptor = descriptor.sorted(SortSpec::new(key, order));
        }

        Ok(descriptor)
    }

    /// Build the descriptor and replacement of an update
    pub fn build_update(&self, opts: &UpdateOptions) -> PfimResult<UpdatePlan> {
        check_rules(Operation::Update, UPDATE_RULES, &opts.present())?;

        let (predicate, replacement) = if let Some(args) = &opts.tag {
            let date = parse_date(&args.date)?;
            let old = parse_tag(&args.old)?;
            let new = parse_tag(&args.new)?;
            (
                Predicate::everything()
                    .and(Clause::On(date))
                    .and(Clause::Tag(old)),
                Replacement::Tag(new),
            )
        } else if let Some((kind, args)) = opts
            .income
            .as_ref()
            .map(|a| (EntryKind::Earned, a))
            .or_else(|| opts.expense.as_ref().map(|a| (EntryKind::Spent, a)))
        {
            let date = parse_date(&args.date)?;
            let old = parse_amount(&args.old)?;
            let new = parse_amount(&args.new)?;
            (
                Predicate::everything()
                    .and(Clause::On(date))
                    .and(Clause::Kind(kind))
                    .and(Clause::Amount(old)),
                Replacement::Amount(new),
            )
        } else if let Some(args) = &opts.description {
            let date = parse_date(&args.date)?;
            let old = parse_description(&args.old)?;
            let new = parse_description(&args.new)?;
            (
                Predicate::everything()
                    .and(Clause::On(date))
                    .and(Clause::Description(old)),
                Replacement::Description(new),
            )
        } else {
            // ExactlyOne above
            return Err(PfimError::missing(
                Operation::Update.name(),
                [Tag, Income, Expense, Description],
            ));
        };

        Ok(UpdatePlan {
            descriptor: QueryDescriptor::new(Operation::Update, predicate),
            replacement,
        })
    }

    /// Build the descriptor of a delete
    pub fn build_delete(&self, opts: &DeleteOptions) -> PfimResult<QueryDescriptor> {
        check_rules(Operation::Delete, DELETE_RULES, &opts.present())?;

        if opts.all {
            return Ok(QueryDescriptor::new(
                Operation::Delete,
                Predicate::everything(),
            ));
        }

        let on = opts.on.as_deref().map(parse_date).transpose()?;
        let after = opts.after.as_deref().map(parse_date).transpose()?;
        let before = opts.before.as_deref().map(parse_date).transpose()?;

        let mut predicate = Predicate::everything();
        if let Some(tag) = &opts.tag {
            predicate = predicate.and(Clause::Tag(parse_tag(tag)?));
        }
        if let Some(amount) = &opts.income {
            predicate = predicate
                .and(Clause::Kind(EntryKind::Earned))
                .and(Clause::Amount(parse_amount(amount)?));
        }
        if let Some(amount) = &opts.expense {
            predicate = predicate
                .and(Clause::Kind(EntryKind::Spent))
                .and(Clause::Amount(parse_amount(amount)?));
        }
        if let Some(date) = on {
            predicate = predicate.and(Clause::On(date));
        }
        if let Some(date) = after {
            predicate = predicate.and(Clause::After(date));
        }
        if let Some(date) = before {
            predicate = predicate.and(Clause::Before(date));
        }

        Ok(QueryDescriptor::new(Operation::Delete, predicate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntryId, StoredEntry};
    use crate::query::options::ReplaceArgs;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn builder() -> QueryBuilder {
        QueryBuilder::new(date(2022, 3, 14))
    }

    fn sample() -> Vec<StoredEntry> {
        let rows = [
            (2021, 1, 1, "OUT", EntryKind::Spent, 7500),
            (2021, 1, 2, "PWM", EntryKind::Earned, 27500),
            (2021, 1, 2, "OUT", EntryKind::Spent, 1200),
            (2021, 2, 10, "FOOD", EntryKind::Spent, 4300),
            (2021, 3, 5, "PWM", EntryKind::Earned, 27500),
            (2021, 3, 5, "OUT", EntryKind::Earned, 900),
        ];
        rows.iter()
            .enumerate()
            .map(|(i, (y, m, d, tag, kind, cents))| {
                StoredEntry::new(
                    EntryId::new(i as i64 + 1),
                    Entry::new(date(*y, *m, *d), *tag, *kind, "", Amount::from_cents(*cents)),
                )
            })
            .collect()
    }

    #[test]
    fn test_parse_date_strict() {
        assert_eq!(parse_date("2021-12-26").unwrap(), date(2021, 12, 26));
        assert!(parse_date("2021-2-3").is_err());
        assert!(parse_date("26/12/2021").is_err());
        assert!(parse_date("2021-02-30").is_err());
        assert!(parse_date("+2021-01-01").is_err());
        assert!(matches!(
            parse_date("yesterday"),
            Err(PfimError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_record_defaults() {
        let opts = RecordOptions {
            expense: Some("75.00".into()),
            ..Default::default()
        };
        let entry = builder().build_record(&opts).unwrap();
        assert_eq!(entry.kind, EntryKind::Spent);
        assert_eq!(entry.tag, "N/A");
        assert_eq!(entry.date, date(2022, 3, 14));
        assert_eq!(entry.amount.cents(), 7500);
        assert_eq!(entry.description, "");
    }

    #[test]
    fn test_record_blank_tag_uses_configured_default() {
        let opts = RecordOptions {
            tag: Some("   ".into()),
            income: Some("10".into()),
            ..Default::default()
        };
        let entry = builder()
            .with_default_tag("MISC")
            .build_record(&opts)
            .unwrap();
        assert_eq!(entry.tag, "MISC");
        assert_eq!(entry.kind, EntryKind::Earned);
    }

    #[test]
    fn test_record_requires_exactly_one_amount() {
        let neither = RecordOptions::default();
        assert!(matches!(
            builder().build_record(&neither),
            Err(PfimError::MissingOption { .. })
        ));

        let both = RecordOptions {
            income: Some("1".into()),
            expense: Some("2".into()),
            ..Default::default()
        };
        let err = builder().build_record(&both).unwrap_err();
        match err {
            PfimError::ConflictingOptions { options, .. } => {
                assert_eq!(options, vec!["income", "expense"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_record_rejects_bad_values() {
        let bad_date = RecordOptions {
            date: Some("2021-13-01".into()),
            income: Some("1".into()),
            ..Default::default()
        };
        assert!(matches!(
            builder().build_record(&bad_date),
            Err(PfimError::InvalidDate(_))
        ));

        let negative = RecordOptions {
            expense: Some("-5".into()),
            ..Default::default()
        };
        assert!(matches!(
            builder().build_record(&negative),
            Err(PfimError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_fetch_without_options_is_everything_in_insertion_order() {
        let descriptor = builder().build_fetch(&FetchOptions::new()).unwrap();
        assert_eq!(descriptor.operation, Operation::Fetch);
        assert!(descriptor.predicate.is_everything());
        assert!(descriptor.sort.is_none());
    }

    #[test]
    fn test_fetch_on_conflicts_with_range() {
        let err = builder()
            .build_fetch(&FetchOptions::new().on("2021-01-01").before("2021-02-01"))
            .unwrap_err();
        match err {
            PfimError::ConflictingOptions { options, .. } => {
                assert_eq!(options, vec!["on-date", "before-date"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_fetch_multiple_sort_flags_rejected() {
        let result = builder().build_fetch(&FetchOptions::new().sort_by_date().sort_by_amount());
        assert!(matches!(result, Err(PfimError::ConflictingOptions { .. })));
    }

    #[test]
    fn test_fetch_kind_flags_exclusive() {
        let err = builder()
            .build_fetch(&FetchOptions::new().income().expense())
            .unwrap_err();
        match err {
            PfimError::ConflictingOptions { options, .. } => {
                assert_eq!(options, vec!["income", "expense"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_fetch_all_composes_with_kind() {
        let data = sample();
        let with_all = builder()
            .build_fetch(&FetchOptions::new().income().all())
            .unwrap();
        let income_only = builder().build_fetch(&FetchOptions::new().income()).unwrap();
        assert_eq!(with_all, income_only);
        assert!(with_all
            .apply(data.clone())
            .iter()
            .all(|e| e.entry.kind == EntryKind::Earned));

        let everything = builder().build_fetch(&FetchOptions::new().all()).unwrap();
        assert!(everything.predicate.is_everything());
        assert_eq!(everything.apply(data.clone()).len(), data.len());
    }

    #[test]
    fn test_fetch_descending_needs_sort_key() {
        let result = builder().build_fetch(&FetchOptions::new().descending());
        assert!(matches!(result, Err(PfimError::Validation(_))));

        let descriptor = builder()
            .build_fetch(&FetchOptions::new().sort_by_tag().descending())
            .unwrap();
        assert_eq!(
            descriptor.sort,
            Some(SortSpec::new(SortKey::Tag, SortOrder::Descending))
        );
    }

    #[test]
    fn test_fetch_range_without_days_selects_nothing() {
        let data = sample();
        let adjacent = builder()
            .build_fetch(&FetchOptions::new().after("2021-01-01").before("2021-01-02"))
            .unwrap();
        assert!(adjacent.apply(data.clone()).is_empty());

        let inverted = builder()
            .build_fetch(&FetchOptions::new().after("2021-03-01").before("2021-01-01"))
            .unwrap();
        assert!(inverted.apply(data.clone()).is_empty());

        let one_day = builder()
            .build_fetch(&FetchOptions::new().after("2021-01-01").before("2021-01-03"))
            .unwrap();
        assert_eq!(one_day.apply(data).len(), 2);
    }

    #[test]
    fn test_delete_inverted_range_is_accepted() {
        let descriptor = builder()
            .build_delete(&DeleteOptions::new().after("2021-03-01").before("2021-01-01"))
            .unwrap();
        assert_eq!(
            descriptor.predicate.clauses(),
            &[
                Clause::After(date(2021, 3, 1)),
                Clause::Before(date(2021, 1, 1))
            ]
        );
        assert!(descriptor.apply(sample()).is_empty());
    }

    #[test]
    fn test_fetch_malformed_date_rejected_before_building() {
        let result = builder().build_fetch(&FetchOptions::new().tag("OUT").after("01-01-2021"));
        assert!(matches!(result, Err(PfimError::InvalidDate(_))));
    }

    #[test]
    fn test_fetch_filters_compose_with_and() {
        let data = sample();
        let cases: Vec<(FetchOptions, FetchOptions, FetchOptions)> = vec![
            (
                FetchOptions::new().tag("OUT").expense(),
                FetchOptions::new().tag("OUT"),
                FetchOptions::new().expense(),
            ),
            (
                FetchOptions::new().tag("PWM").after("2021-01-01"),
                FetchOptions::new().tag("PWM"),
                FetchOptions::new().after("2021-01-01"),
            ),
            (
                FetchOptions::new().income().on("2021-03-05"),
                FetchOptions::new().income(),
                FetchOptions::new().on("2021-03-05"),
            ),
            (
                FetchOptions::new().after("2021-01-01").before("2021-03-01"),
                FetchOptions::new().after("2021-01-01"),
                FetchOptions::new().before("2021-03-01"),
            ),
        ];

        for (combined, first, second) in cases {
            let combined = builder().build_fetch(&combined).unwrap();
            let first = builder().build_fetch(&first).unwrap();
            let second = builder().build_fetch(&second).unwrap();

            let at_once = combined.apply(data.clone());
            let in_turn = second.apply(first.apply(data.clone()));
            assert_eq!(at_once, in_turn);
        }
    }

    #[test]
    fn test_update_tag_rule() {
        let opts = UpdateOptions {
            tag: Some(ReplaceArgs::new("2021-01-01", "OUT", "LEISURE")),
            ..Default::default()
        };
        let plan = builder().build_update(&opts).unwrap();
        assert_eq!(plan.descriptor.operation, Operation::Update);
        assert_eq!(
            plan.descriptor.predicate.clauses(),
            &[Clause::On(date(2021, 1, 1)), Clause::Tag("OUT".into())]
        );
        assert_eq!(plan.replacement, Replacement::Tag("LEISURE".into()));
    }

    #[test]
    fn test_update_amount_rule_is_scoped_to_kind() {
        let opts = UpdateOptions {
            expense: Some(ReplaceArgs::new("2021-01-01", "75", "80.50")),
            ..Default::default()
        };
        let plan = builder().build_update(&opts).unwrap();
        assert!(plan
            .descriptor
            .predicate
            .clauses()
            .contains(&Clause::Kind(EntryKind::Spent)));
        assert_eq!(plan.replacement, Replacement::Amount(Amount::from_cents(8050)));
    }

    #[test]
    fn test_update_exactly_one_rule() {
        assert!(matches!(
            builder().build_update(&UpdateOptions::default()),
            Err(PfimError::MissingOption { .. })
        ));

        let two = UpdateOptions {
            tag: Some(ReplaceArgs::new("2021-01-01", "A", "B")),
            description: Some(ReplaceArgs::new("2021-01-01", "x", "y")),
            ..Default::default()
        };
        assert!(matches!(
            builder().build_update(&two),
            Err(PfimError::ConflictingOptions { .. })
        ));
    }

    #[test]
    fn test_delete_all_is_alone() {
        let descriptor = builder().build_delete(&DeleteOptions::new().all()).unwrap();
        assert!(descriptor.predicate.is_everything());

        let err = builder()
            .build_delete(&DeleteOptions::new().all().tag("OUT"))
            .unwrap_err();
        match err {
            PfimError::ConflictingOptions { options, .. } => {
                assert_eq!(options, vec!["all", "tag"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_delete_needs_a_target() {
        assert!(matches!(
            builder().build_delete(&DeleteOptions::new()),
            Err(PfimError::MissingOption { .. })
        ));
    }

    #[test]
    fn test_delete_amount_for_kind() {
        let descriptor = builder()
            .build_delete(&DeleteOptions::new().expense("75.00"))
            .unwrap();
        let matched = descriptor.apply(sample());
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].entry.tag, "OUT");

        assert!(builder()
            .build_delete(&DeleteOptions::new().expense("1").income("1"))
            .is_err());
    }
}
