//! Rendering of query descriptors to SQL
//!
//! Values are always bound as parameters. Placeholders are positional (`?`)
//! and the parameter list is in placeholder order.

use rusqlite::types::Value;

use crate::models::Amount;
use crate::query::{Clause, Predicate, Replacement, SortKey, SortOrder, SortSpec};

/// Columns selected for every fetched row
pub const ENTRY_COLUMNS: &str = "id, date, tag, kind, description, amount";

/// Amount comparisons are made on rounded hundredths
const AMOUNT_CENTS: &str = "CAST(ROUND(amount * 100) AS INTEGER)";

/// A rendered SQL fragment and its bound values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fragment {
    pub sql: String,
    pub params: Vec<Value>,
}

pub(crate) fn date_value(date: chrono::NaiveDate) -> Value {
    Value::Text(date.format("%Y-%m-%d").to_string())
}

fn cents_value(amount: Amount) -> Value {
    Value::Integer(amount.cents() as i64)
}

fn clause(clause: &Clause) -> (String, Value) {
    let (condition, value) = match clause {
        Clause::Tag(tag) => ("tag = ?", Value::Text(tag.clone())),
        Clause::Kind(kind) => ("kind = ?", Value::Text(kind.code().to_string())),
        Clause::On(date) => ("date = ?", date_value(*date)),
        Clause::Before(date) => ("date < ?", date_value(*date)),
        Clause::After(date) => ("date > ?", date_value(*date)),
        Clause::Amount(amount) => return (format!("{} = ?", AMOUNT_CENTS), cents_value(*amount)),
        Clause::Description(text) => ("description = ?", Value::Text(text.clone())),
    };
    (condition.to_string(), value)
}

/// Render a predicate as ` WHERE ...`, or nothing for the empty predicate
pub fn where_clause(predicate: &Predicate) -> Fragment {
    if predicate.is_everything() {
        return Fragment::default();
    }

    let (conditions, params): (Vec<_>, Vec<_>) = predicate.clauses().iter().map(clause).unzip();
    Fragment {
        sql: format!(" WHERE {}", conditions.join(" AND ")),
        params,
    }
}

/// Render ` ORDER BY ...`; ties and unsorted fetches fall back to insertion order
pub fn order_by(sort: Option<&SortSpec>) -> String {
    let Some(sort) = sort else {
        return " ORDER BY id ASC".to_string();
    };

    let column = match sort.key {
        SortKey::Date => "date",
        SortKey::Tag => "tag",
        SortKey::Amount => AMOUNT_CENTS,
    };
    let direction = match sort.order {
        SortOrder::Ascending => "ASC",
        SortOrder::Descending => "DESC",
    };
    format!(" ORDER BY {} {}, id ASC", column, direction)
}

/// Render the `SET` list of an update
pub fn set_clause(replacement: &Replacement) -> Fragment {
    let (sql, value) = match replacement {
        Replacement::Tag(tag) => ("tag = ?", Value::Text(tag.clone())),
        Replacement::Amount(amount) => ("amount = ?", Value::Real(amount.as_f64())),
        Replacement::Description(text) => ("description = ?", Value::Text(text.clone())),
    };
    Fragment {
        sql: sql.to_string(),
        params: vec![value],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntryKind;
    use chrono::NaiveDate;

    #[test]
    fn test_empty_predicate_has_no_where() {
        let fragment = where_clause(&Predicate::everything());
        assert!(fragment.sql.is_empty());
        assert!(fragment.params.is_empty());
    }

    #[test]
    fn test_where_binds_every_value() {
        let predicate = Predicate::everything()
            .and(Clause::Tag("OUT'; DROP TABLE entries; --".into()))
            .and(Clause::Kind(EntryKind::Spent))
            .and(Clause::After(NaiveDate::from_ymd_opt(2021, 1, 1).unwrap()))
            .and(Clause::Amount(Amount::from_cents(7500)));
        let fragment = where_clause(&predicate);

        assert_eq!(
            fragment.sql,
            " WHERE tag = ? AND kind = ? AND date > ? AND CAST(ROUND(amount * 100) AS INTEGER) = ?"
        );
        assert_eq!(
            fragment.params,
            vec![
                Value::Text("OUT'; DROP TABLE entries; --".into()),
                Value::Text("S".into()),
                Value::Text("2021-01-01".into()),
                Value::Integer(7500),
            ]
        );
    }

    #[test]
    fn test_order_by_always_ends_with_id() {
        assert_eq!(order_by(None), " ORDER BY id ASC");
        assert_eq!(
            order_by(Some(&SortSpec::new(SortKey::Tag, SortOrder::Descending))),
            " ORDER BY tag DESC, id ASC"
        );
    }

    #[test]
    fn test_set_clause() {
        let fragment = set_clause(&Replacement::Amount(Amount::from_cents(8050)));
        assert_eq!(fragment.sql, "amount = ?");
        assert_eq!(fragment.params, vec![Value::Real(80.5)]);
    }
}
