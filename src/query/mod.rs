//! Query construction
//!
//! Raw option sets go in, validated [`QueryDescriptor`]s come out. Nothing in
//! this module touches storage.

pub mod builder;
pub mod descriptor;
pub mod options;

pub use builder::{parse_amount, parse_date, QueryBuilder, Rule};
pub use descriptor::{
    Clause, Operation, Predicate, QueryDescriptor, Replacement, SortKey, SortOrder, SortSpec,
    UpdatePlan,
};
pub use options::{
    DeleteOptions, FetchOptions, OptionName, OptionSet, RecordOptions, ReplaceArgs, UpdateOptions,
};
