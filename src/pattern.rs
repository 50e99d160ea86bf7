//! Pattern model: rules and their token-level constraints.
//!
//! A [`PatternRule`] is an ordered sequence of [`TokenElement`]s, each of
//! which constrains one token position. Rules are produced by an external
//! rule-definition loader and are read-only for the lifetime of a search.

pub mod element;
pub mod lookup;
pub mod rule;

pub use element::{ExceptionClause, TokenElement};
pub use lookup::{RuleSet, RuleSource, find_rule_by_id};
pub use rule::PatternRule;
