//! Field validation engine.
//!
//! Provides the rule capability and result types, the either-or rule, and a
//! pure-logic evaluator that runs bound rules over one record.

pub mod either;
pub mod evaluator;
pub mod rules;
