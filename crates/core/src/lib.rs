//! Either-or form field validation.
//!
//! Provides the [`Record`](record::Record) capability a host exposes for one
//! form submission, the [`EitherRule`](validation::either::EitherRule) that
//! requires at least one of several fields to be filled, message formatting,
//! and a client-side mirror of the same check.

pub mod client;
pub mod error;
pub mod i18n;
pub mod record;
pub mod types;
pub mod validation;
