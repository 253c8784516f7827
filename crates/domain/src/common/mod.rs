//! Shared helpers used across domain types.

mod datetime;

pub use datetime::{parse_datetime, parse_datetime_or};
