//! Port definitions for the client core.

pub mod outbound;
