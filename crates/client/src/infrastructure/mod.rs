//! Infrastructure adapters binding the outbound ports to the host platform.

pub mod auth;
pub mod platform;
