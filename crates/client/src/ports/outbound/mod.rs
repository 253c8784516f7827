//! Outbound ports - Interfaces for external services
//!
//! These ports define the contracts that infrastructure adapters must
//! implement, allowing the stores to interact with the host platform and
//! the authentication backend without depending on concrete implementations.

pub mod auth_api_port;
pub mod platform;

pub use auth_api_port::{ApiError, AuthApiPort, Credentials, Registration, TokenPair};
pub use platform::{storage_keys, LogProvider, StorageProvider, TimeProvider};
