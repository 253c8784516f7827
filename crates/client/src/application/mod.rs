//! Application layer: the state containers and their error types.

pub mod error;
pub mod stores;

pub use error::SessionError;
pub use stores::{PostEvent, PostStore, SessionEvent, SessionState, SessionStore};
