//! The two state containers that own all client-side state.
//!
//! Both stores follow the same contract: a view invokes an operation, the
//! store computes the new state under its lock, the persisted snapshot is
//! rewritten through the `StorageProvider` port, and subscribers are
//! notified so views can re-render.

mod post_store;
mod session_store;

pub use post_store::{PostEvent, PostStore};
pub use session_store::{SessionEvent, SessionState, SessionStore};
