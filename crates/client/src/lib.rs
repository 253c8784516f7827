//! Postdeck client core.
//!
//! Two state containers — [`application::stores::SessionStore`] and
//! [`application::stores::PostStore`] — own all client-side state, persist
//! snapshots through the [`ports::outbound::StorageProvider`] port, and call
//! the authentication backend through [`ports::outbound::AuthApiPort`].
//! Infrastructure adapters bind those ports to the host platform (file
//! storage + reqwest on desktop, localStorage + gloo-net in the browser).

pub mod application;
pub mod infrastructure;
pub mod ports;
pub mod state;
