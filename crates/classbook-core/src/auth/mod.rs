//! Session management for the signed-in user.
//!
//! This module provides:
//! - `SessionStore`: the injectable persistence abstraction the API client
//!   reads its bearer token from
//! - `FileSessionStore`: durable storage surviving process restarts
//! - `MemorySessionStore`: an in-process store for tests and ephemeral runs
//!
//! A session is created at login, read on every API call, and destroyed on
//! logout or when the backend rejects the token.

pub mod session;

pub use session::{FileSessionStore, MemorySessionStore, SessionStore};
