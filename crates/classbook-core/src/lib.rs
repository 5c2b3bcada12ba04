//! Core library for the classbook client.
//!
//! classbook talks to an education-management REST backend (classes,
//! materials, quizzes, assessments) on behalf of a signed-in teacher or
//! student. This crate holds the pieces every frontend shares:
//!
//! - [`auth`]: the session store - durable token and profile persistence
//! - [`api`]: the authenticated HTTP client and its error taxonomy
//! - [`models`]: wire-format data types
//! - [`config`]: configuration file and base-URL resolution

pub mod api;
pub mod auth;
pub mod config;
pub mod models;

pub use api::{ApiClient, ApiError, ResponseBody};
pub use auth::{FileSessionStore, MemorySessionStore, SessionStore};
pub use config::Config;
