//! REST API client module for the classbook backend.
//!
//! This module provides the `ApiClient` for talking to the backend over
//! JSON-over-HTTP with bearer token authentication. The token is read from
//! the injected session store on every call; a 401 response clears that
//! store and surfaces as `ApiError::SessionExpired` for the application
//! shell to react to.

pub mod client;
pub mod error;

pub use client::{ApiClient, ResponseBody};
pub use error::ApiError;
