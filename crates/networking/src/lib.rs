//! Networking utilities for Inventory Console
//!
//! This crate provides the HTTP client used to talk to the console backend
//! and the authentication status request consumed by the navigation guard.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod auth_status;
pub mod client;

pub use auth_status::{AuthStatusClient, AuthStatusResponse, AUTH_STATUS_PATH};
pub use client::{HttpClient, HttpClientConfig, HttpError, HttpResponse};
