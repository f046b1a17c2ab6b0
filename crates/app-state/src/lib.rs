//! Application state for Inventory Console
//!
//! This crate exposes the authentication signal consumed by the navigation
//! guard. The signal is produced by an [`AuthProvider`]; two providers ship
//! with the console:
//!
//! - [`RemoteAuthProvider`] - asks the backend's status endpoint, with the
//!   session cookies attached
//! - [`LocalTokenProvider`] - looks for a persisted credential token

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod auth;
pub mod local_token;
pub mod remote;

pub use auth::{AuthCheckError, AuthProvider, AuthSignal, DenialReason};
pub use local_token::LocalTokenProvider;
pub use remote::RemoteAuthProvider;
