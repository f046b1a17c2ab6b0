//! Storage layer for Inventory Console
//!
//! This crate provides the persistent key-value store and the credential
//! token store read by the local-token authentication policy.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod kv;
pub mod token;

pub use kv::{KvConfig, KvError, KvStore};
pub use token::{TokenStore, DEFAULT_TOKEN_KEY};
