//! Shopfront Core - Shared types library.
//!
//! This crate provides the types shared by the Shopfront components:
//! - `client` - Session store, cart store and navigation guard
//! - `cli` - Terminal front end driving the client
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no storage
//! access, no HTTP clients. Token decoding lives here because it is a pure
//! transformation of a string.
//!
//! # Modules
//!
//! - [`types`] - Identity, session, claims, cart and request payload types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
