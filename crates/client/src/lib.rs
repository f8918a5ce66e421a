//! Shopfront client library.
//!
//! Client-side session handling for the Shopfront storefront API:
//!
//! - [`stores::SessionStore`] - access token and decoded identity, persisted
//!   to durable storage
//! - [`stores::CartStore`] - cart lines fetched from the API
//! - [`router`] - route table and the navigation guard that gates it
//! - [`state::AppContext`] - owns all of the above; pass it where needed
//!   instead of reaching for globals
//!
//! The HTTP API and durable storage sit behind the [`api::Api`] and
//! [`storage::Storage`] traits so stores can be exercised without a network.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod router;
pub mod state;
pub mod storage;
pub mod stores;

#[cfg(test)]
pub(crate) mod testing;
