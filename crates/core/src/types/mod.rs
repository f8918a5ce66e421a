//! Core types for Shopfront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod auth;
pub mod cart;
pub mod claims;
pub mod email;
pub mod id;
pub mod lenient;
pub mod session;
pub mod token;

pub use auth::{Credentials, ProfileUpdate, RegisterPayload};
pub use cart::CartItem;
pub use claims::{Claims, DecodeError, decode_claims};
pub use email::{Email, EmailError};
pub use id::UserId;
pub use lenient::is_truthy;
pub use session::{Session, SessionUser};
pub use token::AccessToken;
