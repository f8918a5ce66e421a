//! Client-side state containers.

pub mod cart;
pub mod session;

pub use cart::CartStore;
pub use session::{SessionError, SessionStore};
