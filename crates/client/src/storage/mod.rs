//! Durable key-value storage.
//!
//! The session survives restarts by writing two string entries (see [`keys`]).
//! Storage is synchronous and process-local. Implementations never surface
//! I/O failures: a value that cannot be read is reported as absent, and a
//! write that fails is logged and dropped.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Keys written by the session store.
pub mod keys {
    /// Raw access token.
    pub const TOKEN: &str = "token";
    /// JSON-encoded `SessionUser`.
    pub const USER: &str = "user";
}

/// Synchronous string key-value storage.
pub trait Storage: Send + Sync {
    /// Read a value, `None` if absent or unreadable.
    fn get_item(&self, key: &str) -> Option<String>;

    fn set_item(&self, key: &str, value: &str);

    fn remove_item(&self, key: &str);
}
