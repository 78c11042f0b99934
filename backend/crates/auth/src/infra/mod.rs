//! Infrastructure Layer
//!
//! Directory and session-store implementations.

pub mod memory;
pub mod session_cache;

pub use memory::MemoryDirectory;
pub use session_cache::CacheSessionStore;
