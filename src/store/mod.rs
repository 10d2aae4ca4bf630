//! Session persistence — TTL-keyed storage behind the `SessionStore` trait.

pub mod libsql_backend;
pub mod memory;
pub mod traits;

pub use libsql_backend::LibSqlSessionStore;
pub use memory::MemorySessionStore;
pub use traits::SessionStore;
