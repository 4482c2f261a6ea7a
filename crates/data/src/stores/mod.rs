//! Symbol universe backends.

pub mod file;
pub mod memory;
pub mod postgres;

pub use file::FileSymbolStore;
pub use memory::MemorySymbolStore;
pub use postgres::PgSymbolStore;
