//! Graph store and cache implementations.
//!
//! Available backends:
//! - `MemoryGraphStore` - In-memory graph storage (always available)
//! - `PostgresGraphStore` - PostgreSQL + pgvector storage (requires `postgres` feature)
//! - `MemoryMindMapCache` - Latest-result cache (always available)

pub mod cache;
pub mod memory;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use cache::MemoryMindMapCache;
pub use memory::MemoryGraphStore;

#[cfg(feature = "postgres")]
pub use postgres::PostgresGraphStore;
