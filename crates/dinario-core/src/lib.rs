//! dinario-core
//!
//! Business logic for Dinario: date ranges, metrics aggregation, the mutation
//! gateway, and the storage contracts backends implement.
//! Depends on dinario-domain. No terminal I/O, no direct filesystem access.

pub mod error;
pub mod format;
pub mod input;
pub mod memory;
pub mod metrics_service;
pub mod mutation_service;
pub mod storage;
pub mod time;

pub use error::CoreError;
pub use format::*;
pub use input::*;
pub use memory::MemoryStorage;
pub use metrics_service::*;
pub use mutation_service::*;
pub use storage::*;
pub use time::*;

#[cfg(test)]
mod tests;
