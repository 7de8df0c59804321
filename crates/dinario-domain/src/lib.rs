//! dinario-domain
//!
//! Pure domain models (income, expenses, savings, configuration, movements).
//! No I/O, no storage, no clock. Only data types, validation, and ordering.

pub mod collection;
pub mod common;
pub mod movement;
pub mod period;
pub mod record;
pub mod settings;
pub mod summary;

pub use collection::*;
pub use common::*;
pub use movement::*;
pub use period::*;
pub use record::*;
pub use settings::*;
pub use summary::*;
