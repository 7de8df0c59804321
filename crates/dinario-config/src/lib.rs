//! dinario-config
//!
//! Application preferences (data location, currency display, log filter)
//! and their JSON persistence. The tax-rate configuration record lives in
//! the finance store, not here.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::AppConfig;
