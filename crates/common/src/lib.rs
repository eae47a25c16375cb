//! Shared utilities, configuration, and error handling for the ArtCafe API
//!
//! - Configuration loaded once at startup from the environment
//! - The application error type and its HTTP mapping
//! - Request extractors shared by the domain routers

pub mod config;
pub mod error;
pub mod extractors;

pub use config::{Config, ConfigError};
pub use error::{Error, Result};
pub use extractors::{Pagination, ValidatedJson};
