//! Configuration module for tiktok-collections.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Run mode (login vs guest)
//! - Configuration validation

pub mod loader;
pub mod modes;
pub mod validation;

pub use loader::{AccountConfig, ApiConfig, Config, OutputConfig, RateConfig};
pub use modes::RunMode;
pub use validation::{validate_config, validate_target};
