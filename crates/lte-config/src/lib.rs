//! Configuration management for the LTE FDD base-station stack
//!
//! - TOML configuration file parsing
//! - Stack configuration structures

pub mod stack_config;
pub mod toml_config;

pub use stack_config::*;
pub use toml_config::*;
