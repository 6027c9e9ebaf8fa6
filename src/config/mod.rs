//! Configuration module for Link-Racer
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! A configuration file is optional: `Config::default()` is a valid configuration.
//!
//! # Example
//!
//! ```no_run
//! use link_racer::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("racer.toml")).unwrap();
//! println!("Searching with {} workers", config.search.workers);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, FetcherConfig, LinksConfig, SearchConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};

pub use validation::validate;
