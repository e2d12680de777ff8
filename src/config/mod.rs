//! Configuration module for Engine-Sieve
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so a crawl of the stock catalog needs no file at all.
//!
//! # Example
//!
//! ```no_run
//! use engine_sieve::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sieve.toml")).unwrap();
//! println!("Artifact: {}", config.output.records_path);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    CatalogConfig, Config, CrawlerConfig, ImageConfig, OutputConfig, UserAgentConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
