//! Configuration module for FAExport
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use faexport::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("faexport.toml")).unwrap();
//! println!("Pages are cached for {}s", config.cache.fetch_ttl);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{AuthConfig, CacheBackend, CacheConfig, Config, CrawlerConfig, SiteConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
