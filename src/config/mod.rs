//! Configuration module for cover-grab
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! A crawl can also run from [`Config::default`], which targets film-grab.com
//! listing pages 2 through 62.
//!
//! # Example
//!
//! ```no_run
//! use cover_grab::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("cover-grab.toml")).unwrap();
//! println!("Saving covers to: {}", config.output.directory.display());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, OutputConfig, SelectorConfig, SiteConfig, DEFAULT_BASE_URL,
    DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;

pub(crate) use validation::compile_selector;
