//! State tracking module
//!
//! This module defines the crawl driver's lifecycle.

mod crawl_state;

pub use crawl_state::CrawlState;
