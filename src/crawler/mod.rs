//! Crawler module for listing page fetching and image persistence
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with a fixed identity and timeout
//! - HTML parsing and cover image selection
//! - Idempotent image persistence
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod page;
mod parser;
mod sink;

pub use coordinator::{run_crawl, Coordinator};
pub use fetcher::{build_http_client, fetch_bytes, fetch_text};
pub use page::PageRequest;
pub use parser::{extract_image_references, ImageReference, ImageStrategy, PageSelectors};
pub use sink::{PersistenceSink, SaveOutcome};

use crate::config::Config;
use crate::output::CrawlReport;
use crate::Result;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Validate the configuration and create the output directory
/// 2. Build the HTTP client
/// 3. Fetch each listing page in the configured range
/// 4. Save one cover image per content item, skipping existing files
/// 5. Return a report of what happened
///
/// # Returns
///
/// * `Ok(CrawlReport)` - The crawl ran to the end of its page range
/// * `Err(GrabError)` - The crawl could not start
pub async fn crawl(config: Config) -> Result<CrawlReport> {
    run_crawl(config).await
}
