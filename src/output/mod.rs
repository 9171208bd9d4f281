//! Output module for crawl reporting
//!
//! The crawl itself writes images through the persistence sink; this module
//! only summarizes a finished run.

mod report;

pub use report::{print_report, render_report, CrawlReport};
