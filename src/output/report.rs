//! Crawl report generation
//!
//! This module collects what happened during a crawl and renders it as a
//! human-readable summary.

use crate::crawler::SaveOutcome;
use chrono::{DateTime, Utc};
use std::fmt::Write;
use std::path::PathBuf;

/// Summary of one crawl run
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// When the first page was requested
    pub started_at: DateTime<Utc>,

    /// When the last page finished, set by [`CrawlReport::finish`]
    pub finished_at: Option<DateTime<Utc>>,

    /// Listing pages visited, successful or not
    pub pages_attempted: u32,

    /// Listing pages whose fetch failed, in crawl order
    pub failed_pages: Vec<u32>,

    /// Image references found across all pages
    pub images_found: u64,

    /// Images newly written
    pub saved: u64,

    /// Images already on disk
    pub skipped: u64,

    /// Images that could not be downloaded or written
    pub failed_downloads: u64,

    /// Where images were written
    pub output_directory: PathBuf,
}

impl CrawlReport {
    pub fn new(output_directory: impl Into<PathBuf>) -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            pages_attempted: 0,
            failed_pages: Vec::new(),
            images_found: 0,
            saved: 0,
            skipped: 0,
            failed_downloads: 0,
            output_directory: output_directory.into(),
        }
    }

    pub fn record_page(&mut self) {
        self.pages_attempted += 1;
    }

    pub fn record_failed_page(&mut self, page: u32) {
        self.failed_pages.push(page);
    }

    pub fn record_images_found(&mut self, count: usize) {
        self.images_found += count as u64;
    }

    pub fn record_outcome(&mut self, outcome: SaveOutcome) {
        match outcome {
            SaveOutcome::Saved => self.saved += 1,
            SaveOutcome::Skipped => self.skipped += 1,
            SaveOutcome::Failed => self.failed_downloads += 1,
        }
    }

    /// Stamps the finish time
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn pages_succeeded(&self) -> u32 {
        self.pages_attempted - self.failed_pages.len() as u32
    }

    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }
}

/// Renders a report as plain text
pub fn render_report(report: &CrawlReport) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "=== Crawl Report ===\n");
    let _ = writeln!(out, "Started:  {}", report.started_at.to_rfc3339());
    if let Some(finished) = report.finished_at {
        let _ = writeln!(out, "Finished: {}", finished.to_rfc3339());
    }
    if let Some(secs) = report.duration_seconds() {
        let _ = writeln!(out, "Duration: {}s", secs);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Pages:");
    let _ = writeln!(out, "  Attempted: {}", report.pages_attempted);
    let _ = writeln!(out, "  Succeeded: {}", report.pages_succeeded());
    if !report.failed_pages.is_empty() {
        let pages: Vec<String> = report.failed_pages.iter().map(u32::to_string).collect();
        let _ = writeln!(out, "  Failed:    {}", pages.join(", "));
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Images:");
    let _ = writeln!(out, "  Found:   {}", report.images_found);
    let _ = writeln!(out, "  Saved:   {}", report.saved);
    let _ = writeln!(out, "  Skipped: {}", report.skipped);
    let _ = writeln!(out, "  Failed:  {}", report.failed_downloads);
    let _ = writeln!(out);

    let _ = writeln!(out, "Output directory: {}", report.output_directory.display());

    out
}

/// Prints a report to stdout
pub fn print_report(report: &CrawlReport) {
    print!("{}", render_report(report));
}
