//! Crawler coordinator - main crawl orchestration logic
//!
//! The coordinator walks the configured page range in order. For each page
//! it fetches the listing, extracts one image reference per content item,
//! normalizes each reference, and hands it to the persistence sink. A page
//! that fails to fetch contributes nothing and the crawl moves on.

use crate::config::{validate, Config};
use crate::crawler::fetcher::{build_http_client, fetch_text};
use crate::crawler::page::PageRequest;
use crate::crawler::parser::{extract_image_references, PageSelectors};
use crate::crawler::sink::PersistenceSink;
use crate::output::CrawlReport;
use crate::state::CrawlState;
use crate::url::normalize_image_src;
use crate::{GrabError, Result, TransportResult};
use reqwest::Client;

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Config,
    client: Client,
    selectors: PageSelectors,
    sink: PersistenceSink,
    state: CrawlState,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// Validates the configuration, compiles the selectors, builds the HTTP
    /// client and creates the output directory (with any missing parents).
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(GrabError)` - Invalid configuration, client construction
    ///   failure, or the output directory could not be created
    pub fn new(config: Config) -> Result<Self> {
        validate(&config)?;
        let selectors = PageSelectors::from_config(&config.selectors)?;
        let client = build_http_client(&config.crawler)?;

        let output_dir = &config.output.directory;
        std::fs::create_dir_all(output_dir).map_err(|source| GrabError::OutputDir {
            path: output_dir.display().to_string(),
            source,
        })?;

        let sink = PersistenceSink::new(client.clone(), output_dir.clone());

        Ok(Self {
            config,
            client,
            selectors,
            sink,
            state: CrawlState::Idle,
        })
    }

    pub fn state(&self) -> CrawlState {
        self.state
    }

    /// Runs the crawl over every configured page
    ///
    /// Pages are visited strictly in ascending order, one request at a time.
    /// After each page, whether it succeeded or not, the coordinator pauses
    /// for the configured duration. Failures never end the run early.
    pub async fn run(&mut self) -> CrawlReport {
        let pause = self.config.crawler.pause();
        let mut report = CrawlReport::new(self.config.output.directory.clone());

        tracing::debug!(
            "Crawling pages {}..={} of {}",
            self.config.site.first_page,
            self.config.site.last_page,
            self.config.site.base_url
        );

        for page in self.config.site.pages() {
            self.transition(CrawlState::Running { page });
            report.record_page();

            let request = PageRequest::new(page);
            if let Err(e) = self.process_page(&request, &mut report).await {
                tracing::error!("Failed to fetch page {}: {}", page, e);
                report.record_failed_page(page);
            }

            if !pause.is_zero() {
                tokio::time::sleep(pause).await;
            }
        }

        self.transition(CrawlState::Done);
        report.finish();

        let output_dir = std::fs::canonicalize(&self.config.output.directory)
            .unwrap_or_else(|_| self.config.output.directory.clone());
        tracing::info!("Done, images in {}", output_dir.display());
        report.output_directory = output_dir;

        report
    }

    /// Processes a single listing page
    ///
    /// Only the page fetch itself can fail here; per-image failures are
    /// folded into the report by the sink.
    async fn process_page(
        &self,
        request: &PageRequest,
        report: &mut CrawlReport,
    ) -> TransportResult<()> {
        let base_url = self.config.site.base_url.as_str();
        let page_url = request.url(base_url);
        tracing::info!("Page {} ({})", request.page_number(), page_url);

        let html = fetch_text(&self.client, &page_url).await?;
        let references = extract_image_references(&html, &self.selectors);
        tracing::debug!(
            "Page {}: {} image references",
            request.page_number(),
            references.len()
        );
        report.record_images_found(references.len());

        for reference in references {
            let url = normalize_image_src(&reference.raw_src, base_url);
            let outcome = self.sink.save(&url).await;
            report.record_outcome(outcome);
        }

        Ok(())
    }

    fn transition(&mut self, next: CrawlState) {
        debug_assert!(
            self.state.can_transition_to(&next),
            "invalid crawl transition: {} -> {}",
            self.state,
            next
        );
        tracing::trace!("Crawl state: {} -> {}", self.state, next);
        self.state = next;
    }
}

/// Runs a complete crawl with the given configuration
///
/// # Example
///
/// ```no_run
/// use cover_grab::config::Config;
/// use cover_grab::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let report = run_crawl(Config::default()).await?;
/// println!("Saved {} new covers", report.saved);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config) -> Result<CrawlReport> {
    let mut coordinator = Coordinator::new(config)?;
    Ok(coordinator.run().await)
}
