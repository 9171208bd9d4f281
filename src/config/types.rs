use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Default site crawled when no configuration file is given
pub const DEFAULT_BASE_URL: &str = "https://film-grab.com";

/// Browser-like identity sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) \
    Chrome/125.0.0.0 Safari/537.36";

/// Main configuration structure for cover-grab
///
/// Every section is optional in the TOML file; missing keys fall back to the
/// defaults documented on each field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub crawler: CrawlerConfig,
    pub selectors: SelectorConfig,
    pub output: OutputConfig,
}

/// Which site and which listing pages to visit
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site root; page 1 is the root itself, page n is `{base-url}/page/{n}/`
    /// (default: `https://film-grab.com`)
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// First listing page, inclusive (default: 2)
    #[serde(rename = "first-page")]
    pub first_page: u32,

    /// Last listing page, inclusive (default: 62)
    #[serde(rename = "last-page")]
    pub last_page: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            first_page: 2,
            last_page: 62,
        }
    }
}

impl SiteConfig {
    /// The configured page numbers in crawl order
    pub fn pages(&self) -> std::ops::RangeInclusive<u32> {
        self.first_page..=self.last_page
    }
}

/// Request pacing and identity
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Pause after each listing page, in milliseconds (default: 1000)
    #[serde(rename = "pause-ms")]
    pub pause_ms: u64,

    /// Per-request timeout, in seconds (default: 15)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// User-Agent header value
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            pause_ms: 1000,
            timeout_secs: 15,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl CrawlerConfig {
    pub fn pause(&self) -> Duration {
        Duration::from_millis(self.pause_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// CSS selectors used to locate content items and their cover image
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Content-item container (default: `article`)
    pub container: String,

    /// Preferred image inside a container (default: `img.wp-post-image`)
    #[serde(rename = "featured-image")]
    pub featured_image: String,

    /// Image used when no featured image is present (default: `img`)
    #[serde(rename = "fallback-image")]
    pub fallback_image: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            container: "article".to_string(),
            featured_image: "img.wp-post-image".to_string(),
            fallback_image: "img".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving downloaded images (default: `film_grab_covers`)
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("film_grab_covers"),
        }
    }
}
