//! HTML parser for extracting cover image references
//!
//! A listing page is a sequence of content-item containers. Each container
//! contributes at most one image: the first image strategy that finds an
//! element wins, and every other image in the container is ignored.

use crate::config::{compile_selector, SelectorConfig};
use crate::ConfigError;
use scraper::{ElementRef, Html, Selector};

/// A raw image reference as found in the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    /// The `src` attribute, trimmed, never empty
    pub raw_src: String,
}

/// One way of picking an image element inside a container
#[derive(Debug, Clone)]
pub struct ImageStrategy {
    name: &'static str,
    selector: Selector,
}

impl ImageStrategy {
    pub fn new(name: &'static str, selector: Selector) -> Self {
        Self { name, selector }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the first matching element inside `container`, if any
    pub fn select<'a>(&self, container: ElementRef<'a>) -> Option<ElementRef<'a>> {
        container.select(&self.selector).next()
    }
}

/// Compiled selectors for locating containers and their cover image
#[derive(Debug, Clone)]
pub struct PageSelectors {
    container: Selector,
    strategies: Vec<ImageStrategy>,
}

impl PageSelectors {
    /// Compiles the configured selectors
    ///
    /// Strategies are tried in order: the featured image first, then the
    /// fallback image.
    pub fn from_config(config: &SelectorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            container: compile_selector("container", &config.container)?,
            strategies: vec![
                ImageStrategy::new(
                    "featured",
                    compile_selector("featured-image", &config.featured_image)?,
                ),
                ImageStrategy::new(
                    "fallback",
                    compile_selector("fallback-image", &config.fallback_image)?,
                ),
            ],
        })
    }

    pub fn strategies(&self) -> &[ImageStrategy] {
        &self.strategies
    }

    /// Picks the cover image element of one container
    fn select_image<'a>(&self, container: ElementRef<'a>) -> Option<ElementRef<'a>> {
        self.strategies.iter().find_map(|strategy| {
            let found = strategy.select(container);
            if found.is_some() {
                tracing::trace!("Image matched by {} strategy", strategy.name());
            }
            found
        })
    }
}

/// Extracts at most one image reference per container from a listing page
///
/// Containers without any image are skipped. So is a container whose
/// selected image has no usable `src`: the selected element is final and no
/// other image in that container is considered.
///
/// # Example
///
/// ```
/// use cover_grab::config::SelectorConfig;
/// use cover_grab::crawler::{extract_image_references, PageSelectors};
///
/// let selectors = PageSelectors::from_config(&SelectorConfig::default()).unwrap();
/// let html = r#"<article><img src="/thumb.jpg"><img class="wp-post-image" src="/cover.jpg"></article>"#;
/// let refs = extract_image_references(html, &selectors);
/// assert_eq!(refs.len(), 1);
/// assert_eq!(refs[0].raw_src, "/cover.jpg");
/// ```
pub fn extract_image_references(html: &str, selectors: &PageSelectors) -> Vec<ImageReference> {
    let document = Html::parse_document(html);
    let mut references = Vec::new();

    for container in document.select(&selectors.container) {
        let Some(image) = selectors.select_image(container) else {
            continue;
        };

        match image.value().attr("src").map(str::trim) {
            Some(src) if !src.is_empty() => references.push(ImageReference {
                raw_src: src.to_string(),
            }),
            _ => tracing::debug!("Skipping container whose image has no src"),
        }
    }

    references
}
