//! Structural extraction of posts and comments from listing pages.
//!
//! Every extractor works on a [`MarkupDocument`] and recovers from missing
//! sub-elements by substituting defaults, so one malformed entry never aborts
//! its siblings. Only page-level problems surface as errors.
//!
//! # Architecture
//!
//! ```text
//! raw markup → MarkupDocument → PageScraper → Comment / Post / MixedItem
//!                                    ↓
//!                              LinkNormalizer → markdown bodies
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use readit::scraper::PageScraper;
//!
//! let scraper = PageScraper::default();
//! let thread = scraper.parse_thread(&html)?;
//! let feed = scraper.parse_profile(&html)?;
//! ```

mod comments;
mod post;
mod profile;
mod thread;
pub mod urls;

pub use thread::ThreadPage;

use crate::app::{ReadItError, Result};
use crate::markup::{to_markdown, Element, MarkupDocument};
use crate::normalizer::LinkNormalizer;

/// Extracts domain records from the three page kinds.
#[derive(Clone, Default)]
pub struct PageScraper {
    normalizer: LinkNormalizer,
}

impl PageScraper {
    pub fn new(normalizer: LinkNormalizer) -> Self {
        Self { normalizer }
    }

    pub fn normalizer(&self) -> &LinkNormalizer {
        &self.normalizer
    }

    /// Rewrite links below `element` and convert it to markdown.
    ///
    /// Conversion failures yield an empty body.
    fn render_body(&self, element: &Element<'_>) -> String {
        let html = self.normalizer.normalize_element(element);
        match to_markdown(&html) {
            Ok(markdown) => markdown,
            Err(e) => {
                tracing::warn!("Dropping body that failed to convert: {}", e);
                String::new()
            }
        }
    }
}

/// First descendant matching `selector`, or an element-missing error.
fn required<'a>(element: &Element<'a>, selector: &str) -> Result<Element<'a>> {
    element
        .select_first(selector)
        .ok_or_else(|| ReadItError::ElementMissing(selector.to_string()))
}

/// Substitute a default for a missing sub-element of record `id`.
fn recover<T: Default>(id: &str, value: Result<T>) -> T {
    value.unwrap_or_else(|e| {
        tracing::trace!("{} in {}", e, id);
        T::default()
    })
}

/// Quote a value for use inside an attribute selector.
fn quote_selector_value(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}
