pub mod cache;
pub mod config;
pub mod http_fetcher;
pub mod parallel;
pub mod post_info;

pub use cache::EnrichmentCache;
pub use config::{EnrichmentConfig, LoaderConfig};
pub use parallel::{EnrichmentFailure, EnrichmentReport, ParallelEnricher};

use async_trait::async_trait;
use url::Url;

use crate::app::Result;
use crate::domain::PostInfo;

/// Loads the rendered markup of a page.
#[async_trait]
pub trait PageLoader {
    async fn load(&self, url: &Url) -> Result<String>;
}

/// Fetch primitive for enrichment: title and author behind one link.
#[async_trait]
pub trait PostInfoSource {
    async fn fetch_one(&self, url: &str) -> Result<PostInfo>;
}
