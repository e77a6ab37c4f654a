use std::sync::Arc;

use crate::aggregator::aggregate;
use crate::app::error::{ReadItError, Result};
use crate::config::Config;
use crate::domain::{Card, MixedItem, Post, Record, SortOption};
use crate::fetcher::http_fetcher::HttpPageLoader;
use crate::fetcher::post_info::ScrapingPostInfoSource;
use crate::fetcher::{EnrichmentCache, EnrichmentReport, PageLoader, ParallelEnricher};
use crate::normalizer::LinkNormalizer;
use crate::scraper::urls::{comments_url_with_sort, profile_url, resolve_link};
use crate::scraper::{PageScraper, ThreadPage};

pub struct AppContext {
    pub config: Config,
    pub loader: Arc<dyn PageLoader + Send + Sync>,
    pub scraper: PageScraper,
    pub enricher: ParallelEnricher,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let loader: Arc<dyn PageLoader + Send + Sync> = Arc::new(HttpPageLoader::new(&config.loader)?);
        Ok(Self::with_loader(config, loader))
    }

    /// Load the configuration from `~/.config/readit/config.toml`.
    pub fn from_default_config() -> Result<Self> {
        let config = Config::load().map_err(|e| ReadItError::Config(e.to_string()))?;
        Self::new(config)
    }

    pub fn with_loader(config: Config, loader: Arc<dyn PageLoader + Send + Sync>) -> Self {
        let scraper = PageScraper::new(LinkNormalizer::new(config.links.clone()));
        let source = Arc::new(ScrapingPostInfoSource::new(
            loader.clone(),
            scraper.clone(),
            config.loader.base_url.clone(),
        ));
        let enricher = ParallelEnricher::new(
            source,
            Arc::new(EnrichmentCache::new()),
            config.enrichment.clone(),
        );

        Self {
            config,
            loader,
            scraper,
            enricher,
        }
    }

    /// Load and parse a comment thread, optionally with a sort order.
    pub async fn scrape_thread(&self, url: &str, sort: Option<SortOption>) -> Result<ThreadPage> {
        let link = resolve_link(&self.config.loader.base_url, url)?;
        let target = comments_url_with_sort(link.as_str(), sort)?;
        let html = self.loader.load(&target).await?;
        self.scraper.parse_thread(&html)
    }

    pub async fn scrape_post(&self, url: &str) -> Result<Post> {
        let target = resolve_link(&self.config.loader.base_url, url)?;
        let html = self.loader.load(&target).await?;
        self.scraper.parse_post(&html)
    }

    /// Load one page of a user's profile feed.
    pub async fn scrape_profile(
        &self,
        username: &str,
        filter: Option<&str>,
        after: Option<&str>,
    ) -> Result<Vec<MixedItem>> {
        let target = profile_url(&self.config.loader.base_url, username, filter, after)?;
        let html = self.loader.load(&target).await?;
        self.scraper.parse_profile(&html)
    }

    /// Enrich the records and fold the results into cards.
    pub async fn enrich_cards<R: Record>(&self, records: &[R]) -> (Vec<Card<R>>, EnrichmentReport) {
        let report = self.enricher.enrich(records).await;
        let cards = aggregate(records, &report.results);
        (cards, report)
    }
}
