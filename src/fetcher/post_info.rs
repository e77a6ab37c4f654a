use std::sync::Arc;

use async_trait::async_trait;

use crate::app::{ReadItError, Result};
use crate::domain::PostInfo;
use crate::fetcher::{PageLoader, PostInfoSource};
use crate::scraper::urls::resolve_link;
use crate::scraper::PageScraper;

/// Reads title and author from the post container of the linked page.
pub struct ScrapingPostInfoSource {
    loader: Arc<dyn PageLoader + Send + Sync>,
    scraper: PageScraper,
    base_url: String,
}

impl ScrapingPostInfoSource {
    pub fn new(
        loader: Arc<dyn PageLoader + Send + Sync>,
        scraper: PageScraper,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            loader,
            scraper,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl PostInfoSource for ScrapingPostInfoSource {
    async fn fetch_one(&self, url: &str) -> Result<PostInfo> {
        let target = resolve_link(&self.base_url, url)?;
        let html = self.loader.load(&target).await?;
        let post = self.scraper.parse_post(&html)?;

        if post.title.is_empty() {
            return Err(ReadItError::NotFound(format!("post title at {}", target)));
        }

        Ok(PostInfo {
            title: post.title,
            author: post.author,
        })
    }
}
