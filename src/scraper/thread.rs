use serde::Serialize;

use crate::app::Result;
use crate::domain::{Comment, Post};
use crate::markup::MarkupDocument;
use crate::scraper::PageScraper;

/// Everything read from a comment-thread page.
#[derive(Debug, Clone, Serialize)]
pub struct ThreadPage {
    /// The submission, when the page shows one.
    pub post: Option<Post>,
    /// Self-text of the submission as markdown.
    pub post_body: Option<String>,
    pub comments: Vec<Comment>,
}

impl PageScraper {
    /// Parse a comment-thread page.
    pub fn parse_thread(&self, html: &str) -> Result<ThreadPage> {
        let doc = MarkupDocument::parse(html)?;

        let post = match self.extract_post(&doc) {
            Ok(post) => Some(post),
            Err(e) => {
                tracing::debug!("Thread page without post: {}", e);
                None
            }
        };

        Ok(ThreadPage {
            post,
            post_body: self.extract_post_body(&doc),
            comments: self.extract_comments(&doc),
        })
    }
}
