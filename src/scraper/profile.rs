use crate::app::Result;
use crate::domain::time::parse_timestamp;
use crate::domain::MixedItem;
use crate::markup::MarkupDocument;
use crate::scraper::PageScraper;

const PROFILE_COMMENTS: &str = "div.thing.comment";

impl PageScraper {
    /// Parse a user-profile page into a mixed feed, newest first.
    pub fn parse_profile(&self, html: &str) -> Result<Vec<MixedItem>> {
        let doc = MarkupDocument::parse(html)?;
        Ok(self.extract_profile(&doc))
    }

    /// Extract posts and comments of a profile page and sort them by date.
    ///
    /// Posts and comments are read in separate passes and concatenated before
    /// sorting. Items whose date cannot be parsed sort after every dated item,
    /// keeping their extraction order.
    pub fn extract_profile(&self, doc: &MarkupDocument) -> Vec<MixedItem> {
        let posts = self.extract_posts(doc);
        let comments: Vec<_> = doc
            .select(PROFILE_COMMENTS)
            .iter()
            .map(|element| self.read_profile_comment(element))
            .collect();

        let mut items: Vec<MixedItem> = Vec::with_capacity(posts.len() + comments.len());
        items.extend(posts.into_iter().map(|post| MixedItem::Post {
            date: parse_timestamp(&post.time),
            post,
        }));
        items.extend(comments.into_iter().map(|comment| MixedItem::Comment {
            date: parse_timestamp(&comment.time),
            comment,
        }));

        // Stable sort; None orders below Some, so undated items land last.
        items.sort_by(|a, b| b.date().cmp(&a.date()));
        items
    }
}
