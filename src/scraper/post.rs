use crate::app::{ReadItError, Result};
use crate::domain::{Post, PostType};
use crate::markup::{Element, MarkupDocument};
use crate::scraper::{recover, required, PageScraper};

const THREAD_POST: &str = "div.link";
const LISTING_POSTS: &str = "div.thing.link";

impl PageScraper {
    /// Parse a single-post page.
    pub fn parse_post(&self, html: &str) -> Result<Post> {
        let doc = MarkupDocument::parse(html)?;
        self.extract_post(&doc)
    }

    /// Extract the post shown at the top of a thread page.
    pub fn extract_post(&self, doc: &MarkupDocument) -> Result<Post> {
        let element = doc
            .select_first(THREAD_POST)
            .ok_or_else(|| ReadItError::NotFound(THREAD_POST.to_string()))?;
        Ok(read_post(&element))
    }

    /// Extract every post of a listing page, in document order.
    pub fn extract_posts(&self, doc: &MarkupDocument) -> Vec<Post> {
        doc.select(LISTING_POSTS).iter().map(read_post).collect()
    }

    /// Self-text of the thread's post as markdown, `None` when absent or empty.
    pub fn extract_post_body(&self, doc: &MarkupDocument) -> Option<String> {
        let expando = doc.select_first("div.expando")?;
        if expando.text().is_empty() {
            return None;
        }
        Some(self.render_body(&expando)).filter(|body| !body.is_empty())
    }
}

fn read_post(element: &Element<'_>) -> Post {
    let id = element.attr_or_default("data-fullname");
    let media_url = element.attr_or_default("data-url");
    let post_type = PostType::classify(&media_url);

    let comments_link = element.select_first("a.comments");
    let comments_url = comments_link
        .as_ref()
        .map(|a| a.attr_or_default("href"))
        .unwrap_or_default();
    let comments_count = comments_link
        .map(|a| a.text())
        .and_then(|text| text.split_whitespace().next().map(String::from))
        .unwrap_or_default();

    let thumbnail_url = if post_type.has_thumbnail() {
        element
            .select_first("a.thumbnail img")
            .and_then(|img| img.attr("src"))
            .filter(|src| !src.is_empty())
            .map(|src| force_https(&src))
    } else {
        None
    };

    Post {
        subreddit: element.attr_or_default("data-subreddit"),
        title: recover(&id, required(element, "p.title a.title").map(|a| a.text())),
        tag: element
            .select_first("span.linkflairlabel")
            .map(|flair| flair.text())
            .unwrap_or_default(),
        author: element.attr_or_default("data-author"),
        votes: element.attr_or_default("data-score"),
        time: recover(
            &id,
            required(element, "time").map(|t| t.attr_or_default("datetime")),
        ),
        media_url,
        comments_url,
        comments_count,
        post_type,
        thumbnail_url,
        id,
    }
}

/// Give scheme-relative URLs an explicit https scheme.
fn force_https(src: &str) -> String {
    if src.starts_with("//") {
        format!("https:{}", src)
    } else {
        src.to_string()
    }
}
