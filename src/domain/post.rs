use serde::{Deserialize, Serialize};

use crate::domain::Record;

/// Media kind of a post, derived from its media URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    Video,
    Gallery,
    Image,
    Article,
    Link,
    Text,
}

const VIDEO_HOSTS: &[&str] = &["v.redd.it", "youtube.com", "youtu.be", "streamable.com"];
const VIDEO_EXTENSIONS: &[&str] = &[".mp4", ".gifv", ".webm", ".mov"];
const IMAGE_HOSTS: &[&str] = &["i.redd.it", "i.imgur.com"];
const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".webp"];

impl PostType {
    /// Classify a post by its media URL.
    pub fn classify(media_url: &str) -> Self {
        let url = media_url.trim().to_ascii_lowercase();
        if url.is_empty() {
            return PostType::Text;
        }
        // Self posts link back to their own comments page.
        if url.starts_with("/r/") && url.contains("/comments/") {
            return PostType::Text;
        }

        let path = url.split(['?', '#']).next().unwrap_or(&url);
        if VIDEO_HOSTS.iter().any(|h| url.contains(h))
            || VIDEO_EXTENSIONS.iter().any(|e| path.ends_with(e))
        {
            PostType::Video
        } else if url.contains("/gallery/") {
            PostType::Gallery
        } else if IMAGE_HOSTS.iter().any(|h| url.contains(h))
            || IMAGE_EXTENSIONS.iter().any(|e| path.ends_with(e))
        {
            PostType::Image
        } else if url.contains("reddit.com") || url.starts_with('/') {
            PostType::Link
        } else {
            PostType::Article
        }
    }

    /// Whether listing thumbnails are kept for this kind.
    pub fn has_thumbnail(self) -> bool {
        matches!(self, PostType::Video | PostType::Gallery | PostType::Article)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PostType::Video => "video",
            PostType::Gallery => "gallery",
            PostType::Image => "image",
            PostType::Article => "article",
            PostType::Link => "link",
            PostType::Text => "text",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub subreddit: String,
    pub title: String,
    /// Flair text, empty when absent.
    pub tag: String,
    pub author: String,
    pub votes: String,
    pub time: String,
    pub media_url: String,
    pub comments_url: String,
    pub comments_count: String,
    pub post_type: PostType,
    pub thumbnail_url: Option<String>,
}

impl Record for Post {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn direct_url(&self) -> &str {
        &self.comments_url
    }

    fn time_raw(&self) -> &str {
        &self.time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_video() {
        assert_eq!(PostType::classify("https://v.redd.it/abc123"), PostType::Video);
        assert_eq!(PostType::classify("https://www.youtube.com/watch?v=x"), PostType::Video);
        assert_eq!(PostType::classify("https://i.imgur.com/clip.gifv"), PostType::Video);
    }

    #[test]
    fn test_classify_gallery_and_image() {
        assert_eq!(PostType::classify("https://www.reddit.com/gallery/1abc"), PostType::Gallery);
        assert_eq!(PostType::classify("https://i.redd.it/pic.png"), PostType::Image);
        assert_eq!(PostType::classify("https://example.com/pic.JPG?w=10"), PostType::Image);
    }

    #[test]
    fn test_classify_text_link_article() {
        assert_eq!(PostType::classify(""), PostType::Text);
        assert_eq!(PostType::classify("/r/rust/comments/1abc/title/"), PostType::Text);
        assert_eq!(PostType::classify("https://www.reddit.com/r/rust/"), PostType::Link);
        assert_eq!(PostType::classify("https://blog.rust-lang.org/post"), PostType::Article);
    }

    #[test]
    fn test_has_thumbnail() {
        assert!(PostType::Video.has_thumbnail());
        assert!(PostType::Gallery.has_thumbnail());
        assert!(PostType::Article.has_thumbnail());
        assert!(!PostType::Text.has_thumbnail());
        assert!(!PostType::Link.has_thumbnail());
        assert!(!PostType::Image.has_thumbnail());
    }
}
