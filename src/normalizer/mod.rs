use serde::{Deserialize, Serialize};
use url::{Position, Url};

use crate::markup::{Element, MarkupDocument};

/// Settings for rewriting links found in extracted bodies.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Scheme of rewritten links (default: "readIt")
    pub internal_scheme: String,

    /// Links containing this domain stay on-site (default: "reddit.com")
    pub host_domain: String,

    /// Keep the original link text for external links (default: false)
    pub show_original_url: bool,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            internal_scheme: "readIt".to_string(),
            host_domain: "reddit.com".to_string(),
            show_original_url: false,
        }
    }
}

/// Result of rewriting one href.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewrittenLink {
    pub href: String,
    /// Host to show as link text, for external links when original URLs are hidden.
    pub display_host: Option<String>,
}

/// Unicode punctuation (categories P*) within ASCII.
fn is_punctuation(c: char) -> bool {
    matches!(
        c,
        '!' | '"' | '#' | '%' | '&' | '\'' | '(' | ')' | '*' | ',' | '-' | '.' | '/' | ':'
            | ';' | '?' | '@' | '[' | '\\' | ']' | '_' | '{' | '}'
    )
}

/// Rewrites hyperlinks into the application's internal URI scheme.
#[derive(Clone)]
pub struct LinkNormalizer {
    config: LinkConfig,
    prefix: String,
}

impl Default for LinkNormalizer {
    fn default() -> Self {
        Self::new(LinkConfig::default())
    }
}

impl LinkNormalizer {
    pub fn new(config: LinkConfig) -> Self {
        let prefix = format!("{}://", config.internal_scheme);
        Self { config, prefix }
    }

    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    fn is_internal(&self, href: &str) -> bool {
        href.get(..self.prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(&self.prefix))
    }

    /// Rewrite a single href.
    pub fn rewrite(&self, href: &str) -> RewrittenLink {
        let href = href.trim();

        if self.is_internal(href) {
            return RewrittenLink {
                href: href.to_string(),
                display_host: None,
            };
        }

        if href.starts_with("/r/")
            || href.starts_with("/u/")
            || href.contains(self.config.host_domain.as_str())
        {
            return RewrittenLink {
                href: format!("{}{}", self.prefix, href),
                display_host: None,
            };
        }

        if href.starts_with("http://") || href.starts_with("https://") {
            match Url::parse(href) {
                Ok(url) => {
                    let without_scheme = url[Position::BeforeUsername..].trim_matches(is_punctuation);
                    let display_host = if self.config.show_original_url {
                        None
                    } else {
                        Some(url.host_str().unwrap_or(href).to_string())
                    };
                    return RewrittenLink {
                        href: format!("{}{}", self.prefix, without_scheme),
                        display_host,
                    };
                }
                Err(e) => {
                    tracing::debug!("Keeping unparseable link {}: {}", href, e);
                }
            }
        }

        RewrittenLink {
            href: format!("{}{}", self.prefix, href),
            display_host: None,
        }
    }

    /// Rewrite a bare link string.
    pub fn normalize_href(&self, href: &str) -> String {
        self.rewrite(href).href
    }

    /// Rewrite every `a[href]` in an HTML fragment and return the new fragment.
    pub fn normalize(&self, body_html: &str) -> String {
        let doc = MarkupDocument::fragment(body_html);

        for link in doc.select("a[href]") {
            let original = link.attr_or_default("href");
            let rewritten = self.rewrite(&original);
            link.set_attr("href", &rewritten.href);
            if let Some(host) = rewritten.display_host {
                link.set_text(&host);
            }
        }

        doc.body_html()
    }

    /// Rewrite the links below `element`, returning its new inner markup.
    pub fn normalize_element(&self, element: &Element<'_>) -> String {
        self.normalize(&element.inner_html())
    }
}
