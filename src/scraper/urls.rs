//! URL construction for the pages the scraper reads.

use url::Url;

use crate::app::Result;
use crate::domain::SortOption;

/// Add the comment sort order to a thread URL.
///
/// The `sort` item goes first; every other query item the caller supplied is
/// kept in order. An existing `sort` item is replaced.
pub fn comments_url_with_sort(comments_url: &str, sort: Option<SortOption>) -> Result<Url> {
    let mut url = Url::parse(comments_url)?;
    let Some(sort) = sort else {
        return Ok(url);
    };

    let existing: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != "sort")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .append_pair("sort", sort.query_value())
        .extend_pairs(existing);

    Ok(url)
}

/// Build `<base>/user/<name>[/<filter>][?after=<token>]`.
pub fn profile_url(
    base_url: &str,
    username: &str,
    filter: Option<&str>,
    after: Option<&str>,
) -> Result<Url> {
    let mut url = Url::parse(base_url)?;
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?;
        segments.pop_if_empty().push("user").push(username);
        if let Some(filter) = filter.filter(|f| !f.is_empty()) {
            segments.push(filter);
        }
    }

    if let Some(after) = after.filter(|a| !a.is_empty()) {
        url.query_pairs_mut().append_pair("after", after);
    }

    Ok(url)
}

/// Resolve a possibly site-relative link against the base URL.
pub fn resolve_link(base_url: &str, link: &str) -> Result<Url> {
    let base = Url::parse(base_url)?;
    Ok(base.join(link)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_is_prepended_and_query_kept() {
        let url = comments_url_with_sort(
            "https://old.reddit.com/r/rust/comments/1/x/?limit=500&context=3",
            Some(SortOption::Top),
        )
        .unwrap();
        assert_eq!(url.query(), Some("sort=top&limit=500&context=3"));
    }

    #[test]
    fn test_existing_sort_is_replaced() {
        let url = comments_url_with_sort("https://x/r/a/comments/1/?sort=new&a=1", Some(SortOption::Best))
            .unwrap();
        assert_eq!(url.query(), Some("sort=confidence&a=1"));
    }

    #[test]
    fn test_no_sort_leaves_url() {
        let url = comments_url_with_sort("https://x/r/a/comments/1/?a=1", None).unwrap();
        assert_eq!(url.as_str(), "https://x/r/a/comments/1/?a=1");
    }

    #[test]
    fn test_invalid_comments_url() {
        assert!(comments_url_with_sort("not a url", Some(SortOption::New)).is_err());
    }

    #[test]
    fn test_profile_url() {
        let url = profile_url("https://old.reddit.com", "alice", None, None).unwrap();
        assert_eq!(url.as_str(), "https://old.reddit.com/user/alice");

        let url = profile_url("https://old.reddit.com/", "alice", Some("comments"), Some("t1_x")).unwrap();
        assert_eq!(url.as_str(), "https://old.reddit.com/user/alice/comments?after=t1_x");

        let url = profile_url("https://old.reddit.com", "alice", Some(""), Some("")).unwrap();
        assert_eq!(url.as_str(), "https://old.reddit.com/user/alice");
    }

    #[test]
    fn test_resolve_link() {
        let url = resolve_link("https://old.reddit.com", "/r/rust/comments/1/x/").unwrap();
        assert_eq!(url.as_str(), "https://old.reddit.com/r/rust/comments/1/x/");

        let url = resolve_link("https://old.reddit.com", "https://other.com/a").unwrap();
        assert_eq!(url.as_str(), "https://other.com/a");
    }
}
