use std::collections::HashMap;

use tokio::sync::Mutex;

use crate::domain::PostInfo;

/// Process-lifetime map from link to fetched post info.
///
/// Entries are never evicted.
#[derive(Default)]
pub struct EnrichmentCache {
    entries: Mutex<HashMap<String, PostInfo>>,
}

impl EnrichmentCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, url: &str) -> Option<PostInfo> {
        self.entries.lock().await.get(url).cloned()
    }

    pub async fn insert(&self, url: impl Into<String>, info: PostInfo) {
        self.entries.lock().await.insert(url.into(), info);
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(title: &str) -> PostInfo {
        PostInfo {
            title: title.into(),
            author: "alice".into(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let cache = EnrichmentCache::new();
        assert!(cache.is_empty().await);
        assert_eq!(cache.get("https://x/a").await, None);

        cache.insert("https://x/a", info("A")).await;
        assert_eq!(cache.get("https://x/a").await, Some(info("A")));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_insert_overwrites() {
        let cache = EnrichmentCache::new();
        cache.insert("https://x/a", info("A")).await;
        cache.insert("https://x/a", info("B")).await;
        assert_eq!(cache.get("https://x/a").await, Some(info("B")));
        assert_eq!(cache.len().await, 1);
    }
}
