use serde::{Deserialize, Serialize};

/// Metadata returned by the fetch primitive for one link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostInfo {
    pub title: String,
    pub author: String,
}

/// Successful enrichment of one record, keyed by the record id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentResult {
    pub key: String,
    pub title: String,
    pub author: String,
}

impl EnrichmentResult {
    pub fn new(key: impl Into<String>, info: PostInfo) -> Self {
        Self {
            key: key.into(),
            title: info.title,
            author: info.author,
        }
    }
}

/// Display-ready unit combining a record with its fetched metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card<R> {
    pub id: String,
    pub title: String,
    pub author: String,
    pub record: R,
}
