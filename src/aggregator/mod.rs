//! Folds enrichment results into display cards.
//!
//! Cards sharing a resource key collapse into the most recent one. The merge
//! runs over the complete result set, so the output only depends on which
//! fetches succeeded, never on the order they finished in.

use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use crate::domain::{Card, EnrichmentResult, Record};

/// Number of `/`-separated parts of a link that identify its resource.
pub const KEY_SEGMENTS: usize = 6;

/// Grouping key of a link: its first [`KEY_SEGMENTS`] `/`-separated parts.
///
/// The split runs over the whole link, scheme included, so for
/// `https://host/r/<sub>/comments/<id>/...` the key is
/// `https://host/r/<sub>/comments`: every link into one subreddit's comment
/// pages shares a key, whatever the post id. A link with fewer parts is its
/// own key.
pub fn resource_key(url: &str) -> String {
    let segments: Vec<&str> = url.split('/').take(KEY_SEGMENTS).collect();
    if segments.len() < KEY_SEGMENTS {
        return url.to_string();
    }
    segments.join("/")
}

struct Candidate<R> {
    time: f64,
    card: Card<R>,
}

impl<R> Candidate<R> {
    /// Most recent first, then the smaller id.
    fn rank(&self, other: &Self) -> Ordering {
        other
            .time
            .total_cmp(&self.time)
            .then_with(|| self.card.id.cmp(&other.card.id))
    }
}

/// Build one card per enriched record, keep the most recent card of every
/// resource, and return them newest first.
///
/// Results whose key matches no record are ignored.
pub fn aggregate<R: Record>(records: &[R], results: &[EnrichmentResult]) -> Vec<Card<R>> {
    let mut by_id: HashMap<&str, &R> = HashMap::with_capacity(records.len());
    for record in records {
        by_id.entry(record.record_id()).or_insert(record);
    }

    let mut used: HashSet<&str> = HashSet::with_capacity(results.len());
    let mut groups: HashMap<String, Candidate<R>> = HashMap::new();

    for result in results {
        let Some(record) = by_id.get(result.key.as_str()) else {
            tracing::debug!("No record for enrichment result {}", result.key);
            continue;
        };
        if !used.insert(result.key.as_str()) {
            continue;
        }

        let candidate = Candidate {
            time: record.time_value(),
            card: Card {
                id: result.key.clone(),
                title: result.title.clone(),
                author: result.author.clone(),
                record: (*record).clone(),
            },
        };

        match groups.entry(resource_key(record.direct_url())) {
            Entry::Vacant(slot) => {
                slot.insert(candidate);
            }
            Entry::Occupied(mut slot) => {
                if candidate.rank(slot.get()) == Ordering::Less {
                    slot.insert(candidate);
                }
            }
        }
    }

    let mut candidates: Vec<Candidate<R>> = groups.into_values().collect();
    candidates.sort_by(|a, b| a.rank(b));
    candidates.into_iter().map(|c| c.card).collect()
}
