use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Comment, Post, Record};

/// An entry of a profile feed: either a submission or a comment, with the
/// date parsed from its timestamp when it has the expected format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MixedItem {
    Post {
        post: Post,
        date: Option<DateTime<Utc>>,
    },
    Comment {
        comment: Comment,
        date: Option<DateTime<Utc>>,
    },
}

impl MixedItem {
    pub fn date(&self) -> Option<DateTime<Utc>> {
        match self {
            MixedItem::Post { date, .. } | MixedItem::Comment { date, .. } => *date,
        }
    }

    pub fn as_comment(&self) -> Option<&Comment> {
        match self {
            MixedItem::Comment { comment, .. } => Some(comment),
            MixedItem::Post { .. } => None,
        }
    }

    pub fn as_post(&self) -> Option<&Post> {
        match self {
            MixedItem::Post { post, .. } => Some(post),
            MixedItem::Comment { .. } => None,
        }
    }
}

impl Record for MixedItem {
    fn record_id(&self) -> &str {
        match self {
            MixedItem::Post { post, .. } => post.record_id(),
            MixedItem::Comment { comment, .. } => comment.record_id(),
        }
    }

    fn direct_url(&self) -> &str {
        match self {
            MixedItem::Post { post, .. } => post.direct_url(),
            MixedItem::Comment { comment, .. } => comment.direct_url(),
        }
    }

    fn time_raw(&self) -> &str {
        match self {
            MixedItem::Post { post, .. } => post.time_raw(),
            MixedItem::Comment { comment, .. } => comment.time_raw(),
        }
    }
}
