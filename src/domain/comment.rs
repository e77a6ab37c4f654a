use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::domain::Record;

/// Literal shown when a page hides a comment's score.
pub const SCORE_HIDDEN: &str = "[score hidden]";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub parent_id: Option<String>,
    pub author: String,
    /// Raw score text, possibly [`SCORE_HIDDEN`].
    pub score: String,
    /// Source timestamp as found on the page.
    pub time: String,
    /// Markdown body with links rewritten to the internal scheme.
    pub body: String,
    /// Traversal depth at parse time (0 for top level).
    pub depth: usize,
    pub stickied: bool,
    pub direct_url: String,
    pub is_collapsed: bool,
    pub is_root_collapsed: bool,
}

impl Comment {
    pub fn new(id: impl Into<String>, parent_id: Option<String>, depth: usize) -> Self {
        Self {
            id: id.into(),
            parent_id,
            author: String::new(),
            score: SCORE_HIDDEN.to_string(),
            time: String::new(),
            body: String::new(),
            depth,
            stickied: false,
            direct_url: String::new(),
            is_collapsed: false,
            is_root_collapsed: false,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Mark the comment as pinned; pinned subtrees start collapsed.
    pub fn set_stickied(&mut self, stickied: bool) {
        self.stickied = stickied;
        self.is_root_collapsed = stickied;
    }
}

impl Record for Comment {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn direct_url(&self) -> &str {
        &self.direct_url
    }

    fn time_raw(&self) -> &str {
        &self.time
    }
}

/// Count every comment below `id`, following `parent_id` links.
pub fn count_descendants(id: &str, comments: &[Comment]) -> usize {
    let mut children: HashMap<&str, Vec<&str>> = HashMap::new();
    for comment in comments {
        if let Some(parent) = comment.parent_id.as_deref() {
            children.entry(parent).or_default().push(&comment.id);
        }
    }

    let mut count = 0;
    let mut stack = vec![id];
    let mut seen = HashSet::from([id]);
    while let Some(current) = stack.pop() {
        for child in children.get(current).into_iter().flatten() {
            if seen.insert(*child) {
                count += 1;
                stack.push(*child);
            }
        }
    }
    count
}

/// Rebuild traversal order from `parent_id` links and re-stamp depths.
///
/// A comment is attached to its parent only when the parent appears earlier in
/// the input; otherwise it becomes a root. Roots keep their input order and each
/// is followed by its subtree in pre-order.
pub fn rethread(comments: Vec<Comment>) -> Vec<Comment> {
    let mut index: HashMap<String, usize> = HashMap::with_capacity(comments.len());
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); comments.len()];
    let mut roots = Vec::new();

    for (i, comment) in comments.iter().enumerate() {
        let parent = comment
            .parent_id
            .as_deref()
            .and_then(|p| index.get(p).copied());
        match parent {
            Some(p) => children[p].push(i),
            None => roots.push(i),
        }
        index.entry(comment.id.clone()).or_insert(i);
    }

    let mut slots: Vec<Option<Comment>> = comments.into_iter().map(Some).collect();
    let mut ordered = Vec::with_capacity(slots.len());
    let mut stack: Vec<(usize, usize)> = roots.into_iter().rev().map(|r| (r, 0)).collect();

    while let Some((i, depth)) = stack.pop() {
        if let Some(mut comment) = slots[i].take() {
            comment.depth = depth;
            ordered.push(comment);
            for &child in children[i].iter().rev() {
                stack.push((child, depth + 1));
            }
        }
    }

    ordered
}
