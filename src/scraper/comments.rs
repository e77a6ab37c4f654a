use std::collections::HashSet;

use crate::app::Result;
use crate::domain::comment::SCORE_HIDDEN;
use crate::domain::Comment;
use crate::markup::{Element, MarkupDocument};
use crate::scraper::{quote_selector_value, recover, required, PageScraper};

const TOP_LEVEL_COMMENTS: &str = "div.sitetable.nestedlisting > div.comment";
/// Path from a comment container to the containers of its direct replies.
const CHILD_COMMENT_PATH: [&str; 3] = ["div.child", "div.sitetable.listing", "div.comment"];

/// State threaded through one extraction pass.
struct Traversal {
    seen: HashSet<String>,
    comments: Vec<Comment>,
}

impl Traversal {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            seen: HashSet::with_capacity(capacity),
            comments: Vec::with_capacity(capacity),
        }
    }
}

impl PageScraper {
    /// Parse a comment-thread page into a flat, pre-order comment list.
    pub fn parse_comments(&self, html: &str) -> Result<Vec<Comment>> {
        let doc = MarkupDocument::parse(html)?;
        Ok(self.extract_comments(&doc))
    }

    /// Walk the nested comment listing of a thread page.
    ///
    /// Output follows on-page nesting in pre-order. A comment id seen earlier in
    /// the pass is skipped together with its whole subtree.
    pub fn extract_comments(&self, doc: &MarkupDocument) -> Vec<Comment> {
        let top_level = doc.select(TOP_LEVEL_COMMENTS);
        let mut traversal = Traversal::with_capacity(top_level.len());

        for element in &top_level {
            self.visit_comment(element, None, 0, &mut traversal);
        }

        tracing::debug!(
            "Extracted {} comments from {} top-level entries",
            traversal.comments.len(),
            top_level.len()
        );
        traversal.comments
    }

    fn visit_comment(
        &self,
        element: &Element<'_>,
        parent_id: Option<&str>,
        depth: usize,
        traversal: &mut Traversal,
    ) {
        let id = element.attr_or_default("data-fullname");
        if !traversal.seen.insert(id.clone()) {
            tracing::trace!("Skipping duplicate comment {}", id);
            return;
        }

        let comment = self.read_nested_comment(element, id, parent_id, depth);
        let id = comment.id.clone();
        traversal.comments.push(comment);

        for child in child_comments(element) {
            self.visit_comment(&child, Some(&id), depth + 1, traversal);
        }
    }

    fn read_nested_comment(
        &self,
        element: &Element<'_>,
        id: String,
        parent_id: Option<&str>,
        depth: usize,
    ) -> Comment {
        let comment = Comment::new(id, parent_id.map(String::from), depth);
        // Deleted comments keep their place in the tree but carry no body.
        self.fill_comment(element, comment, BodyMatch::Prefix, true)
    }

    /// Read a comment from a profile page, where comments stand alone.
    pub(super) fn read_profile_comment(&self, element: &Element<'_>) -> Comment {
        let id = element.attr_or_default("data-fullname");
        let parent_id = element
            .attr("data-parent-fullname")
            .filter(|p| !p.is_empty());
        let comment = Comment::new(id, parent_id, 0);
        self.fill_comment(element, comment, BodyMatch::Contains, false)
    }

    fn fill_comment(
        &self,
        element: &Element<'_>,
        mut comment: Comment,
        body_match: BodyMatch,
        require_author: bool,
    ) -> Comment {
        comment.author = element.attr_or_default("data-author");

        // Only the comment's own entry counts; replies carry entries of their own.
        let Some(entry) = element.children_matching("div.entry").into_iter().next() else {
            tracing::trace!("No entry in {}", comment.id);
            return comment;
        };

        comment.score = read_score(&entry);
        comment.time = recover(&comment.id, read_time(&entry));

        if entry.has_class("unvoted") && (!require_author || !comment.author.is_empty()) {
            let form_selector = format!(
                "form[id{}{}]",
                body_match.operator(),
                quote_selector_value(&format!("form-{}", comment.id))
            );
            if let Some(body) = entry.children_matching(&form_selector).into_iter().next() {
                comment.body = self.render_body(&body);
            }
        }

        comment.set_stickied(entry.select_first("span.stickied-tagline").is_some());
        comment.direct_url = recover(&comment.id, read_permalink(&entry));
        comment
    }
}

/// Containers of the direct replies to `element`, in document order.
fn child_comments<'a>(element: &Element<'a>) -> Vec<Element<'a>> {
    let mut level = vec![element.clone()];
    for step in CHILD_COMMENT_PATH {
        level = level
            .iter()
            .flat_map(|parent| parent.children_matching(step))
            .collect();
    }
    level
}

/// How a body form id relates to its comment id.
#[derive(Clone, Copy)]
enum BodyMatch {
    Prefix,
    Contains,
}

impl BodyMatch {
    fn operator(self) -> &'static str {
        match self {
            BodyMatch::Prefix => "^=",
            BodyMatch::Contains => "*=",
        }
    }
}

/// First token of the score line, e.g. "12" from "12 points".
fn read_score(entry: &Element<'_>) -> String {
    entry
        .select_first("span.score.unvoted")
        .map(|score| score.text())
        .and_then(|text| text.split_whitespace().next().map(String::from))
        .unwrap_or_else(|| SCORE_HIDDEN.to_string())
}

fn read_time(entry: &Element<'_>) -> Result<String> {
    Ok(required(entry, "time")?.attr_or_default("datetime"))
}

fn read_permalink(entry: &Element<'_>) -> Result<String> {
    Ok(required(entry, "a.bylink")?.attr_or_default("href"))
}
