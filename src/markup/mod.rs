//! Markup document adapter.
//!
//! Wraps a `dom_query` document and exposes the small query surface the
//! extractors need: selector matching, attribute and text reads, and subtree
//! serialization. Extractors never look at raw markup text directly.

mod markdown;

pub use markdown::to_markdown;

use dom_query::{Document, Selection};

use crate::app::{ReadItError, Result};

/// A parsed markup tree.
pub struct MarkupDocument {
    doc: Document,
}

impl MarkupDocument {
    /// Parse raw markup with error-tolerant HTML parsing.
    ///
    /// Fails when the input carries no markup at all: blank text, or text that
    /// produces no element below `<body>` and no text content.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Err(ReadItError::Parse("empty document".into()));
        }
        if raw.contains('\0') {
            return Err(ReadItError::Parse("document contains NUL bytes".into()));
        }

        let doc = Document::from(raw);
        let body = doc.select("body");
        if body.children().is_empty() && body.text().trim().is_empty() {
            return Err(ReadItError::Parse("document has no content".into()));
        }

        Ok(Self { doc })
    }

    /// Parse a markup fragment as the body of a fresh document.
    pub fn fragment(raw: &str) -> Self {
        Self {
            doc: Document::from(raw),
        }
    }

    /// All elements matching `selector`, in document order.
    ///
    /// An invalid selector matches nothing.
    pub fn select(&self, selector: &str) -> Vec<Element<'_>> {
        match self.doc.try_select(selector) {
            Some(sel) => sel.iter().map(Element::new).collect(),
            None => Vec::new(),
        }
    }

    /// First element matching `selector`.
    pub fn select_first(&self, selector: &str) -> Option<Element<'_>> {
        self.doc
            .try_select(selector)
            .map(|sel| sel.first())
            .filter(|sel| sel.exists())
            .map(Element::new)
    }

    /// Serialized children of `<body>`.
    pub fn body_html(&self) -> String {
        self.doc.select("body").inner_html().to_string()
    }
}

/// One element of a [`MarkupDocument`].
#[derive(Clone)]
pub struct Element<'a> {
    sel: Selection<'a>,
}

impl<'a> Element<'a> {
    fn new(sel: Selection<'a>) -> Self {
        Self { sel }
    }

    /// Descendants matching `selector`, in document order.
    pub fn select(&self, selector: &str) -> Vec<Element<'a>> {
        match self.sel.try_select(selector) {
            Some(sel) => sel.iter().map(Element::new).collect(),
            None => Vec::new(),
        }
    }

    /// First descendant matching `selector`.
    pub fn select_first(&self, selector: &str) -> Option<Element<'a>> {
        self.sel
            .try_select(selector)
            .map(|sel| sel.first())
            .filter(|sel| sel.exists())
            .map(Element::new)
    }

    pub fn attr(&self, name: &str) -> Option<String> {
        self.sel.attr(name).map(|v| v.to_string())
    }

    /// Attribute value, empty when absent.
    pub fn attr_or_default(&self, name: &str) -> String {
        self.attr(name).unwrap_or_default()
    }

    /// Direct children matching `selector`, in document order.
    pub fn children_matching(&self, selector: &str) -> Vec<Element<'a>> {
        self.sel
            .children()
            .iter()
            .filter(|child| child.is(selector))
            .map(Element::new)
            .collect()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.sel.has_class(class)
    }

    /// Text content with surrounding whitespace trimmed.
    pub fn text(&self) -> String {
        self.sel.text().trim().to_string()
    }

    pub fn inner_html(&self) -> String {
        self.sel.inner_html().to_string()
    }

    pub fn outer_html(&self) -> String {
        self.sel.html().to_string()
    }

    pub fn set_attr(&self, name: &str, value: &str) {
        self.sel.set_attr(name, value);
    }

    pub fn set_text(&self, text: &str) {
        self.sel.set_text(text);
    }
}
