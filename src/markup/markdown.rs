use crate::app::{ReadItError, Result};

/// Convert an HTML fragment to markdown.
pub fn to_markdown(html: &str) -> Result<String> {
    let markdown = htmd::convert(html).map_err(|e| ReadItError::Markdown(e.to_string()))?;
    Ok(markdown.trim().to_string())
}
