//! Link extraction from HTML anchor tags
//!
//! Only absolute links are reported: an `href` is kept when it starts with
//! `http`. Relative paths, `mailto:`, `javascript:` and fragment-only hrefs are
//! dropped silently. When a tag carries the `href` attribute more than once,
//! the last occurrence wins.
//!
//! Documents are tokenized by `lol_html`, which follows the HTML5 tokenizer
//! states: markup inside `script`, `style`, `title`, `textarea` and the other
//! text-only elements is never reported as an anchor.

use crate::Result;
use lol_html::send::{HtmlRewriter, Settings};
use lol_html::element;
use parking_lot::Mutex;
use std::sync::Arc;

/// Output sink for the rewriter; the rewritten document is not needed
type Discard = fn(&[u8]);

fn discard(_: &[u8]) {}

/// Returns the absolute link carried by an anchor, given its `href` values in
/// source order
///
/// The last `href` wins, and is dropped unless it starts with `http`.
pub fn anchor_link<I>(hrefs: I) -> Option<String>
where
    I: IntoIterator<Item = String>,
{
    hrefs
        .into_iter()
        .last()
        .map(|href| html_escape::decode_html_entities(&href).into_owned())
        .filter(|href| href.starts_with("http"))
}

/// Extracts all absolute anchor links from a complete HTML document
///
/// # Example
///
/// ```
/// use ripple_crawler::crawler::extract_links;
///
/// let html = r#"<a href="http://a.com">A</a><a href="/relative">R</a>"#;
/// assert_eq!(extract_links(html).unwrap(), vec!["http://a.com".to_string()]);
/// ```
pub fn extract_links(html: &str) -> Result<Vec<String>> {
    let mut extractor = LinkExtractor::new();
    let mut links = extractor.feed(html.as_bytes())?;
    links.extend(extractor.finish()?);
    Ok(links)
}

/// Streaming link extractor fed with response body chunks
///
/// A tag split across chunks is reported once the chunk completing it is fed.
pub struct LinkExtractor {
    rewriter: HtmlRewriter<'static, Discard>,
    found: Arc<Mutex<Vec<String>>>,
}

impl LinkExtractor {
    pub fn new() -> Self {
        let found = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&found);

        let rewriter = HtmlRewriter::new(
            Settings {
                element_content_handlers: vec![element!("a", move |el| {
                    let hrefs = el
                        .attributes()
                        .iter()
                        .filter(|attr| attr.name() == "href")
                        .map(|attr| attr.value());
                    if let Some(link) = anchor_link(hrefs) {
                        sink.lock().push(link);
                    }
                    Ok(())
                })],
                ..Settings::new_send()
            },
            discard as Discard,
        );

        Self { rewriter, found }
    }

    /// Feeds a body chunk and returns the links completed by it
    pub fn feed(&mut self, chunk: &[u8]) -> Result<Vec<String>> {
        self.rewriter.write(chunk)?;
        Ok(self.take())
    }

    /// Signals the end of the document and returns any remaining links
    ///
    /// Markup left unterminated at the end is dropped.
    pub fn finish(self) -> Result<Vec<String>> {
        self.rewriter.end()?;
        let links = std::mem::take(&mut *self.found.lock());
        Ok(links)
    }

    fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut *self.found.lock())
    }
}

impl Default for LinkExtractor {
    fn default() -> Self {
        Self::new()
    }
}
