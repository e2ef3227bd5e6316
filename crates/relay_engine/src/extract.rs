use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::{Html, Selector};

use crate::CONTENT_CHAR_LIMIT;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub title: Option<String>,
    /// Visible text, capped at [`CONTENT_CHAR_LIMIT`] characters.
    pub content: String,
}

pub trait Extractor: Send + Sync {
    fn extract(&self, html: &str) -> ExtractedText;
}

/// Approximates `document.body.innerText`:
/// - pulls `<title>` text if present
/// - walks `<body>` (whole document as fallback), concatenating text nodes
/// - skips script/style/template containers that render no text
/// - caps the result at [`CONTENT_CHAR_LIMIT`] characters.
#[derive(Debug, Default)]
pub struct VisibleTextExtractor;

const INVISIBLE_CONTAINERS: &[&str] = &["script", "style", "noscript", "template", "head"];

impl Extractor for VisibleTextExtractor {
    fn extract(&self, html: &str) -> ExtractedText {
        let doc = Html::parse_document(html);
        let title_sel = Selector::parse("title").ok();
        let body_sel = Selector::parse("body").ok();

        let title = title_sel
            .as_ref()
            .and_then(|sel| doc.select(sel).next())
            .map(|t| t.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty());

        let root = body_sel
            .as_ref()
            .and_then(|sel| doc.select(sel).next())
            .unwrap_or_else(|| doc.root_element());

        let mut content = String::new();
        collect_visible_text(*root, &mut content);
        truncate_chars(&mut content, CONTENT_CHAR_LIMIT);

        ExtractedText { title, content }
    }
}

fn collect_visible_text(node: NodeRef<'_, Node>, out: &mut String) {
    match node.value() {
        Node::Element(element) => {
            if INVISIBLE_CONTAINERS.contains(&element.name()) {
                return;
            }
        }
        Node::Text(text) => {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                if !out.is_empty() {
                    out.push('\n');
                }
                out.push_str(trimmed);
            }
        }
        _ => {}
    }
    for child in node.children() {
        collect_visible_text(child, out);
    }
}

/// Truncate to at most `limit` characters, respecting UTF-8 boundaries.
fn truncate_chars(text: &mut String, limit: usize) {
    if let Some((byte_idx, _)) = text.char_indices().nth(limit) {
        text.truncate(byte_idx);
    }
}
