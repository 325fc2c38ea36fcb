//! Table of contents extraction from markdown

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use serde::Serialize;

/// A heading in the table of contents outline
#[derive(Debug, Clone, Serialize)]
pub struct TocEntry {
    pub text: String,
    /// Anchor id, matching the id the markdown renderer puts on the heading
    pub id: String,
    pub level: usize,
    pub children: Vec<TocEntry>,
}

struct FlatHeading {
    level: usize,
    text: String,
    id: String,
}

/// Extract the heading outline from raw markdown, keeping headings up to
/// `max_depth` (h1..h{max_depth}).
pub fn extract_toc(markdown: &str, max_depth: usize) -> Vec<TocEntry> {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_HEADING_ATTRIBUTES
        | Options::ENABLE_GFM;
    let parser = Parser::new_ext(markdown, options);

    let mut flat: Vec<FlatHeading> = Vec::new();
    let mut current: Option<FlatHeading> = None;

    for event in parser {
        match event {
            Event::Start(Tag::Heading { level, id, .. }) => {
                current = Some(FlatHeading {
                    level: level as usize,
                    text: String::new(),
                    id: id.map(|s| s.to_string()).unwrap_or_default(),
                });
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(mut h) = current.take() {
                    if h.level <= max_depth {
                        if h.id.is_empty() {
                            h.id = slug::slugify(&h.text);
                        }
                        flat.push(h);
                    }
                }
            }
            Event::Text(text) => {
                if let Some(h) = current.as_mut() {
                    h.text.push_str(&text);
                }
            }
            Event::Code(code) => {
                if let Some(h) = current.as_mut() {
                    h.text.push_str(&code);
                }
            }
            _ => {}
        }
    }

    let mut iter = flat.into_iter().peekable();
    build_tree(&mut iter, 0)
}

fn build_tree(
    entries: &mut std::iter::Peekable<std::vec::IntoIter<FlatHeading>>,
    parent_level: usize,
) -> Vec<TocEntry> {
    let mut out = Vec::new();

    while let Some(h) = entries.next_if(|next| next.level > parent_level) {
        let children = build_tree(entries, h.level);
        out.push(TocEntry {
            text: h.text,
            id: h.id,
            level: h.level,
            children,
        });
    }

    out
}

/// Render the outline as nested ordered lists. An empty outline renders to
/// an empty string so the page can skip the panel entirely.
pub fn render_toc(entries: &[TocEntry]) -> String {
    if entries.is_empty() {
        return String::new();
    }
    let mut html = String::from(r#"<ol class="toc">"#);
    render_entries(entries, &mut html);
    html.push_str("</ol>");
    html
}

fn render_entries(entries: &[TocEntry], html: &mut String) {
    for entry in entries {
        html.push_str(&format!(
            r##"<li class="toc-item toc-level-{}"><a class="toc-link" href="#{}"><span class="toc-text">{}</span></a>"##,
            entry.level,
            entry.id,
            escape_html(&entry.text)
        ));
        if !entry.children.is_empty() {
            html.push_str("<ol>");
            render_entries(&entry.children, html);
            html.push_str("</ol>");
        }
        html.push_str("</li>");
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"
# Title

Intro text.

## Setup

### Install

### Configure

## Usage

Some `code` here.

### Advanced usage
"#;

    #[test]
    fn test_extract_respects_max_depth() {
        let toc = extract_toc(DOC, 2);
        // h1 + two h2, no h3
        assert_eq!(toc.len(), 1);
        assert_eq!(toc[0].text, "Title");
        assert_eq!(toc[0].children.len(), 2);
        assert!(toc[0].children.iter().all(|c| c.children.is_empty()));
    }

    #[test]
    fn test_extract_nests_h3() {
        let toc = extract_toc(DOC, 3);
        let setup = &toc[0].children[0];
        assert_eq!(setup.text, "Setup");
        assert_eq!(setup.children.len(), 2);
        assert_eq!(setup.children[0].text, "Install");
        assert_eq!(setup.children[0].id, "install");
    }

    #[test]
    fn test_anchor_matches_slug() {
        let toc = extract_toc("## Getting Started Fast", 2);
        assert_eq!(toc[0].id, "getting-started-fast");
    }

    #[test]
    fn test_heading_with_inline_code() {
        let toc = extract_toc("## Using `select`", 2);
        assert_eq!(toc[0].text, "Using select");
        assert_eq!(toc[0].id, "using-select");
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_toc(&[]), "");
        assert_eq!(render_toc(&extract_toc("No headings here.", 2)), "");
    }

    #[test]
    fn test_render_nested_lists() {
        let html = render_toc(&extract_toc(DOC, 3));
        assert!(html.starts_with(r#"<ol class="toc">"#));
        assert!(html.contains(r##"href="#setup""##));
        assert!(html.contains(r##"href="#install""##));
        assert!(html.contains("toc-level-3"));
    }

    #[test]
    fn test_no_deep_headings_in_shallow_toc() {
        let html = render_toc(&extract_toc(DOC, 2));
        assert!(!html.contains("Install"));
        assert!(!html.contains("toc-level-3"));
    }
}
