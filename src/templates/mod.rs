//! Embedded "paper" theme rendered with Tera
//!
//! All templates ship inside the binary; there is no external theme loading.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

/// Stylesheet written to `css/style.css` in the output directory
pub const STYLESHEET: &str = include_str!("paper/style.css");

/// Template renderer with the embedded paper theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all paper templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // We are generating HTML from trusted local content; escaping would
        // mangle the rendered markdown and the meta tag block
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("paper/layout.html")),
            ("index.html", include_str!("paper/index.html")),
            ("article.html", include_str!("paper/article.html")),
            (
                "partials/head.html",
                include_str!("paper/partials/head.html"),
            ),
            (
                "partials/header.html",
                include_str!("paper/partials/header.html"),
            ),
            (
                "partials/footer.html",
                include_str!("paper/partials/footer.html"),
            ),
            (
                "partials/authors.html",
                include_str!("paper/partials/authors.html"),
            ),
            (
                "partials/article_nav.html",
                include_str!("paper/partials/article_nav.html"),
            ),
            (
                "partials/related.html",
                include_str!("paper/partials/related.html"),
            ),
        ])?;

        tera.register_filter("strip_html", strip_html_filter);
        tera.register_filter("truncate_chars", truncate_chars_filter);
        tera.register_filter("date_format", date_format_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: strip HTML tags
fn strip_html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("strip_html", "value", String, value);
    let mut result = String::with_capacity(s.len());
    let mut in_tag = false;
    for c in s.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }
    Ok(tera::Value::String(result))
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 160,
    };
    let omission = match args.get("omission") {
        Some(val) => tera::try_get_value!("truncate_chars", "omission", String, val),
        None => "…".to_string(),
    };

    if s.chars().count() <= length {
        Ok(tera::Value::String(s))
    } else {
        let truncated: String = s.chars().take(length).collect();
        Ok(tera::Value::String(format!(
            "{}{}",
            truncated.trim_end(),
            omission
        )))
    }
}

/// Tera filter: reformat a YYYY-MM-DD date string
fn date_format_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_format", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("date_format", "format", String, val),
        None => "YYYY-MM-DD".to_string(),
    };

    // "LL" asks for the long form ("March 2, 2024")
    if format == "LL" {
        if let Ok(date) = chrono::NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
            return Ok(tera::Value::String(date.format("%B %-d, %Y").to_string()));
        }
    }

    Ok(tera::Value::String(s))
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct ConfigData {
    pub title: String,
    pub description: String,
    pub url: String,
    pub root: String,
    pub blog_root: String,
    pub language: String,
}

/// Article fields the article page template consumes
#[derive(Debug, Clone, Serialize)]
pub struct ArticleData {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub date: String,
    pub reading_time: String,
    pub tags: Vec<String>,
    pub content: String,
    pub path: String,
    pub thumb_url: Option<String>,
    pub video: Option<String>,
}

/// Author card shown in the article byline
#[derive(Debug, Clone, Serialize)]
pub struct AuthorCard {
    pub name: String,
    pub position: String,
    pub url: Option<String>,
    pub avatar: Option<String>,
}

/// Prev/next navigation card
#[derive(Debug, Clone, Serialize)]
pub struct NavCard {
    pub title: String,
    pub date: String,
    pub path: String,
}

/// Entry in the related-articles panel
#[derive(Debug, Clone, Serialize)]
pub struct RelatedEntry {
    pub title: String,
    pub path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaginationData {
    pub total: usize,
    pub current: usize,
    pub prev_link: String,
    pub next_link: String,
}
