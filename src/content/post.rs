//! Article model and list navigation

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// A blog article
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    /// URL-safe identifier, taken from the source file name
    pub slug: String,

    /// Article title
    pub title: String,

    /// Meta description
    pub description: Option<String>,

    /// Publication date
    pub date: DateTime<Local>,

    /// Last updated date
    pub updated: Option<DateTime<Local>>,

    /// Author ids, resolved against the author directory at render time
    pub authors: Vec<String>,

    /// External author profile URL from the front matter
    pub author_url: Option<String>,

    /// Article tags
    pub tags: Vec<String>,

    /// Thumbnail image file under the blog images root
    pub thumb: Option<String>,

    /// Social image file, `thumb` is the fallback
    pub image: Option<String>,

    /// External video URL
    pub video: Option<String>,

    /// Per-article table of contents depth override
    pub toc_depth: Option<usize>,

    /// Raw markdown body
    pub raw: String,

    /// Rendered HTML body
    pub content: String,

    /// Source file path (relative to the articles directory)
    pub source: String,

    /// Full source file path
    pub full_source: PathBuf,

    /// URL path (with root)
    pub path: String,

    /// Full permalink URL
    pub permalink: String,

    /// Whether the article is published
    pub published: bool,

    /// Reading time in minutes
    pub reading_time: usize,

    /// Custom front matter fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Article {
    /// Summary record for navigation and the related panel
    pub fn summary(&self) -> ArticleSummary {
        ArticleSummary {
            slug: self.slug.clone(),
            title: self.title.clone(),
            date: self.date.format("%Y-%m-%d").to_string(),
            path: self.path.clone(),
            tags: self.tags.clone(),
        }
    }

    /// The previous (older) article in a newest-first list, None at the end
    pub fn prev<'a>(&self, articles: &'a [Article]) -> Option<&'a Article> {
        let pos = articles.iter().position(|a| a.slug == self.slug)?;
        articles.get(pos + 1)
    }

    /// The next (newer) article in a newest-first list, None at the start
    pub fn next<'a>(&self, articles: &'a [Article]) -> Option<&'a Article> {
        let pos = articles.iter().position(|a| a.slug == self.slug)?;
        if pos > 0 {
            Some(&articles[pos - 1])
        } else {
            None
        }
    }

    /// Articles sharing at least one tag with this one, newest first,
    /// excluding this article, at most `limit` entries.
    pub fn related<'a>(&self, articles: &'a [Article], limit: usize) -> Vec<&'a Article> {
        articles
            .iter()
            .filter(|a| a.slug != self.slug)
            .filter(|a| a.tags.iter().any(|t| self.tags.contains(t)))
            .take(limit)
            .collect()
    }
}

/// Lightweight article record used by listings and navigation cards
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleSummary {
    pub slug: String,
    pub title: String,
    pub date: String,
    pub path: String,
    pub tags: Vec<String>,
}
