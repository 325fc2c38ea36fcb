//! SEO metadata for article pages
//!
//! Builds the head-level metadata for an article: document title, meta
//! description, and the Open Graph article block (published time, tags,
//! image, optional video).

use serde::Serialize;

use crate::config::SiteConfig;
use crate::content::{Article, Author};
use crate::helpers::blog_image_url;

/// Resolved metadata for one article page
#[derive(Debug, Clone, Serialize)]
pub struct ArticleSeo {
    pub title: String,
    pub description: String,
    /// Canonical page URL
    pub url: String,
    /// RFC 3339 publication time
    pub published_time: String,
    pub tags: Vec<String>,
    /// Absolute social image URL; `image` wins over `thumb`
    pub image: Option<String>,
    pub image_alt: String,
    /// External video URL for video articles
    pub video: Option<String>,
    /// Author profile URLs
    pub author_urls: Vec<String>,
}

impl ArticleSeo {
    /// Build metadata for an article with its resolved authors
    pub fn for_article(config: &SiteConfig, article: &Article, authors: &[&Author]) -> Self {
        let image = article
            .image
            .as_deref()
            .or(article.thumb.as_deref())
            .map(|file| blog_image_url(config, file));

        let mut author_urls: Vec<String> = authors
            .iter()
            .filter_map(|a| a.url.clone())
            .collect();
        if author_urls.is_empty() {
            if let Some(url) = &article.author_url {
                author_urls.push(url.clone());
            }
        }

        Self {
            title: article.title.clone(),
            description: article.description.clone().unwrap_or_default(),
            url: article.permalink.clone(),
            published_time: article.date.to_rfc3339(),
            tags: article.tags.clone(),
            image,
            image_alt: format!("{} thumbnail", article.title),
            video: article.video.clone(),
            author_urls,
        }
    }

    /// Render the metadata as head markup
    pub fn meta_tags(&self) -> String {
        let mut head = String::new();

        head.push_str(&format!("<title>{}</title>\n", escape(&self.title)));
        head.push_str(&meta_name("description", &self.description));

        head.push_str(&meta_property("og:title", &self.title));
        head.push_str(&meta_property("og:description", &self.description));
        head.push_str(&meta_property("og:url", &self.url));
        head.push_str(&meta_property("og:type", "article"));
        head.push_str(&meta_property(
            "article:published_time",
            &self.published_time,
        ));

        for url in &self.author_urls {
            head.push_str(&meta_property("article:author", url));
        }
        for tag in &self.tags {
            head.push_str(&meta_property("article:tag", tag));
        }

        if let Some(image) = &self.image {
            head.push_str(&meta_property("og:image", image));
            head.push_str(&meta_property("og:image:alt", &self.image_alt));
        }
        if let Some(video) = &self.video {
            head.push_str(&meta_property("og:video", video));
        }

        head
    }
}

fn meta_property(property: &str, content: &str) -> String {
    if content.is_empty() {
        return String::new();
    }
    format!(
        "<meta property=\"{}\" content=\"{}\">\n",
        property,
        escape(content)
    )
}

fn meta_name(name: &str, content: &str) -> String {
    if content.is_empty() {
        return String::new();
    }
    format!(
        "<meta name=\"{}\" content=\"{}\">\n",
        name,
        escape(content)
    )
}

/// Escape HTML attribute/text content
fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn article() -> Article {
        Article {
            slug: "launch".to_string(),
            title: "Launch & Learn".to_string(),
            description: Some("What we shipped".to_string()),
            date: Local.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap(),
            updated: None,
            authors: vec!["jane".to_string()],
            author_url: None,
            tags: vec!["product".to_string(), "launch".to_string()],
            thumb: Some("launch/thumb.png".to_string()),
            image: None,
            video: None,
            toc_depth: None,
            raw: String::new(),
            content: String::new(),
            source: "launch.md".to_string(),
            full_source: PathBuf::from("launch.md"),
            path: "/blog/launch/".to_string(),
            permalink: "https://acme.dev/blog/launch/".to_string(),
            published: true,
            reading_time: 1,
            extra: HashMap::new(),
        }
    }

    fn config() -> SiteConfig {
        SiteConfig {
            url: "https://acme.dev".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_title_and_description_from_front_matter() {
        let seo = ArticleSeo::for_article(&config(), &article(), &[]);
        assert_eq!(seo.title, "Launch & Learn");
        assert_eq!(seo.description, "What we shipped");
        let tags = seo.meta_tags();
        assert!(tags.contains("<title>Launch &amp; Learn</title>"));
        assert!(tags.contains(r#"content="What we shipped""#));
    }

    #[test]
    fn test_thumb_fallback_image() {
        let seo = ArticleSeo::for_article(&config(), &article(), &[]);
        assert_eq!(
            seo.image.as_deref(),
            Some("https://acme.dev/images/blog/launch/thumb.png")
        );
    }

    #[test]
    fn test_explicit_image_wins() {
        let mut a = article();
        a.image = Some("launch/social.png".to_string());
        let seo = ArticleSeo::for_article(&config(), &a, &[]);
        assert_eq!(
            seo.image.as_deref(),
            Some("https://acme.dev/images/blog/launch/social.png")
        );
    }

    #[test]
    fn test_article_tags_emitted() {
        let seo = ArticleSeo::for_article(&config(), &article(), &[]);
        let tags = seo.meta_tags();
        assert!(tags.contains(r#"<meta property="article:tag" content="product">"#));
        assert!(tags.contains(r#"<meta property="article:tag" content="launch">"#));
        assert!(tags.contains(r#"<meta property="og:type" content="article">"#));
    }

    #[test]
    fn test_video_meta() {
        let mut a = article();
        a.video = Some("https://youtu.be/xyz".to_string());
        let seo = ArticleSeo::for_article(&config(), &a, &[]);
        assert!(seo
            .meta_tags()
            .contains(r#"<meta property="og:video" content="https://youtu.be/xyz">"#));
    }

    #[test]
    fn test_author_urls_from_directory() {
        let author = Author {
            id: "jane".to_string(),
            name: "Jane Doe".to_string(),
            position: None,
            url: Some("https://github.com/jane".to_string()),
            avatar: None,
        };
        let seo = ArticleSeo::for_article(&config(), &article(), &[&author]);
        assert!(seo
            .meta_tags()
            .contains(r#"<meta property="article:author" content="https://github.com/jane">"#));
    }
}
