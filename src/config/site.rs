//! Site configuration (inkpress.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub keywords: Option<Vec<String>>,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,
    /// URL segment article pages live under (`/blog/<slug>/`)
    pub blog_root: String,

    // Directory
    pub content_dir: String,
    pub public_dir: String,
    /// Articles directory inside the content directory
    pub blog_dir: String,
    /// Author directory file, relative to the base directory
    pub authors_file: String,
    /// URL path images referenced by `thumb`/`image` resolve under
    pub blog_images_root: String,

    // Writing
    pub render_drafts: bool,

    // Article page
    /// Maximum number of entries in the related-articles panel
    pub related_limit: usize,
    /// Default maximum heading depth for the table of contents
    pub toc_max_depth: usize,
    /// Words per minute used by the reading-time estimate
    pub words_per_minute: usize,

    // Index
    pub per_page: usize,

    // Code highlighting
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Date format (Moment.js style, matching the front matter convention)
    pub date_format: String,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "inkpress".to_string(),
            description: String::new(),
            keywords: None,
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),
            blog_root: "blog".to_string(),

            content_dir: "content".to_string(),
            public_dir: "public".to_string(),
            blog_dir: "_blog".to_string(),
            authors_file: "authors.json".to_string(),
            blog_images_root: "images/blog".to_string(),

            render_drafts: false,

            related_limit: 5,
            toc_max_depth: 2,
            words_per_minute: 200,

            per_page: 10,

            highlight: HighlightConfig::default(),

            date_format: "YYYY-MM-DD".to_string(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.blog_dir, "_blog");
        assert_eq!(config.related_limit, 5);
        assert_eq!(config.toc_max_depth, 2);
        assert_eq!(config.words_per_minute, 200);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Acme Engineering
url: https://acme.dev
related_limit: 3
toc_max_depth: 4
highlight:
  line_number: true
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Acme Engineering");
        assert_eq!(config.url, "https://acme.dev");
        assert_eq!(config.related_limit, 3);
        assert_eq!(config.toc_max_depth, 4);
        assert!(config.highlight.line_number);
        // Unknown keys are preserved, defaults fill the rest
        assert_eq!(config.per_page, 10);
    }

    #[test]
    fn test_extra_fields_preserved() {
        let yaml = r#"
title: Blog
twitter_handle: acmedev
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.extra.contains_key("twitter_handle"));
    }
}
