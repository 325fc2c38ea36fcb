//! inkpress: a static blog generator for markdown articles
//!
//! Articles live as markdown files with YAML front matter, authors come from
//! a static `authors.json` directory, and pages are rendered through embedded
//! Tera templates.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod seo;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::Path;

/// Configuration file name looked up in the site base directory
pub const CONFIG_FILE: &str = "inkpress.yml";

/// A blog site rooted at a base directory
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Content directory (articles and assets)
    pub content_dir: std::path::PathBuf,
    /// Public (output) directory
    pub public_dir: std::path::PathBuf,
}

impl Site {
    /// Open a site from a directory, loading `inkpress.yml` if present
    pub fn open<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
            public_dir,
        })
    }

    /// Path to the articles directory (`content/_blog` by default)
    pub fn articles_dir(&self) -> std::path::PathBuf {
        self.content_dir.join(&self.config.blog_dir)
    }

    /// Path to the author directory file
    pub fn authors_file(&self) -> std::path::PathBuf {
        self.base_dir.join(&self.config.authors_file)
    }

    /// Generate the static site
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new article
    pub fn new_article(&self, title: &str) -> Result<()> {
        commands::new::create_article(self, title, None)
    }
}
