//! Show a single article's resolved metadata

use anyhow::{anyhow, Result};

use crate::content::ArticleLoader;
use crate::helpers::reading_time_label;
use crate::Site;

/// Look an article up by slug and print how it resolves
pub fn run(site: &Site, slug: &str) -> Result<()> {
    let article = ArticleLoader::new(site)
        .load_by_slug(slug)?
        .ok_or_else(|| anyhow!("No article with slug '{}'", slug))?;

    println!("title:        {}", article.title);
    if let Some(description) = &article.description {
        println!("description:  {}", description);
    }
    println!("date:         {}", article.date.format("%Y-%m-%d"));
    if !article.authors.is_empty() {
        println!("authors:      {}", article.authors.join(", "));
    }
    if !article.tags.is_empty() {
        println!("tags:         {}", article.tags.join(", "));
    }
    println!("path:         {}", article.path);
    println!("permalink:    {}", article.permalink);
    println!("reading time: {}", reading_time_label(article.reading_time));
    println!("source:       {}", article.source);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use std::fs;

    fn temp_site(dir: &std::path::Path) -> Site {
        let config = SiteConfig::default();
        Site {
            content_dir: dir.join(&config.content_dir),
            public_dir: dir.join(&config.public_dir),
            base_dir: dir.to_path_buf(),
            config,
        }
    }

    #[test]
    fn test_show_resolves_slug() {
        let tmp = tempfile::tempdir().unwrap();
        let site = temp_site(tmp.path());
        let dir = site.articles_dir();
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("hello.md"),
            "---\ntitle: Hello\ndate: 2024-03-01\n---\nBody.\n",
        )
        .unwrap();

        assert!(run(&site, "hello").is_ok());
    }

    #[test]
    fn test_show_missing_slug_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let site = temp_site(tmp.path());
        assert!(run(&site, "nope").is_err());
    }
}
