//! Create a new article

use anyhow::{anyhow, Result};
use std::fs;

use crate::Site;

/// Create a new article file named after the slugified title
pub fn create_article(site: &Site, title: &str, author: Option<&str>) -> Result<()> {
    let articles_dir = site.articles_dir();
    fs::create_dir_all(&articles_dir)?;

    let slug = slug::slugify(title);
    if slug.is_empty() {
        return Err(anyhow!("Title produces an empty slug"));
    }

    let file_path = articles_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        return Err(anyhow!("Article already exists: {:?}", file_path));
    }

    let now = chrono::Local::now();
    let scaffold = format!(
        "---\ntitle: {}\ndescription: \ndate: {}\nauthor: {}\ntags: []\n---\n\n",
        title,
        now.format("%Y-%m-%d"),
        author.unwrap_or(""),
    );

    fs::write(&file_path, scaffold)?;
    println!("Created: {}", file_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

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
    fn test_create_article() {
        let tmp = tempfile::tempdir().unwrap();
        let site = temp_site(tmp.path());

        create_article(&site, "Hello World", Some("jane")).unwrap();

        let path = site.articles_dir().join("hello-world.md");
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("---\ntitle: Hello World\n"));
        assert!(content.contains("author: jane"));
    }

    #[test]
    fn test_existing_article_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let site = temp_site(tmp.path());

        create_article(&site, "Hello", None).unwrap();
        assert!(create_article(&site, "Hello", None).is_err());
    }
}
