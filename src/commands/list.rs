//! List site content

use anyhow::{anyhow, Result};
use std::collections::HashMap;

use crate::content::{sorted_summaries, ArticleLoader, AuthorDirectory};
use crate::Site;

/// List articles, tags or authors
pub fn run(site: &Site, kind: &str) -> Result<()> {
    match kind {
        "article" | "articles" | "post" => list_articles(site),
        "tag" | "tags" => list_tags(site),
        "author" | "authors" => list_authors(site),
        other => Err(anyhow!(
            "Unknown list type '{}', expected article, tag or author",
            other
        )),
    }
}

fn list_articles(site: &Site) -> Result<()> {
    let articles = ArticleLoader::new(site).load_articles()?;
    let summaries = sorted_summaries(&articles, None, None);

    println!("{} article(s)", summaries.len());
    for summary in &summaries {
        println!("  {}  {}  {}", summary.date, summary.slug, summary.title);
    }

    Ok(())
}

fn list_tags(site: &Site) -> Result<()> {
    let articles = ArticleLoader::new(site).load_articles()?;

    let mut tags: HashMap<String, usize> = HashMap::new();
    for article in &articles {
        for tag in &article.tags {
            *tags.entry(tag.clone()).or_insert(0) += 1;
        }
    }

    let mut sorted: Vec<_> = tags.into_iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));

    for (tag, count) in sorted {
        println!("  {}  ({})", tag, count);
    }

    Ok(())
}

fn list_authors(site: &Site) -> Result<()> {
    let authors = AuthorDirectory::load(site.authors_file())?;

    for author in authors.all() {
        match &author.position {
            Some(position) => println!("  {}  {} ({})", author.id, author.name, position),
            None => println!("  {}  {}", author.id, author.name),
        }
    }

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
    fn test_list_articles() {
        let tmp = tempfile::tempdir().unwrap();
        let site = temp_site(tmp.path());
        let dir = site.articles_dir();
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("hello.md"),
            "---\ntitle: Hello\ndate: 2024-03-01\n---\nBody.\n",
        )
        .unwrap();

        assert!(run(&site, "article").is_ok());
        assert!(run(&site, "tag").is_ok());
        assert!(run(&site, "author").is_ok());
    }

    #[test]
    fn test_unknown_type_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let site = temp_site(tmp.path());
        assert!(run(&site, "widget").is_err());
    }
}
